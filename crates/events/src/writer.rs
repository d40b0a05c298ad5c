//! Write operations for collected batches

// standard library
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

// crate modules
use crate::batch::Batch;
use crate::error::Result;

// external crates
use log::info;

/// Write a [Batch] to a compact binary file
///
/// The file round-trips every field exactly and is read back with
/// [read_batch()](crate::read_batch). Missing parent directories are created.
///
/// ```rust, no_run
/// # use tautools_events::{write_batch, Collector};
/// let batch = Collector::new().collect("path/to/events/").unwrap();
/// write_batch(&batch, "./events.bin").unwrap();
/// ```
pub fn write_batch<P: AsRef<Path>>(batch: &Batch, path: P) -> Result<()> {
    let writer = init_writer(path.as_ref())?;
    bincode::serialize_into(writer, batch)?;
    info!("Wrote {} events to {:?}", batch.len(), path.as_ref());
    Ok(())
}

/// Write a [Batch] to a JSON file
///
/// Intended for inspection. This is a direct serialisation of the typed
/// records, so the primaries are column-wise rather than the row layout of the
/// original event files.
pub fn write_batch_json<P: AsRef<Path>>(batch: &Batch, path: P) -> Result<()> {
    let writer = init_writer(path.as_ref())?;
    serde_json::to_writer_pretty(writer, batch)?;
    info!("Wrote {} events to {:?}", batch.len(), path.as_ref());
    Ok(())
}

/// Initialise a writer, creating the parent directory if needed
fn init_writer(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(BufWriter::new(file))
}
