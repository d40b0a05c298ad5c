//! Read operations for event files and collected batches
//!
//! Event files are JSON lines produced by the Monte Carlo chain, named
//! `<anything>.voltage.json`. Only the first line holds the event record, any
//! further lines belong to later stages of the chain and are ignored.

// standard library
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

// crate modules
use crate::batch::Batch;
use crate::error::{Error, Result};
use crate::event::Event;
use crate::raw::RawEvent;

// external crates
use kdam::{Bar, BarBuilder, BarExt};
use log::{info, trace, warn};

/// Suffix identifying event files in a directory
pub const EVENT_FILE_SUFFIX: &str = ".voltage.json";

/// Read the event record from a single event file
///
/// Returns a validated [Event]. An empty file, a record with missing or
/// mistyped fields, or a record that fails validation are all reported as a
/// [Error::SchemaError].
///
/// ```rust, no_run
/// # use tautools_events::read_event_file;
/// let event = read_event_file("path/to/event.voltage.json").unwrap();
/// println!("{} primaries", event.primaries.size());
/// ```
pub fn read_event_file<P: AsRef<Path>>(path: P) -> Result<Event> {
    let path = path.as_ref();
    let source = path.display().to_string();
    let reader = init_reader(path)?;

    let line = match reader.lines().next() {
        Some(line) => line?,
        None => return Err(Error::schema(source, "no event record in file")),
    };

    let event = Event::try_from(RawEvent::from_line(&line, &source)?)?;
    trace!(
        "{source}: \"{}\" with {} primaries",
        event.tag,
        event.primaries.size()
    );
    Ok(event)
}

/// List every event file in a directory
///
/// Paths are sorted so that repeated runs fold the events in the same order,
/// which keeps summed rates reproducible to the last bit.
pub fn find_event_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(Error::NotADirectory(dir.to_path_buf()));
    }

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_event_file = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(EVENT_FILE_SUFFIX));

        if is_event_file && path.is_file() {
            paths.push(path);
        }
    }

    paths.sort();
    Ok(paths)
}

/// Deserialise a batch written by [write_batch()](crate::write_batch)
///
/// The batch is validated again after decoding.
pub fn read_batch<P: AsRef<Path>>(path: P) -> Result<Batch> {
    let reader = init_reader(path.as_ref())?;
    let batch: Batch = bincode::deserialize_from(reader)?;
    batch.validate()?;
    info!(
        "Loaded {} events ({} primaries) from {:?}",
        batch.len(),
        batch.n_neutrinos(),
        path.as_ref()
    );
    Ok(batch)
}

/// Collects every event file of a directory into a [Batch]
///
/// By default any file that can not be read aborts the collection. With
/// [Collector::skip_unreadable()] such files are logged and left out instead.
/// Batch level problems, like events with different origins, are always fatal.
///
/// ```rust, no_run
/// # use tautools_events::Collector;
/// let batch = Collector::new()
///     .skip_unreadable(true)
///     .disable_progress(true)
///     .collect("path/to/events/")
///     .unwrap();
/// ```
#[derive(Debug, Default, Clone)]
pub struct Collector {
    skip_unreadable: bool,
    disable_progress: bool,
}

impl Collector {
    /// New collector, strict and with a progress bar
    pub fn new() -> Self {
        Self::default()
    }

    /// Leave out files that fail to read instead of failing the batch
    pub fn skip_unreadable(mut self, skip: bool) -> Self {
        self.skip_unreadable = skip;
        self
    }

    /// Turn off the progress bar
    pub fn disable_progress(mut self, disable: bool) -> Self {
        self.disable_progress = disable;
        self
    }

    /// Read all event files in `dir` and build the batch
    pub fn collect<P: AsRef<Path>>(&self, dir: P) -> Result<Batch> {
        let paths = find_event_files(&dir)?;
        info!("Found {} event files in {:?}", paths.len(), dir.as_ref());

        let mut progress_bar = self.init_progress_bar(paths.len())?;
        if !self.disable_progress {
            progress_bar.refresh()?;
        }

        let mut events = Vec::with_capacity(paths.len());
        for path in &paths {
            match read_event_file(path) {
                Ok(event) => events.push(event),
                Err(e) if self.skip_unreadable => warn!("Skipping {path:?}: {e}"),
                Err(e) => return Err(e),
            }
            progress_bar.update(1)?;
        }

        if !self.disable_progress {
            eprintln!();
        }

        if events.len() < paths.len() {
            warn!("Skipped {} of {} files", paths.len() - events.len(), paths.len());
        }

        Batch::new(events)
    }

    /// Initialise the progress bar, if wanted
    fn init_progress_bar(&self, total: usize) -> Result<Bar> {
        BarBuilder::default()
            .total(total)
            .desc("Collecting")
            .unit(" files")
            .disable(self.disable_progress)
            .build()
            .map_err(Error::ProgressBar)
    }
}

/// Initialise a reader from anything that can be turned into a path
fn init_reader(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path)?;
    Ok(BufReader::new(file))
}
