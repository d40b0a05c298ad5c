//! Subcommand implementations

// standard library
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

// crate modules
use crate::cli::{CollectArgs, SpectraArgs};
use crate::error::{Error, Result};

// tautools modules
use tautools_events::{read_batch, write_batch, write_batch_json, Batch, Collector};
use tautools_flux::{
    exposure, fluxify_batch, Exposure, InverseSquareFlux, NeutrinoAttribute, TauAttribute,
};
use tautools_histogram::{Sample, Selection, Transform, WeightedHistogram};
use tautools_utils::ValueExt;

// external crates
use log::{debug, info};
use serde::Serialize;

/// Everything written by the spectra command
#[derive(Debug, Serialize)]
pub struct Spectra {
    /// Yearly rate and average exposure
    pub summary: Exposure,
    /// Tau azimuth, uniform bins
    pub tau_angle: WeightedHistogram,
    /// Tau energy, log bins
    pub tau_energy: WeightedHistogram,
    /// Primary neutrino energy, log bins
    pub neutrino_energy: WeightedHistogram,
}

/// Collect event files into a batch file
pub fn collect(args: &CollectArgs, progress: bool) -> Result<Batch> {
    let batch = Collector::new()
        .skip_unreadable(args.skip_unreadable)
        .disable_progress(!progress)
        .collect(&args.path)?;

    write_batch(&batch, &args.output)?;
    if args.json {
        write_batch_json(&batch, args.output.with_extension("json"))?;
    }

    println!(
        "Collected {} events ({} neutrinos) at origin {}",
        batch.len(),
        batch.n_neutrinos(),
        batch.origin
    );
    Ok(batch)
}

/// Fold a batch with the flux and write the spectra
pub fn spectra(args: &SpectraArgs, progress: bool) -> Result<Spectra> {
    let batch = load_batch(&args.path, progress)?;
    let model = InverseSquareFlux::new(args.normalisation);
    let fluxed = fluxify_batch(&batch, &model)?;

    let summary = exposure(&fluxed.taus, &model, args.emin, args.emax)?;

    // every spectrum is built before anything is reported
    let spectra = Spectra {
        summary,
        tau_angle: spectrum(
            "tau_angle",
            &fluxed.taus,
            TauAttribute::Angle,
            args.bins,
            Transform::Uniform,
        )?,
        tau_energy: spectrum(
            "tau_energy",
            &fluxed.taus,
            TauAttribute::Energy,
            args.bins,
            Transform::Log,
        )?,
        neutrino_energy: spectrum(
            "neutrino_energy",
            &fluxed.neutrinos,
            NeutrinoAttribute::Energy,
            args.bins,
            Transform::Log,
        )?,
    };
    debug!("Tau energy spectrum\n{}", spectra.tau_energy);

    println!("rate = {:.2} events / year", summary.rate);
    println!("exposure = {} m^2 sr", summary.exposure.sci(2, 2));

    write_spectra_json(&spectra, &args.output)?;
    Ok(spectra)
}

/// Histogram one attribute, naming the spectrum on failure
fn spectrum<S: Sample>(
    name: &'static str,
    selection: &Selection<S>,
    attribute: S::Attribute,
    bins: usize,
    transform: Transform,
) -> Result<WeightedHistogram> {
    let histogram = selection
        .histogram(attribute, bins, transform)
        .map_err(|source| Error::Spectrum { name, source })?;

    match histogram.y_range() {
        Some((min, max)) => debug!(
            "{name}: {} bins, non-empty values in [{}, {}]",
            histogram.len(),
            min.sci(2, 2),
            max.sci(2, 2)
        ),
        None => debug!("{name}: {} bins, all empty", histogram.len()),
    }
    Ok(histogram)
}

/// Read a batch file, or collect a directory of event files on the fly
fn load_batch(path: &Path, progress: bool) -> Result<Batch> {
    if path.is_dir() {
        info!("Collecting events from {path:?}");
        Ok(Collector::new().disable_progress(!progress).collect(path)?)
    } else if path.is_file() {
        Ok(read_batch(path)?)
    } else {
        Err(Error::MissingInput(path.to_path_buf()))
    }
}

/// Write the named spectra as pretty JSON
pub fn write_spectra_json<P: AsRef<Path>>(spectra: &Spectra, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, spectra)?;
    info!("Wrote spectra to {path:?}");
    Ok(())
}
