//! Typed records for a single simulated tau decay

// crate modules
use crate::error::{Error, Result};

// external crates
use serde::{Deserialize, Serialize};

/// Tau candidate event
///
/// One simulated trial that produced a tau right before its decay, with the
/// primary neutrino ancestors that contribute Monte Carlo weight to it.
///
/// Events are only ever built through ingestion or deserialisation, and should
/// be checked with [Event::validate()] before use. The [Batch](crate::Batch)
/// constructor does this for every event it is given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Free-form label of the event, usually the generating run
    pub tag: String,
    /// Local frame origin declared by the event file
    pub origin: Origin,
    /// Primary neutrino ancestors
    pub primaries: Primaries,
    /// Monte Carlo statistics of the run
    pub statistics: Statistics,
    /// State of the tau right before its decay
    pub tau: TauAtDecay,
}

impl Event {
    /// Check every field the weighting depends on
    ///
    /// Any failure is a [Error::SchemaError] naming the event tag.
    pub fn validate(&self) -> Result<()> {
        self.statistics.validate(&self.tag)?;
        self.primaries.validate(&self.tag)?;
        self.tau.validate(&self.tag)
    }
}

/// Local frame origin
///
/// Every event in a batch has to share the same origin, compared exactly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Origin {
    /// Latitude (deg)
    pub latitude: f64,
    /// Longitude (deg)
    pub longitude: f64,
}

impl Origin {
    /// New origin from a latitude and longitude in degrees
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// Monte Carlo statistics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// Number of tau trials, becomes the normalisation of a selection
    pub tau_trials: f64,
    /// Number of neutrino trials, divides the primary rates
    pub neutrino_trials: f64,
}

impl Statistics {
    /// Trial counts must be finite, `neutrino_trials` strictly positive
    pub fn validate(&self, tag: &str) -> Result<()> {
        if !(self.neutrino_trials.is_finite() && self.neutrino_trials > 0.0) {
            return Err(Error::schema(
                tag,
                format!(
                    "neutrino_trials must be strictly positive (found {})",
                    self.neutrino_trials
                ),
            ));
        }

        if !(self.tau_trials.is_finite() && self.tau_trials >= 0.0) {
            return Err(Error::schema(
                tag,
                format!(
                    "tau_trials must be non-negative (found {})",
                    self.tau_trials
                ),
            ));
        }

        Ok(())
    }
}

/// Primary neutrino ancestors, stored column-wise
///
/// Only `weight` and `energy` are used to compute rates. The remaining columns
/// are kept for traceability. All columns have the same length, see
/// [Primaries::size()].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Primaries {
    /// Monte Carlo weight (GeV m^2 sr)
    pub weight: Vec<f64>,
    /// Primary energy (GeV)
    pub energy: Vec<f64>,
    /// Generation index of each ancestor
    pub generation_index: Vec<i64>,
    /// Medium the interaction happened in
    pub medium: Vec<String>,
    /// Interaction vertex (x, y, z) in the local frame (m)
    pub local_coordinates: Vec<[f64; 3]>,
    /// Interaction vertex (latitude, longitude, height)
    pub geodetic_coordinates: Vec<[f64; 3]>,
}

impl Primaries {
    /// Number of primaries
    pub fn size(&self) -> usize {
        self.weight.len()
    }

    /// True if there are no primaries at all
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Iterator over `(weight, energy)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.weight.iter().copied().zip(self.energy.iter().copied())
    }

    /// Every column must match in length, weights must be finite and positive
    pub fn validate(&self, tag: &str) -> Result<()> {
        let size = self.size();
        let columns = [
            ("energy", self.energy.len()),
            ("generation_index", self.generation_index.len()),
            ("medium", self.medium.len()),
            ("local_coordinates", self.local_coordinates.len()),
            ("geodetic_coordinates", self.geodetic_coordinates.len()),
        ];

        if let Some((name, length)) = columns.iter().find(|(_, length)| *length != size) {
            return Err(Error::schema(
                tag,
                format!("primaries column {name} has {length} entries (expected {size})"),
            ));
        }

        if let Some(weight) = self.weight.iter().find(|w| !(w.is_finite() && **w >= 0.0)) {
            return Err(Error::schema(
                tag,
                format!("primary weight must be finite and non-negative (found {weight})"),
            ));
        }

        Ok(())
    }
}

/// Data describing a tau right before its decay
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TauAtDecay {
    /// Generation weight (GeV m^3 sr)
    pub generation_weight: f64,
    /// Energy (GeV)
    pub energy: f64,
    /// Decay vertex (x, y, z) in the local frame (m)
    pub position: [f64; 3],
    /// Direction (ux, uy, uz) in the local frame
    pub direction: [f64; 3],
    /// Decay vertex (latitude, longitude, height)
    pub geodetic_coordinates: [f64; 3],
    /// Direction as (azimuth, elevation) (deg)
    pub horizontal_coordinates: [f64; 2],
}

impl TauAtDecay {
    /// Azimuth angle of the tau direction (deg)
    pub fn azimuth(&self) -> f64 {
        self.horizontal_coordinates[0]
    }

    /// Elevation angle of the tau direction (deg)
    pub fn elevation(&self) -> f64 {
        self.horizontal_coordinates[1]
    }

    fn validate(&self, tag: &str) -> Result<()> {
        if !self.energy.is_finite() || !self.azimuth().is_finite() {
            return Err(Error::schema(
                tag,
                format!(
                    "tau energy and azimuth must be finite (found {}, {})",
                    self.energy,
                    self.azimuth()
                ),
            ));
        }
        Ok(())
    }
}
