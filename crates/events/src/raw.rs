//! Raw JSON layout of an event record
//!
//! The event files store most blocks as positional arrays rather than maps,
//! for example `"statistics": [tau_trials, neutrino_trials]`. The structures
//! here mirror that layout exactly and are converted into the typed,
//! column-wise [Event] afterwards.

// crate modules
use crate::error::{Error, Result};
use crate::event::{Event, Origin, Primaries, Statistics, TauAtDecay};

// external crates
use serde::Deserialize;

/// Event record exactly as found on one line of an event file
#[derive(Debug, Deserialize)]
pub(crate) struct RawEvent {
    tag: String,
    origin: (f64, f64),
    statistics: (f64, f64),
    primaries: Vec<RawPrimary>,
    tau_at_decay: RawTau,
}

/// `[weight, energy, generation, medium, [x, y, z], [lat, lon, height]]`
#[derive(Debug, Deserialize)]
struct RawPrimary(f64, f64, i64, RawMedium, [f64; 3], [f64; 3]);

/// `[weight, energy, [x, y, z], [ux, uy, uz], [lat, lon, height], [az, el]]`
#[derive(Debug, Deserialize)]
struct RawTau(f64, f64, [f64; 3], [f64; 3], [f64; 3], [f64; 2]);

/// Media are written either by name or by index depending on the generator
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawMedium {
    Name(String),
    Index(i64),
}

impl From<RawMedium> for String {
    fn from(medium: RawMedium) -> Self {
        match medium {
            RawMedium::Name(name) => name,
            RawMedium::Index(index) => index.to_string(),
        }
    }
}

impl RawEvent {
    /// Parse a single JSON line, any layout problem is a schema error
    pub(crate) fn from_line(line: &str, source: &str) -> Result<Self> {
        serde_json::from_str(line).map_err(|e| Error::schema(source, e.to_string()))
    }
}

impl TryFrom<RawEvent> for Event {
    type Error = Error;

    fn try_from(raw: RawEvent) -> Result<Self> {
        let n = raw.primaries.len();
        let mut primaries = Primaries {
            weight: Vec::with_capacity(n),
            energy: Vec::with_capacity(n),
            generation_index: Vec::with_capacity(n),
            medium: Vec::with_capacity(n),
            local_coordinates: Vec::with_capacity(n),
            geodetic_coordinates: Vec::with_capacity(n),
        };

        for RawPrimary(weight, energy, generation, medium, local, geodetic) in raw.primaries {
            primaries.weight.push(weight);
            primaries.energy.push(energy);
            primaries.generation_index.push(generation);
            primaries.medium.push(medium.into());
            primaries.local_coordinates.push(local);
            primaries.geodetic_coordinates.push(geodetic);
        }

        let RawTau(generation_weight, energy, position, direction, geodetic, horizontal) =
            raw.tau_at_decay;

        let event = Event {
            tag: raw.tag,
            origin: Origin::new(raw.origin.0, raw.origin.1),
            primaries,
            statistics: Statistics {
                tau_trials: raw.statistics.0,
                neutrino_trials: raw.statistics.1,
            },
            tau: TauAtDecay {
                generation_weight,
                energy,
                position,
                direction,
                geodetic_coordinates: geodetic,
                horizontal_coordinates: horizontal,
            },
        };

        event.validate()?;
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &str = r#"{
        "tag": "run-7",
        "origin": [42.1, 86.3],
        "statistics": [12.0, 1e6],
        "primaries": [
            [1.0, 1e8, 0, "Rock", [1.0, 2.0, 3.0], [42.1, 86.3, 100.0]],
            [2.0, 1e9, 1, 3, [4.0, 5.0, 6.0], [42.2, 86.4, 200.0]]
        ],
        "tau_at_decay": [
            0.5, 5e7, [10.0, 20.0, 30.0], [0.0, 0.6, 0.8], [42.3, 86.5, 1500.0], [123.0, 2.5]
        ]
    }"#;

    #[test]
    fn parse_positional_layout() {
        let event = Event::try_from(RawEvent::from_line(LINE, "test").unwrap()).unwrap();

        assert_eq!(event.tag, "run-7");
        assert_eq!(event.origin, Origin::new(42.1, 86.3));
        assert_eq!(event.statistics.tau_trials, 12.0);
        assert_eq!(event.statistics.neutrino_trials, 1e6);
        assert_eq!(event.primaries.weight, vec![1.0, 2.0]);
        assert_eq!(event.primaries.energy, vec![1e8, 1e9]);
        assert_eq!(event.primaries.generation_index, vec![0, 1]);
        assert_eq!(event.primaries.medium, vec!["Rock", "3"]);
        assert_eq!(event.primaries.local_coordinates[1], [4.0, 5.0, 6.0]);
        assert_eq!(event.tau.energy, 5e7);
        assert_eq!(event.tau.azimuth(), 123.0);
        assert_eq!(event.tau.elevation(), 2.5);
    }

    #[test]
    fn missing_field_is_schema_error() {
        let line = r#"{"tag": "x", "origin": [0.0, 0.0], "statistics": [1.0, 1.0]}"#;
        let err = RawEvent::from_line(line, "test").unwrap_err();
        assert!(matches!(err, Error::SchemaError { .. }));
    }

    #[test]
    fn short_statistics_is_schema_error() {
        let line = LINE.replace("[12.0, 1e6]", "[12.0]");
        assert!(matches!(
            RawEvent::from_line(&line, "test"),
            Err(Error::SchemaError { .. })
        ));
    }

    #[test]
    fn zero_neutrino_trials_rejected_on_conversion() {
        let line = LINE.replace("[12.0, 1e6]", "[12.0, 0.0]");
        let raw = RawEvent::from_line(&line, "test").unwrap();
        assert!(matches!(
            Event::try_from(raw),
            Err(Error::SchemaError { .. })
        ));
    }
}
