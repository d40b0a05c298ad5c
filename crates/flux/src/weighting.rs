//! Apply a flux model to Monte Carlo events
//!
//! Every primary of an event carries a Monte Carlo weight (GeV m^2 sr). Folding
//! it with a differential flux (1/(GeV m^2 s sr)) and dividing by the number
//! of neutrino trials gives the rate contributed by that primary, in Hz:
//!
//! ```text
//! rate_i = weight_i * flux(energy_i) / neutrino_trials
//! ```
//!
//! An event records a single tau candidate, whose rate is the sum over all of
//! its primaries.

// crate modules
use crate::error::{Error, Result};
use crate::model::FluxModel;

// tautools modules
use tautools_events::{Batch, Event, Origin};
use tautools_histogram::{Sample, Selection};

// external crates
use log::{debug, trace};
use serde::Serialize;

/// Attributes of a [NeutrinoCandidate] that can be histogrammed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeutrinoAttribute {
    /// Primary energy (GeV)
    Energy,
}

/// Attributes of a [TauCandidate] that can be histogrammed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TauAttribute {
    /// Azimuth of the tau direction (deg)
    Angle,
    /// Tau energy right before the decay (GeV)
    Energy,
}

/// Primary neutrino with its physical rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NeutrinoCandidate {
    /// Primary energy (GeV)
    pub energy: f64,
    /// Rate (Hz)
    pub rate: f64,
}

impl Sample for NeutrinoCandidate {
    type Attribute = NeutrinoAttribute;

    fn value(&self, attribute: NeutrinoAttribute) -> f64 {
        match attribute {
            NeutrinoAttribute::Energy => self.energy,
        }
    }

    fn rate(&self) -> f64 {
        self.rate
    }
}

/// Tau candidate with its physical rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TauCandidate {
    /// Azimuth of the tau direction (deg)
    pub angle: f64,
    /// Tau energy (GeV)
    pub energy: f64,
    /// Rate (Hz), summed over all primaries of the event
    pub rate: f64,
}

impl Sample for TauCandidate {
    type Attribute = TauAttribute;

    fn value(&self, attribute: TauAttribute) -> f64 {
        match attribute {
            TauAttribute::Angle => self.angle,
            TauAttribute::Energy => self.energy,
        }
    }

    fn rate(&self) -> f64 {
        self.rate
    }
}

/// Flux weighted selections of a batch
///
/// Both selections are normalised to the same number of trials, the total tau
/// trials of the batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FluxedEvents {
    /// One sample per primary neutrino
    pub neutrinos: Selection<NeutrinoCandidate>,
    /// One sample per event
    pub taus: Selection<TauCandidate>,
}

/// Rates of every primary of a single event (Hz)
///
/// The event statistics and primaries are validated first, so a zero
/// `neutrino_trials` fails with a schema error rather than dividing by zero.
///
/// ```rust
/// # use tautools_events::{Event, Origin, Primaries, Statistics, TauAtDecay};
/// # use tautools_flux::{primary_rates, InverseSquareFlux};
/// # let event = Event {
/// #     tag: "doc".into(),
/// #     origin: Origin::new(0.0, 0.0),
/// #     primaries: Primaries {
/// #         weight: vec![1.0, 2.0],
/// #         energy: vec![1.0, 2.0],
/// #         generation_index: vec![0, 0],
/// #         medium: vec!["Rock".into(), "Rock".into()],
/// #         local_coordinates: vec![[0.0; 3]; 2],
/// #         geodetic_coordinates: vec![[0.0; 3]; 2],
/// #     },
/// #     statistics: Statistics { tau_trials: 1.0, neutrino_trials: 4.0 },
/// #     tau: TauAtDecay {
/// #         generation_weight: 1.0,
/// #         energy: 1.0,
/// #         position: [0.0; 3],
/// #         direction: [0.0; 3],
/// #         geodetic_coordinates: [0.0; 3],
/// #         horizontal_coordinates: [0.0; 2],
/// #     },
/// # };
/// // weights [1, 2] at energies [1, 2] GeV with 4 neutrino trials
/// let rates = primary_rates(&event, &InverseSquareFlux::new(8.0)).unwrap();
/// assert_eq!(rates, vec![2.0, 1.0]);
/// ```
pub fn primary_rates<F: FluxModel + ?Sized>(event: &Event, model: &F) -> Result<Vec<f64>> {
    event.validate()?;
    let trials = event.statistics.neutrino_trials;

    event
        .primaries
        .iter()
        .map(|(weight, energy)| Ok(weight * model.flux(energy)? / trials))
        .collect()
}

/// Apply a flux model to every event of a batch
///
/// See [fluxify()], the batch has already been checked for consistent origins
/// but is checked again here.
pub fn fluxify_batch<F: FluxModel + ?Sized>(batch: &Batch, model: &F) -> Result<FluxedEvents> {
    fluxify(&batch.events, model)
}

/// Apply a flux model to a list of events
///
/// This is a single left to right fold over the events, accumulating:
///
/// - one [NeutrinoCandidate] per primary
/// - one [TauCandidate] per event, with the summed primary rates
/// - the total number of tau trials, once per event
///
/// The total tau trials normalise both resulting selections.
///
/// The first problem aborts the fold, nothing partial is returned. Events with
/// malformed statistics fail with a schema error, an event whose origin
/// differs from the first event's fails with a consistency error, and an
/// empty list or a batch without any tau trials is a degenerate selection.
pub fn fluxify<F: FluxModel + ?Sized>(events: &[Event], model: &F) -> Result<FluxedEvents> {
    let capacity = events.iter().map(|e| e.primaries.size()).sum();
    let accumulator = events
        .iter()
        .try_fold(Accumulator::with_capacity(events.len(), capacity), |acc, event| {
            acc.fold(event, model)
        })?;
    accumulator.finish()
}

/// Running state of the batch fold
#[derive(Debug, Default)]
struct Accumulator {
    origin: Option<Origin>,
    tau_trials: f64,
    neutrinos: Vec<NeutrinoCandidate>,
    taus: Vec<TauCandidate>,
}

impl Accumulator {
    fn with_capacity(n_events: usize, n_neutrinos: usize) -> Self {
        Self {
            neutrinos: Vec::with_capacity(n_neutrinos),
            taus: Vec::with_capacity(n_events),
            ..Default::default()
        }
    }

    /// Add one event, failing on the first inconsistency
    fn fold<F: FluxModel + ?Sized>(mut self, event: &Event, model: &F) -> Result<Self> {
        let origin = *self.origin.get_or_insert(event.origin);
        if event.origin != origin {
            return Err(Error::Event(tautools_events::Error::ConsistencyError {
                tag: event.tag.clone(),
                expected: origin,
                found: event.origin,
            }));
        }

        let rates = primary_rates(event, model)?;
        let tau_rate: f64 = rates.iter().sum();
        trace!(
            "\"{}\": {} primaries, tau rate {tau_rate:e} Hz",
            event.tag,
            rates.len()
        );

        self.tau_trials += event.statistics.tau_trials;
        self.neutrinos.extend(
            event
                .primaries
                .energy
                .iter()
                .zip(&rates)
                .map(|(energy, rate)| NeutrinoCandidate {
                    energy: *energy,
                    rate: *rate,
                }),
        );
        self.taus.push(TauCandidate {
            angle: event.tau.azimuth(),
            energy: event.tau.energy,
            rate: tau_rate,
        });

        Ok(self)
    }

    fn finish(self) -> Result<FluxedEvents> {
        debug!(
            "Fluxified {} taus and {} neutrinos over {} trials",
            self.taus.len(),
            self.neutrinos.len(),
            self.tau_trials
        );
        Ok(FluxedEvents {
            neutrinos: Selection::new(self.neutrinos, self.tau_trials)?,
            taus: Selection::new(self.taus, self.tau_trials)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::InverseSquareFlux;
    use tautools_events::{Primaries, Statistics, TauAtDecay};
    use tautools_histogram::{Degeneracy, Error as HistogramError};

    fn event(tag: &str, origin: (f64, f64), trials: (f64, f64)) -> Event {
        Event {
            tag: tag.to_string(),
            origin: Origin::new(origin.0, origin.1),
            primaries: Primaries {
                weight: vec![1.0, 3.0],
                energy: vec![1.0, 2.0],
                generation_index: vec![0, 1],
                medium: vec!["Rock".to_string(), "Air".to_string()],
                local_coordinates: vec![[0.0; 3]; 2],
                geodetic_coordinates: vec![[0.0; 3]; 2],
            },
            statistics: Statistics {
                tau_trials: trials.0,
                neutrino_trials: trials.1,
            },
            tau: TauAtDecay {
                generation_weight: 1.0,
                energy: 5.0,
                position: [0.0; 3],
                direction: [0.0; 3],
                geodetic_coordinates: [0.0; 3],
                horizontal_coordinates: [30.0, 2.0],
            },
        }
    }

    #[test]
    fn tau_rate_is_sum_of_primaries() {
        let model = InverseSquareFlux::new(4.0);
        let fluxed = fluxify(&[event("a", (0.0, 0.0), (5.0, 2.0))], &model).unwrap();

        // 1 * 4/1 / 2 and 3 * 4/4 / 2
        let rates: Vec<f64> = fluxed.neutrinos.samples().iter().map(|n| n.rate).collect();
        assert_eq!(rates, vec![2.0, 1.5]);
        assert_eq!(fluxed.taus.samples()[0].rate, 3.5);
        assert_eq!(fluxed.taus.samples()[0].angle, 30.0);
        assert_eq!(fluxed.taus.samples()[0].energy, 5.0);
    }

    #[test]
    fn trials_counted_once_per_event() {
        let model = InverseSquareFlux::default();
        let events = [
            event("a", (0.0, 0.0), (5.0, 2.0)),
            event("b", (0.0, 0.0), (7.0, 2.0)),
        ];
        let fluxed = fluxify(&events, &model).unwrap();

        assert_eq!(fluxed.taus.trials(), 12.0);
        assert_eq!(fluxed.neutrinos.trials(), 12.0);
        assert_eq!(fluxed.taus.len(), 2);
        assert_eq!(fluxed.neutrinos.len(), 4);
    }

    #[test]
    fn different_origins() {
        let model = InverseSquareFlux::default();
        let events = [
            event("a", (10.0, 20.0), (1.0, 1.0)),
            event("b", (10.0, 20.1), (1.0, 1.0)),
        ];
        assert!(matches!(
            fluxify(&events, &model),
            Err(Error::Event(tautools_events::Error::ConsistencyError { .. }))
        ));
    }

    #[test]
    fn zero_neutrino_trials() {
        let model = InverseSquareFlux::default();
        let events = [event("a", (0.0, 0.0), (1.0, 0.0))];
        assert!(matches!(
            fluxify(&events, &model),
            Err(Error::Event(tautools_events::Error::SchemaError { .. }))
        ));
    }

    #[test]
    fn non_positive_primary_energy() {
        let model = InverseSquareFlux::default();
        let mut bad = event("a", (0.0, 0.0), (1.0, 1.0));
        bad.primaries.energy[1] = 0.0;
        assert!(matches!(
            fluxify(&[bad], &model),
            Err(Error::DivisionDomain { energy }) if energy == 0.0
        ));
    }

    #[test]
    fn no_events() {
        let model = InverseSquareFlux::default();
        assert!(matches!(
            fluxify(&[], &model),
            Err(Error::Selection(HistogramError::DegenerateSelection(
                Degeneracy::NoTrials(_)
            )))
        ));
    }

    #[test]
    fn works_through_trait_objects() {
        let model: Box<dyn FluxModel> = Box::new(InverseSquareFlux::new(4.0));
        let rates = primary_rates(&event("a", (0.0, 0.0), (1.0, 2.0)), model.as_ref()).unwrap();
        assert_eq!(rates, vec![2.0, 1.5]);
    }
}
