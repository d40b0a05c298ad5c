// crate modules
use crate::error::{Error, Result};
use crate::event::{Event, Origin};

// external crates
use log::debug;
use serde::{Deserialize, Serialize};

/// Validated collection of events sharing one local frame origin
///
/// This is the unit of work for the rate weighting. Normalisations are only
/// meaningful over a complete batch, so a [Batch] is always built from the
/// full list of events at once and any bad event rejects the lot.
///
/// ```rust
/// # use tautools_events::{Batch, Error};
/// // A batch needs at least one event to know its origin
/// assert!(matches!(Batch::new(Vec::new()), Err(Error::EmptyBatch)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    /// Every event, in ingestion order
    pub events: Vec<Event>,
    /// Local frame origin shared by all events
    pub origin: Origin,
}

impl Batch {
    /// Build a batch, validating every event and the shared origin
    ///
    /// Fails with a [Error::SchemaError] for the first malformed event, or a
    /// [Error::ConsistencyError] for the first event whose origin differs from
    /// the origin of the first event.
    pub fn new(events: Vec<Event>) -> Result<Self> {
        let origin = check_events(&events)?;
        debug!(
            "Batch of {} events, {} primaries at origin {origin}",
            events.len(),
            events.iter().map(|e| e.primaries.size()).sum::<usize>()
        );
        Ok(Self { events, origin })
    }

    /// Re-check a batch that did not come through [Batch::new()]
    ///
    /// Deserialised batches skip the constructor, so this also makes sure the
    /// stored origin agrees with the events.
    pub fn validate(&self) -> Result<()> {
        let origin = check_events(&self.events)?;
        if origin != self.origin {
            return Err(Error::ConsistencyError {
                tag: self.events[0].tag.clone(),
                expected: self.origin,
                found: origin,
            });
        }
        Ok(())
    }

    /// Number of events in the batch
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Always false for a validated batch
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Total number of primaries over all events
    pub fn n_neutrinos(&self) -> usize {
        self.events.iter().map(|e| e.primaries.size()).sum()
    }

    /// Sum of tau trials over all events
    pub fn tau_trials(&self) -> f64 {
        self.events.iter().map(|e| e.statistics.tau_trials).sum()
    }
}

/// Validate all events and return the shared origin
fn check_events(events: &[Event]) -> Result<Origin> {
    let first = events.first().ok_or(Error::EmptyBatch)?;

    for event in events {
        event.validate()?;
        if event.origin != first.origin {
            return Err(Error::ConsistencyError {
                tag: event.tag.clone(),
                expected: first.origin,
                found: event.origin,
            });
        }
    }

    Ok(first.origin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::tests::event;

    #[test]
    fn shared_origin() {
        let batch = Batch::new(vec![
            event("a", &[1.0, 2.0], &[1e8, 1e9]),
            event("b", &[3.0], &[1e10]),
        ])
        .unwrap();

        assert_eq!(batch.len(), 2);
        assert_eq!(batch.n_neutrinos(), 3);
        assert_eq!(batch.tau_trials(), 20.0);
        assert_eq!(batch.origin, Origin::new(42.1, 86.3));
    }

    #[test]
    fn conflicting_origins() {
        let mut a = event("a", &[1.0], &[1e8]);
        let mut b = event("b", &[1.0], &[1e8]);
        a.origin = Origin::new(10.0, 20.0);
        b.origin = Origin::new(10.0, 20.1);

        match Batch::new(vec![a, b]) {
            Err(Error::ConsistencyError {
                tag,
                expected,
                found,
            }) => {
                assert_eq!(tag, "b");
                assert_eq!(expected, Origin::new(10.0, 20.0));
                assert_eq!(found, Origin::new(10.0, 20.1));
            }
            other => panic!("expected a consistency error, got {other:?}"),
        }
    }

    #[test]
    fn tampered_origin_fails_validation() {
        let mut batch = Batch::new(vec![event("a", &[1.0], &[1e8])]).unwrap();
        batch.origin = Origin::new(0.0, 0.0);
        assert!(matches!(
            batch.validate(),
            Err(Error::ConsistencyError { .. })
        ));
    }
}
