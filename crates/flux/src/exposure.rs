// crate modules
use crate::error::Result;
use crate::model::FluxModel;
use crate::weighting::TauCandidate;

// tautools modules
use tautools_histogram::Selection;

// external crates
use log::debug;
use serde::Serialize;

/// Seconds in a Julian year of 365.25 days
pub const SECONDS_PER_YEAR: f64 = 365.25 * 24.0 * 60.0 * 60.0;

/// Default energy range (GeV) for the flux integral
pub const DEFAULT_ENERGY_RANGE: (f64, f64) = (1e7, 1e11);

/// Yearly detection rate and the matching average exposure
///
/// The exposure is the yearly rate divided by the flux integrated over an
/// energy range, so it only depends on the flux model through its shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Exposure {
    /// Expected number of events per year
    pub rate: f64,
    /// Flux integrated over the energy range (1/(m^2 sr year))
    pub flux_integral: f64,
    /// Average exposure (m^2 sr)
    pub exposure: f64,
}

/// Yearly rate and average exposure of a tau selection
///
/// ```rust
/// # use tautools_flux::{exposure, InverseSquareFlux, TauCandidate, SECONDS_PER_YEAR};
/// # use tautools_histogram::Selection;
/// let taus = vec![TauCandidate { angle: 0.0, energy: 1e8, rate: 1e-6 }];
/// let taus = Selection::new(taus, 1.0).unwrap();
///
/// let model = InverseSquareFlux::new(1e7);
/// let result = exposure(&taus, &model, 1e7, 1e11).unwrap();
///
/// assert!((result.rate - 1e-6 * SECONDS_PER_YEAR).abs() < 1e-6);
/// ```
pub fn exposure<F: FluxModel + ?Sized>(
    taus: &Selection<TauCandidate>,
    model: &F,
    energy_min: f64,
    energy_max: f64,
) -> Result<Exposure> {
    let rate = taus.total_rate() * SECONDS_PER_YEAR;
    let flux_integral = model.integral(energy_min, energy_max)? * SECONDS_PER_YEAR;
    let exposure = rate / flux_integral;

    debug!("Exposure over [{energy_min:e}, {energy_max:e}] GeV: {exposure:e} m^2 sr");

    Ok(Exposure {
        rate,
        flux_integral,
        exposure,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::InverseSquareFlux;

    fn taus(rates: &[f64], trials: f64) -> Selection<TauCandidate> {
        let taus = rates
            .iter()
            .map(|rate| TauCandidate {
                angle: 0.0,
                energy: 1e9,
                rate: *rate,
            })
            .collect();
        Selection::new(taus, trials).unwrap()
    }

    #[test]
    fn julian_year() {
        assert_eq!(SECONDS_PER_YEAR, 31_557_600.0);
    }

    #[test]
    fn exposure_is_rate_over_integral() {
        // integral over [1, 2] is 1/2 per second
        let model = InverseSquareFlux::new(1.0);
        let result = exposure(&taus(&[2.0, 4.0], 2.0), &model, 1.0, 2.0).unwrap();

        assert_eq!(result.rate, 3.0 * SECONDS_PER_YEAR);
        assert_eq!(result.flux_integral, 0.5 * SECONDS_PER_YEAR);
        assert_eq!(result.exposure, 6.0);
    }

    #[test]
    fn invalid_range() {
        let model = InverseSquareFlux::default();
        let (emin, emax) = DEFAULT_ENERGY_RANGE;
        assert!(matches!(
            exposure(&taus(&[1.0], 1.0), &model, emax, emin),
            Err(Error::InvalidEnergyRange { .. })
        ));
    }
}
