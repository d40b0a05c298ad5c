// crate modules
use crate::error::{Error, Result};

// external crates
use serde::{Deserialize, Serialize};

/// Waxman-Bahcall bound for tau neutrinos (GeV m^-2 s^-1 sr^-1)
///
/// The all-flavour bound of 2e-4 GeV/(m^2 s sr), assuming one third of the
/// neutrinos arrive as tau neutrinos.
pub const WAXMAN_BAHCALL_FACTOR: f64 = 2e-4 / 3.0;

/// Differential neutrino flux as a function of energy
///
/// Implementors map a primary energy (GeV) to a differential flux in
/// 1/(GeV m^2 s sr). Combined with a Monte Carlo weight in GeV m^2 sr this
/// leaves a rate in Hz.
pub trait FluxModel {
    /// Differential flux at `energy` (GeV), in 1/(GeV m^2 s sr)
    fn flux(&self, energy: f64) -> Result<f64>;

    /// Flux integrated over `[energy_min, energy_max]` (GeV), in 1/(m^2 s sr)
    fn integral(&self, energy_min: f64, energy_max: f64) -> Result<f64>;
}

/// Inverse square flux bound, `C / E^2`
///
/// The normalisation `C` is given in GeV/(m^2 s sr). The default is the
/// Waxman-Bahcall bound, see [WAXMAN_BAHCALL_FACTOR].
///
/// ```rust
/// # use tautools_flux::{FluxModel, InverseSquareFlux, WAXMAN_BAHCALL_FACTOR};
/// let model = InverseSquareFlux::default();
/// assert_eq!(model.normalisation, WAXMAN_BAHCALL_FACTOR);
///
/// // Differential flux at 1 EeV
/// let flux = model.flux(1e9).unwrap();
/// assert_eq!(flux, WAXMAN_BAHCALL_FACTOR / 1e18);
///
/// // Zero or negative energies are meaningless
/// assert!(model.flux(0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InverseSquareFlux {
    /// Normalisation `C` (GeV m^-2 s^-1 sr^-1)
    pub normalisation: f64,
}

impl InverseSquareFlux {
    /// Inverse square bound with a custom normalisation
    pub fn new(normalisation: f64) -> Self {
        Self { normalisation }
    }

    /// The Waxman-Bahcall bound for tau neutrinos
    pub fn waxman_bahcall() -> Self {
        Self::new(WAXMAN_BAHCALL_FACTOR)
    }
}

impl Default for InverseSquareFlux {
    fn default() -> Self {
        Self::waxman_bahcall()
    }
}

impl FluxModel for InverseSquareFlux {
    fn flux(&self, energy: f64) -> Result<f64> {
        check_energy(energy)?;
        Ok(self.normalisation / (energy * energy))
    }

    fn integral(&self, energy_min: f64, energy_max: f64) -> Result<f64> {
        check_energy(energy_min)?;
        check_energy(energy_max)?;
        if energy_min > energy_max {
            return Err(Error::InvalidEnergyRange {
                min: energy_min,
                max: energy_max,
            });
        }
        Ok(self.normalisation * (1.0 / energy_min - 1.0 / energy_max))
    }
}

/// Energies must be strictly positive (NAN included in the failure)
fn check_energy(energy: f64) -> Result<()> {
    if !(energy > 0.0) {
        return Err(Error::DivisionDomain { energy });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverse_square() {
        let model = InverseSquareFlux::new(4.0);
        assert_eq!(model.flux(2.0).unwrap(), 1.0);
        assert_eq!(model.flux(0.5).unwrap(), 16.0);
    }

    #[test]
    fn non_positive_energy() {
        let model = InverseSquareFlux::default();
        for energy in [0.0, -1e8, f64::NAN] {
            assert!(matches!(
                model.flux(energy),
                Err(Error::DivisionDomain { .. })
            ));
        }
    }

    #[test]
    fn integral_matches_analytic() {
        let model = InverseSquareFlux::new(2.0);
        assert_eq!(model.integral(1.0, 2.0).unwrap(), 1.0);
        assert_eq!(model.integral(1.0, 1.0).unwrap(), 0.0);
    }

    #[test]
    fn integral_bounds() {
        let model = InverseSquareFlux::default();
        assert!(matches!(
            model.integral(1e11, 1e7),
            Err(Error::InvalidEnergyRange { .. })
        ));
        assert!(matches!(
            model.integral(0.0, 1e7),
            Err(Error::DivisionDomain { .. })
        ));
    }
}
