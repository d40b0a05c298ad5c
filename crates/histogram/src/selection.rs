// crate modules
use crate::error::{Degeneracy, Error, Result};
use crate::histogram::{Transform, WeightedHistogram};
use crate::sample::Sample;

// tautools modules
use tautools_utils::SliceExt;

// external crates
use log::debug;
use serde::Serialize;

/// Default number of bin edges for [Selection::histogram()]
pub const DEFAULT_BINS: usize = 40;

/// Selection of rate-weighted Monte Carlo samples
///
/// Holds the samples together with `N`, the total number of *generated* trials
/// behind them. Samples are only the successful trials, so `N` is normally far
/// larger than the number of samples and is what turns summed rates into a
/// rate per trial.
///
/// Both the [Selection::total_rate()] and the histograms are normalised to the
/// same `N`, so a histogram covering all samples integrates back to the total
/// rate.
///
/// ```rust
/// # use tautools_histogram::{Sample, Selection, Transform};
/// # #[derive(Clone, Copy, Debug)]
/// # struct Energy;
/// # struct Tau { energy: f64, rate: f64 }
/// # impl Sample for Tau {
/// #     type Attribute = Energy;
/// #     fn value(&self, _: Energy) -> f64 { self.energy }
/// #     fn rate(&self) -> f64 { self.rate }
/// # }
/// let taus = vec![
///     Tau { energy: 1e8, rate: 2e-18 },
///     Tau { energy: 1e9, rate: 1e-18 },
///     Tau { energy: 1e10, rate: 4e-18 },
/// ];
/// let selection = Selection::new(taus, 1e3).unwrap();
///
/// // Total rate, normalised to the number of trials
/// assert!((selection.total_rate() - 7e-21).abs() < 1e-33);
///
/// // Differential rate on a log scale
/// let histogram = selection.histogram(Energy, 4, Transform::Log).unwrap();
/// assert_eq!(histogram.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection<S> {
    samples: Vec<S>,
    trials: f64,
}

impl<S: Sample> Selection<S> {
    /// Create a selection from samples and the number of generated trials
    ///
    /// Fails if `trials` is not strictly positive and finite, or if any sample
    /// carries a negative or non-finite rate.
    pub fn new(samples: Vec<S>, trials: f64) -> Result<Self> {
        check_trials(trials)?;

        if let Some((index, rate)) = samples
            .iter()
            .map(Sample::rate)
            .enumerate()
            .find(|(_, rate)| !(rate.is_finite() && *rate >= 0.0))
        {
            return Err(Error::InvalidRate { index, rate });
        }

        Ok(Self { samples, trials })
    }

    /// The selected samples
    pub fn samples(&self) -> &[S] {
        &self.samples
    }

    /// Total number of generated trials, `N`
    pub fn trials(&self) -> f64 {
        self.trials
    }

    /// Number of samples (not trials)
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True if no sample was selected
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Total rate for selected events, `sum(rate) / N`
    pub fn total_rate(&self) -> f64 {
        self.samples.iter().map(Sample::rate).sum::<f64>() / self.trials
    }

    /// Histogram the given attribute
    ///
    /// Builds `bins` edges spanning the smallest to the largest value of the
    /// attribute, spaced according to `transform`. The result is a density
    /// estimate with one entry per bin, i.e. `bins - 1` entries.
    ///
    /// Fails with [Error::DegenerateSelection] for fewer than 2 edges, an
    /// empty selection, when every sample has the same value, or when the
    /// range is too narrow to hold `bins` distinct edges.
    pub fn histogram(
        &self,
        attribute: S::Attribute,
        bins: usize,
        transform: Transform,
    ) -> Result<WeightedHistogram> {
        check_trials(self.trials)?;
        if bins < 2 {
            return Err(Degeneracy::TooFewBins(bins).into());
        }
        if self.samples.is_empty() {
            return Err(Degeneracy::NoSamples.into());
        }

        // aliases
        let values: Vec<f64> = self.samples.iter().map(|s| s.value(attribute)).collect();
        let rates: Vec<f64> = self.samples.iter().map(Sample::rate).collect();

        let (min, max) = (values.try_min()?, values.try_max()?);
        if min == max {
            return Err(Degeneracy::ZeroWidthRange(min).into());
        }

        debug!(
            "Histogram of {attribute:?} over [{min:e}, {max:e}] with {} {transform} bins",
            bins - 1
        );

        // edges only a few ulp apart round onto each other
        let edges = transform.edges(min, max, bins)?;
        if edges.windows(2).any(|pair| pair[1] <= pair[0]) {
            return Err(Degeneracy::TooNarrowRange {
                min,
                max,
                bins: bins - 1,
            }
            .into());
        }

        WeightedHistogram::build(&values, &rates, self.trials, edges, transform)
    }
}

fn check_trials(trials: f64) -> Result<()> {
    if !(trials.is_finite() && trials > 0.0) {
        return Err(Degeneracy::NoTrials(trials).into());
    }
    Ok(())
}
