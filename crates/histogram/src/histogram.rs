// crate modules
use crate::error::{Error, Result};

// tautools modules
use tautools_utils::{f, geomspace, linspace, SliceExt, ValueExt};

// external crates
use serde::Serialize;

/// Spacing of bin edges
///
/// The transform also decides where the bin centers sit. A `Log` binning puts
/// the center at the geometric mean of the edges so that markers and error
/// bars line up on a logarithmic axis.
///
/// ```rust
/// # use tautools_histogram::{Error, Transform};
/// # use std::str::FromStr;
/// assert_eq!(Transform::from_str("log").unwrap(), Transform::Log);
/// assert_eq!(Transform::default(), Transform::Uniform);
///
/// // Anything else is rejected, names are case sensitive
/// assert!(matches!(
///     Transform::from_str("sqrt"),
///     Err(Error::InvalidTransform(_))
/// ));
/// assert!(matches!(
///     Transform::from_str("Log"),
///     Err(Error::InvalidTransform(_))
/// ));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Transform {
    /// Linearly spaced edges, centers at the arithmetic midpoint
    #[default]
    Uniform,
    /// Geometrically spaced edges, centers at the geometric mean
    Log,
}

impl Transform {
    /// Build `n` bin edges spanning `[min, max]`
    pub fn edges(&self, min: f64, max: f64, n: usize) -> Result<Vec<f64>> {
        match self {
            Transform::Uniform => Ok(linspace(min, max, n)?),
            Transform::Log => {
                if min <= 0.0 {
                    return Err(Error::NonPositiveLogRange { min });
                }
                Ok(geomspace(min, max, n)?)
            }
        }
    }

    /// Bin centers for consecutive pairs of edges
    pub fn centers(&self, edges: &[f64]) -> Vec<f64> {
        edges
            .windows(2)
            .map(|pair| match self {
                Transform::Uniform => 0.5 * (pair[0] + pair[1]),
                Transform::Log => (pair[0] * pair[1]).sqrt(),
            })
            .collect()
    }
}

impl std::str::FromStr for Transform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "uniform" => Ok(Transform::Uniform),
            "log" => Ok(Transform::Log),
            _ => Err(Error::InvalidTransform(s.to_string())),
        }
    }
}

impl std::fmt::Display for Transform {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Transform::Uniform => write!(f, "uniform"),
            Transform::Log => write!(f, "log"),
        }
    }
}

/// Weighted histogram of a Monte Carlo attribute
///
/// A binned estimate of the differential rate, i.e. rate per unit of the
/// histogrammed attribute. All per-bin sequences are aligned, with `edges`
/// holding one more entry than the bins.
///
/// | Field  | Description                                              |
/// | ------ | -------------------------------------------------------- |
/// | `x`    | bin centers                                              |
/// | `y`    | density estimate, `S1 / (N w)`                           |
/// | `xerr` | (center - lower edge, upper edge - center)               |
/// | `yerr` | one sigma statistical error, `sqrt(S2 - S1^2 / N) / (N w)` |
/// | `edges`| bin edges                                                |
///
/// Here `S1` and `S2` are the sums of rates and squared rates in a bin, `N` is
/// the number of generated trials and `w` the bin width.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedHistogram {
    /// Bin centers
    pub x: Vec<f64>,
    /// Density estimate per bin
    pub y: Vec<f64>,
    /// Asymmetric horizontal error bars as (left, right)
    pub xerr: (Vec<f64>, Vec<f64>),
    /// Statistical error on `y`
    pub yerr: Vec<f64>,
    /// Bin edges
    pub edges: Vec<f64>,
}

impl WeightedHistogram {
    /// Bin rate-weighted values normalised to `trials`
    ///
    /// Callers are expected to have checked the trials, the number of edges,
    /// and the value range already.
    pub(crate) fn build(
        values: &[f64],
        rates: &[f64],
        trials: f64,
        edges: Vec<f64>,
        transform: Transform,
    ) -> Result<Self> {
        let n_bins = edges.len() - 1;

        // first and second moments of the rates in each bin
        let mut s1 = vec![0.0; n_bins];
        let mut s2 = vec![0.0; n_bins];
        for (value, rate) in values.iter().zip(rates) {
            let i = edges.find_bin_exclusive(*value)?;
            s1[i] += rate;
            s2[i] += rate * rate;
        }

        let x = transform.centers(&edges);
        let mut y = Vec::with_capacity(n_bins);
        let mut yerr = Vec::with_capacity(n_bins);
        let mut left = Vec::with_capacity(n_bins);
        let mut right = Vec::with_capacity(n_bins);

        for i in 0..n_bins {
            left.push(x[i] - edges[i]);
            right.push(edges[i + 1] - x[i]);

            // empty bins are exactly zero, whatever their width
            if s1[i] == 0.0 && s2[i] == 0.0 {
                y.push(0.0);
                yerr.push(0.0);
                continue;
            }

            let width = edges[i + 1] - edges[i];
            let norm = 1.0 / (trials * width);

            // rounding can push the variance just below zero
            let variance = (s2[i] - s1[i] * s1[i] / trials).max(0.0);

            y.push(s1[i] * norm);
            yerr.push(variance.sqrt() * norm);
        }

        Ok(Self {
            x,
            y,
            xerr: (left, right),
            yerr,
            edges,
        })
    }

    /// Number of bins
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// True if there are no bins
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Width of every bin
    pub fn widths(&self) -> Vec<f64> {
        self.edges.windows(2).map(|pair| pair[1] - pair[0]).collect()
    }

    /// Integral of the density estimate, `sum(y * w)`
    ///
    /// For a histogram spanning every sample this is the total rate of the
    /// selection it was built from.
    pub fn integral(&self) -> f64 {
        self.y
            .iter()
            .zip(self.widths())
            .map(|(y, width)| y * width)
            .sum()
    }

    /// Try to find the non-empty bins' value range as (min, max) of `y`
    pub fn y_range(&self) -> Option<(f64, f64)> {
        let filled: Vec<f64> = self.y.iter().copied().filter(|y| *y > 0.0).collect();
        Some((filled.try_min().ok()?, filled.try_max().ok()?))
    }
}

impl std::fmt::Display for WeightedHistogram {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut s = f!(
            "{:>12} {:>12} {:>12} {:>12} {:>12}\n",
            "x",
            "y",
            "xerr-",
            "xerr+",
            "yerr"
        );
        for i in 0..self.len() {
            s += &f!(
                "{:>12} {:>12} {:>12} {:>12} {:>12}\n",
                self.x[i].sci(4, 2),
                self.y[i].sci(4, 2),
                self.xerr.0[i].sci(4, 2),
                self.xerr.1[i].sci(4, 2),
                self.yerr[i].sci(4, 2),
            );
        }
        write!(f, "{}", s.trim_end())
    }
}
