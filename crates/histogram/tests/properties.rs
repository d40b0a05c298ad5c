//! Integration tests for the weighted histogram engine

use approx::assert_relative_eq;
use proptest::prelude::*;
use rstest::rstest;
use tautools_histogram::{Degeneracy, Error, Sample, Selection, Transform};

#[derive(Debug, Clone, Copy)]
enum Attribute {
    Energy,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    energy: f64,
    rate: f64,
}

impl Sample for Candidate {
    type Attribute = Attribute;

    fn value(&self, attribute: Attribute) -> f64 {
        match attribute {
            Attribute::Energy => self.energy,
        }
    }

    fn rate(&self) -> f64 {
        self.rate
    }
}

fn selection(samples: &[(f64, f64)], trials: f64) -> Selection<Candidate> {
    let samples = samples
        .iter()
        .map(|&(energy, rate)| Candidate { energy, rate })
        .collect();
    Selection::new(samples, trials).unwrap()
}

#[rstest]
#[case(Transform::Uniform, 50.0)] // edges 1, 34, 67, 100
#[case(Transform::Log, 5.0)] // edges 1, 4.6, 21.5, 100
fn histogram_integrates_to_total_rate(#[case] transform: Transform, #[case] middle: f64) {
    // 4 edges make 3 bins, one sample each
    let s = selection(&[(1.0, 2e-3), (middle, 7e-3), (100.0, 1e-3)], 50.0);
    let h = s.histogram(Attribute::Energy, 4, transform).unwrap();

    assert!(h.y.iter().all(|y| *y > 0.0), "{h}");
    assert_relative_eq!(h.integral(), s.total_rate(), max_relative = 1e-12);
    assert_relative_eq!(s.total_rate(), 1e-2 / 50.0, max_relative = 1e-12);
}

#[test]
fn empty_bins_are_exactly_zero() {
    let s = selection(&[(1.0, 1.0), (1.1, 2.0), (10.0, 3.0)], 7.0);
    let h = s.histogram(Attribute::Energy, 11, Transform::Uniform).unwrap();

    // everything between 1.9 and 9.1 is empty
    for i in 1..9 {
        assert_eq!(h.y[i], 0.0);
        assert_eq!(h.yerr[i], 0.0);
    }
    assert!(h.y.iter().chain(&h.yerr).all(|v| v.is_finite()));
}

#[test]
fn narrow_range_never_gives_undefined_bins() {
    let next = f64::from_bits(1.0f64.to_bits() + 1);
    let s = selection(&[(1.0, 1.0), (next, 1.0)], 10.0);

    // 40 edges can not fit between two neighbouring floats
    assert_eq!(
        s.histogram(Attribute::Energy, 40, Transform::Uniform),
        Err(Error::DegenerateSelection(Degeneracy::TooNarrowRange {
            min: 1.0,
            max: next,
            bins: 39
        }))
    );

    // a single bin still resolves
    let h = s.histogram(Attribute::Energy, 2, Transform::Uniform).unwrap();
    assert!(h.y.iter().chain(&h.yerr).all(|v| v.is_finite()), "{h}");
    assert_relative_eq!(h.integral(), s.total_rate(), max_relative = 1e-12);
}

#[test]
fn log_centers_over_two_decades() {
    let s = selection(&[(1e7, 1.0), (3e8, 1.0), (1e9, 1.0)], 1.0);
    let h = s.histogram(Attribute::Energy, 5, Transform::Log).unwrap();

    // edges at 10^7, 10^7.5, 10^8, 10^8.5, 10^9
    let expected = [1e7, 10f64.powf(7.5), 1e8, 10f64.powf(8.5), 1e9];
    for (edge, expected) in h.edges.iter().zip(expected) {
        assert_relative_eq!(*edge, expected, max_relative = 1e-12);
    }

    for i in 0..h.len() {
        let center = h.x[i];
        assert_relative_eq!(
            center * center,
            h.edges[i] * h.edges[i + 1],
            max_relative = 1e-12
        );

        // error bars reach the edges, not a symmetric half width
        assert_relative_eq!(center - h.xerr.0[i], h.edges[i], max_relative = 1e-12);
        assert_relative_eq!(center + h.xerr.1[i], h.edges[i + 1], max_relative = 1e-12);
        assert!(h.xerr.1[i] > h.xerr.0[i]);
    }
}

#[test]
fn uniform_centers_are_symmetric() {
    let s = selection(&[(0.0, 1.0), (10.0, 1.0)], 1.0);
    let h = s.histogram(Attribute::Energy, 6, Transform::Uniform).unwrap();

    assert_eq!(h.len(), 5);
    for i in 0..h.len() {
        assert_relative_eq!(h.xerr.0[i], 1.0, max_relative = 1e-12);
        assert_relative_eq!(h.xerr.1[i], 1.0, max_relative = 1e-12);
    }
}

#[test]
fn serialises_aligned_arrays() {
    let s = selection(&[(1.0, 1.0), (2.0, 1.0)], 2.0);
    let h = s.histogram(Attribute::Energy, 3, Transform::Uniform).unwrap();
    let json: serde_json::Value = serde_json::to_value(&h).unwrap();

    assert_eq!(json["x"].as_array().unwrap().len(), 2);
    assert_eq!(json["y"].as_array().unwrap().len(), 2);
    assert_eq!(json["yerr"].as_array().unwrap().len(), 2);
    assert_eq!(json["xerr"][0].as_array().unwrap().len(), 2);
    assert_eq!(json["xerr"][1].as_array().unwrap().len(), 2);
    assert_eq!(json["edges"].as_array().unwrap().len(), 3);
}

fn samples_and_permutation() -> impl Strategy<Value = (Vec<(f64, f64)>, Vec<(f64, f64)>)> {
    prop::collection::vec((1.0f64..1e3, 0.0f64..1e-12), 1..64)
        .prop_flat_map(|samples| (Just(samples.clone()), Just(samples).prop_shuffle()))
}

proptest! {
    #[test]
    fn total_rate_ignores_sample_order(
        (samples, shuffled) in samples_and_permutation(),
        trials in 1.0f64..1e9,
    ) {
        let a = selection(&samples, trials).total_rate();
        let b = selection(&shuffled, trials).total_rate();
        prop_assert!(approx::relative_eq!(a, b, epsilon = 1e-300, max_relative = 1e-12));
    }

    #[test]
    fn histogram_always_integrates_back(
        samples in prop::collection::vec((1.0f64..1e3, 0.0f64..1.0), 2..64),
        bins in 2usize..50,
    ) {
        let s = selection(&samples, 1e4);
        // identical values can not be binned, skip those draws
        prop_assume!(samples.iter().any(|(e, _)| *e != samples[0].0));

        let h = s.histogram(Attribute::Energy, bins, Transform::Log).unwrap();
        prop_assert!(h.yerr.iter().all(|v| v.is_finite() && *v >= 0.0));
        prop_assert!(approx::relative_eq!(h.integral(), s.total_rate(), epsilon = 1e-300, max_relative = 1e-9));
    }
}
