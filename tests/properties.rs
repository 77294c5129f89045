//! Property-based tests for the event pipeline
//!
//! Random hourly series are pushed through detect, build and merge, and the
//! structural guarantees of each stage are checked on the output.

use barotrend::config::DetectionConfig;
use barotrend::events::{build, detect, merge, EventPipeline};
use barotrend::series::{PressureSeries, Sample};
use proptest::prelude::*;

const T0: i64 = 1_760_832_000;

// ============================================================================
// Strategies
// ============================================================================

/// Pressures in tenths of an hPa, the way ingestion quantises them
fn pressure_values() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(9_800i32..10_400, 0..120)
        .prop_map(|tenths| tenths.into_iter().map(|t| f64::from(t) / 10.0).collect())
}

/// Strictly ascending timestamps with gaps between 30 minutes and 3 hours
fn timestamps(len: usize) -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(1_800i64..10_800, len).prop_map(|gaps| {
        gaps.into_iter()
            .scan(T0, |t, gap| {
                *t += gap;
                Some(*t)
            })
            .collect()
    })
}

fn series() -> impl Strategy<Value = PressureSeries> {
    pressure_values().prop_flat_map(|values| {
        timestamps(values.len()).prop_map(move |times| {
            let samples = times
                .iter()
                .zip(&values)
                .map(|(&t, &v)| Sample::new(t, v))
                .collect();
            PressureSeries::from_samples(samples).unwrap()
        })
    })
}

fn detection() -> impl Strategy<Value = DetectionConfig> {
    (0.0f64..0.5, 0.0f64..3.0, 0.0f64..4.0).prop_map(|(threshold, min_diff, merge_hours)| {
        DetectionConfig {
            threshold,
            min_pressure_diff: min_diff,
            merge_threshold_hours: merge_hours,
        }
    })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Same input and constants, same output
    #[test]
    fn prop_pipeline_is_deterministic(series in series(), config in detection()) {
        let pipeline = EventPipeline::new(config).unwrap();
        let first = pipeline.run(&series);
        let second = pipeline.run(&series);
        prop_assert_eq!(first, second);
    }

    /// Index 0 and n-1 are never extrema
    #[test]
    fn prop_no_boundary_extrema(values in pressure_values(), threshold in 0.0f64..0.5) {
        let extrema = detect(&values, threshold);
        if let Some(last) = values.len().checked_sub(1) {
            prop_assert!(extrema.kind_at(0).is_none());
            prop_assert!(extrema.kind_at(last).is_none());
        }
        prop_assert!(extrema.peaks.is_disjoint(&extrema.troughs));
    }

    /// Every pre-merge event clears the magnitude gate
    #[test]
    fn prop_magnitude_gate(series in series(), config in detection()) {
        let values = series.values();
        let extrema = detect(&values, config.threshold);
        let events = build(&series, &extrema, config.min_pressure_diff);
        for event in &events {
            prop_assert!(event.pressure_diff >= config.min_pressure_diff);
            prop_assert!(event.start_time < event.end_time);
        }
    }

    /// Merging never adds events and conserves the summed magnitude
    #[test]
    fn prop_merge_conserves_mass(series in series(), config in detection()) {
        let values = series.values();
        let extrema = detect(&values, config.threshold);
        let events = build(&series, &extrema, config.min_pressure_diff);
        let merged = merge(&events, config.merge_threshold_hours);

        prop_assert!(merged.len() <= events.len());

        let before: f64 = events.iter().map(|e| e.pressure_diff).sum();
        let after: f64 = merged.iter().map(|e| e.pressure_diff).sum();
        prop_assert!((before - after).abs() < 1e-6 * (events.len() as f64 + 1.0));
    }

    /// Adjacent merged events never overlap
    #[test]
    fn prop_merged_events_do_not_overlap(series in series(), config in detection()) {
        let snapshot = EventPipeline::new(config).unwrap().run(&series);
        for pair in snapshot.events.as_slice().windows(2) {
            prop_assert!(pair[0].end_time <= pair[1].start_time);
            prop_assert!(pair[0].gap_hours_to(&pair[1]) > config.merge_threshold_hours);
        }
    }

    /// A merged sequence is a fixed point of merge
    #[test]
    fn prop_remerge_is_identity(series in series(), config in detection()) {
        let snapshot = EventPipeline::new(config).unwrap().run(&series);
        let once = snapshot.events.as_slice();
        let twice = merge(once, config.merge_threshold_hours);
        prop_assert_eq!(once, twice.as_slice());
    }
}
