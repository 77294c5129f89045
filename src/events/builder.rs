use log::trace;

use crate::series::{round_tenth, PressureSeries, Sample};

use super::extrema::Extrema;
use super::types::PressureEvent;

/// Turn consecutive extrema into magnitude-gated events.
///
/// Each flagged sample is compared against the previous flagged sample. An
/// event is emitted when the rounded difference reaches `min_pressure_diff`.
/// The reference point always moves to the latest extremum, including ones
/// whose event was discarded, so magnitudes are measured reversal to reversal.
///
/// Taking a [`PressureSeries`] keeps every sample timestamp representable, so
/// event instants are always the real sample instants.
pub fn build(
    series: &PressureSeries,
    extrema: &Extrema,
    min_pressure_diff: f64,
) -> Vec<PressureEvent> {
    let samples = series.samples();
    let mut events = Vec::new();
    let mut last: Option<&Sample> = None;

    for extremum in extrema.ordered() {
        let Some(sample) = samples.get(extremum.index) else {
            trace!("Extremum index {} beyond {} samples", extremum.index, samples.len());
            continue;
        };

        if let Some(previous) = last {
            let pressure_diff = round_tenth((sample.value - previous.value).abs());
            if pressure_diff >= min_pressure_diff {
                events.push(PressureEvent::between(previous, sample, pressure_diff));
            } else {
                trace!(
                    "{} at {} below magnitude gate ({} < {})",
                    extremum.kind,
                    sample.timestamp,
                    pressure_diff,
                    min_pressure_diff
                );
            }
        }

        last = Some(sample);
    }

    events
}
