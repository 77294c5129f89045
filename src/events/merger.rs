use super::types::PressureEvent;

/// Collapse events whose gap to the running event is at most `merge_threshold_hours`.
///
/// Single pass: the accumulator absorbs each following event that starts
/// within the threshold of its end, so chains merge transitively. Empty input
/// yields an empty output.
pub fn merge(events: &[PressureEvent], merge_threshold_hours: f64) -> Vec<PressureEvent> {
    let mut iter = events.iter();
    let Some(first) = iter.next() else {
        return Vec::new();
    };

    let mut merged = Vec::with_capacity(events.len());
    let mut current = first.clone();

    for next in iter {
        if current.gap_hours_to(next) <= merge_threshold_hours {
            current.absorb(next);
        } else {
            merged.push(std::mem::replace(&mut current, next.clone()));
        }
    }

    merged.push(current);
    merged
}
