use std::collections::BTreeSet;

use super::types::{ExtremumIndex, ExtremumKind};

/// Peak and trough indices found in a value sequence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extrema {
    /// Indices of local maxima
    pub peaks: BTreeSet<usize>,
    /// Indices of local minima
    pub troughs: BTreeSet<usize>,
}

impl Extrema {
    /// Kind of extremum at `index`, if any
    pub fn kind_at(&self, index: usize) -> Option<ExtremumKind> {
        if self.peaks.contains(&index) {
            Some(ExtremumKind::Peak)
        } else if self.troughs.contains(&index) {
            Some(ExtremumKind::Trough)
        } else {
            None
        }
    }

    /// All extrema ordered by index
    pub fn ordered(&self) -> Vec<ExtremumIndex> {
        let mut all: Vec<ExtremumIndex> = self
            .peaks
            .iter()
            .map(|&index| ExtremumIndex {
                index,
                kind: ExtremumKind::Peak,
            })
            .chain(self.troughs.iter().map(|&index| ExtremumIndex {
                index,
                kind: ExtremumKind::Trough,
            }))
            .collect();
        all.sort_unstable_by_key(|e| e.index);
        all
    }

    /// Total number of flagged indices
    pub fn len(&self) -> usize {
        self.peaks.len() + self.troughs.len()
    }

    /// True when nothing was flagged
    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty() && self.troughs.is_empty()
    }
}

/// Flag interior samples that reverse direction by at least `threshold` on both sides.
///
/// A sample is a peak when it is strictly above both neighbours and differs
/// from each by `>= threshold`; troughs mirror this. The first and last
/// samples have only one neighbour and are never flagged. Sequences shorter
/// than three samples yield no extrema.
pub fn detect(values: &[f64], threshold: f64) -> Extrema {
    let mut extrema = Extrema::default();

    for (offset, window) in values.windows(3).enumerate() {
        let (last, current, next) = (window[0], window[1], window[2]);
        let diff_next = (current - next).abs();
        let diff_last = (current - last).abs();

        if diff_next < threshold || diff_last < threshold {
            continue;
        }

        let index = offset + 1;
        if current > next && current > last {
            extrema.peaks.insert(index);
        } else if current < next && current < last {
            extrema.troughs.insert(index);
        }
    }

    extrema
}
