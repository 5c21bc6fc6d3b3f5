//! Field snapshot capture at configured observation steps.
//!
//! Snapshots are the hand-off point to the (external) presentation layer:
//! plain step-keyed copies of the E field, with no embedded scaling or
//! labeling metadata.

use rustc_hash::FxHashMap;
use tracing::debug;

/// Copies the full E field at each configured observation step.
#[derive(Debug, Clone)]
pub struct SnapshotRecorder {
    steps: Vec<usize>,
    snapshots: FxHashMap<usize, Vec<f64>>,
}

impl SnapshotRecorder {
    /// Create a recorder for the given observation steps.
    #[must_use]
    pub fn new(steps: &[usize]) -> Self {
        Self {
            steps: steps.to_vec(),
            snapshots: FxHashMap::default(),
        }
    }

    /// Store a by-value copy of the field if `step` is an observation step.
    pub fn capture(&mut self, step: usize, ex: &[f64]) {
        if self.steps.contains(&step) {
            debug!("Capturing field snapshot at step {step}");
            self.snapshots.insert(step, ex.to_vec());
        }
    }

    /// Snapshot taken at `step`, if one was configured and reached.
    #[must_use]
    pub fn get(&self, step: usize) -> Option<&[f64]> {
        self.snapshots.get(&step).map(Vec::as_slice)
    }

    /// Consume the recorder, yielding the step-keyed snapshot map.
    #[must_use]
    pub fn into_map(self) -> FxHashMap<usize, Vec<f64>> {
        self.snapshots
    }
}
