use serde::Serialize;

use crate::{Error, Result};

/// What kind of step a record represents.
///
/// `Init` is always index 0 and captures the state before the first
/// iteration. `Final` is only produced by algorithms that close with a
/// synthetic summary step (Kruskal); the others simply end on their last
/// `Iteration`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepAction {
    Init,
    Iteration,
    Final,
}

/// One examined entry of a step: where, what it was, what it became, and
/// whether it actually changed. Steppers record entries even when nothing
/// changed so a front end can show "examined but kept" cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Change<K, V> {
    pub key: K,
    pub old: V,
    pub new: V,
    pub changed: bool,
}

impl<K, V> Change<K, V> {
    pub fn changed(key: K, old: V, new: V) -> Self {
        Change {
            key,
            old,
            new,
            changed: true,
        }
    }

    pub fn unchanged(key: K, old: V, new: V) -> Self {
        Change {
            key,
            old,
            new,
            changed: false,
        }
    }
}

/// State of one algorithm iteration: a zero-based index, an action tag, the
/// full snapshot at the end of the iteration, and the list of examined
/// entries. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step<S, C> {
    index: usize,
    action: StepAction,
    pub snapshot: S,
    pub changes: Vec<C>,
}

impl<S, C> Step<S, C> {
    /// Zero-based position of this step in its sequence
    pub fn index(&self) -> usize {
        self.index
    }

    /// The action tag of this step
    pub fn action(&self) -> StepAction {
        self.action
    }

    pub fn is_init(&self) -> bool {
        self.action == StepAction::Init
    }

    pub fn is_final(&self) -> bool {
        self.action == StepAction::Final
    }
}

/// Accumulates steps during one eager computation call.
///
/// Indices are assigned in recording order. The recorder is local to a single
/// run and is consumed by [`StepRecorder::finish`].
#[derive(Debug)]
pub struct StepRecorder<S, C> {
    steps: Vec<Step<S, C>>,
}

impl<S, C> StepRecorder<S, C> {
    pub fn new() -> Self {
        StepRecorder { steps: Vec::new() }
    }

    /// Appends a step holding `snapshot` and `changes`, assigning it the next
    /// index.
    pub fn record(&mut self, action: StepAction, snapshot: S, changes: Vec<C>) {
        self.steps.push(Step {
            index: self.steps.len(),
            action,
            snapshot,
            changes,
        });
    }

    /// Number of steps recorded so far
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Seals the recording into an immutable sequence
    pub fn finish(self) -> StepSequence<S, C> {
        StepSequence { steps: self.steps }
    }
}

impl<S, C> Default for StepRecorder<S, C> {
    fn default() -> Self {
        Self::new()
    }
}

/// The immutable, replayable outcome of one algorithm run.
///
/// Steps are accessed by index, sequentially or randomly; repeated access to
/// the same index returns identical data. A new run replaces the whole
/// sequence, never patches it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepSequence<S, C> {
    steps: Vec<Step<S, C>>,
}

impl<S, C> StepSequence<S, C> {
    /// Total number of recorded steps
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// The step at `index`, or [`Error::IndexOutOfRange`]
    pub fn step_at(&self, index: usize) -> Result<&Step<S, C>> {
        self.steps.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.steps.len(),
        })
    }

    /// The initial step, if any steps were recorded
    pub fn first_step(&self) -> Option<&Step<S, C>> {
        self.steps.first()
    }

    /// The last step of the sequence, if any steps were recorded
    pub fn final_step(&self) -> Option<&Step<S, C>> {
        self.steps.last()
    }

    /// Iterates the steps in order
    pub fn iter(&self) -> impl Iterator<Item = &Step<S, C>> {
        self.steps.iter()
    }
}
