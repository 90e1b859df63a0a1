pub mod step;

pub use step::{Change, Step, StepAction, StepRecorder, StepSequence};
