//! Learning rate policies for training loops: cosine annealing with warm restarts (SGDR) and
//! staircase step decay.

mod config;
mod error;
mod schedule;
#[cfg(test)]
mod test_helpers;

pub use burn::LearningRate;
pub use config::{ScheduleConfig, SgdrConfig, StepConfig};
pub use error::{LrPolicyError, Result};
pub use schedule::{LrPolicy, LrSchedule};
