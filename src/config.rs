use std::fs;
use std::path::Path;

use burn::LearningRate;
use burn::config::Config;
use snafu::{ResultExt, ensure};

use crate::error::{InvalidConfigSnafu, LoadJsonSnafu, ParseYamlSnafu, ReadConfigSnafu, Result};

/// Parameters of cosine annealing with warm restarts.
///
/// `restart_times` cycles, each `t_mul` times longer than the previous one, cover the whole
/// training horizon. See [SGDR: Stochastic Gradient Descent with Warm
/// Restarts](https://arxiv.org/abs/1608.03983).
#[derive(Config, Debug)]
pub struct SgdrConfig {
    /// Growth factor of the cycle length after each restart. Must be greater than 1.
    pub t_mul: f64,
    /// Number of cycles planned within the horizon.
    pub restart_times: u32,
    /// Minimum learning rate as a fraction of the base learning rate, in `[0, 1)`.
    pub lr_min_ratio: f64,
}

impl SgdrConfig {
    /// Length of the first cycle, so that the geometric series of cycle lengths sums to
    /// (at least) `max_iter`.
    pub fn initial_cycle_len(&self, max_iter: usize) -> f64 {
        (max_iter as f64 * (self.t_mul - 1.0) / (self.t_mul.powf(self.restart_times as f64) - 1.0))
            .ceil()
    }
}

/// Parameters of staircase step decay.
#[derive(Config, Debug)]
pub struct StepConfig {
    /// Multiplicative decay applied once per interval, in `(0, 1]`.
    pub decay_ratio: f64,
    /// Iterations per decay interval.
    pub step_size: usize,
}

#[derive(Config, Debug)]
pub struct ScheduleConfig {
    /// Initial and maximum learning rate.
    pub base_lr: LearningRate,
    /// Training horizon in iterations.
    pub max_iter: usize,
    pub sgdr: SgdrConfig,
    pub step: StepConfig,
}

impl ScheduleConfig {
    /// Load a configuration file and validate it.
    ///
    /// Files with a `.json` extension are read as burn JSON configs, everything else as YAML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config = if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
        {
            <Self as Config>::load(path).context(LoadJsonSnafu { path })?
        } else {
            let content = fs::read_to_string(path).context(ReadConfigSnafu { path })?;
            serde_yaml::from_str::<Self>(&content).context(ParseYamlSnafu { path })?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.base_lr.is_finite() && self.base_lr > 0.0,
            InvalidConfigSnafu {
                field: "base_lr",
                reason: format!("must be a positive number, got {}", self.base_lr),
            }
        );
        ensure!(
            self.max_iter > 0,
            InvalidConfigSnafu {
                field: "max_iter",
                reason: "must be greater than 0",
            }
        );

        let sgdr = &self.sgdr;
        ensure!(
            sgdr.t_mul.is_finite() && sgdr.t_mul > 1.0,
            InvalidConfigSnafu {
                field: "sgdr.t_mul",
                reason: format!("must be greater than 1, got {}", sgdr.t_mul),
            }
        );
        ensure!(
            sgdr.restart_times >= 1,
            InvalidConfigSnafu {
                field: "sgdr.restart_times",
                reason: "must be at least 1",
            }
        );
        ensure!(
            (0.0..1.0).contains(&sgdr.lr_min_ratio),
            InvalidConfigSnafu {
                field: "sgdr.lr_min_ratio",
                reason: format!("must be in [0, 1), got {}", sgdr.lr_min_ratio),
            }
        );
        let t0 = sgdr.initial_cycle_len(self.max_iter);
        ensure!(
            t0.is_finite() && t0 >= 1.0,
            InvalidConfigSnafu {
                field: "sgdr.restart_times",
                reason: format!(
                    "initial cycle length {t0} derived from max_iter {} is not a positive length",
                    self.max_iter
                ),
            }
        );

        let step = &self.step;
        ensure!(
            step.decay_ratio > 0.0 && step.decay_ratio <= 1.0,
            InvalidConfigSnafu {
                field: "step.decay_ratio",
                reason: format!("must be in (0, 1], got {}", step.decay_ratio),
            }
        );
        ensure!(
            step.step_size > 0,
            InvalidConfigSnafu {
                field: "step.step_size",
                reason: "must be greater than 0",
            }
        );
        Ok(())
    }
}
