use std::f64::consts::PI;

use burn::LearningRate;
use log::{debug, trace};
use snafu::{OptionExt, ensure};
use strum::{Display, EnumIter, EnumString};

use crate::config::ScheduleConfig;
use crate::error::{InvalidArgumentSnafu, Result, UnknownPolicySnafu};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LrPolicy {
    /// Cosine annealing with warm restarts.
    Sgdr,
    /// Staircase decay by a constant ratio every `step_size` iterations.
    Step,
}

impl LrPolicy {
    /// Parse a policy name, `sgdr` or `step` in any case.
    pub fn from_name(name: &str) -> Result<Self> {
        name.parse().ok().context(UnknownPolicySnafu { name })
    }
}

/// Learning rate as a pure function of the training iteration.
///
/// The schedule holds no counter, so queries may come in any order and a resumed training run
/// gets exactly the rates it would have seen had it never stopped.
///
/// ```
/// use lr_policy::{LrPolicy, LrSchedule, ScheduleConfig, SgdrConfig, StepConfig};
///
/// let config = ScheduleConfig::new(
///     1.0,
///     30,
///     SgdrConfig::new(2.0, 2, 0.0),
///     StepConfig::new(0.1, 10),
/// );
/// let schedule = LrSchedule::new(LrPolicy::Sgdr, config, None)?;
/// assert_eq!(schedule.lr_at(0)?, 1.0);
/// // The first cycle is 10 iterations long, so iteration 10 restarts at the peak.
/// assert_eq!(schedule.lr_at(10)?, 1.0);
/// # Ok::<(), lr_policy::LrPolicyError>(())
/// ```
#[derive(Clone, Debug)]
pub struct LrSchedule {
    policy: LrPolicy,
    config: ScheduleConfig,
    initial_cycle_len: f64,
}

impl LrSchedule {
    /// Build a schedule, validating `config` first.
    ///
    /// A non-zero `max_iter_override` replaces `config.max_iter`.
    pub fn new(
        policy: LrPolicy,
        mut config: ScheduleConfig,
        max_iter_override: Option<usize>,
    ) -> Result<Self> {
        if let Some(max_iter) = max_iter_override.filter(|&max_iter| max_iter > 0) {
            config.max_iter = max_iter;
        }
        config.validate()?;
        let initial_cycle_len = config.sgdr.initial_cycle_len(config.max_iter);
        debug!(
            "lr schedule: policy={policy}, max_iter={}, initial cycle length={initial_cycle_len}",
            config.max_iter
        );
        Ok(Self {
            policy,
            config,
            initial_cycle_len,
        })
    }

    pub fn from_name(
        name: &str,
        config: ScheduleConfig,
        max_iter_override: Option<usize>,
    ) -> Result<Self> {
        Self::new(LrPolicy::from_name(name)?, config, max_iter_override)
    }

    pub fn policy(&self) -> LrPolicy {
        self.policy
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Effective training horizon, after any override.
    pub fn max_iter(&self) -> usize {
        self.config.max_iter
    }

    /// Length of the first SGDR cycle.
    pub fn initial_cycle_len(&self) -> f64 {
        self.initial_cycle_len
    }

    /// Learning rate at `iteration`. Fails only for a negative iteration.
    pub fn lr_at(&self, iteration: i64) -> Result<LearningRate> {
        ensure!(iteration >= 0, InvalidArgumentSnafu { iteration });
        Ok(self.lr_for(iteration as u64))
    }

    /// Learning rates for every iteration of the horizon, in order.
    pub fn curve(&self) -> impl Iterator<Item = LearningRate> + '_ {
        (0..self.config.max_iter as u64).map(|iteration| self.lr_for(iteration))
    }

    fn lr_for(&self, iteration: u64) -> LearningRate {
        match self.policy {
            LrPolicy::Sgdr => self.sgdr_func(iteration),
            LrPolicy::Step => self.step_func(iteration),
        }
    }

    fn sgdr_func(&self, iteration: u64) -> LearningRate {
        let lr_max = self.config.base_lr;
        let lr_min = lr_max * self.config.sgdr.lr_min_ratio;
        let (phase, cycle_len) = self.resolve_cycle(iteration);
        let lr = lr_min + 0.5 * (lr_max - lr_min) * (1.0 + (phase / cycle_len * PI).cos());
        // Rounding can land one ulp outside the bounds.
        lr.clamp(lr_min, lr_max)
    }

    fn step_func(&self, iteration: u64) -> LearningRate {
        let decays = iteration / self.config.step.step_size as u64;
        self.config.base_lr * self.config.step.decay_ratio.powf(decays as f64)
    }

    /// Walk `iteration` forward through the restart cycles, returning the phase within the
    /// cycle it lands in together with that cycle's length.
    fn resolve_cycle(&self, iteration: u64) -> (f64, f64) {
        let mut phase = iteration as f64;
        let mut cycle_len = self.initial_cycle_len;
        while phase >= cycle_len {
            phase -= cycle_len;
            cycle_len *= self.config.sgdr.t_mul;
            trace!("warm restart at iteration {iteration}: next cycle length {cycle_len}");
        }
        (phase, cycle_len)
    }
}
