use std::path::PathBuf;

use snafu::Snafu;

#[derive(Snafu, Debug)]
#[snafu(visibility(pub(crate)))]
pub enum LrPolicyError {
    #[snafu(display("unrecognized lr policy `{name}`, expected `sgdr` or `step`"))]
    UnknownPolicy { name: String },
    #[snafu(display("invalid config field `{field}`: {reason}"))]
    InvalidConfig { field: &'static str, reason: String },
    #[snafu(display("failed to read config file {}", path.display()))]
    ReadConfig {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("failed to parse config file {}: {source}", path.display()))]
    ParseYaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[snafu(display("failed to load config file {}: {source}", path.display()))]
    LoadJson {
        path: PathBuf,
        source: burn::config::ConfigError,
    },
    #[snafu(display("iteration must be non-negative, got {iteration}"))]
    InvalidArgument { iteration: i64 },
}

impl LrPolicyError {
    /// Whether the error was raised while building a schedule, as opposed to querying one.
    pub fn is_config_error(&self) -> bool {
        !matches!(self, Self::InvalidArgument { .. })
    }
}

pub type Result<T, E = LrPolicyError> = std::result::Result<T, E>;
