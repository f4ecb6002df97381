use std::path::PathBuf;

use thiserror::Error;

use crate::data::model::DEFAULT_TOTAL_LABEL;

pub const ENV_DATA: &str = "CENSUS_VIEWER_DATA";
pub const ENV_FONT: &str = "CENSUS_VIEWER_FONT";
pub const ENV_TOTAL_LABEL: &str = "CENSUS_VIEWER_TOTAL_LABEL";
pub const ENV_SELECT_ALL: &str = "CENSUS_VIEWER_SELECT_ALL";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: expected a boolean (true/false, 1/0, yes/no, on/off), got '{value}'")]
    InvalidBool { var: &'static str, value: String },

    #[error("{var}: must not be empty")]
    Empty { var: &'static str },
}

/// Startup settings, resolved from the command line and environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    /// Dataset opened at startup.
    pub data_path: Option<PathBuf>,
    /// Font with CJK glyphs; probed from system locations when unset.
    pub font_path: Option<PathBuf>,
    /// Age-bracket value that holds the all-ages sum.
    pub total_label: String,
    /// Show All / None buttons next to each selection list.
    pub select_all_shortcuts: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            font_path: None,
            total_label: DEFAULT_TOTAL_LABEL.to_string(),
            select_all_shortcuts: true,
        }
    }
}

impl ViewerConfig {
    /// Read `std::env::args()` and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(std::env::args().skip(1), |var| std::env::var(var).ok())
    }

    /// The first positional argument wins over `CENSUS_VIEWER_DATA`.
    pub fn resolve<A, E>(args: A, env: E) -> Result<Self, ConfigError>
    where
        A: IntoIterator<Item = String>,
        E: Fn(&str) -> Option<String>,
    {
        let mut config = ViewerConfig::default();

        config.data_path = args
            .into_iter()
            .find(|a| !a.starts_with('-'))
            .or_else(|| env(ENV_DATA))
            .map(PathBuf::from);
        config.font_path = env(ENV_FONT).map(PathBuf::from);

        if let Some(label) = env(ENV_TOTAL_LABEL) {
            let label = label.trim();
            if label.is_empty() {
                return Err(ConfigError::Empty { var: ENV_TOTAL_LABEL });
            }
            config.total_label = label.to_string();
        }
        if let Some(value) = env(ENV_SELECT_ALL) {
            config.select_all_shortcuts = parse_bool(ENV_SELECT_ALL, &value)?;
        }

        Ok(config)
    }
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            var,
            value: value.to_string(),
        }),
    }
}
