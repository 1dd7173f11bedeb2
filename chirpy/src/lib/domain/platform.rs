use std::fmt;

use serde::Deserialize;

/// Deployment mode the service runs in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Dev,
    #[default]
    Production,
}

impl Platform {
    /// Whether destructive administrative operations are permitted.
    pub fn allows_reset(&self) -> bool {
        matches!(self, Platform::Dev)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Dev => f.write_str("dev"),
            Platform::Production => f.write_str("production"),
        }
    }
}
