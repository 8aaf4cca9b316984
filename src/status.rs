//! VPS status badge colors.
//!
//! Status labels arrive as plain strings in server-rendered markup and API
//! payloads. The lookup is total: anything outside the known lifecycle
//! states renders with the neutral gray badge.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "status_test.rs"]
mod status_test;

/// Tailwind classes for a status badge, split by color scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StyleToken {
    pub light: &'static str,
    pub dark: &'static str,
}

impl StyleToken {
    /// Full class attribute value, light classes first.
    pub fn class_names(self) -> String {
        format!("{} {}", self.light, self.dark)
    }
}

impl fmt::Display for StyleToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.light, self.dark)
    }
}

const GREEN: StyleToken = StyleToken {
    light: "bg-green-100 text-green-800",
    dark: "dark:bg-green-900/30 dark:text-green-400",
};
const RED: StyleToken = StyleToken {
    light: "bg-red-100 text-red-800",
    dark: "dark:bg-red-900/30 dark:text-red-400",
};
const YELLOW: StyleToken = StyleToken {
    light: "bg-yellow-100 text-yellow-800",
    dark: "dark:bg-yellow-900/30 dark:text-yellow-400",
};
const ORANGE: StyleToken = StyleToken {
    light: "bg-orange-100 text-orange-800",
    dark: "dark:bg-orange-900/30 dark:text-orange-400",
};
const ROSE: StyleToken = StyleToken {
    light: "bg-rose-100 text-rose-800",
    dark: "dark:bg-rose-900/30 dark:text-rose-400",
};

/// Badge for labels outside the known set. Also used for `deleting`.
pub const NEUTRAL: StyleToken = StyleToken {
    light: "bg-gray-100 text-gray-800",
    dark: "dark:bg-gray-900/30 dark:text-gray-400",
};

/// Lifecycle state of a VPS as reported by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VpsStatus {
    Running,
    Starting,
    Stopping,
    Stopped,
    Deleting,
    Error,
}

impl VpsStatus {
    pub const ALL: [Self; 6] = [
        Self::Running,
        Self::Starting,
        Self::Stopping,
        Self::Stopped,
        Self::Deleting,
        Self::Error,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Starting => "starting",
            Self::Stopping => "stopping",
            Self::Stopped => "stopped",
            Self::Deleting => "deleting",
            Self::Error => "error",
        }
    }

    /// Exact match on the lowercase wire label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == label)
    }

    pub fn style(self) -> StyleToken {
        match self {
            Self::Running => GREEN,
            Self::Stopped => RED,
            Self::Starting => YELLOW,
            Self::Stopping => ORANGE,
            Self::Deleting => NEUTRAL,
            Self::Error => ROSE,
        }
    }
}

impl fmt::Display for VpsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for labels that are not a known [`VpsStatus`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid VPS status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for VpsStatus {
    type Err = UnknownStatus;

    /// Case-insensitive, for labels typed by operators or stored upstream.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(&s.trim().to_ascii_lowercase()).ok_or_else(|| UnknownStatus(s.to_owned()))
    }
}

/// Badge style for a status label. Unknown labels get [`NEUTRAL`].
pub fn status_style(status: &str) -> StyleToken {
    VpsStatus::from_label(status).map_or(NEUTRAL, VpsStatus::style)
}
