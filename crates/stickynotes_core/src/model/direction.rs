//! Scan direction for ordered note reads.

use serde::{Deserialize, Serialize};

/// Direction of a cursor over the timestamp index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanDirection {
    /// Oldest first: `timestamp ASC, key ASC`.
    #[default]
    Forward,
    /// Newest first: exact reverse of `Forward`.
    Reverse,
}

impl ScanDirection {
    /// Returns the opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            Self::Forward => Self::Reverse,
            Self::Reverse => Self::Forward,
        }
    }

    pub(crate) fn as_sql(self) -> &'static str {
        match self {
            Self::Forward => "ASC",
            Self::Reverse => "DESC",
        }
    }

    pub(crate) fn as_log_value(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Reverse => "reverse",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ScanDirection;

    #[test]
    fn default_is_forward_and_flip_toggles() {
        let direction = ScanDirection::default();
        assert_eq!(direction, ScanDirection::Forward);
        assert_eq!(direction.flipped(), ScanDirection::Reverse);
        assert_eq!(direction.flipped().flipped(), ScanDirection::Forward);
    }
}
