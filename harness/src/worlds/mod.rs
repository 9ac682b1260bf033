//! World implementations for the harness runner.

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod bridge_crossing;
pub mod queens;
pub mod river_crossing;
pub mod tiles;
pub mod water_buckets;

/// Which side of a river or bridge something is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bank {
    Near,
    Far,
}

impl Bank {
    /// The opposite side.
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Self::Near => Self::Far,
            Self::Far => Self::Near,
        }
    }
}

impl fmt::Display for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Near => "near",
            Self::Far => "far",
        })
    }
}
