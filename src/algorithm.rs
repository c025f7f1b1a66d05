use std::fmt::{Display, Formatter};
use std::str::FromStr;

use anyhow::anyhow;

/// Sort algorithm selection
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Adjacent swap sort with early termination, O(n²)
    Bubble,
    /// Shift based sort, O(n²)
    Insertion,
    /// Stable top down merge sort, O(n log n)
    Merge,
}

impl Algorithm {
    /// The order in which a comparison benchmark runs the algorithms
    pub const ALL: [Algorithm; 3] = [Algorithm::Bubble, Algorithm::Insertion, Algorithm::Merge];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Bubble => "Bubble Sort",
            Algorithm::Insertion => "Insertion Sort",
            Algorithm::Merge => "Merge Sort",
        }
    }

    /// True for the algorithms whose running time grows with the square of the input
    pub fn is_quadratic(&self) -> bool {
        matches!(self, Algorithm::Bubble | Algorithm::Insertion)
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Algorithm {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().trim_end_matches(" sort") {
            "bubble" => Ok(Algorithm::Bubble),
            "insertion" => Ok(Algorithm::Insertion),
            "merge" => Ok(Algorithm::Merge),
            _ => Err(anyhow!("unknown algorithm: {s}")),
        }
    }
}
