use std::fmt::{Display, Formatter};
use std::str::FromStr;

use anyhow::anyhow;

use crate::key::Key;
use crate::record::Record;

/// The record column a sort orders by
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Integer order of the identifier
    Id,
    /// Lexicographic byte order of the first name
    FirstName,
    /// Lexicographic byte order of the last name
    LastName,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Id, SortKey::FirstName, SortKey::LastName];

    /// Column name as written to the benchmark log
    pub fn name(&self) -> &'static str {
        match self {
            SortKey::Id => "ID",
            SortKey::FirstName => "First Name",
            SortKey::LastName => "Last Name",
        }
    }

    pub(crate) fn key<'a>(&self, record: &'a Record) -> Key<'a> {
        match self {
            SortKey::Id => Key::Integer { i: record.id() },
            SortKey::FirstName => Key::String { s: record.first_name() },
            SortKey::LastName => Key::String { s: record.last_name() },
        }
    }
}

impl Display for SortKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for SortKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', '-', ' '], "").as_str() {
            "id" => Ok(SortKey::Id),
            "firstname" | "first" => Ok(SortKey::FirstName),
            "lastname" | "last" => Ok(SortKey::LastName),
            _ => Err(anyhow!("unknown sort column: {s}")),
        }
    }
}
