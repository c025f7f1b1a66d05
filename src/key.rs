use std::cmp::Ordering;

/// Borrowed comparison key projected from a record by a [SortKey](crate::sort_key::SortKey).
///
/// Both sides of a comparison are always projected by the same sort key, so mixed variants only
/// order by variant.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Key<'a> {
    String {
        s: &'a str
    },
    Integer {
        i: i64
    },
}

impl<'a> Key<'a> {
    fn rank(&self) -> u8 {
        match self {
            Key::String { .. } => 0,
            Key::Integer { .. } => 1,
        }
    }
}

impl Eq for Key<'_> {}

impl PartialEq<Self> for Key<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl PartialOrd<Self> for Key<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Key<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Key::String { s }, Key::String { s: o }) => { s.cmp(o) }
            (Key::Integer { i }, Key::Integer { i: o }) => { i.cmp(o) }
            _ => { self.rank().cmp(&other.rank()) }
        }
    }
}
