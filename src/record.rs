use std::sync::OnceLock;

use anyhow::anyhow;
use regex::Regex;

// Non printable general categories, tab, newline, carriage return and the ASCII space excepted
const NON_PRINTABLE: &str = r"[\p{Cc}\p{Cf}\p{Co}\p{Cn}\p{Zl}\p{Zp}\p{Zs}&&[^ \t\n\r]]";

/// A single sortable row: an identifier and two name fields.
///
/// Records are immutable once constructed. [Record::new] sanitizes both names and rejects
/// non-positive identifiers and empty first names, so every [Record] in a loaded dataset is
/// valid.
///
/// # Examples
/// ```
/// use sort_bench::record::Record;
/// let record = Record::new(7, "  Jane ", "Roe\u{7}").unwrap();
/// assert_eq!(record.first_name(), "Jane");
/// assert_eq!(record.last_name(), "Roe");
/// assert!(Record::new(0, "Jane", "Roe").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Record {
    id: i64,
    first_name: String,
    last_name: String,
}

impl Record {
    /// Create a new [Record]
    ///
    /// # Arguments
    /// * `id` - must be greater than zero
    /// * `first_name` - sanitized, must not be empty afterwards
    /// * `last_name` - sanitized, may be empty
    pub fn new(id: i64, first_name: &str, last_name: &str) -> Result<Record, anyhow::Error> {
        if id <= 0 {
            return Err(anyhow!("id must be positive, got: {id}"));
        }

        let first_name = Self::sanitize(first_name)?;
        if first_name.is_empty() {
            return Err(anyhow!("id: {id}, error: first name is empty after sanitization"));
        }

        Ok(
            Record {
                id,
                first_name,
                last_name: Self::sanitize(last_name)?,
            }
        )
    }

    /// Drop non printable characters, keeping tab, newline and carriage return, then trim
    /// surrounding whitespace. Control, format, private use, unassigned and separator characters
    /// other than the ASCII space are non printable.
    pub fn sanitize(text: &str) -> Result<String, anyhow::Error> {
        let kept = non_printable()?.replace_all(text, "");
        Ok(kept.trim().to_string())
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }
}

fn non_printable() -> Result<&'static Regex, anyhow::Error> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    if let Some(r) = PATTERN.get() {
        return Ok(r);
    }
    let r = Regex::new(NON_PRINTABLE)?;
    Ok(PATTERN.get_or_init(|| r))
}
