//! Location codes and code generation
//!
//! Codes are short human-facing tokens (`Z-01`, `R-03`) that also appear in
//! breadcrumb labels and URLs. User-entered codes are sanitized to `[A-Z0-9]+`;
//! generated codes use `{prefix}-{NN}`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::level::HierarchyLevel;

/// A location code, either sanitized user input or generated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationCode(String);

impl LocationCode {
    /// Sanitize user input: uppercase, drop everything outside `[A-Z0-9]`.
    ///
    /// Returns `None` when nothing survives, which callers treat as "no code
    /// supplied".
    ///
    /// # Example
    ///
    /// ```
    /// use stockyard_domain::LocationCode;
    ///
    /// let code = LocationCode::sanitize(" a-1 b!").unwrap();
    /// assert_eq!(code.as_str(), "A1B");
    /// assert!(LocationCode::sanitize("--").is_none());
    /// ```
    pub fn sanitize(raw: &str) -> Option<Self> {
        let cleaned: String = raw
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_uppercase())
            .collect();
        if cleaned.is_empty() {
            None
        } else {
            Some(Self(cleaned))
        }
    }

    /// Generated code `{prefix}-{NN}` for a zone, rack or level.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` for the warehouse tier, whose codes are
    /// assigned externally.
    pub fn generated(level: HierarchyLevel, sequence: u32) -> Result<Self, DomainError> {
        let prefix = level.code_prefix().ok_or_else(|| {
            DomainError::validation("Warehouse codes are assigned externally and cannot be generated")
        })?;
        Ok(Self(Self::render(prefix, sequence)))
    }

    /// Render `{prefix}-{NN}` without wrapping it.
    pub fn render(prefix: &str, sequence: u32) -> String {
        format!("{}-{:02}", prefix, sequence)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for LocationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<LocationCode> for String {
    fn from(code: LocationCode) -> String {
        code.0
    }
}

/// Composer for a bin's hierarchical code.
///
/// Format: `{WarehouseCode}-{ZoneCode}-{RackCode}-{LevelCode}-B{NN}`. `NN` is
/// zero-padded to two digits and simply grows past 99.
#[derive(Debug, Clone, Copy)]
pub struct BinCode<'a> {
    pub warehouse: &'a str,
    pub zone: &'a str,
    pub rack: &'a str,
    pub level: &'a str,
}

impl<'a> BinCode<'a> {
    pub fn new(warehouse: &'a str, zone: &'a str, rack: &'a str, level: &'a str) -> Self {
        Self {
            warehouse,
            zone,
            rack,
            level,
        }
    }

    /// Generated full code for sequence number `sequence`.
    pub fn generated(&self, sequence: u32) -> String {
        self.with_suffix(&format!("B{:02}", sequence))
    }

    /// Full code ending in an explicit bin code.
    pub fn with_suffix(&self, suffix: &str) -> String {
        format!(
            "{}-{}-{}-{}-{}",
            self.warehouse, self.zone, self.rack, self.level, suffix
        )
    }
}

/// How the sequence number of a generated code is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CodeSequence {
    /// Per-parent counter that never goes backwards; codes already used by a
    /// sibling are skipped.
    #[default]
    Monotonic,
    /// Legacy behavior: current sibling count plus one. Collides after a
    /// delete-then-add cycle.
    SiblingCount,
}

impl CodeSequence {
    /// Pick the next sequence number.
    ///
    /// `counter` is the parent's persisted sequence, `sibling_codes` the codes of
    /// the existing siblings and `render` turns a candidate number into the code
    /// it would produce.
    pub fn next<F>(self, counter: u32, sibling_codes: &[&str], render: F) -> u32
    where
        F: Fn(u32) -> String,
    {
        let sibling_count = u32::try_from(sibling_codes.len()).unwrap_or(u32::MAX);
        match self {
            Self::SiblingCount => sibling_count.saturating_add(1),
            Self::Monotonic => {
                let mut candidate = counter.max(sibling_count).saturating_add(1);
                while sibling_codes.contains(&render(candidate).as_str()) {
                    candidate = candidate.saturating_add(1);
                }
                candidate
            }
        }
    }
}

impl FromStr for CodeSequence {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monotonic" => Ok(Self::Monotonic),
            "sibling-count" | "sibling_count" | "legacy" => Ok(Self::SiblingCount),
            other => Err(DomainError::parse(format!(
                "Unknown code sequence: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone_code(n: u32) -> String {
        format!("Z-{:02}", n)
    }

    #[test]
    fn sanitize_uppercases_and_strips() {
        let code = LocationCode::sanitize("zn 04/b").expect("non-empty");
        assert_eq!(code.as_str(), "ZN04B");
        assert!(LocationCode::sanitize("  ").is_none());
    }

    #[test]
    fn generated_codes_are_zero_padded() {
        let code = LocationCode::generated(HierarchyLevel::Rack, 7).expect("rack");
        assert_eq!(code.as_str(), "R-07");
        let code = LocationCode::generated(HierarchyLevel::Level, 123).expect("level");
        assert_eq!(code.as_str(), "L-123");
        assert!(LocationCode::generated(HierarchyLevel::Warehouse, 1).is_err());
    }

    #[test]
    fn bin_code_format() {
        let bin = BinCode::new("WH1", "Z-01", "R-02", "L-03");
        assert_eq!(bin.generated(4), "WH1-Z-01-R-02-L-03-B04");
        assert_eq!(bin.generated(100), "WH1-Z-01-R-02-L-03-B100");
        assert_eq!(bin.with_suffix("X9"), "WH1-Z-01-R-02-L-03-X9");
    }

    #[test]
    fn sibling_count_reuses_numbers_after_delete() {
        // One zone left after deleting Z-01 out of two.
        let next = CodeSequence::SiblingCount.next(2, &["Z-02"], zone_code);
        assert_eq!(next, 2);
    }

    #[test]
    fn monotonic_never_goes_backwards() {
        let next = CodeSequence::Monotonic.next(2, &["Z-02"], zone_code);
        assert_eq!(next, 3);
        let next = CodeSequence::Monotonic.next(0, &[], zone_code);
        assert_eq!(next, 1);
    }

    #[test]
    fn monotonic_skips_codes_already_in_use() {
        // Snapshot data with no counter but a hand-coded Z-02.
        let next = CodeSequence::Monotonic.next(0, &["Z-02"], zone_code);
        assert_eq!(next, 3);
    }

    #[test]
    fn parses_sequence_names() {
        assert_eq!(
            "sibling-count".parse::<CodeSequence>().ok(),
            Some(CodeSequence::SiblingCount)
        );
        assert_eq!("Monotonic".parse::<CodeSequence>().ok(), Some(CodeSequence::Monotonic));
        assert!("random".parse::<CodeSequence>().is_err());
    }
}
