use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

use crate::model::ids::ModuleKey;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("percent must be between 0 and 100, got {0}")]
    PercentOutOfRange(i64),

    #[error("country name cannot be empty")]
    EmptyCountry,
}

//
// ─── PERCENT ───────────────────────────────────────────────────────────────────
//

/// Percentage of a module completed, always in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Percent(u8);

impl Percent {
    pub const ZERO: Self = Self(0);
    pub const COMPLETE: Self = Self(100);

    /// # Errors
    ///
    /// Returns `ProgressError::PercentOutOfRange` outside `0..=100`.
    pub fn new(value: i64) -> Result<Self, ProgressError> {
        match u8::try_from(value) {
            Ok(v) if v <= 100 => Ok(Self(v)),
            _ => Err(ProgressError::PercentOutOfRange(value)),
        }
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Percent {
    type Error = ProgressError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Percent> for i64 {
    fn from(value: Percent) -> Self {
        i64::from(value.0)
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

//
// ─── COUNTRY ───────────────────────────────────────────────────────────────────
//

/// Country a user is learning about; also the partition key for module progress.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CountryName(String);

impl CountryName {
    /// # Errors
    ///
    /// Returns `ProgressError::EmptyCountry` if the trimmed name is empty.
    pub fn new(raw: impl Into<String>) -> Result<Self, ProgressError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ProgressError::EmptyCountry);
        }
        Ok(Self(trimmed.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//
// ─── USER PROGRESS ─────────────────────────────────────────────────────────────
//

/// Per-user progress record as persisted by the progress store.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserProgress {
    /// Highest module ordinal ever opened. Never decreases.
    pub completed_module: u32,
    pub selected_country: Option<CountryName>,
}

impl UserProgress {
    /// `completed_module / total_modules`; 0 for an empty catalog.
    #[must_use]
    pub fn overall(&self, total_modules: u32) -> OverallProgress {
        OverallProgress::from_counts(self.completed_module, total_modules)
    }
}

/// Fraction of modules reached, as shown by the home screen's growth animation.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
pub struct OverallProgress(f32);

impl OverallProgress {
    pub const NONE: Self = Self(0.0);

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_counts(completed: u32, total: u32) -> Self {
        if total == 0 {
            return Self::NONE;
        }
        Self(completed as f32 / total as f32)
    }

    #[must_use]
    pub fn fraction(self) -> f32 {
        self.0
    }
}

/// Module key -> percent for one country. Ordered for stable display.
pub type CountryProgress = BTreeMap<ModuleKey, Percent>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_bounds() {
        assert_eq!(Percent::new(0).unwrap(), Percent::ZERO);
        assert_eq!(Percent::new(100).unwrap(), Percent::COMPLETE);
        assert_eq!(Percent::new(101), Err(ProgressError::PercentOutOfRange(101)));
        assert_eq!(Percent::new(-1), Err(ProgressError::PercentOutOfRange(-1)));
    }

    #[test]
    fn overall_progress_is_normalized() {
        assert!((OverallProgress::from_counts(2, 5).fraction() - 0.4).abs() < f32::EPSILON);
        assert!((OverallProgress::from_counts(5, 5).fraction() - 1.0).abs() < f32::EPSILON);
        // Ordinals past the catalog are reported as-is, not capped.
        assert!((OverallProgress::from_counts(9, 5).fraction() - 1.8).abs() < 1e-6);
        assert_eq!(OverallProgress::from_counts(3, 0), OverallProgress::NONE);
    }

    #[test]
    fn default_user_progress_has_no_country() {
        let progress = UserProgress::default();
        assert_eq!(progress.completed_module, 0);
        assert!(progress.selected_country.is_none());
        assert_eq!(progress.overall(5), OverallProgress::NONE);
    }
}
