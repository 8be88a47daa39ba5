use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised when building identifiers from raw input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IdError {
    #[error("user id cannot be empty")]
    EmptyUserId,

    #[error("module key cannot be empty")]
    EmptyModuleKey,

    #[error("module ordinal must be >= 1")]
    ZeroOrdinal,

    #[error("failed to parse {kind} from {raw:?}")]
    Parse { kind: &'static str, raw: String },
}

/// Identifier of an authenticated user, as issued by the auth provider.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Creates a new `UserId`.
    ///
    /// # Errors
    ///
    /// Returns `IdError::EmptyUserId` if the trimmed value is empty.
    pub fn new(raw: impl Into<String>) -> Result<Self, IdError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(IdError::EmptyUserId);
        }
        Ok(Self(trimmed.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Stable name a module's progress is stored under (e.g. "Culture").
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModuleKey(String);

impl ModuleKey {
    /// Creates a new `ModuleKey`.
    ///
    /// # Errors
    ///
    /// Returns `IdError::EmptyModuleKey` if the trimmed value is empty.
    pub fn new(raw: impl Into<String>) -> Result<Self, IdError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(IdError::EmptyModuleKey);
        }
        Ok(Self(trimmed.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 1-based position of a module on the home screen, used for ratcheting.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModuleOrdinal(u32);

impl ModuleOrdinal {
    /// Creates a new `ModuleOrdinal`.
    ///
    /// # Errors
    ///
    /// Returns `IdError::ZeroOrdinal` for `0`.
    pub fn new(value: u32) -> Result<Self, IdError> {
        if value == 0 {
            return Err(IdError::ZeroOrdinal);
        }
        Ok(Self(value))
    }

    /// Returns the underlying u32 value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Debug for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserId({})", self.0)
    }
}

impl fmt::Debug for ModuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModuleKey({})", self.0)
    }
}

impl fmt::Debug for ModuleOrdinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModuleOrdinal({})", self.0)
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ModuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ModuleOrdinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── FromStr Implementations ───────────────────────────────────────────────────

impl FromStr for UserId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl FromStr for ModuleOrdinal {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().parse::<u32>().map_err(|_| IdError::Parse {
            kind: "ModuleOrdinal",
            raw: s.to_owned(),
        })?;
        Self::new(value)
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
