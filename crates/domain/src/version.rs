//! Aggregate version counter for optimistic concurrency.

use serde::{Deserialize, Serialize};

/// Monotonic version of an aggregate.
///
/// Starts at 0 for a freshly constructed aggregate and is bumped by the
/// storage layer on every successful update. An update carrying a stale
/// version is rejected with a conflict instead of silently overwriting
/// a concurrent write.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Version(u64);

impl Version {
    /// Creates a version from a raw value.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the initial version (0) for a new aggregate.
    pub fn initial() -> Self {
        Self(0)
    }

    /// Returns the next version.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// Returns the raw version value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Version {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Version> for u64 {
    fn from(version: Version) -> Self {
        version.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_is_zero() {
        assert_eq!(Version::initial().as_u64(), 0);
        assert_eq!(Version::default(), Version::initial());
    }

    #[test]
    fn next_increments() {
        assert_eq!(Version::initial().next(), Version::new(1));
        assert_eq!(Version::new(41).next().as_u64(), 42);
    }

    #[test]
    fn serialization_roundtrip() {
        let version = Version::new(7);
        let json = serde_json::to_string(&version).unwrap();
        assert_eq!(json, "7");
        let deserialized: Version = serde_json::from_str(&json).unwrap();
        assert_eq!(version, deserialized);
    }
}
