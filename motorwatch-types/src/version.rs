//! Snapshot schema version.

use std::fmt;

use crate::SCHEMA_VERSION;

/// Version stamped into every [`HealthSnapshot`](crate::HealthSnapshot).
///
/// `major` changes when a field is removed or changes meaning; `minor`
/// changes when fields are only added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SchemaVersion {
    pub major: u32,
    pub minor: u32,
}

impl SchemaVersion {
    /// The version written by this crate.
    pub const fn current() -> Self {
        Self {
            major: SCHEMA_VERSION,
            minor: 0,
        }
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(SchemaVersion::current().to_string(), format!("{SCHEMA_VERSION}.0"));
    }
}
