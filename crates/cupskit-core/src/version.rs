// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Dotted version numbers and the `require` check callers use to insist on a
// minimum cupskit version.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::{CupskitError, Result};

/// The version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// A dotted decimal version such as `1.9.72`.
///
/// Missing trailing components compare as zero, so `1.9` == `1.9.0`.
#[derive(Debug, Clone)]
pub struct Version {
    parts: Vec<u64>,
}

impl Version {
    pub fn parts(&self) -> &[u64] {
        &self.parts
    }
}

impl FromStr for Version {
    type Err = CupskitError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(CupskitError::InvalidVersion(s.to_string()));
        }
        let parts = s
            .split('.')
            .map(|p| {
                if p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(CupskitError::InvalidVersion(s.to_string()));
                }
                p.parse::<u64>()
                    .map_err(|_| CupskitError::InvalidVersion(s.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { parts })
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.parts.len().max(other.parts.len());
        (0..len)
            .map(|i| {
                let a = self.parts.get(i).copied().unwrap_or(0);
                let b = other.parts.get(i).copied().unwrap_or(0);
                a.cmp(&b)
            })
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{part}")?;
        }
        Ok(())
    }
}

/// Fail unless this crate is at least version `required`.
pub fn require(required: &str) -> Result<()> {
    require_against(VERSION, required)
}

/// Fail unless `have` is at least `required`.
pub fn require_against(have: &str, required: &str) -> Result<()> {
    let have_v: Version = have.parse()?;
    let required_v: Version = required.parse()?;
    if have_v < required_v {
        return Err(CupskitError::VersionTooOld {
            have: have.to_string(),
            required: required.to_string(),
        });
    }
    debug!(have, required, "version requirement satisfied");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dotted_versions() {
        let v: Version = "1.9.72".parse().unwrap();
        assert_eq!(v.parts(), &[1, 9, 72]);
        assert_eq!(v.to_string(), "1.9.72");
    }

    #[test]
    fn rejects_malformed_versions() {
        for bad in ["", "1..2", "1.x", "v1", "1.2.", "-1"] {
            assert!(bad.parse::<Version>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn missing_components_are_zero() {
        let a: Version = "1.9".parse().unwrap();
        let b: Version = "1.9.0".parse().unwrap();
        assert_eq!(a, b);
        assert!(a < "1.9.1".parse::<Version>().unwrap());
    }

    #[test]
    fn newer_major_satisfies_older_minor() {
        // 2.0 is newer than 1.9 even though 0 < 9.
        assert!(require_against("2.0", "1.9").is_ok());
    }

    #[test]
    fn too_old_reports_own_version() {
        let err = require_against("1.9.60", "1.9.72").unwrap_err();
        assert!(matches!(err, CupskitError::VersionTooOld { .. }));
        assert_eq!(err.to_string(), "I am version 1.9.60");
    }

    #[test]
    fn equal_version_satisfies() {
        assert!(require_against("1.9.72", "1.9.72").is_ok());
        assert!(require(VERSION).is_ok());
    }

    #[test]
    fn invalid_requirement_is_an_error() {
        assert!(matches!(
            require("one.two"),
            Err(CupskitError::InvalidVersion(_))
        ));
    }
}
