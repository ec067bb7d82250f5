//! Package version model and precedence ordering.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use regex::Regex;
use thiserror::Error;

/// A package version: `major.minor[.patch]` with an optional prerelease
/// tag.
///
/// A leading `v`/`V` and trailing `+build` metadata are accepted on input
/// and discarded; neither participates in ordering. Ordering follows
/// standard version precedence: numeric fields compare numerically, a
/// release orders above any prerelease of the same numbers, and
/// prerelease tags compare dot-segment-wise with numeric segments before
/// alphanumeric ones.
///
/// # Examples
///
/// ```
/// use bale_feed::Version;
///
/// let stable: Version = "1.2.0".parse().unwrap();
/// let candidate: Version = "1.2.0-rc.1".parse().unwrap();
/// assert!(candidate < stable);
/// assert!(candidate.is_prerelease());
/// assert_eq!(stable.to_string(), "1.2.0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    /// Major component.
    pub major: u64,
    /// Minor component.
    pub minor: u64,
    /// Patch component; `0` when the text omitted it.
    pub patch: u64,
    /// Prerelease tag without the leading dash, when present.
    pub pre: Option<String>,
}

/// Error for text that is not a valid package version.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a valid package version")]
pub struct VersionParseError(pub String);

impl Version {
    /// Creates a release version.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            pre: None,
        }
    }

    /// Returns `true` when the version carries a prerelease tag.
    pub fn is_prerelease(&self) -> bool {
        self.pre.is_some()
    }
}

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let pattern = Regex::new(
            r"(?x)
            ^[vV]?
            (\d{1,10})\.(\d{1,10})(?:\.(\d{1,10}))?   # major.minor[.patch]
            (?:-([0-9A-Za-z][0-9A-Za-z.-]*))?         # prerelease tag
            (?:\+[0-9A-Za-z.-]+)?                     # build metadata, ignored
            $",
        )
        .expect("version pattern");

        let captures = pattern
            .captures(text.trim())
            .ok_or_else(|| VersionParseError(text.to_string()))?;

        let component = |index: usize| -> Result<u64, VersionParseError> {
            captures
                .get(index)
                .map_or(Ok(0), |m| {
                    m.as_str()
                        .parse()
                        .map_err(|_| VersionParseError(text.to_string()))
                })
        };

        Ok(Self {
            major: component(1)?,
            minor: component(2)?,
            patch: component(3)?,
            pre: captures.get(4).map(|m| m.as_str().to_string()),
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.pre {
            write!(f, "-{pre}")?;
        }
        Ok(())
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| match (&self.pre, &other.pre) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => compare_prerelease(a, b),
            })
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn compare_prerelease(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');

    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            // A longer tag wins once all shared segments are equal.
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(a), Some(b)) => {
                let ordering = match (a.parse::<u64>(), b.parse::<u64>()) {
                    (Ok(a), Ok(b)) => a.cmp(&b),
                    (Ok(_), Err(_)) => Ordering::Less,
                    (Err(_), Ok(_)) => Ordering::Greater,
                    (Err(_), Err(_)) => a.cmp(b),
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }
}
