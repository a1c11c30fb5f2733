// Copyright 2026 Vault Mount Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::{fmt, num::ParseIntError, str::FromStr};

/// Dotted provider version, compared component-wise.
///
/// When two versions share a common prefix the longer one is the newer one:
/// `3.8.2.1 > 3.8.2`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version(Vec<u32>);

impl Version {
    pub fn new(components: impl Into<Vec<u32>>) -> Self {
        Self(components.into())
    }

    pub fn components(&self) -> &[u32] {
        &self.0
    }
}

impl FromStr for Version {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split('.')
            .map(str::parse)
            .collect::<Result<Vec<u32>, _>>()
            .map(Self)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut components = self.0.iter();
        if let Some(first) = components.next() {
            write!(f, "{first}")?;
        }
        for c in components {
            write!(f, ".{c}")?;
        }
        Ok(())
    }
}

/// Version gate for capability probing. An absent version never satisfies
/// any minimum; otherwise equal or newer counts as supported.
pub fn is_supported(installed: Option<&Version>, minimum: &Version) -> bool {
    installed.is_some_and(|v| v >= minimum)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn v(s: &str) -> Version {
        s.parse().expect("test version must parse")
    }

    #[rstest]
    #[case("3.8.2", &[3, 8, 2])]
    #[case("0.0.0", &[0, 0, 0])]
    #[case("10", &[10])]
    #[case("3.8.2.1", &[3, 8, 2, 1])]
    fn parses_dotted_integers(#[case] raw: &str, #[case] expected: &[u32]) {
        assert_eq!(v(raw).components(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("3.8.x")]
    #[case("3..2")]
    #[case("3.8.2-beta")]
    #[case("-1.2")]
    fn rejects_non_numeric_components(#[case] raw: &str) {
        assert!(raw.parse::<Version>().is_err());
    }

    #[test]
    fn comparison_is_a_total_order() {
        let pairs = [
            ("3.8.1", "3.8.2"),
            ("3.8.2", "3.9.0"),
            ("3.8.2", "4.0.0"),
            ("3.8.2", "3.8.2.1"),
            ("2.9.9.9", "3.0.0"),
        ];
        for (lo, hi) in pairs {
            assert!(v(lo) < v(hi), "{lo} should be older than {hi}");
            assert!(v(hi) > v(lo), "{hi} should be newer than {lo}");
        }
        assert_eq!(v("3.8.2"), v("3.8.2"));
    }

    #[test]
    fn prefix_compares_shorter_as_older() {
        assert!(v("3.8.2") < v("3.8.2.1"));
        assert!(v("3.8.2") < v("3.8.2.0"));
    }

    #[rstest]
    #[case(None, "3.8.2", false)]
    #[case(Some("3.8.2"), "3.8.2", true)]
    #[case(Some("3.8.1"), "3.8.2", false)]
    #[case(Some("3.9.0"), "3.8.2", true)]
    #[case(Some("3.8.2.1"), "3.8.2", true)]
    #[case(Some("4.0"), "3.8.2", true)]
    fn support_gate(#[case] installed: Option<&str>, #[case] minimum: &str, #[case] expected: bool) {
        let installed = installed.map(v);
        assert_eq!(is_supported(installed.as_ref(), &v(minimum)), expected);
    }

    // A minimum with a zero-padded tail is stricter than its prefix: an
    // installed 3.8.2 does not satisfy a 3.8.2.0 minimum.
    #[test]
    fn minimum_longer_than_installed_is_unsupported() {
        assert!(!is_supported(Some(&v("3.8.2")), &v("3.8.2.0")));
    }

    #[test]
    fn displays_back_as_dotted_string() {
        assert_eq!(v("3.8.2").to_string(), "3.8.2");
        assert_eq!(Version::new([7u32]).to_string(), "7");
    }
}
