// Copyright 2026 Vault Mount Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::sync::OnceLock;

use regex_lite::Regex;

use crate::core::error::MountError;

static VOLUME_NAME_REGEX: OnceLock<Regex> = OnceLock::new();

/// Volume names end up inside `-ovolname=`/`-ofsname=` option strings, so
/// separators and option metacharacters are refused outright.
pub fn validate_volume_name(name: &str) -> Result<(), MountError> {
    let re = VOLUME_NAME_REGEX.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 ._-]*$").expect("Invalid Regex pattern")
    });
    if re.is_match(name) {
        Ok(())
    } else {
        Err(MountError::Configuration(format!(
            "invalid volume name '{name}'; must match /^[A-Za-z0-9][A-Za-z0-9 ._-]*$/"
        )))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("vault")]
    #[case("My Vault")]
    #[case("tresor-2.backup_old")]
    fn accepts_plain_names(#[case] name: &str) {
        assert!(validate_volume_name(name).is_ok());
    }

    #[rstest]
    #[case("")]
    #[case(" leading-space")]
    #[case("comma,splits=options")]
    #[case("name=value")]
    #[case("-dash-first")]
    #[case("tab\tname")]
    fn rejects_option_breaking_names(#[case] name: &str) {
        assert!(matches!(
            validate_volume_name(name),
            Err(MountError::Configuration(_))
        ));
    }
}
