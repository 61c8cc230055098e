//! Number-system roles, names, and selector resolution.
//!
//! Callers pick a number system either by role (`default`, `native`, …),
//! which each locale maps to a concrete system, or by an explicit system
//! name such as `thai`. [`resolve_system_name`] turns either form into the
//! canonical [`SystemName`] used to key the format table.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{NumberFormatError, Result};
use crate::locale::LocaleId;
use crate::table::LocaleFormats;

/// Locale-relative role a number system plays.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemRole {
    /// The system used when nothing else is requested.
    Default,
    /// The locale's native digits.
    Native,
    /// Traditional numerals, where the locale has them.
    Traditional,
    /// Financial numerals, where the locale has them.
    Finance,
}

impl SystemRole {
    /// Every role in declaration order.
    pub const ALL: [Self; 4] = [Self::Default, Self::Native, Self::Traditional, Self::Finance];

    /// Returns the role keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Native => "native",
            Self::Traditional => "traditional",
            Self::Finance => "finance",
        }
    }

    /// Match a role keyword, ignoring surrounding whitespace and case.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let keyword = keyword.trim();
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(keyword))
    }
}

impl fmt::Display for SystemRole {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Canonical number-system name, e.g. `latn` or `arab`.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct SystemName(String);

impl SystemName {
    /// Wrap a system name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SystemName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for SystemName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SystemName {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl fmt::Display for SystemName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// How a caller identifies the number system to use.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum NumberSystemSelector {
    /// Resolve through the locale's role map.
    Role(SystemRole),
    /// Use the named system directly.
    Name(SystemName),
}

impl Default for NumberSystemSelector {
    fn default() -> Self {
        Self::Role(SystemRole::Default)
    }
}

impl From<SystemRole> for NumberSystemSelector {
    fn from(role: SystemRole) -> Self {
        Self::Role(role)
    }
}

impl From<SystemName> for NumberSystemSelector {
    fn from(name: SystemName) -> Self {
        Self::Name(name)
    }
}

impl From<&str> for NumberSystemSelector {
    /// Role keywords become [`Self::Role`]; anything else is a system name.
    fn from(input: &str) -> Self {
        SystemRole::from_keyword(input).map_or_else(
            || Self::Name(SystemName::from(input.trim())),
            Self::Role,
        )
    }
}

impl From<&NumberSystemSelector> for NumberSystemSelector {
    fn from(selector: &NumberSystemSelector) -> Self {
        selector.clone()
    }
}

impl FromStr for NumberSystemSelector {
    type Err = std::convert::Infallible;

    fn from_str(input: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from(input))
    }
}

impl fmt::Display for NumberSystemSelector {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Role(role) => role.fmt(formatter),
            Self::Name(name) => name.fmt(formatter),
        }
    }
}

/// Resolve `selector` to a system of `locale`.
///
/// Explicit names are checked against the systems the locale has formats
/// for. Roles go through the locale's role map and fail only when
/// undeclared; the loader guarantees every declared role has formats.
pub(crate) fn resolve_system_name<'a>(
    locale: &LocaleId,
    entry: &'a LocaleFormats,
    selector: &NumberSystemSelector,
) -> Result<&'a SystemName> {
    let resolved = match selector {
        NumberSystemSelector::Name(name) => entry.system_key(name.as_str()),
        NumberSystemSelector::Role(role) => entry.role(*role),
    };

    resolved.ok_or_else(|| NumberFormatError::UnknownNumberSystem {
            locale: locale.to_string(),
            system: selector.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("default", NumberSystemSelector::Role(SystemRole::Default))]
    #[case(" Native ", NumberSystemSelector::Role(SystemRole::Native))]
    #[case("FINANCE", NumberSystemSelector::Role(SystemRole::Finance))]
    #[case("thai", NumberSystemSelector::Name(SystemName::from("thai")))]
    #[case(" arab ", NumberSystemSelector::Name(SystemName::from("arab")))]
    fn parses_selectors(#[case] input: &str, #[case] expected: NumberSystemSelector) {
        assert_eq!(NumberSystemSelector::from(input), expected);
    }

    #[test]
    fn selectors_default_to_the_default_role() {
        assert_eq!(
            NumberSystemSelector::default(),
            NumberSystemSelector::Role(SystemRole::Default)
        );
    }

    #[rstest]
    #[case(NumberSystemSelector::Role(SystemRole::Traditional), "traditional")]
    #[case(NumberSystemSelector::Name(SystemName::from("deva")), "deva")]
    fn selectors_display_their_keyword(
        #[case] selector: NumberSystemSelector,
        #[case] expected: &str,
    ) {
        assert_eq!(selector.to_string(), expected);
    }
}
