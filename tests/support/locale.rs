//! Locale parameters for behaviour steps.

use std::convert::Infallible;
use std::str::FromStr;

/// Locale candidate captured from a step, with surrounding quotes removed.
///
/// Interior whitespace is preserved so `"  "` reaches the resolver as a
/// blank candidate.
#[derive(Clone, Debug)]
pub struct StepLocale(String);

impl FromStr for StepLocale {
    type Err = Infallible;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let unquoted = ['"', '\'']
            .into_iter()
            .find_map(|quote| {
                trimmed
                    .strip_prefix(quote)
                    .and_then(|rest| rest.strip_suffix(quote))
            })
            .unwrap_or(trimmed);
        Ok(Self(unquoted.to_owned()))
    }
}

impl StepLocale {
    /// Consumes the step value.
    pub fn into_inner(self) -> String {
        self.0
    }
}
