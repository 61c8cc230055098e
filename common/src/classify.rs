//! Style classification over a resolved [`FormatSet`].
//!
//! The taxonomy is fixed set algebra over [`FormatStyle`]:
//!
//! - available = every populated style (spacing metadata is never a style);
//! - short = available ∩ ([`LONG_SHORT_STYLES`] − [`SHORT_STYLE_EXCEPTIONS`]);
//! - decimal = available − short − [`SHORT_STYLE_EXCEPTIONS`].

use std::collections::BTreeSet;

use crate::pattern::{FormatSet, FormatStyle};

/// Styles named as long or short forms.
pub const LONG_SHORT_STYLES: [FormatStyle; 4] = [
    FormatStyle::DecimalLong,
    FormatStyle::DecimalShort,
    FormatStyle::CurrencyShort,
    FormatStyle::CurrencyLong,
];

/// Long/short styles that are classified as neither short nor decimal.
///
/// `currency_long` holds a single pattern for every bundled locale, never a
/// magnitude-keyed sequence, so it is listed here explicitly rather than
/// inferred from the data.
pub const SHORT_STYLE_EXCEPTIONS: [FormatStyle; 1] = [FormatStyle::CurrencyLong];

/// Whether `style` belongs to the short taxonomy.
#[must_use]
pub fn is_short_style(style: FormatStyle) -> bool {
    LONG_SHORT_STYLES.contains(&style) && !SHORT_STYLE_EXCEPTIONS.contains(&style)
}

/// Populated styles of `format_set`.
#[must_use]
pub fn available_styles(format_set: &FormatSet) -> BTreeSet<FormatStyle> {
    format_set.iter().map(|(style, _)| style).collect()
}

/// Populated compact styles of `format_set`.
#[must_use]
pub fn short_styles(format_set: &FormatSet) -> BTreeSet<FormatStyle> {
    available_styles(format_set)
        .into_iter()
        .filter(|style| is_short_style(*style))
        .collect()
}

/// Populated single-pattern decimal styles of `format_set`.
#[must_use]
pub fn decimal_styles(format_set: &FormatSet) -> BTreeSet<FormatStyle> {
    available_styles(format_set)
        .into_iter()
        .filter(|style| !is_short_style(*style) && !SHORT_STYLE_EXCEPTIONS.contains(style))
        .collect()
}
