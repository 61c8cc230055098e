//! Format records and the pattern shapes they hold.
//!
//! A [`FormatSet`] is the per-(locale, number system) record: one
//! [`PatternValue`] for every populated [`FormatStyle`] plus the optional
//! currency spacing metadata. Compact styles carry a [`CompactPatterns`]
//! sequence keyed by [`MagnitudeThreshold`], each step holding a
//! [`PluralPatternMap`].

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Closed vocabulary of number-format styles.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatStyle {
    /// Plain decimal pattern, e.g. `#,##0.###`.
    Standard,
    /// Currency pattern.
    Currency,
    /// Currency pattern with accounting negatives.
    Accounting,
    /// Scientific notation pattern.
    Scientific,
    /// Percent pattern.
    Percent,
    /// Compact decimal with spelled-out magnitudes ("1 thousand").
    DecimalLong,
    /// Compact decimal with abbreviated magnitudes ("1K").
    DecimalShort,
    /// Compact currency ("$1K").
    CurrencyShort,
    /// Currency with a spelled-out unit name ("{0} {1}").
    CurrencyLong,
}

impl FormatStyle {
    /// Every style in declaration order.
    pub const ALL: [Self; 9] = [
        Self::Standard,
        Self::Currency,
        Self::Accounting,
        Self::Scientific,
        Self::Percent,
        Self::DecimalLong,
        Self::DecimalShort,
        Self::CurrencyShort,
        Self::CurrencyLong,
    ];

    /// Returns the snake-case name used in locale documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Currency => "currency",
            Self::Accounting => "accounting",
            Self::Scientific => "scientific",
            Self::Percent => "percent",
            Self::DecimalLong => "decimal_long",
            Self::DecimalShort => "decimal_short",
            Self::CurrencyShort => "currency_short",
            Self::CurrencyLong => "currency_long",
        }
    }

    /// Shape every locale document must use for this style.
    #[must_use]
    pub const fn shape(self) -> PatternShape {
        match self {
            Self::DecimalLong | Self::DecimalShort | Self::CurrencyShort => PatternShape::Compact,
            Self::Standard
            | Self::Currency
            | Self::Accounting
            | Self::Scientific
            | Self::Percent
            | Self::CurrencyLong => PatternShape::Single,
        }
    }
}

impl fmt::Display for FormatStyle {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Structural form of a [`PatternValue`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PatternShape {
    /// A single pattern string.
    Single,
    /// A magnitude-keyed sequence of plural pattern maps.
    Compact,
}

impl fmt::Display for PatternShape {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => formatter.write_str("a single pattern"),
            Self::Compact => formatter.write_str("a compact pattern sequence"),
        }
    }
}

/// CLDR plural categories.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PluralCategory {
    /// `zero`
    Zero,
    /// `one`
    One,
    /// `two`
    Two,
    /// `few`
    Few,
    /// `many`
    Many,
    /// `other`, present in every map.
    Other,
}

impl PluralCategory {
    /// Returns the lowercase category name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::One => "one",
            Self::Two => "two",
            Self::Few => "few",
            Self::Many => "many",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for PluralCategory {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Patterns for one compact magnitude, keyed by plural category.
///
/// The `other` pattern is always present. Lookups for any other category
/// return exactly what the locale defines; falling back to [`Self::other`]
/// is left to the formatter that picked the category.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PluralPatternMap {
    other: String,
    variants: BTreeMap<PluralCategory, String>,
}

impl PluralPatternMap {
    /// Build a map from raw entries, rejecting maps without `other`.
    pub(crate) fn from_entries(
        mut entries: BTreeMap<PluralCategory, String>,
    ) -> Option<Self> {
        let other = entries.remove(&PluralCategory::Other)?;
        Some(Self {
            other,
            variants: entries,
        })
    }

    /// Returns the pattern defined for `category`, if any.
    #[must_use]
    pub fn get(&self, category: PluralCategory) -> Option<&str> {
        match category {
            PluralCategory::Other => Some(self.other.as_str()),
            _ => self.variants.get(&category).map(String::as_str),
        }
    }

    /// Returns the mandatory `other` pattern.
    #[must_use]
    pub fn other(&self) -> &str {
        &self.other
    }

    /// Returns the categories defined by this map, `other` included.
    pub fn categories(&self) -> impl Iterator<Item = PluralCategory> + '_ {
        self.iter().map(|(category, _)| category)
    }

    /// Iterate over `(category, pattern)` pairs in category order.
    pub fn iter(&self) -> impl Iterator<Item = (PluralCategory, &str)> + '_ {
        self.variants
            .iter()
            .map(|(category, pattern)| (*category, pattern.as_str()))
            .chain(std::iter::once((PluralCategory::Other, self.other.as_str())))
    }
}

impl Serialize for PluralPatternMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.variants.len() + 1))?;
        for (category, pattern) in self.iter() {
            map.serialize_entry(category.as_str(), pattern)?;
        }
        map.end()
    }
}

/// Raised when a compact threshold is not a decimal power of ten.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("`{value}` is not a decimal power of ten")]
pub struct InvalidThreshold {
    value: String,
}

/// Lower bound of a compact pattern step, always a power of ten.
///
/// Thresholds are written in locale documents as decimal strings such as
/// `"1000"` and are displayed the same way.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct MagnitudeThreshold {
    exponent: u8,
}

impl MagnitudeThreshold {
    /// Largest exponent whose power of ten fits in a `u128`.
    pub const MAX_EXPONENT: u8 = 38;

    /// Returns the threshold `10^exponent`, if it fits in a `u128`.
    #[must_use]
    pub const fn from_exponent(exponent: u8) -> Option<Self> {
        if exponent > Self::MAX_EXPONENT {
            None
        } else {
            Some(Self { exponent })
        }
    }

    /// Number of trailing zeros.
    #[must_use]
    pub const fn exponent(self) -> u8 {
        self.exponent
    }

    /// The threshold as an integer.
    #[must_use]
    pub const fn value(self) -> u128 {
        10_u128.pow(self.exponent as u32)
    }
}

impl FromStr for MagnitudeThreshold {
    type Err = InvalidThreshold;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidThreshold {
            value: input.to_owned(),
        };
        let zeros = input.strip_prefix('1').ok_or_else(invalid)?;
        if !zeros.bytes().all(|byte| byte == b'0') {
            return Err(invalid());
        }
        u8::try_from(zeros.len())
            .ok()
            .and_then(Self::from_exponent)
            .ok_or_else(invalid)
    }
}

impl fmt::Display for MagnitudeThreshold {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("1")?;
        for _ in 0..self.exponent {
            formatter.write_str("0")?;
        }
        Ok(())
    }
}

impl Serialize for MagnitudeThreshold {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One step of a compact pattern sequence.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CompactEntry {
    threshold: MagnitudeThreshold,
    patterns: PluralPatternMap,
}

impl CompactEntry {
    pub(crate) const fn new(threshold: MagnitudeThreshold, patterns: PluralPatternMap) -> Self {
        Self {
            threshold,
            patterns,
        }
    }

    /// Smallest magnitude this step applies to.
    #[must_use]
    pub const fn threshold(&self) -> MagnitudeThreshold {
        self.threshold
    }

    /// Plural patterns for this step.
    #[must_use]
    pub const fn patterns(&self) -> &PluralPatternMap {
        &self.patterns
    }
}

/// Magnitude-ordered compact patterns; thresholds strictly increase.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CompactPatterns {
    entries: Vec<CompactEntry>,
}

impl CompactPatterns {
    /// Build a sequence, returning the first out-of-order threshold on failure.
    pub(crate) fn new(entries: Vec<CompactEntry>) -> Result<Self, MagnitudeThreshold> {
        let out_of_order = entries
            .windows(2)
            .find_map(|pair| match pair {
                [previous, next] if next.threshold <= previous.threshold => Some(next.threshold),
                _ => None,
            });

        match out_of_order {
            Some(threshold) => Err(threshold),
            None => Ok(Self { entries }),
        }
    }

    /// Returns the plural patterns for the largest threshold not above
    /// `magnitude`, or `None` when `magnitude` is below the first step.
    ///
    /// ```
    /// use numfmt_common::{FormatStyle, NumberFormats, PluralCategory, SystemRole};
    ///
    /// let formats = NumberFormats::embedded()
    ///     .formats_for("en", SystemRole::Default)
    ///     .expect("en is bundled");
    /// let short = formats
    ///     .compact(FormatStyle::DecimalShort)
    ///     .expect("en defines short decimals");
    ///
    /// assert_eq!(short.patterns_for(999), None);
    /// let step = short.patterns_for(45_000).expect("within range");
    /// assert_eq!(step.get(PluralCategory::Other), Some("00K"));
    /// ```
    #[must_use]
    pub fn patterns_for(&self, magnitude: u128) -> Option<&PluralPatternMap> {
        self.entries
            .iter()
            .take_while(|entry| entry.threshold.value() <= magnitude)
            .last()
            .map(CompactEntry::patterns)
    }

    /// Returns the step whose threshold equals `threshold`.
    #[must_use]
    pub fn entry(&self, threshold: MagnitudeThreshold) -> Option<&CompactEntry> {
        self.entries
            .binary_search_by(|entry| entry.threshold.cmp(&threshold))
            .ok()
            .and_then(|index| self.entries.get(index))
    }

    /// Iterate over the steps in increasing threshold order.
    pub fn iter(&self) -> std::slice::Iter<'_, CompactEntry> {
        self.entries.iter()
    }

    /// Number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the sequence has no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a CompactPatterns {
    type Item = &'a CompactEntry;
    type IntoIter = std::slice::Iter<'a, CompactEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Pattern data stored for a single style.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PatternValue {
    /// A single pattern string.
    Single(String),
    /// A magnitude-keyed sequence.
    Compact(CompactPatterns),
}

impl PatternValue {
    /// Structural form of this value.
    #[must_use]
    pub const fn shape(&self) -> PatternShape {
        match self {
            Self::Single(_) => PatternShape::Single,
            Self::Compact(_) => PatternShape::Compact,
        }
    }

    /// Returns the pattern string for single-pattern values.
    #[must_use]
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::Single(pattern) => Some(pattern),
            Self::Compact(_) => None,
        }
    }

    /// Returns the sequence for compact values.
    #[must_use]
    pub const fn as_compact(&self) -> Option<&CompactPatterns> {
        match self {
            Self::Single(_) => None,
            Self::Compact(patterns) => Some(patterns),
        }
    }
}

/// One side of the currency spacing rules.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SpacingRule {
    /// Character class the currency symbol edge must match.
    pub currency_match: String,
    /// Character class the adjacent number edge must match.
    pub surrounding_match: String,
    /// Text inserted between symbol and number when both match.
    pub insert_between: String,
}

/// Spacing inserted between a currency symbol and the number.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CurrencySpacing {
    /// Rule applied when the symbol precedes the number.
    pub before_currency: SpacingRule,
    /// Rule applied when the symbol follows the number.
    pub after_currency: SpacingRule,
}

/// Resolved number formats for one locale and number system.
///
/// Only populated styles are present. The record is built once when the
/// format table is compiled and never changes afterwards.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct FormatSet {
    #[serde(flatten)]
    styles: BTreeMap<FormatStyle, PatternValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    currency_spacing: Option<CurrencySpacing>,
}

impl FormatSet {
    pub(crate) const fn new(
        styles: BTreeMap<FormatStyle, PatternValue>,
        currency_spacing: Option<CurrencySpacing>,
    ) -> Self {
        Self {
            styles,
            currency_spacing,
        }
    }

    /// Returns the value for `style`, if populated.
    #[must_use]
    pub fn get(&self, style: FormatStyle) -> Option<&PatternValue> {
        self.styles.get(&style)
    }

    /// Returns the pattern string for a single-pattern `style`.
    #[must_use]
    pub fn pattern(&self, style: FormatStyle) -> Option<&str> {
        self.get(style).and_then(PatternValue::as_single)
    }

    /// Returns the compact sequence for a compact `style`.
    #[must_use]
    pub fn compact(&self, style: FormatStyle) -> Option<&CompactPatterns> {
        self.get(style).and_then(PatternValue::as_compact)
    }

    /// Whether `style` is populated.
    #[must_use]
    pub fn contains(&self, style: FormatStyle) -> bool {
        self.styles.contains_key(&style)
    }

    /// Iterate over populated styles and their values.
    pub fn iter(&self) -> impl Iterator<Item = (FormatStyle, &PatternValue)> + '_ {
        self.styles.iter().map(|(style, value)| (*style, value))
    }

    /// Currency spacing metadata, when the locale defines it.
    #[must_use]
    pub const fn currency_spacing(&self) -> Option<&CurrencySpacing> {
        self.currency_spacing.as_ref()
    }

    /// Number of populated styles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Whether no style is populated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}
