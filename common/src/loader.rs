//! Locale data sources and document compilation.
//!
//! Every locale is described by one JSON document. The bundled set under
//! `locales/` is embedded at compile time so lookups never touch the
//! filesystem; [`DirectorySource`] reads the same schema from disk once,
//! while the table is being built. [`LocaleDocument::compile`] validates a
//! document and turns it into the typed records the table stores.

use std::collections::BTreeMap;
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;

use crate::error::DataError;
use crate::pattern::{
    CompactEntry, CompactPatterns, CurrencySpacing, FormatSet, FormatStyle, MagnitudeThreshold,
    PatternShape, PatternValue, PluralCategory, PluralPatternMap,
};
use crate::system::{SystemName, SystemRole};
use crate::table::LocaleFormats;

macro_rules! embedded_locales {
    ($($tag:literal),+ $(,)?) => {
        &[$(($tag, include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/locales/", $tag, ".json")))),+]
    };
}

/// Locale documents bundled with every build, sorted by tag.
const EMBEDDED: &[(&str, &str)] = embedded_locales!(
    "ar", "de", "en", "en-GB", "es", "fr", "he", "hi", "ja", "th",
);

/// Supplier of raw locale documents.
pub trait DataSource {
    /// Tags of every locale the source can supply.
    ///
    /// # Errors
    ///
    /// Returns a [`DataError`] when the source cannot be enumerated.
    fn locales(&self) -> Result<Vec<String>, DataError>;

    /// Load the document stored under `locale`.
    ///
    /// # Errors
    ///
    /// Returns a [`DataError`] when the document is missing or malformed.
    fn load(&self, locale: &str) -> Result<LocaleDocument, DataError>;
}

/// Source backed by the documents embedded at compile time.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmbeddedSource;

impl DataSource for EmbeddedSource {
    fn locales(&self) -> Result<Vec<String>, DataError> {
        Ok(EMBEDDED.iter().map(|(tag, _)| (*tag).to_owned()).collect())
    }

    fn load(&self, locale: &str) -> Result<LocaleDocument, DataError> {
        let (_, raw) = EMBEDDED
            .iter()
            .find(|(tag, _)| *tag == locale)
            .ok_or_else(|| DataError::Read {
                path: Utf8PathBuf::from(format!("locales/{locale}.json")),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })?;
        LocaleDocument::from_json(locale, raw)
    }
}

/// Source reading `<locale>.json` documents from a directory.
#[derive(Clone, Debug)]
pub struct DirectorySource {
    root: Utf8PathBuf,
}

impl DirectorySource {
    /// Read documents from `root`.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory the documents are read from.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn document_path(&self, locale: &str) -> Utf8PathBuf {
        self.root.join(format!("{locale}.json"))
    }
}

impl DataSource for DirectorySource {
    fn locales(&self) -> Result<Vec<String>, DataError> {
        let list_error = |reason: String| DataError::List {
            path: self.root.clone(),
            reason,
        };
        let pattern = glob::Pattern::escape(self.root.as_str()) + "/*.json";
        let entries = glob::glob(&pattern).map_err(|error| list_error(error.to_string()))?;

        let mut locales = Vec::new();
        for entry in entries {
            let path = entry.map_err(|error| list_error(error.to_string()))?;
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                locales.push(stem.to_owned());
            }
        }
        locales.sort_unstable();
        Ok(locales)
    }

    fn load(&self, locale: &str) -> Result<LocaleDocument, DataError> {
        let path = self.document_path(locale);
        let raw = fs::read_to_string(&path).map_err(|source| DataError::Read {
            path: path.clone(),
            source,
        })?;
        LocaleDocument::from_json(locale, &raw)
    }
}

/// Raw locale document as stored on disk.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocaleDocument {
    /// Locale tag the document describes.
    pub locale: String,
    /// Minimum digits before the first grouping separator is used.
    pub minimum_grouping_digits: u8,
    /// Role to system-name map.
    pub number_systems: BTreeMap<SystemRole, String>,
    /// Format records keyed by system name.
    pub formats: BTreeMap<String, RawFormatSet>,
}

/// Raw per-system format record.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawFormatSet {
    #[serde(default)]
    standard: Option<RawPattern>,
    #[serde(default)]
    currency: Option<RawPattern>,
    #[serde(default)]
    accounting: Option<RawPattern>,
    #[serde(default)]
    scientific: Option<RawPattern>,
    #[serde(default)]
    percent: Option<RawPattern>,
    #[serde(default)]
    decimal_long: Option<RawPattern>,
    #[serde(default)]
    decimal_short: Option<RawPattern>,
    #[serde(default)]
    currency_short: Option<RawPattern>,
    #[serde(default)]
    currency_long: Option<RawPattern>,
    #[serde(default)]
    currency_spacing: Option<CurrencySpacing>,
}

impl RawFormatSet {
    fn into_styles(self) -> (Vec<(FormatStyle, RawPattern)>, Option<CurrencySpacing>) {
        let styles = [
            (FormatStyle::Standard, self.standard),
            (FormatStyle::Currency, self.currency),
            (FormatStyle::Accounting, self.accounting),
            (FormatStyle::Scientific, self.scientific),
            (FormatStyle::Percent, self.percent),
            (FormatStyle::DecimalLong, self.decimal_long),
            (FormatStyle::DecimalShort, self.decimal_short),
            (FormatStyle::CurrencyShort, self.currency_short),
            (FormatStyle::CurrencyLong, self.currency_long),
        ]
        .into_iter()
        .filter_map(|(style, raw)| raw.map(|pattern| (style, pattern)))
        .collect();

        (styles, self.currency_spacing)
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
enum RawPattern {
    Single(String),
    Compact(Vec<RawCompactEntry>),
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCompactEntry {
    threshold: String,
    patterns: BTreeMap<PluralCategory, String>,
}

/// Context used to label compile errors.
struct StyleContext<'a> {
    locale: &'a str,
    system: &'a str,
    style: FormatStyle,
}

impl LocaleDocument {
    /// Parse a JSON document loaded under `locale`.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Parse`] when the JSON does not match the schema.
    pub fn from_json(locale: &str, raw: &str) -> Result<Self, DataError> {
        serde_json::from_str(raw).map_err(|source| DataError::Parse {
            locale: locale.to_owned(),
            source,
        })
    }

    /// Validate the document and build its table entry.
    ///
    /// `canonical` is the canonical form of the tag the document was loaded
    /// under; the document's own tag must canonicalise to the same value.
    pub(crate) fn compile(self, canonical: &str) -> Result<LocaleFormats, DataError> {
        let declared = crate::locale::canonicalise(&self.locale).ok_or_else(|| {
            DataError::InvalidLocaleTag {
                tag: self.locale.clone(),
            }
        })?;
        if declared != canonical {
            return Err(DataError::LocaleMismatch {
                expected: canonical.to_owned(),
                found: self.locale,
            });
        }
        if self.formats.is_empty() {
            return Err(DataError::NoNumberSystems {
                locale: canonical.to_owned(),
            });
        }

        let mut systems = BTreeMap::new();
        for (system, raw) in self.formats {
            let format_set = compile_format_set(canonical, &system, raw)?;
            systems.insert(SystemName::new(system), format_set);
        }

        let mut roles = BTreeMap::new();
        for (role, system) in self.number_systems {
            if !systems.contains_key(system.as_str()) {
                return Err(DataError::UnformattedRole {
                    locale: canonical.to_owned(),
                    role,
                    system,
                });
            }
            roles.insert(role, SystemName::new(system));
        }

        Ok(LocaleFormats::new(
            systems,
            roles,
            self.minimum_grouping_digits,
        ))
    }
}

fn compile_format_set(
    locale: &str,
    system: &str,
    raw: RawFormatSet,
) -> Result<FormatSet, DataError> {
    let (raw_styles, currency_spacing) = raw.into_styles();
    if raw_styles.is_empty() {
        return Err(DataError::EmptyFormatSet {
            locale: locale.to_owned(),
            system: system.to_owned(),
        });
    }

    let mut styles = BTreeMap::new();
    for (style, pattern) in raw_styles {
        let context = StyleContext {
            locale,
            system,
            style,
        };
        styles.insert(style, compile_pattern(&context, pattern)?);
    }

    Ok(FormatSet::new(styles, currency_spacing))
}

fn compile_pattern(context: &StyleContext<'_>, raw: RawPattern) -> Result<PatternValue, DataError> {
    match (context.style.shape(), raw) {
        (PatternShape::Single, RawPattern::Single(pattern)) => Ok(PatternValue::Single(pattern)),
        (PatternShape::Compact, RawPattern::Compact(entries)) => {
            compile_compact(context, entries).map(PatternValue::Compact)
        }
        (expected, _) => Err(DataError::ShapeMismatch {
            locale: context.locale.to_owned(),
            system: context.system.to_owned(),
            style: context.style,
            expected,
        }),
    }
}

fn compile_compact(
    context: &StyleContext<'_>,
    raw: Vec<RawCompactEntry>,
) -> Result<CompactPatterns, DataError> {
    let mut entries = Vec::with_capacity(raw.len());
    for entry in raw {
        let threshold = entry
            .threshold
            .parse::<MagnitudeThreshold>()
            .map_err(|source| DataError::InvalidThreshold {
                locale: context.locale.to_owned(),
                system: context.system.to_owned(),
                style: context.style,
                source,
            })?;
        let patterns = PluralPatternMap::from_entries(entry.patterns).ok_or_else(|| {
            DataError::MissingOtherPattern {
                locale: context.locale.to_owned(),
                system: context.system.to_owned(),
                style: context.style,
                threshold: entry.threshold.clone(),
            }
        })?;
        entries.push(CompactEntry::new(threshold, patterns));
    }

    CompactPatterns::new(entries).map_err(|threshold| DataError::ThresholdOrder {
        locale: context.locale.to_owned(),
        system: context.system.to_owned(),
        style: context.style,
        threshold,
    })
}
