//! Rendering of inspection reports.
//!
//! Human output is a compact indented listing; JSON output is the pretty
//! printed serialisation of the report itself.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use numfmt::{FormatSet, FormatStyle, PatternValue};

use crate::report::{
    FormatsReport, GroupingReport, LocalesReport, Report, StylesReport, SystemsReport,
};

/// Render `report` for a terminal.
///
/// # Examples
///
/// ```
/// use numfmt_inspect::output::format_human;
/// use numfmt_inspect::report::{LocalesReport, Report};
///
/// let report = Report::Locales(LocalesReport { locales: Vec::new() });
/// assert!(format_human(&report).contains("No locales"));
/// ```
#[must_use]
pub fn format_human(report: &Report) -> String {
    let mut output = String::new();
    match report {
        Report::Locales(locales) => write_locales(&mut output, locales),
        Report::Systems(systems) => write_systems(&mut output, systems),
        Report::Formats(formats) => write_formats(&mut output, formats),
        Report::Styles(styles) => write_styles(&mut output, styles),
        Report::Grouping(grouping) => write_grouping(&mut output, grouping),
    }
    output
}

/// Render `report` as pretty-printed JSON.
#[must_use]
pub fn format_json(report: &Report) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_owned())
}

// `fmt::Write` for `String` never fails, so write results are discarded.

fn write_locales(output: &mut String, report: &LocalesReport) {
    if report.locales.is_empty() {
        output.push_str("No locales available.\n");
        return;
    }
    output.push_str("Supported locales:\n");
    for locale in &report.locales {
        let _ = writeln!(output, "  {locale}");
    }
}

fn write_systems(output: &mut String, report: &SystemsReport) {
    let _ = writeln!(output, "Locale: {}", report.locale);
    output.push_str("Roles:\n");
    for (role, system) in &report.roles {
        let _ = writeln!(output, "  {:<12} {system}", role.as_str());
    }
    output.push_str("Systems:\n");
    for system in &report.systems {
        let _ = writeln!(output, "  {system}");
    }
}

fn write_formats(output: &mut String, report: &FormatsReport) {
    let _ = writeln!(output, "Locale: {}", report.locale);
    let _ = writeln!(output, "System: {}", report.system);
    write_format_set(output, &report.formats);
}

fn write_format_set(output: &mut String, formats: &FormatSet) {
    for (style, value) in formats.iter() {
        match value {
            PatternValue::Single(pattern) => {
                let _ = writeln!(output, "  {:<15} {pattern}", style.as_str());
            }
            PatternValue::Compact(sequence) => {
                let _ = writeln!(output, "  {style}:");
                for entry in sequence {
                    let _ = write!(output, "    {:>16}", entry.threshold().to_string());
                    for (category, pattern) in entry.patterns().iter() {
                        let _ = write!(output, "  {category}={pattern}");
                    }
                    output.push('\n');
                }
            }
        }
    }

    if let Some(spacing) = formats.currency_spacing() {
        output.push_str("  currency_spacing:\n");
        for (position, rule) in [
            ("before", &spacing.before_currency),
            ("after", &spacing.after_currency),
        ] {
            let _ = writeln!(
                output,
                "    {position:<6}  currency={} surrounding={} insert={:?}",
                rule.currency_match, rule.surrounding_match, rule.insert_between,
            );
        }
    }
}

fn write_styles(output: &mut String, report: &StylesReport) {
    let _ = writeln!(output, "Locale: {}", report.locale);
    let _ = writeln!(output, "System: {}", report.system);
    write_style_line(output, "available", &report.available);
    write_style_line(output, "short", &report.short);
    write_style_line(output, "decimal", &report.decimal);
}

fn write_style_line(output: &mut String, label: &str, styles: &BTreeSet<FormatStyle>) {
    let names: Vec<&str> = styles.iter().map(|style| style.as_str()).collect();
    let _ = writeln!(output, "{label:<10} {}", names.join(", "));
}

fn write_grouping(output: &mut String, report: &GroupingReport) {
    let _ = writeln!(output, "Locale: {}", report.locale);
    let _ = writeln!(
        output,
        "Minimum grouping digits: {}",
        report.minimum_grouping_digits
    );
}
