//! CLI argument definitions for the number format inspector.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};

/// Inspect locale number format data.
#[derive(Parser, Debug, Clone)]
#[command(name = "numfmt-inspect")]
#[command(version, about)]
#[command(after_help = concat!(
    "LOCALE SELECTION:\n",
    "  --locale wins; otherwise NUMFMT_LOCALE, then the configured locale,\n",
    "  then `en`.\n\n",
    "EXAMPLES:\n",
    "  List bundled locales:\n",
    "    $ numfmt-inspect locales\n\n",
    "  Show Thai native-digit patterns as JSON:\n",
    "    $ numfmt-inspect --locale th --system native --json formats\n",
))]
pub struct Cli {
    /// Path to a `numfmt.toml` configuration file.
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<Utf8PathBuf>,

    /// Locale to inspect.
    #[arg(short, long, value_name = "LOCALE", global = true)]
    pub locale: Option<String>,

    /// Number system role (`default`, `native`, `traditional`, `finance`)
    /// or system name.
    #[arg(short, long, value_name = "SYSTEM", global = true)]
    pub system: Option<String>,

    /// Output in JSON format for scripting.
    #[arg(long, global = true)]
    pub json: bool,

    /// What to inspect.
    #[command(subcommand)]
    pub command: Command,
}

/// Available inspections.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// List supported locales.
    Locales,
    /// List the number systems and roles of a locale.
    Systems,
    /// Show every pattern of a locale and number system.
    Formats,
    /// Classify the styles of a locale and number system.
    Styles,
    /// Show the minimum grouping digits of a locale.
    Grouping,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::parse_from(["numfmt-inspect", "locales"]);
        assert_eq!(cli.command, Command::Locales);
        assert!(cli.config.is_none());
        assert!(cli.locale.is_none());
        assert!(cli.system.is_none());
        assert!(!cli.json);
    }

    #[test]
    fn cli_parses_global_options_after_the_command() {
        let cli = Cli::parse_from([
            "numfmt-inspect",
            "formats",
            "--locale",
            "th",
            "-s",
            "native",
            "--json",
            "--config",
            "/etc/numfmt.toml",
        ]);

        assert_eq!(cli.command, Command::Formats);
        assert_eq!(cli.locale.as_deref(), Some("th"));
        assert_eq!(cli.system.as_deref(), Some("native"));
        assert!(cli.json);
        assert_eq!(cli.config, Some(Utf8PathBuf::from("/etc/numfmt.toml")));
    }

    #[rstest]
    #[case("locales", Command::Locales)]
    #[case("systems", Command::Systems)]
    #[case("formats", Command::Formats)]
    #[case("styles", Command::Styles)]
    #[case("grouping", Command::Grouping)]
    fn cli_parses_each_command(#[case] name: &str, #[case] expected: Command) {
        let cli = Cli::parse_from(["numfmt-inspect", name]);
        assert_eq!(cli.command, expected);
    }

    #[test]
    fn cli_requires_a_command() {
        assert!(Cli::try_parse_from(["numfmt-inspect"]).is_err());
    }
}
