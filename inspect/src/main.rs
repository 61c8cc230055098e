//! `numfmt-inspect` entrypoint.
//!
//! Prints the requested report to stdout. Errors go to stderr and exit with
//! status 1.

use std::io::Write;

use clap::Parser;
use numfmt_inspect::cli::Cli;
use numfmt_inspect::error::Result;
use numfmt_inspect::output::{format_human, format_json};
use numfmt_inspect::report::inspect;

fn main() {
    let cli = Cli::parse();
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stdout);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, stdout: &mut dyn Write) -> Result<()> {
    let report = inspect(cli)?;
    let rendered = if cli.json {
        format_json(&report)
    } else {
        format_human(&report)
    };
    write_line(stdout, rendered.trim_end());
    Ok(())
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_line(stderr, format_args!("error: {err}"));
            1
        }
    }
}

fn write_line(stream: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stream, "{message}").is_err() {
        // Nothing useful can be done when the terminal is gone.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use numfmt::NumberFormatError;
    use numfmt_inspect::error::InspectError;

    #[test]
    fn exit_code_is_zero_on_success() {
        let mut stderr = Vec::new();
        assert_eq!(exit_code_for_run_result(Ok(()), &mut stderr), 0);
        assert!(stderr.is_empty());
    }

    #[test]
    fn errors_are_printed_and_exit_with_one() {
        let error = InspectError::Format(NumberFormatError::UnknownLocale {
            locale: String::from("zz"),
        });

        let mut stderr = Vec::new();
        assert_eq!(exit_code_for_run_result(Err(error), &mut stderr), 1);

        let text = String::from_utf8(stderr).expect("stderr was not UTF-8");
        assert!(text.contains("locale `zz` is not supported"));
    }

    #[test]
    fn run_writes_json_reports() {
        let cli = Cli::parse_from(["numfmt-inspect", "--json", "--locale", "en", "grouping"]);
        let mut stdout = Vec::new();

        run(&cli, &mut stdout).expect("grouping succeeds");

        let text = String::from_utf8(stdout).expect("stdout was not UTF-8");
        let value: serde_json::Value = serde_json::from_str(&text).expect("valid JSON");
        assert_eq!(value["minimum_grouping_digits"], 1);
    }

    #[test]
    fn run_reports_unknown_locales() {
        let cli = Cli::parse_from(["numfmt-inspect", "--locale", "zz", "formats"]);
        let mut stdout = Vec::new();

        assert!(run(&cli, &mut stdout).is_err());
        assert!(stdout.is_empty());
    }
}
