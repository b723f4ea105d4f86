use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tally_core::{Counter, Order, Ranking};
use tally_engine::{
    digest_bytes, file_digest, load_counts, read_labels, read_labels_from_path, render_report,
    write_report, ReportFormat,
};
use tally_logging::{tally_debug, tally_info, tally_warn};

use crate::cli::{Command, CountArgs, LookupArgs, VerifyArgs};
use crate::config::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Mismatch,
}

pub fn run(command: &Command, settings: &Settings, out: &mut impl Write) -> Result<Outcome> {
    match command {
        Command::Count(args) => count(args, settings, out),
        Command::Lookup(args) => lookup(args, out),
        Command::Verify(args) => verify(args, out),
    }
}

fn load_counter(input: &Path) -> Result<Counter> {
    let labels = if input == Path::new("-") {
        read_labels(io::stdin().lock()).context("reading labels from stdin")?
    } else {
        read_labels_from_path(input)
            .with_context(|| format!("reading labels from {}", input.display()))?
    };
    let counter = Counter::from_labels(labels);
    tally_info!(
        "Counted {} labels, {} distinct",
        counter.total(),
        counter.len()
    );
    Ok(counter)
}

fn count(args: &CountArgs, settings: &Settings, out: &mut impl Write) -> Result<Outcome> {
    let counter = load_counter(&args.input)?;
    let content = match settings.order {
        Order::Descending => render_report(counter.most_common_ranking(), settings.format)?,
        Order::Ascending => {
            let ranking: Ranking = counter.frequencies(Order::Ascending);
            render_report(&ranking, settings.format)?
        }
    };

    match &args.output {
        Some(dir) => {
            let name = args
                .name
                .as_deref()
                .unwrap_or_else(|| settings.format.default_filename());
            let path = write_report(dir, name, &content)
                .with_context(|| format!("writing report into {}", dir.display()))?;
            writeln!(out, "{}", path.display())?;
        }
        None => out.write_all(content.as_bytes())?,
    }
    Ok(Outcome::Success)
}

fn lookup(args: &LookupArgs, out: &mut impl Write) -> Result<Outcome> {
    let counter = load_counter(&args.input)?;
    for label in &args.labels {
        writeln!(
            out,
            "{} {} {}",
            label,
            counter.count(label),
            counter.contains(label)
        )?;
    }
    Ok(Outcome::Success)
}

/// Checks that the counted input agrees with an expected counts file: same
/// number of labels, same count for each, and a byte-identical plain report.
fn verify(args: &VerifyArgs, out: &mut impl Write) -> Result<Outcome> {
    let counter = load_counter(&args.input)?;
    let expected = Counter::from_counts(
        load_counts(&args.expected)
            .with_context(|| format!("loading counts from {}", args.expected.display()))?,
    );

    let len_ok = counter.len() == expected.len();
    let mismatched: Vec<&str> = expected
        .iter()
        .filter(|(label, count)| !counter.contains(label) || counter.count(label) != *count)
        .map(|(label, _)| label)
        .collect();
    let counts_ok = len_ok && mismatched.is_empty();
    for label in mismatched.iter().take(10) {
        tally_warn!(
            "Count mismatch for {:?}: got {}, expected {}",
            label,
            counter.count(label),
            expected.count(label)
        );
    }

    let rendered = render_report(counter.most_common_ranking(), ReportFormat::Plain)?;
    let actual_digest = digest_bytes(rendered.as_bytes());
    let expected_digest = file_digest(&args.expected)
        .with_context(|| format!("hashing {}", args.expected.display()))?;
    tally_debug!("Digests: actual {actual_digest}, expected {expected_digest}");
    let ranking_ok = actual_digest == expected_digest;

    report_check(out, "len", len_ok)?;
    report_check(out, "count", counts_ok)?;
    report_check(out, "most_common", ranking_ok)?;

    if len_ok && counts_ok && ranking_ok {
        Ok(Outcome::Success)
    } else {
        Ok(Outcome::Mismatch)
    }
}

fn report_check(out: &mut impl Write, name: &str, ok: bool) -> io::Result<()> {
    let status = if ok { "PASS" } else { "FAIL" };
    writeln!(out, "{status}: {name}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogDestination;
    use log::LevelFilter;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn settings(order: Order, format: ReportFormat) -> Settings {
        Settings {
            order,
            format,
            log_destination: LogDestination::Terminal,
            log_level: LevelFilter::Info,
        }
    }

    fn write_labels(dir: &TempDir, labels: &[&str]) -> PathBuf {
        let path = dir.path().join("labels.txt");
        let mut text = labels.join("\n");
        text.push('\n');
        fs::write(&path, text).unwrap();
        path
    }

    fn run_to_string(command: &Command, settings: &Settings) -> (Outcome, String) {
        let mut out = Vec::new();
        let outcome = run(command, settings, &mut out).unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }

    const SAMPLE: &[&str] = &["a", "a", "a", "b", "c", "d", "a", "a", "d", "c"];

    #[test]
    fn count_prints_most_common_report() {
        tally_logging::initialize_for_tests();
        let temp = TempDir::new().unwrap();
        let command = Command::Count(CountArgs {
            input: write_labels(&temp, SAMPLE),
            order: None,
            format: None,
            output: None,
            name: None,
        });
        let (outcome, text) = run_to_string(
            &command,
            &settings(Order::Descending, ReportFormat::Plain),
        );
        assert_eq!(outcome, Outcome::Success);
        assert_eq!(text, "5 a\n2 d\n2 c\n1 b\n");
    }

    #[test]
    fn count_ascending_mirrors_both_keys() {
        let temp = TempDir::new().unwrap();
        let command = Command::Count(CountArgs {
            input: write_labels(&temp, SAMPLE),
            order: None,
            format: None,
            output: None,
            name: None,
        });
        let (_, text) = run_to_string(&command, &settings(Order::Ascending, ReportFormat::Plain));
        assert_eq!(text, "1 b\n2 c\n2 d\n5 a\n");
    }

    #[test]
    fn count_writes_into_output_dir() {
        let temp = TempDir::new().unwrap();
        let out_dir = temp.path().join("reports");
        let command = Command::Count(CountArgs {
            input: write_labels(&temp, SAMPLE),
            order: None,
            format: None,
            output: Some(out_dir.clone()),
            name: None,
        });
        let (_, text) = run_to_string(&command, &settings(Order::Descending, ReportFormat::Json));
        let path = out_dir.join("counts.json");
        assert_eq!(text.trim_end(), path.display().to_string());
        let report = fs::read_to_string(&path).unwrap();
        assert!(report.contains("\"label\": \"a\""));
        assert!(report.contains("\"count\": 5"));
    }

    #[test]
    fn lookup_reports_count_and_membership() {
        let temp = TempDir::new().unwrap();
        let command = Command::Lookup(LookupArgs {
            input: write_labels(&temp, SAMPLE),
            labels: vec!["a".to_string(), "zz".to_string()],
        });
        let (_, text) = run_to_string(&command, &settings(Order::Descending, ReportFormat::Plain));
        assert_eq!(text, "a 5 true\nzz 0 false\n");
    }

    #[test]
    fn verify_passes_on_matching_counts_file() {
        let temp = TempDir::new().unwrap();
        let expected = temp.path().join("expected.txt");
        fs::write(&expected, "5 a\n2 d\n2 c\n1 b\n").unwrap();
        let command = Command::Verify(VerifyArgs {
            input: write_labels(&temp, SAMPLE),
            expected,
        });
        let (outcome, text) =
            run_to_string(&command, &settings(Order::Descending, ReportFormat::Plain));
        assert_eq!(outcome, Outcome::Success);
        assert_eq!(text, "PASS: len\nPASS: count\nPASS: most_common\n");
    }

    #[test]
    fn verify_flags_wrong_tie_order() {
        let temp = TempDir::new().unwrap();
        let expected = temp.path().join("expected.txt");
        // Same counts, ties listed ascending.
        fs::write(&expected, "5 a\n2 c\n2 d\n1 b\n").unwrap();
        let command = Command::Verify(VerifyArgs {
            input: write_labels(&temp, SAMPLE),
            expected,
        });
        let (outcome, text) =
            run_to_string(&command, &settings(Order::Descending, ReportFormat::Plain));
        assert_eq!(outcome, Outcome::Mismatch);
        assert_eq!(text, "PASS: len\nPASS: count\nFAIL: most_common\n");
    }

    #[test]
    fn verify_flags_wrong_counts() {
        let temp = TempDir::new().unwrap();
        let expected = temp.path().join("expected.txt");
        fs::write(&expected, "5 a\n2 d\n2 c\n").unwrap();
        let command = Command::Verify(VerifyArgs {
            input: write_labels(&temp, SAMPLE),
            expected,
        });
        let (outcome, text) =
            run_to_string(&command, &settings(Order::Descending, ReportFormat::Plain));
        assert_eq!(outcome, Outcome::Mismatch);
        assert_eq!(text, "FAIL: len\nFAIL: count\nFAIL: most_common\n");
    }

    #[test]
    fn missing_input_is_an_error() {
        let temp = TempDir::new().unwrap();
        let command = Command::Lookup(LookupArgs {
            input: temp.path().join("absent.txt"),
            labels: vec!["a".to_string()],
        });
        let mut out = Vec::new();
        let err = run(
            &command,
            &settings(Order::Descending, ReportFormat::Plain),
            &mut out,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("absent.txt"));
    }
}
