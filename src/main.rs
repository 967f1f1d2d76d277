use clap::Parser;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use locksub::{Report, RuleOutcome, RuleTable, load_rules, reference, replace_traced};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Text to transform (read from stdin when omitted)
    #[arg(value_name = "TEXT")]
    text: Option<String>,

    /// Rule file (defaults to the built-in reference rules)
    #[arg(short = 'r', long, value_name = "FILE")]
    rules: Option<PathBuf>,

    /// Expected output; prints a comparison report and fails on mismatch
    #[arg(short = 'e', long, value_name = "TEXT")]
    expect: Option<String>,

    /// Run the built-in reference scenario
    #[arg(long, conflicts_with_all = ["text", "expect"])]
    reference: bool,

    /// Print what each rule did
    #[arg(short = 't', long)]
    trace: bool,

    /// More log output (repeat for more)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Never colour the report
    #[arg(long)]
    no_color: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Returns whether the output matched the expectation (if there was one).
fn run(args: &Args) -> Result<bool> {
    let rules = match &args.rules {
        Some(path) => load_rules(path)?,
        None => reference::rules().context("Failed to build the reference rules")?,
    };
    info!(rules = rules.len(), "rule table ready");

    let (input, expected) = if args.reference {
        (
            reference::REFERENCE_INPUT.to_string(),
            Some(reference::REFERENCE_EXPECTED.to_string()),
        )
    } else {
        (read_input(args.text.as_deref())?, args.expect.clone())
    };

    let replacement = replace_traced(&input, &rules);
    if args.trace {
        print_trace(&rules, &replacement.outcomes);
    }

    let Some(expected) = expected else {
        println!("{}", replacement.output);
        return Ok(true);
    };

    let label = if args.reference { "reference" } else { "replace" };
    let report = Report::new(label, expected, replacement.output);
    let color = !args.no_color && io::stdout().is_terminal();
    report
        .render(&mut io::stdout().lock(), color)
        .context("Failed to write report")?;
    if !report.passed() {
        warn!("output differs from the expected text");
    }
    Ok(report.passed())
}

fn read_input(text: Option<&str>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text.to_string());
    }
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read stdin")?;
    if input.ends_with('\n') {
        input.pop();
        if input.ends_with('\r') {
            input.pop();
        }
    }
    Ok(input)
}

fn print_trace(rules: &RuleTable, outcomes: &[RuleOutcome]) {
    for (rule, outcome) in rules.iter().zip(outcomes) {
        let what = match *outcome {
            RuleOutcome::Applied {
                start,
                matched_len,
                replacement_len,
            } => format!("applied at {start} ({matched_len} -> {replacement_len} chars)"),
            RuleOutcome::NoMatch => "no match".to_string(),
            RuleOutcome::EmptyMatch { start } => format!("empty match at {start}, skipped"),
            RuleOutcome::Locked { start, len } => {
                format!("locked text at {start}..{}, skipped", start + len)
            }
        };
        eprintln!("{:?} -> {:?}: {what}", rule.pattern(), rule.replacement());
    }
}
