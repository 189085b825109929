use std::path::{Path, PathBuf};
use std::process;

use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use vote_tally_config::Config;
use vote_tally_engine::{
    LogDiagnostics, TimestampPolicy, collect_topics, parse_transcript, read_transcript,
    render_summary, write_report,
};

const DEFAULT_OUTPUT: &str = "voting_results.csv";

fn main() {
    let matches = Command::new("vote-tally")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Process voting messages and generate CSV report")
        .arg(
            Arg::new("topics_file")
                .long("topics_file")
                .value_name("FILE")
                .help("Path to the text file containing voting messages")
                .required(true),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .value_name("FILE")
                .help("Output CSV file name (default: voting_results.csv)"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::SetTrue)
                .help("Enable verbose logging"),
        )
        .get_matches();

    init_logging(matches.get_flag("verbose"));

    let config = match Config::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            log::error!("{e}");
            process::exit(1);
        }
    };

    let topics_file = PathBuf::from(
        matches
            .get_one::<String>("topics_file")
            .expect("topics_file is required"),
    );
    let output = matches
        .get_one::<String>("output")
        .map(PathBuf::from)
        .or(config.output)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    let policy = config.timestamp_policy.unwrap_or_default();

    if let Err(e) = run(&topics_file, &output, policy) {
        log::error!("{e}");
        process::exit(1);
    }
}

fn run(topics_file: &Path, output: &Path, policy: TimestampPolicy) -> Result<()> {
    let diag = LogDiagnostics;

    let content = read_transcript(topics_file)?;
    let messages = parse_transcript(&content, policy, &diag);
    log::info!(
        "Parsed {} messages from {}",
        messages.len(),
        topics_file.display()
    );

    let rows = collect_topics(&messages);
    log::info!("Processed {} topics", rows.len());

    println!("{}", render_summary(&rows, messages.len()));

    write_report(output, &rows)?;
    log::info!("CSV file generated: {}", output.display());
    println!("Results saved to {}", output.display());

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Stderr)
        .init();
}
