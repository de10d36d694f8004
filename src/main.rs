use std::io::{self, Write};
use std::process;

use anyhow::{Context, Result, bail};
use clap::Parser;
use crossterm::style::Stylize;
use tracing_subscriber::EnvFilter;

use subtitle_rename::config::{AppConfig, Cli, ConfigBuilder, Prompt};
use subtitle_rename::discovery::{SUBTITLE_EXTENSIONS, VIDEO_EXTENSIONS, discover};
use subtitle_rename::report::{ConsoleReporter, RunOutcome, RunReport};
use subtitle_rename::{execute, pair_files, plan_renames, preflight};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

// Keeps stdout clean for the JSON report.
fn human_output(json: bool) -> Box<dyn Write> {
    if json {
        Box::new(io::stderr())
    } else {
        Box::new(io::stdout())
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut prompt = Prompt::new(io::stdin().lock(), human_output(cli.json));
    let config = ConfigBuilder::from_cli(&cli)
        .prompt_missing(&mut prompt)?
        .build()?;
    let mut console = ConsoleReporter::new(human_output(config.json));

    let videos = discover(&config.folder, VIDEO_EXTENSIONS)?;
    let subtitles = discover(&config.folder, SUBTITLE_EXTENSIONS)?;

    if videos.is_empty() && subtitles.is_empty() {
        bail!("no video or subtitle files found");
    }

    if videos.len() != subtitles.len() {
        console.warning(&format!(
            "found {} video files and {} subtitle files.",
            videos.len(),
            subtitles.len()
        ))?;
    }

    let pairing = pair_files(&videos, &subtitles);
    console.show_pairing(&pairing)?;

    let instructions = plan_renames(&pairing.pairs, &config.title);
    let mut report = RunReport {
        dry_run: config.dry_run,
        pairs: pairing.pairs,
        unmatched: pairing.unmatched,
        instructions,
        outcome: RunOutcome::Cancelled,
    };

    if let Err(e) = preflight(&report.instructions) {
        report.outcome = RunOutcome::PreflightFailed {
            issues: e.issues.iter().map(ToString::to_string).collect(),
        };
        emit_report(&config, &report)?;
        return Err(e.into());
    }

    if config.dry_run {
        console.line("\nDry-run mode enabled. No files will be changed.")?;
    } else if !config.assume_yes {
        let confirmed = prompt
            .confirm("\nDo you want to proceed with renaming? (yes/no): ")
            .context("reading confirmation")?;

        if !confirmed {
            console.line("Renaming cancelled.")?;
            return emit_report(&config, &report);
        }
    }

    match execute(&report.instructions, config.dry_run, &mut console) {
        Ok(summary) => {
            report.outcome = RunOutcome::Completed {
                renamed: summary.renamed,
                unchanged: summary.unchanged,
            };
        }
        Err(e) => {
            let recovered = e.is_recovered();
            report.outcome = RunOutcome::Failed {
                error: e.to_string(),
                recovered,
            };
            emit_report(&config, &report)?;

            if !recovered {
                console.warning(
                    "Rollback did not finish. Files listed above may still carry temporary or new names.",
                )?;
            }
            return Err(e.into());
        }
    }

    if config.dry_run {
        console.line("Dry-run complete.")?;
    } else {
        console.line("All done :)")?;
    }

    emit_report(&config, &report)
}

fn emit_report(config: &AppConfig, report: &RunReport) -> Result<()> {
    if config.json {
        println!("{}", report.to_json().context("serializing run report")?);
    }
    Ok(())
}
