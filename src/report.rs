use std::io::{self, Write};
use std::path::Path;

use crossterm::style::Stylize;
use serde::Serialize;

use crate::identity::TaggedFile;
use crate::pairing::{FilePair, Pairing};
use crate::rename_engine::RenameInstruction;

/// Receives progress notifications from the executor.
pub trait Reporter {
    /// The file already has its final name.
    fn unchanged(&mut self, path: &Path, dry_run: bool) -> io::Result<()>;

    /// Dry run only: the rename that would happen.
    fn planned(&mut self, instruction: &RenameInstruction) -> io::Result<()>;

    /// A rename that completed as part of a successful batch.
    fn renamed(&mut self, instruction: &RenameInstruction) -> io::Result<()>;

    /// Every instruction in a live batch was a no-op.
    fn nothing_to_rename(&mut self) -> io::Result<()>;
}

/// Human-readable progress written to a terminal or any other writer.
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Print matched pairs and anything left without a partner.
    pub fn show_pairing(&mut self, pairing: &Pairing) -> io::Result<()> {
        writeln!(self.out, "\n{}", "Matched pairs:".bold())?;
        for (i, FilePair { media, companion }) in pairing.pairs.iter().enumerate() {
            writeln!(
                self.out,
                "{}. Video: {}\n   Subtitle: {}",
                i + 1,
                media.file_name(),
                companion.file_name()
            )?;
        }

        if !pairing.unmatched.is_empty() {
            writeln!(self.out, "\n{}", "Unmatched files:".bold().yellow())?;
            for (i, file) in pairing.unmatched.iter().enumerate() {
                writeln!(self.out, "{}. {}", i + 1, file.file_name())?;
            }
        }

        Ok(())
    }

    pub fn line(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{}", message)
    }

    pub fn warning(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{} {}", "⚠".yellow(), message)
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn unchanged(&mut self, path: &Path, dry_run: bool) -> io::Result<()> {
        if dry_run {
            writeln!(self.out, "{} No change: {}", "[dry-run]".dim(), path.display())
        } else {
            writeln!(self.out, "{} No change: {}", "ℹ".blue(), path.display())
        }
    }

    fn planned(&mut self, instruction: &RenameInstruction) -> io::Result<()> {
        writeln!(
            self.out,
            "{} {} -> {}",
            "[dry-run]".dim(),
            instruction.source.display(),
            instruction.target.display()
        )
    }

    fn renamed(&mut self, instruction: &RenameInstruction) -> io::Result<()> {
        writeln!(
            self.out,
            "{} Renamed: {} -> {}",
            "✓".green(),
            instruction.source.display(),
            instruction.target.display()
        )
    }

    fn nothing_to_rename(&mut self) -> io::Result<()> {
        writeln!(self.out, "{} No files need renaming.", "ℹ".blue())
    }
}

/// How a run ended, for the JSON report.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    Cancelled,
    PreflightFailed { issues: Vec<String> },
    Completed { renamed: usize, unchanged: usize },
    Failed { error: String, recovered: bool },
}

/// Machine-readable summary of one invocation.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub dry_run: bool,
    pub pairs: Vec<FilePair>,
    pub unmatched: Vec<TaggedFile>,
    pub instructions: Vec<RenameInstruction>,
    pub outcome: RunOutcome,
}

impl RunReport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
