//! Error types for planning validation and rename execution.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// A single problem found by the preflight validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreflightIssue {
    /// The plan contains no instructions.
    NothingToRename,
    EmptySource,
    EmptyTarget { source: PathBuf },
    MissingSource { path: PathBuf },
    DuplicateTarget { path: PathBuf },
    TargetExists { path: PathBuf },
    /// The target could not be checked, so its safety is unknown.
    TargetUnverifiable { path: PathBuf, reason: String },
}

impl fmt::Display for PreflightIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NothingToRename => write!(f, "no matched file pairs were found"),
            Self::EmptySource => write!(f, "operation contains empty source path"),
            Self::EmptyTarget { source } => {
                write!(f, "operation for {} contains empty target path", source.display())
            }
            Self::MissingSource { path } => write!(
                f,
                "source file does not exist or is not readable: {}",
                path.display()
            ),
            Self::DuplicateTarget { path } => {
                write!(f, "duplicate target path detected: {}", path.display())
            }
            Self::TargetExists { path } => {
                write!(f, "target path already exists: {}", path.display())
            }
            Self::TargetUnverifiable { path, reason } => write!(
                f,
                "unable to validate target path {}: {}",
                path.display(),
                reason
            ),
        }
    }
}

/// Every issue found by the preflight validator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("preflight checks failed:\n - {}", join_lines(.issues, "\n - "))]
pub struct PreflightError {
    pub issues: Vec<PreflightIssue>,
}

/// The two passes of a live rename batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Original name to temporary name.
    One,
    /// Temporary name to target name.
    Two,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::One => write!(f, "phase-one"),
            Self::Two => write!(f, "phase-two"),
        }
    }
}

/// A failed step of the two-phase rename.
#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error("rename failed during {phase} ({} -> {}): {source}", .from.display(), .to.display())]
    Rename {
        phase: Phase,
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to allocate temp path for {} after {attempts} attempts", .path.display())]
    TempPathExhausted { path: PathBuf, attempts: usize },

    #[error("checking temp path {}: {source}", .path.display())]
    TempPathCheck {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StepError {
    pub fn phase(&self) -> Phase {
        match self {
            Self::Rename { phase, .. } => *phase,
            Self::TempPathExhausted { .. } | Self::TempPathCheck { .. } => Phase::One,
        }
    }
}

/// One entry that could not be moved back to its original name.
#[derive(Debug, thiserror::Error)]
pub enum RollbackFailure {
    #[error("rollback source disappeared: {}", .path.display())]
    Disappeared { path: PathBuf },

    #[error("rollback stat failed for {}: {source}", .path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("rollback skipped, original path is occupied ({} -> {})", .from.display(), .to.display())]
    OriginalOccupied { from: PathBuf, to: PathBuf },

    #[error("rollback failed ({} -> {}): {source}", .from.display(), .to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// All entries rollback could not restore.
#[derive(Debug, thiserror::Error)]
#[error("{}", join_lines(.failures, "\n"))]
pub struct RollbackError {
    pub failures: Vec<RollbackFailure>,
}

#[derive(Debug, thiserror::Error)]
pub enum ExecuteError {
    /// A step failed and every file was restored.
    #[error(transparent)]
    Step(#[from] StepError),

    /// A step failed and rollback could not restore every file.
    #[error("{step}\nrollback failed:\n{rollback}")]
    RollbackFailed {
        step: StepError,
        rollback: RollbackError,
    },

    #[error("reporting progress failed: {0}")]
    Report(#[source] io::Error),
}

impl ExecuteError {
    pub fn phase(&self) -> Option<Phase> {
        match self {
            Self::Step(step) | Self::RollbackFailed { step, .. } => Some(step.phase()),
            Self::Report(_) => None,
        }
    }

    /// False when files may still sit under temporary or target names.
    pub fn is_recovered(&self) -> bool {
        !matches!(self, Self::RollbackFailed { .. })
    }
}

fn join_lines<T: fmt::Display>(items: &[T], separator: &str) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(separator)
}
