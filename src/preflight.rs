use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

use crate::error::{PreflightError, PreflightIssue};
use crate::rename_engine::RenameInstruction;

/// Check a plan before anything on disk is touched.
///
/// All checks run to completion so the caller sees every problem at once.
/// Instructions whose source equals their target are exempt from the
/// target checks.
pub fn preflight(instructions: &[RenameInstruction]) -> Result<(), PreflightError> {
    let issues = collect_issues(instructions);

    if issues.is_empty() {
        tracing::debug!(instructions = instructions.len(), "preflight passed");
        return Ok(());
    }

    for issue in &issues {
        tracing::warn!(%issue, "preflight issue");
    }
    Err(PreflightError { issues })
}

fn collect_issues(instructions: &[RenameInstruction]) -> Vec<PreflightIssue> {
    let mut issues = Vec::new();

    if instructions.is_empty() {
        issues.push(PreflightIssue::NothingToRename);
    }

    let mut sources: HashSet<&Path> = HashSet::new();
    let mut seen_targets: HashSet<&Path> = HashSet::new();
    let mut targets: Vec<&Path> = Vec::new();

    for instruction in instructions {
        if is_blank(&instruction.source) {
            issues.push(PreflightIssue::EmptySource);
            continue;
        }

        if is_blank(&instruction.target) {
            issues.push(PreflightIssue::EmptyTarget {
                source: instruction.source.clone(),
            });
            continue;
        }

        sources.insert(instruction.source.as_path());

        if fs::metadata(&instruction.source).is_err() {
            issues.push(PreflightIssue::MissingSource {
                path: instruction.source.clone(),
            });
        }

        if instruction.is_noop() {
            continue;
        }

        if !seen_targets.insert(instruction.target.as_path()) {
            issues.push(PreflightIssue::DuplicateTarget {
                path: instruction.target.clone(),
            });
            continue;
        }

        targets.push(instruction.target.as_path());
    }

    // A target may be an existing file only if another instruction moves it away.
    for target in targets {
        if sources.contains(target) {
            continue;
        }

        match fs::symlink_metadata(target) {
            Ok(_) => issues.push(PreflightIssue::TargetExists {
                path: target.to_path_buf(),
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => issues.push(PreflightIssue::TargetUnverifiable {
                path: target.to_path_buf(),
                reason: e.to_string(),
            }),
        }
    }

    issues
}

fn is_blank(path: &Path) -> bool {
    path.to_string_lossy().trim().is_empty()
}
