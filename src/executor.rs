//! Two-phase batch rename with rollback.
//!
//! Every file is first moved to a temporary name next to it, then from the
//! temporary name to its target. This lets a batch hand a name from one file
//! to another (for example swapping two episodes) without clobbering. When a
//! step fails, every file that moved is put back under its original name,
//! newest first.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{ExecuteError, Phase, RollbackError, RollbackFailure, StepError};
use crate::rename_engine::RenameInstruction;
use crate::report::Reporter;

/// Candidate temporary names tried per file.
pub const TEMP_PATH_ATTEMPTS: usize = 1000;

const TEMP_PREFIX: &str = ".subtitle-rename-tmp";

/// The filesystem move used by the executor.
pub trait FileMover {
    fn rename(&mut self, from: &Path, to: &Path) -> io::Result<()>;
}

/// Moves files with [`std::fs::rename`].
#[derive(Debug, Default, Clone, Copy)]
pub struct StdMover;

impl FileMover for StdMover {
    fn rename(&mut self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }
}

impl<F> FileMover for F
where
    F: FnMut(&Path, &Path) -> io::Result<()>,
{
    fn rename(&mut self, from: &Path, to: &Path) -> io::Result<()> {
        self(from, to)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecutionSummary {
    pub renamed: usize,
    pub unchanged: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileState {
    Original,
    Temporary,
    Target,
}

/// Where one file of the batch currently lives.
#[derive(Debug)]
struct RenameProgress<'a> {
    instruction: &'a RenameInstruction,
    /// Position in the caller's instruction list, used for temp names.
    index: usize,
    current: PathBuf,
    state: FileState,
}

impl<'a> RenameProgress<'a> {
    fn new(index: usize, instruction: &'a RenameInstruction) -> Self {
        Self {
            instruction,
            index,
            current: instruction.source.clone(),
            state: FileState::Original,
        }
    }

    fn advance(&mut self, to: PathBuf, state: FileState) {
        self.current = to;
        self.state = state;
    }
}

/// Apply `instructions` to the filesystem, or only report them when `dry_run`.
pub fn execute(
    instructions: &[RenameInstruction],
    dry_run: bool,
    reporter: &mut dyn Reporter,
) -> Result<ExecutionSummary, ExecuteError> {
    execute_with(instructions, dry_run, &mut StdMover, reporter)
}

/// Like [`execute`], with the move operation supplied by the caller.
pub fn execute_with<M: FileMover + ?Sized>(
    instructions: &[RenameInstruction],
    dry_run: bool,
    mover: &mut M,
    reporter: &mut dyn Reporter,
) -> Result<ExecutionSummary, ExecuteError> {
    if dry_run {
        return report_dry_run(instructions, reporter);
    }

    let mut summary = ExecutionSummary::default();
    let mut batch = Vec::with_capacity(instructions.len());

    for (index, instruction) in instructions.iter().enumerate() {
        if instruction.is_noop() {
            reporter
                .unchanged(&instruction.source, false)
                .map_err(ExecuteError::Report)?;
            summary.unchanged += 1;
            continue;
        }
        batch.push(RenameProgress::new(index, instruction));
    }

    if batch.is_empty() {
        reporter.nothing_to_rename().map_err(ExecuteError::Report)?;
        return Ok(summary);
    }

    tracing::info!(files = batch.len(), "starting rename batch");

    for i in 0..batch.len() {
        if let Err(step) = move_to_temporary(&mut batch[i], mover) {
            return Err(fail(step, &mut batch, mover));
        }
    }

    for i in 0..batch.len() {
        if let Err(step) = move_to_target(&mut batch[i], mover) {
            return Err(fail(step, &mut batch, mover));
        }
    }

    for progress in &batch {
        reporter
            .renamed(progress.instruction)
            .map_err(ExecuteError::Report)?;
    }

    summary.renamed = batch.len();
    tracing::info!(renamed = summary.renamed, unchanged = summary.unchanged, "rename batch complete");
    Ok(summary)
}

fn report_dry_run(
    instructions: &[RenameInstruction],
    reporter: &mut dyn Reporter,
) -> Result<ExecutionSummary, ExecuteError> {
    let mut summary = ExecutionSummary::default();

    for instruction in instructions {
        let reported = if instruction.is_noop() {
            summary.unchanged += 1;
            reporter.unchanged(&instruction.source, true)
        } else {
            summary.renamed += 1;
            reporter.planned(instruction)
        };
        reported.map_err(ExecuteError::Report)?;
    }

    Ok(summary)
}

fn move_to_temporary<M: FileMover + ?Sized>(
    progress: &mut RenameProgress<'_>,
    mover: &mut M,
) -> Result<(), StepError> {
    let temporary = allocate_temp_path(&progress.instruction.source, progress.index)?;

    tracing::debug!(from = %progress.current.display(), to = %temporary.display(), "phase one");
    mover
        .rename(&progress.current, &temporary)
        .map_err(|source| StepError::Rename {
            phase: Phase::One,
            from: progress.current.clone(),
            to: temporary.clone(),
            source,
        })?;

    progress.advance(temporary, FileState::Temporary);
    Ok(())
}

fn move_to_target<M: FileMover + ?Sized>(
    progress: &mut RenameProgress<'_>,
    mover: &mut M,
) -> Result<(), StepError> {
    let instruction = progress.instruction;
    let target = &instruction.target;
    let step_error = |source| StepError::Rename {
        phase: Phase::Two,
        from: progress.current.clone(),
        to: target.clone(),
        source,
    };

    // Every source is parked under a temporary name by now, so anything
    // sitting at the target appeared from outside the batch.
    if fs::symlink_metadata(target).is_ok() {
        return Err(step_error(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "target appeared after preflight",
        )));
    }

    tracing::debug!(from = %progress.current.display(), to = %target.display(), "phase two");
    mover.rename(&progress.current, target).map_err(step_error)?;

    progress.advance(target.clone(), FileState::Target);
    Ok(())
}

/// Pick a name next to `source` that nothing currently uses.
fn allocate_temp_path(source: &Path, index: usize) -> Result<PathBuf, StepError> {
    let dir = source.parent().unwrap_or_else(|| Path::new(""));
    let base = source
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();
    let pid = std::process::id();

    for attempt in 0..TEMP_PATH_ATTEMPTS {
        let candidate = dir.join(format!(
            "{}-{}-{}-{}",
            TEMP_PREFIX,
            pid,
            index * TEMP_PATH_ATTEMPTS + attempt,
            base
        ));

        match fs::symlink_metadata(&candidate) {
            Ok(_) => continue,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(candidate),
            Err(source) => {
                return Err(StepError::TempPathCheck {
                    path: candidate,
                    source,
                });
            }
        }
    }

    Err(StepError::TempPathExhausted {
        path: source.to_path_buf(),
        attempts: TEMP_PATH_ATTEMPTS,
    })
}

fn fail<M: FileMover + ?Sized>(
    step: StepError,
    batch: &mut [RenameProgress<'_>],
    mover: &mut M,
) -> ExecuteError {
    tracing::warn!(error = %step, "rename batch failed, rolling back");

    match rollback(batch, mover) {
        Ok(()) => ExecuteError::Step(step),
        Err(rollback) => ExecuteError::RollbackFailed { step, rollback },
    }
}

/// Move every file that left its original name back, newest first.
///
/// Best effort: a failing entry is recorded and the rest are still tried.
/// An original name that is still taken is never overwritten: the entry is
/// retried once after the pass, when a swapped name may have been freed,
/// and reported as occupied otherwise.
fn rollback<M: FileMover + ?Sized>(
    batch: &mut [RenameProgress<'_>],
    mover: &mut M,
) -> Result<(), RollbackError> {
    let mut failures = Vec::new();
    let mut deferred = Vec::new();

    for (position, progress) in batch.iter_mut().enumerate().rev() {
        if progress.state == FileState::Original {
            continue;
        }

        match fs::symlink_metadata(&progress.current) {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                failures.push(RollbackFailure::Disappeared {
                    path: progress.current.clone(),
                });
                continue;
            }
            Err(source) => {
                failures.push(RollbackFailure::Stat {
                    path: progress.current.clone(),
                    source,
                });
                continue;
            }
        }

        if fs::symlink_metadata(&progress.instruction.source).is_ok() {
            deferred.push(position);
            continue;
        }

        if let Err(failure) = restore(progress, mover) {
            failures.push(failure);
        }
    }

    for position in deferred {
        let progress = &mut batch[position];
        let instruction = progress.instruction;
        let original = &instruction.source;

        if fs::symlink_metadata(original).is_ok() {
            failures.push(RollbackFailure::OriginalOccupied {
                from: progress.current.clone(),
                to: original.clone(),
            });
            continue;
        }

        if let Err(failure) = restore(progress, mover) {
            failures.push(failure);
        }
    }

    if failures.is_empty() {
        return Ok(());
    }

    for failure in &failures {
        tracing::error!(%failure, "rollback step failed");
    }
    Err(RollbackError { failures })
}

fn restore<M: FileMover + ?Sized>(
    progress: &mut RenameProgress<'_>,
    mover: &mut M,
) -> Result<(), RollbackFailure> {
    let instruction = progress.instruction;
    let original = &instruction.source;

    mover
        .rename(&progress.current, original)
        .map_err(|source| RollbackFailure::Rename {
            from: progress.current.clone(),
            to: original.clone(),
            source,
        })?;

    tracing::debug!(from = %progress.current.display(), to = %original.display(), "rolled back");
    progress.advance(original.clone(), FileState::Original);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl Reporter for Recorder {
        fn unchanged(&mut self, path: &Path, dry_run: bool) -> io::Result<()> {
            self.events.push(format!("unchanged {} {}", dry_run, path.display()));
            Ok(())
        }

        fn planned(&mut self, instruction: &RenameInstruction) -> io::Result<()> {
            self.events.push(format!("planned {}", instruction.target.display()));
            Ok(())
        }

        fn renamed(&mut self, instruction: &RenameInstruction) -> io::Result<()> {
            self.events.push(format!("renamed {}", instruction.target.display()));
            Ok(())
        }

        fn nothing_to_rename(&mut self) -> io::Result<()> {
            self.events.push("nothing".to_string());
            Ok(())
        }
    }

    fn leftovers(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_dry_run_never_moves() {
        let dir = tempdir().unwrap();
        let old = dir.path().join("episode-01.mkv");
        let new = dir.path().join("Anime - S01E01.mkv");
        fs::write(&old, "video").unwrap();

        let mut calls = 0;
        let mut mover = |from: &Path, to: &Path| -> io::Result<()> {
            calls += 1;
            fs::rename(from, to)
        };
        let mut recorder = Recorder::default();

        let summary = execute_with(
            &[RenameInstruction::new(&old, &new)],
            true,
            &mut mover,
            &mut recorder,
        )
        .unwrap();

        assert_eq!(calls, 0);
        assert_eq!(summary.renamed, 1);
        assert!(old.exists());
        assert!(!new.exists());
        assert_eq!(recorder.events, vec![format!("planned {}", new.display())]);
    }

    #[test]
    fn test_live_run_renames_and_reports() {
        let dir = tempdir().unwrap();
        let video = dir.path().join("ep 01.mkv");
        let subtitle = dir.path().join("ep 01.srt");
        fs::write(&video, "video").unwrap();
        fs::write(&subtitle, "subtitle").unwrap();
        let instructions = vec![
            RenameInstruction::new(&video, dir.path().join("Anime - S01E01.mkv")),
            RenameInstruction::new(&subtitle, dir.path().join("Anime - S01E01.srt")),
        ];
        let mut recorder = Recorder::default();

        let summary = execute(&instructions, false, &mut recorder).unwrap();

        assert_eq!(summary, ExecutionSummary { renamed: 2, unchanged: 0 });
        assert_eq!(leftovers(dir.path()), vec!["Anime - S01E01.mkv", "Anime - S01E01.srt"]);
        assert_eq!(recorder.events.len(), 2);
    }

    #[test]
    fn test_swap_goes_through_temporary_names() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.mkv");
        let b = dir.path().join("b.mkv");
        fs::write(&a, "first").unwrap();
        fs::write(&b, "second").unwrap();
        let mut recorder = Recorder::default();

        execute(
            &[RenameInstruction::new(&a, &b), RenameInstruction::new(&b, &a)],
            false,
            &mut recorder,
        )
        .unwrap();

        assert_eq!(fs::read_to_string(&a).unwrap(), "second");
        assert_eq!(fs::read_to_string(&b).unwrap(), "first");
        assert_eq!(leftovers(dir.path()), vec!["a.mkv", "b.mkv"]);
    }

    #[test]
    fn test_noops_are_reported_and_never_moved() {
        let dir = tempdir().unwrap();
        let done = dir.path().join("Anime - S01E01.mkv");
        fs::write(&done, "video").unwrap();

        let mut calls = 0;
        let mut mover = |_: &Path, _: &Path| -> io::Result<()> {
            calls += 1;
            Ok(())
        };
        let mut recorder = Recorder::default();

        let summary = execute_with(
            &[RenameInstruction::new(&done, &done)],
            false,
            &mut mover,
            &mut recorder,
        )
        .unwrap();

        assert_eq!(calls, 0);
        assert_eq!(summary, ExecutionSummary { renamed: 0, unchanged: 1 });
        assert_eq!(
            recorder.events,
            vec![format!("unchanged false {}", done.display()), "nothing".to_string()]
        );
    }

    #[test]
    fn test_phase_two_failure_rolls_back_everything() {
        let dir = tempdir().unwrap();
        let old_video = dir.path().join("episode-01.mkv");
        let old_subtitle = dir.path().join("episode-01.srt");
        let new_video = dir.path().join("Anime - S01E01.mkv");
        let new_subtitle = dir.path().join("Anime - S01E01.srt");
        fs::write(&old_video, "video").unwrap();
        fs::write(&old_subtitle, "subtitle").unwrap();

        let failing_target = new_subtitle.clone();
        let mut mover = move |from: &Path, to: &Path| -> io::Result<()> {
            if to == failing_target {
                return Err(io::Error::other("forced failure for rollback test"));
            }
            fs::rename(from, to)
        };
        let mut recorder = Recorder::default();

        let err = execute_with(
            &[
                RenameInstruction::new(&old_video, &new_video),
                RenameInstruction::new(&old_subtitle, &new_subtitle),
            ],
            false,
            &mut mover,
            &mut recorder,
        )
        .unwrap_err();

        assert!(err.is_recovered());
        assert_eq!(err.phase(), Some(Phase::Two));
        assert_eq!(leftovers(dir.path()), vec!["episode-01.mkv", "episode-01.srt"]);
        assert_eq!(fs::read_to_string(&old_video).unwrap(), "video");
        assert!(recorder.events.is_empty());
    }

    #[test]
    fn test_phase_one_failure_restores_earlier_files() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("ep 01.mkv");
        let second = dir.path().join("ep 01.srt");
        fs::write(&first, "video").unwrap();
        fs::write(&second, "subtitle").unwrap();

        let failing_source = second.clone();
        let mut mover = move |from: &Path, to: &Path| -> io::Result<()> {
            if from == failing_source {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "locked"));
            }
            fs::rename(from, to)
        };
        let mut recorder = Recorder::default();

        let err = execute_with(
            &[
                RenameInstruction::new(&first, dir.path().join("Anime - S01E01.mkv")),
                RenameInstruction::new(&second, dir.path().join("Anime - S01E01.srt")),
            ],
            false,
            &mut mover,
            &mut recorder,
        )
        .unwrap_err();

        match &err {
            ExecuteError::Step(StepError::Rename { phase, from, .. }) => {
                assert_eq!(*phase, Phase::One);
                assert_eq!(from, &second);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(leftovers(dir.path()), vec!["ep 01.mkv", "ep 01.srt"]);
    }

    #[test]
    fn test_failed_rollback_is_reported_with_original_failure() {
        let dir = tempdir().unwrap();
        let old_video = dir.path().join("episode-01.mkv");
        let old_subtitle = dir.path().join("episode-01.srt");
        let new_video = dir.path().join("Anime - S01E01.mkv");
        let new_subtitle = dir.path().join("Anime - S01E01.srt");
        fs::write(&old_video, "video").unwrap();
        fs::write(&old_subtitle, "subtitle").unwrap();

        let (fail_target, video_source) = (new_subtitle.clone(), old_video.clone());
        let mut mover = move |from: &Path, to: &Path| -> io::Result<()> {
            if to == fail_target || to == video_source {
                return Err(io::Error::other("disk says no"));
            }
            fs::rename(from, to)
        };
        let mut recorder = Recorder::default();

        let err = execute_with(
            &[
                RenameInstruction::new(&old_video, &new_video),
                RenameInstruction::new(&old_subtitle, &new_subtitle),
            ],
            false,
            &mut mover,
            &mut recorder,
        )
        .unwrap_err();

        assert!(!err.is_recovered());
        let ExecuteError::RollbackFailed { step, rollback } = &err else {
            panic!("expected rollback failure, got {err}");
        };
        assert_eq!(step.phase(), Phase::Two);
        assert_eq!(rollback.failures.len(), 1);
        assert!(matches!(
            &rollback.failures[0],
            RollbackFailure::Rename { from, to, .. } if from == &new_video && to == &old_video
        ));

        // The subtitle still made it back; the video stays at its target name.
        assert!(old_subtitle.exists());
        assert!(new_video.exists());
        let message = err.to_string();
        assert!(message.contains("phase-two"));
        assert!(message.contains("rollback failed"));
    }

    #[test]
    fn test_rollback_reports_disappeared_file_and_continues() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("a 01.mkv");
        let second = dir.path().join("a 01.srt");
        let third = dir.path().join("a 02.mkv");
        for path in [&first, &second, &third] {
            fs::write(path, "data").unwrap();
        }

        // Phase one succeeds for the first two, then the first temp file
        // vanishes and the third file cannot be moved.
        let third_source = third.clone();
        let mut moved: Vec<PathBuf> = Vec::new();
        let mut mover = move |from: &Path, to: &Path| -> io::Result<()> {
            if from == third_source {
                if let Some(first_temp) = moved.first() {
                    fs::remove_file(first_temp)?;
                }
                return Err(io::Error::other("no space left"));
            }
            fs::rename(from, to)?;
            moved.push(to.to_path_buf());
            Ok(())
        };
        let mut recorder = Recorder::default();

        let err = execute_with(
            &[
                RenameInstruction::new(&first, dir.path().join("X - S01E01.mkv")),
                RenameInstruction::new(&second, dir.path().join("X - S01E01.srt")),
                RenameInstruction::new(&third, dir.path().join("X - S01E02.mkv")),
            ],
            false,
            &mut mover,
            &mut recorder,
        )
        .unwrap_err();

        let ExecuteError::RollbackFailed { rollback, .. } = err else {
            panic!("expected rollback failure");
        };
        assert_eq!(rollback.failures.len(), 1);
        assert!(matches!(rollback.failures[0], RollbackFailure::Disappeared { .. }));
        assert!(second.exists());
        assert!(third.exists());
    }

    #[test]
    fn test_rollback_of_failed_swap_restores_both_names() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.mkv");
        let b = dir.path().join("b.mkv");
        fs::write(&a, "first").unwrap();
        fs::write(&b, "second").unwrap();

        // The second move of phase two fails while file "first" already
        // holds b.mkv, the original name of file "second".
        let fail_target = a.clone();
        let mut mover = move |from: &Path, to: &Path| -> io::Result<()> {
            let from_temp = from
                .file_name()
                .is_some_and(|name| name.to_string_lossy().starts_with(TEMP_PREFIX));
            if to == fail_target && from_temp {
                return Err(io::Error::other("forced"));
            }
            fs::rename(from, to)
        };
        let mut recorder = Recorder::default();

        let err = execute_with(
            &[RenameInstruction::new(&a, &b), RenameInstruction::new(&b, &a)],
            false,
            &mut mover,
            &mut recorder,
        )
        .unwrap_err();

        assert!(err.is_recovered());
        assert_eq!(err.phase(), Some(Phase::Two));
        assert_eq!(leftovers(dir.path()), vec!["a.mkv", "b.mkv"]);
        assert_eq!(fs::read_to_string(&a).unwrap(), "first");
        assert_eq!(fs::read_to_string(&b).unwrap(), "second");
    }

    #[test]
    fn test_rollback_never_overwrites_original_name() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("ep 01.mkv");
        let target = dir.path().join("Anime - S01E01.mkv");
        fs::write(&source, "video").unwrap();

        // Something else claims the original name while the file is parked.
        let (fail_target, intruder) = (target.clone(), source.clone());
        let mut mover = move |from: &Path, to: &Path| -> io::Result<()> {
            if to == fail_target {
                fs::write(&intruder, "intruder")?;
                return Err(io::Error::other("forced"));
            }
            fs::rename(from, to)
        };
        let mut recorder = Recorder::default();

        let err = execute_with(
            &[RenameInstruction::new(&source, &target)],
            false,
            &mut mover,
            &mut recorder,
        )
        .unwrap_err();

        let ExecuteError::RollbackFailed { rollback, .. } = err else {
            panic!("expected rollback failure");
        };
        assert_eq!(rollback.failures.len(), 1);
        let RollbackFailure::OriginalOccupied { from, to } = &rollback.failures[0] else {
            panic!("expected occupied original, got {}", rollback.failures[0]);
        };
        assert_eq!(to, &source);
        assert_eq!(fs::read_to_string(&source).unwrap(), "intruder");
        assert_eq!(fs::read_to_string(from).unwrap(), "video");
        assert!(!target.exists());
    }

    #[test]
    fn test_exhausted_temp_names_roll_back_earlier_files() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("ep 01.mkv");
        let second = dir.path().join("ep 01.srt");
        fs::write(&first, "video").unwrap();
        fs::write(&second, "subtitle").unwrap();

        let pid = std::process::id();
        for attempt in 0..TEMP_PATH_ATTEMPTS {
            let taken = format!("{}-{}-{}-ep 01.srt", TEMP_PREFIX, pid, TEMP_PATH_ATTEMPTS + attempt);
            fs::write(dir.path().join(taken), "").unwrap();
        }
        let mut recorder = Recorder::default();

        let err = execute(
            &[
                RenameInstruction::new(&first, dir.path().join("Anime - S01E01.mkv")),
                RenameInstruction::new(&second, dir.path().join("Anime - S01E01.srt")),
            ],
            false,
            &mut recorder,
        )
        .unwrap_err();

        match &err {
            ExecuteError::Step(StepError::TempPathExhausted { path, attempts }) => {
                assert_eq!(path, &second);
                assert_eq!(*attempts, TEMP_PATH_ATTEMPTS);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(err.phase(), Some(Phase::One));
        assert!(err.is_recovered());
        assert_eq!(fs::read_to_string(&first).unwrap(), "video");
        assert_eq!(fs::read_to_string(&second).unwrap(), "subtitle");
        assert_eq!(leftovers(dir.path()).len(), TEMP_PATH_ATTEMPTS + 2);
        assert!(recorder.events.is_empty());
    }

    #[test]
    fn test_temp_path_skips_taken_candidates() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("ep 01.mkv");
        let first = allocate_temp_path(&source, 2).unwrap();
        fs::write(&first, "taken").unwrap();

        let second = allocate_temp_path(&source, 2).unwrap();

        assert_ne!(first, second);
        assert_eq!(second.parent(), Some(dir.path()));
        let name = second.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with(TEMP_PREFIX));
        assert!(name.ends_with("ep 01.mkv"));
        assert!(name.contains(&format!("-{}-", 2 * TEMP_PATH_ATTEMPTS + 1)));
    }
}
