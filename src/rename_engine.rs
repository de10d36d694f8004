use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::identity::TaggedFile;
use crate::pairing::FilePair;

/// One planned move of a file to its new name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameInstruction {
    pub source: PathBuf,
    pub target: PathBuf,
}

impl RenameInstruction {
    pub fn new(source: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// True when the file already carries its final name.
    pub fn is_noop(&self) -> bool {
        self.source == self.target
    }
}

/// Canonical name for an episode file, e.g. `Title - S01E02.mkv`.
pub fn target_file_name(title: &str, season: u32, episode: u32, extension: &str) -> String {
    format!("{} - S{:02}E{:02}{}", title, season, episode, extension)
}

/// Plan renames for every pair: media first, then its companion.
pub fn plan_renames(pairs: &[FilePair], title: &str) -> Vec<RenameInstruction> {
    let mut instructions = Vec::with_capacity(pairs.len() * 2);

    for pair in pairs {
        instructions.push(instruction_for(&pair.media, title));
        instructions.push(instruction_for(&pair.companion, title));
    }

    instructions
}

fn instruction_for(file: &TaggedFile, title: &str) -> RenameInstruction {
    let new_name = target_file_name(title, file.season, file.episode, &file.extension);
    let target = file
        .path
        .parent()
        .map(|dir| dir.join(&new_name))
        .unwrap_or_else(|| Path::new(&new_name).to_path_buf());

    RenameInstruction::new(file.path.clone(), target)
}
