use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use walkdir::WalkDir;

use crate::identity::{TaggedFile, extract_identity, file_extension, has_numeric_cue};

pub const VIDEO_EXTENSIONS: &[&str] = &[".mkv", ".mp4", ".avi"];

pub const SUBTITLE_EXTENSIONS: &[&str] = &[".srt", ".ass"];

/// Walk `folder` and tag every file with one of `extensions` that carries an episode number.
///
/// Files are returned in file-name order, directory by directory. Symbolic
/// links are not followed but count as files themselves, so a linked episode
/// is renamed as a link. Files without any episode cue are left out.
pub fn discover(folder: &Path, extensions: &[&str]) -> Result<Vec<TaggedFile>> {
    let wanted: HashSet<String> = extensions.iter().map(|ext| ext.to_lowercase()).collect();
    let mut files = Vec::new();

    for entry in WalkDir::new(folder).sort_by_file_name() {
        let entry = entry.with_context(|| format!("walking folder {:?}", folder))?;
        if entry.file_type().is_dir() {
            continue;
        }

        let base_name = entry.file_name().to_string_lossy();
        let extension = file_extension(&base_name).to_lowercase();
        if !wanted.contains(&extension) || !has_numeric_cue(&base_name) {
            continue;
        }

        let identity = extract_identity(&base_name);
        if !identity.is_found() {
            tracing::debug!(file = %base_name, "no episode number found, skipping");
            continue;
        }

        tracing::debug!(
            file = %base_name,
            season = identity.season,
            episode = identity.episode,
            "tagged file"
        );
        files.push(TaggedFile::new(entry.path(), identity, extension));
    }

    Ok(files)
}
