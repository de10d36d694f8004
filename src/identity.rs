use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Season/episode pair derived from a filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Identity {
    pub season: u32,
    pub episode: u32,
}

impl Identity {
    /// Returned when no rule finds an episode number.
    pub const NONE: Identity = Identity { season: 1, episode: 0 };

    pub fn new(season: u32, episode: u32) -> Self {
        Self { season, episode }
    }

    pub fn is_found(&self) -> bool {
        self.episode > 0
    }

    pub fn key(&self) -> MatchKey {
        MatchKey {
            season: self.season,
            episode: self.episode,
        }
    }
}

/// Lookup key used to correlate media and companion files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchKey {
    season: u32,
    episode: u32,
}

/// A discovered file tagged with its identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaggedFile {
    pub path: PathBuf,
    pub season: u32,
    pub episode: u32,
    pub extension: String,
}

impl TaggedFile {
    pub fn new(path: impl Into<PathBuf>, identity: Identity, extension: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            season: identity.season,
            episode: identity.episode,
            extension: extension.into(),
        }
    }

    pub fn identity(&self) -> Identity {
        Identity::new(self.season, self.episode)
    }

    pub fn key(&self) -> MatchKey {
        self.identity().key()
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.to_string_lossy().to_string())
    }
}

struct EpisodeRule {
    regex: Regex,
    season_group: Option<usize>,
    episode_group: usize,
}

impl EpisodeRule {
    fn new(pattern: &str, season_group: Option<usize>, episode_group: usize) -> Self {
        Self {
            regex: Regex::new(pattern).expect("episode pattern is a valid regex"),
            season_group,
            episode_group,
        }
    }

    fn apply(&self, name: &str) -> Option<Identity> {
        let captures = self.regex.captures(name)?;

        let episode = captures
            .get(self.episode_group)?
            .as_str()
            .parse::<u32>()
            .ok()
            .filter(|episode| *episode > 0)?;

        let season = self
            .season_group
            .and_then(|group| captures.get(group))
            .and_then(|season| season.as_str().parse::<u32>().ok())
            .filter(|season| *season > 0)
            .unwrap_or(1);

        Some(Identity { season, episode })
    }
}

// Evaluated top to bottom; the first rule producing a positive episode wins.
static EPISODE_RULES: LazyLock<[EpisodeRule; 5]> = LazyLock::new(|| {
    [
        // S1 - 01
        EpisodeRule::new(r"(?i)S([0-9]+)\s*-\s*([0-9]+)", Some(1), 2),
        // S1E01, S1 01
        EpisodeRule::new(r"(?i)S([0-9]+)(?:\s|E)([0-9]+)", Some(1), 2),
        // E01
        EpisodeRule::new(r"(?i)E([0-9]+)", None, 1),
        // - 01, - (01)
        EpisodeRule::new(r"\s-\s\(?([0-9]+)\)?", None, 1),
        // 01 or 001 at the end or before a space
        EpisodeRule::new(r"\s([0-9]{2,3})(?:\s|$)", None, 1),
    ]
});

static HAS_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("digit pattern is a valid regex"));

/// Derive the season and episode from a file name.
///
/// Never fails: a name without any recognisable episode cue yields
/// [`Identity::NONE`].
pub fn extract_identity(filename: &str) -> Identity {
    let name = strip_extension(filename);

    EPISODE_RULES
        .iter()
        .find_map(|rule| rule.apply(name))
        .unwrap_or(Identity::NONE)
}

/// Quick check used by discovery before running the full cascade.
pub fn has_numeric_cue(filename: &str) -> bool {
    HAS_DIGIT.is_match(filename)
}

/// Extension of a base name, starting at its last dot.
pub fn file_extension(filename: &str) -> &str {
    filename.rfind('.').map(|dot| &filename[dot..]).unwrap_or("")
}

fn strip_extension(filename: &str) -> &str {
    filename.rfind('.').map(|dot| &filename[..dot]).unwrap_or(filename)
}
