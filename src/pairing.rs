use std::collections::HashMap;

use serde::Serialize;

use crate::identity::{MatchKey, TaggedFile};

/// A media file and the companion file sharing its identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilePair {
    pub media: TaggedFile,
    pub companion: TaggedFile,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Pairing {
    pub pairs: Vec<FilePair>,
    pub unmatched: Vec<TaggedFile>,
}

/// Match media files to companion files by identity.
///
/// Pairs follow media discovery order. Each companion is consumed at most
/// once; when two companions share a key the later one is offered for
/// pairing and the earlier one is left unmatched. Media files without a
/// companion come first in `unmatched`, followed by every companion nobody
/// claimed (sorted by path).
pub fn pair_files(media_files: &[TaggedFile], companion_files: &[TaggedFile]) -> Pairing {
    let mut companions: HashMap<MatchKey, &TaggedFile> = HashMap::new();
    let mut leftover: Vec<TaggedFile> = Vec::new();

    for companion in companion_files {
        if let Some(shadowed) = companions.insert(companion.key(), companion) {
            tracing::debug!(
                kept = %companion.path.display(),
                shadowed = %shadowed.path.display(),
                "companions share an episode"
            );
            leftover.push(shadowed.clone());
        }
    }

    let mut pairing = Pairing::default();

    for media in media_files {
        match companions.remove(&media.key()) {
            Some(companion) => pairing.pairs.push(FilePair {
                media: media.clone(),
                companion: companion.clone(),
            }),
            None => pairing.unmatched.push(media.clone()),
        }
    }

    leftover.extend(companions.into_values().cloned());
    leftover.sort_by(|a, b| a.path.cmp(&b.path));
    pairing.unmatched.extend(leftover);

    tracing::debug!(
        pairs = pairing.pairs.len(),
        unmatched = pairing.unmatched.len(),
        "paired media and companion files"
    );

    pairing
}
