//! Scanned card images.
//!
//! Responses only store paths. A path is accepted when it lies under the card
//! directory (`<static root>/cards/fg1/`, searched recursively) and its file
//! name ends with the side's suffix. Existence is not checked on write.

use crate::error::ModelError;
use failure::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;
use walkdir::WalkDir;

/// Card directory relative to the static root.
pub const CARD_SUBDIR: &str = "cards/fg1";

/// Column width of the `front` and `back` columns.
pub const MAX_PATH_LEN: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardSide {
    Front,
    Back,
}

impl CardSide {
    pub fn suffix(self) -> &'static str {
        match self {
            CardSide::Front => "-front.png",
            CardSide::Back => "-back.png",
        }
    }

    pub fn matches(self, file_name: &str) -> bool {
        file_name.ends_with(self.suffix())
    }
}

impl fmt::Display for CardSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CardSide::Front => "front",
            CardSide::Back => "back",
        })
    }
}

impl FromStr for CardSide {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, ModelError> {
        match s {
            "front" => Ok(CardSide::Front),
            "back" => Ok(CardSide::Back),
            _ => Err(ModelError::InvalidChoice {
                field: "card side",
                value: s.to_owned(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDir {
    dir: PathBuf,
}

impl CardDir {
    pub fn new<P: AsRef<Path>>(static_root: P) -> Self {
        Self {
            dir: static_root.as_ref().join(CARD_SUBDIR),
        }
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Checks that `path` may be stored as the given side of a card.
    pub fn check(&self, side: CardSide, path: &str) -> Result<(), ModelError> {
        let candidate = Path::new(path);
        let inside = candidate.starts_with(&self.dir)
            && !candidate.components().any(|c| c == Component::ParentDir);
        // The stored string itself, not `file_name()`, which drops a trailing
        // separator.
        if !inside || !side.matches(path) || path.chars().count() > MAX_PATH_LEN {
            return Err(ModelError::CardPath {
                side,
                path: path.to_owned(),
                dir: self.dir.display().to_string(),
            });
        }
        Ok(())
    }

    /// Every stored-path candidate for `side`, sorted.
    pub fn choices(&self, side: CardSide) -> Result<Vec<String>, Error> {
        let mut found = Vec::new();
        for entry in WalkDir::new(&self.dir).follow_links(true) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let named = entry
                .file_name()
                .to_str()
                .map_or(false, |n| side.matches(n));
            if !named {
                continue;
            }
            match entry.path().to_str() {
                Some(path) => found.push(path.to_owned()),
                None => log::warn!("skipping non UTF-8 card path {:?}", entry.path()),
            }
        }
        found.sort();
        Ok(found)
    }
}
