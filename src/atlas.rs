use serde::{Deserialize, Serialize};

/// Explicit two-level subdivision of the shadow and cookie atlases.
///
/// The first count splits the whole atlas, every following count splits the
/// matching top-level cell again. Without a split the atlas is divided into
/// equal squares each frame, one per light that needs a slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct AtlasSplit {
    counts: Vec<u32>,
}

impl AtlasSplit {
    /// Returns `None` when `counts` is empty.
    pub fn new(counts: Vec<u32>) -> Option<Self> {
        if counts.is_empty() {
            None
        } else {
            Some(Self { counts })
        }
    }

    pub fn top_level(&self) -> u32 {
        self.counts[0]
    }

    pub fn second_level(&self) -> &[u32] {
        &self.counts[1..]
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.counts
    }
}

impl TryFrom<Vec<u32>> for AtlasSplit {
    type Error = &'static str;

    fn try_from(counts: Vec<u32>) -> Result<Self, Self::Error> {
        Self::new(counts).ok_or("atlas split needs at least one subdivision count")
    }
}

impl From<AtlasSplit> for Vec<u32> {
    fn from(split: AtlasSplit) -> Self {
        split.counts
    }
}

/// Identifier of the layer that receives clustered lighting debug rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(pub u32);
