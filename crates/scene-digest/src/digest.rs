//! Scene content digest
//!
//! All files of a [`SceneAssetSet`] are streamed, in set order, into a
//! single SHA-256 accumulator. The resulting digest identifies the exact
//! byte content of the scene.

use crate::collect::SceneAssetSet;
use crate::error::DigestError;
use crate::Result;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// SHA-256 digest of a scene's asset content.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentDigest([u8; 32]);

impl ContentDigest {
    /// Digest of an in-memory buffer.
    pub fn compute(data: &[u8]) -> Self {
        Self::from_hasher(Sha256::new_with_prefix(data))
    }

    fn from_hasher(hasher: Sha256) -> Self {
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&hasher.finalize());
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex string (64 chars).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// First 12 hex chars, for log lines.
    pub fn short(&self) -> String {
        self.to_hex().chars().take(12).collect()
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentDigest({})", self.short())
    }
}

impl FromStr for ContentDigest {
    type Err = DigestError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let bytes =
            hex::decode(s.trim()).map_err(|_| DigestError::InvalidDigest(s.to_string()))?;
        if bytes.len() != 32 {
            return Err(DigestError::InvalidDigest(s.to_string()));
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl TryFrom<String> for ContentDigest {
    type Error = DigestError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ContentDigest> for String {
    fn from(digest: ContentDigest) -> Self {
        digest.to_hex()
    }
}

/// Hash every file of `files` in order
///
/// `on_file` is called with each path just before its bytes are read, so
/// callers can report which file is being processed. Files are streamed,
/// never loaded whole.
pub fn hash_scene_files<F>(files: &SceneAssetSet, mut on_file: F) -> Result<ContentDigest>
where
    F: FnMut(&Path),
{
    let mut hasher = Sha256::new();

    for path in files {
        on_file(path);
        let mut reader = BufReader::new(File::open(path)?);
        std::io::copy(&mut reader, &mut hasher)?;
    }

    let digest = ContentDigest::from_hasher(hasher);
    debug!("Scene digest over {} files: {}", files.len(), digest.short());
    Ok(digest)
}
