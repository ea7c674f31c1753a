//! Alignment fetching
//!
//! The alignment collaborator is abstracted as [`AlignmentSource`]. Payloads
//! are cached on disk per track so a reload never waits on the source twice.

use std::future::Future;
use std::path::{Path, PathBuf};

use anyhow::Result;

use super::{LyricsPayload, parse_payload};

/// Anything that can produce word timestamps for a track
pub trait AlignmentSource {
    fn fetch(&self, track_id: u64) -> impl Future<Output = Result<LyricsPayload>> + Send;
}

/// Reads `<dir>/<track_id>.json` payload documents
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, track_id: u64) -> PathBuf {
        self.dir.join(format!("{}.json", track_id))
    }
}

impl AlignmentSource for DirectorySource {
    async fn fetch(&self, track_id: u64) -> Result<LyricsPayload> {
        let path = self.path_for(track_id);
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        Ok(parse_payload(&content))
    }
}

/// On-disk payload cache keyed by track id
#[derive(Debug, Clone)]
pub struct PayloadCache {
    dir: PathBuf,
}

impl PayloadCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Cache under the per-user cache directory
    pub fn user_default() -> Option<Self> {
        directories::ProjectDirs::from("com", "lyricsync", "Lyricsync")
            .map(|dirs| Self::new(dirs.cache_dir().join("lyrics")))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, track_id: u64) -> PathBuf {
        self.dir.join(format!("{}.json", track_id))
    }

    pub fn is_cached(&self, track_id: u64) -> bool {
        self.path_for(track_id).exists()
    }

    /// Load a cached payload, `None` when missing or unreadable
    pub fn load(&self, track_id: u64) -> Option<LyricsPayload> {
        let content = std::fs::read_to_string(self.path_for(track_id)).ok()?;
        serde_json::from_str(&content).ok()
    }

    pub fn store(&self, track_id: u64, payload: &LyricsPayload) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let content = serde_json::to_string(payload)?;
        std::fs::write(self.path_for(track_id), content)?;
        Ok(())
    }
}

/// Fetch a payload, consulting the cache first
pub async fn fetch_lyrics<S: AlignmentSource>(
    source: &S,
    cache: Option<&PayloadCache>,
    track_id: u64,
) -> Result<LyricsPayload> {
    if let Some(cached) = cache.and_then(|c| c.load(track_id)) {
        tracing::debug!("Loaded cached lyrics for {}", track_id);
        return Ok(cached);
    }

    let payload = source.fetch(track_id).await?;

    if let Some(cache) = cache {
        if let Err(e) = cache.store(track_id, &payload) {
            tracing::warn!("Failed to cache lyrics: {}", e);
        }
    }

    Ok(payload)
}
