//! Trait definitions for media metadata lookups.
//!
//! The Jikan client implements [`MediaLookup`]; the controller and tests
//! depend only on the trait so they can swap in a scripted fake.

use std::future::Future;

use crate::jikan::JikanError;

/// Which catalogue a lookup targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Anime,
    Manga,
}

impl MediaKind {
    pub const ALL: &[MediaKind] = &[Self::Anime, Self::Manga];

    /// URL path segment used by the Jikan v4 API.
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Anime => "anime",
            Self::Manga => "manga",
        }
    }

    /// Lowercase noun for user-facing sentences ("anime data", "manga data").
    pub fn noun(self) -> &'static str {
        self.path_segment()
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Anime => write!(f, "Anime"),
            Self::Manga => write!(f, "Manga"),
        }
    }
}

/// A single looked-up record, normalized across anime and manga.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MediaRecord {
    pub id: u64,
    pub kind: MediaKind,
    pub title: String,
    pub genres: Vec<String>,
    pub score: Option<f64>,
    /// Anime only.
    pub episodes: Option<u32>,
    /// Manga only.
    pub chapters: Option<u32>,
    /// Manga only.
    pub volumes: Option<u32>,
    pub year: Option<String>,
    pub image_url: Option<String>,
    pub synopsis: Option<String>,
}

/// Fetch one record by its numeric identifier.
pub trait MediaLookup: Send + Sync {
    fn lookup(
        &self,
        kind: MediaKind,
        id: u64,
    ) -> impl Future<Output = Result<MediaRecord, JikanError>> + Send;
}
