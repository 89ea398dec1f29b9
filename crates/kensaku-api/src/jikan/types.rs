use serde::{Deserialize, Deserializer};

use crate::traits::{MediaKind, MediaRecord};

// ── Envelopes ───────────────────────────────────────────────────

/// Successful single-resource response: `{ "data": { ... } }`.
#[derive(Debug, Deserialize)]
pub struct JikanResponse<T> {
    pub data: T,
}

/// Body returned alongside non-2xx statuses. Every field is optional
/// because upstream gateways sometimes answer with something else entirely.
#[derive(Debug, Default, Deserialize)]
pub struct JikanErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

// ── Resources ───────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct JikanAnime {
    #[serde(default)]
    pub mal_id: Option<u64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub genres: Vec<JikanGenre>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub episodes: Option<u32>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub year: Option<String>,
    #[serde(default)]
    pub aired: Option<JikanDateRange>,
    #[serde(default)]
    pub images: Option<JikanImages>,
    #[serde(default)]
    pub synopsis: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct JikanManga {
    #[serde(default)]
    pub mal_id: Option<u64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub genres: Vec<JikanGenre>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub chapters: Option<u32>,
    #[serde(default)]
    pub volumes: Option<u32>,
    #[serde(default)]
    pub published: Option<JikanDateRange>,
    #[serde(default)]
    pub images: Option<JikanImages>,
    #[serde(default)]
    pub synopsis: Option<String>,
}

/// Genres arrive as `{ mal_id, type, name, url }` objects from the live
/// API; plain strings are accepted too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum JikanGenre {
    Named { name: String },
    Plain(String),
}

impl JikanGenre {
    pub fn into_name(self) -> String {
        match self {
            Self::Named { name } => name,
            Self::Plain(name) => name,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct JikanImages {
    #[serde(default)]
    pub jpg: Option<JikanImage>,
    #[serde(default)]
    pub webp: Option<JikanImage>,
}

#[derive(Debug, Default, Deserialize)]
pub struct JikanImage {
    #[serde(default)]
    pub image_url: Option<String>,
}

impl JikanImages {
    /// The jpg rendition, falling back to webp.
    pub fn primary_url(self) -> Option<String> {
        let jpg = self.jpg.and_then(|i| i.image_url);
        jpg.or_else(|| self.webp.and_then(|i| i.image_url))
    }
}

#[derive(Debug, Deserialize)]
pub struct JikanDateRange {
    #[serde(default)]
    pub prop: Option<JikanDateProp>,
}

#[derive(Debug, Deserialize)]
pub struct JikanDateProp {
    #[serde(default)]
    pub from: Option<JikanDateParts>,
}

#[derive(Debug, Deserialize)]
pub struct JikanDateParts {
    #[serde(default)]
    pub year: Option<i32>,
}

impl JikanDateRange {
    fn start_year(self) -> Option<String> {
        self.prop
            .and_then(|p| p.from)
            .and_then(|d| d.year)
            .map(|y| y.to_string())
    }
}

/// Accept `"2009"`, `2009`, or `null`.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(f) => f.to_string(),
    }))
}

// ── Conversions ─────────────────────────────────────────────────

impl JikanAnime {
    pub fn into_record(self, requested_id: u64) -> MediaRecord {
        let year = self.year.or_else(|| self.aired.and_then(|a| a.start_year()));
        MediaRecord {
            id: self.mal_id.unwrap_or(requested_id),
            kind: MediaKind::Anime,
            title: self.title,
            genres: self.genres.into_iter().map(JikanGenre::into_name).collect(),
            score: self.score,
            episodes: self.episodes,
            chapters: None,
            volumes: None,
            year,
            image_url: self.images.and_then(JikanImages::primary_url),
            synopsis: self.synopsis,
        }
    }
}

impl JikanManga {
    pub fn into_record(self, requested_id: u64) -> MediaRecord {
        MediaRecord {
            id: self.mal_id.unwrap_or(requested_id),
            kind: MediaKind::Manga,
            title: self.title,
            genres: self.genres.into_iter().map(JikanGenre::into_name).collect(),
            score: self.score,
            episodes: None,
            chapters: self.chapters,
            volumes: self.volumes,
            year: self.published.and_then(|p| p.start_year()),
            image_url: self.images.and_then(JikanImages::primary_url),
            synopsis: self.synopsis,
        }
    }
}
