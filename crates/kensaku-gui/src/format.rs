//! Display formatting helpers for record fields.

use kensaku_api::{MediaKind, MediaRecord};

/// Comma-joined; blank when the record lists no genres.
pub fn genres(record: &MediaRecord) -> String {
    record.genres.join(", ")
}

pub fn score(value: Option<f64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "N/A".into(),
    }
}

pub fn count(value: Option<u32>) -> String {
    match value {
        Some(n) => n.to_string(),
        None => "Unknown".into(),
    }
}

pub fn year(value: Option<&str>) -> String {
    value.unwrap_or("Unknown").to_string()
}

pub fn synopsis(value: Option<&str>) -> &str {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("No synopsis available.")
}

/// Label/value pairs shown for a record, in display order.
pub fn fields(record: &MediaRecord) -> Vec<(&'static str, String)> {
    let mut fields = vec![
        ("Genre", genres(record)),
        ("Score", score(record.score)),
    ];
    match record.kind {
        MediaKind::Anime => fields.push(("Episodes", count(record.episodes))),
        MediaKind::Manga => {
            fields.push(("Chapters", count(record.chapters)));
            fields.push(("Volumes", count(record.volumes)));
        }
    }
    fields.push(("Year", year(record.year.as_deref())));
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(kind: MediaKind) -> MediaRecord {
        MediaRecord {
            id: 5114,
            kind,
            title: "Fullmetal Alchemist: Brotherhood".into(),
            genres: vec!["Action".into(), "Adventure".into(), "Drama".into()],
            score: Some(9.1),
            episodes: Some(64),
            chapters: None,
            volumes: Some(27),
            year: Some("2009".into()),
            image_url: None,
            synopsis: None,
        }
    }

    #[test]
    fn test_missing_values() {
        assert_eq!(score(None), "N/A");
        assert_eq!(count(None), "Unknown");
        assert_eq!(year(None), "Unknown");
        assert_eq!(synopsis(Some("  ")), "No synopsis available.");
    }

    #[test]
    fn test_no_genres_is_blank() {
        let mut record = record(MediaKind::Anime);
        record.genres.clear();
        assert_eq!(fields(&record)[0], ("Genre", String::new()));
    }

    #[test]
    fn test_score_as_reported() {
        assert_eq!(score(Some(9.1)), "9.1");
        assert_eq!(score(Some(7.0)), "7");
    }

    #[test]
    fn test_anime_fields() {
        let fields = fields(&record(MediaKind::Anime));
        assert_eq!(
            fields,
            vec![
                ("Genre", "Action, Adventure, Drama".to_string()),
                ("Score", "9.1".to_string()),
                ("Episodes", "64".to_string()),
                ("Year", "2009".to_string()),
            ]
        );
    }

    #[test]
    fn test_manga_fields() {
        let labels: Vec<_> = fields(&record(MediaKind::Manga))
            .into_iter()
            .map(|(label, value)| format!("{label}={value}"))
            .collect();
        assert_eq!(
            labels,
            ["Genre=Action, Adventure, Drama", "Score=9.1", "Chapters=Unknown", "Volumes=27", "Year=2009"]
        );
    }
}
