//! Game entry model and merge semantics

use rand::Rng;
use rand::distributions::Alphanumeric;
use serde::{Deserialize, Serialize};

/// Opaque entry identifier
pub type EntryId = String;

/// Ratings are star counts out of five
pub const MAX_RATING: u8 = 5;

const ID_TOKEN_LEN: usize = 12;

/// Generate a fresh opaque id token for an entry that has none yet
pub fn new_entry_id() -> EntryId {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(ID_TOKEN_LEN)
        .map(char::from)
        .collect()
}

/// One tracked game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameEntry {
    pub id: EntryId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub rating: u8,
    #[serde(default)]
    pub hours_played: f64,
    #[serde(default)]
    pub completed: bool,
}

/// Partial entry as submitted by a form or an update request
///
/// `None` means the field was omitted and the existing value is preserved.
/// Submitting an empty string clears an optional field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntryId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours_played: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl GameEntry {
    /// Build a new entry from a draft, filling defaults for omitted fields
    pub fn from_draft(id: EntryId, draft: &EntryDraft) -> Self {
        Self {
            id,
            title: draft.title.clone().unwrap_or_default(),
            platform: normalize_label(draft.platform.clone()),
            genre: normalize_label(draft.genre.clone()),
            cover_url: normalize_label(draft.cover_url.clone()),
            rating: clamp_rating(draft.rating.unwrap_or(0)),
            hours_played: clamp_hours(draft.hours_played.unwrap_or(0.0)),
            completed: draft.completed.unwrap_or(false),
        }
    }

    /// Merge a draft into this entry, field by field
    ///
    /// Submitted fields win, omitted fields keep their current value.
    /// The id is never reassigned.
    pub fn apply(&mut self, draft: &EntryDraft) {
        if let Some(title) = &draft.title {
            self.title = title.clone();
        }
        if let Some(platform) = &draft.platform {
            self.platform = normalize_label(Some(platform.clone()));
        }
        if let Some(genre) = &draft.genre {
            self.genre = normalize_label(Some(genre.clone()));
        }
        if let Some(cover_url) = &draft.cover_url {
            self.cover_url = normalize_label(Some(cover_url.clone()));
        }
        if let Some(rating) = draft.rating {
            self.rating = clamp_rating(rating);
        }
        if let Some(hours) = draft.hours_played {
            self.hours_played = clamp_hours(hours);
        }
        if let Some(completed) = draft.completed {
            self.completed = completed;
        }
    }
}

impl From<&GameEntry> for EntryDraft {
    fn from(entry: &GameEntry) -> Self {
        Self {
            id: Some(entry.id.clone()),
            title: Some(entry.title.clone()),
            platform: entry.platform.clone(),
            genre: entry.genre.clone(),
            cover_url: entry.cover_url.clone(),
            rating: Some(i64::from(entry.rating)),
            hours_played: Some(entry.hours_played),
            completed: Some(entry.completed),
        }
    }
}

/// Clamp a submitted rating into the 0..=5 star range
fn clamp_rating(rating: i64) -> u8 {
    rating.clamp(0, i64::from(MAX_RATING)) as u8
}

/// Hours played cannot go negative
fn clamp_hours(hours: f64) -> f64 {
    if hours.is_finite() { hours.max(0.0) } else { 0.0 }
}

/// Empty free-text labels count as absent
fn normalize_label(label: Option<String>) -> Option<String> {
    label.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry() -> GameEntry {
        GameEntry {
            id: "abc123".to_string(),
            title: "Hollow Knight".to_string(),
            platform: Some("PC".to_string()),
            genre: Some("Metroidvania".to_string()),
            cover_url: None,
            rating: 5,
            hours_played: 120.0,
            completed: false,
        }
    }

    #[test]
    fn test_apply_merges_only_submitted_fields() {
        let mut entry = sample_entry();
        let draft = EntryDraft {
            id: Some(entry.id.clone()),
            hours_played: Some(10.0),
            ..Default::default()
        };

        entry.apply(&draft);

        assert_eq!(entry.hours_played, 10.0);
        assert_eq!(entry.title, "Hollow Knight");
        assert_eq!(entry.platform.as_deref(), Some("PC"));
        assert_eq!(entry.rating, 5);
        assert!(!entry.completed);
    }

    #[test]
    fn test_apply_clamps_rating() {
        let mut entry = sample_entry();

        entry.apply(&EntryDraft {
            rating: Some(9),
            ..Default::default()
        });
        assert_eq!(entry.rating, 5);

        entry.apply(&EntryDraft {
            rating: Some(-3),
            ..Default::default()
        });
        assert_eq!(entry.rating, 0);
    }

    #[test]
    fn test_apply_clamps_negative_hours() {
        let mut entry = sample_entry();
        entry.apply(&EntryDraft {
            hours_played: Some(-4.5),
            ..Default::default()
        });
        assert_eq!(entry.hours_played, 0.0);
    }

    #[test]
    fn test_empty_string_clears_optional_field() {
        let mut entry = sample_entry();
        entry.apply(&EntryDraft {
            genre: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(entry.genre, None);
    }

    #[test]
    fn test_from_draft_defaults() {
        let entry = GameEntry::from_draft("x1".to_string(), &EntryDraft::default());

        assert_eq!(entry.id, "x1");
        assert_eq!(entry.title, "");
        assert_eq!(entry.platform, None);
        assert_eq!(entry.rating, 0);
        assert_eq!(entry.hours_played, 0.0);
        assert!(!entry.completed);
    }

    #[test]
    fn test_draft_roundtrip_from_entry() {
        let entry = sample_entry();
        let draft = EntryDraft::from(&entry);
        let rebuilt = GameEntry::from_draft(entry.id.clone(), &draft);
        assert_eq!(rebuilt, entry);
    }

    #[test]
    fn test_wire_field_names_are_camel_case() {
        let entry = GameEntry {
            cover_url: Some("https://example.com/cover.png".to_string()),
            hours_played: 2.5,
            ..sample_entry()
        };
        let json = serde_json::to_value(&entry).unwrap();

        assert!(json.get("coverUrl").is_some());
        assert!(json.get("hoursPlayed").is_some());
        assert!(json.get("cover_url").is_none());
    }

    #[test]
    fn test_draft_deserializes_partial_payload() {
        let draft: EntryDraft =
            serde_json::from_str(r#"{"id":"abc123","hoursPlayed":10}"#).unwrap();
        assert_eq!(draft.id.as_deref(), Some("abc123"));
        assert_eq!(draft.hours_played, Some(10.0));
        assert_eq!(draft.title, None);
    }
}
