//! Reshaping of raw discovery search responses into compact event rows.
//!
//! The upstream payload is deeply nested and inconsistently populated, so
//! everything here walks a [`serde_json::Value`] and degrades missing or
//! malformed fields to an empty string (or [`GENRE_UNAVAILABLE`]) instead of
//! failing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Genre reported when no classification yields a usable label.
pub const GENRE_UNAVAILABLE: &str = "N/A";

/// Classification sub-fields consulted for a genre label, highest priority first.
pub const GENRE_LABEL_FIELDS: [&str; 5] = ["segment", "genre", "subGenre", "type", "subtype"];

/// Placeholder label the provider uses for unset classification levels.
const UNDEFINED_LABEL: &str = "undefined";

/// One event row as returned to the search UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedEvent {
    pub id: String,
    pub name: String,
    /// `"YYYY-MM-DD HH:MM:SS"`, date only, or empty.
    pub date_time: String,
    pub genre: String,
    pub venue: String,
    /// URL of the smallest image.
    pub icon: String,
}

/// Maps a discovery search response to normalized events, preserving order.
///
/// Events are read from `_embedded.events`; any other top-level shape yields
/// an empty list.
#[must_use]
pub fn map_events_response(data: &Value) -> Vec<NormalizedEvent> {
    data.get("_embedded")
        .and_then(|embedded| embedded.get("events"))
        .and_then(Value::as_array)
        .map(|events| events.iter().map(normalize_event).collect())
        .unwrap_or_default()
}

/// Normalizes a single raw event.
#[must_use]
pub fn normalize_event(event: &Value) -> NormalizedEvent {
    NormalizedEvent {
        id: str_field(event, "id").to_string(),
        name: str_field(event, "name").trim().to_string(),
        date_time: date_time(event),
        genre: genre(event),
        venue: venue(event),
        icon: icon(event),
    }
}

/// Extracts a genre label from one classification entry.
///
/// Walks [`GENRE_LABEL_FIELDS`] in order and returns the first `name` that is
/// non-empty and not `"undefined"` in any casing.
#[must_use]
pub fn genre_label(classification: &Value) -> String {
    GENRE_LABEL_FIELDS
        .iter()
        .find_map(|field| {
            classification
                .get(field)
                .and_then(|level| level.get("name"))
                .and_then(Value::as_str)
                .filter(|name| !name.is_empty() && !name.eq_ignore_ascii_case(UNDEFINED_LABEL))
        })
        .unwrap_or(GENRE_UNAVAILABLE)
        .to_string()
}

fn str_field<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or_default()
}

fn non_empty_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

fn date_time(event: &Value) -> String {
    let Some(start) = event.get("dates").and_then(|dates| dates.get("start")) else {
        return String::new();
    };

    match (
        non_empty_str(start, "localDate"),
        non_empty_str(start, "localTime"),
    ) {
        (Some(date), Some(time)) => format!("{date} {time}"),
        (Some(date), None) => date.to_string(),
        (None, _) => String::new(),
    }
}

/// Primary classification first, otherwise the first listed one.
fn genre(event: &Value) -> String {
    let classifications = event
        .get("classifications")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let chosen = classifications
        .iter()
        .find(|c| c.get("primary").and_then(Value::as_bool) == Some(true))
        .or_else(|| classifications.first());

    chosen.map_or_else(|| GENRE_UNAVAILABLE.to_string(), genre_label)
}

fn venue(event: &Value) -> String {
    event
        .get("_embedded")
        .and_then(|embedded| embedded.get("venues"))
        .and_then(Value::as_array)
        .and_then(|venues| venues.first())
        .map(|venue| str_field(venue, "name").to_string())
        .unwrap_or_default()
}

fn icon(event: &Value) -> String {
    event
        .get("images")
        .and_then(Value::as_array)
        .and_then(|images| {
            images
                .iter()
                .min_by(|a, b| image_area(a).total_cmp(&image_area(b)))
        })
        .map(|image| str_field(image, "url").to_string())
        .unwrap_or_default()
}

/// Missing, non-numeric, or zero dimensions count as 1.
fn image_area(image: &Value) -> f64 {
    let dimension = |key: &str| {
        image
            .get(key)
            .and_then(Value::as_f64)
            .filter(|v| v.abs() > 0.0)
            .unwrap_or(1.0)
    };
    dimension("width") * dimension("height")
}
