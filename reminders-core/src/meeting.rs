//! Video-conferencing link detection for events.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use crate::event::Event;

/// Tried in order within each field; earlier patterns win.
const MEETING_PATTERNS: [&str; 4] = [
    // Teams meetup-join
    r"https://teams\.microsoft\.com/l/meetup-join/[a-zA-Z0-9/%?&amp;=._-]+",
    // Teams live
    r"https://teams\.live\.com/meet/[a-z0-9]+",
    // Zoom with password
    r"https://[a-z0-9]+\.zoom\.us/[a-z0-9_.-]+/\d+\?pwd=[a-z0-9]+",
    // Zoom, password optional
    r"https://([a-z0-9]+\.)?zoom\.us/j/\d+(\?pwd=[a-z0-9]+)?",
];

static MEETING_REGEXES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    MEETING_PATTERNS
        .iter()
        .filter_map(|pattern| {
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .ok()
        })
        .collect()
});

/// First meeting link found in the event's URL, then its location, then
/// its notes. Empty when there is none.
pub fn extract_meeting_url(event: &Event) -> String {
    let fields = [
        event.url.as_deref(),
        event.location.as_deref(),
        event.notes.as_deref(),
    ];

    fields
        .into_iter()
        .flatten()
        .find_map(first_match)
        .unwrap_or_default()
}

fn first_match(text: &str) -> Option<String> {
    MEETING_REGEXES
        .iter()
        .find_map(|re| re.find(text))
        .map(|m| m.as_str().to_string())
}
