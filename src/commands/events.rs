use std::io::Write;

use anyhow::Result;
use reminders_core::format::{format_event, write_json_lines};
use reminders_core::query::{fetch_events, resolve_collection};
use reminders_core::{CollectionKind, Store};

/// Events in the next `horizon_days`, optionally on one calendar.
pub fn run(
    store: &dyn Store,
    calendar_name: Option<&str>,
    horizon_days: Option<u32>,
    out: &mut impl Write,
) -> Result<()> {
    let calendar = calendar_name
        .map(|name| resolve_collection(store, name, CollectionKind::Events))
        .transpose()?;

    let events = fetch_events(store, calendar.as_ref(), horizon_days)?;
    let records: Vec<_> = events.iter().map(format_event).collect();
    write_json_lines(out, &records)?;

    Ok(())
}
