use std::io::Write;

use anyhow::Result;
use reminders_core::query::{add_event, add_reminder};
use reminders_core::{NewEvent, NewReminder, Store};

pub fn reminder(
    store: &dyn Store,
    list_name: &str,
    new: NewReminder,
    out: &mut impl Write,
) -> Result<()> {
    let reminder = add_reminder(store, list_name, new)?;
    writeln!(
        out,
        "Added '{}' to '{}'",
        reminder.display_title(),
        reminder.collection.title
    )?;

    Ok(())
}

pub fn event(
    store: &dyn Store,
    calendar_name: &str,
    new: NewEvent,
    out: &mut impl Write,
) -> Result<()> {
    let event = add_event(store, calendar_name, new)?;
    writeln!(
        out,
        "Added '{}' to '{}'",
        event.display_title(),
        event.collection.title
    )?;

    Ok(())
}
