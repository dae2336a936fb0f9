use std::io::Write;

use anyhow::Result;
use chrono::Local;
use reminders_core::format::{reminder_records, write_json_lines};
use reminders_core::query::{fetch_reminders, resolve_collection};
use reminders_core::{CollectionKind, Reminder, ReminderMode, Scope, Store};

/// Dated reminders across every list.
pub fn upcoming(store: &dyn Store, horizon_days: Option<u32>, out: &mut impl Write) -> Result<()> {
    let reminders = fetch_reminders(store, &Scope::All, horizon_days, ReminderMode::Dated)?;
    print_reminders(&reminders, out)
}

/// Dated reminders on one list.
pub fn list(
    store: &dyn Store,
    list_name: &str,
    horizon_days: Option<u32>,
    out: &mut impl Write,
) -> Result<()> {
    let collection = resolve_collection(store, list_name, CollectionKind::Reminders)?;
    let reminders = fetch_reminders(
        store,
        &Scope::One(collection),
        horizon_days,
        ReminderMode::Dated,
    )?;
    print_reminders(&reminders, out)
}

/// Reminders without a due date on one list.
pub fn anytime(store: &dyn Store, list_name: &str, out: &mut impl Write) -> Result<()> {
    let collection = resolve_collection(store, list_name, CollectionKind::Reminders)?;
    let reminders = fetch_reminders(store, &Scope::One(collection), None, ReminderMode::Anytime)?;
    print_reminders(&reminders, out)
}

fn print_reminders(reminders: &[Reminder], out: &mut impl Write) -> Result<()> {
    write_json_lines(out, &reminder_records(reminders, Local::now()))?;
    Ok(())
}
