use std::io::Write;

use anyhow::Result;
use reminders_core::query::{complete_at, complete_by_id, resolve_collection};
use reminders_core::{CollectionKind, ReminderMode, Scope, Store};

/// List name that selects every writable list at once.
pub const ALL_REMINDERS: &str = "RMindAllReminders";

/// Complete the reminder at `index` in the listing `show`, `anytime` or
/// `upcoming` (via [`ALL_REMINDERS`]) printed.
pub fn at_index(
    store: &dyn Store,
    list_name: &str,
    index: i64,
    anytime: bool,
    horizon_days: Option<u32>,
    out: &mut impl Write,
) -> Result<()> {
    let scope = if list_name == ALL_REMINDERS {
        Scope::All
    } else {
        Scope::One(resolve_collection(store, list_name, CollectionKind::Reminders)?)
    };
    let mode = if anytime {
        ReminderMode::Anytime
    } else {
        ReminderMode::Dated
    };

    let reminder = complete_at(store, &scope, mode, horizon_days, index)?;
    writeln!(out, "Completed '{}'", reminder.display_title())?;

    Ok(())
}

pub fn by_id(store: &dyn Store, id: &str, out: &mut impl Write) -> Result<()> {
    let reminder = complete_by_id(store, id)?;
    writeln!(out, "Completed '{}'", reminder.display_title())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{new_list, output, temp_store};
    use chrono::{Duration, Local};
    use reminders_core::query::{add_reminder, fetch_reminders};
    use reminders_core::{CalendarTime, NewReminder};

    fn add(store: &dyn Store, list: &str, title: &str, days: Option<i64>) -> String {
        let mut new = NewReminder::new(title);
        new.due = days.map(|d| {
            CalendarTime::DateTimeFloating((Local::now() + Duration::days(d)).naive_local())
        });
        add_reminder(store, list, new).unwrap().id
    }

    fn titles(store: &dyn Store, scope: &Scope, mode: ReminderMode) -> Vec<String> {
        fetch_reminders(store, scope, None, mode)
            .unwrap()
            .into_iter()
            .map(|r| r.display_title().to_string())
            .collect()
    }

    #[test]
    fn completes_by_index_on_list() {
        let (_dir, store) = temp_store();
        new_list(&store, "Errands");
        add(&store, "Errands", "Later", Some(2));
        add(&store, "Errands", "Sooner", Some(1));

        let mut out = Vec::new();
        at_index(&store, "errands", 0, false, None, &mut out).unwrap();

        assert_eq!(output(out), "Completed 'Sooner'\n");
        assert_eq!(titles(&store, &Scope::All, ReminderMode::Dated), vec!["Later"]);
    }

    #[test]
    fn completes_anytime_reminder() {
        let (_dir, store) = temp_store();
        new_list(&store, "Home");
        add(&store, "Home", "Dated", Some(1));
        add(&store, "Home", "Whenever", None);

        let mut out = Vec::new();
        at_index(&store, "Home", 0, true, None, &mut out).unwrap();

        assert_eq!(output(out), "Completed 'Whenever'\n");
        assert!(titles(&store, &Scope::All, ReminderMode::Anytime).is_empty());
    }

    #[test]
    fn all_reminders_name_spans_every_list() {
        let (_dir, store) = temp_store();
        new_list(&store, "Errands");
        new_list(&store, "Work");
        add(&store, "Work", "Report", Some(1));
        add(&store, "Errands", "Groceries", Some(2));

        let mut out = Vec::new();
        at_index(&store, ALL_REMINDERS, 1, false, None, &mut out).unwrap();

        assert_eq!(output(out), "Completed 'Groceries'\n");
        assert_eq!(titles(&store, &Scope::All, ReminderMode::Dated), vec!["Report"]);
    }

    #[test]
    fn out_of_range_index_names_the_list() {
        let (_dir, store) = temp_store();
        new_list(&store, "Errands");
        add(&store, "Errands", "Only", Some(1));

        let err = at_index(&store, "Errands", 1, false, None, &mut Vec::<u8>::new()).unwrap_err();
        assert_eq!(err.to_string(), "No reminder at index 1 on Errands");

        let err = at_index(&store, "Errands", -1, false, None, &mut Vec::<u8>::new()).unwrap_err();
        assert_eq!(err.to_string(), "No reminder at index -1 on Errands");

        assert_eq!(titles(&store, &Scope::All, ReminderMode::Dated), vec!["Only"]);
    }

    #[test]
    fn completes_by_identifier() {
        let (_dir, store) = temp_store();
        new_list(&store, "Errands");
        let id = add(&store, "Errands", "Call bank", None);

        let mut out = Vec::new();
        by_id(&store, &id, &mut out).unwrap();
        assert_eq!(output(out), "Completed 'Call bank'\n");

        let err = by_id(&store, "no-such-id", &mut Vec::<u8>::new()).unwrap_err();
        assert_eq!(err.to_string(), "No reminder found matching 'no-such-id'");
    }
}
