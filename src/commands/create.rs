use std::io::Write;

use anyhow::Result;
use reminders_core::CollectionKind;
use reminders_core::store::LocalStore;

pub fn run(store: &LocalStore, title: &str, calendar: bool, out: &mut impl Write) -> Result<()> {
    let kind = if calendar {
        CollectionKind::Events
    } else {
        CollectionKind::Reminders
    };

    let collection = store.create_collection(title, kind, false)?;
    let noun = match kind {
        CollectionKind::Reminders => "list",
        CollectionKind::Events => "calendar",
    };
    writeln!(out, "Created {} '{}'", noun, collection.title)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{output, temp_store};
    use reminders_core::query::list_collections;

    #[test]
    fn creates_writable_collection_of_the_requested_kind() {
        let (_dir, store) = temp_store();

        let mut out = Vec::new();
        run(&store, "Groceries", false, &mut out).unwrap();
        assert_eq!(output(out), "Created list 'Groceries'\n");

        let mut out = Vec::new();
        run(&store, "Family", true, &mut out).unwrap();
        assert_eq!(output(out), "Created calendar 'Family'\n");

        let lists = list_collections(&store, CollectionKind::Reminders).unwrap();
        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].title, "Groceries");
        assert!(lists[0].writable);
    }
}
