use std::io::Write;

use anyhow::Result;
use reminders_core::query::list_collections;
use reminders_core::{CollectionKind, Store};

/// Print writable list or calendar titles, one per line.
pub fn run(store: &dyn Store, kind: CollectionKind, out: &mut impl Write) -> Result<()> {
    for collection in list_collections(store, kind)? {
        writeln!(out, "{}", collection.title)?;
    }

    Ok(())
}
