//! Local ICS directory store.
//!
//! Layout:
//!
//! ```text
//! ~/reminders/
//!   groceries/
//!     .reminders/config.toml     # title, kind, read_only
//!     buy-milk.ics               # one VTODO per file
//!   work/
//!     .reminders/config.toml     # kind = "events"
//!     2025-03-20T1500__standup.ics
//! ```
//!
//! Store order is collection directory name, then file name.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::collection::{Collection, CollectionKind};
use crate::config::CollectionConfig;
use crate::error::{RemindersError, RemindersResult};
use crate::event::Event;
use crate::ics::{generate_event_ics, generate_todo_ics, parse_event, parse_todo, parse_uid};
use crate::reminder::Reminder;
use crate::store::{EventPredicate, ReminderPredicate, Store};
use crate::time::CalendarTime;

#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        LocalStore { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create a new collection directory with a unique slug.
    pub fn create_collection(
        &self,
        title: &str,
        kind: CollectionKind,
        read_only: bool,
    ) -> RemindersResult<Collection> {
        let base = slug_or(title, "list");

        let id = (1..=100)
            .map(|n| if n == 1 { base.clone() } else { format!("{}-{}", base, n) })
            .find(|candidate| !self.root.join(candidate).exists())
            .ok_or_else(|| {
                RemindersError::Config(format!("Too many collection name collisions for '{base}'"))
            })?;

        let dir = self.root.join(&id);
        let config = CollectionConfig {
            title: Some(title.to_string()),
            kind,
            read_only,
        };
        config.save(&dir)?;
        debug!(collection = %id, %kind, "created collection");

        Ok(to_collection(&id, &config))
    }

    /// Every collection directory with its parsed config, sorted by name.
    fn collection_dirs(&self) -> RemindersResult<Vec<(PathBuf, Collection)>> {
        let Ok(entries) = std::fs::read_dir(&self.root) else {
            return Ok(Vec::new());
        };

        let mut dirs: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_dir() && CollectionConfig::exists(path))
            .collect();
        dirs.sort();

        let mut collections = Vec::with_capacity(dirs.len());
        for dir in dirs {
            let Some(id) = dir.file_name().and_then(|n| n.to_str()).map(str::to_string) else {
                continue;
            };
            match CollectionConfig::load(&dir) {
                Ok(config) => collections.push((dir, to_collection(&id, &config))),
                Err(e) => {
                    warn!(path = %dir.display(), error = %e, "skipping unreadable collection")
                }
            }
        }

        Ok(collections)
    }

    fn collection_dir(&self, id: &str) -> RemindersResult<Option<(PathBuf, Collection)>> {
        Ok(self
            .collection_dirs()?
            .into_iter()
            .find(|(_, collection)| collection.id == id))
    }

    fn reminders_in(dir: &Path, collection: &Collection) -> RemindersResult<Vec<Reminder>> {
        Ok(item_files(dir)?
            .into_iter()
            .filter_map(|path| {
                let parsed = std::fs::read_to_string(&path)
                    .ok()
                    .and_then(|content| parse_todo(&content, collection));
                if parsed.is_none() {
                    warn!(path = %path.display(), "skipping unreadable reminder file");
                }
                parsed
            })
            .collect())
    }

    fn events_in(dir: &Path, collection: &Collection) -> RemindersResult<Vec<Event>> {
        Ok(item_files(dir)?
            .into_iter()
            .filter_map(|path| {
                let parsed = std::fs::read_to_string(&path)
                    .ok()
                    .and_then(|content| parse_event(&content, collection));
                if parsed.is_none() {
                    warn!(path = %path.display(), "skipping unreadable event file");
                }
                parsed
            })
            .collect())
    }

    /// Writable directory for `collection`, or a message explaining why not.
    fn writable_dir(&self, collection: &Collection) -> Result<PathBuf, String> {
        let (dir, current) = self
            .collection_dir(&collection.id)
            .map_err(|e| e.to_string())?
            .ok_or_else(|| format!("list '{}' does not exist", collection.title))?;

        if !current.writable {
            return Err(format!("list '{}' is read-only", current.title));
        }

        Ok(dir)
    }
}

impl Store for LocalStore {
    fn request_access(&self, kind: CollectionKind) -> RemindersResult<bool> {
        match std::fs::create_dir_all(&self.root) {
            Ok(()) => {
                debug!(root = %self.root.display(), %kind, "access granted");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn collections(&self, kind: CollectionKind) -> RemindersResult<Vec<Collection>> {
        Ok(self
            .collection_dirs()?
            .into_iter()
            .map(|(_, collection)| collection)
            .filter(|collection| collection.kind == kind)
            .collect())
    }

    fn query_reminders(&self, predicate: &ReminderPredicate) -> RemindersResult<Vec<Reminder>> {
        let mut reminders = Vec::new();

        for (dir, collection) in self.collection_dirs()? {
            if collection.kind != CollectionKind::Reminders
                || !predicate.collections.contains(&collection.id)
            {
                continue;
            }
            reminders.extend(
                Self::reminders_in(&dir, &collection)?
                    .into_iter()
                    .filter(|r| predicate.matches(r)),
            );
        }

        debug!(count = reminders.len(), "queried reminders");
        Ok(reminders)
    }

    fn query_events(&self, predicate: &EventPredicate) -> RemindersResult<Vec<Event>> {
        let mut events = Vec::new();

        for (dir, collection) in self.collection_dirs()? {
            if collection.kind != CollectionKind::Events
                || !predicate.collections.contains(&collection.id)
            {
                continue;
            }
            events.extend(
                Self::events_in(&dir, &collection)?
                    .into_iter()
                    .filter(|e| predicate.matches(e)),
            );
        }

        debug!(count = events.len(), "queried events");
        Ok(events)
    }

    fn lookup_reminder(&self, id: &str) -> RemindersResult<Option<Reminder>> {
        for (dir, collection) in self.collection_dirs()? {
            if collection.kind != CollectionKind::Reminders {
                continue;
            }
            if let Some(found) = Self::reminders_in(&dir, &collection)?
                .into_iter()
                .find(|r| r.id == id)
            {
                return Ok(Some(found));
            }
        }

        Ok(None)
    }

    fn save_reminder(&self, reminder: &Reminder) -> RemindersResult<()> {
        let dir = self
            .writable_dir(&reminder.collection)
            .map_err(RemindersError::reminder_save)?;
        let content = generate_todo_ics(reminder)?;

        let path = match file_for_uid(&dir, &reminder.id) {
            Some(existing) => existing,
            None => unique_path(&dir, &slug_or(reminder.display_title(), "reminder"))
                .map_err(RemindersError::reminder_save)?,
        };

        std::fs::write(&path, content).map_err(RemindersError::reminder_save)?;
        debug!(path = %path.display(), id = %reminder.id, "saved reminder");
        Ok(())
    }

    fn save_event(&self, event: &Event) -> RemindersResult<()> {
        let dir = self
            .writable_dir(&event.collection)
            .map_err(RemindersError::event_save)?;
        let content = generate_event_ics(event)?;

        let path = match file_for_uid(&dir, &event.id) {
            Some(existing) => existing,
            None => unique_path(&dir, &event_base_name(event)).map_err(RemindersError::event_save)?,
        };

        std::fs::write(&path, content).map_err(RemindersError::event_save)?;
        debug!(path = %path.display(), id = %event.id, "saved event");
        Ok(())
    }
}

fn to_collection(id: &str, config: &CollectionConfig) -> Collection {
    Collection {
        id: id.to_string(),
        title: config.title.clone().unwrap_or_else(|| id.to_string()),
        kind: config.kind,
        writable: !config.read_only,
    }
}

/// `.ics` files in a collection directory, sorted by file name.
fn item_files(dir: &Path) -> RemindersResult<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|e| e == "ics"))
        .collect();
    files.sort();
    Ok(files)
}

fn file_for_uid(dir: &Path, uid: &str) -> Option<PathBuf> {
    item_files(dir).ok()?.into_iter().find(|path| {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|content| parse_uid(&content))
            .is_some_and(|found| found == uid)
    })
}

/// `<base>.ics`, or `<base>-2.ics`, `<base>-3.ics`... on collision.
fn unique_path(dir: &Path, base: &str) -> Result<PathBuf, String> {
    (1..=100)
        .map(|n| {
            if n == 1 {
                dir.join(format!("{}.ics", base))
            } else {
                dir.join(format!("{}-{}.ics", base, n))
            }
        })
        .find(|path| !path.exists())
        .ok_or_else(|| format!("Too many filename collisions for {}", base))
}

/// Timed events: `YYYY-MM-DDTHHMM__slug`, all-day events: `YYYY-MM-DD__slug`
fn event_base_name(event: &Event) -> String {
    let date = match &event.start {
        CalendarTime::Date(d) => d.format("%Y-%m-%d").to_string(),
        CalendarTime::DateTimeUtc(dt) => dt.format("%Y-%m-%dT%H%M").to_string(),
        CalendarTime::DateTimeFloating(dt) => dt.format("%Y-%m-%dT%H%M").to_string(),
        CalendarTime::DateTimeZoned { datetime, .. } => {
            datetime.format("%Y-%m-%dT%H%M").to_string()
        }
    };

    format!("{}__{}", date, slug_or(event.display_title(), "event"))
}

fn slug_or(text: &str, fallback: &str) -> String {
    let slug: String = slug::slugify(text).chars().take(50).collect();
    if slug.is_empty() {
        fallback.to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminder::NewReminder;
    use chrono::{Duration, Local};

    fn setup() -> (tempfile::TempDir, LocalStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn collections_are_filtered_by_kind_and_sorted() {
        let (_dir, store) = setup();
        store.create_collection("Work", CollectionKind::Reminders, false).unwrap();
        store.create_collection("Errands", CollectionKind::Reminders, false).unwrap();
        store.create_collection("Family", CollectionKind::Events, false).unwrap();

        let lists: Vec<String> = store
            .collections(CollectionKind::Reminders)
            .unwrap()
            .into_iter()
            .map(|c| c.title)
            .collect();
        assert_eq!(lists, vec!["Errands", "Work"]);

        let calendars = store.collections(CollectionKind::Events).unwrap();
        assert_eq!(calendars.len(), 1);
        assert_eq!(calendars[0].id, "family");
    }

    #[test]
    fn colliding_titles_get_suffixed_ids() {
        let (_dir, store) = setup();
        let first = store.create_collection("Home", CollectionKind::Reminders, false).unwrap();
        let second = store.create_collection("home", CollectionKind::Events, false).unwrap();

        assert_eq!(first.id, "home");
        assert_eq!(second.id, "home-2");
    }

    #[test]
    fn saved_reminder_is_found_by_query_and_lookup() {
        let (_dir, store) = setup();
        let errands = store.create_collection("Errands", CollectionKind::Reminders, false).unwrap();

        let mut new = NewReminder::new("Buy milk");
        new.due = Some(CalendarTime::parse_input("2024-01-01 09:00").unwrap());
        let reminder = new.into_reminder(errands.clone());
        store.save_reminder(&reminder).unwrap();

        let predicate = ReminderPredicate {
            due_before: Some(Local::now() + Duration::days(5)),
            collections: vec![errands.id.clone()],
        };
        let found = store.query_reminders(&predicate).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title.as_deref(), Some("Buy milk"));

        let looked_up = store.lookup_reminder(&reminder.id).unwrap().unwrap();
        assert_eq!(looked_up.collection, errands);
    }

    #[test]
    fn completing_overwrites_the_same_file() {
        let (dir, store) = setup();
        let errands = store.create_collection("Errands", CollectionKind::Reminders, false).unwrap();
        let mut reminder = NewReminder::new("Buy milk").into_reminder(errands.clone());
        store.save_reminder(&reminder).unwrap();

        reminder.mark_completed();
        store.save_reminder(&reminder).unwrap();

        let files = item_files(&dir.path().join("errands")).unwrap();
        assert_eq!(files.len(), 1);

        let predicate = ReminderPredicate {
            due_before: None,
            collections: vec![errands.id],
        };
        assert!(store.query_reminders(&predicate).unwrap().is_empty());
        assert!(store.lookup_reminder(&reminder.id).unwrap().unwrap().completed);
    }

    #[test]
    fn same_title_reminders_do_not_clobber_each_other() {
        let (dir, store) = setup();
        let errands = store.create_collection("Errands", CollectionKind::Reminders, false).unwrap();

        store
            .save_reminder(&NewReminder::new("Call mum").into_reminder(errands.clone()))
            .unwrap();
        store
            .save_reminder(&NewReminder::new("Call mum").into_reminder(errands))
            .unwrap();

        let files = item_files(&dir.path().join("errands")).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().any(|f| f.ends_with("call-mum-2.ics")));
    }

    #[test]
    fn saving_into_read_only_collection_fails() {
        let (_dir, store) = setup();
        let shared = store.create_collection("Shared", CollectionKind::Reminders, true).unwrap();
        assert!(!shared.writable);

        let err = store
            .save_reminder(&NewReminder::new("Nope").into_reminder(shared))
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Failed to save reminder with error: list 'Shared' is read-only"
        );
    }

    #[test]
    fn unreadable_files_are_skipped() {
        let (dir, store) = setup();
        let errands = store.create_collection("Errands", CollectionKind::Reminders, false).unwrap();
        std::fs::write(dir.path().join("errands/garbage.ics"), "not ics").unwrap();
        store
            .save_reminder(&NewReminder::new("Real").into_reminder(errands.clone()))
            .unwrap();

        let predicate = ReminderPredicate {
            due_before: None,
            collections: vec![errands.id],
        };
        assert_eq!(store.query_reminders(&predicate).unwrap().len(), 1);
    }

    #[test]
    fn escaped_text_survives_a_save() {
        let (_dir, store) = setup();
        let errands = store.create_collection("Errands", CollectionKind::Reminders, false).unwrap();
        let title = r"Scan C:\new\docs, bread \ jam; later";

        let mut new = NewReminder::new(title);
        new.notes = Some("line one\nline two; with, punctuation \\ done".into());
        new.location = Some(r"Shelf A\B, row 3".into());
        let reminder = new.into_reminder(errands);
        store.save_reminder(&reminder).unwrap();

        let read = store.lookup_reminder(&reminder.id).unwrap().unwrap();
        assert_eq!(read.title.as_deref(), Some(title));
        assert_eq!(read.notes, reminder.notes);
        assert_eq!(read.location, reminder.location);
    }

    #[test]
    fn malformed_collection_config_is_skipped() {
        let (dir, store) = setup();
        store.create_collection("Errands", CollectionKind::Reminders, false).unwrap();
        store.create_collection("Broken", CollectionKind::Reminders, false).unwrap();
        std::fs::write(dir.path().join("broken/.reminders/config.toml"), "kind = [").unwrap();

        let lists: Vec<String> = store
            .collections(CollectionKind::Reminders)
            .unwrap()
            .into_iter()
            .map(|c| c.title)
            .collect();
        assert_eq!(lists, vec!["Errands"]);
    }

    #[test]
    fn access_creates_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path().join("nested/root"));

        assert!(store.request_access(CollectionKind::Reminders).unwrap());
        assert!(store.root().is_dir());
    }
}
