//! Pattern library.
//!
//! [`PatternLibrary`] presents the built-in patterns followed by the user's
//! own. Only user entries can be edited or deleted; the check is made on the
//! [`PatternId`] variant, independently of whatever the UI offers. The user
//! set is written back to a [`KeyValueStore`] after every mutation and read
//! once when the library opens.

mod builtin;
mod entry;
mod storage;

pub use builtin::builtin_patterns;
pub use entry::{
    DEFAULT_CATEGORY, PatternEntry, PatternFields, PatternId, USER_CATEGORY, USER_ID_PREFIX,
};
pub use storage::{FileStore, KeyValueStore, MemoryStore};

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Deserialize;
use tracing::{debug, error, info, warn};

use crate::config::LibraryConfig;
use crate::error::{LabError, Result};

/// Default storage key for the user pattern set.
pub const DEFAULT_STORAGE_KEY: &str = "customPatterns";

/// Entries sharing a category, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup<'a> {
    /// Category name.
    pub name: &'a str,
    /// Entries in library order.
    pub entries: Vec<&'a PatternEntry>,
}

/// Shape accepted by [`PatternLibrary::import_many`]. Incoming ids are ignored.
#[derive(Debug, Deserialize)]
struct ImportRecord {
    name: String,
    pattern: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    category: Option<String>,
}

/// Built-in and user patterns with provenance-checked mutation.
pub struct PatternLibrary {
    builtins: Vec<PatternEntry>,
    user: Vec<PatternEntry>,
    storage: Box<dyn KeyValueStore>,
    key: String,
}

impl PatternLibrary {
    /// Open the library over `storage`, loading user entries from `key`.
    ///
    /// Missing or unreadable data yields an empty user set.
    #[must_use]
    pub fn open(storage: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let user = load_user_entries(storage.as_ref(), &key);
        debug!(key = %key, user_entries = user.len(), "Pattern library opened");
        let mut library = Self {
            builtins: builtin_patterns().to_vec(),
            user,
            storage,
            key,
        };
        if library.adopt_stored_entries() > 0 {
            library.persist();
        }
        library
    }

    /// Open the library as described by `config`: a [`FileStore`] when a
    /// directory is configured, otherwise in-memory storage.
    #[must_use]
    pub fn from_config(config: &LibraryConfig) -> Self {
        let storage: Box<dyn KeyValueStore> = match &config.storage_dir {
            Some(dir) => Box::new(FileStore::new(dir)),
            None => Box::new(MemoryStore::new()),
        };
        Self::open(storage, config.storage_key.clone())
    }

    /// Built-in entries.
    #[must_use]
    pub fn builtin_entries(&self) -> &[PatternEntry] {
        &self.builtins
    }

    /// User entries.
    #[must_use]
    pub fn user_entries(&self) -> &[PatternEntry] {
        &self.user
    }

    /// Every entry: built-ins first, then user entries.
    pub fn entries(&self) -> impl Iterator<Item = &PatternEntry> {
        self.builtins.iter().chain(self.user.iter())
    }

    /// Total number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.builtins.len() + self.user.len()
    }

    /// Check if the library has no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up an entry by id.
    #[must_use]
    pub fn get(&self, id: &PatternId) -> Option<&PatternEntry> {
        self.entries().find(|e| &e.id == id)
    }

    /// Filter by a case-insensitive query and group by category.
    ///
    /// An empty or missing query keeps every entry. Categories appear in the
    /// order their first entry does.
    #[must_use]
    pub fn list(&self, query: Option<&str>) -> Vec<CategoryGroup<'_>> {
        let needle = query.filter(|q| !q.is_empty()).map(str::to_lowercase);
        let mut groups: Vec<CategoryGroup<'_>> = Vec::new();

        for entry in self.entries() {
            if needle.as_deref().is_some_and(|n| !entry.matches_query(n)) {
                continue;
            }
            let category = entry.category();
            match groups.iter_mut().find(|g| g.name == category) {
                Some(group) => group.entries.push(entry),
                None => groups.push(CategoryGroup {
                    name: category,
                    entries: vec![entry],
                }),
            }
        }

        groups
    }

    /// Add a user entry. Returns its id, or `None` if name or pattern is empty.
    pub fn create(&mut self, fields: PatternFields) -> Option<PatternId> {
        if !fields.is_complete() {
            debug!("Rejected pattern without name or pattern text");
            return None;
        }
        let id = self.fresh_id();
        let category = fields
            .category
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| USER_CATEGORY.to_string());

        self.user.push(PatternEntry {
            id: id.clone(),
            name: fields.name,
            pattern: fields.pattern,
            description: fields.description,
            category: Some(category),
        });
        self.persist();
        Some(id)
    }

    /// Replace the fields of a user entry. Returns `false` for built-in or unknown ids.
    pub fn update(&mut self, id: &PatternId, fields: PatternFields) -> bool {
        let PatternId::User(_) = id else {
            debug!(id = %id, "Refused to update built-in pattern");
            return false;
        };
        if !fields.is_complete() {
            return false;
        }
        let Some(entry) = self.user.iter_mut().find(|e| &e.id == id) else {
            return false;
        };
        entry.apply(fields);
        self.persist();
        true
    }

    /// Remove a user entry. Returns `false` for built-in or unknown ids.
    pub fn delete(&mut self, id: &PatternId) -> bool {
        let PatternId::User(_) = id else {
            debug!(id = %id, "Refused to delete built-in pattern");
            return false;
        };
        let before = self.user.len();
        self.user.retain(|e| &e.id != id);
        if self.user.len() == before {
            return false;
        }
        self.persist();
        true
    }

    /// Serialize the user set as a JSON array.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn export_all(&self) -> Result<String> {
        let json = serde_json::to_string_pretty(&self.user)?;
        info!(entries = self.user.len(), "Exported user patterns");
        Ok(json)
    }

    /// Append every entry of a JSON array to the user set, with fresh ids.
    ///
    /// The whole payload is checked first; anything malformed rejects the
    /// import and leaves the library untouched. Existing entries are not
    /// deduplicated against. Returns the number of entries added.
    ///
    /// # Errors
    ///
    /// Returns [`LabError::ImportFormat`] if the payload is not a well-formed list.
    pub fn import_many(&mut self, payload: &str) -> Result<usize> {
        let records: Vec<ImportRecord> = serde_json::from_str(payload)
            .map_err(|e| LabError::import_format(format!("expected a list of patterns: {e}")))?;

        if let Some(position) = records
            .iter()
            .position(|r| r.name.is_empty() || r.pattern.is_empty())
        {
            return Err(LabError::import_format(format!(
                "entry {position} is missing a name or pattern"
            )));
        }

        let count = records.len();
        for record in records {
            let id = self.fresh_id();
            self.user.push(PatternEntry {
                id,
                name: record.name,
                pattern: record.pattern,
                description: record.description,
                category: record.category.filter(|c| !c.is_empty()),
            });
        }
        self.persist();
        info!(entries = count, "Imported user patterns");
        Ok(count)
    }

    /// Give a user id to every stored entry whose id lacks the user prefix,
    /// so it stays editable. Returns how many entries were re-identified.
    fn adopt_stored_entries(&mut self) -> usize {
        let mut adopted = 0;
        for index in 0..self.user.len() {
            if self.user[index].id.is_user() {
                continue;
            }
            let id = self.fresh_id();
            warn!(
                stored = %self.user[index].id,
                assigned = %id,
                "Stored user pattern had a non-user id; re-identified"
            );
            self.user[index].id = id;
            adopted += 1;
        }
        adopted
    }

    fn fresh_id(&self) -> PatternId {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_millis());
        loop {
            let suffix = rand::random::<u32>() & 0x00ff_ffff;
            let id = PatternId::parse(format!("{USER_ID_PREFIX}{millis}-{suffix:06x}"));
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    /// Write the user set back to storage. Failures are logged, not returned.
    fn persist(&mut self) {
        let result = serde_json::to_string(&self.user)
            .map_err(LabError::from)
            .and_then(|json| self.storage.set(&self.key, &json));
        if let Err(e) = result {
            error!(key = %self.key, error = %e, "Failed to persist user patterns");
        }
    }
}

impl std::fmt::Debug for PatternLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternLibrary")
            .field("builtins", &self.builtins.len())
            .field("user", &self.user)
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

fn load_user_entries(storage: &dyn KeyValueStore, key: &str) -> Vec<PatternEntry> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!(key, error = %e, "Could not read user patterns; starting empty");
            return Vec::new();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(key, error = %e, "Stored user patterns are corrupt; starting empty");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> PatternLibrary {
        PatternLibrary::open(Box::new(MemoryStore::new()), DEFAULT_STORAGE_KEY)
    }

    #[test]
    fn create_defaults_category_and_marks_provenance() {
        let mut lib = library();
        let id = lib.create(PatternFields::new("Hex", "0x[0-9a-f]+")).unwrap();
        assert!(id.is_user());
        assert!(id.as_str().starts_with(USER_ID_PREFIX));
        assert_eq!(lib.get(&id).unwrap().category(), USER_CATEGORY);
    }

    #[test]
    fn create_rejects_incomplete_fields() {
        let mut lib = library();
        assert!(lib.create(PatternFields::new("", "x")).is_none());
        assert!(lib.create(PatternFields::new("x", "")).is_none());
        assert!(lib.user_entries().is_empty());
    }

    #[test]
    fn generated_ids_are_unique() {
        let mut lib = library();
        let a = lib.create(PatternFields::new("a", "a")).unwrap();
        let b = lib.create(PatternFields::new("b", "b")).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn stored_entries_without_user_prefix_become_editable() {
        let mut store = MemoryStore::new();
        store
            .set(
                DEFAULT_STORAGE_KEY,
                r#"[{"id":"legacy","name":"L","pattern":"l"},{"id":"custom-1","name":"K","pattern":"k"}]"#,
            )
            .unwrap();
        let mut lib = PatternLibrary::open(Box::new(store), DEFAULT_STORAGE_KEY);

        assert!(lib.user_entries().iter().all(|e| e.id.is_user()));
        assert_eq!(lib.user_entries()[1].id, PatternId::parse("custom-1"));
        let adopted = lib.user_entries()[0].id.clone();
        assert_ne!(adopted.as_str(), "legacy");
        assert!(lib.update(&adopted, PatternFields::new("L2", "l+")));
        assert!(lib.delete(&adopted));
        assert_eq!(lib.user_entries().len(), 1);
    }

    #[test]
    fn builtin_entries_are_immutable() {
        let mut lib = library();
        let id = PatternId::builtin("email");
        assert!(!lib.update(&id, PatternFields::new("Mine", "x")));
        assert!(!lib.delete(&id));
        assert_eq!(lib.get(&id).unwrap().name, "Email Address");
    }

    #[test]
    fn list_groups_in_first_seen_order() {
        let mut lib = library();
        lib.create(PatternFields::new("Mine", "m").category("Web"));
        let groups = lib.list(None);
        let names: Vec<&str> = groups.iter().map(|g| g.name).collect();
        assert_eq!(names[0], "Validation");
        assert_eq!(names.iter().filter(|n| **n == "Web").count(), 1);
        let web = groups.iter().find(|g| g.name == "Web").unwrap();
        assert_eq!(web.entries.last().unwrap().name, "Mine");
    }

    #[test]
    fn empty_query_lists_everything() {
        let lib = library();
        let total: usize = lib.list(Some("")).iter().map(|g| g.entries.len()).sum();
        assert_eq!(total, lib.len());
    }

    #[test]
    fn corrupt_storage_loads_empty() {
        let store = MemoryStore::with_value(DEFAULT_STORAGE_KEY, "{not json");
        let lib = PatternLibrary::open(Box::new(store), DEFAULT_STORAGE_KEY);
        assert!(lib.user_entries().is_empty());
        assert!(!lib.builtin_entries().is_empty());
    }

    #[test]
    fn import_rejects_records_without_pattern() {
        let mut lib = library();
        let err = lib
            .import_many(r#"[{"name":"ok","pattern":"x"},{"name":"bad","pattern":""}]"#)
            .unwrap_err();
        assert!(err.is_import_error());
        assert!(lib.user_entries().is_empty());
    }
}
