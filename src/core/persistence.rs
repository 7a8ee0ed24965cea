//! Durable storage of the course collections and the JSON export document.
//!
//! The collections live in a string key-value store under [`ENROLLED_KEY`] and
//! [`BACKLOG_KEY`], each as a JSON array. [`PersistObserver`] mirrors every
//! committed change into the store.

use crate::core::models::Course;
use crate::core::state::{Action, PlannerState, StateObserver};
use crate::core::store::CourseStore;
use crate::{debug, error, warn};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use thiserror::Error;

/// Key holding the enrolled collection.
pub const ENROLLED_KEY: &str = "courses";
/// Key holding the backlog collection.
pub const BACKLOG_KEY: &str = "unadded";
/// Key holding the dark-mode preference (`"true"`/`"false"`).
pub const THEME_KEY: &str = "darkMode";

/// Errors raised at the storage and import boundary
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Reading or writing the backing store failed
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Data was not valid JSON for the course model
    #[error("invalid course data: {0}")]
    Json(#[from] serde_json::Error),

    /// An import document carried neither collection
    #[error("document has neither a \"courses\" nor an \"unadded\" field")]
    MissingCollections,
}

/// Durable string-valued key-value store.
pub trait KeyValueStore {
    /// Read a value; `Ok(None)` when the key was never written.
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

/// Key-value store keeping one `<key>.json` file per key in a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Use `dir` as the backing directory; it is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Backing directory
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        fs::create_dir_all(&self.dir)?;
        let target = self.path_for(key);
        // Write beside the target and rename so a crash never leaves half a file.
        let staging = target.with_extension("json.tmp");
        fs::write(&staging, value)?;
        fs::rename(&staging, &target)?;
        Ok(())
    }
}

/// In-memory key-value store. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

fn parse_courses(raw: &str) -> Result<Vec<Course>, PersistenceError> {
    let courses: Vec<Course> = serde_json::from_str(raw)?;
    Ok(courses.into_iter().map(Course::normalized).collect())
}

fn load_collection(kv: &dyn KeyValueStore, key: &str) -> Vec<Course> {
    let raw = match kv.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("No saved '{key}' entry; starting empty");
            return Vec::new();
        }
        Err(e) => {
            warn!("Could not read saved '{key}' entry: {e}");
            return Vec::new();
        }
    };

    parse_courses(&raw).unwrap_or_else(|e| {
        warn!("Ignoring malformed saved '{key}' entry: {e}");
        Vec::new()
    })
}

fn warn_on_duplicate_ids<'a>(courses: impl IntoIterator<Item = &'a Course>) {
    let mut seen = HashSet::new();
    for course in courses {
        if !seen.insert(&course.id) {
            warn!("Course id {} appears more than once", course.id);
        }
    }
}

/// Hydrate the store at startup.
///
/// Missing entries are empty collections; unreadable or malformed entries are
/// reported and also treated as empty.
#[must_use]
pub fn load_store(kv: &dyn KeyValueStore) -> CourseStore {
    let enrolled = load_collection(kv, ENROLLED_KEY);
    let backlog = load_collection(kv, BACKLOG_KEY);
    warn_on_duplicate_ids(enrolled.iter().chain(&backlog));
    debug!(
        "Loaded {} enrolled and {} backlog courses",
        enrolled.len(),
        backlog.len()
    );
    CourseStore::from_collections(enrolled, backlog)
}

/// Write both collections.
///
/// # Errors
/// Returns an error if serialization or either write fails.
pub fn save_store(kv: &mut dyn KeyValueStore, store: &CourseStore) -> Result<(), PersistenceError> {
    kv.set(ENROLLED_KEY, &serde_json::to_string(store.enrolled())?)?;
    kv.set(BACKLOG_KEY, &serde_json::to_string(store.backlog())?)?;
    Ok(())
}

/// Observer that writes both collections after every committed change.
///
/// A failed write is logged and otherwise ignored; the in-memory state stands.
#[derive(Debug)]
pub struct PersistObserver<S: KeyValueStore> {
    kv: S,
}

impl<S: KeyValueStore> PersistObserver<S> {
    /// Persist into `kv`
    #[must_use]
    pub const fn new(kv: S) -> Self {
        Self { kv }
    }
}

impl<S: KeyValueStore> StateObserver for PersistObserver<S> {
    fn on_change(&mut self, state: &PlannerState) {
        if let Err(e) = save_store(&mut self.kv, &state.store) {
            error!("Failed to save courses: {e}");
        }
    }
}

/// The export/import interchange document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    /// Enrolled courses
    pub courses: Vec<Course>,
    /// Backlog courses
    pub unadded: Vec<Course>,
}

impl ExportDocument {
    /// Snapshot the store
    #[must_use]
    pub fn from_store(store: &CourseStore) -> Self {
        Self {
            courses: store.enrolled().to_vec(),
            unadded: store.backlog().to_vec(),
        }
    }
}

/// Serialize the store as an export document.
///
/// # Errors
/// Returns an error if serialization fails.
pub fn export_json(store: &CourseStore, pretty: bool) -> Result<String, PersistenceError> {
    let document = ExportDocument::from_store(store);
    let text = if pretty {
        serde_json::to_string_pretty(&document)?
    } else {
        serde_json::to_string(&document)?
    };
    Ok(text)
}

#[derive(Deserialize)]
struct ImportDocument {
    #[serde(default)]
    courses: Option<Vec<Course>>,
    #[serde(default)]
    unadded: Option<Vec<Course>>,
}

/// Collections read from an import document; absent fields are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportPatch {
    /// Replacement enrolled collection
    pub enrolled: Option<Vec<Course>>,
    /// Replacement backlog collection
    pub backlog: Option<Vec<Course>>,
}

impl ImportPatch {
    /// The state transition that applies this import
    #[must_use]
    pub fn into_action(self) -> Action {
        Action::ReplaceCollections {
            enrolled: self.enrolled,
            backlog: self.backlog,
        }
    }
}

/// Parse an import document.
///
/// # Errors
/// Returns [`PersistenceError::Json`] when the text does not parse and
/// [`PersistenceError::MissingCollections`] when neither field is present.
pub fn parse_import(text: &str) -> Result<ImportPatch, PersistenceError> {
    let document: ImportDocument = serde_json::from_str(text)?;
    if document.courses.is_none() && document.unadded.is_none() {
        return Err(PersistenceError::MissingCollections);
    }

    let normalize = |courses: Vec<Course>| -> Vec<Course> {
        courses.into_iter().map(Course::normalized).collect()
    };
    let patch = ImportPatch {
        enrolled: document.courses.map(normalize),
        backlog: document.unadded.map(normalize),
    };
    warn_on_duplicate_ids(
        patch
            .enrolled
            .iter()
            .flatten()
            .chain(patch.backlog.iter().flatten()),
    );
    Ok(patch)
}

/// Colour scheme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Light scheme (default)
    #[default]
    Light,
    /// Dark scheme
    Dark,
}

impl Theme {
    /// The other theme
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Read the saved theme; anything but `"true"` is light.
#[must_use]
pub fn load_theme(kv: &dyn KeyValueStore) -> Theme {
    match kv.get(THEME_KEY) {
        Ok(Some(value)) if value.trim() == "true" => Theme::Dark,
        Ok(_) => Theme::Light,
        Err(e) => {
            warn!("Could not read theme preference: {e}");
            Theme::Light
        }
    }
}

/// Save the theme preference.
///
/// # Errors
/// Returns an error if the write fails.
pub fn save_theme(kv: &mut dyn KeyValueStore, theme: Theme) -> Result<(), PersistenceError> {
    kv.set(THEME_KEY, if theme == Theme::Dark { "true" } else { "false" })
}
