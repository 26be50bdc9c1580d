//! Lifecycle of the live configuration.
//!
//! A [`ConfigStore`] owns two trees: the *live* configuration that callers
//! read and mutate, and a *stored* snapshot of the last known-good state.
//! Loading reads one file per schema section from a directory, validates each
//! section as it arrives, validates the whole tree once more, and snapshots
//! the result.
//!
//! # Examples
//!
//! ```no_run
//! use std::path::Path;
//! use deepcfg::ConfigStore;
//!
//! let mut store = ConfigStore::default();
//! store.load(Path::new("config")).unwrap();
//!
//! let epochs = store.get(&["training", "num_epochs"]).unwrap();
//! println!("training for {} epochs", epochs.to_value());
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::logging::{Logger, Notification, Notifier, Severity};
use crate::namespace::{Namespace, Node, Value};
use crate::schema::{self, Schema};
use crate::validator::{Correction, SchemaValidator, WildcardPolicy};

/// Default file extension of section files.
pub const DEFAULT_EXTENSION: &str = "yaml";

/// Settings that control how a store reads and validates configurations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    /// File extension of section files, without the leading dot.
    pub extension: String,
    /// How wildcard entries treat empty sections.
    pub wildcard_policy: WildcardPolicy,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            wildcard_policy: WildcardPolicy::default(),
        }
    }
}

/// Summary of a successful [`ConfigStore::load`].
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    /// The directory that was read.
    pub directory: PathBuf,
    /// Sections read, in schema order.
    pub sections: Vec<String>,
    /// Every correction applied while validating.
    pub corrections: Vec<Correction>,
}

impl LoadReport {
    /// Number of corrections that replaced or filled a value.
    #[must_use]
    pub fn warnings(&self) -> usize {
        self.corrections
            .iter()
            .filter(|c| c.severity() == Severity::Warning)
            .count()
    }
}

/// Owner of the live configuration and its snapshot.
pub struct ConfigStore {
    schema: Arc<Schema>,
    live: Namespace,
    stored: Namespace,
    options: StoreOptions,
    notifier: Box<dyn Notifier>,
}

impl Default for ConfigStore {
    /// A store for the built-in schema, reporting through a normal
    /// [`Logger`].
    fn default() -> Self {
        Self::new(schema::builtin())
    }
}

impl ConfigStore {
    /// Creates an empty store for `schema`.
    #[must_use]
    pub fn new(schema: Arc<Schema>) -> Self {
        Self {
            schema,
            live: Namespace::new(),
            stored: Namespace::new(),
            options: StoreOptions::default(),
            notifier: Box::new(Logger::default()),
        }
    }

    /// Replaces the notification sink.
    #[must_use]
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    /// Replaces the store options.
    #[must_use]
    pub fn with_options(mut self, options: StoreOptions) -> Self {
        self.options = options;
        self
    }

    /// The schema configurations are validated against.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The store options.
    #[must_use]
    pub const fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// The live configuration.
    #[must_use]
    pub const fn config(&self) -> &Namespace {
        &self.live
    }

    /// The live configuration, mutably.
    pub fn config_mut(&mut self) -> &mut Namespace {
        &mut self.live
    }

    /// The last snapshot taken by [`ConfigStore::store`].
    #[must_use]
    pub const fn stored(&self) -> &Namespace {
        &self.stored
    }

    /// Reads a node of the live configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathNotFound`] if any segment is absent.
    pub fn get<S: AsRef<str>>(&self, path: &[S]) -> Result<Node<'_>> {
        self.live.get(path)
    }

    /// Returns `true` if `sub_space + [key]` exists in the live configuration.
    #[must_use]
    pub fn check<S: AsRef<str>>(&self, key: &str, sub_space: &[S]) -> bool {
        self.live.check(key, sub_space)
    }

    /// Location of a section file inside `directory`.
    #[must_use]
    pub fn section_file(&self, directory: &Path, section: &str) -> PathBuf {
        directory.join(format!("{section}.{}", self.options.extension))
    }

    /// Loads every section of the schema from `directory`.
    ///
    /// Each section file is parsed, placed under its section key and
    /// validated. Once all sections are in, the whole configuration is
    /// validated again and snapshotted.
    ///
    /// # Errors
    ///
    /// - [`Error::DirectoryNotFound`] if `directory` does not exist.
    /// - [`Error::SectionsFailed`] if any section file is missing or
    ///   unreadable. Every section is still inspected so the error lists all
    ///   of them.
    ///
    /// On error the live configuration is left empty and the snapshot is
    /// untouched. Each failure is also reported as a fatal notification.
    pub fn load(&mut self, directory: &Path) -> Result<LoadReport> {
        self.clear();

        if !directory.is_dir() {
            let err = Error::DirectoryNotFound {
                path: directory.to_path_buf(),
            };
            self.report_fatal(&err);
            return Err(err);
        }

        let schema = Arc::clone(&self.schema);
        let mut sections = Vec::new();
        let mut corrections = Vec::new();
        let mut failures = Vec::new();

        for section in schema.section_names() {
            let path = self.section_file(directory, section);
            match read_section(section, &path) {
                Ok(space) => {
                    log::debug!("loaded section {section} from {}", path.display());
                    self.live.insert(section, space);
                    corrections.extend(self.check_config(Some(section))?);
                    sections.push(section.to_string());
                }
                Err(err) => {
                    self.report_fatal(&err);
                    failures.push(err);
                }
            }
        }

        if !failures.is_empty() {
            self.clear();
            return Err(Error::SectionsFailed { failures });
        }

        corrections.extend(self.check_config(None)?);
        self.store();

        Ok(LoadReport {
            directory: directory.to_path_buf(),
            sections,
            corrections,
        })
    }

    /// Validates the live configuration against the schema.
    ///
    /// With `None` the whole schema is applied and a completion notice is
    /// sent. With `Some(section)` only that top-level section is checked.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSection`] if the schema does not declare
    /// `section`.
    pub fn check_config(&mut self, section: Option<&str>) -> Result<Vec<Correction>> {
        let validator = SchemaValidator::new(self.notifier.as_ref())
            .with_policy(self.options.wildcard_policy);

        if let Some(name) = section {
            let node = self
                .schema
                .section(name)
                .ok_or_else(|| Error::UnknownSection {
                    section: name.to_string(),
                })?;
            return Ok(validator.validate_section(name, node, &mut self.live));
        }

        let corrections = validator.validate(self.schema.root(), &mut self.live, &[] as &[&str])?;
        self.notifier.notify(&Notification::new(
            Severity::Success,
            format!(
                "configuration check complete ({} correction(s))",
                corrections.len()
            ),
        ));
        Ok(corrections)
    }

    /// Snapshots the live configuration.
    pub fn store(&mut self) {
        self.stored = self.live.copy();
    }

    /// Replaces the live configuration with a copy of the snapshot.
    pub fn restore(&mut self) {
        self.live = self.stored.copy();
    }

    /// Empties the live configuration. The snapshot is kept.
    pub fn clear(&mut self) {
        self.live = Namespace::new();
    }

    /// Writes each top-level section of the live configuration to its own
    /// file in `directory`, creating the directory if needed.
    ///
    /// Returns the files written, in section order.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or a file cannot
    /// be written.
    pub fn save(&self, directory: &Path) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(directory)?;

        let mut written = Vec::new();
        for (section, value) in self.live.items() {
            let Value::Map(space) = value else {
                log::debug!("skipping non-mapping top-level key {section}");
                continue;
            };
            let path = self.section_file(directory, section);
            space.save(&path)?;
            written.push(path);
        }
        Ok(written)
    }

    fn report_fatal(&self, err: &Error) {
        self.notifier
            .notify(&Notification::new(Severity::Fatal, err.to_string()));
    }
}

fn read_section(section: &str, path: &Path) -> Result<Namespace> {
    if !path.is_file() {
        return Err(Error::SectionFileNotFound {
            section: section.to_string(),
            path: path.to_path_buf(),
        });
    }
    Namespace::load(path).map_err(|e| Error::InvalidSectionFile {
        section: section.to_string(),
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
