#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # deepcfg
//!
//! A library for validating and repairing hierarchical project
//! configurations.
//!
//! A configuration is a tree of YAML sections written by hand. This library
//! checks it against a static schema, fills in missing values, coerces values
//! of the wrong type, applies wildcard sections to user-named children, and
//! reports every correction it makes.
//!
//! ## Core Types
//!
//! - [`Namespace`] and [`Value`]: The ordered, path-addressable configuration tree
//! - [`Schema`] and [`DType`]: Declared shape, types and defaults
//! - [`SchemaValidator`] and [`Correction`]: Schema-driven repair and its reports
//! - [`ConfigStore`]: Loading, snapshotting and saving the live configuration
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use deepcfg::logging::RecordingNotifier;
//! use deepcfg::{ConfigStore, Value};
//!
//! let mut store = ConfigStore::default().with_notifier(RecordingNotifier::new());
//! store.config_mut().set(&["training"], Value::empty_map()).unwrap();
//! store.config_mut().set(&["training", "num_epochs"], "25").unwrap();
//!
//! store.check_config(Some("training")).unwrap();
//!
//! let epochs = store.get(&["training", "num_epochs"]).unwrap();
//! assert_eq!(epochs.to_value(), Value::from(25));
//! ```

pub mod coerce;
pub mod error;
pub mod logging;
pub mod namespace;
pub mod output;
pub mod schema;
pub mod store;
pub mod template;
pub mod validator;

// Re-export key types at crate root for convenience
pub use coerce::{convert, Conversion};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger, Notification, Notifier, Severity};
pub use namespace::{Namespace, Node, Value};
pub use output::OutputFormat;
pub use schema::{DType, Schema};
pub use store::{ConfigStore, LoadReport, StoreOptions};
pub use validator::{Correction, SchemaValidator, WildcardPolicy};
