//! datasources - client-side editor for configuration-management data sources
//!
//! This library keeps a local copy of the data sources configured on a
//! server, lets callers edit detached drafts of them, and synchronizes
//! create, update, delete and enable/disable operations with the server's
//! REST API.
//!
//! # Modules
//!
//! The library is organized into several key modules:
//!
//! * [`datasource`] - Data source model and its editing decoration
//! * [`store`] - Ordered in-memory list of known data sources
//! * [`selection`] - Selection and detached drafts
//! * [`sync`] - Synchronization of drafts with the server
//! * [`backend`] - REST API client
//! * [`console`] - Screen-level glue used by the command-line front end
//! * [`config`] - Application configuration management
//! * [`utils`] - Duration and identifier helpers

/// Server abstraction and HTTP client
pub mod backend;

/// Configuration module for managing application settings
pub mod config;

/// Screen-level actions combining selection and synchronization
pub mod console;

/// Application constants and default values
pub mod constants;

/// Data source model
pub mod datasource;

/// Logging setup
pub mod logger;

/// Selection and draft editing
pub mod selection;

/// In-memory data source list
pub mod store;

/// Synchronization engine for keeping local and remote data in sync
pub mod sync;

/// Utility functions for durations and identifiers
pub mod utils;

pub use datasource::{DataSource, Record};
pub use selection::{Draft, Selection};
pub use store::SourceStore;
pub use sync::SyncController;
