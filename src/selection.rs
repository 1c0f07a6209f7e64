//! Selection and draft editing.
//!
//! Editing never touches the store directly: selecting a data source copies it
//! into a [`Draft`], which the caller mutates freely and later hands to the
//! synchronization layer to commit.

use crate::constants::{
    DEFAULT_CHECK_SSL, DEFAULT_MAX_PARALLEL_REQ, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SCHEDULE_SECS,
    DEFAULT_UPDATE_TIMEOUT_SECS,
};
use crate::datasource::{
    DataSource, HttpParameters, NameValue, OnMissing, Record, RequestMethod, RequestMode, RunParameters, Schedule,
    SourceType,
};
use crate::store::SourceStore;
use crate::utils::ident::sanitize_id;

/// Append a copy of `candidate` to `list` unless an entry with the same
/// case-insensitive name already exists. On success the candidate is cleared.
///
/// # Returns
/// `true` if the entry was added
pub fn add_entry(list: &mut Vec<NameValue>, candidate: &mut NameValue) -> bool {
    if list.iter().any(|entry| entry.same_name(&candidate.name)) {
        return false;
    }
    list.push(candidate.clone());
    candidate.clear();
    true
}

/// Remove the entry at `index`, if any
pub fn remove_entry(list: &mut Vec<NameValue>, index: usize) -> Option<NameValue> {
    (index < list.len()).then(|| list.remove(index))
}

/// A detached, editable copy of a data source.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    record: Record,
    is_new: bool,
    dirty: bool,
}

impl Draft {
    /// A blank data source with the documented defaults, not yet known to the server.
    pub fn new() -> Self {
        let source = DataSource {
            id: String::new(),
            name: String::new(),
            description: String::new(),
            source_type: SourceType::Http(HttpParameters {
                url: String::new(),
                path: String::new(),
                check_ssl: DEFAULT_CHECK_SSL,
                request_timeout: DEFAULT_REQUEST_TIMEOUT_SECS,
                request_method: RequestMethod::Get,
                request_mode: RequestMode::ByNode,
                headers: Vec::new(),
                params: Vec::new(),
                on_missing: OnMissing::Delete,
                max_parallel_req: DEFAULT_MAX_PARALLEL_REQ,
            }),
            run_parameters: RunParameters {
                on_generation: false,
                on_new_node: false,
                schedule: Schedule::Scheduled {
                    duration: DEFAULT_SCHEDULE_SECS,
                },
            },
            update_timeout: DEFAULT_UPDATE_TIMEOUT_SECS,
            enabled: false,
        };

        Self {
            record: Record::decorate(source),
            is_new: true,
            dirty: false,
        }
    }

    /// Deep copy of an existing store entry.
    pub fn from_record(record: &Record) -> Self {
        Self {
            record: record.clone(),
            is_new: false,
            dirty: false,
        }
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn source(&self) -> &DataSource {
        &self.record.source
    }

    pub fn id(&self) -> &str {
        self.record.id()
    }

    pub fn is_new(&self) -> bool {
        self.is_new
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mutable access to the whole record; marks the draft dirty.
    pub fn edit(&mut self) -> &mut Record {
        self.dirty = true;
        &mut self.record
    }

    /// Set the display name. While the draft is new the id follows the name.
    pub fn set_name(&mut self, name: &str) {
        self.dirty = true;
        self.record.source.name = name.to_string();
        if self.is_new {
            self.record.source.id = sanitize_id(name);
        }
    }

    pub fn set_description(&mut self, description: &str) {
        self.dirty = true;
        self.record.source.description = description.to_string();
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.dirty = true;
        self.record.source.enabled = enabled;
    }

    /// Add the scratch header row; see [`add_entry`].
    pub fn add_header(&mut self) -> bool {
        self.dirty = true;
        let Record {
            source, new_header, ..
        } = &mut self.record;
        add_entry(&mut source.http_mut().headers, new_header)
    }

    /// Add the scratch parameter row; see [`add_entry`].
    pub fn add_param(&mut self) -> bool {
        self.dirty = true;
        let Record { source, new_param, .. } = &mut self.record;
        add_entry(&mut source.http_mut().params, new_param)
    }

    pub fn remove_header(&mut self, index: usize) -> Option<NameValue> {
        self.dirty = true;
        remove_entry(&mut self.record.source.http_mut().headers, index)
    }

    pub fn remove_param(&mut self, index: usize) -> Option<NameValue> {
        self.dirty = true;
        remove_entry(&mut self.record.source.http_mut().params, index)
    }

    /// Fold the hour/minute/second fields back into seconds.
    pub(crate) fn commit_times(&mut self) {
        self.record.commit_times();
    }

    /// Mark the draft as saved on the server.
    pub(crate) fn mark_saved(&mut self) {
        self.is_new = false;
        self.dirty = false;
    }
}

impl Default for Draft {
    fn default() -> Self {
        Self::new()
    }
}

/// The data source currently open in the editor, if any.
#[derive(Debug, Clone)]
pub struct Selection {
    current: Option<Draft>,
    pristine: bool,
}

impl Selection {
    pub fn new() -> Self {
        Self {
            current: None,
            pristine: true,
        }
    }

    /// Open a copy of the store entry `id` for editing.
    ///
    /// The form state is reset first; unsaved changes to the previous draft
    /// are dropped. An unknown id leaves the current draft in place.
    pub fn select_for_edit(&mut self, store: &SourceStore, id: &str) -> Option<&mut Draft> {
        self.pristine = true;
        let record = store.find(id)?;
        self.current = Some(Draft::from_record(record));
        self.current.as_mut()
    }

    /// Start editing a brand new data source.
    pub fn new_draft(&mut self) -> &mut Draft {
        self.pristine = true;
        self.current.insert(Draft::new())
    }

    /// Close the editor without saving
    pub fn discard(&mut self) -> Option<Draft> {
        self.pristine = true;
        self.current.take()
    }

    pub fn current(&self) -> Option<&Draft> {
        self.current.as_ref()
    }

    /// Mutable access to the draft; the form is no longer pristine.
    pub fn current_mut(&mut self) -> Option<&mut Draft> {
        if self.current.is_some() {
            self.pristine = false;
        }
        self.current.as_mut()
    }

    /// Whether the form has been untouched since the last selection
    pub fn is_pristine(&self) -> bool {
        self.pristine
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new()
    }
}
