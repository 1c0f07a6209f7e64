//! Synchronization between drafts, the local store and the server.
//!
//! This module provides the [`SyncController`] which turns draft commits into
//! server calls and, once the server has confirmed a change, applies it to the
//! [`SourceStore`]. The store is never changed ahead of the server: a failed
//! call leaves it exactly as it was.
//!
//! Every operation issues a single request and never retries it. Two saves of
//! the same data source issued concurrently are not serialized, so the store
//! ends up with whichever response lands last.

use anyhow::{Context, Result};
use log::{info, warn};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::backend::DatasourceApi;
use crate::constants::{
    ERROR_DATASOURCE_CREATE_FAILED, ERROR_DATASOURCE_DELETE_FAILED, ERROR_DATASOURCE_LOAD_FAILED,
    ERROR_DATASOURCE_TOGGLE_FAILED, ERROR_DATASOURCE_UPDATE_FAILED,
};
use crate::datasource::Record;
use crate::selection::Draft;
use crate::store::SourceStore;
use crate::utils::ident::is_valid_id;

/// What a successful [`SyncController::save`] did on the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Updated,
}

/// Applies draft commits to the server and mirrors confirmed changes locally.
///
/// # Example
/// ```rust,no_run
/// use datasources::backend::HttpApi;
/// use datasources::selection::Draft;
/// use datasources::sync::SyncController;
/// use std::sync::Arc;
///
/// # async fn example() -> anyhow::Result<()> {
/// let api = HttpApi::new("https://server/rudder/api/latest/datasources", None, false)?;
/// let sync = SyncController::new(Arc::new(api));
/// sync.load().await?;
///
/// let mut draft = Draft::new();
/// draft.set_name("Inventory");
/// draft.edit().source.http_mut().url = "https://cmdb.example.com/".to_string();
/// sync.save(&mut draft).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SyncController {
    api: Arc<dyn DatasourceApi>,
    store: Arc<Mutex<SourceStore>>,
}

impl SyncController {
    /// Create a controller with an empty store.
    pub fn new(api: Arc<dyn DatasourceApi>) -> Self {
        Self::with_store(api, Arc::new(Mutex::new(SourceStore::new())))
    }

    /// Create a controller over an existing, shared store.
    pub fn with_store(api: Arc<dyn DatasourceApi>, store: Arc<Mutex<SourceStore>>) -> Self {
        Self { api, store }
    }

    /// Shared handle to the store, for renderers
    pub fn store(&self) -> Arc<Mutex<SourceStore>> {
        Arc::clone(&self.store)
    }

    /// Snapshot of the current records
    pub async fn records(&self) -> Vec<Record> {
        self.store.lock().await.records().to_vec()
    }

    /// Fetch the full list from the server into the store.
    pub async fn load(&self) -> Result<usize> {
        // Fetch outside the lock, then swap in
        let mut fresh = SourceStore::new();
        let count = fresh.load(self.api.as_ref()).await.context(ERROR_DATASOURCE_LOAD_FAILED)?;
        *self.store.lock().await = fresh;
        Ok(count)
    }

    /// Save a draft: create it if it is new, update it otherwise.
    ///
    /// Durations edited as hours/minutes/seconds are folded back into seconds
    /// before the request. On success the store gains (create) or replaces
    /// (update) the entry and the draft becomes clean.
    ///
    /// # Errors
    /// Returns an error if the draft has no name or no valid id, or if the
    /// server call fails; the store is unchanged in both cases.
    pub async fn save(&self, draft: &mut Draft) -> Result<SaveOutcome> {
        validate(draft)?;
        draft.commit_times();

        if draft.is_new() {
            self.api
                .create(draft.source())
                .await
                .with_context(|| format!("{} '{}'", ERROR_DATASOURCE_CREATE_FAILED, draft.id()))?;

            draft.mark_saved();
            self.store.lock().await.push(draft.record().clone());
            info!("Created data source '{}'", draft.id());
            Ok(SaveOutcome::Created)
        } else {
            self.api
                .update(draft.id(), draft.source())
                .await
                .with_context(|| format!("{} '{}'", ERROR_DATASOURCE_UPDATE_FAILED, draft.id()))?;

            draft.mark_saved();
            let mut store = self.store.lock().await;
            match store.position(draft.id()) {
                Some(index) => {
                    store.replace_at(index, draft.record().clone())?;
                }
                None => warn!(
                    "Data source '{}' updated on the server but missing from the local list",
                    draft.id()
                ),
            }
            info!("Updated data source '{}'", draft.id());
            Ok(SaveOutcome::Updated)
        }
    }

    /// Flip the `enabled` flag of a saved data source.
    ///
    /// The draft is flipped before the request and only the `enabled` field is
    /// sent. On success the new value is written into the store entry.
    ///
    /// The draft is not flipped back when the request fails, so it then shows
    /// a state the server does not have until the next [`load`](Self::load);
    /// callers that care should reselect the data source.
    ///
    /// # Returns
    /// The new `enabled` value
    ///
    /// # Errors
    /// Returns an error without sending anything if the draft was never saved
    pub async fn toggle_enabled(&self, draft: &mut Draft) -> Result<bool> {
        if draft.is_new() || draft.id().is_empty() {
            anyhow::bail!("Data source must be saved before it can be enabled or disabled");
        }

        let enabled = !draft.source().enabled;
        draft.set_enabled(enabled);

        self.api
            .update_partial(draft.id(), json!({ "enabled": enabled }))
            .await
            .with_context(|| format!("{} '{}'", ERROR_DATASOURCE_TOGGLE_FAILED, draft.id()))?;

        let mut store = self.store.lock().await;
        let index = store.position(draft.id());
        match index {
            Some(index) => {
                let mut record = store.records()[index].clone();
                record.source.enabled = enabled;
                store.replace_at(index, record)?;
            }
            None => warn!(
                "Data source '{}' toggled on the server but missing from the local list",
                draft.id()
            ),
        }

        info!("Data source '{}' is now {}", draft.id(), if enabled { "enabled" } else { "disabled" });
        Ok(enabled)
    }

    /// Delete a data source on the server, then drop it from the store.
    ///
    /// # Returns
    /// `true` if a store entry was removed; an id the store does not know is
    /// a no-op on the list once the server call succeeded
    ///
    /// # Errors
    /// Returns an error without sending anything if `id` is empty
    pub async fn remove(&self, id: &str) -> Result<bool> {
        if id.is_empty() {
            anyhow::bail!("Cannot delete a data source without an id");
        }

        self.api
            .delete(id)
            .await
            .with_context(|| format!("{} '{}'", ERROR_DATASOURCE_DELETE_FAILED, id))?;

        let mut store = self.store.lock().await;
        let removed = match store.position(id) {
            Some(index) => {
                store.remove_at(index)?;
                true
            }
            None => false,
        };

        info!("Deleted data source '{}'", id);
        Ok(removed)
    }
}

/// Checks the server does not do for us before a save.
fn validate(draft: &Draft) -> Result<()> {
    let source = draft.source();
    if source.name.trim().is_empty() {
        anyhow::bail!("Data source name cannot be empty");
    }
    if source.id.is_empty() || (draft.is_new() && !is_valid_id(&source.id)) {
        anyhow::bail!(
            "Data source id '{}' must be non-empty and only contain letters, digits, '-' and '_'",
            source.id
        );
    }
    Ok(())
}
