//! Page-level glue between the editor selection and the synchronization layer.
//!
//! A [`Console`] owns one [`Selection`] and one [`SyncController`] and exposes
//! the actions of the data source screen: pick a source, start a new one,
//! save, toggle and delete the selected one.

use anyhow::{anyhow, Result};
use std::sync::Arc;

use crate::backend::DatasourceApi;
use crate::constants::ERROR_DATASOURCE_NOT_FOUND;
use crate::selection::{Draft, Selection};
use crate::sync::{SaveOutcome, SyncController};

pub struct Console {
    sync: SyncController,
    selection: Selection,
}

impl Console {
    pub fn new(api: Arc<dyn DatasourceApi>) -> Self {
        Self {
            sync: SyncController::new(api),
            selection: Selection::new(),
        }
    }

    /// Load the list from the server; call once on startup.
    pub async fn init(&self) -> Result<usize> {
        self.sync.load().await
    }

    pub fn sync(&self) -> &SyncController {
        &self.sync
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Open the data source `id` in the editor.
    pub async fn select(&mut self, id: &str) -> Result<&mut Draft> {
        let store = self.sync.store();
        let store = store.lock().await;
        self.selection
            .select_for_edit(&store, id)
            .ok_or_else(|| anyhow!("{}: '{}'", ERROR_DATASOURCE_NOT_FOUND, id))
    }

    /// Open a blank data source in the editor.
    pub fn new_source(&mut self) -> &mut Draft {
        self.selection.new_draft()
    }

    pub fn selected_mut(&mut self) -> Option<&mut Draft> {
        self.selection.current_mut()
    }

    pub async fn save_selected(&mut self) -> Result<SaveOutcome> {
        let draft = self.selection.current_mut().ok_or_else(no_selection)?;
        self.sync.save(draft).await
    }

    pub async fn toggle_selected(&mut self) -> Result<bool> {
        let draft = self.selection.current_mut().ok_or_else(no_selection)?;
        self.sync.toggle_enabled(draft).await
    }

    /// Delete the selected data source and close the editor.
    pub async fn delete_selected(&mut self) -> Result<bool> {
        let draft = self.selection.current().ok_or_else(no_selection)?;
        if draft.is_new() {
            anyhow::bail!("Data source was never saved, nothing to delete");
        }
        let id = draft.id().to_string();
        let removed = self.sync.remove(&id).await?;
        self.selection.discard();
        Ok(removed)
    }
}

fn no_selection() -> anyhow::Error {
    anyhow!("No data source selected")
}
