//! Page controller for the checklist screen.
//!
//! # Design
//! `PageModel` is the whole page state: the list as last fetched, the add-task
//! input, the search box and its results, and the edit modal. `ChecklistPage`
//! turns user events into client calls executed by a `Transport`, and after
//! every mutation discards `items` and fetches the list again. Nothing is
//! cached between events: toggles and edits re-fetch the item they touch.
//!
//! Request failures inside a mutating handler are logged and do not stop the
//! reload that follows. The reload's own result is what the handler returns.

use crate::client::ChecklistClient;
use crate::error::ApiResult;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::types::{ChecklistItem, ChecklistItemUpdate, NewChecklistItem};
use crate::view::{self, ChecklistEntry, SearchResults};

/// State of the `taskModal` dialog and its form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditModal {
    pub visible: bool,
    /// Stored on open, read back on submit (`data-id`).
    pub item_id: Option<u64>,
    pub title: String,
    pub description: String,
    pub completed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageModel {
    pub items: Vec<ChecklistItem>,
    pub task_input: String,
    pub add_enabled: bool,
    pub search_box: String,
    pub search_results: SearchResults,
    pub modal: EditModal,
}

impl PageModel {
    pub fn entries(&self) -> Vec<ChecklistEntry> {
        view::checklist_entries(&self.items)
    }

    pub fn entry(&self, id: u64) -> Option<ChecklistEntry> {
        self.items.iter().find(|item| item.id == id).map(ChecklistEntry::from)
    }
}

pub struct ChecklistPage<T> {
    client: ChecklistClient,
    transport: T,
    model: PageModel,
}

impl<T: Transport> ChecklistPage<T> {
    pub fn new(client: ChecklistClient, transport: T) -> Self {
        Self {
            client,
            transport,
            model: PageModel::default(),
        }
    }

    pub fn model(&self) -> &PageModel {
        &self.model
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn send(&mut self, request: HttpRequest) -> ApiResult<HttpResponse> {
        tracing::debug!(method = %request.method, path = %request.path, "sending request");
        let response = self.transport.execute(request)?;
        tracing::debug!(status = response.status, "received response");
        Ok(response)
    }

    fn fetch_item(&mut self, id: u64) -> ApiResult<ChecklistItem> {
        let request = self.client.build_get_item(id);
        let response = self.send(request)?;
        self.client.parse_get_item(response)
    }

    fn put_item(&mut self, id: u64, update: &ChecklistItemUpdate) -> ApiResult<ChecklistItem> {
        let request = self.client.build_update_item(id, update)?;
        let response = self.send(request)?;
        self.client.parse_update_item(response)
    }

    /// Replace the list with a fresh fetch. On failure the previous list is
    /// kept.
    pub fn load(&mut self) -> ApiResult<()> {
        let request = self.client.build_list_items();
        let response = self.send(request)?;
        let items = self.client.parse_list_items(response).inspect_err(|e| {
            tracing::error!(error = %e, "failed to load checklist");
        })?;
        self.model.items = items;
        Ok(())
    }

    /// Store the add-task input and enable the add control only when it holds
    /// something other than whitespace.
    pub fn validate_input(&mut self, text: &str) {
        self.model.task_input = text.to_string();
        self.model.add_enabled = !text.trim().is_empty();
    }

    pub fn add(&mut self) -> ApiResult<()> {
        let title = self.model.task_input.trim().to_string();
        if title.is_empty() {
            return Ok(());
        }
        let created = self
            .client
            .build_create_item(&NewChecklistItem::titled(title))
            .and_then(|request| self.send(request))
            .and_then(|response| self.client.parse_create_item(response));
        if let Err(e) = created {
            tracing::error!(error = %e, "failed to create item");
        }
        self.model.task_input.clear();
        self.model.add_enabled = false;
        self.load()
    }

    /// Bulk create, one request for all titles. Blank titles are dropped.
    pub fn add_many<S: AsRef<str>>(&mut self, titles: &[S]) -> ApiResult<()> {
        let inputs: Vec<NewChecklistItem> = titles
            .iter()
            .map(|t| t.as_ref().trim())
            .filter(|t| !t.is_empty())
            .map(NewChecklistItem::titled)
            .collect();
        if inputs.is_empty() {
            return Ok(());
        }
        let created = self
            .client
            .build_create_items(&inputs)
            .and_then(|request| self.send(request))
            .and_then(|response| self.client.parse_create_items(response));
        if let Err(e) = created {
            tracing::error!(error = %e, "failed to create items");
        }
        self.load()
    }

    /// Re-fetch the item, then send it back with the new flag and a bumped
    /// version. An item that cannot be fetched or has a blank title is left
    /// alone and the list is not reloaded.
    pub fn toggle(&mut self, id: u64, completed: bool) -> ApiResult<()> {
        let item = match self.fetch_item(id) {
            Ok(item) if !item.has_blank_title() => item,
            Ok(_) => {
                tracing::error!(id, "invalid item, skipping update");
                return Ok(());
            }
            Err(e) => {
                tracing::error!(id, error = %e, "invalid item, skipping update");
                return Ok(());
            }
        };
        let update = ChecklistItemUpdate::toggled(&item, completed);
        if let Err(e) = self.put_item(id, &update) {
            tracing::error!(id, error = %e, "failed to update item");
        }
        self.load()
    }

    pub fn remove(&mut self, id: u64) -> ApiResult<()> {
        let request = self.client.build_delete_item(id);
        let deleted = self
            .send(request)
            .and_then(|response| self.client.parse_delete_item(response));
        if let Err(e) = deleted {
            tracing::error!(id, error = %e, "failed to delete item");
        }
        self.model.items.retain(|item| item.id != id);
        self.load()
    }

    /// Fill the modal from a fresh fetch of `id` and show it.
    pub fn open_edit(&mut self, id: u64) -> ApiResult<()> {
        let item = self.fetch_item(id).inspect_err(|e| {
            tracing::error!(id, error = %e, "failed to open item for editing");
        })?;
        self.model.modal = EditModal {
            visible: true,
            item_id: Some(id),
            description: item.description_or_empty().to_string(),
            title: item.title,
            completed: item.completed,
        };
        Ok(())
    }

    /// Overwrite the modal's form fields, as typing into them would.
    pub fn set_edit_form(&mut self, title: &str, description: &str, completed: bool) {
        self.model.modal.title = title.to_string();
        self.model.modal.description = description.to_string();
        self.model.modal.completed = completed;
    }

    /// Send the modal form. Blank fields fall back to the freshly fetched
    /// values.
    pub fn submit_edit(&mut self) -> ApiResult<()> {
        let Some(id) = self.model.modal.item_id else {
            tracing::error!("edit submitted without an item id");
            return Ok(());
        };
        let existing = self.fetch_item(id).inspect_err(|e| {
            tracing::error!(id, error = %e, "failed to fetch item before update");
        })?;

        let form = &self.model.modal;
        let title = non_blank(&form.title).unwrap_or_else(|| existing.title.clone());
        let description = non_blank(&form.description).or_else(|| existing.description.clone());
        let update = ChecklistItemUpdate {
            title,
            description,
            completed: form.completed,
            version: existing.version.saturating_add(1),
        };

        if let Err(e) = self.put_item(id, &update) {
            tracing::error!(id, error = %e, "failed to update item");
        }
        self.close_modal();
        self.load()
    }

    pub fn close_modal(&mut self) {
        self.model.modal.visible = false;
    }

    /// Run a keyword search. A blank keyword clears the results without a
    /// request; any failure reads the same as no matches.
    pub fn search(&mut self, keyword: &str) -> &SearchResults {
        self.model.search_box = keyword.to_string();
        let keyword = keyword.trim();
        if keyword.is_empty() {
            self.model.search_results = SearchResults::Cleared;
            return &self.model.search_results;
        }

        let request = self.client.build_search_items(keyword);
        let found = self
            .send(request)
            .and_then(|response| self.client.parse_search_items(response));
        self.model.search_results = match found {
            Ok(items) => SearchResults::from_items(&items),
            Err(e) => {
                tracing::error!(keyword, error = %e, "search failed");
                SearchResults::NoMatches
            }
        };
        &self.model.search_results
    }
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
