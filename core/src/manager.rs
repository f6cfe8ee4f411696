//! In-memory state of the bar admin view and its mutators.
//!
//! # Design
//! `BarManager` owns the collection snapshot, the new-record draft, the
//! dialog state and the displayed error. The only way to change any of them
//! is through `refresh`, `open_for_create`, `open_for_edit`, `edit_field`,
//! `submit`, `quick_create`, `delete` and `cancel`.
//!
//! The server is the sole source of truth: every successful mutation is
//! followed by a full re-fetch, and the local snapshot is never patched by
//! hand. Every failure path sets the error text and leaves the rest of the
//! state exactly as it was.
//!
//! Dialog mode is an explicit tag. `DialogMode::Edit` carries its own copy
//! of the record, so edits never reach the snapshot before the server
//! accepts them. Mutators take `&mut self`, which rules out overlapping
//! requests from one manager.

use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::transport::{BarApi, Transport};
use crate::types::{BarDraft, BarField, BarFields, BarId, BarRecord};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this bar?";

const LOAD_FAILED: &str = "Failed to load data: ";
const CREATE_FAILED: &str = "Failed to create data: ";
const UPDATE_FAILED: &str = "Error updating bar: ";
const DELETE_FAILED: &str = "Error deleting bar: ";

/// Which draft the dialog is bound to.
#[derive(Debug, Clone, PartialEq)]
pub enum DialogMode {
    Create,
    Edit(BarRecord),
}

/// What happens to the new-record draft when the dialog closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DraftPolicy {
    /// Keep the last entered values for the next create.
    #[default]
    Retain,
    /// Go back to the illustrative defaults.
    ResetOnClose,
}

/// Blocking yes/no prompt shown before a delete.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug)]
pub struct BarManager<T> {
    api: BarApi<T>,
    bars: Vec<BarRecord>,
    new_draft: BarDraft,
    mode: DialogMode,
    open: bool,
    error: String,
    policy: DraftPolicy,
}

impl<T: Transport> BarManager<T> {
    pub fn new(api: BarApi<T>) -> Self {
        Self {
            api,
            bars: Vec::new(),
            new_draft: BarDraft::default(),
            mode: DialogMode::Create,
            open: false,
            error: String::new(),
            policy: DraftPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: DraftPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn api(&self) -> &BarApi<T> {
        &self.api
    }

    pub fn bars(&self) -> &[BarRecord] {
        &self.bars
    }

    pub fn mode(&self) -> &DialogMode {
        &self.mode
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn error(&self) -> Option<&str> {
        (!self.error.is_empty()).then_some(self.error.as_str())
    }

    pub fn new_draft(&self) -> &BarDraft {
        &self.new_draft
    }

    pub fn edit_draft(&self) -> Option<&BarRecord> {
        match &self.mode {
            DialogMode::Edit(record) => Some(record),
            DialogMode::Create => None,
        }
    }

    /// Current text of `field` in whichever draft the dialog is bound to.
    pub fn field_text(&self, field: BarField) -> String {
        match &self.mode {
            DialogMode::Edit(record) => record.field_text(field),
            DialogMode::Create => self.new_draft.field_text(field),
        }
    }

    /// Replace the snapshot with the server's collection.
    pub fn refresh(&mut self) {
        match self.api.list() {
            Ok(bars) => {
                debug!(count = bars.len(), "bars refreshed");
                self.bars = bars;
                self.error.clear();
            }
            Err(e) => self.fail(LOAD_FAILED, e),
        }
    }

    pub fn open_for_create(&mut self) {
        self.mode = DialogMode::Create;
        self.open = true;
    }

    pub fn open_for_edit(&mut self, record: &BarRecord) {
        self.mode = DialogMode::Edit(record.clone());
        self.open = true;
    }

    /// Coerce `raw` for `field` and write it into the active draft.
    pub fn edit_field(&mut self, field: BarField, raw: &str) {
        match &mut self.mode {
            DialogMode::Edit(record) => record.set_field(field, raw),
            DialogMode::Create => self.new_draft.set_field(field, raw),
        }
    }

    /// Create or update depending on the dialog mode. The dialog stays open
    /// on failure.
    pub fn submit(&mut self) {
        let updated = match &self.mode {
            DialogMode::Create => None,
            DialogMode::Edit(record) => Some(self.api.update(record.id, record)),
        };
        match updated {
            None => self.create_from_draft(),
            Some(Ok(record)) => {
                info!(id = %record.id, "bar updated");
                self.mutation_succeeded();
            }
            Some(Err(e)) => self.fail(UPDATE_FAILED, e),
        }
    }

    /// Submit the new-record draft without going through the dialog.
    pub fn quick_create(&mut self) {
        self.create_from_draft();
    }

    pub fn delete<C: Confirm + ?Sized>(&mut self, id: BarId, confirm: &mut C) {
        if !confirm.confirm(DELETE_PROMPT) {
            debug!(%id, "delete declined");
            return;
        }
        match self.api.remove(id) {
            Ok(()) => {
                info!(%id, "bar deleted");
                self.error.clear();
                self.refresh();
            }
            Err(e) => self.fail(DELETE_FAILED, e),
        }
    }

    /// Close without submitting. Drafts are left as they are.
    pub fn cancel(&mut self) {
        self.close();
    }

    fn create_from_draft(&mut self) {
        match self.api.create(&self.new_draft) {
            Ok(created) => {
                info!(id = %created.id, "bar created");
                self.mutation_succeeded();
            }
            Err(e) => self.fail(CREATE_FAILED, e),
        }
    }

    // Error is cleared before the re-fetch so a failing refresh still shows.
    fn mutation_succeeded(&mut self) {
        self.error.clear();
        self.close();
        self.refresh();
    }

    fn close(&mut self) {
        self.open = false;
        if self.policy == DraftPolicy::ResetOnClose {
            self.new_draft = BarDraft::default();
        }
    }

    fn fail(&mut self, prefix: &str, e: ApiError) {
        warn!(error = %e, "{}", prefix.trim_end_matches([':', ' ']));
        self.error = format!("{prefix}{e}");
    }
}
