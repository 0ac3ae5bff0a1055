use std::collections::BTreeMap;

use crate::result::assign_keys;
use crate::view_model::{build_view, AppViewModel};
use crate::{ResultItem, ResultKey};

pub type RequestId = u64;

/// The two editable fields of the search form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormInput {
    pub url: String,
    pub query: String,
}

impl FormInput {
    /// First required field that is still empty, in form order.
    pub fn missing_field(&self) -> Option<InputField> {
        if self.url.is_empty() {
            Some(InputField::Url)
        } else if self.query.is_empty() {
            Some(InputField::Query)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Url,
    Query,
}

/// Phase of the most recent search request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Idle,
    Pending {
        request_id: RequestId,
    },
    Succeeded,
    Failed {
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    form: FormInput,
    lifecycle: Lifecycle,
    results: Vec<(ResultKey, ResultItem)>,
    disclosure: BTreeMap<ResultKey, bool>,
    missing_field: Option<InputField>,
    last_request_id: RequestId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with a prefilled form, e.g. from command-line arguments.
    pub fn with_form(form: FormInput) -> Self {
        Self {
            form,
            dirty: true,
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        build_view(self)
    }

    pub fn form(&self) -> &FormInput {
        &self.form
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    pub fn results(&self) -> impl ExactSizeIterator<Item = &ResultItem> {
        self.results.iter().map(|(_, item)| item)
    }

    pub(crate) fn keyed_results(&self) -> &[(ResultKey, ResultItem)] {
        &self.results
    }

    pub fn missing_field(&self) -> Option<InputField> {
        self.missing_field
    }

    /// Whether the raw HTML panel for `key` is open. Absent entries are collapsed.
    pub fn is_expanded(&self, key: &ResultKey) -> bool {
        self.disclosure.get(key).copied().unwrap_or(false)
    }

    /// Number of disclosure entries created so far for the current result set.
    pub fn disclosure_len(&self) -> usize {
        self.disclosure.len()
    }

    pub fn pending_request(&self) -> Option<RequestId> {
        match self.lifecycle {
            Lifecycle::Pending { request_id } => Some(request_id),
            _ => None,
        }
    }

    /// Whether a completion for `request_id` belongs to the in-flight request.
    /// Anything else is stale and gets dropped by `update`.
    pub fn is_current(&self, request_id: RequestId) -> bool {
        self.pending_request() == Some(request_id)
    }

    pub(crate) fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns whether a re-render is needed and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_url(&mut self, url: String) {
        if self.form.url != url {
            self.form.url = url;
            self.clear_missing_field();
            self.dirty = true;
        }
    }

    pub(crate) fn set_query(&mut self, query: String) {
        if self.form.query != query {
            self.form.query = query;
            self.clear_missing_field();
            self.dirty = true;
        }
    }

    fn clear_missing_field(&mut self) {
        self.missing_field = None;
    }

    pub(crate) fn flag_missing(&mut self, field: InputField) {
        if self.missing_field != Some(field) {
            self.missing_field = Some(field);
            self.dirty = true;
        }
    }

    /// Enters `Pending` and drops everything tied to the previous result set.
    pub(crate) fn begin_request(&mut self) -> RequestId {
        self.last_request_id += 1;
        let request_id = self.last_request_id;
        self.lifecycle = Lifecycle::Pending { request_id };
        self.missing_field = None;
        self.results = Vec::new();
        self.disclosure.clear();
        self.dirty = true;
        request_id
    }

    pub(crate) fn settle_success(&mut self, results: Vec<ResultItem>) {
        let keys = assign_keys(&results);
        self.results = keys.into_iter().zip(results).collect();
        self.disclosure.clear();
        self.lifecycle = Lifecycle::Succeeded;
        self.dirty = true;
    }

    pub(crate) fn settle_failure(&mut self, message: String) {
        self.results = Vec::new();
        self.disclosure.clear();
        self.lifecycle = Lifecycle::Failed { message };
        self.dirty = true;
    }

    /// Flips one disclosure entry. Returns false when `key` is not part of the
    /// current result set.
    pub(crate) fn toggle(&mut self, key: ResultKey) -> bool {
        if !self.results.iter().any(|(k, _)| *k == key) {
            return false;
        }
        let expanded = self.disclosure.entry(key).or_insert(false);
        *expanded = !*expanded;
        self.dirty = true;
        true
    }
}
