use std::fmt;
use std::rc::Rc;

use tracing::{debug, warn};

use super::traits::ReferenceSearchService;
use crate::record::RecordRef;

/// Value holder for a reference field backed by a search service
///
/// Holds the chosen record and the current candidate list. Input shorter
/// than the minimum search length never reaches the service.
pub struct ReferencePicker {
    service_key: String,
    service: Rc<dyn ReferenceSearchService>,
    min_search_length: usize,
    value: Option<RecordRef>,
    candidates: Vec<RecordRef>,
    last_query: Option<String>,
    error: Option<String>,
}

impl ReferencePicker {
    pub fn new(
        service_key: impl Into<String>,
        service: Rc<dyn ReferenceSearchService>,
        default_min_search_length: usize,
    ) -> Self {
        let min_search_length = service
            .min_search_length()
            .unwrap_or(default_min_search_length);
        Self {
            service_key: service_key.into(),
            service,
            min_search_length,
            value: None,
            candidates: Vec::new(),
            last_query: None,
            error: None,
        }
    }

    pub fn service_key(&self) -> &str {
        &self.service_key
    }

    pub fn value(&self) -> Option<&RecordRef> {
        self.value.as_ref()
    }

    pub fn set_value(&mut self, value: Option<RecordRef>) {
        self.value = value;
    }

    pub fn candidates(&self) -> &[RecordRef] {
        &self.candidates
    }

    pub fn set_candidates(&mut self, candidates: Vec<RecordRef>) {
        self.candidates = candidates;
    }

    pub fn min_search_length(&self) -> usize {
        self.min_search_length
    }

    pub fn set_min_search_length(&mut self, min: usize) {
        self.min_search_length = min;
    }

    /// Ошибка последнего поиска
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn display_text(&self) -> String {
        self.value
            .as_ref()
            .map(|v| v.display_name())
            .unwrap_or_default()
    }

    /// Handle typed text; returns the number of candidates now offered
    pub fn on_input(&mut self, text: &str) -> usize {
        let query = text.trim();
        if query.chars().count() < self.min_search_length {
            self.candidates.clear();
            self.last_query = None;
            self.error = None;
            return 0;
        }

        if self.last_query.as_deref() == Some(query) {
            return self.candidates.len();
        }

        match self.service.search(query) {
            Ok(found) => {
                debug!(service = %self.service_key, query, found = found.len(), "picker search");
                self.candidates = found;
                self.error = None;
                self.last_query = Some(query.to_string());
            }
            Err(e) => {
                warn!(service = %self.service_key, query, error = %e, "picker search failed");
                self.candidates.clear();
                self.error = Some(format!("Ошибка поиска: {}", e));
                // failed query is not cached, the same text retries
                self.last_query = None;
            }
        }
        self.candidates.len()
    }

    /// Choose a candidate by position
    pub fn select(&mut self, index: usize) -> Option<RecordRef> {
        let chosen = self.candidates.get(index).cloned()?;
        self.value = Some(Rc::clone(&chosen));
        Some(chosen)
    }

    pub fn select_by_id(&mut self, id: &str) -> Option<RecordRef> {
        let chosen = self.candidates.iter().find(|c| c.id() == id).cloned()?;
        self.value = Some(Rc::clone(&chosen));
        Some(chosen)
    }

    pub fn clear(&mut self) {
        self.value = None;
        self.candidates.clear();
        self.last_query = None;
        self.error = None;
    }
}

impl fmt::Debug for ReferencePicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReferencePicker")
            .field("service_key", &self.service_key)
            .field("min_search_length", &self.min_search_length)
            .field("value", &self.value)
            .field("candidates", &self.candidates.len())
            .finish()
    }
}
