//! Observable search state

use super::models::{SearchRequest, SearchToggles};
use crate::config::SearchSettings;
use crate::results::SortMode;
use serde::Serialize;
use std::collections::HashSet;

/// User-facing search state held by the controller
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchState {
    /// Query text as last set or submitted
    pub query: String,
    pub toggles: SearchToggles,
    /// Selected indexing fields, in selection order
    pub indexing_fields: Vec<String>,
    pub sort_mode: SortMode,
    /// A search has been submitted since start or the last clear
    pub has_searched: bool,
    /// A search is in flight
    pub loading: bool,
    /// Cache status message from the last deep search
    pub cache_info: Option<String>,
}

impl SearchState {
    /// Initial state seeded from settings
    pub fn from_settings(settings: &SearchSettings) -> Self {
        let mut seen = HashSet::new();
        let mut indexing_fields = settings.indexing_fields.clone();
        indexing_fields.retain(|f| seen.insert(f.clone()));

        Self {
            toggles: settings.toggles(),
            indexing_fields,
            sort_mode: settings.sort,
            ..Default::default()
        }
    }

    /// Add a field if absent, remove it if present. Returns whether it is now selected.
    pub fn toggle_indexing_field(&mut self, field: &str) -> bool {
        if self.is_field_selected(field) {
            self.indexing_fields.retain(|f| f != field);
            false
        } else {
            self.indexing_fields.push(field.to_string());
            true
        }
    }

    pub fn is_field_selected(&self, field: &str) -> bool {
        self.indexing_fields.iter().any(|f| f == field)
    }

    /// Request for the current query and options
    pub fn request(&self) -> SearchRequest {
        SearchRequest::new(self.query.trim(), self.toggles, &self.indexing_fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_field() {
        let mut state = SearchState::default();
        assert!(state.toggle_indexing_field("metadata"));
        assert!(state.toggle_indexing_field("roc"));
        assert_eq!(state.indexing_fields, vec!["metadata", "roc"]);

        assert!(!state.toggle_indexing_field("metadata"));
        assert_eq!(state.indexing_fields, vec!["roc"]);
        assert!(!state.is_field_selected("metadata"));
    }

    #[test]
    fn test_toggle_accepts_unknown_field() {
        let mut state = SearchState::default();
        assert!(state.toggle_indexing_field("appendix"));
        assert!(state.is_field_selected("appendix"));
    }

    #[test]
    fn test_from_settings() {
        let state = SearchState::from_settings(&SearchSettings::default());
        assert!(state.query.is_empty());
        assert!(!state.has_searched);
        assert!(!state.loading);
        assert!(state.toggles.deep);
        assert_eq!(state.indexing_fields.len(), 4);
    }

    #[test]
    fn test_duplicate_fields_collapse() {
        let settings = SearchSettings {
            indexing_fields: vec!["roc".into(), "metadata".into(), "roc".into()],
            ..Default::default()
        };
        let mut state = SearchState::from_settings(&settings);
        assert_eq!(state.indexing_fields, vec!["roc", "metadata"]);

        assert!(!state.toggle_indexing_field("roc"));
        assert!(!state.is_field_selected("roc"));
        state.query = "agents".to_string();
        let params = state.request().params();
        assert!(!params.contains(&("indexing_fields", "roc".to_string())));
        assert!(params.contains(&("indexing_fields", "metadata".to_string())));
    }

    #[test]
    fn test_toggle_removes_every_copy() {
        let mut state = SearchState {
            indexing_fields: vec!["roc".into(), "roc".into()],
            ..Default::default()
        };
        assert!(!state.toggle_indexing_field("roc"));
        assert!(state.indexing_fields.is_empty());
    }
}
