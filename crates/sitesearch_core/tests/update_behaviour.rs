use std::sync::Once;

use sitesearch_core::{
    update, AppState, Effect, InputField, Lifecycle, LifecycleView, Msg, ResultItem,
    SEARCHING_LABEL, SEARCH_LABEL,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(sitesearch_logging::initialize_for_tests);
}

fn fill_form(state: AppState, url: &str, query: &str) -> AppState {
    let (state, _) = update(state, Msg::UrlChanged(url.to_string()));
    let (state, _) = update(state, Msg::QueryChanged(query.to_string()));
    state
}

fn submit(state: AppState, url: &str, query: &str) -> (AppState, Vec<Effect>) {
    update(fill_form(state, url, query), Msg::SubmitClicked)
}

fn result(path: &str, chunk: &str, score: f64) -> ResultItem {
    ResultItem {
        id: None,
        path: path.to_string(),
        chunk: chunk.to_string(),
        html: format!("<p>{chunk}</p>"),
        score,
    }
}

#[test]
fn submit_enters_pending_and_emits_one_request() {
    init_logging();
    let (mut state, effects) = submit(AppState::new(), "https://example.com", "cats");

    assert_eq!(state.lifecycle(), &Lifecycle::Pending { request_id: 1 });
    assert_eq!(
        effects,
        vec![Effect::SubmitSearch {
            request_id: 1,
            url: "https://example.com".to_string(),
            query: "cats".to_string(),
        }]
    );
    let view = state.view();
    assert_eq!(view.lifecycle, LifecycleView::Pending);
    assert!(!view.submit_enabled);
    assert_eq!(view.submit_label, SEARCHING_LABEL);
    assert!(view.dirty);
    assert!(state.consume_dirty());
}

#[test]
fn empty_fields_never_emit_a_request() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "", "cats");
    assert!(effects.is_empty());
    assert_eq!(state.lifecycle(), &Lifecycle::Idle);
    assert_eq!(state.view().missing_field, Some(InputField::Url));

    let (state, effects) = submit(AppState::new(), "https://example.com", "");
    assert!(effects.is_empty());
    assert_eq!(state.view().missing_field, Some(InputField::Query));

    let (state, effects) = update(AppState::new(), Msg::SubmitClicked);
    assert!(effects.is_empty());
    assert_eq!(state.view().missing_field, Some(InputField::Url));
}

#[test]
fn editing_clears_missing_field_hint() {
    init_logging();
    let (state, _) = submit(AppState::new(), "", "cats");
    let (state, _) = update(state, Msg::UrlChanged("h".to_string()));
    assert_eq!(state.view().missing_field, None);
}

#[test]
fn whitespace_counts_as_filled() {
    init_logging();
    let (_state, effects) = submit(AppState::new(), " ", " ");
    assert_eq!(effects.len(), 1);
}

#[test]
fn submit_while_pending_is_ignored() {
    init_logging();
    let (state, _) = submit(AppState::new(), "https://example.com", "cats");
    let (state, effects) = update(state, Msg::SubmitClicked);
    assert!(effects.is_empty());
    assert_eq!(state.pending_request(), Some(1));
}

#[test]
fn inputs_stay_editable_while_pending_and_persist_after_submit() {
    init_logging();
    let (state, _) = submit(AppState::new(), "https://example.com", "cats");
    let (state, _) = update(state, Msg::QueryChanged("dogs".to_string()));
    assert_eq!(state.form().query, "dogs");
    assert_eq!(state.pending_request(), Some(1));

    let (state, _) = update(
        state,
        Msg::SearchSucceeded {
            request_id: 1,
            results: Vec::new(),
        },
    );
    assert_eq!(state.form().url, "https://example.com");
    assert_eq!(state.form().query, "dogs");
}

#[test]
fn success_populates_results_in_service_order() {
    init_logging();
    let (state, _) = submit(AppState::new(), "https://example.com", "cats");
    let results = vec![
        result("/low", "first by service", 0.1),
        result("/high", "second by service", 0.9),
        result("/mid", "third by service", 0.5),
    ];
    let (state, effects) = update(
        state,
        Msg::SearchSucceeded {
            request_id: 1,
            results: results.clone(),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.lifecycle(), &Lifecycle::Succeeded);
    assert_eq!(state.results().cloned().collect::<Vec<_>>(), results);
    let view = state.view();
    assert_eq!(view.error, None);
    assert!(view.submit_enabled);
    assert_eq!(view.submit_label, SEARCH_LABEL);
    let paths: Vec<_> = view.results.iter().map(|card| card.path.as_str()).collect();
    assert_eq!(paths, vec!["/low", "/high", "/mid"]);
    let indices: Vec<_> = view.results.iter().map(|card| card.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
fn empty_success_has_no_heading() {
    init_logging();
    let (state, _) = submit(AppState::new(), "https://example.com", "cats");
    let (state, _) = update(
        state,
        Msg::SearchSucceeded {
            request_id: 1,
            results: Vec::new(),
        },
    );
    let view = state.view();
    assert_eq!(view.lifecycle, LifecycleView::Succeeded);
    assert_eq!(view.results_heading, None);
    assert!(view.results.is_empty());
}

#[test]
fn service_failure_records_message_and_no_results() {
    init_logging();
    let (state, _) = submit(AppState::new(), "https://example.com", "cats");
    let (state, _) = update(
        state,
        Msg::SearchFailed {
            request_id: 1,
            message: "Search failed".to_string(),
        },
    );
    assert_eq!(
        state.lifecycle(),
        &Lifecycle::Failed {
            message: "Search failed".to_string()
        }
    );
    let view = state.view();
    assert_eq!(view.lifecycle, LifecycleView::Failed);
    assert_eq!(view.error.as_deref(), Some("Search failed"));
    assert!(view.results.is_empty());
    assert!(view.submit_enabled);
}

#[test]
fn resubmit_after_failure_clears_error() {
    init_logging();
    let (state, _) = submit(AppState::new(), "https://example.com", "cats");
    let (state, _) = update(
        state,
        Msg::SearchFailed {
            request_id: 1,
            message: "connection refused".to_string(),
        },
    );
    let (state, effects) = update(state, Msg::SubmitClicked);
    assert_eq!(effects.len(), 1);
    assert_eq!(state.view().error, None);
    assert_eq!(state.pending_request(), Some(2));
}

#[test]
fn stale_completions_are_ignored() {
    init_logging();
    let (state, _) = submit(AppState::new(), "https://example.com", "cats");
    let (state, _) = update(
        state,
        Msg::SearchSucceeded {
            request_id: 1,
            results: vec![result("/a", "old", 0.5)],
        },
    );
    let (mut state, _) = update(state, Msg::SubmitClicked);
    assert!(state.consume_dirty());

    let (mut state, _) = update(
        state,
        Msg::SearchSucceeded {
            request_id: 1,
            results: vec![result("/late", "late duplicate", 0.5)],
        },
    );
    assert_eq!(state.pending_request(), Some(2));
    assert_eq!(state.results().len(), 0);
    assert!(!state.consume_dirty());

    let (state, _) = update(
        state,
        Msg::SearchFailed {
            request_id: 7,
            message: "nope".to_string(),
        },
    );
    assert_eq!(state.pending_request(), Some(2));

    let (state, _) = update(state, Msg::SearchCancelled { request_id: 2 });
    assert_eq!(state.pending_request(), Some(2));
}

#[test]
fn only_the_in_flight_request_is_current() {
    init_logging();
    let state = AppState::new();
    assert!(!state.is_current(1));

    let (state, _) = submit(state, "https://example.com", "cats");
    assert!(state.is_current(1));
    assert!(!state.is_current(2));

    let (state, _) = update(
        state,
        Msg::SearchFailed {
            request_id: 1,
            message: "Search failed".to_string(),
        },
    );
    assert!(!state.is_current(1));
}
