use crate::{AppState, Effect, Lifecycle, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::UrlChanged(url) => {
            state.set_url(url);
            Vec::new()
        }
        Msg::QueryChanged(query) => {
            state.set_query(query);
            Vec::new()
        }
        Msg::SubmitClicked => {
            // Submit is disabled while a request is in flight.
            if state.pending_request().is_some() {
                return (state, Vec::new());
            }
            if let Some(field) = state.form().missing_field() {
                state.flag_missing(field);
                return (state, Vec::new());
            }
            let request_id = state.begin_request();
            let form = state.form().clone();
            vec![Effect::SubmitSearch {
                request_id,
                url: form.url,
                query: form.query,
            }]
        }
        Msg::SearchSucceeded {
            request_id,
            results,
        } => {
            if state.is_current(request_id) {
                state.settle_success(results);
            }
            Vec::new()
        }
        Msg::SearchFailed {
            request_id,
            message,
        } => {
            if state.is_current(request_id) {
                state.settle_failure(message);
            }
            Vec::new()
        }
        Msg::SearchCancelled { .. } => Vec::new(),
        Msg::ToggleHtml(key) => {
            // Only meaningful while results are shown.
            if matches!(state.lifecycle(), Lifecycle::Succeeded) {
                state.toggle(key);
            }
            Vec::new()
        }
    };

    (state, effects)
}
