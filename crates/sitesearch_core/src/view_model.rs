use rust_decimal::{Decimal, RoundingStrategy};

use crate::{AppState, InputField, Lifecycle, ResultKey};

pub const SEARCH_LABEL: &str = "Search";
pub const SEARCHING_LABEL: &str = "Searching...";
pub const RESULTS_HEADING: &str = "Search Results";
pub const VIEW_HTML_LABEL: &str = "View HTML ▾";
pub const HIDE_HTML_LABEL: &str = "Hide HTML ▴";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleView {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

/// Everything a renderer needs, already decided: labels, visibility, order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub url: String,
    pub query: String,
    pub lifecycle: LifecycleView,
    pub submit_enabled: bool,
    pub submit_label: &'static str,
    pub missing_field: Option<InputField>,
    pub error: Option<String>,
    /// `Some` only when there is at least one result.
    pub results_heading: Option<&'static str>,
    pub results: Vec<ResultCardView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCardView {
    pub key: ResultKey,
    pub index: usize,
    pub score_label: String,
    pub path: String,
    pub chunk: String,
    pub toggle_label: &'static str,
    pub expanded: bool,
    /// Raw markup, present only while expanded.
    pub html: Option<String>,
}

/// Formats a `[0, 1]` relevance score as `"86.8% match"`.
///
/// The exact binary value of `score * 100` is rounded once to one decimal,
/// ties away from zero. Non-finite scores fall back to float formatting.
pub fn format_score(score: f64) -> String {
    let percent = score * 100.0;
    let Some(exact) = Decimal::from_f64_retain(percent) else {
        return format!("{percent:.1}% match");
    };
    let mut rounded = exact.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    // Avoid rendering "-0.0".
    if rounded.is_zero() {
        rounded = Decimal::ZERO;
    }
    rounded.rescale(1);
    format!("{rounded}% match")
}

pub(crate) fn build_view(state: &AppState) -> AppViewModel {
    let (lifecycle, error) = match state.lifecycle() {
        Lifecycle::Idle => (LifecycleView::Idle, None),
        Lifecycle::Pending { .. } => (LifecycleView::Pending, None),
        Lifecycle::Succeeded => (LifecycleView::Succeeded, None),
        Lifecycle::Failed { message } => (LifecycleView::Failed, Some(message.clone())),
    };
    let pending = lifecycle == LifecycleView::Pending;

    let results: Vec<ResultCardView> = state
        .keyed_results()
        .iter()
        .enumerate()
        .map(|(index, (key, item))| {
            let expanded = state.is_expanded(key);
            ResultCardView {
                key: key.clone(),
                index,
                score_label: format_score(item.score),
                path: item.path.clone(),
                chunk: item.chunk.clone(),
                toggle_label: if expanded {
                    HIDE_HTML_LABEL
                } else {
                    VIEW_HTML_LABEL
                },
                expanded,
                html: expanded.then(|| item.html.clone()),
            }
        })
        .collect();

    AppViewModel {
        url: state.form().url.clone(),
        query: state.form().query.clone(),
        lifecycle,
        submit_enabled: !pending,
        submit_label: if pending { SEARCHING_LABEL } else { SEARCH_LABEL },
        missing_field: state.missing_field(),
        error,
        results_heading: (!results.is_empty()).then_some(RESULTS_HEADING),
        results,
        dirty: state.is_dirty(),
    }
}
