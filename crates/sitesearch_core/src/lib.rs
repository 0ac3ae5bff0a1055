//! Sitesearch core: pure search-view state machine and view-model helpers.
mod effect;
mod msg;
mod result;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use result::{ResultItem, ResultKey};
pub use state::{AppState, FormInput, InputField, Lifecycle, RequestId};
pub use update::update;
pub use view_model::{
    format_score, AppViewModel, LifecycleView, ResultCardView, HIDE_HTML_LABEL, RESULTS_HEADING,
    SEARCHING_LABEL, SEARCH_LABEL, VIEW_HTML_LABEL,
};
