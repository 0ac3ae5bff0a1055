//! Sitesearch client: the `/search` HTTP contract and effect execution.
mod handle;
mod search;
mod types;

pub use handle::{ChannelEventSink, ClientHandle, EventSink};
pub use search::{
    endpoint_url, ClientSettings, ReqwestSearchClient, SearchClient, DEFAULT_BASE_URL,
};
pub use types::{
    ClientEvent, RequestId, SearchError, SearchHit, SearchQuery, SEARCH_FAILED_MESSAGE,
};
