use crate::RequestId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue one search request; completion comes back as
    /// `Msg::SearchSucceeded` or `Msg::SearchFailed` carrying the same id.
    SubmitSearch {
        request_id: RequestId,
        url: String,
        query: String,
    },
}
