#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User edited the website URL field.
    UrlChanged(String),
    /// User edited the search query field.
    QueryChanged(String),
    /// User submitted the form.
    SubmitClicked,
    /// The service answered with a result list.
    SearchSucceeded {
        request_id: crate::RequestId,
        results: Vec<crate::ResultItem>,
    },
    /// The request failed before or after reaching the service.
    SearchFailed {
        request_id: crate::RequestId,
        message: String,
    },
    /// The request was dropped because a newer one superseded it.
    SearchCancelled { request_id: crate::RequestId },
    /// User toggled the raw HTML panel of one result.
    ToggleHtml(crate::ResultKey),
}
