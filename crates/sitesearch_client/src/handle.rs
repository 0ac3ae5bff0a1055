use std::sync::{mpsc, Arc};
use std::thread;

use sitesearch_logging::{search_debug, search_error, search_info};
use tokio_util::sync::CancellationToken;

use crate::search::{ClientSettings, ReqwestSearchClient, SearchClient};
use crate::{ClientEvent, RequestId, SearchError, SearchQuery};

/// Receives client events on the worker thread.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: ClientEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<ClientEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<ClientEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: ClientEvent) {
        let _ = self.tx.send(event);
    }
}

enum ClientCommand {
    Search {
        request_id: RequestId,
        query: SearchQuery,
    },
}

/// Runs searches on a dedicated thread with its own tokio runtime.
///
/// At most one search is in flight: dispatching a new one cancels the
/// previous request, which then reports `ClientEvent::SearchCancelled`.
/// Dropping the handle stops the worker once queued commands are drained.
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
}

impl ClientHandle {
    pub fn new(settings: ClientSettings, sink: Arc<dyn EventSink>) -> Result<Self, SearchError> {
        let client = ReqwestSearchClient::new(settings)?;
        search_info!("search endpoint {}", client.endpoint());
        Self::with_client(Arc::new(client), sink)
    }

    pub fn with_client(
        client: Arc<dyn SearchClient>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, SearchError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .map_err(|err| SearchError::Transport(format!("tokio runtime: {err}")))?;
        let (cmd_tx, cmd_rx) = mpsc::channel();

        thread::spawn(move || {
            let mut in_flight: Option<CancellationToken> = None;
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    ClientCommand::Search { request_id, query } => {
                        if let Some(previous) = in_flight.take() {
                            previous.cancel();
                        }
                        let token = CancellationToken::new();
                        in_flight = Some(token.clone());
                        let client = client.clone();
                        let sink = sink.clone();
                        runtime.spawn(async move {
                            run_search(client.as_ref(), request_id, query, token, sink.as_ref())
                                .await;
                        });
                    }
                }
            }
            if let Some(previous) = in_flight.take() {
                previous.cancel();
            }
            search_debug!("search worker stopped");
        });

        Ok(Self { cmd_tx })
    }

    pub fn search(&self, request_id: RequestId, query: SearchQuery) {
        if self
            .cmd_tx
            .send(ClientCommand::Search { request_id, query })
            .is_err()
        {
            search_error!("search worker is gone; request {} dropped", request_id);
        }
    }
}

async fn run_search(
    client: &dyn SearchClient,
    request_id: RequestId,
    query: SearchQuery,
    token: CancellationToken,
    sink: &dyn EventSink,
) {
    tokio::select! {
        _ = token.cancelled() => {
            search_debug!("request {} cancelled", request_id);
            sink.emit(ClientEvent::SearchCancelled { request_id });
        }
        result = client.search(&query) => {
            match &result {
                Ok(hits) => search_info!("request {} returned {} results", request_id, hits.len()),
                Err(err) => search_info!("request {} failed: {}", request_id, err),
            }
            sink.emit(ClientEvent::SearchCompleted { request_id, result });
        }
    }
}
