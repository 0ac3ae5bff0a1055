use std::sync::{mpsc, Arc};

use sitesearch_client::{
    ClientEvent, ClientHandle, ClientSettings, EventSink, SearchClient, SearchError, SearchHit,
    SearchQuery,
};
use sitesearch_core::{Effect, Msg, ResultItem};
use sitesearch_logging::{search_debug, search_info};

/// Executes core effects on the search client.
pub struct EffectRunner {
    client: ClientHandle,
}

impl EffectRunner {
    pub fn new(msg_tx: mpsc::Sender<Msg>, settings: ClientSettings) -> Result<Self, SearchError> {
        let client = ClientHandle::new(settings, Arc::new(MsgSink { msg_tx }))?;
        Ok(Self { client })
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn with_client(
        msg_tx: mpsc::Sender<Msg>,
        client: Arc<dyn SearchClient>,
    ) -> Result<Self, SearchError> {
        let client = ClientHandle::with_client(client, Arc::new(MsgSink { msg_tx }))?;
        Ok(Self { client })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubmitSearch {
                    request_id,
                    url,
                    query,
                } => {
                    search_info!(
                        "SubmitSearch request_id={} url_len={} query_len={} url={}",
                        request_id,
                        url.len(),
                        query.len(),
                        url
                    );
                    self.client.search(request_id, SearchQuery { url, query });
                }
            }
        }
    }
}

/// Turns client events into core messages on the UI channel.
struct MsgSink {
    msg_tx: mpsc::Sender<Msg>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: ClientEvent) {
        let msg = match event {
            ClientEvent::SearchCompleted {
                request_id,
                result: Ok(hits),
            } => Msg::SearchSucceeded {
                request_id,
                results: hits.into_iter().map(map_hit).collect(),
            },
            ClientEvent::SearchCompleted {
                request_id,
                result: Err(err),
            } => Msg::SearchFailed {
                request_id,
                message: err.to_string(),
            },
            ClientEvent::SearchCancelled { request_id } => {
                search_debug!("request {} superseded", request_id);
                Msg::SearchCancelled { request_id }
            }
        };
        let _ = self.msg_tx.send(msg);
    }
}

fn map_hit(hit: SearchHit) -> ResultItem {
    ResultItem {
        id: hit.id,
        path: hit.path,
        chunk: hit.chunk,
        html: hit.html,
        score: hit.score,
    }
}
