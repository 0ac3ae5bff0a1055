use std::sync::{mpsc, Arc};
use std::time::Duration;

use sitesearch_client::{ClientSettings, SearchClient, SearchError};
use sitesearch_core::{update, AppState, AppViewModel, Msg};
use sitesearch_logging::search_debug;

use super::effects::EffectRunner;

/// Owns the view state and feeds messages through `update`, one at a time.
pub struct Session {
    state: AppState,
    runner: EffectRunner,
    msg_rx: mpsc::Receiver<Msg>,
}

impl Session {
    pub fn new(state: AppState, settings: ClientSettings) -> Result<Self, SearchError> {
        let (msg_tx, msg_rx) = mpsc::channel();
        let runner = EffectRunner::new(msg_tx, settings)?;
        Ok(Self {
            state,
            runner,
            msg_rx,
        })
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn with_client(state: AppState, client: Arc<dyn SearchClient>) -> Result<Self, SearchError> {
        let (msg_tx, msg_rx) = mpsc::channel();
        let runner = EffectRunner::with_client(msg_tx, client)?;
        Ok(Self {
            state,
            runner,
            msg_rx,
        })
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    /// Applies one message and runs its effects. Returns whether a re-render
    /// is needed.
    pub fn dispatch(&mut self, msg: Msg) -> bool {
        if let Msg::SearchSucceeded { request_id, .. } | Msg::SearchFailed { request_id, .. } =
            &msg
        {
            if !self.state.is_current(*request_id) {
                search_debug!("dropping stale completion for request {}", request_id);
            }
        }
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;
        if !effects.is_empty() {
            search_debug!("dispatching {} effect(s)", effects.len());
            self.runner.enqueue(effects);
        }
        was_dirty
    }

    /// Applies every message that arrived from the client since the last call.
    pub fn pump(&mut self) -> bool {
        let mut inbox = Vec::new();
        while let Ok(msg) = self.msg_rx.try_recv() {
            inbox.push(msg);
        }
        let mut dirty = false;
        for msg in inbox {
            dirty |= self.dispatch(msg);
        }
        dirty
    }

    /// Blocks until one client message arrives (or `timeout` passes) and
    /// applies it.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn wait_for_message(&mut self, timeout: Duration) -> bool {
        match self.msg_rx.recv_timeout(timeout) {
            Ok(msg) => {
                self.dispatch(msg);
                true
            }
            Err(_) => false,
        }
    }
}
