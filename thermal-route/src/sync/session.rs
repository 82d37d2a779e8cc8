//! Async driver for a [`RouteController`].
//!
//! A session runs on a single task. It reads input events from a channel,
//! lets the controller plan synchronously, keeps the resulting fetches in a
//! `FuturesUnordered`, and hands each completion back to the controller in
//! whatever order the network delivers them. Superseded fetches are left to
//! finish; their results are simply discarded.

use std::sync::Arc;

use futures::StreamExt;
use futures::stream::FuturesUnordered;
use tokio::sync::{mpsc, watch};
use tracing::debug;

use crate::domain::{RouteRequest, RouteResult, RouteSummary, SequenceId};
use crate::overlay::DisplaySurface;
use crate::service::{RouteError, RouteProvider};

use super::controller::{Notifier, RouteController};
use super::store::InputEvent;

/// Owns a controller and the provider its requests go to.
pub struct RouteSession<P, S, N> {
    controller: RouteController<S, N>,
    provider: Arc<P>,
    summary: watch::Sender<Option<RouteSummary>>,
}

impl<P, S, N> RouteSession<P, S, N>
where
    P: RouteProvider,
    S: DisplaySurface,
    N: Notifier,
{
    pub fn new(controller: RouteController<S, N>, provider: P) -> Self {
        let (summary, _) = watch::channel(controller.summary().copied());
        Self {
            controller,
            provider: Arc::new(provider),
            summary,
        }
    }

    /// Watch the summary of the displayed route. `None` while no route is
    /// shown.
    pub fn subscribe_summary(&self) -> watch::Receiver<Option<RouteSummary>> {
        self.summary.subscribe()
    }

    pub fn controller(&self) -> &RouteController<S, N> {
        &self.controller
    }

    /// Process events until the input channel closes.
    ///
    /// Input events take priority over completions, so a completion that
    /// races a newer input is judged against the newest request. Once the
    /// channel closes, outstanding fetches are awaited so the returned
    /// controller reflects every result that was still relevant.
    pub async fn run(mut self, mut inputs: mpsc::Receiver<InputEvent>) -> RouteController<S, N> {
        let mut in_flight = FuturesUnordered::new();

        loop {
            tokio::select! {
                biased;

                event = inputs.recv() => match event {
                    Some(event) => {
                        if let Some(request) = self.controller.handle(event) {
                            in_flight.push(fetch(Arc::clone(&self.provider), request));
                        }
                        self.publish_summary();
                    }
                    None => break,
                },

                Some((id, outcome)) = in_flight.next(), if !in_flight.is_empty() => {
                    self.controller.resolve(id, outcome);
                    self.publish_summary();
                }
            }
        }

        debug!(outstanding = in_flight.len(), "input closed, draining fetches");
        while let Some((id, outcome)) = in_flight.next().await {
            self.controller.resolve(id, outcome);
            self.publish_summary();
        }

        self.controller
    }

    fn publish_summary(&self) {
        let current = self.controller.summary().copied();
        self.summary.send_if_modified(|shown| {
            if *shown == current {
                return false;
            }
            *shown = current;
            true
        });
    }
}

async fn fetch<P: RouteProvider>(
    provider: Arc<P>,
    request: RouteRequest,
) -> (SequenceId, Result<RouteResult, RouteError>) {
    let outcome = provider.fetch(&request).await;
    (request.sequence_id(), outcome)
}
