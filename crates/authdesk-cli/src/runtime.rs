// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use authdesk_app::{
    DashboardView, DetailBatch, DetailRequest, Generation, LogEntry, RemoteCallError,
    RemoteListSource, RemoteRecord, ResourceKind, RowId, fetch_details,
};
use authdesk_rpc::Client;
use authdesk_tui::{AppRuntime, CollectedFailures, InternalEvent};
use std::sync::mpsc::Sender;
use std::thread;
use tracing::debug;

/// Runtime backed by the admin server. Each request runs on its own worker
/// thread with a clone of the client; results come back over the UI channel.
pub struct RpcRuntime {
    client: Client,
}

impl RpcRuntime {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn spawn_worker<F>(&self, name: &str, work: F) -> Result<()>
    where
        F: FnOnce(Client) + Send + 'static,
    {
        let client = self.client.clone();
        thread::Builder::new()
            .name(format!("authdesk-{name}"))
            .spawn(move || work(client))
            .with_context(|| format!("spawn {name} worker thread"))?;
        Ok(())
    }
}

fn load_dashboard(client: &mut Client) -> (DashboardView, Vec<RemoteCallError>) {
    let mut failures = CollectedFailures::default();
    let view = DashboardView::load(client, &mut failures);
    (view, failures.0)
}

impl AppRuntime for RpcRuntime {
    fn load_listing(&mut self, kind: ResourceKind) -> Result<Vec<RemoteRecord>, RemoteCallError> {
        self.client.fetch(kind)
    }

    fn load_details(&mut self, ids: &[RowId]) -> DetailBatch<LogEntry> {
        fetch_details(&mut self.client, ids)
    }

    fn load_dashboard(&mut self) -> (DashboardView, Vec<RemoteCallError>) {
        load_dashboard(&mut self.client)
    }

    fn spawn_listing(
        &mut self,
        kind: ResourceKind,
        generation: Generation,
        tx: Sender<InternalEvent>,
    ) -> Result<()> {
        self.spawn_worker("listing", move |mut client| {
            let result = client.fetch(kind);
            if tx.send(InternalEvent::Listing { generation, result }).is_err() {
                debug!("ui gone before listing arrived");
            }
        })
    }

    fn spawn_details(&mut self, request: DetailRequest, tx: Sender<InternalEvent>) -> Result<()> {
        self.spawn_worker("details", move |mut client| {
            let batch = fetch_details(&mut client, &request.ids);
            let event = InternalEvent::Details {
                generation: request.generation,
                batch,
            };
            if tx.send(event).is_err() {
                debug!("ui gone before details arrived");
            }
        })
    }

    fn spawn_dashboard(&mut self, request_id: u64, tx: Sender<InternalEvent>) -> Result<()> {
        self.spawn_worker("dashboard", move |mut client| {
            let (view, failures) = load_dashboard(&mut client);
            let event = InternalEvent::Dashboard {
                request_id,
                view,
                failures,
            };
            if tx.send(event).is_err() {
                debug!("ui gone before dashboard arrived");
            }
        })
    }
}
