// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use tracing::debug;

use crate::{DetailSource, FailureNotifier, RemoteCallError, RowId};

/// Monotonic request counter. A result tagged with an older generation than
/// the latest request is stale and is not published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    pub const fn get(self) -> u64 {
        self.0
    }

    pub(crate) const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
    Loaded,
    PartiallyFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRequest {
    pub generation: Generation,
    pub ids: Vec<RowId>,
}

/// Outcome of fetching details for a list of ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailBatch<D> {
    pub entries: Vec<D>,
    pub failures: Vec<(RowId, RemoteCallError)>,
}

impl<D> Default for DetailBatch<D> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            failures: Vec::new(),
        }
    }
}

/// Fetches details id by id, concatenating successes in `ids` order. A
/// failing id contributes nothing and does not stop the others.
pub fn fetch_details<S>(source: &mut S, ids: &[RowId]) -> DetailBatch<S::Detail>
where
    S: DetailSource + ?Sized,
{
    let mut batch = DetailBatch::default();
    for id in ids {
        debug!(id = %id, "fetching detail");
        match source.fetch_detail(id) {
            Ok(entries) => batch.entries.extend(entries),
            Err(error) => batch.failures.push((id.clone(), error)),
        }
    }
    batch
}

/// Detail view content driven by the table selection. Content is rebuilt
/// from scratch on every selection change; nothing is cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailLoader<D> {
    content: Vec<D>,
    phase: LoadPhase,
    latest: Generation,
}

impl<D> Default for DetailLoader<D> {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            phase: LoadPhase::Idle,
            latest: Generation::default(),
        }
    }
}

impl<D> DetailLoader<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> &[D] {
        &self.content
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn latest(&self) -> Generation {
        self.latest
    }

    /// Starts a new load for `ids`, superseding any load still outstanding.
    pub fn begin(&mut self, ids: &[RowId]) -> DetailRequest {
        self.latest = self.latest.next();
        self.phase = LoadPhase::Loading;
        DetailRequest {
            generation: self.latest,
            ids: ids.to_vec(),
        }
    }

    /// Publishes a finished batch. Every failure is notified, stale or not;
    /// only the latest generation replaces the content. Returns whether the
    /// batch was published.
    pub fn publish(
        &mut self,
        generation: Generation,
        batch: DetailBatch<D>,
        notifier: &mut dyn FailureNotifier,
    ) -> bool {
        for (_, error) in &batch.failures {
            notifier.notify(error);
        }

        if generation != self.latest {
            debug!(
                generation = generation.get(),
                latest = self.latest.get(),
                "dropping stale detail batch"
            );
            return false;
        }

        self.phase = if batch.failures.is_empty() {
            LoadPhase::Loaded
        } else {
            LoadPhase::PartiallyFailed
        };
        self.content = batch.entries;
        true
    }

    /// Synchronous path: begin, fetch every id in order, publish.
    pub fn on_selection_changed<S>(
        &mut self,
        source: &mut S,
        ids: &[RowId],
        notifier: &mut dyn FailureNotifier,
    ) -> &[D]
    where
        S: DetailSource<Detail = D> + ?Sized,
    {
        let request = self.begin(ids);
        let batch = fetch_details(source, &request.ids);
        self.publish(request.generation, batch, notifier);
        &self.content
    }

    pub fn clear(&mut self) {
        self.latest = self.latest.next();
        self.content.clear();
        self.phase = LoadPhase::Idle;
    }
}
