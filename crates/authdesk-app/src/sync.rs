// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use tracing::debug;

use crate::{
    DetailLoader, DetailSource, DisplayRowMapper, FailureNotifier, Generation, RecordRowMapper,
    RemoteCallError, RemoteListSource, RemoteRecord, ResourceKind, SortableTable, TableEvent,
    verify_kind,
};

/// One listed resource kind plus the detail view hanging off its selection.
///
/// Control flow: fetch, map, replace, then reload details for whatever the
/// table reports as selected. A failed call is notified and the rest of the
/// flow still runs against the data already on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteListView<D> {
    kind: ResourceKind,
    mapper: RecordRowMapper,
    table: SortableTable,
    details: DetailLoader<D>,
    latest_refresh: Generation,
}

impl<D> RemoteListView<D> {
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            mapper: RecordRowMapper,
            table: SortableTable::new(kind.columns()),
            details: DetailLoader::new(),
            latest_refresh: Generation::default(),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn table(&self) -> &SortableTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut SortableTable {
        &mut self.table
    }

    pub fn details(&self) -> &DetailLoader<D> {
        &self.details
    }

    pub fn details_mut(&mut self) -> &mut DetailLoader<D> {
        &mut self.details
    }

    pub fn begin_refresh(&mut self) -> Generation {
        self.latest_refresh = self.latest_refresh.next();
        self.latest_refresh
    }

    /// Applies a listing result. A failure is notified and leaves the rows
    /// untouched, but still yields a selection event so the detail view is
    /// regenerated. A stale result yields nothing.
    pub fn finish_refresh(
        &mut self,
        generation: Generation,
        result: Result<Vec<RemoteRecord>, RemoteCallError>,
        notifier: &mut dyn FailureNotifier,
    ) -> Vec<TableEvent> {
        let result = result.and_then(|records| verify_kind(self.kind, records));
        if generation != self.latest_refresh {
            if let Err(error) = &result {
                notifier.notify(error);
            }
            debug!(
                kind = self.kind.as_str(),
                generation = generation.get(),
                "dropping stale listing"
            );
            return Vec::new();
        }

        match result {
            Ok(records) => {
                let rows = self.mapper.map_all(&records);
                debug!(kind = self.kind.as_str(), rows = rows.len(), "listing replaced");
                self.table.replace(rows)
            }
            Err(error) => {
                notifier.notify(&error);
                vec![TableEvent::SelectionChanged(self.table.selected().to_vec())]
            }
        }
    }

    /// Feeds selection events to the detail loader synchronously.
    pub fn apply_events<S>(
        &mut self,
        events: &[TableEvent],
        source: &mut S,
        notifier: &mut dyn FailureNotifier,
    ) where
        S: DetailSource<Detail = D> + ?Sized,
    {
        for event in events {
            if let TableEvent::SelectionChanged(ids) = event {
                self.details.on_selection_changed(source, ids, notifier);
            }
        }
    }

    /// Full synchronous refresh: listing, then details for the selection.
    pub fn refresh<L, S>(
        &mut self,
        list: &mut L,
        details: &mut S,
        notifier: &mut dyn FailureNotifier,
    ) -> Vec<TableEvent>
    where
        L: RemoteListSource + ?Sized,
        S: DetailSource<Detail = D> + ?Sized,
    {
        let generation = self.begin_refresh();
        let result = list.fetch(self.kind);
        let events = self.finish_refresh(generation, result, notifier);
        self.apply_events(&events, details, notifier);
        events
    }
}
