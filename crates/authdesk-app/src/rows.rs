// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{LogEntry, RemoteRecord, RowId, StatusTag};

/// Table-ready projection of one remote record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub id: RowId,
    pub fields: Vec<String>,
    pub tag: StatusTag,
    /// Human-readable state behind `tag`; empty when the record has none.
    pub state: &'static str,
}

impl DisplayRow {
    pub fn field(&self, column: usize) -> &str {
        self.fields.get(column).map_or("", String::as_str)
    }
}

pub trait DisplayRowMapper {
    type Record;

    fn map(&self, record: &Self::Record) -> DisplayRow;

    /// Maps in source order. The server makes no ordering promise, so neither
    /// does this.
    fn map_all(&self, records: &[Self::Record]) -> Vec<DisplayRow> {
        records.iter().map(|record| self.map(record)).collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordRowMapper;

impl DisplayRowMapper for RecordRowMapper {
    type Record = RemoteRecord;

    fn map(&self, record: &RemoteRecord) -> DisplayRow {
        match record {
            RemoteRecord::Authenticator(auth) => DisplayRow {
                id: record.row_id(),
                fields: vec![
                    auth.name.clone(),
                    auth.type_name.clone(),
                    auth.comments.clone(),
                    auth.priority.clone(),
                ],
                tag: auth.tag(),
                state: auth.state_label(),
            },
        }
    }
}

pub const LOG_COLUMNS: [&str; 4] = ["date", "level", "source", "message"];

/// Projects log entries for the detail pane. Log entries carry no identity,
/// so rows are keyed by their position in the published list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogRowMapper;

impl LogRowMapper {
    pub fn map_indexed(&self, index: usize, entry: &LogEntry) -> DisplayRow {
        DisplayRow {
            id: RowId::new(index.to_string()),
            fields: vec![
                entry.timestamp.clone(),
                entry.level.clone(),
                entry.source.clone(),
                entry.message.clone(),
            ],
            tag: entry.log_level().tag(),
            state: "",
        }
    }
}

impl DisplayRowMapper for LogRowMapper {
    type Record = LogEntry;

    fn map(&self, record: &LogEntry) -> DisplayRow {
        self.map_indexed(0, record)
    }

    fn map_all(&self, records: &[LogEntry]) -> Vec<DisplayRow> {
        records
            .iter()
            .enumerate()
            .map(|(index, entry)| self.map_indexed(index, entry))
            .collect()
    }
}
