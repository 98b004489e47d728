// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{DashboardOverview, RemoteCallError, RemoteRecord, ResourceKind, RowId, StatKind, StatPoint};

/// A remote listing call. An empty listing is a success; retries are the
/// caller's business.
pub trait RemoteListSource {
    fn fetch(&mut self, kind: ResourceKind) -> Result<Vec<RemoteRecord>, RemoteCallError>;
}

/// A follow-up call keyed by the id of a listed row.
pub trait DetailSource {
    type Detail;

    fn fetch_detail(&mut self, id: &RowId) -> Result<Vec<Self::Detail>, RemoteCallError>;
}

pub trait DashboardSource {
    fn overview(&mut self) -> Result<DashboardOverview, RemoteCallError>;
    fn stats(&mut self, kind: StatKind) -> Result<Vec<StatPoint>, RemoteCallError>;
}

/// Rejects a listing that contains records of another resource kind.
pub fn verify_kind(
    kind: ResourceKind,
    records: Vec<RemoteRecord>,
) -> Result<Vec<RemoteRecord>, RemoteCallError> {
    if let Some(stray) = records.iter().find(|record| record.kind() != kind) {
        return Err(RemoteCallError::decode(format!(
            "{} listing returned a {} record",
            kind.as_str(),
            stray.kind().as_str()
        )));
    }
    Ok(records)
}
