// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{DashboardOverview, DashboardSource, FailureNotifier, StatKind, StatPoint};

/// Aggregate counters plus one series per stat kind. A failed call leaves its
/// part empty and does not stop the remaining calls.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardView {
    pub overview: Option<DashboardOverview>,
    pub assigned: Vec<StatPoint>,
    pub in_use: Vec<StatPoint>,
}

impl DashboardView {
    pub fn series(&self, kind: StatKind) -> &[StatPoint] {
        match kind {
            StatKind::Assigned => &self.assigned,
            StatKind::InUse => &self.in_use,
        }
    }

    pub fn series_mut(&mut self, kind: StatKind) -> &mut Vec<StatPoint> {
        match kind {
            StatKind::Assigned => &mut self.assigned,
            StatKind::InUse => &mut self.in_use,
        }
    }

    pub fn load<S>(source: &mut S, notifier: &mut dyn FailureNotifier) -> Self
    where
        S: DashboardSource + ?Sized,
    {
        let mut view = Self::default();
        match source.overview() {
            Ok(overview) => view.overview = Some(overview),
            Err(error) => notifier.notify(&error),
        }
        for kind in StatKind::ALL {
            match source.stats(kind) {
                Ok(points) => *view.series_mut(kind) = points,
                Err(error) => notifier.notify(&error),
            }
        }
        view
    }
}

/// Min and max of a series, or `None` when it is empty.
pub fn series_bounds(points: &[StatPoint]) -> Option<(f64, f64)> {
    let mut values = points.iter().map(|point| point.value);
    let first = values.next()?;
    Some(values.fold((first, first), |(low, high), value| {
        (low.min(value), high.max(value))
    }))
}
