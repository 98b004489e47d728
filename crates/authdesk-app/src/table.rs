// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{DisplayRow, RowId, SortDirection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub column: usize,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    RowsReplaced { count: usize },
    SelectionChanged(Vec<RowId>),
}

/// Client-side sorted table with an ordered selection.
///
/// Rows are kept in insertion order; `order` holds the display permutation.
/// Every selection operation emits exactly one `SelectionChanged`, even when
/// the selected set did not change, so callers can force a detail reload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortableTable {
    columns: Vec<&'static str>,
    rows: Vec<DisplayRow>,
    order: Vec<usize>,
    sort: Option<SortSpec>,
    selected: Vec<RowId>,
    focused: Option<RowId>,
}

impl SortableTable {
    pub fn new(columns: &[&'static str]) -> Self {
        Self {
            columns: columns.to_vec(),
            rows: Vec::new(),
            order: Vec::new(),
            sort: None,
            selected: Vec::new(),
            focused: None,
        }
    }

    pub fn columns(&self) -> &[&'static str] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in display order.
    pub fn rows(&self) -> impl Iterator<Item = &DisplayRow> + '_ {
        self.order.iter().map(|index| &self.rows[*index])
    }

    pub fn row_at(&self, position: usize) -> Option<&DisplayRow> {
        self.order.get(position).map(|index| &self.rows[*index])
    }

    pub fn row(&self, id: &RowId) -> Option<&DisplayRow> {
        self.rows.iter().find(|row| &row.id == id)
    }

    pub fn contains(&self, id: &RowId) -> bool {
        self.row(id).is_some()
    }

    pub fn sort(&self) -> Option<SortSpec> {
        self.sort
    }

    pub fn selected(&self) -> &[RowId] {
        &self.selected
    }

    pub fn is_selected(&self, id: &RowId) -> bool {
        self.selected.contains(id)
    }

    pub fn focused(&self) -> Option<&RowId> {
        self.focused.as_ref()
    }

    pub fn focused_position(&self) -> Option<usize> {
        let focused = self.focused.as_ref()?;
        self.rows().position(|row| &row.id == focused)
    }

    /// Swaps in a new row set, keeping the active sort and whichever selected
    /// ids survive. An empty surviving selection on a non-empty table selects
    /// and focuses the first displayed row.
    pub fn replace(&mut self, rows: Vec<DisplayRow>) -> Vec<TableEvent> {
        self.rows = rows;
        self.resort();

        let previous = std::mem::take(&mut self.selected);
        self.selected = dedup_existing(&self.rows, previous);

        if self.selected.is_empty()
            && let Some(first) = self.row_at(0)
        {
            let first = first.id.clone();
            self.selected.push(first.clone());
            self.focused = Some(first);
        } else if !self.focused.as_ref().is_some_and(|id| self.contains(id)) {
            self.focused = self.selected.first().cloned();
        }

        vec![
            TableEvent::RowsReplaced {
                count: self.rows.len(),
            },
            self.selection_event(),
        ]
    }

    /// Clicking the active column flips direction; any other column starts
    /// ascending. Returns `None` for a column the table does not have.
    pub fn sort_by(&mut self, column: usize) -> Option<SortSpec> {
        if column >= self.columns.len() {
            return None;
        }

        let next = match self.sort {
            Some(current) if current.column == column => SortSpec {
                column,
                direction: current.direction.toggled(),
            },
            _ => SortSpec {
                column,
                direction: SortDirection::Asc,
            },
        };
        self.sort = Some(next);
        self.resort();
        Some(next)
    }

    pub fn clear_sort(&mut self) {
        self.sort = None;
        self.resort();
    }

    pub fn select<I>(&mut self, ids: I) -> TableEvent
    where
        I: IntoIterator<Item = RowId>,
    {
        self.selected = dedup_existing(&self.rows, ids);
        self.selection_event()
    }

    pub fn select_all(&mut self) -> TableEvent {
        self.selected = self.rows().map(|row| row.id.clone()).collect();
        self.selection_event()
    }

    /// Adds or removes one row from the selection and focuses it.
    pub fn toggle(&mut self, id: &RowId) -> TableEvent {
        if self.contains(id) {
            if let Some(position) = self.selected.iter().position(|selected| selected == id) {
                self.selected.remove(position);
            } else {
                self.selected.push(id.clone());
            }
            self.focused = Some(id.clone());
        }
        self.selection_event()
    }

    /// Moves the focus by `delta` display rows and makes the focused row the
    /// whole selection.
    pub fn move_focus(&mut self, delta: isize) -> Option<TableEvent> {
        if self.rows.is_empty() {
            return None;
        }

        let current = self.focused_position().unwrap_or(0);
        let next = if delta.is_negative() {
            current.saturating_sub(delta.unsigned_abs())
        } else {
            current.saturating_add(delta as usize)
        };
        let next = next.min(self.rows.len().saturating_sub(1));
        let id = self.row_at(next)?.id.clone();
        self.focused = Some(id.clone());
        Some(self.select([id]))
    }

    fn selection_event(&self) -> TableEvent {
        TableEvent::SelectionChanged(self.selected.clone())
    }

    fn resort(&mut self) {
        self.order = (0..self.rows.len()).collect();
        let Some(sort) = self.sort else {
            return;
        };

        let rows = &self.rows;
        // Byte-wise ordinal comparison; `sort_by` is stable so equal keys keep
        // insertion order.
        self.order
            .sort_by(|left, right| rows[*left].field(sort.column).cmp(rows[*right].field(sort.column)));
        if sort.direction == SortDirection::Desc {
            self.order.reverse();
        }
    }
}

fn dedup_existing<I>(rows: &[DisplayRow], ids: I) -> Vec<RowId>
where
    I: IntoIterator<Item = RowId>,
{
    let mut out: Vec<RowId> = Vec::new();
    for id in ids {
        if out.contains(&id) || !rows.iter().any(|row| row.id == id) {
            continue;
        }
        out.push(id);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{SortSpec, SortableTable, TableEvent};
    use crate::{DisplayRow, RowId, SortDirection, StatusTag};

    const COLUMNS: [&str; 2] = ["name", "type"];

    fn row(id: &str, name: &str, kind: &str) -> DisplayRow {
        DisplayRow {
            id: RowId::new(id),
            fields: vec![name.to_owned(), kind.to_owned()],
            tag: StatusTag::Active,
            state: "",
        }
    }

    fn ids(table: &SortableTable) -> Vec<&str> {
        table.rows().map(|row| row.id.as_str()).collect()
    }

    fn sample() -> Vec<DisplayRow> {
        vec![
            row("1", "b", "ldap"),
            row("2", "a", "ip"),
            row("3", "b", "ad"),
            row("4", "C", "ip"),
        ]
    }

    #[test]
    fn replace_auto_selects_and_focuses_first_row() {
        let mut table = SortableTable::new(&COLUMNS);
        let events = table.replace(sample());

        assert_eq!(
            events,
            vec![
                TableEvent::RowsReplaced { count: 4 },
                TableEvent::SelectionChanged(vec![RowId::new("1")]),
            ]
        );
        assert_eq!(table.focused(), Some(&RowId::new("1")));
    }

    #[test]
    fn replace_on_empty_rows_selects_nothing() {
        let mut table = SortableTable::new(&COLUMNS);
        let events = table.replace(Vec::new());
        assert_eq!(events[1], TableEvent::SelectionChanged(Vec::new()));
        assert_eq!(table.focused(), None);
    }

    #[test]
    fn sort_ascending_is_ordinal_and_stable() {
        let mut table = SortableTable::new(&COLUMNS);
        table.replace(sample());

        let spec = table.sort_by(0);
        assert_eq!(
            spec,
            Some(SortSpec {
                column: 0,
                direction: SortDirection::Asc,
            })
        );
        // Uppercase sorts before lowercase under ordinal comparison; the two
        // "b" rows keep their insertion order.
        assert_eq!(ids(&table), vec!["4", "2", "1", "3"]);
    }

    #[test]
    fn sorting_same_column_twice_reverses_order() {
        let mut table = SortableTable::new(&COLUMNS);
        table.replace(sample());

        table.sort_by(0);
        let ascending = ids(&table)
            .into_iter()
            .map(str::to_owned)
            .collect::<Vec<_>>();
        let spec = table.sort_by(0);
        assert_eq!(spec.map(|spec| spec.direction), Some(SortDirection::Desc));

        let mut reversed = ascending;
        reversed.reverse();
        assert_eq!(ids(&table), reversed);
    }

    #[test]
    fn switching_column_restarts_ascending() {
        let mut table = SortableTable::new(&COLUMNS);
        table.replace(sample());

        table.sort_by(0);
        table.sort_by(0);
        let spec = table.sort_by(1);
        assert_eq!(spec.map(|spec| spec.direction), Some(SortDirection::Asc));
        assert_eq!(ids(&table), vec!["3", "2", "4", "1"]);
    }

    #[test]
    fn sort_by_unknown_column_is_ignored() {
        let mut table = SortableTable::new(&COLUMNS);
        table.replace(sample());
        assert_eq!(table.sort_by(5), None);
        assert_eq!(table.sort(), None);
        assert_eq!(ids(&table), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn replace_reapplies_active_sort() {
        let mut table = SortableTable::new(&COLUMNS);
        table.replace(sample());
        table.sort_by(1);

        table.replace(vec![row("9", "x", "zz"), row("8", "y", "aa")]);
        assert_eq!(ids(&table), vec!["8", "9"]);
    }

    #[test]
    fn clear_sort_restores_insertion_order() {
        let mut table = SortableTable::new(&COLUMNS);
        table.replace(sample());
        table.sort_by(0);
        table.clear_sort();
        assert_eq!(ids(&table), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn replace_drops_vanished_selection_silently() {
        let mut table = SortableTable::new(&COLUMNS);
        table.replace(sample());
        table.select([RowId::new("2"), RowId::new("4")]);

        let events = table.replace(vec![row("2", "a", "ip"), row("5", "e", "ip")]);
        assert_eq!(
            events[1],
            TableEvent::SelectionChanged(vec![RowId::new("2")])
        );
        assert_eq!(table.selected(), &[RowId::new("2")]);
    }

    #[test]
    fn replace_reselects_first_row_when_whole_selection_vanishes() {
        let mut table = SortableTable::new(&COLUMNS);
        table.replace(sample());
        table.select([RowId::new("3")]);

        table.replace(vec![row("7", "g", "ip"), row("6", "f", "ip")]);
        assert_eq!(table.selected(), &[RowId::new("7")]);
        assert_eq!(table.focused(), Some(&RowId::new("7")));
    }

    #[test]
    fn repeated_identical_select_emits_each_time() {
        let mut table = SortableTable::new(&COLUMNS);
        table.replace(sample());

        let first = table.select([RowId::new("2")]);
        let second = table.select([RowId::new("2")]);
        assert_eq!(first, second);
        assert!(matches!(second, TableEvent::SelectionChanged(_)));
    }

    #[test]
    fn select_ignores_unknown_and_duplicate_ids() {
        let mut table = SortableTable::new(&COLUMNS);
        table.replace(sample());

        table.select([
            RowId::new("3"),
            RowId::new("missing"),
            RowId::new("1"),
            RowId::new("3"),
        ]);
        assert_eq!(table.selected(), &[RowId::new("3"), RowId::new("1")]);
    }

    #[test]
    fn select_all_uses_display_order() {
        let mut table = SortableTable::new(&COLUMNS);
        table.replace(sample());
        table.sort_by(1);

        let event = table.select_all();
        assert_eq!(
            event,
            TableEvent::SelectionChanged(vec![
                RowId::new("3"),
                RowId::new("2"),
                RowId::new("4"),
                RowId::new("1"),
            ])
        );
    }

    #[test]
    fn toggle_adds_and_removes() {
        let mut table = SortableTable::new(&COLUMNS);
        table.replace(sample());

        table.toggle(&RowId::new("3"));
        assert_eq!(table.selected(), &[RowId::new("1"), RowId::new("3")]);
        table.toggle(&RowId::new("1"));
        assert_eq!(table.selected(), &[RowId::new("3")]);
        assert_eq!(table.focused(), Some(&RowId::new("1")));
    }

    #[test]
    fn move_focus_clamps_and_selects_focused_row() {
        let mut table = SortableTable::new(&COLUMNS);
        assert_eq!(table.move_focus(1), None);

        table.replace(sample());
        table.move_focus(2);
        assert_eq!(table.selected(), &[RowId::new("3")]);
        table.move_focus(10);
        assert_eq!(table.focused_position(), Some(3));
        table.move_focus(-10);
        assert_eq!(table.focused(), Some(&RowId::new("1")));
    }
}
