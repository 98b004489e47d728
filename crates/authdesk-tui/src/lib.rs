// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use authdesk_app::{
    AppCommand, AppMode, AppState, CollectionDialog, DashboardView, DetailBatch, DetailRequest,
    FailureNotifier, Generation, ItemList, ItemListEditor, LOG_COLUMNS, LoadPhase, LogEntry,
    LogRowMapper, NotificationQueue, Pane, RemoteCallError, RemoteListView, RemoteRecord,
    ResourceKind, RowId, SortDirection, SortableTable, StatKind, StatPoint, StatusTag, TableEvent,
    notification_text, series_bounds,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Tabs};
use std::collections::VecDeque;
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use time::OffsetDateTime;
use time::format_description;
use tracing::debug;

const PAGE_ROWS: isize = 10;
const SPARK_BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Presentation settings handed over by the binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiOptions {
    pub date_format: String,
    pub highlight: Vec<String>,
    pub show_dashboard: bool,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            date_format: "[year]-[month]-[day]".to_owned(),
            highlight: Vec::new(),
            show_dashboard: true,
        }
    }
}

/// Collects failures without logging them, for work done off the UI thread.
/// The UI forwards them to its `NotificationQueue`, which logs once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectedFailures(pub Vec<RemoteCallError>);

impl FailureNotifier for CollectedFailures {
    fn notify(&mut self, error: &RemoteCallError) {
        self.0.push(error.clone());
    }
}

/// Data access for the UI. The `spawn_*` defaults run inline; a runtime
/// backed by a network client overrides them to run on worker threads.
pub trait AppRuntime {
    fn load_listing(&mut self, kind: ResourceKind) -> Result<Vec<RemoteRecord>, RemoteCallError>;
    fn load_details(&mut self, ids: &[RowId]) -> DetailBatch<LogEntry>;
    fn load_dashboard(&mut self) -> (DashboardView, Vec<RemoteCallError>);

    fn spawn_listing(
        &mut self,
        kind: ResourceKind,
        generation: Generation,
        tx: Sender<InternalEvent>,
    ) -> Result<()> {
        let result = self.load_listing(kind);
        tx.send(InternalEvent::Listing { generation, result })
            .map_err(|_| anyhow!("listing event channel closed"))
    }

    fn spawn_details(&mut self, request: DetailRequest, tx: Sender<InternalEvent>) -> Result<()> {
        let batch = self.load_details(&request.ids);
        tx.send(InternalEvent::Details {
            generation: request.generation,
            batch,
        })
        .map_err(|_| anyhow!("detail event channel closed"))
    }

    fn spawn_dashboard(&mut self, request_id: u64, tx: Sender<InternalEvent>) -> Result<()> {
        let (view, failures) = self.load_dashboard();
        tx.send(InternalEvent::Dashboard {
            request_id,
            view,
            failures,
        })
        .map_err(|_| anyhow!("dashboard event channel closed"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InternalEvent {
    ClearStatus {
        token: u64,
    },
    Listing {
        generation: Generation,
        result: Result<Vec<RemoteRecord>, RemoteCallError>,
    },
    Details {
        generation: Generation,
        batch: DetailBatch<LogEntry>,
    },
    Dashboard {
        request_id: u64,
        view: DashboardView,
        failures: Vec<RemoteCallError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyOutcome {
    Continue,
    Quit,
    EditHighlights,
}

#[derive(Debug)]
struct ViewData {
    authenticators: RemoteListView<LogEntry>,
    dashboard: DashboardView,
    dashboard_request: u64,
    notifications: NotificationQueue,
    /// Failure messages waiting for their turn on the status line.
    pending_failures: VecDeque<String>,
    showing_failures: bool,
    highlights: ItemListEditor,
    date_format: String,
    column: usize,
    help_visible: bool,
    status_token: u64,
}

impl ViewData {
    fn new(options: &UiOptions) -> Self {
        let mut highlights = ItemListEditor::new("log highlight terms");
        highlights.set_items(options.highlight.iter().cloned());
        Self {
            authenticators: RemoteListView::new(ResourceKind::Authenticators),
            dashboard: DashboardView::default(),
            dashboard_request: 0,
            notifications: NotificationQueue::new(),
            pending_failures: VecDeque::new(),
            showing_failures: false,
            highlights,
            date_format: options.date_format.clone(),
            column: 0,
            help_visible: false,
            status_token: 0,
        }
    }
}

/// Runs the console until the user quits. Returns the highlight terms as
/// they stand at exit.
pub fn run_app<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    options: &UiOptions,
) -> Result<Vec<String>> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::new(options);
    let (internal_tx, internal_rx) = mpsc::channel();

    if options.show_dashboard {
        state.active_pane = Pane::Dashboard;
        request_dashboard(state, runtime, &mut view_data, &internal_tx);
    }
    request_refresh(state, runtime, &mut view_data, &internal_tx);

    let mut result = Ok(());
    loop {
        process_internal_events(state, runtime, &mut view_data, &internal_tx, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, state, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = event::poll(Duration::from_millis(120)).context("poll event")?;
        if !has_event {
            continue;
        }
        if let Event::Key(key) = event::read().context("read event")? {
            match handle_key_event(state, runtime, &mut view_data, &internal_tx, key) {
                KeyOutcome::Continue => {}
                KeyOutcome::Quit => break,
                KeyOutcome::EditHighlights => {
                    if let Err(error) = edit_highlights(state, &mut view_data, &mut terminal) {
                        result = Err(error);
                        break;
                    }
                    let count = view_data.highlights.item_list().len();
                    emit_status(
                        state,
                        &mut view_data,
                        &internal_tx,
                        format!("{count} highlight terms"),
                    );
                }
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result.map(|()| view_data.highlights.items())
}

fn edit_highlights<B: Backend>(
    state: &mut AppState,
    view_data: &mut ViewData,
    terminal: &mut Terminal<B>,
) -> Result<()> {
    state.dispatch(AppCommand::OpenItemsDialog);
    let mut dialog = TerminalItemsDialog { terminal };
    let result = view_data.highlights.open(&mut dialog);
    state.dispatch(AppCommand::CloseItemsDialog);
    result
}

fn process_internal_events<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                if !show_next_failure(state, view_data, tx) {
                    state.dispatch(AppCommand::ClearStatus);
                }
            }
            InternalEvent::ClearStatus { .. } => {}
            InternalEvent::Listing { generation, result } => {
                let events = view_data.authenticators.finish_refresh(
                    generation,
                    result,
                    &mut view_data.notifications,
                );
                handle_table_events(state, runtime, view_data, tx, &events);
            }
            InternalEvent::Details { generation, batch } => {
                view_data.authenticators.details_mut().publish(
                    generation,
                    batch,
                    &mut view_data.notifications,
                );
            }
            InternalEvent::Dashboard {
                request_id,
                view,
                failures,
            } => {
                for error in &failures {
                    view_data.notifications.notify(error);
                }
                if request_id == view_data.dashboard_request {
                    view_data.dashboard = view;
                } else {
                    debug!(request_id, "dropping stale dashboard");
                }
            }
        }
    }
    flush_notifications(state, view_data, tx);
}

/// Queues drained failures. Each one gets its own turn on the status line,
/// the next shown when the previous status expires.
fn flush_notifications(state: &mut AppState, view_data: &mut ViewData, tx: &Sender<InternalEvent>) {
    let failures = view_data.notifications.drain();
    view_data
        .pending_failures
        .extend(failures.iter().map(notification_text));
    if !view_data.showing_failures {
        show_next_failure(state, view_data, tx);
    }
}

fn show_next_failure(
    state: &mut AppState,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
) -> bool {
    let Some(mut message) = view_data.pending_failures.pop_front() else {
        view_data.showing_failures = false;
        return false;
    };
    let remaining = view_data.pending_failures.len();
    if remaining > 0 {
        message.push_str(&format!(" (+{remaining} more)"));
    }
    view_data.showing_failures = true;
    emit_status(state, view_data, tx, message);
    true
}

fn handle_table_events<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    events: &[TableEvent],
) {
    for event in events {
        if let TableEvent::SelectionChanged(ids) = event {
            request_details(state, runtime, view_data, tx, ids);
        }
    }
}

fn request_details<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    ids: &[RowId],
) {
    let request = view_data.authenticators.details_mut().begin(ids);
    if let Err(error) = runtime.spawn_details(request, tx.clone()) {
        emit_status(state, view_data, tx, format!("log load failed: {error:#}"));
    }
}

fn request_refresh<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
) {
    let kind = view_data.authenticators.kind();
    let generation = view_data.authenticators.begin_refresh();
    debug!(kind = kind.as_str(), generation = generation.get(), "refresh requested");
    if let Err(error) = runtime.spawn_listing(kind, generation, tx.clone()) {
        emit_status(state, view_data, tx, format!("refresh failed: {error:#}"));
    }
}

fn request_dashboard<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
) {
    view_data.dashboard_request = view_data.dashboard_request.saturating_add(1);
    if let Err(error) = runtime.spawn_dashboard(view_data.dashboard_request, tx.clone()) {
        emit_status(state, view_data, tx, format!("dashboard load failed: {error:#}"));
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(Duration::from_secs(4));
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    state.dispatch(AppCommand::SetStatus(message.into()));
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> KeyOutcome {
    if view_data.help_visible {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
        ) {
            view_data.help_visible = false;
        }
        return KeyOutcome::Continue;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('q') | KeyCode::Char('c'), KeyModifiers::CONTROL)
        | (KeyCode::Char('q'), KeyModifiers::NONE) => return KeyOutcome::Quit,
        (KeyCode::Char('?'), _) => view_data.help_visible = true,
        (KeyCode::Char('e'), KeyModifiers::NONE) => return KeyOutcome::EditHighlights,
        (KeyCode::Tab, _) => {
            state.dispatch(AppCommand::NextPane);
            on_pane_entered(state, runtime, view_data, internal_tx);
        }
        (KeyCode::BackTab, _) => {
            state.dispatch(AppCommand::PrevPane);
            on_pane_entered(state, runtime, view_data, internal_tx);
        }
        (KeyCode::Char('r'), KeyModifiers::NONE) | (KeyCode::F(5), _) => match state.active_pane
        {
            Pane::Authenticators => {
                request_refresh(state, runtime, view_data, internal_tx);
                emit_status(state, view_data, internal_tx, "refreshing authenticators");
            }
            Pane::Dashboard => {
                request_dashboard(state, runtime, view_data, internal_tx);
                emit_status(state, view_data, internal_tx, "refreshing dashboard");
            }
        },
        _ if state.active_pane == Pane::Authenticators => {
            handle_table_key(state, runtime, view_data, internal_tx, key);
        }
        _ => {}
    }
    KeyOutcome::Continue
}

fn on_pane_entered<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    match state.active_pane {
        Pane::Authenticators => request_refresh(state, runtime, view_data, internal_tx),
        Pane::Dashboard => request_dashboard(state, runtime, view_data, internal_tx),
    }
}

fn handle_table_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let column_count = view_data.authenticators.table().columns().len();
    let table = view_data.authenticators.table_mut();
    let event = match (key.code, key.modifiers) {
        (KeyCode::Char('j') | KeyCode::Down, _) => table.move_focus(1),
        (KeyCode::Char('k') | KeyCode::Up, _) => table.move_focus(-1),
        (KeyCode::PageDown, _) => table.move_focus(PAGE_ROWS),
        (KeyCode::PageUp, _) => table.move_focus(-PAGE_ROWS),
        (KeyCode::Char(' '), _) => match table.focused().cloned() {
            Some(id) => Some(table.toggle(&id)),
            None => None,
        },
        (KeyCode::Char('e'), KeyModifiers::CONTROL) | (KeyCode::Char('a'), KeyModifiers::NONE) => {
            Some(table.select_all())
        }
        (KeyCode::Char('h') | KeyCode::Left, _) => {
            view_data.column = view_data.column.saturating_sub(1);
            None
        }
        (KeyCode::Char('l') | KeyCode::Right, _) => {
            view_data.column = (view_data.column + 1).min(column_count.saturating_sub(1));
            None
        }
        (KeyCode::Char('s'), KeyModifiers::NONE) => {
            let message = match table.sort_by(view_data.column) {
                Some(sort) => format!(
                    "sorted by {} {}",
                    table.columns()[sort.column],
                    sort.direction.as_str()
                ),
                None => "nothing to sort".to_owned(),
            };
            emit_status(state, view_data, internal_tx, message);
            None
        }
        (KeyCode::Char('S'), _) => {
            table.clear_sort();
            emit_status(state, view_data, internal_tx, "sort cleared");
            None
        }
        _ => None,
    };

    if let Some(event) = event {
        handle_table_events(state, runtime, view_data, internal_tx, &[event]);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct ItemsDialogUi {
    cursor: usize,
    edit: Option<ItemEdit>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ItemEdit {
    target: EditTarget,
    text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditTarget {
    Append,
    Insert(usize),
    Replace(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DialogFlow {
    Continue,
    Close,
}

/// Modal list editor drawn over the whole terminal. It runs its own key
/// loop and edits the list it is given directly.
struct TerminalItemsDialog<'a, B: Backend> {
    terminal: &'a mut Terminal<B>,
}

impl<B: Backend> CollectionDialog for TerminalItemsDialog<'_, B> {
    fn show_modal(&mut self, title: &str, items: &mut ItemList) -> Result<()> {
        let mut ui = ItemsDialogUi::default();
        loop {
            self.terminal
                .draw(|frame| render_items_dialog(frame, title, items, &ui))
                .context("draw items dialog")?;

            if !event::poll(Duration::from_millis(120)).context("poll event")? {
                continue;
            }
            if let Event::Key(key) = event::read().context("read event")?
                && handle_items_dialog_key(&mut ui, items, key) == DialogFlow::Close
            {
                return Ok(());
            }
        }
    }
}

fn handle_items_dialog_key(ui: &mut ItemsDialogUi, items: &mut ItemList, key: KeyEvent) -> DialogFlow {
    if ui.edit.is_some() {
        handle_item_edit_key(ui, items, key);
        return DialogFlow::Continue;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => return DialogFlow::Close,
        KeyCode::Char('j') | KeyCode::Down => {
            ui.cursor = (ui.cursor + 1).min(items.len().saturating_sub(1));
        }
        KeyCode::Char('k') | KeyCode::Up => ui.cursor = ui.cursor.saturating_sub(1),
        KeyCode::Char('a') => {
            ui.edit = Some(ItemEdit {
                target: EditTarget::Append,
                text: String::new(),
            });
        }
        KeyCode::Char('i') => {
            ui.edit = Some(ItemEdit {
                target: EditTarget::Insert(ui.cursor),
                text: String::new(),
            });
        }
        KeyCode::Enter => {
            if let Some(current) = items.get(ui.cursor) {
                ui.edit = Some(ItemEdit {
                    target: EditTarget::Replace(ui.cursor),
                    text: current.to_owned(),
                });
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if items.remove(ui.cursor).is_some() {
                ui.cursor = ui.cursor.min(items.len().saturating_sub(1));
            }
        }
        KeyCode::Char('K') => {
            if let Some(index) = items.move_up(ui.cursor) {
                ui.cursor = index;
            }
        }
        KeyCode::Char('J') => {
            if let Some(index) = items.move_down(ui.cursor) {
                ui.cursor = index;
            }
        }
        _ => {}
    }
    DialogFlow::Continue
}

fn handle_item_edit_key(ui: &mut ItemsDialogUi, items: &mut ItemList, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => ui.edit = None,
        KeyCode::Enter => {
            if let Some(edit) = ui.edit.take() {
                commit_item_edit(ui, items, edit);
            }
        }
        KeyCode::Backspace => {
            if let Some(edit) = ui.edit.as_mut() {
                edit.text.pop();
            }
        }
        KeyCode::Char(ch) => {
            if let Some(edit) = ui.edit.as_mut() {
                edit.text.push(ch);
            }
        }
        _ => {}
    }
}

fn commit_item_edit(ui: &mut ItemsDialogUi, items: &mut ItemList, edit: ItemEdit) {
    let text = edit.text.trim();
    if text.is_empty() {
        return;
    }
    match edit.target {
        EditTarget::Append => ui.cursor = items.push(text),
        EditTarget::Insert(index) => ui.cursor = items.insert(index, text),
        EditTarget::Replace(index) => {
            items.set(index, text);
        }
    }
}

fn render_items_dialog(
    frame: &mut ratatui::Frame<'_>,
    title: &str,
    items: &ItemList,
    ui: &ItemsDialogUi,
) {
    let area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, area);
    let dialog = Paragraph::new(items_dialog_text(items, ui)).block(
        Block::default()
            .title(title.to_owned())
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(dialog, area);
}

fn items_dialog_text(items: &ItemList, ui: &ItemsDialogUi) -> String {
    let mut lines = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let marker = if index == ui.cursor { ">" } else { " " };
            format!("{marker} {item}")
        })
        .collect::<Vec<_>>();
    if lines.is_empty() {
        lines.push("  (empty)".to_owned());
    }
    lines.push(String::new());
    match &ui.edit {
        Some(edit) => {
            let verb = match edit.target {
                EditTarget::Append => "add",
                EditTarget::Insert(_) => "insert",
                EditTarget::Replace(_) => "edit",
            };
            lines.push(format!("{verb}: {}_", edit.text));
            lines.push("enter save  esc discard".to_owned());
        }
        None => lines.push(
            "a add  i insert  enter edit  d delete  K/J move  esc close".to_owned(),
        ),
    }
    lines.join("\n")
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(frame.area());

    let selected = Pane::ALL
        .iter()
        .position(|pane| *pane == state.active_pane)
        .unwrap_or(0);
    let titles = Pane::ALL
        .iter()
        .map(|pane| pane.label().to_owned())
        .collect::<Vec<String>>();
    let tabs = Tabs::new(titles)
        .block(Block::default().title("authdesk").borders(Borders::ALL))
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .select(selected);
    frame.render_widget(tabs, layout[0]);

    match state.active_pane {
        Pane::Authenticators => render_authenticators(frame, layout[1], view_data),
        Pane::Dashboard => {
            let body = Paragraph::new(render_dashboard_text(
                &view_data.dashboard,
                &view_data.date_format,
            ))
            .block(Block::default().borders(Borders::ALL).title("dashboard"));
            frame.render_widget(body, layout[1]);
        }
    }

    let status_widget = Paragraph::new(status_text(state))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_widget, layout[2]);

    if view_data.help_visible {
        let area = centered_rect(70, 60, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn render_authenticators(frame: &mut ratatui::Frame<'_>, area: Rect, view_data: &ViewData) {
    let panes = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let table_state = view_data.authenticators.table();
    let header = Row::new((0..table_state.columns().len()).map(|column| {
        Cell::from(header_label_for_column(table_state, column)).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    }));

    let focused = table_state.focused();
    let rows = table_state.rows().map(|row| {
        let is_focused = focused == Some(&row.id);
        let mut style = Style::default().fg(tag_color(row.tag));
        if table_state.is_selected(&row.id) {
            style = style.bg(Color::DarkGray);
        }
        let cells = (0..table_state.columns().len())
            .map(|column| {
                let cell = Cell::from(row.field(column));
                if is_focused && column == view_data.column {
                    cell.style(
                        Style::default()
                            .fg(Color::Black)
                            .bg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    cell
                }
            })
            .collect::<Vec<_>>();
        Row::new(cells).style(style)
    });

    let widths = [
        Constraint::Percentage(25),
        Constraint::Percentage(20),
        Constraint::Min(12),
        Constraint::Length(10),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(
            Block::default()
                .title(table_title(table_state))
                .borders(Borders::ALL),
        );
    frame.render_widget(table, panes[0]);

    render_logs(frame, panes[1], view_data);
}

fn render_logs(frame: &mut ratatui::Frame<'_>, area: Rect, view_data: &ViewData) {
    let details = view_data.authenticators.details();
    let terms = view_data.highlights.item_list();
    let mapper = LogRowMapper;

    let header = Row::new(LOG_COLUMNS.map(|label| {
        Cell::from(label).style(Style::default().add_modifier(Modifier::BOLD))
    }));
    let rows = details.content().iter().enumerate().map(|(index, entry)| {
        let row = mapper.map_indexed(index, entry);
        let mut style = Style::default().fg(tag_color(row.tag));
        if highlight_matches(&entry.message, terms) {
            style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
        }
        Row::new(row.fields).style(style)
    });

    let widths = [
        Constraint::Length(20),
        Constraint::Length(9),
        Constraint::Length(14),
        Constraint::Min(20),
    ];
    let table = Table::new(rows, widths).header(header).column_spacing(1).block(
        Block::default()
            .title(logs_title(details.phase(), details.content().len()))
            .borders(Borders::ALL),
    );
    frame.render_widget(table, area);
}

fn tag_color(tag: StatusTag) -> Color {
    match tag {
        StatusTag::Active => Color::Green,
        StatusTag::Inactive => Color::Gray,
        StatusTag::Pending => Color::Yellow,
        StatusTag::Error => Color::Red,
        StatusTag::Unknown => Color::Magenta,
    }
}

fn header_label_for_column(table: &SortableTable, column: usize) -> String {
    let mut label = table
        .columns()
        .get(column)
        .copied()
        .unwrap_or_default()
        .to_owned();
    if let Some(sort) = table.sort()
        && sort.column == column
    {
        label.push_str(match sort.direction {
            SortDirection::Asc => " ↑",
            SortDirection::Desc => " ↓",
        });
    }
    label
}

fn table_title(table: &SortableTable) -> String {
    let mut title = format!(
        "authenticators | {} rows | {} selected",
        table.len(),
        table.selected().len()
    );
    if let Some(sort) = table.sort()
        && let Some(column) = table.columns().get(sort.column)
    {
        title.push_str(&format!(" | sorted by {column} {}", sort.direction.as_str()));
    }
    if let Some(row) = table.focused().and_then(|id| table.row(id))
        && !row.state.is_empty()
    {
        title.push_str(&format!(" | {}: {}", row.field(0), row.state));
    }
    title
}

fn logs_title(phase: LoadPhase, count: usize) -> String {
    match phase {
        LoadPhase::Idle => "logs".to_owned(),
        LoadPhase::Loading => "logs (loading)".to_owned(),
        LoadPhase::Loaded => format!("logs ({count})"),
        LoadPhase::PartiallyFailed => format!("logs ({count}, some failed)"),
    }
}

fn highlight_matches(message: &str, terms: &ItemList) -> bool {
    let message = message.to_lowercase();
    terms
        .iter()
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .any(|term| message.contains(&term.to_lowercase()))
}

fn render_dashboard_text(view: &DashboardView, date_format: &str) -> String {
    let mut lines = match view.overview {
        Some(overview) => vec![
            format!("users: {}", overview.users),
            format!("services: {}", overview.services),
            format!("user services: {}", overview.user_services),
            format!(
                "restrained service pools: {}",
                overview.restrained_services_pools
            ),
        ],
        None => vec!["overview unavailable".to_owned()],
    };
    for kind in StatKind::ALL {
        lines.push(String::new());
        lines.push(series_summary(kind, view.series(kind), date_format));
        let spark = sparkline_text(view.series(kind));
        if !spark.is_empty() {
            lines.push(spark);
        }
    }
    lines.join("\n")
}

fn series_summary(kind: StatKind, points: &[StatPoint], date_format: &str) -> String {
    let (Some(first), Some(last), Some((low, high))) =
        (points.first(), points.last(), series_bounds(points))
    else {
        return format!("{}: no data", kind.label());
    };
    format!(
        "{}: {} .. {}  min {low:.1}  max {high:.1}",
        kind.label(),
        format_stamp(first.stamp, date_format),
        format_stamp(last.stamp, date_format),
    )
}

fn sparkline_text(points: &[StatPoint]) -> String {
    let Some((low, high)) = series_bounds(points) else {
        return String::new();
    };
    let span = high - low;
    points
        .iter()
        .map(|point| {
            let level = if span > 0.0 {
                ((point.value - low) / span * 7.0).round() as usize
            } else {
                0
            };
            SPARK_BARS[level.min(SPARK_BARS.len() - 1)]
        })
        .collect()
}

fn format_stamp(stamp: i64, date_format: &str) -> String {
    let Ok(items) = format_description::parse_owned::<2>(date_format) else {
        return stamp.to_string();
    };
    OffsetDateTime::from_unix_timestamp(stamp)
        .ok()
        .and_then(|moment| moment.format(&items).ok())
        .unwrap_or_else(|| stamp.to_string())
}

fn status_text(state: &AppState) -> String {
    if state.mode == AppMode::ItemsDialog {
        return "editing highlight terms".to_owned();
    }
    state.status_line.clone().unwrap_or_else(|| {
        "tab pane  j/k move  space select  a all  s sort  r refresh  e highlights  ? help  q quit"
            .to_owned()
    })
}

fn help_overlay_text() -> &'static str {
    "tab / shift-tab   switch pane (reloads it)\n\
     j / k             move focus (selects the row)\n\
     pgup / pgdn       move by a page\n\
     space             toggle row in selection\n\
     a / ctrl+e        select all rows\n\
     h / l             choose column\n\
     s / S             sort by column, clear sort\n\
     r / F5            refresh the current pane\n\
     e                 edit log highlight terms\n\
     q / ctrl+q        quit"
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
