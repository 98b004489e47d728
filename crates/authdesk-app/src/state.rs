// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{AppMode, Pane};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub mode: AppMode,
    pub active_pane: Pane,
    pub status_line: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: AppMode::Nav,
            active_pane: Pane::Authenticators,
            status_line: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    NextPane,
    PrevPane,
    OpenItemsDialog,
    CloseItemsDialog,
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    ModeChanged(AppMode),
    PaneChanged(Pane),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::NextPane => self.rotate_pane(1),
            AppCommand::PrevPane => self.rotate_pane(-1),
            AppCommand::OpenItemsDialog => {
                self.mode = AppMode::ItemsDialog;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::CloseItemsDialog => {
                self.mode = AppMode::Nav;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::SetStatus(message) => vec![self.set_status(&message)],
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    fn rotate_pane(&mut self, delta: isize) -> Vec<AppEvent> {
        let panes = Pane::ALL;
        let current = panes
            .iter()
            .position(|pane| *pane == self.active_pane)
            .unwrap_or(0) as isize;
        let len = panes.len() as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.active_pane = panes[next];
        vec![AppEvent::PaneChanged(self.active_pane)]
    }

    fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }
}
