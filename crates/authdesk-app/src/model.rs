// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Deserializer, Serialize};

use crate::ids::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Authenticators,
}

impl ResourceKind {
    pub const ALL: [Self; 1] = [Self::Authenticators];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Authenticators => "authenticators",
        }
    }

    pub const fn columns(self) -> &'static [&'static str] {
        match self {
            Self::Authenticators => &["name", "type", "comments", "priority"],
        }
    }
}

/// Renderer-facing colour class of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusTag {
    Active,
    Inactive,
    Pending,
    Error,
    Unknown,
}

impl StatusTag {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Pending => "pending",
            Self::Error => "error",
            Self::Unknown => "unknown",
        }
    }
}

/// One-letter lifecycle codes the server attaches to managed objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectState {
    Active,
    Inactive,
    Blocked,
    Launching,
    Preparing,
    Usable,
    Removable,
    Removing,
    Removed,
    Canceled,
    Canceling,
    Error,
    Running,
    Finished,
    ForExecute,
}

impl ObjectState {
    pub const fn code(self) -> &'static str {
        match self {
            Self::Active => "A",
            Self::Inactive => "I",
            Self::Blocked => "B",
            Self::Launching => "L",
            Self::Preparing => "P",
            Self::Usable => "U",
            Self::Removable => "R",
            Self::Removing => "M",
            Self::Removed => "S",
            Self::Canceled => "C",
            Self::Canceling => "K",
            Self::Error => "E",
            Self::Running => "W",
            Self::Finished => "F",
            Self::ForExecute => "X",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "A" => Some(Self::Active),
            "I" => Some(Self::Inactive),
            "B" => Some(Self::Blocked),
            "L" => Some(Self::Launching),
            "P" => Some(Self::Preparing),
            "U" => Some(Self::Usable),
            "R" => Some(Self::Removable),
            "M" => Some(Self::Removing),
            "S" => Some(Self::Removed),
            "C" => Some(Self::Canceled),
            "K" => Some(Self::Canceling),
            "E" => Some(Self::Error),
            "W" => Some(Self::Running),
            "F" => Some(Self::Finished),
            "X" => Some(Self::ForExecute),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Blocked => "Blocked",
            Self::Launching => "Waiting publication",
            Self::Preparing => "In preparation",
            Self::Usable => "Valid",
            Self::Removable => "Waiting for removal",
            Self::Removing => "Removing",
            Self::Removed => "Removed",
            Self::Canceled => "Canceled",
            Self::Canceling => "Canceling",
            Self::Error => "Error",
            Self::Running => "Running",
            Self::Finished => "Finished",
            Self::ForExecute => "Waiting execution",
        }
    }

    pub const fn tag(self) -> StatusTag {
        match self {
            Self::Active | Self::Usable => StatusTag::Active,
            Self::Inactive | Self::Blocked | Self::Finished => StatusTag::Inactive,
            Self::Launching
            | Self::Preparing
            | Self::Removable
            | Self::Removing
            | Self::Canceling
            | Self::Running
            | Self::ForExecute => StatusTag::Pending,
            Self::Error | Self::Canceled | Self::Removed => StatusTag::Error,
        }
    }
}

/// Label for a raw state code; unknown codes render empty.
pub fn state_label(code: &str) -> &'static str {
    ObjectState::parse(code).map_or("", ObjectState::label)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
    Other,
}

impl LogLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARN",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
            Self::Other => "OTHER",
        }
    }

    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if let Ok(code) = trimmed.parse::<i64>() {
            return match code {
                ..=10_000 => Self::Debug,
                10_001..=20_000 => Self::Info,
                20_001..=30_000 => Self::Warning,
                30_001..=40_000 => Self::Error,
                _ => Self::Critical,
            };
        }

        match trimmed.to_ascii_lowercase().as_str() {
            "debug" => Self::Debug,
            "info" => Self::Info,
            "warn" | "warning" => Self::Warning,
            "error" => Self::Error,
            "critical" | "fatal" => Self::Critical,
            _ => Self::Other,
        }
    }

    pub const fn tag(self) -> StatusTag {
        match self {
            Self::Error | Self::Critical => StatusTag::Error,
            Self::Warning => StatusTag::Pending,
            Self::Debug => StatusTag::Inactive,
            Self::Info | Self::Other => StatusTag::Active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Authenticator {
    pub id: AuthenticatorId,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub type_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub comments: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub priority: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub state: String,
}

impl Authenticator {
    pub fn tag(&self) -> StatusTag {
        if self.state.trim().is_empty() {
            return StatusTag::Active;
        }
        ObjectState::parse(&self.state).map_or(StatusTag::Unknown, ObjectState::tag)
    }

    /// Label shown for the state; a missing state reads as active.
    pub fn state_label(&self) -> &'static str {
        if self.state.trim().is_empty() {
            return ObjectState::Active.label();
        }
        state_label(&self.state)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(default, alias = "date", deserialize_with = "lenient_string")]
    pub timestamp: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub level: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub source: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: String,
}

impl LogEntry {
    pub fn log_level(&self) -> LogLevel {
        LogLevel::parse(&self.level)
    }
}

/// A listing record tagged with the resource kind it was fetched for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteRecord {
    Authenticator(Authenticator),
}

impl RemoteRecord {
    pub const fn kind(&self) -> ResourceKind {
        match self {
            Self::Authenticator(_) => ResourceKind::Authenticators,
        }
    }

    pub fn row_id(&self) -> RowId {
        match self {
            Self::Authenticator(auth) => RowId::from(auth.id.clone()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DashboardOverview {
    #[serde(default)]
    pub users: u64,
    #[serde(default)]
    pub services: u64,
    #[serde(default)]
    pub user_services: u64,
    #[serde(default)]
    pub restrained_services_pools: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKind {
    Assigned,
    InUse,
}

impl StatKind {
    pub const ALL: [Self; 2] = [Self::Assigned, Self::InUse];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assigned => "assigned",
            Self::InUse => "inuse",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Assigned => "assigned",
            Self::InUse => "in use",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatPoint {
    pub stamp: i64,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pane {
    Authenticators,
    Dashboard,
}

impl Pane {
    pub const ALL: [Self; 2] = [Self::Authenticators, Self::Dashboard];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Authenticators => "authenticators",
            Self::Dashboard => "dashboard",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppMode {
    Nav,
    ItemsDialog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

// Servers are loose about scalar types: priorities arrive as numbers, levels
// as codes, and absent values as null.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<LenientValue>::deserialize(deserializer)?;
    Ok(match value {
        None => String::new(),
        Some(LenientValue::Text(value)) => value,
        Some(LenientValue::Integer(value)) => value.to_string(),
        Some(LenientValue::Float(value)) => value.to_string(),
        Some(LenientValue::Bool(value)) => value.to_string(),
    })
}
