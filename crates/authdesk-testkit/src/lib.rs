// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use authdesk_app::{
    Authenticator, AuthenticatorId, CollectionDialog, DashboardOverview, DashboardSource,
    DetailSource, FailureNotifier, ItemList, LogEntry, RemoteCallError, RemoteListSource,
    RemoteRecord, ResourceKind, RowId, StatKind, StatPoint,
};
use std::collections::{BTreeMap, BTreeSet};
use time::{Duration, OffsetDateTime};
use time::macros::{datetime, format_description};

const AUTH_TYPES: [&str; 6] = ["LDAP", "Active Directory", "IP", "Internal", "SAML", "OAuth2"];

const AUTH_NAMES: [&str; 10] = [
    "Corporate", "Campus", "Guests", "Partners", "Lab", "Staff", "Contractors", "Kiosk",
    "Remote", "Legacy",
];

const LOG_SOURCES: [&str; 4] = ["internal", "web", "admin", "service"];
const LOG_LEVELS: [&str; 5] = ["DEBUG", "INFO", "WARN", "ERROR", "CRITICAL"];

const LOG_MESSAGES: [&str; 8] = [
    "user logged in",
    "user logged out",
    "invalid credentials",
    "bind to directory failed",
    "group membership refreshed",
    "session expired",
    "access denied by network rule",
    "token refreshed",
];

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }
}

/// Seeded generator of plausible authenticators, logs and stats.
#[derive(Debug, Clone)]
pub struct AuthFaker {
    rng: DeterministicRng,
    next_id: u64,
}

impl AuthFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            next_id: 1,
        }
    }

    pub fn authenticator(&mut self) -> Authenticator {
        let id = self.next_id;
        self.next_id += 1;
        let type_name = self.pick(&AUTH_TYPES);
        let name = self.pick(&AUTH_NAMES);
        Authenticator {
            id: AuthenticatorId::new(format!("auth-{id:04}")),
            name: format!("{name} {type_name}"),
            type_name: type_name.to_owned(),
            comments: if self.rng.int_n(3) == 0 {
                String::new()
            } else {
                format!("{} users", name.to_ascii_lowercase())
            },
            priority: self.rng.int_n(10).to_string(),
            state: String::new(),
        }
    }

    pub fn authenticators(&mut self, count: usize) -> Vec<Authenticator> {
        (0..count).map(|_| self.authenticator()).collect()
    }

    pub fn log_entry(&mut self, offset_minutes: i64) -> LogEntry {
        let stamp = reference_time() + Duration::minutes(offset_minutes);
        LogEntry {
            timestamp: stamp
                .format(format_description!(
                    "[year]-[month]-[day] [hour]:[minute]:[second]"
                ))
                .unwrap_or_default(),
            level: self.pick(&LOG_LEVELS).to_owned(),
            source: self.pick(&LOG_SOURCES).to_owned(),
            message: self.pick(&LOG_MESSAGES).to_owned(),
        }
    }

    pub fn log_entries(&mut self, count: usize) -> Vec<LogEntry> {
        (0..count as i64).map(|index| self.log_entry(index)).collect()
    }

    pub fn overview(&mut self) -> DashboardOverview {
        let services = 5 + self.rng.int_n(40) as u64;
        DashboardOverview {
            users: 50 + self.rng.int_n(500) as u64,
            services,
            user_services: services * (2 + self.rng.int_n(10) as u64),
            restrained_services_pools: self.rng.int_n(3) as u64,
        }
    }

    pub fn series(&mut self, points: usize) -> Vec<StatPoint> {
        let start = reference_time().unix_timestamp();
        (0..points as i64)
            .map(|index| StatPoint {
                stamp: start + index * 3_600,
                value: self.rng.int_n(120) as f64,
            })
            .collect()
    }

    fn pick<'a>(&mut self, values: &'a [&'a str]) -> &'a str {
        values[self.rng.int_n(values.len())]
    }
}

/// Fixed instant all generated timestamps are relative to.
pub fn reference_time() -> OffsetDateTime {
    datetime!(2026-01-01 00:00:00 UTC)
}

pub fn authenticator(
    id: &str,
    name: &str,
    type_name: &str,
    comments: &str,
    priority: &str,
) -> Authenticator {
    Authenticator {
        id: AuthenticatorId::new(id),
        name: name.to_owned(),
        type_name: type_name.to_owned(),
        comments: comments.to_owned(),
        priority: priority.to_owned(),
        state: String::new(),
    }
}

pub fn log_message(message: &str) -> LogEntry {
    LogEntry {
        message: message.to_owned(),
        ..LogEntry::default()
    }
}

/// In-memory stand-in for the admin server. Every call is recorded, and
/// failures can be injected per call site.
#[derive(Debug, Clone, Default)]
pub struct FakeRemote {
    pub authenticators: Vec<Authenticator>,
    pub logs: BTreeMap<String, Vec<LogEntry>>,
    pub overview: DashboardOverview,
    pub stats: BTreeMap<&'static str, Vec<StatPoint>>,
    pub listing_error: Option<RemoteCallError>,
    pub overview_error: Option<RemoteCallError>,
    pub failing_stats: BTreeSet<&'static str>,
    pub failing_logs: BTreeSet<String>,
    pub calls: Vec<String>,
}

impl FakeRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_authenticators(mut self, authenticators: Vec<Authenticator>) -> Self {
        self.authenticators = authenticators;
        self
    }

    pub fn with_logs(mut self, id: &str, logs: Vec<LogEntry>) -> Self {
        self.logs.insert(id.to_owned(), logs);
        self
    }

    pub fn failing_logs_for(mut self, id: &str) -> Self {
        self.failing_logs.insert(id.to_owned());
        self
    }

    pub fn log_calls(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| call.strip_prefix("logs:"))
            .collect()
    }
}

impl RemoteListSource for FakeRemote {
    fn fetch(&mut self, kind: ResourceKind) -> Result<Vec<RemoteRecord>, RemoteCallError> {
        self.calls.push(format!("list:{}", kind.as_str()));
        if let Some(error) = &self.listing_error {
            return Err(error.clone());
        }
        Ok(match kind {
            ResourceKind::Authenticators => self
                .authenticators
                .iter()
                .cloned()
                .map(RemoteRecord::Authenticator)
                .collect(),
        })
    }
}

impl DetailSource for FakeRemote {
    type Detail = LogEntry;

    fn fetch_detail(&mut self, id: &RowId) -> Result<Vec<LogEntry>, RemoteCallError> {
        self.calls.push(format!("logs:{id}"));
        if self.failing_logs.contains(id.as_str()) {
            return Err(RemoteCallError::new(
                500,
                format!("log storage unavailable for {id}"),
            ));
        }
        Ok(self.logs.get(id.as_str()).cloned().unwrap_or_default())
    }
}

impl DashboardSource for FakeRemote {
    fn overview(&mut self) -> Result<DashboardOverview, RemoteCallError> {
        self.calls.push("overview".to_owned());
        match &self.overview_error {
            Some(error) => Err(error.clone()),
            None => Ok(self.overview),
        }
    }

    fn stats(&mut self, kind: StatKind) -> Result<Vec<StatPoint>, RemoteCallError> {
        self.calls.push(format!("stats:{}", kind.as_str()));
        if self.failing_stats.contains(kind.as_str()) {
            return Err(RemoteCallError::new(503, format!("{} stats unavailable", kind.as_str())));
        }
        Ok(self.stats.get(kind.as_str()).cloned().unwrap_or_default())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingNotifier {
    pub errors: Vec<RemoteCallError>,
}

impl FailureNotifier for RecordingNotifier {
    fn notify(&mut self, error: &RemoteCallError) {
        self.errors.push(error.clone());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogStep {
    Add(String),
    Insert(usize, String),
    Set(usize, String),
    Remove(usize),
    MoveUp(usize),
    MoveDown(usize),
}

/// Plays back a fixed list of edits, as a user would in the modal editor.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDialog {
    pub steps: Vec<DialogStep>,
    pub seen_title: Option<String>,
    pub seen_items: Vec<String>,
}

impl ScriptedDialog {
    pub fn new(steps: Vec<DialogStep>) -> Self {
        Self {
            steps,
            ..Self::default()
        }
    }
}

impl CollectionDialog for ScriptedDialog {
    fn show_modal(&mut self, title: &str, items: &mut ItemList) -> Result<()> {
        self.seen_title = Some(title.to_owned());
        self.seen_items = items.as_slice().to_vec();
        for step in &self.steps {
            let applied = match step {
                DialogStep::Add(item) => {
                    items.push(item.clone());
                    true
                }
                DialogStep::Insert(index, item) => {
                    items.insert(*index, item.clone());
                    true
                }
                DialogStep::Set(index, item) => items.set(*index, item.clone()),
                DialogStep::Remove(index) => items.remove(*index).is_some(),
                DialogStep::MoveUp(index) => items.move_up(*index).is_some(),
                DialogStep::MoveDown(index) => items.move_down(*index).is_some(),
            };
            if !applied {
                bail!("dialog step {step:?} does not apply to {} items", items.len());
            }
        }
        Ok(())
    }
}
