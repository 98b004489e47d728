// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use authdesk_app::{
    DashboardView, DetailLoader, DisplayRowMapper, ItemListEditor, LoadPhase, RecordRowMapper,
    RemoteCallError, RemoteListSource, RemoteListView, RemoteRecord, ResourceKind, RowId,
    StatKind, TableEvent, fetch_details,
};
use authdesk_testkit::{
    AuthFaker, DialogStep, FakeRemote, RecordingNotifier, ScriptedDialog, authenticator,
    log_message,
};

#[test]
fn single_authenticator_flows_into_table_and_detail_view() {
    let mut remote = FakeRemote::new()
        .with_authenticators(vec![authenticator("1", "AD", "LDAP", "", "1")])
        .with_logs("1", vec![log_message("ok")]);
    let mut notifier = RecordingNotifier::default();
    let mut view = RemoteListView::new(ResourceKind::Authenticators);

    let mut details = remote.clone();
    view.refresh(&mut remote, &mut details, &mut notifier);

    let rows = view.table().rows().collect::<Vec<_>>();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, RowId::new("1"));
    assert_eq!(rows[0].fields, vec!["AD", "LDAP", "", "1"]);
    assert_eq!(view.table().selected(), &[RowId::new("1")]);

    assert_eq!(view.details().content(), &[log_message("ok")]);
    assert_eq!(view.details().phase(), LoadPhase::Loaded);
    assert!(notifier.errors.is_empty());
}

#[test]
fn map_all_preserves_length_and_order_for_generated_listings() -> Result<()> {
    let mut faker = AuthFaker::new(42);
    let mut remote = FakeRemote::new().with_authenticators(faker.authenticators(25));

    let records = remote.fetch(ResourceKind::Authenticators)?;
    let rows = RecordRowMapper.map_all(&records);

    assert_eq!(rows.len(), records.len());
    for (row, record) in rows.iter().zip(&records) {
        assert_eq!(row.id, record.row_id());
        let RemoteRecord::Authenticator(auth) = record;
        assert_eq!(row.fields[0], auth.name);
    }
    Ok(())
}

#[test]
fn failing_detail_is_omitted_and_notified_once() {
    let mut remote = FakeRemote::new()
        .with_logs("b", vec![log_message("b-1"), log_message("b-2")])
        .failing_logs_for("a");
    let mut notifier = RecordingNotifier::default();
    let mut loader = DetailLoader::new();

    let content = loader.on_selection_changed(
        &mut remote,
        &[RowId::new("a"), RowId::new("b")],
        &mut notifier,
    );

    assert_eq!(content, &[log_message("b-1"), log_message("b-2")]);
    assert_eq!(notifier.errors.len(), 1);
    assert_eq!(loader.phase(), LoadPhase::PartiallyFailed);
    assert_eq!(remote.log_calls(), vec!["a", "b"]);
}

#[test]
fn details_concatenate_in_selection_order_and_replace_previous_content() {
    let mut remote = FakeRemote::new()
        .with_logs("x", vec![log_message("x-1")])
        .with_logs("y", vec![log_message("y-1"), log_message("y-2")]);
    let mut notifier = RecordingNotifier::default();
    let mut loader = DetailLoader::new();

    loader.on_selection_changed(&mut remote, &[RowId::new("y"), RowId::new("x")], &mut notifier);
    assert_eq!(
        loader.content(),
        &[log_message("y-1"), log_message("y-2"), log_message("x-1")]
    );

    loader.on_selection_changed(&mut remote, &[RowId::new("x")], &mut notifier);
    assert_eq!(loader.content(), &[log_message("x-1")]);
}

#[test]
fn every_selection_change_refetches_from_scratch() {
    let mut remote = FakeRemote::new().with_logs("x", vec![log_message("x-1")]);
    let mut notifier = RecordingNotifier::default();
    let mut loader = DetailLoader::new();

    loader.on_selection_changed(&mut remote, &[RowId::new("x")], &mut notifier);
    loader.on_selection_changed(&mut remote, &[RowId::new("x")], &mut notifier);
    assert_eq!(remote.log_calls(), vec!["x", "x"]);
}

#[test]
fn fetch_details_collects_failures_without_stopping() {
    let mut remote = FakeRemote::new()
        .with_logs("c", vec![log_message("c-1")])
        .failing_logs_for("a")
        .failing_logs_for("b");

    let batch = fetch_details(
        &mut remote,
        &[RowId::new("a"), RowId::new("b"), RowId::new("c")],
    );
    assert_eq!(batch.entries, vec![log_message("c-1")]);
    let failed = batch
        .failures
        .iter()
        .map(|(id, _)| id.as_str())
        .collect::<Vec<_>>();
    assert_eq!(failed, vec!["a", "b"]);
}

#[test]
fn failed_listing_still_reloads_details_for_current_selection() {
    let mut remote = FakeRemote::new()
        .with_authenticators(vec![
            authenticator("1", "AD", "LDAP", "", "1"),
            authenticator("2", "IP", "IP", "", "2"),
        ])
        .with_logs("1", vec![log_message("first")]);
    let mut notifier = RecordingNotifier::default();
    let mut view = RemoteListView::new(ResourceKind::Authenticators);

    let mut details = remote.clone();
    view.refresh(&mut remote, &mut details, &mut notifier);

    remote.listing_error = Some(RemoteCallError::new(401, "session expired"));
    details.logs.insert("1".to_owned(), vec![log_message("second")]);
    let events = view.refresh(&mut remote, &mut details, &mut notifier);

    assert_eq!(
        events,
        vec![TableEvent::SelectionChanged(vec![RowId::new("1")])]
    );
    assert_eq!(view.table().len(), 2);
    assert_eq!(view.details().content(), &[log_message("second")]);
    assert_eq!(notifier.errors, vec![RemoteCallError::new(401, "session expired")]);
}

#[test]
fn empty_listing_is_a_success() {
    let mut remote = FakeRemote::new();
    let mut notifier = RecordingNotifier::default();
    let mut view = RemoteListView::new(ResourceKind::Authenticators);

    let mut details = remote.clone();
    let events = view.refresh(&mut remote, &mut details, &mut notifier);

    assert_eq!(
        events,
        vec![
            TableEvent::RowsReplaced { count: 0 },
            TableEvent::SelectionChanged(Vec::new()),
        ]
    );
    assert!(view.table().is_empty());
    assert!(view.details().content().is_empty());
    assert!(notifier.errors.is_empty());
    assert!(details.log_calls().is_empty());
}

#[test]
fn refresh_keeps_surviving_selection_and_sort() {
    let mut remote = FakeRemote::new().with_authenticators(vec![
        authenticator("1", "beta", "LDAP", "", "1"),
        authenticator("2", "alpha", "IP", "", "2"),
        authenticator("3", "gamma", "SAML", "", "3"),
    ]);
    let mut notifier = RecordingNotifier::default();
    let mut view = RemoteListView::new(ResourceKind::Authenticators);
    let mut details = remote.clone();

    view.refresh(&mut remote, &mut details, &mut notifier);
    view.table_mut().sort_by(0);
    let event = view
        .table_mut()
        .select([RowId::new("3"), RowId::new("1")]);
    view.apply_events(&[event], &mut details, &mut notifier);

    remote.authenticators.remove(2);
    view.refresh(&mut remote, &mut details, &mut notifier);

    let order = view
        .table()
        .rows()
        .map(|row| row.id.as_str())
        .collect::<Vec<_>>();
    assert_eq!(order, vec!["2", "1"]);
    assert_eq!(view.table().selected(), &[RowId::new("1")]);
}

#[test]
fn item_editor_dialog_edits_backing_store_in_place() -> Result<()> {
    let mut editor = ItemListEditor::new("highlight terms");
    editor.set_items(["denied", "error"]);

    let mut dialog = ScriptedDialog::new(vec![
        DialogStep::Add("timeout".to_owned()),
        DialogStep::MoveUp(2),
        DialogStep::Remove(0),
        DialogStep::Insert(0, "expired".to_owned()),
        DialogStep::Set(2, "ERROR".to_owned()),
    ]);
    editor.open(&mut dialog)?;

    assert_eq!(dialog.seen_title.as_deref(), Some("highlight terms"));
    assert_eq!(dialog.seen_items, vec!["denied".to_owned(), "error".to_owned()]);
    assert_eq!(
        editor.items(),
        vec!["expired".to_owned(), "timeout".to_owned(), "ERROR".to_owned()]
    );
    Ok(())
}

#[test]
fn dashboard_partial_failure_keeps_other_parts() {
    let mut faker = AuthFaker::new(9);
    let mut remote = FakeRemote::new();
    remote.overview = faker.overview();
    remote.stats.insert("assigned", faker.series(12));
    remote.failing_stats.insert("inuse");
    let mut notifier = RecordingNotifier::default();

    let view = DashboardView::load(&mut remote, &mut notifier);

    assert_eq!(view.overview, Some(remote.overview));
    assert_eq!(view.series(StatKind::Assigned).len(), 12);
    assert!(view.series(StatKind::InUse).is_empty());
    assert_eq!(notifier.errors.len(), 1);
    assert_eq!(
        remote.calls,
        vec!["overview", "stats:assigned", "stats:inuse"]
    );
}

#[test]
fn dashboard_overview_failure_does_not_skip_series() {
    let mut remote = FakeRemote::new();
    remote.overview_error = Some(RemoteCallError::transport("connection refused"));
    let mut notifier = RecordingNotifier::default();

    let view = DashboardView::load(&mut remote, &mut notifier);
    assert_eq!(view.overview, None);
    assert_eq!(notifier.errors.len(), 1);
    assert_eq!(remote.calls.len(), 3);
}
