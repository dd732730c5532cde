// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the background refresh loop.

mod common;

use common::{wait_until, write_conf};
use fwissr::domain::ConfigValue;
use fwissr::registry::Registry;
use fwissr::sources::{Source, SourceOptions};
use std::fs;
use std::time::Duration;

const TICK: Duration = Duration::from_millis(50);
const PATIENCE: Duration = Duration::from_secs(3);

fn refreshable() -> SourceOptions {
    SourceOptions {
        refresh: true,
        ..Default::default()
    }
}

#[test]
fn test_background_refresh_updates_tree() {
    let dir = tempfile::tempdir().unwrap();
    write_conf(dir.path(), "test.json", r#"{"foo": "bar"}"#);

    let registry = Registry::with_refresh_period(TICK);
    registry
        .add_source(Source::file(dir.path(), refreshable()).unwrap())
        .unwrap();

    assert_eq!(
        registry.get("/test/foo").unwrap(),
        Some(ConfigValue::from("bar"))
    );

    write_conf(dir.path(), "test.json", r#"{"foo": "baz"}"#);

    assert!(wait_until(PATIENCE, || {
        registry.get("/test/foo").unwrap() == Some(ConfigValue::from("baz"))
    }));
}

#[test]
fn test_non_refreshable_source_stays_cached() {
    let dir = tempfile::tempdir().unwrap();
    let frozen_dir = tempfile::tempdir().unwrap();
    write_conf(dir.path(), "live.json", r#"{"n": 1}"#);
    write_conf(frozen_dir.path(), "frozen.json", r#"{"n": 1}"#);

    let registry = Registry::with_refresh_period(TICK);
    registry
        .add_source(Source::file(dir.path(), refreshable()).unwrap())
        .unwrap();
    registry
        .add_source(Source::file(frozen_dir.path(), SourceOptions::default()).unwrap())
        .unwrap();

    write_conf(dir.path(), "live.json", r#"{"n": 2}"#);
    write_conf(frozen_dir.path(), "frozen.json", r#"{"n": 2}"#);

    // The refreshable source's update lands; the frozen source keeps serving
    // its cached fetch even though the loop rebuilds everything.
    assert!(wait_until(PATIENCE, || {
        registry.get("/live/n").unwrap() == Some(ConfigValue::Integer(2))
    }));
    assert_eq!(
        registry.get("/frozen/n").unwrap(),
        Some(ConfigValue::Integer(1))
    );
}

#[test]
fn test_failed_refresh_keeps_last_good_tree() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_conf(dir.path(), "test.json", r#"{"foo": "bar"}"#);

    let registry = Registry::with_refresh_period(TICK);
    registry
        .add_source(Source::file(&file, refreshable()).unwrap())
        .unwrap();

    fs::remove_file(&file).unwrap();

    // Give the loop a few failing ticks.
    std::thread::sleep(TICK * 5);

    assert_eq!(
        registry.get("/test/foo").unwrap(),
        Some(ConfigValue::from("bar"))
    );
}

#[test]
fn test_readers_never_observe_partial_merge() {
    let dir = tempfile::tempdir().unwrap();
    write_conf(dir.path(), "test.json", r#"{"x": 0, "y": 0}"#);

    let registry = Registry::with_refresh_period(Duration::from_millis(10));
    registry
        .add_source(Source::file(dir.path(), refreshable()).unwrap())
        .unwrap();

    for round in 1..=20 {
        write_conf(
            dir.path(),
            "test.json",
            &format!(r#"{{"x": {round}, "y": {round}}}"#),
        );

        for _ in 0..20 {
            let dump = registry.dump().unwrap();
            let subtree = dump["test"].as_mapping().unwrap();
            assert_eq!(subtree["x"], subtree["y"], "observed a partial merge");
        }
    }
}

#[test]
fn test_shutdown_stops_refreshing() {
    let dir = tempfile::tempdir().unwrap();
    write_conf(dir.path(), "test.json", r#"{"foo": "bar"}"#);

    let registry = Registry::with_refresh_period(TICK);
    registry
        .add_source(Source::file(dir.path(), refreshable()).unwrap())
        .unwrap();

    registry.shutdown();
    write_conf(dir.path(), "test.json", r#"{"foo": "baz"}"#);

    assert!(!wait_until(Duration::from_millis(500), || {
        registry.get("/test/foo").unwrap() == Some(ConfigValue::from("baz"))
    }));
}

#[test]
fn test_zero_period_disables_background_refresh() {
    let dir = tempfile::tempdir().unwrap();
    write_conf(dir.path(), "test.json", r#"{"foo": "bar"}"#);

    let registry = Registry::with_refresh_period(Duration::ZERO);
    registry
        .add_source(Source::file(dir.path(), refreshable()).unwrap())
        .unwrap();

    write_conf(dir.path(), "test.json", r#"{"foo": "baz"}"#);

    assert!(!wait_until(Duration::from_millis(500), || {
        registry.get("/test/foo").unwrap() == Some(ConfigValue::from("baz"))
    }));
}
