use std::fs;
use std::path::Path;

use cardcount_core::game::serialization::TrackerSnapshot;
use cardcount_core::model::player::PlayerId;
use cardcount_core::model::resource::Resource;
use cardcount_replay::config::ReplayConfig;
use cardcount_replay::replay::{ReplayError, ReplayRunner};
use tempfile::tempdir;

const EVENTS: &str = r#"
# opening: Alice gets her starting cards
{"event":"action","data":{"type":"got_resource","player":"You","resource":"brick","amount":3}}
{"event":"action","data":{"type":"got_resource","player":"You","resource":"wool","amount":2}}
{"event":"action","data":{"type":"got_resource","player":"Bob","resource":"wool","amount":1}}

{"event":"action","data":{"type":"spent_resources","player":"Alice","cost":{"lumber":1,"brick":1}}}
{"event":"action","data":{"type":"spent_resources","player":"Alice","cost":{"lumber":1,"brick":1}}}
{"event":"action","data":{"type":"got_resource","player":"Bob","resource":"ore","amount":0}}
{"event":"action","data":{"type":"dice_roll","player":"Bob","roll":8}}
"#;

fn load_config(dir: &Path, events: &str) -> ReplayConfig {
    let events_path = dir.join("events.jsonl");
    fs::write(&events_path, events).expect("write events");

    let yaml = format!(
        r#"
run_id: "test_smoke"
session:
  local_player: "Alice"
  player_count: 2
  seed:
    You: {{ grain: 2, ore: 1 }}
    Bob: {{ lumber: 1, brick: 1, wool: 1, grain: 1, ore: 1 }}
inputs:
  events: "{events}"
outputs:
  summary_md: "{out}/{{run_id}}/summary.md"
  snapshot_json: "{out}/{{run_id}}/snapshot.json"
logging:
  enable_structured: false
"#,
        events = events_path.display(),
        out = dir.join("out").display(),
    );

    let mut cfg: ReplayConfig = serde_yaml::from_str(&yaml).expect("valid yaml");
    cfg.validate().expect("config validates");
    cfg
}

fn pid(name: &str) -> PlayerId {
    PlayerId::new(name).expect("valid player id")
}

#[test]
fn replay_smoke_test_writes_report_and_snapshot() {
    let dir = tempdir().expect("temp dir");
    let config = load_config(dir.path(), EVENTS);
    let paths = config.resolved_paths();

    let runner = ReplayRunner::new(config, paths).expect("runner created");
    let summary = runner.run().expect("replay completes");

    assert_eq!(summary.events_applied, 6);
    assert_eq!(summary.events_rejected, 1);
    assert_eq!(summary.lines_skipped, 3);
    assert_eq!(summary.hypotheses, 1);
    assert_eq!(summary.metrics.recoveries, 2);
    assert_eq!(summary.metrics.rejected, 1);
    assert!(!summary.resumed);

    let markdown = fs::read_to_string(&summary.summary_path).expect("summary readable");
    assert!(markdown.contains("# Resource Summary: test_smoke"));
    assert!(markdown.contains("| Alice | 0 | 1 | 2 | 2 | 1 | 6 |"));
    assert!(markdown.contains("| Bob | 1 | 1 | 2 | 1 | 1 | 6 |"));
    assert!(markdown.contains("Phase: main"));

    let json = fs::read_to_string(&summary.snapshot_path).expect("snapshot readable");
    let tracker = TrackerSnapshot::from_json(&json)
        .expect("snapshot decodes")
        .restore();
    assert_eq!(tracker.total(&pid("Alice")), 6);
    assert_eq!(tracker.range(&pid("Bob"), Resource::Wool).value(), Some(2));
    assert_eq!(tracker.dice().count(8), 1);
    assert!(!tracker.players().contains(&pid("You")));
}

#[test]
fn replay_resumes_from_snapshot() {
    let dir = tempdir().expect("temp dir");
    let config = load_config(dir.path(), EVENTS);
    let first = ReplayRunner::new(config.clone(), config.resolved_paths())
        .expect("runner created")
        .run()
        .expect("first replay");

    let more = dir.path().join("more.jsonl");
    fs::write(
        &more,
        r#"{"event":"action","data":{"type":"robbery_specific","robber":"Bob","victim":"You","resource":"ore"}}"#,
    )
    .expect("write events");

    let mut resumed = config;
    resumed.inputs.events = more.display().to_string();
    resumed.inputs.resume_from = Some(first.snapshot_path.display().to_string());
    resumed.validate().expect("valid");

    let summary = ReplayRunner::new(resumed.clone(), resumed.resolved_paths())
        .expect("runner created")
        .run()
        .expect("resumed replay");
    assert!(summary.resumed);
    assert_eq!(summary.events_applied, 1);
    assert_eq!(summary.metrics.records, 7);

    let markdown = fs::read_to_string(&summary.summary_path).expect("summary readable");
    assert!(markdown.contains("| Alice | 0 | 1 | 2 | 2 | 0 | 5 |"));
    assert!(markdown.contains("| Bob | 1 | 1 | 2 | 1 | 2 | 7 |"));
}

#[test]
fn resumed_segment_keeps_road_credits_and_configured_cap() {
    let dir = tempdir().expect("temp dir");
    let config = load_config(
        dir.path(),
        r#"{"event":"action","data":{"type":"dice_roll","player":"Bob","roll":8}}
{"event":"played_road_building","data":{"player":"Bob"}}
"#,
    );
    let first = ReplayRunner::new(config.clone(), config.resolved_paths())
        .expect("runner created")
        .run()
        .expect("first segment");

    let roads = dir.path().join("roads.jsonl");
    fs::write(
        &roads,
        r#"{"event":"built","data":{"player":"Bob","kind":"road"}}
{"event":"built","data":{"player":"Bob","kind":"road"}}
"#,
    )
    .expect("write events");

    let mut resumed = config;
    resumed.run_id = "test_resume".to_string();
    resumed.tracker.max_hypotheses = Some(4);
    resumed.inputs.events = roads.display().to_string();
    resumed.inputs.resume_from = Some(first.snapshot_path.display().to_string());
    resumed.validate().expect("valid");

    let summary = ReplayRunner::new(resumed.clone(), resumed.resolved_paths())
        .expect("runner created")
        .run()
        .expect("second segment");
    assert_eq!(summary.events_applied, 2);
    assert_eq!(summary.metrics.recoveries, 0);

    let json = fs::read_to_string(&summary.snapshot_path).expect("snapshot readable");
    let snapshot = TrackerSnapshot::from_json(&json).expect("snapshot decodes");
    assert_eq!(snapshot.config.max_hypotheses, Some(4));
    assert!(snapshot.session.road_credits.is_empty());
    let tracker = snapshot.restore();
    assert_eq!(tracker.total(&pid("Bob")), 5);
}

#[test]
fn invalid_json_aborts_with_line_number() {
    let dir = tempdir().expect("temp dir");
    let events = "{\"event\":\"reset\"}\n{not json\n";
    let config = load_config(dir.path(), events);
    let paths = config.resolved_paths();

    let err = ReplayRunner::new(config, paths)
        .expect("runner created")
        .run()
        .expect_err("bad line");
    assert!(matches!(err, ReplayError::Parse { line: 2, .. }));
}

#[test]
fn unknown_event_is_skipped_not_fatal() {
    let dir = tempdir().expect("temp dir");
    let events = "{\"event\":\"teleport\",\"data\":{\"player\":\"Bob\"}}\n{\"event\":\"reset\"}\n";
    let config = load_config(dir.path(), events);
    let paths = config.resolved_paths();

    let summary = ReplayRunner::new(config, paths)
        .expect("runner created")
        .run()
        .expect("replay completes");
    assert_eq!(summary.events_rejected, 1);
    assert_eq!(summary.events_applied, 1);
}

#[test]
fn missing_event_log_is_reported() {
    let dir = tempdir().expect("temp dir");
    let mut config = load_config(dir.path(), "");
    config.inputs.events = dir.path().join("absent.jsonl").display().to_string();
    let paths = config.resolved_paths();
    assert!(matches!(
        ReplayRunner::new(config, paths),
        Err(ReplayError::MissingInput { .. })
    ));
}
