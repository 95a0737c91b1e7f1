use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn voxkernel() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_voxkernel"));
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn heightmap_prints_requested_rows() {
    let output = voxkernel()
        .args(["heightmap", "--region", "-4,-2,3,1"])
        .output()
        .expect("binary runs");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    let rows: Vec<&str> = stdout.lines().collect();
    assert_eq!(rows.len(), 4);
    assert!(rows.iter().all(|row| row.chars().count() == 8));
}

#[test]
fn simulate_writes_event_log() {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("voxkernel-smoke-{nanos}"));
    let path = dir.join("events.jsonl");

    let output = voxkernel()
        .args(["simulate", "--ticks", "60", "--events"])
        .arg(&path)
        .output()
        .expect("binary runs");
    assert!(output.status.success());

    let summary: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("summary is json");
    assert_eq!(summary["ticks"], 60);

    let log = std::fs::read_to_string(&path).expect("event log exists");
    let first: serde_json::Value =
        serde_json::from_str(log.lines().next().expect("at least one event")).expect("json line");
    assert_eq!(first["tick"], 0);
    assert_eq!(first["kind"], "spawn");
    assert_eq!(
        log.lines().count() as u64,
        summary["events_written"].as_u64().expect("count")
    );
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn raycast_rejects_zero_direction() {
    let output = voxkernel()
        .args(["raycast", "--origin", "0.5,30,0.5", "--dir", "0,0,0"])
        .output()
        .expect("binary runs");
    assert!(!output.status.success());
}
