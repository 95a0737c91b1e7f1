#![warn(missing_docs)]
//! Deterministic testing surfaces: terrain fixtures, chunk digests and a
//! JSONL event sink for headless runs.

mod digest;
mod fixtures;

use anyhow::Result;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use voxkernel_core::SimTick;

pub use digest::*;
pub use fixtures::*;

/// Primary event record captured by headless runs.
#[derive(Debug, Serialize)]
pub struct EventRecord<'a, P: Serialize> {
    /// Simulation tick when the event occurred.
    pub tick: SimTick,
    /// Short kind label (e.g. `"move"`, `"edit"`).
    pub kind: &'a str,
    /// Structured payload.
    pub payload: P,
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    writer: BufWriter<File>,
    written: usize,
}

impl JsonlSink {
    /// Create a new sink at `path`, creating parent dirs if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            written: 0,
        })
    }

    /// Append an event to the log.
    pub fn write<P: Serialize>(&mut self, event: &EventRecord<'_, P>) -> Result<()> {
        serde_json::to_writer(&mut self.writer, event)?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    /// Number of events written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush buffered events to disk.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn jsonl_sink_writes_one_line_per_event() {
        let dir = std::env::temp_dir().join(format!(
            "voxkernel-events-{}",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        let path = dir.join("events.jsonl");
        let mut sink = JsonlSink::create(&path).expect("sink create");
        sink.write(&EventRecord {
            tick: SimTick(3),
            kind: "edit",
            payload: [1, 2, 3],
        })
        .expect("write succeeds");
        sink.write(&EventRecord {
            tick: SimTick(4),
            kind: "move",
            payload: "fell",
        })
        .expect("write succeeds");
        sink.flush().expect("flush succeeds");
        assert_eq!(sink.written(), 2);

        let contents = fs::read_to_string(&path).expect("file readable");
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], r#"{"tick":3,"kind":"edit","payload":[1,2,3]}"#);
        assert!(lines[1].contains("\"fell\""));
        let _ = fs::remove_dir_all(&dir);
    }
}
