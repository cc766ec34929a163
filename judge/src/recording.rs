use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use rectangles::Response;
use serde::Serialize;
use serde_json::Value;

/// Collects the messages of one session and writes one JSON file per game.
pub struct Recorder {
    session_id: u64,
    num: usize,
    directory: PathBuf,
    messages: Vec<RecordedMessage>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Inbound,
    Outbound,
}

#[derive(Debug, Serialize)]
pub struct RecordedMessage {
    participant: String,
    direction: Direction,
    message: Value,
}

/// Fails unless `directory` exists, so that misconfiguration shows up at startup.
pub fn check_recording_directory(directory: &Path) -> anyhow::Result<()> {
    if !directory.is_dir() {
        anyhow::bail!("Directory '{}' does not exist", directory.display());
    }
    Ok(())
}

impl Recorder {
    pub fn new(directory: PathBuf, session_id: u64) -> anyhow::Result<Self> {
        check_recording_directory(&directory)?;
        Ok(Self {
            session_id,
            num: 1,
            directory,
            messages: Vec::new(),
        })
    }

    /// Stores a raw payload received from a participant.
    ///
    /// Payloads that aren't JSON are kept as strings.
    pub fn store_inbound(&mut self, participant: &str, payload: &str) {
        let message = serde_json::from_str(payload)
            .unwrap_or_else(|_| Value::String(String::from(payload)));
        self.messages.push(RecordedMessage {
            participant: String::from(participant),
            direction: Direction::Inbound,
            message,
        });
    }

    pub fn store_outbound(&mut self, participant: &str, response: &Response) {
        let message = serde_json::to_value(response).unwrap_or(Value::Null);
        self.messages.push(RecordedMessage {
            participant: String::from(participant),
            direction: Direction::Outbound,
            message,
        });
    }

    /// Writes everything stored since the last call and starts a new game file.
    ///
    /// Returns the path of the written file, or `None` if nothing was stored.
    pub fn write_game_recording(&mut self) -> anyhow::Result<Option<PathBuf>> {
        if self.messages.is_empty() {
            return Ok(None);
        }
        let filepath = self.directory.join(format!(
            "session_{:016x}_game_{:0>6}.json",
            self.session_id, self.num
        ));
        let writer = BufWriter::new(File::create(&filepath)?);
        serde_json::to_writer_pretty(writer, &std::mem::take(&mut self.messages))?;
        self.num += 1;
        Ok(Some(filepath))
    }
}
