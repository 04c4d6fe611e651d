use crate::engine::game::GameEvent;
use log::warn;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Optional game transcript: one JSON object per event, one per line.
/// Write failures are logged and skipped; a broken transcript never stops
/// the game.
pub struct Transcript {
    file: Option<File>,
}

impl Transcript {
    pub fn disabled() -> Self {
        Self { file: None }
    }

    pub fn create(path: &Path) -> std::io::Result<Self> {
        Ok(Self {
            file: Some(File::create(path)?),
        })
    }

    pub fn record(&mut self, events: &[GameEvent]) {
        let Some(file) = &mut self.file else {
            return;
        };
        for event in events {
            match serde_json::to_string(event) {
                Ok(line) => {
                    if let Err(err) = writeln!(file, "{line}") {
                        warn!("transcript write failed: {err}");
                    }
                }
                Err(err) => warn!("transcript serialization failed: {err}"),
            }
        }
    }
}
