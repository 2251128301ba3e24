//! yb-logging: NDJSON decision/game events and run manifests.
//!
//! Append-only NDJSON logs for post-mortems of simulated games and one-off decisions.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run manifest schema version.
pub const RUN_MANIFEST_VERSION: u32 = 1;

/// 13 categories, 5 dice, two rerolls, 63/35 upper bonus.
pub const RULESET_ID: &str = "yatzi_13cat_v1";
/// Curated-candidate Monte Carlo keep search with strategy-adjusted leaves.
pub const ENGINE_ID: &str = "mc_keep_v1";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifestV1 {
    pub run_manifest_version: u32,

    pub run_id: String,
    pub created_ts_ms: u64,

    pub ruleset_id: String,
    pub engine_id: String,

    // Hashes for reproducibility.
    pub git_hash: Option<String>,
    pub config_hash: Option<String>,

    // Inputs.
    pub difficulties: Vec<String>,
    pub games_per_difficulty: u64,
    pub seed: u64,
    pub parallel: bool,
    pub decisions_log: Option<String>,

    // Progress.
    pub games_completed: u64,
    pub finished_ts_ms: Option<u64>,
}

pub fn now_ms() -> u64 {
    let d = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    d.as_millis() as u64
}

pub fn hash_config_bytes(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}

pub fn try_git_hash() -> Option<String> {
    use std::process::Command;

    let out = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
    if !out.status.success() {
        return None;
    }
    let s = String::from_utf8(out.stdout).ok()?;
    let t = s.trim();
    if t.is_empty() {
        None
    } else {
        Some(t.to_string())
    }
}

pub fn read_manifest(path: impl AsRef<Path>) -> Result<RunManifestV1, NdjsonError> {
    let bytes = std::fs::read(path)?;
    Ok(serde_json::from_slice::<RunManifestV1>(&bytes)?)
}

pub fn write_manifest_atomic(path: impl AsRef<Path>, m: &RunManifestV1) -> Result<(), NdjsonError> {
    let path = path.as_ref();
    let tmp = path.with_extension("json.tmp");
    let bytes = serde_json::to_vec_pretty(m)?;
    std::fs::write(&tmp, bytes)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

/// Log schema versioning fields carried by every event.
#[derive(Debug, Clone, Serialize)]
pub struct VersionInfoV1 {
    pub ruleset_id: &'static str,
    pub engine_id: &'static str,
}

impl VersionInfoV1 {
    pub fn current() -> Self {
        Self {
            ruleset_id: RULESET_ID,
            engine_id: ENGINE_ID,
        }
    }
}

/// One keep decision inside a game (or a one-off `yb keep`).
#[derive(Debug, Clone, Serialize)]
pub struct KeepDecisionEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub v: VersionInfoV1,

    pub run_id: String,
    pub game_id: u64,
    pub turn: u8,
    pub roll_index: u8,
    pub difficulty: &'static str,

    pub dice: [u8; 5],
    pub keep: [bool; 5],
    pub outcome: &'static str,

    pub candidates: u64,
    pub rollouts: u64,
    pub current_best: Option<f64>,
    pub best_ev: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryDecisionEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub v: VersionInfoV1,

    pub run_id: String,
    pub game_id: u64,
    pub turn: u8,
    pub difficulty: &'static str,

    pub dice: [u8; 5],
    pub category: &'static str,
    pub score: i32,
    pub fallback: bool,
    /// Sheet total after recording, bonus included.
    pub total_after: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameEndEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub v: VersionInfoV1,

    pub run_id: String,
    pub game_id: u64,
    pub seed: u64,
    pub difficulty: &'static str,

    pub total: i32,
    pub upper_sum: i32,
    pub upper_bonus: i32,
    pub yatzi: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimSummaryEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub v: VersionInfoV1,

    pub run_id: String,
    pub difficulty: &'static str,
    pub games: u64,
    pub seed: u64,

    pub mean: f64,
    pub median: i32,
    pub std: f64,
    pub min: i32,
    pub max: i32,
    pub bonus_rate: f64,
    pub yatzi_rate: f64,
}

#[derive(Debug)]
pub enum NdjsonError {
    Io(io::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for NdjsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "ndjson io: {e}"),
            Self::Json(e) => write!(f, "ndjson encode: {e}"),
        }
    }
}

impl std::error::Error for NdjsonError {}

impl From<io::Error> for NdjsonError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for NdjsonError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Append-only NDJSON writer.
///
/// Contract: each call writes exactly one JSON object followed by a newline.
pub struct NdjsonWriter {
    w: BufWriter<File>,
    lines_since_flush: u64,
    flush_every_lines: u64,
    lines_written: u64,
}

impl NdjsonWriter {
    /// Open a file for append. Creates it if it doesn't exist.
    pub fn open_append(path: impl AsRef<Path>) -> Result<Self, NdjsonError> {
        Self::open_append_with_flush(path, 0)
    }

    /// `flush_every_lines=0` disables periodic flushing.
    pub fn open_append_with_flush(
        path: impl AsRef<Path>,
        flush_every_lines: u64,
    ) -> Result<Self, NdjsonError> {
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            w: BufWriter::new(f),
            lines_since_flush: 0,
            flush_every_lines,
            lines_written: 0,
        })
    }

    pub fn write_event<T: Serialize>(&mut self, event: &T) -> Result<(), NdjsonError> {
        let mut buf = serde_json::to_vec(event)?;
        buf.push(b'\n');
        self.w.write_all(&buf)?;
        self.lines_written += 1;
        self.lines_since_flush += 1;
        if self.flush_every_lines > 0 && self.lines_since_flush >= self.flush_every_lines {
            self.flush()?;
        }
        Ok(())
    }

    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    pub fn flush(&mut self) -> Result<(), NdjsonError> {
        self.w.flush()?;
        self.lines_since_flush = 0;
        Ok(())
    }
}
