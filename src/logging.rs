//! Structured JSON-lines logging for the simulator core.
//!
//! Every record carries a run id, a process-wide sequence number, an RFC3339
//! timestamp, a level and a domain, so a session can be replayed and audited
//! from its log alone.
//!
//! Records always go to stderr. When `LOG_DIR` is set they are also appended
//! under `<LOG_DIR>/<run_id>/`: `events.jsonl` for info and above,
//! `trace.jsonl` for trace/debug.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use sha2::{Digest, Sha256};
use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

use crate::profile::MetricKey;

// =============================================================================
// Log Levels
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Fatal = 5,
}

impl Level {
    pub fn from_env() -> Self {
        match std::env::var("LOG_LEVEL").as_deref() {
            Ok("trace") => Level::Trace,
            Ok("debug") => Level::Debug,
            Ok("info") => Level::Info,
            Ok("warn") => Level::Warn,
            Ok("error") => Level::Error,
            Ok("fatal") => Level::Fatal,
            _ => Level::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
        }
    }
}

// =============================================================================
// Log Domains (categories for filtering)
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Profile, // Metric updates, clamping, invalid keys
    Metrics, // Derived metric recomputation
    View,    // Screen selection and rendering
    Session, // Event application, observer fan-out
    System,  // Startup, config
    Timing,  // Scope timings
    Audit,   // Profile hashes for replay checks
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Profile => "profile",
            Domain::Metrics => "metrics",
            Domain::View => "view",
            Domain::Session => "session",
            Domain::System => "system",
            Domain::Timing => "timing",
            Domain::Audit => "audit",
        }
    }

    pub fn is_enabled(&self) -> bool {
        // LOG_DOMAINS: comma-separated list or "all"
        match std::env::var("LOG_DOMAINS").as_deref() {
            Ok("all") | Err(_) => true,
            Ok(domains) => domains.split(',').any(|d| d.trim() == self.as_str()),
        }
    }
}

// =============================================================================
// Run context
// =============================================================================

static LOG_SEQ: AtomicU64 = AtomicU64::new(0);
static RUN_CONTEXT: OnceLock<RunContext> = OnceLock::new();

fn next_seq() -> u64 {
    LOG_SEQ.fetch_add(1, Ordering::SeqCst)
}

#[derive(Debug)]
struct RunContext {
    run_id: String,
    events: Option<Mutex<BufWriter<File>>>,
    trace: Option<Mutex<BufWriter<File>>>,
}

fn open_sink(path: PathBuf) -> Option<Mutex<BufWriter<File>>> {
    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(f) => Some(Mutex::new(BufWriter::new(f))),
        Err(err) => {
            eprintln!("[log] failed to open {}: {}", path.display(), err);
            None
        }
    }
}

fn ensure_run_context() -> &'static RunContext {
    RUN_CONTEXT.get_or_init(|| {
        let run_id = std::env::var("RUN_ID")
            .unwrap_or_else(|_| format!("r-{}-{}", ts_epoch_ms(), process::id()));
        let Ok(base) = std::env::var("LOG_DIR") else {
            return RunContext {
                run_id,
                events: None,
                trace: None,
            };
        };
        let mut run_dir = PathBuf::from(base);
        run_dir.push(&run_id);
        if let Err(err) = create_dir_all(&run_dir) {
            eprintln!("[log] failed to create run dir: {}", err);
            return RunContext {
                run_id,
                events: None,
                trace: None,
            };
        }

        let _ = std::fs::write(
            run_dir.join("manifest.json"),
            json!({
                "run_id": run_id,
                "ts": ts_now(),
                "pid": process::id(),
                "log_dir": run_dir.to_string_lossy(),
            })
            .to_string(),
        );

        RunContext {
            events: open_sink(run_dir.join("events.jsonl")),
            trace: open_sink(run_dir.join("trace.jsonl")),
            run_id,
        }
    })
}

/// Run id stamped on every record of this process.
pub fn run_id() -> &'static str {
    &ensure_run_context().run_id
}

fn split_fields(mut fields: Map<String, Value>) -> (Map<String, Value>, Map<String, Value>) {
    let mut top = Map::new();
    for key in ["key", "screen", "update_seq", "msg"] {
        if let Some(value) = fields.remove(key) {
            top.insert(key.to_string(), value);
        }
    }
    (top, fields)
}

fn write_line(writer: &Option<Mutex<BufWriter<File>>>, line: &str) {
    if let Some(writer) = writer {
        if let Ok(mut w) = writer.lock() {
            let _ = writeln!(w, "{}", line);
            let _ = w.flush();
        }
    }
}

// =============================================================================
// Core logging functions
// =============================================================================

/// RFC3339 timestamp with milliseconds
pub fn ts_now() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

pub fn ts_epoch_ms() -> u64 {
    Utc::now().timestamp_millis() as u64
}

/// Emit a structured log entry
pub fn log(level: Level, domain: Domain, event: &str, fields: Map<String, Value>) {
    let min_level = Level::from_env();
    if level < min_level || !domain.is_enabled() {
        return;
    }

    emit_record(level, domain.as_str(), event, fields);
}

fn emit_record(level: Level, component: &str, event: &str, fields: Map<String, Value>) {
    let ctx = ensure_run_context();
    let (mut top, data) = split_fields(fields);

    let msg = top.remove("msg").unwrap_or(Value::String(String::new()));
    let mut entry = Map::new();
    entry.insert("ts".to_string(), json!(ts_now()));
    entry.insert("run_id".to_string(), json!(ctx.run_id.clone()));
    entry.insert("seq".to_string(), json!(next_seq()));
    entry.insert("lvl".to_string(), json!(level.as_str().to_uppercase()));
    entry.insert("component".to_string(), json!(component));
    entry.insert("event".to_string(), json!(event));
    entry.insert("msg".to_string(), msg);
    for (k, v) in top {
        entry.insert(k, v);
    }
    entry.insert("data".to_string(), Value::Object(data));

    let line = Value::Object(entry).to_string();
    match level {
        Level::Trace | Level::Debug => write_line(&ctx.trace, &line),
        _ => write_line(&ctx.events, &line),
    }
    eprintln!("{}", line);
}

// =============================================================================
// Domain-Specific Logging Helpers
// =============================================================================

pub fn log_startup(start_screen: &str, initial: &Value) {
    log(
        Level::Info,
        Domain::System,
        "startup",
        obj(&[
            ("screen", v_str(start_screen)),
            ("initial_profile", initial.clone()),
        ]),
    );
}

pub fn log_profile_update(update_seq: u64, key: MetricKey, requested: i64, previous: u8, stored: u8) {
    let clamped = requested != stored as i64;
    log(
        if clamped { Level::Warn } else { Level::Info },
        Domain::Profile,
        "update",
        obj(&[
            ("update_seq", json!(update_seq)),
            ("key", v_str(key.as_str())),
            ("requested", json!(requested)),
            ("previous", json!(previous)),
            ("stored", json!(stored)),
            ("clamped", json!(clamped)),
        ]),
    );
}

pub fn log_invalid_key(key: &str) {
    log(
        Level::Error,
        Domain::Profile,
        "invalid_key",
        obj(&[("key", v_str(key)), ("msg", v_str("unrecognized metric name"))]),
    );
}

pub fn log_recompute(update_seq: u64, observers: usize, overall_score: u32) {
    log(
        Level::Debug,
        Domain::Metrics,
        "recompute",
        obj(&[
            ("update_seq", json!(update_seq)),
            ("observers", json!(observers)),
            ("overall_score", json!(overall_score)),
        ]),
    );
}

/// Outcome of one UI event applied to a session.
pub fn log_event_applied(event: &str, update_seq: u64, screen: &str, error: Option<&str>) {
    let mut fields = obj(&[
        ("event_type", v_str(event)),
        ("update_seq", json!(update_seq)),
        ("screen", v_str(screen)),
    ]);
    let level = match error {
        Some(err) => {
            fields.insert("msg".to_string(), v_str(err));
            Level::Warn
        }
        None => Level::Debug,
    };
    log(level, Domain::Session, "apply", fields);
}

pub fn log_navigation(from: &str, to: &str) {
    log(
        Level::Info,
        Domain::View,
        "navigate",
        obj(&[("from", v_str(from)), ("screen", v_str(to))]),
    );
}

/// Log a profile hash for replay verification
pub fn log_audit(event_type: &str, update_seq: u64, profile_hash: &str) {
    log(
        Level::Debug,
        Domain::Audit,
        event_type,
        obj(&[
            ("update_seq", json!(update_seq)),
            ("profile_hash", v_str(profile_hash)),
        ]),
    );
}

// =============================================================================
// Utility Functions
// =============================================================================

/// Hex SHA-256 of `input`; stable across runs and platforms.
pub fn content_hash(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

pub fn obj(pairs: &[(&str, Value)]) -> Map<String, Value> {
    let mut map = Map::new();
    for (k, v) in pairs {
        map.insert((*k).to_string(), v.clone());
    }
    map
}

pub fn v_str(s: &str) -> Value {
    Value::String(s.to_string())
}

pub fn v_num(n: f64) -> Value {
    json!(n)
}

// =============================================================================
// Timing Scope
// =============================================================================

/// Emits elapsed time at trace level on drop.
pub struct TimedScope {
    label: &'static str,
    context: Map<String, Value>,
    started: Instant,
}

impl TimedScope {
    pub fn with_context(label: &'static str, fields: &[(&str, Value)]) -> Self {
        Self {
            label,
            context: obj(fields),
            started: Instant::now(),
        }
    }
}

impl Drop for TimedScope {
    fn drop(&mut self) {
        let elapsed_ms = self.started.elapsed().as_secs_f64() * 1000.0;
        let mut fields = std::mem::take(&mut self.context);
        fields.insert("label".to_string(), v_str(self.label));
        fields.insert("elapsed_ms".to_string(), v_num(elapsed_ms));
        log(Level::Trace, Domain::Timing, "scope", fields);
    }
}

// =============================================================================
// Tests
// =============================================================================
