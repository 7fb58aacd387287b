/*
 * This file is part of AVR Flasher.
 *
 * Copyright (C) 2025 AVR Flasher contributors
 *
 * AVR Flasher is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * AVR Flasher is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with AVR Flasher. If not, see <https://www.gnu.org/licenses/>.
 */

//! Opt-in JSON-lines event log (`--logging`).

use std::env;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use lazy_static::lazy_static;
use serde_json::{json, Value};

const FALLBACK_LOG_PATH: &str = "/tmp/avrflasher_logs.json";

lazy_static! {
    static ref LOG_FILE: Mutex<Option<File>> = Mutex::new(None);
}

fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

pub fn log_path() -> PathBuf {
    if let Ok(state) = env::var("XDG_STATE_HOME") {
        if !state.is_empty() {
            return Path::new(&state).join("avrflasher").join("logs.json");
        }
    }
    if let Ok(home) = env::var("HOME") {
        return Path::new(&home)
            .join(".local")
            .join("state")
            .join("avrflasher")
            .join("logs.json");
    }
    PathBuf::from(FALLBACK_LOG_PATH)
}

fn open_append(path: &Path) -> Option<File> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}

pub fn init_logging() {
    let file = open_append(&log_path()).or_else(|| open_append(Path::new(FALLBACK_LOG_PATH)));
    if let Ok(mut guard) = LOG_FILE.lock() {
        *guard = file;
    }
}

pub fn is_enabled() -> bool {
    LOG_FILE.lock().map(|g| g.is_some()).unwrap_or(false)
}

/// Append one record. Does nothing unless `init_logging` ran.
pub fn log_event(event: &str, data: Value) {
    let Ok(mut guard) = LOG_FILE.lock() else { return };
    let Some(f) = guard.as_mut() else { return };
    let line = json!({
        "ts_ms": now_millis(),
        "event": event,
        "data": data,
    });
    let _ = writeln!(f, "{}", line);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn test_log_path_prefers_xdg_state() {
        let old = env::var("XDG_STATE_HOME").ok();
        env::set_var("XDG_STATE_HOME", "/tmp/state-test");
        assert_eq!(log_path(), PathBuf::from("/tmp/state-test/avrflasher/logs.json"));
        match old {
            Some(v) => env::set_var("XDG_STATE_HOME", v),
            None => env::remove_var("XDG_STATE_HOME"),
        }
    }

    #[test]
    #[serial]
    fn test_init_and_write_records() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let old = env::var("XDG_STATE_HOME").ok();
        env::set_var("XDG_STATE_HOME", dir.path());

        init_logging();
        assert!(is_enabled());
        log_event("operation_start", json!({ "argv": ["avrdude", "-c", "usbasp"] }));

        let content = fs::read_to_string(dir.path().join("avrflasher").join("logs.json"))?;
        let last: Value = serde_json::from_str(content.lines().last().unwrap_or("{}"))?;
        assert_eq!(last["event"], "operation_start");
        assert_eq!(last["data"]["argv"][2], "usbasp");
        assert!(last["ts_ms"].is_u64());

        if let Ok(mut guard) = LOG_FILE.lock() {
            *guard = None;
        }
        match old {
            Some(v) => env::set_var("XDG_STATE_HOME", v),
            None => env::remove_var("XDG_STATE_HOME"),
        }
        Ok(())
    }
}
