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

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::command::{
    ProgrammerOptions, DEFAULT_BIT_CLOCK, DEFAULT_PROGRAMMER, DEFAULT_RETRY_COUNT, MAX_BIT_CLOCK,
    MAX_RETRY_COUNT, MAX_VERBOSITY,
};
use crate::error::{FlasherError, Result};

fn default_true() -> bool { true }
fn default_bit_clock() -> u32 { DEFAULT_BIT_CLOCK }
fn default_retry_count() -> u32 { DEFAULT_RETRY_COUNT }
fn default_programmer() -> String { DEFAULT_PROGRAMMER.to_string() }
fn default_avrdude() -> String { "avrdude".to_string() }

/// Settings persisted across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub chip_family: Option<String>,
    #[serde(default)]
    pub chip: Option<String>,
    #[serde(default = "default_true")]
    pub verify: bool,
    #[serde(default = "default_true")]
    pub erase: bool,
    #[serde(default = "default_bit_clock")]
    pub bit_clock: u32,
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,
    #[serde(default = "default_programmer")]
    pub programmer: String,
    #[serde(default)]
    pub verbosity: u8,
    /// Executable used for every operation
    #[serde(default = "default_avrdude")]
    pub avrdude_path: String,
    /// Optional JSON chip database replacing the built-in table
    #[serde(default)]
    pub chip_database: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            chip_family: None,
            chip: None,
            verify: true,
            erase: true,
            bit_clock: DEFAULT_BIT_CLOCK,
            retry_count: DEFAULT_RETRY_COUNT,
            programmer: default_programmer(),
            verbosity: 0,
            avrdude_path: default_avrdude(),
            chip_database: None,
        }
    }
}

impl Settings {
    /// Programmer options seeded from these settings; fuse-check stays off.
    pub fn programmer_options(&self) -> ProgrammerOptions {
        ProgrammerOptions {
            programmer: self.programmer.clone(),
            bit_clock: self.bit_clock,
            retry_count: self.retry_count,
            disable_fuse_check: false,
            erase: self.erase,
            verify: self.verify,
            verbosity: self.verbosity,
        }
    }

    pub fn store_options(&mut self, opts: &ProgrammerOptions) {
        self.programmer = opts.programmer.clone();
        self.bit_clock = opts.bit_clock;
        self.retry_count = opts.retry_count;
        self.erase = opts.erase;
        self.verify = opts.verify;
        self.verbosity = opts.verbosity;
    }
}

pub fn settings_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        if !xdg.is_empty() {
            return Path::new(&xdg).join("avrflasher").join("settings.json");
        }
    }
    if let Ok(home) = env::var("HOME") {
        return Path::new(&home)
            .join(".config")
            .join("avrflasher")
            .join("settings.json");
    }
    PathBuf::from("/tmp/avrflasher/settings.json")
}

/// Clamp numeric fields into the ranges the option controls allow.
pub fn validate_settings(settings: &mut Settings) {
    settings.bit_clock = settings.bit_clock.min(MAX_BIT_CLOCK);
    settings.retry_count = settings.retry_count.min(MAX_RETRY_COUNT);
    settings.verbosity = settings.verbosity.min(MAX_VERBOSITY);
    if settings.programmer.trim().is_empty() {
        settings.programmer = default_programmer();
    }
    if settings.avrdude_path.trim().is_empty() {
        settings.avrdude_path = default_avrdude();
    }
}

pub fn load_settings_from(path: &Path) -> Option<Settings> {
    let data = fs::read_to_string(path).ok()?;
    let mut settings: Settings = serde_json::from_str(&data).ok()?;
    validate_settings(&mut settings);
    Some(settings)
}

/// Saved settings, or defaults when none are readable.
pub fn load_settings() -> Settings {
    load_settings_from(&settings_path()).unwrap_or_default()
}

pub fn save_settings_to(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json).map_err(|source| FlasherError::SettingsWrite {
        path: path.to_path_buf(),
        source,
    })
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    save_settings_to(&settings_path(), settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_default_settings() {
        let s = Settings::default();
        assert!(s.verify);
        assert!(s.erase);
        assert_eq!(s.bit_clock, 1);
        assert_eq!(s.retry_count, 3);
        assert_eq!(s.programmer, "usbasp");
        assert_eq!(s.avrdude_path, "avrdude");
        assert!(s.chip_family.is_none());
        assert!(s.chip_database.is_none());
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let s: Settings = serde_json::from_str(r#"{ "chip": "t85", "verify": false }"#).unwrap();
        assert_eq!(s.chip.as_deref(), Some("t85"));
        assert!(!s.verify);
        assert!(s.erase);
        assert_eq!(s.retry_count, 3);
        assert_eq!(s.programmer, "usbasp");
    }

    #[test]
    fn test_validate_clamps_ranges() {
        let mut s = Settings {
            bit_clock: 1000,
            retry_count: 99,
            verbosity: 7,
            programmer: "  ".to_string(),
            ..Default::default()
        };
        validate_settings(&mut s);
        assert_eq!(s.bit_clock, 250);
        assert_eq!(s.retry_count, 10);
        assert_eq!(s.verbosity, 2);
        assert_eq!(s.programmer, "usbasp");
    }

    #[test]
    fn test_round_trip_through_file() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("nested").join("settings.json");
        let s = Settings {
            chip_family: Some("ATtiny Series".to_string()),
            chip: Some("t85".to_string()),
            verify: false,
            bit_clock: 32,
            ..Default::default()
        };
        save_settings_to(&path, &s)?;
        assert_eq!(load_settings_from(&path), Some(s));
        Ok(())
    }

    #[test]
    fn test_load_malformed_file_is_none() -> anyhow::Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(b"not json")?;
        assert!(load_settings_from(file.path()).is_none());
        assert!(load_settings_from(Path::new("/nonexistent/settings.json")).is_none());
        Ok(())
    }

    #[test]
    fn test_options_round_trip() {
        let mut s = Settings::default();
        let opts = ProgrammerOptions {
            programmer: "arduino".to_string(),
            bit_clock: 10,
            retry_count: 0,
            disable_fuse_check: true,
            erase: false,
            verify: false,
            verbosity: 1,
        };
        s.store_options(&opts);
        let back = s.programmer_options();
        assert_eq!(back, ProgrammerOptions { disable_fuse_check: false, ..opts });
    }

    #[test]
    #[serial]
    fn test_settings_path_prefers_xdg() {
        let old = env::var("XDG_CONFIG_HOME").ok();
        env::set_var("XDG_CONFIG_HOME", "/tmp/xdg-test");
        assert_eq!(settings_path(), PathBuf::from("/tmp/xdg-test/avrflasher/settings.json"));
        match old {
            Some(v) => env::set_var("XDG_CONFIG_HOME", v),
            None => env::remove_var("XDG_CONFIG_HOME"),
        }
    }

    #[test]
    #[serial]
    fn test_load_settings_uses_xdg_location() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let old = env::var("XDG_CONFIG_HOME").ok();
        env::set_var("XDG_CONFIG_HOME", dir.path());

        assert_eq!(load_settings(), Settings::default());
        let s = Settings { retry_count: 7, ..Default::default() };
        save_settings(&s)?;
        assert_eq!(load_settings().retry_count, 7);

        match old {
            Some(v) => env::set_var("XDG_CONFIG_HOME", v),
            None => env::remove_var("XDG_CONFIG_HOME"),
        }
        Ok(())
    }
}
