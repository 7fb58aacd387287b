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

use std::path::PathBuf;
use std::sync::mpsc::{Receiver, TryRecvError};

use serde_json::json;

use crate::chips::{ChipRecord, ChipTable};
use crate::command::{FuseValues, ProgrammerOptions};
use crate::config::Settings;
use crate::logger;
use crate::runner::{Launcher, RunEvent};

pub const MAX_CONSOLE_LINES: usize = 5000;

pub const DEFAULT_STATUS: &str =
    "Tab/1-3: tabs | ↑/↓: move | Enter: run | p: pick chip | c: clear console | PgUp/PgDn: scroll | q: quit";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tab {
    Operations,
    ChipInfo,
    Advanced,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Operations, Tab::ChipInfo, Tab::Advanced];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Operations => "Operations",
            Tab::ChipInfo => "Chip Info",
            Tab::Advanced => "Advanced Options",
        }
    }

    pub fn index(self) -> usize {
        Tab::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn prev(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FuseKind {
    Low,
    High,
    Extended,
}

impl FuseKind {
    pub fn label(self) -> &'static str {
        match self {
            FuseKind::Low => "Low Fuse",
            FuseKind::High => "High Fuse",
            FuseKind::Extended => "Extended Fuse",
        }
    }
}

/// Entries of the Operations tab, top to bottom.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    SelectFlashFile,
    WriteFlash,
    ReadFlash,
    VerifyFlash,
    EditFuse(FuseKind),
    ReadFuses,
    WriteFuses,
    ResetFuses,
    SelectEepromFile,
    WriteEeprom,
    ReadEeprom,
    VerifyEeprom,
    ClearConsole,
}

impl Action {
    pub const ALL: [Action; 15] = [
        Action::SelectFlashFile,
        Action::WriteFlash,
        Action::ReadFlash,
        Action::VerifyFlash,
        Action::EditFuse(FuseKind::Low),
        Action::EditFuse(FuseKind::High),
        Action::EditFuse(FuseKind::Extended),
        Action::ReadFuses,
        Action::WriteFuses,
        Action::ResetFuses,
        Action::SelectEepromFile,
        Action::WriteEeprom,
        Action::ReadEeprom,
        Action::VerifyEeprom,
        Action::ClearConsole,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Action::SelectFlashFile => "Select Hex File",
            Action::WriteFlash => "Write Flash",
            Action::ReadFlash => "Read Flash",
            Action::VerifyFlash => "Verify Flash",
            Action::EditFuse(kind) => kind.label(),
            Action::ReadFuses => "Read All Fuses",
            Action::WriteFuses => "Write Fuses",
            Action::ResetFuses => "Reset to Defaults",
            Action::SelectEepromFile => "Select EEPROM File",
            Action::WriteEeprom => "Write EEPROM",
            Action::ReadEeprom => "Read EEPROM",
            Action::VerifyEeprom => "Verify EEPROM",
            Action::ClearConsole => "Clear Console",
        }
    }
}

/// Rows of the Advanced Options tab.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AdvancedField {
    Verify,
    Erase,
    DisableFuseCheck,
    BitClock,
    RetryCount,
    Verbosity,
    Programmer,
}

impl AdvancedField {
    pub const ALL: [AdvancedField; 7] = [
        AdvancedField::Verify,
        AdvancedField::Erase,
        AdvancedField::DisableFuseCheck,
        AdvancedField::BitClock,
        AdvancedField::RetryCount,
        AdvancedField::Verbosity,
        AdvancedField::Programmer,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AdvancedField::Verify => "Verify after writing",
            AdvancedField::Erase => "Erase before writing",
            AdvancedField::DisableFuseCheck => "Disable fuse verification",
            AdvancedField::BitClock => "Bit Clock Period (µs)",
            AdvancedField::RetryCount => "Connect Retry Count",
            AdvancedField::Verbosity => "Verbosity",
            AdvancedField::Programmer => "Programmer",
        }
    }
}

/// What the text-entry popup is collecting.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputPurpose {
    FlashFile,
    EepromFile,
    FlashDump,
    EepromDump,
    Fuse(FuseKind),
    Programmer,
}

impl InputPurpose {
    pub fn title(self) -> &'static str {
        match self {
            InputPurpose::FlashFile => " Select Hex File ",
            InputPurpose::EepromFile => " Select EEPROM File ",
            InputPurpose::FlashDump => " Save Flash Dump ",
            InputPurpose::EepromDump => " Save EEPROM Dump ",
            InputPurpose::Fuse(FuseKind::Low) => " Low Fuse ",
            InputPurpose::Fuse(FuseKind::High) => " High Fuse ",
            InputPurpose::Fuse(FuseKind::Extended) => " Extended Fuse ",
            InputPurpose::Programmer => " Programmer Type ",
        }
    }
}

pub struct App {
    pub table: ChipTable,
    /// Index into `table.records()`
    pub chip_idx: usize,
    pub tab: Tab,
    pub action_idx: usize,
    pub advanced_idx: usize,
    pub options: ProgrammerOptions,
    pub avrdude_path: String,
    pub chip_database: Option<PathBuf>,
    pub flash_file: Option<PathBuf>,
    pub eeprom_file: Option<PathBuf>,
    pub lfuse: String,
    pub hfuse: String,
    pub efuse: String,
    pub console: Vec<String>,
    /// Lines scrolled up from the bottom of the console
    pub console_scroll: usize,
    pub status: String,
    // generic warning popup
    pub show_warning_popup: bool,
    pub warning_message: String,
    // fuse write confirmation
    pub show_confirm_fuse_popup: bool,
    // text entry popup (paths, fuse values)
    pub show_input_popup: bool,
    pub input_purpose: Option<InputPurpose>,
    pub input_buffer: String,
    // chip picker popup
    pub show_chip_picker: bool,
    pub picker_family_idx: usize,
    pub picker_model_idx: usize,
    pub launcher: Box<dyn Launcher>,
    /// Event stream of the operation in flight, if any
    pub active: Option<Receiver<RunEvent>>,
    pub active_label: String,
}

impl App {
    pub fn new(table: ChipTable, settings: &Settings, launcher: Box<dyn Launcher>) -> Self {
        let mut app = Self {
            table,
            chip_idx: 0,
            tab: Tab::Operations,
            action_idx: 0,
            advanced_idx: 0,
            options: settings.programmer_options(),
            avrdude_path: settings.avrdude_path.clone(),
            chip_database: settings.chip_database.clone(),
            flash_file: None,
            eeprom_file: None,
            lfuse: String::new(),
            hfuse: String::new(),
            efuse: String::new(),
            console: Vec::new(),
            console_scroll: 0,
            status: DEFAULT_STATUS.to_string(),
            show_warning_popup: false,
            warning_message: String::new(),
            show_confirm_fuse_popup: false,
            show_input_popup: false,
            input_purpose: None,
            input_buffer: String::new(),
            show_chip_picker: false,
            picker_family_idx: 0,
            picker_model_idx: 0,
            launcher,
            active: None,
            active_label: String::new(),
        };

        // Restore the saved chip when it still exists in the table
        let restored = match (&settings.chip_family, &settings.chip) {
            (Some(family), Some(chip)) => app.table.position(family, chip),
            (None, Some(chip)) => app.table.records().iter().position(|r| &r.key == chip),
            _ => None,
        };
        app.select_chip(restored.unwrap_or(0));
        app
    }

    pub fn current_chip(&self) -> Option<&ChipRecord> {
        self.table.records().get(self.chip_idx)
    }

    /// Select a chip and load its default fuses into the fuse fields.
    pub fn select_chip(&mut self, idx: usize) {
        if idx >= self.table.len() {
            return;
        }
        self.chip_idx = idx;
        self.reset_fuses();
    }

    pub fn reset_fuses(&mut self) {
        let Some(chip) = self.table.records().get(self.chip_idx) else { return };
        self.lfuse = chip.default_lfuse.clone();
        self.hfuse = chip.default_hfuse.clone();
        self.efuse = chip.default_efuse.clone();
    }

    pub fn fuse_values(&self) -> FuseValues {
        FuseValues {
            low: self.lfuse.clone(),
            high: self.hfuse.clone(),
            extended: self.efuse.clone(),
        }
    }

    pub fn fuse_mut(&mut self, kind: FuseKind) -> &mut String {
        match kind {
            FuseKind::Low => &mut self.lfuse,
            FuseKind::High => &mut self.hfuse,
            FuseKind::Extended => &mut self.efuse,
        }
    }

    pub fn fuse(&self, kind: FuseKind) -> &str {
        match kind {
            FuseKind::Low => &self.lfuse,
            FuseKind::High => &self.hfuse,
            FuseKind::Extended => &self.efuse,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.active.is_some()
    }

    pub fn log(&mut self, line: impl Into<String>) {
        self.console.push(line.into());
        if self.console.len() > MAX_CONSOLE_LINES {
            let excess = self.console.len() - MAX_CONSOLE_LINES;
            self.console.drain(..excess);
        }
    }

    pub fn clear_console(&mut self) {
        self.console.clear();
        self.console_scroll = 0;
    }

    pub fn scroll_console(&mut self, delta: isize) {
        let max = self.console.len().saturating_sub(1);
        let cur = self.console_scroll as isize + delta;
        self.console_scroll = cur.clamp(0, max as isize) as usize;
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warning_message = message.into();
        self.show_warning_popup = true;
    }

    /// Drain pending subprocess events into the console. Returns true when
    /// anything changed.
    pub fn poll_operation(&mut self) -> bool {
        let mut changed = false;
        loop {
            let Some(rx) = self.active.as_ref() else { break };
            match rx.try_recv() {
                Ok(RunEvent::Output(line)) => {
                    self.log(line);
                    changed = true;
                }
                Ok(RunEvent::Finished) => {
                    self.log("");
                    self.log("Operation completed successfully!");
                    self.status = format!("{} completed", self.active_label);
                    logger::log_event("operation_finished", json!({ "operation": self.active_label }));
                    self.active = None;
                    changed = true;
                }
                Ok(RunEvent::Failed { code, message }) => {
                    self.log("");
                    self.log(format!("Error: {}", message));
                    self.status = format!("{} failed", self.active_label);
                    logger::log_event(
                        "operation_failed",
                        json!({ "operation": self.active_label, "code": code, "message": message }),
                    );
                    self.active = None;
                    changed = true;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.log("Error: operation ended without reporting a result");
                    self.status = format!("{} failed", self.active_label);
                    self.active = None;
                    changed = true;
                }
            }
        }
        changed
    }

    /// Snapshot of the state that persists across runs.
    pub fn to_settings(&self) -> Settings {
        let mut settings = Settings {
            chip_family: self.current_chip().map(|c| c.family.clone()),
            chip: self.current_chip().map(|c| c.key.clone()),
            avrdude_path: self.avrdude_path.clone(),
            chip_database: self.chip_database.clone(),
            ..Settings::default()
        };
        settings.store_options(&self.options);
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::MockLauncher;
    use std::sync::mpsc;

    fn test_app(settings: &Settings) -> App {
        App::new(ChipTable::builtin(), settings, Box::new(MockLauncher::new()))
    }

    #[test]
    fn test_new_selects_first_chip_by_default() {
        let app = test_app(&Settings::default());
        let builtin = ChipTable::builtin();
        let first = &builtin.records()[0];
        assert_eq!(app.current_chip(), Some(first));
        assert_eq!(app.lfuse, first.default_lfuse);
        assert_eq!(app.hfuse, first.default_hfuse);
        assert_eq!(app.efuse, first.default_efuse);
        assert_eq!(app.tab, Tab::Operations);
        assert!(!app.is_busy());
        assert!(app.status.contains("Tab"));
    }

    #[test]
    fn test_new_restores_saved_chip_and_options() {
        let settings = Settings {
            chip_family: Some("ATtiny Series".to_string()),
            chip: Some("t85".to_string()),
            verify: false,
            bit_clock: 32,
            retry_count: 5,
            ..Default::default()
        };
        let app = test_app(&settings);
        let chip = app.current_chip().unwrap();
        assert_eq!(chip.key, "t85");
        assert_eq!(app.lfuse, "0x62");
        assert_eq!(app.hfuse, "0xDF");
        assert!(!app.options.verify);
        assert_eq!(app.options.bit_clock, 32);
        assert_eq!(app.options.retry_count, 5);
    }

    #[test]
    fn test_unknown_saved_chip_falls_back_to_first() {
        let settings = Settings {
            chip_family: Some("ATtiny Series".to_string()),
            chip: Some("m328p".to_string()),
            ..Default::default()
        };
        let app = test_app(&settings);
        assert_eq!(app.chip_idx, 0);
    }

    #[test]
    fn test_reset_fuses_restores_defaults() {
        let mut app = test_app(&Settings::default());
        app.lfuse = "0x00".to_string();
        *app.fuse_mut(FuseKind::Extended) = "0x01".to_string();
        app.reset_fuses();
        let chip = app.current_chip().unwrap().clone();
        assert_eq!(app.fuse(FuseKind::Low), chip.default_lfuse);
        assert_eq!(app.fuse(FuseKind::Extended), chip.default_efuse);
    }

    #[test]
    fn test_console_is_capped() {
        let mut app = test_app(&Settings::default());
        for i in 0..(MAX_CONSOLE_LINES + 10) {
            app.log(format!("line {}", i));
        }
        assert_eq!(app.console.len(), MAX_CONSOLE_LINES);
        assert_eq!(app.console[0], "line 10");
        app.clear_console();
        assert!(app.console.is_empty());
    }

    #[test]
    fn test_scroll_console_bounds() {
        let mut app = test_app(&Settings::default());
        app.scroll_console(5);
        assert_eq!(app.console_scroll, 0);
        for i in 0..10 {
            app.log(format!("{}", i));
        }
        app.scroll_console(100);
        assert_eq!(app.console_scroll, 9);
        app.scroll_console(-4);
        assert_eq!(app.console_scroll, 5);
        app.scroll_console(-100);
        assert_eq!(app.console_scroll, 0);
    }

    #[test]
    fn test_poll_operation_success() {
        let mut app = test_app(&Settings::default());
        let (tx, rx) = mpsc::channel();
        app.active = Some(rx);
        app.active_label = "Read Fuses".to_string();
        tx.send(RunEvent::Output("avrdude: Device signature = 0x1e950f".to_string())).unwrap();
        assert!(app.poll_operation());
        assert!(app.is_busy());
        tx.send(RunEvent::Finished).unwrap();
        assert!(app.poll_operation());
        assert!(!app.is_busy());
        assert_eq!(app.console.first().unwrap(), "avrdude: Device signature = 0x1e950f");
        assert_eq!(app.console.last().unwrap(), "Operation completed successfully!");
        assert_eq!(app.status, "Read Fuses completed");
    }

    #[test]
    fn test_poll_operation_failure_reports_code() {
        let mut app = test_app(&Settings::default());
        let (tx, rx) = mpsc::channel();
        app.active = Some(rx);
        tx.send(RunEvent::Failed { code: Some(1), message: "Operation failed with error code: 1".to_string() })
            .unwrap();
        app.poll_operation();
        assert!(!app.is_busy());
        assert_eq!(app.console.last().unwrap(), "Error: Operation failed with error code: 1");
    }

    #[test]
    fn test_poll_operation_disconnected_clears_guard() {
        let mut app = test_app(&Settings::default());
        let (tx, rx) = mpsc::channel::<RunEvent>();
        app.active = Some(rx);
        drop(tx);
        assert!(app.poll_operation());
        assert!(!app.is_busy());
    }

    #[test]
    fn test_poll_operation_idle_is_noop() {
        let mut app = test_app(&Settings::default());
        assert!(!app.poll_operation());
    }

    #[test]
    fn test_to_settings_captures_selection() {
        let mut app = test_app(&Settings::default());
        let idx = app.table.position("ATtiny Series", "t13").unwrap();
        app.select_chip(idx);
        app.options.erase = false;
        app.options.retry_count = 6;
        let s = app.to_settings();
        assert_eq!(s.chip_family.as_deref(), Some("ATtiny Series"));
        assert_eq!(s.chip.as_deref(), Some("t13"));
        assert!(!s.erase);
        assert_eq!(s.retry_count, 6);
    }

    #[test]
    fn test_tab_cycling() {
        assert_eq!(Tab::Operations.next(), Tab::ChipInfo);
        assert_eq!(Tab::Advanced.next(), Tab::Operations);
        assert_eq!(Tab::Operations.prev(), Tab::Advanced);
    }
}
