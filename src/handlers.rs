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

use serde_json::json;

use crate::app::{Action, AdvancedField, App, InputPurpose, Tab, DEFAULT_STATUS};
use crate::command::{build_command, render_command, Operation, MAX_BIT_CLOCK, MAX_RETRY_COUNT, MAX_VERBOSITY};
use crate::error::FlasherError;
use crate::logger;

// ===== Running operations =====

/// Validate, assemble and launch one avrdude operation. Refused while
/// another operation is still in flight.
pub fn run_operation(app: &mut App, op: Operation) {
    if app.is_busy() {
        app.warn(FlasherError::Busy.to_string());
        return;
    }
    if let Err(e) = op.validate() {
        app.warn(e.to_string());
        return;
    }
    let Some(chip) = app.current_chip() else {
        app.warn("No chip selected");
        return;
    };
    let argv = build_command(&app.avrdude_path, &chip.part_id, &app.options, &op);

    app.console_scroll = 0;
    app.log(format!("Executing: {}", render_command(&argv)));
    app.log("");
    logger::log_event("operation_start", json!({ "operation": op.label(), "argv": argv }));

    match app.launcher.launch(&argv) {
        Ok(rx) => {
            app.active = Some(rx);
            app.active_label = op.label().to_string();
            app.status = format!("{} running...", op.label());
        }
        Err(e) => {
            app.log(format!("Error: {}", e));
            app.status = format!("{} failed to start", op.label());
            logger::log_event("operation_failed", json!({ "operation": op.label(), "message": e.to_string() }));
        }
    }
}

fn selected_file(file: &Option<PathBuf>) -> Option<PathBuf> {
    file.as_ref().filter(|p| !p.as_os_str().is_empty()).cloned()
}

pub fn trigger_action(app: &mut App, action: Action) {
    match action {
        Action::SelectFlashFile => start_input(app, InputPurpose::FlashFile),
        Action::SelectEepromFile => start_input(app, InputPurpose::EepromFile),
        Action::EditFuse(kind) => start_input(app, InputPurpose::Fuse(kind)),
        Action::WriteFlash => match selected_file(&app.flash_file) {
            Some(p) => run_operation(app, Operation::WriteFlash(p)),
            None => app.warn("Please select a hex file first!"),
        },
        Action::VerifyFlash => match selected_file(&app.flash_file) {
            Some(p) => run_operation(app, Operation::VerifyFlash(p)),
            None => app.warn("Please select a hex file first!"),
        },
        Action::WriteEeprom => match selected_file(&app.eeprom_file) {
            Some(p) => run_operation(app, Operation::WriteEeprom(p)),
            None => app.warn("Please select an EEPROM file first!"),
        },
        Action::VerifyEeprom => match selected_file(&app.eeprom_file) {
            Some(p) => run_operation(app, Operation::VerifyEeprom(p)),
            None => app.warn("Please select an EEPROM file first!"),
        },
        Action::ReadFlash => start_input(app, InputPurpose::FlashDump),
        Action::ReadEeprom => start_input(app, InputPurpose::EepromDump),
        Action::ReadFuses => run_operation(app, Operation::ReadFuses),
        Action::WriteFuses => start_write_fuses(app),
        Action::ResetFuses => {
            app.reset_fuses();
            app.status = "Fuses reset to chip defaults".to_string();
        }
        Action::ClearConsole => app.clear_console(),
    }
}

pub fn trigger_selected_action(app: &mut App) {
    if let Some(action) = Action::ALL.get(app.action_idx).copied() {
        trigger_action(app, action);
    }
}

// ===== Fuse write confirmation =====

/// Fuse writes can brick a device: validate, then ask before anything runs.
pub fn start_write_fuses(app: &mut App) {
    if app.is_busy() {
        app.warn(FlasherError::Busy.to_string());
        return;
    }
    let op = Operation::WriteFuses(app.fuse_values());
    if let Err(e) = op.validate() {
        app.warn(e.to_string());
        return;
    }
    app.show_confirm_fuse_popup = true;
}

pub fn confirm_write_fuses(app: &mut App) {
    if !app.show_confirm_fuse_popup {
        return;
    }
    app.show_confirm_fuse_popup = false;
    run_operation(app, Operation::WriteFuses(app.fuse_values()));
}

pub fn cancel_write_fuses(app: &mut App) {
    app.show_confirm_fuse_popup = false;
    app.status = "Fuse write cancelled".to_string();
}

// ===== Text entry popup =====

pub fn start_input(app: &mut App, purpose: InputPurpose) {
    app.input_buffer = match purpose {
        InputPurpose::FlashFile => app.flash_file.as_ref().map(|p| p.display().to_string()).unwrap_or_default(),
        InputPurpose::EepromFile => app.eeprom_file.as_ref().map(|p| p.display().to_string()).unwrap_or_default(),
        InputPurpose::FlashDump | InputPurpose::EepromDump => String::new(),
        InputPurpose::Fuse(kind) => app.fuse(kind).to_string(),
        InputPurpose::Programmer => app.options.programmer.clone(),
    };
    app.input_purpose = Some(purpose);
    app.show_input_popup = true;
}

pub fn cancel_input(app: &mut App) {
    app.show_input_popup = false;
    app.input_purpose = None;
    app.input_buffer.clear();
}

/// Commit the popup's text. An empty entry behaves like a cancelled dialog.
pub fn apply_input(app: &mut App) {
    let Some(purpose) = app.input_purpose else {
        cancel_input(app);
        return;
    };
    let value = app.input_buffer.trim().to_string();
    cancel_input(app);
    if value.is_empty() {
        return;
    }
    match purpose {
        InputPurpose::FlashFile => {
            app.status = format!("Flash file: {}", value);
            app.flash_file = Some(PathBuf::from(value));
        }
        InputPurpose::EepromFile => {
            app.status = format!("EEPROM file: {}", value);
            app.eeprom_file = Some(PathBuf::from(value));
        }
        InputPurpose::FlashDump => run_operation(app, Operation::ReadFlash(PathBuf::from(value))),
        InputPurpose::EepromDump => run_operation(app, Operation::ReadEeprom(PathBuf::from(value))),
        InputPurpose::Fuse(kind) => *app.fuse_mut(kind) = value,
        InputPurpose::Programmer => app.options.programmer = value,
    }
}

// ===== Chip picker popup =====

pub fn open_chip_picker(app: &mut App) {
    let Some(chip) = app.current_chip() else { return };
    let family = chip.family.clone();
    let key = chip.key.clone();
    app.picker_family_idx = app.table.families().iter().position(|f| *f == family).unwrap_or(0);
    app.picker_model_idx = app.table.models(&family).position(|r| r.key == key).unwrap_or(0);
    app.show_chip_picker = true;
}

pub fn close_chip_picker(app: &mut App) {
    app.show_chip_picker = false;
}

pub fn picker_family(app: &App) -> Option<&str> {
    app.table.families().get(app.picker_family_idx).map(|s| s.as_str())
}

pub fn picker_model_count(app: &App) -> usize {
    picker_family(app).map(|f| app.table.models(f).count()).unwrap_or(0)
}

pub fn picker_move_family(app: &mut App, delta: isize) {
    let n = app.table.families().len();
    if n == 0 {
        return;
    }
    app.picker_family_idx = (app.picker_family_idx as isize + delta).rem_euclid(n as isize) as usize;
    app.picker_model_idx = 0;
}

pub fn picker_move_model(app: &mut App, delta: isize) {
    let n = picker_model_count(app);
    if n == 0 {
        return;
    }
    let cur = app.picker_model_idx as isize + delta;
    app.picker_model_idx = cur.clamp(0, n as isize - 1) as usize;
}

pub fn picker_apply(app: &mut App) {
    let selection = picker_family(app).and_then(|family| {
        app.table
            .models(family)
            .nth(app.picker_model_idx)
            .map(|r| (r.family.clone(), r.key.clone()))
    });
    if let Some((family, key)) = selection {
        if let Some(idx) = app.table.position(&family, &key) {
            app.select_chip(idx);
            app.status = format!("Selected {} ({})", key, family);
        }
    }
    app.show_chip_picker = false;
}

// ===== Quit =====

/// Quitting would drop avrdude mid-write, so it is refused while busy.
pub fn request_quit(app: &mut App) -> bool {
    if app.is_busy() {
        app.warn(FlasherError::Busy.to_string());
        return false;
    }
    true
}

// ===== Navigation =====

pub fn move_up(app: &mut App) {
    match app.tab {
        Tab::Operations => app.action_idx = app.action_idx.saturating_sub(1),
        Tab::Advanced => app.advanced_idx = app.advanced_idx.saturating_sub(1),
        Tab::ChipInfo => {}
    }
}

pub fn move_down(app: &mut App) {
    match app.tab {
        Tab::Operations => {
            if app.action_idx + 1 < Action::ALL.len() {
                app.action_idx += 1;
            }
        }
        Tab::Advanced => {
            if app.advanced_idx + 1 < AdvancedField::ALL.len() {
                app.advanced_idx += 1;
            }
        }
        Tab::ChipInfo => {}
    }
}

pub fn switch_tab(app: &mut App, tab: Tab) {
    app.tab = tab;
    app.status = DEFAULT_STATUS.to_string();
}

// ===== Advanced options =====

fn step_u32(value: u32, delta: i64, max: u32) -> u32 {
    (value as i64 + delta).clamp(0, max as i64) as u32
}

/// Toggle a flag or nudge a number on the selected Advanced row.
pub fn advanced_adjust(app: &mut App, delta: i64) {
    let Some(field) = AdvancedField::ALL.get(app.advanced_idx).copied() else { return };
    if field == AdvancedField::Programmer {
        start_input(app, InputPurpose::Programmer);
        return;
    }
    let opts = &mut app.options;
    match field {
        AdvancedField::Verify => opts.verify = !opts.verify,
        AdvancedField::Erase => opts.erase = !opts.erase,
        AdvancedField::DisableFuseCheck => opts.disable_fuse_check = !opts.disable_fuse_check,
        AdvancedField::BitClock => opts.bit_clock = step_u32(opts.bit_clock, delta, MAX_BIT_CLOCK),
        AdvancedField::RetryCount => opts.retry_count = step_u32(opts.retry_count, delta, MAX_RETRY_COUNT),
        AdvancedField::Verbosity => {
            opts.verbosity = step_u32(opts.verbosity as u32, delta, MAX_VERBOSITY as u32) as u8;
        }
        AdvancedField::Programmer => {}
    }
}
