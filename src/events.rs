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

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crate::app::{App, Tab};
use crate::handlers::*;

const CONSOLE_PAGE: isize = 10;
const PICKER_PAGE: isize = 10;

/// Main event handler that processes keyboard input. Returns true to quit.
pub fn handle_key_event(app: &mut App, key_event: KeyEvent) -> anyhow::Result<bool> {
    let KeyEvent { code, modifiers, .. } = key_event;

    if matches!(code, KeyCode::Char('c')) && modifiers.contains(KeyModifiers::CONTROL) {
        return Ok(request_quit(app));
    }

    // Handle popup states first (highest priority)
    if handle_popup_events(app, code)? {
        return Ok(false);
    }

    // Handle tab-specific events
    let consumed = match app.tab {
        Tab::Operations => handle_operations_events(app, code),
        Tab::Advanced => handle_advanced_events(app, code),
        Tab::ChipInfo => false,
    };
    if consumed {
        return Ok(false);
    }

    // Handle global events
    handle_global_events(app, code)
}

/// Handle all popup-related events (highest priority)
fn handle_popup_events(app: &mut App, code: KeyCode) -> anyhow::Result<bool> {
    // Warning popup
    if app.show_warning_popup {
        if matches!(code, KeyCode::Esc | KeyCode::Enter) {
            app.show_warning_popup = false;
            app.warning_message.clear();
        }
        return Ok(true);
    }

    // Fuse write confirmation
    if app.show_confirm_fuse_popup {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => confirm_write_fuses(app),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => cancel_write_fuses(app),
            _ => {}
        }
        return Ok(true);
    }

    // Text entry popup
    if app.show_input_popup {
        handle_input_popup(app, code);
        return Ok(true);
    }

    // Chip picker
    if app.show_chip_picker {
        match code {
            KeyCode::Esc => close_chip_picker(app),
            KeyCode::Enter => picker_apply(app),
            KeyCode::Left => picker_move_family(app, -1),
            KeyCode::Right | KeyCode::Tab => picker_move_family(app, 1),
            KeyCode::Up => picker_move_model(app, -1),
            KeyCode::Down => picker_move_model(app, 1),
            KeyCode::PageUp => picker_move_model(app, -PICKER_PAGE),
            KeyCode::PageDown => picker_move_model(app, PICKER_PAGE),
            _ => {}
        }
        return Ok(true);
    }

    Ok(false)
}

fn handle_input_popup(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => cancel_input(app),
        KeyCode::Enter => apply_input(app),
        KeyCode::Backspace => {
            app.input_buffer.pop();
        }
        KeyCode::Char(c) if !c.is_control() => app.input_buffer.push(c),
        _ => {}
    }
}

fn handle_operations_events(app: &mut App, code: KeyCode) -> bool {
    match code {
        KeyCode::Up => move_up(app),
        KeyCode::Down => move_down(app),
        KeyCode::Enter => trigger_selected_action(app),
        _ => return false,
    }
    true
}

fn handle_advanced_events(app: &mut App, code: KeyCode) -> bool {
    match code {
        KeyCode::Up => move_up(app),
        KeyCode::Down => move_down(app),
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Right | KeyCode::Char('+') => advanced_adjust(app, 1),
        KeyCode::Left | KeyCode::Char('-') => advanced_adjust(app, -1),
        _ => return false,
    }
    true
}

/// Handle global events (lowest priority)
fn handle_global_events(app: &mut App, code: KeyCode) -> anyhow::Result<bool> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => return Ok(request_quit(app)),
        KeyCode::Tab => switch_tab(app, app.tab.next()),
        KeyCode::BackTab => switch_tab(app, app.tab.prev()),
        KeyCode::Char('1') => switch_tab(app, Tab::Operations),
        KeyCode::Char('2') => switch_tab(app, Tab::ChipInfo),
        KeyCode::Char('3') => switch_tab(app, Tab::Advanced),
        KeyCode::Char('p') => open_chip_picker(app),
        KeyCode::Char('c') => app.clear_console(),
        KeyCode::PageUp => app.scroll_console(CONSOLE_PAGE),
        KeyCode::PageDown => app.scroll_console(-CONSOLE_PAGE),
        KeyCode::End => app.console_scroll = 0,
        _ => {}
    }
    Ok(false)
}
