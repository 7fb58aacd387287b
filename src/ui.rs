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

pub mod ui_components;
pub mod ui_main;

use ratatui::Frame;

use crate::app::App;

/// Draw one frame: the main view, then whichever popup is open on top.
pub fn ui(f: &mut Frame, app: &App) {
    let size = f.area();

    ui_main::render_main_view(f, app, size);

    if app.show_chip_picker {
        ui_components::render_chip_picker(f, app, size);
    }
    if app.show_input_popup {
        ui_components::render_input_popup(f, app, size);
    }
    if app.show_confirm_fuse_popup {
        ui_components::render_confirm_fuse_popup(f, app, size);
    }
    // warnings sit above everything else
    if app.show_warning_popup {
        ui_components::render_warning_popup(f, app, size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chips::ChipTable;
    use crate::config::Settings;
    use crate::runner::MockLauncher;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buf = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();
        buffer_text(&terminal)
    }

    fn app() -> App {
        App::new(ChipTable::builtin(), &Settings::default(), Box::new(MockLauncher::new()))
    }

    #[test]
    fn test_main_view_shows_chip_and_actions() {
        let app = app();
        let text = render(&app);
        assert!(text.contains("AVR Flasher"));
        assert!(text.contains("ATmega8"));
        assert!(text.contains("Write Flash"));
        assert!(text.contains("Console"));
    }

    #[test]
    fn test_chip_info_tab() {
        let mut app = app();
        app.tab = crate::app::Tab::ChipInfo;
        let text = render(&app);
        assert!(text.contains("0x1E9307"));
        assert!(text.contains("8192 bytes"));
    }

    #[test]
    fn test_confirm_popup_rendered() {
        let mut app = app();
        app.show_confirm_fuse_popup = true;
        let text = render(&app);
        assert!(text.contains("Confirm Fuse Write"));
        assert!(text.contains("(y/n)"));
    }

    #[test]
    fn test_warning_popup_rendered() {
        let mut app = app();
        app.warn("Please select a hex file first!");
        let text = render(&app);
        assert!(text.contains("Please select a hex file first!"));
    }

    #[test]
    fn test_console_lines_rendered() {
        let mut app = app();
        app.log("Executing: avrdude -c usbasp -p m8");
        let text = render(&app);
        assert!(text.contains("Executing: avrdude -c usbasp -p m8"));
    }
}
