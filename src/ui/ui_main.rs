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

use crate::app::{Action, AdvancedField, App, Tab};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap};

/// Render the main view (header, tabs, tab body beside the console, status bar)
pub fn render_main_view(f: &mut Frame, app: &App, size: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(size);

    render_header(f, app, chunks[0]);
    render_tabs(f, app, chunks[1]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[2]);

    match app.tab {
        Tab::Operations => render_operations(f, app, body[0]),
        Tab::ChipInfo => render_chip_info(f, app, body[0]),
        Tab::Advanced => render_advanced(f, app, body[0]),
    }
    render_console(f, app, body[1]);

    render_status_bar(f, app, chunks[3]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let header_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(75), Constraint::Percentage(25)])
        .split(area);

    let chip = match app.current_chip() {
        Some(c) => format!("{} ({}, -p {})", c.name, c.family, c.part_id),
        None => "?".to_string(),
    };
    let header_text = format!(
        " AVR Flasher    |    Chip: {}    |    Programmer: {} ",
        chip, app.options.programmer
    );
    let header = Paragraph::new(header_text).style(Style::default().fg(Color::Yellow));
    f.render_widget(header, header_cols[0]);

    let state = if app.is_busy() {
        Paragraph::new(format!("● {} ", app.active_label)).style(Style::default().fg(Color::Green))
    } else {
        Paragraph::new("idle ").style(Style::default().fg(Color::Gray))
    };
    f.render_widget(state.alignment(Alignment::Right), header_cols[1]);
}

fn render_tabs(f: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<String> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, t)| format!("{} {}", i + 1, t.title()))
        .collect();
    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded))
        .select(app.tab.index())
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, area);
}

fn file_label(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => p.display().to_string(),
        None => "(none)".to_string(),
    }
}

fn action_detail(app: &App, action: Action) -> Option<String> {
    match action {
        Action::SelectFlashFile => Some(file_label(&app.flash_file)),
        Action::SelectEepromFile => Some(file_label(&app.eeprom_file)),
        Action::EditFuse(kind) => Some(app.fuse(kind).to_string()),
        _ => None,
    }
}

fn render_operations(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(" Operations ")
        .border_style(Style::default().fg(Color::Cyan));

    let items: Vec<ListItem> = Action::ALL
        .iter()
        .map(|a| {
            let text = match action_detail(app, *a) {
                Some(detail) => format!("{:<20} {}", a.label(), detail),
                None => a.label().to_string(),
            };
            let style = if app.is_busy() && !matches!(a, Action::ClearConsole) {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };
            ListItem::new(text).style(style)
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(app.action_idx.min(Action::ALL.len() - 1)));

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
        .highlight_symbol("> ");
    f.render_stateful_widget(list, area, &mut state);
}

fn render_chip_info(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(" Chip Info ")
        .border_style(Style::default().fg(Color::Cyan));

    let label = Style::default().fg(Color::Gray);
    let lines: Vec<Line> = match app.current_chip() {
        Some(chip) => vec![
            Line::from(vec![Span::styled("Name:          ", label), Span::raw(chip.name.clone())]),
            Line::from(vec![Span::styled("Family:        ", label), Span::raw(chip.family.clone())]),
            Line::from(vec![Span::styled("Part id:       ", label), Span::raw(chip.part_id.clone())]),
            Line::from(vec![Span::styled("Signature:     ", label), Span::raw(chip.signature.clone())]),
            Line::from(vec![Span::styled("Flash:         ", label), Span::raw(format!("{} bytes", chip.flash_size))]),
            Line::from(vec![Span::styled("EEPROM:        ", label), Span::raw(format!("{} bytes", chip.eeprom_size))]),
            Line::from(vec![
                Span::styled("Default fuses: ", label),
                Span::raw(format!(
                    "L {}  H {}  E {}",
                    chip.default_lfuse, chip.default_hfuse, chip.default_efuse
                )),
            ]),
            Line::from(""),
            Line::from(chip.description.clone()),
            Line::from(""),
            Line::from(Span::styled("Press 'p' to pick another chip", label)),
        ],
        None => vec![Line::from("No chip selected")],
    };

    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, area);
}

fn on_off(b: bool) -> &'static str {
    if b { "[x]" } else { "[ ]" }
}

fn render_advanced(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(" Advanced Options ")
        .border_style(Style::default().fg(Color::Cyan));

    let opts = &app.options;
    let items: Vec<ListItem> = AdvancedField::ALL
        .iter()
        .map(|field| {
            let value = match field {
                AdvancedField::Verify => on_off(opts.verify).to_string(),
                AdvancedField::Erase => on_off(opts.erase).to_string(),
                AdvancedField::DisableFuseCheck => on_off(opts.disable_fuse_check).to_string(),
                AdvancedField::BitClock => opts.bit_clock.to_string(),
                AdvancedField::RetryCount => opts.retry_count.to_string(),
                AdvancedField::Verbosity => opts.verbosity.to_string(),
                AdvancedField::Programmer => opts.programmer.clone(),
            };
            ListItem::new(format!("{:<28} {}", field.label(), value))
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(app.advanced_idx.min(AdvancedField::ALL.len() - 1)));

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
        .highlight_symbol("> ");
    f.render_stateful_widget(list, area, &mut state);
}

fn console_line_style(line: &str) -> Style {
    if line.starts_with("Error") {
        Style::default().fg(Color::Red)
    } else if line.starts_with("Executing:") {
        Style::default().fg(Color::Cyan)
    } else if line.starts_with("Operation completed") {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    }
}

fn render_console(f: &mut Frame, app: &App, area: Rect) {
    let title = if app.console_scroll > 0 {
        format!(" Console (+{} below) ", app.console_scroll)
    } else {
        " Console ".to_string()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    // window of lines ending `console_scroll` lines above the bottom
    let height = inner.height as usize;
    let end = app.console.len().saturating_sub(app.console_scroll);
    let start = end.saturating_sub(height);
    let lines: Vec<Line> = app.console[start..end]
        .iter()
        .map(|l| Line::styled(l.clone(), console_line_style(l)))
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let status = Paragraph::new(app.status.as_str()).style(Style::default().fg(Color::Gray));
    f.render_widget(status, area);
}
