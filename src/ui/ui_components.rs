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

use crate::app::{App, InputPurpose};
use crate::handlers::picker_family;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, BorderType, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use ratatui::layout::Rect;

/// Helper function to create a centered rectangle for popups
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Render the chip picker: families on the left, models of the highlighted
/// family on the right.
pub fn render_chip_picker(f: &mut Frame, app: &App, size: Rect) {
    let area = centered_rect(70, 70, size);
    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(" Select Chip ")
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1)])
        .split(inner);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(rows[0]);

    let highlight = Style::default().bg(Color::Blue).fg(Color::White);

    let families: Vec<ListItem> = app
        .table
        .families()
        .iter()
        .map(|fam| ListItem::new(fam.as_str()))
        .collect();
    let mut fam_state = ListState::default();
    if !app.table.families().is_empty() {
        fam_state.select(Some(app.picker_family_idx));
    }
    let fam_list = List::new(families)
        .block(Block::default().borders(Borders::ALL).title(" Family "))
        .highlight_style(highlight);
    f.render_stateful_widget(fam_list, cols[0], &mut fam_state);

    let models: Vec<ListItem> = match picker_family(app) {
        Some(family) => app
            .table
            .models(family)
            .map(|r| ListItem::new(format!("{:<12} {:<16} {}", r.key, r.name, r.description)))
            .collect(),
        None => Vec::new(),
    };
    let mut model_state = ListState::default();
    if !models.is_empty() {
        model_state.select(Some(app.picker_model_idx.min(models.len() - 1)));
    }
    let model_list = List::new(models)
        .block(Block::default().borders(Borders::ALL).title(" Model "))
        .highlight_style(highlight);
    f.render_stateful_widget(model_list, cols[1], &mut model_state);

    let help = Paragraph::new("←/→ family  |  ↑/↓ model  |  Enter select  |  Esc cancel")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    f.render_widget(help, rows[1]);
}

pub fn render_input_popup(f: &mut Frame, app: &App, size: Rect) {
    let popup_area = centered_rect(60, 20, size);
    f.render_widget(Clear, popup_area);

    let title = app.input_purpose.map(|p| p.title()).unwrap_or(" Input ");
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));
    f.render_widget(block.clone(), popup_area);

    let inner = block.inner(popup_area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let prompt = match app.input_purpose {
        Some(InputPurpose::Fuse(_)) => "Fuse byte, e.g. 0xFF",
        Some(InputPurpose::Programmer) => "avrdude programmer id, e.g. usbasp",
        Some(InputPurpose::FlashDump) | Some(InputPurpose::EepromDump) => "Path of the Intel HEX file to write",
        _ => "Path of the Intel HEX file",
    };
    f.render_widget(Paragraph::new(prompt).style(Style::default().fg(Color::Gray)), chunks[0]);

    let input = Paragraph::new(Line::from(format!("{}_", app.input_buffer)))
        .style(Style::default().add_modifier(Modifier::BOLD))
        .wrap(Wrap { trim: false });
    f.render_widget(input, chunks[1]);

    let instructions = Paragraph::new("Enter to accept, Esc to cancel")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    f.render_widget(instructions, chunks[2]);
}

/// Render the warning popup
pub fn render_warning_popup(f: &mut Frame, app: &App, size: Rect) {
    let popup_area = centered_rect(50, 30, size);
    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Warning ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Yellow));
    f.render_widget(block.clone(), popup_area);

    let inner = block.inner(popup_area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(inner);

    let warning = Paragraph::new(app.warning_message.as_str())
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);
    f.render_widget(warning, chunks[0]);

    let instructions = Paragraph::new("Press Enter to dismiss")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    f.render_widget(instructions, chunks[1]);
}

/// Render the fuse write confirmation
pub fn render_confirm_fuse_popup(f: &mut Frame, app: &App, size: Rect) {
    let popup_area = centered_rect(50, 30, size);
    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Confirm Fuse Write ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Red));
    f.render_widget(block.clone(), popup_area);

    let inner = block.inner(popup_area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(inner);

    let chip = app.current_chip().map(|c| c.name.as_str()).unwrap_or("?");
    let message = vec![
        Line::from("Writing incorrect fuse values can brick your device."),
        Line::from(""),
        Line::from(format!("{}: L {}  H {}  E {}", chip, app.lfuse, app.hfuse, app.efuse)),
        Line::from(""),
        Line::from("Are you sure you want to continue? (y/n)"),
    ];
    let message = Paragraph::new(message)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);
    f.render_widget(message, chunks[0]);

    let instructions = Paragraph::new("y/Enter to write, n/Esc to cancel")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    f.render_widget(instructions, chunks[1]);
}
