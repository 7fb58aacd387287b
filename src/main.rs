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

use std::io::stdout;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::Terminal;

use avrflasher::app::App;
use avrflasher::chips::{ChipRecord, ChipTable};
use avrflasher::config::{load_settings, save_settings, Settings};
use avrflasher::events::handle_key_event;
use avrflasher::logger;
use avrflasher::runner::AvrdudeLauncher;
use avrflasher::ui::ui;

const TICK: Duration = Duration::from_millis(100);

const USAGE: &str = "\
Usage: avrflasher [OPTIONS] [COMMAND]

Commands:
  list              Print the chip table grouped by family
  info <key>        Print one chip record

Options:
  --chips <file>        Load the chip table from a JSON database
  --avrdude <path>      avrdude executable to run
  --programmer <type>   Programmer id passed to -c
  --logging             Append JSON event records to the state log
  -h, --help            Show this help";

/// Command-line overrides; they apply to this session only.
#[derive(Debug, Default, PartialEq, Eq)]
struct CliArgs {
    logging: bool,
    help: bool,
    chips: Option<PathBuf>,
    avrdude: Option<String>,
    programmer: Option<String>,
    command: Vec<String>,
}

fn parse_args(args: &[String]) -> anyhow::Result<CliArgs> {
    let mut cli = CliArgs::default();
    let mut it = args.iter().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--logging" => cli.logging = true,
            "-h" | "--help" => cli.help = true,
            "--chips" => cli.chips = Some(PathBuf::from(flag_value(&mut it, arg)?)),
            "--avrdude" => cli.avrdude = Some(flag_value(&mut it, arg)?),
            "--programmer" => cli.programmer = Some(flag_value(&mut it, arg)?),
            other if other.starts_with("--") => anyhow::bail!("unknown option '{}'", other),
            other => cli.command.push(other.to_string()),
        }
    }
    Ok(cli)
}

fn flag_value<'a>(it: &mut impl Iterator<Item = &'a String>, flag: &str) -> anyhow::Result<String> {
    it.next()
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("option '{}' needs a value", flag))
}

fn format_chip_list(table: &ChipTable) -> String {
    let mut out = String::new();
    for family in table.families() {
        out.push_str(family);
        out.push('\n');
        for r in table.models(family) {
            out.push_str(&format!("  {:<12} {:<18} {}\n", r.key, r.name, r.description));
        }
    }
    out
}

fn format_chip_info(r: &ChipRecord) -> String {
    format!(
        "{name} ({family})\n  part id:   {part}\n  signature: {sig}\n  flash:     {flash} bytes\n  eeprom:    {eeprom} bytes\n  fuses:     L {l}  H {h}  E {e}\n  {desc}\n",
        name = r.name,
        family = r.family,
        part = r.part_id,
        sig = r.signature,
        flash = r.flash_size,
        eeprom = r.eeprom_size,
        l = r.default_lfuse,
        h = r.default_hfuse,
        e = r.default_efuse,
        desc = r.description,
    )
}

fn load_table(path: Option<&PathBuf>) -> avrflasher::Result<ChipTable> {
    match path {
        Some(p) => ChipTable::load_json(p),
        None => Ok(ChipTable::builtin()),
    }
}

/// Settings to persist on exit: the app's state, with CLI overrides undone.
fn settings_to_save(app: &App, saved: &Settings, cli: &CliArgs) -> Settings {
    let mut out = app.to_settings();
    // the selection belongs to the session-only table
    if cli.chips.is_some() {
        out.chip_database = saved.chip_database.clone();
        out.chip_family = saved.chip_family.clone();
        out.chip = saved.chip.clone();
    }
    if cli.avrdude.is_some() {
        out.avrdude_path = saved.avrdude_path.clone();
    }
    if cli.programmer.as_deref() == Some(out.programmer.as_str()) {
        out.programmer = saved.programmer.clone();
    }
    out
}

fn main() -> anyhow::Result<()> {
    // Gather args once
    let args: Vec<String> = std::env::args().collect();
    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error: {e}\n\n{USAGE}");
            std::process::exit(2);
        }
    };
    if cli.help {
        println!("{USAGE}");
        return Ok(());
    }

    if cli.logging {
        logger::init_logging();
        logger::log_event("startup", serde_json::json!({
            "mode": "cli",
            "args": args,
        }));
    }

    let saved = load_settings();
    let mut session = saved.clone();
    if let Some(p) = &cli.chips {
        session.chip_database = Some(p.clone());
    }
    if let Some(a) = &cli.avrdude {
        session.avrdude_path = a.clone();
    }
    if let Some(p) = &cli.programmer {
        session.programmer = p.clone();
    }

    let table = match load_table(session.chip_database.as_ref()) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {e}");
            logger::log_event("fatal_error", serde_json::json!({ "error": e.to_string() }));
            std::process::exit(1);
        }
    };
    logger::log_event("chip_db_loaded", serde_json::json!({
        "source": session.chip_database.as_ref().map(|p| p.display().to_string()),
        "chips": table.len(),
        "families": table.families().len(),
    }));

    match cli.command.first().map(|s| s.as_str()) {
        None => {}
        Some("list") => {
            print!("{}", format_chip_list(&table));
            return Ok(());
        }
        Some("info") => {
            let Some(key) = cli.command.get(1) else {
                eprintln!("Usage: avrflasher info <key>");
                std::process::exit(2);
            };
            match table.find(key) {
                Ok(r) => {
                    print!("{}", format_chip_info(r));
                    return Ok(());
                }
                Err(e) => {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                }
            }
        }
        Some(other) => {
            eprintln!("Error: unknown command '{other}'\n\n{USAGE}");
            std::process::exit(2);
        }
    }

    let mut app = App::new(table, &session, Box::new(AvrdudeLauncher));

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let to_save = settings_to_save(&app, &saved, &cli);
    match save_settings(&to_save) {
        Ok(()) => logger::log_event("settings_saved", serde_json::json!({ "chip": to_save.chip })),
        Err(e) => eprintln!("warning: {e}"),
    }

    if let Err(err) = res {
        eprintln!("error: {err}");
        logger::log_event("fatal_error", serde_json::json!({ "error": err.to_string() }));
        std::process::exit(1);
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<ratatui::backend::CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| ui(f, &*app))?;

        if event::poll(TICK).unwrap_or(false) {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind == KeyEventKind::Press && handle_key_event(app, key_event)? {
                    return Ok(());
                }
            }
        }

        // Stream subprocess output into the console
        app.poll_operation();
    }
}
