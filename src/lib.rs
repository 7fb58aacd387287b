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

//! AVR Flasher - terminal front-end for avrdude
//!
//! This library provides the chip database, avrdude command assembly,
//! subprocess streaming and the TUI state the binary drives.

pub mod error;
pub mod chips;
pub mod command;
pub mod runner;
pub mod app;
pub mod config;
pub mod handlers;
pub mod events;
pub mod ui;
pub mod logger;

pub use error::{FlasherError, Result};
