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

//! Unified error handling for AVR Flasher
//!
//! A single error type shared by the chip table, settings, command assembly
//! and the subprocess runner.

use std::io;
use std::path::PathBuf;

/// Result type alias using FlasherError
pub type Result<T> = std::result::Result<T, FlasherError>;

#[derive(thiserror::Error, Debug)]
pub enum FlasherError {
    // ============================================================================
    // Chip database
    // ============================================================================
    #[error("Failed to read chip database {path}: {source}")]
    ChipDatabaseRead {
        path: PathBuf,
        source: io::Error,
    },

    #[error("Failed to parse chip database {path}: {source}")]
    ChipDatabaseParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Chip database {0} contains no chips")]
    ChipDatabaseEmpty(PathBuf),

    #[error("Unknown chip '{0}'")]
    ChipNotFound(String),

    // ============================================================================
    // Settings
    // ============================================================================
    #[error("Failed to write settings {path}: {source}")]
    SettingsWrite {
        path: PathBuf,
        source: io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // ============================================================================
    // Operations
    // ============================================================================
    #[error("No {0} file selected")]
    MissingFile(&'static str),

    #[error("Invalid {fuse} fuse value '{value}' (expected 0x followed by two hex digits)")]
    InvalidFuse {
        fuse: &'static str,
        value: String,
    },

    #[error("Empty command line")]
    EmptyCommand,

    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        source: io::Error,
    },

    #[error("Another operation is still running")]
    Busy,
}
