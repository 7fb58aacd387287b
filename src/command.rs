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

//! avrdude argument-vector assembly.
//!
//! Everything here is pure: the same options and operation always produce
//! the same argument list. The list is executed directly, never through a
//! shell, so paths are passed through untouched.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::chips::is_fuse_byte;
use crate::error::{FlasherError, Result};

pub const DEFAULT_PROGRAMMER: &str = "usbasp";
pub const DEFAULT_BIT_CLOCK: u32 = 1;
pub const DEFAULT_RETRY_COUNT: u32 = 3;
pub const MAX_BIT_CLOCK: u32 = 250;
pub const MAX_RETRY_COUNT: u32 = 10;
pub const MAX_VERBOSITY: u8 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgrammerOptions {
    pub programmer: String,
    /// ISP bit clock period in microseconds (`-B`)
    pub bit_clock: u32,
    /// Connection retry count (`-r`)
    pub retry_count: u32,
    /// Skip fuse safemode checks (`-u`)
    pub disable_fuse_check: bool,
    /// Chip erase before a flash write (`-e`)
    pub erase: bool,
    pub verify: bool,
    pub verbosity: u8,
}

impl Default for ProgrammerOptions {
    fn default() -> Self {
        Self {
            programmer: DEFAULT_PROGRAMMER.to_string(),
            bit_clock: DEFAULT_BIT_CLOCK,
            retry_count: DEFAULT_RETRY_COUNT,
            disable_fuse_check: false,
            erase: true,
            verify: true,
            verbosity: 0,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Region {
    Flash,
    Eeprom,
    LowFuse,
    HighFuse,
    ExtendedFuse,
}

impl Region {
    pub fn as_str(self) -> &'static str {
        match self {
            Region::Flash => "flash",
            Region::Eeprom => "eeprom",
            Region::LowFuse => "lfuse",
            Region::HighFuse => "hfuse",
            Region::ExtendedFuse => "efuse",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
    Verify,
    VerifyWrite,
}

impl Access {
    pub fn letters(self) -> &'static str {
        match self {
            Access::Read => "r",
            Access::Write => "w",
            Access::Verify => "v",
            Access::VerifyWrite => "vw",
        }
    }

    fn for_write(verify: bool) -> Self {
        if verify { Access::VerifyWrite } else { Access::Write }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Format {
    IntelHex,
    Hex,
    Immediate,
}

impl Format {
    pub fn letter(self) -> &'static str {
        match self {
            Format::IntelHex => "i",
            Format::Hex => "h",
            Format::Immediate => "m",
        }
    }
}

/// A single `-U <region>:<mode>:<target>:<format>` memory operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryOp {
    pub region: Region,
    pub access: Access,
    pub target: String,
    pub format: Format,
}

impl MemoryOp {
    fn file(region: Region, access: Access, path: &Path) -> Self {
        Self {
            region,
            access,
            target: path.to_string_lossy().into_owned(),
            format: Format::IntelHex,
        }
    }
}

impl fmt::Display for MemoryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.region.as_str(),
            self.access.letters(),
            self.target,
            self.format.letter()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuseValues {
    pub low: String,
    pub high: String,
    pub extended: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    WriteFlash(PathBuf),
    ReadFlash(PathBuf),
    VerifyFlash(PathBuf),
    WriteEeprom(PathBuf),
    ReadEeprom(PathBuf),
    VerifyEeprom(PathBuf),
    ReadFuses,
    WriteFuses(FuseValues),
}

impl Operation {
    pub fn label(&self) -> &'static str {
        match self {
            Operation::WriteFlash(_) => "Write Flash",
            Operation::ReadFlash(_) => "Read Flash",
            Operation::VerifyFlash(_) => "Verify Flash",
            Operation::WriteEeprom(_) => "Write EEPROM",
            Operation::ReadEeprom(_) => "Read EEPROM",
            Operation::VerifyEeprom(_) => "Verify EEPROM",
            Operation::ReadFuses => "Read Fuses",
            Operation::WriteFuses(_) => "Write Fuses",
        }
    }

    /// Reject inputs avrdude would choke on before anything is spawned.
    pub fn validate(&self) -> Result<()> {
        match self {
            Operation::WriteFlash(p) | Operation::ReadFlash(p) | Operation::VerifyFlash(p) => {
                if p.as_os_str().is_empty() {
                    return Err(FlasherError::MissingFile("flash"));
                }
            }
            Operation::WriteEeprom(p) | Operation::ReadEeprom(p) | Operation::VerifyEeprom(p) => {
                if p.as_os_str().is_empty() {
                    return Err(FlasherError::MissingFile("EEPROM"));
                }
            }
            Operation::ReadFuses => {}
            Operation::WriteFuses(fuses) => {
                for (fuse, value) in [("low", &fuses.low), ("high", &fuses.high), ("extended", &fuses.extended)] {
                    if !is_fuse_byte(value.trim()) {
                        return Err(FlasherError::InvalidFuse { fuse, value: value.clone() });
                    }
                }
            }
        }
        Ok(())
    }

    /// Memory operations in the order they are passed to avrdude.
    pub fn memory_ops(&self, opts: &ProgrammerOptions) -> Vec<MemoryOp> {
        match self {
            Operation::WriteFlash(p) => vec![MemoryOp::file(Region::Flash, Access::for_write(opts.verify), p)],
            Operation::ReadFlash(p) => vec![MemoryOp::file(Region::Flash, Access::Read, p)],
            Operation::VerifyFlash(p) => vec![MemoryOp::file(Region::Flash, Access::Verify, p)],
            Operation::WriteEeprom(p) => vec![MemoryOp::file(Region::Eeprom, Access::for_write(opts.verify), p)],
            Operation::ReadEeprom(p) => vec![MemoryOp::file(Region::Eeprom, Access::Read, p)],
            Operation::VerifyEeprom(p) => vec![MemoryOp::file(Region::Eeprom, Access::Verify, p)],
            Operation::ReadFuses => [Region::LowFuse, Region::HighFuse, Region::ExtendedFuse]
                .into_iter()
                .map(|region| MemoryOp {
                    region,
                    access: Access::Read,
                    target: "-".to_string(),
                    format: Format::Hex,
                })
                .collect(),
            Operation::WriteFuses(fuses) => [
                (Region::LowFuse, &fuses.low),
                (Region::HighFuse, &fuses.high),
                (Region::ExtendedFuse, &fuses.extended),
            ]
            .into_iter()
            .map(|(region, value)| MemoryOp {
                region,
                access: Access::Write,
                target: value.trim().to_string(),
                format: Format::Immediate,
            })
            .collect(),
        }
    }
}

/// `<tool> -c <programmer> -p <part> [-B n] [-r n] [-u] [-v..] [-e] -U ...`
pub fn build_command(tool: &str, part: &str, opts: &ProgrammerOptions, op: &Operation) -> Vec<String> {
    let mut argv = base_command(tool, part, opts);
    if matches!(op, Operation::WriteFlash(_)) && opts.erase {
        argv.push("-e".to_string());
    }
    for mem in op.memory_ops(opts) {
        argv.push("-U".to_string());
        argv.push(mem.to_string());
    }
    argv
}

fn base_command(tool: &str, part: &str, opts: &ProgrammerOptions) -> Vec<String> {
    let mut argv = vec![
        tool.to_string(),
        "-c".to_string(),
        opts.programmer.clone(),
        "-p".to_string(),
        part.to_string(),
    ];
    if opts.bit_clock != DEFAULT_BIT_CLOCK {
        argv.push("-B".to_string());
        argv.push(opts.bit_clock.to_string());
    }
    if opts.retry_count != DEFAULT_RETRY_COUNT {
        argv.push("-r".to_string());
        argv.push(opts.retry_count.to_string());
    }
    if opts.disable_fuse_check {
        argv.push("-u".to_string());
    }
    for _ in 0..opts.verbosity.min(MAX_VERBOSITY) {
        argv.push("-v".to_string());
    }
    argv
}

/// Console echo of an argument vector. Arguments containing whitespace are
/// shown quoted; this string is never executed.
pub fn render_command(argv: &[String]) -> String {
    argv.iter()
        .map(|a| {
            if a.is_empty() || a.chars().any(char::is_whitespace) {
                format!("\"{}\"", a)
            } else {
                a.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn fuses(l: &str, h: &str, e: &str) -> FuseValues {
        FuseValues { low: l.to_string(), high: h.to_string(), extended: e.to_string() }
    }

    #[test]
    fn test_defaults_omit_bit_clock_and_retry() {
        let opts = ProgrammerOptions::default();
        let argv = build_command("avrdude", "m328p", &opts, &Operation::ReadFuses);
        assert!(!argv.contains(&"-B".to_string()));
        assert!(!argv.contains(&"-r".to_string()));
        assert!(!argv.contains(&"-u".to_string()));
        assert_eq!(&argv[..5], &args(&["avrdude", "-c", "usbasp", "-p", "m328p"])[..]);
    }

    #[test]
    fn test_non_default_timing_flags() {
        let opts = ProgrammerOptions { bit_clock: 32, retry_count: 5, disable_fuse_check: true, ..Default::default() };
        let argv = build_command("avrdude", "t85", &opts, &Operation::ReadFuses);
        assert_eq!(
            &argv[..11],
            &args(&["avrdude", "-c", "usbasp", "-p", "t85", "-B", "32", "-r", "5", "-u", "-U"])[..]
        );
    }

    #[test]
    fn test_write_flash_verify_and_erase() {
        let opts = ProgrammerOptions::default();
        let argv = build_command("avrdude", "m328p", &opts, &Operation::WriteFlash(PathBuf::from("/tmp/fw.hex")));
        assert_eq!(
            argv,
            args(&["avrdude", "-c", "usbasp", "-p", "m328p", "-e", "-U", "flash:vw:/tmp/fw.hex:i"])
        );
    }

    #[test]
    fn test_write_flash_without_verify_or_erase() {
        let opts = ProgrammerOptions { verify: false, erase: false, ..Default::default() };
        let argv = build_command("avrdude", "m328p", &opts, &Operation::WriteFlash(PathBuf::from("fw.hex")));
        assert_eq!(argv, args(&["avrdude", "-c", "usbasp", "-p", "m328p", "-U", "flash:w:fw.hex:i"]));
    }

    #[test]
    fn test_write_eeprom_never_erases() {
        let opts = ProgrammerOptions::default();
        let argv = build_command("avrdude", "m328p", &opts, &Operation::WriteEeprom(PathBuf::from("ee.hex")));
        assert!(!argv.contains(&"-e".to_string()));
        assert_eq!(argv.last().unwrap(), "eeprom:vw:ee.hex:i");
    }

    #[test]
    fn test_read_operations_use_r_and_intel_hex() {
        let opts = ProgrammerOptions::default();
        let flash = build_command("avrdude", "m8", &opts, &Operation::ReadFlash(PathBuf::from("/tmp/dump.hex")));
        assert_eq!(flash.last().unwrap(), "flash:r:/tmp/dump.hex:i");
        let ee = build_command("avrdude", "m8", &opts, &Operation::ReadEeprom(PathBuf::from("/tmp/ee.hex")));
        assert_eq!(ee.last().unwrap(), "eeprom:r:/tmp/ee.hex:i");
        assert!(!flash.contains(&"-e".to_string()));
    }

    #[test]
    fn test_verify_operations() {
        let opts = ProgrammerOptions::default();
        let flash = build_command("avrdude", "m8", &opts, &Operation::VerifyFlash(PathBuf::from("a.hex")));
        assert_eq!(flash.last().unwrap(), "flash:v:a.hex:i");
        let ee = build_command("avrdude", "m8", &opts, &Operation::VerifyEeprom(PathBuf::from("b.hex")));
        assert_eq!(ee.last().unwrap(), "eeprom:v:b.hex:i");
    }

    #[test]
    fn test_read_fuses_to_terminal() {
        let opts = ProgrammerOptions::default();
        let argv = build_command("avrdude", "m328p", &opts, &Operation::ReadFuses);
        assert_eq!(
            &argv[5..],
            &args(&["-U", "lfuse:r:-:h", "-U", "hfuse:r:-:h", "-U", "efuse:r:-:h"])[..]
        );
    }

    #[test]
    fn test_write_fuses_immediate() {
        let opts = ProgrammerOptions::default();
        let op = Operation::WriteFuses(fuses("0xFF", " 0xDE", "0x05"));
        let argv = build_command("avrdude", "m328p", &opts, &op);
        assert_eq!(
            &argv[5..],
            &args(&["-U", "lfuse:w:0xFF:m", "-U", "hfuse:w:0xDE:m", "-U", "efuse:w:0x05:m"])[..]
        );
    }

    #[test]
    fn test_verbosity_flags() {
        let opts = ProgrammerOptions { verbosity: 2, ..Default::default() };
        let argv = build_command("avrdude", "m8", &opts, &Operation::ReadFuses);
        assert_eq!(argv.iter().filter(|a| *a == "-v").count(), 2);
        let opts = ProgrammerOptions { verbosity: 9, ..Default::default() };
        let argv = build_command("avrdude", "m8", &opts, &Operation::ReadFuses);
        assert_eq!(argv.iter().filter(|a| *a == "-v").count(), 2);
    }

    #[test]
    fn test_build_is_deterministic() {
        let opts = ProgrammerOptions { bit_clock: 10, verify: false, ..Default::default() };
        let op = Operation::WriteFlash(PathBuf::from("x.hex"));
        assert_eq!(build_command("avrdude", "m16", &opts, &op), build_command("avrdude", "m16", &opts, &op));
    }

    #[test]
    fn test_paths_with_shell_metacharacters_stay_one_argument() {
        let opts = ProgrammerOptions::default();
        let path = PathBuf::from("/tmp/my fw;rm -rf x.hex");
        let argv = build_command("avrdude", "m8", &opts, &Operation::VerifyFlash(path));
        assert_eq!(argv.last().unwrap(), "flash:v:/tmp/my fw;rm -rf x.hex:i");
        assert_eq!(argv.len(), 7);
    }

    #[test]
    fn test_validate() {
        assert!(Operation::ReadFuses.validate().is_ok());
        assert!(matches!(
            Operation::WriteFlash(PathBuf::new()).validate(),
            Err(FlasherError::MissingFile("flash"))
        ));
        assert!(matches!(
            Operation::ReadEeprom(PathBuf::new()).validate(),
            Err(FlasherError::MissingFile("EEPROM"))
        ));
        assert!(Operation::WriteFuses(fuses("0xFF", "0xDE", "0x05")).validate().is_ok());
        match Operation::WriteFuses(fuses("0xFF", "DE", "0x05")).validate() {
            Err(FlasherError::InvalidFuse { fuse, value }) => {
                assert_eq!(fuse, "high");
                assert_eq!(value, "DE");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_render_command_quotes_whitespace() {
        let argv = args(&["avrdude", "-U", "flash:w:/tmp/my fw.hex:i"]);
        assert_eq!(render_command(&argv), "avrdude -U \"flash:w:/tmp/my fw.hex:i\"");
    }

    #[test]
    fn test_memory_op_display() {
        let op = MemoryOp {
            region: Region::Eeprom,
            access: Access::VerifyWrite,
            target: "e.hex".to_string(),
            format: Format::IntelHex,
        };
        assert_eq!(op.to_string(), "eeprom:vw:e.hex:i");
    }
}
