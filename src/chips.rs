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

//! Chip table: AVR part descriptors grouped into families.
//!
//! Records live in one flat list; the family is a tag on each record, so the
//! same model key may appear in two families without clobbering either.

use std::fs;
use std::path::Path;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{FlasherError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChipRecord {
    /// Key shown in the model list
    pub key: String,
    /// Part id handed to avrdude via `-p`
    pub part_id: String,
    pub family: String,
    pub name: String,
    pub signature: String,
    pub flash_size: u32,
    pub eeprom_size: u32,
    pub default_lfuse: String,
    pub default_hfuse: String,
    pub default_efuse: String,
    pub description: String,
}

/// One model entry in the JSON chip database.
#[derive(Debug, Deserialize)]
struct ChipEntry {
    #[serde(default)]
    command: Option<String>,
    name: String,
    signature: String,
    flash_size: u32,
    eeprom_size: u32,
    default_lfuse: String,
    default_hfuse: String,
    default_efuse: String,
    description: String,
}

#[derive(Debug, Clone, Default)]
pub struct ChipTable {
    records: Vec<ChipRecord>,
    families: Vec<String>,
}

impl ChipTable {
    /// The table compiled into the binary.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// Load a `{ family: { model: { ... } } }` database.
    pub fn load_json(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|source| FlasherError::ChipDatabaseRead {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_json_str(&data).map_err(|source| FlasherError::ChipDatabaseParse {
            path: path.to_path_buf(),
            source,
        })?;
        if table.is_empty() {
            return Err(FlasherError::ChipDatabaseEmpty(path.to_path_buf()));
        }
        Ok(table)
    }

    pub fn from_json_str(data: &str) -> std::result::Result<Self, serde_json::Error> {
        let families: serde_json::Map<String, Value> = serde_json::from_str(data)?;
        let mut table = ChipTable::default();
        for (family, models) in families {
            let models: serde_json::Map<String, Value> = serde_json::from_value(models)?;
            for (key, entry) in models {
                let entry: ChipEntry = serde_json::from_value(entry)?;
                table.push(ChipRecord {
                    part_id: entry.command.unwrap_or_else(|| key.clone()),
                    key,
                    family: family.clone(),
                    name: entry.name,
                    signature: entry.signature,
                    flash_size: entry.flash_size,
                    eeprom_size: entry.eeprom_size,
                    default_lfuse: entry.default_lfuse,
                    default_hfuse: entry.default_hfuse,
                    default_efuse: entry.default_efuse,
                    description: entry.description,
                });
            }
        }
        Ok(table)
    }

    fn push(&mut self, record: ChipRecord) {
        if !self.families.iter().any(|f| f == &record.family) {
            self.families.push(record.family.clone());
        }
        // first definition of a key within a family wins
        if self.lookup(&record.family, &record.key).is_none() {
            self.records.push(record);
        }
    }

    pub fn lookup(&self, family: &str, key: &str) -> Option<&ChipRecord> {
        self.records.iter().find(|r| r.family == family && r.key == key)
    }

    /// First record with this key in any family.
    pub fn get(&self, key: &str) -> Option<&ChipRecord> {
        self.records.iter().find(|r| r.key == key)
    }

    pub fn find(&self, key: &str) -> Result<&ChipRecord> {
        self.get(key).ok_or_else(|| FlasherError::ChipNotFound(key.to_string()))
    }

    pub fn families(&self) -> &[String] {
        &self.families
    }

    pub fn models<'a>(&'a self, family: &'a str) -> impl Iterator<Item = &'a ChipRecord> + 'a {
        self.records.iter().filter(move |r| r.family == family)
    }

    pub fn records(&self) -> &[ChipRecord] {
        &self.records
    }

    /// Index into `records()` of the given chip.
    pub fn position(&self, family: &str, key: &str) -> Option<usize> {
        self.records.iter().position(|r| r.family == family && r.key == key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// `0x` followed by exactly two hex digits.
pub fn is_fuse_byte(s: &str) -> bool {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(digits) => digits.len() == 2 && digits.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

// (family, key, name, signature, flash, eeprom, lfuse, hfuse, efuse, description)
type BuiltinRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    u32,
    u32,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
);

lazy_static! {
    static ref BUILTIN: ChipTable = {
        let mut table = ChipTable::default();
        for &(family, key, name, signature, flash_size, eeprom_size, lfuse, hfuse, efuse, description) in BUILTIN_CHIPS {
            table.push(ChipRecord {
                key: key.to_string(),
                part_id: key.to_string(),
                family: family.to_string(),
                name: name.to_string(),
                signature: signature.to_string(),
                flash_size,
                eeprom_size,
                default_lfuse: lfuse.to_string(),
                default_hfuse: hfuse.to_string(),
                default_efuse: efuse.to_string(),
                description: description.to_string(),
            });
        }
        table
    };
}

const BUILTIN_CHIPS: &[BuiltinRow] = &[
    // ATmega
    ("ATmega Series", "atmega8", "ATmega8", "0x1E9307", 8192, 512, "0xE4", "0xD9", "0xFF", "8KB Flash, 512B EEPROM, 1KB SRAM"),
    ("ATmega Series", "m8", "ATmega8", "0x1E9307", 8192, 512, "0xE4", "0xD9", "0xFF", "8KB Flash, 512B EEPROM, 1KB SRAM"),
    ("ATmega Series", "m8a", "ATmega8A", "0x1E9307", 8192, 512, "0xE4", "0xD9", "0xFF", "8KB Flash, 512B EEPROM, 1KB SRAM"),
    ("ATmega Series", "m808", "ATmega808", "0x1E9359", 8192, 256, "0xFF", "0xDE", "0x05", "8KB Flash, 256B EEPROM, 1KB SRAM"),
    ("ATmega Series", "m809", "ATmega809", "0x1E935A", 8192, 256, "0xFF", "0xDE", "0x05", "8KB Flash, 256B EEPROM, 1KB SRAM"),
    ("ATmega Series", "m8515", "ATmega8515", "0x1E9306", 8192, 512, "0xE4", "0xD9", "0xFF", "8KB Flash, 512B EEPROM, 512B SRAM"),
    ("ATmega Series", "m8535", "ATmega8535", "0x1E9308", 8192, 512, "0xE4", "0xD9", "0xFF", "8KB Flash, 512B EEPROM, 512B SRAM"),
    ("ATmega Series", "m16", "ATmega16", "0x1E9403", 16384, 512, "0xE4", "0xD9", "0xFF", "16KB Flash, 512B EEPROM, 1KB SRAM"),
    ("ATmega Series", "m16a", "ATmega16A", "0x1E9403", 16384, 512, "0xE4", "0xD9", "0xFF", "16KB Flash, 512B EEPROM, 1KB SRAM"),
    ("ATmega Series", "m16u2", "ATmega16U2", "0x1E9489", 16384, 512, "0xFF", "0xDE", "0x05", "16KB Flash, 512B EEPROM, 512B SRAM (USB)"),
    ("ATmega Series", "m16u4", "ATmega16U4", "0x1E9488", 16384, 512, "0xFF", "0xDE", "0x05", "16KB Flash, 512B EEPROM, 1.25KB SRAM (USB)"),
    ("ATmega Series", "m32", "ATmega32", "0x1E9502", 32768, 1024, "0xE4", "0xD9", "0xFF", "32KB Flash, 1KB EEPROM, 2KB SRAM"),
    ("ATmega Series", "m32a", "ATmega32A", "0x1E9502", 32768, 1024, "0xE4", "0xD9", "0xFF", "32KB Flash, 1KB EEPROM, 2KB SRAM"),
    ("ATmega Series", "m328", "ATmega328", "0x1E9514", 32768, 1024, "0xFF", "0xDE", "0x05", "32KB Flash, 1KB EEPROM, 2KB SRAM"),
    ("ATmega Series", "m328p", "ATmega328P", "0x1E950F", 32768, 1024, "0xFF", "0xDE", "0x05", "32KB Flash, 1KB EEPROM, 2KB SRAM"),
    ("ATmega Series", "m328pb", "ATmega328PB", "0x1E9516", 32768, 1024, "0xFF", "0xDE", "0x05", "32KB Flash, 1KB EEPROM, 2KB SRAM"),
    ("ATmega Series", "m64", "ATmega64", "0x1E9602", 65536, 2048, "0xE4", "0xD9", "0xFF", "64KB Flash, 2KB EEPROM, 4KB SRAM"),
    ("ATmega Series", "m64a", "ATmega64A", "0x1E9602", 65536, 2048, "0xE4", "0xD9", "0xFF", "64KB Flash, 2KB EEPROM, 4KB SRAM"),
    ("ATmega Series", "m640", "ATmega640", "0x1E9608", 65536, 4096, "0xFF", "0xDE", "0x05", "64KB Flash, 4KB EEPROM, 8KB SRAM"),
    ("ATmega Series", "m128", "ATmega128", "0x1E9702", 131072, 4096, "0xE4", "0xD9", "0xFF", "128KB Flash, 4KB EEPROM, 4KB SRAM"),
    ("ATmega Series", "m1280", "ATmega1280", "0x1E9703", 131072, 4096, "0xFF", "0xDE", "0x05", "128KB Flash, 4KB EEPROM, 8KB SRAM"),
    ("ATmega Series", "m1281", "ATmega1281", "0x1E9704", 131072, 4096, "0xFF", "0xDE", "0x05", "128KB Flash, 4KB EEPROM, 8KB SRAM"),
    ("ATmega Series", "m1284p", "ATmega1284P", "0x1E9705", 131072, 4096, "0xFF", "0xDE", "0x05", "128KB Flash, 4KB EEPROM, 16KB SRAM"),
    ("ATmega Series", "m2560", "ATmega2560", "0x1E9801", 262144, 4096, "0xE4", "0xD9", "0xFF", "256KB Flash, 4KB EEPROM, 8KB SRAM"),
    ("ATmega Series", "m2561", "ATmega2561", "0x1E9802", 262144, 4096, "0xFF", "0xDE", "0x05", "256KB Flash, 4KB EEPROM, 8KB SRAM"),
    ("ATmega Series", "m103", "ATmega103", "0x1E9400", 8192, 1024, "0xE4", "0xD9", "0xFF", "8KB Flash, 1KB EEPROM, 512B SRAM"),
    ("ATmega Series", "m1284", "ATmega1284", "0x1E9705", 131072, 4096, "0xFF", "0xDE", "0x05", "128KB Flash, 4KB EEPROM, 16KB SRAM"),
    ("ATmega Series", "m1284rfr2", "ATmega1284RFR2", "0x1E9707", 131072, 4096, "0xFF", "0xDE", "0x05", "128KB Flash, 4KB EEPROM, 16KB SRAM (RFR2)"),
    ("ATmega Series", "m128a", "ATmega128A", "0x1E9708", 131072, 4096, "0xE4", "0xD9", "0xFF", "128KB Flash, 4KB EEPROM, 4KB SRAM"),
    // ATtiny
    ("ATtiny Series", "t13", "ATtiny13", "0x1E9007", 1024, 64, "0x6A", "0xFF", "0xFF", "1KB Flash, 64B EEPROM, 64B SRAM"),
    ("ATtiny Series", "t13a", "ATtiny13A", "0x1E9007", 1024, 64, "0x6A", "0xFF", "0xFF", "1KB Flash, 64B EEPROM, 64B SRAM"),
    ("ATtiny Series", "t24", "ATtiny24", "0x1E910B", 2048, 128, "0x62", "0xDF", "0xFF", "2KB Flash, 128B EEPROM, 128B SRAM"),
    ("ATtiny Series", "t44", "ATtiny44", "0x1E9207", 4096, 256, "0x62", "0xDF", "0xFF", "4KB Flash, 256B EEPROM, 256B SRAM"),
    ("ATtiny Series", "t84", "ATtiny84", "0x1E930C", 8192, 512, "0x62", "0xDF", "0xFF", "8KB Flash, 512B EEPROM, 512B SRAM"),
    ("ATtiny Series", "t25", "ATtiny25", "0x1E9108", 2048, 128, "0x62", "0xDF", "0xFF", "2KB Flash, 128B EEPROM, 128B SRAM"),
    ("ATtiny Series", "t45", "ATtiny45", "0x1E9206", 4096, 256, "0x62", "0xDF", "0xFF", "4KB Flash, 256B EEPROM, 256B SRAM"),
    ("ATtiny Series", "t85", "ATtiny85", "0x1E930B", 8192, 512, "0x62", "0xDF", "0xFF", "8KB Flash, 512B EEPROM, 512B SRAM"),
    ("ATtiny Series", "t2313", "ATtiny2313", "0x1E910A", 2048, 128, "0x6A", "0xFF", "0xFF", "2KB Flash, 128B EEPROM, 128B SRAM"),
    ("ATtiny Series", "t2313a", "ATtiny2313A", "0x1E910A", 2048, 128, "0x6A", "0xFF", "0xFF", "2KB Flash, 128B EEPROM, 128B SRAM"),
    ("ATtiny Series", "t1604", "ATtiny1604", "0x1E9425", 16384, 256, "0xFF", "0xDE", "0x05", "16KB Flash, 256B EEPROM, 1KB SRAM"),
    ("ATtiny Series", "t1614", "ATtiny1614", "0x1E9422", 16384, 256, "0xFF", "0xDE", "0x05", "16KB Flash, 256B EEPROM, 2KB SRAM"),
    ("ATtiny Series", "t817", "ATtiny817", "0x1E9322", 8192, 128, "0xFF", "0xDE", "0x05", "8KB Flash, 128B EEPROM, 512B SRAM"),
    ("ATtiny Series", "t10", "ATtiny10", "0x1E9005", 1024, 64, "0x6A", "0xFF", "0xFF", "1KB Flash, 64B EEPROM, 64B SRAM"),
    ("ATtiny Series", "t1606", "ATtiny1606", "0x1E9426", 16384, 256, "0xFF", "0xDE", "0x05", "16KB Flash, 256B EEPROM, 2KB SRAM"),
    ("ATtiny Series", "t1607", "ATtiny1607", "0x1E9427", 16384, 256, "0xFF", "0xDE", "0x05", "16KB Flash, 256B EEPROM, 2KB SRAM"),
    ("ATtiny Series", "t204", "ATtiny204", "0x1E9428", 4096, 256, "0xFF", "0xDE", "0x05", "4KB Flash, 256B EEPROM, 256B SRAM"),
    ("ATtiny Series", "t414", "ATtiny414", "0x1E9429", 4096, 256, "0xFF", "0xDE", "0x05", "4KB Flash, 256B EEPROM, 256B SRAM"),
    // ATxmega
    ("ATxmega Series", "x16a4", "ATxmega16A4", "0x1E9441", 16384, 1024, "0xFF", "0xFF", "0x05", "16KB Flash, 1KB EEPROM, 2KB SRAM"),
    ("ATxmega Series", "x32a4", "ATxmega32A4", "0x1E9541", 32768, 1024, "0xFF", "0xFF", "0x05", "32KB Flash, 1KB EEPROM, 4KB SRAM"),
    ("ATxmega Series", "x64a4", "ATxmega64A4", "0x1E9646", 65536, 2048, "0xFF", "0xFF", "0x05", "64KB Flash, 2KB EEPROM, 4KB SRAM"),
    ("ATxmega Series", "x128a4", "ATxmega128A4", "0x1E9746", 131072, 2048, "0xFF", "0xFF", "0x05", "128KB Flash, 2KB EEPROM, 8KB SRAM"),
    ("ATxmega Series", "x16a4u", "ATxmega16A4U", "0x1E9442", 16384, 1024, "0xFF", "0xFF", "0x05", "16KB Flash, 1KB EEPROM, 2KB SRAM (USB)"),
    ("ATxmega Series", "x32a4u", "ATxmega32A4U", "0x1E9542", 32768, 1024, "0xFF", "0xFF", "0x05", "32KB Flash, 1KB EEPROM, 4KB SRAM (USB)"),
    ("ATxmega Series", "x64a4u", "ATxmega64A4U", "0x1E9647", 65536, 2048, "0xFF", "0xFF", "0x05", "64KB Flash, 2KB EEPROM, 4KB SRAM (USB)"),
    ("ATxmega Series", "x128a4u", "ATxmega128A4U", "0x1E9747", 131072, 2048, "0xFF", "0xFF", "0x05", "128KB Flash, 2KB EEPROM, 8KB SRAM (USB)"),
    // AT90
    ("AT90 Series", "90s2313", "AT90S2313", "0x1E9101", 2048, 128, "0xE4", "0xD9", "0xFF", "2KB Flash, 128B EEPROM, 128B SRAM"),
    ("AT90 Series", "90s2333", "AT90S2333", "0x1E9102", 2048, 128, "0xE4", "0xD9", "0xFF", "2KB Flash, 128B EEPROM, 128B SRAM"),
    ("AT90 Series", "90s4414", "AT90S4414", "0x1E9201", 4096, 256, "0xE4", "0xD9", "0xFF", "4KB Flash, 256B EEPROM, 256B SRAM"),
    ("AT90 Series", "90s8515", "AT90S8515", "0x1E9301", 8192, 512, "0xE4", "0xD9", "0xFF", "8KB Flash, 512B EEPROM, 512B SRAM"),
    ("AT90 Series", "usb162", "AT90USB162", "0x1E9482", 16384, 512, "0xFF", "0xDE", "0x05", "16KB Flash, 512B EEPROM, 512B SRAM (USB)"),
    ("AT90 Series", "usb82", "AT90USB82", "0x1E9382", 8192, 512, "0xFF", "0xDE", "0x05", "8KB Flash, 512B EEPROM, 512B SRAM (USB)"),
    ("AT90 Series", "usb1286", "AT90USB1286", "0x1E9782", 131072, 4096, "0xFF", "0xDE", "0x05", "128KB Flash, 4KB EEPROM, 8KB SRAM (USB)"),
    ("AT90 Series", "c32", "AT90CAN32", "0x1E9581", 32768, 1024, "0xFF", "0xDE", "0x05", "32KB Flash, 1KB EEPROM, 2KB SRAM (CAN Bus)"),
    ("AT90 Series", "c64", "AT90CAN64", "0x1E9681", 65536, 2048, "0xFF", "0xDE", "0x05", "64KB Flash, 2KB EEPROM, 4KB SRAM (CAN Bus)"),
    ("AT90 Series", "c128", "AT90CAN128", "0x1E9709", 131072, 4096, "0xFF", "0xDE", "0x05", "128KB Flash, 4KB EEPROM, 8KB SRAM (CAN Bus)"),
    ("AT90 Series", "pwm2", "AT90PWM2", "0x1E9309", 8192, 512, "0xFF", "0xDE", "0x05", "8KB Flash, 512B EEPROM, 512B SRAM"),
    ("AT90 Series", "pwm216", "AT90PWM216", "0x1E930A", 8192, 512, "0xFF", "0xDE", "0x05", "8KB Flash, 512B EEPROM, 512B SRAM"),
    ("AT90 Series", "pwm2b", "AT90PWM2B", "0x1E930B", 8192, 512, "0xFF", "0xDE", "0x05", "8KB Flash, 512B EEPROM, 512B SRAM"),
    ("AT90 Series", "pwm3", "AT90PWM3", "0x1E930C", 8192, 512, "0xFF", "0xDE", "0x05", "8KB Flash, 512B EEPROM, 512B SRAM"),
    ("AT90 Series", "pwm316", "AT90PWM316", "0x1E930D", 8192, 512, "0xFF", "0xDE", "0x05", "8KB Flash, 512B EEPROM, 512B SRAM"),
    ("AT90 Series", "pwm3b", "AT90PWM3B", "0x1E930E", 8192, 512, "0xFF", "0xDE", "0x05", "8KB Flash, 512B EEPROM, 512B SRAM"),
    ("AT90 Series", "1200", "AT90S1200", "0x1E9001", 1024, 64, "0xE4", "0xD9", "0xFF", "1KB Flash, 64B EEPROM, 64B SRAM"),
    ("AT90 Series", "2313", "AT90S2313", "0x1E9101", 2048, 128, "0xE4", "0xD9", "0xFF", "2KB Flash, 128B EEPROM, 128B SRAM"),
    ("AT90 Series", "2333", "AT90S2333", "0x1E9102", 2048, 128, "0xE4", "0xD9", "0xFF", "2KB Flash, 128B EEPROM, 128B SRAM"),
    ("AT90 Series", "2343", "AT90S2343", "0x1E9103", 2048, 128, "0xE4", "0xD9", "0xFF", "2KB Flash, 128B EEPROM, 128B SRAM"),
    ("AT90 Series", "4414", "AT90S4414", "0x1E9201", 4096, 256, "0xE4", "0xD9", "0xFF", "4KB Flash, 256B EEPROM, 256B SRAM"),
    ("AT90 Series", "4433", "AT90S4433", "0x1E9202", 4096, 256, "0xE4", "0xD9", "0xFF", "4KB Flash, 256B EEPROM, 256B SRAM"),
    ("AT90 Series", "4434", "AT90S4434", "0x1E9203", 4096, 256, "0xE4", "0xD9", "0xFF", "4KB Flash, 256B EEPROM, 256B SRAM"),
    ("AT90 Series", "8515", "AT90S8515", "0x1E9301", 8192, 512, "0xE4", "0xD9", "0xFF", "8KB Flash, 512B EEPROM, 512B SRAM"),
    ("AT90 Series", "8535", "AT90S8535", "0x1E9302", 8192, 512, "0xE4", "0xD9", "0xFF", "8KB Flash, 512B EEPROM, 512B SRAM"),
    // AVR32
    ("AVR32 Series", "uc3a0512", "AVR32 UC3A0512", "0x1E9401", 524288, 8192, "0xFF", "0xDE", "0x05", "512KB Flash, 8KB EEPROM, 32KB SRAM"),
    ("AVR32 Series", "uc3a0256", "AVR32 UC3A0256", "0x1E9402", 262144, 8192, "0xFF", "0xDE", "0x05", "256KB Flash, 8KB EEPROM, 16KB SRAM"),
    ("AVR32 Series", "uc3b0256", "AVR32 UC3B0256", "0x1E9403", 262144, 8192, "0xFF", "0xDE", "0x05", "256KB Flash, 8KB EEPROM, 16KB SRAM"),
    ("AVR32 Series", "uc3b0512", "AVR32 UC3B0512", "0x1E9404", 524288, 8192, "0xFF", "0xDE", "0x05", "512KB Flash, 8KB EEPROM, 32KB SRAM"),
    // ATmega0
    ("ATmega0 Series", "m0", "ATmega4809", "0x1E951E", 49152, 2560, "0xFF", "0xDE", "0x05", "48KB Flash, 2560B EEPROM, 6KB SRAM"),
    ("ATmega0 Series", "m0a", "ATmega4808", "0x1E951D", 49152, 2560, "0xFF", "0xDE", "0x05", "48KB Flash, 2560B EEPROM, 6KB SRAM"),
    ("ATmega0 Series", "m0p", "ATmega4809P", "0x1E951F", 49152, 2560, "0xFF", "0xDE", "0x05", "48KB Flash, 2560B EEPROM, 6KB SRAM"),
    // ATtiny0
    ("ATtiny0 Series", "t0", "ATtiny404", "0x1E9405", 4096, 256, "0xFF", "0xDE", "0x05", "4KB Flash, 256B EEPROM, 256B SRAM"),
    ("ATtiny0 Series", "t0a", "ATtiny414", "0x1E9406", 4096, 256, "0xFF", "0xDE", "0x05", "4KB Flash, 256B EEPROM, 256B SRAM"),
    ("ATtiny0 Series", "t0b", "ATtiny814", "0x1E9407", 8192, 512, "0xFF", "0xDE", "0x05", "8KB Flash, 512B EEPROM, 512B SRAM"),
];
