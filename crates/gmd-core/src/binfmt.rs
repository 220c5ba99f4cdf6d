//! Reader for the global mod data binary layout.
//!
//! Everything is big-endian. The file is `[u32 version][u32 table_count]`
//! followed by one entry per table: `[u32 entry_len][string name][table]`.
//! A table is `[u32 pair_count]` then tagged key/value pairs; strings are
//! u16-length-prefixed UTF-8. The entry length is advisory: decoding
//! parses the name and table structurally and never skips by it.

use std::fs;
use std::path::Path;

use crate::error::{GmdError, Result};
use crate::model::{GlobalModData, Key, SupportedVersions, Table, Value};

pub(crate) const KEY_TAG_STRING: u8 = 0;
pub(crate) const KEY_TAG_DOUBLE: u8 = 1;
pub(crate) const VALUE_TAG_STRING: u8 = 0;
pub(crate) const VALUE_TAG_DOUBLE: u8 = 1;
pub(crate) const VALUE_TAG_TABLE: u8 = 2;
pub(crate) const VALUE_TAG_BOOL: u8 = 3;

#[derive(Debug)]
pub struct Parser<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let b = self
            .data
            .get(self.pos)
            .copied()
            .ok_or(GmdError::UnexpectedEof { offset: self.pos })?;
        self.pos += 1;
        Ok(b)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        if self.pos + 2 > self.data.len() {
            return Err(GmdError::UnexpectedEof { offset: self.pos });
        }
        let v = u16::from_be_bytes([self.data[self.pos], self.data[self.pos + 1]]);
        self.pos += 2;
        Ok(v)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        if self.pos + 4 > self.data.len() {
            return Err(GmdError::UnexpectedEof { offset: self.pos });
        }
        let v = u32::from_be_bytes([
            self.data[self.pos],
            self.data[self.pos + 1],
            self.data[self.pos + 2],
            self.data[self.pos + 3],
        ]);
        self.pos += 4;
        Ok(v)
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        if self.pos + 8 > self.data.len() {
            return Err(GmdError::UnexpectedEof { offset: self.pos });
        }
        let v = u64::from_be_bytes([
            self.data[self.pos],
            self.data[self.pos + 1],
            self.data[self.pos + 2],
            self.data[self.pos + 3],
            self.data[self.pos + 4],
            self.data[self.pos + 5],
            self.data[self.pos + 6],
            self.data[self.pos + 7],
        ]);
        self.pos += 8;
        Ok(f64::from_bits(v))
    }

    pub fn read_bool(&mut self) -> Result<bool> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(GmdError::MalformedBoolean(other)),
        }
    }

    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.pos + len > self.data.len() {
            return Err(GmdError::UnexpectedEof { offset: self.pos });
        }
        let s = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(s)
    }

    /// u16 byte-length prefix, then that many bytes of UTF-8.
    pub fn read_string(&mut self) -> Result<String> {
        let len = self.read_u16()? as usize;
        let bytes = self.read_slice(len)?;
        Ok(String::from_utf8(bytes.to_vec())?)
    }

    pub fn read_table(&mut self) -> Result<Table> {
        let num_pairs = self.read_u32()? as usize;
        let mut table = Table::with_capacity(num_pairs);
        for _ in 0..num_pairs {
            let key = match self.read_u8()? {
                KEY_TAG_STRING => Key::Str(self.read_string()?),
                KEY_TAG_DOUBLE => Key::Num(self.read_f64()?),
                tag => {
                    return Err(GmdError::InvalidKeyType {
                        tag,
                        offset: self.pos - 1,
                    });
                }
            };
            let value = match self.read_u8()? {
                VALUE_TAG_STRING => Value::Str(self.read_string()?),
                VALUE_TAG_DOUBLE => Value::Num(self.read_f64()?),
                VALUE_TAG_TABLE => Value::Table(self.read_table()?),
                VALUE_TAG_BOOL => Value::Bool(self.read_bool()?),
                tag => {
                    return Err(GmdError::InvalidValueType {
                        tag,
                        key: key.to_string(),
                    });
                }
            };
            // duplicate keys overwrite; the first position is kept
            table.insert(key, value);
        }
        Ok(table)
    }

    pub fn read_document(&mut self, supported: &SupportedVersions) -> Result<GlobalModData> {
        let world_version = self.read_u32()?;
        if !supported.contains(world_version) {
            return Err(GmdError::UnsupportedVersion(world_version));
        }
        let mut gmd = GlobalModData::new(world_version);
        let num_entries = self.read_u32()? as usize;
        for _ in 0..num_entries {
            let _entry_len = self.read_u32()?;
            let name = self.read_string()?;
            gmd.tables.insert(name, self.read_table()?);
        }
        Ok(gmd)
    }
}

/// Read a global mod data binary file.
pub fn from_bin(path: &Path, supported: &SupportedVersions) -> Result<GlobalModData> {
    let data = fs::read(path)?;
    Parser::new(&data).read_document(supported)
}
