//! Writer for the global mod data binary layout.

use std::fs;
use std::path::Path;

use crate::binfmt::{
    KEY_TAG_DOUBLE, KEY_TAG_STRING, VALUE_TAG_BOOL, VALUE_TAG_DOUBLE, VALUE_TAG_STRING,
    VALUE_TAG_TABLE,
};
use crate::error::{GmdError, Result};
use crate::model::{GlobalModData, Key, Table, Value};

#[derive(Debug, Default)]
pub struct Writer {
    out: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Self {
            out: Vec::with_capacity(1024),
        }
    }

    fn push(&mut self, b: u8) {
        self.out.push(b);
    }

    fn write_u16(&mut self, v: u16) {
        self.out.extend_from_slice(&v.to_be_bytes());
    }

    fn write_u32(&mut self, v: u32) {
        self.out.extend_from_slice(&v.to_be_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.out.extend_from_slice(&v.to_bits().to_be_bytes());
    }

    fn write_bool(&mut self, v: bool) {
        self.push(if v { 1 } else { 0 });
    }

    fn write_string(&mut self, s: &str) -> Result<()> {
        let len = s.len();
        if len > u16::MAX as usize {
            return Err(GmdError::StringTooLong { len });
        }
        self.write_u16(len as u16);
        self.out.extend_from_slice(s.as_bytes());
        Ok(())
    }

    fn patch_u32(&mut self, at: usize, v: u32) {
        self.out[at..at + 4].copy_from_slice(&v.to_be_bytes());
    }

    pub fn write_table(&mut self, table: &Table) -> Result<()> {
        self.write_u32(table.len() as u32);
        for (key, value) in table {
            match key {
                Key::Str(s) => {
                    self.push(KEY_TAG_STRING);
                    self.write_string(s)?;
                }
                Key::Num(n) => {
                    self.push(KEY_TAG_DOUBLE);
                    self.write_f64(*n);
                }
            }
            match value {
                Value::Str(s) => {
                    self.push(VALUE_TAG_STRING);
                    self.write_string(s)?;
                }
                Value::Num(n) => {
                    self.push(VALUE_TAG_DOUBLE);
                    self.write_f64(*n);
                }
                Value::Table(t) => {
                    self.push(VALUE_TAG_TABLE);
                    self.write_table(t)?;
                }
                Value::Bool(b) => {
                    self.push(VALUE_TAG_BOOL);
                    self.write_bool(*b);
                }
            }
        }
        Ok(())
    }

    /// Entry lengths are not known up front: each entry gets a zero
    /// placeholder that is patched with `end - start - 4` once the name
    /// and table have been written.
    pub fn write_document(&mut self, gmd: &GlobalModData) -> Result<()> {
        self.write_u32(gmd.world_version);
        self.write_u32(gmd.tables.len() as u32);
        for (name, table) in &gmd.tables {
            let start = self.out.len();
            self.write_u32(0);
            self.write_string(name)?;
            self.write_table(table)?;
            let end = self.out.len();
            self.patch_u32(start, (end - start - 4) as u32);
        }
        Ok(())
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.out
    }
}

/// Encode a document to the binary layout.
pub fn to_bin_bytes(gmd: &GlobalModData) -> Result<Vec<u8>> {
    let mut w = Writer::new();
    w.write_document(gmd)?;
    Ok(w.into_bytes())
}

/// Write a document as a global mod data binary file.
pub fn to_bin(path: &Path, gmd: &GlobalModData) -> Result<()> {
    let data = to_bin_bytes(gmd)?;
    fs::write(path, data)?;
    Ok(())
}
