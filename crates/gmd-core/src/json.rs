//! JSON form of global mod data.
//!
//! JSON object keys are always strings, so every table key carries a
//! literal type prefix (`_string: ` / `_number: `) that makes the
//! original key type recoverable. The world version has no header region
//! in JSON and rides as a reserved top-level member instead, which means
//! no table can legitimately be named `__WORLD_VERSION`.

use std::fs;
use std::path::Path;

use serde::Serialize as _;
use serde_json::{Map, Value as J};

use crate::error::{GmdError, Result};
use crate::model::{self, GlobalModData, Key, Table, Value};

pub const WORLD_VERSION_KEY: &str = "__WORLD_VERSION";
pub const STRING_PREFIX: &str = "_string: ";
pub const NUMBER_PREFIX: &str = "_number: ";

pub fn table_to_json(table: &Table) -> Result<J> {
    let mut out = Map::with_capacity(table.len());
    for (key, value) in table {
        let name = match key {
            Key::Str(s) => format!("{STRING_PREFIX}{s}"),
            Key::Num(n) => format!("{NUMBER_PREFIX}{}", model::fmt_double(*n)),
        };
        let jv = match value {
            Value::Str(s) => J::String(s.clone()),
            Value::Num(n) => serde_json::Number::from_f64(*n).map(J::Number).ok_or(
                GmdError::UnsupportedType {
                    kind: "non-finite number",
                    key: key.to_string(),
                },
            )?,
            Value::Bool(b) => J::Bool(*b),
            Value::Table(t) => table_to_json(t)?,
        };
        out.insert(name, jv);
    }
    Ok(J::Object(out))
}

/// Keys with neither prefix are kept as bare string keys: hand-edited
/// files stay loadable, at the cost of a malformed edit silently turning
/// into a string key.
pub fn table_from_json(map: &Map<String, J>) -> Result<Table> {
    let mut out = Table::with_capacity(map.len());
    for (name, jv) in map {
        let key = if let Some(rest) = name.strip_prefix(STRING_PREFIX) {
            Key::Str(rest.to_string())
        } else if let Some(rest) = name.strip_prefix(NUMBER_PREFIX) {
            match rest.parse::<f64>() {
                Ok(n) => Key::Num(n),
                Err(_) => return Err(GmdError::InvalidNumberKey { key: name.clone() }),
            }
        } else {
            Key::Str(name.clone())
        };
        let value = match jv {
            J::String(s) => Value::Str(s.clone()),
            J::Number(n) => Value::Num(n.as_f64().ok_or(GmdError::UnsupportedType {
                kind: "number",
                key: key.to_string(),
            })?),
            J::Bool(b) => Value::Bool(*b),
            J::Object(m) => Value::Table(table_from_json(m)?),
            J::Null => {
                return Err(GmdError::UnsupportedType {
                    kind: "null",
                    key: key.to_string(),
                });
            }
            J::Array(_) => {
                return Err(GmdError::UnsupportedType {
                    kind: "array",
                    key: key.to_string(),
                });
            }
        };
        out.insert(key, value);
    }
    Ok(out)
}

pub fn document_to_json(gmd: &GlobalModData) -> Result<J> {
    let mut out = Map::with_capacity(gmd.tables.len() + 1);
    for (name, table) in &gmd.tables {
        out.insert(name.clone(), table_to_json(table)?);
    }
    out.insert(WORLD_VERSION_KEY.to_string(), J::from(gmd.world_version));
    Ok(J::Object(out))
}

pub fn document_from_json(doc: &J) -> Result<GlobalModData> {
    let map = doc.as_object().ok_or(GmdError::RootNotObject)?;
    let version = map
        .get(WORLD_VERSION_KEY)
        .ok_or(GmdError::MissingVersionKey)?;
    let world_version = version
        .as_u64()
        .and_then(|v| u32::try_from(v).ok())
        .ok_or(GmdError::InvalidVersionValue)?;
    let mut gmd = GlobalModData::new(world_version);
    for (name, jv) in map {
        if name == WORLD_VERSION_KEY {
            continue;
        }
        match jv {
            J::Object(m) => {
                gmd.tables.insert(name.clone(), table_from_json(m)?);
            }
            _ => {
                return Err(GmdError::UnsupportedType {
                    kind: "non-table",
                    key: name.clone(),
                });
            }
        }
    }
    Ok(gmd)
}

/// Read a global mod data JSON file.
pub fn from_json(path: &Path) -> Result<GlobalModData> {
    let text = fs::read_to_string(path)?;
    let doc: J = serde_json::from_str(&text)?;
    document_from_json(&doc)
}

/// Write a document as readable/editable JSON, 4-space indented like the
/// original tool's output.
pub fn to_json(path: &Path, gmd: &GlobalModData) -> Result<()> {
    let doc = document_to_json(gmd)?;
    let mut buf = Vec::with_capacity(4096);
    let fmt = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, fmt);
    doc.serialize(&mut ser)?;
    fs::write(path, buf)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unprefixed_key_passes_through_as_string() {
        let mut map = Map::new();
        map.insert("plain".to_string(), J::from(1.0));
        let t = table_from_json(&map).unwrap();
        assert_eq!(t[&Key::from("plain")], Value::Num(1.0));
    }

    #[test]
    fn bad_number_key_is_rejected() {
        let mut map = Map::new();
        map.insert("_number: pancake".to_string(), J::from(1.0));
        let err = table_from_json(&map).unwrap_err();
        assert!(matches!(err, GmdError::InvalidNumberKey { .. }));
    }

    #[test]
    fn null_value_is_out_of_domain() {
        let mut map = Map::new();
        map.insert("_string: k".to_string(), J::Null);
        let err = table_from_json(&map).unwrap_err();
        assert!(matches!(err, GmdError::UnsupportedType { kind: "null", .. }));
    }
}
