use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;

/// One table key. The binary format tags keys as string or double;
/// nothing else is representable.
#[derive(Debug, Clone)]
pub enum Key {
    Str(String),
    Num(f64),
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Key::Str(a), Key::Str(b)) => a == b,
            // bit comparison so the map stays coherent even for odd doubles
            (Key::Num(a), Key::Num(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Key::Str(s) => {
                state.write_u8(0);
                s.hash(state);
            }
            Key::Num(n) => {
                state.write_u8(1);
                state.write_u64(n.to_bits());
            }
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Str(s) => f.write_str(s),
            Key::Num(n) => f.write_str(&fmt_double(*n)),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.to_string())
    }
}

impl From<f64> for Key {
    fn from(n: f64) -> Self {
        Key::Num(n)
    }
}

/// One table value; the four variants are the whole domain of the format.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Num(f64),
    Bool(bool),
    Table(Table),
}

/// A restricted Lua-style table: string/double keys, four value kinds,
/// nested to arbitrary depth. Insertion order is kept; inserting an
/// existing key overwrites the value and keeps the first position.
pub type Table = IndexMap<Key, Value>;

/// Top-level document: world version plus named tables.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GlobalModData {
    pub world_version: u32,
    pub tables: IndexMap<String, Table>,
}

impl GlobalModData {
    pub fn new(world_version: u32) -> Self {
        Self {
            world_version,
            tables: IndexMap::new(),
        }
    }
}

/// World versions the binary reader accepts. Kept as explicit
/// configuration so new game versions can be added without touching the
/// codec.
#[derive(Debug, Clone)]
pub struct SupportedVersions(Vec<u32>);

impl Default for SupportedVersions {
    fn default() -> Self {
        // gmd is a newer save feature; 195 is the only version seen so far
        Self(vec![195])
    }
}

impl SupportedVersions {
    pub fn new(versions: impl Into<Vec<u32>>) -> Self {
        Self(versions.into())
    }

    pub fn contains(&self, version: u32) -> bool {
        self.0.contains(&version)
    }
}

/// Render a double the way the JSON key transform does: integral values
/// keep a trailing `.0` ("42.0", not "42") so number keys stay visibly
/// typed next to string keys.
pub fn fmt_double(n: f64) -> String {
    format!("{n:?}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubles_render_with_visible_fraction() {
        assert_eq!(fmt_double(42.0), "42.0");
        assert_eq!(fmt_double(1.5), "1.5");
        assert_eq!(fmt_double(-3.0), "-3.0");
    }

    #[test]
    fn string_and_number_keys_are_distinct() {
        assert_ne!(Key::from("3"), Key::from(3.0));
    }

    #[test]
    fn repeated_insert_keeps_first_position() {
        let mut t = Table::new();
        t.insert(Key::from("a"), Value::Num(1.0));
        t.insert(Key::from("b"), Value::Num(2.0));
        t.insert(Key::from("a"), Value::Num(3.0));
        let keys: Vec<String> = t.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(t[&Key::from("a")], Value::Num(3.0));
    }
}
