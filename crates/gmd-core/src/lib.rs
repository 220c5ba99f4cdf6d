//! gmd-core: codec for global mod data saves
//!
//! This crate focuses on a small, well-factored surface:
//! - Data model: world version plus named Lua-style tables (`model`)
//! - Big-endian binary reader and writer (`binfmt`, `binfmt_write`)
//! - JSON form with type-prefixed keys (`json`)
//!
pub mod binfmt;
pub mod binfmt_write;
pub mod error;
pub mod json;
pub mod model;

pub use binfmt::from_bin;
pub use binfmt_write::{to_bin, to_bin_bytes};
pub use error::{GmdError, Result};
pub use json::{from_json, to_json};
pub use model::{GlobalModData, Key, SupportedVersions, Table, Value};
