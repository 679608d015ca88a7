//! Inspect a glTF JSON document and pack numbers under explicit byte orders.
pub mod cli;
pub mod error;
pub mod gltf;
pub mod pack;

pub use crate::error::{Error, Result};
pub use crate::gltf::{display_value, inspect, AssetHeader, Document, Inspection, JsonText};
pub use crate::pack::{pack, pack_vec3, ByteOrder, Endian, Numeric, PackDemo, Packed};
