use std::fmt;
use std::io;
use std::path::Path;
use std::str::FromStr;

use log::debug;
use serde::Serialize;
use serde_json::ser::Formatter;
use serde_json::Value;

use crate::error::{Error, Result};

/// Key inside `asset` whose presence the inspection reports.
///
/// Spelled exactly as the report has always checked it, which is not
/// `generator`, so a well-formed asset reports "No generator".
pub const PROBE_KEY: &str = "generatora";

/// A parsed glTF JSON document. No schema is enforced.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Value,
}

/// Typed view of the `asset` object, as the glTF schema describes it.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetHeader {
    pub generator: Option<String>,
    pub version: String,
    pub min_version: Option<String>,
    pub copyright: Option<String>,
}

impl Document {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_owned(),
            source,
        })?;
        let root = serde_json::from_str(&text).map_err(|source| Error::Json {
            path: path.to_owned(),
            source,
        })?;
        debug!("loaded {} ({} bytes)", path.display(), text.len());
        Ok(Self { root })
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Walks `path` from the root. Object nodes are indexed by key, array
    /// nodes by the segment parsed as a decimal index.
    pub fn get(&self, path: &[&str]) -> Option<&Value> {
        path.iter().try_fold(&self.root, |node, segment| match node {
            Value::Object(map) => map.get(*segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
    }

    /// Whether the object at `path` has `key`. False if that node is
    /// missing or not an object.
    pub fn contains(&self, path: &[&str], key: &str) -> bool {
        self.get(path)
            .and_then(Value::as_object)
            .map_or(false, |map| map.contains_key(key))
    }

    pub fn asset_header(&self) -> Option<AssetHeader> {
        // From text, not from a `Value`: `extras` is a raw JSON value.
        let asset = self.get(&["asset"])?.to_string();
        match serde_json::from_str::<::gltf::json::Asset>(&asset) {
            Ok(asset) => Some(AssetHeader {
                generator: asset.generator,
                version: asset.version,
                min_version: asset.min_version,
                copyright: asset.copyright,
            }),
            Err(err) => {
                debug!("asset does not match the glTF schema: {}", err);
                None
            }
        }
    }

    /// `cubes.<id>.dim`
    pub fn cube_dimension(&self, id: &str) -> Option<&Value> {
        self.get(&["cubes", id, "dim"])
    }
}

impl FromStr for Document {
    type Err = serde_json::Error;

    fn from_str(text: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self {
            root: serde_json::from_str(text)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Inspection {
    pub generator: Value,
    pub asset: Value,
    pub has_probe_key: bool,
}

/// Fails on the first of `asset`, `asset.generator` that is absent.
pub fn inspect(document: &Document) -> Result<Inspection> {
    let asset = document
        .get(&["asset"])
        .ok_or(Error::MissingKey("asset"))?
        .clone();
    let generator = document
        .get(&["asset", "generator"])
        .ok_or(Error::MissingKey("asset.generator"))?
        .clone();

    Ok(Inspection {
        generator,
        has_probe_key: document.contains(&["asset"], PROBE_KEY),
        asset,
    })
}

/// One-line JSON with a space after every `:` and `,`.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

/// Displays a value as spaced one-line JSON, e.g. `{"generator": "X"}`.
pub struct JsonText<'a>(pub &'a Value);

impl fmt::Display for JsonText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, SpacedFormatter);
        self.0.serialize(&mut serializer).map_err(|_| fmt::Error)?;
        f.write_str(std::str::from_utf8(&out).map_err(|_| fmt::Error)?)
    }
}

/// Strings print bare, everything else as [`JsonText`].
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => JsonText(other).to_string(),
    }
}

impl fmt::Display for Inspection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Generator:   {}", display_value(&self.generator))?;
        writeln!(f, "foo:  {}", JsonText(&self.asset))?;
        if self.has_probe_key {
            writeln!(f, "Has generator")
        } else {
            writeln!(f, "No generator")
        }
    }
}
