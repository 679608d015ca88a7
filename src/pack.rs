//! Packing numeric values into byte sequences under an explicit byte order.

use std::fmt;

use byteorder::{BigEndian, LittleEndian};
use log::debug;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    Big,
    Little,
    /// Whatever the executing platform uses; see [`Endian::host`].
    Native,
}

/// A byte order with `Native` already resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Big,
    Little,
}

impl Endian {
    pub const fn host() -> Self {
        if cfg!(target_endian = "big") {
            Endian::Big
        } else {
            Endian::Little
        }
    }
}

impl ByteOrder {
    pub const fn resolve(self) -> Endian {
        match self {
            ByteOrder::Big => Endian::Big,
            ByteOrder::Little => Endian::Little,
            ByteOrder::Native => Endian::host(),
        }
    }
}

impl From<Endian> for ByteOrder {
    fn from(endian: Endian) -> Self {
        match endian {
            Endian::Big => ByteOrder::Big,
            Endian::Little => ByteOrder::Little,
        }
    }
}

/// An ordered run of values sharing one declared kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Numeric {
    U8(Vec<u8>),
    I32(Vec<i32>),
    F32(Vec<f32>),
}

impl Numeric {
    /// Width of a single element in bytes.
    pub fn width(&self) -> usize {
        match self {
            Numeric::U8(_) => 1,
            Numeric::I32(_) => 4,
            Numeric::F32(_) => 4,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Numeric::U8(values) => values.len(),
            Numeric::I32(values) => values.len(),
            Numeric::F32(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Output of [`pack`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Packed(Vec<u8>);

impl Packed {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<u8> {
        self.0.get(index).copied()
    }

    /// Like [`Packed::get`], but an index past the end is an error.
    pub fn byte_at(&self, index: usize) -> Result<u8> {
        self.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.0.len(),
        })
    }

    pub fn reversed(&self) -> Packed {
        Packed(self.0.iter().rev().copied().collect())
    }
}

/// Renders as a byte-string literal: printable ASCII kept, the rest `\xNN`.
/// Quoted with `"` when the bytes hold a `'` and no `"`, otherwise with `'`.
impl fmt::Display for Packed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quote = if self.0.contains(&b'\'') && !self.0.contains(&b'"') {
            b'"'
        } else {
            b'\''
        };
        write!(f, "b{}", quote as char)?;
        for &byte in &self.0 {
            match byte {
                b'\\' => f.write_str("\\\\")?,
                b if b == quote => write!(f, "\\{}", b as char)?,
                b'\t' => f.write_str("\\t")?,
                b'\n' => f.write_str("\\n")?,
                b'\r' => f.write_str("\\r")?,
                0x20..=0x7e => write!(f, "{}", byte as char)?,
                _ => write!(f, "\\x{:02x}", byte)?,
            }
        }
        write!(f, "{}", quote as char)
    }
}

fn pack_with<B: byteorder::ByteOrder>(values: &Numeric) -> Vec<u8> {
    let mut bytes = vec![0u8; values.len() * values.width()];
    match values {
        Numeric::U8(values) => bytes.copy_from_slice(values),
        Numeric::I32(values) => B::write_i32_into(values, &mut bytes),
        Numeric::F32(values) => B::write_f32_into(values, &mut bytes),
    }
    bytes
}

pub fn pack(values: &Numeric, order: ByteOrder) -> Packed {
    let bytes = match order.resolve() {
        Endian::Big => pack_with::<BigEndian>(values),
        Endian::Little => pack_with::<LittleEndian>(values),
    };
    debug!(
        "packed {} value(s) as {:?} into {} byte(s)",
        values.len(),
        order,
        bytes.len()
    );
    Packed(bytes)
}

/// Packs vectors as consecutive f32 triples, the layout of a glTF `VEC3`
/// float accessor.
pub fn pack_vec3(vectors: &[glam::Vec3], order: ByteOrder) -> Packed {
    let mut flat = Vec::with_capacity(vectors.len() * 3);
    for v in vectors {
        flat.extend_from_slice(&v.to_array());
    }
    pack(&Numeric::F32(flat), order)
}

/// The fixed set of packing requests printed after the inspection.
#[derive(Debug, Clone, PartialEq)]
pub struct PackDemo {
    pub bytes_big: Packed,
    pub bytes_little: Packed,
    pub bytes_native: Packed,
    pub int_native: Packed,
    pub float_native: Packed,
    pub float_big: Packed,
    pub float_little: Packed,
}

pub const DEMO_BYTES: [u8; 5] = [123, 3, 255, 0, 100];
pub const DEMO_INT: i32 = 234234;
pub const DEMO_FLOAT: f32 = 1.0;
/// Index looked up in the native float packing; past the end of 4 bytes.
pub const DEMO_FLOAT_INDEX: usize = 4;

impl PackDemo {
    pub fn run() -> Self {
        let bytes = Numeric::U8(DEMO_BYTES.to_vec());
        let int = Numeric::I32(vec![DEMO_INT]);
        let float = Numeric::F32(vec![DEMO_FLOAT]);

        PackDemo {
            bytes_big: pack(&bytes, ByteOrder::Big),
            bytes_little: pack(&bytes, ByteOrder::Little),
            bytes_native: pack(&bytes, ByteOrder::Native),
            int_native: pack(&int, ByteOrder::Native),
            float_big: pack(&float, ByteOrder::Big),
            float_little: pack(&float, ByteOrder::Little),
            float_native: pack(&float, ByteOrder::Native),
        }
    }

    /// The byte at [`DEMO_FLOAT_INDEX`] of the native float packing.
    pub fn float_native_byte(&self) -> Result<u8> {
        self.float_native.byte_at(DEMO_FLOAT_INDEX)
    }
}

impl fmt::Display for PackDemo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Big:     {}", self.bytes_big)?;
        writeln!(f, "Little:  {}", self.bytes_little)?;
        writeln!(f, "Native:  {}", self.bytes_native)?;
        writeln!(f, "{}", self.int_native)?;
        writeln!(f, "1f native {}", self.float_native)?;
        writeln!(f, "1f big    {}", self.float_big)?;
        writeln!(f, "1f little {}", self.float_little)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_byte_values_ignore_order() {
        let values = Numeric::U8(DEMO_BYTES.to_vec());
        let big = pack(&values, ByteOrder::Big);
        assert_eq!(big.as_bytes(), &DEMO_BYTES);
        assert_eq!(pack(&values, ByteOrder::Little), big);
        assert_eq!(pack(&values, ByteOrder::Native), big);
    }

    #[test]
    fn float_one_layouts() {
        let one = Numeric::F32(vec![1.0]);
        let big = pack(&one, ByteOrder::Big);
        let little = pack(&one, ByteOrder::Little);
        assert_eq!(big.as_bytes(), &[0x3f, 0x80, 0x00, 0x00]);
        assert_eq!(little.as_bytes(), &[0x00, 0x00, 0x80, 0x3f]);
        assert_eq!(big.reversed(), little);
    }

    #[test]
    fn native_matches_host_order() {
        let one = Numeric::F32(vec![1.0]);
        let native = pack(&one, ByteOrder::Native);
        assert_eq!(native, pack(&one, ByteOrder::from(Endian::host())));
        assert_eq!(native.as_bytes(), &1.0f32.to_ne_bytes());
        assert_eq!(ByteOrder::Native.resolve(), Endian::host());
        assert_eq!(ByteOrder::Big.resolve(), Endian::Big);
        assert_eq!(ByteOrder::Little.resolve(), Endian::Little);

        let expected = match Endian::host() {
            Endian::Big => [0x3fu8, 0x80, 0x00, 0x00],
            Endian::Little => [0x00, 0x00, 0x80, 0x3f],
        };
        assert_eq!(native.as_bytes(), &expected);
    }

    #[test]
    fn int_layouts() {
        let value = Numeric::I32(vec![DEMO_INT]);
        assert_eq!(pack(&value, ByteOrder::Big).as_bytes(), &[0x00, 0x03, 0x92, 0xfa]);
        assert_eq!(pack(&value, ByteOrder::Little).as_bytes(), &[0xfa, 0x92, 0x03, 0x00]);
        assert_eq!(
            pack(&value, ByteOrder::Native).as_bytes(),
            &DEMO_INT.to_ne_bytes()
        );
    }

    #[test]
    fn multiple_values_keep_sequence_order() {
        let values = Numeric::I32(vec![1, -1]);
        assert_eq!(
            pack(&values, ByteOrder::Big).as_bytes(),
            &[0, 0, 0, 1, 0xff, 0xff, 0xff, 0xff]
        );
        assert!(pack(&Numeric::F32(vec![]), ByteOrder::Little).is_empty());
    }

    #[test]
    fn vec3_packs_as_float_triples() {
        let packed = pack_vec3(
            &[glam::Vec3::new(1.0, 0.0, -2.0), glam::Vec3::ONE],
            ByteOrder::Little,
        );
        assert_eq!(packed.len(), 24);
        assert_eq!(&packed.as_bytes()[0..4], &1.0f32.to_le_bytes());
        assert_eq!(&packed.as_bytes()[8..12], &(-2.0f32).to_le_bytes());
        assert_eq!(&packed.as_bytes()[20..24], &1.0f32.to_le_bytes());
    }

    #[test]
    fn display_escapes_like_a_byte_literal() {
        let values = Numeric::U8(DEMO_BYTES.to_vec());
        assert_eq!(
            pack(&values, ByteOrder::Big).to_string(),
            r"b'{\x03\xff\x00d'"
        );
        assert_eq!(
            pack(&Numeric::F32(vec![1.0]), ByteOrder::Big).to_string(),
            r"b'?\x80\x00\x00'"
        );
    }

    #[test]
    fn display_switches_quotes_around_single_quotes() {
        assert_eq!(
            Packed(vec![b'\'', b'\\', b'\n']).to_string(),
            r#"b"'\\\n""#
        );
        assert_eq!(Packed(vec![b'\'', b'"']).to_string(), r#"b'\'"'"#);
        assert_eq!(Packed(vec![b'"']).to_string(), r#"b'"'"#);
    }

    #[test]
    fn demo_reports_fixed_requests() {
        let demo = PackDemo::run();
        assert_eq!(demo.float_big.as_bytes(), &[0x3f, 0x80, 0x00, 0x00]);
        assert_eq!(demo.float_native.len(), 4);

        let text = demo.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], r"Big:     b'{\x03\xff\x00d'");
        assert_eq!(lines[5], r"1f big    b'?\x80\x00\x00'");
        assert_eq!(lines[6], r"1f little b'\x00\x00\x80?'");
    }

    #[test]
    fn native_float_index_past_end_is_an_error() {
        let demo = PackDemo::run();
        assert!(matches!(
            demo.float_native_byte(),
            Err(Error::IndexOutOfRange { index: 4, len: 4 })
        ));
        assert_eq!(demo.float_native.byte_at(3).unwrap(), demo.float_native.as_bytes()[3]);
    }
}
