//! Fixed-layout glyph record codec.
//!
//! A font resource file carries a packed array of 16-byte records, little
//! endian, one per glyph. Each record stores the glyph's render metadata and
//! the rectangle of the companion atlas image that holds its pixels. Note
//! the storage order of the rectangle: `v1` (bottom) is stored before `v0`
//! (top).

use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::{EngineError, Result};

/// Size of one packed glyph record in bytes.
pub const RECORD_SIZE: usize = 16;

/// Number of persisted fields in one record.
pub const FIELD_COUNT: usize = 11;

/// The persisted record fields, in declared storage order.
///
/// The order of [`Field::ALL`] is the binary layout order and must never be
/// reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    TextureId,
    XShift,
    YShift,
    Width,
    Height,
    Spacing,
    Reserved,
    U0,
    U1,
    V1,
    V0,
}

impl Field {
    /// All fields in binary layout order.
    pub const ALL: [Field; FIELD_COUNT] = [
        Field::TextureId,
        Field::XShift,
        Field::YShift,
        Field::Width,
        Field::Height,
        Field::Spacing,
        Field::Reserved,
        Field::U0,
        Field::U1,
        Field::V1,
        Field::V0,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::TextureId => "texture_id",
            Field::XShift => "x_shift",
            Field::YShift => "y_shift",
            Field::Width => "width",
            Field::Height => "height",
            Field::Spacing => "spacing",
            Field::Reserved => "reserved",
            Field::U0 => "u0",
            Field::U1 => "u1",
            Field::V1 => "v1",
            Field::V0 => "v0",
        }
    }

    /// Inclusive value range admitted by the field's declared bit width.
    pub fn range(self) -> (i64, i64) {
        match self {
            Field::TextureId | Field::U0 | Field::U1 | Field::V1 | Field::V0 => (0, i64::from(u16::MAX)),
            Field::XShift | Field::YShift => (i64::from(i8::MIN), i64::from(i8::MAX)),
            Field::Width | Field::Height | Field::Spacing | Field::Reserved => (0, i64::from(u8::MAX)),
        }
    }

    /// Check a raw value against the field's range.
    pub fn check(self, value: i64) -> Result<()> {
        let (min, max) = self.range();
        if value < min || value > max {
            return Err(EngineError::InvalidFieldValue {
                field: self.name(),
                value,
                min,
                max,
            });
        }
        Ok(())
    }
}

/// One glyph record.
///
/// `index`, `byte_offset` and `ch` are derived at load time and are not part
/// of the persisted 16-byte layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub texture_id: u16,
    pub x_shift: i8,
    pub y_shift: i8,
    pub width: u8,
    pub height: u8,
    pub spacing: u8,
    pub reserved: u8,
    /// Atlas rectangle, left edge.
    pub u0: u16,
    /// Atlas rectangle, right edge.
    pub u1: u16,
    /// Atlas rectangle, bottom edge (stored before `v0`).
    pub v1: u16,
    /// Atlas rectangle, top edge.
    pub v0: u16,

    /// 0-based position among all loaded records (derived, not persisted).
    pub index: usize,
    /// Absolute position of the record in the file (derived, not persisted).
    pub byte_offset: usize,
    /// Character resolved by the glyph index, if any (derived, not persisted).
    pub ch: Option<char>,
}

impl Record {
    /// Deserialize one record from the first [`RECORD_SIZE`] bytes of `bytes`.
    ///
    /// The derived attributes are left at their defaults; callers fill them
    /// in via [`Record::at`].
    pub fn decode(bytes: &[u8]) -> Result<Record> {
        if bytes.len() < RECORD_SIZE {
            return Err(EngineError::MalformedRecord {
                expected: RECORD_SIZE,
                actual: bytes.len(),
            });
        }
        let mut r = Cursor::new(bytes);
        Ok(Record {
            texture_id: r.read_u16::<LittleEndian>()?,
            x_shift: r.read_i8()?,
            y_shift: r.read_i8()?,
            width: r.read_u8()?,
            height: r.read_u8()?,
            spacing: r.read_u8()?,
            reserved: r.read_u8()?,
            u0: r.read_u16::<LittleEndian>()?,
            u1: r.read_u16::<LittleEndian>()?,
            v1: r.read_u16::<LittleEndian>()?,
            v0: r.read_u16::<LittleEndian>()?,
            index: 0,
            byte_offset: 0,
            ch: None,
        })
    }

    /// Serialize the record back into its packed 16-byte layout.
    pub fn encode(&self) -> [u8; RECORD_SIZE] {
        let mut b = [0u8; RECORD_SIZE];
        b[0..2].copy_from_slice(&self.texture_id.to_le_bytes());
        b[2] = self.x_shift as u8;
        b[3] = self.y_shift as u8;
        b[4] = self.width;
        b[5] = self.height;
        b[6] = self.spacing;
        b[7] = self.reserved;
        b[8..10].copy_from_slice(&self.u0.to_le_bytes());
        b[10..12].copy_from_slice(&self.u1.to_le_bytes());
        b[12..14].copy_from_slice(&self.v1.to_le_bytes());
        b[14..16].copy_from_slice(&self.v0.to_le_bytes());
        b
    }

    /// Set the derived position attributes.
    pub fn at(mut self, index: usize, byte_offset: usize) -> Record {
        self.index = index;
        self.byte_offset = byte_offset;
        self
    }

    /// Read a field as a raw value, in declared order.
    pub fn value(&self, field: Field) -> i64 {
        match field {
            Field::TextureId => i64::from(self.texture_id),
            Field::XShift => i64::from(self.x_shift),
            Field::YShift => i64::from(self.y_shift),
            Field::Width => i64::from(self.width),
            Field::Height => i64::from(self.height),
            Field::Spacing => i64::from(self.spacing),
            Field::Reserved => i64::from(self.reserved),
            Field::U0 => i64::from(self.u0),
            Field::U1 => i64::from(self.u1),
            Field::V1 => i64::from(self.v1),
            Field::V0 => i64::from(self.v0),
        }
    }

    /// Build a copy of this record with all persisted fields replaced by the
    /// given raw values (in [`Field::ALL`] order).
    ///
    /// Every value is checked against its field's declared range first; on
    /// any out-of-range value the whole update is rejected and `self` is
    /// untouched.
    pub fn with_values(&self, values: &[i64; FIELD_COUNT]) -> Result<Record> {
        for (field, &value) in Field::ALL.iter().zip(values) {
            field.check(value)?;
        }
        Ok(Record {
            texture_id: values[0] as u16,
            x_shift: values[1] as i8,
            y_shift: values[2] as i8,
            width: values[3] as u8,
            height: values[4] as u8,
            spacing: values[5] as u8,
            reserved: values[6] as u8,
            u0: values[7] as u16,
            u1: values[8] as u16,
            v1: values[9] as u16,
            v0: values[10] as u16,
            ..self.clone()
        })
    }
}
