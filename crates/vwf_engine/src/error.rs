//! Unified error types for vwf_engine

use thiserror::Error;

/// Main error type for vwf_engine operations
#[derive(Debug, Error)]
pub enum EngineError {
    // === I/O Errors ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Codec Errors ===
    #[error("Record truncated: need {expected} bytes, got {actual}")]
    MalformedRecord { expected: usize, actual: usize },

    #[error("Value {value} out of range for field '{field}' ({min}..={max})")]
    InvalidFieldValue {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    // === Lookup Errors ===
    #[error("Record index {index} out of range (0..{len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Character U+{code:04X} not found in mapping")]
    CharacterNotFound { code: u32 },

    // === Mapping Errors ===
    #[error("Override offset 0x{offset:04X} has no backing record and cannot be read from the file")]
    OffsetNotFound { offset: usize },

    // === Rendering Errors ===
    #[error("Invalid glyph rectangle ({u0},{v0})-({u1},{v1})")]
    InvalidGlyphRect { u0: u16, v0: u16, u1: u16, v1: u16 },
}

pub type Result<T> = std::result::Result<T, EngineError>;
