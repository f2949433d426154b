//! Editor session: the in-memory owner of the file buffer, the parsed
//! record list and the character mapping.
//!
//! The buffer is the single source of truth. Records are parsed out of it on
//! load; every committed field update re-encodes the record and splices the
//! bytes back in, so a save is nothing more than writing the buffer out
//! verbatim. Output always goes to a caller-supplied path, the loaded file is
//! never rewritten in place.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{CharMap, EngineError, FontLayout, Record, Result, FIELD_COUNT, RECORD_SIZE};

#[derive(Debug)]
pub struct Session {
    buffer: Vec<u8>,
    records: Vec<Record>,
    map: CharMap,
    layout: FontLayout,
    file_name: Option<PathBuf>,
}

impl Session {
    /// Read the whole file at `path` and parse it according to `layout`.
    pub fn load(path: &Path, layout: FontLayout) -> Result<Session> {
        let buffer = fs::read(path)?;
        let mut session = Session::from_bytes(buffer, layout)?;
        session.file_name = Some(path.into());
        log::info!("loaded {} records from {}", session.records.len(), path.display());
        Ok(session)
    }

    /// Parse an in-memory file image.
    ///
    /// Records are scanned as a packed array starting at the layout's base
    /// offset; a trailing partial record is silently dropped. The character
    /// mapping is built as part of loading.
    pub fn from_bytes(buffer: Vec<u8>, layout: FontLayout) -> Result<Session> {
        let count = buffer.len().saturating_sub(layout.base_offset) / RECORD_SIZE;
        let mut records = Vec::with_capacity(count);
        for i in 0..count {
            let offset = layout.base_offset + i * RECORD_SIZE;
            records.push(Record::decode(&buffer[offset..offset + RECORD_SIZE])?.at(i, offset));
        }
        let map = CharMap::build(&mut records, &buffer, &layout)?;
        Ok(Session {
            buffer,
            records,
            map,
            layout,
            file_name: None,
        })
    }

    pub fn layout(&self) -> &FontLayout {
        &self.layout
    }

    pub fn file_name(&self) -> Option<&Path> {
        self.file_name.as_deref()
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Result<&Record> {
        self.records.get(index).ok_or(EngineError::IndexOutOfRange {
            index,
            len: self.records.len(),
        })
    }

    /// Replace all persisted fields of record `index` with the given raw
    /// values (in declared field order).
    ///
    /// Stage-then-commit: the values are validated and encoded before
    /// anything is touched, so on error both the buffer and the record are
    /// exactly as they were.
    pub fn update_fields(&mut self, index: usize, values: &[i64; FIELD_COUNT]) -> Result<()> {
        let record = self.get(index)?;
        let updated = record.with_values(values)?;
        let bytes = updated.encode();

        let offset = updated.byte_offset;
        self.buffer[offset..offset + RECORD_SIZE].copy_from_slice(&bytes);
        self.records[index] = updated;
        Ok(())
    }

    /// Look up the record index mapped to a character code.
    pub fn find_by_code(&self, code: u32) -> Result<usize> {
        self.map.get(code).ok_or(EngineError::CharacterNotFound { code })
    }

    pub fn char_map(&self) -> &CharMap {
        &self.map
    }

    /// Write the entire current buffer to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, &self.buffer)?;
        log::info!("wrote {} bytes to {}", self.buffer.len(), path.display());
        Ok(())
    }

    /// Raw file image (tests and diagnostics).
    pub fn bytes(&self) -> &[u8] {
        &self.buffer
    }
}
