//! Character code to record index mapping.
//!
//! Two layers: explicit overrides first (they win unconditionally), then a
//! positional fallback that derives codes from record offsets — a leading
//! contiguous block starting at the file's base offset, and a trailing block
//! with its own start code and base offset. A record whose derived code is
//! already taken, or whose offset a rule cannot express, simply stays
//! unmapped; that is a valid end state.

use std::collections::{hash_map::Entry, HashMap, HashSet};

use crate::{EngineError, FontLayout, Record, Result, RECORD_SIZE};

/// The built (character code → record index) mapping.
#[derive(Debug, Clone, Default)]
pub struct CharMap {
    map: HashMap<u32, usize>,
}

impl CharMap {
    /// Build the mapping for the loaded record set.
    ///
    /// An override pointing at an offset with no scanned record pulls the
    /// record in on demand: the 16 bytes at that offset are decoded straight
    /// from `buffer` and appended to `records` with the next free index.
    /// [`EngineError::OffsetNotFound`] is returned only when the buffer
    /// cannot supply those bytes.
    pub fn build(records: &mut Vec<Record>, buffer: &[u8], layout: &FontLayout) -> Result<CharMap> {
        let mut offset_to_index: HashMap<usize, usize> = records.iter().map(|r| (r.byte_offset, r.index)).collect();
        let mut map = HashMap::new();
        let mut claimed: HashSet<usize> = HashSet::new();

        for entry in &layout.overrides {
            let index = match offset_to_index.get(&entry.offset) {
                Some(&index) => index,
                None => {
                    let end = entry.offset + RECORD_SIZE;
                    if end > buffer.len() {
                        return Err(EngineError::OffsetNotFound { offset: entry.offset });
                    }
                    let record = Record::decode(&buffer[entry.offset..end])?.at(records.len(), entry.offset);
                    log::warn!(
                        "no scanned record at offset 0x{:04X}, synthesized #{} for U+{:04X}",
                        entry.offset,
                        record.index,
                        entry.code
                    );
                    let index = record.index;
                    offset_to_index.insert(entry.offset, index);
                    records.push(record);
                    index
                }
            };
            records[index].ch = char::from_u32(entry.code);
            map.insert(entry.code, index);
            claimed.insert(entry.offset);
        }

        for i in 0..records.len() {
            if claimed.contains(&records[i].byte_offset) {
                continue;
            }
            let (start_code, rule_base) = if records[i].index <= layout.ascii_end_index {
                (layout.ascii_start_code, layout.base_offset)
            } else {
                (layout.cjk_start_code, layout.cjk_base_offset())
            };
            let Some(delta) = records[i].byte_offset.checked_sub(rule_base) else {
                // offset below the rule's base: no code can be derived
                log::warn!("record #{} at offset 0x{:04X} left unmapped", records[i].index, records[i].byte_offset);
                continue;
            };
            let code = start_code + (delta / RECORD_SIZE) as u32;
            if let Entry::Vacant(slot) = map.entry(code) {
                slot.insert(i);
                records[i].ch = char::from_u32(code);
            }
        }

        Ok(CharMap { map })
    }

    /// Look up the record index mapped to `code`.
    pub fn get(&self, code: u32) -> Option<usize> {
        self.map.get(&code).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate over all (code, record index) pairs, unordered.
    pub fn iter(&self) -> impl Iterator<Item = (u32, usize)> + '_ {
        self.map.iter().map(|(&code, &index)| (code, index))
    }
}
