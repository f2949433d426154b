//! Font file layout description.
//!
//! Where the record array starts, how character codes are derived from
//! record positions, and which codes are pinned to explicit file offsets.

use serde::{Deserialize, Serialize};

use crate::RECORD_SIZE;

/// One explicit (character code, absolute byte offset) association.
///
/// Override entries take unconditional priority over positional derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideEntry {
    pub code: u32,
    pub offset: usize,
}

/// Known-good offsets for the shipped game font. These records live outside
/// the positions the positional rules would predict for their codes.
pub const DEFAULT_OVERRIDES: &[OverrideEntry] = &[
    OverrideEntry { code: 0x30E0, offset: 0x0D4C }, // ム
    OverrideEntry { code: 0x30E1, offset: 0x14EC },
    OverrideEntry { code: 0x30E2, offset: 0x14FC }, // モ
    OverrideEntry { code: 0x30E8, offset: 0x155C }, // ヨ
    OverrideEntry { code: 0x30EA, offset: 0x157C },
    OverrideEntry { code: 0x30EB, offset: 0x158C },
    OverrideEntry { code: 0x30EC, offset: 0x159C },
    OverrideEntry { code: 0x30ED, offset: 0x15AC },
    OverrideEntry { code: 0x30EF, offset: 0x15CC },
    OverrideEntry { code: 0x30F3, offset: 0x15EC },
    OverrideEntry { code: 0x4E0A, offset: 0x0B9E },
    OverrideEntry { code: 0x4E86, offset: 0x17DC },
    OverrideEntry { code: 0x4E88, offset: 0x17EC },
    OverrideEntry { code: 0x4E92, offset: 0x183C },
    OverrideEntry { code: 0x4E9C, offset: 0x185C },
    OverrideEntry { code: 0x5320, offset: 0x22AC },
    OverrideEntry { code: 0x5339, offset: 0x22BC },
    OverrideEntry { code: 0x533A, offset: 0x22CC },
];

/// Layout of one font resource file.
///
/// The default values describe the PSP game font this tool was written for;
/// other layouts can be loaded from a TOML file by the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontLayout {
    /// File position where the record array begins (the header before it is
    /// opaque and never touched).
    pub base_offset: usize,

    /// First character code of the leading contiguous block.
    pub ascii_start_code: u32,
    /// Last record index (inclusive) mapped by the leading block rule.
    pub ascii_end_index: usize,

    /// First character code of the trailing contiguous block.
    pub cjk_start_code: u32,
    /// Record index where the trailing block begins; its base offset is
    /// `base_offset + cjk_record_index * RECORD_SIZE`.
    pub cjk_record_index: usize,

    /// Explicit code-to-offset associations, applied before the positional
    /// rules.
    #[serde(default)]
    pub overrides: Vec<OverrideEntry>,
}

impl Default for FontLayout {
    fn default() -> Self {
        Self {
            base_offset: 0x35C,
            ascii_start_code: 0x20,
            ascii_end_index: 94,
            cjk_start_code: 0x30A0,
            cjk_record_index: 95,
            overrides: DEFAULT_OVERRIDES.to_vec(),
        }
    }
}

impl FontLayout {
    /// Base offset of the trailing (CJK) contiguous block.
    pub fn cjk_base_offset(&self) -> usize {
        self.base_offset + self.cjk_record_index * RECORD_SIZE
    }
}
