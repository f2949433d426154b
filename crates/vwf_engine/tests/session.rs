use std::path::PathBuf;

use pretty_assertions::assert_eq;
use vwf_engine::{EngineError, FontLayout, OverrideEntry, Session, FIELD_COUNT, RECORD_SIZE};

// 3 leading block records, trailing block afterwards
fn test_layout() -> FontLayout {
    FontLayout {
        base_offset: 0x40,
        ascii_start_code: 0x20,
        ascii_end_index: 2,
        cjk_start_code: 0x30A0,
        cjk_record_index: 3,
        overrides: Vec::new(),
    }
}

/// A file image with an opaque header and `count` records whose first byte
/// is `index + 1`.
fn file_image(layout: &FontLayout, count: usize) -> Vec<u8> {
    let mut buffer = vec![0xEEu8; layout.base_offset];
    for i in 0..count {
        let mut record = [0u8; RECORD_SIZE];
        record[0] = i as u8 + 1;
        // a valid 4x4 rectangle so previews work
        record[8] = 0; // u0
        record[10] = 4; // u1
        record[12] = 4; // v1
        record[14] = 0; // v0
        buffer.extend_from_slice(&record);
    }
    buffer
}

#[test]
fn trailing_partial_record_is_dropped() {
    let layout = test_layout();
    let mut bytes = file_image(&layout, 4);
    bytes.extend_from_slice(&[1, 2, 3, 4, 5]);
    let session = Session::from_bytes(bytes, layout).unwrap();
    assert_eq!(session.record_count(), 4);
}

#[test]
fn file_shorter_than_base_offset_has_no_records() {
    let layout = test_layout();
    let session = Session::from_bytes(vec![0u8; 0x10], layout).unwrap();
    assert_eq!(session.record_count(), 0);
}

#[test]
fn get_rejects_out_of_range_index() {
    let layout = test_layout();
    let session = Session::from_bytes(file_image(&layout, 2), layout).unwrap();
    assert!(session.get(1).is_ok());
    let err = session.get(2).unwrap_err();
    assert!(matches!(err, EngineError::IndexOutOfRange { index: 2, len: 2 }));
}

#[test]
fn update_flows_into_the_buffer() {
    let layout = test_layout();
    let base = layout.base_offset;
    let mut session = Session::from_bytes(file_image(&layout, 2), layout).unwrap();

    let values: [i64; FIELD_COUNT] = [700, -3, 1, 8, 12, 9, 0, 16, 24, 12, 0];
    session.update_fields(1, &values).unwrap();

    let record = session.get(1).unwrap();
    assert_eq!(record.texture_id, 700);
    assert_eq!(record.x_shift, -3);
    assert_eq!(record.u1, 24);
    // record→buffer on commit
    assert_eq!(&session.bytes()[base + RECORD_SIZE..base + 2 * RECORD_SIZE], record.encode());
    // neighbours untouched
    assert_eq!(session.bytes()[base], 1);
}

#[test]
fn rejected_update_leaves_everything_unchanged() {
    let layout = test_layout();
    let mut session = Session::from_bytes(file_image(&layout, 2), layout).unwrap();
    let before_record = session.get(0).unwrap().clone();
    let before_bytes = session.bytes().to_vec();

    let values: [i64; FIELD_COUNT] = [0, 0, 0, 256, 0, 0, 0, 0, 0, 0, 0]; // width one past u8
    let err = session.update_fields(0, &values).unwrap_err();
    assert!(matches!(err, EngineError::InvalidFieldValue { field: "width", value: 256, .. }));

    assert_eq!(session.get(0).unwrap(), &before_record);
    assert_eq!(session.bytes(), &before_bytes[..]);
}

#[test]
fn find_by_code_uses_the_mapping() {
    let layout = test_layout();
    let session = Session::from_bytes(file_image(&layout, 5), layout).unwrap();

    assert_eq!(session.find_by_code(0x20).unwrap(), 0);
    assert_eq!(session.find_by_code(0x22).unwrap(), 2);
    // trailing block starts at record 3
    assert_eq!(session.find_by_code(0x30A0).unwrap(), 3);
    assert_eq!(session.find_by_code(0x30A1).unwrap(), 4);

    let err = session.find_by_code(0x4E00).unwrap_err();
    assert!(matches!(err, EngineError::CharacterNotFound { code: 0x4E00 }));
}

#[test]
fn override_record_is_synthesized_and_editable() {
    let mut layout = test_layout();
    let loose_offset = 0x200;
    layout.overrides.push(OverrideEntry {
        code: 0x30E0,
        offset: loose_offset,
    });

    let mut bytes = file_image(&layout, 2);
    bytes.resize(loose_offset + RECORD_SIZE, 0);
    bytes[loose_offset] = 99;
    let mut session = Session::from_bytes(bytes, layout).unwrap();

    // appended with the next free index
    assert_eq!(session.record_count(), 3);
    let index = session.find_by_code(0x30E0).unwrap();
    assert_eq!(index, 2);
    let record = session.get(index).unwrap();
    assert_eq!(record.byte_offset, loose_offset);
    assert_eq!(record.texture_id, 99);
    assert_eq!(record.ch, Some('ム'));

    // edits land at the record's own offset, not in the scan region
    let values: [i64; FIELD_COUNT] = [77, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
    session.update_fields(index, &values).unwrap();
    assert_eq!(session.bytes()[loose_offset], 77);
}

#[test]
fn save_writes_the_buffer_verbatim() {
    let layout = test_layout();
    let mut session = Session::from_bytes(file_image(&layout, 3), layout.clone()).unwrap();
    let values: [i64; FIELD_COUNT] = [5, 1, -1, 2, 2, 2, 0, 0, 2, 2, 0];
    session.update_fields(0, &values).unwrap();

    let path: PathBuf = std::env::temp_dir().join("vwf_engine_save_test.bin");
    session.save(&path).unwrap();

    let reloaded = Session::load(&path, layout).unwrap();
    assert_eq!(reloaded.bytes(), session.bytes());
    assert_eq!(reloaded.get(0).unwrap().texture_id, 5);
    std::fs::remove_file(&path).ok();
}

#[test]
fn load_propagates_io_errors() {
    let err = Session::load(std::path::Path::new("/nonexistent/font.bin"), FontLayout::default()).unwrap_err();
    assert!(matches!(err, EngineError::Io(_)));
}

#[test]
fn default_layout_matches_the_game_font() {
    let layout = FontLayout::default();
    assert_eq!(layout.base_offset, 0x35C);
    assert_eq!(layout.cjk_base_offset(), 0x35C + 95 * RECORD_SIZE);
    assert!(layout.overrides.iter().any(|o| o.code == 0x30E0 && o.offset == 0x0D4C));
}
