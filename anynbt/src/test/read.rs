//! Driver-level tests: framing detection, decompression, the level header,
//! root naming and the strict trailing-bytes rule.

use std::io::Read;

use super::builder::Builder;
use crate::error::ErrorKind;
use crate::{read, read_from, Compression, Endian, ReadOptions, RootName, Value};

fn gzip(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    flate2::read::GzEncoder::new(data, flate2::Compression::default())
        .read_to_end(&mut out)
        .unwrap();
    out
}

fn zlib(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    flate2::read::ZlibEncoder::new(data, flate2::Compression::default())
        .read_to_end(&mut out)
        .unwrap();
    out
}

fn raw_deflate(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    flate2::read::DeflateEncoder::new(data, flate2::Compression::default())
        .read_to_end(&mut out)
        .unwrap();
    out
}

/// COMPOUND with an empty name and no children.
const EMPTY_COMPOUND: [u8; 4] = [0x0a, 0x00, 0x00, 0x00];

#[test]
fn empty_compound_with_default_hints() {
    let doc = read(&EMPTY_COMPOUND, &ReadOptions::default()).unwrap();

    assert_eq!(doc.root_name.as_deref(), Some(""));
    assert_eq!(doc.endian, Endian::Big);
    assert_eq!(doc.compression, Compression::None);
    assert!(!doc.bedrock_level);
    assert_eq!(doc.bytes_read, EMPTY_COMPOUND.len());
    match &doc.root {
        Value::Compound(c) => assert!(c.is_empty()),
        other => panic!("expected compound root, got {:?}", other),
    }
}

#[test]
fn named_root_detected() {
    let payload = Builder::new()
        .start_compound("foo")
        .byte("bar", 127)
        .end_compound()
        .build();

    let doc = read(&payload, &ReadOptions::default()).unwrap();
    assert_eq!(doc.root_name.as_deref(), Some("foo"));
    match &doc.root {
        Value::Compound(c) => assert_eq!(c["bar"], Value::Int(127)),
        other => panic!("expected compound root, got {:?}", other),
    }
}

#[test]
fn gzip_detected_and_decodes_identically() {
    let plain = read(&EMPTY_COMPOUND, &ReadOptions::default()).unwrap();
    let doc = read(gzip(&EMPTY_COMPOUND), &ReadOptions::default()).unwrap();

    assert_eq!(doc.compression, Compression::Gzip);
    assert_eq!(doc.root, plain.root);
    assert_eq!(doc.root_name, plain.root_name);
    assert_eq!(doc.endian, Endian::Big);
}

#[test]
fn zlib_detected() {
    let payload = Builder::new()
        .start_compound("")
        .int("n", 99)
        .end_compound()
        .build();

    let doc = read(zlib(&payload), &ReadOptions::default()).unwrap();
    assert_eq!(doc.compression, Compression::Zlib);
    match &doc.root {
        Value::Compound(c) => assert_eq!(c["n"], Value::Int(99)),
        other => panic!("expected compound root, got {:?}", other),
    }
}

#[test]
fn raw_deflate_found_by_trial() {
    let payload = Builder::new()
        .start_compound("")
        .string("k", "v")
        .end_compound()
        .build();

    let doc = read(raw_deflate(&payload), &ReadOptions::default()).unwrap();
    assert_eq!(doc.compression, Compression::RawDeflate);
    match &doc.root {
        Value::Compound(c) => assert_eq!(c["k"], Value::String("v".to_owned())),
        other => panic!("expected compound root, got {:?}", other),
    }
}

#[test]
fn wrong_compression_hint_fails() {
    assert!(read(
        &EMPTY_COMPOUND,
        &ReadOptions {
            compression: Some(Compression::Gzip),
            ..ReadOptions::default()
        },
    )
    .is_err());
}

#[test]
fn little_endian_detected() {
    let payload = Builder::little()
        .start_compound("foo")
        .int("n", 5)
        .end_compound()
        .build();

    let doc = read(&payload, &ReadOptions::default()).unwrap();
    assert_eq!(doc.endian, Endian::Little);
    assert_eq!(doc.root_name.as_deref(), Some("foo"));
    match &doc.root {
        Value::Compound(c) => assert_eq!(c["n"], Value::Int(5)),
        other => panic!("expected compound root, got {:?}", other),
    }
}

#[test]
fn varint_dialect_and_nameless_root_detected() {
    // A network-style stream: nameless root, varint ints and lengths.
    let payload = Builder::varint()
        .tag(crate::Tag::Compound)
        .long("answer", -4)
        .end_compound()
        .build();

    let doc = read(&payload, &ReadOptions::default()).unwrap();
    assert_eq!(doc.endian, Endian::LittleVarint);
    assert_eq!(doc.root_name, None);
    match &doc.root {
        Value::Compound(c) => assert_eq!(c["answer"], Value::Long(-4)),
        other => panic!("expected compound root, got {:?}", other),
    }
}

#[test]
fn bedrock_level_header_detected() {
    let mut payload = vec![0x00, 0x00, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00];
    payload.extend_from_slice(&EMPTY_COMPOUND);

    let doc = read(&payload, &ReadOptions::default()).unwrap();
    assert!(doc.bedrock_level);
    assert_eq!(doc.endian, Endian::Little);
    assert_eq!(doc.root_name.as_deref(), Some(""));
    assert_eq!(doc.bytes_read, payload.len());
    match &doc.root {
        Value::Compound(c) => assert!(c.is_empty()),
        other => panic!("expected compound root, got {:?}", other),
    }
}

#[test]
fn bedrock_level_hinted_off_fails_on_header_bytes() {
    let mut payload = vec![0x00, 0x00, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00];
    payload.extend_from_slice(&EMPTY_COMPOUND);

    let err = read(
        &payload,
        &ReadOptions {
            endian: Some(Endian::Little),
            bedrock_level: Some(false),
            ..ReadOptions::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidOpeningTag));
}

#[test]
fn root_list_collapses_like_any_list() {
    // LIST "" of BYTE, length 3.
    let payload = [
        0x09, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x03, 0x01, 0x02, 0x03,
    ];

    let doc = read(&payload, &ReadOptions::default()).unwrap();
    assert_eq!(doc.root_name.as_deref(), Some(""));
    assert_eq!(doc.root, Value::ByteArray(vec![1, 2, 3]));
}

#[test]
fn exact_root_name() {
    let payload = Builder::new()
        .start_compound("foo")
        .byte("bar", 1)
        .end_compound()
        .build();

    let matching = ReadOptions {
        root_name: Some(RootName::Exact("foo".to_owned())),
        ..ReadOptions::default()
    };
    let doc = read(&payload, &matching).unwrap();
    assert_eq!(doc.root_name.as_deref(), Some("foo"));

    let mismatched = ReadOptions {
        root_name: Some(RootName::Exact("bar".to_owned())),
        ..ReadOptions::default()
    };
    let err = read(&payload, &mismatched).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::UnexpectedRootName));
}

#[test]
fn strict_mode_rejects_trailing_bytes() {
    let mut payload = EMPTY_COMPOUND.to_vec();
    payload.push(0xff);

    let err = read(&payload, &ReadOptions::default()).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::UnexpectedEndTag));
}

#[test]
fn lenient_mode_reports_the_offset_reached() {
    let mut payload = EMPTY_COMPOUND.to_vec();
    payload.push(0xff);

    let doc = read(
        &payload,
        &ReadOptions {
            strict: false,
            ..ReadOptions::default()
        },
    )
    .unwrap();
    assert_eq!(doc.bytes_read, payload.len() - 1);
}

#[test]
fn empty_input() {
    let data: [u8; 0] = [];
    let err = read(&data, &ReadOptions::default()).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::UnexpectedEof));
}

#[test]
fn end_tag_at_root() {
    let err = read(&[0x00], &ReadOptions::default()).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidOpeningTag));
}

#[test]
fn scalar_at_root() {
    // BYTE "" = 1 is not an acceptable root.
    let payload = Builder::new().byte("", 1).build();

    let err = read(
        &payload,
        &ReadOptions {
            endian: Some(Endian::Big),
            compression: Some(Compression::None),
            root_name: Some(RootName::Named),
            ..ReadOptions::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidOpeningTag));
}

#[test]
fn first_error_on_an_axis_is_reported() {
    // Unreadable in every dialect; the diagnostic should come from the
    // first trial (big-endian, named), which runs out of input reading the
    // root name.
    let payload = [0x0a, 0xff, 0xff];

    let err = read(&payload, &ReadOptions::default()).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::UnexpectedEof));
}

#[test]
fn read_from_a_reader() {
    let payload = Builder::new()
        .start_compound("")
        .int("n", 7)
        .end_compound()
        .build();

    let doc = read_from(&payload[..], &ReadOptions::default()).unwrap();
    match &doc.root {
        Value::Compound(c) => assert_eq!(c["n"], Value::Int(7)),
        other => panic!("expected compound root, got {:?}", other),
    }
}

#[test]
fn gzipped_little_endian_bedrock_file() {
    // All the axes at once: gzip over a level header over little-endian NBT.
    let inner = Builder::little()
        .start_compound("")
        .long("seed", -42)
        .end_compound()
        .build();
    let mut payload = vec![0x09, 0x00, 0x00, 0x00];
    payload.extend_from_slice(&(inner.len() as u32).to_le_bytes());
    payload.extend_from_slice(&inner);

    let doc = read(gzip(&payload), &ReadOptions::default()).unwrap();
    assert_eq!(doc.compression, Compression::Gzip);
    assert_eq!(doc.endian, Endian::Little);
    assert!(doc.bedrock_level);
    match &doc.root {
        Value::Compound(c) => assert_eq!(c["seed"], Value::Long(-42)),
        other => panic!("expected compound root, got {:?}", other),
    }
}
