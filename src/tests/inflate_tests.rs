// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::error::CompressionError;
use crate::inflate::{compress, inflate};

#[test]
fn test_compress_inflate() {
    let data = b"stateless block execution".repeat(64);
    let gz = compress(&data).unwrap();
    assert!(gz.len() < data.len());
    assert_eq!(inflate(&gz, data.len()).unwrap(), data);
}

#[test]
fn test_empty_payload() {
    assert_eq!(inflate(&[], 1024).unwrap_err(), CompressionError::Empty);
}

#[test]
fn test_not_gzip() {
    let err = inflate(&[0xde, 0xad, 0xbe, 0xef], 1024).unwrap_err();
    assert!(matches!(err, CompressionError::Stream(_)));
}

#[test]
fn test_truncated_stream() {
    let gz = compress(&[7u8; 4096]).unwrap();
    let err = inflate(&gz[..gz.len() / 2], 1 << 20).unwrap_err();
    assert!(matches!(err, CompressionError::Stream(_)));
}

#[test]
fn test_inflate_limit() {
    let data = vec![0u8; 10_000];
    let gz = compress(&data).unwrap();

    assert_eq!(inflate(&gz, 10_000).unwrap().len(), 10_000);
    assert_eq!(inflate(&gz, 9_999).unwrap_err(), CompressionError::TooLarge { limit: 9_999 });
}

#[test]
fn test_concatenated_members() {
    let mut gz = compress(b"first ").unwrap();
    gz.extend(compress(b"second").unwrap());
    assert_eq!(inflate(&gz, 1024).unwrap(), b"first second");
}

#[test]
fn test_missing_trailer_byte() {
    let data = b"stateless".repeat(32);
    let gz = compress(&data).unwrap();
    let err = inflate(&gz[..gz.len() - 1], 1 << 20).unwrap_err();
    assert!(matches!(err, CompressionError::Stream(_)));
}
