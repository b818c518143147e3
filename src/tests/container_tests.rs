// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use alloy_primitives::{Bytes, B256, U256};

use crate::config::DecodeLimits;
use crate::container::ContainerEnvelope;
use crate::error::ContainerError;

fn envelope() -> ContainerEnvelope {
    ContainerEnvelope::new(
        B256::repeat_byte(0x01),
        B256::repeat_byte(0x02),
        Bytes::from_static(b"payload"),
        21_000,
    )
}

#[test]
fn test_envelope_roundtrip() {
    let raw = envelope().encode_to_vec();
    let decoded = ContainerEnvelope::decode_bounded(&raw, &DecodeLimits::default()).unwrap();
    assert_eq!(decoded, envelope());

    let input = decoded.input().unwrap();
    assert_eq!(input.pre_state_root, B256::repeat_byte(0x01));
    assert_eq!(input.post_state_root, B256::repeat_byte(0x02));
    assert_eq!(input.gas_used, 21_000);
}

#[test]
fn test_trailing_bytes_rejected() {
    let mut raw = envelope().encode_to_vec();
    raw.extend_from_slice(&[0x00, 0x01]);
    let err = ContainerEnvelope::decode_bounded(&raw, &DecodeLimits::default()).unwrap_err();
    assert_eq!(err, ContainerError::TrailingBytes(2));
}

#[test]
fn test_truncated_envelope_rejected() {
    let raw = envelope().encode_to_vec();
    let err = ContainerEnvelope::decode_bounded(&raw[..raw.len() - 1], &DecodeLimits::default()).unwrap_err();
    assert!(matches!(err, ContainerError::Rlp(_)));
}

#[test]
fn test_not_a_list_rejected() {
    // A bare string, not a list.
    let err = ContainerEnvelope::decode_bounded(&[0x83, b'a', b'b', b'c'], &DecodeLimits::default()).unwrap_err();
    assert!(matches!(err, ContainerError::Rlp(_)));

    let err = ContainerEnvelope::decode_bounded(&[], &DecodeLimits::default()).unwrap_err();
    assert!(matches!(err, ContainerError::Rlp(_)));
}

#[test]
fn test_oversized_envelope_rejected() {
    let raw = envelope().encode_to_vec();
    let limits = DecodeLimits {
        max_envelope_bytes: raw.len() - 1,
        ..DecodeLimits::default()
    };
    let err = ContainerEnvelope::decode_bounded(&raw, &limits).unwrap_err();
    assert_eq!(err, ContainerError::TooLarge { len: raw.len(), max: raw.len() - 1 });
}

#[test]
fn test_gas_used_range() {
    let mut env = envelope();
    env.gas_used = U256::from(u64::MAX);
    assert_eq!(env.gas_used_u64().unwrap(), u64::MAX);

    env.gas_used = U256::from(u64::MAX) + U256::from(1u64);
    let raw = env.encode_to_vec();
    // The envelope itself still decodes; narrowing is what fails.
    let decoded = ContainerEnvelope::decode_bounded(&raw, &DecodeLimits::default()).unwrap();
    assert_eq!(decoded.input().unwrap_err(), ContainerError::GasUsedOverflow(env.gas_used));
}
