// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use alloy_primitives::B256;

use crate::error::{CompressionError, DecodeError, DecodeKind, ExecutionError};
use crate::proof::VerificationReport;
use crate::verdict::Verdict;
use crate::verify::{request_digest, request_fingerprint};

#[test]
fn test_report_json_shape() {
    let report = VerificationReport::from_verdict(&Verdict::DecodeFailure(DecodeError::Compression(
        CompressionError::Empty,
    )));
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["verdict"], "decode_failure");
    assert_eq!(json["decodeKind"], "compression");
    assert_eq!(json["reason"], "invalid compression: compressed payload is empty");
    assert!(json.get("claimedRoot").is_none());
    assert!(json.get("requestDigest").is_none());
}

#[test]
fn test_report_roots() {
    let claimed = B256::repeat_byte(0x01);
    let computed = B256::repeat_byte(0x02);
    let report = VerificationReport::from_verdict(&Verdict::RootMismatch { claimed, computed });
    assert_eq!(report.claimed_root, Some(claimed));
    assert_eq!(report.computed_root, Some(computed));
    assert!(!report.is_accepted());

    let accepted = VerificationReport::from_verdict(&Verdict::Accepted { state_root: computed });
    assert!(accepted.is_accepted());
    assert!(accepted.reason.is_none());

    let failed = VerificationReport::from_verdict(&Verdict::ExecutionFailure(ExecutionError::new("boom")));
    assert_eq!(failed.reason.as_deref(), Some("execution failed: boom"));
    assert_eq!(failed.decode_kind, None::<DecodeKind>);
}

#[test]
fn test_report_roundtrip_with_digest() {
    let raw = b"request bytes";
    let report = VerificationReport::from_verdict(&Verdict::Accepted { state_root: B256::ZERO }).with_request(raw);
    assert_eq!(report.request_digest, Some(B256::from(request_digest(raw))));

    let json = serde_json::to_string(&report).unwrap();
    let back: VerificationReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back, report);
}

#[test]
fn test_fingerprint() {
    let fp = request_fingerprint(b"abc");
    assert_eq!(fp.len(), 16);
    assert_eq!(fp, request_fingerprint(b"abc"));
    assert_ne!(fp, request_fingerprint(b"abd"));
}
