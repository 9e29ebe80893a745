//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

//! Walking of the tagged CBOR-as-JSON blobs the indexer returns for
//! component state. Binary values appear as `{"@@TAGGED@@": [tag, value]}`
//! pairs; the walker unwraps these transparently so callers can address
//! fields with simple `$.a.b` paths.

use serde_json::Value;

use crate::{error::DecodeError, ResourceAddress, VaultId};

const TAGGED_KEY: &str = "@@TAGGED@@";

/// Resolves a `$.a.b` style path against a state blob, descending through
/// tagged wrappers. Returns `None` when any path segment is absent.
pub fn get_value_by_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = untag(value);
    for segment in path.split('.') {
        if segment == "$" {
            continue;
        }
        current = untag(current.get(segment)?);
    }
    Some(current)
}

fn untag(value: &Value) -> &Value {
    value
        .get(TAGGED_KEY)
        .and_then(|tagged| tagged.get(1))
        .map(untag)
        .unwrap_or(value)
}

/// Extracts the byte array carried by a tagged value. Position 0 is the
/// binary tag, position 1 the bytes.
pub fn extract_tagged_bytes(value: &Value) -> Result<Vec<u8>, DecodeError> {
    let tagged = value
        .get(TAGGED_KEY)
        .and_then(Value::as_array)
        .ok_or_else(|| DecodeError::MissingField {
            context: "tagged value",
            field: TAGGED_KEY.to_string(),
        })?;
    let bytes = tagged.get(1).and_then(Value::as_array).ok_or_else(|| {
        DecodeError::UnexpectedShape {
            context: "tagged value",
            details: "expected [tag, bytes] pair".to_string(),
        }
    })?;
    bytes
        .iter()
        .map(|b| {
            b.as_u64()
                .and_then(|b| u8::try_from(b).ok())
                .ok_or_else(|| DecodeError::UnexpectedShape {
                    context: "tagged value",
                    details: format!("expected a byte, got {}", b),
                })
        })
        .collect()
}

fn tagged_bytes_to_array(value: &Value, context: &'static str) -> Result<[u8; 32], DecodeError> {
    let bytes = extract_tagged_bytes(value)?;
    <[u8; 32]>::try_from(bytes).map_err(|bytes| DecodeError::UnexpectedShape {
        context,
        details: format!("expected 32 bytes, got {}", bytes.len()),
    })
}

pub fn decode_vault_id(value: &Value) -> Result<VaultId, DecodeError> {
    tagged_bytes_to_array(value, "vault id").map(VaultId::from_array)
}

pub fn decode_resource_address(value: &Value) -> Result<ResourceAddress, DecodeError> {
    tagged_bytes_to_array(value, "resource address").map(ResourceAddress::from_array)
}
