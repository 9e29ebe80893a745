//   Copyright 2024 The Tari Project
//   SPDX-License-Identifier: BSD-3-Clause

use serde::{Deserialize, Serialize};

/// One key/value pair of NFT metadata as supplied by the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataField {
    pub key: String,
    pub value: String,
}

/// Ordered NFT metadata. Insertion order is preserved so the encoded form is
/// stable for identical input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata(Vec<(String, String)>);

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) -> &mut Self {
        self.0.push((key.into(), value.into()));
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, String)> {
        self.0.iter()
    }
}

impl FromIterator<MetadataField> for Metadata {
    fn from_iter<I: IntoIterator<Item = MetadataField>>(iter: I) -> Self {
        let mut metadata = Metadata::new();
        for field in iter {
            metadata.insert(field.key, field.value);
        }
        metadata
    }
}

/// CBOR-encodes metadata for inclusion as a mint argument.
pub fn encode_metadata(fields: &[MetadataField]) -> Result<Vec<u8>, MetadataError> {
    let metadata: Metadata = fields.iter().cloned().collect();
    let mut encoded = Vec::new();
    ciborium::into_writer(&metadata, &mut encoded)?;
    Ok(encoded)
}

#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("Failed to encode metadata: {0}")]
    Encode(#[from] ciborium::ser::Error<std::io::Error>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_is_deterministic_and_order_preserving() {
        let fields = vec![
            MetadataField {
                key: "name".to_string(),
                value: "Ape #1".to_string(),
            },
            MetadataField {
                key: "image_url".to_string(),
                value: "https://example.com/1.png".to_string(),
            },
        ];
        let a = encode_metadata(&fields).unwrap();
        let b = encode_metadata(&fields).unwrap();
        assert_eq!(a, b);
        assert!(!a.is_empty());

        let reversed: Vec<_> = fields.iter().rev().cloned().collect();
        assert_ne!(encode_metadata(&reversed).unwrap(), a);
    }
}
