//! Object identifier (content hash)
//!
//! Object ids are the SHA-1 digest of a serialized object, rendered as 32
//! characters of base32 (`0-9a-v`). 20 digest bytes are exactly 160 bits,
//! which is exactly 32 five-bit symbols, so there is never any padding.
//!
//! ## Storage
//!
//! Objects are stored in `.rowbit/objects/<first-2-chars>/<remaining-30-chars>`

use crate::artifacts::objects::{OBJECT_ID_ALPHABET, OBJECT_ID_LENGTH};
use std::path::PathBuf;

/// Content hash of a stored object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object id from its 32-character text form.
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(anyhow::anyhow!("Invalid object ID length: {}", id.len()));
        }
        if !id.bytes().all(|c| OBJECT_ID_ALPHABET.contains(&c)) {
            return Err(anyhow::anyhow!("Invalid object ID characters: {}", id));
        }
        Ok(Self(id))
    }

    /// Encode a raw SHA-1 digest.
    pub fn from_digest(digest: &[u8; 20]) -> Self {
        let mut encoded = String::with_capacity(OBJECT_ID_LENGTH);
        let mut buffer: u64 = 0;
        let mut bits = 0;

        for byte in digest {
            buffer = (buffer << 8) | u64::from(*byte);
            bits += 8;
            while bits >= 5 {
                bits -= 5;
                let index = ((buffer >> bits) & 0x1f) as usize;
                encoded.push(OBJECT_ID_ALPHABET[index] as char);
            }
        }

        ObjectId(encoded)
    }

    /// Whether the string has the shape of a full object id.
    pub fn looks_like_oid(candidate: &str) -> bool {
        candidate.len() == OBJECT_ID_LENGTH
            && candidate.bytes().all(|c| OBJECT_ID_ALPHABET.contains(&c))
    }

    /// Splits the hash as `XX/YYYY...` for object storage.
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2);
        PathBuf::from(dir).join(file)
    }

    /// First 8 characters of the hash.
    pub fn to_short_oid(&self) -> String {
        self.0.split_at(8).0.to_string()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
