//! Object identifier (SHA-1 content address)
//!
//! Object IDs are 40-character lowercase hexadecimal strings representing SHA-1 hashes
//! of an object's canonical encoding.
//!
//! ## Format
//!
//! - Full: 40 hex characters (e.g., "557db03de997c86a4a028e1ebd3a1ceb225be238")
//! - Abbreviated: any prefix of at least 4 characters (e.g., "557d")
//!
//! ## Storage
//!
//! Objects are stored in `.git/objects/<first-2-chars>/<remaining-38-chars>`

use crate::artifacts::objects::{OBJECT_ID_BYTES, OBJECT_ID_LENGTH};
use crate::errors::{Error, Result};
use std::io;
use std::path::PathBuf;

/// Content address of a stored object
///
/// Always holds exactly 40 lowercase hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from a string
    ///
    /// Uppercase hex digits are accepted and normalized to lowercase.
    pub fn try_parse(id: String) -> Result<Self> {
        if !Self::is_full_hex(&id) {
            return Err(Error::malformed(format!("invalid object id {id:?}")));
        }
        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Whether `text` has the shape of a full address (40 hex characters)
    pub fn is_full_hex(text: &str) -> bool {
        text.len() == OBJECT_ID_LENGTH && is_hex(text)
    }

    /// Write the object ID in binary format (20 bytes)
    ///
    /// Used when serializing tree entries.
    pub fn write_h40_to<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        let hex40 = self.as_ref();

        for i in (0..OBJECT_ID_LENGTH).step_by(2) {
            let byte = u8::from_str_radix(&hex40[i..i + 2], 16)
                .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "Invalid hex digit"))?;
            writer.write_all(&[byte])?;
        }

        Ok(())
    }

    /// Read an object ID from binary format (20 bytes)
    ///
    /// A short read means the tree payload was truncated.
    pub fn read_h40_from<R: io::Read + ?Sized>(reader: &mut R) -> Result<Self> {
        let mut raw = [0; OBJECT_ID_BYTES];
        reader
            .read_exact(&mut raw)
            .map_err(|_| Error::malformed("unexpected end of data in object id"))?;

        Ok(Self::from_digest(&raw))
    }

    /// Build an object ID from a raw 20-byte digest
    pub(crate) fn from_digest(digest: &[u8]) -> Self {
        Self(digest.iter().map(|byte| format!("{byte:02x}")).collect())
    }

    /// Convert to file system path for object storage
    ///
    /// Splits the hash as `XX/YYYYYY...` where XX is the first 2 chars.
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2);
        PathBuf::from(dir).join(file)
    }

    /// First 7 characters of the hash
    pub fn to_short_oid(&self) -> String {
        self.0.split_at(7).0.to_string()
    }
}

pub(crate) fn is_hex(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_hexdigit())
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
