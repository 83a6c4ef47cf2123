use crate::errors::{Error, Result};

const TYPE_MASK: u32 = 0o170000;
const DIRECTORY_TYPE: u32 = 0o040000;
const PERMISSION_MASK: u32 = 0o777;

/// File mode of a tree entry
///
/// Stored in trees as octal text without leading zeros (`100644`, `40000`)
/// and printed zero-padded to six digits (`040000`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryMode(u32);

impl EntryMode {
    pub const REGULAR: EntryMode = EntryMode(0o100644);
    pub const EXECUTABLE: EntryMode = EntryMode(0o100755);
    pub const DIRECTORY: EntryMode = EntryMode(0o040000);

    /// Parse the mode text found inside a tree payload
    ///
    /// The text must be 5 or 6 octal digits.
    pub fn from_octal_str(mode: &str) -> Result<Self> {
        if mode.len() != 5 && mode.len() != 6 {
            return Err(Error::malformed(format!("bad mode {mode}")));
        }

        u32::from_str_radix(mode, 8)
            .map(EntryMode)
            .map_err(|_| Error::malformed(format!("bad mode {mode}")))
    }

    /// Parse a possibly zero-padded mode from human supplied tree text
    pub fn from_padded_str(mode: &str) -> Result<Self> {
        Self::from_octal_str(mode.trim_start_matches('0'))
    }

    /// Mode as printed by `cat-file -p` and `ls-tree`
    pub fn to_padded_string(&self) -> String {
        format!("{:06o}", self.0)
    }

    pub fn is_tree(&self) -> bool {
        self.0 & TYPE_MASK == DIRECTORY_TYPE
    }

    /// Permission bits applied to checked out files
    pub fn permissions(&self) -> u32 {
        self.0 & PERMISSION_MASK
    }
}

impl std::fmt::Display for EntryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:o}", self.0)
    }
}
