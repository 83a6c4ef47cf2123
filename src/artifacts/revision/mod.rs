//! Revision parsing and resolution
//!
//! - `ref_name`: validated ref names
//! - `revision`: turning user text (`HEAD`, hashes, hash prefixes, ref names) into an object ID

pub mod ref_name;
pub mod revision;

pub const INVALID_REF_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";
pub const REF_ALIASES: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "@" => "HEAD",
};
/// Shortest hex prefix tried as an abbreviated object ID
pub const MIN_ABBREV_LENGTH: usize = 4;
