//! Git data structures and algorithms
//!
//! - `objects`: Git object types (blob, tree, commit) and their encodings
//! - `revision`: Ref names and revision resolution

pub mod objects;
pub mod revision;
