//! A content-addressable object store and revision resolver compatible with
//! git's loose object format.

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
