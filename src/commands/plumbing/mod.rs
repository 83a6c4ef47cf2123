//! Plumbing commands (low-level Git operations)
//!
//! ## Commands
//!
//! - `cat-file`: Print the type, size or content of an object
//! - `commit-tree`: Create a commit object from a tree
//! - `hash-object`: Compute object ID and optionally store in database
//! - `ls-tree`: List contents of a tree object
//! - `mktree`: Build a tree object from its text form
//! - `rev-parse`: Resolve a revision to an object ID
//! - `show-ref`: List references
//! - `update-ref`: Point a reference at an object

pub mod cat_file;
pub mod commit_tree;
pub mod hash_object;
pub mod ls_tree;
pub mod mktree;
pub mod rev_parse;
pub mod show_ref;
pub mod update_ref;
