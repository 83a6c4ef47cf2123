#![allow(dead_code)]

pub mod command;
pub mod file;

pub const HELLO_WORLD_BLOB: &str = "557db03de997c86a4a028e1ebd3a1ceb225be238";
pub const HELLO_WORLD_TREE: &str = "e592dfe791dd1e1cf202668707a5cfac07a635b3";
/// `commit-tree` of [`HELLO_WORLD_TREE`] by [`command::kit_commit_tree`]'s fixed author
pub const HELLO_WORLD_COMMIT: &str = "0cc51ff5e70448ceb05035c5ef21a4433d6c94d6";
