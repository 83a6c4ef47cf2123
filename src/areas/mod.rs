//! Core repository components
//!
//! This module contains the stateful, filesystem-backed parts of a repository:
//!
//! - `database`: Object database for storing blobs, trees, and commits
//! - `refs`: Reference management (HEAD, branches, tags)
//! - `repository`: Repository discovery, creation and coordination
//! - `workspace`: Directory a tree is checked out into

pub mod database;
pub mod refs;
pub mod repository;
pub mod workspace;
