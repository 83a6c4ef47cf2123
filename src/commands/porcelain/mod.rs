//! Porcelain commands
//!
//! - `init`: Create a new repository
//! - `checkout`: Write a tree out into an empty directory

pub mod checkout;
pub mod init;
