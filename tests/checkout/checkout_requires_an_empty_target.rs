use crate::common::HELLO_WORLD_BLOB;
use crate::common::command::{committed_repository_dir, run_kit_command};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn checkout_into_a_non_empty_directory_fails(committed_repository_dir: TempDir) {
    let target = committed_repository_dir.child("occupied");
    target
        .child("keep.txt")
        .write_str("mine")
        .expect("Failed to write file");

    run_kit_command(
        committed_repository_dir.path(),
        &["checkout", "HEAD", "occupied"],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("is not empty"));

    target.child("keep.txt").assert("mine");
    target.child("testfile").assert(predicate::path::missing());
}

#[rstest]
fn checkout_of_a_blob_fails(committed_repository_dir: TempDir) {
    run_kit_command(
        committed_repository_dir.path(),
        &["checkout", HELLO_WORLD_BLOB, "out"],
    )
    .assert()
    .failure();

    committed_repository_dir
        .child("out")
        .assert(predicate::path::missing());
}

#[rstest]
fn checkout_of_an_unknown_revision_fails(committed_repository_dir: TempDir) {
    run_kit_command(
        committed_repository_dir.path(),
        &["checkout", "nope", "out"],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("ambiguous argument 'nope'"));
}
