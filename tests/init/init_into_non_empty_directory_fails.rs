use crate::common::command::{repository_dir, run_kit_command};
use crate::common::file::write_generated_files;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn init_into_non_empty_directory_fails(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    write_generated_files(repository_dir.path(), 2);

    run_kit_command(repository_dir.path(), &["init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not empty"));

    repository_dir
        .child(".git")
        .assert(predicate::path::missing());

    Ok(())
}
