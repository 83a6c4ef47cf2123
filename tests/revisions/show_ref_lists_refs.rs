use crate::common::HELLO_WORLD_COMMIT;
use crate::common::command::{
    committed_repository_dir, init_repository_dir, kit_stdout, run_kit_command,
};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn show_ref_lists_the_branch(committed_repository_dir: TempDir) {
    run_kit_command(committed_repository_dir.path(), &["show-ref"])
        .assert()
        .success()
        .stdout(format!("{HELLO_WORLD_COMMIT} refs/heads/master\n"));
}

#[rstest]
fn show_ref_with_head_lists_head_first(committed_repository_dir: TempDir) {
    run_kit_command(committed_repository_dir.path(), &["show-ref", "--head"])
        .assert()
        .success()
        .stdout(format!(
            "{HELLO_WORLD_COMMIT} HEAD\n{HELLO_WORLD_COMMIT} refs/heads/master\n"
        ));
}

#[rstest]
fn show_ref_filters_by_prefix(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir.path();
    run_kit_command(dir, &["update-ref", "refs/tags/v1.0", "HEAD"])
        .assert()
        .success();

    pretty_assertions::assert_eq!(
        kit_stdout(dir, &["show-ref", "refs/tags"]),
        format!("{HELLO_WORLD_COMMIT} refs/tags/v1.0")
    );
    pretty_assertions::assert_eq!(
        kit_stdout(dir, &["show-ref"]),
        format!("{HELLO_WORLD_COMMIT} refs/heads/master\n{HELLO_WORLD_COMMIT} refs/tags/v1.0")
    );
}

#[rstest]
fn show_ref_in_a_fresh_repository_is_empty(init_repository_dir: TempDir) {
    run_kit_command(init_repository_dir.path(), &["show-ref", "--head"])
        .assert()
        .success()
        .stdout("");
}
