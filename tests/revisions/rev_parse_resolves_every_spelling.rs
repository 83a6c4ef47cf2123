use crate::common::HELLO_WORLD_COMMIT;
use crate::common::command::{
    committed_repository_dir, init_repository_dir, kit_stdout, run_kit_command,
};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
#[case("HEAD")]
#[case("@")]
#[case(HELLO_WORLD_COMMIT)]
#[case("0cc5")]
#[case("0CC51FF")]
#[case("master")]
#[case("heads/master")]
#[case("refs/heads/master")]
fn rev_parse_resolves_every_spelling(committed_repository_dir: TempDir, #[case] revision: &str) {
    pretty_assertions::assert_eq!(
        kit_stdout(committed_repository_dir.path(), &["rev-parse", revision]),
        HELLO_WORLD_COMMIT
    );
}

#[rstest]
#[case("0cc")]
#[case("FOO")]
#[case("0000")]
#[case("../config")]
fn unknown_revisions_are_ambiguous(committed_repository_dir: TempDir, #[case] revision: &str) {
    run_kit_command(committed_repository_dir.path(), &["rev-parse", revision])
        .assert()
        .failure()
        .stderr(predicate::str::contains(format!(
            "ambiguous argument '{revision}': unknown revision or path not in the working tree"
        )));
}

#[rstest]
fn missing_full_hash_is_not_found(committed_repository_dir: TempDir) {
    run_kit_command(
        committed_repository_dir.path(),
        &["rev-parse", "1111111111111111111111111111111111111111"],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("not found"));
}

#[rstest]
#[case("HEAD")]
#[case("@")]
fn unborn_head_is_ambiguous(init_repository_dir: TempDir, #[case] revision: &str) {
    run_kit_command(init_repository_dir.path(), &["rev-parse", revision])
        .assert()
        .failure()
        .stderr(predicate::str::contains(format!("ambiguous argument '{revision}'")));
}

#[rstest]
fn tags_resolve_by_short_name(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir.path();
    run_kit_command(dir, &["update-ref", "refs/tags/v1.0", "HEAD"])
        .assert()
        .success();

    pretty_assertions::assert_eq!(kit_stdout(dir, &["rev-parse", "v1.0"]), HELLO_WORLD_COMMIT);
    pretty_assertions::assert_eq!(
        kit_stdout(dir, &["rev-parse", "tags/v1.0"]),
        HELLO_WORLD_COMMIT
    );
}
