use crate::common::command::{
    committed_repository_dir, init_repository_dir, kit_mktree, kit_stdout, run_git_command,
    run_kit_command,
};
use crate::common::{HELLO_WORLD_BLOB, HELLO_WORLD_TREE};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn mktree_builds_the_well_known_tree(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = committed_repository_dir.path();

    let tree = kit_mktree(dir, &format!("100644 blob {HELLO_WORLD_BLOB}\ttestfile\n"));

    pretty_assertions::assert_eq!(tree, HELLO_WORLD_TREE);
    pretty_assertions::assert_eq!(kit_stdout(dir, &["cat-file", "-s", &tree]), "36");
    pretty_assertions::assert_eq!(kit_stdout(dir, &["cat-file", "-t", &tree]), "tree");

    Ok(())
}

#[rstest]
fn printed_tree_reproduces_its_input(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    init_repository_dir.child("testfile").write_str("Hello World\n")?;
    init_repository_dir
        .child("run.sh")
        .write_str("#!/bin/sh\necho hi\n")?;
    let hello = kit_stdout(dir, &["hash-object", "-w", "testfile"]);
    let script = kit_stdout(dir, &["hash-object", "-w", "run.sh"]);
    let bin = kit_mktree(dir, &format!("100755 blob {script}\trun.sh\n"));
    let input = format!("040000 tree {bin}\tbin\n100644 blob {hello}\ttestfile\n");

    let tree = kit_mktree(dir, &input);

    pretty_assertions::assert_eq!(tree, "27ae54241e0c51e833886ac1bc78c4ce2cdd43aa");
    run_kit_command(dir, &["cat-file", "-p", &tree])
        .assert()
        .success()
        .stdout(input.clone());
    run_git_command(dir, &["cat-file", "-p", &tree])
        .assert()
        .success()
        .stdout(input);

    Ok(())
}

#[rstest]
fn mktree_sorts_unsorted_input(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = committed_repository_dir.path();
    let input = format!(
        "100644 blob {HELLO_WORLD_BLOB}\tzeta\n100644 blob {HELLO_WORLD_BLOB}\talpha\n"
    );

    let tree = kit_mktree(dir, &input);

    run_kit_command(dir, &["cat-file", "-p", &tree])
        .assert()
        .success()
        .stdout(format!(
            "100644 blob {HELLO_WORLD_BLOB}\talpha\n100644 blob {HELLO_WORLD_BLOB}\tzeta\n"
        ));

    Ok(())
}

#[rstest]
#[case::git_order("100644 blob {blob}\ta.txt\n040000 tree {tree}\ta\n")]
#[case::name_order("040000 tree {tree}\ta\n100644 blob {blob}\ta.txt\n")]
fn mktree_orders_directories_like_git(
    init_repository_dir: TempDir,
    #[case] template: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    init_repository_dir.child("a.txt").write_str("a\n")?;
    let blob = kit_stdout(dir, &["hash-object", "-w", "a.txt"]);
    let subtree = kit_mktree(dir, &format!("100644 blob {blob}\tx\n"));
    let input = template
        .replace("{blob}", &blob)
        .replace("{tree}", &subtree);

    let tree = kit_mktree(dir, &input);

    pretty_assertions::assert_eq!(tree, "e0f823b310d73097690da77cdb53411c050ce053");
    let expected = format!("100644 blob {blob}\ta.txt\n040000 tree {subtree}\ta\n");
    run_kit_command(dir, &["cat-file", "-p", &tree])
        .assert()
        .success()
        .stdout(expected.clone());
    run_git_command(dir, &["cat-file", "-p", &tree])
        .assert()
        .success()
        .stdout(expected);

    Ok(())
}

#[rstest]
fn mktree_rejects_dangling_entries(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_kit_command(init_repository_dir.path(), &["mktree"])
        .write_stdin(format!("100644 blob {HELLO_WORLD_BLOB}\ttestfile\n"))
        .assert()
        .failure()
        .stderr(predicate::str::contains(format!("not found: {HELLO_WORLD_BLOB}")));

    Ok(())
}

#[rstest]
#[case("644 blob {oid}\ttestfile\n")]
#[case("100644 tree {oid}\ttestfile\n")]
#[case("100644 blob {oid} testfile\n")]
fn mktree_rejects_malformed_lines(committed_repository_dir: TempDir, #[case] template: &str) {
    let input = template.replace("{oid}", HELLO_WORLD_BLOB);

    run_kit_command(committed_repository_dir.path(), &["mktree"])
        .write_stdin(input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed object"));
}
