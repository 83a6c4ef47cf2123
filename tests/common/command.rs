use crate::common::file::{FileSpec, write_file};
use crate::common::{HELLO_WORLD_BLOB, HELLO_WORLD_TREE};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_kit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

/// Repository whose master branch (and HEAD) holds one commit of a single
/// `testfile` containing "Hello World\n"
#[fixture]
pub fn committed_repository_dir(init_repository_dir: TempDir) -> TempDir {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("testfile"), "Hello World\n".to_string()));

    let blob = kit_stdout(dir, &["hash-object", "-w", "testfile"]);
    assert_eq!(blob, HELLO_WORLD_BLOB);

    let tree = kit_mktree(dir, &format!("100644 blob {blob}\ttestfile\n"));
    assert_eq!(tree, HELLO_WORLD_TREE);

    let commit = kit_commit_tree(dir, &tree, None, "Initial commit");
    run_kit_command(dir, &["update-ref", "HEAD", &commit])
        .assert()
        .success();

    init_repository_dir
}

pub fn run_kit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("kit").expect("Failed to find kit binary");
    cmd.env_remove("RUST_LOG");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn run_git_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new("git");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

/// Run a command that must succeed and return its stdout without the trailing newline
pub fn kit_stdout(dir: &Path, args: &[&str]) -> String {
    let output = run_kit_command(dir, args).assert().success();
    let stdout = output.get_output().stdout.clone();

    String::from_utf8(stdout)
        .expect("stdout is not UTF-8")
        .trim_end_matches('\n')
        .to_string()
}

pub fn kit_mktree(dir: &Path, entries: &str) -> String {
    let output = run_kit_command(dir, &["mktree"])
        .write_stdin(entries.to_string())
        .assert()
        .success();
    let stdout = output.get_output().stdout.clone();

    String::from_utf8(stdout)
        .expect("stdout is not UTF-8")
        .trim_end()
        .to_string()
}

pub fn kit_commit_tree(dir: &Path, tree: &str, parent: Option<&str>, message: &str) -> String {
    let mut args = vec!["commit-tree", tree, "-m", message];
    if let Some(parent) = parent {
        args.extend(["-p", parent]);
    }

    let mut cmd = run_kit_command(dir, &args);
    cmd.envs(vec![
        ("GIT_AUTHOR_NAME", "fake_user"),
        ("GIT_AUTHOR_EMAIL", "fake_email@email.com"),
        ("GIT_AUTHOR_DATE", "2023-01-01 12:00:00 +0000"), // %Y-%m-%d %H:%M:%S %z
    ]);
    let output = cmd.assert().success();
    let stdout = output.get_output().stdout.clone();

    String::from_utf8(stdout)
        .expect("stdout is not UTF-8")
        .trim_end()
        .to_string()
}

#[derive(Debug, Clone)]
pub struct RandomAuthor {
    pub name: String,
    pub email: String,
}

pub fn generate_random_author() -> RandomAuthor {
    use fake::Fake;
    use fake::faker::internet::en::FreeEmail;
    use fake::faker::name::en::Name;

    RandomAuthor {
        name: Name().fake::<String>().replace(' ', "_"),
        email: FreeEmail().fake::<String>(),
    }
}
