use anyhow::{Context, Result};
use clap::{ArgGroup, Parser, Subcommand, ValueEnum};
use kit::areas::repository::Repository;
use kit::artifacts::objects::object_type::ObjectType;
use kit::commands::plumbing::cat_file::CatFileMode;
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "kit",
    version = "0.1.0",
    about = "A git-compatible object store",
    long_about = "Stores blobs, trees and commits in git's loose object format, \
    resolves revisions the way git does and checks trees out into empty directories.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ObjectKind {
    Blob,
    Tree,
    Commit,
}

impl From<ObjectKind> for ObjectType {
    fn from(kind: ObjectKind) -> Self {
        match kind {
            ObjectKind::Blob => ObjectType::Blob,
            ObjectKind::Tree => ObjectType::Tree,
            ObjectKind::Commit => ObjectType::Commit,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path. \
        The directory must be empty or missing."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<PathBuf>,
    },
    #[command(
        name = "cat-file",
        about = "Print the type, size or content of an object",
        group(ArgGroup::new("mode").required(true).args(["show_type", "size", "pretty"]))
    )]
    CatFile {
        #[arg(short = 't', help = "Print the object type")]
        show_type: bool,
        #[arg(short = 's', help = "Print the object size")]
        size: bool,
        #[arg(short = 'p', help = "Pretty-print the object content")]
        pretty: bool,
        #[arg(index = 1, help = "The object to print")]
        object: String,
    },
    #[command(
        name = "hash-object",
        about = "Hash an object and optionally write it to the object database",
        long_about = "This command hashes a file as an object of the given type and can write it to the object database."
    )]
    HashObject {
        #[arg(short, long, required = false, help = "Write the object to the object database")]
        write: bool,
        #[arg(short = 't', long = "type", value_enum, default_value = "blob", help = "The object type")]
        object_type: ObjectKind,
        #[arg(index = 1)]
        file: PathBuf,
    },
    #[command(
        name = "mktree",
        about = "Build a tree object from ls-tree formatted text on stdin"
    )]
    Mktree,
    #[command(
        name = "commit-tree",
        about = "Create a new commit object from a tree"
    )]
    CommitTree {
        #[arg(index = 1, help = "The tree to commit")]
        tree: String,
        #[arg(short, long, help = "The parent commit")]
        parent: Option<String>,
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "ls-tree",
        about = "List the contents of a tree object"
    )]
    LsTree {
        #[arg(short = 'r', help = "Recurse into subtrees")]
        recursive: bool,
        #[arg(index = 1, help = "The tree or commit to list")]
        tree_ish: String,
    },
    #[command(
        name = "rev-parse",
        about = "Resolve a revision to an object ID"
    )]
    RevParse {
        #[arg(index = 1)]
        revision: String,
    },
    #[command(
        name = "show-ref",
        about = "List references and the objects they point at"
    )]
    ShowRef {
        #[arg(long, help = "Include HEAD in the output")]
        head: bool,
        #[arg(index = 1, default_value = "", help = "Only list refs starting with this prefix")]
        prefix: String,
    },
    #[command(
        name = "update-ref",
        about = "Point a reference at an object"
    )]
    UpdateRef {
        #[arg(index = 1)]
        name: String,
        #[arg(index = 2)]
        revision: String,
    },
    #[command(
        name = "checkout",
        about = "Check a tree out into an empty directory"
    )]
    Checkout {
        #[arg(index = 1, help = "The tree or commit to check out")]
        tree_ish: String,
        #[arg(index = 2, help = "The directory to write into")]
        path: PathBuf,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn open_repository() -> Result<Repository> {
    let pwd = std::env::current_dir()?;

    Ok(Repository::locate(&pwd, Box::new(std::io::stdout()))?)
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Init { path } => {
            let path = match path {
                Some(path) => path.clone(),
                None => std::env::current_dir()?,
            };

            Repository::init(&path, Box::new(std::io::stdout()))?;
        }
        Commands::CatFile {
            show_type,
            size,
            pretty: _,
            object,
        } => {
            let mode = if *show_type {
                CatFileMode::Type
            } else if *size {
                CatFileMode::Size
            } else {
                CatFileMode::Pretty
            };

            open_repository()?.cat_file(object, mode)?
        }
        Commands::HashObject {
            write,
            object_type,
            file,
        } => open_repository()?.hash_object(file, (*object_type).into(), *write)?,
        Commands::Mktree => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("Unable to read tree entries from stdin")?;

            open_repository()?.mktree(&input)?
        }
        Commands::CommitTree {
            tree,
            parent,
            message,
        } => open_repository()?.commit_tree(tree, parent.as_deref(), message)?,
        Commands::LsTree {
            recursive,
            tree_ish,
        } => open_repository()?.ls_tree(tree_ish, *recursive)?,
        Commands::RevParse { revision } => open_repository()?.rev_parse(revision)?,
        Commands::ShowRef { head, prefix } => open_repository()?.show_ref(prefix, *head)?,
        Commands::UpdateRef { name, revision } => {
            open_repository()?.update_ref(name, revision)?
        }
        Commands::Checkout { tree_ish, path } => open_repository()?.checkout(tree_ish, path)?,
    }

    Ok(())
}
