use crate::areas::database::Database;
use crate::areas::refs::{HEAD_REF_NAME, Refs};
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::object::ObjectBox;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use crate::artifacts::revision::revision::Revision;
use crate::errors::{Error, IoContext, Result};
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Name of the metadata directory marking a repository root
pub const GIT_DIR: &str = ".git";
pub const DEFAULT_BRANCH: &str = "master";

const DEFAULT_CONFIG: &str = "[core]\n\
    \trepositoryformatversion = 0\n\
    \tfilemode = true\n\
    \tbare = false\n";
const DEFAULT_DESCRIPTION: &str =
    "Unnamed repository; edit this file 'description' to name the repository.\n";

pub struct Repository {
    path: Box<Path>,
    git_path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    refs: Refs,
}

impl Repository {
    fn open(path: PathBuf, writer: Box<dyn std::io::Write>) -> Self {
        let git_path = path.join(GIT_DIR);

        Repository {
            database: Database::new(git_path.join("objects").into_boxed_path()),
            refs: Refs::new(git_path.clone().into_boxed_path()),
            path: path.into_boxed_path(),
            git_path: git_path.into_boxed_path(),
            writer: RefCell::new(writer),
        }
    }

    /// Walk up from `start` to the first directory holding a `.git` directory
    pub fn locate(start: &Path, writer: Box<dyn std::io::Write>) -> Result<Self> {
        let start = start
            .canonicalize()
            .io_context(|| format!("Unable to resolve path {}", start.display()))?;

        let root = start
            .ancestors()
            .find(|dir| dir.join(GIT_DIR).is_dir())
            .ok_or_else(|| Error::NotARepository(start.clone()))?;
        debug!(root = %root.display(), "located repository");

        Ok(Self::open(root.to_path_buf(), writer))
    }

    /// Create a repository rooted at `path`
    ///
    /// The directory may be missing or empty; anything else is refused.
    pub fn create(path: &Path, writer: Box<dyn std::io::Write>) -> Result<Self> {
        let workspace = Workspace::new(path.into());
        if !workspace.is_empty()? {
            return Err(Error::NonEmptyWorkTree(path.to_path_buf()));
        }
        workspace.create_root()?;

        let root = path
            .canonicalize()
            .io_context(|| format!("Unable to resolve path {}", path.display()))?;
        let repository = Self::open(root, writer);

        for dir in [
            repository.database.objects_path().to_path_buf(),
            repository.refs.heads_path(),
            repository.refs.tags_path(),
        ] {
            std::fs::create_dir_all(&dir)
                .io_context(|| format!("Failed to create {} directory", dir.display()))?;
        }

        repository
            .refs
            .set_symbolic_ref(HEAD_REF_NAME, &format!("refs/heads/{DEFAULT_BRANCH}"))?;
        repository.write_metadata_file("config", DEFAULT_CONFIG)?;
        repository.write_metadata_file("description", DEFAULT_DESCRIPTION)?;

        info!(path = %repository.git_path.display(), "created repository");

        Ok(repository)
    }

    fn write_metadata_file(&self, name: &str, content: &str) -> Result<()> {
        let path = self.git_file_path(name);

        std::fs::write(&path, content)
            .io_context(|| format!("Failed to write {}", path.display()))
    }

    /// Resolve a revision (`HEAD`, full or abbreviated hash, ref name) to an object ID
    pub fn find_object(&self, revision: &str) -> Result<ObjectId> {
        Revision::try_parse(revision)?.resolve(self)
    }

    /// Resolve a tree-ish: a tree, or a commit standing for its tree
    pub fn find_tree(&self, revision: &str) -> Result<Tree> {
        let oid = self.find_object(revision)?;

        match self.database.parse_object(&oid)? {
            ObjectBox::Tree(tree) => Ok(*tree),
            ObjectBox::Commit(commit) => self
                .database
                .parse_object_as_tree(commit.tree_oid())?
                .ok_or_else(|| Error::malformed(format!("{} is not a tree", commit.tree_oid()))),
            ObjectBox::Blob(_) => Err(Error::malformed(format!("{oid} is not a tree"))),
        }
    }

    /// Work tree root
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The `.git` directory
    pub fn git_path(&self) -> &Path {
        &self.git_path
    }

    pub fn git_file_path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.git_path.join(relative)
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }
}
