use crate::areas::repository::Repository;
use crate::areas::workspace::Workspace;
use crate::errors::Error;
use std::path::Path;

impl Repository {
    /// Write the tree behind `revision` (a tree or a commit) into `target`
    ///
    /// `target` must be missing or empty. A failure part way through leaves
    /// the files written so far in place.
    pub fn checkout(&self, revision: &str, target: &Path) -> anyhow::Result<()> {
        let tree = self.find_tree(revision)?;

        let workspace = Workspace::new(target.into());
        if !workspace.is_empty()? {
            return Err(Error::NonEmptyWorkTree(target.to_path_buf()).into());
        }
        workspace.create_root()?;

        tree.checkout(workspace.path(), self.database())?;

        Ok(())
    }
}
