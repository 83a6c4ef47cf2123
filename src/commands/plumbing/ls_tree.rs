use crate::areas::repository::Repository;
use crate::artifacts::objects::tree::Tree;

impl Repository {
    /// Print a tree (or a commit's tree); `recursive` descends into subtrees
    /// and prints blobs with their full paths
    pub fn ls_tree(&self, revision: &str, recursive: bool) -> anyhow::Result<()> {
        let tree = self.find_tree(revision)?;

        self.print_tree(&tree, "", recursive)
    }

    fn print_tree(&self, tree: &Tree, prefix: &str, recursive: bool) -> anyhow::Result<()> {
        for entry in tree.entries() {
            let path = format!("{prefix}{}", entry.name());

            if recursive && entry.is_tree() {
                let subtree = self
                    .database()
                    .parse_object_as_tree(entry.oid())?
                    .ok_or_else(|| anyhow::anyhow!("object {} is not a tree", entry.oid()))?;
                self.print_tree(&subtree, &format!("{path}/"), recursive)?;
            } else {
                writeln!(self.writer(), "{}", entry.display_as(&path))?;
            }
        }

        Ok(())
    }
}
