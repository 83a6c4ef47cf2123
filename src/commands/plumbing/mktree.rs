use crate::areas::repository::Repository;
use crate::artifacts::objects::tree::Tree;

impl Repository {
    /// Build and store a tree from `<mode> <type> <sha1>\t<name>` lines
    pub fn mktree(&self, input: &str) -> anyhow::Result<()> {
        let tree = Tree::from_listing(input, self.database())?;
        let tree_id = self.database().store(&tree)?;

        writeln!(self.writer(), "{tree_id}")?;

        Ok(())
    }
}
