use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Author, Commit};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;

impl Repository {
    /// Store a commit of `tree` with an optional parent and print its ID
    ///
    /// The author comes from the GIT_AUTHOR_* environment, falling back to
    /// the built-in identity.
    pub fn commit_tree(
        &self,
        tree: &str,
        parent: Option<&str>,
        message: &str,
    ) -> anyhow::Result<()> {
        let tree_oid = self.find_object_of_type(tree, ObjectType::Tree)?;
        let parents = parent
            .map(|parent| self.find_object_of_type(parent, ObjectType::Commit))
            .transpose()?
            .into_iter()
            .collect::<Vec<_>>();

        let mut message = message.to_string();
        if !message.ends_with('\n') {
            message.push('\n');
        }

        let commit = Commit::new(parents, tree_oid, Author::load_from_env(), message);
        let commit_id = self.database().store(&commit)?;

        writeln!(self.writer(), "{commit_id}")?;

        Ok(())
    }

    fn find_object_of_type(
        &self,
        revision: &str,
        expected: ObjectType,
    ) -> anyhow::Result<ObjectId> {
        let oid = self.find_object(revision)?;
        let actual = self.database().object_type(&oid)?;

        if actual != expected {
            anyhow::bail!("object {} is a {}, not a {}", oid.to_short_oid(), actual, expected);
        }

        Ok(oid)
    }
}
