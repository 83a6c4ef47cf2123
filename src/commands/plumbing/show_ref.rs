use crate::areas::repository::Repository;

impl Repository {
    /// Print `<sha1> <refname>` for every ref whose name starts with `prefix`
    pub fn show_ref(&self, prefix: &str, include_head: bool) -> anyhow::Result<()> {
        let refs = self.refs().get_refs(prefix, include_head)?;

        for reference in refs {
            writeln!(self.writer(), "{} {}", reference.oid(), reference.name())?;
        }

        Ok(())
    }
}
