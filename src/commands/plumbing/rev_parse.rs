use crate::areas::repository::Repository;

impl Repository {
    pub fn rev_parse(&self, revision: &str) -> anyhow::Result<()> {
        let object_id = self.find_object(revision)?;

        writeln!(self.writer(), "{object_id}")?;

        Ok(())
    }
}
