use crate::areas::repository::Repository;
use crate::artifacts::revision::ref_name::RefName;

impl Repository {
    /// Point `name` at whatever `revision` resolves to
    pub fn update_ref(&self, name: &str, revision: &str) -> anyhow::Result<()> {
        let ref_name = RefName::try_parse(name.to_string())?;
        let object_id = self.find_object(revision)?;

        self.refs().update_ref(&ref_name, &object_id)?;

        Ok(())
    }
}
