use crate::areas::repository::Repository;
use crate::artifacts::objects::object::{ObjectBox, RawObject};
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use std::path::Path;

impl Repository {
    /// Print the object ID `file` would have as an object of `object_type`,
    /// storing it when `write` is set
    ///
    /// Tree and commit payloads must parse before they are accepted.
    pub fn hash_object(
        &self,
        file: &Path,
        object_type: ObjectType,
        write: bool,
    ) -> anyhow::Result<()> {
        let data = std::fs::read(file)
            .with_context(|| format!("Unable to read file {}", file.display()))?;
        let raw = RawObject::new(object_type, data);

        if object_type != ObjectType::Blob {
            ObjectBox::from_raw(raw.clone(), self.database())?;
        }

        let object_id = if write {
            self.database().write(&raw)?
        } else {
            raw.object_id()
        };

        writeln!(self.writer(), "{object_id}")?;

        Ok(())
    }
}
