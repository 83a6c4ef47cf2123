use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;

/// What `cat-file` prints about an object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatFileMode {
    /// `-t`: the object type
    Type,
    /// `-s`: the payload size in bytes
    Size,
    /// `-p`: the pretty-printed content
    Pretty,
}

impl Repository {
    pub fn cat_file(&self, revision: &str, mode: CatFileMode) -> anyhow::Result<()> {
        let object_id = self.find_object(revision)?;

        match mode {
            CatFileMode::Type => {
                let raw = self.database().load(&object_id)?;
                writeln!(self.writer(), "{}", raw.object_type())?;
            }
            CatFileMode::Size => {
                let raw = self.database().load(&object_id)?;
                writeln!(self.writer(), "{}", raw.payload().len())?;
            }
            CatFileMode::Pretty => {
                let object = self.database().parse_object(&object_id)?;
                self.writer().write_all(&object.display())?;
            }
        }

        Ok(())
    }
}
