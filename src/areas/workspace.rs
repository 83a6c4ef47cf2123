use crate::artifacts::objects::entry_mode::EntryMode;
use crate::errors::{IoContext, Result};
use std::io::Write;
use std::path::Path;

/// Directory a tree gets materialized into
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True when the root is missing or has no entries at all
    pub fn is_empty(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(true);
        }

        let mut entries = std::fs::read_dir(&self.path)
            .io_context(|| format!("Unable to list directory {}", self.path.display()))?;

        Ok(entries.next().is_none())
    }

    /// Create the root directory and any missing parents
    pub fn create_root(&self) -> Result<()> {
        std::fs::create_dir_all(&self.path)
            .io_context(|| format!("Unable to create directory {}", self.path.display()))
    }

    /// Create a single directory; it must not exist yet
    pub fn make_directory(&self, dir_path: &Path) -> Result<()> {
        let dir_path = self.path.join(dir_path);

        std::fs::create_dir(&dir_path)
            .io_context(|| format!("Unable to create directory {}", dir_path.display()))
    }

    /// Write `data` to a new file and apply the permission bits of `mode`
    pub fn write_file(&self, file_path: &Path, data: &[u8], mode: EntryMode) -> Result<()> {
        let path = self.path.join(file_path);

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .io_context(|| format!("Failed to open file: {}", path.display()))?;

        file.write_all(data)
            .io_context(|| format!("Failed to write to file: {}", path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(mode.permissions());
            std::fs::set_permissions(&path, permissions)
                .io_context(|| format!("Failed to set permissions for file: {}", path.display()))?;
        }
        #[cfg(not(unix))]
        let _ = mode;

        Ok(())
    }
}
