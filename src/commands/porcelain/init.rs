use crate::areas::repository::Repository;
use anyhow::Context;
use std::path::Path;

impl Repository {
    /// Create a repository at `path` and report where its metadata lives
    pub fn init(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let repository = Repository::create(path, writer)
            .with_context(|| format!("Failed to initialize repository at {}", path.display()))?;

        writeln!(
            repository.writer(),
            "Initialized empty Git repository in {}/",
            repository.git_path().display()
        )?;

        Ok(repository)
    }
}
