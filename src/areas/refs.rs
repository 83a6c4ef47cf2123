//! Git references (branches, HEAD, tags)
//!
//! References are human-readable names pointing to objects. A ref file holds
//! either a 40-character hash (direct) or `ref: <name>` (symbolic, e.g.
//! HEAD -> refs/heads/master).
//!
//! ## Layout
//!
//! - `.git/HEAD`
//! - `.git/refs/heads/<name>`
//! - `.git/refs/tags/<name>`
//!
//! Writes are plain file rewrites; nothing is locked, so a concurrent reader
//! may observe a half-written ref.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::revision::ref_name::RefName;
use crate::errors::{Error, IoContext, Result};
use derive_new::new;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

/// Longest chain of symbolic refs followed before giving up
pub const MAX_SYMREF_DEPTH: usize = 5;

/// Git references manager
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the metadata directory (typically `.git`)
    path: Box<Path>,
}

/// A ref name together with the object it currently points at
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Ref {
    name: String,
    oid: ObjectId,
}

impl Ref {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn oid(&self) -> &ObjectId {
        &self.oid
    }
}

/// Parsed content of a ref file
#[derive(Debug, Clone)]
enum SymRefOrOid {
    SymRef(String),
    Oid(ObjectId),
}

impl SymRefOrOid {
    fn read(path: &Path) -> Result<Option<SymRefOrOid>> {
        if !path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .io_context(|| format!("failed to read ref file at {}", path.display()))?;
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        let symref_regex = regex::Regex::new(SYMREF_REGEX)
            .map_err(|err| Error::malformed(format!("invalid symref regex: {err}")))?;
        if let Some(symref_match) = symref_regex.captures(content) {
            Ok(Some(SymRefOrOid::SymRef(symref_match[1].to_string())))
        } else {
            Ok(Some(SymRefOrOid::Oid(ObjectId::try_parse(
                content.to_string(),
            )?)))
        }
    }
}

impl Refs {
    /// Object HEAD points at, following symbolic refs; `None` while unborn
    pub fn read_head(&self) -> Result<Option<ObjectId>> {
        self.read_ref_file(&self.head_path())
    }

    /// Look `name` up as `refs/<name>`, `refs/heads/<name>`, `refs/tags/<name>`
    /// and finally `<name>` under the metadata directory
    ///
    /// The first candidate holding a readable hash wins. Candidates that are
    /// missing, unborn or unparsable are skipped.
    pub fn read_ref(&self, name: &RefName) -> Result<Option<ObjectId>> {
        for candidate in self.candidate_paths(name) {
            if !candidate.is_file() {
                continue;
            }

            match self.read_ref_file(&candidate) {
                Ok(Some(oid)) => {
                    debug!(name = %name, path = %candidate.display(), oid = %oid, "resolved ref");
                    return Ok(Some(oid));
                }
                Ok(None) => continue,
                Err(err) => {
                    debug!(name = %name, path = %candidate.display(), error = %err, "skipping unreadable ref");
                    continue;
                }
            }
        }

        Ok(None)
    }

    fn candidate_paths(&self, name: &RefName) -> [PathBuf; 4] {
        [
            self.refs_path().join(name.as_ref()),
            self.heads_path().join(name.as_ref()),
            self.tags_path().join(name.as_ref()),
            self.path.join(name.as_ref()),
        ]
    }

    /// Read a ref file, following symbolic refs
    fn read_ref_file(&self, path: &Path) -> Result<Option<ObjectId>> {
        let mut path = path.to_path_buf();

        for _ in 0..=MAX_SYMREF_DEPTH {
            match SymRefOrOid::read(&path)? {
                Some(SymRefOrOid::SymRef(target)) => path = self.path.join(target),
                Some(SymRefOrOid::Oid(oid)) => return Ok(Some(oid)),
                None => return Ok(None),
            }
        }

        Err(Error::malformed(format!(
            "symbolic ref chain at {} is too deep",
            path.display()
        )))
    }

    /// Follow symbolic refs starting at `path` to the file that holds a hash
    /// (or would hold one, for an unborn branch)
    fn resolve_ref_path(&self, path: PathBuf) -> Result<PathBuf> {
        let mut path = path;

        for _ in 0..=MAX_SYMREF_DEPTH {
            match SymRefOrOid::read(&path) {
                Ok(Some(SymRefOrOid::SymRef(target))) => path = self.path.join(target),
                _ => return Ok(path),
            }
        }

        Err(Error::malformed(format!(
            "symbolic ref chain at {} is too deep",
            path.display()
        )))
    }

    /// Point `name` (relative to the metadata directory) at `oid`
    ///
    /// A symbolic ref updates the ref it names, so `HEAD` moves the current
    /// branch.
    pub fn update_ref(&self, name: &RefName, oid: &ObjectId) -> Result<()> {
        let path = self.resolve_ref_path(self.path.join(name.as_ref()))?;

        self.write_ref_file(&path, format!("{oid}\n"))?;
        debug!(name = %name, path = %path.display(), oid = %oid, "updated ref");

        Ok(())
    }

    /// Make `name` a symbolic ref to `target`, e.g. HEAD -> refs/heads/master
    pub fn set_symbolic_ref(&self, name: &str, target: &str) -> Result<()> {
        self.write_ref_file(&self.path.join(name), format!("ref: {target}\n"))
    }

    fn write_ref_file(&self, path: &Path, content: String) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).io_context(|| {
                format!("failed to create parent directories for ref file at {}", path.display())
            })?;
        }

        std::fs::write(path, content)
            .io_context(|| format!("failed to write ref file at {}", path.display()))
    }

    /// All refs under `refs/` whose name starts with `prefix`, sorted by name
    ///
    /// With `include_head`, a resolvable HEAD is listed first as `HEAD`.
    /// Ref files that do not hold a hash are reported with `warn!` and left
    /// out; failing to walk the refs directory is an error.
    pub fn get_refs(&self, prefix: &str, include_head: bool) -> Result<Vec<Ref>> {
        let mut head = Vec::new();
        if include_head && let Some(oid) = self.read_head()? {
            head.push(Ref::new(HEAD_REF_NAME.to_string(), oid));
        }

        let refs_path = self.refs_path();
        if !refs_path.is_dir() {
            return Ok(head);
        }

        let mut refs = Vec::new();
        for entry in WalkDir::new(&refs_path) {
            let entry = entry
                .map_err(std::io::Error::from)
                .io_context(|| format!("failed to list refs under {}", refs_path.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let Some(name) = self.ref_name_of(entry.path()) else {
                warn!(path = %entry.path().display(), "ignoring ref with a non UTF-8 name");
                continue;
            };
            if !name.starts_with(prefix) {
                continue;
            }

            match self.read_ref_file(entry.path()) {
                Ok(Some(oid)) => refs.push(Ref::new(name, oid)),
                Ok(None) => debug!(name = %name, "skipping unborn ref"),
                Err(err) => warn!(name = %name, error = %err, "ignoring broken ref"),
            }
        }

        // full names, not per directory
        refs.sort_by(|a, b| a.name.cmp(&b.name));
        head.extend(refs);

        Ok(head)
    }

    /// Ref name of a file under the metadata directory, with `/` separators
    fn ref_name_of(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(self.path.as_ref()).ok()?;
        let components = relative
            .components()
            .map(|component| component.as_os_str().to_str())
            .collect::<Option<Vec<_>>>()?;

        Some(components.join("/"))
    }

    pub fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_REF_NAME)
    }

    pub fn refs_path(&self) -> PathBuf {
        self.path.join("refs")
    }

    pub fn heads_path(&self) -> PathBuf {
        self.refs_path().join("heads")
    }

    pub fn tags_path(&self) -> PathBuf {
        self.refs_path().join("tags")
    }
}
