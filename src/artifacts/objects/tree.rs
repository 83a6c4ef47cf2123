//! Tree object
//!
//! Trees represent directory snapshots. They contain entries for files (blobs)
//! and subdirectories (other trees), along with their names and modes.
//! Children are referenced by hash, so identical subtrees are shared.
//!
//! ## Format
//!
//! On disk: `tree <size>\0<entries>`
//! Each entry: `<mode> <name>\0<20-byte-sha1>`, with the mode written in
//! octal without leading zeros. Entries are sorted the way git sorts them:
//! by name bytes, with a subtree compared as if its name ended in `/`, so
//! `a.txt` comes before the directory `a`.
//!
//! ## Text form
//!
//! `cat-file -p`, `ls-tree` and `mktree` use one line per entry:
//! `<mode padded to 6 digits> <type> <sha1>\t<name>`

use crate::areas::database::Database;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::entry_mode::EntryMode;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{Error, Result};
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Cursor, Write};
use std::path::Path;
use tracing::debug;

/// One named child of a tree
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TreeEntry {
    mode: EntryMode,
    oid: ObjectId,
    /// Kind of the referenced object, looked up in the store
    object_type: ObjectType,
    name: String,
}

impl TreeEntry {
    pub fn mode(&self) -> EntryMode {
        self.mode
    }

    pub fn oid(&self) -> &ObjectId {
        &self.oid
    }

    pub fn object_type(&self) -> ObjectType {
        self.object_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_tree(&self) -> bool {
        self.object_type == ObjectType::Tree
    }

    /// Name bytes used for ordering, with `/` appended for directories
    fn sort_key(&self) -> impl Iterator<Item = u8> + '_ {
        self.name
            .bytes()
            .chain(self.mode.is_tree().then_some(b'/'))
    }

    /// Line printed by `cat-file -p` for this entry, without the newline
    pub fn display(&self) -> String {
        self.display_as(&self.name)
    }

    /// Same as [`TreeEntry::display`] but with a caller supplied path
    pub fn display_as(&self, path: &str) -> String {
        format!(
            "{} {} {}\t{}",
            self.mode.to_padded_string(),
            self.object_type,
            self.oid,
            path
        )
    }
}

/// A single directory level
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: Vec<TreeEntry>,
}

impl Tree {
    /// Build a tree, putting entries in git's canonical order
    pub fn new(mut entries: Vec<TreeEntry>) -> Self {
        entries.sort_by(|a, b| a.sort_key().cmp(b.sort_key()));
        Tree { entries }
    }

    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    /// Parse a binary tree payload
    ///
    /// The payload does not say whether a hash names a blob or a tree, so each
    /// entry's kind is read from `database`. A dangling hash is an error.
    pub fn parse(payload: &[u8], database: &Database) -> Result<Self> {
        let mut reader = Cursor::new(payload);
        let mut entries = Vec::new();

        // Reuse scratch buffers to reduce allocs
        let mut mode_bytes = Vec::new();
        let mut name_bytes = Vec::new();

        loop {
            mode_bytes.clear();
            // Read "mode " (space-delimited)
            let n = read_until(&mut reader, b' ', &mut mode_bytes)?;
            if n == 0 {
                break; // clean EOF: no more entries
            }
            if mode_bytes.pop() != Some(b' ') {
                return Err(Error::malformed("unexpected end of data in tree mode"));
            }
            let mode = std::str::from_utf8(&mode_bytes)
                .map_err(|_| Error::malformed("tree mode is not valid UTF-8"))
                .and_then(EntryMode::from_octal_str)?;

            // Read "name\0"
            name_bytes.clear();
            read_until(&mut reader, b'\0', &mut name_bytes)?;
            if name_bytes.pop() != Some(b'\0') {
                return Err(Error::malformed("unexpected end of data in tree entry name"));
            }
            let name = std::str::from_utf8(&name_bytes)
                .map_err(|_| Error::malformed("tree entry name is not valid UTF-8"))?
                .to_owned();
            validate_name(&name)?;

            let oid = ObjectId::read_h40_from(&mut reader)?;
            let object_type = database.object_type(&oid)?;

            entries.push(TreeEntry::new(mode, oid, object_type, name));
        }

        // stored order is not trusted
        Ok(Self::new(entries))
    }

    /// Build a tree from its text form, one `<mode> <type> <sha1>\t<name>` per line
    ///
    /// Modes may be zero-padded. Every hash must already be stored, with the
    /// declared type.
    pub fn from_listing(input: &str, database: &Database) -> Result<Self> {
        let entries = input
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| Self::parse_spec_line(line, database))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(entries))
    }

    fn parse_spec_line(line: &str, database: &Database) -> Result<TreeEntry> {
        let (fields, name) = line
            .split_once('\t')
            .ok_or_else(|| Error::malformed(format!("missing tab in tree line {line:?}")))?;

        let mut fields = fields.split_whitespace();
        let (Some(mode), Some(declared_type), Some(oid), None) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(Error::malformed(format!("bad tree line {line:?}")));
        };

        let mode = EntryMode::from_padded_str(mode)?;
        let declared_type = ObjectType::try_from(declared_type)?;
        let oid = ObjectId::try_parse(oid.to_string())?;
        validate_name(name)?;

        let object_type = database.object_type(&oid)?;
        if object_type != declared_type {
            return Err(Error::malformed(format!(
                "entry '{name}' object type ({object_type}) doesn't match declared type ({declared_type})"
            )));
        }

        Ok(TreeEntry::new(mode, oid, object_type, name.to_string()))
    }

    /// Materialize the tree under `target`
    ///
    /// Subtrees become directories, blobs become files whose permission bits
    /// come from the entry mode. The first failure aborts; whatever was
    /// already written stays on disk.
    pub fn checkout(&self, target: &Path, database: &Database) -> Result<()> {
        let workspace = Workspace::new(target.into());
        self.checkout_at(&workspace, Path::new(""), database)
    }

    fn checkout_at(&self, workspace: &Workspace, prefix: &Path, database: &Database) -> Result<()> {
        for entry in &self.entries {
            let path = prefix.join(entry.name());

            match entry.object_type() {
                ObjectType::Tree => {
                    workspace.make_directory(&path)?;

                    let subtree = database
                        .parse_object_as_tree(entry.oid())?
                        .ok_or_else(|| Error::malformed(format!("{} is not a tree", entry.oid())))?;
                    subtree.checkout_at(workspace, &path, database)?;
                }
                ObjectType::Blob => {
                    let blob = database.load(entry.oid())?;
                    workspace.write_file(&path, blob.payload(), entry.mode())?;
                    debug!(path = %path.display(), oid = %entry.oid(), "checked out blob");
                }
                ObjectType::Commit => {
                    return Err(Error::malformed(format!(
                        "cannot check out commit entry {}",
                        entry.name()
                    )));
                }
            }
        }

        Ok(())
    }
}

fn read_until(reader: &mut Cursor<&[u8]>, delimiter: u8, buffer: &mut Vec<u8>) -> Result<usize> {
    // reading from an in-memory cursor cannot fail
    Ok(reader.read_until(delimiter, buffer).unwrap_or_default())
}

/// Entry names are single path segments
fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\0']) {
        return Err(Error::malformed(format!("bad tree entry name {name:?}")));
    }

    Ok(())
}

impl Packable for Tree {
    fn serialize(&self) -> Result<Bytes> {
        let mut content = Vec::new();

        for entry in &self.entries {
            let header = format!("{} {}", entry.mode, entry.name);
            content.extend_from_slice(header.as_bytes());
            content.push(0);
            entry.oid.write_h40_to(&mut content).map_err(|_| {
                Error::malformed(format!("bad object id {}", entry.oid))
            })?;
        }

        Ok(Bytes::from(content))
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }

    fn display(&self) -> Bytes {
        let mut output = Vec::new();
        for entry in &self.entries {
            // writing into a Vec cannot fail
            let _ = writeln!(output, "{}", entry.display());
        }

        Bytes::from(output)
    }
}
