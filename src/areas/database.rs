use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, ObjectBox, RawObject, Unpackable};
use crate::artifacts::objects::object_id::{ObjectId, is_hex};
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::{Error, IoContext, Result};
use bytes::Bytes;
use fake::rand;
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loose object store rooted at `.git/objects`
#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

// TODO: read packfiles so repositories cloned by git can be inspected
impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Persist a typed object and return its address
    pub fn store(&self, object: &impl Object) -> Result<ObjectId> {
        self.write(&object.to_raw()?)
    }

    /// Persist a raw object unless an object with the same address exists
    ///
    /// Content is written to a temporary file next to the destination and
    /// renamed into place, so readers never observe a partial object.
    pub fn write(&self, raw: &RawObject) -> Result<ObjectId> {
        let object_id = raw.object_id();
        let object_path = self.path.join(object_id.to_path());

        if object_path.exists() {
            debug!(oid = %object_id, "object already stored");
            return Ok(object_id);
        }

        let object_dir = object_path
            .parent()
            .ok_or_else(|| Error::malformed(format!("invalid object path {}", object_path.display())))?;
        std::fs::create_dir_all(object_dir).io_context(|| {
            format!("Unable to create object directory {}", object_dir.display())
        })?;

        self.write_object(&object_path, raw.encode())?;
        debug!(oid = %object_id, kind = %raw.object_type(), size = raw.payload().len(), "stored object");

        Ok(object_id)
    }

    /// Read and decode the object stored under `object_id`
    pub fn load(&self, object_id: &ObjectId) -> Result<RawObject> {
        let object_path = self.path.join(object_id.to_path());

        let compressed = match std::fs::read(&object_path) {
            Ok(content) => content,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                return Err(Error::NotFound(object_id.to_string()));
            }
            Err(error) => {
                return Err(Error::Io {
                    context: format!("Unable to read object file {}", object_path.display()),
                    source: error,
                });
            }
        };

        let encoded = Self::decompress(&compressed)
            .io_context(|| format!("Unable to decompress object {object_id}"))?;

        RawObject::decode(encoded)
    }

    pub fn exists(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.to_path()).is_file()
    }

    pub fn object_type(&self, object_id: &ObjectId) -> Result<ObjectType> {
        Ok(self.load(object_id)?.object_type())
    }

    pub fn parse_object(&self, object_id: &ObjectId) -> Result<ObjectBox> {
        ObjectBox::from_raw(self.load(object_id)?, self)
    }

    /// Load `object_id` as a tree, or `None` if it is some other kind
    pub fn parse_object_as_tree(&self, object_id: &ObjectId) -> Result<Option<Tree>> {
        let raw = self.load(object_id)?;

        match raw.object_type() {
            ObjectType::Tree => Ok(Some(Tree::parse(raw.payload(), self)?)),
            _ => Ok(None),
        }
    }

    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> Result<Option<Commit>> {
        let raw = self.load(object_id)?;

        match raw.object_type() {
            ObjectType::Commit => Ok(Some(Commit::deserialize(raw.into_payload())?)),
            _ => Ok(None),
        }
    }

    /// Find all objects whose address starts with `prefix`
    ///
    /// Only the fan-out directory named by the first two characters is scanned.
    /// The result is sorted; an empty result means nothing matched.
    pub fn find_objects_by_prefix(&self, prefix: &str) -> Result<Vec<ObjectId>> {
        let prefix = prefix.to_ascii_lowercase();
        if prefix.len() < 2 || !is_hex(&prefix) {
            return Ok(Vec::new());
        }

        let (dir_name, file_prefix) = prefix.split_at(2);
        let dir_path = self.path.join(dir_name);
        if !dir_path.is_dir() {
            return Ok(Vec::new());
        }

        let entries = std::fs::read_dir(&dir_path)
            .io_context(|| format!("Unable to list object directory {}", dir_path.display()))?;

        let mut matches = Vec::new();
        for entry in entries {
            let entry = entry.io_context(|| {
                format!("Unable to list object directory {}", dir_path.display())
            })?;
            let file_name = entry.file_name();
            let file_name = file_name.to_string_lossy();

            if !file_name.starts_with(file_prefix) {
                continue;
            }

            // temp files and strays are skipped
            if let Ok(oid) = ObjectId::try_parse(format!("{dir_name}{file_name}")) {
                matches.push(oid);
            }
        }

        matches.sort();
        debug!(prefix = %prefix, matches = matches.len(), "scanned object prefix");

        Ok(matches)
    }

    fn write_object(&self, object_path: &Path, content: Bytes) -> Result<()> {
        let temp_object_path = Self::temp_path(object_path);
        let compressed = Self::compress(&content)
            .io_context(|| format!("Unable to compress object {}", object_path.display()))?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .io_context(|| format!("Unable to open object file {}", temp_object_path.display()))?;

        file.write_all(&compressed).io_context(|| {
            format!("Unable to write object file {}", temp_object_path.display())
        })?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, object_path)
            .io_context(|| format!("Unable to rename object file to {}", object_path.display()))
    }

    fn temp_path(object_path: &Path) -> PathBuf {
        let temp_name = format!("tmp-obj-{}", rand::random::<u32>());

        match object_path.parent() {
            Some(dir) => dir.join(temp_name),
            None => PathBuf::from(temp_name),
        }
    }

    fn compress(data: &[u8]) -> std::io::Result<Vec<u8>> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(data)?;
        encoder.finish()
    }

    fn decompress(data: &[u8]) -> std::io::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(data);
        let mut decompressed = Vec::new();
        decoder.read_to_end(&mut decompressed)?;

        Ok(decompressed.into())
    }
}
