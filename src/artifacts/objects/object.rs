use crate::areas::database::Database;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::{Error, Result};
use bytes::{BufMut, Bytes, BytesMut};
use derive_new::new;
use sha1::{Digest, Sha1};

/// An object as the store sees it: a kind tag plus an opaque payload
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct RawObject {
    object_type: ObjectType,
    #[new(into)]
    payload: Bytes,
}

impl RawObject {
    pub fn object_type(&self) -> ObjectType {
        self.object_type
    }

    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    pub fn into_payload(self) -> Bytes {
        self.payload
    }

    /// Canonical encoding `<type> <size>\0<payload>`, the hash input
    pub fn encode(&self) -> Bytes {
        let header = format!("{} {}\0", self.object_type.as_str(), self.payload.len());

        let mut encoded = BytesMut::with_capacity(header.len() + self.payload.len());
        encoded.put_slice(header.as_bytes());
        encoded.put_slice(&self.payload);
        encoded.freeze()
    }

    /// Split a canonical encoding back into kind and payload
    ///
    /// The declared size must match the number of trailing bytes.
    pub fn decode(data: Bytes) -> Result<Self> {
        let space = data
            .iter()
            .position(|&byte| byte == b' ')
            .ok_or_else(|| Error::malformed("missing object type"))?;
        let object_type = std::str::from_utf8(&data[..space])
            .map_err(|_| Error::malformed("object type is not valid UTF-8"))
            .and_then(ObjectType::try_from)?;

        let nul = data[space + 1..]
            .iter()
            .position(|&byte| byte == b'\0')
            .map(|offset| space + 1 + offset)
            .ok_or_else(|| Error::malformed("missing object size"))?;
        let declared_size = std::str::from_utf8(&data[space + 1..nul])
            .ok()
            .and_then(|size| size.parse::<usize>().ok())
            .ok_or_else(|| Error::malformed("bad object size"))?;

        let payload = data.slice(nul + 1..);
        if payload.len() != declared_size {
            return Err(Error::malformed(format!(
                "declared size {} does not match actual size {}",
                declared_size,
                payload.len()
            )));
        }

        Ok(Self::new(object_type, payload))
    }

    pub fn object_id(&self) -> ObjectId {
        hash(&self.encode())
    }
}

/// SHA-1 of a canonical encoding, as 40 lowercase hex characters
pub fn hash(canonical: &[u8]) -> ObjectId {
    ObjectId::from_digest(&Sha1::digest(canonical))
}

pub trait Packable {
    /// Encode the payload (without the `<type> <size>\0` header)
    fn serialize(&self) -> Result<Bytes>;
}

pub trait Unpackable {
    fn deserialize(payload: Bytes) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    /// Pretty form printed by `cat-file -p`
    fn display(&self) -> Bytes;

    /// Payload length in bytes, as printed by `cat-file -s`
    fn data_size(&self) -> Result<usize> {
        Ok(self.serialize()?.len())
    }

    fn to_raw(&self) -> Result<RawObject> {
        Ok(RawObject::new(self.object_type(), self.serialize()?))
    }

    fn object_id(&self) -> Result<ObjectId> {
        Ok(self.to_raw()?.object_id())
    }
}

/// Typed view over a stored object
#[derive(Debug, Clone)]
pub enum ObjectBox {
    Blob(Box<Blob>),
    Tree(Box<Tree>),
    Commit(Box<Commit>),
}

impl ObjectBox {
    /// Single dispatch point from a kind tag to the matching typed object
    ///
    /// Trees need the database to learn the kind of each entry.
    pub fn from_raw(raw: RawObject, database: &Database) -> Result<Self> {
        match raw.object_type() {
            ObjectType::Blob => Ok(ObjectBox::Blob(Box::new(Blob::deserialize(
                raw.into_payload(),
            )?))),
            ObjectType::Tree => Ok(ObjectBox::Tree(Box::new(Tree::parse(
                raw.payload(),
                database,
            )?))),
            ObjectType::Commit => Ok(ObjectBox::Commit(Box::new(Commit::deserialize(
                raw.into_payload(),
            )?))),
        }
    }

    fn as_object(&self) -> &dyn Object {
        match self {
            ObjectBox::Blob(blob) => &**blob,
            ObjectBox::Tree(tree) => &**tree,
            ObjectBox::Commit(commit) => &**commit,
        }
    }
}

impl Packable for ObjectBox {
    fn serialize(&self) -> Result<Bytes> {
        self.as_object().serialize()
    }
}

impl Object for ObjectBox {
    fn object_type(&self) -> ObjectType {
        self.as_object().object_type()
    }

    fn display(&self) -> Bytes {
        self.as_object().display()
    }
}
