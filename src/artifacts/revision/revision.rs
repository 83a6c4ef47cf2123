use crate::areas::refs::HEAD_REF_NAME;
use crate::areas::repository::Repository;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::object_id::{ObjectId, is_hex};
use crate::artifacts::revision::ref_name::RefName;
use crate::artifacts::revision::{MIN_ABBREV_LENGTH, REF_ALIASES};
use crate::errors::{Error, Result};
use tracing::debug;

/// A revision expression, classified by the first rule that matches
///
/// 1. `HEAD` (or its alias `@`)
/// 2. exactly 40 hex characters: a full object ID
/// 3. 4 to 39 hex characters: an abbreviated object ID
/// 4. anything else that is a well-formed ref name
///
/// A hex string that fails as a hash is not retried as a ref name. Text that
/// fits none of the rules, or that resolves to nothing, is reported as
/// ambiguous. No match and several matches read the same. Errors quote the
/// text as the caller spelled it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Revision {
    /// HEAD, holding the spelling used (`HEAD` or `@`)
    Head(String),
    Oid(ObjectId),
    AbbreviatedOid(String),
    Ref(RefName),
}

impl Revision {
    pub fn try_parse(revision: &str) -> Result<Revision> {
        let resolved_name = *REF_ALIASES.get(revision).unwrap_or(&revision);

        if resolved_name == HEAD_REF_NAME {
            return Ok(Revision::Head(revision.to_string()));
        }

        if ObjectId::is_full_hex(resolved_name) {
            return Ok(Revision::Oid(ObjectId::try_parse(resolved_name.to_string())?));
        }

        if Self::looks_like_abbreviated_oid(resolved_name) {
            return Ok(Revision::AbbreviatedOid(resolved_name.to_string()));
        }

        RefName::try_parse(resolved_name.to_string())
            .map(Revision::Ref)
            .map_err(|_| Error::Ambiguous(revision.to_string()))
    }

    pub fn resolve(&self, repository: &Repository) -> Result<ObjectId> {
        match self {
            Revision::Head(_) => repository
                .refs()
                .read_head()?
                .ok_or_else(|| self.ambiguous()),
            Revision::Oid(oid) => {
                // must exist, and must decode
                repository.database().load(oid)?;
                Ok(oid.clone())
            }
            Revision::AbbreviatedOid(prefix) => {
                let mut matches = repository.database().find_objects_by_prefix(prefix)?;
                debug!(prefix = %prefix, candidates = matches.len(), "resolving abbreviated oid");

                match (matches.pop(), matches.is_empty()) {
                    (Some(oid), true) => Ok(oid),
                    _ => Err(self.ambiguous()),
                }
            }
            Revision::Ref(name) => repository
                .refs()
                .read_ref(name)?
                .ok_or_else(|| self.ambiguous()),
        }
    }

    fn ambiguous(&self) -> Error {
        Error::Ambiguous(self.to_string())
    }

    fn looks_like_abbreviated_oid(text: &str) -> bool {
        (MIN_ABBREV_LENGTH..OBJECT_ID_LENGTH).contains(&text.len()) && is_hex(text)
    }
}

impl std::fmt::Display for Revision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Revision::Head(spelling) => write!(f, "{spelling}"),
            Revision::Oid(oid) => write!(f, "{oid}"),
            Revision::AbbreviatedOid(prefix) => write!(f, "{prefix}"),
            Revision::Ref(name) => write!(f, "{name}"),
        }
    }
}
