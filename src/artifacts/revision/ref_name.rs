use crate::artifacts::revision::INVALID_REF_NAME_REGEX;
use crate::errors::{Error, Result};

/// A name that is safe to look up as a ref file
///
/// Follows git's ref-format rules, so a valid name never walks out of the
/// metadata directory (`..`, leading `/`) or names a lock file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct RefName(String);

impl RefName {
    pub fn try_parse(name: String) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::malformed("ref name cannot be empty"));
        }

        let re = regex::Regex::new(INVALID_REF_NAME_REGEX)
            .map_err(|err| Error::malformed(format!("invalid ref name regex: {err}")))?;

        if re.is_match(&name) {
            Err(Error::malformed(format!("invalid ref name: {name}")))
        } else {
            Ok(Self(name))
        }
    }
}

impl AsRef<str> for RefName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RefName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
