//! Commit object
//!
//! Commits represent snapshots of the repository at specific points in time.
//! They contain:
//! - A tree object ID (directory snapshot)
//! - Parent commit ID(s) (for history)
//! - Author and committer information
//! - Commit message
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! tree <tree-sha>
//! parent <parent-sha>
//! author <name> <email> <timestamp> <timezone>
//! committer <name> <email> <timestamp> <timezone>
//!
//! <commit message>
//! ```

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{Error, Result};
use bytes::Bytes;
use chrono::{DateTime, FixedOffset};

/// Identity recorded when none is configured
pub const AUTHOR_NAME: &str = "kit";
pub const AUTHOR_EMAIL: &str = "kit@localhost";

/// Author or committer information
///
/// Contains name, email, and timestamp with timezone information.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Author {
    name: String,
    email: String,
    timestamp: DateTime<FixedOffset>,
}

impl Author {
    /// Create a new author with the current timestamp
    pub fn new(name: String, email: String) -> Self {
        Author {
            name,
            email,
            timestamp: chrono::Local::now().fixed_offset(),
        }
    }

    pub fn new_with_timestamp(name: String, email: String, timestamp: DateTime<FixedOffset>) -> Self {
        Author {
            name,
            email,
            timestamp,
        }
    }

    /// The built-in identity, stamped now unless a timestamp is given
    pub fn default_identity(timestamp: Option<DateTime<FixedOffset>>) -> Self {
        let name = AUTHOR_NAME.to_string();
        let email = AUTHOR_EMAIL.to_string();

        match timestamp {
            Some(timestamp) => Author::new_with_timestamp(name, email, timestamp),
            None => Author::new(name, email),
        }
    }

    /// Load author information from environment variables
    ///
    /// Reads GIT_AUTHOR_NAME, GIT_AUTHOR_EMAIL, and optionally GIT_AUTHOR_DATE
    /// (RFC 2822 or `%Y-%m-%d %H:%M:%S %z`). Anything unset falls back to the
    /// built-in identity and the current time.
    pub fn load_from_env() -> Self {
        let name = std::env::var("GIT_AUTHOR_NAME").unwrap_or_else(|_| AUTHOR_NAME.to_string());
        let email =
            std::env::var("GIT_AUTHOR_EMAIL").unwrap_or_else(|_| AUTHOR_EMAIL.to_string());
        let timestamp = std::env::var("GIT_AUTHOR_DATE").ok().and_then(|date_str| {
            DateTime::parse_from_rfc2822(&date_str)
                .or_else(|_| DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
                .ok()
        });

        match timestamp {
            Some(ts) => Author::new_with_timestamp(name, email, ts),
            None => Author::new(name, email),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    /// String in format "Name <email> timestamp timezone"
    pub fn display(&self) -> String {
        format!(
            "{} <{}> {} {}",
            self.name,
            self.email,
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        )
    }
}

impl TryFrom<&str> for Author {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        // Format: "name <email> timestamp timezone"
        let email_start = value
            .find('<')
            .ok_or_else(|| Error::malformed("author line is missing '<'"))?;
        let email_end = value[email_start..]
            .find('>')
            .map(|offset| email_start + offset)
            .ok_or_else(|| Error::malformed("author line is missing '>'"))?;

        let name = value[..email_start].trim().to_string();
        let email = value[email_start + 1..email_end].to_string();

        let mut rest = value[email_end + 1..].split_whitespace();
        let timestamp = rest
            .next()
            .and_then(|timestamp| timestamp.parse::<i64>().ok())
            .ok_or_else(|| Error::malformed("author line has a bad timestamp"))?;
        let offset = rest
            .next()
            .and_then(parse_timezone)
            .ok_or_else(|| Error::malformed("author line has a bad timezone"))?;

        let timestamp = DateTime::from_timestamp(timestamp, 0)
            .ok_or_else(|| Error::malformed("author line has a bad timestamp"))?
            .with_timezone(&offset);

        Ok(Author::new_with_timestamp(name, email, timestamp))
    }
}

/// Parse a `+hhmm` / `-hhmm` timezone offset
fn parse_timezone(timezone: &str) -> Option<FixedOffset> {
    if timezone.len() != 5 || !timezone.is_ascii() {
        return None;
    }

    let sign = match &timezone[..1] {
        "+" => 1,
        "-" => -1,
        _ => return None,
    };
    let hours = timezone[1..3].parse::<i32>().ok()?;
    let minutes = timezone[3..5].parse::<i32>().ok()?;

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Commit object
///
/// A permanent DAG node: amending produces a new commit with a new address.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Parent commit IDs in header order (empty for initial commit)
    parents: Vec<ObjectId>,
    tree_oid: ObjectId,
    author: Author,
    committer: Author,
    /// Message body, verbatim
    message: String,
    /// Payload as read from the store, kept so unknown headers survive
    stored: Option<Bytes>,
}

impl Commit {
    /// Create a new commit where the author is also the committer
    pub fn new(parents: Vec<ObjectId>, tree_oid: ObjectId, author: Author, message: String) -> Self {
        Commit {
            parents,
            tree_oid,
            author: author.clone(),
            committer: author,
            message,
            stored: None,
        }
    }

    /// Commit stamped with the built-in identity
    pub fn from_params(
        tree_oid: ObjectId,
        parent: Option<ObjectId>,
        message: String,
        timestamp: Option<DateTime<FixedOffset>>,
    ) -> Self {
        let author = Author::default_identity(timestamp);
        Self::new(parent.into_iter().collect(), tree_oid, author, message)
    }

    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn committer(&self) -> &Author {
        &self.committer
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    fn header_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("tree {}", self.tree_oid)];
        for parent in &self.parents {
            lines.push(format!("parent {}", parent));
        }
        lines.push(format!("author {}", self.author.display()));
        lines.push(format!("committer {}", self.committer.display()));

        lines
    }
}

impl Packable for Commit {
    fn serialize(&self) -> Result<Bytes> {
        if let Some(stored) = &self.stored {
            return Ok(stored.clone());
        }

        let content = format!("{}\n\n{}", self.header_lines().join("\n"), self.message);
        Ok(Bytes::from(content))
    }
}

impl Unpackable for Commit {
    fn deserialize(payload: Bytes) -> Result<Self> {
        let content = std::str::from_utf8(&payload)
            .map_err(|_| Error::malformed("commit is not valid UTF-8"))?;

        // headers end at the first blank line
        let (headers, message) = content.split_once("\n\n").unwrap_or((content, ""));

        let mut tree_oid = None;
        let mut parents = Vec::new();
        let mut author = None;
        let mut committer = None;

        for line in headers.lines() {
            // continuation of a multi-line header such as gpgsig
            if line.starts_with(' ') {
                continue;
            }

            let (key, value) = line
                .split_once(' ')
                .ok_or_else(|| Error::malformed(format!("bad commit header {line:?}")))?;
            match key {
                "tree" => tree_oid = Some(ObjectId::try_parse(value.to_string())?),
                "parent" => parents.push(ObjectId::try_parse(value.to_string())?),
                "author" => author = Some(Author::try_from(value)?),
                "committer" => committer = Some(Author::try_from(value)?),
                _ => {}
            }
        }

        let tree_oid = tree_oid.ok_or_else(|| Error::malformed("commit is missing a tree"))?;
        let author = author.ok_or_else(|| Error::malformed("commit is missing an author"))?;
        let committer = committer.unwrap_or_else(|| author.clone());

        Ok(Commit {
            parents,
            tree_oid,
            author,
            committer,
            message: message.to_string(),
            stored: Some(payload.clone()),
        })
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> Bytes {
        // the pretty form is the payload itself
        self.serialize().unwrap_or_default()
    }
}
