// Resource URL construction
//
// Classic API resources are addressed either by numeric id or by name:
// `{root}/{context}/id/{id}` and `{root}/{context}/name/{name}`.

use std::fmt;

use url::Url;

use crate::error::Error;

/// How a single resource is addressed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    Id(i64),
    Name(String),
}

impl Identifier {
    /// Placeholder id the server replaces with the next free id on create.
    pub const NEXT_AVAILABLE: Identifier = Identifier::Id(-1);

    /// Path segments that address this identifier under a resource context.
    pub fn segments(&self) -> [String; 2] {
        match self {
            Self::Id(id) => ["id".to_owned(), id.to_string()],
            Self::Name(name) => ["name".to_owned(), name.clone()],
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id {id}"),
            Self::Name(name) => write!(f, "name '{name}'"),
        }
    }
}

impl From<i64> for Identifier {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}

impl From<i32> for Identifier {
    fn from(id: i32) -> Self {
        Self::Id(i64::from(id))
    }
}

impl From<&str> for Identifier {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

impl From<String> for Identifier {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

/// Convert a loosely-typed value (e.g. from a JSON document) into an
/// identifier. Only integers and strings qualify.
impl TryFrom<&serde_json::Value> for Identifier {
    type Error = Error;

    fn try_from(value: &serde_json::Value) -> Result<Self, Error> {
        use serde_json::Value;

        let found = match value {
            Value::String(name) => return Ok(Self::Name(name.clone())),
            Value::Number(n) => match n.as_i64() {
                Some(id) => return Ok(Self::Id(id)),
                None if n.is_f64() => "float",
                None => "unsigned integer out of range",
            },
            Value::Bool(_) => "boolean",
            Value::Null => "null",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        };

        Err(Error::InvalidIdentifier {
            found: found.to_owned(),
        })
    }
}

/// Build `{root}/{context}/id/{id}` or `{root}/{context}/name/{name}`.
///
/// Each piece is appended as its own percent-encoded path segment, so names
/// containing `/`, `#` or spaces stay inside their segment.
pub fn endpoint_builder(root: &Url, context: &str, identifier: &Identifier) -> Result<Url, Error> {
    let [kind, value] = identifier.segments();
    append_segments(root, &[context, &kind, &value])
}

/// Append encoded path segments to `base`, ignoring a trailing slash on it.
pub(crate) fn append_segments(base: &Url, segments: &[&str]) -> Result<Url, Error> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| Error::InvalidConfiguration {
            message: format!("{base} cannot be used as a base URL"),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
