// Classic API wire models
//
// Typed mirrors of the JSSResource schemas. Every struct decodes from both
// the JSON and the XML representation of a resource. Fields use
// `#[serde(default)]` throughout because the server omits empty sections
// and subset endpoints return partial records.

pub mod accounts;
pub mod computers;
pub mod extension_attributes;
pub(crate) mod list;
pub mod policies;

use serde::{Deserialize, Serialize};

pub use accounts::*;
pub use computers::*;
pub use extension_attributes::*;
pub use policies::*;

/// Body returned by create operations: the id the server assigned.
///
/// ```xml
/// <policy><id>42</id></policy>
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatedResource {
    pub id: i64,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
pub(crate) fn is_zero(value: &i64) -> bool {
    *value == 0
}
