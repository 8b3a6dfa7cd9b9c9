// Computer extension attribute definitions from
// `/JSSResource/computerextensionattributes`.

use serde::{Deserialize, Serialize};

use super::{is_zero, list};
use crate::error::Error;

/// Input types Jamf accepts for a computer extension attribute.
pub const INPUT_TYPES: [&str; 4] = ["script", "Text Field", "Pop-up Menu", "LDAP Attribute Mapping"];

/// Data types Jamf accepts for a computer extension attribute.
pub const DATA_TYPES: [&str; 3] = ["String", "Integer", "Date"];

/// `GET /computerextensionattributes`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionAttributeList {
    #[serde(deserialize_with = "list::deserialize")]
    pub computer_extension_attributes: Vec<ExtensionAttributeNameId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionAttributeNameId {
    pub id: i64,
    pub name: String,
    pub enabled: bool,
}

/// `GET /computerextensionattributes/id/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComputerExtensionAttributeResponse {
    pub computer_extension_attribute: ComputerExtensionAttribute,
}

/// Definition of an inventory field collected for every computer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComputerExtensionAttribute {
    #[serde(skip_serializing_if = "is_zero")]
    pub id: i64,
    pub name: String,
    pub enabled: bool,
    pub description: String,
    /// One of [`DATA_TYPES`], or empty to let the server choose.
    pub data_type: String,
    pub input_type: InputType,
    /// Inventory section the value is shown in (e.g. `Extension Attributes`).
    pub inventory_display: String,
    pub recon_display: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputType {
    /// One of [`INPUT_TYPES`].
    #[serde(rename = "type")]
    pub kind: String,
    pub platform: String,
    /// Script body, required when `kind` is `script`.
    pub script: String,
    #[serde(deserialize_with = "list::deserialize")]
    pub popup_choices: Vec<String>,
}

impl ComputerExtensionAttribute {
    /// Check the fields Jamf rejects on create, without contacting the server.
    pub fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation {
                field: "name",
                reason: "a name is required for a new computer extension attribute".into(),
            });
        }

        let kind = self.input_type.kind.as_str();
        if !kind.is_empty() && !INPUT_TYPES.contains(&kind) {
            return Err(Error::Validation {
                field: "input_type",
                reason: format!("'{kind}' is not one of {}", INPUT_TYPES.join(", ")),
            });
        }
        if kind == "script" && self.input_type.script.trim().is_empty() {
            return Err(Error::Validation {
                field: "input_type.script",
                reason: "a script input type requires a script body".into(),
            });
        }

        let data_type = self.data_type.as_str();
        if !data_type.is_empty() && !DATA_TYPES.contains(&data_type) {
            return Err(Error::Validation {
                field: "data_type",
                reason: format!("'{data_type}' is not one of {}", DATA_TYPES.join(", ")),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn attribute() -> ComputerExtensionAttribute {
        ComputerExtensionAttribute {
            name: "Battery Cycle Count".into(),
            data_type: "Integer".into(),
            input_type: InputType {
                kind: "script".into(),
                platform: "Mac".into(),
                script: "#!/bin/sh\necho \"<result>42</result>\"".into(),
                ..InputType::default()
            },
            ..ComputerExtensionAttribute::default()
        }
    }

    fn rejected_field(attr: &ComputerExtensionAttribute) -> &'static str {
        match attr.validate().unwrap_err() {
            Error::Validation { field, .. } => field,
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn complete_attribute_passes() {
        attribute().validate().unwrap();
    }

    #[test]
    fn blank_fields_are_left_to_the_server() {
        let attr = ComputerExtensionAttribute {
            name: "Asset Tag".into(),
            ..ComputerExtensionAttribute::default()
        };
        attr.validate().unwrap();
    }

    #[test]
    fn name_is_required() {
        let mut attr = attribute();
        attr.name = "  ".into();
        assert_eq!(attr.validate().unwrap_err().kind(), ErrorKind::Validation);
        assert_eq!(rejected_field(&attr), "name");
    }

    #[test]
    fn unknown_input_type_is_rejected() {
        let mut attr = attribute();
        attr.input_type.kind = "Checkbox".into();
        assert_eq!(rejected_field(&attr), "input_type");
    }

    #[test]
    fn script_input_needs_a_script() {
        let mut attr = attribute();
        attr.input_type.script.clear();
        assert_eq!(rejected_field(&attr), "input_type.script");
    }

    #[test]
    fn unknown_data_type_is_rejected() {
        let mut attr = attribute();
        attr.data_type = "Boolean".into();
        assert_eq!(rejected_field(&attr), "data_type");
    }
}
