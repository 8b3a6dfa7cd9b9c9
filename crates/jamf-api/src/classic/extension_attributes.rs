// Computer extension attribute endpoints
//
// List, fetch and create. Creation validates the definition locally and
// posts an XML document to `id/-1`, which Jamf reads as "next free id".

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classic::client::{ClassicClient, Credentials, encode_xml};
use crate::classic::models::{
    ComputerExtensionAttribute, ComputerExtensionAttributeResponse, CreatedResource,
    ExtensionAttributeList, ExtensionAttributeNameId, InputType,
};
use crate::endpoint::Identifier;
use crate::error::Error;
use crate::transport::TransportConfig;

const XML_ROOT: &str = "computer_extension_attribute";

/// Access to `/JSSResource/computerextensionattributes`.
#[derive(Debug)]
pub struct ComputerExtensionAttributesService {
    client: ClassicClient,
}

impl ComputerExtensionAttributesService {
    pub const CONTEXT: &'static str = "computerextensionattributes";

    pub fn new(
        base_url: &str,
        credentials: Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let client = ClassicClient::new(base_url, Self::CONTEXT, credentials, transport)?;
        Ok(Self { client })
    }

    pub fn with_client(
        base_url: &str,
        credentials: Credentials,
        http: reqwest::Client,
    ) -> Result<Self, Error> {
        let client = ClassicClient::with_client(base_url, Self::CONTEXT, credentials, http)?;
        Ok(Self { client })
    }

    pub fn client(&self) -> &ClassicClient {
        &self.client
    }

    /// `GET /JSSResource/computerextensionattributes`
    pub async fn list(&self) -> Result<Vec<ExtensionAttributeNameId>, Error> {
        let url = self.client.endpoint().clone();
        debug!("listing computer extension attributes");
        let res: ExtensionAttributeList = self
            .client
            .get(url.clone())
            .await
            .map_err(|e| e.context("list computer extension attributes", url.as_str()))?;
        Ok(res.computer_extension_attributes)
    }

    /// Fetch one attribute definition by id or name.
    pub async fn get(&self, identifier: &Identifier) -> Result<ComputerExtensionAttribute, Error> {
        let url = self.client.identifier_endpoint(identifier)?;
        debug!(%identifier, "fetching computer extension attribute");
        let res: ComputerExtensionAttributeResponse =
            self.client.get(url.clone()).await.map_err(|e| {
                e.context(
                    format!("get computer extension attribute by {identifier}"),
                    url.as_str(),
                )
            })?;
        Ok(res.computer_extension_attribute)
    }

    /// Create a new attribute and return the id Jamf assigned.
    ///
    /// Fails with [`Error::Validation`] before any request when
    /// [`ComputerExtensionAttribute::validate`] rejects the definition.
    ///
    /// `POST /JSSResource/computerextensionattributes/id/-1`
    pub async fn create(
        &self,
        attribute: &ComputerExtensionAttribute,
    ) -> Result<CreatedResource, Error> {
        let url = self.client.identifier_endpoint(&Identifier::NEXT_AVAILABLE)?;
        let operation = format!("create computer extension attribute '{}'", attribute.name);

        let body = attribute
            .validate()
            .and_then(|()| encode_xml(XML_ROOT, &ExtensionAttributePayload::from(attribute)))
            .map_err(|e| e.context(operation.as_str(), url.as_str()))?;

        debug!(name = %attribute.name, "creating computer extension attribute");
        let res: CreatedResponse = self
            .client
            .post_xml(url.clone(), body)
            .await
            .map_err(|e| e.context(operation, url.as_str()))?;
        Ok(res.computer_extension_attribute)
    }
}

/// `{"computer_extension_attribute": {"id": 12}}`
#[derive(Deserialize, Default)]
#[serde(default)]
struct CreatedResponse {
    computer_extension_attribute: CreatedResource,
}

// ── Request payload ──────────────────────────────────────────────────
//
// Jamf wants popup choices nested as `<popup_choices><choice>..</choice>`
// and rejects empty elements for unset fields, so the wire shape differs
// from the decoded model.

#[derive(Serialize)]
struct ExtensionAttributePayload<'a> {
    name: &'a str,
    enabled: bool,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    data_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    input_type: Option<InputTypePayload<'a>>,
    #[serde(skip_serializing_if = "str::is_empty")]
    inventory_display: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    recon_display: &'a str,
}

#[derive(Serialize)]
struct InputTypePayload<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    platform: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    script: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    popup_choices: Option<ChoicesPayload<'a>>,
}

#[derive(Serialize)]
struct ChoicesPayload<'a> {
    choice: &'a [String],
}

impl<'a> From<&'a ComputerExtensionAttribute> for ExtensionAttributePayload<'a> {
    fn from(attr: &'a ComputerExtensionAttribute) -> Self {
        Self {
            name: &attr.name,
            enabled: attr.enabled,
            description: &attr.description,
            data_type: &attr.data_type,
            input_type: InputTypePayload::new(&attr.input_type),
            inventory_display: &attr.inventory_display,
            recon_display: &attr.recon_display,
        }
    }
}

impl<'a> InputTypePayload<'a> {
    fn new(input: &'a InputType) -> Option<Self> {
        if input.kind.is_empty() {
            return None;
        }
        Some(Self {
            kind: &input.kind,
            platform: &input.platform,
            script: &input.script,
            popup_choices: (!input.popup_choices.is_empty()).then_some(ChoicesPayload {
                choice: &input.popup_choices,
            }),
        })
    }
}
