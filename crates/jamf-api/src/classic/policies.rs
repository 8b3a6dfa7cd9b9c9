// Policy endpoints
//
// List, fetch and create. A new policy must be named; scripts without a
// priority run `After` the policy's other actions.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classic::client::{ClassicClient, Credentials, encode_xml};
use crate::classic::models::{
    BasicPolicyInformation, CreatedResource, ManagementAccount, PolicyAccount, PolicyContents,
    PolicyGeneral, PolicyList, PolicyResponse, PolicyScript,
};
use crate::endpoint::Identifier;
use crate::error::Error;
use crate::transport::TransportConfig;

const XML_ROOT: &str = "policy";

/// Access to `/JSSResource/policies`.
#[derive(Debug)]
pub struct PoliciesService {
    client: ClassicClient,
}

impl PoliciesService {
    pub const CONTEXT: &'static str = "policies";

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

    /// `GET /JSSResource/policies`
    pub async fn list(&self) -> Result<Vec<BasicPolicyInformation>, Error> {
        let url = self.client.endpoint().clone();
        debug!("listing policies");
        let res: PolicyList = self
            .client
            .get(url.clone())
            .await
            .map_err(|e| e.context("list policies", url.as_str()))?;
        Ok(res.policies)
    }

    /// Fetch one policy by id or name.
    pub async fn get(&self, identifier: &Identifier) -> Result<PolicyContents, Error> {
        let url = self.client.identifier_endpoint(identifier)?;
        debug!(%identifier, "fetching policy");
        let res: PolicyResponse = self
            .client
            .get(url.clone())
            .await
            .map_err(|e| e.context(format!("get policy by {identifier}"), url.as_str()))?;
        Ok(res.policy)
    }

    /// Create a policy and return the id Jamf assigned.
    ///
    /// An empty `general.name` fails with [`Error::Validation`] before any
    /// request is sent.
    ///
    /// `POST /JSSResource/policies/id/-1`
    pub async fn create(&self, policy: &PolicyContents) -> Result<CreatedResource, Error> {
        let url = self.client.identifier_endpoint(&Identifier::NEXT_AVAILABLE)?;
        let operation = format!("create policy '{}'", policy.general.name);

        let body = validate(policy)
            .and_then(|()| encode_xml(XML_ROOT, &PolicyPayload::from(policy)))
            .map_err(|e| e.context(operation.as_str(), url.as_str()))?;

        debug!(name = %policy.general.name, scripts = policy.scripts.len(), "creating policy");
        let res: CreatedResponse = self
            .client
            .post_xml(url.clone(), body)
            .await
            .map_err(|e| e.context(operation, url.as_str()))?;
        Ok(res.policy)
    }
}

fn validate(policy: &PolicyContents) -> Result<(), Error> {
    if policy.general.name.trim().is_empty() {
        return Err(Error::Validation {
            field: "general.name",
            reason: "a name is required for a new policy".into(),
        });
    }
    Ok(())
}

/// `{"policy": {"id": 42}}`
#[derive(Deserialize, Default)]
#[serde(default)]
struct CreatedResponse {
    policy: CreatedResource,
}

// ── Request payload ──────────────────────────────────────────────────

#[derive(Serialize)]
struct PolicyPayload<'a> {
    general: &'a PolicyGeneral,
    scripts: ScriptsPayload<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    account_maintenance: Option<AccountMaintenancePayload<'a>>,
}

/// `<scripts><size>N</size><script>..</script>...</scripts>`
#[derive(Serialize)]
struct ScriptsPayload<'a> {
    size: usize,
    script: Vec<ScriptPayload<'a>>,
}

#[derive(Serialize)]
struct ScriptPayload<'a> {
    id: i64,
    #[serde(skip_serializing_if = "str::is_empty")]
    name: &'a str,
    priority: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameter4: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameter5: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameter6: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameter7: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameter8: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameter9: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameter10: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameter11: Option<&'a str>,
}

#[derive(Serialize)]
struct AccountMaintenancePayload<'a> {
    accounts: AccountsPayload<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    management_account: Option<&'a ManagementAccount>,
}

#[derive(Serialize)]
struct AccountsPayload<'a> {
    size: usize,
    account: &'a [PolicyAccount],
}

impl<'a> From<&'a PolicyContents> for PolicyPayload<'a> {
    fn from(policy: &'a PolicyContents) -> Self {
        let maintenance = &policy.account_maintenance;
        Self {
            general: &policy.general,
            scripts: ScriptsPayload {
                size: policy.scripts.len(),
                script: policy.scripts.iter().map(ScriptPayload::from).collect(),
            },
            account_maintenance: (!maintenance.is_empty()).then(|| AccountMaintenancePayload {
                accounts: AccountsPayload {
                    size: maintenance.accounts.len(),
                    account: &maintenance.accounts,
                },
                management_account: maintenance.management_account.as_ref(),
            }),
        }
    }
}

impl<'a> From<&'a PolicyScript> for ScriptPayload<'a> {
    fn from(script: &'a PolicyScript) -> Self {
        let [p4, p5, p6, p7, p8, p9, p10, p11] = script.parameters();
        Self {
            id: script.id,
            name: &script.name,
            priority: script.priority.unwrap_or_default().as_str(),
            parameter4: p4,
            parameter5: p5,
            parameter6: p6,
            parameter7: p7,
            parameter8: p8,
            parameter9: p9,
            parameter10: p10,
            parameter11: p11,
        }
    }
}
