// Console account endpoints
//
// Users and groups share one resource context but use their own lookup
// segments: `userid/`, `username/`, `groupid/` and `groupname/`.

use tracing::debug;

use crate::classic::client::{ClassicClient, Credentials};
use crate::classic::models::{
    AccountGroup, AccountGroupResponse, AccountUser, AccountUserResponse, AccountsList,
    AccountsResponse,
};
use crate::error::Error;
use crate::transport::TransportConfig;

/// Read access to `/JSSResource/accounts`.
#[derive(Debug)]
pub struct AccountsService {
    client: ClassicClient,
}

impl AccountsService {
    pub const CONTEXT: &'static str = "accounts";

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

    /// All console users and groups.
    ///
    /// `GET /JSSResource/accounts`
    pub async fn list(&self) -> Result<AccountsList, Error> {
        let url = self.client.endpoint().clone();
        debug!("listing accounts");
        let res: AccountsResponse = self
            .client
            .get(url.clone())
            .await
            .map_err(|e| e.context("list accounts", url.as_str()))?;
        Ok(res.accounts)
    }

    /// `GET /JSSResource/accounts/userid/{id}`
    pub async fn get_user_by_id(&self, id: i64) -> Result<AccountUser, Error> {
        self.user("userid", &id.to_string()).await
    }

    /// `GET /JSSResource/accounts/username/{name}`
    pub async fn get_user_by_name(&self, name: &str) -> Result<AccountUser, Error> {
        self.user("username", name).await
    }

    /// `GET /JSSResource/accounts/groupid/{id}`
    pub async fn get_group_by_id(&self, id: i64) -> Result<AccountGroup, Error> {
        self.group("groupid", &id.to_string()).await
    }

    /// `GET /JSSResource/accounts/groupname/{name}`
    pub async fn get_group_by_name(&self, name: &str) -> Result<AccountGroup, Error> {
        self.group("groupname", name).await
    }

    async fn user(&self, lookup: &str, value: &str) -> Result<AccountUser, Error> {
        let url = self.client.sub_endpoint(&[lookup, value])?;
        debug!(lookup, value, "fetching account user");
        let res: AccountUserResponse = self
            .client
            .get(url.clone())
            .await
            .map_err(|e| e.context(format!("get account user by {lookup} {value}"), url.as_str()))?;
        Ok(res.account)
    }

    async fn group(&self, lookup: &str, value: &str) -> Result<AccountGroup, Error> {
        let url = self.client.sub_endpoint(&[lookup, value])?;
        debug!(lookup, value, "fetching account group");
        let res: AccountGroupResponse = self
            .client
            .get(url.clone())
            .await
            .map_err(|e| e.context(format!("get account group by {lookup} {value}"), url.as_str()))?;
        Ok(res.group)
    }
}
