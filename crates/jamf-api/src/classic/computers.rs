// Computer inventory endpoints
//
// Listing (plain and `subset/basic`), full records by id or name, and the
// hardware section looked up by serial number.

use tracing::debug;

use crate::classic::client::{ClassicClient, Credentials};
use crate::classic::models::{
    BasicComputerInfo, BasicComputerList, Computer, ComputerList, ComputerNameId,
    ComputerResponse, HardwareInformation,
};
use crate::endpoint::Identifier;
use crate::error::Error;
use crate::transport::TransportConfig;

/// Read access to `/JSSResource/computers`.
#[derive(Debug)]
pub struct ComputersService {
    client: ClassicClient,
}

impl ComputersService {
    pub const CONTEXT: &'static str = "computers";

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

    /// List every computer as an id/name pair.
    ///
    /// `GET /JSSResource/computers`
    pub async fn list(&self) -> Result<Vec<ComputerNameId>, Error> {
        let url = self.client.endpoint().clone();
        debug!("listing computers");
        let res: ComputerList = self
            .client
            .get(url.clone())
            .await
            .map_err(|e| e.context("list computers", url.as_str()))?;
        Ok(res.computers)
    }

    /// List every computer with owner, model and last report date.
    ///
    /// `GET /JSSResource/computers/subset/basic`
    pub async fn list_with_basic_info(&self) -> Result<Vec<BasicComputerInfo>, Error> {
        let url = self.client.sub_endpoint(&["subset", "basic"])?;
        debug!("listing computers with basic info");
        let res: BasicComputerList = self
            .client
            .get(url.clone())
            .await
            .map_err(|e| e.context("list computers with basic info", url.as_str()))?;
        Ok(res.computers)
    }

    /// `GET /JSSResource/computers/id/{id}`
    pub async fn get_by_id(&self, id: i64) -> Result<Computer, Error> {
        self.get(&Identifier::Id(id)).await
    }

    /// `GET /JSSResource/computers/name/{name}`
    pub async fn get_by_name(&self, name: &str) -> Result<Computer, Error> {
        self.get(&Identifier::from(name)).await
    }

    /// Fetch the full inventory record for one computer.
    pub async fn get(&self, identifier: &Identifier) -> Result<Computer, Error> {
        let url = self.client.identifier_endpoint(identifier)?;
        debug!(%identifier, "fetching computer");
        let res: ComputerResponse = self
            .client
            .get(url.clone())
            .await
            .map_err(|e| e.context(format!("get computer by {identifier}"), url.as_str()))?;
        Ok(res.computer)
    }

    /// Only the hardware section of the computer with this serial number.
    ///
    /// `GET /JSSResource/computers/serialnumber/{serial}/subset/Hardware`
    pub async fn hardware_by_serial_number(
        &self,
        serial_number: &str,
    ) -> Result<HardwareInformation, Error> {
        let url = self
            .client
            .sub_endpoint(&["serialnumber", serial_number, "subset", "Hardware"])?;
        debug!(serial_number, "fetching computer hardware");
        let res: ComputerResponse = self.client.get(url.clone()).await.map_err(|e| {
            e.context(
                format!("get hardware for serial number {serial_number}"),
                url.as_str(),
            )
        })?;
        Ok(res.computer.hardware)
    }
}
