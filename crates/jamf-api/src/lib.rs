// jamf-api: Async Rust client for the Jamf Pro Classic API (JSSResource)

pub mod classic;
pub mod endpoint;
pub mod error;
pub mod transport;

pub use classic::models;
pub use classic::{
    AccountsService, ClassicClient, ComputerExtensionAttributesService, ComputersService,
    Credentials, PoliciesService,
};
pub use endpoint::{Identifier, endpoint_builder};
pub use error::{DecodeError, Error, ErrorKind};
pub use transport::{TlsMode, TransportConfig};
