// Classic API client modules
//
// Typed services over the Jamf Pro Classic API (`/JSSResource/...`). Each
// service owns a `ClassicClient` bound to one resource context and decodes
// JSON or XML responses into the shapes in `models`.

pub mod accounts;
pub mod client;
pub mod computers;
pub mod extension_attributes;
pub mod models;
pub mod policies;

pub use accounts::AccountsService;
pub use client::{ClassicClient, Credentials};
pub use computers::ComputersService;
pub use extension_attributes::ComputerExtensionAttributesService;
pub use policies::PoliciesService;
