//! cumulus-client: Cloud API client
//!
//! Provides the [`CloudApi`] trait consumed by the inventory core and its
//! HTTP implementation over the provider's REST API.
//!
//! # Example
//!
//! ```no_run
//! use cumulus_client::{CloudApi, Credentials, HttpCloudClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let credentials = Credentials::new(Some("user".into()), Some("pass".into()), None);
//! let client = HttpCloudClient::new(credentials)?;
//!
//! client.authenticate().await?;
//! for server in client.list_servers().await? {
//!     println!("{} ({})", server.hostname, server.zone);
//! }
//! # Ok(())
//! # }
//! ```

pub mod credentials;
pub mod error;
pub mod http;
pub mod traits;

pub use credentials::Credentials;
pub use error::{ClientError, Result};
pub use http::{API_ROOT_ENV, DEFAULT_API_ROOT, HttpCloudClient};
pub use traits::CloudApi;
