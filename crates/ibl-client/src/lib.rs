//! Client library for the iPlayer Business Layer (IBL) catalogue API.
//!
//! [`IblClient`] exposes one method per catalogue view (episodes, programmes,
//! categories, channels, highlights, broadcasts). Each maps to a fixed
//! [`Endpoint`] and goes through the [`Request`] layer, which joins paths onto
//! the base URL, forwards [`QueryOptions`] as query parameters, unwraps the
//! response property and, when `autoPaginate` is set, walks every page.
//!
//! The transport is an injected [`LocalHttpDelegate`]; [`ReqwestDelegate`] is
//! the default.
//!
//! ```no_run
//! use ibl_client::{IblClient, QueryOptions};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let client = IblClient::builder().build()?;
//! let options = QueryOptions::new().with("rights", "web");
//! let episodes = client.get_episodes(["p03c0hx5", "p03bm6zg"], &options).await?;
//! # Ok(())
//! # }
//! ```

/// Callback adapter.
pub mod callback;
mod client;
/// Construction settings.
mod config;
/// HTTP transport.
pub mod delegate;
mod endpoint;
mod options;
mod payload;
mod pids;
mod request;

pub use callback::{AsCallback, register_callback};
#[allow(clippy::module_name_repetitions)]
pub use client::{DEFAULT_BASE_URL, IblClient, IblClientBuilder};
pub use config::ClientOptions;
pub use delegate::{HttpDelegate, LocalHttpDelegate, ReqwestDelegate, TransportError};
pub use endpoint::{CallStyle, Endpoint};
pub use options::{AUTO_PAGINATE, PAGE, PER_PAGE, QueryOptions, QueryValue};
pub use payload::Payload;
pub use pids::{Pids, valid_id};
pub use request::{DEFAULT_PAGE, DEFAULT_PER_PAGE, PageInfo, Request};
