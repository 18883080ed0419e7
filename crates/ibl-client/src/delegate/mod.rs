//! HTTP delegate: the transport capability the request layer depends on.
//!
//! The crate only needs `GET(url, query) -> JSON`. [`ReqwestDelegate`] is the
//! default implementation; anything implementing [`LocalHttpDelegate`] can be
//! injected instead (test doubles, caching or retrying middleware).

mod api;
mod error;
mod http;

#[allow(clippy::module_name_repetitions)]
pub use api::{HttpDelegate, LocalHttpDelegate};
pub use error::TransportError;
pub use http::{DEFAULT_RETRY_DELAY, DEFAULT_TIMEOUT, ReqwestDelegate, ReqwestDelegateBuilder};
