//! Backend interaction layer for the PillCare client.
//!
//! - `transport`: the `HttpTransport` seam and its reqwest implementation
//! - `api_client`: `ApiClient`, the authenticated request layer
//! - `dto`: login wire types
//! - `testing` (feature `testing`): `ScriptedTransport` for tests

pub mod api_client;
pub mod dto;
pub mod transport;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use api_client::ApiClient;
pub use dto::LoginResponse;
pub use transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, RequestBody};
