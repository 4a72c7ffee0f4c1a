//! Static/API gateway
//!
//! Serves the built frontend bundle, gates `/api/*` behind the shared
//! secret, proxies API calls to the backend, and applies CORS and security
//! headers. The backend itself (CSV parsing, email dispatch) is a separate
//! service; only its HTTP contract matters here.

pub mod error;
pub mod middleware;
pub mod proxy;
pub mod routes;
pub mod server;
pub mod state;
