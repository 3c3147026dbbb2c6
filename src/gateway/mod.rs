//! HTTP-shaped gateway for clients and the worker transport.
//!
//! Two faces share this module: the client-facing route dispatch over the
//! intake service, and the worker-facing hand-off entry over the processing
//! service. Both convert every internal failure into a structured JSON
//! response; no error crosses the gateway unhandled.

mod http;
mod routes;
mod worker;

pub use http::{ApiRequest, ApiResponse};
pub use routes::Gateway;
pub use worker::{WorkerGateway, WorkerResponse};
