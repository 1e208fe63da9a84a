//! Async client for the Spiget plugin catalog API.
//!
//! # Overview
//! Turns a logical API call (endpoint path plus ordered query parameters)
//! into one HTTP GET, buffers the body, and resolves it to parsed JSON or,
//! when the body is not JSON, the raw text.
//!
//! # Design
//! - `SpigetClient` owns an explicit `ClientConfig`; there is no global state
//!   and several clients can target different hosts side by side.
//! - Requests are built and parsed as plain data (`HttpRequest`,
//!   `HttpResponse`); only `SpigetClient::execute` touches the network.
//! - Every endpoint method is a thin adapter over `SpigetClient::call`.
//! - Transport failures are logged through `tracing` and returned as
//!   `ApiError`, never swallowed.

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod query;
pub mod types;

pub use client::{Callback, SpigetClient};
pub use config::ClientConfig;
pub use endpoints::{Endpoint, DEFAULT_PAGE_SIZE};
pub use error::ApiError;
pub use http::{HttpRequest, HttpResponse};
pub use query::{build_query, QueryParam, QueryValue};
pub use types::ApiResult;
