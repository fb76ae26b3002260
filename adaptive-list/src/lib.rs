//! # adaptive-list
//!
//! A small REST client layer for backends whose list endpoints disagree on how
//! pagination is spelled.
//!
//! ## Components
//!
//! - **Client:** reqwest-backed [`ApiClient`] with a typestate builder and a
//!   request/response middleware chain (bearer token, 401 handling).
//! - **Intent & shapes:** [`ListRequestIntent`] describes the page the caller wants,
//!   [`QueryShape`] the three ways of putting it on the wire.
//! - **Fetcher:** [`AdaptiveListFetcher`] tries the shapes in order and normalizes
//!   whatever envelope comes back into a [`ListFetchOutcome`].

pub mod builder;
pub mod client;
pub mod envelope;
pub mod error;
pub mod fetcher;
pub mod intent;
pub mod middleware;
pub mod shape;

pub use builder::{ApiClientBuilder, Missing, Present};
pub use client::{ApiClient, Transport};
pub use envelope::{ListEnvelope, ListFetchOutcome, Pagination};
pub use error::{ListFetchError, TransportError};
pub use fetcher::{AdaptiveListFetcher, is_unknown_pagination_param_error};
pub use intent::{FilterValue, ListRequestIntent};
pub use middleware::{BearerAuth, Middleware, TokenProvider, UnauthorizedHandler};
pub use shape::QueryShape;
