//! # course-catalog
//!
//! Typed client for the course platform's admin API: categories, levels, courses,
//! subjects, plans, subscriptions, payments, teachers and users.
//!
//! Every collection is listed through [`adaptive_list::AdaptiveListFetcher`], so
//! callers never need to know which pagination spelling an endpoint accepts.
//! Create, update and delete take the acting [`Role`] and are checked against the
//! role table in [`permissions`] before any request is sent.

pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod permissions;
pub mod resources;

#[cfg(test)]
mod test_utils;

pub use auth::InMemoryTokenStore;
pub use client::CatalogClient;
pub use config::{CatalogConfig, LimitsConfig};
pub use errors::{ApiError, CatalogError};
pub use permissions::{Permission, Role, UnknownRole};
pub use resources::{CatalogResource, ListQuery, Page, ResourceApi, ResourceId};
