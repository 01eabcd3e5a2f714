//! FFDI Registry
//!
//! This crate describes how the FFDI workflow configuration talks to the
//! metadata registry. A configuration only stores opaque identifiers; the
//! registry is the authority on whether those identifiers refer to real,
//! registered entities.
//!
//! The [`Registry`] trait is the lookup contract: given an entity kind, a
//! registry endpoint, an identifier and bearer credentials, return the
//! registered entity or fail. [`HttpRegistry`] implements it over HTTP.
//!
//! Credentials come from an [`AuthProvider`], which is asked for a fresh
//! token on every lookup.

mod auth;
mod entity;
mod error;
mod http;
mod registry;

pub use auth::{AuthProvider, Credentials, EnvToken, StaticToken};
pub use entity::{EntityKind, RegisteredEntity};
pub use error::{AuthError, RegistryError};
pub use http::HttpRegistry;
pub use registry::Registry;
