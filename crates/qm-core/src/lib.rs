//! Core library for quartermaster (qm)
//!
//! A service container: a [`container::Catalog`] resolves service names to
//! zero-argument factories (built-ins plus dynamic libraries discovered
//! under a services root), and a [`container::Container`] binds constructed
//! instances under their names for the lifetime of the process.
//!
//! Services are opaque behind the [`container::Service`] trait; callers
//! that need a concrete type look it up by name and downcast. The built-in
//! [`services::mail`] service is the reference implementation of the
//! contract.

pub mod config;
pub mod container;
pub mod home;
pub mod logging;
pub mod services;

pub use container::{
    Catalog, Container, LoadError, Service, ServiceContext, ServiceError, ServiceFactory,
    StartReport,
};

// Re-export toml for service config access
pub use toml;
