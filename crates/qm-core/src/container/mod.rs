//! Service container: named factories, dynamic loading, typed access
//!
//! A [`Catalog`] maps service names to zero-argument factories, pulling
//! external ones out of dynamic libraries under the services root. The
//! [`Container`] binds constructed instances under their names, in load
//! order, and hands them back as trait objects or concrete types.

pub mod catalog;
pub mod container;
pub mod context;
pub mod error;
pub mod loader;
pub mod traits;
pub mod types;

pub use catalog::{Catalog, ServiceConstructor, ServiceFactory};
pub use container::{Container, StartReport};
pub use context::ServiceContext;
pub use error::{LoadError, ServiceError};
pub use loader::{LoaderError, ServiceLoader, SERVICE_FACTORY_SYMBOL};
pub use traits::Service;
pub use types::{ArgSpec, OperationSpec, ServiceInfo};
