//! Example external service for quartermaster
//!
//! This is a stub service demonstrating how to build an external service
//! that the container can dynamically load.
//!
//! # Building
//!
//! ```bash
//! cargo build --release
//! ```
//!
//! This produces a shared library at:
//! - macOS: `target/release/libqm_service_stub.dylib`
//! - Linux: `target/release/libqm_service_stub.so`
//! - Windows: `target/release/qm_service_stub.dll`
//!
//! # Installing
//!
//! Copy the library under the services root (default
//! `~/.config/qm/services/`), into a directory named after the service:
//!
//! ```bash
//! mkdir -p ~/.config/qm/services/stub
//! cp target/release/libqm_service_stub.so ~/.config/qm/services/stub/
//! ```
//!
//! Then `qm load stub` resolves it like any built-in.

use quartermaster_core::container::{Service, ServiceFactory, ServiceInfo};
use std::any::Any;
use std::sync::Arc;

/// Stub service for demonstration
pub struct StubService;

impl Service for StubService {
    fn info(&self) -> ServiceInfo {
        ServiceInfo {
            name: "stub",
            version: env!("CARGO_PKG_VERSION"),
            description: "Example stub service for demonstration",
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// C-ABI function that creates the service factory
///
/// This function MUST be exported with `#[no_mangle]` and `extern "C"`.
/// The container looks for this symbol when loading the library.
///
/// # Safety
///
/// The returned pointer must be created with `Box::into_raw()` and will be
/// freed by the container using `Box::from_raw()`.
#[no_mangle]
pub extern "C" fn qm_create_service_factory() -> *mut ServiceFactory {
    let factory = ServiceFactory {
        name: "stub".to_string(),
        description: "Example stub service for demonstration".to_string(),
        construct: Arc::new(|| Box::new(StubService) as Box<dyn Service>),
    };

    Box::into_raw(Box::new(factory))
}
