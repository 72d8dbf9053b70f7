//! Built-in services shipped with the container

pub mod mail;

use crate::container::Catalog;
use std::path::PathBuf;

/// Catalog with every built-in service registered
///
/// External libraries under `services_root` still resolve lazily on top of
/// these.
pub fn catalog_with_builtins(services_root: Option<PathBuf>) -> Catalog {
    let mut catalog = Catalog::new(services_root);
    catalog.register(mail::factory());
    catalog
}
