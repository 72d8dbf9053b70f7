//! Factory catalog resolving service names to constructors

use super::error::LoadError;
use super::loader::{LoaderError, ServiceLoader};
use super::traits::Service;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// A factory function that creates a fresh service instance
pub type ServiceConstructor = Arc<dyn Fn() -> Box<dyn Service> + Send + Sync>;

/// A named constructor for a service
#[derive(Clone)]
pub struct ServiceFactory {
    /// Service name the factory answers to (e.g., "mail")
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Factory function: takes no arguments, returns a fresh instance
    pub construct: ServiceConstructor,
}

impl std::fmt::Debug for ServiceFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceFactory")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("construct", &"<constructor>")
            .finish()
    }
}

/// Resolves service names to factories
///
/// Built-in factories are registered up front. External ones are loaded
/// lazily from the services root the first time their name is requested,
/// so a misconfigured library only surfaces when something asks for it.
pub struct Catalog {
    /// Factories keyed by service name
    factories: HashMap<String, ServiceFactory>,
    loader: ServiceLoader,
    /// Directory scanned for external service libraries, if configured
    services_root: Option<PathBuf>,
}

impl Catalog {
    /// Create a catalog with no registered factories
    pub fn new(services_root: Option<PathBuf>) -> Self {
        Self {
            factories: HashMap::new(),
            loader: ServiceLoader::new(),
            services_root,
        }
    }

    /// Register a factory under its own name
    ///
    /// If a factory with the same name already exists, it will be replaced.
    pub fn register(&mut self, factory: ServiceFactory) {
        self.factories.insert(factory.name.clone(), factory);
    }

    /// Resolve a name to a factory, loading from the services root on a miss
    ///
    /// # Errors
    ///
    /// Returns `LoadError::NotFound` when the name is neither registered nor
    /// loadable; the detail says what was tried.
    pub fn resolve(&mut self, name: &str) -> Result<&ServiceFactory, LoadError> {
        let Self {
            factories,
            loader,
            services_root,
        } = self;

        match factories.entry(name.to_string()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let Some(root) = services_root.as_deref() else {
                    return Err(LoadError::NotFound {
                        name: name.to_string(),
                        detail: "not a built-in service and no services root is configured"
                            .to_string(),
                    });
                };

                let factory =
                    loader
                        .load_service(root, name)
                        .map_err(|e| LoadError::NotFound {
                            name: name.to_string(),
                            detail: e.to_string(),
                        })?;

                // Libraries register under their own name; a mismatch means
                // the directory does not hold the service it claims to.
                if factory.name != name {
                    return Err(LoadError::NotFound {
                        name: name.to_string(),
                        detail: format!(
                            "library under {} provides service '{}'",
                            root.join(name).display(),
                            factory.name
                        ),
                    });
                }

                debug!("Loaded service factory '{name}' from {}", root.display());
                Ok(entry.insert(factory))
            }
        }
    }

    /// Load every service library under the services root into the catalog
    ///
    /// Registered names win over discovered ones. Returns how many factories
    /// were added; individual load failures are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error only when the services root itself is unreadable.
    pub fn load_all_external(&mut self) -> Result<usize, LoaderError> {
        let Self {
            factories,
            loader,
            services_root,
        } = self;

        let Some(root) = services_root.as_deref() else {
            return Ok(0);
        };

        let mut added = 0;
        for factory in loader.discover(root)? {
            if let Entry::Vacant(entry) = factories.entry(factory.name.clone()) {
                entry.insert(factory);
                added += 1;
            }
        }
        Ok(added)
    }

    /// Get a registered factory without attempting an external load
    pub fn get(&self, name: &str) -> Option<&ServiceFactory> {
        self.factories.get(name)
    }

    /// Check if a factory is registered
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// List registered factory names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// The services root this catalog loads external libraries from
    pub fn services_root(&self) -> Option<&PathBuf> {
        self.services_root.as_ref()
    }

    /// Get the number of registered factories
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(None)
    }
}
