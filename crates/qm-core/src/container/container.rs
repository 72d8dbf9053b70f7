//! The service container itself: start, list, typed access

use super::catalog::Catalog;
use super::error::LoadError;
use super::traits::Service;
use std::any::Any;
use std::io::Write;
use tracing::debug;

/// Entry tracking a loaded service under its bound name
struct ServiceEntry {
    name: String,
    service: Box<dyn Service>,
}

/// Outcome summary of a `start` call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartReport {
    /// Names newly bound, in load order
    pub started: Vec<String>,
    /// Names that were already bound and had their instance replaced
    pub replaced: Vec<String>,
    /// Names that failed to resolve (keep-alive mode only)
    pub failed: Vec<String>,
}

/// Hosts loaded services under their requested names
///
/// Services load in request order and `list` reports them in that same
/// order. Verbose narration and keep-alive behavior default to off and on
/// respectively, matching the config defaults.
pub struct Container {
    catalog: Catalog,
    entries: Vec<ServiceEntry>,
    verbose: bool,
    keep_alive: bool,
}

impl Container {
    /// Create a container over a catalog of factories
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            entries: Vec::new(),
            verbose: false,
            keep_alive: true,
        }
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn set_keep_alive(&mut self, keep_alive: bool) {
        self.keep_alive = keep_alive;
    }

    pub fn keep_alive(&self) -> bool {
        self.keep_alive
    }

    /// Load services by name, in order
    ///
    /// Verbose mode narrates each attempt on stdout (`Loading <name>... ok`,
    /// `... error`, or `... already loaded`); otherwise failure detail and
    /// the duplicate notice go to stderr.
    ///
    /// A name that is already bound prints a notice; with keep-alive on, a
    /// fresh instance then replaces the bound one and membership and order
    /// are unchanged. Without keep-alive, the first resolution failure or
    /// duplicate aborts the remaining loads and is returned to the caller.
    pub fn start<S: AsRef<str>>(&mut self, names: &[S]) -> Result<StartReport, LoadError> {
        let mut report = StartReport::default();

        for name in names {
            let name = name.as_ref();

            if self.verbose {
                print!("Loading {name}... ");
                let _ = std::io::stdout().flush();
            }

            let factory = match self.catalog.resolve(name) {
                Ok(factory) => factory,
                Err(err) => {
                    if self.verbose {
                        println!("error");
                    } else {
                        eprintln!("{err}");
                    }
                    debug!("Service '{name}' failed to resolve: {err}");
                    if !self.keep_alive {
                        return Err(err);
                    }
                    report.failed.push(name.to_string());
                    continue;
                }
            };

            let already_bound = self.entries.iter().any(|e| e.name == name);
            if already_bound {
                if self.verbose {
                    // The notice doubles as the marker closing the
                    // `Loading <name>... ` line
                    println!("already loaded");
                } else {
                    eprintln!("Service '{name}' already loaded");
                }
                if !self.keep_alive {
                    return Err(LoadError::Duplicate {
                        name: name.to_string(),
                    });
                }
            } else if self.verbose {
                println!("ok");
            }

            let service = (factory.construct)();

            if already_bound {
                // Keep-alive falls through here: a fresh instance replaces
                // the bound one.
                if let Some(entry) = self.entries.iter_mut().find(|e| e.name == name) {
                    entry.service = service;
                }
                report.replaced.push(name.to_string());
            } else {
                self.entries.push(ServiceEntry {
                    name: name.to_string(),
                    service,
                });
                report.started.push(name.to_string());
            }
        }

        Ok(report)
    }

    /// Print every bound name as a bulleted line, in load order
    pub fn list(&self) {
        for entry in &self.entries {
            println!("- {}", entry.name);
        }
    }

    /// Bound names in load order
    pub fn services(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// Check if a name is currently bound
    pub fn is_loaded(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    /// Number of bound services
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Borrow a bound service as a trait object
    pub fn get(&self, name: &str) -> Option<&dyn Service> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.service.as_ref())
    }

    /// Mutably borrow a bound service as a trait object
    ///
    /// The `'static` bound is spelled out: `&mut` is invariant in its
    /// pointee, so the boxed trait object cannot shrink to an elided
    /// lifetime the way the shared borrow in `get` does.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut (dyn Service + 'static)> {
        self.entries
            .iter_mut()
            .find(|e| e.name == name)
            .map(|e| e.service.as_mut())
    }

    /// Borrow a bound service downcast to its concrete type
    pub fn service<T: Any>(&self, name: &str) -> Option<&T> {
        self.get(name)?.as_any().downcast_ref::<T>()
    }

    /// Mutably borrow a bound service downcast to its concrete type
    pub fn service_mut<T: Any>(&mut self, name: &str) -> Option<&mut T> {
        self.get_mut(name)?.as_any_mut().downcast_mut::<T>()
    }

    /// The catalog backing this container
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Mutable access to the backing catalog, for registration and discovery
    pub fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }
}
