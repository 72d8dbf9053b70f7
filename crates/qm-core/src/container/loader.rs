//! Dynamic library loading for external services

use super::catalog::ServiceFactory;
use libloading::{Library, Symbol};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// C-ABI symbol every service library must export
pub const SERVICE_FACTORY_SYMBOL: &[u8] = b"qm_create_service_factory";

/// Errors from loading service libraries
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("services root is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("failed to read services root {dir}: {source}")]
    ReadDir {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no service library under {0}")]
    NoLibrary(PathBuf),

    #[error("failed to load library {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    #[error("library {path} does not export 'qm_create_service_factory': {source}")]
    MissingSymbol {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    #[error("factory function in {0} returned null")]
    NullFactory(PathBuf),
}

/// Loader for dynamically loaded service libraries
///
/// A service named `ledger` lives under the services root either as a
/// directory `ledger/` holding one library, or as a flat `ledger.so` /
/// `libledger.so` file. Each library must export a C-ABI function named
/// `qm_create_service_factory`.
pub struct ServiceLoader {
    /// Keep loaded libraries alive (constructors point into them)
    #[allow(dead_code)]
    libraries: Vec<Library>,
}

impl ServiceLoader {
    /// Create a new loader
    pub fn new() -> Self {
        Self {
            libraries: Vec::new(),
        }
    }

    /// Load the library for a single named service
    ///
    /// # Errors
    ///
    /// Returns `LoaderError::NoLibrary` when nothing under the root answers
    /// to the name, or the underlying open/symbol error when a candidate
    /// library exists but cannot be used.
    pub fn load_service(&mut self, root: &Path, name: &str) -> Result<ServiceFactory, LoaderError> {
        let dir = root.join(name);

        let candidate = if dir.is_dir() {
            Self::find_library_in(&dir).ok_or_else(|| LoaderError::NoLibrary(dir.clone()))?
        } else {
            Self::find_flat_library(root, name).ok_or(LoaderError::NoLibrary(dir))?
        };

        self.load_library(&candidate)
    }

    /// Scan the services root and load every service library found
    ///
    /// Each immediate subdirectory (or flat library file) is treated as one
    /// service. Errors for individual libraries are logged as warnings and
    /// do not fail the entire operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the root exists but cannot be read as a directory.
    pub fn discover(&mut self, root: &Path) -> Result<Vec<ServiceFactory>, LoaderError> {
        if !root.exists() {
            debug!("Services root does not exist, skipping: {}", root.display());
            return Ok(Vec::new());
        }

        if !root.is_dir() {
            return Err(LoaderError::NotADirectory(root.to_path_buf()));
        }

        let entries = std::fs::read_dir(root).map_err(|e| LoaderError::ReadDir {
            dir: root.to_path_buf(),
            source: e,
        })?;

        let mut factories = Vec::new();

        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("Failed to read directory entry: {e}");
                    continue;
                }
            };

            let path = entry.path();

            let candidate = if path.is_dir() {
                match Self::find_library_in(&path) {
                    Some(lib) => lib,
                    None => continue,
                }
            } else if Self::is_service_library(&path) {
                path
            } else {
                continue;
            };

            match self.load_library(&candidate) {
                Ok(factory) => {
                    debug!(
                        "Loaded service '{}' from {}",
                        factory.name,
                        candidate.display()
                    );
                    factories.push(factory);
                }
                Err(e) => {
                    warn!("Failed to load service from {}: {e}", candidate.display());
                }
            }
        }

        Ok(factories)
    }

    /// Load a single service library
    ///
    /// # Safety
    ///
    /// This function loads dynamic libraries, which is inherently unsafe.
    /// Only trusted libraries should live under the services root.
    fn load_library(&mut self, path: &Path) -> Result<ServiceFactory, LoaderError> {
        // Safety: we trust that the library at `path` is a valid service
        // library exporting the required symbol.
        let lib = unsafe {
            Library::new(path).map_err(|e| LoaderError::Open {
                path: path.to_path_buf(),
                source: e,
            })?
        };

        // Safety: the exported C-ABI function must match this exact signature.
        let factory = unsafe {
            let symbol: Symbol<extern "C" fn() -> *mut ServiceFactory> =
                lib.get(SERVICE_FACTORY_SYMBOL)
                    .map_err(|e| LoaderError::MissingSymbol {
                        path: path.to_path_buf(),
                        source: e,
                    })?;

            let factory_ptr = symbol();
            if factory_ptr.is_null() {
                return Err(LoaderError::NullFactory(path.to_path_buf()));
            }

            // Take ownership of the factory (the library must have allocated
            // it with Box::into_raw)
            Box::from_raw(factory_ptr)
        };

        // Keep the library alive so the constructor remains valid
        self.libraries.push(lib);

        Ok(*factory)
    }

    /// First library file inside a service directory, by name order
    fn find_library_in(dir: &Path) -> Option<PathBuf> {
        let entries = std::fs::read_dir(dir).ok()?;
        let mut candidates: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| Self::is_service_library(p))
            .collect();
        candidates.sort();
        candidates.into_iter().next()
    }

    /// Flat layout lookup: `<root>/<name>.<ext>` or `<root>/lib<name>.<ext>`
    fn find_flat_library(root: &Path, name: &str) -> Option<PathBuf> {
        for ext in ["so", "dylib", "dll"] {
            for file in [format!("{name}.{ext}"), format!("lib{name}.{ext}")] {
                let candidate = root.join(file);
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
        }
        None
    }

    /// Check if a path is a service library based on file extension
    fn is_service_library(path: &Path) -> bool {
        if !path.is_file() {
            return false;
        }

        let extension = path.extension().and_then(|e| e.to_str());

        match extension {
            Some("dylib") => true, // macOS
            Some("so") => true,    // Linux
            Some("dll") => true,   // Windows
            _ => false,
        }
    }
}

impl Default for ServiceLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_service_library() {
        let temp_dir = tempfile::tempdir().unwrap();

        let dylib_path = temp_dir.path().join("test.dylib");
        let so_path = temp_dir.path().join("test.so");
        let dll_path = temp_dir.path().join("test.dll");
        let txt_path = temp_dir.path().join("test.txt");

        std::fs::write(&dylib_path, "test").unwrap();
        std::fs::write(&so_path, "test").unwrap();
        std::fs::write(&dll_path, "test").unwrap();
        std::fs::write(&txt_path, "test").unwrap();

        assert!(ServiceLoader::is_service_library(&dylib_path));
        assert!(ServiceLoader::is_service_library(&so_path));
        assert!(ServiceLoader::is_service_library(&dll_path));
        assert!(!ServiceLoader::is_service_library(&txt_path));

        // Non-existent files should return false
        assert!(!ServiceLoader::is_service_library(Path::new(
            "/nonexistent/test.so"
        )));
    }

    #[test]
    fn test_load_service_missing_everywhere() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut loader = ServiceLoader::new();

        let err = loader.load_service(temp_dir.path(), "ledger").unwrap_err();
        assert!(err.to_string().contains("no service library"));
        assert!(err.to_string().contains("ledger"));
    }

    #[test]
    fn test_load_service_empty_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(temp_dir.path().join("ledger")).unwrap();

        let mut loader = ServiceLoader::new();
        let err = loader.load_service(temp_dir.path(), "ledger").unwrap_err();
        assert!(matches!(err, LoaderError::NoLibrary(_)));
    }

    #[test]
    fn test_load_service_rejects_garbage_library() {
        let temp_dir = tempfile::tempdir().unwrap();
        let service_dir = temp_dir.path().join("ledger");
        std::fs::create_dir(&service_dir).unwrap();
        std::fs::write(service_dir.join("ledger.so"), "not a real library").unwrap();

        let mut loader = ServiceLoader::new();
        let err = loader.load_service(temp_dir.path(), "ledger").unwrap_err();
        assert!(matches!(err, LoaderError::Open { .. }));
    }

    #[test]
    fn test_load_service_flat_layout_lookup() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join("libledger.so"), "garbage").unwrap();

        let mut loader = ServiceLoader::new();
        // Found via the lib<name> fallback, then rejected as unloadable
        let err = loader.load_service(temp_dir.path(), "ledger").unwrap_err();
        assert!(matches!(err, LoaderError::Open { .. }));
    }

    #[test]
    fn test_discover_missing_root() {
        let mut loader = ServiceLoader::new();
        let result = loader.discover(Path::new("/nonexistent/path"));
        assert!(result.is_ok());
        assert_eq!(result.unwrap().len(), 0);
    }

    #[test]
    fn test_discover_empty_root() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut loader = ServiceLoader::new();
        let result = loader.discover(temp_dir.path());
        assert!(result.is_ok());
        assert_eq!(result.unwrap().len(), 0);
    }

    #[test]
    fn test_discover_root_not_a_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file_path = temp_dir.path().join("services");
        std::fs::write(&file_path, "test").unwrap();

        let mut loader = ServiceLoader::new();
        let result = loader.discover(&file_path);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not a directory"));
    }

    #[test]
    fn test_discover_skips_unloadable_libraries() {
        let temp_dir = tempfile::tempdir().unwrap();
        let service_dir = temp_dir.path().join("broken");
        std::fs::create_dir(&service_dir).unwrap();
        std::fs::write(service_dir.join("broken.so"), "garbage").unwrap();

        let mut loader = ServiceLoader::new();
        let factories = loader.discover(temp_dir.path()).unwrap();
        assert_eq!(factories.len(), 0);
    }
}
