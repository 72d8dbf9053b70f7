use quartermaster_core::container::{
    Catalog, Container, LoadError, Service, ServiceFactory, ServiceInfo,
};
use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// ============================================================================
// Mock/Test Services
// ============================================================================

/// A service that does nothing but exist
struct MockService {
    name: &'static str,
}

impl Service for MockService {
    fn info(&self) -> ServiceInfo {
        ServiceInfo {
            name: self.name,
            version: "1.0.0",
            description: "Mock service for testing",
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn mock_factory(name: &'static str) -> ServiceFactory {
    ServiceFactory {
        name: name.to_string(),
        description: "Mock service for testing".to_string(),
        construct: Arc::new(move || Box::new(MockService { name }) as Box<dyn Service>),
    }
}

/// Factory that counts how many times it constructed an instance
fn counting_factory(name: &'static str, counter: Arc<AtomicUsize>) -> ServiceFactory {
    ServiceFactory {
        name: name.to_string(),
        description: "Counting mock".to_string(),
        construct: Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Box::new(MockService { name }) as Box<dyn Service>
        }),
    }
}

fn container_with(names: &[&'static str]) -> Container {
    let mut catalog = Catalog::new(None);
    for name in names {
        catalog.register(mock_factory(name));
    }
    Container::new(catalog)
}

// ============================================================================
// Load ordering and registry membership
// ============================================================================

#[test]
fn test_start_registers_all_names_in_order() {
    let mut container = container_with(&["mail", "ledger", "calendar"]);

    let report = container.start(&["mail", "ledger", "calendar"]).unwrap();

    assert_eq!(report.started, vec!["mail", "ledger", "calendar"]);
    assert!(report.replaced.is_empty());
    assert!(report.failed.is_empty());

    assert_eq!(container.services(), vec!["mail", "ledger", "calendar"]);
    for name in ["mail", "ledger", "calendar"] {
        assert!(container.is_loaded(name));
    }
}

#[test]
fn test_start_across_calls_preserves_order() {
    let mut container = container_with(&["mail", "ledger"]);

    container.start(&["ledger"]).unwrap();
    container.start(&["mail"]).unwrap();

    assert_eq!(container.services(), vec!["ledger", "mail"]);
}

// ============================================================================
// Duplicate loads
// ============================================================================

#[test]
fn test_duplicate_with_keep_alive_keeps_membership_and_reinstantiates() {
    let counter = Arc::new(AtomicUsize::new(0));
    let mut catalog = Catalog::new(None);
    catalog.register(counting_factory("mail", counter.clone()));
    let mut container = Container::new(catalog);

    container.start(&["mail"]).unwrap();
    assert_eq!(counter.load(Ordering::SeqCst), 1);

    // keep_alive defaults to true: the notice prints, the registry is
    // unchanged, and a fresh instance replaces the bound one
    let report = container.start(&["mail"]).unwrap();
    assert_eq!(report.replaced, vec!["mail"]);
    assert!(report.started.is_empty());

    assert_eq!(container.services(), vec!["mail"]);
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[test]
fn test_duplicate_without_keep_alive_errors_with_exit_code_1() {
    let mut container = container_with(&["mail", "ledger"]);
    container.set_keep_alive(false);

    container.start(&["mail"]).unwrap();

    let err = container.start(&["mail", "ledger"]).unwrap_err();
    assert!(matches!(err, LoadError::Duplicate { ref name } if name == "mail"));
    assert_eq!(err.exit_code(), 1);

    // Names after the failure were never processed
    assert!(!container.is_loaded("ledger"));
    assert_eq!(container.services(), vec!["mail"]);
}

// ============================================================================
// Resolution failures
// ============================================================================

#[test]
fn test_unresolvable_without_keep_alive_errors_with_exit_code_2() {
    let mut container = container_with(&["mail"]);
    container.set_keep_alive(false);

    let err = container.start(&["ledger"]).unwrap_err();
    assert!(matches!(err, LoadError::NotFound { ref name, .. } if name == "ledger"));
    assert_eq!(err.exit_code(), 2);

    assert!(!container.is_loaded("ledger"));
    assert!(container.is_empty());
}

#[test]
fn test_unresolvable_without_keep_alive_aborts_remaining_names() {
    let mut container = container_with(&["mail"]);
    container.set_keep_alive(false);

    let err = container.start(&["ledger", "mail"]).unwrap_err();
    assert_eq!(err.exit_code(), 2);

    // "mail" came after the failure in the same call
    assert!(!container.is_loaded("mail"));
}

#[test]
fn test_unresolvable_with_keep_alive_continues_past_failure() {
    let mut container = container_with(&["mail"]);

    let report = container.start(&["ledger", "mail"]).unwrap();

    assert_eq!(report.failed, vec!["ledger"]);
    assert_eq!(report.started, vec!["mail"]);
    assert_eq!(container.services(), vec!["mail"]);
    assert!(!container.is_loaded("ledger"));
}

// ============================================================================
// Configuration flags
// ============================================================================

#[test]
fn test_keep_alive_round_trip() {
    let mut container = container_with(&[]);
    assert!(container.keep_alive());

    container.set_keep_alive(false);
    assert!(!container.keep_alive());

    container.set_keep_alive(true);
    assert!(container.keep_alive());
}

#[test]
fn test_verbose_round_trip() {
    let mut container = container_with(&[]);
    assert!(!container.verbose());

    container.set_verbose(true);
    assert!(container.verbose());

    container.set_verbose(false);
    assert!(!container.verbose());
}

// ============================================================================
// Catalog interaction
// ============================================================================

#[test]
fn test_registry_unchanged_when_factory_missing_everywhere() {
    let temp = tempfile::tempdir().unwrap();
    let catalog = Catalog::new(Some(temp.path().join("services")));
    let mut container = Container::new(catalog);
    container.set_keep_alive(false);

    let err = container.start(&["ledger"]).unwrap_err();
    assert_eq!(err.exit_code(), 2);
    assert!(container.is_empty());
}

#[test]
fn test_builtin_catalog_resolves_mail() {
    let catalog = quartermaster_core::services::catalog_with_builtins(None);
    let mut container = Container::new(catalog);

    let report = container.start(&["mail"]).unwrap();
    assert_eq!(report.started, vec!["mail"]);

    let info = container.get("mail").unwrap().info();
    assert_eq!(info.name, "mail");
}
