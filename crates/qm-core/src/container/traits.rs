use super::context::ServiceContext;
use super::error::ServiceError;
use super::types::{OperationSpec, ServiceInfo};
use std::any::Any;

/// A service the container can host
///
/// Instances come out of a zero-argument factory and are bound under the
/// factory's name. Typed access to a concrete service goes through the
/// `as_any` / `as_any_mut` downcast hooks.
pub trait Service: Send + Sync {
    /// Identity and description
    fn info(&self) -> ServiceInfo;

    /// Initialize with the service's config section and data directory
    fn init(&mut self, _ctx: &ServiceContext) -> Result<(), ServiceError> {
        Ok(())
    }

    /// Operations the service exposes, for `qm info`
    fn operations(&self) -> Vec<OperationSpec> {
        Vec::new()
    }

    /// Help text for a topic, if the service has any
    fn help(&self, _topic: &str) -> Option<String> {
        None
    }

    /// Provisioning steps a deployment must complete before init succeeds
    fn requirements(&self) -> Vec<&'static str> {
        Vec::new()
    }

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
