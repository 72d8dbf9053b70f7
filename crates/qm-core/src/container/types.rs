/// Service metadata — identity and description
#[derive(Debug, Clone)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
}

/// One argument of a service operation
#[derive(Debug, Clone)]
pub struct ArgSpec {
    pub name: &'static str,
    pub ty: &'static str,
    /// Rendered default value, if the argument has one
    pub default: Option<&'static str>,
}

/// A callable operation a service exposes, as shown by `qm info`
#[derive(Debug, Clone)]
pub struct OperationSpec {
    pub name: &'static str,
    pub args: Vec<ArgSpec>,
    pub returns: &'static str,
    pub doc: &'static str,
}

impl OperationSpec {
    /// Human-readable signature, e.g.
    /// `send_message(to: address, subject: text) -> receipt`
    pub fn signature(&self) -> String {
        let args = self
            .args
            .iter()
            .map(|a| match a.default {
                Some(default) => format!("{}: {} = {}", a.name, a.ty, default),
                None => format!("{}: {}", a.name, a.ty),
            })
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}({}) -> {}", self.name, args, self.returns)
    }
}
