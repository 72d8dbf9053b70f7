//! Authorization scope table for the mail service

/// One authorization scope the remote mail API understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope {
    /// Short name used in config and `change_scope`
    pub name: &'static str,
    /// Full scope URL granted to the token
    pub url: &'static str,
    /// What the scope permits
    pub description: &'static str,
}

/// Scopes the service accepts, from the provider's published list
pub const SCOPES: &[Scope] = &[
    Scope {
        name: "readonly",
        url: "https://www.googleapis.com/auth/gmail.readonly",
        description: "Read all resources and their metadata, but no write operations.",
    },
    Scope {
        name: "compose",
        url: "https://www.googleapis.com/auth/gmail.compose",
        description: "Create, read, update, and delete drafts. Send messages and drafts.",
    },
    Scope {
        name: "send",
        url: "https://www.googleapis.com/auth/gmail.send",
        description: "Send messages only. No read or modify privileges on mailbox.",
    },
    Scope {
        name: "insert",
        url: "https://www.googleapis.com/auth/gmail.insert",
        description: "Insert and import messages only.",
    },
    Scope {
        name: "labels",
        url: "https://www.googleapis.com/auth/gmail.labels",
        description: "Create, read, update, and delete labels only.",
    },
    Scope {
        name: "modify",
        url: "https://www.googleapis.com/auth/gmail.modify",
        description: "All read/write operations except immediate, permanent deletion of \
                      threads and messages, bypassing Trash.",
    },
    Scope {
        name: "metadata",
        url: "https://www.googleapis.com/auth/gmail.metadata",
        description: "Read resource metadata including labels, history records, and message \
                      headers, but not the message body or attachments.",
    },
    Scope {
        name: "basic",
        url: "https://www.googleapis.com/auth/gmail.settings.basic",
        description: "Manage basic mail settings.",
    },
    Scope {
        name: "sharing",
        url: "https://www.googleapis.com/auth/gmail.settings.sharing",
        description: "Manage sensitive mail settings, including forwarding rules and aliases.",
    },
    Scope {
        name: "all",
        url: "https://mail.google.com/",
        description: "Full access to the account, including permanent deletion of threads \
                      and messages.",
    },
];

/// Look up a scope by its short name
pub fn find(name: &str) -> Option<&'static Scope> {
    SCOPES.iter().find(|s| s.name == name)
}

/// Short names, in table order
pub fn names() -> Vec<&'static str> {
    SCOPES.iter().map(|s| s.name).collect()
}

/// Rendered help block for scope values
pub fn help_text() -> String {
    let mut out = String::new();
    out.push_str("Help on scope values:\n");
    out.push_str("---------------------\n");
    for scope in SCOPES {
        out.push_str(&format!("- {}\n", scope.name));
        out.push_str(&format!("  value: {}\n", scope.url));
        out.push_str(&format!("  description: {}\n", scope.description));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_known_scope() {
        let scope = find("send").unwrap();
        assert_eq!(scope.url, "https://www.googleapis.com/auth/gmail.send");
    }

    #[test]
    fn test_find_unknown_scope() {
        assert!(find("delete-everything").is_none());
        // Lookup is exact, not case-folded
        assert!(find("SEND").is_none());
    }

    #[test]
    fn test_table_is_complete() {
        assert_eq!(SCOPES.len(), 10);
        assert_eq!(names().first(), Some(&"readonly"));
        assert_eq!(names().last(), Some(&"all"));
    }

    #[test]
    fn test_help_text_covers_every_scope() {
        let help = help_text();
        assert!(help.starts_with("Help on scope values:"));
        for scope in SCOPES {
            assert!(help.contains(scope.name));
            assert!(help.contains(scope.url));
        }
    }
}
