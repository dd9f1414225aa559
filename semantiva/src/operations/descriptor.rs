//! The `rename:` / `delete:` descriptor grammar.

use super::{context_deleter_factory, context_renamer_factory};
use crate::components::ComponentClass;
use regex::Regex;
use std::sync::LazyLock;

// One trailing newline may end a descriptor.
static RENAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^rename:(.*?):(.*?)\n?\z").unwrap_or_else(|e| unreachable!("rename pattern: {e}"))
});

static DELETE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^delete:(.*?)\n?\z").unwrap_or_else(|e| unreachable!("delete pattern: {e}"))
});

/// A parsed context-operation descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationDescriptor {
    /// `rename:<old_key>:<new_key>`
    Rename {
        /// Key to move from.
        old_key: String,
        /// Key to move to.
        new_key: String,
    },
    /// `delete:<key>`
    Delete {
        /// Key to remove.
        key: String,
    },
}

impl OperationDescriptor {
    /// Parses a descriptor, trying `rename:` before `delete:`.
    ///
    /// The old key of a rename stops at the first colon, so
    /// `rename:a:b:c` renames `a` to `b:c`.
    #[must_use]
    pub fn parse(descriptor: &str) -> Option<Self> {
        if let Some(caps) = RENAME_PATTERN.captures(descriptor) {
            return Some(Self::Rename {
                old_key: caps[1].to_string(),
                new_key: caps[2].to_string(),
            });
        }

        DELETE_PATTERN.captures(descriptor).map(|caps| Self::Delete {
            key: caps[1].to_string(),
        })
    }

    /// Builds the component class for this operation.
    #[must_use]
    pub fn into_class(self) -> ComponentClass {
        match self {
            Self::Rename { old_key, new_key } => context_renamer_factory(old_key, new_key),
            Self::Delete { key } => context_deleter_factory(key),
        }
    }
}

impl std::fmt::Display for OperationDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rename { old_key, new_key } => write!(f, "rename:{old_key}:{new_key}"),
            Self::Delete { key } => write!(f, "delete:{key}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rename(old_key: &str, new_key: &str) -> OperationDescriptor {
        OperationDescriptor::Rename {
            old_key: old_key.to_string(),
            new_key: new_key.to_string(),
        }
    }

    #[test]
    fn test_parse_rename() {
        assert_eq!(OperationDescriptor::parse("rename:a:b"), Some(rename("a", "b")));
    }

    #[test]
    fn test_parse_rename_old_key_is_non_greedy() {
        assert_eq!(OperationDescriptor::parse("rename:a:b:c"), Some(rename("a", "b:c")));
    }

    #[test]
    fn test_parse_rename_empty_keys() {
        assert_eq!(OperationDescriptor::parse("rename::"), Some(rename("", "")));
    }

    #[test]
    fn test_parse_delete() {
        assert_eq!(
            OperationDescriptor::parse("delete:signal:raw"),
            Some(OperationDescriptor::Delete {
                key: "signal:raw".to_string()
            })
        );
    }

    #[test]
    fn test_parse_rejects_other_strings() {
        assert_eq!(OperationDescriptor::parse("rename:a"), None);
        assert_eq!(OperationDescriptor::parse("Rename:a:b"), None);
        assert_eq!(OperationDescriptor::parse("delete"), None);
        assert_eq!(OperationDescriptor::parse(" delete:a"), None);
        assert_eq!(OperationDescriptor::parse("not_a_real_name"), None);
    }

    #[test]
    fn test_parse_allows_one_trailing_newline() {
        assert_eq!(
            OperationDescriptor::parse("delete:a\n"),
            Some(OperationDescriptor::Delete { key: "a".to_string() })
        );
        assert_eq!(OperationDescriptor::parse("rename:a:b\n"), Some(rename("a", "b")));
        assert_eq!(OperationDescriptor::parse("delete:a\n\n"), None);
        assert_eq!(OperationDescriptor::parse("delete:a\nb"), None);
    }

    #[test]
    fn test_display_round_trips_simple_keys() {
        let descriptor = rename("gain", "level");
        assert_eq!(descriptor.to_string(), "rename:gain:level");
    }

    #[test]
    fn test_into_class() {
        let class = OperationDescriptor::Delete { key: "tmp".into() }.into_class();
        assert_eq!(class.name(), "Delete_tmp");
    }
}
