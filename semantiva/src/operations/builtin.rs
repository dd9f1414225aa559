//! Built-in context operations.

use crate::components::{Component, ComponentClass, ComponentKind};
use crate::context::ContextObserver;
use crate::errors::Result;
use tracing::debug;

/// Leaves the context unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextPassthrough;

impl Component for ContextPassthrough {
    fn process(&self, _observer: &mut ContextObserver<'_>) -> Result<()> {
        Ok(())
    }
}

/// Moves a value from one key to another.
#[derive(Debug, Clone)]
pub struct ContextRenamer {
    old_key: String,
    new_key: String,
}

impl ContextRenamer {
    /// Creates a renamer.
    #[must_use]
    pub fn new(old_key: impl Into<String>, new_key: impl Into<String>) -> Self {
        Self {
            old_key: old_key.into(),
            new_key: new_key.into(),
        }
    }
}

impl Component for ContextRenamer {
    fn process(&self, observer: &mut ContextObserver<'_>) -> Result<()> {
        rename_key(observer, &self.old_key, &self.new_key)
    }

    fn required_keys(&self) -> Vec<String> {
        vec![self.old_key.clone()]
    }

    fn created_keys(&self) -> Vec<String> {
        vec![self.new_key.clone()]
    }

    fn suppressed_keys(&self) -> Vec<String> {
        vec![self.old_key.clone()]
    }
}

/// Removes a key.
#[derive(Debug, Clone)]
pub struct ContextDeleter {
    key: String,
}

impl ContextDeleter {
    /// Creates a deleter.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Component for ContextDeleter {
    fn process(&self, observer: &mut ContextObserver<'_>) -> Result<()> {
        if observer.delete(&self.key, None)?.is_none() {
            debug!(key = %self.key, "Delete of absent context key");
        }
        Ok(())
    }

    fn required_keys(&self) -> Vec<String> {
        vec![self.key.clone()]
    }

    fn suppressed_keys(&self) -> Vec<String> {
        vec![self.key.clone()]
    }
}

/// Moves `old_key` to `new_key` in every scope that holds it.
///
/// The main scope moves first, then each collection slice moves its own
/// override, so per-item values survive the collection-wide write. Absent
/// keys are a no-op.
///
/// On a chained context only the local layer is written, so a value held by
/// a parent layer stays visible: on a chained context this copies rather
/// than moves.
pub fn rename_key(observer: &mut ContextObserver<'_>, old_key: &str, new_key: &str) -> Result<()> {
    if old_key == new_key {
        return Ok(());
    }

    let mut moves = Vec::new();
    for scope in observer.scopes() {
        if let Some(value) = observer.get_scoped(old_key, scope)? {
            moves.push((scope, value.clone()));
        }
    }

    if moves.is_empty() {
        debug!(old_key, new_key, "Rename of absent context key");
        return Ok(());
    }

    for (scope, value) in &moves {
        if scope.is_none() {
            observer.update(new_key, value.clone(), None)?;
            observer.delete(old_key, None)?;
        }
    }
    for (scope, value) in moves {
        if let Some(index) = scope {
            observer.update(new_key, value, Some(index))?;
            observer.delete(old_key, Some(index))?;
        }
    }
    Ok(())
}

/// Builds a component class that renames `old_key` to `new_key`.
pub fn context_renamer_factory(old_key: impl Into<String>, new_key: impl Into<String>) -> ComponentClass {
    let old_key = old_key.into();
    let new_key = new_key.into();
    let name = format!("Rename_{old_key}_to_{new_key}");
    ComponentClass::new(name, ComponentKind::ContextProcessor, move || {
        Box::new(ContextRenamer::new(old_key.clone(), new_key.clone()))
    })
}

/// Builds a component class that deletes `key`.
pub fn context_deleter_factory(key: impl Into<String>) -> ComponentClass {
    let key = key.into();
    let name = format!("Delete_{key}");
    ComponentClass::new(name, ComponentKind::ContextProcessor, move || {
        Box::new(ContextDeleter::new(key.clone()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{ChainedContext, Context, ContextCollectionType, ContextStore, ContextType};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;

    fn run(class: &ComponentClass, ctx: &mut Context) {
        class
            .instantiate()
            .process(&mut ContextObserver::new(ctx))
            .unwrap();
    }

    #[test]
    fn test_rename_flat() {
        let mut ctx = Context::from(ContextType::from_iter([("a", json!(5))]));
        run(&context_renamer_factory("a", "b"), &mut ctx);

        assert_eq!(ctx.get_value("b"), Some(&json!(5)));
        assert_eq!(ctx.get_value("a"), None);
    }

    #[test]
    fn test_rename_absent_key_is_noop() {
        let mut ctx = Context::from(ContextType::from_iter([("c", json!(1))]));
        run(&context_renamer_factory("a", "b"), &mut ctx);

        assert_eq!(ctx.keys(), vec!["c".to_string()]);
    }

    #[test]
    fn test_rename_same_key_keeps_value() {
        let mut ctx = Context::from(ContextType::from_iter([("a", json!(1))]));
        run(&context_renamer_factory("a", "a"), &mut ctx);

        assert_eq!(ctx.get_value("a"), Some(&json!(1)));
    }

    #[test]
    fn test_rename_collection_keeps_slice_overrides() {
        let mut collection = ContextCollectionType::with_len(2);
        collection.set_value("gain", json!(1.0));
        collection.set_item_value(1, "gain", json!(2.0)).unwrap();
        let mut ctx = Context::from(collection);

        run(&context_renamer_factory("gain", "level"), &mut ctx);

        let collection = ctx.as_collection().unwrap();
        assert_eq!(collection.get_item_value(0, "level").unwrap(), Some(&json!(1.0)));
        assert_eq!(collection.get_item_value(1, "level").unwrap(), Some(&json!(2.0)));
        assert_eq!(collection.get_item_value(0, "gain").unwrap(), None);
        assert_eq!(collection.get_item_value(1, "gain").unwrap(), None);
    }

    #[test]
    fn test_rename_chained_copies_from_parent() {
        let parent = Arc::new(ContextType::from_iter([("a", json!(5))]));
        let mut ctx = Context::from(ChainedContext::new(parent.clone()));

        run(&context_renamer_factory("a", "b"), &mut ctx);

        assert_eq!(ctx.get_value("b"), Some(&json!(5)));
        assert_eq!(ctx.get_value("a"), Some(&json!(5)));

        let chain = ctx.as_chained().unwrap();
        assert_eq!(chain.local().get_value("b"), Some(&json!(5)));
        assert!(!chain.local().contains_key("a"));
        assert_eq!(parent.get_value("a"), Some(&json!(5)));
    }

    #[test]
    fn test_rename_chained_local_value_moves() {
        let parent = Arc::new(ContextType::new());
        let mut chain = ChainedContext::new(parent);
        chain.set_value("a", json!(3));
        let mut ctx = Context::from(chain);

        run(&context_renamer_factory("a", "b"), &mut ctx);

        assert_eq!(ctx.get_value("b"), Some(&json!(3)));
        assert_eq!(ctx.get_value("a"), None);
    }

    #[test]
    fn test_delete_chained_leaves_parent_value() {
        let parent = Arc::new(ContextType::from_iter([("a", json!(5))]));
        let mut chain = ChainedContext::new(parent.clone());
        chain.set_value("a", json!(6));
        let mut ctx = Context::from(chain);

        run(&context_deleter_factory("a"), &mut ctx);

        let chain = ctx.as_chained().unwrap();
        assert!(!chain.local().contains_key("a"));
        assert_eq!(ctx.get_value("a"), Some(&json!(5)));
        assert_eq!(parent.get_value("a"), Some(&json!(5)));
    }

    #[test]
    fn test_delete() {
        let mut ctx = Context::from(ContextType::from_iter([("a", json!(5)), ("c", json!(7))]));
        run(&context_deleter_factory("a"), &mut ctx);

        assert_eq!(ctx.keys(), vec!["c".to_string()]);
        assert_eq!(ctx.get_value("c"), Some(&json!(7)));
    }

    #[test]
    fn test_declared_keys() {
        let renamer = context_renamer_factory("a", "b").instantiate();
        assert_eq!(renamer.required_keys(), vec!["a".to_string()]);
        assert_eq!(renamer.created_keys(), vec!["b".to_string()]);
        assert_eq!(renamer.suppressed_keys(), vec!["a".to_string()]);

        let deleter = context_deleter_factory("a").instantiate();
        assert_eq!(deleter.suppressed_keys(), vec!["a".to_string()]);
        assert!(deleter.created_keys().is_empty());
    }

    #[test]
    fn test_factory_names() {
        assert_eq!(context_renamer_factory("a", "b").name(), "Rename_a_to_b");
        assert_eq!(context_deleter_factory("a").name(), "Delete_a");
    }

    #[test]
    fn test_passthrough() {
        let mut ctx = Context::from(ContextType::from_iter([("a", json!(1))]));
        let before = ctx.clone();
        ContextPassthrough
            .process(&mut ContextObserver::new(&mut ctx))
            .unwrap();
        assert_eq!(ctx, before);
    }
}
