//! Scoped dispatch of context updates.

use super::{Context, ContextStore};
use crate::errors::ContextScopeError;
use serde_json::Value;
use tracing::trace;

/// Posts context updates on behalf of a pipeline node.
///
/// The observer borrows whatever context is in scope for the node and routes
/// each write by the shape of that context: collection writes go to the
/// global scope or one slice, chained writes go to the innermost layer, and
/// flat writes set the key directly. Keys and values are never validated.
#[derive(Debug)]
pub struct ContextObserver<'a> {
    context: &'a mut Context,
}

impl<'a> ContextObserver<'a> {
    /// Wraps the context currently in scope.
    pub fn new(context: &'a mut Context) -> Self {
        Self { context }
    }

    /// The observed context.
    #[must_use]
    pub fn context(&self) -> &Context {
        self.context
    }

    /// Mutable access to the observed context.
    pub fn context_mut(&mut self) -> &mut Context {
        self.context
    }

    /// Writes `value` under `key` in the scope selected by `index`.
    ///
    /// - Collection: `None` is a collection-wide write, `Some(i)` touches
    ///   slice `i` only.
    /// - Chained: always the innermost layer.
    /// - Single: the key is set directly.
    ///
    /// # Errors
    ///
    /// Returns `IndexOnNonCollection` when an index is given for a single or
    /// chained context, and `IndexOutOfRange` for a bad slice index.
    pub fn update_context(
        context: &mut Context,
        key: impl Into<String>,
        value: Value,
        index: Option<usize>,
    ) -> Result<(), ContextScopeError> {
        let key = key.into();
        trace!(kind = context.kind(), key = %key, ?index, "Context update");

        match (context, index) {
            (Context::Collection(c), None) => c.set_value(key, value),
            (Context::Collection(c), Some(i)) => c.set_item_value(i, key, value)?,
            (Context::Chained(c), None) => c.set_value(key, value),
            (Context::Single(c), None) => c.set_value(key, value),
            (other, Some(index)) => {
                return Err(ContextScopeError::IndexOnNonCollection {
                    kind: other.kind(),
                    index,
                })
            }
        }
        Ok(())
    }

    /// Removes `key` from the scope selected by `index`.
    ///
    /// A collection-wide delete clears the global scope and every slice.
    ///
    /// # Errors
    ///
    /// Same scoping errors as [`ContextObserver::update_context`].
    pub fn delete_context(
        context: &mut Context,
        key: &str,
        index: Option<usize>,
    ) -> Result<Option<Value>, ContextScopeError> {
        trace!(kind = context.kind(), key, ?index, "Context delete");

        match (context, index) {
            (Context::Collection(c), Some(i)) => c.delete_item_value(i, key),
            (Context::Collection(c), None) => Ok(c.delete_value(key)),
            (Context::Chained(c), None) => Ok(c.delete_value(key)),
            (Context::Single(c), None) => Ok(c.delete_value(key)),
            (other, Some(index)) => Err(ContextScopeError::IndexOnNonCollection {
                kind: other.kind(),
                index,
            }),
        }
    }

    /// Instance form of [`ContextObserver::update_context`].
    ///
    /// # Errors
    ///
    /// See [`ContextObserver::update_context`].
    pub fn update(
        &mut self,
        key: impl Into<String>,
        value: Value,
        index: Option<usize>,
    ) -> Result<(), ContextScopeError> {
        Self::update_context(self.context, key, value, index)
    }

    /// Instance form of [`ContextObserver::delete_context`].
    ///
    /// # Errors
    ///
    /// See [`ContextObserver::delete_context`].
    pub fn delete(&mut self, key: &str, index: Option<usize>) -> Result<Option<Value>, ContextScopeError> {
        Self::delete_context(self.context, key, index)
    }

    /// Reads a value the way a node would see it.
    ///
    /// For collections this is the collection-wide value.
    #[must_use]
    pub fn get_value(&self, key: &str) -> Option<&Value> {
        self.context.get_value(key)
    }

    /// Reads a value stored directly in one scope.
    ///
    /// `None` is the flat, chained or collection-wide scope; `Some(i)` is the
    /// raw slice `i` with no global fallback.
    ///
    /// # Errors
    ///
    /// Same scoping errors as [`ContextObserver::update_context`].
    pub fn get_scoped(&self, key: &str, index: Option<usize>) -> Result<Option<&Value>, ContextScopeError> {
        match (&*self.context, index) {
            (Context::Collection(c), Some(i)) => Ok(c.item(i)?.get_value(key)),
            (ctx, None) => Ok(ctx.get_value(key)),
            (other, Some(index)) => Err(ContextScopeError::IndexOnNonCollection {
                kind: other.kind(),
                index,
            }),
        }
    }

    /// Every addressable scope: the main scope, then each slice.
    #[must_use]
    pub fn scopes(&self) -> Vec<Option<usize>> {
        std::iter::once(None)
            .chain((0..self.context.slice_count()).map(Some))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{ChainedContext, ContextCollectionType, ContextType};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_single_update() {
        let mut ctx = Context::default();
        ContextObserver::update_context(&mut ctx, "k", json!(1), None).unwrap();
        assert_eq!(ctx.get_value("k"), Some(&json!(1)));
    }

    #[test]
    fn test_index_on_single_is_rejected() {
        let mut ctx = Context::default();
        let err = ContextObserver::update_context(&mut ctx, "k", json!(1), Some(0)).unwrap_err();

        assert_eq!(
            err,
            ContextScopeError::IndexOnNonCollection {
                kind: "single",
                index: 0
            }
        );
        assert_eq!(ctx.get_value("k"), None);
    }

    #[test]
    fn test_index_on_chained_is_rejected() {
        let mut ctx = Context::from(ChainedContext::new(Arc::new(ContextType::new())));
        let err = ContextObserver::update_context(&mut ctx, "k", json!(1), Some(2)).unwrap_err();
        assert!(matches!(err, ContextScopeError::IndexOnNonCollection { kind: "chained", .. }));
    }

    #[test]
    fn test_collection_indexed_update() {
        let mut ctx = Context::from(ContextCollectionType::with_len(3));
        ContextObserver::update_context(&mut ctx, "k", json!(9), Some(1)).unwrap();

        let collection = ctx.as_collection().unwrap();
        assert!(collection.items()[0].is_empty());
        assert_eq!(collection.items()[1].get_value("k"), Some(&json!(9)));
        assert!(collection.items()[2].is_empty());
    }

    #[test]
    fn test_observer_scopes() {
        let mut ctx = Context::from(ContextCollectionType::with_len(2));
        let observer = ContextObserver::new(&mut ctx);
        assert_eq!(observer.scopes(), vec![None, Some(0), Some(1)]);

        let mut flat = Context::default();
        let observer = ContextObserver::new(&mut flat);
        assert_eq!(observer.scopes(), vec![None]);
    }

    #[test]
    fn test_get_scoped_reads_raw_slice() {
        let mut collection = ContextCollectionType::with_len(2);
        collection.set_value("rate", json!(16000));
        collection.set_item_value(0, "gain", json!(2)).unwrap();
        let mut ctx = Context::from(collection);
        let observer = ContextObserver::new(&mut ctx);

        assert_eq!(observer.get_scoped("gain", Some(0)).unwrap(), Some(&json!(2)));
        assert_eq!(observer.get_scoped("rate", Some(0)).unwrap(), None);
        assert_eq!(observer.get_scoped("rate", None).unwrap(), Some(&json!(16000)));
    }

    #[test]
    fn test_delete_dispatch() {
        let mut ctx = Context::from(ContextCollectionType::with_len(2));
        let mut observer = ContextObserver::new(&mut ctx);
        observer.update("k", json!(1), Some(0)).unwrap();
        observer.update("k", json!(2), Some(1)).unwrap();

        assert_eq!(observer.delete("k", Some(0)).unwrap(), Some(json!(1)));
        assert_eq!(observer.get_scoped("k", Some(1)).unwrap(), Some(&json!(2)));
    }
}
