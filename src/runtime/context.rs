use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

type ContextValue = Arc<dyn Any + Send + Sync>;

/// One node of the component tree.
struct ScopeNode {
    parent: Option<Arc<ScopeNode>>,
    // Values provided at this node, keyed by their concrete type
    contexts: RwLock<HashMap<TypeId, ContextValue>>,
}

impl ScopeNode {
    fn new(parent: Option<Arc<ScopeNode>>) -> Arc<Self> {
        Arc::new(Self {
            parent,
            contexts: RwLock::new(HashMap::new()),
        })
    }
}

/// A handle to a position in the component tree.
///
/// Scopes replace ambient, dynamically-scoped context with an explicit
/// handle: a component receives the `Scope` it is rendered in, hands
/// `scope.child()` to its children, and resolves shared capabilities with
/// [`Scope::use_context`]. Lookup walks towards the root, so the nearest
/// ancestor that provided a value of the requested type wins.
///
/// # Examples
///
/// ```
/// use tincan_mirror::runtime::Scope;
///
/// let root = Scope::root();
/// root.provide(String::from("outer"));
///
/// let inner = root.child();
/// inner.provide(String::from("inner"));
///
/// let leaf = inner.child();
/// assert_eq!(leaf.use_context::<String>().as_deref(), Some("inner"));
/// assert_eq!(root.use_context::<String>().as_deref(), Some("outer"));
/// ```
#[derive(Clone)]
pub struct Scope {
    node: Arc<ScopeNode>,
}

impl Scope {
    /// Create the root of a new component tree.
    pub fn root() -> Self {
        Self {
            node: ScopeNode::new(None),
        }
    }

    /// Create a child scope beneath this one.
    pub fn child(&self) -> Self {
        Self {
            node: ScopeNode::new(Some(Arc::clone(&self.node))),
        }
    }

    /// The enclosing scope, if this is not a root.
    pub fn parent(&self) -> Option<Scope> {
        self.node.parent.as_ref().map(|node| Scope {
            node: Arc::clone(node),
        })
    }

    /// Number of ancestors between this scope and the root.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut node = self.node.parent.as_ref();
        while let Some(n) = node {
            depth += 1;
            node = n.parent.as_ref();
        }
        depth
    }

    /// Make `value` visible to this scope and every descendant.
    ///
    /// Providing a second value of the same type at the same scope replaces
    /// the first.
    pub fn provide<T>(&self, value: T)
    where
        T: Send + Sync + 'static,
    {
        self.node
            .contexts
            .write()
            .insert(TypeId::of::<T>(), Arc::new(value));
    }

    /// Remove the value of type `T` provided at exactly this scope.
    ///
    /// Ancestors are not touched, so after withdrawing, lookups from below
    /// fall through to the next provider up the tree.
    pub fn withdraw<T>(&self) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        self.node
            .contexts
            .write()
            .remove(&TypeId::of::<T>())
            .and_then(|value| value.downcast_ref::<T>().cloned())
    }

    /// Resolve the nearest value of type `T` provided at or above this scope.
    pub fn use_context<T>(&self) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        let key = TypeId::of::<T>();
        let mut node = Some(&self.node);
        while let Some(n) = node {
            if let Some(value) = n.contexts.read().get(&key) {
                return value.downcast_ref::<T>().cloned();
            }
            node = n.parent.as_ref();
        }
        None
    }

    /// Whether both handles point at the same tree node.
    pub fn same_scope(&self, other: &Scope) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("depth", &self.depth())
            .field("provided", &self.node.contexts.read().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Theme(&'static str);

    #[test]
    fn lookup_without_provider_is_none() {
        let root = Scope::root();
        assert_eq!(root.child().use_context::<Theme>(), None);
    }

    #[test]
    fn nearest_ancestor_wins() {
        let root = Scope::root();
        root.provide(Theme("dark"));
        let middle = root.child();
        let leaf = middle.child();
        assert_eq!(leaf.use_context::<Theme>(), Some(Theme("dark")));

        middle.provide(Theme("light"));
        assert_eq!(leaf.use_context::<Theme>(), Some(Theme("light")));
        assert_eq!(root.use_context::<Theme>(), Some(Theme("dark")));
    }

    #[test]
    fn siblings_do_not_see_each_other() {
        let root = Scope::root();
        let left = root.child();
        let right = root.child();
        left.provide(Theme("left"));
        assert_eq!(right.use_context::<Theme>(), None);
    }

    #[test]
    fn withdraw_falls_back_to_ancestor() {
        let root = Scope::root();
        root.provide(Theme("outer"));
        let inner = root.child();
        inner.provide(Theme("inner"));

        assert_eq!(inner.withdraw::<Theme>(), Some(Theme("inner")));
        assert_eq!(inner.child().use_context::<Theme>(), Some(Theme("outer")));
    }

    #[test]
    fn depth_and_parent() {
        let root = Scope::root();
        let child = root.child();
        let grandchild = child.child();
        assert_eq!(root.depth(), 0);
        assert_eq!(grandchild.depth(), 2);
        assert!(grandchild.parent().unwrap().same_scope(&child));
        assert!(root.parent().is_none());
    }
}
