//! Key/value sources consulted by [`MessageBuilder::add_context`]
//!
//! [`MessageBuilder::add_context`]: crate::message::MessageBuilder::add_context

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::sync::Arc;
use uuid::Uuid;

use super::format::display_lossy;

/// Lookup capability: the value stored under `key`, if any.
///
/// The message builder renders whatever is returned with `Display` and
/// skips keys that resolve to `None`.
pub trait ContextSource {
    fn lookup(&self, key: &str) -> Option<&dyn fmt::Display>;
}

impl<T: ContextSource + ?Sized> ContextSource for &T {
    fn lookup(&self, key: &str) -> Option<&dyn fmt::Display> {
        (**self).lookup(key)
    }
}

impl<K, V, S> ContextSource for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: fmt::Display,
    S: BuildHasher,
{
    fn lookup(&self, key: &str) -> Option<&dyn fmt::Display> {
        self.get(key).map(|v| v as &dyn fmt::Display)
    }
}

impl<K, V> ContextSource for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: fmt::Display,
{
    fn lookup(&self, key: &str) -> Option<&dyn fmt::Display> {
        self.get(key).map(|v| v as &dyn fmt::Display)
    }
}

/// Pair slices resolve to the first matching key.
impl<K, V> ContextSource for [(K, V)]
where
    K: AsRef<str>,
    V: fmt::Display,
{
    fn lookup(&self, key: &str) -> Option<&dyn fmt::Display> {
        self.iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v as &dyn fmt::Display)
    }
}

impl<K, V> ContextSource for Vec<(K, V)>
where
    K: AsRef<str>,
    V: fmt::Display,
{
    fn lookup(&self, key: &str) -> Option<&dyn fmt::Display> {
        self.as_slice().lookup(key)
    }
}

/// Key under which [`RequestContext::with_request_id`] stores its id.
pub const REQUEST_ID_KEY: &str = "requestID";

type ContextValue = Arc<dyn fmt::Display + Send + Sync>;

/// Request-scoped metadata carried alongside a unit of work.
///
/// Values are layered: each [`with_value`](Self::with_value) returns a new
/// context, and a later binding for a key shadows earlier ones. Clones are
/// cheap and never observe bindings added to other clones.
///
/// # Examples
///
/// ```
/// use jasmine::message::context::{ContextSource, RequestContext};
///
/// let ctx = RequestContext::new()
///     .with_value("retry", 2)
///     .with_value("sessionID", "sess-789");
///
/// assert_eq!(ctx.lookup("retry").map(|v| v.to_string()), Some("2".to_string()));
/// assert!(ctx.lookup("missing").is_none());
/// ```
#[derive(Clone, Default)]
pub struct RequestContext {
    entries: Vec<(String, ContextValue)>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive a context with `key` bound to `value`.
    pub fn with_value<V>(&self, key: impl Into<String>, value: V) -> Self
    where
        V: fmt::Display + Send + Sync + 'static,
    {
        let mut entries = self.entries.clone();
        entries.push((key.into(), Arc::new(value)));
        Self { entries }
    }

    /// Derive a context with a fresh UUID v4 bound to [`REQUEST_ID_KEY`].
    pub fn with_request_id(&self) -> Self {
        self.with_value(REQUEST_ID_KEY, Uuid::new_v4().to_string())
    }

    /// Number of bindings, counting shadowed ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in binding order, without duplicates.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::with_capacity(self.entries.len());
        for (key, _) in &self.entries {
            if !keys.contains(&key.as_str()) {
                keys.push(key);
            }
        }
        keys
    }
}

impl ContextSource for RequestContext {
    fn lookup(&self, key: &str) -> Option<&dyn fmt::Display> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_ref() as &dyn fmt::Display)
    }
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, v)| (k, display_lossy(v.as_ref()))))
            .finish()
    }
}
