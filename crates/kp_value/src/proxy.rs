//! The proxy capability contract and its reference implementation.

use alloc::boxed::Box;
use core::any::Any;
use core::fmt;

use crate::Value;

// -----------------------------------------------------------------------------
// ProxyObject

/// The capability contract for proxied values.
///
/// A value wrapped in [`Value::Proxy`] is never read through raw field
/// access: each traversal step asks the proxy for **one** segment at a time
/// via [`get`](ProxyObject::get), and the result is re-checked for
/// proxy-ness before the next step, so proxies may wrap other proxies to
/// any depth. Terminal assignments go through [`set`](ProxyObject::set).
///
/// The `dyn_clone` / `dyn_eq` / `as_any` methods are the object-safe
/// plumbing that lets `Value` stay `Clone` and `PartialEq` while holding a
/// `Box<dyn ProxyObject>`. Proxies of different concrete types never
/// compare equal.
pub trait ProxyObject: fmt::Debug + 'static {
    /// Resolves a single key of the proxied content.
    ///
    /// Returns `None` when the key is absent — this is not an error, it is
    /// the same absence a missing raw field produces.
    fn get(&self, key: &str) -> Option<&Value>;

    /// Mutable form of [`get`](ProxyObject::get), used when the proxy is an
    /// intermediate container of an assignment traversal.
    fn get_mut(&mut self, key: &str) -> Option<&mut Value>;

    /// Assigns a single key of the proxied content.
    ///
    /// Returns `false` when the proxy cannot accept the field (for example
    /// when it wraps a scalar); the caller reports that as a resolution
    /// failure.
    fn set(&mut self, key: &str, value: Value) -> bool;

    /// Clones the proxy behind the object boundary.
    fn dyn_clone(&self) -> Box<dyn ProxyObject>;

    /// Compares against another proxy behind the object boundary.
    fn dyn_eq(&self, other: &dyn ProxyObject) -> bool;

    /// Upcasts for concrete-type comparison in [`dyn_eq`](ProxyObject::dyn_eq).
    fn as_any(&self) -> &dyn Any;
}

impl Clone for Box<dyn ProxyObject> {
    #[inline]
    fn clone(&self) -> Self {
        self.dyn_clone()
    }
}

impl PartialEq for Box<dyn ProxyObject> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.dyn_eq(other.as_ref())
    }
}

// -----------------------------------------------------------------------------
// ObjectProxy

/// The reference [`ProxyObject`] implementation: a wrapper holding an inner
/// [`Value`] and exposing it key by key.
///
/// When the wrapped content is itself a proxy, calls delegate one level
/// down, so an `ObjectProxy` of an `ObjectProxy` behaves like the
/// innermost content.
///
/// # Examples
///
/// ```
/// use kp_value::{ObjectProxy, ProxyObject, Value, fields};
///
/// let proxy = ObjectProxy::new(fields! { "someProp" => "hidden" });
///
/// // Raw field access is impossible; the capability contract is the only
/// // way in.
/// assert_eq!(
///     proxy.get("someProp").and_then(Value::as_str),
///     Some("hidden"),
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectProxy {
    content: Value,
}

impl ObjectProxy {
    /// Wraps a value.
    #[inline]
    pub fn new(content: impl Into<Value>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Returns the wrapped content.
    #[inline]
    pub fn content(&self) -> &Value {
        &self.content
    }

    /// Returns the wrapped content mutably.
    #[inline]
    pub fn content_mut(&mut self) -> &mut Value {
        &mut self.content
    }

    /// Unwraps into the content.
    #[inline]
    pub fn into_content(self) -> Value {
        self.content
    }
}

impl ProxyObject for ObjectProxy {
    fn get(&self, key: &str) -> Option<&Value> {
        match &self.content {
            Value::Proxy(inner) => inner.get(key),
            other => other.lookup(key),
        }
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        match &mut self.content {
            Value::Proxy(inner) => inner.get_mut(key),
            other => other.lookup_mut(key),
        }
    }

    fn set(&mut self, key: &str, value: Value) -> bool {
        match &mut self.content {
            Value::Proxy(inner) => inner.set(key, value),
            Value::Map(fields) => {
                fields.insert(key, value);
                true
            }
            Value::List(items) => match key.parse::<usize>().ok().and_then(|i| items.get_mut(i)) {
                Some(slot) => {
                    *slot = value;
                    true
                }
                None => false,
            },
            _ => false,
        }
    }

    fn dyn_clone(&self) -> Box<dyn ProxyObject> {
        Box::new(self.clone())
    }

    fn dyn_eq(&self, other: &dyn ProxyObject) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|other| self == other)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl From<ObjectProxy> for Value {
    #[inline]
    fn from(value: ObjectProxy) -> Self {
        Self::proxy(value)
    }
}

// -----------------------------------------------------------------------------
// Tests
