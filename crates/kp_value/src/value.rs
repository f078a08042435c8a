//! The dynamic value model: [`Value`] and its kind discriminant.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::fields::Fields;
use crate::proxy::ProxyObject;

// -----------------------------------------------------------------------------
// Value

/// A dynamic, arbitrarily nested value.
///
/// `Value` is the subject of every path traversal: maps hold named fields,
/// lists hold positional elements, and the `Proxy` variant wraps content
/// behind the [`ProxyObject`] capability contract. Everything else is a
/// scalar leaf.
///
/// `Null` doubles as the *absence* marker: traversing a `Null` (or a
/// missing field) resolves to nothing rather than raising an error.
///
/// # Examples
///
/// ```
/// use kp_value::{Value, fields};
///
/// let root = Value::from(fields! {
///     "top" => fields! { "middle" => fields! { "bottom" => "cool" } },
/// });
///
/// let top = root.lookup("top").unwrap();
/// assert!(top.as_map().is_some());
/// assert_eq!(root.lookup("missing"), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Nothing; also the result of resolving a missing field.
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Positional elements, addressed by decimal-index segments.
    List(Vec<Value>),
    /// Named fields, addressed by name segments.
    Map(Fields),
    /// Content that must be accessed through the proxy's own operations.
    Proxy(Box<dyn ProxyObject>),
}

/// The kind of a [`Value`], used in error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Float,
    Str,
    List,
    Map,
    Proxy,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Str => "string",
            Self::List => "list",
            Self::Map => "map",
            Self::Proxy => "proxy",
        })
    }
}

impl Default for Value {
    #[inline]
    fn default() -> Self {
        Self::Null
    }
}

impl Value {
    /// Wraps a proxy implementation into a `Value`.
    #[inline]
    pub fn proxy(proxy: impl ProxyObject) -> Self {
        Self::Proxy(Box::new(proxy))
    }

    /// Returns the kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::Str(_) => ValueKind::Str,
            Self::List(_) => ValueKind::List,
            Self::Map(_) => ValueKind::Map,
            Self::Proxy(_) => ValueKind::Proxy,
        }
    }

    /// Returns `true` for [`Value::Null`].
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_list_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Self::List(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_map(&self) -> Option<&Fields> {
        match self {
            Self::Map(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_map_mut(&mut self) -> Option<&mut Fields> {
        match self {
            Self::Map(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_proxy(&self) -> Option<&dyn ProxyObject> {
        match self {
            Self::Proxy(v) => Some(v.as_ref()),
            _ => None,
        }
    }

    #[inline]
    pub fn as_proxy_mut(&mut self) -> Option<&mut dyn ProxyObject> {
        match self {
            Self::Proxy(v) => Some(v.as_mut()),
            _ => None,
        }
    }

    /// Raw single-key lookup, **not** proxy-aware.
    ///
    /// Maps resolve the key as a field name; lists resolve it as a decimal
    /// index. Everything else (including `Proxy` — unwrapping a proxy is
    /// the traversal layer's job) resolves to `None`.
    pub fn lookup(&self, key: &str) -> Option<&Value> {
        match self {
            Self::Map(fields) => fields.get(key),
            Self::List(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
    }

    /// Mutable form of [`Value::lookup`].
    pub fn lookup_mut(&mut self, key: &str) -> Option<&mut Value> {
        match self {
            Self::Map(fields) => fields.get_mut(key),
            Self::List(items) => key.parse::<usize>().ok().and_then(|i| items.get_mut(i)),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// Conversions

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    #[inline]
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    #[inline]
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<u32> for Value {
    #[inline]
    fn from(value: u32) -> Self {
        Self::Int(value.into())
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Self::Str(String::from(value))
    }
}

impl From<String> for Value {
    #[inline]
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Fields> for Value {
    #[inline]
    fn from(value: Fields) -> Self {
        Self::Map(value)
    }
}

impl From<Box<dyn ProxyObject>> for Value {
    #[inline]
    fn from(value: Box<dyn ProxyObject>) -> Self {
        Self::Proxy(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}

/// `None` maps to [`Value::Null`], so optional inputs fold into the
/// absence marker.
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
