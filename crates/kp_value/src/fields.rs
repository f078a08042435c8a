//! The string-keyed field container behind [`Value::Map`] and its
//! construction macro.

use alloc::string::String;
use core::fmt;

use hashbrown::hash_map;

use crate::Value;
use crate::hash::FixedHashState;

// -----------------------------------------------------------------------------
// Fields

type FieldMap = hashbrown::HashMap<String, Value, FixedHashState>;

/// The string-keyed field container backing [`Value::Map`].
///
/// A thin wrapper over a fixed-seed [`hashbrown::HashMap`]. Field names are
/// opaque strings; a name may itself contain a `.` (the path grammar cannot
/// address such a field, see the `kp_access` crate docs).
///
/// # Examples
///
/// ```
/// use kp_value::{Fields, Value};
///
/// let mut fields = Fields::new();
/// fields.insert("id", 7);
/// fields.insert("name", "treacle");
///
/// assert_eq!(fields.get("id"), Some(&Value::Int(7)));
/// assert_eq!(fields.len(), 2);
/// ```
#[derive(Default, Clone, PartialEq)]
pub struct Fields(FieldMap);

impl Fields {
    /// Creates an empty `Fields`.
    #[inline]
    pub fn new() -> Self {
        Self(FieldMap::default())
    }

    /// Creates an empty `Fields` with at least the specified capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self(FieldMap::with_capacity_and_hasher(
            capacity,
            FixedHashState,
        ))
    }

    /// Returns the number of fields.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when there are no fields.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a reference to the value of the named field.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Returns a mutable reference to the value of the named field.
    #[inline]
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.0.get_mut(name)
    }

    /// Returns `true` when the named field exists.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Inserts a field, returning the previous value if the name was
    /// already present.
    #[inline]
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name.into(), value.into())
    }

    /// Removes a field, returning its value if it was present.
    #[inline]
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.0.remove(name)
    }

    /// Iterates over `(name, value)` pairs.
    #[inline]
    pub fn iter(&self) -> hash_map::Iter<'_, String, Value> {
        self.0.iter()
    }

    /// Iterates over `(name, value)` pairs with mutable values.
    #[inline]
    pub fn iter_mut(&mut self) -> hash_map::IterMut<'_, String, Value> {
        self.0.iter_mut()
    }

    /// Iterates over field names.
    #[inline]
    pub fn names(&self) -> hash_map::Keys<'_, String, Value> {
        self.0.keys()
    }

    /// Iterates over field values.
    #[inline]
    pub fn values(&self) -> hash_map::Values<'_, String, Value> {
        self.0.values()
    }
}

impl fmt::Debug for Fields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}

impl<N: Into<String>, V: Into<Value>> FromIterator<(N, V)> for Fields {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut fields = Fields::new();
        fields.extend(iter);
        fields
    }
}

impl<N: Into<String>, V: Into<Value>> Extend<(N, V)> for Fields {
    fn extend<T: IntoIterator<Item = (N, V)>>(&mut self, iter: T) {
        self.0
            .extend(iter.into_iter().map(|(n, v)| (n.into(), v.into())));
    }
}

impl IntoIterator for Fields {
    type Item = (String, Value);
    type IntoIter = hash_map::IntoIter<String, Value>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Fields {
    type Item = (&'a String, &'a Value);
    type IntoIter = hash_map::Iter<'a, String, Value>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// -----------------------------------------------------------------------------
// Construction macro

/// Builds a [`Fields`] container from `name => value` pairs.
///
/// Values go through [`Value::from`], so scalars, strings, vectors and
/// nested [`Fields`] all work directly.
///
/// # Examples
///
/// ```
/// use kp_value::{Value, fields};
///
/// let root = Value::from(fields! {
///     "top" => fields! {
///         "middle" => fields! { "bottom" => "cool" },
///     },
/// });
/// assert!(root.as_map().is_some());
/// ```
#[macro_export]
macro_rules! fields {
    () => { $crate::Fields::new() };
    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut fields = $crate::Fields::new();
        $( fields.insert($name, $value); )+
        fields
    }};
}

// -----------------------------------------------------------------------------
// Tests
