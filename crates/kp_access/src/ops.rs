//! The public path operations.

use indexmap::IndexMap;
use kp_value::hash::FixedHashState;
use kp_value::{ObjectProxy, Value};

use crate::key_path::{
    PathAccessError, assign_value, collect_segments, resolve_value, resolve_value_mut,
};
use crate::path::{AccessPath, ParseError};

// -----------------------------------------------------------------------------
// Free functions

/// Returns a reference to the value at `path`, or `None` when any step of
/// the traversal resolves to absence.
///
/// Absence is never an error: a missing field, a `Null` intermediate or a
/// scalar where a container was expected all make the whole path resolve
/// to `None`, and the remaining segments are not evaluated. Only a
/// malformed path string fails.
///
/// # Examples
///
/// ```
/// use kp_access::get;
/// use kp_value::{Value, fields};
///
/// let root = Value::from(fields! {
///     "top" => fields! { "middle" => fields! { "bottom" => "cool" } },
/// });
///
/// assert_eq!(get(&root, "top.middle.bottom").unwrap(), Some(&Value::from("cool")));
/// assert_eq!(get(&root, "nonsense.at.any.level").unwrap(), None);
/// assert!(get(&root, "top..bottom").is_err());
/// ```
pub fn get<'r, 'p>(
    root: &'r Value,
    path: impl AccessPath<'p>,
) -> Result<Option<&'r Value>, ParseError<'p>> {
    let segments = collect_segments(path)?;
    Ok(resolve_value(root, &segments))
}

/// Mutable form of [`get`].
pub fn get_mut<'r, 'p>(
    root: &'r mut Value,
    path: impl AccessPath<'p>,
) -> Result<Option<&'r mut Value>, ParseError<'p>> {
    let segments = collect_segments(path)?;
    Ok(resolve_value_mut(root, &segments))
}

/// Assigns `value` at `path`, creating or overwriting the terminal field.
///
/// All segments but the last must resolve to a present container — unlike
/// [`get`], which tolerates absence, assigning through a missing
/// intermediate fails. A failed call performs no mutation at all; a
/// successful call performs exactly one assignment (a raw field store, or
/// the proxy's own `set` when the container is a proxy).
///
/// # Examples
///
/// ```
/// use kp_access::{get, set};
/// use kp_value::{Value, fields};
///
/// let mut root = Value::from(fields! {
///     "top" => fields! { "middle" => fields! { "bottom" => "cool" } },
/// });
///
/// set(&mut root, "top.middle", fields! { "bottom" => "wow" }.into()).unwrap();
/// assert_eq!(get(&root, "top.middle.bottom").unwrap(), Some(&Value::from("wow")));
///
/// assert!(set(&mut root, "nonsense.at.any.level", Value::Int(1)).is_err());
/// ```
pub fn set<'p>(
    root: &mut Value,
    path: impl AccessPath<'p>,
    value: Value,
) -> Result<(), PathAccessError<'p>> {
    let segments = collect_segments(path)?;
    assign_value(root, &segments, value)?;
    Ok(())
}

/// The result of [`get_properties`]: requested paths mapped to their
/// resolved values, in request order.
pub type PropertyMap<'p, 'r> = IndexMap<&'p str, Option<&'r Value>, FixedHashState>;

/// Resolves each path independently via [`get`].
///
/// The returned map is ordered by request order; a path repeated in the
/// request keeps its first position. One path resolving to absence does
/// not affect the others — its entry is simply `None`.
///
/// # Examples
///
/// ```
/// use kp_access::get_properties;
/// use kp_value::{Value, fields};
///
/// let root = Value::from(fields! { "a" => 1 });
/// let props = get_properties(&root, ["a", "missing.path"]).unwrap();
///
/// assert_eq!(props["a"], Some(&Value::Int(1)));
/// assert_eq!(props["missing.path"], None);
/// ```
pub fn get_properties<'r, 'p>(
    root: &'r Value,
    paths: impl IntoIterator<Item = &'p str>,
) -> Result<PropertyMap<'p, 'r>, ParseError<'p>> {
    let mut properties = PropertyMap::default();
    for path in paths {
        let value = get(root, path)?;
        properties.insert(path, value);
    }
    Ok(properties)
}

/// Applies [`set`] for each `(path, value)` entry, all-or-nothing.
///
/// Entries are applied in iteration order against a working copy of the
/// root; the copy replaces the root only when every entry succeeds, so a
/// failing entry leaves the root untouched — including entries before it.
/// The fixed order makes overlapping paths deterministic: a later entry
/// sees the effect of an earlier one.
///
/// # Examples
///
/// ```
/// use kp_access::{get, set_properties};
/// use kp_value::{Value, fields};
///
/// let mut root = Value::from(fields! { "topB" => 0, "topC" => "" });
/// set_properties(&mut root, [
///     ("topB", Value::Int(12)),
///     ("topC", Value::from("hello")),
/// ])
/// .unwrap();
///
/// assert_eq!(get(&root, "topB").unwrap(), Some(&Value::Int(12)));
/// ```
pub fn set_properties<'p>(
    root: &mut Value,
    entries: impl IntoIterator<Item = (&'p str, Value)>,
) -> Result<(), PathAccessError<'p>> {
    let mut staged = root.clone();
    for (path, value) in entries {
        set(&mut staged, path, value)?;
    }
    *root = staged;
    Ok(())
}

// -----------------------------------------------------------------------------
// Method-call surface

/// Path operations in method form.
///
/// Implemented for [`Value`] roots and for [`ObjectProxy`], so a proxy
/// itself accepts full dotted paths (`proxy.get_path("top.middle.bottom")`)
/// even though the traversal only ever asks any proxy for one segment at a
/// time.
pub trait PathAccess {
    /// See the free function [`get`].
    fn get_path<'s, 'p>(
        &'s self,
        path: impl AccessPath<'p>,
    ) -> Result<Option<&'s Value>, ParseError<'p>>;

    /// See the free function [`get_mut`].
    fn get_path_mut<'s, 'p>(
        &'s mut self,
        path: impl AccessPath<'p>,
    ) -> Result<Option<&'s mut Value>, ParseError<'p>>;

    /// See the free function [`set`].
    fn set_path<'p>(
        &mut self,
        path: impl AccessPath<'p>,
        value: Value,
    ) -> Result<(), PathAccessError<'p>>;
}

impl PathAccess for Value {
    #[inline]
    fn get_path<'s, 'p>(
        &'s self,
        path: impl AccessPath<'p>,
    ) -> Result<Option<&'s Value>, ParseError<'p>> {
        get(self, path)
    }

    #[inline]
    fn get_path_mut<'s, 'p>(
        &'s mut self,
        path: impl AccessPath<'p>,
    ) -> Result<Option<&'s mut Value>, ParseError<'p>> {
        get_mut(self, path)
    }

    #[inline]
    fn set_path<'p>(
        &mut self,
        path: impl AccessPath<'p>,
        value: Value,
    ) -> Result<(), PathAccessError<'p>> {
        set(self, path, value)
    }
}

impl PathAccess for ObjectProxy {
    #[inline]
    fn get_path<'s, 'p>(
        &'s self,
        path: impl AccessPath<'p>,
    ) -> Result<Option<&'s Value>, ParseError<'p>> {
        get(self.content(), path)
    }

    #[inline]
    fn get_path_mut<'s, 'p>(
        &'s mut self,
        path: impl AccessPath<'p>,
    ) -> Result<Option<&'s mut Value>, ParseError<'p>> {
        get_mut(self.content_mut(), path)
    }

    #[inline]
    fn set_path<'p>(
        &mut self,
        path: impl AccessPath<'p>,
        value: Value,
    ) -> Result<(), PathAccessError<'p>> {
        set(self.content_mut(), path, value)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::vec;
    use core::any::Any;
    use core::cell::Cell;

    use kp_value::{ObjectProxy, ProxyObject, Value, fields};

    use super::{PathAccess, get, get_mut, get_properties, set, set_properties};
    use crate::key_path::PathAccessError;
    use crate::segment::ResolveErrorKind;

    fn deeply_nested() -> Value {
        Value::from(fields! {
            "top" => fields! { "middle" => fields! { "bottom" => "cool" } },
        })
    }

    #[test]
    fn get_matches_manual_dereference() {
        let root = deeply_nested();
        let manual = root
            .lookup("top")
            .and_then(|v| v.lookup("middle"))
            .and_then(|v| v.lookup("bottom"));

        assert_eq!(get(&root, "top.middle.bottom").unwrap(), manual);
        assert_eq!(manual, Some(&Value::from("cool")));
    }

    #[test]
    fn absence_is_not_an_error_at_any_level() {
        let root = deeply_nested();

        assert_eq!(get(&root, "nonsense").unwrap(), None);
        assert_eq!(get(&root, "nonsense.at.any.level").unwrap(), None);
        assert_eq!(get(&root, "top.middle.even.if.starts.legit").unwrap(), None);
        // a scalar mid-path is just as absent as a missing field
        assert_eq!(get(&root, "top.middle.bottom.length").unwrap(), None);
    }

    #[test]
    fn malformed_paths_fail_before_any_access() {
        let root = deeply_nested();

        assert!(get(&root, "").is_err());
        assert!(get(&root, ".top").is_err());
        assert!(get(&root, "top..middle").is_err());
        assert!(get(&root, "top.middle.").is_err());
    }

    #[test]
    fn set_then_get_round_trip() {
        let mut root = deeply_nested();

        set(&mut root, "top.middle", fields! { "bottom" => "wow" }.into()).unwrap();
        assert_eq!(
            get(&root, "top.middle.bottom").unwrap(),
            Some(&Value::from("wow")),
        );

        set(&mut root, "top.middle.bottom", Value::from("amaze")).unwrap();
        assert_eq!(
            get(&root, "top.middle.bottom").unwrap(),
            Some(&Value::from("amaze")),
        );
    }

    #[test]
    fn set_creates_missing_terminal_fields() {
        let mut root = deeply_nested();
        set(&mut root, "top.fresh", Value::Bool(true)).unwrap();
        assert_eq!(get(&root, "top.fresh").unwrap(), Some(&Value::Bool(true)));
    }

    #[test]
    fn set_through_missing_intermediate_fails_without_mutation() {
        let mut root = deeply_nested();
        let snapshot = root.clone();

        let err = set(&mut root, "nonsense.at.any.level", Value::Int(1)).unwrap_err();
        match err {
            PathAccessError::Resolve(err) => {
                assert_eq!(err.kind(), &ResolveErrorKind::AbsentContainer);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(root, snapshot);
    }

    #[test]
    fn set_into_a_scalar_fails_with_its_kind() {
        let mut root = deeply_nested();

        let err = set(&mut root, "top.middle.bottom.length", Value::Int(1)).unwrap_err();
        match err {
            PathAccessError::Resolve(err) => {
                assert!(matches!(err.kind(), ResolveErrorKind::NotAContainer { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn set_through_a_null_container_is_absent() {
        let mut root = Value::from(fields! { "a" => Value::Null });

        let err = set(&mut root, "a.b", Value::Int(1)).unwrap_err();
        match err {
            PathAccessError::Resolve(err) => {
                assert_eq!(err.kind(), &ResolveErrorKind::AbsentContainer);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        // the same traversal is tolerated by reads
        assert_eq!(get(&root, "a.b").unwrap(), None);
    }

    #[test]
    fn list_traversal_by_index() {
        let mut root = Value::from(fields! { "items" => vec![10, 20, 30] });

        assert_eq!(get(&root, "items.1").unwrap(), Some(&Value::Int(20)));
        assert_eq!(get(&root, "items.9").unwrap(), None);

        set(&mut root, "items.1", Value::Int(99)).unwrap();
        assert_eq!(get(&root, "items.1").unwrap(), Some(&Value::Int(99)));

        let err = set(&mut root, "items.9", Value::Int(1)).unwrap_err();
        match err {
            PathAccessError::Resolve(err) => {
                assert_eq!(err.kind(), &ResolveErrorKind::IndexOutOfBounds { len: 3 });
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    /// A proxy that counts how often its capability methods are used, to
    /// pin down that traversal goes through them.
    #[derive(Debug, Clone)]
    struct CountingProxy {
        inner: Value,
        reads: Cell<usize>,
    }

    impl CountingProxy {
        fn new(inner: impl Into<Value>) -> Self {
            Self {
                inner: inner.into(),
                reads: Cell::new(0),
            }
        }
    }

    impl ProxyObject for CountingProxy {
        fn get(&self, key: &str) -> Option<&Value> {
            self.reads.set(self.reads.get() + 1);
            self.inner.lookup(key)
        }
        fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
            self.inner.lookup_mut(key)
        }
        fn set(&mut self, key: &str, value: Value) -> bool {
            match &mut self.inner {
                Value::Map(fields) => {
                    fields.insert(key, value);
                    true
                }
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
                .is_some_and(|other| self.inner == other.inner)
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn get_delegates_to_the_proxy_capability() {
        let root = Value::proxy(CountingProxy::new(fields! { "someProp" => "hi" }));

        assert_eq!(get(&root, "someProp").unwrap(), Some(&Value::from("hi")));
        let reads = root.as_proxy().unwrap();
        let reads = reads
            .as_any()
            .downcast_ref::<CountingProxy>()
            .unwrap()
            .reads
            .get();
        assert_eq!(reads, 1);
    }

    #[test]
    fn nested_proxies_unwrap_one_segment_at_a_time() {
        let root = Value::proxy(ObjectProxy::new(Value::from(fields! {
            "top" => Value::proxy(ObjectProxy::new(fields! {
                "middle" => Value::proxy(ObjectProxy::new(fields! {
                    "bottom" => "cool",
                })),
            })),
        })));

        assert_eq!(
            get(&root, "top.middle.bottom").unwrap(),
            Some(&Value::from("cool")),
        );
    }

    #[test]
    fn set_delegates_to_the_proxy_capability() {
        let mut root = Value::from(fields! {
            "wrapped" => Value::proxy(ObjectProxy::new(fields! { "someProp" => "old" })),
        });

        set(&mut root, "wrapped.someProp", Value::from("new")).unwrap();
        assert_eq!(
            get(&root, "wrapped.someProp").unwrap(),
            Some(&Value::from("new")),
        );
    }

    #[test]
    fn proxy_refusal_surfaces_as_an_error() {
        let mut root = Value::from(fields! {
            "wrapped" => Value::proxy(ObjectProxy::new("just a string")),
        });

        let err = set(&mut root, "wrapped.anything", Value::Int(1)).unwrap_err();
        match err {
            PathAccessError::Resolve(err) => {
                assert_eq!(err.kind(), &ResolveErrorKind::ProxyRefused);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn get_properties_resolves_independently_in_request_order() {
        let root = Value::from(fields! {
            "topA" => fields! { "middleA" => "abc" },
            "topB" => 7,
        });

        let props = get_properties(&root, ["topA.middleA", "missing.path", "topB"]).unwrap();

        assert_eq!(props.len(), 3);
        assert_eq!(
            props.get_index(0),
            Some((&"topA.middleA", &Some(&Value::from("abc")))),
        );
        assert_eq!(props.get_index(1), Some((&"missing.path", &None)));
        assert_eq!(props.get_index(2), Some((&"topB", &Some(&Value::Int(7)))));
    }

    #[test]
    fn get_properties_collapses_duplicate_paths_keeping_first_position() {
        let root = Value::from(fields! { "topA" => 1, "topB" => 2 });

        let props = get_properties(&root, ["topA", "topB", "topA"]).unwrap();

        assert_eq!(props.len(), 2);
        assert_eq!(props.get_index(0), Some((&"topA", &Some(&Value::Int(1)))));
        assert_eq!(props.get_index(1), Some((&"topB", &Some(&Value::Int(2)))));
    }

    #[test]
    fn get_properties_rejects_malformed_entries() {
        let root = deeply_nested();
        assert!(get_properties(&root, ["top", "bad..path"]).is_err());
    }

    #[test]
    fn set_properties_applies_in_insertion_order() {
        let mut root = deeply_nested();

        // The second entry only resolves because the first created its
        // container.
        set_properties(
            &mut root,
            [
                ("top.middle", Value::from(fields! { "bottom" => "wow" })),
                ("top.middle.bottom", Value::from("amaze")),
            ],
        )
        .unwrap();

        assert_eq!(
            get(&root, "top.middle.bottom").unwrap(),
            Some(&Value::from("amaze")),
        );
    }

    #[test]
    fn set_properties_is_all_or_nothing() {
        let mut root = deeply_nested();
        let snapshot = root.clone();

        let result = set_properties(
            &mut root,
            [
                ("top.middle.bottom", Value::from("applied?")),
                ("nope.not.there", Value::Int(1)),
            ],
        );

        assert!(result.is_err());
        assert_eq!(root, snapshot);
    }

    #[test]
    fn method_forms_match_the_free_functions() {
        let mut root = deeply_nested();

        assert_eq!(
            root.get_path("top.middle.bottom").unwrap(),
            Some(&Value::from("cool")),
        );
        root.set_path("top.middle.bottom", Value::from("via method"))
            .unwrap();
        assert_eq!(
            root.get_path("top.middle.bottom").unwrap(),
            Some(&Value::from("via method")),
        );

        let mut proxy = ObjectProxy::new(fields! {
            "top" => fields! { "middle" => fields! { "bottom" => "cool" } },
        });
        assert_eq!(
            proxy.get_path("top.middle.bottom").unwrap(),
            Some(&Value::from("cool")),
        );
        proxy
            .set_path("top.middle.bottom", Value::from("proxied"))
            .unwrap();
        assert_eq!(
            proxy.get_path("top.middle.bottom").unwrap(),
            Some(&Value::from("proxied")),
        );
    }

    #[test]
    fn get_mut_edits_in_place() {
        let mut root = deeply_nested();

        *get_mut(&mut root, "top.middle.bottom").unwrap().unwrap() = Value::Int(5);
        assert_eq!(get(&root, "top.middle.bottom").unwrap(), Some(&Value::Int(5)));
    }
}
