//! Reusable multi-segment paths and the traversal core.

use alloc::boxed::Box;
use core::fmt;

use fastvec::FastVec;
use kp_value::{Value, ValueKind};

use crate::path::{AccessPath, ParseError};
use crate::segment::{OffsetSegment, ResolveError, ResolveErrorKind};

// -----------------------------------------------------------------------------
// Error

/// An error returned from a failed path operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathAccessError<'a> {
    /// A path string that could not be parsed.
    /// See [`ParseError`] for details.
    Parse(ParseError<'a>),
    /// An assignment whose target could not be resolved after parsing.
    /// See [`ResolveError`] for details.
    Resolve(ResolveError),
}

impl fmt::Display for PathAccessError<'_> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => fmt::Display::fmt(err, f),
            Self::Resolve(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl core::error::Error for PathAccessError<'_> {}

impl<'a> From<ParseError<'a>> for PathAccessError<'a> {
    #[inline]
    fn from(value: ParseError<'a>) -> Self {
        Self::Parse(value)
    }
}

impl From<ResolveError> for PathAccessError<'_> {
    #[inline]
    fn from(value: ResolveError) -> Self {
        Self::Resolve(value)
    }
}

// -----------------------------------------------------------------------------
// Traversal core

/// Collects a path into its parsed segments, keeping borrowed names.
pub(crate) fn collect_segments<'p>(
    path: impl AccessPath<'p>,
) -> Result<Box<[OffsetSegment<'p>]>, ParseError<'p>> {
    let mut vec: FastVec<OffsetSegment<'p>, 8> = FastVec::new();
    let data = vec.data();

    for res in path.parse_to_segments() {
        data.push(res?);
    }

    Ok(vec.into_boxed_slice())
}

/// Walks every segment; `None` as soon as one resolves to absence.
pub(crate) fn resolve_value<'r>(
    root: &'r Value,
    segments: &[OffsetSegment<'_>],
) -> Option<&'r Value> {
    let mut it = root;
    for segment in segments {
        it = segment.access(it)?;
    }
    Some(it)
}

/// Mutable form of [`resolve_value`].
pub(crate) fn resolve_value_mut<'r>(
    root: &'r mut Value,
    segments: &[OffsetSegment<'_>],
) -> Option<&'r mut Value> {
    let mut it = root;
    for segment in segments {
        it = segment.access_mut(it)?;
    }
    Some(it)
}

fn dead_end(kind: ValueKind) -> ResolveErrorKind {
    match kind {
        // A container that simply lacks the field, or an explicit null:
        // the intermediate is absent.
        ValueKind::Null | ValueKind::Map | ValueKind::List | ValueKind::Proxy => {
            ResolveErrorKind::AbsentContainer
        }
        other => ResolveErrorKind::NotAContainer { kind: other },
    }
}

/// Resolves all but the last segment, then performs exactly one assignment
/// on the resolved container. A failure leaves the tree untouched.
pub(crate) fn assign_value(
    root: &mut Value,
    segments: &[OffsetSegment<'_>],
    value: Value,
) -> Result<(), ResolveError> {
    let (terminal, containers) = segments
        .split_last()
        .expect("parsed key paths always have at least one segment");

    let mut it = root;
    for segment in containers {
        let base_kind = it.kind();
        it = match segment.access_mut(it) {
            Some(next) => next,
            None => {
                return Err(ResolveError::new(
                    dead_end(base_kind),
                    segment.segment.clone(),
                    segment.offset,
                ));
            }
        };
    }

    let key = terminal.segment.name();
    match it {
        Value::Proxy(proxy) => {
            if proxy.set(key, value) {
                Ok(())
            } else {
                Err(ResolveError::new(
                    ResolveErrorKind::ProxyRefused,
                    terminal.segment.clone(),
                    terminal.offset,
                ))
            }
        }
        Value::Map(fields) => {
            fields.insert(key, value);
            Ok(())
        }
        Value::List(items) => {
            let len = items.len();
            match key.parse::<usize>() {
                Ok(index) => match items.get_mut(index) {
                    Some(slot) => {
                        *slot = value;
                        Ok(())
                    }
                    None => Err(ResolveError::new(
                        ResolveErrorKind::IndexOutOfBounds { len },
                        terminal.segment.clone(),
                        terminal.offset,
                    )),
                },
                Err(_) => Err(ResolveError::new(
                    ResolveErrorKind::NotAContainer {
                        kind: ValueKind::List,
                    },
                    terminal.segment.clone(),
                    terminal.offset,
                )),
            }
        }
        // A null container is absent, same as a missing one.
        Value::Null => Err(ResolveError::new(
            ResolveErrorKind::AbsentContainer,
            terminal.segment.clone(),
            terminal.offset,
        )),
        other => Err(ResolveError::new(
            ResolveErrorKind::NotAContainer { kind: other.kind() },
            terminal.segment.clone(),
            terminal.offset,
        )),
    }
}

// -----------------------------------------------------------------------------
// KeyPath

/// A reusable parsed path, a thin wrapper over `Box<[OffsetSegment]>`.
///
/// [`Segment`](crate::Segment) resolves a single level; `KeyPath` runs a
/// complete traversal. Unlike the free functions in this crate, which parse
/// on every call, a `KeyPath` parses the path string once and can then be
/// applied to any number of roots.
///
/// A `KeyPath` is never empty: the parser rejects empty paths.
///
/// # Examples
///
/// ```
/// use kp_access::KeyPath;
/// use kp_value::{Value, fields};
///
/// let path = KeyPath::parse_static("top.middle.bottom").unwrap();
///
/// let root = Value::from(fields! {
///     "top" => fields! { "middle" => fields! { "bottom" => "cool" } },
/// });
/// assert_eq!(path.resolve(&root), Some(&Value::from("cool")));
///
/// // reuse against another root
/// let other = Value::from(fields! { "top" => 1 });
/// assert_eq!(path.resolve(&other), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyPath(Box<[OffsetSegment<'static>]>);

/// Builds a `KeyPath` from pre-parsed segments, bypassing the string
/// grammar. This is the only way to address a field whose name contains
/// a `.`.
impl From<Box<[OffsetSegment<'static>]>> for KeyPath {
    #[inline]
    fn from(segments: Box<[OffsetSegment<'static>]>) -> Self {
        Self(segments)
    }
}

impl KeyPath {
    /// Parses the path and creates a `KeyPath`.
    /// Returns [`ParseError`] if parsing fails.
    ///
    /// This function copies each segment name into an owned string. For
    /// `&'static str` paths, [`parse_static`] stores the references
    /// directly instead.
    ///
    /// [`parse_static`]: KeyPath::parse_static
    pub fn parse<'a>(path: impl AccessPath<'a>) -> Result<Self, ParseError<'a>> {
        let mut vec: FastVec<OffsetSegment<'static>, 8> = FastVec::new();
        let data = vec.data();

        for res in path.parse_to_segments() {
            data.push(res?.into_owned());
        }

        Ok(Self(vec.into_boxed_slice()))
    }

    /// Parses the path and creates a `KeyPath`, storing string references
    /// without copying. Returns [`ParseError`] if parsing fails.
    pub fn parse_static(path: impl AccessPath<'static>) -> Result<Self, ParseError<'static>> {
        let mut vec: FastVec<OffsetSegment<'static>, 8> = FastVec::new();
        let data = vec.data();

        for res in path.parse_to_segments() {
            data.push(res?);
        }

        Ok(Self(vec.into_boxed_slice()))
    }

    /// Returns the number of segments.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns a reference to the value at this path, or `None` when any
    /// step resolves to absence.
    ///
    /// The path itself is not consumed and can be reused.
    #[inline]
    pub fn resolve<'r>(&self, root: &'r Value) -> Option<&'r Value> {
        resolve_value(root, &self.0)
    }

    /// Mutable form of [`resolve`](KeyPath::resolve).
    #[inline]
    pub fn resolve_mut<'r>(&self, root: &'r mut Value) -> Option<&'r mut Value> {
        resolve_value_mut(root, &self.0)
    }

    /// Assigns `value` at this path.
    ///
    /// All but the last segment must resolve to a present container;
    /// otherwise the assignment fails and the tree is left untouched. The
    /// terminal field is created if missing and overwritten if present.
    #[inline]
    pub fn assign(&self, root: &mut Value, value: Value) -> Result<(), ResolveError> {
        assign_value(root, &self.0, value)
    }

    /// Concatenates two paths.
    ///
    /// Note that segment offsets are kept as parsed, so error messages
    /// refer to positions in the original path strings.
    pub fn concat(self, other: KeyPath) -> Self {
        let mut vec: FastVec<OffsetSegment<'static>, 12> = FastVec::new();
        let data = vec.data();
        data.extend(self.0);
        data.extend(other.0);
        Self(vec.into_boxed_slice())
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut segments = self.0.iter();
        if let Some(first) = segments.next() {
            fmt::Display::fmt(&first.segment, f)?;
        }
        for segment in segments {
            f.write_str(".")?;
            fmt::Display::fmt(&segment.segment, f)?;
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec;

    use kp_value::{Value, fields};

    use super::KeyPath;
    use crate::segment::{OffsetSegment, ResolveErrorKind, Segment};

    fn nested() -> Value {
        Value::from(fields! {
            "top" => fields! { "middle" => fields! { "bottom" => "cool" } },
            "items" => vec![10, 20, 30],
        })
    }

    #[test]
    fn parse_and_display_round_trip() {
        let path = KeyPath::parse_static("top.middle.bottom").unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path.to_string(), "top.middle.bottom");
    }

    #[test]
    fn parse_rejects_malformed_paths() {
        assert!(KeyPath::parse_static("").is_err());
        assert!(KeyPath::parse_static("a..b").is_err());
        assert!(KeyPath::parse_static(".a").is_err());
    }

    #[test]
    fn resolve_walks_and_reuses() {
        let path = KeyPath::parse_static("top.middle.bottom").unwrap();
        let root = nested();

        assert_eq!(path.resolve(&root), Some(&Value::from("cool")));
        // second use, same answer
        assert_eq!(path.resolve(&root), Some(&Value::from("cool")));
    }

    #[test]
    fn resolve_mut_edits_in_place() {
        let path = KeyPath::parse_static("items.1").unwrap();
        let mut root = nested();

        *path.resolve_mut(&mut root).unwrap() = Value::Int(99);
        assert_eq!(path.resolve(&root), Some(&Value::Int(99)));
    }

    #[test]
    fn assign_through_absent_container_fails_cleanly() {
        let path = KeyPath::parse_static("nope.at.all").unwrap();
        let mut root = nested();
        let snapshot = root.clone();

        let err = path.assign(&mut root, Value::Int(1)).unwrap_err();
        assert_eq!(err.kind(), &ResolveErrorKind::AbsentContainer);
        assert_eq!(err.segment().name(), "nope");
        assert_eq!(root, snapshot);
    }

    #[test]
    fn assign_out_of_bounds_index() {
        let path = KeyPath::parse_static("items.9").unwrap();
        let mut root = nested();

        let err = path.assign(&mut root, Value::Int(1)).unwrap_err();
        assert_eq!(err.kind(), &ResolveErrorKind::IndexOutOfBounds { len: 3 });
    }

    #[test]
    fn from_segments_addresses_dotted_field_names() {
        let root = Value::from(fields! { "and.even.this" => true });
        let segment = Segment::new("and.even.this").into_owned();
        let path = KeyPath::from(alloc::boxed::Box::from([OffsetSegment::from(segment)]));

        assert_eq!(path.resolve(&root), Some(&Value::Bool(true)));
        // the string grammar cannot reach it
        assert_eq!(KeyPath::parse_static("and.even.this").unwrap().resolve(&root), None);
    }

    #[test]
    fn concat_composes_traversal() {
        let left = KeyPath::parse_static("top.middle").unwrap();
        let right = KeyPath::parse_static("bottom").unwrap();
        let whole = left.concat(right);

        assert_eq!(whole.len(), 3);
        assert_eq!(whole.resolve(&nested()), Some(&Value::from("cool")));
    }
}
