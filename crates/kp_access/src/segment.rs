//! Single-segment access and resolution errors.

use alloc::borrow::Cow;
use core::fmt;

use kp_value::{Value, ValueKind};

// -----------------------------------------------------------------------------
// Segment

/// A **single** parsed path segment.
///
/// A segment name is an opaque string; how it resolves depends on the value
/// it is applied to. One access step is:
///
/// - `Null` — absence propagates, the step resolves to nothing.
/// - `Proxy` — the proxy is asked for this one segment through its own
///   [`get`](kp_value::ProxyObject::get); the answer may itself be a proxy.
/// - `Map` — field lookup by name.
/// - `List` — element lookup by decimal index.
/// - scalars — nothing to address, the step resolves to nothing.
///
/// # Examples
///
/// ```
/// use kp_access::Segment;
/// use kp_value::{Value, fields};
///
/// let root = Value::from(fields! { "top" => fields! { "inner" => 3 } });
///
/// let top = Segment::new("top").access(&root).unwrap();
/// assert_eq!(Segment::new("inner").access(top), Some(&Value::Int(3)));
/// assert_eq!(Segment::new("missing").access(&root), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Segment<'a>(Cow<'a, str>);

impl<'a> Segment<'a> {
    /// Creates a segment from a name.
    #[inline]
    pub fn new(name: impl Into<Cow<'a, str>>) -> Self {
        Self(name.into())
    }

    /// Returns the segment name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Converts this into an "owned" value.
    #[inline]
    pub fn into_owned(self) -> Segment<'static> {
        Segment(Cow::Owned(self.0.into_owned()))
    }

    /// Resolves one step of a traversal; `None` is absence, not an error.
    pub fn access<'r>(&self, base: &'r Value) -> Option<&'r Value> {
        match base {
            Value::Null => None,
            Value::Proxy(proxy) => proxy.get(self.name()),
            other => other.lookup(self.name()),
        }
    }

    /// Resolves one step of a traversal; on success returns a mutable
    /// reference.
    pub fn access_mut<'r>(&self, base: &'r mut Value) -> Option<&'r mut Value> {
        match base {
            Value::Null => None,
            Value::Proxy(proxy) => proxy.get_mut(self.name()),
            other => other.lookup_mut(self.name()),
        }
    }
}

impl fmt::Display for Segment<'_> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// -----------------------------------------------------------------------------
// Segment with offset

/// A [`Segment`] combined with its byte offset in the source path, kept for
/// error reporting.
///
/// `offset` is only used to display error messages, unrelated to access.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OffsetSegment<'a> {
    pub segment: Segment<'a>,
    /// Only used to display error messages.
    pub offset: Option<usize>,
}

impl<'a> From<Segment<'a>> for OffsetSegment<'a> {
    #[inline]
    fn from(segment: Segment<'a>) -> Self {
        Self {
            segment,
            offset: None,
        }
    }
}

impl<'a> OffsetSegment<'a> {
    /// Converts this into an "owned" value.
    #[inline]
    pub fn into_owned(self) -> OffsetSegment<'static> {
        OffsetSegment {
            segment: self.segment.into_owned(),
            offset: self.offset,
        }
    }

    /// See [`Segment::access`].
    #[inline]
    pub fn access<'r>(&self, base: &'r Value) -> Option<&'r Value> {
        self.segment.access(base)
    }

    /// See [`Segment::access_mut`].
    #[inline]
    pub fn access_mut<'r>(&self, base: &'r mut Value) -> Option<&'r mut Value> {
        self.segment.access_mut(base)
    }
}

// -----------------------------------------------------------------------------
// ResolveError

/// The kind of [`ResolveError`], along with some kind-specific information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveErrorKind {
    /// An intermediate container resolved to nothing; assignments cannot
    /// cross an absent intermediate (reads can, and resolve to absence).
    AbsentContainer,
    /// The value addressed is not a field container.
    NotAContainer { kind: ValueKind },
    /// The proxy declined to accept the assignment.
    ProxyRefused,
    /// A list was addressed with an index past its end.
    IndexOutOfBounds { len: usize },
}

/// A failed assignment resolution.
///
/// Produced only by `set`-style operations: reads report absence through
/// `Option`, never through this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveError {
    kind: ResolveErrorKind,
    segment: Segment<'static>,
    offset: Option<usize>,
}

impl ResolveError {
    pub(crate) fn new(kind: ResolveErrorKind, segment: Segment<'_>, offset: Option<usize>) -> Self {
        Self {
            kind,
            segment: segment.into_owned(),
            offset,
        }
    }

    /// Returns the kind of [`ResolveError`].
    #[inline]
    pub fn kind(&self) -> &ResolveErrorKind {
        &self.kind
    }

    /// Returns the [`Segment`] that failed to resolve.
    #[inline]
    pub fn segment(&self) -> &Segment<'_> {
        &self.segment
    }

    /// If the segment came from a parsed path string, returns its byte
    /// offset within it.
    #[inline]
    pub fn offset(&self) -> Option<&usize> {
        self.offset.as_ref()
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to resolve segment `{}`", self.segment)?;
        if let Some(offset) = self.offset {
            write!(f, " (offset {offset})")?;
        }
        write!(f, ": ")?;

        match &self.kind {
            ResolveErrorKind::AbsentContainer => {
                f.write_str("the container is missing; cannot assign through an absent intermediate")
            }
            ResolveErrorKind::NotAContainer { kind } => {
                write!(f, "a {kind} value has no addressable field by that name")
            }
            ResolveErrorKind::ProxyRefused => {
                f.write_str("the proxy declined to accept the field")
            }
            ResolveErrorKind::IndexOutOfBounds { len } => {
                write!(f, "index is out of bounds for a list of length {len}")
            }
        }
    }
}

impl core::error::Error for ResolveError {}

// -----------------------------------------------------------------------------
// Tests
