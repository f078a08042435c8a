#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod key_path;
mod ops;
mod path;
mod segment;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use key_path::{KeyPath, PathAccessError};
pub use ops::{PathAccess, PropertyMap, get, get_mut, get_properties, set, set_properties};
pub use path::{AccessPath, ParseError};
pub use segment::{OffsetSegment, ResolveError, ResolveErrorKind, Segment};
