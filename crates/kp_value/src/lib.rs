#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod fields;
mod proxy;
mod serde;
mod value;

pub mod hash;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use fields::Fields;
pub use proxy::{ObjectProxy, ProxyObject};
pub use value::{Value, ValueKind};
