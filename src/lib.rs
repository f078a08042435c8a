#![doc = include_str!("../README.md")]
#![no_std]

pub use kp_access as access;
pub use kp_value as value;

pub use kp_access::{KeyPath, PathAccess, get, get_mut, get_properties, set, set_properties};
pub use kp_value::{ObjectProxy, ProxyObject, Value};
