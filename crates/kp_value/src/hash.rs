//! Fixed-seed hashing for the field containers.
//!
//! Based on the `foldhash` crate with a fixed hash seed, so that hash
//! results depend only on the input. This keeps map layout (and therefore
//! `Debug` output and iteration order for a given insertion sequence)
//! stable across runs.

use core::hash::BuildHasher;

use foldhash::fast::{FixedState, FoldHasher};

/// The fixed hash seed.
const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0xD2B5_61E4_8C03_A97F);

/// A hasher whose results depend only on the input.
///
/// Created through [`FixedHashState::build_hasher`].
pub type FixedHasher = FoldHasher<'static>;

/// Hash state based upon a random but fixed seed.
///
/// # Examples
///
/// ```
/// use core::hash::{BuildHasher, Hash, Hasher};
/// use kp_value::hash::FixedHashState;
///
/// let mut hasher = FixedHashState.build_hasher();
/// 3.hash(&mut hasher);
/// let result = hasher.finish(); // stable across runs
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}
