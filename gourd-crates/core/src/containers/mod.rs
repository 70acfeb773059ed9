//! Contains containers which are used by the solver.
mod key_value_heap;
mod keyed_vec;

pub use key_value_heap::*;
pub use keyed_vec::*;

#[allow(clippy::disallowed_types, reason = "this is how we define our hashmap")]
pub type HashMap<K, V, Hasher = fnv::FnvBuildHasher> = std::collections::HashMap<K, V, Hasher>;

#[allow(clippy::disallowed_types, reason = "this is how we define our hashset")]
pub type HashSet<K, Hasher = fnv::FnvBuildHasher> = std::collections::HashSet<K, Hasher>;
