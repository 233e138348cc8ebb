//! # Algorithms Module
//!
//! Pure verification algorithms: node digests, inclusion paths, and
//! forward-link chains.

pub mod forward_links;
pub mod hash_path;
pub mod inclusion_path;

pub use forward_links::{verify_forward_links, ChainLimits};
pub use hash_path::{
    hash_empty, hash_interior, hash_leaf, hash_node, key_path, path_direction, shares_prefix,
};
pub use inclusion_path::{get, matches, matching_leaf, recompute_root, resolve_membership};
