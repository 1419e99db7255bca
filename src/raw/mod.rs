//! The raw AVL tree and its supporting storage types.

mod arena;
mod handle;
mod node;
mod size;

pub(crate) mod raw_avl_tree;

pub(crate) use handle::Handle;
