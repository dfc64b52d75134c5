//! Strongly connected component decomposition over dense-index directed graphs.

pub mod domain;
pub mod infrastructure;
pub mod interface;
pub mod usecase;
