//! Pagination module
//!
//! Token-based continuation over list operations.
//!
//! # Overview
//!
//! A [`Pager`] repeatedly calls one list operation, threading the
//! continuation token found in each page into the next request. It stops
//! when a page carries no token, an empty token, or the token it was just
//! called with.

mod pager;
mod types;

pub use pager::Pager;
pub use types::{extract_path, PageSpec, PagerState, TokenSource};

#[cfg(test)]
mod tests;
