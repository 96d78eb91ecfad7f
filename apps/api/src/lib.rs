//! Member Search API Library
//!
//! Dynamic member search over a member/team model: optional criteria are
//! composed into a single filter, and paged queries skip the total-count
//! query whenever the page itself tells the total.

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
