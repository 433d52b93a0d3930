//! Mesa Client
//!
//! REST client, session persistence and the async application store that
//! drives the ordering core in [`mesa`].

pub mod api;
pub mod config;
pub mod observability;
pub mod render;
pub mod store;
