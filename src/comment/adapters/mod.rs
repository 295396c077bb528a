//! Adapters implementing the comment ports.

pub mod memory;
pub mod rest;

pub use memory::InMemoryCommentApi;
pub use rest::RestCommentApi;
