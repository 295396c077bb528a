//! Adapters implementing the application port.

pub mod memory;
pub mod rest;

pub use memory::InMemoryApplicationApi;
pub use rest::RestApplicationApi;
