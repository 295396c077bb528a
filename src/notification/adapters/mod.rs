//! Adapters implementing the notification port.

pub mod memory;
pub mod rest;

pub use memory::InMemoryNotificationApi;
pub use rest::RestNotificationApi;
