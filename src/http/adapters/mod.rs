//! Transport implementations for the HTTP layer.

pub mod memory;
pub mod reqwest;

pub use memory::ScriptedHttpTransport;
pub use reqwest::ReqwestTransport;
