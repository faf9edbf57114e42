pub mod client;
#[cfg(feature = "cli")]
pub mod render;
