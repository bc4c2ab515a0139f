pub mod client;
pub mod registry;

pub use client::PeerClient;
pub use registry::NodeRegistry;
