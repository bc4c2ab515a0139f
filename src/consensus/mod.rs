pub mod resolver;

pub use resolver::{PeerChainView, resolve};
