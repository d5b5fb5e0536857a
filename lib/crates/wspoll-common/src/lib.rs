pub mod devfile;
pub mod types;

pub use devfile::{Devfile, DevfileMetadata};
pub use types::*;
