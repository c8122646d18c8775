pub mod domain;
mod error;
mod identity;

pub use domain::*;
pub use error::*;
pub use identity::*;
