mod batch;
mod catalog;
mod chat;
mod enrollment;
mod tenant;

pub use batch::*;
pub use catalog::*;
pub use chat::*;
pub use enrollment::*;
pub use tenant::*;
