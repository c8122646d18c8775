pub mod bibliography;
pub mod chat;
pub mod enrollments;
pub mod health;
pub mod tenants;

pub use bibliography::*;
pub use chat::*;
pub use enrollments::*;
pub use health::*;
pub use tenants::*;
