//! Tenant-scoped orchestration engines: batched enrollment writes,
//! atomic sequence reordering, and transactional chat workflows.

mod batch;
mod chat;
mod enrollment;
mod error;
mod reorder;

pub use batch::*;
pub use chat::*;
pub use enrollment::*;
pub use error::*;
pub use reorder::*;
