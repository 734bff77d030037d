//! API 处理器

pub mod extract;
pub mod health;
pub mod translate;

pub use extract::*;
pub use health::*;
pub use translate::*;
