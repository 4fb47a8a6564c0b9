pub mod manga;
pub mod notification;
pub mod recommendation;
pub mod stats;

pub use manga::*;
pub use notification::*;
pub use recommendation::*;
pub use stats::*;
