pub mod indicator;
pub mod market;
pub mod screening;

pub use indicator::*;
pub use market::*;
pub use screening::*;
