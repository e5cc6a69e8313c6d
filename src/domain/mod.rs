pub mod metric;
pub mod monitor;
pub mod status;

pub use metric::*;
pub use monitor::*;
pub use status::*;
