pub mod header;
pub mod navigation;

pub use header::*;
pub use navigation::*;
