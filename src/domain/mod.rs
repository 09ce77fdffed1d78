pub mod reading;
pub mod types;

pub use reading::*;
pub use types::*;
