pub(super) mod system;
pub(super) mod views;

pub use system::*;
pub use views::*;
