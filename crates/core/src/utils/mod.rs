pub mod clock;
pub mod money;

pub use clock::*;
pub use money::*;
