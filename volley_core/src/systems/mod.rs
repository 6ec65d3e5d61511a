pub mod collision;
pub mod input;
pub mod invariants;
pub mod movement;
pub mod pause;
pub mod scoring;
pub mod serve;

pub use collision::*;
pub use input::*;
pub use invariants::*;
pub use movement::*;
pub use pause::*;
pub use scoring::*;
pub use serve::*;
