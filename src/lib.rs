//! Mossvale: a small creature-taming game.
//!
//! Each module is a self-contained domain plugin; `shared` holds the type
//! contract they communicate through.

pub mod creatures;
pub mod dungeon;
pub mod input;
pub mod pathfind;
pub mod player;
pub mod shared;
pub mod ui;
pub mod world;

pub use creatures::CreaturesPlugin;
pub use dungeon::DenPlugin;
pub use input::InputPlugin;
pub use player::PlayerPlugin;
pub use shared::SharedPlugin;
pub use ui::UiPlugin;
pub use world::WorldPlugin;
