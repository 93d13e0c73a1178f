//! Frame-driven simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering,
//! audio and storage:
//! - Time only enters through the `dt` handed to [`tick`]
//! - Seeded RNG only (spawn slot selection)
//! - Side effects leave as [`GameEvent`]s for the host to act on

pub mod collision;
pub mod entities;
pub mod progression;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, has_collision};
pub use entities::{Bounded, Bullet, Cooldown, Direction, Enemy, EntityId, Movable, Player, Side};
pub use progression::{Difficulty, score_target};
pub use spawn::{SlotId, SpawnPool};
pub use state::{GameEvent, GamePhase, GameState, Wreck};
pub use tick::{TickInput, tick};
