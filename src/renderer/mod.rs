//! Render contract
//!
//! The core never paints and never reads pixels back. After each step the
//! session walks the live entities, hands one [`Sprite`] per entity to the
//! host [`Renderer`], and tells it which IDs to drop.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{EntityId, GameState};

/// What a sprite depicts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpriteKind {
    Player,
    Enemy,
    /// Removed enemy kept on screen while its explosion plays
    Wreck,
    Bullet { color: u32 },
}

/// Everything the host needs to draw one entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub id: EntityId,
    pub kind: SpriteKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub exploded: bool,
}

/// Host drawing surface
pub trait Renderer {
    /// Draw (or move) a sprite for this frame
    fn draw(&mut self, sprite: &Sprite);
    /// Forget a sprite that left the game
    fn remove(&mut self, id: EntityId);
}

/// Renderer for headless runs
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw(&mut self, _sprite: &Sprite) {}
    fn remove(&mut self, _id: EntityId) {}
}

/// Sprites for every live entity, player first
pub fn sprites(state: &GameState) -> Vec<Sprite> {
    let mut sprites =
        Vec::with_capacity(1 + state.enemies.len() + state.wrecks.len() + state.bullets.len());

    sprites.push(Sprite {
        id: state.player.id,
        kind: SpriteKind::Player,
        pos: state.player.pos,
        size: state.player.size,
        exploded: state.player.exploded,
    });
    sprites.extend(state.enemies.iter().map(|e| Sprite {
        id: e.id,
        kind: SpriteKind::Enemy,
        pos: e.pos,
        size: e.size,
        exploded: e.exploded,
    }));
    sprites.extend(state.wrecks.iter().map(|w| Sprite {
        id: w.id,
        kind: SpriteKind::Wreck,
        pos: w.pos,
        size: w.size,
        exploded: w.exploded,
    }));
    sprites.extend(state.bullets.iter().map(|b| Sprite {
        id: b.id,
        kind: SpriteKind::Bullet { color: b.color },
        pos: b.pos,
        size: b.size,
        exploded: false,
    }));

    sprites
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::Bullet;

    #[test]
    fn test_sprites_cover_live_entities() {
        let mut state = GameState::new(Settings::default(), 5);
        state.add_bullet(Bullet::new(
            Vec2::new(10.0, 10.0),
            Vec2::new(6.0, 10.0),
            0x00FF00,
            Vec2::new(0.0, -200.0),
        ));

        let sprites = sprites(&state);
        assert_eq!(sprites.len(), 2);
        assert_eq!(sprites[0].kind, SpriteKind::Player);
        assert_eq!(sprites[0].pos, Vec2::new(300.0, 590.0));
        assert_eq!(sprites[1].kind, SpriteKind::Bullet { color: 0x00FF00 });
    }
}
