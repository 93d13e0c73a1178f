//! Frame simulation step
//!
//! One call per rendered frame. The same `dt` feeds player movement,
//! cooldowns, the spawn timer and the session clock.

use super::collision::has_collision;
use super::entities::{Bounded, Direction, Enemy, Movable, Side};
use super::state::{GameEvent, GamePhase, GameState};

/// Control state sampled for a single frame (true = held)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Fire (also starts a session in the Ready phase)
    pub fire: bool,
    /// Pause toggle, acts on the press edge
    pub pause: bool,
    /// Reset, acts on the press edge while paused or after game over
    pub reset: bool,
}

/// Advance the game state by `dt_ms` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) {
    let dt_ms = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };

    // Cosmetic deadlines run on wall time, paused or not
    state.advance_clock(dt_ms);

    let (pause_pressed, reset_pressed) = state.latch.update(input.pause, input.reset);

    if reset_pressed && matches!(state.phase, GamePhase::Paused | GamePhase::GameOver) {
        state.reset();
        return;
    }
    if pause_pressed {
        state.toggle_pause();
    }
    if state.phase == GamePhase::Ready && input.fire {
        state.start();
    }

    // Nothing below may mutate unless the game is live. A zero-length step
    // would otherwise spawn an enemy exactly on the out-of-bounds edge.
    if state.phase != GamePhase::Running || dt_ms == 0.0 {
        return;
    }

    update_player(state, input, dt_ms);
    update_bullets(state, dt_ms);
    if state.phase != GamePhase::Running {
        return;
    }
    spawn_enemies(state, dt_ms);
    update_enemies(state, dt_ms);
}

fn update_player(state: &mut GameState, input: &TickInput, dt_ms: f32) {
    if input.left {
        state.player.steer(Direction::Left, dt_ms);
    }
    if input.right {
        state.player.steer(Direction::Right, dt_ms);
    }

    if input.fire {
        if let Some(bullet) = state.player.shoot_if_ready(dt_ms) {
            let id = state.add_bullet(bullet);
            state.push_event(GameEvent::PlayerShot { id });
        }
    } else {
        state.player.refresh_cooldown(dt_ms);
    }
}

/// Move every bullet, drop the ones that left the field, resolve hits
fn update_bullets(state: &mut GameState, dt_ms: f32) {
    let field = state.settings().field;
    let bullets = std::mem::take(&mut state.bullets);
    let mut survivors = Vec::with_capacity(bullets.len());
    let mut pending = bullets.into_iter();

    while let Some(mut bullet) = pending.next() {
        bullet.advance(dt_ms);
        if bullet.is_out_of_bounds(&field) {
            state.push_event(GameEvent::BulletRemoved { id: bullet.id });
            continue;
        }

        match bullet.side() {
            Some(Side::Player) => {
                let target = state
                    .enemies
                    .iter()
                    .position(|enemy| has_collision(&bullet, enemy));
                if let Some(idx) = target {
                    state.destroy_enemy(idx);
                    state.push_event(GameEvent::BulletRemoved { id: bullet.id });
                    continue;
                }
            }
            Some(Side::Enemy) => {
                if has_collision(&bullet, &state.player) {
                    survivors.push(bullet);
                    survivors.extend(pending);
                    state.bullets = survivors;
                    state.player_hit();
                    return;
                }
            }
            None => {}
        }
        survivors.push(bullet);
    }

    state.bullets = survivors;
}

/// Spawn one enemy per elapsed interval into a random free slot
fn spawn_enemies(state: &mut GameState, dt_ms: f32) {
    state.since_last_spawn += dt_ms;
    if state.since_last_spawn < state.difficulty.spawn_interval {
        return;
    }

    let Some((slot, pos)) = state.spawn_pool.acquire(&mut state.rng) else {
        // Every slot is taken; try again next frame
        return;
    };

    let settings = state.settings();
    let enemy = Enemy::new(
        pos,
        state.difficulty.enemy_velocity,
        state.difficulty.enemy_firing_cooldown,
        slot,
        &settings.enemy,
        &settings.bullet,
    );
    let id = state.add_enemy(enemy);
    log::debug!("Spawned enemy {id} in slot {slot}");
    state.push_event(GameEvent::EnemySpawned { id, slot });
    state.since_last_spawn = 0.0;
}

/// Move every enemy, drop the ones that left the field, ram or fire
fn update_enemies(state: &mut GameState, dt_ms: f32) {
    let field = state.settings().field;
    let mut i = 0;

    while i < state.enemies.len() {
        let enemy = &mut state.enemies[i];
        enemy.advance(dt_ms);

        if enemy.is_out_of_bounds(&field) {
            // swap_remove pulls an unvisited enemy into `i`
            let enemy = state.enemies.swap_remove(i);
            state.retire_enemy(enemy);
            continue;
        }

        if has_collision(&state.enemies[i], &state.player) {
            let enemy = &mut state.enemies[i];
            enemy.explode();
            let id = enemy.id;
            state.push_event(GameEvent::EnemyExploded { id });
            state.player_hit();
            return;
        }

        if let Some(bullet) = state.enemies[i].shoot_if_ready(dt_ms) {
            let id = state.add_bullet(bullet);
            state.push_event(GameEvent::EnemyShot { id });
        }
        i += 1;
    }
}
