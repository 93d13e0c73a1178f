use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use star_raiders::audio::{AudioBackend, SoundCue};
use star_raiders::renderer::{Renderer, Sprite, SpriteKind};
use star_raiders::sim::{EntityId, GameEvent, GamePhase, TickInput};
use star_raiders::{HighScores, Session, Settings};

const FRAME_MS: f64 = 16.0;

#[derive(Clone, Default)]
struct Sounds(Rc<RefCell<Vec<String>>>);

impl AudioBackend for Sounds {
    fn play(&mut self, cue: SoundCue, _volume: f32) {
        self.0.borrow_mut().push(format!("play {cue:?}"));
    }
    fn set_volume(&mut self, _cue: SoundCue, _volume: f32) {}
    fn pause(&mut self, cue: SoundCue) {
        self.0.borrow_mut().push(format!("pause {cue:?}"));
    }
    fn resume(&mut self, cue: SoundCue) {
        self.0.borrow_mut().push(format!("resume {cue:?}"));
    }
}

#[derive(Default)]
struct Canvas {
    frame: Vec<Sprite>,
    removed: HashSet<EntityId>,
}

impl Renderer for Canvas {
    fn draw(&mut self, sprite: &Sprite) {
        self.frame.push(*sprite);
    }
    fn remove(&mut self, id: EntityId) {
        self.removed.insert(id);
    }
}

/// One spawn slot at x = 0 with the player parked right under it
fn single_lane() -> Settings {
    let mut settings = Settings::default();
    settings.spawn.slot_count = 1;
    settings.player.start_x = 0.0;
    settings
}

struct Harness {
    session: Session,
    canvas: Canvas,
    sounds: Sounds,
    now: f64,
}

impl Harness {
    fn new(settings: Settings) -> Self {
        let sounds = Sounds::default();
        let session = Session::new(
            settings,
            7,
            Box::new(sounds.clone()),
            Box::new(HighScores::new()),
        );
        Self {
            session,
            canvas: Canvas::default(),
            sounds,
            now: 0.0,
        }
    }

    fn step(&mut self, input: TickInput) -> Vec<GameEvent> {
        self.canvas.frame.clear();
        let events = self.session.frame(self.now, &input, &mut self.canvas);
        self.now += FRAME_MS;
        events
    }

    fn run_until(
        &mut self,
        input: TickInput,
        max_frames: usize,
        f: impl Fn(&GameEvent) -> bool,
    ) -> Option<GameEvent> {
        for _ in 0..max_frames {
            if let Some(event) = self.step(input).into_iter().find(|e| f(e)) {
                return Some(event);
            }
        }
        None
    }
}

fn fire() -> TickInput {
    TickInput {
        fire: true,
        ..Default::default()
    }
}

#[test]
fn shooting_down_an_enemy_scores_by_depth() {
    let mut h = Harness::new(single_lane());

    // The first frame has no elapsed time: it starts the game and nothing more
    let events = h.step(fire());
    assert_eq!(h.session.phase(), GamePhase::Running);
    assert!(events.contains(&GameEvent::Started));
    let events = h.step(fire());
    assert!(
        events
            .iter()
            .any(|e| matches!(e, GameEvent::EnemySpawned { slot: 0, .. }))
    );
    assert!(h.sounds.0.borrow().contains(&"play BackgroundMusic".to_string()));

    let exploded = h
        .run_until(fire(), 400, |e| matches!(e, GameEvent::EnemyExploded { .. }))
        .expect("enemy in the player's lane gets shot");
    let GameEvent::EnemyExploded { id } = exploded else {
        unreachable!()
    };

    let score = h.session.score();
    assert!(score > 0 && score < 63, "score {score}");
    assert_eq!(h.session.level(), 1);
    assert!(h.sounds.0.borrow().contains(&"play EnemyExplosion".to_string()));
    assert!(h.sounds.0.borrow().contains(&"play PlayerShot".to_string()));
    assert!(h
        .canvas
        .frame
        .iter()
        .any(|s| s.id == id && s.kind == SpriteKind::Wreck && s.exploded));

    // Stop firing and let the wreck teardown run out
    let cleared = h.run_until(TickInput::default(), 150, |e| {
        *e == GameEvent::WreckCleared { id }
    });
    assert!(cleared.is_some());
    assert!(h.canvas.removed.contains(&id));
    assert!(!h.canvas.frame.iter().any(|s| s.id == id));
}

#[test]
fn pause_freezes_the_field_and_the_music() {
    let mut h = Harness::new(single_lane());
    h.step(fire());
    for _ in 0..10 {
        h.step(TickInput::default());
    }
    let before = h.session.state().enemies[0].pos;

    let pause = TickInput {
        pause: true,
        ..Default::default()
    };
    h.step(pause);
    assert_eq!(h.session.phase(), GamePhase::Paused);
    // Holding the key does not toggle again
    for _ in 0..30 {
        h.step(pause);
    }
    h.step(TickInput::default());
    assert_eq!(h.session.phase(), GamePhase::Paused);
    assert_eq!(h.session.state().enemies[0].pos, before);

    h.step(pause);
    assert_eq!(h.session.phase(), GamePhase::Running);
    assert!(h.session.state().enemies[0].pos.y > before.y);

    let sounds = h.sounds.0.borrow();
    assert!(sounds.contains(&"pause BackgroundMusic".to_string()));
    assert!(sounds.contains(&"resume BackgroundMusic".to_string()));
}

#[test]
fn reset_while_paused_clears_the_field() {
    let mut h = Harness::new(single_lane());
    h.step(fire());
    for _ in 0..40 {
        h.step(fire());
    }
    assert!(!h.session.state().bullets.is_empty());
    let enemy = h.session.state().enemies[0].id;

    h.step(TickInput {
        pause: true,
        ..Default::default()
    });
    let events = h.step(TickInput {
        reset: true,
        ..Default::default()
    });

    assert!(events.contains(&GameEvent::Reset));
    assert_eq!(h.session.phase(), GamePhase::Ready);
    let state = h.session.state();
    assert!(state.enemies.is_empty());
    assert!(state.bullets.is_empty());
    assert_eq!(state.spawn_pool.free_count(), 1);
    assert!(h.canvas.removed.contains(&enemy));
    assert_eq!(h.canvas.frame.len(), 1);
}
