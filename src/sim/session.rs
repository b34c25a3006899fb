//! Session lifecycle
//!
//! Idle -> Running -> GameOver -> (restart) Running.
//!
//! A running session owns two scheduled tasks: the animation-frame callback
//! (re-armed at the start of every frame) and the spawn interval. Game over
//! cancels both; callbacks that still arrive afterwards are ignored.

use serde::{Deserialize, Serialize};

use super::collision::CombatRules;
use super::spawn::Spawner;
use super::state::{GameEvent, Playfield, World};
use super::tick::{draw, tick};
use crate::platform::{FrameHandle, InputSource, Scheduler, TimerHandle};
use crate::renderer::Renderer;
use crate::settings::Settings;
use crate::ui::Hud;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Before the first start
    Idle,
    /// Simulation loop and spawner active
    Running,
    /// Player died; waiting for restart
    GameOver,
}

/// What is kept of a finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub final_score: u32,
    pub kills: u32,
    pub ticks: u64,
    pub seed: u64,
}

pub struct Session {
    phase: SessionPhase,
    settings: Settings,
    bounds: Playfield,
    world: Option<World>,
    spawner: Spawner,
    frame: Option<FrameHandle>,
    spawn_timer: Option<TimerHandle>,
    last_run: Option<RunSummary>,
}

impl Session {
    /// New idle session; shows the start screen
    pub fn new(settings: Settings, bounds: Playfield, hud: &mut impl Hud) -> Self {
        hud.show_start_screen();
        Self {
            phase: SessionPhase::Idle,
            settings,
            bounds,
            world: None,
            spawner: Spawner::new(),
            frame: None,
            spawn_timer: None,
            last_run: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    /// The live world (only while running)
    pub fn world(&self) -> Option<&World> {
        self.world.as_ref()
    }

    pub fn world_mut(&mut self) -> Option<&mut World> {
        self.world.as_mut()
    }

    /// Summary of the most recent finished run
    pub fn last_run(&self) -> Option<&RunSummary> {
        self.last_run.as_ref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn bounds(&self) -> Playfield {
        self.bounds
    }

    fn combat_rules(&self) -> CombatRules {
        CombatRules {
            particles: self.settings.particles,
            single_kill_projectiles: self.settings.single_kill_projectiles,
        }
    }

    /// Idle -> Running
    pub fn start(&mut self, seed: u64, sched: &mut impl Scheduler, hud: &mut impl Hud) -> bool {
        if self.phase != SessionPhase::Idle {
            log::debug!("Ignoring start in {:?}", self.phase);
            return false;
        }
        self.begin(seed, sched, hud);
        true
    }

    /// GameOver -> Running
    pub fn restart(&mut self, seed: u64, sched: &mut impl Scheduler, hud: &mut impl Hud) -> bool {
        if self.phase != SessionPhase::GameOver {
            log::debug!("Ignoring restart in {:?}", self.phase);
            return false;
        }
        self.begin(seed, sched, hud);
        true
    }

    fn begin(&mut self, seed: u64, sched: &mut impl Scheduler, hud: &mut impl Hud) {
        self.cancel_tasks(sched);

        let seed = self.settings.seed.unwrap_or(seed);
        let world = World::new(self.bounds, seed);
        hud.set_score(world.score);
        hud.set_health_percent(world.player.health_percent());
        hud.hide_screens();
        self.world = Some(world);
        self.phase = SessionPhase::Running;

        self.spawner.activate();
        self.frame = Some(sched.request_frame());
        self.spawn_timer = Some(sched.start_interval(self.spawner.period_ms));

        log::info!(
            "Session started ({}x{}, seed {})",
            self.bounds.width,
            self.bounds.height,
            seed
        );
    }

    /// Animation-frame callback: re-arm, tick, sync HUD, draw
    pub fn on_frame(
        &mut self,
        sched: &mut impl Scheduler,
        input: &impl InputSource,
        renderer: &mut impl Renderer,
        hud: &mut impl Hud,
    ) {
        if self.phase != SessionPhase::Running {
            log::debug!("Ignoring frame in {:?}", self.phase);
            return;
        }
        self.frame = Some(sched.request_frame());

        let rules = self.combat_rules();
        let Some(world) = self.world.as_mut() else {
            return;
        };
        let events = tick(world, input, &rules);

        let mut health = None;
        let mut scored = false;
        let mut died = false;
        for event in &events {
            match event {
                GameEvent::PlayerDamaged { .. } => health = Some(world.player.health_percent()),
                GameEvent::ZombieKilled { .. } => scored = true,
                GameEvent::PlayerDied => died = true,
            }
        }
        if scored {
            hud.set_score(world.score);
        }
        if let Some(percent) = health {
            hud.set_health_percent(percent);
        }

        if died {
            self.end(sched, hud);
            return;
        }

        draw(
            world,
            renderer,
            input.pointer_position(),
            self.settings.effective_fade_alpha(),
        );
    }

    /// Spawn-interval callback. Returns whether a zombie was added.
    pub fn on_spawn_timer(&mut self) -> bool {
        if self.phase != SessionPhase::Running {
            log::debug!("Ignoring spawn timer in {:?}", self.phase);
            return false;
        }
        match self.world.as_mut() {
            Some(world) => self.spawner.on_timer(world),
            None => false,
        }
    }

    /// Fire toward the pointer. No-op unless running.
    pub fn fire(&mut self, input: &impl InputSource) -> bool {
        if self.phase != SessionPhase::Running {
            return false;
        }
        match self.world.as_mut() {
            Some(world) => {
                let target = input.pointer_position();
                world.player.fire(target, &mut world.projectiles);
                true
            }
            None => false,
        }
    }

    /// Host surface resized; later boundary checks use the new size
    pub fn resize(&mut self, width: f32, height: f32) {
        self.bounds = Playfield::new(width, height);
        if let Some(world) = self.world.as_mut() {
            world.bounds = self.bounds;
        }
    }

    /// Running -> GameOver
    fn end(&mut self, sched: &mut impl Scheduler, hud: &mut impl Hud) {
        self.cancel_tasks(sched);
        self.phase = SessionPhase::GameOver;

        if let Some(world) = self.world.take() {
            let summary = RunSummary {
                final_score: world.score,
                kills: world.kills,
                ticks: world.time_ticks,
                seed: world.seed,
            };
            log::info!(
                "Game over: score {} ({} kills, {} ticks)",
                summary.final_score,
                summary.kills,
                summary.ticks
            );
            hud.show_game_over_screen(summary.final_score);
            self.last_run = Some(summary);
        }
    }

    fn cancel_tasks(&mut self, sched: &mut impl Scheduler) {
        self.spawner.cancel();
        if let Some(frame) = self.frame.take() {
            sched.cancel_frame(frame);
        }
        if let Some(timer) = self.spawn_timer.take() {
            sched.clear_interval(timer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::KILL_SCORE;
    use crate::platform::{Direction, Due, InputState, ManualScheduler};
    use crate::sim::state::{Projectile, Zombie};
    use glam::Vec2;
    use proptest::prelude::*;

    #[derive(Debug, Default)]
    struct RecordingHud {
        score: Option<u32>,
        health: Option<f32>,
        start_screens: u32,
        game_over: Option<u32>,
        hidden: u32,
    }

    impl Hud for RecordingHud {
        fn set_score(&mut self, score: u32) {
            self.score = Some(score);
        }
        fn set_health_percent(&mut self, percent: f32) {
            self.health = Some(percent);
        }
        fn show_start_screen(&mut self) {
            self.start_screens += 1;
        }
        fn show_game_over_screen(&mut self, final_score: u32) {
            self.game_over = Some(final_score);
        }
        fn hide_screens(&mut self) {
            self.hidden += 1;
        }
    }

    #[derive(Default)]
    struct CountingRenderer {
        frames: u32,
        circles: u32,
    }

    impl Renderer for CountingRenderer {
        fn clear_with_trail(&mut self, _fade_alpha: f32) {
            self.frames += 1;
        }
        fn draw_circle(&mut self, _center: Vec2, _radius: f32, _color: [f32; 4], _alpha: f32) {
            self.circles += 1;
        }
        fn draw_facing_indicator(&mut self, _origin: Vec2, _angle: f32) {}
    }

    struct Harness {
        session: Session,
        sched: ManualScheduler,
        hud: RecordingHud,
        renderer: CountingRenderer,
        input: InputState,
    }

    impl Harness {
        fn new() -> Self {
            let mut hud = RecordingHud::default();
            let session = Session::new(Settings::default(), Playfield::new(800.0, 600.0), &mut hud);
            Self {
                session,
                sched: ManualScheduler::new(10.0),
                hud,
                renderer: CountingRenderer::default(),
                input: InputState::new(),
            }
        }

        fn start(&mut self) -> bool {
            self.session.start(1, &mut self.sched, &mut self.hud)
        }

        /// Advance the virtual clock and dispatch whatever fell due
        fn run_ms(&mut self, ms: f64) {
            let step = self.sched.frame_period_ms();
            let mut elapsed = 0.0;
            while elapsed < ms {
                for due in self.sched.advance(step) {
                    match due {
                        Due::Frame(_) => self.session.on_frame(
                            &mut self.sched,
                            &self.input,
                            &mut self.renderer,
                            &mut self.hud,
                        ),
                        Due::Interval(_) => {
                            self.session.on_spawn_timer();
                        }
                    }
                }
                elapsed += step;
            }
        }

        fn kill_player(&mut self) {
            let world = self.session.world_mut().unwrap();
            world.player.health = 1;
            let pos = world.player.pos;
            world.zombies.push(Zombie::new(pos, 1.0));
            self.run_ms(10.0);
        }
    }

    #[test]
    fn test_new_session_is_idle() {
        let h = Harness::new();
        assert_eq!(h.session.phase(), SessionPhase::Idle);
        assert_eq!(h.hud.start_screens, 1);
        assert!(h.session.world().is_none());
        assert!(!h.sched.has_pending_frame());
    }

    #[test]
    fn test_start_schedules_frame_and_spawner() {
        let mut h = Harness::new();
        assert!(h.start());
        assert_eq!(h.session.phase(), SessionPhase::Running);
        assert!(h.sched.has_pending_frame());
        assert_eq!(h.sched.active_intervals(), 1);
        assert_eq!(h.hud.score, Some(0));
        assert_eq!(h.hud.health, Some(100.0));
        assert_eq!(h.hud.hidden, 1);

        // Second start while running is ignored
        assert!(!h.start());
        assert_eq!(h.sched.active_intervals(), 1);
    }

    #[test]
    fn test_frames_keep_running_and_spawner_adds_zombies() {
        let mut h = Harness::new();
        h.start();
        h.run_ms(3000.0);
        let world = h.session.world().unwrap();
        assert!(world.time_ticks >= 290, "ticks: {}", world.time_ticks);
        assert_eq!(world.zombies.len(), 3);
        assert_eq!(h.renderer.frames as u64, world.time_ticks);
    }

    #[test]
    fn test_game_over_cancels_everything() {
        let mut h = Harness::new();
        h.start();
        h.run_ms(1500.0);
        h.session.world_mut().unwrap().score = 70;
        h.kill_player();

        assert_eq!(h.session.phase(), SessionPhase::GameOver);
        assert!(!h.sched.has_pending_frame());
        assert_eq!(h.sched.active_intervals(), 0);
        assert!(h.session.world().is_none());
        assert_eq!(h.hud.game_over, Some(70));
        assert_eq!(h.hud.health, Some(0.0));
        assert_eq!(h.session.last_run().map(|r| r.final_score), Some(70));

        // Nothing is scheduled and stale callbacks are inert
        h.run_ms(5000.0);
        let mut sched = h.sched.clone();
        h.session
            .on_frame(&mut sched, &h.input, &mut h.renderer, &mut h.hud);
        assert!(!sched.has_pending_frame());
        assert!(!h.session.on_spawn_timer());
        assert!(!h.session.fire(&h.input));
        assert!(h.session.world().is_none());
    }

    #[test]
    fn test_restart_yields_fresh_world() {
        let mut h = Harness::new();
        h.start();
        h.run_ms(2500.0);
        h.input.set_pointer(600.0, 300.0);
        h.session.fire(&h.input);
        h.kill_player();
        assert_eq!(h.session.phase(), SessionPhase::GameOver);

        // Restart from the new playfield size
        h.session.resize(1000.0, 700.0);
        assert!(h.session.restart(2, &mut h.sched, &mut h.hud));
        let world = h.session.world().unwrap();
        assert_eq!(world.score, 0);
        assert_eq!(world.player.health, world.player.max_health);
        assert_eq!(world.player.pos, Vec2::new(500.0, 350.0));
        assert!(world.zombies.is_empty());
        assert!(world.projectiles.is_empty());
        assert!(world.particles.is_empty());
        assert_eq!(h.sched.active_intervals(), 1);
        assert!(h.sched.has_pending_frame());
        assert_eq!(h.hud.score, Some(0));
        assert_eq!(h.hud.health, Some(100.0));
    }

    #[test]
    fn test_restart_only_from_game_over() {
        let mut h = Harness::new();
        assert!(!h.session.restart(1, &mut h.sched, &mut h.hud));
        h.start();
        assert!(!h.session.restart(1, &mut h.sched, &mut h.hud));
        assert_eq!(h.sched.active_intervals(), 1);
    }

    #[test]
    fn test_fire_ignored_before_start() {
        let mut h = Harness::new();
        assert!(!h.session.fire(&h.input));
        assert!(!h.session.on_spawn_timer());
    }

    #[test]
    fn test_fire_appends_projectile() {
        let mut h = Harness::new();
        h.start();
        h.input.set_pointer(500.0, 300.0);
        assert!(h.session.fire(&h.input));
        let world = h.session.world().unwrap();
        assert_eq!(world.projectiles.len(), 1);
        assert!((world.projectiles[0].vel - Vec2::new(10.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_kill_updates_score_hud() {
        let mut h = Harness::new();
        h.start();
        let world = h.session.world_mut().unwrap();
        world.zombies.push(Zombie::new(Vec2::new(100.0, 100.0), 1.0));
        world
            .projectiles
            .push(Projectile::new(Vec2::new(101.0, 100.0), Vec2::ZERO));
        h.run_ms(10.0);
        assert_eq!(h.hud.score, Some(KILL_SCORE));
    }

    #[test]
    fn test_resize_applies_to_running_world() {
        let mut h = Harness::new();
        h.start();
        h.session.resize(320.0, 240.0);
        assert_eq!(
            h.session.world().unwrap().bounds,
            Playfield::new(320.0, 240.0)
        );
    }

    #[test]
    fn test_fixed_seed_from_settings() {
        let mut hud = RecordingHud::default();
        let settings = Settings {
            seed: Some(99),
            ..Settings::default()
        };
        let mut session = Session::new(settings, Playfield::default(), &mut hud);
        let mut sched = ManualScheduler::default();
        session.start(1234, &mut sched, &mut hud);
        assert_eq!(session.world().unwrap().seed, 99);
    }

    proptest! {
        #[test]
        fn prop_health_stays_in_range(
            zombies in proptest::collection::vec((0.0f32..800.0, 0.0f32..600.0, 1.0f32..2.0), 0..12),
            moves in proptest::collection::vec(0u8..16, 1..200),
        ) {
            let mut h = Harness::new();
            h.start();
            {
                let world = h.session.world_mut().unwrap();
                for (x, y, speed) in zombies {
                    world.zombies.push(Zombie::new(Vec2::new(x, y), speed));
                }
            }
            for bits in moves {
                h.input.set_pressed(Direction::Up, bits & 1 != 0);
                h.input.set_pressed(Direction::Down, bits & 2 != 0);
                h.input.set_pressed(Direction::Left, bits & 4 != 0);
                h.input.set_pressed(Direction::Right, bits & 8 != 0);
                h.run_ms(10.0);
                match h.session.world() {
                    Some(world) => {
                        prop_assert!(world.player.health <= world.player.max_health);
                        prop_assert!(world.player.health > 0);
                        let r = world.player.radius;
                        prop_assert!(world.player.pos.x >= r && world.player.pos.x <= 800.0 - r);
                        prop_assert!(world.player.pos.y >= r && world.player.pos.y <= 600.0 - r);
                    }
                    None => {
                        prop_assert_eq!(h.session.phase(), SessionPhase::GameOver);
                        prop_assert_eq!(h.hud.health, Some(0.0));
                        break;
                    }
                }
            }
        }
    }
}
