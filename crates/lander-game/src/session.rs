//! Level session: owns the ship, planet and asteroids of the current level and
//! drives the win/lose state machine.
//!
//! ```text
//!            planet: good landing
//! InLevel ───────────────────────────▶ LevelTransition(Win)
//!    │  health reaches zero                  │ acknowledge: level + 1
//!    ▼                                       ▼
//! LevelTransition(Lose) ── acknowledge ─▶ InLevel (level 1)
//! ```
//!
//! A bad landing costs a hit point and puts the ship back at the planet's
//! eject point with all motion killed. An asteroid hit costs a hit point and
//! removes the asteroid. Neither is fatal unless health runs out.

use glam::{DQuat, DVec3};
use lander_config::Config;
use lander_input::{ControlEvent, ControlOutcome, apply_control};
use lander_physics::{Asteroid, DamageCause, LandingVerdict, Planet, Ship, is_colliding};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::SessionError;
use crate::camera::{CameraController, CameraPose};
use crate::hud::{HudState, update_hud};
use crate::level::generate_level;

/// Result of a finished level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Lose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Flying; physics and collisions run every tick.
    InLevel,
    /// Level over; waiting for [`LevelSession::acknowledge`].
    LevelTransition(Outcome),
}

/// Presentation callbacks. Every method defaults to doing nothing.
pub trait SessionHooks {
    /// The ship landed cleanly.
    fn on_win(&mut self) {}

    /// The ship was destroyed. Called exactly once per death.
    fn on_lose(&mut self, _reason: &str) {}

    /// The ship lost a hit point and survived or not (`health` is what is left).
    fn on_damage(&mut self, _cause: DamageCause, _health: u32) {}
}

/// Hooks that only log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogHooks;

impl SessionHooks for LogHooks {
    fn on_win(&mut self) {
        info!("Landed! Press any key for the next level");
    }

    fn on_lose(&mut self, reason: &str) {
        info!(reason, "Ship lost");
    }

    fn on_damage(&mut self, cause: DamageCause, health: u32) {
        info!(%cause, health, "Damage taken");
    }
}

/// Something that happened during one tick.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Damaged { cause: DamageCause, health: u32 },
    AsteroidDestroyed { position: DVec3 },
    Ejected { position: DVec3 },
    Won { level: u32 },
    Lost { reason: String },
}

/// Pose of one body for the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyPose {
    pub position: DVec3,
    pub orientation: DQuat,
}

/// Planet data the renderer needs. Per-patch landing-area membership is
/// answered by [`Planet::is_in_landing_area`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetView {
    pub position: DVec3,
    pub radius: f64,
    /// Landing-plane point relative to the planet center.
    pub landing_point: DVec3,
}

/// Read-only view of the world after a tick.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub level: u32,
    pub state: SessionState,
    pub ship: BodyPose,
    pub planet: PlanetView,
    pub asteroids: Vec<BodyPose>,
}

/// One play session: the current level and everything in it.
pub struct LevelSession {
    config: Config,
    rng: ChaCha8Rng,
    level_index: u32,
    state: SessionState,
    ship: Ship,
    planet: Planet,
    asteroids: Vec<Asteroid>,
    camera: CameraController,
    hud: HudState,
    hooks: Box<dyn SessionHooks>,
    tick: u64,
}

impl LevelSession {
    /// Starts at `config.session.start_level` with an RNG seeded from `seed`.
    ///
    /// # Errors
    /// Fails if the configuration cannot produce a valid level.
    pub fn new(
        config: Config,
        seed: u64,
        hooks: Box<dyn SessionHooks>,
    ) -> Result<Self, SessionError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let level_index = config.session.start_level.max(1);
        let layout = generate_level(level_index, &config, &mut rng)?;
        let ship = Ship::new(layout.spawn, &config.ship)?;

        let mut session = Self {
            config,
            rng,
            level_index,
            state: SessionState::InLevel,
            ship,
            planet: layout.planet,
            asteroids: layout.asteroids,
            camera: CameraController::new(),
            hud: HudState::default(),
            hooks,
            tick: 0,
        };
        session.refresh_hud();
        info!(level = level_index, seed, "Session started");
        Ok(session)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// 1-based index of the current level.
    pub fn level(&self) -> u32 {
        self.level_index
    }

    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    /// Direct access for test setups; gameplay goes through
    /// [`handle_control`](Self::handle_control).
    #[doc(hidden)]
    pub fn ship_mut(&mut self) -> &mut Ship {
        &mut self.ship
    }

    pub fn planet(&self) -> &Planet {
        &self.planet
    }

    pub fn asteroids(&self) -> &[Asteroid] {
        &self.asteroids
    }

    #[doc(hidden)]
    pub fn asteroids_mut(&mut self) -> &mut Vec<Asteroid> {
        &mut self.asteroids
    }

    pub fn hud(&self) -> &HudState {
        &self.hud
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    /// Ticks simulated since the session started.
    pub fn ticks(&self) -> u64 {
        self.tick
    }

    /// Regenerates the current level and spawns a fresh ship.
    ///
    /// # Errors
    /// Fails if the configuration cannot produce a valid level.
    pub fn initialize_level(&mut self) -> Result<(), SessionError> {
        let layout = generate_level(self.level_index, &self.config, &mut self.rng)?;
        self.ship = Ship::new(layout.spawn, &self.config.ship)?;
        self.planet = layout.planet;
        self.asteroids = layout.asteroids;
        self.state = SessionState::InLevel;
        self.hud.message = Some(format!("Level {}", self.level_index));
        self.refresh_hud();
        info!(
            level = self.level_index,
            asteroids = self.asteroids.len(),
            "Level started"
        );
        Ok(())
    }

    /// Leaves a level transition: after a win the next level starts, after a
    /// loss play restarts at level 1. Returns `false` if there was nothing to
    /// acknowledge.
    ///
    /// # Errors
    /// Fails if the next level cannot be generated.
    pub fn acknowledge(&mut self) -> Result<bool, SessionError> {
        match self.state {
            SessionState::InLevel => return Ok(false),
            SessionState::LevelTransition(Outcome::Win) => self.level_index += 1,
            SessionState::LevelTransition(Outcome::Lose) => self.level_index = 1,
        }
        self.initialize_level()?;
        Ok(true)
    }

    /// Routes a control edge. Ship controls are ignored outside a level; view
    /// controls always switch the camera.
    pub fn handle_control(&mut self, event: ControlEvent) -> ControlOutcome {
        if let Some(view) = event.control.view() {
            return match apply_control(&mut self.ship, event) {
                ControlOutcome::View(_) => {
                    self.camera.select(view, self.ship.position, self.ship.orientation);
                    ControlOutcome::View(view)
                }
                other => other,
            };
        }
        if self.state != SessionState::InLevel {
            return ControlOutcome::Ignored;
        }
        apply_control(&mut self.ship, event)
    }

    /// Camera pose for this frame.
    pub fn camera_pose(&mut self) -> CameraPose {
        self.camera.pose(self.ship.position, self.ship.orientation)
    }

    /// Advances the level by one tick. Does nothing during a transition.
    pub fn tick(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        if self.state != SessionState::InLevel {
            return events;
        }
        self.tick += 1;

        for asteroid in &mut self.asteroids {
            asteroid.advance_spin();
        }

        let mut lost: Option<String> = None;
        let hooks = &mut self.hooks;
        let mut on_lose = |reason: &str| {
            hooks.on_lose(reason);
            lost = Some(reason.to_string());
        };

        let report = self.ship.step(&mut on_lose);
        if report.fuel_depleted {
            let health = self.ship.health();
            events.push(SessionEvent::Damaged {
                cause: DamageCause::FuelDepleted,
                health,
            });
        }

        let mut won = false;
        if report.alive && is_colliding(&self.ship, &self.planet) {
            let verdict = self.planet.is_good_landing(
                self.ship.position,
                self.ship.velocity,
                self.ship.up(),
            );
            match verdict {
                LandingVerdict::Success => won = true,
                LandingVerdict::Failure(failure) => {
                    let cause = DamageCause::Landing(failure);
                    let alive = self.ship.damage(cause, &mut on_lose);
                    events.push(SessionEvent::Damaged {
                        cause,
                        health: self.ship.health(),
                    });
                    if alive {
                        let eject = self.planet.eject_point();
                        self.ship.soft_reset(eject);
                        debug!(%cause, position = %eject, "Bad landing, ship ejected");
                        events.push(SessionEvent::Ejected { position: eject });
                    }
                }
            }
        }

        if !won && self.ship.is_alive() {
            let ship = &self.ship;
            let mut hit = Vec::new();
            self.asteroids.retain(|asteroid| {
                let colliding = is_colliding(ship, asteroid);
                if colliding {
                    hit.push(asteroid.position);
                }
                !colliding
            });
            // Every overlapping asteroid is gone; damage stops at death.
            let mut alive = true;
            for position in hit {
                debug!(%position, "Asteroid destroyed");
                events.push(SessionEvent::AsteroidDestroyed { position });
                if alive {
                    alive = self.ship.damage(DamageCause::Asteroid, &mut on_lose);
                    events.push(SessionEvent::Damaged {
                        cause: DamageCause::Asteroid,
                        health: self.ship.health(),
                    });
                }
            }
        }
        drop(on_lose);

        for event in &events {
            if let SessionEvent::Damaged { cause, health } = event {
                self.hooks.on_damage(*cause, *health);
                self.hud.message = Some(cause.to_string());
            }
        }

        if won {
            self.finish_win(&mut events);
        }

        if let Some(reason) = lost {
            self.state = SessionState::LevelTransition(Outcome::Lose);
            self.hud.message = Some(format!("{reason}. Game over"));
            info!(level = self.level_index, reason = %reason, "Level lost");
            events.push(SessionEvent::Lost { reason });
        }

        self.refresh_hud();
        events
    }

    fn finish_win(&mut self, events: &mut Vec<SessionEvent>) {
        self.state = SessionState::LevelTransition(Outcome::Win);
        self.ship.clear_thrust();
        self.hooks.on_win();
        self.hud.message = Some(format!("Level {} complete", self.level_index));
        info!(level = self.level_index, "Level won");
        events.push(SessionEvent::Won {
            level: self.level_index,
        });
    }

    fn refresh_hud(&mut self) {
        update_hud(&mut self.hud, &self.ship, &self.planet, self.level_index);
    }

    /// Poses of everything the renderer draws.
    pub fn snapshot(&self) -> FrameSnapshot {
        let pose = |position, orientation| BodyPose {
            position,
            orientation,
        };
        FrameSnapshot {
            tick: self.tick,
            level: self.level_index,
            state: self.state,
            ship: pose(self.ship.position, self.ship.orientation),
            planet: PlanetView {
                position: self.planet.position,
                radius: self.planet.radius(),
                landing_point: self.planet.landing_point(),
            },
            asteroids: self
                .asteroids
                .iter()
                .map(|a| pose(a.position, a.orientation))
                .collect(),
        }
    }
}
