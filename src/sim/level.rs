//! A single herding level
//!
//! Owns every entity, the camera, the timer and the HUD text. Each frame runs
//! input → movement → collisions → camera → win check, in that order, until
//! the last sheep is penned. After that the level is frozen and only renders.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::camera::{Camera, View};
use super::collision::{Aabb, intersects};
use super::entity::{Body, Obstacle};
use super::player::Player;
use super::sheep::Sheep;
use crate::highscores::{ScoreStore, Scoreboard};
use crate::platform::{Canvas, Clock, Color, FontId, KeyState, LevelAssets};
use crate::settings::{HudLayout, LevelConfig};

pub const WIN_MESSAGE: &str = "ROUND COMPLETE!";

const BACKGROUND_COLOR: Color = Color::GREEN;
const GOAL_COLOR: Color = Color::BLUE;
const WALL_COLOR: Color = Color::BLACK;
const TIMER_COLOR: Color = Color::WHITE;
const WIN_COLOR: Color = Color::BLUE;
const SCOREBOARD_COLOR: Color = Color::BLACK;

/// Level progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelPhase {
    Running,
    /// Every sheep penned. Terminal.
    Complete,
}

/// A positioned piece of HUD text
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
    pub position: Vec2,
    pub size: u32,
    pub color: Color,
}

impl TextItem {
    fn new(text: impl Into<String>, position: Vec2, size: u32, color: Color) -> Self {
        Self {
            text: text.into(),
            position,
            size,
            color,
        }
    }

    fn draw(&self, canvas: &mut dyn Canvas, font: Option<FontId>) {
        if let Some(font) = font {
            canvas.draw_text(&self.text, self.position, self.size, self.color, font);
        }
    }
}

#[derive(Debug, Clone)]
pub struct Hud {
    pub timer: TextItem,
    pub win: TextItem,
    pub scoreboard: TextItem,
}

pub struct Level {
    bounds: Aabb,
    player: Player,
    sheep: Vec<Sheep>,
    walls: Vec<Obstacle>,
    goal: Obstacle,
    camera: Camera,
    clock: Box<dyn Clock>,
    scores: ScoreStore,
    assets: LevelAssets,
    layout: HudLayout,
    hud: Hud,
    phase: LevelPhase,
    final_time: Option<f32>,
    scoreboard: Option<Scoreboard>,
}

impl Level {
    /// Build the level from `config` and start its timer
    pub fn new(
        config: &LevelConfig,
        assets: LevelAssets,
        mut clock: Box<dyn Clock>,
        scores: ScoreStore,
    ) -> Self {
        let world = config.world_size;
        let bounds = Aabb::new(Vec2::ZERO, world);

        let mut player = Player::new(
            Body::new(config.player_spawn, config.player_size),
            config.player_speed,
            world,
        );
        player.body.clamp_to_world(world);

        let mut rng = Pcg32::seed_from_u64(config.seed);
        let jitter = config.spawn_jitter;
        let sheep = config
            .sheep_spawns
            .iter()
            .map(|&spawn| {
                let offset = if jitter.is_finite() && jitter > 0.0 {
                    Vec2::new(
                        rng.random_range(-jitter..=jitter),
                        rng.random_range(-jitter..=jitter),
                    )
                } else {
                    Vec2::ZERO
                };
                let mut body = Body::new(spawn + offset, config.sheep_size);
                body.clamp_to_world(world);
                Sheep::new(body, config.flee, world)
            })
            .collect::<Vec<_>>();

        let walls = config.walls.iter().copied().map(Obstacle::new).collect();
        let goal = Obstacle::new(config.goal);

        let mut camera = Camera::new(config.view_size, bounds);
        camera.follow(player.center());

        let layout = config.hud.clone();
        let hud = Hud {
            timer: TextItem::new("Time: 0", Vec2::ZERO, layout.timer_size, TIMER_COLOR),
            win: TextItem::new(WIN_MESSAGE, layout.win_parked, layout.win_size, WIN_COLOR),
            scoreboard: TextItem::new(
                String::new(),
                Vec2::ZERO,
                layout.scoreboard_size,
                SCOREBOARD_COLOR,
            ),
        };

        clock.restart();
        log::info!(
            "Level started: {} sheep, {} walls, world {}x{}",
            sheep.len(),
            config.walls.len(),
            world.x,
            world.y
        );

        let mut level = Self {
            bounds,
            player,
            sheep,
            walls,
            goal,
            camera,
            clock,
            scores,
            assets,
            layout,
            hud,
            phase: LevelPhase::Running,
            final_time: None,
            scoreboard: None,
        };
        level.place_timer();
        level
    }

    pub fn phase(&self) -> LevelPhase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == LevelPhase::Complete
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn sheep(&self) -> &[Sheep] {
        &self.sheep
    }

    pub fn active_sheep(&self) -> usize {
        self.sheep.iter().filter(|s| s.is_active()).count()
    }

    pub fn walls(&self) -> &[Obstacle] {
        &self.walls
    }

    pub fn goal(&self) -> &Obstacle {
        &self.goal
    }

    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    pub fn view(&self) -> &View {
        self.camera.view()
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    /// Completion time, once the round is over
    pub fn final_time(&self) -> Option<f32> {
        self.final_time
    }

    /// Scoreboard loaded at completion
    pub fn scoreboard(&self) -> Option<&Scoreboard> {
        self.scoreboard.as_ref()
    }

    /// Run one frame. Does nothing once the level is complete.
    pub fn update(&mut self, keys: &dyn KeyState, dt: f32) {
        if self.phase == LevelPhase::Complete {
            return;
        }
        let dt = dt.max(0.0);

        self.clock.advance(dt);
        let elapsed = self.clock.elapsed_secs();
        self.hud.timer.text = format!("Time: {}", elapsed as u32);

        self.player.handle_input(keys);
        self.advance(dt);
        self.manage_collisions();
        self.update_camera();

        if self.check_win_condition() {
            self.complete(elapsed);
        }
    }

    fn advance(&mut self, dt: f32) {
        self.player.update(dt);
        let threat = self.player.center();
        for sheep in self.sheep.iter_mut().filter(|s| s.is_active()) {
            sheep.update(dt, threat);
        }
    }

    /// Sheep vs walls, later sheep and the goal; then rabbit vs walls
    fn manage_collisions(&mut self) {
        for i in 0..self.sheep.len() {
            if !self.sheep[i].is_active() {
                continue;
            }

            for wall in &self.walls {
                if intersects(wall, &self.sheep[i]) {
                    self.sheep[i].collision_response(wall);
                }
            }

            let (head, tail) = self.sheep.split_at_mut(i + 1);
            let current = &mut head[i];
            for other in tail.iter_mut().filter(|s| s.is_active()) {
                if intersects(&*current, &*other) {
                    Sheep::separate(current, other, &self.walls);
                }
            }

            if self.sheep[i].collide_with_goal(&self.goal) {
                log::debug!(
                    "Sheep {} penned ({} left)",
                    i,
                    self.sheep.iter().filter(|s| s.is_active()).count()
                );
            }
        }

        for wall in &self.walls {
            if intersects(wall, &self.player) {
                self.player.collision_response(wall);
            }
        }
    }

    fn update_camera(&mut self) {
        self.camera.follow(self.player.center());
        self.place_timer();
    }

    /// Timer sits at the view's bottom-left so it stays on screen
    fn place_timer(&mut self) {
        let corner = self.camera.view().bottom_left();
        self.hud.timer.position =
            Vec2::new(corner.x + self.layout.margin, corner.y - self.layout.margin);
    }

    fn check_win_condition(&self) -> bool {
        self.sheep.iter().all(|s| !s.is_active())
    }

    fn complete(&mut self, elapsed: f32) {
        self.phase = LevelPhase::Complete;
        self.final_time = Some(elapsed);
        log::info!("Round complete in {:.2}s", elapsed);

        if let Err(e) = self.scores.append(elapsed) {
            log::error!("Score not recorded: {}", e);
        }
        let board = self.scores.load_sorted().unwrap_or_else(|e| {
            log::error!("Scoreboard unavailable: {}", e);
            Scoreboard::default()
        });

        let top_left = self.camera.view().top_left();
        self.hud.win.position = top_left + self.layout.win_offset;
        self.hud.scoreboard.position = top_left + self.layout.scoreboard_offset;
        self.hud.scoreboard.text = board.to_string();
        self.scoreboard = Some(board);
    }

    /// Draw the frame. Safe to call in any phase.
    pub fn render(&self, canvas: &mut dyn Canvas) {
        canvas.begin_frame(self.camera.view());

        canvas.fill_rect(self.bounds, BACKGROUND_COLOR);
        canvas.fill_rect(self.goal.rect(), GOAL_COLOR);
        for wall in &self.walls {
            canvas.fill_rect(wall.rect(), WALL_COLOR);
        }
        if let Some(texture) = self.assets.sheep {
            for sheep in self.sheep.iter().filter(|s| s.is_active()) {
                canvas.draw_sprite(sheep.body.rect(), texture);
            }
        }
        if let Some(texture) = self.assets.rabbit {
            canvas.draw_sprite(self.player.body.rect(), texture);
        }

        let font = self.assets.font;
        self.hud.timer.draw(canvas, font);
        self.hud.win.draw(canvas, font);
        self.hud.scoreboard.draw(canvas, font);

        canvas.end_frame();
    }
}
