//! Decorative space background
//!
//! Pure cosmetics: twinkling stars, drifting asteroids, the occasional
//! shooting star. Stepped once per animation tick from the render loop,
//! with no data dependency on gameplay. Coordinates are viewport
//! percentages so the layer can cover any viewport size.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Fixed starfield size, created up-front
pub const STAR_COUNT: usize = 50;
/// Live asteroid cap
pub const MAX_ASTEROIDS: usize = 8;
/// Live shooting star cap
pub const MAX_SHOOTING_STARS: usize = 2;

/// Per-tick spawn probabilities
const ASTEROID_SPAWN_CHANCE: f32 = 0.05;
const SHOOTING_STAR_SPAWN_CHANCE: f32 = 0.01;

/// A static twinkling star; animation is CSS-side, driven by these params
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub twinkle_speed: f32,
    pub twinkle_delay: f32,
    pub opacity: f32,
}

/// A rock drifting down the viewport
#[derive(Debug, Clone, PartialEq)]
pub struct Asteroid {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub rotation: f32,
    pub speed: f32,
    pub rotation_speed: f32,
}

/// A streak crossing the upper sky
#[derive(Debug, Clone, PartialEq)]
pub struct ShootingStar {
    pub x: f32,
    pub y: f32,
    pub length: f32,
    pub speed: f32,
    /// Travel direction in degrees below horizontal
    pub angle_deg: f32,
}

/// The whole background layer
#[derive(Debug, Clone)]
pub struct SpaceBackground {
    pub stars: Vec<Star>,
    pub asteroids: Vec<Asteroid>,
    pub shooting_stars: Vec<ShootingStar>,
    rng: Pcg32,
}

impl SpaceBackground {
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                x: rng.random_range(0.0..100.0),
                y: rng.random_range(0.0..100.0),
                size: rng.random_range(1.0..3.0),
                twinkle_speed: rng.random_range(0.5..2.5),
                twinkle_delay: rng.random_range(0.0..5.0),
                opacity: rng.random_range(0.5..1.0),
            })
            .collect();

        Self {
            stars,
            asteroids: Vec::new(),
            shooting_stars: Vec::new(),
            rng,
        }
    }

    /// Advance one animation tick: maybe spawn, always drift, cull
    /// anything that left the (slightly oversized) viewport.
    pub fn step(&mut self) {
        if self.asteroids.len() < MAX_ASTEROIDS
            && self.rng.random_range(0.0..1.0) < ASTEROID_SPAWN_CHANCE
        {
            let asteroid = Asteroid {
                x: self.rng.random_range(0.0..100.0),
                y: -10.0,
                size: self.rng.random_range(10.0..30.0),
                rotation: self.rng.random_range(0.0..360.0),
                speed: self.rng.random_range(0.2..0.7),
                rotation_speed: self.rng.random_range(-1.0..1.0),
            };
            self.asteroids.push(asteroid);
        }
        for asteroid in &mut self.asteroids {
            asteroid.y += asteroid.speed;
            asteroid.rotation += asteroid.rotation_speed;
        }
        self.asteroids.retain(|a| a.y < 110.0);

        if self.shooting_stars.len() < MAX_SHOOTING_STARS
            && self.rng.random_range(0.0..1.0) < SHOOTING_STAR_SPAWN_CHANCE
        {
            let star = ShootingStar {
                x: self.rng.random_range(0.0..100.0),
                y: self.rng.random_range(0.0..30.0),
                length: self.rng.random_range(50.0..150.0),
                speed: self.rng.random_range(1.0..3.0),
                angle_deg: self.rng.random_range(30.0..60.0),
            };
            self.shooting_stars.push(star);
        }
        for star in &mut self.shooting_stars {
            let angle = star.angle_deg.to_radians();
            star.x += star.speed * angle.cos();
            star.y += star.speed * angle.sin();
        }
        self.shooting_stars.retain(|s| s.x < 120.0 && s.y < 120.0);
    }
}
