// Simple particle struct to keep track of individual position, velocity, size and color,
// plus the per-tick motion rules: move, bounce off the viewport edges, and get
// pushed away from the mouse

use crate::color::Color;
use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: [f64; 2],
    pub vel: [f64; 2],
    pub radius: f64,
    pub color: Color,
}

impl Particle {
    pub const MIN_RADIUS: f64 = 0.5;
    pub const RADIUS_RANGE: f64 = 1.5;
    // Distance moved per tick by a particle right under the mouse
    pub const REPEL_STEP: f64 = 2.0;

    pub fn new(pos_x: f64, pos_y: f64, vel_x: f64, vel_y: f64, radius: f64, color: Color) -> Particle {
        Particle {
            pos: [pos_x, pos_y],
            vel: [vel_x, vel_y],
            radius,
            color,
        }
    }

    // Random position inside the viewport, each velocity component in
    // [-speed / 2, speed / 2), color picked from the palette
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        width: f64,
        height: f64,
        speed: f64,
        palette: &[Color],
        fallback: Color,
    ) -> Particle {
        let pos_x = rng.gen::<f64>() * width;
        let pos_y = rng.gen::<f64>() * height;
        let vel_x = (rng.gen::<f64>() - 0.5) * speed;
        let vel_y = (rng.gen::<f64>() - 0.5) * speed;
        let radius = rng.gen::<f64>() * Particle::RADIUS_RANGE + Particle::MIN_RADIUS;
        let color = palette.choose(rng).copied().unwrap_or(fallback);
        Particle::new(pos_x, pos_y, vel_x, vel_y, radius, color)
    }

    pub fn speed(&self) -> f64 {
        glm::length(&glm::vec2(self.vel[0], self.vel[1]))
    }

    pub fn distance_to(&self, other: &Particle) -> f64 {
        glm::distance(
            &glm::vec2(self.pos[0], self.pos[1]),
            &glm::vec2(other.pos[0], other.pos[1]),
        )
    }

    pub fn advance(&mut self) {
        self.pos[0] += self.vel[0];
        self.pos[1] += self.vel[1];
    }

    // Checks the post-move position and only flips velocity; the particle is not
    // pushed back inside, so it can sit past the edge for one more frame
    pub fn bounce(&mut self, width: f64, height: f64) {
        if self.pos[0] < 0.0 || self.pos[0] > width {
            self.vel[0] *= -1.0;
        }
        if self.pos[1] < 0.0 || self.pos[1] > height {
            self.vel[1] *= -1.0;
        }
    }

    // Nudges position directly, velocity is untouched
    pub fn repel_from(&mut self, mouse: [f64; 2], repel_distance: f64) {
        let to_mouse = glm::vec2(mouse[0] - self.pos[0], mouse[1] - self.pos[1]);
        let distance = glm::length(&to_mouse);
        if distance <= 0.0 || distance >= repel_distance {
            return;
        }
        let force = (repel_distance - distance) / repel_distance;
        let push = to_mouse / distance * force * Particle::REPEL_STEP;
        self.pos[0] -= push.x;
        self.pos[1] -= push.y;
    }

    pub fn clamp_to(&mut self, width: f64, height: f64) {
        self.pos[0] = self.pos[0].max(0.0).min(width);
        self.pos[1] = self.pos[1].max(0.0).min(height);
    }
}
