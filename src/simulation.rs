// Simulation state and the per-tick integrator.
// Holds the particles, the last known mouse position and the viewport size.
// Nothing in here touches the DOM, so it runs the same natively and in the
// browser.

use crate::config::{NetworkConfig, ResizePolicy};
use crate::particle::Particle;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub struct Simulation {
    config: NetworkConfig,
    width: f64,
    height: f64,
    particles: Vec<Particle>,
    mouse: Option<[f64; 2]>,
    rng: StdRng,
}

impl Simulation {
    // Creates a simulation for a `width` x `height` viewport and seeds
    // `config.particle_count()` particles.
    pub fn new(config: NetworkConfig, width: f64, height: f64) -> Simulation {
        let rng = match config.seed() {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut simulation = Simulation {
            config,
            width,
            height,
            particles: Vec::new(),
            mouse: None,
            rng,
        };
        simulation.regenerate();
        simulation
    }

    // Creates a simulation with hand-placed particles instead of random ones.
    pub fn with_particles(
        config: NetworkConfig,
        width: f64,
        height: f64,
        particles: Vec<Particle>,
    ) -> Simulation {
        let rng = StdRng::seed_from_u64(config.seed().unwrap_or(0));
        Simulation {
            config,
            width,
            height,
            particles,
            mouse: None,
            rng,
        }
    }

    // Discards every particle and seeds a fresh set.
    pub fn regenerate(&mut self) {
        let palette = self.config.node_colors();
        let fallback = self.config.line_color();
        if palette.is_empty() && self.config.particle_count() > 0 {
            log::warn!("node palette is empty, falling back to the line color");
        }

        let count = self.config.particle_count() as usize;
        let speed = self.config.particle_speed();
        let mut particles = Vec::with_capacity(count);
        for _ in 0..count {
            particles.push(Particle::spawn(
                &mut self.rng,
                self.width,
                self.height,
                speed,
                palette,
                fallback,
            ));
        }
        self.particles = particles;
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        match self.config.resize_policy() {
            ResizePolicy::Keep => {}
            ResizePolicy::Clamp => {
                for particle in &mut self.particles {
                    particle.clamp_to(width, height);
                }
            }
            ResizePolicy::Regenerate => self.regenerate(),
        }
    }

    pub fn set_mouse(&mut self, x: f64, y: f64) {
        self.mouse = Some([x, y]);
    }

    pub fn clear_mouse(&mut self) {
        self.mouse = None;
    }

    // Advances every particle by one frame: move, bounce, then mouse repulsion.
    pub fn step(&mut self) {
        let (width, height) = (self.width, self.height);
        let mouse = self.mouse;
        let repel_distance = self.config.mouse_repel_distance();
        for particle in &mut self.particles {
            particle.advance();
            particle.bounce(width, height);
            if let Some(mouse) = mouse {
                particle.repel_from(mouse, repel_distance);
            }
        }
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn mouse(&self) -> Option<[f64; 2]> {
        self.mouse
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}
