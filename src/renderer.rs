// Renderer struct that turns simulation state into draw calls: a clear, one line
// per pair of nearby particles, then a glow and a solid core per particle.
// Draw calls go through the Surface trait so the canvas can be swapped out.

use crate::color::Color;
use crate::error::NetworkError;
use crate::particle::Particle;
use crate::simulation::Simulation;

// (offset, alpha) stops of the glow gradient, center to edge
pub const GLOW_STOPS: [(f64, f64); 4] = [(0.0, 0.8), (0.2, 0.4), (0.5, 0.1), (1.0, 0.0)];

pub trait Surface {
    fn clear(&mut self, width: f64, height: f64) -> Result<(), NetworkError>;

    fn fill_background(&mut self, width: f64, height: f64, color: Color) -> Result<(), NetworkError>;

    // alpha is not clamped by the caller and may exceed 1
    fn stroke_line(
        &mut self,
        from: [f64; 2],
        to: [f64; 2],
        color: Color,
        alpha: f64,
        line_width: f64,
    ) -> Result<(), NetworkError>;

    fn fill_glow(
        &mut self,
        center: [f64; 2],
        radius: f64,
        color: Color,
        stops: &[(f64, f64)],
    ) -> Result<(), NetworkError>;

    fn fill_circle(&mut self, center: [f64; 2], radius: f64, color: Color) -> Result<(), NetworkError>;
}

// Opacity of the line between two particles `distance` apart, or `None`
// when they are too far apart to be connected.
pub fn connection_opacity(distance: f64, max_distance: f64, opacity_scale: f64) -> Option<f64> {
    if distance < max_distance {
        Some((1.0 - distance / max_distance) * opacity_scale)
    } else {
        None
    }
}

pub struct Renderer<S: Surface> {
    surface: S,
}

impl<S: Surface> Renderer<S> {
    pub fn new(surface: S) -> Self {
        Renderer { surface }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    // One full frame, in order: clear, integrate, connections, particles
    pub fn draw_frame(&mut self, simulation: &mut Simulation) -> Result<(), NetworkError> {
        self.clear_screen(simulation)?;
        simulation.step();
        self.render_connections(simulation)?;
        self.render_particles(simulation)
    }

    pub fn clear_screen(&mut self, simulation: &Simulation) -> Result<(), NetworkError> {
        let (width, height) = (simulation.width(), simulation.height());
        self.surface.clear(width, height)?;
        if let Some(background) = simulation.config().background_color() {
            self.surface.fill_background(width, height, background)?;
        }
        Ok(())
    }

    pub fn render_connections(&mut self, simulation: &Simulation) -> Result<(), NetworkError> {
        let config = simulation.config();
        let particles = simulation.particles();
        for (i, a) in particles.iter().enumerate() {
            for b in &particles[i + 1..] {
                let distance = a.distance_to(b);
                if let Some(alpha) =
                    connection_opacity(distance, config.max_distance(), config.line_opacity())
                {
                    self.surface.stroke_line(
                        a.pos,
                        b.pos,
                        config.line_color(),
                        alpha,
                        config.line_width(),
                    )?;
                }
            }
        }
        Ok(())
    }

    pub fn render_particles(&mut self, simulation: &Simulation) -> Result<(), NetworkError> {
        let glow_size = simulation.config().glow_size();
        for particle in simulation.particles() {
            self.render_particle(particle, glow_size)?;
        }
        Ok(())
    }

    fn render_particle(&mut self, particle: &Particle, glow_size: f64) -> Result<(), NetworkError> {
        self.surface.fill_glow(
            particle.pos,
            particle.radius * glow_size,
            particle.color,
            &GLOW_STOPS,
        )?;
        self.surface
            .fill_circle(particle.pos, particle.radius, particle.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NetworkConfig;

    #[derive(Debug, Clone, PartialEq)]
    pub enum DrawCall {
        Clear,
        Background(Color),
        Line {
            from: [f64; 2],
            to: [f64; 2],
            alpha: f64,
        },
        Glow {
            center: [f64; 2],
            radius: f64,
            color: Color,
        },
        Circle {
            center: [f64; 2],
            radius: f64,
            color: Color,
        },
    }

    #[derive(Default)]
    pub struct RecordingSurface {
        pub calls: Vec<DrawCall>,
    }

    impl RecordingSurface {
        fn lines(&self) -> Vec<&DrawCall> {
            self.calls
                .iter()
                .filter(|c| matches!(c, DrawCall::Line { .. }))
                .collect()
        }
    }

    impl Surface for RecordingSurface {
        fn clear(&mut self, _width: f64, _height: f64) -> Result<(), NetworkError> {
            self.calls.push(DrawCall::Clear);
            Ok(())
        }

        fn fill_background(&mut self, _width: f64, _height: f64, color: Color) -> Result<(), NetworkError> {
            self.calls.push(DrawCall::Background(color));
            Ok(())
        }

        fn stroke_line(
            &mut self,
            from: [f64; 2],
            to: [f64; 2],
            _color: Color,
            alpha: f64,
            _line_width: f64,
        ) -> Result<(), NetworkError> {
            self.calls.push(DrawCall::Line { from, to, alpha });
            Ok(())
        }

        fn fill_glow(
            &mut self,
            center: [f64; 2],
            radius: f64,
            color: Color,
            stops: &[(f64, f64)],
        ) -> Result<(), NetworkError> {
            assert_eq!(stops, &GLOW_STOPS[..]);
            self.calls.push(DrawCall::Glow {
                center,
                radius,
                color,
            });
            Ok(())
        }

        fn fill_circle(&mut self, center: [f64; 2], radius: f64, color: Color) -> Result<(), NetworkError> {
            self.calls.push(DrawCall::Circle {
                center,
                radius,
                color,
            });
            Ok(())
        }
    }

    fn still(x: f64, y: f64) -> Particle {
        Particle::new(x, y, 0.0, 0.0, 1.0, Color::BLUE)
    }

    #[test]
    fn three_particles_draw_one_connection() {
        let mut config = NetworkConfig::new();
        config.set_max_distance(150.0);
        let particles = vec![still(0.0, 0.0), still(50.0, 0.0), still(1000.0, 1000.0)];
        let sim = Simulation::with_particles(config, 1200.0, 1200.0, particles);

        let mut renderer = Renderer::new(RecordingSurface::default());
        renderer.render_connections(&sim).unwrap();

        let lines = renderer.surface().lines();
        assert_eq!(lines.len(), 1);
        match lines[0] {
            DrawCall::Line { from, to, .. } => {
                assert_eq!(*from, [0.0, 0.0]);
                assert_eq!(*to, [50.0, 0.0]);
            }
            other => panic!("unexpected call {:?}", other),
        }
    }

    #[test]
    fn connection_only_below_max_distance() {
        assert!(connection_opacity(149.999, 150.0, 1.0).is_some());
        assert_eq!(connection_opacity(150.0, 150.0, 1.0), None);
        assert_eq!(connection_opacity(151.0, 150.0, 1.0), None);
        assert_eq!(connection_opacity(0.0, 0.0, 1.0), None);
    }

    #[test]
    fn connection_opacity_falls_off_with_distance() {
        let mut previous = connection_opacity(0.0, 150.0, 0.5).unwrap();
        assert_eq!(previous, 0.5);
        for step in 1..150 {
            let opacity = connection_opacity(step as f64, 150.0, 0.5).unwrap();
            assert!(opacity < previous);
            previous = opacity;
        }
    }

    #[test]
    fn opacity_scale_can_exceed_one() {
        let alpha = connection_opacity(15.0, 150.0, 2.0).unwrap();
        assert!((alpha - 1.8).abs() < 1e-9);
    }

    #[test]
    fn particles_draw_glow_then_core() {
        let mut config = NetworkConfig::new();
        config.set_glow_size(4.0);
        let particles = vec![Particle::new(10.0, 20.0, 0.0, 0.0, 1.5, Color::WHITE)];
        let sim = Simulation::with_particles(config, 100.0, 100.0, particles);

        let mut renderer = Renderer::new(RecordingSurface::default());
        renderer.render_particles(&sim).unwrap();

        assert_eq!(
            renderer.surface().calls,
            vec![
                DrawCall::Glow {
                    center: [10.0, 20.0],
                    radius: 6.0,
                    color: Color::WHITE,
                },
                DrawCall::Circle {
                    center: [10.0, 20.0],
                    radius: 1.5,
                    color: Color::WHITE,
                },
            ]
        );
    }

    #[test]
    fn frame_clears_before_drawing() {
        let particles = vec![still(10.0, 10.0), still(20.0, 10.0)];
        let mut sim = Simulation::with_particles(NetworkConfig::new(), 100.0, 100.0, particles);

        let mut renderer = Renderer::new(RecordingSurface::default());
        renderer.draw_frame(&mut sim).unwrap();

        let calls = &renderer.surface().calls;
        assert_eq!(calls[0], DrawCall::Clear);
        assert!(matches!(calls[1], DrawCall::Line { .. }));
        // one line + (glow + core) per particle
        assert_eq!(calls.len(), 1 + 1 + 2 * 2);
    }

    #[test]
    fn background_only_when_configured() {
        let mut sim = Simulation::with_particles(NetworkConfig::new(), 10.0, 10.0, Vec::new());
        let mut renderer = Renderer::new(RecordingSurface::default());
        renderer.draw_frame(&mut sim).unwrap();
        assert_eq!(renderer.surface().calls, vec![DrawCall::Clear]);

        let mut config = NetworkConfig::new();
        config.set_background_color(Some(0x0a0a0a));
        let mut sim = Simulation::with_particles(config, 10.0, 10.0, Vec::new());
        let mut renderer = Renderer::new(RecordingSurface::default());
        renderer.draw_frame(&mut sim).unwrap();
        assert_eq!(
            renderer.surface().calls,
            vec![DrawCall::Clear, DrawCall::Background(Color::rgb(10, 10, 10))]
        );
    }
}
