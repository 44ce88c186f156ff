mod animation;
mod canvas;
pub mod color;
pub mod config;
pub mod error;
pub mod particle;
pub mod renderer;
pub mod simulation;
mod utils;

extern crate nalgebra_glm as glm;

use animation::{AnimationLoop, LoopState, Scene};
use canvas::CanvasSurface;
use renderer::Renderer;
use simulation::Simulation;
use wasm_bindgen::prelude::*;

pub use color::Color;
pub use config::{NetworkConfig, ResizePolicy};
pub use error::NetworkError;
pub use particle::Particle;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
    utils::init_logger();
}

// Handle to one animated network attached to the page. Constructing it attaches
// the canvas and listeners; the animation only runs between start() and stop().
#[wasm_bindgen]
pub struct NetworkBackground {
    animation: AnimationLoop,
}

#[wasm_bindgen]
impl NetworkBackground {
    #[wasm_bindgen(constructor)]
    pub fn new(config: &NetworkConfig) -> Result<NetworkBackground, JsValue> {
        Ok(NetworkBackground::create(config.clone())?)
    }

    pub fn start(&self) {
        self.animation.start();
    }

    pub fn stop(&self) {
        self.animation.stop();
    }

    pub fn is_running(&self) -> bool {
        self.animation.state() == LoopState::Running
    }

    pub fn is_disposed(&self) -> bool {
        self.animation.state() == LoopState::Disposed
    }

    // Draws a single frame, for stepping the effect by hand
    pub fn tick(&self) -> Result<(), JsValue> {
        Ok(self.animation.tick()?)
    }

    // Resyncs to the window size, same as a window resize event
    pub fn resize(&self) -> Result<(), JsValue> {
        Ok(self.animation.resize()?)
    }

    pub fn set_mouse(&self, x: f64, y: f64) {
        let _ = self
            .animation
            .with_scene(|scene| scene.simulation.set_mouse(x, y));
    }

    pub fn clear_mouse(&self) {
        let _ = self
            .animation
            .with_scene(|scene| scene.simulation.clear_mouse());
    }

    pub fn regenerate(&self) {
        let _ = self
            .animation
            .with_scene(|scene| scene.simulation.regenerate());
    }

    // Last pointer position seen, undefined until the first mousemove
    pub fn mouse_x(&self) -> Option<f64> {
        self.mouse().map(|[x, _]| x)
    }

    pub fn mouse_y(&self) -> Option<f64> {
        self.mouse().map(|[_, y]| y)
    }

    pub fn particle_count(&self) -> u32 {
        self.animation
            .with_scene(|scene| scene.simulation.particles().len() as u32)
            .unwrap_or(0)
    }

    pub fn width(&self) -> f64 {
        self.animation
            .with_scene(|scene| scene.simulation.width())
            .unwrap_or(0.0)
    }

    pub fn height(&self) -> f64 {
        self.animation
            .with_scene(|scene| scene.simulation.height())
            .unwrap_or(0.0)
    }

    pub fn dispose(&mut self) {
        self.animation.dispose();
    }
}

impl NetworkBackground {
    fn mouse(&self) -> Option<[f64; 2]> {
        self.animation
            .with_scene(|scene| scene.simulation.mouse())
            .unwrap_or(None)
    }

    pub fn create(config: NetworkConfig) -> Result<NetworkBackground, NetworkError> {
        config.validate()?;
        let window = web_sys::window().ok_or(NetworkError::NoWindow)?;
        let document = window.document().ok_or(NetworkError::NoDocument)?;
        let (width, height) = canvas::window_size(&window)?;

        let surface = CanvasSurface::attach(&document)?;
        surface.set_size(width as u32, height as u32);
        let simulation = Simulation::new(config, width, height);
        log::info!(
            "network background attached: {} particles, {}x{}",
            simulation.particles().len(),
            width,
            height
        );

        let scene = Scene {
            simulation,
            renderer: Renderer::new(surface),
        };
        let animation = AnimationLoop::new(window, scene)?;
        Ok(NetworkBackground { animation })
    }
}

// Default-configured background, started right away. Failures are logged and
// yield undefined instead of throwing into the host page.
#[wasm_bindgen]
pub fn start_network_background() -> Option<NetworkBackground> {
    initialize();
    match NetworkBackground::create(NetworkConfig::default()) {
        Ok(background) => {
            background.start();
            Some(background)
        }
        Err(e) => {
            log::error!("network background unavailable: {}", e);
            None
        }
    }
}
