// Tunables for the network background. Built once by the host, validated,
// then handed to the simulation and never changed again.

use crate::color::Color;
use crate::error::NetworkError;
use std::str::FromStr;
use wasm_bindgen::prelude::*;

// What happens to existing particles when the viewport changes size
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResizePolicy {
    // Particles keep their absolute coordinates, even if now off-screen
    Keep,
    // Particles are clamped into the new bounds
    Clamp,
    // The whole particle set is discarded and reseeded
    Regenerate,
}

impl Default for ResizePolicy {
    fn default() -> Self {
        ResizePolicy::Keep
    }
}

impl FromStr for ResizePolicy {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "keep" => Ok(ResizePolicy::Keep),
            "clamp" => Ok(ResizePolicy::Clamp),
            "regenerate" => Ok(ResizePolicy::Regenerate),
            other => Err(NetworkError::InvalidConfig(format!(
                "unknown resize policy '{}'",
                other
            ))),
        }
    }
}

#[wasm_bindgen]
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkConfig {
    node_colors: Vec<Color>,
    line_color: Color,
    background_color: Option<Color>,
    particle_count: u32,
    max_distance: f64,
    particle_speed: f64,
    line_opacity: f64,
    line_width: f64,
    glow_size: f64,
    mouse_repel_distance: f64,
    resize_policy: ResizePolicy,
    seed: Option<u64>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig {
            node_colors: vec![Color::BLUE, Color::WHITE],
            line_color: Color::WHITE,
            background_color: None,
            particle_count: 100,
            max_distance: 150.0,
            particle_speed: 0.8,
            line_opacity: 2.0,
            line_width: 0.5,
            glow_size: 10.0,
            mouse_repel_distance: 100.0,
            resize_policy: ResizePolicy::Keep,
            seed: None,
        }
    }
}

#[wasm_bindgen]
impl NetworkConfig {
    #[wasm_bindgen(constructor)]
    pub fn new() -> NetworkConfig {
        NetworkConfig::default()
    }

    // Colors packed as 0xRRGGBB
    pub fn set_node_colors(&mut self, colors: &[u32]) {
        self.node_colors = colors.iter().map(|c| Color::from_u32(*c)).collect();
    }

    pub fn set_line_color(&mut self, color: u32) {
        self.line_color = Color::from_u32(color);
    }

    pub fn set_background_color(&mut self, color: Option<u32>) {
        self.background_color = color.map(Color::from_u32);
    }

    pub fn set_particle_count(&mut self, count: u32) {
        self.particle_count = count;
    }

    pub fn set_max_distance(&mut self, distance: f64) {
        self.max_distance = distance;
    }

    pub fn set_particle_speed(&mut self, speed: f64) {
        self.particle_speed = speed;
    }

    pub fn set_line_opacity(&mut self, opacity: f64) {
        self.line_opacity = opacity;
    }

    pub fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }

    pub fn set_glow_size(&mut self, glow_size: f64) {
        self.glow_size = glow_size;
    }

    pub fn set_mouse_repel_distance(&mut self, distance: f64) {
        self.mouse_repel_distance = distance;
    }

    pub fn set_seed(&mut self, seed: u64) {
        self.seed = Some(seed);
    }

    // Accepts "keep", "clamp" or "regenerate"
    pub fn set_resize_policy(&mut self, policy: &str) -> Result<(), JsValue> {
        self.resize_policy = policy.parse::<ResizePolicy>()?;
        Ok(())
    }
}

impl NetworkConfig {
    pub fn node_colors(&self) -> &[Color] {
        &self.node_colors
    }

    pub fn line_color(&self) -> Color {
        self.line_color
    }

    pub fn background_color(&self) -> Option<Color> {
        self.background_color
    }

    pub fn particle_count(&self) -> u32 {
        self.particle_count
    }

    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    pub fn particle_speed(&self) -> f64 {
        self.particle_speed
    }

    pub fn line_opacity(&self) -> f64 {
        self.line_opacity
    }

    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    pub fn glow_size(&self) -> f64 {
        self.glow_size
    }

    pub fn mouse_repel_distance(&self) -> f64 {
        self.mouse_repel_distance
    }

    pub fn resize_policy(&self) -> ResizePolicy {
        self.resize_policy
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn with_resize_policy(mut self, policy: ResizePolicy) -> Self {
        self.resize_policy = policy;
        self
    }

    // Colors are range-checked by their types; only the floats need checking
    pub fn validate(&self) -> Result<(), NetworkError> {
        let tunables = [
            ("max_distance", self.max_distance),
            ("particle_speed", self.particle_speed),
            ("line_opacity", self.line_opacity),
            ("line_width", self.line_width),
            ("glow_size", self.glow_size),
            ("mouse_repel_distance", self.mouse_repel_distance),
        ];
        for (name, value) in tunables.iter() {
            if !value.is_finite() {
                return Err(NetworkError::InvalidConfig(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
            if *value < 0.0 {
                return Err(NetworkError::InvalidConfig(format!(
                    "{} must be >= 0, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = NetworkConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.particle_count(), 100);
        assert_eq!(config.max_distance(), 150.0);
        assert_eq!(config.node_colors(), &[Color::BLUE, Color::WHITE]);
        assert_eq!(config.background_color(), None);
        assert_eq!(config.resize_policy(), ResizePolicy::Keep);
    }

    #[test]
    fn rejects_negative_distance() {
        let mut config = NetworkConfig::new();
        config.set_max_distance(-1.0);
        match config.validate() {
            Err(NetworkError::InvalidConfig(msg)) => assert!(msg.contains("max_distance")),
            other => panic!("expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn rejects_non_finite_tunables() {
        let mut config = NetworkConfig::new();
        config.set_glow_size(f64::NAN);
        assert!(config.validate().is_err());

        let mut config = NetworkConfig::new();
        config.set_mouse_repel_distance(f64::INFINITY);
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_tunables_are_allowed() {
        let mut config = NetworkConfig::new();
        config.set_particle_count(0);
        config.set_max_distance(0.0);
        config.set_mouse_repel_distance(0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn packed_colors_are_unpacked() {
        let mut config = NetworkConfig::new();
        config.set_node_colors(&[0xef4444, 0x10b981]);
        config.set_line_color(0x06b6d4);
        config.set_background_color(Some(0x0a0a0a));
        assert_eq!(
            config.node_colors(),
            &[Color::rgb(239, 68, 68), Color::rgb(16, 185, 129)]
        );
        assert_eq!(config.line_color(), Color::rgb(6, 182, 212));
        assert_eq!(config.background_color(), Some(Color::rgb(10, 10, 10)));
    }

    #[test]
    fn parses_resize_policy() {
        assert_eq!("keep".parse::<ResizePolicy>(), Ok(ResizePolicy::Keep));
        assert_eq!("Clamp".parse::<ResizePolicy>(), Ok(ResizePolicy::Clamp));
        assert_eq!(
            "regenerate".parse::<ResizePolicy>(),
            Ok(ResizePolicy::Regenerate)
        );
        assert!("shrink".parse::<ResizePolicy>().is_err());

        let mut config = NetworkConfig::new();
        assert!(config.set_resize_policy("clamp").is_ok());
        assert_eq!(config.resize_policy(), ResizePolicy::Clamp);
    }
}
