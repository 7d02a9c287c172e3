//! Tunable parameters for the particle field.
//!
//! Every value has a default matching the shipped look; a page may override
//! any subset through a JSON blob (see [`crate::load_field_config`]).

use serde::Deserialize;

/// Simulation and styling parameters for one particle field.
///
/// Distances and widths are in logical (CSS) pixels, speeds in logical pixels
/// per frame, alphas in `[0, 1]`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
	/// Number of particles in the pool. Zero is valid and renders nothing.
	pub count: usize,
	/// Disc radius of each particle.
	pub radius: f64,
	/// Magnitude of every particle's initial velocity.
	pub speed: f64,
	/// Particle pairs closer than this are linked.
	pub link_distance: f64,
	/// Link opacity as the pair distance approaches zero.
	pub link_max_alpha: f64,
	/// Stroke width of particle-to-particle links.
	pub link_width: f64,
	/// Particles closer than this to the pointer are linked to it.
	pub pointer_distance: f64,
	/// Peak opacity of the wide pointer glow stroke.
	pub glow_alpha: f64,
	/// Stroke width of the pointer glow.
	pub glow_width: f64,
	/// Peak opacity of the narrow pointer core stroke.
	pub core_alpha: f64,
	/// Stroke width of the pointer core.
	pub core_width: f64,
	/// Fill opacity of the particle discs.
	pub particle_alpha: f64,
	/// Minimum milliseconds between two accepted pointer updates.
	pub pointer_throttle_ms: f64,
	/// Delay before a lifted touch stops attracting links.
	pub touch_fade_ms: u32,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			count: 30,
			radius: 2.0,
			speed: 0.25,
			link_distance: 120.0,
			link_max_alpha: 0.35,
			link_width: 0.5,
			pointer_distance: 220.0,
			glow_alpha: 0.3,
			glow_width: 4.0,
			core_alpha: 0.95,
			core_width: 1.5,
			particle_alpha: 0.8,
			pointer_throttle_ms: 16.0,
			touch_fade_ms: 500,
		}
	}
}

impl FieldConfig {
	/// Returns a copy with out-of-range values pulled back into range.
	///
	/// Negative or non-finite lengths become zero and alphas are clamped to
	/// `[0, 1]`, so a hand-edited config can never break the frame loop.
	pub fn validated(mut self) -> Self {
		fn non_negative(v: f64) -> f64 {
			if v.is_finite() { v.max(0.0) } else { 0.0 }
		}
		fn unit(v: f64) -> f64 {
			if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 }
		}

		self.radius = non_negative(self.radius);
		self.speed = non_negative(self.speed);
		self.link_distance = non_negative(self.link_distance);
		self.link_width = non_negative(self.link_width);
		self.pointer_distance = non_negative(self.pointer_distance);
		self.glow_width = non_negative(self.glow_width);
		self.core_width = non_negative(self.core_width);
		self.pointer_throttle_ms = non_negative(self.pointer_throttle_ms);
		self.link_max_alpha = unit(self.link_max_alpha);
		self.glow_alpha = unit(self.glow_alpha);
		self.core_alpha = unit(self.core_alpha);
		self.particle_alpha = unit(self.particle_alpha);
		self
	}
}
