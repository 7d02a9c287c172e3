//! Authoritative render state and the per-frame step.
//!
//! Every input channel (resize, pointer, palette) writes into [`FieldState`]
//! through a dedicated setter. Once [`FieldState::stop`] has run, all of
//! those setters and [`FieldState::step`] become no-ops, so late timer or
//! frame callbacks cannot mutate anything.

use super::config::FieldConfig;
use super::palette::PaletteMode;
use super::particles::{Particle, ParticleSystem};
use super::pointer::{FadeToken, PointerTarget, PointerTracker};
use super::render::{Frame, proximity_alpha};
use super::surface::SurfaceConfig;

/// Particles, pointer target, surface size and palette for one field.
#[derive(Debug)]
pub struct FieldState {
	config: FieldConfig,
	particles: ParticleSystem,
	pointer: PointerTracker,
	surface: SurfaceConfig,
	palette: PaletteMode,
	running: bool,
	frame: Frame,
}

impl FieldState {
	/// Seeds `config.count` particles over `surface` and starts in the
	/// running state.
	pub fn new(
		config: FieldConfig,
		surface: SurfaceConfig,
		palette: PaletteMode,
		rng: &mut impl FnMut() -> f64,
	) -> Self {
		let config = config.validated();
		let particles = ParticleSystem::new(
			config.count,
			config.speed,
			surface.width,
			surface.height,
			rng,
		);
		Self {
			pointer: PointerTracker::new(config.pointer_throttle_ms),
			config,
			particles,
			surface,
			palette,
			running: true,
			frame: Frame::new(),
		}
	}

	/// False once [`stop`](Self::stop) has run.
	pub fn is_running(&self) -> bool {
		self.running
	}

	/// Stops the field for good. Returns `true` only on the first call.
	pub fn stop(&mut self) -> bool {
		let was_running = self.running;
		self.running = false;
		self.frame.reset();
		was_running
	}

	/// Validated parameters this field runs with.
	pub fn config(&self) -> &FieldConfig {
		&self.config
	}

	/// Read-only view of the pool.
	pub fn particles(&self) -> &ParticleSystem {
		&self.particles
	}

	/// Replaces the pool with specific particles, clamped into the surface.
	/// Ignored once stopped.
	pub fn place_particles(&mut self, particles: impl IntoIterator<Item = Particle>) {
		if self.running {
			self.particles.place(particles);
		}
	}

	/// Current surface size and pixel ratio.
	pub fn surface(&self) -> SurfaceConfig {
		self.surface
	}

	/// Palette used by the next frame.
	pub fn palette(&self) -> PaletteMode {
		self.palette
	}

	/// Current pointer focus.
	pub fn pointer_target(&self) -> PointerTarget {
		self.pointer.target()
	}

	/// Commands recorded by the most recent [`step`](Self::step).
	pub fn frame(&self) -> &Frame {
		&self.frame
	}

	/// New surface size: the pool is reseeded, not rescaled.
	pub fn resize(&mut self, surface: SurfaceConfig, rng: &mut impl FnMut() -> f64) {
		if !self.running {
			return;
		}
		self.surface = surface;
		self.particles.reseed(
			self.config.count,
			self.config.speed,
			surface.width,
			surface.height,
			rng,
		);
	}

	/// Switches colour; visible from the next frame on.
	pub fn set_palette(&mut self, palette: PaletteMode) {
		if self.running {
			self.palette = palette;
		}
	}

	/// Throttled pointer/touch position update.
	pub fn pointer_moved(&mut self, x: f64, y: f64, now_ms: f64) -> bool {
		self.running && self.pointer.move_to(x, y, now_ms)
	}

	/// Pointer left the page: drop focus immediately.
	pub fn pointer_left(&mut self) {
		if self.running {
			self.pointer.leave();
		}
	}

	/// A touch ended; the caller schedules [`fade_elapsed`](Self::fade_elapsed)
	/// after `config().touch_fade_ms`.
	pub fn touch_ended(&mut self) -> Option<FadeToken> {
		self.running.then(|| self.pointer.begin_fade())
	}

	/// Deferred half of a touch end. Ignored after stop or when newer input
	/// superseded the fade.
	pub fn fade_elapsed(&mut self, token: FadeToken) -> bool {
		self.running && self.pointer.finish_fade(token)
	}

	/// Records one frame and advances the simulation.
	///
	/// Returns `None` without touching any state once stopped.
	pub fn step(&mut self) -> Option<&Frame> {
		if !self.running {
			return None;
		}

		let cfg = &self.config;
		let color = self.palette.color();
		let (w, h) = (self.surface.width, self.surface.height);
		let particles = &self.particles.particles;
		let frame = &mut self.frame;

		frame.reset();
		frame.clear_rect(w, h);

		// O(n^2) on purpose; n stays around 30.
		for (i, a) in particles.iter().enumerate() {
			for b in &particles[i + 1..] {
				let dist = a.distance_to(b.x, b.y);
				if let Some(alpha) = proximity_alpha(dist, cfg.link_distance, cfg.link_max_alpha) {
					frame.line(
						(a.x, a.y),
						(b.x, b.y),
						color.with_alpha(alpha),
						cfg.link_width,
					);
				}
			}
		}

		let pointer = self.pointer.target();
		if let Some(target) = pointer.position() {
			for p in particles {
				let dist = pointer.distance_from(p.x, p.y);
				if let Some(t) = proximity_alpha(dist, cfg.pointer_distance, 1.0) {
					frame.line(
						(p.x, p.y),
						target,
						color.with_alpha(t * cfg.glow_alpha),
						cfg.glow_width,
					);
					frame.line(
						(p.x, p.y),
						target,
						color.with_alpha(t * cfg.core_alpha),
						cfg.core_width,
					);
				}
			}
		}

		let fill = color.with_alpha(cfg.particle_alpha);
		for p in particles {
			frame.disc(p.x, p.y, cfg.radius, fill);
		}

		self.particles.update();
		Some(&self.frame)
	}
}

#[cfg(test)]
mod tests {
	use super::super::render::DrawCmd;
	use super::*;

	fn still(x: f64, y: f64) -> Particle {
		Particle {
			x,
			y,
			vx: 0.0,
			vy: 0.0,
		}
	}

	fn state_with(particles: &[Particle]) -> FieldState {
		let cfg = FieldConfig {
			count: 0,
			..FieldConfig::default()
		};
		let mut state = FieldState::new(
			cfg,
			SurfaceConfig::new(400.0, 300.0, 1.0),
			PaletteMode::Dark,
			&mut || 0.5,
		);
		state.place_particles(particles.iter().copied());
		state
	}

	fn line_alphas(frame: &Frame) -> Vec<(f64, f64)> {
		frame
			.lines()
			.map(|c| match c {
				DrawCmd::Line { color, width, .. } => (color.a, *width),
				_ => unreachable!(),
			})
			.collect()
	}

	#[test]
	fn frame_starts_with_clear() {
		let mut state = state_with(&[still(1.0, 1.0)]);
		let frame = state.step().unwrap();
		assert_eq!(
			frame.cmds()[0],
			DrawCmd::Clear {
				width: 400.0,
				height: 300.0
			}
		);
	}

	#[test]
	fn near_pair_is_linked_with_scaled_alpha() {
		let mut state = state_with(&[still(0.0, 0.0), still(50.0, 0.0)]);
		let frame = state.step().unwrap();
		let lines = line_alphas(frame);
		assert_eq!(lines.len(), 1);
		assert!((lines[0].0 - 0.204).abs() < 1e-3);
		assert_eq!(lines[0].1, 0.5);
	}

	#[test]
	fn far_pair_is_not_linked() {
		let mut state = state_with(&[still(0.0, 0.0), still(130.0, 0.0)]);
		assert_eq!(state.step().unwrap().lines().count(), 0);

		let mut state = state_with(&[still(0.0, 0.0), still(120.0, 0.0)]);
		assert_eq!(state.step().unwrap().lines().count(), 0);
	}

	#[test]
	fn pointer_draws_glow_then_core() {
		let mut state = state_with(&[still(10.0, 10.001)]);
		assert!(state.pointer_moved(10.0, 10.0, 0.0));
		let lines = line_alphas(state.step().unwrap());
		assert_eq!(lines.len(), 2);
		let (glow, core) = (lines[0], lines[1]);
		assert!((glow.0 - 0.3).abs() < 1e-3);
		assert_eq!(glow.1, 4.0);
		assert!((core.0 - 0.95).abs() < 1e-3);
		assert_eq!(core.1, 1.5);
	}

	#[test]
	fn inactive_pointer_draws_nothing() {
		let mut state = state_with(&[still(0.0, 0.0), still(399.0, 299.0)]);
		state.pointer_moved(0.0, 0.0, 0.0);
		state.pointer_left();
		assert_eq!(state.step().unwrap().lines().count(), 0);
	}

	#[test]
	fn every_particle_is_drawn_as_disc() {
		let mut state = state_with(&[still(1.0, 1.0), still(200.0, 200.0), still(5.0, 290.0)]);
		let frame = state.step().unwrap();
		assert_eq!(frame.discs().count(), 3);
		for cmd in frame.discs() {
			let DrawCmd::Disc { radius, color, .. } = cmd else {
				unreachable!()
			};
			assert_eq!(*radius, 2.0);
			assert_eq!(color.a, 0.8);
		}
	}

	#[test]
	fn palette_change_shows_on_next_frame() {
		let mut state = state_with(&[still(1.0, 1.0)]);
		state.set_palette(PaletteMode::Technical);
		let frame = state.step().unwrap();
		let Some(DrawCmd::Disc { color, .. }) = frame.discs().next() else {
			panic!("no disc drawn");
		};
		assert_eq!((color.r, color.g, color.b), (0, 255, 65));
	}

	#[test]
	fn step_advances_positions_after_drawing() {
		let mut state = state_with(&[Particle {
			x: 10.0,
			y: 10.0,
			vx: 1.0,
			vy: 0.0,
		}]);
		let frame = state.step().unwrap();
		let Some(DrawCmd::Disc { x, .. }) = frame.discs().next() else {
			panic!("no disc drawn");
		};
		assert_eq!(*x, 10.0);
		assert_eq!(state.particles().particles[0].x, 11.0);
	}

	#[test]
	fn placed_particles_are_clamped_and_ignored_after_stop() {
		let mut state = state_with(&[still(500.0, -20.0)]);
		assert_eq!(state.particles().particles[0], still(400.0, 0.0));

		state.stop();
		state.place_particles([still(1.0, 1.0), still(2.0, 2.0)]);
		assert_eq!(state.particles().len(), 1);
	}

	#[test]
	fn stopped_state_ignores_everything() {
		let mut state = state_with(&[still(1.0, 1.0)]);
		state.pointer_moved(5.0, 5.0, 0.0);
		let token = state.touch_ended();
		assert!(token.is_some());

		assert!(state.stop());
		assert!(!state.stop());
		assert!(state.step().is_none());
		assert!(!state.fade_elapsed(token.unwrap()));
		assert!(!state.pointer_moved(9.0, 9.0, 1000.0));
		state.resize(SurfaceConfig::new(10.0, 10.0, 1.0), &mut || 0.5);
		state.set_palette(PaletteMode::Light);

		assert_eq!(state.pointer_target(), PointerTarget::At { x: 5.0, y: 5.0 });
		assert_eq!(state.surface().width, 400.0);
		assert_eq!(state.palette(), PaletteMode::Dark);
		assert_eq!(state.particles().particles[0].x, 1.0);
		assert!(state.touch_ended().is_none());
	}
}
