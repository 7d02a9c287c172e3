// Host-side tests for the particle field's simulation and lifecycle.
// Nothing here touches the browser; random sources are injected.

#![allow(unused_crate_dependencies)]

use particle_field::components::particle_field::{
	DrawCmd, FieldConfig, FieldState, PaletteMode, Particle, PointerTarget, SurfaceConfig,
};

fn lcg(seed: u64) -> impl FnMut() -> f64 {
	let mut state = seed;
	move || {
		state = state
			.wrapping_mul(6364136223846793005)
			.wrapping_add(1442695040888963407);
		(state >> 11) as f64 / (1u64 << 53) as f64
	}
}

fn field(count: usize, speed: f64, w: f64, h: f64, seed: u64) -> FieldState {
	let cfg = FieldConfig {
		count,
		speed,
		..FieldConfig::default()
	};
	FieldState::new(
		cfg,
		SurfaceConfig::new(w, h, 1.0),
		PaletteMode::Dark,
		&mut lcg(seed),
	)
}

fn all_in_bounds(state: &FieldState) -> bool {
	let s = state.surface();
	state
		.particles()
		.particles
		.iter()
		.all(|p| p.x >= 0.0 && p.x <= s.width && p.y >= 0.0 && p.y <= s.height)
}

#[test]
fn particles_never_leave_surface() {
	for (count, speed, seed) in [(0, 0.25, 1), (1, 0.25, 2), (30, 0.25, 3), (64, 40.0, 4)] {
		let mut state = field(count, speed, 640.0, 480.0, seed);
		for _ in 0..2_000 {
			assert!(state.step().is_some());
			assert!(all_in_bounds(&state));
		}
		assert_eq!(state.particles().len(), count);
	}
}

#[test]
fn velocity_magnitude_is_preserved_by_bounces() {
	let mut state = field(20, 3.0, 200.0, 100.0, 11);
	for _ in 0..1_000 {
		state.step();
	}
	for p in &state.particles().particles {
		let speed = (p.vx * p.vx + p.vy * p.vy).sqrt();
		assert!((speed - 3.0).abs() < 1e-9);
	}
}

#[test]
fn resize_reseeds_exactly_count_within_new_bounds() {
	let mut state = field(30, 0.25, 1920.0, 1080.0, 5);
	state.resize(SurfaceConfig::new(375.0, 667.0, 3.0), &mut lcg(6));

	let surface = state.surface();
	assert_eq!(surface.physical_width(), 1125);
	assert_eq!(surface.physical_height(), 2001);
	assert_eq!(state.particles().len(), 30);
	assert!(all_in_bounds(&state));
	assert!(state.particles().particles.iter().all(|p| p.x <= 375.0));
}

#[test]
fn link_appears_and_disappears_with_distance() {
	let mut state = field(0, 0.0, 500.0, 500.0, 1);
	let still = |x: f64| Particle {
		x,
		y: 0.0,
		vx: 0.0,
		vy: 0.0,
	};
	state.place_particles([still(0.0), still(50.0)]);

	let lines: Vec<_> = state.step().unwrap().lines().cloned().collect();
	assert_eq!(lines.len(), 1);
	let DrawCmd::Line { color, from, to, .. } = &lines[0] else {
		unreachable!()
	};
	assert!((color.a - (1.0 - 50.0 / 120.0) * 0.35).abs() < 1e-12);
	assert_eq!((*from, *to), ((0.0, 0.0), (50.0, 0.0)));

	state.place_particles([still(0.0), still(130.0)]);
	assert_eq!(state.step().unwrap().lines().count(), 0);
}

#[test]
fn pointer_lines_only_while_pointer_active() {
	let mut state = field(30, 0.25, 300.0, 300.0, 9);
	assert_eq!(state.pointer_target(), PointerTarget::Inactive);

	// Every particle is within 220px of the centre of a 300x300 box.
	state.pointer_moved(150.0, 150.0, 0.0);
	let frame = state.step().unwrap();
	let to_pointer = frame
		.lines()
		.filter(|c| matches!(c, DrawCmd::Line { to, .. } if *to == (150.0, 150.0)))
		.count();
	assert!(to_pointer >= 2);
	assert_eq!(to_pointer % 2, 0);

	state.pointer_left();
	let frame = state.step().unwrap();
	let to_pointer = frame
		.lines()
		.filter(|c| matches!(c, DrawCmd::Line { to, .. } if *to == (150.0, 150.0)))
		.count();
	assert_eq!(to_pointer, 0);
}

#[test]
fn touch_fade_clears_target_later() {
	let mut state = field(3, 0.25, 300.0, 300.0, 2);
	state.pointer_moved(10.0, 20.0, 0.0);
	let token = state.touch_ended().unwrap();
	assert_eq!(state.pointer_target(), PointerTarget::At { x: 10.0, y: 20.0 });
	assert!(state.fade_elapsed(token));
	assert_eq!(state.pointer_target(), PointerTarget::Inactive);
}

#[test]
fn teardown_freezes_state_against_late_callbacks() {
	let mut state = field(10, 0.25, 300.0, 300.0, 8);
	state.pointer_moved(10.0, 20.0, 0.0);
	let token = state.touch_ended().unwrap();
	state.step();
	let before: Vec<Particle> = state.particles().particles.clone();

	assert!(state.stop());
	// A frame and the touch-end timer both fire after stop.
	assert!(state.step().is_none());
	assert!(!state.fade_elapsed(token));
	assert!(!state.stop());

	assert_eq!(state.particles().particles, before);
	assert_eq!(state.pointer_target(), PointerTarget::At { x: 10.0, y: 20.0 });
	assert!(state.frame().cmds().is_empty());
}
