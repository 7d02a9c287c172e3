//! Draw commands and their canvas backend.
//!
//! A frame step records [`DrawCmd`]s into a [`Frame`]; [`paint`] replays
//! them on a `CanvasRenderingContext2d`. Commands are in logical pixels and
//! assume the context transform already carries the device pixel ratio.

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use super::palette::Color;

/// One primitive drawing operation.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
	/// Erase the rectangle `(0, 0, width, height)`.
	Clear {
		/// Logical width.
		width: f64,
		/// Logical height.
		height: f64,
	},
	/// Straight stroke from `from` to `to`.
	Line {
		/// Start point.
		from: (f64, f64),
		/// End point.
		to: (f64, f64),
		/// Stroke colour, alpha included.
		color: Color,
		/// Stroke width.
		width: f64,
	},
	/// Filled circle.
	Disc {
		/// Centre x.
		x: f64,
		/// Centre y.
		y: f64,
		/// Radius.
		radius: f64,
		/// Fill colour.
		color: Color,
	},
}

/// Reusable command buffer for one frame.
#[derive(Debug, Default)]
pub struct Frame {
	cmds: Vec<DrawCmd>,
}

impl Frame {
	/// Empty buffer.
	pub fn new() -> Self {
		Self::default()
	}

	/// Drops the previous frame's commands, keeping the allocation.
	pub fn reset(&mut self) {
		self.cmds.clear();
	}

	/// Recorded commands in draw order.
	pub fn cmds(&self) -> &[DrawCmd] {
		&self.cmds
	}

	/// Records a full clear.
	pub fn clear_rect(&mut self, width: f64, height: f64) {
		self.cmds.push(DrawCmd::Clear { width, height });
	}

	/// Records a stroke.
	pub fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, width: f64) {
		self.cmds.push(DrawCmd::Line {
			from,
			to,
			color,
			width,
		});
	}

	/// Records a filled circle.
	pub fn disc(&mut self, x: f64, y: f64, radius: f64, color: Color) {
		self.cmds.push(DrawCmd::Disc {
			x,
			y,
			radius,
			color,
		});
	}

	/// Only the [`DrawCmd::Line`]s, in order.
	pub fn lines(&self) -> impl Iterator<Item = &DrawCmd> {
		self.cmds
			.iter()
			.filter(|c| matches!(c, DrawCmd::Line { .. }))
	}

	/// Only the [`DrawCmd::Disc`]s, in order.
	pub fn discs(&self) -> impl Iterator<Item = &DrawCmd> {
		self.cmds
			.iter()
			.filter(|c| matches!(c, DrawCmd::Disc { .. }))
	}
}

/// Linear proximity fade: `max` at distance 0 down to 0 at `threshold`.
///
/// Returns `None` at or beyond the threshold (strict `<` test), so nothing
/// is drawn for exactly-at-threshold pairs.
pub fn proximity_alpha(distance: f64, threshold: f64, max: f64) -> Option<f64> {
	if distance < threshold {
		Some((1.0 - distance / threshold) * max)
	} else {
		None
	}
}

/// Replays `frame` onto the canvas.
pub fn paint(ctx: &CanvasRenderingContext2d, frame: &Frame) {
	for cmd in frame.cmds() {
		match cmd {
			DrawCmd::Clear { width, height } => ctx.clear_rect(0.0, 0.0, *width, *height),
			DrawCmd::Line {
				from,
				to,
				color,
				width,
			} => {
				ctx.set_line_width(*width);
				ctx.set_stroke_style_str(&color.to_css());
				ctx.begin_path();
				ctx.move_to(from.0, from.1);
				ctx.line_to(to.0, to.1);
				ctx.stroke();
			}
			DrawCmd::Disc {
				x,
				y,
				radius,
				color,
			} => {
				ctx.set_fill_style_str(&color.to_css());
				ctx.begin_path();
				let _ = ctx.arc(*x, *y, *radius, 0.0, TAU);
				ctx.fill();
			}
		}
	}
}
