//! Leptos component wrapping the particle-field canvas.
//!
//! Mounting starts the field: the canvas is sized to the viewport, the pool
//! is seeded, window/document listeners are registered and a
//! `requestAnimationFrame` loop begins. Unmounting stops it again; every
//! listener, timer and pending frame is a `gloo` handle that unregisters
//! itself when dropped.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo::render::{AnimationFrame, request_animation_frame};
use gloo::timers::callback::Timeout;
use leptos::prelude::*;
use log::{debug, info, warn};
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, Document, Event, HtmlCanvasElement, MouseEvent, TouchEvent, Window,
};

use super::config::FieldConfig;
use super::palette::PaletteMode;
use super::render;
use super::state::FieldState;
use super::surface::{self, SurfaceConfig};

/// Milliseconds since page load, for input throttling.
fn now_ms(window: &Window) -> f64 {
	window
		.performance()
		.map(|p| p.now())
		.unwrap_or_else(js_sys::Date::now)
}

fn random() -> f64 {
	js_sys::Math::random()
}

/// Per-refresh driver: steps the state, paints, and re-requests itself.
struct FrameLoop {
	state: Rc<RefCell<FieldState>>,
	ctx: CanvasRenderingContext2d,
	palette: Signal<PaletteMode>,
	pending: RefCell<Option<AnimationFrame>>,
}

impl FrameLoop {
	fn request(self: &Rc<Self>) {
		let this = Rc::clone(self);
		let handle = request_animation_frame(move |_| this.tick());
		*self.pending.borrow_mut() = Some(handle);
	}

	fn tick(self: &Rc<Self>) {
		self.pending.borrow_mut().take();
		{
			let mut st = self.state.borrow_mut();
			if !st.is_running() {
				return;
			}
			if let Some(mode) = self.palette.try_get_untracked() {
				st.set_palette(mode);
			}
			if let Some(frame) = st.step() {
				render::paint(&self.ctx, frame);
			}
		}
		self.request();
	}

	/// Drops the queued frame, which cancels it and breaks the loop's
	/// self-reference.
	fn cancel(&self) {
		self.pending.borrow_mut().take();
	}
}

/// A running field and everything that has to be released to stop it.
struct FieldRuntime {
	state: Rc<RefCell<FieldState>>,
	frames: Rc<FrameLoop>,
	fade_timer: Rc<RefCell<Option<Timeout>>>,
	listeners: Vec<EventListener>,
}

impl FieldRuntime {
	fn start(
		canvas: HtmlCanvasElement,
		palette: Signal<PaletteMode>,
		config: FieldConfig,
	) -> Result<Self, JsValue> {
		let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
		let document: Document = window
			.document()
			.ok_or_else(|| JsValue::from_str("no document"))?;
		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")?
			.ok_or_else(|| JsValue::from_str("2d context unavailable"))?
			.dyn_into()?;

		let surface = SurfaceConfig::from_window(&window)
			.ok_or_else(|| JsValue::from_str("viewport size unavailable"))?;
		surface::provision(&canvas, &ctx, &surface)?;

		let state = Rc::new(RefCell::new(FieldState::new(
			config,
			surface,
			palette.get_untracked(),
			&mut random,
		)));
		info!(
			"particle-field: started with {} particles on {}x{} @{}x",
			state.borrow().particles().len(),
			surface.width,
			surface.height,
			surface.dpr
		);

		let frames = Rc::new(FrameLoop {
			state: state.clone(),
			ctx: ctx.clone(),
			palette,
			pending: RefCell::new(None),
		});
		let mut runtime = Self {
			state,
			frames,
			fade_timer: Rc::new(RefCell::new(None)),
			listeners: Vec::with_capacity(6),
		};
		runtime.listen(&window, &document, canvas, ctx);
		runtime.frames.request();
		Ok(runtime)
	}

	fn listen(
		&mut self,
		window: &Window,
		document: &Document,
		canvas: HtmlCanvasElement,
		ctx: CanvasRenderingContext2d,
	) {
		let passive = EventListenerOptions {
			phase: EventListenerPhase::Bubble,
			passive: true,
		};

		let state = self.state.clone();
		self.listeners
			.push(EventListener::new(window, "resize", move |_| {
				let Some(win) = web_sys::window() else {
					return;
				};
				let Some(surface) = SurfaceConfig::from_window(&win) else {
					return;
				};
				let mut st = state.borrow_mut();
				if !st.is_running() {
					return;
				}
				if let Err(e) = surface::provision(&canvas, &ctx, &surface) {
					warn!("particle-field: resize failed: {:?}", e);
					return;
				}
				st.resize(surface, &mut random);
				debug!(
					"particle-field: resized to {}x{} ({}x{} physical)",
					surface.width,
					surface.height,
					surface.physical_width(),
					surface.physical_height()
				);
			}));

		let (state, win) = (self.state.clone(), window.clone());
		self.listeners
			.push(EventListener::new(window, "mousemove", move |ev: &Event| {
				if let Some(ev) = ev.dyn_ref::<MouseEvent>() {
					let now = now_ms(&win);
					state
						.borrow_mut()
						.pointer_moved(ev.client_x() as f64, ev.client_y() as f64, now);
				}
			}));

		// The canvas ignores pointer events, so leaving is tracked on the
		// document instead.
		let state = self.state.clone();
		self.listeners
			.push(EventListener::new(document, "mouseleave", move |_| {
				state.borrow_mut().pointer_left();
			}));

		for event in ["touchstart", "touchmove"] {
			let (state, win) = (self.state.clone(), window.clone());
			self.listeners.push(EventListener::new_with_options(
				window,
				event,
				passive,
				move |ev: &Event| {
					let Some(touch) = ev
						.dyn_ref::<TouchEvent>()
						.and_then(|ev| ev.touches().get(0))
					else {
						return;
					};
					let now = now_ms(&win);
					state
						.borrow_mut()
						.pointer_moved(touch.client_x() as f64, touch.client_y() as f64, now);
				},
			));
		}

		let (state, fade_timer) = (self.state.clone(), self.fade_timer.clone());
		self.listeners.push(EventListener::new_with_options(
			window,
			"touchend",
			passive,
			move |_| {
				let (token, delay) = {
					let mut st = state.borrow_mut();
					let Some(token) = st.touch_ended() else {
						return;
					};
					(token, st.config().touch_fade_ms)
				};
				let state_fade = state.clone();
				// Replacing an older pending fade cancels it.
				*fade_timer.borrow_mut() = Some(Timeout::new(delay, move || {
					state_fade.borrow_mut().fade_elapsed(token);
				}));
			},
		));
	}

	/// Idempotent teardown: after this no frame is painted and no state
	/// changes, even if a callback was already queued.
	fn stop(&mut self) {
		if !self.state.borrow_mut().stop() {
			return;
		}
		self.frames.cancel();
		self.fade_timer.borrow_mut().take();
		self.listeners.clear();
		info!("particle-field: stopped");
	}
}

impl Drop for FieldRuntime {
	fn drop(&mut self) {
		self.stop();
	}
}

/// Full-viewport animated particle background.
///
/// The canvas is fixed behind all other content and ignores pointer events,
/// so it never blocks clicks. `palette` is sampled once per frame, which
/// makes theme changes visible on the next frame without reseeding.
#[component]
pub fn ParticleField(
	/// Colour to draw in, read every frame.
	#[prop(into)]
	palette: Signal<PaletteMode>,
	/// Opacity of the whole canvas.
	#[prop(into)]
	opacity: Signal<f64>,
	/// Overrides for the default field parameters.
	#[prop(optional)]
	config: Option<FieldConfig>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let runtime: Rc<RefCell<Option<FieldRuntime>>> = Rc::new(RefCell::new(None));
	let runtime_init = runtime.clone();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if runtime_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		match FieldRuntime::start(canvas, palette, config.clone().unwrap_or_default()) {
			Ok(rt) => *runtime_init.borrow_mut() = Some(rt),
			Err(e) => warn!("particle-field: failed to start: {:?}", e),
		}
	});

	let runtime = SendWrapper::new(runtime);
	on_cleanup(move || {
		if let Some(mut rt) = runtime.borrow_mut().take() {
			rt.stop();
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-field"
			aria-hidden="true"
			style:position="fixed"
			style:top="0"
			style:left="0"
			style:pointer-events="none"
			style:z-index="0"
			style:transition="opacity 0.3s ease"
			style:opacity=move || opacity.get().to_string()
		/>
	}
}
