//! particle-field: interactive particle background for a portfolio site.
//!
//! This crate provides a WASM canvas component that animates a small pool of
//! drifting particles, links nearby ones, and highlights links to the
//! pointer. Colour follows the site's theme and view mode.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::particle_field::{
	ColorScheme, FieldConfig, FieldState, PaletteMode, ParticleField, ViewMode,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("particle-field: logging initialized");
}

/// Parses a field configuration blob; `None` (with a warning) if malformed.
pub fn parse_field_config(json: &str) -> Option<FieldConfig> {
	match serde_json::from_str::<FieldConfig>(json) {
		Ok(cfg) => Some(cfg.validated()),
		Err(e) => {
			warn!("particle-field: failed to parse field config: {}", e);
			None
		}
	}
}

/// Load field overrides from a script element with id="field-config".
/// Expected format: JSON object with any subset of [`FieldConfig`] fields.
pub fn load_field_config() -> Option<FieldConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("field-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	let cfg = parse_field_config(&json_text)?;
	info!("particle-field: loaded config ({} particles)", cfg.count);
	Some(cfg)
}

/// Initial colour scheme from the `prefers-color-scheme` media query.
fn preferred_color_scheme() -> ColorScheme {
	let prefers_light = web_sys::window()
		.and_then(|w| w.match_media("(prefers-color-scheme: light)").ok().flatten())
		.is_some_and(|mq| mq.matches());
	if prefers_light {
		ColorScheme::Light
	} else {
		ColorScheme::Dark
	}
}

/// Host shell: owns the theme/view-mode flags and mounts the field behind
/// the page content.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_field_config().unwrap_or_default();
	let (scheme, set_scheme) = signal(preferred_color_scheme());
	let (view_mode, set_view_mode) = signal(ViewMode::Visual);

	let palette = Signal::derive(move || PaletteMode::from_flags(scheme.get(), view_mode.get()));
	let opacity = Signal::derive(move || scheme.get().canvas_opacity());
	let theme_attr = move || match scheme.get() {
		ColorScheme::Dark => "dark",
		ColorScheme::Light => "light",
	};

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme=theme_attr />
		<Title text="Portfolio" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<ParticleField palette=palette opacity=opacity config=config />
		<div class="mode-toggles">
			<button
				class="theme-toggle-btn"
				on:click=move |_| set_scheme.update(|s| *s = s.toggled())
			>
				{move || match scheme.get() {
					ColorScheme::Dark => "Light mode",
					ColorScheme::Light => "Dark mode",
				}}
			</button>
			<button
				class="view-toggle-btn"
				on:click=move |_| set_view_mode.update(|v| *v = v.toggled())
			>
				{move || match view_mode.get() {
					ViewMode::Visual => "Technical view",
					ViewMode::Technical => "Visual view",
				}}
			</button>
		</div>
	}
}
