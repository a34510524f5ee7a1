use std::collections::HashMap;
use std::time::Duration;

use winit::dpi::LogicalSize;

use horologe_engine::coords::Vec2;
use horologe_engine::core::{App as EngineApp, AppControl, FrameCtx};
use horologe_engine::device::GpuInit;
use horologe_engine::input::{InputEvent, InputFrame, InputState, KeyState, MouseButton};
use horologe_engine::logging::{init_logging, LoggingConfig};
use horologe_engine::paint::Color;
use horologe_engine::render::{CircleRenderer, RoundedRectRenderer, SegmentRenderer, TextRenderer};
use horologe_engine::text::FontId;
use horologe_engine::window::{Runtime, RuntimeConfig};

use crate::scene::{UiInput, UiScene};
use crate::widget::Element;

// ── FontMap ───────────────────────────────────────────────────────────────

/// A name-keyed map of loaded font handles.
///
/// Passed to the builder closure in [`Application::run_widget`] so the
/// application can retrieve [`FontId`] values by name without touching
/// engine internals.
///
/// ```rust,ignore
/// .run_widget(|fonts: &FontMap| {
///     let body = fonts.get("body").context("no body font")?;
///     Ok(Column::new().child(Text::new("hi", body, 16.0, Color::BLACK)).into())
/// })
/// ```
#[derive(Debug, Default)]
pub struct FontMap(HashMap<String, FontId>);

impl FontMap {
    /// Returns the [`FontId`] registered under `name`, or `None` if the name
    /// was not registered or the font failed to load.
    pub fn get(&self, name: &str) -> Option<FontId> {
        self.0.get(name).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ── Application ───────────────────────────────────────────────────────────

/// Top-level UI application builder.
///
/// Configure the window and fonts, then start the event loop with
/// [`Application::run_widget`].
///
/// ```rust,ignore
/// Application::new()
///     .title("Horologe")
///     .font("body", std::fs::read(path)?)
///     .run_widget(|fonts| Ok(build_screen(fonts)?))
/// ```
pub struct Application {
    title: String,
    width: f64,
    height: f64,
    min_size: Option<(f64, f64)>,
    clear_color: Color,
    fonts: Vec<(String, Vec<u8>)>,
    logging: Option<LoggingConfig>,
}

impl Application {
    pub fn new() -> Self {
        let defaults = RuntimeConfig::default();
        Self {
            title: defaults.title,
            width: defaults.initial_size.width,
            height: defaults.initial_size.height,
            min_size: defaults.min_size.map(|s| (s.width, s.height)),
            clear_color: Color::from_rgb_hex(0xFAFAFA),
            fonts: Vec::new(),
            logging: None,
        }
    }

    /// Set the window title.
    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = t.into();
        self
    }

    /// Set the initial window size in logical pixels.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn min_size(mut self, width: f64, height: f64) -> Self {
        self.min_size = Some((width, height));
        self
    }

    /// Window background behind the widget tree.
    pub fn clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    /// Register a named font, looked up later through [`FontMap::get`].
    pub fn font(mut self, name: impl Into<String>, data: Vec<u8>) -> Self {
        self.fonts.push((name.into(), data));
        self
    }

    /// Install the global logger before the window opens.
    pub fn logging(mut self, config: LoggingConfig) -> Self {
        self.logging = Some(config);
        self
    }

    fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            title: self.title.clone(),
            initial_size: LogicalSize::new(self.width, self.height),
            min_size: self.min_size.map(|(w, h)| LogicalSize::new(w, h)),
        }
    }

    // ── Entry point ───────────────────────────────────────────────────────

    /// Start the event loop with a custom root widget.
    ///
    /// `build` is called once after fonts are loaded; the returned [`Element`]
    /// persists across frames and is mutated in place via `on_event`.
    /// Returns when the window closes.
    pub fn run_widget<F>(self, build: F) -> anyhow::Result<()>
    where
        F: FnOnce(&FontMap) -> anyhow::Result<Element>,
    {
        if let Some(config) = self.logging.clone() {
            init_logging(config);
        }

        let mut scene = UiScene::new();
        let mut fonts = FontMap::default();
        for (name, bytes) in &self.fonts {
            match scene.load_font(bytes) {
                Ok(id) => {
                    log::debug!("loaded font '{name}' as {id:?}");
                    fonts.0.insert(name.clone(), id);
                }
                Err(e) => log::warn!("failed to load font '{name}': {e}"),
            }
        }

        let root = build(&fonts)?;
        let state = UiAppState {
            clear_color: self.clear_color,
            scene,
            root,
            circle_renderer: CircleRenderer::new(),
            rounded_rect_renderer: RoundedRectRenderer::new(),
            segment_renderer: SegmentRenderer::new(),
            text_renderer: TextRenderer::new(),
        };

        log::info!("starting '{}' ({}x{})", self.title, self.width, self.height);
        Runtime::run(self.runtime_config(), GpuInit::default(), state)
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

// ── UiAppState ────────────────────────────────────────────────────────────

/// Engine-facing side of an [`Application`]: owns the scene, the root widget
/// and one renderer per shape kind.
struct UiAppState {
    clear_color: Color,
    scene: UiScene,
    root: Element,

    circle_renderer: CircleRenderer,
    rounded_rect_renderer: RoundedRectRenderer,
    segment_renderer: SegmentRenderer,
    text_renderer: TextRenderer,
}

/// Folds the engine's per-frame input into what the widget tree consumes.
fn ui_input(input: &InputState, frame: &InputFrame, dt: Duration) -> UiInput {
    let (mx, my) = input.pointer_pos.unwrap_or((-1.0, -1.0));
    let keys_pressed = frame
        .events
        .iter()
        .filter_map(|ev| match ev {
            InputEvent::Key { key, state: KeyState::Pressed, modifiers, .. } => Some((*key, *modifiers)),
            _ => None,
        })
        .collect();

    UiInput {
        dt,
        mouse_pos: Vec2::new(mx, my),
        mouse_pressed: input.button_down(MouseButton::Left),
        mouse_clicked: frame.buttons_released.contains(&MouseButton::Left),
        text_input: frame.text.iter().map(|t| t.text.clone()).collect(),
        keys_pressed,
    }
}

impl EngineApp for UiAppState {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let (w, h) = ctx.window.logical_size();
        let viewport = Vec2::new(w, h);

        let input = ui_input(ctx.input, ctx.input_frame, ctx.time.dt);
        self.scene.scale = ctx.window.scale_factor();

        if self.scene.frame_ref(&mut self.root, viewport, &input) {
            ctx.runtime.request_redraw();
        }

        // One pass per shape kind; z-order holds within a kind only.
        let dl = &mut self.scene.draw_list;
        let fs = &self.scene.font_system;
        let r_c = &mut self.circle_renderer;
        let r_rr = &mut self.rounded_rect_renderer;
        let r_s = &mut self.segment_renderer;
        let r_t = &mut self.text_renderer;

        ctx.render(self.clear_color, |rctx, target| {
            r_c.render(rctx, target, dl);
            r_rr.render(rctx, target, dl);
            r_s.render(rctx, target, dl);
            r_t.render(rctx, target, dl, fs);
        })
    }
}

#[cfg(test)]
mod tests {
    use horologe_engine::input::{Key, Modifiers, TextEvent};

    use super::*;

    fn key_event(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key { key, state, modifiers: Modifiers::default(), repeat: false }
    }

    #[test]
    fn input_keeps_presses_in_order_and_drops_releases() {
        let state = InputState::default();
        let mut frame = InputFrame::default();
        frame.events.push(key_event(Key::Digit1, KeyState::Pressed));
        frame.events.push(key_event(Key::Digit1, KeyState::Released));
        frame.events.push(key_event(Key::Backspace, KeyState::Pressed));
        frame.text.push(TextEvent { text: "1".into() });

        let input = ui_input(&state, &frame, Duration::from_millis(16));
        let keys: Vec<Key> = input.keys_pressed.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![Key::Digit1, Key::Backspace]);
        assert_eq!(input.text_input, vec!["1".to_string()]);
        assert_eq!(input.dt, Duration::from_millis(16));
    }

    #[test]
    fn release_of_left_button_is_a_click() {
        let mut state = InputState::default();
        state.pointer_pos = Some((12.0, 34.0));
        let mut frame = InputFrame::default();
        frame.buttons_released.insert(MouseButton::Left);

        let input = ui_input(&state, &frame, Duration::ZERO);
        assert!(input.mouse_clicked);
        assert!(!input.mouse_pressed);
        assert_eq!(input.mouse_pos, Vec2::new(12.0, 34.0));
    }

    #[test]
    fn pointer_outside_window_hovers_nothing() {
        let input = ui_input(&InputState::default(), &InputFrame::default(), Duration::ZERO);
        assert!(input.mouse_pos.x < 0.0 && input.mouse_pos.y < 0.0);
        assert!(input.is_idle());
    }

    #[test]
    fn builder_carries_window_settings() {
        let app = Application::new().title("clock").size(300.0, 500.0).min_size(200.0, 300.0);
        let config = app.runtime_config();
        assert_eq!(config.title, "clock");
        assert_eq!(config.initial_size, LogicalSize::new(300.0, 500.0));
        assert_eq!(config.min_size, Some(LogicalSize::new(200.0, 300.0)));
    }
}
