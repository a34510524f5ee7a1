mod host;

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;

use horologe_engine::logging::LoggingConfig;
use horologe_ui::app::FontMap;
use horologe_ui::prelude::*;

const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
];

const TEXT: u32 = 0x212121;
const ACCENT: u32 = 0xFF4081;

fn main() -> Result<()> {
    let font = load_font()?;
    let now = host::reference_now()?;

    Application::new()
        .title("Horologe")
        .size(420.0, 620.0)
        .logging(LoggingConfig::default())
        .font("body", font)
        .run_widget(move |fonts| build_screen(fonts, now))
}

/// First readable font from the usual system locations.
fn load_font() -> Result<Vec<u8>> {
    FONT_CANDIDATES
        .iter()
        .map(Path::new)
        .find_map(|p| std::fs::read(p).ok())
        .with_context(|| format!("no usable font found; tried {}", FONT_CANDIDATES.join(", ")))
}

/// Date label, clock, stepper and reset button, wired so every stepper change
/// moves the clock to `now + offset`.
fn build_screen(fonts: &FontMap, now: NaiveDateTime) -> Result<Element> {
    let font = fonts.get("body").context("font 'body' failed to load")?;

    let dial = Rc::new(RefCell::new(ClockDial::new(now)));
    dial.borrow_mut().set_count_days(false);

    let label = Rc::new(RefCell::new(host::format_label(now)));
    let model = Rc::new(RefCell::new(StepperModel::new()));

    {
        let dial = dial.clone();
        let label = label.clone();
        model.borrow_mut().on_change(move |offset| match host::target_time(now, offset) {
            Some(target) => {
                *label.borrow_mut() = host::format_label(target);
                dial.borrow_mut().start(target);
            }
            None => log::warn!("offset {offset} leaves the supported date range; ignored"),
        });
    }

    let reset = {
        let model = model.clone();
        Button::new(Text::new("Reset", font, 16.0, Color::WHITE))
            .background(Color::from_rgb_hex(ACCENT))
            .hover_background(Color::from_rgb_hex(ACCENT).with_alpha_factor(0.85))
            .corner_radius(4.0)
            .padding(Edges::symmetric(8.0, 24.0))
            // The listener restores the label from the zeroed offset.
            .on_click(move || model.borrow_mut().reset())
    };

    let screen = Column::new()
        .padding_all(24.0)
        .spacing(20.0)
        .cross_align(Align::Center)
        .child(Text::shared(label, font, 22.0, Color::from_rgb_hex(TEXT)))
        .child(ClockFace::new(dial).size(240.0))
        .child(Stepper::new(model, font))
        .child(reset);

    log::info!("reference time {}", host::format_label(now));
    Ok(screen.into())
}
