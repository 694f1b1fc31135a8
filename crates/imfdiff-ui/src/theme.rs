//! Dark palette and text styles for the package inspector.

use egui::{Color32, FontId, RichText, Rounding, Stroke};

pub struct Theme;

impl Theme {
    // ── Typography ─────────────────────────────────────────────
    pub const FONT_SM: f32 = 13.0; // cells, labels
    pub const FONT_MD: f32 = 15.0; // tree headers
    pub const FONT_LG: f32 = 18.0; // composition title

    pub const SPACE_XS: f32 = 4.0;
    pub const SPACE_SM: f32 = 8.0;
    pub const RADIUS: f32 = 6.0;

    // ── Backgrounds ────────────────────────────────────────────
    pub const fn bg() -> Color32 {
        Color32::from_rgb(18, 18, 22)
    }
    pub const fn bg1() -> Color32 {
        Color32::from_rgb(28, 28, 34)
    }
    pub const fn bg2() -> Color32 {
        Color32::from_rgb(35, 35, 42)
    }

    // ── Text ───────────────────────────────────────────────────
    pub const fn t1() -> Color32 {
        Color32::from_rgba_premultiplied(235, 235, 235, 235)
    }
    pub const fn t2() -> Color32 {
        Color32::from_rgba_premultiplied(153, 153, 153, 153)
    }

    pub const fn accent() -> Color32 {
        Color32::from_rgb(86, 130, 255)
    }
    /// Unresolved track files.
    pub const fn amber() -> Color32 {
        Color32::from_rgb(255, 184, 48)
    }
    pub const fn video() -> Color32 {
        Color32::from_rgb(34, 211, 238)
    }
    pub const fn audio() -> Color32 {
        Color32::from_rgb(48, 213, 160)
    }

    /// Timecodes and rates line up in a monospace face.
    pub fn cell(text: &str) -> RichText {
        RichText::new(text)
            .font(FontId::monospace(Self::FONT_SM))
            .color(Self::t1())
    }

    pub fn column_header(text: &str) -> RichText {
        RichText::new(text).size(Self::FONT_SM).strong().color(Self::t2())
    }

    /// Apply the palette to an egui context.
    pub fn apply(ctx: &egui::Context) {
        let mut style = (*ctx.style()).clone();
        let visuals = &mut style.visuals;
        *visuals = egui::Visuals::dark();

        visuals.panel_fill = Self::bg1();
        visuals.window_fill = Self::bg2();
        visuals.extreme_bg_color = Self::bg();
        visuals.faint_bg_color = Self::bg2();

        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, Self::t2());
        visuals.widgets.inactive.rounding = Rounding::same(Self::RADIUS);
        visuals.widgets.hovered.rounding = Rounding::same(Self::RADIUS);
        visuals.widgets.active.fg_stroke = Stroke::new(1.0, Self::accent());
        visuals.selection.stroke = Stroke::new(1.0, Self::accent());

        ctx.set_style(style);
    }
}
