use egui::{Color32, Visuals};

fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

fn blend(a: Color32, b: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |c1: u8, c2: u8| -> u8 { ((c1 as f32 * (1.0 - t)) + (c2 as f32 * t)).round() as u8 };
    Color32::from_rgb(lerp(a.r(), b.r()), lerp(a.g(), b.g()), lerp(a.b(), b.b()))
}

#[derive(Clone, Copy)]
pub(crate) struct WeekGridPalette {
    pub day_bg: Color32,
    pub weekend_bg: Color32,
    pub today_bg: Color32,
    pub past_text: Color32,
    pub border: Color32,
    pub today_border: Color32,
    pub drop_target: Color32,
    pub text: Color32,
    pub muted_text: Color32,
}

impl WeekGridPalette {
    pub fn from_visuals(visuals: &Visuals) -> Self {
        let base = visuals.extreme_bg_color;
        let accent = visuals.selection.bg_fill;
        let text = visuals.text_color();

        Self {
            day_bg: base,
            weekend_bg: blend(base, visuals.faint_bg_color, if visuals.dark_mode { 0.8 } else { 0.6 }),
            today_bg: blend(base, accent, 0.15),
            past_text: with_alpha(text, 140),
            border: visuals.widgets.noninteractive.bg_stroke.color,
            today_border: accent,
            drop_target: with_alpha(accent, 90),
            text,
            muted_text: visuals.weak_text_color(),
        }
    }

    pub fn from_ui(ui: &egui::Ui) -> Self {
        Self::from_visuals(ui.visuals())
    }
}
