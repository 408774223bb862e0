use ratatui::style::Color;

pub const BG_PRIMARY: Color = Color::Rgb(5, 5, 5);
pub const BG_PANEL: Color = Color::Rgb(12, 12, 12);
pub const FG_PRIMARY: Color = Color::Rgb(190, 190, 190);
pub const FG_DIM: Color = Color::Rgb(128, 128, 128);

pub const ACCENT: Color = Color::Rgb(120, 160, 255);
pub const SECTION_TITLE: Color = Color::Rgb(208, 208, 208);

pub const POSITIVE: Color = Color::Rgb(52, 211, 153);
pub const NEGATIVE: Color = Color::Rgb(248, 113, 113);
pub const PENDING: Color = Color::Rgb(100, 116, 139);

pub const BORDER_IDLE: Color = Color::Rgb(61, 120, 120);
pub const BORDER_FOCUS: Color = Color::Rgb(187, 94, 0);

pub const SELECTION_BG: Color = Color::Rgb(0, 90, 181);
pub const SELECTION_FG: Color = Color::Rgb(255, 255, 255);

pub const BAR_BG: Color = Color::Rgb(23, 52, 127);
pub const BAR_TEXT: Color = Color::Rgb(235, 240, 255);
