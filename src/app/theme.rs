use eframe::egui::Color32;

pub const ZONE_IDLE: Color32 = Color32::from_rgb(228, 228, 231);
pub const ZONE_ACTIVE: Color32 = Color32::from_rgb(212, 212, 216);
pub const ZONE_BORDER: Color32 = Color32::from_rgb(212, 212, 216);
pub const DRAG_BORDER: Color32 = Color32::from_rgb(234, 179, 8);
pub const TEXT: Color32 = Color32::from_rgb(63, 63, 70);
pub const TEXT_STRONG: Color32 = Color32::from_rgb(39, 39, 42);
pub const MUTED: Color32 = Color32::from_rgb(113, 113, 122);
pub const ERROR: Color32 = Color32::from_rgb(220, 50, 50);
pub const SIDEBAR_ACTIVE: Color32 = Color32::from_rgb(24, 24, 27);
