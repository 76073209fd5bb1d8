use ratatui::style::Color;

pub const KEY_CHECK: char = 'r';
pub const KEY_UPLOAD: char = 'u';
pub const KEY_DOWNLOAD: char = 'd';
pub const KEY_QUIT: char = 'q';

pub const TITLE: &str = "URL Indexation Checker";
pub const SUBTITLE: &str = "Monitor Google indexation status of your URLs";
pub const SCHEDULE_HINT: &str = "Automatic check runs daily at 9:00 AM IST";

pub const COLOR_ACCENT: Color = Color::Cyan;
pub const COLOR_SUCCESS: Color = Color::Green;
pub const COLOR_ERROR: Color = Color::Red;
pub const COLOR_NEUTRAL: Color = Color::Gray;
pub const COLOR_INFO: Color = Color::Blue;
pub const COLOR_MUTED: Color = Color::DarkGray;
