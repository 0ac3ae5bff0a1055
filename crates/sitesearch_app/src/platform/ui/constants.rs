use ratatui::style::Color;

pub const TITLE: &str = "Website Content Search";
pub const SUBTITLE: &str = "Search through website content with precision";

pub const URL_TITLE: &str = "Website URL";
pub const URL_PLACEHOLDER: &str = "https://example.com";
pub const QUERY_TITLE: &str = "Search query";
pub const QUERY_PLACEHOLDER: &str = "Search query";
pub const REQUIRED_HINT: &str = "Please fill out this field.";

pub const HELP_TEXT: &str =
    "Tab: next field | Enter/Space: search / toggle HTML | ↑/↓ or k/j: select result | PgUp/PgDn: scroll panels | Esc (q in results): quit";

/// Rows of chunk text shown per result before scrolling.
pub const CHUNK_MAX_ROWS: usize = 8;
/// Rows of raw HTML shown per expanded result before scrolling.
pub const HTML_MAX_ROWS: usize = 10;
/// Rows moved by PageUp/PageDown inside a result's panels.
pub const SCROLL_STEP: u16 = 4;

pub const ACCENT: Color = Color::Rgb(55, 48, 163);
pub const ACCENT_LIGHT: Color = Color::Rgb(99, 102, 241);
pub const LINK: Color = Color::Rgb(37, 99, 235);
pub const ERROR: Color = Color::Rgb(220, 38, 38);
pub const MUTED: Color = Color::DarkGray;
