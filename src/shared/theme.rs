use ratatui::style::{Color, Modifier, Style};

use super::config::ThemeMode;

/// Color palette for the dashboard
#[derive(Debug, Clone)]
pub struct ModernTheme {
    // Primary colors
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,

    // Status colors
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
    pub info: Color,

    // Background colors
    pub background: Color,
    pub surface: Color,

    // Text colors
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_disabled: Color,

    // Interactive colors
    pub selected: Color,
    pub border: Color,
    pub border_focused: Color,

    // Chart series
    pub chart_done: Color,
    pub chart_wip: Color,
    pub chart_todo: Color,
    pub chart_nuevo: Color,
    pub chart_mejora: Color,
    pub chart_volume: Color,
    pub chart_effort: Color,
}

impl Default for ModernTheme {
    fn default() -> Self {
        Self::dark()
    }
}

impl ModernTheme {
    pub fn from_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
            ThemeMode::Ocean => Self::ocean(),
        }
    }

    /// Dark theme matching the web dashboard
    pub fn dark() -> Self {
        Self {
            primary: Color::Rgb(250, 0, 80),   // Brand pink
            secondary: Color::Rgb(0, 169, 224), // Brand cyan
            accent: Color::Rgb(255, 212, 0),    // Brand yellow

            success: Color::Rgb(16, 185, 129), // Emerald-500
            warning: Color::Rgb(255, 212, 0),
            danger: Color::Rgb(239, 68, 68), // Red-500
            info: Color::Rgb(0, 169, 224),

            background: Color::Rgb(15, 17, 21),
            surface: Color::Rgb(22, 24, 29),

            text_primary: Color::Rgb(241, 245, 249),   // Slate-100
            text_secondary: Color::Rgb(148, 163, 184), // Slate-400
            text_disabled: Color::Rgb(100, 116, 139),  // Slate-500

            selected: Color::Rgb(250, 0, 80),
            border: Color::Rgb(42, 45, 53),
            border_focused: Color::Rgb(250, 0, 80),

            chart_done: Color::Rgb(16, 185, 129),
            chart_wip: Color::Rgb(255, 212, 0),
            chart_todo: Color::Rgb(100, 116, 139),
            chart_nuevo: Color::Rgb(250, 0, 80),
            chart_mejora: Color::Rgb(168, 85, 247),
            chart_volume: Color::Rgb(250, 0, 80),
            chart_effort: Color::Rgb(0, 169, 224),
        }
    }

    /// Light theme variant
    pub fn light() -> Self {
        Self {
            primary: Color::Rgb(219, 0, 70),
            secondary: Color::Rgb(2, 132, 199),
            accent: Color::Rgb(202, 138, 4),

            success: Color::Rgb(5, 150, 105),
            warning: Color::Rgb(202, 138, 4),
            danger: Color::Rgb(220, 38, 38),
            info: Color::Rgb(2, 132, 199),

            background: Color::Rgb(255, 255, 255),
            surface: Color::Rgb(248, 250, 252),

            text_primary: Color::Rgb(15, 23, 42),
            text_secondary: Color::Rgb(71, 85, 105),
            text_disabled: Color::Rgb(148, 163, 184),

            selected: Color::Rgb(219, 0, 70),
            border: Color::Rgb(203, 213, 225),
            border_focused: Color::Rgb(219, 0, 70),

            chart_done: Color::Rgb(5, 150, 105),
            chart_wip: Color::Rgb(202, 138, 4),
            chart_todo: Color::Rgb(148, 163, 184),
            chart_nuevo: Color::Rgb(219, 0, 70),
            chart_mejora: Color::Rgb(147, 51, 234),
            chart_volume: Color::Rgb(219, 0, 70),
            chart_effort: Color::Rgb(2, 132, 199),
        }
    }

    /// Ocean blue theme with cool tones
    pub fn ocean() -> Self {
        Self {
            // Ocean blues and teals
            primary: Color::Rgb(14, 165, 233),  // Sky-500
            secondary: Color::Rgb(6, 182, 212), // Cyan-500
            accent: Color::Rgb(20, 184, 166),   // Teal-500

            success: Color::Rgb(16, 185, 129), // Emerald-500
            warning: Color::Rgb(245, 158, 11), // Amber-500
            danger: Color::Rgb(239, 68, 68),   // Red-500
            info: Color::Rgb(59, 130, 246),    // Blue-500

            background: Color::Rgb(15, 23, 42), // Slate-900
            surface: Color::Rgb(30, 41, 59),    // Slate-800

            text_primary: Color::Rgb(248, 250, 252),   // Slate-50
            text_secondary: Color::Rgb(148, 163, 184), // Slate-400
            text_disabled: Color::Rgb(100, 116, 139),  // Slate-500

            selected: Color::Rgb(14, 165, 233),       // Sky-500
            border: Color::Rgb(71, 85, 105),          // Slate-600
            border_focused: Color::Rgb(14, 165, 233), // Sky-500

            chart_done: Color::Rgb(16, 185, 129),
            chart_wip: Color::Rgb(245, 158, 11),
            chart_todo: Color::Rgb(100, 116, 139),
            chart_nuevo: Color::Rgb(6, 182, 212),
            chart_mejora: Color::Rgb(168, 85, 247),
            chart_volume: Color::Rgb(6, 182, 212),
            chart_effort: Color::Rgb(20, 184, 166),
        }
    }
}

/// Iconography using Unicode symbols
pub struct ModernIcons;

impl ModernIcons {
    // Navigation
    pub const OVERVIEW: &'static str = "◉";
    pub const CATEGORY: &'static str = "▪";
    pub const DATABASE: &'static str = "▤";

    // Status
    pub const DONE: &'static str = "✓";
    pub const ERROR: &'static str = "✗";

    // UI elements
    pub const REFRESH: &'static str = "⟳";
    pub const TIME: &'static str = "◷";
    pub const BULLET: &'static str = "•";
}

/// Characters used by bar renderers
pub struct ProgressChars;

impl ProgressChars {
    pub const FILLED: char = '█';
    pub const PARTIAL: char = '▌';
    pub const EMPTY: char = '░';
}

/// Pre-defined styles for common UI elements
impl ModernTheme {
    /// Style for headers and titles
    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.text_primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for secondary text
    pub fn secondary_text_style(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    pub fn success_style(&self) -> Style {
        Style::default()
            .fg(self.success)
            .add_modifier(Modifier::BOLD)
    }

    pub fn warning_style(&self) -> Style {
        Style::default()
            .fg(self.warning)
            .add_modifier(Modifier::BOLD)
    }

    pub fn danger_style(&self) -> Style {
        Style::default()
            .fg(self.danger)
            .add_modifier(Modifier::BOLD)
    }

    pub fn info_style(&self) -> Style {
        Style::default().fg(self.info)
    }

    /// Style for selected items
    pub fn selected_style(&self) -> Style {
        Style::default()
            .fg(self.text_primary)
            .bg(self.selected)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn border_focused_style(&self) -> Style {
        Style::default()
            .fg(self.border_focused)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for numbers and metrics
    pub fn metric_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for dimmed/disabled elements
    pub fn dimmed_style(&self) -> Style {
        Style::default().fg(self.text_disabled)
    }

    /// Foreground style for a record status label
    pub fn status_style(&self, status: &str) -> Style {
        match status {
            "Done" => Style::default().fg(self.chart_done),
            "WIP" => Style::default().fg(self.chart_wip),
            "Todo" => Style::default().fg(self.chart_todo),
            _ => self.dimmed_style(),
        }
    }
}
