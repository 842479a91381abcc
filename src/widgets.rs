use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::shared::theme::{ModernTheme, ProgressChars};

/// Helper function to render text with proper Unicode support
/// Returns the number of columns (visual width) consumed
fn render_text_unicode_aware(
    text: &str,
    buf: &mut Buffer,
    x: u16,
    y: u16,
    max_x: u16,
    style: Style,
) -> u16 {
    let mut current_x = x;

    for grapheme in text.graphemes(true) {
        let width = grapheme.width();

        if current_x + width as u16 > max_x {
            break;
        }

        let cell = buf.get_mut(current_x, y);
        cell.set_symbol(grapheme);
        cell.set_style(style);

        current_x += width as u16;

        // For zero-width graphemes, ensure we advance at least one position
        if width == 0 && current_x == x {
            current_x += 1;
        }
    }

    current_x - x
}

/// Bordered card holding a block of text
pub struct ModernCard<'a> {
    title: Option<&'a str>,
    content: Text<'a>,
    theme: &'a ModernTheme,
    focused: bool,
}

impl<'a> ModernCard<'a> {
    pub fn new(content: Text<'a>, theme: &'a ModernTheme) -> Self {
        Self {
            title: None,
            content,
            theme,
            focused: false,
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl<'a> Widget for ModernCard<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = modern_block(self.title, self.theme, self.focused);

        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.content)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

/// Single-row bar with a centered label overlay
pub struct ModernProgressBar<'a> {
    percentage: f64,
    label: Option<&'a str>,
    theme: &'a ModernTheme,
    show_percentage: bool,
    color: Option<Color>,
}

impl<'a> ModernProgressBar<'a> {
    pub fn new(percentage: f64, theme: &'a ModernTheme) -> Self {
        Self {
            percentage: percentage.clamp(0.0, 100.0),
            label: None,
            theme,
            show_percentage: true,
            color: None,
        }
    }

    pub fn label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }

    pub fn show_percentage(mut self, show: bool) -> Self {
        self.show_percentage = show;
        self
    }

    /// Fill color, the theme accent when unset
    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

impl<'a> Widget for ModernProgressBar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 3 || area.height < 1 {
            return;
        }

        let progress_style = Style::default()
            .fg(self.color.unwrap_or(self.theme.accent))
            .add_modifier(Modifier::BOLD);

        // Calculate filled width
        let progress_width = area.width as f64 * (self.percentage / 100.0);
        let filled_chars = progress_width.floor() as u16;
        let remaining_width = progress_width - filled_chars as f64;

        for x in 0..area.width {
            let cell = buf.get_mut(area.x + x, area.y);

            if x < filled_chars {
                cell.set_char(ProgressChars::FILLED);
                cell.set_style(progress_style);
            } else if x == filled_chars && remaining_width > 0.5 {
                cell.set_char(ProgressChars::PARTIAL);
                cell.set_style(progress_style);
            } else {
                cell.set_char(ProgressChars::EMPTY);
                cell.set_style(self.theme.dimmed_style());
            }
        }

        let overlay_text = match (self.label, self.show_percentage) {
            (Some(label), true) => format!("{} {:.1}%", label, self.percentage),
            (Some(label), false) => label.to_string(),
            (None, true) => format!("{:.1}%", self.percentage),
            (None, false) => String::new(),
        };

        if !overlay_text.is_empty() {
            let text_width = overlay_text.width();
            if text_width <= area.width as usize {
                let x_offset = (area.width as usize - text_width) / 2;
                render_text_unicode_aware(
                    &overlay_text,
                    buf,
                    area.x + x_offset as u16,
                    area.y,
                    area.x + area.width,
                    Style::default().fg(self.theme.text_primary),
                );
            }
        }
    }
}

/// Bordered list with a highlighted row
pub struct ModernList<'a> {
    items: Vec<ModernListItem<'a>>,
    selected: Option<usize>,
    theme: &'a ModernTheme,
    title: Option<&'a str>,
}

pub struct ModernListItem<'a> {
    text: Line<'a>,
    icon: Option<&'a str>,
}

impl<'a> ModernListItem<'a> {
    pub fn new<T: Into<Line<'a>>>(text: T) -> Self {
        Self {
            text: text.into(),
            icon: None,
        }
    }

    pub fn icon(mut self, icon: &'a str) -> Self {
        self.icon = Some(icon);
        self
    }
}

impl<'a> ModernList<'a> {
    pub fn new(items: Vec<ModernListItem<'a>>, theme: &'a ModernTheme) -> Self {
        Self {
            items,
            selected: None,
            theme,
            title: None,
        }
    }

    pub fn selected(mut self, index: Option<usize>) -> Self {
        self.selected = index;
        self
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }
}

impl<'a> Widget for ModernList<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = modern_block(self.title, self.theme, false);

        let inner = block.inner(area);
        block.render(area, buf);

        for (i, item) in self.items.iter().enumerate() {
            if i >= inner.height as usize {
                break;
            }

            let y = inner.y + i as u16;
            let mut x = inner.x;
            let is_selected = Some(i) == self.selected;

            let item_style = if is_selected {
                self.theme.selected_style()
            } else {
                self.theme.secondary_text_style()
            };

            // Highlight the whole row
            if is_selected {
                for bg_x in inner.x..inner.x + inner.width {
                    buf.get_mut(bg_x, y).set_style(item_style);
                }
            }

            if let Some(icon) = item.icon {
                let consumed =
                    render_text_unicode_aware(icon, buf, x, y, inner.x + inner.width, item_style);
                x += consumed;
                if x < inner.x + inner.width {
                    buf.get_mut(x, y).set_char(' ');
                    x += 1;
                }
            }

            for span in &item.text.spans {
                let consumed = render_text_unicode_aware(
                    &span.content,
                    buf,
                    x,
                    y,
                    inner.x + inner.width,
                    span.style.patch(item_style),
                );
                x += consumed;
            }
        }
    }
}

/// Filled button, used for the period selector
pub struct ModernButton<'a> {
    text: &'a str,
    theme: &'a ModernTheme,
    variant: ButtonVariant,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ButtonVariant {
    /// Active option
    Primary,
    /// Inactive option
    Subtle,
}

impl<'a> ModernButton<'a> {
    pub fn new(text: &'a str, theme: &'a ModernTheme) -> Self {
        Self {
            text,
            theme,
            variant: ButtonVariant::Primary,
        }
    }

    pub fn variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }
}

impl<'a> Widget for ModernButton<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 3 || area.height < 1 {
            return;
        }

        let button_style = match self.variant {
            ButtonVariant::Primary => Style::default()
                .fg(self.theme.text_primary)
                .bg(self.theme.primary)
                .add_modifier(Modifier::BOLD),
            ButtonVariant::Subtle => Style::default()
                .fg(self.theme.text_secondary)
                .bg(self.theme.surface),
        };

        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                let cell = buf.get_mut(x, y);
                cell.set_char(' ');
                cell.set_style(button_style);
            }
        }

        // Render text centered
        let text_width = self.text.width();
        if text_width <= area.width as usize {
            let x_offset = (area.width as usize - text_width) / 2;
            let y_offset = area.height / 2;

            render_text_unicode_aware(
                self.text,
                buf,
                area.x + x_offset as u16,
                area.y + y_offset,
                area.x + area.width,
                button_style,
            );
        }
    }
}

/// Helper function to create a styled block
pub fn modern_block<'a>(
    title: Option<&'a str>,
    theme: &'a ModernTheme,
    focused: bool,
) -> Block<'a> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            theme.border_focused_style()
        } else {
            theme.border_style()
        });

    if let Some(title) = title {
        block = block.title(title);
    }

    block
}

/// Create a styled icon span
pub fn icon_span<'a>(icon: &'a str, style: Style) -> Span<'a> {
    Span::styled(icon, style)
}

/// Create a metric display span (for numbers)
pub fn metric_span<'a>(text: String, theme: &'a ModernTheme) -> Span<'a> {
    Span::styled(text, theme.metric_style())
}

/// Build a horizontal stacked bar `width` columns wide for a scale of
/// `scale_max`. Segment boundaries are rounded on the cumulative count so the
/// filled part never exceeds `width`; the rest is drawn with `empty_style`.
pub fn stacked_bar(
    segments: &[(usize, Style)],
    scale_max: usize,
    width: usize,
    empty_style: Style,
) -> Vec<Span<'static>> {
    let scale_max = scale_max.max(1);
    let mut spans = Vec::with_capacity(segments.len() + 1);
    let mut cumulative = 0usize;
    let mut drawn = 0usize;

    for (count, style) in segments {
        cumulative += count;
        let boundary = ((cumulative as f64 / scale_max as f64) * width as f64).round() as usize;
        let boundary = boundary.min(width);
        if boundary > drawn {
            spans.push(Span::styled(
                ProgressChars::FILLED.to_string().repeat(boundary - drawn),
                *style,
            ));
            drawn = boundary;
        }
    }

    if drawn < width {
        spans.push(Span::styled(
            ProgressChars::EMPTY.to_string().repeat(width - drawn),
            empty_style,
        ));
    }

    spans
}

/// Truncate a label to `max_width` columns, appending "..." when cut.
/// Handles Unicode characters properly.
pub fn format_label(label: &str, max_width: usize) -> String {
    if label.width() <= max_width {
        label.to_string()
    } else {
        let mut result = String::new();
        let mut current_width = 0;
        let ellipsis = "...";
        let target_width = max_width.saturating_sub(ellipsis.width());

        for grapheme in label.graphemes(true) {
            let grapheme_width = grapheme.width();
            if current_width + grapheme_width > target_width {
                break;
            }
            result.push_str(grapheme);
            current_width += grapheme_width;
        }

        result.push_str(ellipsis);
        result
    }
}

/// Fit a cell to exactly `width` columns: truncated, then right-padded
pub fn pad_cell(text: &str, width: usize) -> String {
    let mut cell = format_label(text, width);
    let used = cell.width();
    if used < width {
        cell.push_str(&" ".repeat(width - used));
    }
    cell
}
