//! Smoke tests for the widgets module

#[cfg(test)]
mod tests {
    use crate::{shared::theme::*, widgets::*};
    use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};
    use unicode_width::UnicodeWidthStr;

    fn bar_text(spans: &[ratatui::text::Span<'_>]) -> String {
        spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_format_label_basic() {
        assert_eq!(format_label("Food", 10), "Food");
        assert_eq!(format_label("Quick Commerce", 8), "Quick...");
    }

    #[test]
    fn test_format_label_wide_chars() {
        let label = format_label("日本語のプロジェクト", 9);
        assert!(label.width() <= 9);
        assert!(label.ends_with("..."));
    }

    #[test]
    fn test_pad_cell_is_exact_width() {
        assert_eq!(pad_cell("Q1", 4), "Q1  ");
        assert_eq!(pad_cell("Martechs & Ads", 10).width(), 10);
        assert_eq!(pad_cell("", 3), "   ");
    }

    #[test]
    fn test_stacked_bar_fills_proportionally() {
        let spans = stacked_bar(
            &[(2, Style::default()), (1, Style::default()), (1, Style::default())],
            4,
            8,
            Style::default(),
        );
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].content.chars().count(), 4);
        assert_eq!(spans[1].content.chars().count(), 2);
        assert_eq!(spans[2].content.chars().count(), 2);
    }

    #[test]
    fn test_stacked_bar_pads_and_never_overflows() {
        let spans = stacked_bar(&[(1, Style::default())], 4, 10, Style::default());
        let text = bar_text(&spans);
        assert_eq!(text.chars().count(), 10);
        assert!(text.ends_with(ProgressChars::EMPTY));

        let spans = stacked_bar(&[(9, Style::default())], 4, 10, Style::default());
        assert_eq!(bar_text(&spans).chars().count(), 10);
    }

    #[test]
    fn test_stacked_bar_empty_scale() {
        let spans = stacked_bar(&[(0, Style::default())], 0, 5, Style::default());
        assert_eq!(bar_text(&spans), ProgressChars::EMPTY.to_string().repeat(5));
    }

    #[test]
    fn test_button_renders_centered_label() {
        let theme = ModernTheme::dark();
        let area = Rect::new(0, 0, 6, 1);
        let mut buf = Buffer::empty(area);

        ModernButton::new("Q1", &theme)
            .variant(ButtonVariant::Subtle)
            .render(area, &mut buf);

        assert_eq!(buf.get(2, 0).symbol, "Q");
        assert_eq!(buf.get(3, 0).symbol, "1");
        assert_eq!(buf.get(0, 0).bg, theme.surface);
    }

    #[test]
    fn test_progress_bar_fill() {
        let theme = ModernTheme::dark();
        let area = Rect::new(0, 0, 10, 1);
        let mut buf = Buffer::empty(area);

        ModernProgressBar::new(50.0, &theme)
            .show_percentage(false)
            .color(theme.chart_nuevo)
            .render(area, &mut buf);

        assert_eq!(buf.get(0, 0).fg, theme.chart_nuevo);
        assert_eq!(buf.get(9, 0).symbol, ProgressChars::EMPTY.to_string());
    }
}
