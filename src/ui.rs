use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Clear, Widget},
    Frame,
};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::{
    app::{App, LoadState, StatusType},
    features::dashboard::{view_state::short_name, Bucket, DashboardSnapshot, Selection},
    shared::theme::{ModernIcons, ModernTheme},
    widgets::{
        format_label, icon_span, metric_span, modern_block, pad_cell, stacked_bar, ButtonVariant,
        ModernButton, ModernCard, ModernList, ModernListItem, ModernProgressBar,
    },
};

const SIDEBAR_WIDTH: u16 = 24;
const SIDEBAR_COLLAPSED_WIDTH: u16 = 14;
const BAR_LABEL_WIDTH: usize = 12;
const RADAR_LABEL_WIDTH: usize = 10;

/// Draw the whole screen
pub fn draw(f: &mut Frame, app: &App) {
    let theme = &app.theme;

    f.render_widget(
        Block::default().style(Style::default().bg(theme.background)),
        f.size(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header
            Constraint::Min(0),    // Sidebar and page
            Constraint::Length(4), // Footer
        ])
        .split(f.size());

    draw_header(f, chunks[0], app, theme);
    draw_body(f, chunks[1], app, theme);
    draw_footer(f, chunks[2], app, theme);

    if app.config.show_help {
        draw_help_overlay(f, f.size(), app, theme);
    }
}

/// Page title in the current language
fn page_title<'a>(app: &'a App, selection: Selection) -> &'a str {
    match selection {
        Selection::Overview => app.i18n.t("nav.overview"),
        Selection::Database => app.i18n.t("nav.database"),
        Selection::Team(team) => team,
    }
}

fn bucket_label<'a>(app: &'a App, bucket: Bucket) -> &'a str {
    match bucket {
        Bucket::All => app.i18n.t("quarter.all"),
        Bucket::Quarter(q) => q.label(),
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &App, theme: &ModernTheme) {
    let snapshot = app.snapshot();
    let selection = snapshot.view.selection;

    let mut spans = vec![
        icon_span(ModernIcons::OVERVIEW, Style::default().fg(theme.primary)),
        Span::styled(format!(" {}", app.i18n.t("app.title")), theme.header_style()),
        Span::styled(" │ ", theme.border_style()),
        Span::styled(
            page_title(app, selection).to_string(),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" │ ", theme.border_style()),
    ];

    match &app.load_state {
        LoadState::Loading => {
            spans.push(icon_span(ModernIcons::REFRESH, theme.warning_style()));
            spans.push(Span::styled(
                format!(" {}", app.i18n.t("header.loading")),
                theme.warning_style(),
            ));
        }
        LoadState::Failed(_) => {
            spans.push(icon_span(ModernIcons::ERROR, theme.danger_style()));
            spans.push(Span::styled(
                format!(" {}", app.i18n.t("error.title")),
                theme.danger_style(),
            ));
        }
        LoadState::Ready => {
            spans.push(metric_span(snapshot.kpis.total.to_string(), theme));
            spans.push(Span::styled(
                format!(" {}", app.i18n.t("header.records")),
                theme.secondary_text_style(),
            ));
            if let Some(loaded_at) = app.loaded_at {
                spans.push(Span::styled(" │ ", theme.border_style()));
                spans.push(icon_span(ModernIcons::TIME, Style::default().fg(theme.secondary)));
                spans.push(Span::styled(
                    format!(
                        " {} {}",
                        app.i18n.t("header.loaded"),
                        loaded_at.format("%H:%M:%S")
                    ),
                    theme.secondary_text_style(),
                ));
            }
        }
    }

    if let Some(ref status) = app.status_message {
        let (style, icon) = match status.message_type {
            StatusType::Info => (theme.info_style(), "ℹ"),
            StatusType::Success => (theme.success_style(), ModernIcons::DONE),
            StatusType::Error => (theme.danger_style(), ModernIcons::ERROR),
        };
        spans.push(Span::styled(" │ ", theme.border_style()));
        spans.push(Span::styled(format!("{} {}", icon, status.text), style));
    }

    let subtitle = if selection.is_database() {
        app.i18n.t("subtitle.database")
    } else {
        app.i18n.t("subtitle.dashboard")
    };

    let content = Text::from(vec![
        Line::from(spans),
        Line::from(vec![Span::styled(subtitle, theme.secondary_text_style())]),
    ]);

    ModernCard::new(content, theme).render(area, f.buffer_mut());
}

fn draw_body(f: &mut Frame, area: Rect, app: &App, theme: &ModernTheme) {
    let sidebar_width = if app.config.sidebar_collapsed {
        SIDEBAR_COLLAPSED_WIDTH
    } else {
        SIDEBAR_WIDTH
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sidebar_width), Constraint::Min(0)])
        .split(area);

    draw_sidebar(f, columns[0], app, theme);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Period selector
            Constraint::Min(0),    // Page content
        ])
        .split(columns[1]);

    draw_quarter_selector(f, rows[0], app, theme);

    match &app.load_state {
        LoadState::Loading => draw_loading(f, rows[1], app, theme),
        LoadState::Failed(message) => draw_error_panel(f, rows[1], app, message, theme),
        LoadState::Ready if app.snapshot().view.selection.is_database() => {
            draw_table(f, rows[1], app, theme)
        }
        LoadState::Ready => draw_dashboard(f, rows[1], app, theme),
    }
}

fn draw_sidebar(f: &mut Frame, area: Rect, app: &App, theme: &ModernTheme) {
    let collapsed = app.config.sidebar_collapsed;
    let label_width = area.width.saturating_sub(5) as usize;

    let items: Vec<ModernListItem> = Selection::nav_items()
        .into_iter()
        .map(|selection| {
            let (icon, label) = match selection {
                Selection::Overview if collapsed => {
                    (ModernIcons::OVERVIEW, app.i18n.t("nav.overview_short"))
                }
                Selection::Overview => (ModernIcons::OVERVIEW, app.i18n.t("nav.overview")),
                Selection::Database if collapsed => {
                    (ModernIcons::DATABASE, app.i18n.t("nav.database_short"))
                }
                Selection::Database => (ModernIcons::DATABASE, app.i18n.t("nav.database")),
                Selection::Team(team) if collapsed => (ModernIcons::CATEGORY, short_name(team)),
                Selection::Team(team) => (ModernIcons::CATEGORY, team),
            };
            ModernListItem::new(format_label(label, label_width)).icon(icon)
        })
        .collect();

    let selected = app.snapshot().view.selection.nav_index();
    ModernList::new(items, theme)
        .title(app.i18n.t("nav.title"))
        .selected(Some(selected))
        .render(area, f.buffer_mut());
}

fn draw_quarter_selector(f: &mut Frame, area: Rect, app: &App, theme: &ModernTheme) {
    let block = modern_block(Some(app.i18n.t("quarter.title")), theme, false);
    let inner = block.inner(area);
    block.render(area, f.buffer_mut());

    let mut constraints = vec![Constraint::Length(8); Bucket::OPTIONS.len()];
    constraints.push(Constraint::Min(0));
    let slots = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(inner);

    let active = app.snapshot().view.bucket;
    for (slot, bucket) in slots.iter().zip(Bucket::OPTIONS) {
        let variant = if bucket == active {
            ButtonVariant::Primary
        } else {
            ButtonVariant::Subtle
        };
        // One column gap between buttons
        let button_area = Rect {
            width: slot.width.saturating_sub(1),
            ..*slot
        };
        ModernButton::new(bucket_label(app, bucket), theme)
            .variant(variant)
            .render(button_area, f.buffer_mut());
    }
}

fn draw_loading(f: &mut Frame, area: Rect, app: &App, theme: &ModernTheme) {
    let content = Text::from(vec![
        Line::from(""),
        Line::from(vec![
            icon_span(ModernIcons::REFRESH, theme.warning_style()),
            Span::styled(
                format!(" {}", app.i18n.t("header.loading")),
                theme.warning_style(),
            ),
        ]),
        Line::from(vec![Span::styled(
            app.source.to_string(),
            theme.dimmed_style(),
        )]),
    ]);

    ModernCard::new(content, theme).render(area, f.buffer_mut());
}

/// Terminal error state shown until the next successful reload
fn draw_error_panel(f: &mut Frame, area: Rect, app: &App, message: &str, theme: &ModernTheme) {
    let content = Text::from(vec![
        Line::from(""),
        Line::from(vec![
            icon_span(ModernIcons::ERROR, theme.danger_style()),
            Span::styled(format!(" {}", app.i18n.t("error.title")), theme.danger_style()),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled(
            app.i18n.t("error.hint"),
            theme.secondary_text_style(),
        )]),
        Line::from(vec![
            Span::styled(format!("{} ", ModernIcons::BULLET), theme.dimmed_style()),
            Span::styled(app.source.to_string(), theme.info_style()),
        ]),
        Line::from(vec![
            Span::styled(format!("{} ", ModernIcons::BULLET), theme.dimmed_style()),
            Span::styled(message.to_string(), theme.dimmed_style()),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled(
            app.i18n.t("error.retry"),
            theme.warning_style(),
        )]),
    ]);

    ModernCard::new(content, theme)
        .title(app.i18n.t("error.title"))
        .focused(true)
        .render(area, f.buffer_mut());
}

fn draw_dashboard(f: &mut Frame, area: Rect, app: &App, theme: &ModernTheme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // KPI strip
            Constraint::Min(0),    // Charts
        ])
        .split(area);

    draw_kpi_strip(f, rows[0], app, theme);

    let snapshot = app.snapshot();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[1]);

    draw_status_bars(f, columns[0], app, snapshot, theme);

    match &snapshot.radar {
        Some(_) => {
            let right = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(6), Constraint::Min(0)])
                .split(columns[1]);
            draw_composition(f, right[0], app, snapshot, theme);
            draw_radar(f, right[1], app, snapshot, theme);
        }
        None => draw_composition(f, columns[1], app, snapshot, theme),
    }
}

fn draw_kpi_strip(f: &mut Frame, area: Rect, app: &App, theme: &ModernTheme) {
    let kpis = &app.snapshot().kpis;
    let avg = match kpis.avg_hours {
        Some(avg) => format!("~{avg:.1} {}", app.i18n.t("kpi.avg_unit")),
        None => "0".to_string(),
    };

    let cards = [
        (app.i18n.t("kpi.total"), kpis.total.to_string(), theme.accent),
        (app.i18n.t("kpi.hours"), format!("{} h", kpis.hours), theme.chart_effort),
        (app.i18n.t("kpi.avg"), avg, theme.info),
        (app.i18n.t("kpi.done"), kpis.done.to_string(), theme.chart_done),
        (app.i18n.t("kpi.wip"), kpis.wip.to_string(), theme.chart_wip),
    ];

    let slots = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, cards.len() as u32); 5])
        .split(area);

    for (slot, (label, value, color)) in slots.iter().zip(cards) {
        let content = Text::from(vec![
            Line::from(vec![Span::styled(
                value,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )]),
            Line::from(vec![Span::styled(label, theme.secondary_text_style())]),
        ]);
        ModernCard::new(content, theme).render(*slot, f.buffer_mut());
    }
}

fn legend_line<'a>(items: &[(&'a str, Style)], theme: &ModernTheme) -> Line<'a> {
    let mut spans = Vec::new();
    for (label, style) in items {
        spans.push(Span::styled("■ ", *style));
        spans.push(Span::styled(*label, theme.secondary_text_style()));
        spans.push(Span::raw("  "));
    }
    Line::from(spans)
}

/// Stacked Done/WIP/Todo bars, one per team on the overview
fn draw_status_bars(
    f: &mut Frame,
    area: Rect,
    app: &App,
    snapshot: &DashboardSnapshot,
    theme: &ModernTheme,
) {
    let overview = snapshot.radar.is_some();
    let title = if overview {
        app.i18n.t("chart.status_by_team")
    } else {
        app.i18n.t("chart.current_status")
    };

    let done = Style::default().fg(theme.chart_done);
    let wip = Style::default().fg(theme.chart_wip);
    let todo = Style::default().fg(theme.chart_todo);

    let mut lines = vec![
        legend_line(&[("Done", done), ("WIP", wip), ("Todo", todo)], theme),
        Line::from(""),
    ];

    if snapshot.kpis.total == 0 {
        lines.push(Line::from(vec![Span::styled(
            app.i18n.t("chart.no_data"),
            theme.dimmed_style(),
        )]));
    }

    // Bars share one scale so categories compare by volume
    let scale = snapshot.grouped.iter().map(|g| g.count).max().unwrap_or(0);
    let bar_width = (area.width as usize).saturating_sub(BAR_LABEL_WIDTH + 16).max(4);

    for group in &snapshot.grouped {
        let label = if overview {
            group.label.as_str()
        } else {
            app.i18n.t("chart.current_status")
        };

        let mut spans = vec![Span::styled(
            pad_cell(label, BAR_LABEL_WIDTH),
            theme.secondary_text_style(),
        )];
        spans.extend(stacked_bar(
            &[(group.done, done), (group.wip, wip), (group.todo, todo)],
            scale,
            bar_width,
            theme.dimmed_style(),
        ));
        spans.push(Span::styled(
            format!(" {:>3} · {:>4}h", group.count, group.hours),
            theme.info_style(),
        ));
        lines.push(Line::from(spans));
    }

    ModernCard::new(Text::from(lines), theme)
        .title(title)
        .render(area, f.buffer_mut());
}

/// Nuevos versus Mejoras share of the filtered set
fn draw_composition(
    f: &mut Frame,
    area: Rect,
    app: &App,
    snapshot: &DashboardSnapshot,
    theme: &ModernTheme,
) {
    let block = modern_block(Some(app.i18n.t("chart.composition")), theme, false);
    let inner = block.inner(area);
    block.render(area, f.buffer_mut());

    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let composition = snapshot.composition;
    let total = composition.total();
    let share = |n: usize| {
        if total == 0 {
            0.0
        } else {
            n as f64 / total as f64 * 100.0
        }
    };

    let nuevos_label = format!("{} {}", app.i18n.t("chart.nuevos"), composition.nuevos);
    let mejoras_label = format!("{} {}", app.i18n.t("chart.mejoras"), composition.mejoras);
    let series = [
        (nuevos_label, share(composition.nuevos), theme.chart_nuevo),
        (mejoras_label, share(composition.mejoras), theme.chart_mejora),
    ];

    for (i, (label, percentage, color)) in series.iter().enumerate() {
        let y = inner.y + (i as u16) * 2;
        if y >= inner.y + inner.height {
            break;
        }
        let bar_area = Rect {
            x: inner.x,
            y,
            width: inner.width,
            height: 1,
        };
        ModernProgressBar::new(*percentage, theme)
            .label(label)
            .color(*color)
            .render(bar_area, f.buffer_mut());
    }
}

/// Volume and effort per team, each scaled to its own maximum
fn draw_radar(
    f: &mut Frame,
    area: Rect,
    app: &App,
    snapshot: &DashboardSnapshot,
    theme: &ModernTheme,
) {
    let volume = Style::default().fg(theme.chart_volume);
    let effort = Style::default().fg(theme.chart_effort);

    let mut lines = vec![
        legend_line(
            &[
                (app.i18n.t("chart.volume"), volume),
                (app.i18n.t("chart.effort"), effort),
            ],
            theme,
        ),
        Line::from(""),
    ];

    let bar_width = ((area.width as usize).saturating_sub(RADAR_LABEL_WIDTH + 24) / 2).max(4);

    if let Some(radar) = &snapshot.radar {
        for point in &radar.points {
            let mut spans = vec![Span::styled(
                pad_cell(&point.label, RADAR_LABEL_WIDTH),
                theme.secondary_text_style(),
            )];
            spans.extend(stacked_bar(
                &[(point.volume.round() as usize, volume)],
                100,
                bar_width,
                theme.dimmed_style(),
            ));
            spans.push(Span::styled(format!(" {:>3.0} ", point.volume), volume));
            spans.extend(stacked_bar(
                &[(point.effort.round() as usize, effort)],
                100,
                bar_width,
                theme.dimmed_style(),
            ));
            spans.push(Span::styled(format!(" {:>3.0}", point.effort), effort));
            spans.push(Span::styled(
                format!("  ({}, {}h)", point.count, point.hours),
                theme.dimmed_style(),
            ));
            lines.push(Line::from(spans));
        }
    }

    ModernCard::new(Text::from(lines), theme)
        .title(app.i18n.t("chart.radar"))
        .render(area, f.buffer_mut());
}

/// Column widths of the record table, name takes the slack
const TABLE_COLUMNS: [usize; 6] = [12, 16, 4, 8, 8, 6];

fn table_row(name_width: usize, cells: [&str; 7]) -> String {
    let mut row = pad_cell(cells[0], name_width);
    for (cell, width) in cells[1..].iter().zip(TABLE_COLUMNS) {
        row.push(' ');
        row.push_str(&pad_cell(cell, width));
    }
    row
}

fn draw_table(f: &mut Frame, area: Rect, app: &App, theme: &ModernTheme) {
    let snapshot = app.snapshot();
    let records = &snapshot.filtered;

    let fixed: usize = TABLE_COLUMNS.iter().sum::<usize>() + TABLE_COLUMNS.len();
    let name_width = (area.width as usize).saturating_sub(fixed + 2).max(10);
    let visible = area.height.saturating_sub(3) as usize;

    let header = table_row(
        name_width,
        [
            app.i18n.t("table.name"),
            app.i18n.t("table.date"),
            app.i18n.t("table.team"),
            app.i18n.t("table.quarter"),
            app.i18n.t("table.status"),
            app.i18n.t("table.type"),
            app.i18n.t("table.hours"),
        ],
    );
    let mut lines = vec![Line::from(vec![Span::styled(header, theme.header_style())])];

    if records.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![Span::styled(
            app.i18n.t("table.empty"),
            theme.secondary_text_style(),
        )]));
    }

    for record in records.iter().skip(app.table_offset).take(visible) {
        let hours = record.hours.to_string();
        let row = table_row(
            name_width,
            [
                record.name.as_str(),
                record.date_text.as_str(),
                record.team.as_str(),
                record.quarter.label(),
                record.status.as_str(),
                record.work_type.as_str(),
                hours.as_str(),
            ],
        );

        // Status column keeps its chart color
        let status_start = name_width + 1 + TABLE_COLUMNS[..3].iter().map(|w| w + 1).sum::<usize>();
        let (before, rest) = split_at_column(&row, status_start);
        let (status, after) = split_at_column(rest, TABLE_COLUMNS[3]);
        lines.push(Line::from(vec![
            Span::styled(before.to_string(), Style::default().fg(theme.text_primary)),
            Span::styled(status.to_string(), theme.status_style(record.status.as_str())),
            Span::styled(after.to_string(), theme.secondary_text_style()),
        ]));
    }

    let end = (app.table_offset + visible).min(records.len());
    let title = format!(
        "{} {}-{}/{}",
        app.i18n.t("nav.database"),
        if records.is_empty() { 0 } else { app.table_offset + 1 },
        end,
        records.len()
    );

    ModernCard::new(Text::from(lines), theme)
        .title(&title)
        .render(area, f.buffer_mut());
}

/// Split a padded row at a display column
fn split_at_column(text: &str, column: usize) -> (&str, &str) {
    let mut width = 0;
    for (index, grapheme) in text.grapheme_indices(true) {
        if width >= column {
            return text.split_at(index);
        }
        width += grapheme.width();
    }
    (text, "")
}

fn draw_footer(f: &mut Frame, area: Rect, app: &App, theme: &ModernTheme) {
    let key = Style::default()
        .fg(theme.accent)
        .add_modifier(Modifier::BOLD);
    let label = theme.secondary_text_style();
    let sep = || Span::styled(" | ", theme.secondary_text_style());

    let content = Text::from(vec![
        Line::from(vec![
            Span::styled(app.i18n.t("controls.navigation"), label),
            Span::styled(" j/k ↑↓", key),
            sep(),
            Span::styled(app.i18n.t("controls.pages"), label),
            Span::styled(" g/d", key),
            sep(),
            Span::styled(app.i18n.t("controls.quarter"), label),
            Span::styled(" a 1-4 Tab", key),
            sep(),
            Span::styled(app.i18n.t("controls.sidebar"), label),
            Span::styled(" b", key),
        ]),
        Line::from(vec![
            Span::styled(app.i18n.t("controls.theme"), label),
            Span::styled(" t", key),
            Span::styled(format!(" ({})", app.config.theme_display()), theme.info_style()),
            sep(),
            Span::styled(app.i18n.t("controls.language"), label),
            Span::styled(" l", key),
            Span::styled(
                format!(" ({})", app.i18n.language().code().to_uppercase()),
                theme.info_style(),
            ),
            sep(),
            Span::styled("r", key),
            Span::styled(format!(" {}", app.i18n.t("controls.reload")), label),
            sep(),
            Span::styled(app.i18n.t("controls.help"), label),
            Span::styled(" ?", key),
            sep(),
            Span::styled("q", theme.danger_style()),
            Span::styled(format!(" {}", app.i18n.t("controls.quit")), label),
        ]),
    ]);

    ModernCard::new(content, theme).render(area, f.buffer_mut());
}

/// Draw help overlay with explanations
fn draw_help_overlay(f: &mut Frame, area: Rect, app: &App, theme: &ModernTheme) {
    // Create centered popup area
    let popup_area = Rect {
        x: area.width / 6,
        y: area.height / 6,
        width: area.width * 2 / 3,
        height: area.height * 2 / 3,
    };

    f.render_widget(Clear, popup_area);

    let sections: [(&str, &[&str]); 3] = [
        (
            "help.views.title",
            &["help.views.line1", "help.views.line2", "help.views.line3"],
        ),
        (
            "help.keys.title",
            &[
                "help.keys.line1",
                "help.keys.line2",
                "help.keys.line3",
                "help.keys.line4",
            ],
        ),
        (
            "help.data.title",
            &["help.data.line1", "help.data.line2", "help.data.line3"],
        ),
    ];

    let mut lines = Vec::new();
    for (title, body) in sections {
        lines.push(Line::from(vec![Span::styled(
            app.i18n.t(title),
            theme.header_style(),
        )]));
        for line in body {
            lines.push(Line::from(vec![Span::styled(
                app.i18n.t(line),
                theme.secondary_text_style(),
            )]));
        }
        lines.push(Line::from(""));
    }

    ModernCard::new(Text::from(lines), theme)
        .title(app.i18n.t("help.title"))
        .focused(true)
        .render(popup_area, f.buffer_mut());
}
