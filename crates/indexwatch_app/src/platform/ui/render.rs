use indexwatch_core::{
    AppViewModel, BadgeStyle, MessageKind, StatsView, TableView, TransientMessage, UrlRowView,
};
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table};
use ratatui::Frame;

use super::constants::*;
use super::layout::{actions_columns, prompt_area, split, stat_cells};

pub fn render(frame: &mut Frame, view: &AppViewModel) {
    let layout = split(frame.area(), view.message.is_some(), view.stats.is_some());

    render_header(frame, layout.header);
    if let (Some(area), Some(message)) = (layout.message, view.message.as_ref()) {
        render_message(frame, area, message);
    }
    if let (Some(area), Some(stats)) = (layout.stats, view.stats.as_ref()) {
        render_stats(frame, area, stats);
    }
    render_actions(frame, layout.actions, view);
    render_table(frame, layout.table, &view.table);
    render_footer(frame, layout.footer, view);

    if let Some(input) = view.upload_prompt.as_deref() {
        render_upload_prompt(frame, input);
    }
}

fn render_header(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            TITLE,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(SUBTITLE, Style::default().fg(COLOR_MUTED))),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn message_color(kind: MessageKind) -> Color {
    match kind {
        MessageKind::Success => COLOR_SUCCESS,
        MessageKind::Error => COLOR_ERROR,
        MessageKind::Info => COLOR_INFO,
    }
}

fn render_message(frame: &mut Frame, area: Rect, message: &TransientMessage) {
    let color = message_color(message.kind);
    let paragraph = Paragraph::new(Span::styled(
        message.text.as_str(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );
    frame.render_widget(paragraph, area);
}

fn render_stats(frame: &mut Frame, area: Rect, stats: &StatsView) {
    let cells = [
        ("Total URLs", stats.total, Color::White),
        ("Indexed", stats.indexed, COLOR_SUCCESS),
        ("Not Indexed", stats.not_indexed, COLOR_ERROR),
        ("Invalid", stats.invalid, COLOR_NEUTRAL),
        ("Pending", stats.pending, COLOR_INFO),
    ];
    for ((label, value, color), cell_area) in cells.into_iter().zip(stat_cells(area)) {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            value.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(COLOR_MUTED))
                .title(Span::styled(label, Style::default().fg(COLOR_MUTED))),
        );
        frame.render_widget(paragraph, cell_area);
    }
}

fn control(key: char, label: &str, enabled: bool) -> Span<'static> {
    let style = if enabled {
        Style::default()
            .fg(COLOR_ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(COLOR_MUTED)
            .add_modifier(Modifier::DIM)
    };
    Span::styled(format!("[{key}] {label}"), style)
}

fn render_actions(frame: &mut Frame, area: Rect, view: &AppViewModel) {
    let [schedule_area, controls_area] = actions_columns(area);
    let mut schedule = vec![Line::from(Span::styled(
        SCHEDULE_HINT,
        Style::default().fg(COLOR_MUTED),
    ))];
    if let Some(last_check) = view.stats.as_ref().and_then(|s| s.last_check.as_deref()) {
        schedule.push(Line::from(Span::styled(
            format!("Last checked: {last_check}"),
            Style::default().fg(COLOR_MUTED),
        )));
    }
    frame.render_widget(Paragraph::new(schedule), schedule_area);

    let upload_label = if view.uploading {
        "Uploading..."
    } else {
        "Upload CSV"
    };
    let controls = Line::from(vec![
        control(KEY_UPLOAD, upload_label, view.upload_enabled),
        Span::raw("  "),
        control(KEY_DOWNLOAD, "Download Report", true),
        Span::raw("  "),
        control(KEY_CHECK, view.check_label, view.check_enabled),
        Span::raw("  "),
        control(KEY_QUIT, "Quit", true),
    ]);
    frame.render_widget(
        Paragraph::new(controls).alignment(Alignment::Right),
        controls_area,
    );
}

pub(crate) fn badge_color(badge: BadgeStyle) -> Color {
    match badge {
        BadgeStyle::Success => COLOR_SUCCESS,
        BadgeStyle::Error => COLOR_ERROR,
        BadgeStyle::Neutral => COLOR_NEUTRAL,
        BadgeStyle::Info => COLOR_INFO,
    }
}

fn table_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_MUTED))
}

fn render_table(frame: &mut Frame, area: Rect, table: &TableView) {
    let rows = match table {
        TableView::Loading => {
            let placeholder = Paragraph::new("Loading URLs...")
                .alignment(Alignment::Center)
                .style(Style::default().fg(COLOR_ACCENT))
                .block(table_block());
            frame.render_widget(placeholder, area);
            return;
        }
        TableView::Empty => {
            let placeholder = Paragraph::new("No URLs found")
                .alignment(Alignment::Center)
                .style(Style::default().fg(COLOR_MUTED))
                .block(table_block());
            frame.render_widget(placeholder, area);
            return;
        }
        TableView::Rows(rows) => rows,
    };

    let header = Row::new(["#", "URL", "Status", "Last Checked", "Notes"]).style(
        Style::default()
            .fg(COLOR_MUTED)
            .add_modifier(Modifier::BOLD),
    );
    let widths = [
        Constraint::Length(4),
        Constraint::Percentage(45),
        Constraint::Length(14),
        Constraint::Length(24),
        Constraint::Min(8),
    ];
    let widget = Table::new(rows.iter().map(table_row), widths)
        .header(header)
        .column_spacing(1)
        .block(table_block());
    frame.render_widget(widget, area);
}

fn table_row(row: &UrlRowView) -> Row<'static> {
    let url_style = if row.is_link {
        Style::default()
            .fg(COLOR_ACCENT)
            .add_modifier(Modifier::UNDERLINED)
    } else {
        Style::default()
    };
    let badge = badge_color(row.badge);
    Row::new(vec![
        Cell::from(row.index.to_string()).style(Style::default().fg(COLOR_MUTED)),
        Cell::from(row.url.clone()).style(url_style),
        Cell::from(row.status.clone())
            .style(Style::default().fg(badge).add_modifier(Modifier::BOLD)),
        Cell::from(row.last_checked.clone()).style(Style::default().fg(COLOR_MUTED)),
        Cell::from(row.notes.clone()).style(Style::default().fg(COLOR_MUTED)),
    ])
}

fn render_footer(frame: &mut Frame, area: Rect, view: &AppViewModel) {
    let lines = vec![
        Line::from(Span::styled(
            "URL Indexation Checker Dashboard",
            Style::default().fg(COLOR_MUTED),
        )),
        Line::from(Span::styled(
            view.footer.as_str(),
            Style::default().fg(COLOR_MUTED),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_upload_prompt(frame: &mut Frame, input: &str) {
    let area = prompt_area(frame.area());
    frame.render_widget(Clear, area);
    let paragraph = Paragraph::new(Line::from(vec![
        Span::raw(input.to_string()),
        Span::styled("_", Style::default().fg(COLOR_ACCENT)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(COLOR_ACCENT))
            .title(" Upload CSV: Enter to upload, Esc to cancel "),
    );
    frame.render_widget(paragraph, area);
}
