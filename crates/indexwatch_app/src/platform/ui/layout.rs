use ratatui::layout::{Constraint, Layout, Rect};

/// Screen regions. Optional panels collapse to nothing when absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardLayout {
    pub header: Rect,
    pub message: Option<Rect>,
    pub stats: Option<Rect>,
    pub actions: Rect,
    pub table: Rect,
    pub footer: Rect,
}

pub fn split(area: Rect, has_message: bool, has_stats: bool) -> DashboardLayout {
    let [header, message, stats, actions, table, footer] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(if has_message { 3 } else { 0 }),
        Constraint::Length(if has_stats { 4 } else { 0 }),
        Constraint::Length(3),
        Constraint::Min(5),
        Constraint::Length(2),
    ])
    .areas(area);

    DashboardLayout {
        header,
        message: has_message.then_some(message),
        stats: has_stats.then_some(stats),
        actions,
        table,
        footer,
    }
}

/// Five equal cells for the stats counters.
pub fn stat_cells(area: Rect) -> [Rect; 5] {
    Layout::horizontal([Constraint::Ratio(1, 5); 5]).areas(area)
}

/// Schedule hint on the left, controls on the right.
pub fn actions_columns(area: Rect) -> [Rect; 2] {
    Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)]).areas(area)
}

/// A centered box for the upload prompt, clamped to the screen.
pub fn prompt_area(area: Rect) -> Rect {
    let width = 72u16.min(area.width.saturating_sub(4));
    let height = 3u16.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}
