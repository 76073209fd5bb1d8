use crate::UrlRecord;

/// Shown in the notes column when a record has none.
pub const NOTES_PLACEHOLDER: &str = "-";

/// Classification of the status string reported by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexStatus {
    Indexed,
    NotIndexed,
    InvalidUrl,
    Other(String),
}

impl IndexStatus {
    pub fn from_label(label: &str) -> Self {
        match label {
            "Indexed" => IndexStatus::Indexed,
            "Not Indexed" => IndexStatus::NotIndexed,
            "Invalid URL" => IndexStatus::InvalidUrl,
            other => IndexStatus::Other(other.to_string()),
        }
    }

    pub fn badge(&self) -> BadgeStyle {
        match self {
            IndexStatus::Indexed => BadgeStyle::Success,
            IndexStatus::NotIndexed => BadgeStyle::Error,
            IndexStatus::InvalidUrl => BadgeStyle::Neutral,
            IndexStatus::Other(_) => BadgeStyle::Info,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeStyle {
    Success,
    Error,
    Neutral,
    /// Fallback for statuses the dashboard does not recognize (e.g. "Pending").
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableView {
    Loading,
    Empty,
    Rows(Vec<UrlRowView>),
}

impl TableView {
    pub fn row_count(&self) -> usize {
        match self {
            TableView::Rows(rows) => rows.len(),
            TableView::Loading | TableView::Empty => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRowView {
    /// 1-based position in the list.
    pub index: usize,
    pub url: String,
    /// True when `url` is an absolute http(s) URL that can be opened.
    pub is_link: bool,
    pub status: String,
    pub badge: BadgeStyle,
    pub last_checked: String,
    pub notes: String,
}

/// Loading wins over contents; an empty list renders a placeholder.
pub fn table_view(urls: &[UrlRecord], loading: bool) -> TableView {
    if loading {
        return TableView::Loading;
    }
    if urls.is_empty() {
        return TableView::Empty;
    }
    TableView::Rows(
        urls.iter()
            .enumerate()
            .map(|(i, record)| UrlRowView {
                index: i + 1,
                url: record.url.clone(),
                is_link: is_openable(&record.url),
                status: record.status.clone(),
                badge: IndexStatus::from_label(&record.status).badge(),
                last_checked: record.last_checked.clone(),
                notes: match record.notes.as_deref().map(str::trim) {
                    Some(notes) if !notes.is_empty() => notes.to_string(),
                    _ => NOTES_PLACEHOLDER.to_string(),
                },
            })
            .collect(),
    )
}

fn is_openable(raw: &str) -> bool {
    url::Url::parse(raw)
        .map(|parsed| matches!(parsed.scheme(), "http" | "https"))
        .unwrap_or(false)
}
