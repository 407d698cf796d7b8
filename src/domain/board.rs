use crate::domain::card::ColumnId;
use crate::error::{DragError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Configuration for a kanban board column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Source columns allowed to drop into this one. `None` accepts from anywhere.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accept_from: Option<Vec<ColumnId>>,
    /// Capacity for cards arriving from other columns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_cards: Option<usize>,
    #[serde(default)]
    pub collapsible: bool,
    #[serde(default)]
    pub collapsed: bool,
}

impl Column {
    pub fn new(id: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            color: None,
            accept_from: None,
            max_cards: None,
            collapsible: false,
            collapsed: false,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn accept_from<I, C>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<ColumnId>,
    {
        self.accept_from = Some(sources.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_max_cards(mut self, max_cards: usize) -> Self {
        self.max_cards = Some(max_cards);
        self
    }

    pub fn collapsible(mut self) -> Self {
        self.collapsible = true;
        self
    }

    /// Marks the column collapsed on first render (implies collapsible)
    pub fn collapsed(mut self) -> Self {
        self.collapsible = true;
        self.collapsed = true;
        self
    }

    /// Checks the source allowlist for a card coming from `source`
    pub fn accepts_from(&self, source: &ColumnId) -> bool {
        self.accept_from
            .as_ref()
            .map(|allowed| allowed.contains(source))
            .unwrap_or(true)
    }
}

/// Board configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BoardConfig {
    pub columns: Vec<Column>,
    pub column_width: f64,
    pub column_gap: f64,
    pub card_gap: f64,
    pub board_padding: f64,
    pub drag_enabled: bool,
    /// Passed through to the rendering layer, unused by the engine
    pub haptic_feedback: bool,
}

impl BoardConfig {
    pub const DEFAULT_COLUMN_WIDTH: f64 = 280.0;
    pub const DEFAULT_COLUMN_GAP: f64 = 16.0;
    pub const DEFAULT_CARD_GAP: f64 = 12.0;
    pub const DEFAULT_BOARD_PADDING: f64 = 16.0;

    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            ..Self::default()
        }
    }

    /// Parses a JSON board configuration and validates it
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks column ids are unique, allowlists reference known columns and
    /// dimensions are usable
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(&column.id) {
                return Err(DragError::ConfigError(format!(
                    "duplicate column id '{}'",
                    column.id
                )));
            }
        }

        for column in &self.columns {
            if let Some(unknown) = column
                .accept_from
                .iter()
                .flatten()
                .find(|source| !seen.contains(source))
            {
                return Err(DragError::ConfigError(format!(
                    "column '{}' accepts from unknown column '{}'",
                    column.id, unknown
                )));
            }
        }

        if self.column_width.is_nan() || self.column_width <= 0.0 {
            return Err(DragError::ConfigError(format!(
                "column width must be positive, got {}",
                self.column_width
            )));
        }

        for (name, value) in [
            ("column gap", self.column_gap),
            ("card gap", self.card_gap),
            ("board padding", self.board_padding),
        ] {
            if value.is_nan() || value < 0.0 {
                return Err(DragError::ConfigError(format!(
                    "{} must not be negative, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }

    pub fn find_column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|col| &col.id == id)
    }

    /// Like [`find_column`](Self::find_column) but reports unknown ids as an error
    pub fn column(&self, id: &ColumnId) -> Result<&Column> {
        self.find_column(id)
            .ok_or_else(|| DragError::ColumnNotFound(id.to_string()))
    }

    /// Total width of a board laid out with `column_count` columns
    pub fn board_width(&self, column_count: usize) -> f64 {
        let padding = self.board_padding * 2.0;
        if column_count == 0 {
            return padding;
        }
        let count = column_count as f64;
        count * self.column_width + (count - 1.0) * self.column_gap + padding
    }

    /// Left edge of the column at `index`
    pub fn column_x(&self, index: usize) -> f64 {
        self.board_padding + index as f64 * (self.column_width + self.column_gap)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            columns: vec![
                Column::new("new", "New").with_color("#3B82F6"),
                Column::new("pending", "Pending").with_color("#F59E0B"),
                Column::new("in_progress", "In Progress").with_color("#8B5CF6"),
                Column::new("done", "Done").with_color("#10B981"),
            ],
            column_width: Self::DEFAULT_COLUMN_WIDTH,
            column_gap: Self::DEFAULT_COLUMN_GAP,
            card_gap: Self::DEFAULT_CARD_GAP,
            board_padding: Self::DEFAULT_BOARD_PADDING,
            drag_enabled: true,
            haptic_feedback: true,
        }
    }
}
