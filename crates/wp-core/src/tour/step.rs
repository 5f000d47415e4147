use serde::{Deserialize, Serialize};

/// Preferred tooltip side relative to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepPosition {
    Top,
    Bottom,
    Left,
    Right,
    #[default]
    Auto,
}

/// Decorative showcase rendered inside a step card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShowcaseKind {
    Metrics,
    Pipeline,
    Inbox,
    Sequence,
    Warmup,
}

/// One call-out of a tour. Immutable once placed in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepSpec {
    pub target_selector: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub position: StepPosition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pro_tip_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub showcase_kind: Option<ShowcaseKind>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlight_terms: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyboard_hint_text: Option<String>,
}

impl StepSpec {
    pub fn new(
        target_selector: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            target_selector: target_selector.into(),
            title: title.into(),
            content: content.into(),
            position: StepPosition::Auto,
            media_ref: None,
            pro_tip_text: None,
            showcase_kind: None,
            highlight_terms: Vec::new(),
            keyboard_hint_text: None,
        }
    }

    pub fn position(mut self, position: StepPosition) -> Self {
        self.position = position;
        self
    }

    pub fn media(mut self, media_ref: impl Into<String>) -> Self {
        self.media_ref = Some(media_ref.into());
        self
    }

    pub fn pro_tip(mut self, text: impl Into<String>) -> Self {
        self.pro_tip_text = Some(text.into());
        self
    }

    pub fn showcase(mut self, kind: ShowcaseKind) -> Self {
        self.showcase_kind = Some(kind);
        self
    }

    pub fn highlight<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.highlight_terms = terms.into_iter().map(Into::into).collect();
        self
    }

    pub fn keyboard_hint(mut self, text: impl Into<String>) -> Self {
        self.keyboard_hint_text = Some(text.into());
        self
    }
}
