//! Supervised rendering of optional step enhancements.
//!
//! Media, pro tips and showcases are decorative. A renderer that errors or
//! panics is replaced by a static fallback so the step stays usable and the
//! tour can still advance.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use serde::Serialize;
use tracing::warn;
use wp_core::tour::{ShowcaseKind, StepSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnhancementKind {
    Media,
    ProTip,
    Showcase,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EnhancementView {
    Media { url: String },
    ProTip { text: String },
    Showcase { kind: ShowcaseKind },
    /// Static stand-in for a failed enhancement: plain text or an empty block.
    Fallback {
        kind: EnhancementKind,
        text: Option<String>,
    },
}

pub trait EnhancementRenderer: Send + Sync {
    fn kind(&self) -> EnhancementKind;

    /// `Ok(None)` when the step does not use this enhancement.
    fn render(&self, step: &StepSpec) -> anyhow::Result<Option<EnhancementView>>;
}

/// Resolves `media_ref` against an asset base URL.
pub struct MediaRenderer {
    asset_base: String,
}

impl MediaRenderer {
    pub fn new(asset_base: impl Into<String>) -> Self {
        Self {
            asset_base: asset_base.into(),
        }
    }
}

impl EnhancementRenderer for MediaRenderer {
    fn kind(&self) -> EnhancementKind {
        EnhancementKind::Media
    }

    fn render(&self, step: &StepSpec) -> anyhow::Result<Option<EnhancementView>> {
        let Some(media_ref) = step.media_ref.as_deref() else {
            return Ok(None);
        };
        if media_ref.is_empty() || media_ref.starts_with('/') || media_ref.contains("..") {
            anyhow::bail!("invalid media reference: {media_ref:?}");
        }
        let base = self.asset_base.trim_end_matches('/');
        Ok(Some(EnhancementView::Media {
            url: format!("{base}/{media_ref}"),
        }))
    }
}

pub struct ProTipRenderer;

impl EnhancementRenderer for ProTipRenderer {
    fn kind(&self) -> EnhancementKind {
        EnhancementKind::ProTip
    }

    fn render(&self, step: &StepSpec) -> anyhow::Result<Option<EnhancementView>> {
        Ok(step
            .pro_tip_text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(|text| EnhancementView::ProTip {
                text: text.to_string(),
            }))
    }
}

pub struct ShowcaseRenderer;

impl EnhancementRenderer for ShowcaseRenderer {
    fn kind(&self) -> EnhancementKind {
        EnhancementKind::Showcase
    }

    fn render(&self, step: &StepSpec) -> anyhow::Result<Option<EnhancementView>> {
        Ok(step
            .showcase_kind
            .map(|kind| EnhancementView::Showcase { kind }))
    }
}

#[derive(Clone, Default)]
pub struct EnhancementSupervisor {
    renderers: Vec<Arc<dyn EnhancementRenderer>>,
}

impl EnhancementSupervisor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Media, pro tip and showcase renderers.
    pub fn standard(asset_base: impl Into<String>) -> Self {
        Self::new()
            .with_renderer(MediaRenderer::new(asset_base))
            .with_renderer(ProTipRenderer)
            .with_renderer(ShowcaseRenderer)
    }

    pub fn with_renderer(mut self, renderer: impl EnhancementRenderer + 'static) -> Self {
        self.renderers.push(Arc::new(renderer));
        self
    }

    pub fn render_all(&self, step: &StepSpec) -> Vec<EnhancementView> {
        self.renderers
            .iter()
            .filter_map(|renderer| supervise(renderer.as_ref(), step))
            .collect()
    }
}

fn supervise(renderer: &dyn EnhancementRenderer, step: &StepSpec) -> Option<EnhancementView> {
    let kind = renderer.kind();
    match catch_unwind(AssertUnwindSafe(|| renderer.render(step))) {
        Ok(Ok(view)) => view,
        Ok(Err(err)) => {
            warn!(?kind, selector = %step.target_selector, error = %err, "enhancement failed, using fallback");
            Some(fallback(kind, step))
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            warn!(?kind, selector = %step.target_selector, %message, "enhancement panicked, using fallback");
            Some(fallback(kind, step))
        }
    }
}

fn fallback(kind: EnhancementKind, step: &StepSpec) -> EnhancementView {
    let text = match kind {
        EnhancementKind::ProTip => step.pro_tip_text.clone(),
        EnhancementKind::Media | EnhancementKind::Showcase => None,
    };
    EnhancementView::Fallback { kind, text }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
