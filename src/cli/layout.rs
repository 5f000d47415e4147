//! Simulated host screen for the `walk` command.
//!
//! A layout file lists the rendered elements of the screen the tour runs
//! on. Without one, every catalog target is laid out on a synthetic grid.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use wp_core::{Rect, Size, TourCatalog};

use crate::bootstrap::HostScreen;

const CELL_WIDTH: f64 = 220.0;
const CELL_HEIGHT: f64 = 48.0;
const CELL_GAP: f64 = 24.0;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HostLayout {
    #[serde(default = "default_route")]
    pub route: String,
    #[serde(default = "default_viewport")]
    pub viewport: Size,
    #[serde(default)]
    pub elements: Vec<ElementSpec>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ElementSpec {
    pub selector: String,
    #[serde(flatten)]
    pub rect: Rect,
}

fn default_route() -> String {
    "/dashboard".to_string()
}

fn default_viewport() -> Size {
    Size::new(1280.0, 800.0)
}

impl HostLayout {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read layout file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse layout file: {}", path.display()))
    }

    /// Every distinct step target of the catalog, row by row.
    pub fn synthetic(catalog: &TourCatalog, viewport: Size) -> Self {
        let selectors: BTreeSet<&str> = catalog
            .iter()
            .flat_map(|definition| definition.steps())
            .map(|step| step.target_selector.as_str())
            .collect();

        let columns = ((viewport.width - CELL_GAP) / (CELL_WIDTH + CELL_GAP))
            .floor()
            .max(1.0) as usize;

        let elements = selectors
            .into_iter()
            .enumerate()
            .map(|(index, selector)| {
                let column = (index % columns) as f64;
                let row = (index / columns) as f64;
                ElementSpec {
                    selector: selector.to_string(),
                    rect: Rect::new(
                        CELL_GAP + column * (CELL_WIDTH + CELL_GAP),
                        CELL_GAP + row * (CELL_HEIGHT + CELL_GAP),
                        CELL_WIDTH,
                        CELL_HEIGHT,
                    ),
                }
            })
            .collect();

        Self {
            route: default_route(),
            viewport,
            elements,
        }
    }

    pub fn into_screen(self) -> HostScreen {
        HostScreen {
            route: self.route,
            viewport: self.viewport,
            elements: self
                .elements
                .into_iter()
                .map(|element| (element.selector, element.rect))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_layout_file() {
        let content = r#"
            route = "/leads"

            [viewport]
            width = 1024.0
            height = 768.0

            [[elements]]
            selector = "[data-tour=\"leads-table\"]"
            left = 40.0
            top = 120.0
            width = 900.0
            height = 400.0
        "#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();

        let layout = HostLayout::load(file.path()).unwrap();

        assert_eq!(layout.route, "/leads");
        assert_eq!(layout.viewport, Size::new(1024.0, 768.0));
        assert_eq!(layout.elements.len(), 1);
        assert_eq!(layout.elements[0].rect, Rect::new(40.0, 120.0, 900.0, 400.0));
    }

    #[test]
    fn test_synthetic_layout_covers_every_target() {
        let catalog = TourCatalog::builtin().unwrap();
        let viewport = Size::new(1280.0, 800.0);

        let layout = HostLayout::synthetic(&catalog, viewport);

        for definition in catalog.iter() {
            for step in definition.steps() {
                assert!(layout
                    .elements
                    .iter()
                    .any(|element| element.selector == step.target_selector));
            }
        }
        assert!(layout
            .elements
            .iter()
            .all(|element| element.rect.right() <= viewport.width));
    }
}
