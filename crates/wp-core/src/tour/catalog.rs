//! Tour catalog
//!
//! The catalog is built once at process start and never mutated. It maps every
//! [`TourId`] to exactly one non-empty [`TourDefinition`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::builtin::builtin_definitions;
use super::{StepSpec, TourId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("tour {0} has no steps")]
    EmptyTour(TourId),
    #[error("tour {0} is defined more than once")]
    DuplicateTour(TourId),
    #[error("tour {0} has no definition")]
    MissingTour(TourId),
}

/// A named, ordered, non-empty sequence of steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TourDefinition {
    pub id: TourId,
    pub title: String,
    /// Route of the screen hosting the first step's target.
    pub entry_route: String,
    steps: Vec<StepSpec>,
}

impl TourDefinition {
    pub fn new(
        id: TourId,
        title: impl Into<String>,
        entry_route: impl Into<String>,
        steps: Vec<StepSpec>,
    ) -> Result<Self, CatalogError> {
        if steps.is_empty() {
            return Err(CatalogError::EmptyTour(id));
        }
        Ok(Self {
            id,
            title: title.into(),
            entry_route: entry_route.into(),
            steps,
        })
    }

    pub fn steps(&self) -> &[StepSpec] {
        &self.steps
    }

    pub fn step(&self, index: usize) -> Option<&StepSpec> {
        self.steps.get(index)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false for a constructed definition.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Read-only table of all tours.
#[derive(Debug, Clone)]
pub struct TourCatalog {
    tours: BTreeMap<TourId, TourDefinition>,
}

impl TourCatalog {
    /// Build a catalog, requiring exactly one definition per [`TourId`].
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = TourDefinition>,
    ) -> Result<Self, CatalogError> {
        let mut tours = BTreeMap::new();
        for definition in definitions {
            if definition.is_empty() {
                return Err(CatalogError::EmptyTour(definition.id));
            }
            let id = definition.id;
            if tours.insert(id, definition).is_some() {
                return Err(CatalogError::DuplicateTour(id));
            }
        }
        if let Some(missing) = TourId::ALL.into_iter().find(|id| !tours.contains_key(id)) {
            return Err(CatalogError::MissingTour(missing));
        }
        Ok(Self { tours })
    }

    /// The catalog shipped with the application.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_definitions(builtin_definitions()?)
    }

    pub fn get(&self, id: TourId) -> Option<&TourDefinition> {
        self.tours.get(&id)
    }

    pub fn step(&self, id: TourId, index: usize) -> Option<&StepSpec> {
        self.get(id).and_then(|tour| tour.step(index))
    }

    /// Number of steps in `id`, or zero if it is not in the catalog.
    pub fn step_count(&self, id: TourId) -> usize {
        self.get(id).map(TourDefinition::len).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.tours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tours.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TourDefinition> {
        self.tours.values()
    }
}
