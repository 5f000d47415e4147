//! Help surface
//!
//! Lists every tour with its completion flag and replays a tour on request:
//! reset, navigate to the tour's entry screen when needed, then start.

use serde::Serialize;
use tracing::{info, warn};
use wp_core::tour::CatalogError;
use wp_core::{TourId, TourState};

use super::{TourController, TourError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TourHelpEntry {
    pub tour_id: TourId,
    pub title: String,
    pub step_count: usize,
    pub entry_route: String,
    pub completed: bool,
}

pub struct TourHelp {
    controller: TourController,
}

impl TourHelp {
    pub fn new(controller: TourController) -> Self {
        Self { controller }
    }

    pub fn entries(&self) -> Vec<TourHelpEntry> {
        self.controller
            .catalog()
            .iter()
            .map(|definition| TourHelpEntry {
                tour_id: definition.id,
                title: definition.title.clone(),
                step_count: definition.len(),
                entry_route: definition.entry_route.clone(),
                completed: self.controller.is_tour_completed(definition.id),
            })
            .collect()
    }

    /// Reset the tour and start it again from its entry screen.
    ///
    /// A failed reset write does not stop the replay; it is returned once
    /// the tour has started.
    pub async fn replay(&self, tour_id: TourId) -> Result<TourState, TourError> {
        let entry_route = self
            .controller
            .catalog()
            .get(tour_id)
            .map(|definition| definition.entry_route.clone())
            .ok_or(CatalogError::MissingTour(tour_id))?;

        let reset = self.controller.reset_tour(tour_id).await;

        let navigation = self.controller.navigation();
        let current_route = match navigation.current_route().await {
            Ok(route) => Some(route),
            Err(err) => {
                warn!(%tour_id, error = %err, "reading current route failed");
                None
            }
        };
        if current_route.as_deref() != Some(entry_route.as_str()) {
            info!(%tour_id, from = ?current_route, to = %entry_route, "navigating to tour entry");
            navigation
                .navigate_to(&entry_route)
                .await
                .map_err(|source| TourError::Navigation {
                    route: entry_route.clone(),
                    source,
                })?;
            // Give the entry screen time to render its targets.
            tokio::time::sleep(self.controller.settings().navigation_settle_delay()).await;
        }

        let state = self.controller.start(tour_id).await?;
        reset.map(|_| state)
    }
}
