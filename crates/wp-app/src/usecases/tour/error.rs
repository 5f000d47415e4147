use wp_core::tour::CatalogError;

/// Errors surfaced by the tour controller and help surface.
///
/// The in-memory session transition is always applied before an error is
/// returned; the caller sees the failure but the tour keeps going.
#[derive(Debug, thiserror::Error)]
pub enum TourError {
    #[error("persisting {what} failed: {source}")]
    Persistence {
        what: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("navigation to {route} failed: {source}")]
    Navigation {
        route: String,
        #[source]
        source: anyhow::Error,
    },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl TourError {
    pub(crate) fn persistence(what: impl Into<String>, source: anyhow::Error) -> Self {
        TourError::Persistence {
            what: what.into(),
            source,
        }
    }
}
