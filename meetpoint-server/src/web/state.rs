//! Application state for the web layer.

use std::sync::Arc;

use crate::estimate::TravelTimeEstimator;
use crate::planner::SearchConfig;
use crate::routing::AnyRoadRouter;
use crate::stations::SharedCatalog;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Station catalog (already shared internally)
    pub catalog: SharedCatalog,

    /// Travel-time estimator over the configured road router
    pub estimator: Arc<TravelTimeEstimator<AnyRoadRouter>>,

    /// Default search configuration
    pub config: Arc<SearchConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        catalog: SharedCatalog,
        router: impl Into<AnyRoadRouter>,
        config: SearchConfig,
    ) -> Self {
        Self {
            catalog,
            estimator: Arc::new(TravelTimeEstimator::new(router.into())),
            config: Arc::new(config),
        }
    }
}
