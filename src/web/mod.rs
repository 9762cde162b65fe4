//! HTTP front end: the dashboard page plus a small JSON API.
//!
//! ```text
//!  GET  /             dashboard page (selectors + chart)
//!  GET  /healthz      {"ok": true}
//!  GET  /api/options  selector lists and the default selection
//!  POST /api/figure   selection → chart figure
//! ```

mod error;
mod figure;
mod page;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::color::YearColors;
use crate::data::model::ObservationTable;
use crate::data::options::{derive_options, DimensionOptions};

pub use error::ApiError;
pub use figure::{Figure, Trace};
pub use routes::router;

/// Shared, read-only handles given to every request.
#[derive(Clone)]
pub struct AppState {
    pub table: Arc<ObservationTable>,
    pub options: Arc<DimensionOptions>,
    pub colors: Arc<YearColors>,
}

impl AppState {
    /// Derive the option lists once and wrap everything for sharing.
    pub fn new(table: ObservationTable) -> Self {
        let options = derive_options(&table);
        let colors = YearColors::new(&options.years);
        log::info!(
            "{} items, {} sex codes, {} age brackets, {} years",
            options.items.len(),
            options.sexes.len(),
            options.ages.len(),
            options.years.len()
        );
        AppState {
            table: Arc::new(table),
            options: Arc::new(options),
            colors: Arc::new(colors),
        }
    }
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    log::info!("Dashboard listening on http://{addr}");
    axum::serve(listener, router(state))
        .await
        .context("server failed")
}
