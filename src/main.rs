use anyhow::Result;
use clap::Parser;

use kosis_dashboard::config::{init_logging, ServerArgs};
use kosis_dashboard::data::loader;
use kosis_dashboard::web::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let args = ServerArgs::parse();
    init_logging(args.debug);
    log::debug!("{args:?}");

    let table = loader::load_file(&args.data).inspect_err(|e| {
        log::error!("Failed to load survey table: {e:#}");
    })?;

    let addr = args.socket_addr()?;
    web::serve(addr, AppState::new(table)).await
}
