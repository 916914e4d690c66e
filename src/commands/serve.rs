use anyhow::{Context, Result};
use std::net::SocketAddr;

use sentiscope::config::Config;
use sentiscope::pipeline::Pipeline;
use sentiscope::server::{shutdown_signal, DashboardServer};

/// Start the dashboard server
pub async fn serve(config: &Config, bind: Option<SocketAddr>) -> Result<()> {
    let mut server_config = config.server.clone();
    if let Some(bind) = bind {
        server_config.bind_address = bind;
    }

    let pipeline = Pipeline::from_config(config).context("Failed to build sentiment pipeline")?;
    let server =
        DashboardServer::new(pipeline, server_config).context("Failed to create dashboard server")?;

    println!("{}", server.info().display());

    server
        .start_with_shutdown(shutdown_signal())
        .await
        .context("Dashboard server failed")?;

    Ok(())
}
