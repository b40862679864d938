use clap::Parser as _;
use dotenvy::dotenv;
use gateway::cli::RunCmd;
use gateway::config::Config;
use gateway::server::setup_server;
use gateway::utils::logging::init_logging;
use gateway::GatewayResult;
use tracing::{error, info};

/// Start the gateway service.
#[tokio::main]
async fn main() {
    dotenv().ok();
    init_logging();
    info!("Starting gateway");

    let run_cmd = RunCmd::parse();
    match run_gateway(&run_cmd).await {
        Ok(_) => {
            info!("Gateway stopped");
        }
        Err(e) => {
            error!(error = %e, "Failed to start gateway service");
            panic!("Failed to start gateway service: {}", e);
        }
    }
}

async fn run_gateway(run_cmd: &RunCmd) -> GatewayResult<()> {
    let config = Config::from_run_cmd(run_cmd).await?;
    let address = setup_server(config).await?;
    info!("Listening on http://{}", address);

    tokio::signal::ctrl_c().await.expect("Failed to listen for ctrl+c");
    info!("Shutting down");
    Ok(())
}
