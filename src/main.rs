use clap::Parser;
use std::sync::Arc;
use switchboard::cli::Cli;
use switchboard::echo::builtin_callbacks;
use switchboard::router::RouteTable;
use switchboard::runtime_config::RuntimeConfig;
use switchboard::server::{AppService, HttpServer};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = RuntimeConfig::from_env();
    may::config().set_stack_size(config.stack_size);

    let table = RouteTable::from_file(&cli.routes, &builtin_callbacks())?;
    info!(
        routes = table.len(),
        mounts = ?table.mount_paths(),
        "route table built"
    );

    let handle = HttpServer(AppService::new(Arc::new(table))).start(&cli.addr)?;
    info!(addr = %cli.addr, "server started");
    handle
        .join()
        .map_err(|_| anyhow::anyhow!("server coroutine panicked"))?;
    Ok(())
}
