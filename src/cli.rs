use clap::Parser;
use std::path::PathBuf;

/// Command-line interface for the switchboard server binary.
#[derive(Parser, Debug)]
#[command(name = "switchboard")]
#[command(about = "Declarative YAML-driven HTTP request router", long_about = None)]
pub struct Cli {
    /// Path to the routes YAML file
    #[arg(short, long, default_value = "config/routes.yaml")]
    pub routes: PathBuf,

    /// Address and port to bind the server to
    #[arg(long, default_value = "0.0.0.0:8080")]
    pub addr: String,
}
