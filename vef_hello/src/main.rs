use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use log::{debug, info};
use vef_forms::Input;
use vef_webservice::{load_config_from_path, AppConfig, VefApp};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// YAML, JSON or TOML application config
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long)]
    port: Option<u16>,
    /// Keep serving after the window closes and open devtools
    #[arg(long)]
    debug: bool,
}

fn init_logging(log4rs_config: Option<&Path>) {
    if let Some(path) = log4rs_config {
        match log4rs::init_file(path, Default::default()) {
            Ok(()) => {
                info!("log4rs initialized from {:?}", path);
                return;
            }
            Err(e) => {
                eprintln!(
                    "Failed to initialize log4rs from {:?}: {}. Using env_logger.",
                    path, e
                );
            }
        }
    }
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

fn build_app(config: AppConfig) -> anyhow::Result<VefApp> {
    let mut app = VefApp::new(config);
    app.add(Input::new("name").label("Name"))?;

    app.on_submit(|ctx| {
        let name = ctx
            .get_value("name")?
            .map(|name| name.to_string())
            .unwrap_or_default();
        // shows up in the window's console pane
        ctx.console(format!("Hello {}.", name));
        Ok(())
    });
    Ok(app)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path)
            .with_context(|| format!("failed to load configuration from {:?}", path))?,
        None => AppConfig::new("hello"),
    };
    if let Some(port) = cli.port {
        config.port = port;
    }
    config.debug |= cli.debug;

    init_logging(config.log4rs_config.as_deref());
    debug!("CLI arguments: {:?}", cli);

    build_app(config)?.run().await
}
