//! Cloudburst early warning entrypoint: loads the classifier once, then serves the page
//! until the user quits. The only flag is the artifact path.

use clap::Parser;
use cloudburst_warning::{
    config::AppConfig,
    logging::StructuredLogger,
    model::ModelCache,
    page::{run_prompt, Page},
    session::Session,
};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(author, version, about = "Himachal cloudburst early warning", long_about = None)]
struct Cli {
    /// Classifier artifact (.json, or .onnx with the `onnx` feature); overrides the config
    #[arg(long)]
    model: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    let config_path = std::env::var("CLOUDBURST_CONFIG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.json"));
    let mut config = AppConfig::load(&config_path);
    if let Some(model) = cli.model {
        config.model_path = model;
    }

    StructuredLogger::init(config.log.json, &config.log.level);
    info!(model_path = %config.model_path.display(), "cloudburst warning starting");

    let page = Page::new(&config.region);
    let classifier = match ModelCache::shared().get_or_load(&config.model_path) {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "classifier artifact failed to load");
            page.render_startup_failure(&mut std::io::stdout(), &config.model_path, &e)?;
            std::process::exit(1);
        }
    };

    let mut session = Session::new(classifier);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_prompt(&page, &mut session, &mut stdin.lock(), &mut stdout.lock())?;
    info!("cloudburst warning stopping");
    Ok(())
}
