//! Image-to-video command line binary.

use std::path::PathBuf;

use tracing::{error, info};

use i2v_client::InferenceClient;
use i2v_worker::{init_tracing, run, FilePresenter, Generator, GeneratorConfig};

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for TLS/HTTPS)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    // Load environment variables
    dotenvy::dotenv().ok();

    init_tracing();

    let mut args = std::env::args().skip(1);
    let Some(image_path) = args.next().map(PathBuf::from) else {
        eprintln!("usage: img2vid <image> [out_dir]");
        std::process::exit(2);
    };
    let out_dir = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));

    info!("Starting img2vid");

    let client = match InferenceClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create inference client: {}", e);
            std::process::exit(1);
        }
    };

    let config = GeneratorConfig::from_env();
    info!("Generator config: {:?}", config);

    let raw_image = match tokio::fs::read(&image_path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("Failed to read {}: {}", image_path.display(), e);
            std::process::exit(1);
        }
    };

    let mut presenter = match FilePresenter::new(&out_dir) {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to create output directory {}: {}", out_dir.display(), e);
            std::process::exit(1);
        }
    };

    let generator = Generator::new(client, config);
    let outcome = run(&generator, &raw_image, &mut presenter).await;

    info!(
        session_id = %outcome.session_id,
        videos = outcome.videos_delivered,
        "img2vid finished"
    );

    if !outcome.is_success() {
        std::process::exit(1);
    }
}
