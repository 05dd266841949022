use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::{
    fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use vignette_core::WorkerConfig;
use vignette_processing::ImageThumbnailer;
use vignette_storage::create_storage;
use vignette_worker::{FileProcessingService, InMemoryMetadataStore};

fn init_tracing() {
    let console_fmt = tracing_subscriber::fmt::layer().event_format(
        Format::default()
            .compact()
            .with_target(false)
            .without_time(),
    );
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "vignette=debug".into()))
        .with(console_fmt)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();
    init_tracing();

    let mut args = std::env::args().skip(1);
    let (source, key, content_type) = match (args.next(), args.next(), args.next()) {
        (Some(source), Some(key), Some(content_type)) => {
            (PathBuf::from(source), key, content_type)
        }
        _ => {
            eprintln!("Usage: vignette-worker <source-path> <key> <content-type>");
            std::process::exit(2);
        }
    };

    let config = WorkerConfig::from_env()?;
    let storage = create_storage(&config).await?;
    let metadata = Arc::new(InMemoryMetadataStore::new());
    let thumbnailer = Arc::new(ImageThumbnailer::new(
        config.thumbnail_max_width,
        config.thumbnail_max_height,
    ));

    let service =
        FileProcessingService::new(storage, metadata, thumbnailer, config.scratch_dir.clone())
            .await?;

    tracing::info!(backend = %service.storage_type(), "Processing upload");
    let record = service.process_upload(&source, &key, &content_type).await?;

    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
