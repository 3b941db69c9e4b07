use clap::Parser;
use lazyweather::{
    app::App,
    cli::Cli,
    config::Config,
    event::EventHandler,
    logging,
    persistence::{HistoryBackend, JsonFileBackend, MemoryBackend},
    store::HistoryStore,
};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();
    if let Some(log_file) = &args.log_file {
        logging::init(log_file)?;
    }

    let config = Config::load(args.config.as_deref());
    match config.get_path() {
        Some(path) => info!("Using config {:?}", path),
        None => info!("No config file, using defaults"),
    }
    let backend: Arc<dyn HistoryBackend> = if args.in_memory {
        info!("Keeping history in memory");
        Arc::new(MemoryBackend::new())
    } else {
        let backend = JsonFileBackend::new(config.history_file(args.history_file.as_deref()));
        info!("Using history file {:?}", backend.path());
        Arc::new(backend)
    };

    let store = HistoryStore::new(backend);
    let labels = config.build_localization();
    info!("{} location label(s) available", labels.len());

    let terminal = ratatui::init();
    let app = App::new(store, labels, EventHandler::new());
    let result = app.run(terminal).await;

    ratatui::restore();
    result
}
