use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use zico::Tab;
use zico::core::config::{EnvOverrides, ZicoConfig, load_config, resolve};
use zico::core::persist::PersistQueue;
use zico::core::state::App;
use zico::core::store::{FileStore, KeyValueStore, MemoryStore};

#[derive(Parser)]
#[command(name = "zico", about = "Lessons and past exams, level by level")]
struct Args {
    /// Screen to open on
    #[arg(short, long, value_enum)]
    tab: Option<Tab>,

    /// Config file (defaults to ~/.zico/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to zico.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("zico.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    log::info!("Zico starting up");

    let file_config = load_config(args.config.as_deref()).unwrap_or_else(|e| {
        log::warn!("{}; using defaults", e);
        ZicoConfig::default()
    });
    let config = resolve(&file_config, &EnvOverrides::from_env(), args.tab);

    let store: Arc<dyn KeyValueStore> = match &config.storage_path {
        Some(path) => {
            log::info!("Storage at {}", path.display());
            Arc::new(FileStore::new(path.clone()))
        }
        None => {
            log::warn!("No storage location; choices will not survive a restart");
            Arc::new(MemoryStore::new())
        }
    };

    let app = App::load(&config, store.as_ref()).await;
    let queue = PersistQueue::spawn(store);

    let result = zico::tui::run(app, &queue);
    queue.flush().await;
    log::info!("Zico shut down");
    result
}
