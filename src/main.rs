use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use token_shop::application::processor::CommandProcessor;
use token_shop::application::shop::Shop;
use token_shop::domain::address::Address;
use token_shop::domain::ports::ProductStoreBox;
use token_shop::infrastructure::in_memory::{InMemoryProductStore, InMemoryTokenLedger};
use token_shop::interfaces::csv::command_reader::CommandReader;
use token_shop::interfaces::csv::product_writer::ProductWriter;
use token_shop::interfaces::jsonl::EventWriter;
use token_shop::telemetry;
use tracing::{error, info};

const DEFAULT_OWNER: &str = "0x0000000000000000000000000000000000000a11";
const DEFAULT_SHOP_ADDRESS: &str = "0x00000000000000000000000000000000000005e0";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input commands CSV file
    input: PathBuf,

    /// Shop owner; the only caller allowed to add products and set prices
    #[arg(long, env = "SHOP_OWNER", default_value = DEFAULT_OWNER)]
    owner: Address,

    /// The shop's own address, used as spender when buyers approve it
    #[arg(long, env = "SHOP_ADDRESS", default_value = DEFAULT_SHOP_ADDRESS)]
    shop_address: Address,

    /// Path to persistent product database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Write every emitted event to this file as JSON lines
    #[arg(long)]
    events: Option<PathBuf>,

    /// Emit logs as JSON instead of compact text
    #[arg(long)]
    log_json: bool,
}

#[cfg(feature = "storage-rocksdb")]
fn product_store(db_path: Option<PathBuf>) -> Result<ProductStoreBox> {
    use token_shop::infrastructure::rocksdb::RocksDBProductStore;

    match db_path {
        Some(path) => {
            info!(path = %path.display(), "opening product database");
            let store = RocksDBProductStore::open(path).into_diagnostic()?;
            Ok(Box::new(store))
        }
        None => Ok(Box::new(InMemoryProductStore::new())),
    }
}

#[cfg(not(feature = "storage-rocksdb"))]
fn product_store(db_path: Option<PathBuf>) -> Result<ProductStoreBox> {
    if db_path.is_some() {
        tracing::warn!(
            "persistent storage requested via --db-path, but the 'storage-rocksdb' feature is not enabled; falling back to in-memory storage"
        );
    }
    Ok(Box::new(InMemoryProductStore::new()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init(cli.log_json);

    let shop = Shop::new(
        cli.owner,
        cli.shop_address,
        product_store(cli.db_path)?,
        Box::new(InMemoryTokenLedger::new()),
    );
    info!(owner = %shop.owner(), shop = %shop.address(), "shop opened");
    let processor = CommandProcessor::new(shop);

    let mut event_writer = match cli.events {
        Some(path) => Some(EventWriter::new(BufWriter::new(
            File::create(path).into_diagnostic()?,
        ))),
        None => None,
    };

    let file = File::open(cli.input).into_diagnostic()?;
    let reader = CommandReader::new(file);
    for (row, command) in reader.commands().enumerate() {
        let row = row + 1;
        match command {
            Ok(command) => match processor.process(command).await {
                Ok(events) => {
                    if let Some(writer) = event_writer.as_mut() {
                        writer.write_events(&events).into_diagnostic()?;
                    }
                }
                Err(e) => error!(row, error = %e, "command rejected"),
            },
            Err(e) => error!(row, error = %e, "unreadable command"),
        }
    }

    if let Some(mut writer) = event_writer {
        writer.flush().into_diagnostic()?;
    }

    let products = processor.into_results().await.into_diagnostic()?;

    let stdout = io::stdout();
    let mut writer = ProductWriter::new(stdout.lock());
    writer.write_products(products).into_diagnostic()?;

    Ok(())
}
