use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Daily emotion store file
    #[arg(long, default_value = scanner::DEFAULT_STORE_PATH)]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Send an image to the mood endpoint and record the scanned emotion
    Scan {
        image: PathBuf,

        #[arg(long, default_value = scanner::DEFAULT_SERVER)]
        server: String,
    },

    /// Record today's mood score (1-5)
    Score { score: i64 },

    /// Record today's emotion (happy, sad, angry, idle)
    Set { emotion: String },

    /// Print today's signals and reconciled emotion
    Today,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let store = scanner::open_store(&args.store)?;

    match args.command {
        Command::Scan { image, server } => scanner::scan(&store, &server, &image).await?,
        Command::Score { score } => scanner::record_score(&store, score)?,
        Command::Set { emotion } => scanner::record_emotion(&store, &emotion)?,
        Command::Today => {}
    }

    scanner::print_today(&store)
}
