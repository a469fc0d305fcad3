#![forbid(unsafe_code)]

use clap::ArgAction;
use clap::Parser;
use clap::Subcommand;
use tracing::Level;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "airdrop")]
#[command(about = "Prepare a whitelisted token airdrop", long_about = None)]
#[command(version)]
struct Cli {
    /// Raise log verbosity; repeat for more detail
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the Merkle root of the address list
    Root(commands::root::Args),
    /// Write the Merkle proof of every address to a JSON file
    Proofs(commands::proofs::Args),
    /// Write the batch transfer plan to a JSON file
    Plan(commands::plan::Args),
    /// Check one address and proof against a Merkle root
    Verify(commands::verify::Args),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Root(args) => commands::root::run(&args)?,
        Commands::Proofs(args) => commands::proofs::run(&args)?,
        Commands::Plan(args) => commands::plan::run(&args)?,
        Commands::Verify(args) => commands::verify::run(&args)?,
    }

    Ok(())
}
