use std::path::PathBuf;

use airdrop::proofs::WhitelistProofs;
use airdrop::write_json_atomic;
use anyhow::Context;
use anyhow::Result;

use super::InputArgs;

#[derive(clap::Args, Debug)]
pub(crate) struct Args {
    #[command(flatten)]
    input: InputArgs,

    /// Output JSON file
    #[arg(short, long, env = "AIRDROP_PROOFS_OUTPUT")]
    output: PathBuf,
}

pub(crate) fn run(args: &Args) -> Result<()> {
    let (list, tree) = args.input.load()?;
    let whitelist_proofs =
        WhitelistProofs::new(&tree, &list).context("Failed to generate Merkle proofs")?;

    write_json_atomic(&args.output, &whitelist_proofs).context("Failed to write proofs file")?;
    tracing::info!(
        output = ?args.output,
        num_proofs = whitelist_proofs.proofs.len(),
        "wrote proofs"
    );

    Ok(())
}
