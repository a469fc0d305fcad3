use anyhow::Result;
use merkle_whitelist::prelude::*;

#[derive(clap::Args, Debug)]
pub(crate) struct Args {
    /// Merkle root, hex encoded
    #[arg(short, long, env = "AIRDROP_ROOT")]
    root: Digest,

    /// Whitelist entry to check
    #[arg(short, long)]
    address: String,

    /// Sibling digests from leaf to root, comma separated
    #[arg(short, long, value_delimiter = ',')]
    proof: Vec<Digest>,
}

pub(crate) fn run(args: &Args) -> Result<()> {
    let leaf = Keccak256::hash_input(&args.address);
    let proof = MerkleProof(args.proof.clone());

    if !proof.verify::<Keccak256>(leaf, args.root) {
        anyhow::bail!("proof for {} does not lead to root {}", args.address, args.root);
    }

    tracing::info!(address = %args.address, %leaf, "proof is valid");
    Ok(())
}
