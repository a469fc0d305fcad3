use std::num::NonZeroUsize;
use std::path::PathBuf;

use airdrop::amount::DEFAULT_DECIMALS;
use airdrop::amount::TokenAmount;
use airdrop::batch::AirdropPlan;
use airdrop::batch::DEFAULT_BATCH_SIZE;
use airdrop::write_json_atomic;
use anyhow::Context;
use anyhow::Result;

use super::InputArgs;

#[derive(clap::Args, Debug)]
pub(crate) struct Args {
    #[command(flatten)]
    input: InputArgs,

    /// Output JSON file
    #[arg(short, long, env = "AIRDROP_PLAN_OUTPUT")]
    output: PathBuf,

    /// Tokens per recipient, in whole tokens, e.g. "5" or "0.25"
    #[arg(short, long, default_value = "5", env = "AIRDROP_AMOUNT")]
    amount: String,

    /// Decimals of the airdropped token
    #[arg(long, default_value_t = DEFAULT_DECIMALS, env = "AIRDROP_DECIMALS")]
    decimals: u32,

    /// Recipients per batch transfer
    #[arg(short, long, default_value_t = DEFAULT_BATCH_SIZE, env = "AIRDROP_BATCH_SIZE")]
    batch_size: NonZeroUsize,

    /// Leading list entries to leave out of the batches; they stay in the tree
    #[arg(long, default_value_t = 0, env = "AIRDROP_SKIP_LEADING")]
    skip_leading: usize,
}

pub(crate) fn run(args: &Args) -> Result<()> {
    let amount =
        TokenAmount::parse_units(&args.amount, args.decimals).context("Invalid amount")?;
    if amount.is_zero() {
        tracing::warn!("airdropping an amount of zero");
    }

    let (list, tree) = args.input.load()?;
    let plan = AirdropPlan::new(&tree, &list, amount, args.batch_size, args.skip_leading)
        .context("Failed to plan batches")?;

    write_json_atomic(&args.output, &plan).context("Failed to write plan file")?;
    tracing::info!(
        output = ?args.output,
        merkle_root = %plan.merkle_root,
        total_amount = %plan.total_amount,
        "wrote airdrop plan"
    );

    Ok(())
}
