use anyhow::Result;

use super::InputArgs;

#[derive(clap::Args, Debug)]
pub(crate) struct Args {
    #[command(flatten)]
    input: InputArgs,
}

pub(crate) fn run(args: &Args) -> Result<()> {
    let (_, tree) = args.input.load()?;
    println!("{}", tree.root());
    Ok(())
}
