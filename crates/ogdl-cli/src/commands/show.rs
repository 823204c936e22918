//! Show command for printing documents

use std::path::PathBuf;

use clap::Args;

use super::io::read_document;
use crate::output::format_document;
use crate::AppContext;

#[derive(Args)]
pub struct ShowArgs {
    /// JSON document (`-` for stdin)
    pub data: PathBuf,

    /// Include the document root
    #[arg(long)]
    pub root: bool,
}

pub fn run(args: &ShowArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let doc = read_document(&args.data)?;
    println!(
        "{}",
        format_document(&doc, ctx.format, args.root || ctx.include_root)?
    );
    Ok(())
}
