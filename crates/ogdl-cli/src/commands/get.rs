//! Get command for resolving paths

use std::path::PathBuf;

use clap::Args;

use super::io::{read_document, read_tree};
use crate::output::format_value;
use crate::AppContext;
use ogdl_core::Evaluator;

#[derive(Args)]
pub struct GetArgs {
    /// JSON document (`-` for stdin)
    pub data: PathBuf,

    /// Parsed path as tree JSON, e.g. '["!p", "a", ["!i", "0"]]' (`@file` to read a file)
    pub path: String,
}

pub fn run(args: &GetArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let doc = read_document(&args.data)?;
    let path = read_tree(&args.path)?;

    let value = Evaluator::new(&doc).with_options(ctx.options).get(&path)?;
    if value.is_nil() {
        tracing::info!("Path did not resolve");
    }
    println!("{}", format_value(&value, ctx.format)?);
    Ok(())
}
