//! Set command for writing values at paths

use std::path::PathBuf;

use clap::Args;

use super::io::{read_document, read_tree, read_value};
use crate::output::format_document;
use crate::AppContext;
use ogdl_core::Evaluator;

#[derive(Args)]
pub struct SetArgs {
    /// JSON document (`-` for stdin)
    pub data: PathBuf,

    /// Parsed path as tree JSON (`@file` to read a file)
    pub path: String,

    /// Value to write: JSON, or plain text when it does not parse
    pub value: String,
}

pub fn run(args: &SetArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let doc = read_document(&args.data)?;
    let path = read_tree(&args.path)?;
    let value = read_value(&args.value);

    let written = Evaluator::new(&doc)
        .with_options(ctx.options)
        .set(&path, value)?;
    if written.is_none() {
        anyhow::bail!("Path cannot be written: {}", args.path);
    }

    println!("{}", format_document(&doc, ctx.format, ctx.include_root)?);
    Ok(())
}
