//! Eval command for evaluating expressions

use std::path::PathBuf;

use clap::Args;

use super::io::{read_document, read_tree};
use crate::output::{format_document, format_value};
use crate::AppContext;
use ogdl_core::Evaluator;

#[derive(Args)]
pub struct EvalArgs {
    /// JSON document used as variable scope (`-` for stdin)
    pub data: PathBuf,

    /// Parsed expression as tree JSON, e.g. '["!e", ["+", ["!p", "a"], "1"]]'
    pub expr: String,

    /// Also print the document after evaluation
    #[arg(long)]
    pub print_context: bool,
}

pub fn run(args: &EvalArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let doc = read_document(&args.data)?;
    let expr = read_tree(&args.expr)?;

    let value = Evaluator::new(&doc)
        .with_options(ctx.options)
        .eval(&expr)?;
    println!("{}", format_value(&value, ctx.format)?);

    if args.print_context {
        println!("{}", format_document(&doc, ctx.format, ctx.include_root)?);
    }
    Ok(())
}
