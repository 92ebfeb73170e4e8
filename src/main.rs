use anyhow::{Context, Result};
use clap::Parser;
use itertools::Itertools;

use keyshift::{PatternNode, compile_dotted, compile_levels, match_path, render_path};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Dotted input path to match, e.g. `rating-5.value`
    #[arg(value_name = "INPUT")]
    input: String,

    /// Dotted spec path; levels may use `*`, `@`, `&` and `|`
    #[arg(short = 's', long, value_name = "SPEC")]
    spec: String,

    /// Dotted output key to render against the matched path
    #[arg(short = 'o', long = "output", value_name = "KEY")]
    outputs: Vec<String>,

    /// Print the sub-keys captured at each level
    #[arg(short = 'c', long)]
    captures: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("{err:#}");
            std::process::exit(2);
        }
    }
}

/// Returns `false` when the input path does not match the spec.
fn run(args: &Args) -> Result<bool> {
    let levels = compile_levels(args.spec.split('.'))
        .with_context(|| format!("Failed to compile spec '{}'", args.spec))?;
    let keys: Vec<&str> = args.input.split('.').collect();

    let Some(ctx) = match_path(&levels, &keys)
        .with_context(|| format!("Failed to match '{}'", args.input))?
    else {
        println!("{} does not match {}", args.input, args.spec);
        return Ok(false);
    };

    if args.captures {
        for node in ctx.iter() {
            match node {
                PatternNode::Literal(lit) => {
                    println!("{}: {}", lit.key(), lit.sub_keys().skip(1).join(", "))
                }
                other => println!("{other}: (no sub-keys)"),
            }
        }
    }

    for output in &args.outputs {
        let output_levels = compile_dotted(output)
            .with_context(|| format!("Failed to compile output key '{}'", output))?;
        let rendered = render_path(&output_levels, &ctx)
            .with_context(|| format!("Failed to render output key '{}'", output))?;
        println!("{}", rendered.iter().join("."));
    }
    Ok(true)
}
