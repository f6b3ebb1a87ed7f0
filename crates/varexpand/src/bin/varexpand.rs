use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use varexpand::vars::parse_define;
use varexpand::vars_file::VarsFile;
use varexpand::{Delimiters, Resolver, Vars, VarsResult};

/// Expand variable references in build templates
#[derive(Parser)]
#[command(version)]
struct Opts {
    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    subcmd: SubCommand,
}

#[derive(Subcommand)]
enum SubCommand {
    Expand(Expand),
    Check(Check),
}

#[derive(Args)]
struct VarArgs {
    /// TOML file with a [vars] table
    #[arg(long = "vars", value_name = "FILE")]
    vars_file: Option<PathBuf>,

    /// Define a variable as NAME=v1,v2 (use \, for a literal comma). Repeat to append.
    #[arg(short = 'D', long = "define", value_name = "NAME=VALUES")]
    defines: Vec<String>,

    /// Reference syntax: "$()", "${}" or "{}"
    #[arg(long, default_value_t = Delimiters::default())]
    delimiters: Delimiters,
}

impl VarArgs {
    fn load(&self) -> VarsResult<Vars> {
        let mut vars = Vars::new();

        if let Some(path) = &self.vars_file {
            VarsFile::load(path)?
                .apply_to(&mut vars, self.delimiters)
                .with_context(|| format!("loading {}", path.display()))?;
        }

        for define in &self.defines {
            let (name, values) = parse_define(define, self.delimiters)?;
            vars.append(name, values);
        }

        info!(count = vars.len(), "variables loaded");
        Ok(vars)
    }
}

/// Expand each template and print the results, one per line
#[derive(Args)]
struct Expand {
    #[command(flatten)]
    vars: VarArgs,

    /// Expand variables in terms of each other before expanding the templates
    #[arg(long)]
    self_resolve: bool,

    /// Print each template's results on one line, separated by SEP
    #[arg(long, value_name = "SEP")]
    join: Option<String>,

    #[arg(required = true)]
    templates: Vec<String>,
}

/// Check the variables for reference cycles
#[derive(Args)]
struct Check {
    #[command(flatten)]
    vars: VarArgs,
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn expand(args: Expand) -> VarsResult<()> {
    let mut vars = args.vars.load()?;
    let mut resolver = Resolver::new(args.vars.delimiters);
    if args.self_resolve {
        if let Err(e) = vars.check_references(&mut resolver) {
            warn!("{e}");
        }
        vars.resolve_with(&mut resolver);
    }

    let mut out = io::stdout().lock();
    for template in &args.templates {
        let results = resolver.resolve(template, &vars);
        match &args.join {
            Some(sep) => writeln!(out, "{}", results.join(sep))?,
            None => {
                for result in results {
                    writeln!(out, "{result}")?;
                }
            }
        }
    }
    Ok(())
}

fn check(args: Check) -> VarsResult<()> {
    let vars = args.vars.load()?;
    vars.check_references(&mut Resolver::new(args.vars.delimiters))?;
    println!("{} variables, no reference cycles", vars.len());
    Ok(())
}

fn main() -> VarsResult<()> {
    let opts = Opts::parse();
    init_logging(opts.verbose);

    match opts.subcmd {
        SubCommand::Expand(args) => expand(args),
        SubCommand::Check(args) => check(args),
    }
}
