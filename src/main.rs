//! refdoc command-line driver
//!
//! Reads a front-end symbol dump, builds the documentation model, runs the
//! resolving pass and writes the result.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use refdoc::config::Options;
use refdoc::feedback::ResolveReport;
use refdoc::frontend::SymbolDump;
use refdoc::model::Project;
use refdoc::resolve::ResolveStats;

/// refdoc: resolve type references in a symbol dump
#[derive(Parser, Debug)]
#[command(name = "refdoc")]
#[command(version = "0.1.0")]
#[command(about = "Builds the documentation model for a symbol dump and resolves its type references")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write the resolved documentation model as JSON
    Resolve {
        #[command(flatten)]
        run: RunArgs,

        /// Include type arguments in reference records
        #[arg(long)]
        type_arguments: bool,

        /// Include bound reflection ids in reference records
        #[arg(long)]
        targets: bool,

        /// Output file (stdout if omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Print `name: type` for every declaration with a type
    Render {
        #[command(flatten)]
        run: RunArgs,
    },
    /// Print a JSON report of the resolving pass
    Report {
        #[command(flatten)]
        run: RunArgs,

        /// Exit with status 2 if any reference stays unresolved
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Symbol dump produced by the front-end
    #[arg(value_name = "DUMP")]
    input: PathBuf,

    /// JSON options file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Resolve references in parallel
    #[arg(long)]
    parallel: bool,
}

impl RunArgs {
    fn options(&self) -> Result<Options> {
        let mut options = match &self.config {
            Some(path) => Options::load(path)
                .with_context(|| format!("loading options from {}", path.display()))?,
            None => Options::default(),
        };
        options.parallel |= self.parallel;
        Ok(options)
    }

    fn run(&self, options: &Options) -> Result<(Project, ResolveStats)> {
        let dump = SymbolDump::load(&self.input)
            .with_context(|| format!("reading symbol dump {}", self.input.display()))?;
        refdoc::document(&dump, options)
            .with_context(|| format!("building documentation for {}", self.input.display()))
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<i32> {
    match &cli.command {
        Commands::Resolve {
            run,
            type_arguments,
            targets,
            output,
        } => {
            let mut options = run.options()?;
            options.serialize.type_arguments |= *type_arguments;
            options.serialize.targets |= *targets;
            let (project, _) = run.run(&options)?;
            let json = project.to_object(&options.serialize).to_json()?;
            write_output(output.as_deref(), &json)?;
            Ok(0)
        }
        Commands::Render { run } => {
            let (project, _) = run.run(&run.options()?)?;
            for reflection in project.reflections() {
                if let Some(ty) = &reflection.ty {
                    println!("{}: {}", reflection.name, ty);
                }
                for base in &reflection.extended_types {
                    println!("{} extends {}", reflection.name, base);
                }
            }
            Ok(0)
        }
        Commands::Report { run, strict } => {
            let (project, stats) = run.run(&run.options()?)?;
            let report = ResolveReport::new(&project, stats);
            println!("{}", report.to_json()?);
            Ok(if *strict && !report.is_complete() { 2 } else { 0 })
        }
    }
}

fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
            log::info!("wrote {}", path.display());
            Ok(())
        }
        None => {
            println!("{}", text);
            Ok(())
        }
    }
}
