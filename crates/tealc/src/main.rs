use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use log::{debug, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use tealc::commands;
use tealc::options::Options;
use tealc::programs::ProgramKind;

#[derive(Parser)]
#[clap(
    name = env!("CARGO_BIN_NAME"),
    about = "Builds TEAL programs and compiles them to TEAL assembly. Without a subcommand, prints the approval program.",
    rename_all = "kebab-case",
    author,
    version = env!("CARGO_PKG_VERSION"),
)]
pub struct Cli {
    /// Path to a toml options file
    #[clap(long = "config", short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Display debug logging
    #[clap(long, short = 'v', global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compile a program and print or write its TEAL
    Compile(CompileArgs),
    /// Deploy the approval program with a number, then make a no-op call against it
    Simulate(SimulateArgs),
}

#[derive(Args, Default)]
#[clap(next_help_heading = "Compile Options")]
pub struct CompileArgs {
    /// Program to compile
    #[clap(long, short = 'p', value_enum)]
    pub program: Option<ProgramKind>,

    /// TEAL version to target (defaults to the program's own)
    #[clap(long = "target-version", short = 't')]
    pub target_version: Option<u8>,

    /// Write the TEAL to a file instead of stdout
    #[clap(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct SimulateArgs {
    /// Number passed as the first application argument at deployment
    #[clap(long, short = 'n', default_value_t = 50)]
    pub number: u64,
}

impl CompileArgs {
    fn apply(self, options: &mut Options) {
        if let Some(program) = self.program {
            options.program = program;
        }
        if let Some(version) = self.target_version {
            options.version = Some(version);
        }
        if let Some(output) = self.output {
            options.output_path = Some(output);
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        let err = format!("{:?}", err);
        eprintln!("{}", err.bold().red());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut options = match &cli.config {
        Some(path) => Options::from_file(path)?,
        None => Options::default(),
    };
    if cli.verbose {
        options.verbosity_level = LevelFilter::Debug;
    }

    TermLogger::init(
        options.verbosity_level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;
    debug!("tealc version: {}", env!("CARGO_PKG_VERSION"));

    match cli.command.unwrap_or_else(|| Command::Compile(CompileArgs::default())) {
        Command::Compile(args) => {
            args.apply(&mut options);
            let teal = commands::compile(&options)?;
            commands::emit(&teal, options.output_path.as_deref())
        }
        Command::Simulate(args) => {
            let report = commands::simulate(args.number)?;
            println!("{}", report);
            Ok(())
        }
    }
}
