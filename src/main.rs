use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fix_group_gen::codegen::CodeEmitter;
use fix_group_gen::schema::{SchemaModel, load_schema};
use fix_group_gen::sink::{FsSinkProvider, SRC_DIR_ENV, SourceRoot};

/// Generate FIX repeating-group manager sources from a FIX schema model.
///
/// Emits one Rust module per message type under
/// <src-dir>/<version>/auto/group/. Without a source root the modules are
/// printed to stdout.
#[derive(Parser)]
#[command(name = "fix-group-gen", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate group managers for one FIX version.
    Generate {
        /// FIX version to generate for (e.g., "4.4", "5.0SP1").
        #[arg(long, default_value = "4.4")]
        fix_version: String,

        /// Schema model JSON file.
        #[arg(long, env = "FIX_SCHEMA")]
        schema: PathBuf,

        /// Source root for generated files. The SRC_DIR environment
        /// variable takes precedence when set.
        #[arg(long)]
        src_dir: Option<PathBuf>,

        /// Suppress non-error output.
        #[arg(long, short)]
        quiet: bool,
    },

    /// List the FIX versions and message types in a schema model.
    List {
        /// Schema model JSON file.
        #[arg(long, env = "FIX_SCHEMA")]
        schema: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(matches!(cli.command, Commands::Generate { quiet: true, .. }));

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");

        // Print cause chain.
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = std::error::Error::source(cause);
        }

        process::exit(1);
    }
}

/// Log to stderr so console-mode artifacts on stdout stay clean.
fn init_tracing(quiet: bool) {
    let default = if quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> fix_group_gen::error::Result<()> {
    match cli.command {
        Commands::Generate {
            fix_version,
            schema,
            src_dir,
            quiet,
        } => {
            if !quiet {
                eprintln!("Loading schema model from {}", schema.display());
            }
            let model = load_schema(&schema)?;

            let env_root = std::env::var_os(SRC_DIR_ENV).map(PathBuf::from);
            let root = SourceRoot::resolve(env_root, src_dir);
            let emitter = CodeEmitter::new(&fix_version, FsSinkProvider::new(root));
            let stats = emitter.generate(&model)?;

            if !quiet {
                eprintln!(
                    "Generated {} group managers for FIX {} ({} native groups, {} header groups each)",
                    stats.artifacts_generated,
                    fix_version,
                    stats.native_groups_generated,
                    stats.header_groups
                );
                if stats.message_types_without_groups > 0 {
                    eprintln!(
                        "{} message types have header groups only",
                        stats.message_types_without_groups
                    );
                }
                if stats.console_artifacts > 0 {
                    eprintln!("{} artifacts written to stdout", stats.console_artifacts);
                }
                eprintln!("Done.");
            }
        }

        Commands::List { schema } => {
            let model = load_schema(&schema)?;
            for version in model.versions() {
                let messages = model.context_order_map(version)?;
                println!("{version}: {} message types", messages.len());
                for msg_type in messages.message_types() {
                    println!("  {msg_type}");
                }
            }
        }
    }

    Ok(())
}
