//! Replay Builder CLI
//!
//! Statcast CSV → replay JSON, MessagePack+LZ4 cache, or a text summary

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "replay_builder")]
#[command(about = "Reconstruct Statcast pitch logs into replay documents", long_about = None)]
struct Cli {
    /// YAML reconstruction config (defaults when omitted)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true, default_value = "false")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Write the replay document as JSON
    Json {
        /// Input Statcast CSV path
        #[arg(long)]
        r#in: PathBuf,

        /// Output JSON path
        #[arg(long)]
        out: PathBuf,

        /// Single-line JSON instead of pretty-printed
        #[arg(long, default_value = "false")]
        compact: bool,
    },

    /// Build a MessagePack+LZ4 replay cache
    Cache {
        /// Input Statcast CSV path
        #[arg(long)]
        r#in: PathBuf,

        /// Output MsgPack+LZ4 file path
        #[arg(long)]
        out: PathBuf,

        /// Schema version (e.g., "v1")
        #[arg(long, default_value = "v1")]
        schema_version: String,

        /// Verify cache after building
        #[arg(long, default_value = "false")]
        verify: bool,

        /// Output metadata JSON file
        #[arg(long)]
        metadata: Option<PathBuf>,
    },

    /// Print a per-at-bat summary
    Inspect {
        /// Input Statcast CSV path
        #[arg(long)]
        r#in: PathBuf,

        /// Only this game
        #[arg(long)]
        game: Option<u64>,
    },

    /// Print (or write) the JSON Schema of the replay document
    Schema {
        /// Output path; stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[cfg(feature = "cli")]
fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Json {
            r#in,
            out,
            compact,
        } => {
            let config = replay_builder::load_config(cli.config.as_deref())?;
            println!("🔨 Building replay JSON...");
            println!("   Input:  {}", r#in.display());
            println!("   Output: {}", out.display());

            let doc = replay_builder::build_replay_json(&r#in, &out, &config, !compact)?;
            println!(
                "\n✅ {} game(s), {} pitches, {} diagnostic(s)",
                doc.games.len(),
                doc.pitch_count(),
                doc.diagnostic_count()
            );
        }

        Commands::Cache {
            r#in,
            out,
            schema_version,
            verify,
            metadata,
        } => {
            let config = replay_builder::load_config(cli.config.as_deref())?;
            println!("🔨 Building replay cache...");
            println!("   Input:  {}", r#in.display());
            println!("   Output: {}", out.display());
            println!("   Schema: {}", schema_version);

            let meta = replay_builder::build_replay_cache(&r#in, &out, &config, &schema_version)?;

            print_metadata(&meta);

            if verify {
                verify_cache_integrity(&out, &meta.checksum)?;
            }

            if let Some(metadata_path) = metadata {
                save_metadata(&metadata_path, &meta)?;
            }
        }

        Commands::Inspect { r#in, game } => {
            let config = replay_builder::load_config(cli.config.as_deref())?;
            let doc = replay_builder::reconstruct_file(&r#in, &config)?;
            for line in replay_builder::inspect_lines(&doc, game) {
                println!("{}", line);
            }
        }

        Commands::Schema { out } => {
            let schema = replay_builder::replay_schema_json()?;
            match out {
                Some(path) => {
                    std::fs::write(&path, schema)?;
                    println!("📄 Schema saved to: {}", path.display());
                }
                None => println!("{}", schema),
            }
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn print_metadata(meta: &replay_builder::ReplayMetadata) {
    println!("\n✅ Cache built successfully!");
    println!("   Games:           {}", meta.games);
    println!("   Pitches:         {}", meta.pitches);
    println!(
        "   JSON size:       {} bytes ({:.2} KB)",
        meta.original_size,
        meta.original_size as f64 / 1024.0
    );
    println!(
        "   Compressed size: {} bytes ({:.2} KB)",
        meta.compressed_size,
        meta.compressed_size as f64 / 1024.0
    );
    println!("   Compression:     {:.1}%", meta.compression_ratio * 100.0);
    println!("   Checksum:        {}", meta.checksum);
    println!("   Created:         {}", meta.created_at);
}

#[cfg(feature = "cli")]
fn verify_cache_integrity(cache_path: &Path, checksum: &str) -> Result<()> {
    println!("\n🔍 Verifying cache integrity...");
    let is_valid = replay_builder::verify_cache(cache_path, checksum)?;
    if !is_valid {
        anyhow::bail!("Cache verification failed - checksum mismatch");
    }
    // the cache must also decode back into a document
    let doc = replay_builder::load_replay_cache(cache_path)?;
    println!("✅ Cache verification passed ({} game(s))", doc.games.len());
    Ok(())
}

#[cfg(feature = "cli")]
fn save_metadata(path: &Path, meta: &replay_builder::ReplayMetadata) -> Result<()> {
    let metadata_json = serde_json::to_string_pretty(meta)?;
    std::fs::write(path, metadata_json)?;
    println!("\n📄 Metadata saved to: {}", path.display());
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("replay_builder CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
