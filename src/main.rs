use anyhow::Result;
use clap::{Parser, Subcommand};
mod auth;
use pagelock::{BuildConfig, DEFAULT_ITERATIONS, KdfParams, Manifest};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "pagelock")]
#[command(
    version,
    about = "Bundles a static site into one HTML file and locks it behind a password."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Bundles the source assets, encrypts them, and writes the locked site
    Build {
        /// Directory with index.html, styles.css, scripts, and assets
        #[arg(
            long,
            short = 's',
            value_name = "DIR",
            env = "PAGELOCK_SOURCE",
            default_value = "src"
        )]
        source: PathBuf,

        /// Directory the wrapper page and copied assets are written to
        #[arg(
            long,
            short = 'o',
            value_name = "DIR",
            env = "PAGELOCK_OUTPUT",
            default_value = "public"
        )]
        output: PathBuf,

        /// PBKDF2 iteration count (default: 100000, or the manifest value)
        #[arg(long)]
        iterations: Option<u32>,

        /// Title shown on the lock screen and in the browser tab
        #[arg(long)]
        title: Option<String>,

        /// Fail if the shell is missing an expected stylesheet/script tag
        #[arg(long)]
        strict: bool,
    },

    /// Decrypts a generated wrapper page to prove the password unlocks it
    #[command(arg_required_else_help = true)]
    Verify {
        /// Path to a generated wrapper page
        wrapper: PathBuf,
    },
}

fn resolve_build_config(
    source: PathBuf,
    output: PathBuf,
    iterations: Option<u32>,
    title: Option<String>,
    strict: bool,
) -> Result<BuildConfig> {
    let manifest = Manifest::load(&source)?;

    let iterations = iterations
        .or(manifest.iterations)
        .unwrap_or(DEFAULT_ITERATIONS);
    let title = title
        .or(manifest.title)
        .unwrap_or_else(|| "Protected page".to_string());
    let strict = strict || manifest.strict.unwrap_or(false);

    let password = auth::read_password(true)?;

    Ok(BuildConfig {
        password,
        kdf: KdfParams::new(iterations)?,
        title,
        strict,
        source_dir: source,
        output_dir: output,
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();
    match args.command {
        Commands::Build {
            source,
            output,
            iterations,
            title,
            strict,
        } => {
            let config = resolve_build_config(source, output, iterations, title, strict)?;
            let report = pagelock::build(config)?;

            println!("Plaintext:  {} bytes", report.plaintext_len);
            println!("Encrypted:  {} bytes", report.blob_len);
            println!("Base64:     {} chars", report.base64_len);
            for name in &report.copied {
                println!("Copied {name}");
            }
            println!("Wrapper written to {}", report.wrapper_path.display());
            println!("Keep the password safe; it is not stored anywhere.");
        }
        Commands::Verify { wrapper } => {
            let password = auth::read_password(false)?;
            let size = pagelock::verify(&wrapper, password)?;
            println!("unlocked {size} bytes");
        }
    }

    Ok(())
}
