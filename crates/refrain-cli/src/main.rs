//! refrain - register and recognize songs from the command line.
//!
//! Usage: refrain --db catalog.db register song.wav --title ... --artist ...
//!        refrain --db catalog.db recognize query.wav

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use refrain_core::{audio, Engine, SongMeta};

mod output;

#[derive(Parser, Debug)]
#[command(name = "refrain")]
#[command(about = "Landmark-hash audio fingerprinting", long_about = None)]
struct Cli {
    /// Catalog database path
    #[arg(short, long, default_value = "catalog.db")]
    db: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fingerprint a PCM16 WAV file and add it to the catalog
    Register {
        /// Input WAV path (16-bit integer PCM, mono or stereo)
        input: String,

        #[arg(long)]
        title: String,

        #[arg(long)]
        artist: String,

        #[arg(long)]
        album: Option<String>,

        /// Release year, 0 if unknown
        #[arg(long, default_value_t = 0)]
        year: u32,

        #[arg(long)]
        genre: Option<String>,
    },

    /// Identify a WAV query against the catalog
    Recognize {
        /// Query WAV path
        input: String,
    },

    /// Print catalog totals
    Stats,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    match cli.command {
        Command::Register {
            input,
            title,
            artist,
            album,
            year,
            genre,
        } => {
            let wav = audio::load_wav(&input)
                .with_context(|| format!("failed to load {}", input))?;

            let meta = SongMeta {
                title,
                artist,
                album,
                year,
                genre,
            };

            let mut engine = Engine::open(&cli.db)?;
            let song_id = engine.register(&wav.samples, wav.sample_rate, &meta)?;
            output::print_registered(song_id, &meta);
        }

        Command::Recognize { input } => {
            let wav = audio::load_wav(&input)
                .with_context(|| format!("failed to load {}", input))?;

            let engine = Engine::open(&cli.db)?;
            let result = engine.recognize(&wav.samples, wav.sample_rate)?;
            output::print_recognition(result.as_ref());
        }

        Command::Stats => {
            let engine = Engine::open(&cli.db)?;
            let catalog = engine.catalog();
            output::print_stats(catalog.song_count()?, catalog.posting_count()?);
        }
    }

    Ok(())
}
