// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};

mod cli;

#[derive(Parser)]
#[command(name = "shutterbox")]
#[command(about = "Mobile-style media capture and album library")]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List albums with their photo counts and covers
    Albums,

    /// Create a new album
    NewAlbum {
        /// Album display name
        name: String,

        /// Accent color token
        #[arg(short, long, default_value = "#3B82F6")]
        color: String,
    },

    /// Take a photo into an album (synthetic camera)
    Photo {
        /// Target album name
        #[arg(short, long)]
        album: String,

        /// Countdown seconds (0, 3 or 10)
        #[arg(short, long, default_value = "0")]
        timer: u32,

        /// Use the self-facing camera (mirrored capture)
        #[arg(long)]
        front: bool,

        /// Flash mode (off, on, auto)
        #[arg(short, long, default_value = "off")]
        flash: String,

        /// Exposure multiplier (0.3 - 2.5)
        #[arg(short, long)]
        exposure: Option<f32>,
    },

    /// Record a video into an album (synthetic camera)
    Video {
        /// Target album name
        #[arg(short, long)]
        album: String,

        /// Recording duration in seconds
        #[arg(short, long, default_value = "3")]
        duration: u64,
    },

    /// Delete an album and all of its photos
    DeleteAlbum {
        /// Album display name
        name: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=shutterbox=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Albums) | None => cli::list_albums(),
        Some(Commands::NewAlbum { name, color }) => cli::create_album(&name, &color),
        Some(Commands::Photo {
            album,
            timer,
            front,
            flash,
            exposure,
        }) => cli::take_photo(&album, timer, front, &flash, exposure),
        Some(Commands::Video { album, duration }) => cli::record_video(&album, duration),
        Some(Commands::DeleteAlbum { name }) => cli::delete_album(&name),
    }
}
