use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use terminal_symphony::cli::Cli;
use terminal_symphony::logging;
use terminal_symphony::playback::{CancellationToken, EntryScheduler};
use terminal_symphony::sound::{create_player, spawn_playback};
use terminal_symphony::terminal::Screen;
use terminal_symphony::time::EpochClock;
use terminal_symphony::transcript::load_transcript;

/// How long to hold the epoch back waiting for audio output to begin
const AUDIO_START_TIMEOUT: Duration = Duration::from_secs(2);

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    let settings = cli.resolve()?;

    logging::init_file_logging(&settings.log_file, settings.log_level)
        .context("Failed to initialize logging")?;
    tracing::info!("Script started.");

    let transcript = load_transcript(&settings.transcript_csv_path).with_context(|| {
        format!(
            "Failed to load transcript {}",
            settings.transcript_csv_path.display()
        )
    })?;
    tracing::info!("Transcript loaded.");
    tracing::debug!(
        "{} transcript entries spanning {:.2}s",
        transcript.len(),
        transcript.total_duration()
    );

    tracing::info!("Starting audio playback and transcript display.");
    let player = create_player(
        settings.audio_backend,
        &settings.player_command,
        settings.volume,
    );
    let audio = spawn_playback(player, settings.podcast_audio_path.clone())
        .context("Failed to start audio playback")?;
    audio.wait_started(AUDIO_START_TIMEOUT);
    let clock = EpochClock::start();

    let screen = Screen::new(io::stdout(), settings.palette.clone(), settings.prompt.clone())
        .with_large_font(settings.large_font);
    let rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut scheduler = EntryScheduler::new(clock, screen, rng, CancellationToken::new());
    let report = scheduler.run(&transcript).context("Transcript display failed")?;
    tracing::info!("Transcript display completed.");
    tracing::debug!(
        "Presented {} of {} entries",
        report.presented(),
        transcript.len()
    );
    tracing::info!("Script finished.");

    let mut screen = scheduler.into_screen();
    screen
        .completion(&settings.output_video_path)
        .context("Failed to write completion message")?;

    if let Err(e) = audio.join() {
        tracing::error!("Audio playback failed: {}", e);
    }

    Ok(())
}
