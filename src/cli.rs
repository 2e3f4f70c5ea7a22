// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands for capture and library operations
//!
//! Drives the capture session controller against the synthetic camera, with
//! tokio supplying the one-second countdown/recording ticks the capture
//! screen would otherwise deliver.

use shutterbox::capture::{
    CaptureController, ChunkRecorder, RandomFlashDecider, ShootingMode, ShutterAction,
    SyntheticCamera,
};
use shutterbox::constants::{FLASH_OVERLAY, TIMER_TICK};
use shutterbox::export::DownloadExporter;
use shutterbox::library::{JsonStore, Library, LibraryStore};
use shutterbox::media::BlobStore;

/// List all albums and their derived fields
pub fn list_albums() -> Result<(), Box<dyn std::error::Error>> {
    let library = Library::load(JsonStore::default_location());

    if library.albums().is_empty() {
        println!("No albums.");
        return Ok(());
    }

    println!("Albums:");
    println!();
    for album in library.albums() {
        let cover = album
            .cover_photo_url
            .as_ref()
            .map(|c| c.as_str())
            .unwrap_or("-");
        println!(
            "  {:<16} {:>3} photos  {}  cover: {}",
            album.name, album.photo_count, album.theme_color, cover
        );
    }
    println!();
    println!("{} photos total", library.total_photos());
    Ok(())
}

/// Create a new album
pub fn create_album(name: &str, color: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut library = Library::load(JsonStore::default_location());
    let album = library.create_album(name, color)?;
    println!("Created album '{}' ({})", album.name, album.id.as_str());
    Ok(())
}

/// Delete an album and all of its photos
pub fn delete_album(name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut library = Library::load(JsonStore::default_location());
    let Some(album) = library.album_by_name(name) else {
        return Err(format!("No album named '{}'", name).into());
    };
    let album_id = album.id.clone();

    // Capture buffers are per-process; a fresh registry simply reports
    // already-gone buffers from earlier runs
    let mut blobs = BlobStore::new();
    library.delete_album(&album_id, &mut blobs);
    println!("Deleted album '{}'", name);
    Ok(())
}

fn build_controller() -> CaptureController {
    CaptureController::new(
        Box::new(SyntheticCamera::new()),
        Box::new(ChunkRecorder::new()),
        Box::new(RandomFlashDecider),
        Box::new(DownloadExporter::default_location()),
    )
}

fn select_target<S: LibraryStore>(
    controller: &mut CaptureController,
    library: &Library<S>,
    album: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(target) = library.album_by_name(album) else {
        return Err(format!("No album named '{}'", album).into());
    };
    controller.select_album(target.id.clone());
    Ok(())
}

/// Take a photo using the synthetic camera
pub fn take_photo(
    album: &str,
    timer: u32,
    front: bool,
    flash: &str,
    exposure: Option<f32>,
) -> Result<(), Box<dyn std::error::Error>> {
    if !matches!(timer, 0 | 3 | 10) {
        return Err("Timer must be 0, 3 or 10 seconds".into());
    }

    let mut library = Library::load(JsonStore::default_location());
    let mut controller = build_controller();
    select_target(&mut controller, &library, album)?;

    if front {
        // Toggle flips Back -> Front and acquires the stream
        controller.toggle_facing();
    } else {
        controller.open();
    }

    match flash {
        "off" => {}
        "on" => controller.cycle_flash_mode(),
        "auto" => {
            controller.cycle_flash_mode();
            controller.cycle_flash_mode();
        }
        other => return Err(format!("Unknown flash mode '{}'", other).into()),
    }

    while controller.timer_mode().seconds() != timer {
        controller.cycle_timer_mode();
    }

    if let Some(value) = exposure {
        controller.set_exposure(value);
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        match controller.press_shutter(&mut library) {
            ShutterAction::Captured(media) => println!("Captured {}", media),
            ShutterAction::CountdownStarted(secs) => {
                println!("Countdown: {}", secs);
                loop {
                    tokio::time::sleep(TIMER_TICK).await;
                    if let Some(action) = controller.tick_countdown(&mut library) {
                        match action {
                            ShutterAction::Captured(media) => println!("Captured {}", media),
                            other => println!("Capture did not complete: {:?}", other),
                        }
                        break;
                    }
                    if let Some(left) = controller.countdown() {
                        println!("Countdown: {}", left);
                    }
                }
            }
            other => println!("Shutter rejected: {:?}", other),
        }

        if controller.flash_active() {
            tokio::time::sleep(FLASH_OVERLAY).await;
            controller.clear_flash();
        }
    });

    controller.close();
    Ok(())
}

/// Record a video using the synthetic camera
pub fn record_video(album: &str, duration: u64) -> Result<(), Box<dyn std::error::Error>> {
    if duration == 0 {
        return Err("Duration must be at least 1 second".into());
    }

    let mut library = Library::load(JsonStore::default_location());
    let mut controller = build_controller();
    select_target(&mut controller, &library, album)?;
    controller.open();
    controller.set_mode(ShootingMode::Video);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        match controller.press_shutter(&mut library) {
            ShutterAction::RecordingStarted => {
                for _ in 0..duration {
                    tokio::time::sleep(TIMER_TICK).await;
                    controller.tick_recording();
                    println!("Recording... {}s", controller.recording_duration());
                }
                match controller.press_shutter(&mut library) {
                    ShutterAction::RecordingStopped(media) => println!("Captured {}", media),
                    other => println!("Recording did not finalize: {:?}", other),
                }
            }
            other => println!("Could not start recording: {:?}", other),
        }
    });

    controller.close();
    Ok(())
}
