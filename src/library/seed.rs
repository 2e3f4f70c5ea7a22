// SPDX-License-Identifier: GPL-3.0-only

//! Seeded default collections used when no saved library exists

use crate::library::types::{Album, AlbumId, Photo, PhotoId};
use crate::media::MediaRef;
use chrono::{Duration, Utc};

/// Default albums and photos for a fresh library.
///
/// Derived fields are pre-populated consistently: Travel holds two seed
/// photos, Work one, Family none. Seed media are remote URLs and therefore
/// never subject to resource release.
pub fn seeded_library() -> (Vec<Album>, Vec<Photo>) {
    let travel = AlbumId::from_raw("1");
    let work = AlbumId::from_raw("2");
    let family = AlbumId::from_raw("3");

    let albums = vec![
        Album {
            id: travel.clone(),
            name: "Travel".to_string(),
            theme_color: "#3B82F6".to_string(),
            photo_count: 2,
            cover_photo_url: Some(MediaRef::remote(
                "https://picsum.photos/seed/vacation/400/400",
            )),
        },
        Album {
            id: work.clone(),
            name: "Work".to_string(),
            theme_color: "#10B981".to_string(),
            photo_count: 1,
            cover_photo_url: Some(MediaRef::remote("https://picsum.photos/seed/work/400/400")),
        },
        Album {
            id: family,
            name: "Family".to_string(),
            theme_color: "#EF4444".to_string(),
            photo_count: 0,
            cover_photo_url: None,
        },
    ];

    let now = Utc::now();
    let photos = vec![
        Photo {
            id: PhotoId::from_raw("p1"),
            album_id: travel.clone(),
            url: MediaRef::remote("https://picsum.photos/seed/beach/800/800"),
            timestamp: now - Duration::seconds(100),
        },
        Photo {
            id: PhotoId::from_raw("p2"),
            album_id: travel,
            url: MediaRef::remote("https://picsum.photos/seed/mountain/800/800"),
            timestamp: now - Duration::seconds(50),
        },
        Photo {
            id: PhotoId::from_raw("p3"),
            album_id: work,
            url: MediaRef::remote("https://picsum.photos/seed/office/800/800"),
            timestamp: now - Duration::seconds(20),
        },
    ];

    (albums, photos)
}
