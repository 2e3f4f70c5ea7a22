// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the library consistency engine

use shutterbox::library::{AlbumId, JsonStore, Library, LibraryStore, MemoryStore};
use shutterbox::media::{BlobStore, MediaRef, MediaReleaser};
use shutterbox::LibraryError;
use std::collections::{HashMap, HashSet};

/// Releaser test double counting release calls per reference
#[derive(Default)]
struct CountingReleaser {
    counts: HashMap<MediaRef, usize>,
}

impl CountingReleaser {
    fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

impl MediaReleaser for CountingReleaser {
    fn release(&mut self, media: &MediaRef) {
        *self.counts.entry(media.clone()).or_insert(0) += 1;
    }
}

/// A library hydrated from an explicitly empty store (no seeding)
fn empty_library() -> Library<MemoryStore> {
    let mut store = MemoryStore::new();
    store.save(&[], &[]).unwrap();
    Library::load(store)
}

fn assert_invariants<S: LibraryStore>(library: &Library<S>) {
    let total: usize = library.albums().iter().map(|a| a.photo_count).sum();
    assert_eq!(
        total,
        library.total_photos(),
        "sum of album counts must equal the photo collection size"
    );
    for photo in library.photos() {
        assert!(
            library.album(&photo.album_id).is_some(),
            "every photo must reference an existing album"
        );
    }
}

#[test]
fn test_invariants_hold_across_add_delete_sequences() {
    let mut library = empty_library();
    let mut blobs = BlobStore::new();

    let travel = library.create_album("Travel", "#3B82F6").unwrap();
    let work = library.create_album("Work", "#10B981").unwrap();
    assert_invariants(&library);

    let mut refs = Vec::new();
    for i in 0..4 {
        let album = if i % 2 == 0 { &travel.id } else { &work.id };
        let media = blobs.insert_still(vec![i]);
        library.add_photo(album, media.clone()).unwrap();
        refs.push(media);
        assert_invariants(&library);
    }

    // Delete a cross-album subset in one operation
    let subset: HashSet<MediaRef> = vec![refs[0].clone(), refs[1].clone()].into_iter().collect();
    library.delete_photos(&subset, &mut blobs);
    assert_invariants(&library);
    assert_eq!(library.total_photos(), 2);

    library.delete_album(&work.id, &mut blobs);
    assert_invariants(&library);
}

#[test]
fn test_cover_scenario_p1_p2() {
    let mut library = empty_library();
    let mut blobs = BlobStore::new();

    let album = library.create_album("A", "#ffffff").unwrap();
    assert_eq!(library.album(&album.id).unwrap().photo_count, 0);
    assert!(library.album(&album.id).unwrap().cover_photo_url.is_none());

    let p1 = blobs.insert_still(vec![1]);
    library.add_photo(&album.id, p1.clone()).unwrap();
    let a = library.album(&album.id).unwrap();
    assert_eq!(a.cover_photo_url.as_ref(), Some(&p1));
    assert_eq!(a.photo_count, 1);

    let p2 = blobs.insert_still(vec![2]);
    library.add_photo(&album.id, p2.clone()).unwrap();
    let a = library.album(&album.id).unwrap();
    assert_eq!(a.cover_photo_url.as_ref(), Some(&p1), "cover unchanged");
    assert_eq!(a.photo_count, 2);

    library.delete_photo(&p1, &mut blobs);
    let a = library.album(&album.id).unwrap();
    assert_eq!(a.cover_photo_url.as_ref(), Some(&p2), "cover moves to p2");
    assert_eq!(a.photo_count, 1);
}

#[test]
fn test_deleted_cover_replaced_by_first_in_collection_order() {
    let mut library = empty_library();
    let mut blobs = BlobStore::new();
    let album = library.create_album("A", "#ffffff").unwrap();

    let p1 = blobs.insert_still(vec![1]);
    let p2 = blobs.insert_still(vec![2]);
    let p3 = blobs.insert_still(vec![3]);
    library.add_photo(&album.id, p1.clone()).unwrap();
    library.add_photo(&album.id, p2).unwrap();
    library.add_photo(&album.id, p3.clone()).unwrap();

    // Cover was p1 (set when the album was empty). Deleting it promotes the
    // photo now first in collection order: the most recently added survivor.
    library.delete_photo(&p1, &mut blobs);
    let a = library.album(&album.id).unwrap();
    assert_eq!(a.cover_photo_url.as_ref(), Some(&p3));
    assert_eq!(a.photo_count, 2);
}

#[test]
fn test_deleting_last_photo_clears_cover() {
    let mut library = empty_library();
    let mut blobs = BlobStore::new();
    let album = library.create_album("A", "#ffffff").unwrap();

    let p1 = blobs.insert_still(vec![1]);
    library.add_photo(&album.id, p1.clone()).unwrap();
    library.delete_photo(&p1, &mut blobs);

    let a = library.album(&album.id).unwrap();
    assert_eq!(a.photo_count, 0);
    assert!(a.cover_photo_url.is_none());
}

#[test]
fn test_delete_album_removes_exactly_its_photos() {
    let mut library = empty_library();
    let mut blobs = BlobStore::new();

    let doomed = library.create_album("Doomed", "#ff0000").unwrap();
    let kept = library.create_album("Kept", "#00ff00").unwrap();

    let d1 = blobs.insert_still(vec![1]);
    let d2 = blobs.insert_still(vec![2]);
    let k1 = blobs.insert_still(vec![3]);
    library.add_photo(&doomed.id, d1).unwrap();
    library.add_photo(&doomed.id, d2).unwrap();
    library.add_photo(&kept.id, k1.clone()).unwrap();

    library.delete_album(&doomed.id, &mut blobs);

    assert!(library.album(&doomed.id).is_none());
    assert_eq!(library.total_photos(), 1);
    assert_eq!(library.photos()[0].url, k1);
    assert_invariants(&library);
}

#[test]
fn test_empty_delete_set_is_a_strict_noop() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.json");

    let mut library = Library::load(JsonStore::new(&path));
    let album = library.create_album("A", "#ffffff").unwrap();
    let mut blobs = BlobStore::new();
    let p = blobs.insert_still(vec![1]);
    library.add_photo(&album.id, p).unwrap();

    let before = std::fs::read(&path).unwrap();
    let mut releaser = CountingReleaser::default();
    library.delete_photos(&HashSet::new(), &mut releaser);

    assert_eq!(releaser.total(), 0, "no resource release on empty set");
    let after = std::fs::read(&path).unwrap();
    assert_eq!(before, after, "no persistence write on empty set");
}

#[test]
fn test_transient_refs_released_exactly_once() {
    let mut library = empty_library();
    let mut blobs = BlobStore::new();
    let album = library.create_album("A", "#ffffff").unwrap();

    let p1 = blobs.insert_still(vec![1]);
    let p2 = blobs.insert_video(vec![2]);
    let remote = MediaRef::remote("https://example.com/seed.jpg");
    library.add_photo(&album.id, p1.clone()).unwrap();
    library.add_photo(&album.id, p2.clone()).unwrap();
    library.add_photo(&album.id, remote.clone()).unwrap();

    let mut releaser = CountingReleaser::default();
    let all: HashSet<MediaRef> = vec![p1.clone(), p2.clone(), remote.clone()]
        .into_iter()
        .collect();
    library.delete_photos(&all, &mut releaser);

    assert_eq!(releaser.counts.get(&p1), Some(&1));
    assert_eq!(releaser.counts.get(&p2), Some(&1));
    assert_eq!(releaser.counts.get(&remote), None, "remote refs never released");
}

#[test]
fn test_delete_album_releases_its_buffers() {
    let mut library = empty_library();
    let mut blobs = BlobStore::new();
    let album = library.create_album("A", "#ffffff").unwrap();

    let p1 = blobs.insert_still(vec![1]);
    let p2 = blobs.insert_still(vec![2]);
    library.add_photo(&album.id, p1.clone()).unwrap();
    library.add_photo(&album.id, p2.clone()).unwrap();
    assert_eq!(blobs.len(), 2);

    library.delete_album(&album.id, &mut blobs);
    assert!(blobs.is_empty(), "both buffers released");
}

#[test]
fn test_add_photo_to_missing_album_is_not_found() {
    let mut library = empty_library();
    let result = library.add_photo(
        &AlbumId::from_raw("missing"),
        MediaRef::remote("https://x/1.jpg"),
    );
    assert!(matches!(result, Err(LibraryError::NotFound(_))));
    assert_eq!(library.total_photos(), 0);
}

#[test]
fn test_seeded_hydration_when_store_is_empty() {
    let library = Library::load(MemoryStore::new());
    assert_eq!(library.albums().len(), 3);
    assert_eq!(library.total_photos(), 3);
    assert_invariants(&library);

    let travel = library.album_by_name("Travel").unwrap();
    assert_eq!(travel.photo_count, 2);
    assert!(travel.cover_photo_url.is_some());
    let family = library.album_by_name("Family").unwrap();
    assert_eq!(family.photo_count, 0);
    assert!(family.cover_photo_url.is_none());
}

#[test]
fn test_json_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.json");

    {
        let mut library = Library::load(JsonStore::new(&path));
        let mut blobs = BlobStore::new();
        let album = library.create_album("Persisted", "#123456").unwrap();
        let p = blobs.insert_still(vec![1, 2, 3]);
        library.add_photo(&album.id, p).unwrap();
    }

    let reloaded = Library::load(JsonStore::new(&path));
    assert_eq!(reloaded.albums().len(), 4, "3 seeded albums + 1 created");
    let persisted = reloaded.album_by_name("Persisted").unwrap();
    assert_eq!(persisted.photo_count, 1);
    assert_invariants(&reloaded);
}

#[test]
fn test_mutations_are_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.json");

    {
        let mut library = Library::load(JsonStore::new(&path));
        let album = library.create_album("A", "#ffffff").unwrap();
        let mut blobs = BlobStore::new();
        let p = blobs.insert_still(vec![1]);
        library.add_photo(&album.id, p.clone()).unwrap();
        library.delete_photo(&p, &mut blobs);
        library.delete_album(&album.id, &mut blobs);
        for seeded in library.albums().to_vec() {
            library.delete_album(&seeded.id, &mut blobs);
        }
    }

    // A saved-but-empty document must hydrate as empty, not re-seed
    let reloaded = Library::load(JsonStore::new(&path));
    assert!(reloaded.albums().is_empty());
    assert_eq!(reloaded.total_photos(), 0);
}
