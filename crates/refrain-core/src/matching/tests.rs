//! Tests for the voting matcher

use super::*;
use refrain_db::SongMeta;

fn landmark(hash: u32, anchor_ms: i32) -> Landmark {
    Landmark { hash, anchor_ms }
}

fn catalog_with(songs: &[(&str, &[(u32, i32)])]) -> Catalog {
    let mut catalog = Catalog::open_in_memory().unwrap();
    for (title, items) in songs {
        catalog
            .register_song(&SongMeta::new(*title, "Tester"), items)
            .unwrap();
    }
    catalog
}

#[test]
fn empty_catalog_gives_no_match() {
    let catalog = catalog_with(&[]);
    let matcher = Matcher::new(&catalog);

    let result = matcher.best_match(&[landmark(1, 0), landmark(2, 23)]).unwrap();
    assert!(result.is_none());
}

#[test]
fn empty_query_gives_no_match() {
    let catalog = catalog_with(&[("Something", &[(1, 0)])]);
    let matcher = Matcher::new(&catalog);
    assert!(matcher.best_match(&[]).unwrap().is_none());
}

#[test]
fn aligned_hashes_all_vote_for_one_cell() {
    let items: Vec<(u32, i32)> = (0..6).map(|i| (100 + i, i as i32 * 23)).collect();
    let catalog = catalog_with(&[("Aligned", &items)]);

    // Query is the same material observed 46 ms later in the recording.
    let query: Vec<Landmark> = items
        .iter()
        .map(|&(hash, ms)| landmark(hash, ms - 46))
        .collect();

    let found = Matcher::new(&catalog).best_match(&query).unwrap().unwrap();
    assert_eq!(found.song.title, "Aligned");
    assert_eq!(found.votes, 6);
    assert_eq!(found.offset_ms, 46);
}

#[test]
fn scattered_deltas_do_not_accumulate() {
    // Same hashes, but stored at incompatible offsets: every vote lands in
    // its own cell.
    let catalog = catalog_with(&[("Scattered", &[(5, 0), (5, 100), (5, 300)])]);

    let found = Matcher::new(&catalog)
        .best_match(&[landmark(5, 10)])
        .unwrap()
        .unwrap();
    assert_eq!(found.votes, 1);
}

#[test]
fn strongest_song_wins() {
    let a: Vec<(u32, i32)> = (0..10).map(|i| (i, i as i32 * 23)).collect();
    let b: Vec<(u32, i32)> = (0..10).map(|i| (1000 + i, i as i32 * 23)).collect();
    let catalog = catalog_with(&[("A", &a), ("B", &b)]);

    // Query shares two hashes with A and eight with B, all aligned.
    let mut query = Vec::new();
    query.extend((0..2).map(|i| landmark(i, i as i32 * 23)));
    query.extend((2..10).map(|i| landmark(1000 + i, i as i32 * 23)));

    let found = Matcher::new(&catalog).best_match(&query).unwrap().unwrap();
    assert_eq!(found.song.title, "B");
    assert_eq!(found.votes, 8);
}

#[test]
fn tie_breaks_to_lowest_song_id_then_lowest_delta() {
    // Both songs collect exactly one vote.
    let catalog = catalog_with(&[("First", &[(7, 50)]), ("Second", &[(7, 80)])]);

    let found = Matcher::new(&catalog)
        .best_match(&[landmark(7, 0)])
        .unwrap()
        .unwrap();
    assert_eq!(found.song.title, "First");

    // Within one song, the lower Δt wins the tie.
    let catalog = catalog_with(&[("Self", &[(7, 50), (7, 80)])]);
    let found = Matcher::new(&catalog)
        .best_match(&[landmark(7, 0)])
        .unwrap()
        .unwrap();
    assert_eq!(found.offset_ms, 50);
}

#[test]
fn negative_delta_is_a_valid_alignment() {
    // Query starts before the stored anchor point.
    let catalog = catalog_with(&[("Late", &[(3, 0), (4, 23)])]);

    let query = [landmark(3, 100), landmark(4, 123)];
    let found = Matcher::new(&catalog).best_match(&query).unwrap().unwrap();
    assert_eq!(found.offset_ms, -100);
    assert_eq!(found.votes, 2);
}

#[test]
fn duplicate_postings_each_contribute_a_vote() {
    let catalog = catalog_with(&[("Doubled", &[(9, 40), (9, 40)])]);

    let found = Matcher::new(&catalog)
        .best_match(&[landmark(9, 0)])
        .unwrap()
        .unwrap();
    assert_eq!(found.votes, 2);
    assert_eq!(found.offset_ms, 40);
}
