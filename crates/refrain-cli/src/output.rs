//! JSON output formatting

use refrain_core::{RecognitionMatch, SongMeta};
use serde::Serialize;

#[derive(Serialize)]
struct RegisterOutput<'a> {
    song_id: i64,
    title: &'a str,
    artist: &'a str,
}

#[derive(Serialize)]
struct RecognizeOutput<'a> {
    matched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<&'a RecognitionMatch>,
}

#[derive(Serialize)]
struct StatsOutput {
    songs: i64,
    postings: i64,
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing output: {}", e),
    }
}

/// Print the outcome of a registration as JSON
pub fn print_registered(song_id: i64, meta: &SongMeta) {
    print_json(&RegisterOutput {
        song_id,
        title: &meta.title,
        artist: &meta.artist,
    });
}

/// Print a recognition result (or the absence of one) as JSON
pub fn print_recognition(result: Option<&RecognitionMatch>) {
    print_json(&RecognizeOutput {
        matched: result.is_some(),
        result,
    });
}

/// Print catalog totals as JSON
pub fn print_stats(songs: i64, postings: i64) {
    print_json(&StatsOutput { songs, postings });
}
