use std::time::Duration;

use musicard::types::{SearchResponse, Track};

#[test]
fn test_search_response_to_tracks() {
    let body = r#"{
        "results": {
            "songs": {
                "href": "/v1/catalog/de/search?term=Queen+Bohemian+Rhapsody&types=songs",
                "data": [{
                    "id": "1440806041",
                    "type": "songs",
                    "attributes": {
                        "name": "Bohemian Rhapsody",
                        "artistName": "Queen",
                        "albumName": "A Night at the Opera",
                        "durationInMillis": 354320,
                        "url": "https://music.apple.com/de/album/1440806041"
                    }
                }]
            }
        }
    }"#;

    let response: SearchResponse = serde_json::from_str(body).unwrap();
    let tracks: Vec<Track> = response
        .results
        .songs
        .map(|page| page.data.into_iter().map(Track::from).collect())
        .unwrap_or_default();

    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].artist, "Queen");
    assert_eq!(tracks[0].album.as_deref(), Some("A Night at the Opera"));
    assert_eq!(tracks[0].duration, Some(Duration::from_millis(354_320)));
}

#[test]
fn test_search_response_without_songs() {
    let response: SearchResponse = serde_json::from_str(r#"{"results": {}}"#).unwrap();
    assert!(response.results.songs.is_none());
}
