//! Episode library loading against real files on disk.

use std::path::Path;

use tempfile::tempdir;

use podcli::episodes::{Library, LibraryError};

const SAMPLE_LIBRARY: &str = r#"{
    "episodes": [
        {
            "id": "ep-001",
            "title": "How Rust Took Over The Backend",
            "members": "Ana Souza, Diego Lima",
            "thumbnail": "https://example.com/ep-001.jpg",
            "description": "A conversation about backend rewrites.",
            "duration": 3127,
            "url": "https://example.com/ep-001.mp3"
        },
        {
            "id": "ep-002",
            "title": "Short One",
            "members": "Ana Souza",
            "thumbnail": "https://example.com/ep-002.jpg",
            "duration": 95,
            "url": "https://example.com/ep-002.mp3"
        }
    ]
}"#;

#[test]
fn load_episodes_from_json_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("episodes.json");
    std::fs::write(&path, SAMPLE_LIBRARY)?;

    let library = Library::load(&path)?;

    assert_eq!(library.len(), 2);
    assert_eq!(library.episodes()[0].id, "ep-001");
    assert_eq!(library.episodes()[0].duration, 3127);
    assert_eq!(library.episodes()[1].title, "Short One");
    assert!(library.episodes()[1].description.is_none());

    Ok(())
}

#[test]
fn empty_library_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("episodes.json");
    std::fs::write(&path, r#"{ "episodes": [] }"#)?;

    let result = Library::load(&path);
    assert!(matches!(result, Err(LibraryError::EmptyLibrary)));

    Ok(())
}

#[test]
fn missing_file_is_an_io_error() {
    let result = Library::load(Path::new("/definitely/not/here/episodes.json"));
    assert!(matches!(result, Err(LibraryError::IoError(_))));
}

#[test]
fn malformed_json_is_a_parse_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("episodes.json");
    std::fs::write(&path, "{ not json")?;

    let result = Library::load(&path);
    assert!(matches!(result, Err(LibraryError::ParseError(_))));

    Ok(())
}
