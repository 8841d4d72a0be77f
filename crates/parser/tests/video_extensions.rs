use seedfin_parser::title::{is_video_file, normalize};

#[test]
fn recognizes_supported_video_extensions() {
    for name in [
        "a.mp4", "b.MKV", "c.mov", "d.webm", "e.avi", "f.m4v", "g.WMV", "h.flv",
    ] {
        assert!(is_video_file(name), "should detect {name}");
    }
}

#[test]
fn rejects_non_video_files() {
    for name in [
        "notes.txt",
        "poster.jpg",
        "subs.srt",
        "metadata.nfo",
        "archive.zip",
        "stream.ts",
    ] {
        assert!(!is_video_file(name), "should NOT detect {name}");
    }
}

#[test]
fn every_video_extension_is_stripped() {
    for ext in ["mp4", "avi", "mkv", "mov", "wmv", "flv", "webm", "m4v"] {
        assert_eq!(normalize(&format!("Heat.{ext}")), "Heat");
        assert_eq!(normalize(&format!("Heat.{}", ext.to_uppercase())), "Heat");
    }
}

#[test]
fn other_extensions_become_words() {
    assert_eq!(normalize("Heat.srt"), "Heat srt");
}
