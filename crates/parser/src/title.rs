//! Release-name cleanup.
//!
//! Turns a noisy torrent/file name such as
//! `Show.Name.S01E02.1080p.BluRay.x264.mkv` into a catalog search query
//! (`Show Name`).

use regex::Regex;
use std::sync::LazyLock;

static VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mkv", "mov", "wmv", "flv", "webm", "m4v"];

static RE_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(mp4|avi|mkv|mov|wmv|flv|webm|m4v)$").unwrap());

// Word boundaries are ASCII-only: a Cyrillic letter counts as a non-word
// character, so `Фильм2019` still loses its year.
static RE_QUALITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?-u:\b)(1080p|720p|480p|4K|BluRay|WEBRip|DVDRip|HDTV|x264|x265|HEVC|DTS|AC3)(?-u:\b)",
    )
    .unwrap()
});

// Case-sensitive: lowercase `s01e02` survives this pass.
static RE_MARKER_OR_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u:\b)(S[0-9]{1,2}E[0-9]{1,2}|[0-9]{4})(?-u:\b)").unwrap()
});

static RE_SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.\-_\[\]()]").unwrap());

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

// S01E02, s1e3, etc.
static RE_SXXEXX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)S([0-9]{1,2})E([0-9]{1,2})").unwrap());

/// Check if a file name ends in one of the recognized video extensions.
pub fn is_video_file(filename: &str) -> bool {
    match filename.rsplit_once('.') {
        Some((_, ext)) => VIDEO_EXTENSIONS.contains(&ext.to_lowercase().as_str()),
        None => false,
    }
}

/// Normalize a raw release name into a search query.
///
/// Passes, in order: strip a trailing video extension, drop quality/codec
/// tokens, drop `SxxEyy` markers and 4-digit years, turn `. - _ [ ] ( )`
/// into spaces, collapse whitespace. The passes are re-applied until the
/// output stops changing, so tokens only separated out by the punctuation
/// pass (e.g. `Title_1080p`) are removed too and the function is idempotent.
pub fn normalize(raw: &str) -> String {
    let mut current = normalize_once(raw);
    loop {
        let next = normalize_once(&current);
        // Each changing pass strictly shortens the string, so this terminates.
        if next == current {
            return current;
        }
        current = next;
    }
}

fn normalize_once(raw: &str) -> String {
    let s = RE_EXTENSION.replace(raw, "");
    let s = RE_QUALITY.replace_all(&s, "");
    let s = RE_MARKER_OR_YEAR.replace_all(&s, "");
    let s = RE_SEPARATORS.replace_all(&s, " ");
    let s = RE_WHITESPACE.replace_all(&s, " ");
    s.trim().to_string()
}

/// Extract `(season, episode)` from an `SxxEyy` marker anywhere in a file name.
pub fn parse_episode_marker(filename: &str) -> Option<(u32, u32)> {
    let caps = RE_SXXEXX.captures(filename)?;
    let season = caps[1].parse().ok()?;
    let episode = caps[2].parse().ok()?;
    Some((season, episode))
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_release_name() {
        assert_eq!(normalize("Show.Name.S01E02.1080p.BluRay.x264.mkv"), "Show Name");
    }

    #[test]
    fn movie_with_year_and_tag() {
        assert_eq!(normalize("Movie (2021) [WEBRip]"), "Movie");
    }

    #[test]
    fn extension_is_case_insensitive() {
        assert_eq!(normalize("The.Matrix.MKV"), "The Matrix");
        assert_eq!(normalize("clip.M4V"), "clip");
    }

    #[test]
    fn only_trailing_extension_is_stripped() {
        assert_eq!(normalize("avi.Story.mp4"), "avi Story");
    }

    #[test]
    fn quality_tokens_any_case() {
        assert_eq!(normalize("Dune 2160 hevc DTS 4k"), "Dune");
        assert_eq!(normalize("Heat.720P.dvdrip.AC3"), "Heat");
    }

    #[test]
    fn tokens_inside_words_survive() {
        assert_eq!(normalize("Bluray Boys"), "Boys");
        assert_eq!(normalize("HDTVs Party"), "HDTVs Party");
    }

    #[test]
    fn underscore_glued_tokens_are_removed() {
        assert_eq!(normalize("Title_1080p_x265"), "Title");
    }

    #[test]
    fn episode_marker_is_case_sensitive() {
        assert_eq!(normalize("Show S1E5"), "Show");
        assert_eq!(normalize("show s01e05"), "show s01e05");
    }

    #[test]
    fn tokens_glued_to_cyrillic_are_removed() {
        assert_eq!(normalize("Фильм2019 WEBRip"), "Фильм");
        assert_eq!(normalize("Сериал.S01E02.1080pЗвук"), "Сериал Звук");
        assert_eq!(normalize("Фильм.2019.WEBRip.avi"), "Фильм");
    }

    #[test]
    fn empty_and_blank_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("  . - _ [] () "), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        for raw in [
            "Show.Name.S01E02.1080p.BluRay.x264.mkv",
            "Movie (2021) [WEBRip]",
            "Title_1080p_x265",
            "A.mkv.mkv",
            "[Group] Some_Show - 01 (720p).mkv",
            "   spaced   out   ",
            "Фильм.2019.WEBRip.avi",
            "",
        ] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn video_extension_check() {
        assert!(is_video_file("movie.mkv"));
        assert!(is_video_file("Movie.MP4"));
        assert!(is_video_file("ep.webm"));
        assert!(!is_video_file("poster.jpg"));
        assert!(!is_video_file("subs.srt"));
        assert!(!is_video_file("noext"));
    }

    #[test]
    fn episode_marker_parsing() {
        assert_eq!(parse_episode_marker("Show.S02E05.mkv"), Some((2, 5)));
        assert_eq!(parse_episode_marker("show.s1e3.mp4"), Some((1, 3)));
        assert_eq!(parse_episode_marker("Movie.2010.mkv"), None);
    }
}
