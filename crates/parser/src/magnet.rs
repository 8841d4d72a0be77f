//! Magnet identifier validation and cleanup.

const MAGNET_PREFIX: &str = "magnet:?";
const BTIH_MARKER: &str = "xt=urn:btih:";

/// Public-domain test torrent (Sintel), used when no identifier is supplied.
pub const DEFAULT_MAGNET: &str = "magnet:?xt=urn:btih:08ada5a7a6183aae1e09d831df6748d566095a10&dn=Sintel&tr=udp%3A%2F%2Fexplodie.org%3A6969&tr=udp%3A%2F%2Ftracker.coppersurfer.tk%3A6969&tr=udp%3A%2F%2Ftracker.empire-js.us%3A1337&tr=udp%3A%2F%2Ftracker.leechers-paradise.org%3A6969&tr=udp%3A%2F%2Ftracker.opentrackr.org%3A1337&tr=wss%3A%2F%2Ftracker.btorrent.xyz&tr=wss%3A%2F%2Ftracker.fastcast.nz&tr=wss%3A%2F%2Ftracker.openwebtorrent.com&ws=https%3A%2F%2Fwebtorrent.io%2Ftorrents%2F&xs=https%3A%2F%2Fwebtorrent.io%2Ftorrents%2Fsintel.torrent";

/// A magnet link must start with `magnet:?` and carry a BitTorrent info hash.
pub fn validate(s: &str) -> bool {
    match s.strip_prefix(MAGNET_PREFIX) {
        Some(rest) => rest.contains(BTIH_MARKER),
        None => false,
    }
}

/// Strip surrounding whitespace, line breaks and embedded spaces.
///
/// If the cleaned string no longer looks like a magnet link the input is
/// returned untouched. Does not run [`validate`].
pub fn normalize(s: &str) -> String {
    let cleaned: String = s
        .trim()
        .chars()
        .filter(|c| !matches!(c, '\r' | '\n' | ' '))
        .collect();

    if cleaned.starts_with(MAGNET_PREFIX) {
        cleaned
    } else {
        s.to_string()
    }
}

/// Percent-decode an identifier taken from a header or URL (`+` is a space).
/// Falls back to the raw input when the decoded bytes are not UTF-8.
pub fn decode(s: &str) -> String {
    let plus_as_space = s.replace('+', " ");
    match urlencoding::decode(&plus_as_space) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => s.to_string(),
    }
}

/// Expand a bare 40-character hex info hash into a minimal magnet link.
pub fn from_info_hash(s: &str) -> Option<String> {
    let s = s.trim();
    if s.len() == 40 && s.bytes().all(|b| b.is_ascii_hexdigit()) {
        Some(format!("{MAGNET_PREFIX}{BTIH_MARKER}{s}"))
    } else {
        None
    }
}

/// The info hash carried by the first `xt=urn:btih:` parameter, if any.
pub fn info_hash(s: &str) -> Option<&str> {
    let start = s.find(BTIH_MARKER)? + BTIH_MARKER.len();
    let hash = s[start..].split('&').next()?;
    if hash.is_empty() { None } else { Some(hash) }
}
