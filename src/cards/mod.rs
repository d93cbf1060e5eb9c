use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::seq::SliceRandom;
use url::Url;

pub mod catalog;

/// Folder inside the storage bucket holding the card scans, pre-encoded as a
/// path component (`/` becomes `%2F` in storage object URLs).
pub const STORAGE_FOLDER: &str = "CC1";
const ENCODED_FOLDER_PREFIX: &str = "CC1%2F";
pub const CARD_FILE_EXT: &str = ".jpg";
const MEDIA_SUFFIX: &str = "?alt=media";

/// Characters kept verbatim by a standard URI-component encoder.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Resolves a user-supplied query against the card catalog.
///
/// An exact (case-sensitive) match always wins. Failing that, the first
/// catalog entry whose lowercased name starts with the lowercased query is
/// returned, so catalog order is the tie-break for ambiguous prefixes. The
/// empty query therefore matches the first entry; the slash command declares
/// its option as required, so Discord never sends one in practice.
pub fn resolve<'a>(query: &str, catalog: &'a [String]) -> Option<&'a str> {
    if let Some(exact) = catalog.iter().find(|name| name.as_str() == query) {
        return Some(exact.as_str());
    }

    let folded = query.to_lowercase();
    catalog
        .iter()
        .find(|name| name.to_lowercase().starts_with(&folded))
        .map(String::as_str)
}

/// Picks a uniformly random card, or `None` if the catalog is empty.
pub fn pick_random(catalog: &[String]) -> Option<&str> {
    catalog.choose(&mut rand::thread_rng()).map(String::as_str)
}

/// Builds the publicly fetchable media URL for a card scan.
///
/// The result is never validated for reachability; a missing scan shows up
/// as a broken embed on the Discord side.
pub fn media_url(base: &Url, card: &str) -> String {
    let file_name = format!("{card}{CARD_FILE_EXT}");
    let file = utf8_percent_encode(&file_name, URI_COMPONENT);
    format!("{base}{ENCODED_FOLDER_PREFIX}{file}{MEDIA_SUFFIX}")
}
