use thiserror::Error;

/// Search page of the Ministry of Education revised Mandarin dictionary.
pub const MOE_DICT_SEARCH: &str = "https://dict.revised.moe.edu.tw/search.jsp";

/// Text shown by the dictionary when a search has no result.
pub const NOT_FOUND_MARKER: &str = "查無資料";

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("fetching {url} failed: {message}")]
    Fetch { url: String, message: String },
    #[error("response from {url} is not valid UTF-8")]
    Decode { url: String },
}

/// Answers whether a character is in current use in Taiwan.
pub trait UsageLookup {
    fn used_in_taiwan(&self, character: char) -> Result<bool, LookupError>;
}

/// Search URL for `character`, percent-encoded as UTF-8.
///
/// Every byte of a non-ASCII character becomes uppercase `%XX`; unreserved
/// ASCII characters are left as they are.
pub fn moe_search_url(character: char) -> String {
    let mut buf = [0u8; 4];
    let word = urlencoding::encode(character.encode_utf8(&mut buf));
    format!("{MOE_DICT_SEARCH}?md=1&word={word}#searchL")
}

/// A dictionary page counts as a hit when it is non-empty and lacks
/// [`NOT_FOUND_MARKER`].
pub fn page_reports_usage(page: &str) -> bool {
    !page.is_empty() && !page.contains(NOT_FOUND_MARKER)
}

/// [`UsageLookup`] backed by the MoE dictionary search page.
///
/// The page is fetched by a caller-supplied function taking the URL, so any
/// blocking HTTP client can be plugged in.
pub struct MoeDictLookup<F> {
    fetch: F,
}

impl<F> MoeDictLookup<F>
where
    F: Fn(&str) -> Result<Vec<u8>, LookupError>,
{
    pub fn new(fetch: F) -> Self {
        Self { fetch }
    }
}

impl<F> UsageLookup for MoeDictLookup<F>
where
    F: Fn(&str) -> Result<Vec<u8>, LookupError>,
{
    fn used_in_taiwan(&self, character: char) -> Result<bool, LookupError> {
        let url = moe_search_url(character);
        let body = (self.fetch)(&url)?;
        let page = String::from_utf8(body).map_err(|_| LookupError::Decode { url })?;
        Ok(page_reports_usage(&page))
    }
}
