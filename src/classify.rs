/// Content format detection
///
/// The format is decided once per run from a small, fixed sample: the first
/// few posts by date. A corpus that switches from Markdown to HTML later on
/// is classified as Markdown; that is a known limitation of sampling.
use crate::types::ContentFormat;
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

/// Number of rows (ascending by date) inspected by `classify`
pub const SAMPLE_SIZE: usize = 3;

lazy_static! {
    static ref HTML_TAG: Regex = Regex::new(r"<\s*[a-zA-Z][^>]*>").expect("valid html tag pattern");
}

/// Html if any sample contains something that looks like a start tag
pub fn classify<S: AsRef<str>>(samples: &[S]) -> ContentFormat {
    let format = if samples.iter().any(|s| HTML_TAG.is_match(s.as_ref())) {
        ContentFormat::Html
    } else {
        ContentFormat::Markdown
    };
    debug!("classified {} sample(s) as {}", samples.len(), format.as_str());
    format
}
