/// Per-row transformation
///
/// Turns one source row into a `Document`: trimmed fields read through the
/// role map, a derived slug, a parsed (or substituted) date, and a Markdown
/// body. The transformation runs in two steps, `draft` then
/// `PostDraft::into_document`, so callers can decide on the output path
/// before paying for conversion.
use crate::columns::{Role, RoleMap};
use crate::emit;
use crate::error::ConversionError;
use crate::markdown;
use crate::types::{ContentFormat, Document, PostDate, SourceRow, Value};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use lazy_static::lazy_static;
use log::{debug, warn};
use regex::Regex;

/// Offset the site renders every timestamp in
pub const SITE_UTC_OFFSET_SECS: i32 = 9 * 3600;

lazy_static! {
    // ASCII classes only: non-Latin letters are dropped from derived slugs
    static ref SLUG_STRIP: Regex = Regex::new(r"[^a-zA-Z0-9_ \t\r\n\x0B\x0C-]").expect("valid slug strip pattern");
    static ref SLUG_SPACES: Regex = Regex::new(r"[ \t\r\n\x0B\x0C]+").expect("valid whitespace pattern");
    static ref SLUG_HYPHENS: Regex = Regex::new(r"-+").expect("valid hyphen pattern");
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
];

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z", "%Y-%m-%d %H:%M:%S%.f %#z"];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];

/// Fields of a post before its body is converted
#[derive(Debug, Clone, PartialEq)]
pub struct PostDraft {
    pub title: String,
    pub slug: String,
    pub date: PostDate,
    pub description: String,
    pub categories: String,
    pub raw_content: String,
}

impl PostDraft {
    /// Output file name, `YYYY-MM-DD-<slug>.md`
    pub fn filename(&self) -> String {
        emit::file_name(&self.date, &self.slug)
    }

    /// Convert the body according to the run's content format
    pub fn into_document(self, format: ContentFormat) -> Result<Document, ConversionError> {
        let body = match format {
            ContentFormat::Html => markdown::html_to_markdown(&self.raw_content)?,
            ContentFormat::Markdown => self.raw_content,
        };
        Ok(Document {
            title: self.title,
            slug: self.slug,
            date: self.date,
            description: self.description,
            categories: self.categories,
            body,
        })
    }
}

/// Read every field of a row through the role map. Never fails.
pub fn draft(row: &SourceRow, roles: &RoleMap) -> PostDraft {
    let title = roles.text(row, Role::Title);
    let mut slug = roles.text(row, Role::Slug);
    if slug.is_empty() {
        slug = slugify(&title);
        debug!("derived slug {:?} from title {:?}", slug, title);
    }
    let raw_date = roles.value(row, Role::Date);
    let date = parse_date(raw_date);

    let draft = PostDraft {
        title,
        slug,
        date,
        description: roles.text(row, Role::Description),
        categories: roles.text(row, Role::Category),
        raw_content: roles.raw_text(row, Role::Content),
    };
    if draft.date.fallback {
        warn!("{}: unparsable date {:?}, using current time", draft.filename(), raw_date);
    }
    draft
}

/// URL slug from a title: lowercase, ASCII word characters and hyphens only,
/// whitespace runs replaced by a single hyphen.
pub fn slugify(title: &str) -> String {
    let lower = title.to_lowercase();
    let stripped = SLUG_STRIP.replace_all(&lower, "");
    let hyphenated = SLUG_SPACES.replace_all(&stripped, "-");
    SLUG_HYPHENS.replace_all(&hyphenated, "-").trim().to_string()
}

/// Parse a date value, substituting the current time when it is missing or malformed
pub fn parse_date(value: Option<&Value>) -> PostDate {
    match value.and_then(Value::as_text).and_then(parse_timestamp) {
        Some(timestamp) => PostDate { timestamp, fallback: false },
        None => PostDate { timestamp: now_at_site_offset(), fallback: true },
    }
}

/// General-purpose timestamp parsing; keeps the wall-clock time as written
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.naive_local());
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, format) {
            return Some(dt.naive_local());
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, format) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

fn now_at_site_offset() -> NaiveDateTime {
    let now = Utc::now();
    match FixedOffset::east_opt(SITE_UTC_OFFSET_SECS) {
        Some(offset) => now.with_timezone(&offset).naive_local(),
        None => now.naive_utc(),
    }
}

/// Double single quotes for embedding in a single-quoted front-matter scalar
pub fn escape_single_quoted(value: &str) -> String {
    value.replace('\'', "''")
}

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;
