/// File emission
///
/// Writes one Markdown file per document under the output directory. The
/// file system is the only state kept between runs: an existing file is left
/// alone unless overwriting was requested.
use crate::transform::escape_single_quoted;
use crate::types::{Document, EmitOutcome, PostDate};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Language prefix used for permalinks and the `lang` key
pub const SITE_LANG: &str = "ko";

/// `YYYY-MM-DD-<slug>.md`
pub fn file_name(date: &PostDate, slug: &str) -> String {
    format!("{}-{}.md", date.day(), slug)
}

pub fn output_path(output_dir: &Path, document: &Document) -> PathBuf {
    output_dir.join(file_name(&document.date, &document.slug))
}

/// Front matter block followed by a blank line and the body
pub fn render(document: &Document) -> String {
    let permalink = format!("/{}/{}", SITE_LANG, document.slug);
    let front_matter = format!(
        "---\n\
         layout: post\n\
         lang: {lang}\n\
         permalink: {permalink}\n\
         commit_url:\n\
         date: {date}\n\
         link:\n\
         domain:\n\
         title: {title}\n\
         description: '{description}'\n\
         categories: {categories}\n\
         redirect_from:\n  - {permalink}\n\
         ---\n",
        lang = SITE_LANG,
        permalink = permalink,
        date = document.date.full(),
        title = document.title,
        description = escape_single_quoted(&document.description),
        categories = document.categories,
    );
    format!("{}\n{}", front_matter, document.body.trim_start())
}

/// Write a document, honoring the overwrite policy. Never panics on I/O errors.
pub fn emit(document: &Document, output_dir: &Path, overwrite: bool) -> EmitOutcome {
    let path = output_path(output_dir, document);
    if path.exists() && !overwrite {
        debug!("{} exists, skipping", path.display());
        return EmitOutcome::Skipped;
    }

    debug!("writing {}", path.display());
    match fs::write(&path, render(document)) {
        Ok(()) => EmitOutcome::Created,
        Err(e) => EmitOutcome::Errored(e.to_string()),
    }
}

#[cfg(test)]
#[path = "emit_test.rs"]
mod emit_test;
