/// Tests for per-row transformation
#[cfg(test)]
mod tests {
    use crate::columns::RoleMap;
    use crate::transform::{draft, escape_single_quoted, parse_date, parse_timestamp, slugify};
    use crate::types::{ContentFormat, SourceRow, Value};
    use chrono::Utc;

    fn roles() -> RoleMap {
        RoleMap::resolve(&["title", "content", "description", "slug", "createdAt", "category"])
    }

    fn row(title: &str, slug: &str, content: &str, date: &str) -> SourceRow {
        SourceRow::new()
            .with("id", "1")
            .with("title", title)
            .with("content", content)
            .with("description", Value::Null)
            .with("slug", slug)
            .with("createdAt", date)
            .with("category", Value::Null)
    }

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("Rust: 1.0 Released!"), "rust-10-released");
        assert_eq!(slugify("a  -  b"), "a-b");
        assert_eq!(slugify("snake_case stays"), "snake_case-stays");
    }

    #[test]
    fn test_slugify_drops_non_ascii_letters() {
        assert_eq!(slugify("안녕 세상 Rust"), "-rust");
        assert_eq!(slugify("Café Crème"), "caf-crme");
        assert_eq!(slugify("안녕"), "");
    }

    #[test]
    fn test_slugify_is_idempotent_and_clean() {
        let titles = [
            "Hello World",
            "  Leading and trailing  ",
            "Tabs\tand\nnewlines",
            "Multiple --- hyphens -- here",
            "UPPER lower MiXeD",
            "Symbols #$%^&*() everywhere",
            "",
            "---",
        ];
        for title in titles {
            let once = slugify(title);
            assert_eq!(slugify(&once), once, "slugify should be idempotent for {:?}", title);
            assert!(!once.chars().any(char::is_whitespace), "{:?} contains whitespace", once);
            assert!(!once.chars().any(char::is_uppercase), "{:?} contains uppercase", once);
            assert!(!once.contains("--"), "{:?} contains repeated hyphens", once);
        }
    }

    #[test]
    fn test_well_formed_dates_keep_calendar_day() {
        let cases = [
            ("2024-01-02", "2024-01-02 00:00:00 +0900"),
            ("2024-01-02 13:14:15", "2024-01-02 13:14:15 +0900"),
            ("2024-01-02 13:14:15.123456", "2024-01-02 13:14:15 +0900"),
            ("2024-01-02T13:14:15Z", "2024-01-02 13:14:15 +0900"),
            ("2024-01-02 23:30:00+09", "2024-01-02 23:30:00 +0900"),
            ("2024-01-02T23:30:00-05:00", "2024-01-02 23:30:00 +0900"),
            ("Tue, 02 Jan 2024 08:00:00 +0000", "2024-01-02 08:00:00 +0900"),
        ];
        for (raw, full) in cases {
            let date = parse_date(Some(&Value::from(raw)));
            assert!(!date.fallback, "{} should parse", raw);
            assert_eq!(date.day(), "2024-01-02", "calendar day of {}", raw);
            assert_eq!(date.full(), full, "full timestamp of {}", raw);
        }
    }

    #[test]
    fn test_malformed_date_falls_back_to_now() {
        let before = Utc::now().naive_utc();
        for value in [Some(Value::from("not-a-date")), Some(Value::Null), Some(Value::from("")), None] {
            let date = parse_date(value.as_ref());
            assert!(date.fallback, "{:?} should fall back", value);
            // The fallback is rendered in UTC+9, so it is never behind UTC now.
            assert!(date.timestamp >= before - chrono::Duration::seconds(1));
            assert_eq!(date.day().len(), 10);
            assert!(parse_timestamp(&date.full()).is_some(), "fallback must be a valid timestamp");
        }
    }

    #[test]
    fn test_escape_single_quoted() {
        assert_eq!(escape_single_quoted("it's"), "it''s");
        assert_eq!(escape_single_quoted("''"), "''''");
        assert_eq!(escape_single_quoted("plain"), "plain");
    }

    #[test]
    fn test_draft_derives_slug_when_column_empty() {
        let d = draft(&row("Hello World", "   ", "<b>Hi</b>", "2024-01-02"), &roles());
        assert_eq!(d.slug, "hello-world");
        assert_eq!(d.filename(), "2024-01-02-hello-world.md");
    }

    #[test]
    fn test_draft_prefers_slug_column() {
        let d = draft(&row("Hello World", " custom-slug ", "x", "2024-01-02"), &roles());
        assert_eq!(d.slug, "custom-slug");
    }

    #[test]
    fn test_draft_trims_fields_and_defaults_missing_roles() {
        let roles = RoleMap::resolve(&["title", "content", "createdAt"]);
        let source = SourceRow::new().with("title", "  Spaced  ").with("content", "  body").with("createdAt", "2024-01-02");
        let d = draft(&source, &roles);
        assert_eq!(d.title, "Spaced");
        assert_eq!(d.description, "");
        assert_eq!(d.categories, "");
        assert_eq!(d.raw_content, "  body", "content is not trimmed before conversion");
    }

    #[test]
    fn test_transform_converts_html() {
        let doc = draft(&row("Hello World", "", "<b>Hi</b>", "2024-01-02"), &roles())
            .into_document(ContentFormat::Html)
            .expect("transform");
        assert_eq!(doc.body, "**Hi**\n");
        assert_eq!(doc.slug, "hello-world");
        assert_eq!(doc.date.day(), "2024-01-02");
    }

    #[test]
    fn test_transform_leaves_markdown_untouched() {
        let content = "  # Heading\n\n<b>inline html kept</b>\n";
        let doc = draft(&row("T", "t", content, "2024-01-02"), &roles())
            .into_document(ContentFormat::Markdown)
            .expect("transform");
        assert_eq!(doc.body, content);
    }
}
