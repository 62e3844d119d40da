/// Tests for HTML to Markdown conversion
#[cfg(test)]
mod tests {
    use crate::error::ConversionError;
    use crate::markdown::{MAX_DEPTH, html_to_markdown};

    fn convert(html: &str) -> String {
        html_to_markdown(html).expect("conversion should succeed")
    }

    #[test]
    fn test_bold_becomes_double_asterisk() {
        assert_eq!(convert("<b>Hi</b>"), "**Hi**\n");
        assert_eq!(convert("<strong>Hi</strong> there"), "**Hi** there\n");
    }

    #[test]
    fn test_inline_markers_keep_outer_spacing() {
        assert_eq!(convert("a<em> b </em>c"), "a _b_ c\n");
    }

    #[test]
    fn test_paragraphs_are_separated_by_blank_line() {
        assert_eq!(convert("<p>one</p>\n\n<p>two</p>"), "one\n\ntwo\n");
    }

    #[test]
    fn test_headings() {
        assert_eq!(convert("<h2>Intro</h2><p>text</p>"), "## Intro\n\ntext\n");
    }

    #[test]
    fn test_links_and_images() {
        assert_eq!(convert(r#"<a href="https://example.com">site</a>"#), "[site](https://example.com)\n");
        assert_eq!(convert(r#"<a>no href</a>"#), "no href\n");
        assert_eq!(convert(r#"<img src="/a.png" alt="pic">"#), "![pic](/a.png)\n");
    }

    #[test]
    fn test_unordered_and_nested_lists() {
        let md = convert("<ul><li>a<ul><li>b</li></ul></li><li>c</li></ul>");
        assert_eq!(md, "- a\n  - b\n- c\n");
    }

    #[test]
    fn test_ordered_list_respects_start() {
        assert_eq!(convert(r#"<ol start="3"><li>x</li><li>y</li></ol>"#), "3. x\n4. y\n");
    }

    #[test]
    fn test_code_blocks_keep_content_verbatim() {
        let md = convert(r#"<pre><code class="language-rust">let x = a_b * 2;
</code></pre>"#);
        assert_eq!(md, "```rust\nlet x = a_b * 2;\n```\n");
        assert_eq!(convert("use <code>a_b</code>"), "use `a_b`\n");
    }

    #[test]
    fn test_text_markdown_characters_are_escaped() {
        assert_eq!(convert("<p>2 * 3 = snake_case</p>"), "2 \\* 3 = snake\\_case\n");
    }

    #[test]
    fn test_blockquote() {
        assert_eq!(convert("<blockquote><p>quoted</p></blockquote>"), "> quoted\n");
    }

    #[test]
    fn test_line_break_and_rule() {
        assert_eq!(convert("a<br>b"), "a  \nb\n");
        assert_eq!(convert("<p>a</p><hr><p>b</p>"), "a\n\n* * *\n\nb\n");
    }

    #[test]
    fn test_table_renders_as_pipe_table() {
        let md = convert("<table><tr><th>k</th><th>v</th></tr><tr><td>a</td><td>1</td></tr></table>");
        assert_eq!(md, "| k | v |\n| --- | --- |\n| a | 1 |\n");
    }

    #[test]
    fn test_unknown_tags_are_passed_through() {
        assert_eq!(
            convert(r#"<iframe src="https://video.example/1"></iframe>"#),
            "<iframe src=\"https://video.example/1\"></iframe>\n"
        );
        assert_eq!(convert("<details><summary>More</summary><b>x</b></details>"), "<details><summary>More</summary>**x**</details>\n");
    }

    #[test]
    fn test_script_and_style_bodies_are_copied_verbatim() {
        assert_eq!(
            convert("<p>x</p><script>var a_b = 2 * 3; // note\nrun();</script>"),
            "x\n\n<script>var a_b = 2 * 3; // note\nrun();</script>\n"
        );
        assert_eq!(
            convert(r#"<style type="text/css">p > a { font: 1em/2 *sans* }</style>"#),
            "<style type=\"text/css\">p > a { font: 1em/2 *sans* }</style>\n"
        );
        assert_eq!(convert(r#"<script src="https://gist.example/1.js"></script>"#), "<script src=\"https://gist.example/1.js\"></script>\n");
    }

    #[test]
    fn test_textarea_body_keeps_line_breaks_and_entities() {
        assert_eq!(convert("<textarea>a &lt; b\n  c_d</textarea>"), "<textarea>a &lt; b\n  c_d</textarea>\n");
    }

    #[test]
    fn test_escaped_markup_in_text_stays_escaped() {
        assert_eq!(convert("<p>use &lt;div&gt; for blocks</p>"), "use &lt;div&gt; for blocks\n");
        assert_eq!(convert("<p>Q&amp;A</p>"), "Q&amp;A\n");
        assert_eq!(convert("<b>&lt;b&gt;</b>"), "**&lt;b&gt;**\n");
    }

    #[test]
    fn test_non_breaking_spaces_are_preserved() {
        assert_eq!(convert("<p>a&nbsp;&nbsp;b</p>"), "a&nbsp;&nbsp;b\n");
        assert_eq!(convert("<p>a \u{a0} b</p>"), "a &nbsp; b\n");
    }

    #[test]
    fn test_plain_text_is_unchanged() {
        assert_eq!(convert("just words"), "just words\n");
        assert_eq!(convert(""), "");
    }

    #[test]
    fn test_excessive_nesting_is_a_conversion_error() {
        let depth = MAX_DEPTH + 10;
        let html = format!("{}x{}", "<div>".repeat(depth), "</div>".repeat(depth));
        assert_eq!(html_to_markdown(&html), Err(ConversionError::TooDeep { limit: MAX_DEPTH }));
    }
}
