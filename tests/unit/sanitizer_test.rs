use rstest::rstest;

use tabforge::services::sanitizer::{
    attr_escape, html_escape, sanitize_key, sanitize_rich_text, sanitize_text, sanitize_url,
};

#[rstest]
#[case("specs", "specs")]
#[case("Row_1-A", "row_1-a")]
#[case("Hello World!", "helloworld")]
#[case("<script>", "script")]
#[case("  ", "")]
#[case("", "")]
#[case("ünïcode", "ncode")]
fn test_sanitize_key(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(sanitize_key(input), expected);
}

#[rstest]
#[case("Plain title", "Plain title")]
#[case("<b>Hello</b> World", "Hello World")]
#[case("  spaced   out  ", "spaced out")]
#[case("line\nbreak\ttab", "line break tab")]
#[case("<script>alert(1)</script>", "alert(1)")]
#[case("", "")]
fn test_sanitize_text(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(sanitize_text(input), expected);
}

#[rstest]
#[case("https://example.com/doc.pdf", "https://example.com/doc.pdf")]
#[case("http://example.com/a/b?x=1", "http://example.com/a/b?x=1")]
#[case("HTTPS://EXAMPLE.COM/path", "https://example.com/path")]
#[case("  https://example.com/doc.pdf  ", "https://example.com/doc.pdf")]
#[case("javascript:alert(1)", "")]
#[case("ftp://example.com/file", "")]
#[case("not a url", "")]
#[case("/relative/path", "")]
#[case("", "")]
fn test_sanitize_url(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(sanitize_url(input), expected);
}

#[test]
fn test_sanitize_url_strips_markup_characters() {
    assert_eq!(
        sanitize_url("https://example.com/doc\"><script>"),
        "https://example.com/docscript"
    );
}

#[rstest]
#[case("<p>Hello</p>", "<p>Hello</p>")]
#[case("<strong>bold</strong> and <em>italic</em>", "<strong>bold</strong> and <em>italic</em>")]
#[case("<script>alert(1)</script>", "alert(1)")]
#[case("<!-- hidden -->visible", "visible")]
#[case("plain text stays", "plain text stays")]
fn test_sanitize_rich_text_tags(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(sanitize_rich_text(input), expected);
}

#[test]
fn test_rich_text_drops_disallowed_attributes() {
    let html = r#"<a href="https://example.com/doc" onclick="steal()">link</a>"#;
    assert_eq!(
        sanitize_rich_text(html),
        r#"<a href="https://example.com/doc">link</a>"#
    );
}

#[test]
fn test_rich_text_drops_unsafe_href() {
    let html = r#"<a href="javascript:alert(1)">link</a>"#;
    assert_eq!(sanitize_rich_text(html), "<a>link</a>");
}

#[test]
fn test_rich_text_resanitizes_img_src() {
    let html = r#"<img src="ftp://example.com/x.png" alt="pic">"#;
    assert_eq!(sanitize_rich_text(html), r#"<img alt="pic">"#);

    let html = r#"<img src="https://example.com/x.png" alt="pic">"#;
    assert_eq!(
        sanitize_rich_text(html),
        r#"<img src="https://example.com/x.png" alt="pic">"#
    );
}

#[test]
fn test_rich_text_escapes_stray_angle_bracket() {
    assert_eq!(sanitize_rich_text("5 < 6 wins"), "5 &lt; 6 wins");
}

#[test]
fn test_rich_text_normalizes_tag_case() {
    assert_eq!(sanitize_rich_text("<P>Hi</P>"), "<p>Hi</p>");
}

#[test]
fn test_rich_text_keeps_single_quoted_and_bare_values() {
    let html = "<p class='lead'>a</p><div class=wide>b</div>";
    assert_eq!(
        sanitize_rich_text(html),
        r#"<p class="lead">a</p><div class="wide">b</div>"#
    );
}

#[test]
fn test_html_escape() {
    assert_eq!(
        html_escape(r#"<a href="x">&'"#),
        "&lt;a href=&quot;x&quot;&gt;&amp;&#39;"
    );
}

#[test]
fn test_attr_escape_matches_html_escape() {
    assert_eq!(attr_escape(r#"a"b"#), html_escape(r#"a"b"#));
}
