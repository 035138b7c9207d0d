use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

// Characters that cannot appear raw in a single URL path segment
const SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'\\')
    .add(b'^')
    .add(b'|');

/// Builds the navigable link for a post from its slug
///
/// The slug is encoded as a single path segment, so a slug containing `/` or
/// `?` cannot escape the prefix.
///
/// # Examples
///
/// ```
/// use site_search::render::post_href;
///
/// assert_eq!(post_href("/post/", "hello-world"), "/post/hello-world");
/// assert_eq!(post_href("/post/", "a b/c"), "/post/a%20b%2Fc");
/// ```
pub fn post_href(prefix: &str, slug: &str) -> String {
    format!("{}{}", prefix, utf8_percent_encode(slug, SEGMENT_ENCODE_SET))
}
