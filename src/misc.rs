fn strip_prefix_token_untrimmed<'a>(src: &'a str, search: &str) -> Option<&'a str> {
    src.strip_prefix(search)
        .filter(|src| src.chars().next().is_none_or(<char>::is_whitespace))
}
/// Strips `search` from the start of `src` only when it is a whole
/// whitespace-delimited token.
pub fn strip_prefix_token<'a>(src: &'a str, search: &str) -> Option<&'a str> {
    strip_prefix_token_untrimmed(src, search).map(<str>::trim_start)
}
/// Splits off the first whitespace-delimited token.
pub fn split_first_token(src: &str) -> (&str, &str) {
    match src.find(<char>::is_whitespace) {
        Some(i) => (&src[..i], src[i..].trim_start()),
        None => (src, ""),
    }
}
