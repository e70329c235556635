/// Canonicalize text pulled out of a label resource document.
///
/// Entity references are already unescaped by the XML reader; this strips
/// the remaining control characters (keeping tabs and newlines, which are
/// legitimate inside comments) and trims surrounding whitespace.
pub fn canonicalize(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_control() || *c == '\t' || *c == '\n')
        .collect();
    cleaned.trim().to_string()
}
