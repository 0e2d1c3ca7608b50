use regex::Regex;
use std::sync::LazyLock;

// https://www.w3.org/TR/xml/#NT-NameStartChar
// 	NameStartChar	   ::=   	":" | [A-Z] | "_" | [a-z] | [#xC0-#xD6] | [#xD8-#xF6] | [#xF8-#x2FF] | [#x370-#x37D] | [#x37F-#x1FFF] | [#x200C-#x200D] | [#x2070-#x218F] | [#x2C00-#x2FEF] | [#x3001-#xD7FF] | [#xF900-#xFDCF] | [#xFDF0-#xFFFD] | [#x10000-#xEFFFF]
static NAME_START_CHAR: &str = "A-Z_a-z:\u{c0}-\u{d6}\u{d8}-\u{f6}\u{f8}-\u{02ff}\u{0370}-\u{037d}\u{037f}-\u{1fff}\u{200c}\u{200d}\u{2070}-\u{218f}\u{2c00}-\u{2fef}\u{3001}-\u{d7ff}\u{f900}-\u{fdcf}\u{fdf0}-\u{fffd}\u{10000}-\u{effff}";
// NameChar	   ::=   	NameStartChar | "-" | "." | [0-9] | #xB7 | [#x0300-#x036F] | [#x203F-#x2040]
static NAME_CHAR_ADDITIONS: &str = "\\-\\.0-9\u{b7}\u{0300}-\u{036f}\u{203f}-\u{2040}";
// Name	   ::=   	NameStartChar (NameChar)*
static NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        "^[{}][{}{}]*$",
        NAME_START_CHAR, NAME_START_CHAR, NAME_CHAR_ADDITIONS
    ))
    .expect("Invalid regex")
});
// Nmtoken	 ::= (NameChar)+
static NMTOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^[{}{}]+$", NAME_START_CHAR, NAME_CHAR_ADDITIONS))
        .expect("Invalid regex")
});

pub fn is_name(s: &str) -> bool {
    NAME_REGEX.is_match(s)
}

pub fn is_nmtoken(s: &str) -> bool {
    NMTOKEN_REGEX.is_match(s)
}

pub fn is_xml_whitespace_char(c: char) -> bool {
    matches!(c, '\u{9}' | '\u{A}' | '\u{D}' | '\u{20}')
}

pub fn is_xml_whitespace(s: &str) -> bool {
    s.chars().all(is_xml_whitespace_char)
}

/// Split on XML whitespace, dropping empty tokens.
pub fn tokens(s: &str) -> impl Iterator<Item = &str> {
    s.split(is_xml_whitespace_char).filter(|token| !token.is_empty())
}

/// Trim and replace every run of XML whitespace by a single space.
pub fn collapse_xml_whitespace(s: &str) -> String {
    tokens(s).collect::<Vec<_>>().join(" ")
}
