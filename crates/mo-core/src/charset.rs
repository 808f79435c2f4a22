use serde::{Deserialize, Serialize};

/// Printable ASCII, 0x20..=0x7E.
pub const CHARSET_ASCII: &str = " !\"#$%&'()*+,-./0123456789:;<=>?\
@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_\
`abcdefghijklmnopqrstuvwxyz{|}~";

/// Code Page 437, all 256 glyphs mapped to their Unicode equivalents.
/// Control slots use the classic IBM PC dingbats; 0x00 and 0xFF map to space.
pub const CHARSET_CP437: &str = " ☺☻♥♦♣♠•◘○◙♂♀♪♫☼\
►◄↕‼¶§▬↨↑↓→←∟↔▲▼\
\u{20}!\"#$%&'()*+,-./\
0123456789:;<=>?\
@ABCDEFGHIJKLMNO\
PQRSTUVWXYZ[\\]^_\
`abcdefghijklmno\
pqrstuvwxyz{|}~⌂\
ÇüéâäàåçêëèïîìÄÅ\
ÉæÆôöòûùÿÖÜ¢£¥₧ƒ\
áíóúñÑªº¿⌐¬½¼¡«»\
░▒▓│┤╡╢╖╕╣║╗╝╜╛┐\
└┴┬├─┼╞╟╚╔╩╦╠═╬╧\
╨╤╥╙╘╒╓╫╪┘┌█▄▌▐▀\
αßΓπΣσµτΦΘΩδ∞φε∩\
≡±≥≤⌠⌡÷≈°∙·√ⁿ²■ ";

/// Built-in character set selection.
///
/// # Example
/// ```
/// use mo_core::charset::CharSet;
/// assert_eq!(CharSet::Ascii.chars().len(), 95);
/// assert_eq!(CharSet::CodePage437.chars().len(), 256);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CharSet {
    /// Printable ASCII (95 characters).
    Ascii,
    /// IBM Code Page 437 (256 characters).
    CodePage437,
}

impl CharSet {
    /// The characters of this set, in table order.
    #[must_use]
    pub fn chars(self) -> Vec<char> {
        match self {
            Self::Ascii => CHARSET_ASCII.chars().collect(),
            Self::CodePage437 => CHARSET_CP437.chars().collect(),
        }
    }
}

/// Unique characters of a text, in order of first appearance.
///
/// Whitespace control characters (newline, tab, carriage return) are
/// dropped; a regular space is kept. First-appearance order keeps the
/// downstream palette build deterministic for a given input file.
///
/// # Example
/// ```
/// use mo_core::charset::unique_chars;
/// assert_eq!(unique_chars("abba\ncd"), vec!['a', 'b', 'c', 'd']);
/// ```
#[must_use]
pub fn unique_chars(text: &str) -> Vec<char> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for ch in text.chars() {
        if ch == '\n' || ch == '\r' || ch == '\t' {
            continue;
        }
        if seen.insert(ch) {
            out.push(ch);
        }
    }
    out
}
