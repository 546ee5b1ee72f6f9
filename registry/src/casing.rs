//! Locale-aware case transformation for environment labels.
//!
//! Only the language-specific rules that change the output for Latin
//! identifiers are modelled. Everything else goes through the Unicode default
//! case mappings from `std`.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    English,
    Turkish,
    Azerbaijani,
    Dutch,
    /// Any other language: Unicode default mappings.
    Root,
}

impl Locale {
    /// Resolve a language tag such as `en`, `tr-TR` or `nl_BE`.
    ///
    /// Only the primary language subtag is inspected. An empty tag means
    /// English, an unknown one falls back to [`Locale::Root`].
    pub fn from_tag(tag: &str) -> Self {
        let primary = tag
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match primary.as_str() {
            "" | "en" => Locale::English,
            "tr" => Locale::Turkish,
            "az" => Locale::Azerbaijani,
            "nl" => Locale::Dutch,
            _ => Locale::Root,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Locale::English => "en",
            Locale::Turkish => "tr",
            Locale::Azerbaijani => "az",
            Locale::Dutch => "nl",
            Locale::Root => "und",
        }
    }

    fn dotted_i(&self) -> bool {
        matches!(self, Locale::Turkish | Locale::Azerbaijani)
    }
}

impl FromStr for Locale {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Locale::from_tag(s))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

pub fn upper(text: &str, locale: Locale) -> String {
    if !locale.dotted_i() {
        return text.to_uppercase();
    }
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        push_upper(&mut out, c, locale);
    }
    out
}

pub fn lower(text: &str, locale: Locale) -> String {
    if !locale.dotted_i() {
        return text.to_lowercase();
    }
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        push_lower(&mut out, c, locale);
    }
    out
}

/// Titlecase the first cased letter of every word and lowercase the rest.
///
/// Words follow the Unicode word-break classes that matter for labels. Spaces,
/// hyphens and other punctuation end a word. `_` joins words. A single `.`,
/// `:` or `'` stays inside the word, but two in a row end it. Digits and
/// uncased letters neither start nor end a word, so `"eu_west prod.eu-1"`
/// becomes `"Eu_west Prod.eu-1"` and `"2nd"` becomes `"2Nd"`.
pub fn title(text: &str, locale: Locale) -> String {
    let mut out = String::with_capacity(text.len());
    let mut mid_word = false;
    let mut prev_mid = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        let class = WordClass::of(c);
        if prev_mid && class == WordClass::Mid {
            mid_word = false;
        }
        prev_mid = class == WordClass::Mid;

        match class {
            WordClass::Cased if mid_word => push_lower(&mut out, c, locale),
            WordClass::Cased => {
                mid_word = true;
                push_title(&mut out, c, locale);

                // Dutch treats a leading "ij" as a single letter.
                if locale == Locale::Dutch
                    && matches!(c, 'i' | 'I')
                    && matches!(chars.peek(), Some('j' | 'J'))
                {
                    chars.next();
                    out.push('J');
                }
            }
            WordClass::Break => {
                mid_word = false;
                out.push(c);
            }
            WordClass::Mid | WordClass::Joiner | WordClass::Uncased => out.push(c),
        }
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WordClass {
    /// Has case mappings: the first one in a word is titlecased.
    Cased,
    /// Digits and letters without case.
    Uncased,
    /// ExtendNumLet, combining marks and zero-width joiners.
    Joiner,
    /// MidLetter, MidNumLet and the apostrophe.
    Mid,
    Break,
}

impl WordClass {
    fn of(c: char) -> Self {
        if c.is_lowercase() || c.is_uppercase() || is_titlecase(c) {
            return WordClass::Cased;
        }
        if c.is_alphanumeric() {
            return WordClass::Uncased;
        }
        match c {
            '\'' | '.' | ':' | '\u{00B7}' | '\u{0387}' | '\u{055F}' | '\u{05F4}'
            | '\u{2018}' | '\u{2019}' | '\u{2024}' | '\u{2027}' | '\u{FE13}' | '\u{FE52}'
            | '\u{FE55}' | '\u{FF07}' | '\u{FF0E}' | '\u{FF1A}' => WordClass::Mid,
            '_' | '\u{00AD}' | '\u{200C}' | '\u{200D}' | '\u{202F}' | '\u{203F}' | '\u{2040}'
            | '\u{2054}' | '\u{FE33}' | '\u{FE34}' | '\u{FE4D}'..='\u{FE4F}' | '\u{FF3F}'
            | '\u{0300}'..='\u{036F}' | '\u{1AB0}'..='\u{1AFF}' | '\u{1DC0}'..='\u{1DFF}'
            | '\u{20D0}'..='\u{20FF}' | '\u{FE20}'..='\u{FE2F}' => WordClass::Joiner,
            _ => WordClass::Break,
        }
    }
}

/// Letters of general category Lt, which are neither upper nor lower case.
fn is_titlecase(c: char) -> bool {
    matches!(
        c,
        '\u{01C5}'
            | '\u{01C8}'
            | '\u{01CB}'
            | '\u{01F2}'
            | '\u{1F88}'..='\u{1F8F}'
            | '\u{1F98}'..='\u{1F9F}'
            | '\u{1FA8}'..='\u{1FAF}'
            | '\u{1FBC}'
            | '\u{1FCC}'
            | '\u{1FFC}'
    )
}

/// Titlecase differs from uppercase only for digraphs, ligatures and Greek
/// letters with iota subscript; everything else maps like `to_uppercase`.
fn push_title(out: &mut String, c: char, locale: Locale) {
    match c {
        'i' if locale.dotted_i() => out.push('İ'),
        'ß' => out.push_str("Ss"),
        '\u{01C4}'..='\u{01C6}' => out.push('\u{01C5}'),
        '\u{01C7}'..='\u{01C9}' => out.push('\u{01C8}'),
        '\u{01CA}'..='\u{01CC}' => out.push('\u{01CB}'),
        '\u{01F1}'..='\u{01F3}' => out.push('\u{01F2}'),
        '\u{FB00}' => out.push_str("Ff"),
        '\u{FB01}' => out.push_str("Fi"),
        '\u{FB02}' => out.push_str("Fl"),
        '\u{FB03}' => out.push_str("Ffi"),
        '\u{FB04}' => out.push_str("Ffl"),
        '\u{FB05}' | '\u{FB06}' => out.push_str("St"),
        '\u{0587}' => out.push_str("\u{0535}\u{0582}"),
        '\u{FB13}' => out.push_str("\u{0544}\u{0576}"),
        '\u{FB14}' => out.push_str("\u{0544}\u{0565}"),
        '\u{FB15}' => out.push_str("\u{0544}\u{056B}"),
        '\u{FB16}' => out.push_str("\u{054E}\u{0576}"),
        '\u{FB17}' => out.push_str("\u{0544}\u{056D}"),
        '\u{1F80}'..='\u{1F87}' | '\u{1F90}'..='\u{1F97}' | '\u{1FA0}'..='\u{1FA7}' => {
            out.push(char::from_u32(u32::from(c) + 8).unwrap_or(c))
        }
        '\u{1FB3}' => out.push('\u{1FBC}'),
        '\u{1FC3}' => out.push('\u{1FCC}'),
        '\u{1FF3}' => out.push('\u{1FFC}'),
        _ if is_titlecase(c) => out.push(c),
        _ => out.extend(c.to_uppercase()),
    }
}

fn push_upper(out: &mut String, c: char, locale: Locale) {
    match c {
        'i' if locale.dotted_i() => out.push('İ'),
        _ => out.extend(c.to_uppercase()),
    }
}

fn push_lower(out: &mut String, c: char, locale: Locale) {
    match c {
        'I' if locale.dotted_i() => out.push('ı'),
        'İ' if locale.dotted_i() => out.push('i'),
        _ => out.extend(c.to_lowercase()),
    }
}
