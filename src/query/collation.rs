//! Locale-style string ordering
//!
//! Compares strings the way a browser's default collation orders course
//! titles: whitespace, then punctuation, then symbols, then digits, then
//! letters, with Latin accents ignored at the first level. Strings equal at
//! that level fall back to code point order, so the result is a total order.

use std::cmp::Ordering;

/// Character class ranks
const WHITESPACE: u8 = 0;
const PUNCTUATION: u8 = 1;
const SYMBOL: u8 = 2;
const DIGIT: u8 = 3;
const LETTER: u8 = 4;
const OTHER: u8 = 5;

/// Compare two strings by collation order
pub fn collate(a: &str, b: &str) -> Ordering {
    a.chars()
        .map(primary_weight)
        .cmp(b.chars().map(primary_weight))
        .then_with(|| a.cmp(b))
}

fn primary_weight(c: char) -> (u8, char) {
    if c.is_whitespace() {
        (WHITESPACE, c)
    } else if c.is_ascii_punctuation() {
        match c {
            '$' | '+' | '<' | '=' | '>' | '^' | '`' | '|' | '~' => (SYMBOL, c),
            _ => (PUNCTUATION, c),
        }
    } else if c.is_numeric() {
        (DIGIT, c)
    } else if c.is_alphabetic() {
        (LETTER, fold_accent(c))
    } else if !c.is_alphanumeric() && !c.is_control() {
        (SYMBOL, c)
    } else {
        (OTHER, c)
    }
}

/// Base letter of common accented Latin lower-case letters
fn fold_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => 'c',
        'ď' | 'đ' => 'd',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => 'g',
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => 'i',
        'ķ' => 'k',
        'ĺ' | 'ļ' | 'ľ' | 'ł' => 'l',
        'ñ' | 'ń' | 'ņ' | 'ň' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => 'o',
        'ŕ' | 'ř' => 'r',
        'ś' | 'ŝ' | 'ş' | 'š' => 's',
        'ţ' | 'ť' => 't',
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => 'u',
        'ý' | 'ÿ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        other => other,
    }
}
