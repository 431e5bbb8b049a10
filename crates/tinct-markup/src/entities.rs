//! HTML character reference decoding.
//!
//! Decodes one matched reference token (`&amp;`, `&#233;`, `&#x27;`) to the
//! single character it stands for.

/// Decodes a single character reference token.
///
/// `entity` is the full token including the leading `&` and trailing `;`.
/// Returning `None` leaves the token in the text verbatim.
pub trait EntityDecoder {
    /// Decode `entity` to a character, or `None` if it cannot be decoded.
    fn decode(&self, entity: &str) -> Option<char>;
}

impl<F> EntityDecoder for F
where
    F: Fn(&str) -> Option<char>,
{
    fn decode(&self, entity: &str) -> Option<char> {
        self(entity)
    }
}

/// Decoder for XML/HTML named references and numeric references.
#[derive(Clone, Copy, Debug, Default)]
pub struct HtmlEntityDecoder;

impl EntityDecoder for HtmlEntityDecoder {
    fn decode(&self, entity: &str) -> Option<char> {
        let body = entity.strip_prefix('&')?.strip_suffix(';')?;
        match body.strip_prefix('#') {
            Some(numeric) => decode_numeric(numeric),
            None => named_entity(body),
        }
    }
}

/// Decode `NN` (decimal) or `xHH` (hex) from a numeric reference.
fn decode_numeric(numeric: &str) -> Option<char> {
    let code = match numeric.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => numeric.parse::<u32>().ok()?,
    };
    if code == 0 {
        return None;
    }
    char::from_u32(code)
}

/// Map an entity name to its character.
fn named_entity(name: &str) -> Option<char> {
    Some(match name {
        // XML entities
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',

        // Common entities
        "nbsp" => '\u{00a0}',
        "shy" => '\u{00ad}',
        "mdash" => '\u{2014}',
        "ndash" => '\u{2013}',
        "ldquo" => '\u{201c}',
        "rdquo" => '\u{201d}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "bull" => '\u{2022}',
        "hellip" => '\u{2026}',

        // Arrows
        "rarr" => '\u{2192}',
        "larr" => '\u{2190}',
        "harr" => '\u{2194}',
        "uarr" => '\u{2191}',
        "darr" => '\u{2193}',

        // Math symbols
        "le" => '\u{2264}',
        "ge" => '\u{2265}',
        "ne" => '\u{2260}',
        "plusmn" => '\u{00b1}',
        "times" => '\u{00d7}',
        "divide" => '\u{00f7}',
        "minus" => '\u{2212}',

        // Legal symbols
        "copy" => '\u{00a9}',
        "reg" => '\u{00ae}',
        "trade" => '\u{2122}',

        // Currency
        "euro" => '\u{20ac}',
        "pound" => '\u{00a3}',
        "yen" => '\u{00a5}',
        "cent" => '\u{00a2}',

        // Misc symbols
        "deg" => '\u{00b0}',
        "para" => '\u{00b6}',
        "sect" => '\u{00a7}',
        "dagger" => '\u{2020}',
        "Dagger" => '\u{2021}',
        "laquo" => '\u{00ab}',
        "raquo" => '\u{00bb}',
        "iexcl" => '\u{00a1}',
        "iquest" => '\u{00bf}',

        // Fractions
        "frac14" => '\u{00bc}',
        "frac12" => '\u{00bd}',
        "frac34" => '\u{00be}',

        // Superscripts
        "sup1" => '\u{00b9}',
        "sup2" => '\u{00b2}',
        "sup3" => '\u{00b3}',

        // Other
        "acute" => '\u{00b4}',
        "micro" => '\u{00b5}',
        "middot" => '\u{00b7}',
        "cedil" => '\u{00b8}',
        "ordf" => '\u{00aa}',
        "ordm" => '\u{00ba}',

        _ => return None,
    })
}
