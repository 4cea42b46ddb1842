//! SKU, color and product name derivation from image filenames.
//!
//! Spaces and hyphens are equivalent word separators. The last word,
//! minus a four-character extension, is the color.

/// Number of trailing characters dropped from the color word (`.png`, `.jpg`).
const EXTENSION_CHARS: usize = 4;

/// Splits a filename into words on spaces and hyphens.
///
/// Adjacent separators produce empty words; they are kept so that joins
/// reproduce the original spacing.
pub fn split_words(filename: &str) -> Vec<&str> {
    filename.split([' ', '-']).collect()
}

/// Uppercases every letter that follows a non-letter and lowercases the rest.
///
/// `"t-shirt 2xl"` → `"T-Shirt 2Xl"`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_cased = false;

    for c in text.chars() {
        let cased = c.is_lowercase() || c.is_uppercase();
        if cased && !prev_cased {
            out.extend(c.to_uppercase());
        } else if cased {
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
        prev_cased = cased;
    }

    out
}

/// Drops the last [`EXTENSION_CHARS`] characters (everything if shorter).
fn strip_extension(word: &str) -> &str {
    let cut = word
        .char_indices()
        .rev()
        .nth(EXTENSION_CHARS - 1)
        .map_or(0, |(i, _)| i);
    &word[..cut]
}

/// Title-cased color taken from the last word of the filename.
pub fn color(filename: &str) -> String {
    let last = filename.rsplit([' ', '-']).next().unwrap_or_default();
    title_case(strip_extension(last))
}

/// First `chars` characters of the filename with separators removed, uppercased.
///
/// The extension is not stripped first; short names yield the whole
/// compacted string.
fn sku_fragment(filename: &str, chars: usize) -> String {
    filename
        .chars()
        .filter(|c| *c != ' ' && *c != '-')
        .take(chars)
        .collect::<String>()
        .to_uppercase()
}

/// Derives `(parent_sku, color)` for a filename.
///
/// `parent_sku("blue-beanie-Navy.png", "HAT", 8)` → `("HAT-BLUEBEAN", "Navy")`.
pub fn parent_sku(filename: &str, prefix: &str, child_sku_chars: usize) -> (String, String) {
    let fragment = sku_fragment(filename, child_sku_chars);
    (format!("{prefix}-{fragment}"), color(filename))
}

/// Variant SKU: `{parent_sku}-{color}-{size}`.
pub fn child_sku(parent_sku: &str, color: &str, size: &str) -> String {
    format!("{parent_sku}-{color}-{size}")
}

/// Filename words without the trailing color word.
pub fn product_words(filename: &str) -> Vec<&str> {
    let mut words = split_words(filename);
    words.pop();
    words
}

/// Listing title: `{prefix} {Title Cased Words} {append}, {color}, {size}`.
pub fn product_name(
    words: &[&str],
    color: &str,
    size: &str,
    name_prefix: &str,
    name_append: &str,
) -> String {
    let product = title_case(&words.join(" "));
    format!("{name_prefix} {product} {name_append}, {color}, {size}")
}
