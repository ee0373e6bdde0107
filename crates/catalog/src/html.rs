//! Just enough HTML handling to read a static documentation site: route
//! anchors from the listing page and `<pre><code>` regions from each page.

use once_cell::sync::Lazy;
use regex::Regex;

static LIST_ITEM: Lazy<Regex> = Lazy::new(|| compile(r"(?is)<li\b[^>]*>(.*?)</li>"));
static ANCHOR_HREF: Lazy<Regex> =
    Lazy::new(|| compile(r#"(?is)<a\b[^>]*?\bhref\s*=\s*(?:"([^"]*)"|'([^']*)')"#));
static CODE_REGION: Lazy<Regex> =
    Lazy::new(|| compile(r"(?is)<pre\b[^>]*>\s*<code\b[^>]*>(.*?)</code>"));
static TAG: Lazy<Regex> = Lazy::new(|| compile(r"(?s)<[^>]+>"));
static ENTITY: Lazy<Regex> = Lazy::new(|| compile(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);"));

fn compile(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(regex) => regex,
        Err(err) => panic!("built-in html pattern {pattern:?} is invalid: {err}"),
    }
}

/// Routes linked from list items, in document order
///
/// Fragment-only, `mailto:` and absolute external links are skipped.
pub fn extract_routes(html: &str) -> Vec<String> {
    let mut routes = Vec::new();
    for item in LIST_ITEM.captures_iter(html) {
        let Some(body) = item.get(1) else { continue };
        for anchor in ANCHOR_HREF.captures_iter(body.as_str()) {
            let Some(href) = anchor.get(1).or_else(|| anchor.get(2)) else {
                continue;
            };
            let href = decode_entities(href.as_str().trim());
            if href.is_empty() || is_external(&href) {
                log::debug!("Skipping non-page link {href:?}");
                continue;
            }
            routes.push(href);
        }
    }
    routes
}

fn is_external(href: &str) -> bool {
    let lower = href.to_ascii_lowercase();
    lower.starts_with('#')
        || lower.starts_with("mailto:")
        || lower.starts_with("http://")
        || lower.starts_with("https://")
        || lower.starts_with("//")
}

/// Text of every `<pre><code>` region, in document order
///
/// Markup inside the region (syntax highlighting spans) is stripped and
/// entities are decoded, so the result reads like the rendered listing.
pub fn extract_code_regions(html: &str) -> Vec<String> {
    CODE_REGION
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .map(|body| decode_entities(&TAG.replace_all(body.as_str(), "")))
        .collect()
}

/// Decode named and numeric character references
///
/// Unknown names are left as written.
pub fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let entity = &caps[1];
            let decoded = if let Some(hex) = entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = entity.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                match entity {
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "amp" => Some('&'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "nbsp" => Some('\u{a0}'),
                    _ => None,
                }
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}
