//! Helpers for the hosting page's URL.

use web_sys as web;

/// Read a query parameter from the page URL.
///
/// The value is URI-decoded once more after `URLSearchParams` decoding, so a
/// doubly encoded link still yields plain text. Missing, empty or malformed
/// values come back as `None`.
pub fn query_param(key: &str) -> Option<String> {
    let search = web::window()?.location().search().ok()?;
    let value = web::UrlSearchParams::new_with_str(&search).ok()?.get(key)?;
    normalize_param(&value, |raw| {
        js_sys::decode_uri_component(raw).ok().and_then(|s| s.as_string())
    })
}

/// Build a link to the current page with `key` set to `value`.
pub fn share_url(key: &str, value: &str) -> Option<String> {
    let href = web::window()?.location().href().ok()?;
    let url = web::Url::new(&href).ok()?;
    url.search_params().set(key, value);
    Some(url.href())
}

/// Seed for this page load, from the host clock and `Math.random`.
pub fn session_seed() -> u64 {
    mix_seed(js_sys::Date::now(), js_sys::Math::random())
}

/// Fold a millisecond clock and a `[0, 1)` noise value into a well-spread seed.
fn mix_seed(clock_ms: f64, noise: f64) -> u64 {
    let mut z = (clock_ms as u64) ^ ((noise * u32::MAX as f64) as u64).rotate_left(32);
    // splitmix64 finalizer
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Apply `decode` and discard empty results. A failed decode is malformed.
fn normalize_param(raw: &str, decode: impl Fn(&str) -> Option<String>) -> Option<String> {
    if raw.is_empty() {
        return None;
    }
    match decode(raw) {
        Some(decoded) if !decoded.is_empty() => Some(decoded),
        Some(_) => None,
        None => {
            log::warn!("ignoring malformed query parameter {:?}", raw);
            None
        }
    }
}
