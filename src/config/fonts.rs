//! Font Resolution
//! Picks the first installed family from a preference list.

use plotters::style::{FontDesc, FontFamily, FontStyle};

/// Generic family tried after every configured candidate.
pub const FALLBACK_FAMILY: &str = "sans-serif";

/// Whether the host can load `family` (generic names such as `sans-serif`
/// map to the system default for that class).
pub fn is_family_available(family: &str) -> bool {
    FontDesc::new(FontFamily::from(family), 12.0, FontStyle::Normal)
        .box_size("Ag")
        .is_ok()
}

/// First available family among `candidates`, then [`FALLBACK_FAMILY`].
/// `None` when the host has no usable font at all.
pub fn resolve_font_family<S: AsRef<str>>(candidates: &[S]) -> Option<String> {
    candidates
        .iter()
        .map(AsRef::as_ref)
        .chain(std::iter::once(FALLBACK_FAMILY))
        .find(|family| is_family_available(family))
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_returns_candidate_or_fallback() {
        let candidates = ["Noto Sans CJK SC", "DejaVu Sans"];
        if let Some(family) = resolve_font_family(&candidates) {
            assert!(candidates.contains(&family.as_str()) || family == FALLBACK_FAMILY);
        }
    }

    #[test]
    fn empty_preference_list_uses_fallback() {
        let none: [&str; 0] = [];
        if let Some(family) = resolve_font_family(&none) {
            assert_eq!(family, FALLBACK_FAMILY);
        }
    }
}
