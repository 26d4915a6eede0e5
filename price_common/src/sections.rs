//! Active-section tracking for navigation highlighting.
//!
//! Stateless: given the current bounds of each section relative to the top of
//! the viewport, the active section is the last one spanning the probe line.

/// Section highlighted when nothing spans the probe line.
pub const DEFAULT_SECTION: &str = "home";
/// Distance of the probe line from the top of the viewport.
pub const PROBE_OFFSET: f64 = 180.0;

/// Vertical extent of a section relative to the viewport top.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBounds {
    /// Section id used in navigation links.
    pub id: String,
    /// Top edge.
    pub top: f64,
    /// Bottom edge.
    pub bottom: f64,
}

impl SectionBounds {
    /// Bounds for the section `id`.
    pub fn new(id: &str, top: f64, bottom: f64) -> Self {
        Self {
            id: id.to_string(),
            top,
            bottom,
        }
    }

    fn spans(&self, probe: f64) -> bool {
        self.top <= probe && self.bottom >= probe
    }
}

/// Id of the section to highlight for the given probe line.
pub fn active_section(sections: &[SectionBounds], probe: f64) -> &str {
    sections
        .iter()
        .rev()
        .find(|section| section.spans(probe))
        .map(|section| section.id.as_str())
        .unwrap_or(DEFAULT_SECTION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_home() {
        assert_eq!(active_section(&[], PROBE_OFFSET), DEFAULT_SECTION);
        let below = [SectionBounds::new("about", 400.0, 900.0)];
        assert_eq!(active_section(&below, PROBE_OFFSET), "home");
    }

    #[test]
    fn picks_section_spanning_probe() {
        let sections = [
            SectionBounds::new("home", -700.0, 100.0),
            SectionBounds::new("about", 100.0, 800.0),
        ];
        assert_eq!(active_section(&sections, PROBE_OFFSET), "about");
    }

    #[test]
    fn later_section_wins_on_overlap() {
        let sections = [
            SectionBounds::new("home", 0.0, 180.0),
            SectionBounds::new("about", 180.0, 600.0),
        ];
        assert_eq!(active_section(&sections, PROBE_OFFSET), "about");
    }
}
