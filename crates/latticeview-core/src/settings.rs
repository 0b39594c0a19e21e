use serde::{Deserialize, Serialize};

/// Tunable options of one visualization session.
///
/// All fields have defaults so a partial settings document (or none at all)
/// yields a working configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LatticeSettings {
    /// Run the same-level collision resolver every simulation tick.
    pub collision_detection: bool,
    /// Show attribute labels above the nodes.
    pub show_top_labels: bool,
    /// Show object labels below the nodes.
    pub show_bottom_labels: bool,
    /// Label with the owned (level-exclusive) sets instead of the full sets.
    pub collapse_labels: bool,
    /// Base node radius in pixels.
    pub circle_radius: f32,
    /// Radius reduction applied to unmarked nodes after a click.
    pub circle_radius_variation: f32,
    /// Target link distance per level of separation.
    pub link_distance: f32,
    /// Vertical offset of the attribute label, pixels from node center.
    pub text_top_offset: f32,
    /// Vertical offset of the object label, pixels from node center.
    pub text_bottom_offset: f32,
}

impl Default for LatticeSettings {
    fn default() -> Self {
        Self {
            collision_detection: false,
            show_top_labels: true,
            show_bottom_labels: true,
            collapse_labels: false,
            circle_radius: 18.0,
            circle_radius_variation: 7.0,
            link_distance: 160.0,
            text_top_offset: -28.0,
            text_bottom_offset: 42.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_contract() {
        let s = LatticeSettings::default();
        assert!(!s.collision_detection);
        assert!(s.show_top_labels);
        assert!(s.show_bottom_labels);
        assert!(!s.collapse_labels);
        assert_eq!(s.circle_radius, 18.0);
        assert_eq!(s.circle_radius_variation, 7.0);
        assert_eq!(s.link_distance, 160.0);
    }

    #[test]
    fn partial_document_fills_missing_fields_with_defaults() {
        let s: LatticeSettings =
            serde_json::from_str(r#"{"collisionDetection": true, "circleRadius": 24.0}"#).unwrap();
        assert!(s.collision_detection);
        assert_eq!(s.circle_radius, 24.0);
        assert_eq!(s.link_distance, 160.0);
        assert!(s.show_top_labels);
    }
}
