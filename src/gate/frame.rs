//! Per-frame detection record consumed by the gate.

use std::collections::HashMap;

use nalgebra::Point2;

/// All tracked detections visible in one frame, as parallel lists.
///
/// The lists are positional: entry `i` is (`categories[i]`, `identities[i]`,
/// `positions[i]`). Identities come from an upstream tracker and are only
/// trusted when the identity list matches the category list one-to-one;
/// otherwise the entry index stands in (see [`DetectionFrame::resolved_identity`]).
///
/// `tags` is an optional per-category side table mapping a track identity to
/// an arbitrary numeric disambiguator (e.g. a jersey number projection),
/// used to tell apart same-category objects when the identity stream is
/// unreliable.
#[derive(Debug, Clone, Default)]
pub struct DetectionFrame {
    pub categories: Vec<String>,
    pub identities: Vec<u64>,
    pub positions: Vec<Point2<f32>>,
    pub tags: HashMap<String, Vec<(u64, i64)>>,
}

impl DetectionFrame {
    pub fn new(
        categories: Vec<String>,
        identities: Vec<u64>,
        positions: Vec<Point2<f32>>,
    ) -> Self {
        Self {
            categories,
            identities,
            positions,
            tags: HashMap::new(),
        }
    }

    /// Number of positional entries (positions drive iteration, matching
    /// the upstream detector contract).
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Index-as-identity fallback rule.
    ///
    /// The explicit identity is used only when the identity list lines up
    /// one-to-one with the category list; on any length mismatch the
    /// positional index is the identity. Each frame applies the rule
    /// independently.
    pub fn resolved_identity(&self, index: usize) -> u64 {
        if self.identities.len() == self.categories.len() {
            self.identities[index]
        } else {
            index as u64
        }
    }

    /// Look up the disambiguator tag recorded for `identity` under
    /// `category`, if the side table has one.
    pub fn tag_for(&self, category: &str, identity: u64) -> Option<i64> {
        self.tags
            .get(category)?
            .iter()
            .find(|(id, _)| *id == identity)
            .map(|(_, tag)| *tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> DetectionFrame {
        DetectionFrame::new(
            vec!["ball".into(), "player".into()],
            vec![7, 3],
            vec![Point2::new(1.0, 2.0), Point2::new(3.0, 4.0)],
        )
    }

    #[test]
    fn test_identity_from_list() {
        let f = frame();
        assert_eq!(f.resolved_identity(0), 7);
        assert_eq!(f.resolved_identity(1), 3);
    }

    #[test]
    fn test_identity_falls_back_to_index_on_mismatch() {
        let mut f = frame();
        f.identities.pop();
        assert_eq!(f.resolved_identity(0), 0);
        assert_eq!(f.resolved_identity(1), 1);
    }

    #[test]
    fn test_tag_lookup() {
        let mut f = frame();
        f.tags.insert("ball".into(), vec![(7, 42), (9, 99)]);
        assert_eq!(f.tag_for("ball", 7), Some(42));
        assert_eq!(f.tag_for("ball", 8), None);
        assert_eq!(f.tag_for("player", 3), None);
    }
}
