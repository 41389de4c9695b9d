//! Main crossing-gate algorithm implementation.

use std::collections::{HashMap, HashSet};

use nalgebra::{Point2, Vector2};
use thiserror::Error;
use tracing::info;

use crate::gate::frame::DetectionFrame;
use crate::gate::history::FrameHistory;
use crate::gate::realm::Realm;

/// Configuration for a [`CrossingGate`].
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// Reference frame size (width, height), used only to default the bar
    /// to a horizontal line through the vertical midpoint.
    pub frame_size: Option<(u32, u32)>,
    /// Explicit bar start point; falls back to the frame-size default.
    pub start: Option<Point2<f32>>,
    /// Explicit bar end point; falls back to the frame-size default.
    pub end: Option<Point2<f32>>,
    /// Display name used in diagnostics.
    pub name: String,
    /// Categories monitored from the start.
    pub monitor: Vec<String>,
    /// Half-thickness of the flanking realms, in the same units as positions.
    pub width: f32,
    /// Maximum number of retained detection frames.
    pub max_history: usize,
    /// Whether overlay rendering draws the centerline.
    pub visualize: bool,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            frame_size: None,
            start: None,
            end: None,
            name: "gate".to_string(),
            monitor: Vec::new(),
            width: 5.0,
            max_history: 50,
            visualize: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum GateError {
    /// Neither explicit endpoints nor a reference frame size was supplied.
    #[error("gate '{name}': no bar endpoints and no reference frame size to default them from")]
    MissingGeometry { name: String },
}

/// Stateful line-crossing counter.
///
/// A gate owns a bar segment, the two realms flanking it, a bounded frame
/// history and a per-category accumulator. [`CrossingGate::update`] is
/// called once per frame, in arrival order; an object that was inside
/// `realm_in` in the previous frame and is inside `realm_out` in the
/// current one increments its category counter by exactly one.
///
/// `realm_in` lies on the negative side of the bar normal, `realm_out` on
/// the positive side. The normal is computed once at construction and then
/// drifts by blending with confirmed displacement vectors; it is never
/// re-normalized, so its magnitude (and with it the realm thickness) can
/// wander over many crossings. This mirrors the reference behavior and is
/// intentional.
///
/// Frames must arrive in order. Out-of-order updates silently corrupt the
/// one-frame lookback; this is a precondition, not a checked error.
pub struct CrossingGate {
    name: String,
    visualize: bool,
    start: Point2<f32>,
    end: Point2<f32>,
    direction: Vector2<f32>,
    width: f32,
    degenerate: bool,
    realm_in: Realm,
    realm_out: Realm,
    history: FrameHistory,
    monitored: HashSet<String>,
    accumulator: HashMap<String, u64>,
}

impl CrossingGate {
    pub fn new(config: GateConfig) -> Result<Self, GateError> {
        let (start, end) = match (config.start, config.end) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                let Some((w, h)) = config.frame_size else {
                    return Err(GateError::MissingGeometry { name: config.name });
                };
                let mid_row = (h / 2) as f32;
                (Point2::new(0.0, mid_row), Point2::new(w as f32, mid_row))
            }
        };

        let delta = end - start;
        let normal = Vector2::new(-delta.y, delta.x);
        let norm = normal.norm();
        // A zero-length bar is a valid but inert gate: direction collapses
        // to zero and no crossing can ever be confirmed.
        let (direction, degenerate) = if norm < 1e-6 {
            (Vector2::zeros(), true)
        } else {
            (normal / norm, false)
        };

        let mut gate = Self {
            name: config.name,
            visualize: config.visualize,
            start,
            end,
            direction,
            width: config.width,
            degenerate,
            realm_in: Realm::flanking(start, end, Vector2::zeros()),
            realm_out: Realm::flanking(start, end, Vector2::zeros()),
            history: FrameHistory::new(config.max_history),
            monitored: HashSet::new(),
            accumulator: HashMap::new(),
        };
        gate.recompute_realms();
        gate.monitor(config.monitor);
        Ok(gate)
    }

    /// Add categories to the monitored set.
    ///
    /// Set union, so repeated calls are idempotent. Each new category gets
    /// a zero-initialized counter; counters of already-monitored
    /// categories are left untouched.
    pub fn monitor<I, S>(&mut self, categories: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for category in categories {
            let category = category.into();
            self.accumulator.entry(category.clone()).or_insert(0);
            self.monitored.insert(category);
        }
    }

    /// Reposition the bar endpoints.
    ///
    /// The realms follow on the next update. The direction is *not*
    /// recomputed: it stays the construction-time normal (plus any drift),
    /// so moving the bar shifts the realms without reorienting them.
    pub fn set_bar(&mut self, start: Point2<f32>, end: Point2<f32>) {
        self.start = start;
        self.end = end;
    }

    /// Process one detection frame and return the updated counters.
    ///
    /// Appends the frame to history (FIFO eviction at the bound), refreshes
    /// the realms from the current geometry, then checks every monitored
    /// entry of the current frame: an entry inside `realm_out` whose
    /// logical object (category, resolved identity, disambiguator tag) sat
    /// inside `realm_in` in the immediately preceding frame counts as one
    /// crossing.
    ///
    /// Entries are processed independently in input order; two entries in
    /// the same frame resolving to the same (category, identity) can both
    /// count. Deduplication is deliberately left to the caller.
    pub fn update(&mut self, frame: DetectionFrame) -> &HashMap<String, u64> {
        self.history.push(frame);
        self.recompute_realms();

        if self.degenerate {
            return &self.accumulator;
        }
        let Some((current, previous)) = self.history.last_two() else {
            return &self.accumulator;
        };

        for (idx, position) in current.positions.iter().enumerate() {
            let Some(category) = current.categories.get(idx) else {
                break;
            };
            if !self.monitored.contains(category) {
                continue;
            }
            let identity = current.resolved_identity(idx);
            let tag = current.tag_for(category, identity);

            if !self.realm_out.contains(*position) {
                continue;
            }
            let Some(earlier) = find_in_realm(previous, &self.realm_in, category, identity, tag)
            else {
                continue;
            };

            let count = self.accumulator.entry(category.clone()).or_insert(0);
            *count += 1;
            // Blend toward the observed displacement; deliberately not
            // re-normalized (see type-level docs).
            self.direction = 0.5 * (self.direction + (*position - earlier));
            info!(
                gate = %self.name,
                category = %category,
                identity,
                tag,
                count = *count,
                "crossing confirmed"
            );
        }

        &self.accumulator
    }

    /// Derive both realms from the current start/end/direction/width.
    ///
    /// Called on every update so that endpoints moved via [`Self::set_bar`]
    /// take effect immediately; the realms are never source-of-truth.
    fn recompute_realms(&mut self) {
        let offset = self.width * self.direction;
        self.realm_in = Realm::flanking(self.start, self.end, -offset);
        self.realm_out = Realm::flanking(self.start, self.end, offset);
    }

    /// Current per-category counters.
    pub fn counts(&self) -> &HashMap<String, u64> {
        &self.accumulator
    }

    /// Counter for one category (zero if unmonitored).
    pub fn count_for(&self, category: &str) -> u64 {
        self.accumulator.get(category).copied().unwrap_or(0)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn visualize(&self) -> bool {
        self.visualize
    }

    pub fn start(&self) -> Point2<f32> {
        self.start
    }

    pub fn end(&self) -> Point2<f32> {
        self.end
    }

    pub fn direction(&self) -> Vector2<f32> {
        self.direction
    }

    pub fn realm_in(&self) -> &Realm {
        &self.realm_in
    }

    pub fn realm_out(&self) -> &Realm {
        &self.realm_out
    }

    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

/// Scan `previous` for the logical object and report its position if it
/// was inside `realm_in`.
///
/// Identity is resolved with the same index-fallback rule, applied to the
/// earlier frame independently. When the current entry carries a tag, the
/// earlier frame must record the same tag for that identity; an absent or
/// different earlier tag rejects the candidate rather than matching it.
fn find_in_realm(
    previous: &DetectionFrame,
    realm_in: &Realm,
    category: &str,
    identity: u64,
    tag: Option<i64>,
) -> Option<Point2<f32>> {
    for (idx, cat) in previous.categories.iter().enumerate() {
        if cat != category {
            continue;
        }
        let position = previous.positions.get(idx)?;
        if previous.resolved_identity(idx) != identity {
            continue;
        }
        if let Some(tag) = tag {
            if previous.tag_for(category, identity) != Some(tag) {
                continue;
            }
        }
        if realm_in.contains(*position) {
            return Some(*position);
        }
    }
    None
}
