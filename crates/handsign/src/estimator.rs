//! Gesture estimation: extraction, scoring and selection of the best matches.

use std::cmp::Reverse;

use crate::landmark::{HandLandmarks, InvalidLandmarkSet};
use crate::num::TotalF32;
use crate::pose::{HandPose, PoseExtractor};
use crate::registry::Registry;
use crate::score::score;
use crate::timer::Timer;

/// Default value of the `min_confidence` argument of [`Estimator::estimate`].
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.8;

/// A gesture whose score reached the requested confidence.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureMatch {
    pub name: String,
    /// Confidence in range 0.0 to 1.0.
    pub score: f32,
}

/// Result of a single [`Estimator::estimate`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct Estimation {
    pose: HandPose,
    matches: Vec<GestureMatch>,
}

impl Estimation {
    /// Returns the finger poses the matches were computed from.
    pub fn pose(&self) -> &HandPose {
        &self.pose
    }

    /// Returns all matching gestures, best first.
    ///
    /// Gestures with equal scores are listed in registration order.
    pub fn matches(&self) -> &[GestureMatch] {
        &self.matches
    }

    /// Returns the best match, if any gesture reached the requested confidence.
    pub fn best(&self) -> Option<&GestureMatch> {
        self.matches.first()
    }

    pub fn into_matches(self) -> Vec<GestureMatch> {
        self.matches
    }
}

/// Matches hands against every gesture of a [`Registry`].
pub struct Estimator<'r> {
    registry: &'r Registry,
    extractor: PoseExtractor,
    t_extract: Timer,
    t_score: Timer,
}

impl<'r> Estimator<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self::with_extractor(registry, PoseExtractor::default())
    }

    pub fn with_extractor(registry: &'r Registry, extractor: PoseExtractor) -> Self {
        Self {
            registry,
            extractor,
            t_extract: Timer::new("extract"),
            t_score: Timer::new("score"),
        }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    pub fn extractor(&self) -> &PoseExtractor {
        &self.extractor
    }

    /// Validates a raw list of points and estimates it like [`Estimator::estimate`].
    pub fn estimate_raw(
        &self,
        points: &[[f32; 3]],
        min_confidence: f32,
    ) -> Result<Estimation, InvalidLandmarkSet> {
        let hand = HandLandmarks::new(points.iter().copied())?;
        Ok(self.estimate(&hand, min_confidence))
    }

    /// Classifies `hand` and scores it against all registered gestures.
    ///
    /// Only gestures scoring at least `min_confidence` are returned. An estimation without any
    /// matches is not an error.
    pub fn estimate(&self, hand: &HandLandmarks, min_confidence: f32) -> Estimation {
        let pose = self.t_extract.time(|| self.extractor.extract(hand));
        log::trace!("pose: {pose}");

        let mut matches = self.t_score.time(|| {
            self.registry
                .descriptors()
                .iter()
                .filter_map(|desc| {
                    let score = score(desc, &pose);
                    log::trace!("{}: {score:.3}", desc.name());
                    (score >= min_confidence).then(|| GestureMatch {
                        name: desc.name().to_string(),
                        score,
                    })
                })
                .collect::<Vec<_>>()
        });
        // Stable, so ties stay in registration order.
        matches.sort_by_key(|m| Reverse(TotalF32(m.score)));

        Estimation { pose, matches }
    }

    /// Returns the profiling timers of this estimator.
    pub fn timers(&self) -> impl IntoIterator<Item = &Timer> + '_ {
        [&self.t_extract, &self.t_score]
    }
}
