//! Gesture descriptors: named sets of weighted per-finger pose rules.

mod catalog;
mod name;

use std::fmt;

use crate::landmark::Finger;
use crate::pose::{Curl, Direction};

pub use catalog::builtin_descriptor;
pub use name::{asset_for_name, GestureName, UnknownGesture, FALLBACK_ASSET};

/// The weighted curl and direction rules of one finger of a [`GestureDescriptor`].
///
/// A finger without direction rules accepts any direction with weight 1.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FingerRules {
    curls: Vec<(Curl, f32)>,
    directions: Vec<(Direction, f32)>,
}

impl FingerRules {
    pub fn curls(&self) -> &[(Curl, f32)] {
        &self.curls
    }

    pub fn directions(&self) -> &[(Direction, f32)] {
        &self.directions
    }

    /// Returns whether this finger accepts any direction.
    #[inline]
    pub fn is_wildcard(&self) -> bool {
        self.directions.is_empty()
    }

    /// Returns the weight of `curl`, or 0 if there is no rule for it.
    pub fn curl_weight(&self, curl: Curl) -> f32 {
        lookup(&self.curls, curl).unwrap_or(0.0)
    }

    /// Returns the weight of `direction`.
    ///
    /// This is 1 if the finger has no direction rules, and 0 if it has rules but none for
    /// `direction`.
    pub fn direction_weight(&self, direction: Direction) -> f32 {
        if self.is_wildcard() {
            1.0
        } else {
            lookup(&self.directions, direction).unwrap_or(0.0)
        }
    }

    pub fn max_curl_weight(&self) -> f32 {
        self.curls.iter().map(|(_, w)| *w).fold(0.0, f32::max)
    }

    pub fn max_direction_weight(&self) -> f32 {
        if self.is_wildcard() {
            1.0
        } else {
            self.directions.iter().map(|(_, w)| *w).fold(0.0, f32::max)
        }
    }
}

fn lookup<K: PartialEq>(rules: &[(K, f32)], key: K) -> Option<f32> {
    rules.iter().find(|(k, _)| *k == key).map(|(_, w)| *w)
}

fn upsert<K: PartialEq>(rules: &mut Vec<(K, f32)>, key: K, weight: f32) {
    match rules.iter_mut().find(|(k, _)| *k == key) {
        Some(rule) => rule.1 = weight,
        None => rules.push((key, weight)),
    }
}

/// A named gesture, defined by weighted curl and direction rules for each finger.
///
/// Descriptors are created through [`GestureDescriptor::builder`], which guarantees that every
/// finger has at least one curl rule and that all weights are finite and non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureDescriptor {
    name: String,
    fingers: [FingerRules; 5],
}

impl GestureDescriptor {
    pub fn builder<N: Into<String>>(name: N) -> DescriptorBuilder {
        DescriptorBuilder {
            name: name.into(),
            fingers: Default::default(),
            error: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self, finger: Finger) -> &FingerRules {
        &self.fingers[finger as usize]
    }

    /// Returns the rules of every finger, in [`Finger::ALL`] order.
    pub fn fingers(&self) -> &[FingerRules; 5] {
        &self.fingers
    }

    /// Returns the highest unnormalized score any hand pose can reach.
    ///
    /// If this is 0, the descriptor can never match anything.
    pub fn max_achievable(&self) -> f32 {
        self.fingers
            .iter()
            .map(|rules| rules.max_curl_weight() * rules.max_direction_weight())
            .sum()
    }
}

/// Builder for [`GestureDescriptor`]s.
///
/// Invalid weights are remembered and reported by [`DescriptorBuilder::build`]. Adding a rule for
/// a curl or direction that already has one replaces its weight.
#[derive(Debug, Clone)]
pub struct DescriptorBuilder {
    name: String,
    fingers: [FingerRules; 5],
    error: Option<DescriptorError>,
}

impl DescriptorBuilder {
    /// Adds a curl rule to `finger`.
    pub fn curl(mut self, finger: Finger, curl: Curl, weight: f32) -> Self {
        if self.check_weight(finger, weight) {
            upsert(&mut self.fingers[finger as usize].curls, curl, weight);
        }
        self
    }

    /// Adds a direction rule to `finger`.
    ///
    /// Once a finger has a direction rule, it only accepts the directions it has rules for.
    pub fn direction(mut self, finger: Finger, direction: Direction, weight: f32) -> Self {
        if self.check_weight(finger, weight) {
            upsert(&mut self.fingers[finger as usize].directions, direction, weight);
        }
        self
    }

    /// Adds several curl rules to `finger`.
    pub fn curls(self, finger: Finger, rules: &[(Curl, f32)]) -> Self {
        rules
            .iter()
            .fold(self, |this, &(curl, weight)| this.curl(finger, curl, weight))
    }

    /// Adds several direction rules to `finger`.
    pub fn directions(self, finger: Finger, rules: &[(Direction, f32)]) -> Self {
        rules
            .iter()
            .fold(self, |this, &(dir, weight)| this.direction(finger, dir, weight))
    }

    fn check_weight(&mut self, finger: Finger, weight: f32) -> bool {
        if weight.is_finite() && weight >= 0.0 {
            return true;
        }
        if self.error.is_none() {
            self.error = Some(DescriptorError::InvalidWeight {
                gesture: self.name.clone(),
                finger,
                weight,
            });
        }
        false
    }

    /// Validates the rules and creates the [`GestureDescriptor`].
    ///
    /// Fails if any weight was negative or not finite, if a finger has no curl rule, or if the
    /// weights are so large that the maximum score overflows `f32`. Fingers
    /// whose curl rules all have weight 0 are accepted with a warning, since they can never
    /// contribute to the score.
    pub fn build(self) -> Result<GestureDescriptor, DescriptorError> {
        if let Some(error) = self.error {
            return Err(error);
        }

        for (finger, rules) in Finger::ALL.into_iter().zip(&self.fingers) {
            if rules.curls.is_empty() {
                return Err(DescriptorError::MissingCurlRule {
                    gesture: self.name,
                    finger,
                });
            }
            if rules.max_curl_weight() == 0.0 {
                log::warn!(
                    "gesture '{}': all curl rules of {:?} have weight 0",
                    self.name,
                    finger
                );
            }
        }

        let descriptor = GestureDescriptor {
            name: self.name,
            fingers: self.fingers,
        };
        let max = descriptor.max_achievable();
        if !max.is_finite() {
            return Err(DescriptorError::WeightOverflow {
                gesture: descriptor.name,
            });
        }
        if max == 0.0 {
            log::warn!("gesture '{}' can never match", descriptor.name);
        }
        Ok(descriptor)
    }
}

/// Error returned by [`DescriptorBuilder::build`].
#[derive(Debug, Clone, PartialEq)]
pub enum DescriptorError {
    /// A finger has no curl rule.
    MissingCurlRule { gesture: String, finger: Finger },
    /// A rule weight was negative, infinite or NaN.
    InvalidWeight {
        gesture: String,
        finger: Finger,
        weight: f32,
    },
    /// The weights are too large for the maximum score to be represented.
    WeightOverflow { gesture: String },
}

impl fmt::Display for DescriptorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCurlRule { gesture, finger } => {
                write!(f, "gesture '{gesture}' has no curl rule for {finger:?}")
            }
            Self::InvalidWeight {
                gesture,
                finger,
                weight,
            } => write!(
                f,
                "gesture '{gesture}' has an invalid weight for {finger:?}: {weight}"
            ),
            Self::WeightOverflow { gesture } => {
                write!(f, "weights of gesture '{gesture}' overflow the maximum score")
            }
        }
    }
}

impl std::error::Error for DescriptorError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_fingers(builder: DescriptorBuilder, curl: Curl, weight: f32) -> DescriptorBuilder {
        Finger::ALL
            .into_iter()
            .fold(builder, |b, finger| b.curl(finger, curl, weight))
    }

    #[test]
    fn missing_curl_rule() {
        let err = GestureDescriptor::builder("partial")
            .curl(Finger::Thumb, Curl::NoCurl, 1.0)
            .curl(Finger::Index, Curl::NoCurl, 1.0)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            DescriptorError::MissingCurlRule {
                gesture: "partial".into(),
                finger: Finger::Middle,
            }
        );
    }

    #[test]
    fn invalid_weights() {
        for weight in [-0.5, f32::INFINITY, f32::NAN] {
            let err = all_fingers(GestureDescriptor::builder("bad"), Curl::NoCurl, 1.0)
                .direction(Finger::Ring, Direction::Up, weight)
                .build()
                .unwrap_err();
            assert!(
                matches!(
                    err,
                    DescriptorError::InvalidWeight {
                        finger: Finger::Ring,
                        ..
                    }
                ),
                "{err}"
            );
        }
    }

    #[test]
    fn overflowing_weights() {
        // Every weight is finite, but their products are not.
        let err = all_fingers(GestureDescriptor::builder("huge"), Curl::NoCurl, 1e20)
            .direction(Finger::Index, Direction::Up, 1e20)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            DescriptorError::WeightOverflow {
                gesture: "huge".into()
            }
        );

        // Finite products whose sum is not.
        let err = all_fingers(GestureDescriptor::builder("wide"), Curl::NoCurl, 3e38)
            .build()
            .unwrap_err();
        assert!(matches!(err, DescriptorError::WeightOverflow { .. }), "{err}");
    }

    #[test]
    fn zero_weights_are_allowed() {
        let desc = all_fingers(GestureDescriptor::builder("dont-care"), Curl::FullCurl, 0.0)
            .build()
            .unwrap();
        assert_eq!(desc.max_achievable(), 0.0);
    }

    #[test]
    fn rule_lookup() {
        let desc = all_fingers(GestureDescriptor::builder("g"), Curl::FullCurl, 1.0)
            .curl(Finger::Index, Curl::HalfCurl, 0.5)
            .directions(
                Finger::Index,
                &[(Direction::Up, 1.0), (Direction::UpLeft, 0.25)],
            )
            .build()
            .unwrap();

        let index = desc.rules(Finger::Index);
        assert_eq!(index.curl_weight(Curl::FullCurl), 1.0);
        assert_eq!(index.curl_weight(Curl::HalfCurl), 0.5);
        assert_eq!(index.curl_weight(Curl::NoCurl), 0.0);
        assert_eq!(index.direction_weight(Direction::UpLeft), 0.25);
        assert_eq!(index.direction_weight(Direction::Down), 0.0);
        assert!(!index.is_wildcard());

        let thumb = desc.rules(Finger::Thumb);
        assert!(thumb.is_wildcard());
        assert_eq!(thumb.direction_weight(Direction::Down), 1.0);
        assert_eq!(thumb.max_direction_weight(), 1.0);
        assert_eq!(desc.max_achievable(), 5.0);
    }

    #[test]
    fn repeated_rule_replaces_weight() {
        let desc = all_fingers(GestureDescriptor::builder("g"), Curl::NoCurl, 1.0)
            .curl(Finger::Pinky, Curl::NoCurl, 0.3)
            .direction(Finger::Pinky, Direction::Left, 0.2)
            .direction(Finger::Pinky, Direction::Left, 0.7)
            .build()
            .unwrap();
        let pinky = desc.rules(Finger::Pinky);
        assert_eq!(pinky.curls(), &[(Curl::NoCurl, 0.3)]);
        assert_eq!(pinky.directions(), &[(Direction::Left, 0.7)]);
    }
}
