//! Finger pose extraction.
//!
//! Each finger of a [`HandLandmarks`] set is classified by how far it is bent ([`Curl`]) and which
//! way it points in the image plane ([`Direction`]). Both are pure functions of the landmark
//! positions of a single frame.

use std::{fmt, ops::Index};

use nalgebra::Vector3;

use crate::landmark::{Finger, HandLandmarks, InvalidLandmarkSet, LandmarkIdx};

/// How far a finger is bent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Curl {
    NoCurl,
    HalfCurl,
    FullCurl,
}

impl Curl {
    pub const ALL: [Curl; 3] = [Curl::NoCurl, Curl::HalfCurl, Curl::FullCurl];
}

/// The image-plane direction a finger points in, bucketed into 8 orientations.
///
/// "Up" is towards the top of the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
    UpLeft,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::UpRight,
        Direction::Right,
        Direction::DownRight,
        Direction::Down,
        Direction::DownLeft,
        Direction::Left,
        Direction::UpLeft,
    ];

    /// Returns the direction's angle in degrees, counter-clockwise from [`Direction::Right`].
    pub fn degrees(self) -> f32 {
        match self {
            Direction::Right => 0.0,
            Direction::UpRight => 45.0,
            Direction::Up => 90.0,
            Direction::UpLeft => 135.0,
            Direction::Left => 180.0,
            Direction::DownLeft => -135.0,
            Direction::Down => -90.0,
            Direction::DownRight => -45.0,
        }
    }

    /// Buckets an angle (in degrees, counter-clockwise from the positive X axis) into a direction.
    ///
    /// Angles within `tolerance` degrees of a cardinal direction map to that direction, all
    /// others map to the diagonal of their quadrant.
    fn from_degrees(deg: f32, tolerance: f32) -> Self {
        // Normalize to [0, 360).
        let deg = deg.rem_euclid(360.0);
        let near = |target: f32| {
            let d = (deg - target).abs();
            d.min(360.0 - d) <= tolerance
        };

        if near(0.0) {
            Direction::Right
        } else if near(90.0) {
            Direction::Up
        } else if near(180.0) {
            Direction::Left
        } else if near(270.0) {
            Direction::Down
        } else if deg < 90.0 {
            Direction::UpRight
        } else if deg < 180.0 {
            Direction::UpLeft
        } else if deg < 270.0 {
            Direction::DownLeft
        } else {
            Direction::DownRight
        }
    }
}

/// The classified pose of a single finger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FingerPose {
    pub curl: Curl,
    pub direction: Direction,
    /// The summed bend angle in degrees that `curl` was derived from.
    pub curl_degrees: f32,
}

/// The poses of all 5 fingers of a hand, indexable by [`Finger`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandPose {
    fingers: [FingerPose; 5],
}

impl HandPose {
    pub fn new(fingers: [FingerPose; 5]) -> Self {
        Self { fingers }
    }

    /// Creates a pose from curl and direction pairs, in [`Finger::ALL`] order.
    ///
    /// The bend angles of the resulting fingers are unknown and reported as 0.
    pub fn from_pairs(pairs: [(Curl, Direction); 5]) -> Self {
        Self::new(pairs.map(|(curl, direction)| FingerPose {
            curl,
            direction,
            curl_degrees: 0.0,
        }))
    }

    /// Returns an iterator over every finger and its pose.
    pub fn iter(&self) -> impl Iterator<Item = (Finger, &FingerPose)> + '_ {
        Finger::ALL.into_iter().zip(self.fingers.iter())
    }

    pub fn fingers(&self) -> &[FingerPose; 5] {
        &self.fingers
    }
}

impl Index<Finger> for HandPose {
    type Output = FingerPose;

    fn index(&self, finger: Finger) -> &FingerPose {
        &self.fingers[finger as usize]
    }
}

impl fmt::Display for HandPose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (finger, pose)) in self.iter().enumerate() {
            if i != 0 {
                f.write_str(", ")?;
            }
            write!(f, "{finger:?}={:?}/{:?}", pose.curl, pose.direction)?;
        }
        Ok(())
    }
}

/// Bend angle limits (in degrees) separating the [`Curl`] classes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurlLimits {
    /// Bend angles below this are classified as [`Curl::NoCurl`].
    pub no_curl: f32,
    /// Bend angles below this (and at least `no_curl`) are classified as [`Curl::HalfCurl`], all
    /// others as [`Curl::FullCurl`].
    pub half_curl: f32,
}

impl CurlLimits {
    pub const FINGER: Self = Self {
        no_curl: 60.0,
        half_curl: 150.0,
    };

    pub const THUMB: Self = Self {
        no_curl: 40.0,
        half_curl: 100.0,
    };

    fn classify(&self, degrees: f32) -> Curl {
        if degrees < self.no_curl {
            Curl::NoCurl
        } else if degrees < self.half_curl {
            Curl::HalfCurl
        } else {
            Curl::FullCurl
        }
    }
}

/// Tunable thresholds for [`PoseExtractor`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseOptions {
    finger_curl: CurlLimits,
    thumb_curl: CurlLimits,
    direction_tolerance: f32,
}

impl Default for PoseOptions {
    fn default() -> Self {
        Self {
            finger_curl: CurlLimits::FINGER,
            thumb_curl: CurlLimits::THUMB,
            direction_tolerance: Self::DEFAULT_DIRECTION_TOLERANCE,
        }
    }
}

impl PoseOptions {
    /// The default tolerance of 22.5° makes direction bucketing a pure nearest-angle match.
    pub const DEFAULT_DIRECTION_TOLERANCE: f32 = 22.5;

    /// Sets the curl limits of the index, middle, ring and pinky fingers.
    ///
    /// # Panics
    ///
    /// Panics if the limits are not finite or `no_curl` is larger than `half_curl`.
    pub fn finger_curl(self, limits: CurlLimits) -> Self {
        check_limits(limits);
        Self {
            finger_curl: limits,
            ..self
        }
    }

    /// Sets the curl limits of the thumb.
    ///
    /// # Panics
    ///
    /// Panics if the limits are not finite or `no_curl` is larger than `half_curl`.
    pub fn thumb_curl(self, limits: CurlLimits) -> Self {
        check_limits(limits);
        Self {
            thumb_curl: limits,
            ..self
        }
    }

    /// Sets the half-width (in degrees) of the cardinal direction buckets.
    ///
    /// Larger values favor [`Direction::Up`], [`Direction::Down`], [`Direction::Left`] and
    /// [`Direction::Right`] over the diagonals.
    ///
    /// # Panics
    ///
    /// Panics if `degrees` is not in range `(0, 45]`.
    pub fn direction_tolerance(self, degrees: f32) -> Self {
        assert!(
            degrees > 0.0 && degrees <= 45.0,
            "direction tolerance must be in (0, 45], got {degrees}"
        );
        Self {
            direction_tolerance: degrees,
            ..self
        }
    }

    pub fn limits_for(&self, finger: Finger) -> CurlLimits {
        match finger {
            Finger::Thumb => self.thumb_curl,
            _ => self.finger_curl,
        }
    }

    pub fn tolerance(&self) -> f32 {
        self.direction_tolerance
    }
}

fn check_limits(limits: CurlLimits) {
    assert!(
        limits.no_curl.is_finite() && limits.half_curl.is_finite(),
        "curl limits must be finite"
    );
    assert!(
        limits.no_curl <= limits.half_curl,
        "`no_curl` limit ({}) must not exceed `half_curl` limit ({})",
        limits.no_curl,
        limits.half_curl,
    );
}

/// Derives [`HandPose`]s from [`HandLandmarks`].
#[derive(Debug, Clone, Default)]
pub struct PoseExtractor {
    options: PoseOptions,
}

impl PoseExtractor {
    pub fn new(options: PoseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PoseOptions {
        &self.options
    }

    /// Validates a raw list of points and classifies it like [`PoseExtractor::extract`].
    pub fn extract_raw(&self, points: &[[f32; 3]]) -> Result<HandPose, InvalidLandmarkSet> {
        let hand = HandLandmarks::new(points.iter().copied())?;
        Ok(self.extract(&hand))
    }

    /// Classifies curl and direction of every finger of `hand`.
    pub fn extract(&self, hand: &HandLandmarks) -> HandPose {
        let mut fingers = [FingerPose {
            curl: Curl::NoCurl,
            direction: Direction::Up,
            curl_degrees: 0.0,
        }; 5];

        for (finger, out) in Finger::ALL.into_iter().zip(&mut fingers) {
            let curl_degrees = bend_degrees(hand, finger);
            let curl = self.options.limits_for(finger).classify(curl_degrees);
            let direction = self.direction(hand, finger);

            *out = FingerPose {
                curl,
                direction,
                curl_degrees,
            };
        }

        HandPose::new(fingers)
    }

    /// Direction of the base-to-tip vector in the image plane.
    ///
    /// A finger pointing at the camera has no such vector, so the wrist-to-base segment is used
    /// instead. If that vanishes too, the angle is 0° (right).
    fn direction(&self, hand: &HandLandmarks, finger: Finger) -> Direction {
        let base = hand.get(finger.base()).to_image_plane();
        let tip = hand.get(finger.tip()).to_image_plane();
        let mut v = tip - base;
        if v.norm() <= f32::EPSILON {
            let wrist = hand.get(LandmarkIdx::Wrist).to_image_plane();
            v = base - wrist;
        }

        // Image Y points down, so flip it to get counter-clockwise angles.
        let deg = (-v.y).atan2(v.x).to_degrees();
        Direction::from_degrees(deg, self.options.direction_tolerance)
    }
}

/// Sums the angles between consecutive segments of a finger's joint chain.
///
/// The thumb's wrist-to-CMC segment lies inside the palm and is skipped.
fn bend_degrees(hand: &HandLandmarks, finger: Finger) -> f32 {
    let chain = hand.finger_chain(finger).map(|p| p.to_vector());
    let start = match finger {
        Finger::Thumb => 1,
        _ => 0,
    };

    let segments = chain[start..]
        .windows(2)
        .map(|w| w[1] - w[0])
        .collect::<Vec<_>>();
    segments
        .windows(2)
        .map(|s| segment_angle(&s[0], &s[1]))
        .sum::<f32>()
        .to_degrees()
}

/// Returns the angle between two vectors in radians, or 0 if either of them has zero length.
fn segment_angle(a: &Vector3<f32>, b: &Vector3<f32>) -> f32 {
    if a.norm() * b.norm() <= f32::EPSILON {
        return 0.0;
    }
    // `atan2` stays accurate for nearly (anti-)parallel segments, unlike `acos` of the dot product.
    a.cross(b).norm().atan2(a.dot(b))
}
