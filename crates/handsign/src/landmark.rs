//! Hand landmark sets, as produced by a hand landmark network.
//!
//! A [`HandLandmarks`] value always holds exactly [`HandLandmarks::NUM_LANDMARKS`] points in the
//! order given by [`LandmarkIdx`]. Coordinates are in the input image's coordinate system, so X
//! points right and Y points *down*; Z is relative depth.

use std::fmt;

use nalgebra::{Vector2, Vector3};

type Position = [f32; 3];

/// A single landmark in 3D space.
#[derive(Debug, PartialEq, PartialOrd, Clone, Copy)]
pub struct LandmarkPoint {
    pos: Position,
}

impl LandmarkPoint {
    #[inline]
    pub fn new(position: Position) -> Self {
        Self { pos: position }
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.pos
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.pos[0]
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.pos[1]
    }

    #[inline]
    pub fn z(&self) -> f32 {
        self.pos[2]
    }

    /// Returns the point as a 3D vector.
    #[inline]
    pub fn to_vector(&self) -> Vector3<f32> {
        Vector3::new(self.pos[0], self.pos[1], self.pos[2])
    }

    /// Returns the point projected onto the image plane, dropping the depth coordinate.
    #[inline]
    pub fn to_image_plane(&self) -> Vector2<f32> {
        Vector2::new(self.pos[0], self.pos[1])
    }

    fn is_finite(&self) -> bool {
        self.pos.iter().all(|c| c.is_finite())
    }
}

impl From<Position> for LandmarkPoint {
    #[inline]
    fn from(pos: Position) -> Self {
        Self::new(pos)
    }
}

/// The 21 landmarks of a single detected hand.
#[derive(Debug, Clone, PartialEq)]
pub struct HandLandmarks {
    points: [LandmarkPoint; HandLandmarks::NUM_LANDMARKS],
}

impl HandLandmarks {
    pub const NUM_LANDMARKS: usize = 21;

    /// Creates a landmark set from a list of points in [`LandmarkIdx`] order.
    ///
    /// Fails if the list does not contain exactly [`HandLandmarks::NUM_LANDMARKS`] points, or if
    /// any coordinate is NaN or infinite.
    pub fn new<P, I>(points: I) -> Result<Self, InvalidLandmarkSet>
    where
        P: Into<LandmarkPoint>,
        I: IntoIterator<Item = P>,
    {
        let points = points.into_iter().map(Into::into).collect::<Vec<_>>();
        let points: [LandmarkPoint; Self::NUM_LANDMARKS] = points
            .try_into()
            .map_err(|v: Vec<_>| InvalidLandmarkSet::WrongPointCount(v.len()))?;

        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(InvalidLandmarkSet::NonFiniteCoordinate { index });
        }

        Ok(Self { points })
    }

    /// Wraps points that are known to be finite.
    pub(crate) fn from_array(points: [LandmarkPoint; Self::NUM_LANDMARKS]) -> Self {
        debug_assert!(points.iter().all(|p| p.is_finite()));
        Self { points }
    }

    #[inline]
    pub fn get(&self, idx: LandmarkIdx) -> LandmarkPoint {
        self.points[idx as usize]
    }

    #[inline]
    pub fn points(&self) -> &[LandmarkPoint] {
        &self.points
    }

    /// Returns the points of `finger`'s joint chain, starting at the wrist.
    pub fn finger_chain(&self, finger: Finger) -> [LandmarkPoint; 5] {
        finger.chain().map(|idx| self.get(idx))
    }
}

/// Error returned when a list of points does not form a usable [`HandLandmarks`] set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidLandmarkSet {
    /// The list contained the given number of points instead of 21.
    WrongPointCount(usize),
    /// The point at `index` had a NaN or infinite coordinate.
    NonFiniteCoordinate { index: usize },
}

impl fmt::Display for InvalidLandmarkSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongPointCount(n) => write!(
                f,
                "invalid landmark set: expected {} points, got {n}",
                HandLandmarks::NUM_LANDMARKS
            ),
            Self::NonFiniteCoordinate { index } => {
                write!(f, "invalid landmark set: non-finite coordinate in point {index}")
            }
        }
    }
}

impl std::error::Error for InvalidLandmarkSet {}

/// Names for the hand landmarks.
///
/// # Terminology
///
/// - **CMC**: [Carpometacarpal joint], the lowest joint of the thumb, located near the wrist.
/// - **MCP**: [Metacarpophalangeal joint], the lower joint forming the knuckles near the palm of
///   the hand.
/// - **PIP**: Proximal Interphalangeal joint, the joint between the MCP and DIP.
/// - **DIP**: Distal Interphalangeal joint, the highest joint of a finger.
/// - **Tip**: This landmark is just placed on the tip of the finger, above the DIP.
///
/// [Carpometacarpal joint]: https://en.wikipedia.org/wiki/Carpometacarpal_joint
/// [Metacarpophalangeal joint]: https://en.wikipedia.org/wiki/Metacarpophalangeal_joint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandmarkIdx {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexFingerMcp,
    IndexFingerPip,
    IndexFingerDip,
    IndexFingerTip,
    MiddleFingerMcp,
    MiddleFingerPip,
    MiddleFingerDip,
    MiddleFingerTip,
    RingFingerMcp,
    RingFingerPip,
    RingFingerDip,
    RingFingerTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

/// One of the five fingers of a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    /// All fingers, in landmark order.
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    /// Returns the finger's joint chain: the wrist followed by its 4 joints, from the palm outward.
    ///
    /// For the thumb, the first joint after the wrist is the CMC joint; for all other fingers it
    /// is the MCP joint (the knuckle).
    pub fn chain(self) -> [LandmarkIdx; 5] {
        use LandmarkIdx::*;
        match self {
            Finger::Thumb => [Wrist, ThumbCmc, ThumbMcp, ThumbIp, ThumbTip],
            Finger::Index => [
                Wrist,
                IndexFingerMcp,
                IndexFingerPip,
                IndexFingerDip,
                IndexFingerTip,
            ],
            Finger::Middle => [
                Wrist,
                MiddleFingerMcp,
                MiddleFingerPip,
                MiddleFingerDip,
                MiddleFingerTip,
            ],
            Finger::Ring => [
                Wrist,
                RingFingerMcp,
                RingFingerPip,
                RingFingerDip,
                RingFingerTip,
            ],
            Finger::Pinky => [Wrist, PinkyMcp, PinkyPip, PinkyDip, PinkyTip],
        }
    }

    /// The base joint that finger direction is measured from.
    #[inline]
    pub fn base(self) -> LandmarkIdx {
        self.chain()[1]
    }

    #[inline]
    pub fn tip(self) -> LandmarkIdx {
        self.chain()[4]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chains_cover_every_landmark_once() {
        let mut seen = [0; HandLandmarks::NUM_LANDMARKS];
        for finger in Finger::ALL {
            for idx in &finger.chain()[1..] {
                seen[*idx as usize] += 1;
            }
        }
        assert_eq!(seen[LandmarkIdx::Wrist as usize], 0);
        assert!(seen[1..].iter().all(|&n| n == 1), "{seen:?}");
    }

    #[test]
    fn rejects_wrong_point_count() {
        assert_eq!(
            HandLandmarks::new(vec![[0.0f32; 3]; 20]),
            Err(InvalidLandmarkSet::WrongPointCount(20))
        );
        assert_eq!(
            HandLandmarks::new(vec![[0.0f32; 3]; 22]),
            Err(InvalidLandmarkSet::WrongPointCount(22))
        );
        assert_eq!(
            HandLandmarks::new(Vec::<[f32; 3]>::new()),
            Err(InvalidLandmarkSet::WrongPointCount(0))
        );
    }

    #[test]
    fn rejects_non_finite_coordinates() {
        let mut points = vec![[1.0, 2.0, 3.0]; 21];
        points[7][2] = f32::NAN;
        assert_eq!(
            HandLandmarks::new(points),
            Err(InvalidLandmarkSet::NonFiniteCoordinate { index: 7 })
        );
    }

    #[test]
    fn indexing() {
        let points = (0..21).map(|i| [i as f32, 0.0, 0.0]);
        let hand = HandLandmarks::new(points).unwrap();
        assert_eq!(hand.get(LandmarkIdx::Wrist).x(), 0.0);
        assert_eq!(hand.get(LandmarkIdx::PinkyTip).x(), 20.0);
        let chain = hand.finger_chain(Finger::Middle);
        assert_eq!(
            chain.map(|p| p.x() as usize),
            [0, 9, 10, 11, 12],
        );
        assert_eq!(Finger::Thumb.base(), LandmarkIdx::ThumbCmc);
        assert_eq!(Finger::Ring.tip(), LandmarkIdx::RingFingerTip);
    }
}
