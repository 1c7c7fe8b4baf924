//! Synthetic hand landmarks with prescribed finger poses.
//!
//! Every finger is laid out along its [`Direction`] from a common wrist position, and each of its
//! joints is bent by the same angle towards the camera. Bending towards the camera keeps the
//! finger's image-plane direction intact (as long as it is not curled back on itself), so the
//! generated landmarks classify predictably.

use nalgebra::Vector3;

use crate::landmark::{Finger, HandLandmarks, LandmarkPoint};
use crate::pose::{Curl, Direction};

/// Wrist position, in pixels of a 640x480 image.
const WRIST: [f32; 3] = [320.0, 400.0, 0.0];

/// Distance from the wrist to the first joint of each finger.
const BASE_LENGTHS: [f32; 5] = [40.0, 90.0, 95.0, 90.0, 80.0];

/// Lengths of the 3 segments beyond the first joint of each finger.
const SEGMENT_LENGTHS: [[f32; 3]; 5] = [
    [35.0, 30.0, 25.0],
    [40.0, 25.0, 20.0],
    [45.0, 28.0, 22.0],
    [42.0, 26.0, 20.0],
    [32.0, 20.0, 18.0],
];

/// Shape of a single synthetic finger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FingerShape {
    /// Bend of every joint, in degrees.
    pub joint_bend: f32,
    pub direction: Direction,
}

impl FingerShape {
    /// A perfectly straight finger.
    pub fn straight(direction: Direction) -> Self {
        Self::bent(0.0, direction)
    }

    /// A finger with every joint bent by `joint_bend` degrees.
    pub fn bent(joint_bend: f32, direction: Direction) -> Self {
        Self {
            joint_bend,
            direction,
        }
    }

    /// A finger that is classified as `curl` under the default curl limits.
    ///
    /// A [`Curl::FullCurl`] finger folds back towards the palm, so its classified direction will
    /// generally differ from `direction`.
    pub fn curled(curl: Curl, direction: Direction) -> Self {
        let joint_bend = match curl {
            Curl::NoCurl => 5.0,
            Curl::HalfCurl => 35.0,
            Curl::FullCurl => 75.0,
        };
        Self::bent(joint_bend, direction)
    }
}

/// A synthetic hand made of 5 [`FingerShape`]s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyntheticHand {
    fingers: [FingerShape; 5],
}

impl SyntheticHand {
    /// Creates a hand from finger shapes in [`Finger::ALL`] order.
    pub fn new(fingers: [FingerShape; 5]) -> Self {
        Self { fingers }
    }

    /// Creates a hand whose fingers all have the same shape.
    pub fn uniform(shape: FingerShape) -> Self {
        Self::new([shape; 5])
    }

    /// Replaces the shape of a single finger.
    pub fn with(mut self, finger: Finger, shape: FingerShape) -> Self {
        self.fingers[finger as usize] = shape;
        self
    }

    /// Computes the landmark positions of this hand.
    pub fn landmarks(&self) -> HandLandmarks {
        let wrist = Vector3::from(WRIST);
        let mut points = [LandmarkPoint::new(WRIST); HandLandmarks::NUM_LANDMARKS];

        for finger in Finger::ALL {
            let i = finger as usize;
            let shape = self.fingers[i];
            let rad = shape.direction.degrees().to_radians();
            // Image Y points down.
            let along = Vector3::new(rad.cos(), -rad.sin(), 0.0);
            let towards_camera = Vector3::new(0.0, 0.0, -1.0);

            let mut pos = wrist + along * BASE_LENGTHS[i];
            let chain = finger.chain();
            points[chain[1] as usize] = point(&pos);
            for (k, len) in SEGMENT_LENGTHS[i].iter().enumerate() {
                let phi = shape.joint_bend.to_radians() * (k + 1) as f32;
                pos += (along * phi.cos() + towards_camera * phi.sin()) * *len;
                points[chain[k + 2] as usize] = point(&pos);
            }
        }

        HandLandmarks::from_array(points)
    }
}

fn point(v: &Vector3<f32>) -> LandmarkPoint {
    LandmarkPoint::new([v.x, v.y, v.z])
}
