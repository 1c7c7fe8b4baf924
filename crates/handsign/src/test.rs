//! Shared test fixtures.

use crate::gesture::GestureName;
use crate::landmark::{Finger, HandLandmarks};
use crate::pose::{Curl, Direction};
use crate::synth::{FingerShape, SyntheticHand};

fn extended(direction: Direction) -> FingerShape {
    FingerShape::curled(Curl::NoCurl, direction)
}

fn half(direction: Direction) -> FingerShape {
    FingerShape::curled(Curl::HalfCurl, direction)
}

fn folded() -> FingerShape {
    FingerShape::curled(Curl::FullCurl, Direction::Up)
}

fn pointing(direction: Direction) -> SyntheticHand {
    SyntheticHand::uniform(folded()).with(Finger::Index, extended(direction))
}

/// Returns a synthetic hand in the textbook pose of a built-in gesture.
pub fn canonical_hand(name: GestureName) -> HandLandmarks {
    use Direction::*;
    use Finger::*;

    let fist = SyntheticHand::uniform(folded());
    let hand = match name {
        GestureName::Victory => fist
            .with(Thumb, half(Up))
            .with(Index, extended(Up))
            .with(Middle, extended(Up)),
        GestureName::ThumbsUp => fist.with(Thumb, extended(Up)),
        GestureName::ThumbsDown => fist.with(Thumb, extended(Down)),
        GestureName::MiddleFinger => fist.with(Middle, extended(Up)),
        GestureName::OkSign => SyntheticHand::uniform(extended(Up))
            .with(Thumb, half(Up))
            .with(Index, half(Up)),
        GestureName::PinchedFinger => SyntheticHand::uniform(half(Up)),
        GestureName::PinchedHand => fist.with(Thumb, extended(Up)).with(Index, half(Up)),
        GestureName::RaisedHand => SyntheticHand::uniform(extended(Up)),
        GestureName::LoveYou => fist
            .with(Thumb, extended(Up))
            .with(Index, extended(Up))
            .with(Pinky, extended(Up)),
        GestureName::RockOn => fist.with(Index, extended(Up)).with(Pinky, extended(Up)),
        GestureName::CallMe => fist.with(Thumb, extended(Left)).with(Pinky, extended(Up)),
        GestureName::PointRight => pointing(Right),
        GestureName::PointUp => pointing(Up),
        GestureName::PointLeft => pointing(Left),
        GestureName::PointDown => pointing(Down),
        GestureName::RaisedFist => fist,
    };
    hand.landmarks()
}

/// Canonical hands of all built-in gestures, in registration order.
pub fn canonical_hands() -> impl Iterator<Item = (GestureName, HandLandmarks)> {
    GestureName::ALL
        .into_iter()
        .map(|name| (name, canonical_hand(name)))
}

pub fn fist() -> HandLandmarks {
    canonical_hand(GestureName::RaisedFist)
}
