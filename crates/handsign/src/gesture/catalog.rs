//! Rules of the built-in gestures.
//!
//! Fingers that are essential to a gesture carry a weight of 2 on their primary rules, which lets
//! them dominate the score over the remaining fingers. Fingers that are fully curled never get
//! direction rules, since a curled finger's base-to-tip vector points back into the palm in
//! arbitrary directions.

use crate::landmark::Finger::{self, *};
use crate::pose::Curl::*;
use crate::pose::Direction::{self, *};

use super::{DescriptorBuilder, DescriptorError, GestureDescriptor, GestureName};

const POINTING_UP: &[(Direction, f32)] = &[(Up, 1.0), (UpLeft, 0.8), (UpRight, 0.8)];

const NON_THUMB: [Finger; 4] = [Index, Middle, Ring, Pinky];

/// Curled out of the way, tolerating a slightly loose fist.
fn folded(builder: DescriptorBuilder, fingers: &[Finger]) -> DescriptorBuilder {
    fingers.iter().fold(builder, |b, &finger| {
        b.curls(finger, &[(FullCurl, 1.0), (HalfCurl, 0.5)])
    })
}

fn extended_up(builder: DescriptorBuilder, fingers: &[Finger], weight: f32) -> DescriptorBuilder {
    fingers.iter().fold(builder, |b, &finger| {
        b.curl(finger, NoCurl, weight)
            .directions(finger, POINTING_UP)
    })
}

/// Index finger extended in `dir`, everything else curled.
fn pointing(name: GestureName, dir: Direction) -> DescriptorBuilder {
    let [left, right] = match dir {
        Up => [UpLeft, UpRight],
        Down => [DownLeft, DownRight],
        Left => [UpLeft, DownLeft],
        Right => [UpRight, DownRight],
        UpLeft => [Up, Left],
        UpRight => [Up, Right],
        DownLeft => [Down, Left],
        DownRight => [Down, Right],
    };
    let builder = GestureDescriptor::builder(name.as_str())
        .curls(Thumb, &[(HalfCurl, 1.0), (FullCurl, 1.0), (NoCurl, 0.5)])
        .curl(Index, NoCurl, 2.0)
        .directions(Index, &[(dir, 1.0), (left, 0.7), (right, 0.7)]);
    folded(builder, &[Middle, Ring, Pinky])
}

/// Returns the descriptor of a built-in gesture.
pub fn builtin_descriptor(name: GestureName) -> Result<GestureDescriptor, DescriptorError> {
    let builder = GestureDescriptor::builder(name.as_str());
    let builder = match name {
        GestureName::Victory => {
            let b = builder.curls(Thumb, &[(HalfCurl, 1.0), (NoCurl, 0.5)]);
            let b = extended_up(b, &[Index, Middle], 2.0);
            folded(b, &[Ring, Pinky])
        }
        GestureName::ThumbsUp => {
            let b = builder
                .curl(Thumb, NoCurl, 2.0)
                .directions(Thumb, &[(Up, 1.0), (UpLeft, 0.7), (UpRight, 0.7)]);
            folded(b, &NON_THUMB)
        }
        GestureName::ThumbsDown => {
            let b = builder
                .curl(Thumb, NoCurl, 2.0)
                .directions(Thumb, &[(Down, 1.0), (DownLeft, 0.7), (DownRight, 0.7)]);
            folded(b, &NON_THUMB)
        }
        GestureName::MiddleFinger => {
            let b = builder.curls(Thumb, &[(HalfCurl, 1.0), (FullCurl, 1.0)]);
            let b = extended_up(b, &[Middle], 2.0);
            folded(b, &[Index, Ring, Pinky])
        }
        GestureName::OkSign => {
            // Thumb and index finger touch to form a circle.
            let b = builder
                .curls(Thumb, &[(HalfCurl, 1.0), (NoCurl, 0.5)])
                .curls(Index, &[(HalfCurl, 1.0), (FullCurl, 0.5)]);
            extended_up(b, &[Middle, Ring, Pinky], 1.0)
        }
        GestureName::PinchedFinger => {
            let b = builder.curl(Thumb, HalfCurl, 1.0);
            NON_THUMB.iter().fold(b, |b, &finger| {
                b.curl(finger, HalfCurl, 1.0).directions(finger, POINTING_UP)
            })
        }
        GestureName::PinchedHand => {
            let b = builder
                .curls(Thumb, &[(NoCurl, 1.0), (HalfCurl, 0.5)])
                .curl(Index, HalfCurl, 1.0);
            NON_THUMB[1..]
                .iter()
                .fold(b, |b, &finger| b.curl(finger, FullCurl, 1.0))
        }
        GestureName::RaisedHand => {
            let b = builder.curls(Thumb, &[(NoCurl, 1.0), (HalfCurl, 0.5)]);
            extended_up(b, &NON_THUMB, 1.0)
        }
        GestureName::LoveYou => {
            let b = builder.curl(Thumb, NoCurl, 1.0);
            extended_up(b, &[Index, Pinky], 1.0)
                .curl(Middle, FullCurl, 1.0)
                .curl(Ring, FullCurl, 1.0)
        }
        GestureName::RockOn => {
            let b = builder.curls(Thumb, &[(HalfCurl, 1.0), (FullCurl, 1.0)]);
            extended_up(b, &[Index, Pinky], 1.0)
                .curl(Middle, FullCurl, 1.0)
                .curl(Ring, FullCurl, 1.0)
        }
        GestureName::CallMe => builder
            .curl(Thumb, NoCurl, 1.0)
            .directions(
                Thumb,
                &[(Left, 1.0), (Right, 1.0), (UpLeft, 0.8), (UpRight, 0.8)],
            )
            .curl(Index, FullCurl, 1.0)
            .curl(Middle, FullCurl, 1.0)
            .curl(Ring, FullCurl, 1.0)
            .curl(Pinky, NoCurl, 1.0),
        GestureName::PointRight => pointing(name, Right),
        GestureName::PointUp => pointing(name, Up),
        GestureName::PointLeft => pointing(name, Left),
        GestureName::PointDown => pointing(name, Down),
        GestureName::RaisedFist => {
            let b = builder.curls(Thumb, &[(FullCurl, 1.0), (HalfCurl, 1.0)]);
            folded(b, &NON_THUMB)
        }
    };

    builder.build()
}
