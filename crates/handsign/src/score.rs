//! Scoring of hand poses against gesture descriptors.

use crate::gesture::GestureDescriptor;
use crate::iter::zip_exact;
use crate::landmark::Finger;
use crate::pose::HandPose;

/// Computes how well `pose` matches `descriptor`, as a confidence value in range 0.0 to 1.0.
///
/// Every finger contributes the product of the weight of its curl and the weight of its direction,
/// so it has to satisfy both kinds of rules to count. The sum of all contributions is normalized by
/// [`GestureDescriptor::max_achievable`]. Descriptors that cannot score above 0 always yield 0.
/// The result is never NaN.
pub fn score(descriptor: &GestureDescriptor, pose: &HandPose) -> f32 {
    let max = descriptor.max_achievable();
    if !(max > 0.0 && max.is_finite()) {
        return 0.0;
    }

    let total = zip_exact(Finger::ALL, descriptor.fingers())
        .map(|(finger, rules)| {
            let finger = &pose[finger];
            rules.curl_weight(finger.curl) * rules.direction_weight(finger.direction)
        })
        .sum::<f32>();

    (total / max).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::gesture::{builtin_descriptor, GestureName};
    use crate::pose::{Curl, Direction};
    use crate::registry::Registry;

    use super::*;

    const SEED: u64 = 0x1f0e_7d55_a2c3_9b48;

    fn fist_descriptor() -> GestureDescriptor {
        Finger::ALL
            .into_iter()
            .fold(GestureDescriptor::builder("fist"), |b, finger| {
                b.curl(finger, Curl::FullCurl, 1.0)
            })
            .build()
            .unwrap()
    }

    #[test]
    fn wildcard_directions() {
        let desc = fist_descriptor();
        for dir in Direction::ALL {
            let pose = HandPose::from_pairs([(Curl::FullCurl, dir); 5]);
            assert_eq!(score(&desc, &pose), 1.0);
        }
        let pose = HandPose::from_pairs([(Curl::HalfCurl, Direction::Up); 5]);
        assert_eq!(score(&desc, &pose), 0.0);
    }

    #[test]
    fn curl_and_direction_must_both_match() {
        let desc = GestureDescriptor::builder("point")
            .curl(Finger::Thumb, Curl::FullCurl, 1.0)
            .curl(Finger::Index, Curl::NoCurl, 1.0)
            .direction(Finger::Index, Direction::Up, 1.0)
            .curl(Finger::Middle, Curl::FullCurl, 1.0)
            .curl(Finger::Ring, Curl::FullCurl, 1.0)
            .curl(Finger::Pinky, Curl::FullCurl, 1.0)
            .build()
            .unwrap();

        let mut pairs = [(Curl::FullCurl, Direction::Down); 5];
        pairs[Finger::Index as usize] = (Curl::NoCurl, Direction::Up);
        assert_eq!(score(&desc, &HandPose::from_pairs(pairs)), 1.0);

        // Right curl, wrong direction.
        pairs[Finger::Index as usize] = (Curl::NoCurl, Direction::Left);
        assert_relative_eq!(score(&desc, &HandPose::from_pairs(pairs)), 0.8);

        // Right direction, wrong curl.
        pairs[Finger::Index as usize] = (Curl::HalfCurl, Direction::Up);
        assert_relative_eq!(score(&desc, &HandPose::from_pairs(pairs)), 0.8);
    }

    #[test]
    fn weighted_contributions() {
        let desc = GestureDescriptor::builder("weighted")
            .curl(Finger::Thumb, Curl::NoCurl, 1.0)
            .curls(Finger::Index, &[(Curl::NoCurl, 2.0), (Curl::HalfCurl, 1.0)])
            .directions(Finger::Index, &[(Direction::Up, 1.0), (Direction::UpLeft, 0.5)])
            .curl(Finger::Middle, Curl::NoCurl, 1.0)
            .curl(Finger::Ring, Curl::NoCurl, 1.0)
            .curl(Finger::Pinky, Curl::NoCurl, 0.0)
            .build()
            .unwrap();
        // Max: 1 + 2*1 + 1 + 1 + 0 = 5.
        assert_eq!(desc.max_achievable(), 5.0);

        let mut pairs = [(Curl::NoCurl, Direction::Up); 5];
        pairs[Finger::Index as usize] = (Curl::HalfCurl, Direction::UpLeft);
        // 1 + 1*0.5 + 1 + 1 + 0 = 3.5
        assert_relative_eq!(score(&desc, &HandPose::from_pairs(pairs)), 0.7);
    }

    #[test]
    fn degenerate_descriptor_scores_zero() {
        let desc = Finger::ALL
            .into_iter()
            .fold(GestureDescriptor::builder("nothing"), |b, finger| {
                b.curl(finger, Curl::NoCurl, 0.0)
            })
            .build()
            .unwrap();
        let pose = HandPose::from_pairs([(Curl::NoCurl, Direction::Up); 5]);
        let s = score(&desc, &pose);
        assert!(!s.is_nan());
        assert_eq!(s, 0.0);
    }

    #[test]
    fn large_weights_stay_normalized() {
        let desc = Finger::ALL
            .into_iter()
            .fold(GestureDescriptor::builder("heavy"), |b, finger| {
                b.curl(finger, Curl::NoCurl, 1e18)
                    .direction(finger, Direction::Up, 1e18)
            })
            .build()
            .unwrap();
        assert!(desc.max_achievable().is_finite());

        let mut pairs = [(Curl::NoCurl, Direction::Up); 5];
        assert_eq!(score(&desc, &HandPose::from_pairs(pairs)), 1.0);
        pairs[Finger::Pinky as usize] = (Curl::FullCurl, Direction::Up);
        let s = score(&desc, &HandPose::from_pairs(pairs));
        assert!(!s.is_nan());
        assert_relative_eq!(s, 0.8);
    }

    #[test]
    fn canonical_poses_score_one() {
        let desc = builtin_descriptor(GestureName::Victory).unwrap();
        let pose = HandPose::from_pairs([
            (Curl::HalfCurl, Direction::Left),
            (Curl::NoCurl, Direction::Up),
            (Curl::NoCurl, Direction::Up),
            (Curl::FullCurl, Direction::Down),
            (Curl::FullCurl, Direction::DownLeft),
        ]);
        assert_eq!(score(&desc, &pose), 1.0);
    }

    #[test]
    fn no_matching_rule_scores_zero() {
        let desc = builtin_descriptor(GestureName::RaisedHand).unwrap();
        let pose = HandPose::from_pairs([(Curl::FullCurl, Direction::Down); 5]);
        assert_eq!(score(&desc, &pose), 0.0);
    }

    #[test]
    fn random_poses_stay_in_range() {
        let registry = Registry::builtin().unwrap();
        let mut rng = fastrand::Rng::with_seed(SEED);
        for _ in 0..5000 {
            let pairs = [(); 5].map(|_| {
                (
                    Curl::ALL[rng.usize(..Curl::ALL.len())],
                    Direction::ALL[rng.usize(..Direction::ALL.len())],
                )
            });
            let pose = HandPose::from_pairs(pairs);
            for desc in registry.descriptors() {
                let s = score(desc, &pose);
                assert!((0.0..=1.0).contains(&s), "{}: {s}", desc.name());
            }
        }
    }
}
