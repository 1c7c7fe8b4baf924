use std::{fmt, str::FromStr};

/// Image shown by the overlay for gestures without a dedicated asset.
pub const FALLBACK_ASSET: &str = "unknown.png";

/// The built-in gestures.
///
/// [`GestureName::ALL`] lists them in registration order, which decides ties between equally
/// scored gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureName {
    Victory,
    ThumbsUp,
    ThumbsDown,
    MiddleFinger,
    OkSign,
    PinchedFinger,
    PinchedHand,
    RaisedHand,
    LoveYou,
    RockOn,
    CallMe,
    PointRight,
    PointUp,
    PointLeft,
    PointDown,
    RaisedFist,
}

impl GestureName {
    pub const ALL: [GestureName; 16] = [
        GestureName::Victory,
        GestureName::ThumbsUp,
        GestureName::ThumbsDown,
        GestureName::MiddleFinger,
        GestureName::OkSign,
        GestureName::PinchedFinger,
        GestureName::PinchedHand,
        GestureName::RaisedHand,
        GestureName::LoveYou,
        GestureName::RockOn,
        GestureName::CallMe,
        GestureName::PointRight,
        GestureName::PointUp,
        GestureName::PointLeft,
        GestureName::PointDown,
        GestureName::RaisedFist,
    ];

    /// Returns the gesture's key, which is also the name of its descriptor.
    pub fn as_str(self) -> &'static str {
        match self {
            GestureName::Victory => "victory",
            GestureName::ThumbsUp => "thumbs_up",
            GestureName::ThumbsDown => "thumbs_down",
            GestureName::MiddleFinger => "middle_finger",
            GestureName::OkSign => "ok_sign",
            GestureName::PinchedFinger => "pinched_finger",
            GestureName::PinchedHand => "pinched_hand",
            GestureName::RaisedHand => "raised_hand",
            GestureName::LoveYou => "love_you",
            GestureName::RockOn => "rock_on",
            GestureName::CallMe => "call_me",
            GestureName::PointRight => "point_right",
            GestureName::PointUp => "point_up",
            GestureName::PointLeft => "point_left",
            GestureName::PointDown => "point_down",
            GestureName::RaisedFist => "raised_fist",
        }
    }

    /// Returns the file name of the overlay image for this gesture.
    pub fn asset(self) -> &'static str {
        match self {
            GestureName::Victory => "victory.png",
            GestureName::ThumbsUp => "thumbs_up.png",
            GestureName::ThumbsDown => "thumbs_down.png",
            GestureName::MiddleFinger => "middle_finger.png",
            GestureName::OkSign => "ok_sign.png",
            GestureName::PinchedFinger => "pinched_finger.png",
            GestureName::PinchedHand => "pinched_hand.png",
            GestureName::RaisedHand => "raised_hand.png",
            GestureName::LoveYou => "love_you.png",
            GestureName::RockOn => "rock_on.png",
            GestureName::CallMe => "call_me.png",
            GestureName::PointRight => "point_right.png",
            GestureName::PointUp => "point_up.png",
            GestureName::PointLeft => "point_left.png",
            GestureName::PointDown => "point_down.png",
            GestureName::RaisedFist => "raised_fist.png",
        }
    }

    /// Returns the emoji depicting this gesture.
    pub fn emoji(self) -> &'static str {
        match self {
            GestureName::Victory => "\u{270C}\u{FE0F}",
            GestureName::ThumbsUp => "\u{1F44D}",
            GestureName::ThumbsDown => "\u{1F44E}",
            GestureName::MiddleFinger => "\u{1F595}",
            GestureName::OkSign => "\u{1F44C}",
            GestureName::PinchedFinger => "\u{1F90C}",
            GestureName::PinchedHand => "\u{1F90F}",
            GestureName::RaisedHand => "\u{270B}",
            GestureName::LoveYou => "\u{1F91F}",
            GestureName::RockOn => "\u{1F918}",
            GestureName::CallMe => "\u{1F919}",
            GestureName::PointRight => "\u{1F449}",
            GestureName::PointUp => "\u{261D}\u{FE0F}",
            GestureName::PointLeft => "\u{1F448}",
            GestureName::PointDown => "\u{1F447}",
            GestureName::RaisedFist => "\u{270A}",
        }
    }
}

impl fmt::Display for GestureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GestureName {
    type Err = UnknownGesture;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| UnknownGesture(s.to_string()))
    }
}

/// Error returned when parsing a [`GestureName`] from an unknown key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownGesture(pub String);

impl fmt::Display for UnknownGesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown gesture '{}'", self.0)
    }
}

impl std::error::Error for UnknownGesture {}

/// Returns the overlay image for the gesture called `name`.
///
/// Names that are not a built-in [`GestureName`] map to [`FALLBACK_ASSET`].
pub fn asset_for_name(name: &str) -> &'static str {
    match name.parse::<GestureName>() {
        Ok(gesture) => gesture.asset(),
        Err(_) => FALLBACK_ASSET,
    }
}
