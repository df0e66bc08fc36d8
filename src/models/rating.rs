//! Four-valued review outcome. Again and Hard are failing, Good and Easy are successful.
use crate::error::ScheduleError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Rating {
    Again = 0,
    Hard = 1,
    Good = 2,
    Easy = 3,
}

impl Rating {
    pub const ALL: [Rating; 4] = [Rating::Again, Rating::Hard, Rating::Good, Rating::Easy];

    pub fn quality(self) -> u8 {
        self as u8
    }

    /// Quality below 2.
    pub fn is_failing(self) -> bool {
        self.quality() < 2
    }

    pub fn is_successful(self) -> bool {
        !self.is_failing()
    }
}

impl TryFrom<u8> for Rating {
    type Error = ScheduleError;

    fn try_from(quality: u8) -> Result<Self, Self::Error> {
        match quality {
            0 => Ok(Rating::Again),
            1 => Ok(Rating::Hard),
            2 => Ok(Rating::Good),
            3 => Ok(Rating::Easy),
            other => Err(ScheduleError::InvalidRating(other)),
        }
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.quality()
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Rating::Again => "Again",
            Rating::Hard => "Hard",
            Rating::Good => "Good",
            Rating::Easy => "Easy",
        };
        write!(f, "{} ({})", label, self.quality())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_values() {
        let qualities: Vec<u8> = Rating::ALL.iter().map(|r| r.quality()).collect();
        assert_eq!(qualities, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_failing_and_successful() {
        assert!(Rating::Again.is_failing());
        assert!(Rating::Hard.is_failing());
        assert!(Rating::Good.is_successful());
        assert!(Rating::Easy.is_successful());
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert_eq!(Rating::try_from(4), Err(ScheduleError::InvalidRating(4)));
        assert_eq!(Rating::try_from(255), Err(ScheduleError::InvalidRating(255)));
    }

    #[test]
    fn test_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&Rating::Easy).unwrap(), "3");
        let parsed: Rating = serde_json::from_str("1").unwrap();
        assert_eq!(parsed, Rating::Hard);
        assert!(serde_json::from_str::<Rating>("7").is_err());
    }
}
