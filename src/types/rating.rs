use serde::{Deserialize, Serialize};

/// Feedback rating for an assistant message.
///
/// The backend takes a small integer scale, but only two anchor values have
/// defined meaning, so the public contract is a binary helpful/not-helpful
/// choice. The wire integers (5 and 1) are an encoding detail.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Rating {
    /// The reply answered the question.
    Helpful,

    /// The reply missed the mark.
    NotHelpful,
}

impl Rating {
    /// Returns the wire integer for this rating.
    pub fn as_score(&self) -> u8 {
        match self {
            Rating::Helpful => 5,
            Rating::NotHelpful => 1,
        }
    }
}

impl Serialize for Rating {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.as_score())
    }
}

impl<'de> Deserialize<'de> for Rating {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let score = u8::deserialize(deserializer)?;
        match score {
            5 => Ok(Rating::Helpful),
            1 => Ok(Rating::NotHelpful),
            other => Err(serde::de::Error::custom(format!(
                "rating {other} has no defined meaning; expected 1 or 5"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn anchors_map_to_wire_integers() {
        assert_eq!(to_value(Rating::Helpful).unwrap(), json!(5));
        assert_eq!(to_value(Rating::NotHelpful).unwrap(), json!(1));
    }

    #[test]
    fn undefined_scale_points_rejected() {
        assert_eq!(
            serde_json::from_value::<Rating>(json!(5)).unwrap(),
            Rating::Helpful
        );
        assert!(serde_json::from_value::<Rating>(json!(3)).is_err());
    }
}
