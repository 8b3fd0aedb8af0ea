//! Athlete profile collected by the form screen

use serde::{Deserialize, Serialize};

use crate::{TrifitError, TrifitResult};

/// Race distance the athlete is preparing for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RaceDistance {
    /// 25.75 km
    Sprint,
    /// 51.5 km
    Standard,
    /// 113 km
    Half,
    /// 226 km
    Full,
}

impl RaceDistance {
    pub fn all() -> &'static [RaceDistance] {
        &[
            RaceDistance::Sprint,
            RaceDistance::Standard,
            RaceDistance::Half,
            RaceDistance::Full,
        ]
    }

    /// Total race distance in kilometres
    pub fn km(&self) -> f32 {
        match self {
            Self::Sprint => 25.75,
            Self::Standard => 51.5,
            Self::Half => 113.0,
            Self::Full => 226.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Sprint => "25.75K (Sprint)",
            Self::Standard => "51.5K (Standard)",
            Self::Half => "113K (Half Distance)",
            Self::Full => "226K (Full Distance)",
        }
    }
}

impl Default for RaceDistance {
    fn default() -> Self {
        Self::Standard
    }
}

/// Suit cut
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClothingStyle {
    ShortSleeve,
    Sleeveless,
}

impl Default for ClothingStyle {
    fn default() -> Self {
        Self::ShortSleeve
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Default for Gender {
    fn default() -> Self {
        Self::Male
    }
}

/// Athlete profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub height_cm: f32,
    pub weight_kg: f32,
    pub event: RaceDistance,
    pub style: ClothingStyle,
    pub gender: Gender,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: String::new(),
            height_cm: 175.0,
            weight_kg: 70.0,
            event: RaceDistance::default(),
            style: ClothingStyle::default(),
            gender: Gender::default(),
        }
    }
}

impl UserProfile {
    /// Check height and weight are usable for body estimates
    pub fn validate(&self) -> TrifitResult<()> {
        if !(self.height_cm.is_finite() && self.height_cm > 0.0) {
            return Err(TrifitError::InvalidProfile(format!(
                "height must be positive, got {}",
                self.height_cm
            )));
        }
        if !(self.weight_kg.is_finite() && self.weight_kg > 0.0) {
            return Err(TrifitError::InvalidProfile(format!(
                "weight must be positive, got {}",
                self.weight_kg
            )));
        }
        Ok(())
    }

    /// Body mass index
    pub fn bmi(&self) -> f32 {
        let h = self.height_cm / 100.0;
        self.weight_kg / (h * h)
    }

    /// Name to address the athlete by
    pub fn display_name(&self) -> &str {
        let name = self.name.trim();
        if name.is_empty() {
            "athlete"
        } else {
            name
        }
    }
}
