use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::Serialize;

use super::sanitize;
use crate::error::{Error, ErrorKind};

/// Code class, decided by the first letter of the code.
///
/// Declaration order (P, B, C, U) is the order summaries list categories in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Category {
    /// (P) Engine, transmission and emissions
    Powertrain,
    /// (B) Passenger compartment: airbags, seats, lighting
    Body,
    /// (C) Brakes, steering and suspension
    Chassis,
    /// (U) Communication between control modules
    Network,
}
impl Category {
    pub const ALL: [Category; 4] = [Self::Powertrain, Self::Body, Self::Chassis, Self::Network];

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'P' => Some(Self::Powertrain),
            'B' => Some(Self::Body),
            'C' => Some(Self::Chassis),
            'U' => Some(Self::Network),
            _ => None,
        }
    }

    pub fn letter(&self) -> char {
        match self {
            Self::Powertrain => 'P',
            Self::Body => 'B',
            Self::Chassis => 'C',
            Self::Network => 'U',
        }
    }

    /// Returns the short display string for the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Powertrain => "Powertrain",
            Self::Body => "Body",
            Self::Chassis => "Chassis",
            Self::Network => "Network",
        }
    }

    /// Returns the name shown to people reading a category overview.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Network => "Network/Communication",
            other => other.as_str(),
        }
    }

    /// What kind of system codes in this category concern.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Powertrain => "Engine, transmission and emissions",
            Self::Body => "Passenger compartment: airbags, seats, lighting",
            Self::Chassis => "Brakes, steering and suspension",
            Self::Network => "Communication between control modules",
        }
    }
}
impl FromStr for Category {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let sanitized = sanitize(s);
        Ok(match sanitized.as_str() {
            "p" | "powertrain" => Self::Powertrain,
            "b" | "body" => Self::Body,
            "c" | "chassis" => Self::Chassis,
            "u" | "network" | "communication" | "networkcommunication" => Self::Network,
            _ => exn::bail!(ErrorKind::UnknownCategory(s.to_string())),
        })
    }
}
impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}
