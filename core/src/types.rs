//! Shared categorical domains used across every table.
//!
//! Serialized labels match the CSV column values exactly, so a file
//! written by one run loads cleanly in another.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DashError;

/// A calendar day with no time component.
pub type Day = chrono::NaiveDate;

/// A categorical value with a fixed text label.
pub trait Labelled {
    fn label(&self) -> &'static str;
}

/// Implements `Labelled`, `Display` and `FromStr` for a label enum.
macro_rules! labelled {
    ($ty:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl Labelled for $ty {
            fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $ty {
            type Err = DashError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok(Self::$variant),)+
                    other => Err(DashError::InvalidFilter {
                        field: stringify!($ty),
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    North,
    South,
    East,
    West,
}

impl Region {
    pub const ALL: [Region; 4] = [Self::North, Self::South, Self::East, Self::West];
}

labelled!(Region {
    North => "North",
    South => "South",
    East  => "East",
    West  => "West",
});

/// Product category. Sales rows only ever carry the first five;
/// `Other` exists for products whose name matches no keyword list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Electronics,
    Clothing,
    #[serde(rename = "Home & Garden")]
    HomeAndGarden,
    Sports,
    Books,
    Other,
}

impl Category {
    /// Categories a sale may be booked under.
    pub const SALES: [Category; 5] = [
        Self::Electronics,
        Self::Clothing,
        Self::HomeAndGarden,
        Self::Sports,
        Self::Books,
    ];
}

labelled!(Category {
    Electronics   => "Electronics",
    Clothing      => "Clothing",
    HomeAndGarden => "Home & Garden",
    Sports        => "Sports",
    Books         => "Books",
    Other         => "Other",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Segment {
    Premium,
    Standard,
    Budget,
}

impl Segment {
    pub const ALL: [Segment; 3] = [Self::Premium, Self::Standard, Self::Budget];
}

labelled!(Segment {
    Premium  => "Premium",
    Standard => "Standard",
    Budget   => "Budget",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Channel {
    Online,
    Retail,
    Partner,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Self::Online, Self::Retail, Self::Partner];
}

labelled!(Channel {
    Online  => "Online",
    Retail  => "Retail",
    Partner => "Partner",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Self::Male, Self::Female];
}

labelled!(Gender {
    Male   => "Male",
    Female => "Female",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_parse_back() {
        for c in Category::SALES {
            assert_eq!(c.label().parse::<Category>().unwrap(), c);
        }
        assert_eq!("Home & Garden".parse::<Category>().unwrap(), Category::HomeAndGarden);
    }

    #[test]
    fn unknown_label_is_rejected() {
        let err = "Northeast".parse::<Region>().unwrap_err();
        assert!(matches!(err, DashError::InvalidFilter { field: "Region", .. }));
    }
}
