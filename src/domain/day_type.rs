use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::MarkerError;

/// Classification of a single day in the holiday grid.
///
/// The vocabulary is closed: these are the only classes the save endpoint
/// understands. `Empty` is the neutral placeholder left behind when a cell
/// is deselected without being classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DayType {
    #[serde(rename = "empty")]
    Empty,
    #[serde(rename = "DAYOD")]
    DayOnDemand,
    #[serde(rename = "TRAIN")]
    Training,
    #[serde(rename = "WKDAY")]
    WorkDay,
    #[serde(rename = "SICKD")]
    Sickness,
    #[serde(rename = "HOLIS")]
    Holiday,
    #[serde(rename = "SPECI")]
    SpecialLeave,
    #[serde(rename = "MEDIC")]
    MedicalLeave,
    #[serde(rename = "PUABS")]
    PublicHoliday,
    #[serde(rename = "PUWRK")]
    PublicHolidayWorked,
    #[serde(rename = "SATUR")]
    SaturdayWorked,
    #[serde(rename = "RETRN")]
    ReturnForPublicHoliday,
    #[serde(rename = "WKHOM")]
    WorkFromHome,
    #[serde(rename = "OTHER")]
    Other,
}

impl DayType {
    /// Every day type, in legend order
    pub const ALL: [DayType; 14] = [
        DayType::Empty,
        DayType::DayOnDemand,
        DayType::Training,
        DayType::WorkDay,
        DayType::Sickness,
        DayType::Holiday,
        DayType::SpecialLeave,
        DayType::MedicalLeave,
        DayType::PublicHoliday,
        DayType::PublicHolidayWorked,
        DayType::SaturdayWorked,
        DayType::ReturnForPublicHoliday,
        DayType::WorkFromHome,
        DayType::Other,
    ];

    /// The class name used on the wire and in table snapshots
    pub fn code(&self) -> &'static str {
        match self {
            DayType::Empty => "empty",
            DayType::DayOnDemand => "DAYOD",
            DayType::Training => "TRAIN",
            DayType::WorkDay => "WKDAY",
            DayType::Sickness => "SICKD",
            DayType::Holiday => "HOLIS",
            DayType::SpecialLeave => "SPECI",
            DayType::MedicalLeave => "MEDIC",
            DayType::PublicHoliday => "PUABS",
            DayType::PublicHolidayWorked => "PUWRK",
            DayType::SaturdayWorked => "SATUR",
            DayType::ReturnForPublicHoliday => "RETRN",
            DayType::WorkFromHome => "WKHOM",
            DayType::Other => "OTHER",
        }
    }

    /// Human-readable name shown in the legend
    pub fn label(&self) -> &'static str {
        match self {
            DayType::Empty => "Unclassified",
            DayType::DayOnDemand => "Day on demand",
            DayType::Training => "Training",
            DayType::WorkDay => "Work day",
            DayType::Sickness => "Sickness absence",
            DayType::Holiday => "Holiday",
            DayType::SpecialLeave => "Special leave",
            DayType::MedicalLeave => "Medical leave",
            DayType::PublicHoliday => "Public holiday",
            DayType::PublicHolidayWorked => "Work on public holiday",
            DayType::SaturdayWorked => "Work on Saturday",
            DayType::ReturnForPublicHoliday => "Return for public holiday worked",
            DayType::WorkFromHome => "Work from home",
            DayType::Other => "Other",
        }
    }

    /// Effect of one day of this type on the employee's holiday balance
    pub fn balance_delta(&self) -> i32 {
        match self {
            DayType::Holiday | DayType::ReturnForPublicHoliday | DayType::DayOnDemand => -1,
            DayType::PublicHolidayWorked => 2,
            DayType::SaturdayWorked => 1,
            _ => 0,
        }
    }

    /// Background colour for the cell as RGB
    pub fn rgb(&self) -> [u8; 3] {
        match self {
            DayType::Empty => [60, 64, 72],
            DayType::DayOnDemand => [214, 120, 60],
            DayType::Training => [150, 110, 220],
            DayType::WorkDay => [90, 150, 90],
            DayType::Sickness => [200, 70, 70],
            DayType::Holiday => [70, 140, 230],
            DayType::SpecialLeave => [220, 180, 60],
            DayType::MedicalLeave => [230, 110, 160],
            DayType::PublicHoliday => [60, 190, 190],
            DayType::PublicHolidayWorked => [30, 120, 120],
            DayType::SaturdayWorked => [140, 170, 60],
            DayType::ReturnForPublicHoliday => [110, 90, 60],
            DayType::WorkFromHome => [120, 200, 140],
            DayType::Other => [140, 140, 140],
        }
    }
}

impl FromStr for DayType {
    type Err = MarkerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DayType::ALL
            .iter()
            .copied()
            .find(|t| t.code() == s)
            .ok_or_else(|| MarkerError::UnknownClass(s.to_string()))
    }
}

impl std::fmt::Display for DayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip_through_from_str() {
        for day_type in DayType::ALL {
            assert_eq!(day_type.code().parse::<DayType>().unwrap(), day_type);
        }
    }

    #[test]
    fn test_unknown_code_is_rejected() {
        let err = "WKEND".parse::<DayType>().unwrap_err();
        assert!(matches!(err, MarkerError::UnknownClass(ref c) if c == "WKEND"));
    }

    #[test]
    fn test_serde_uses_class_codes() {
        let json = serde_json::to_string(&DayType::Holiday).unwrap();
        assert_eq!(json, "\"HOLIS\"");
        let back: DayType = serde_json::from_str("\"empty\"").unwrap();
        assert_eq!(back, DayType::Empty);
    }

    #[test]
    fn test_balance_deltas() {
        assert_eq!(DayType::Holiday.balance_delta(), -1);
        assert_eq!(DayType::PublicHolidayWorked.balance_delta(), 2);
        assert_eq!(DayType::SaturdayWorked.balance_delta(), 1);
        assert_eq!(DayType::Sickness.balance_delta(), 0);
    }
}
