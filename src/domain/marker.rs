use super::DayType;

/// Class name of the transient selection overlay
pub const SELECTED_CLASS: &str = "selected";

/// Error raised when a cell's class attribute does not describe a valid marker
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarkerError {
    #[error("unknown day-type class: {0}")]
    UnknownClass(String),

    #[error("cell carries more than one day-type class: {first} and {second}")]
    MultipleDayTypes { first: DayType, second: DayType },
}

/// The single marker a cell carries.
///
/// The selection overlay replaces the day type instead of stacking on top
/// of it. A drag selection keeps a neutral placeholder so a later
/// classification has something to overwrite; a click selection does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    Day(DayType),
    Selected { placeholder: Option<DayType> },
}

impl Marker {
    /// Neutral marker a deselected cell falls back to
    pub const NEUTRAL: Marker = Marker::Day(DayType::Empty);

    pub fn is_selected(&self) -> bool {
        matches!(self, Marker::Selected { .. })
    }

    /// The committed day type, `None` while the cell is selected
    pub fn day_type(&self) -> Option<DayType> {
        match self {
            Marker::Day(day_type) => Some(*day_type),
            Marker::Selected { .. } => None,
        }
    }

    /// Parse a whitespace-separated class attribute.
    ///
    /// An empty attribute is the neutral marker. `selected` may appear with
    /// at most one day-type class, which becomes the placeholder.
    pub fn parse_classes(classes: &str) -> Result<Self, MarkerError> {
        let mut selected = false;
        let mut day_type: Option<DayType> = None;

        for class in classes.split_whitespace() {
            if class == SELECTED_CLASS {
                selected = true;
                continue;
            }
            let parsed: DayType = class.parse()?;
            match day_type {
                Some(first) if first != parsed => {
                    return Err(MarkerError::MultipleDayTypes {
                        first,
                        second: parsed,
                    });
                }
                _ => day_type = Some(parsed),
            }
        }

        Ok(match (selected, day_type) {
            (true, placeholder) => Marker::Selected { placeholder },
            (false, Some(day_type)) => Marker::Day(day_type),
            (false, None) => Marker::NEUTRAL,
        })
    }

    /// Render back to a class attribute
    pub fn class_attr(&self) -> String {
        match self {
            Marker::Day(day_type) => day_type.code().to_string(),
            Marker::Selected { placeholder: None } => SELECTED_CLASS.to_string(),
            Marker::Selected {
                placeholder: Some(day_type),
            } => format!("{} {}", SELECTED_CLASS, day_type.code()),
        }
    }
}

impl Default for Marker {
    fn default() -> Self {
        Marker::NEUTRAL
    }
}

impl std::fmt::Display for Marker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.class_attr())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_day_type() {
        assert_eq!(
            Marker::parse_classes("HOLIS").unwrap(),
            Marker::Day(DayType::Holiday)
        );
    }

    #[test]
    fn test_parse_empty_attribute_is_neutral() {
        assert_eq!(Marker::parse_classes("").unwrap(), Marker::NEUTRAL);
        assert_eq!(Marker::parse_classes("   ").unwrap(), Marker::NEUTRAL);
    }

    #[test]
    fn test_parse_selection_overlay() {
        assert_eq!(
            Marker::parse_classes("selected").unwrap(),
            Marker::Selected { placeholder: None }
        );
        assert_eq!(
            Marker::parse_classes("selected empty").unwrap(),
            Marker::Selected {
                placeholder: Some(DayType::Empty)
            }
        );
    }

    #[test]
    fn test_parse_rejects_two_day_types() {
        let err = Marker::parse_classes("HOLIS SICKD").unwrap_err();
        assert_eq!(
            err,
            MarkerError::MultipleDayTypes {
                first: DayType::Holiday,
                second: DayType::Sickness,
            }
        );
    }

    #[test]
    fn test_parse_tolerates_repeated_class() {
        assert_eq!(
            Marker::parse_classes("TRAIN TRAIN").unwrap(),
            Marker::Day(DayType::Training)
        );
    }

    #[test]
    fn test_class_attr_matches_parse() {
        for raw in ["WKDAY", "selected", "selected empty", "empty"] {
            assert_eq!(Marker::parse_classes(raw).unwrap().class_attr(), raw);
        }
    }

    #[test]
    fn test_selected_has_no_day_type() {
        assert_eq!(Marker::Selected { placeholder: Some(DayType::Empty) }.day_type(), None);
        assert_eq!(Marker::Day(DayType::Other).day_type(), Some(DayType::Other));
    }
}
