/// Categories already populated for the current phrase.
///
/// Stages receive the state by value and hand back a new one, so the order
/// in which flags get set is exactly the order of the stage list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionState {
    /// A bare 4-digit year token was seen; it cannot also be an HHMM time
    /// or a condensed date.
    pub lone_digit_year: bool,
    pub four_digit_year: bool,
    pub month: bool,
    pub day: bool,
    pub hour: bool,
    pub minute: bool,
    pub second: bool,
}

impl ExtractionState {
    pub fn with_year(self, lone: bool) -> Self {
        Self { four_digit_year: true, lone_digit_year: self.lone_digit_year || lone, ..self }
    }

    pub fn with_month(self) -> Self {
        Self { month: true, ..self }
    }

    pub fn with_day(self) -> Self {
        Self { day: true, ..self }
    }

    pub fn with_hour(self) -> Self {
        Self { hour: true, ..self }
    }

    pub fn with_minute(self) -> Self {
        Self { minute: true, ..self }
    }

    pub fn with_second(self) -> Self {
        Self { second: true, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_accumulate_without_mutation() {
        let start = ExtractionState::default();
        let next = start.with_year(true).with_month();
        assert!(!start.month);
        assert!(next.lone_digit_year && next.four_digit_year && next.month);
        assert!(!next.with_year(false).with_day().hour);
        assert!(next.with_year(false).lone_digit_year);
    }
}
