//! Temporal entity model.
//!
//! One [`ChronoEntity`] struct carries a tagged [`EntityKind`] payload.
//! Cross references between entities are [`EntityId`]s resolved through an
//! [`EntityGraph`](crate::EntityGraph), never owned pointers.

use chrono::{Month, Weekday};
use serde::Serialize;

use crate::ids::EntityId;
use crate::span::Span;

// ---------------------------------------------------------------------------
// Closed type sets
// ---------------------------------------------------------------------------

/// The closed set of entity types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    Year,
    MonthOfYear,
    DayOfMonth,
    DayOfWeek,
    HourOfDay,
    MinuteOfHour,
    SecondOfMinute,
    CalendarInterval,
    Period,
    PartOfDay,
    PartOfWeek,
    SeasonOfYear,
    AmPmOfDay,
    TimeZone,
    Number,
    Modifier,
    TwoDigitYear,
    Last,
    Next,
    This,
    Before,
    After,
    Between,
    Nth,
    Event,
}

impl EntityType {
    /// Annotation schema name of the type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Year => "Year",
            Self::MonthOfYear => "Month-Of-Year",
            Self::DayOfMonth => "Day-Of-Month",
            Self::DayOfWeek => "Day-Of-Week",
            Self::HourOfDay => "Hour-Of-Day",
            Self::MinuteOfHour => "Minute-Of-Hour",
            Self::SecondOfMinute => "Second-Of-Minute",
            Self::CalendarInterval => "Calendar-Interval",
            Self::Period => "Period",
            Self::PartOfDay => "Part-Of-Day",
            Self::PartOfWeek => "Part-Of-Week",
            Self::SeasonOfYear => "Season-Of-Year",
            Self::AmPmOfDay => "AMPM-Of-Day",
            Self::TimeZone => "Time-Zone",
            Self::Number => "Number",
            Self::Modifier => "Modifier",
            Self::TwoDigitYear => "Two-Digit-Year",
            Self::Last => "Last",
            Self::Next => "Next",
            Self::This => "This",
            Self::Before => "Before",
            Self::After => "After",
            Self::Between => "Between",
            Self::Nth => "NthFromStart",
            Self::Event => "Event",
        }
    }

    pub fn parent_type(self) -> ParentType {
        match self {
            Self::Year => ParentType::Interval,
            Self::Period => ParentType::Duration,
            Self::MonthOfYear
            | Self::DayOfMonth
            | Self::DayOfWeek
            | Self::HourOfDay
            | Self::MinuteOfHour
            | Self::SecondOfMinute
            | Self::CalendarInterval
            | Self::PartOfDay
            | Self::PartOfWeek
            | Self::SeasonOfYear
            | Self::AmPmOfDay
            | Self::TimeZone => ParentType::RepeatingInterval,
            Self::TwoDigitYear
            | Self::Last
            | Self::Next
            | Self::This
            | Self::Before
            | Self::After
            | Self::Between
            | Self::Nth => ParentType::Operator,
            Self::Number | Self::Modifier | Self::Event => ParentType::Other,
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ParentType {
    Interval,
    #[serde(rename = "Repeating-Interval")]
    RepeatingInterval,
    Duration,
    Operator,
    Other,
}

impl ParentType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Interval => "Interval",
            Self::RepeatingInterval => "Repeating-Interval",
            Self::Duration => "Duration",
            Self::Operator => "Operator",
            Self::Other => "Other",
        }
    }
}

// ---------------------------------------------------------------------------
// Payload value types
// ---------------------------------------------------------------------------

/// Granularity named by a calendar-interval or period word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TimeUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
    Decade,
    Century,
    Unknown,
}

impl TimeUnit {
    /// Singular form used by Calendar-Interval.
    pub fn calendar_name(self) -> &'static str {
        match self {
            Self::Second => "Second",
            Self::Minute => "Minute",
            Self::Hour => "Hour",
            Self::Day => "Day",
            Self::Week => "Week",
            Self::Month => "Month",
            Self::Year => "Year",
            Self::Decade => "Decade",
            Self::Century => "Century",
            Self::Unknown => "Unknown",
        }
    }

    /// Plural form used by Period.
    pub fn period_name(self) -> &'static str {
        match self {
            Self::Second => "Seconds",
            Self::Minute => "Minutes",
            Self::Hour => "Hours",
            Self::Day => "Days",
            Self::Week => "Weeks",
            Self::Month => "Months",
            Self::Year => "Years",
            Self::Decade => "Decades",
            Self::Century => "Centuries",
            Self::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DayPart {
    Morning,
    Dawn,
    Afternoon,
    Evening,
    Noon,
    Midnight,
    Night,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WeekPart {
    Weekend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AmPm {
    #[serde(rename = "AM")]
    Am,
    #[serde(rename = "PM")]
    Pm,
}

impl AmPm {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Am => "AM",
            Self::Pm => "PM",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ModifierKind {
    #[serde(rename = "Less-Than")]
    LessThan,
    Approx,
    End,
    Mid,
    Fiscal,
    #[serde(rename = "More-Than")]
    MoreThan,
    Start,
}

impl ModifierKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LessThan => "Less-Than",
            Self::Approx => "Approx",
            Self::End => "End",
            Self::Mid => "Mid",
            Self::Fiscal => "Fiscal",
            Self::MoreThan => "More-Than",
            Self::Start => "Start",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Semantics {
    #[serde(rename = "Interval-Included")]
    IntervalIncluded,
    #[default]
    #[serde(rename = "Interval-Not-Included")]
    IntervalNotIncluded,
}

impl Semantics {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::IntervalIncluded => "Interval-Included",
            Self::IntervalNotIncluded => "Interval-Not-Included",
        }
    }
}

/// What an operator's interval is relative to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum IntervalType {
    #[default]
    DocTime,
    Link,
}

impl IntervalType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DocTime => "DocTime",
            Self::Link => "Link",
        }
    }
}

/// Full English name of a weekday.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn serialize_weekday<S: serde::Serializer>(day: &Weekday, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(weekday_name(*day))
}

fn serialize_month<S: serde::Serializer>(month: &Month, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(month.name())
}

/// Shared payload of the Last/Next/This/Before/After operators.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operator {
    pub semantics: Semantics,
    pub interval_type: IntervalType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeating_interval: Option<EntityId>,
}

impl Operator {
    pub fn over_repeating(target: EntityId) -> Self {
        Self { repeating_interval: Some(target), ..Default::default() }
    }

    pub fn over_period(target: EntityId) -> Self {
        Self { period: Some(target), ..Default::default() }
    }

    pub fn with_semantics(mut self, semantics: Semantics) -> Self {
        self.semantics = semantics;
        self
    }

    pub fn with_interval_type(mut self, interval_type: IntervalType) -> Self {
        self.interval_type = interval_type;
        self
    }
}

// ---------------------------------------------------------------------------
// Entity payloads
// ---------------------------------------------------------------------------

/// Type-specific payload of an entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum EntityKind {
    #[serde(rename = "Year")]
    Year {
        value: i32,
        sub_interval: Option<EntityId>,
        modifier: Option<EntityId>,
    },
    #[serde(rename = "Two-Digit-Year")]
    TwoDigitYear {
        value: u32,
        sub_interval: Option<EntityId>,
        interval_type: IntervalType,
        interval: Option<EntityId>,
    },
    #[serde(rename = "Month-Of-Year")]
    MonthOfYear {
        #[serde(serialize_with = "serialize_month")]
        month: Month,
        sub_interval: Option<EntityId>,
        number: Option<EntityId>,
        modifier: Option<EntityId>,
    },
    #[serde(rename = "Day-Of-Month")]
    DayOfMonth {
        value: u32,
        sub_interval: Option<EntityId>,
        number: Option<EntityId>,
        modifier: Option<EntityId>,
    },
    #[serde(rename = "Day-Of-Week")]
    DayOfWeek {
        #[serde(serialize_with = "serialize_weekday")]
        day: Weekday,
        sub_interval: Option<EntityId>,
        number: Option<EntityId>,
        modifier: Option<EntityId>,
    },
    #[serde(rename = "Hour-Of-Day")]
    HourOfDay {
        value: u32,
        ampm: Option<EntityId>,
        time_zone: Option<EntityId>,
        sub_interval: Option<EntityId>,
        number: Option<EntityId>,
        modifier: Option<EntityId>,
    },
    #[serde(rename = "Minute-Of-Hour")]
    MinuteOfHour {
        value: u32,
        sub_interval: Option<EntityId>,
        number: Option<EntityId>,
        modifier: Option<EntityId>,
    },
    #[serde(rename = "Second-Of-Minute")]
    SecondOfMinute {
        value: u32,
        number: Option<EntityId>,
        modifier: Option<EntityId>,
    },
    #[serde(rename = "Calendar-Interval")]
    CalendarInterval {
        unit: TimeUnit,
        number: Option<EntityId>,
        modifier: Option<EntityId>,
    },
    #[serde(rename = "Period")]
    Period {
        unit: TimeUnit,
        number: Option<EntityId>,
        modifier: Option<EntityId>,
    },
    #[serde(rename = "Part-Of-Day")]
    PartOfDay {
        part: DayPart,
        number: Option<EntityId>,
        modifier: Option<EntityId>,
    },
    #[serde(rename = "Part-Of-Week")]
    PartOfWeek {
        part: WeekPart,
        number: Option<EntityId>,
        modifier: Option<EntityId>,
    },
    #[serde(rename = "Season-Of-Year")]
    SeasonOfYear {
        season: Season,
        number: Option<EntityId>,
        modifier: Option<EntityId>,
    },
    #[serde(rename = "AMPM-Of-Day")]
    AmPmOfDay { ampm: AmPm },
    #[serde(rename = "Time-Zone")]
    TimeZone { zone: String },
    #[serde(rename = "Number")]
    Number { value: i64 },
    #[serde(rename = "Modifier")]
    Modifier { kind: ModifierKind },
    #[serde(rename = "Last")]
    Last(Operator),
    #[serde(rename = "Next")]
    Next(Operator),
    #[serde(rename = "This")]
    This(Operator),
    #[serde(rename = "Before")]
    Before(Operator),
    #[serde(rename = "After")]
    After(Operator),
    #[serde(rename = "Between")]
    Between {
        start_interval_type: IntervalType,
        start_interval: Option<EntityId>,
        start_included: bool,
        end_interval_type: IntervalType,
        end_interval: Option<EntityId>,
        end_included: bool,
    },
    #[serde(rename = "NthFromStart")]
    Nth {
        value: u32,
        interval_type: IntervalType,
        interval: Option<EntityId>,
        period: Option<EntityId>,
        repeating_interval: Option<EntityId>,
    },
    #[serde(rename = "Event")]
    Event,
}

impl EntityKind {
    pub fn entity_type(&self) -> EntityType {
        match self {
            Self::Year { .. } => EntityType::Year,
            Self::TwoDigitYear { .. } => EntityType::TwoDigitYear,
            Self::MonthOfYear { .. } => EntityType::MonthOfYear,
            Self::DayOfMonth { .. } => EntityType::DayOfMonth,
            Self::DayOfWeek { .. } => EntityType::DayOfWeek,
            Self::HourOfDay { .. } => EntityType::HourOfDay,
            Self::MinuteOfHour { .. } => EntityType::MinuteOfHour,
            Self::SecondOfMinute { .. } => EntityType::SecondOfMinute,
            Self::CalendarInterval { .. } => EntityType::CalendarInterval,
            Self::Period { .. } => EntityType::Period,
            Self::PartOfDay { .. } => EntityType::PartOfDay,
            Self::PartOfWeek { .. } => EntityType::PartOfWeek,
            Self::SeasonOfYear { .. } => EntityType::SeasonOfYear,
            Self::AmPmOfDay { .. } => EntityType::AmPmOfDay,
            Self::TimeZone { .. } => EntityType::TimeZone,
            Self::Number { .. } => EntityType::Number,
            Self::Modifier { .. } => EntityType::Modifier,
            Self::Last(_) => EntityType::Last,
            Self::Next(_) => EntityType::Next,
            Self::This(_) => EntityType::This,
            Self::Before(_) => EntityType::Before,
            Self::After(_) => EntityType::After,
            Self::Between { .. } => EntityType::Between,
            Self::Nth { .. } => EntityType::Nth,
            Self::Event => EntityType::Event,
        }
    }

    // Constructors for the common leaf shapes; reference fields start empty.

    pub fn year(value: i32) -> Self {
        Self::Year { value, sub_interval: None, modifier: None }
    }

    pub fn two_digit_year(value: u32) -> Self {
        Self::TwoDigitYear {
            value,
            sub_interval: None,
            interval_type: IntervalType::DocTime,
            interval: None,
        }
    }

    pub fn month(month: Month) -> Self {
        Self::MonthOfYear { month, sub_interval: None, number: None, modifier: None }
    }

    pub fn day_of_month(value: u32) -> Self {
        Self::DayOfMonth { value, sub_interval: None, number: None, modifier: None }
    }

    pub fn day_of_week(day: Weekday) -> Self {
        Self::DayOfWeek { day, sub_interval: None, number: None, modifier: None }
    }

    pub fn hour(value: u32) -> Self {
        Self::HourOfDay {
            value,
            ampm: None,
            time_zone: None,
            sub_interval: None,
            number: None,
            modifier: None,
        }
    }

    pub fn minute(value: u32) -> Self {
        Self::MinuteOfHour { value, sub_interval: None, number: None, modifier: None }
    }

    pub fn second(value: u32) -> Self {
        Self::SecondOfMinute { value, number: None, modifier: None }
    }

    pub fn calendar_interval(unit: TimeUnit) -> Self {
        Self::CalendarInterval { unit, number: None, modifier: None }
    }

    pub fn period(unit: TimeUnit) -> Self {
        Self::Period { unit, number: None, modifier: None }
    }

    pub fn part_of_day(part: DayPart) -> Self {
        Self::PartOfDay { part, number: None, modifier: None }
    }

    pub fn part_of_week(part: WeekPart) -> Self {
        Self::PartOfWeek { part, number: None, modifier: None }
    }

    pub fn season(season: Season) -> Self {
        Self::SeasonOfYear { season, number: None, modifier: None }
    }

    pub fn nth(value: u32) -> Self {
        Self::Nth {
            value,
            interval_type: IntervalType::DocTime,
            interval: None,
            period: None,
            repeating_interval: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Reference slots
// ---------------------------------------------------------------------------

/// A named by-ID reference field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Link {
    SubInterval,
    AmPm,
    TimeZone,
    Number,
    Modifier,
    Interval,
    Period,
    RepeatingInterval,
    StartInterval,
    EndInterval,
}

impl Link {
    pub const ALL: [Link; 10] = [
        Link::SubInterval,
        Link::AmPm,
        Link::TimeZone,
        Link::Number,
        Link::Modifier,
        Link::Interval,
        Link::Period,
        Link::RepeatingInterval,
        Link::StartInterval,
        Link::EndInterval,
    ];

    /// Property tag used in the annotation XML.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SubInterval => "Sub-Interval",
            Self::AmPm => "AMPM-Of-Day",
            Self::TimeZone => "Time-Zone",
            Self::Number => "Number",
            Self::Modifier => "Modifier",
            Self::Interval => "Interval",
            Self::Period => "Period",
            Self::RepeatingInterval => "Repeating-Interval",
            Self::StartInterval => "Start-Interval",
            Self::EndInterval => "End-Interval",
        }
    }
}

/// A node of the temporal graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChronoEntity {
    pub id: EntityId,
    #[serde(flatten)]
    pub span: Span,
    #[serde(flatten)]
    pub kind: EntityKind,
}

impl ChronoEntity {
    pub fn new(id: EntityId, span: Span, kind: EntityKind) -> Self {
        Self { id, span, kind }
    }

    pub fn entity_type(&self) -> EntityType {
        self.kind.entity_type()
    }

    pub fn parent_type(&self) -> ParentType {
        self.entity_type().parent_type()
    }

    /// The reference field named by `link`, if this type has one.
    pub fn slot(&self, link: Link) -> Option<&Option<EntityId>> {
        use EntityKind as K;
        match (&self.kind, link) {
            (K::Year { sub_interval, .. }, Link::SubInterval)
            | (K::TwoDigitYear { sub_interval, .. }, Link::SubInterval)
            | (K::MonthOfYear { sub_interval, .. }, Link::SubInterval)
            | (K::DayOfMonth { sub_interval, .. }, Link::SubInterval)
            | (K::DayOfWeek { sub_interval, .. }, Link::SubInterval)
            | (K::HourOfDay { sub_interval, .. }, Link::SubInterval)
            | (K::MinuteOfHour { sub_interval, .. }, Link::SubInterval) => Some(sub_interval),

            (K::Year { modifier, .. }, Link::Modifier)
            | (K::MonthOfYear { modifier, .. }, Link::Modifier)
            | (K::DayOfMonth { modifier, .. }, Link::Modifier)
            | (K::DayOfWeek { modifier, .. }, Link::Modifier)
            | (K::HourOfDay { modifier, .. }, Link::Modifier)
            | (K::MinuteOfHour { modifier, .. }, Link::Modifier)
            | (K::SecondOfMinute { modifier, .. }, Link::Modifier)
            | (K::CalendarInterval { modifier, .. }, Link::Modifier)
            | (K::Period { modifier, .. }, Link::Modifier)
            | (K::PartOfDay { modifier, .. }, Link::Modifier)
            | (K::PartOfWeek { modifier, .. }, Link::Modifier)
            | (K::SeasonOfYear { modifier, .. }, Link::Modifier) => Some(modifier),

            (K::MonthOfYear { number, .. }, Link::Number)
            | (K::DayOfMonth { number, .. }, Link::Number)
            | (K::DayOfWeek { number, .. }, Link::Number)
            | (K::HourOfDay { number, .. }, Link::Number)
            | (K::MinuteOfHour { number, .. }, Link::Number)
            | (K::SecondOfMinute { number, .. }, Link::Number)
            | (K::CalendarInterval { number, .. }, Link::Number)
            | (K::Period { number, .. }, Link::Number)
            | (K::PartOfDay { number, .. }, Link::Number)
            | (K::PartOfWeek { number, .. }, Link::Number)
            | (K::SeasonOfYear { number, .. }, Link::Number) => Some(number),

            (K::HourOfDay { ampm, .. }, Link::AmPm) => Some(ampm),
            (K::HourOfDay { time_zone, .. }, Link::TimeZone) => Some(time_zone),

            (K::TwoDigitYear { interval, .. }, Link::Interval)
            | (K::Nth { interval, .. }, Link::Interval) => Some(interval),
            (K::Nth { period, .. }, Link::Period) => Some(period),
            (K::Nth { repeating_interval, .. }, Link::RepeatingInterval) => {
                Some(repeating_interval)
            }

            (K::Last(op) | K::Next(op) | K::This(op) | K::Before(op) | K::After(op), link) => {
                match link {
                    Link::Interval => Some(&op.interval),
                    Link::Period => Some(&op.period),
                    Link::RepeatingInterval => Some(&op.repeating_interval),
                    _ => None,
                }
            }

            (K::Between { start_interval, .. }, Link::StartInterval) => Some(start_interval),
            (K::Between { end_interval, .. }, Link::EndInterval) => Some(end_interval),

            _ => None,
        }
    }

    fn slot_mut(&mut self, link: Link) -> Option<&mut Option<EntityId>> {
        use EntityKind as K;
        match (&mut self.kind, link) {
            (K::Year { sub_interval, .. }, Link::SubInterval)
            | (K::TwoDigitYear { sub_interval, .. }, Link::SubInterval)
            | (K::MonthOfYear { sub_interval, .. }, Link::SubInterval)
            | (K::DayOfMonth { sub_interval, .. }, Link::SubInterval)
            | (K::DayOfWeek { sub_interval, .. }, Link::SubInterval)
            | (K::HourOfDay { sub_interval, .. }, Link::SubInterval)
            | (K::MinuteOfHour { sub_interval, .. }, Link::SubInterval) => Some(sub_interval),

            (K::Year { modifier, .. }, Link::Modifier)
            | (K::MonthOfYear { modifier, .. }, Link::Modifier)
            | (K::DayOfMonth { modifier, .. }, Link::Modifier)
            | (K::DayOfWeek { modifier, .. }, Link::Modifier)
            | (K::HourOfDay { modifier, .. }, Link::Modifier)
            | (K::MinuteOfHour { modifier, .. }, Link::Modifier)
            | (K::SecondOfMinute { modifier, .. }, Link::Modifier)
            | (K::CalendarInterval { modifier, .. }, Link::Modifier)
            | (K::Period { modifier, .. }, Link::Modifier)
            | (K::PartOfDay { modifier, .. }, Link::Modifier)
            | (K::PartOfWeek { modifier, .. }, Link::Modifier)
            | (K::SeasonOfYear { modifier, .. }, Link::Modifier) => Some(modifier),

            (K::MonthOfYear { number, .. }, Link::Number)
            | (K::DayOfMonth { number, .. }, Link::Number)
            | (K::DayOfWeek { number, .. }, Link::Number)
            | (K::HourOfDay { number, .. }, Link::Number)
            | (K::MinuteOfHour { number, .. }, Link::Number)
            | (K::SecondOfMinute { number, .. }, Link::Number)
            | (K::CalendarInterval { number, .. }, Link::Number)
            | (K::Period { number, .. }, Link::Number)
            | (K::PartOfDay { number, .. }, Link::Number)
            | (K::PartOfWeek { number, .. }, Link::Number)
            | (K::SeasonOfYear { number, .. }, Link::Number) => Some(number),

            (K::HourOfDay { ampm, .. }, Link::AmPm) => Some(ampm),
            (K::HourOfDay { time_zone, .. }, Link::TimeZone) => Some(time_zone),

            (K::TwoDigitYear { interval, .. }, Link::Interval)
            | (K::Nth { interval, .. }, Link::Interval) => Some(interval),
            (K::Nth { period, .. }, Link::Period) => Some(period),
            (K::Nth { repeating_interval, .. }, Link::RepeatingInterval) => {
                Some(repeating_interval)
            }

            (K::Last(op) | K::Next(op) | K::This(op) | K::Before(op) | K::After(op), link) => {
                match link {
                    Link::Interval => Some(&mut op.interval),
                    Link::Period => Some(&mut op.period),
                    Link::RepeatingInterval => Some(&mut op.repeating_interval),
                    _ => None,
                }
            }

            (K::Between { start_interval, .. }, Link::StartInterval) => Some(start_interval),
            (K::Between { end_interval, .. }, Link::EndInterval) => Some(end_interval),

            _ => None,
        }
    }

    /// Point the `link` field at `target`. Returns `false` if this entity
    /// type has no such field.
    pub fn set_link(&mut self, link: Link, target: EntityId) -> bool {
        match self.slot_mut(link) {
            Some(slot) => {
                *slot = Some(target);
                true
            }
            None => false,
        }
    }

    pub fn link(&self, link: Link) -> Option<EntityId> {
        self.slot(link).copied().flatten()
    }

    /// Every populated reference held by this entity.
    pub fn references(&self) -> Vec<(Link, EntityId)> {
        Link::ALL
            .iter()
            .filter_map(|&link| self.link(link).map(|id| (link, id)))
            .collect()
    }
}
