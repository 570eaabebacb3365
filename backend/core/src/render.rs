//! Anafora XML and brat ANN rendering of an entity list.

use std::fmt::Write;

use crate::entity::{weekday_name, ChronoEntity, EntityKind, Link};
use crate::ids::EntityId;

fn id_or_blank(id: Option<EntityId>) -> String {
    id.map(|id| id.to_string()).unwrap_or_default()
}

/// Ordered `(tag, value)` properties of an entity.
pub fn properties(entity: &ChronoEntity) -> Vec<(&'static str, String)> {
    let reference = |link: Link| (link.as_str(), id_or_blank(entity.link(link)));
    let number_and_modifier = || vec![reference(Link::Number), reference(Link::Modifier)];

    match &entity.kind {
        EntityKind::Year { value, .. } => vec![
            ("Value", value.to_string()),
            reference(Link::SubInterval),
            reference(Link::Modifier),
        ],
        EntityKind::TwoDigitYear { value, interval_type, .. } => vec![
            ("Interval-Type", interval_type.as_str().to_string()),
            reference(Link::Interval),
            ("Value", value.to_string()),
            reference(Link::SubInterval),
        ],
        EntityKind::MonthOfYear { month, .. } => {
            let mut props = vec![("Type", month.name().to_string()), reference(Link::SubInterval)];
            props.extend(number_and_modifier());
            props
        }
        EntityKind::DayOfMonth { value, .. } | EntityKind::MinuteOfHour { value, .. } => {
            let mut props = vec![("Value", value.to_string()), reference(Link::SubInterval)];
            props.extend(number_and_modifier());
            props
        }
        EntityKind::DayOfWeek { day, .. } => {
            let mut props =
                vec![("Type", weekday_name(*day).to_string()), reference(Link::SubInterval)];
            props.extend(number_and_modifier());
            props
        }
        EntityKind::HourOfDay { value, .. } => {
            let mut props = vec![
                ("Value", value.to_string()),
                reference(Link::AmPm),
                reference(Link::TimeZone),
                reference(Link::SubInterval),
            ];
            props.extend(number_and_modifier());
            props
        }
        EntityKind::SecondOfMinute { value, .. } => {
            let mut props = vec![("Value", value.to_string())];
            props.extend(number_and_modifier());
            props
        }
        EntityKind::CalendarInterval { unit, .. } => {
            let mut props = vec![("Type", unit.calendar_name().to_string())];
            props.extend(number_and_modifier());
            props
        }
        EntityKind::Period { unit, .. } => {
            let mut props = vec![("Type", unit.period_name().to_string())];
            props.extend(number_and_modifier());
            props
        }
        EntityKind::PartOfDay { part, .. } => {
            let mut props = vec![("Type", format!("{part:?}"))];
            props.extend(number_and_modifier());
            props
        }
        EntityKind::PartOfWeek { part, .. } => {
            let mut props = vec![("Type", format!("{part:?}"))];
            props.extend(number_and_modifier());
            props
        }
        EntityKind::SeasonOfYear { season, .. } => {
            let mut props = vec![("Type", format!("{season:?}"))];
            props.extend(number_and_modifier());
            props
        }
        EntityKind::AmPmOfDay { ampm } => vec![("Type", ampm.as_str().to_string())],
        EntityKind::TimeZone { .. } | EntityKind::Event => Vec::new(),
        EntityKind::Number { value } => vec![("Value", value.to_string())],
        EntityKind::Modifier { kind } => vec![("Type", kind.as_str().to_string())],
        EntityKind::Last(op) | EntityKind::Before(op) | EntityKind::After(op) => vec![
            ("Semantics", op.semantics.as_str().to_string()),
            ("Interval-Type", op.interval_type.as_str().to_string()),
            reference(Link::Interval),
            reference(Link::Period),
            reference(Link::RepeatingInterval),
        ],
        EntityKind::Next(op) | EntityKind::This(op) => vec![
            ("Interval-Type", op.interval_type.as_str().to_string()),
            reference(Link::Interval),
            reference(Link::Period),
            reference(Link::RepeatingInterval),
        ],
        EntityKind::Between {
            start_interval_type,
            start_included,
            end_interval_type,
            end_included,
            ..
        } => {
            let included = |yes: bool| (if yes { "Included" } else { "Not-Included" }).to_string();
            vec![
                ("Start-Interval-Type", start_interval_type.as_str().to_string()),
                reference(Link::StartInterval),
                ("End-Interval-Type", end_interval_type.as_str().to_string()),
                reference(Link::EndInterval),
                ("Start-Included", included(*start_included)),
                ("End-Included", included(*end_included)),
            ]
        }
        EntityKind::Nth { value, interval_type, .. } => vec![
            ("Interval-Type", interval_type.as_str().to_string()),
            reference(Link::Interval),
            ("Value", value.to_string()),
            reference(Link::Period),
            reference(Link::RepeatingInterval),
        ],
    }
}

/// Render entities as anafora XML.
pub fn to_scate_xml(entities: &[ChronoEntity]) -> String {
    let mut out = String::from("<data>\n<annotations>\n");
    for e in entities {
        let _ = write!(
            out,
            "\t<entity>\n\t\t<id>{}</id>\n\t\t<span>{},{}</span>\n\t\t<type>{}</type>\n\t\t<parentsType>{}</parentsType>\n\t\t<properties>\n",
            e.id,
            e.span.start,
            e.span.end,
            e.entity_type().as_str(),
            e.parent_type().as_str(),
        );
        for (tag, value) in properties(e) {
            let _ = writeln!(out, "\t\t\t<{tag}>{value}</{tag}>");
        }
        out.push_str("\t\t</properties>\n\t</entity>\n");
    }
    out.push_str("</annotations>\n</data>\n");
    out
}

/// Render entities as brat standoff lines, `T<n>\t<Type> <start> <end>\t<text>`.
pub fn to_ann(entities: &[ChronoEntity], document: &str) -> String {
    let mut out = String::new();
    for e in entities {
        let text = e.span.slice(document).unwrap_or_default();
        let _ = writeln!(
            out,
            "T{}\t{} {} {}\t{}",
            e.id.value(),
            e.entity_type().as_str(),
            e.span.start,
            e.span.end,
            text
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::AmPm;
    use crate::graph::EntityGraph;
    use crate::ids::IdAllocator;
    use crate::span::Span;

    fn hour_with_pm() -> Vec<ChronoEntity> {
        let mut ids = IdAllocator::new();
        let mut graph = EntityGraph::new();
        let hour = graph.add(&mut ids, Span::new(0, 1), EntityKind::hour(5));
        let pm = graph.add(&mut ids, Span::new(2, 6), EntityKind::AmPmOfDay { ampm: AmPm::Pm });
        graph.connect(hour, Link::AmPm, pm);
        graph.into_entities()
    }

    #[test]
    fn xml_lists_properties_with_blank_references() {
        let xml = to_scate_xml(&hour_with_pm());
        assert!(xml.contains("<type>Hour-Of-Day</type>"));
        assert!(xml.contains("<parentsType>Repeating-Interval</parentsType>"));
        assert!(xml.contains("<AMPM-Of-Day>1entity</AMPM-Of-Day>"));
        assert!(xml.contains("<Time-Zone></Time-Zone>"));
        assert!(xml.contains("<span>2,6</span>"));
    }

    #[test]
    fn ann_lines_carry_document_text() {
        let ann = to_ann(&hour_with_pm(), "5 p.m. EST");
        let lines: Vec<_> = ann.lines().collect();
        assert_eq!(lines[0], "T0\tHour-Of-Day 0 1\t5");
        assert_eq!(lines[1], "T1\tAMPM-Of-Day 2 6\tp.m.");
    }
}
