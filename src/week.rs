use std::collections::BTreeMap;

use crate::models::{Course, SessionDisplay, Weekday};

/// Weekday columns of the weekly grid, Monday through Friday.
pub type WeekView = BTreeMap<Weekday, Vec<SessionDisplay>>;

/// Every weekday is present, possibly empty. Sessions on other days are dropped.
pub fn build_week_view(courses: &[Course]) -> WeekView {
    let mut view: WeekView = Weekday::ALL.into_iter().map(|day| (day, Vec::new())).collect();

    for course in courses {
        for session in &course.sessions {
            if let Some(day) = Weekday::from_label(&session.day) {
                view.entry(day).or_default().push(session.display());
            }
        }
    }

    // Zero-padded HH:MM sorts correctly as text; sort_by is stable.
    for sessions in view.values_mut() {
        sessions.sort_by(|a, b| a.start_time.cmp(&b.start_time));
    }

    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::models::{PeriodId, Session};
    use pretty_assertions::assert_eq;

    fn session(course: &str, instructor: &str, day: &str, start: &str, end: &str) -> Session {
        Session {
            period_id: PeriodId::from("2024-1"),
            period_name: "2024-1".to_string(),
            sub_term: "I".to_string(),
            course_name: course.to_string(),
            instructor: instructor.to_string(),
            day: day.to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            room: "A-1".to_string(),
        }
    }

    fn names(view: &WeekView, day: Weekday) -> Vec<&str> {
        view[&day].iter().map(|s| s.course_name.as_str()).collect()
    }

    #[test]
    fn places_sessions_by_day_sorted_by_start() {
        let courses = aggregate(&[
            session("Physics", "B", "Lunes", "10:00", "12:00"),
            session("Calculus I", "A", "Lunes", "08:00", "10:00"),
            session("Calculus I", "A", "Miércoles", "08:00", "10:00"),
        ]);
        let view = build_week_view(&courses);

        assert_eq!(names(&view, Weekday::Monday), vec!["Calculus I", "Physics"]);
        assert_eq!(names(&view, Weekday::Wednesday), vec!["Calculus I"]);
        assert!(view[&Weekday::Tuesday].is_empty());
        assert!(view[&Weekday::Thursday].is_empty());
        assert!(view[&Weekday::Friday].is_empty());
    }

    #[test]
    fn weekend_sessions_are_dropped() {
        let courses = aggregate(&[session("Taller", "C", "Sábado", "08:00", "12:00")]);
        let view = build_week_view(&courses);
        assert_eq!(view.keys().copied().collect::<Vec<_>>(), Weekday::ALL.to_vec());
        assert!(view.values().all(Vec::is_empty));
    }

    #[test]
    fn equal_start_times_keep_course_order() {
        let courses = aggregate(&[
            session("Química", "D", "Jueves", "14:00", "16:00"),
            session("Biología", "E", "Jueves", "14:00", "15:00"),
            session("Arte", "F", "Jueves", "07:00", "09:00"),
        ]);
        let view = build_week_view(&courses);
        assert_eq!(names(&view, Weekday::Thursday), vec!["Arte", "Biología", "Química"]);
    }

    #[test]
    fn no_courses_still_yields_five_days() {
        let view = build_week_view(&[]);
        assert_eq!(view.len(), 5);
        assert!(view.values().all(Vec::is_empty));
    }
}
