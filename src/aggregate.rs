use std::collections::BTreeMap;

use crate::models::{Course, Session};

/// Group sessions into courses by (course name, instructor).
///
/// Courses come out sorted by that key; each course keeps its sessions in
/// input order.
pub fn aggregate(sessions: &[Session]) -> Vec<Course> {
    let mut groups: BTreeMap<(&str, &str), Vec<Session>> = BTreeMap::new();

    for session in sessions {
        groups
            .entry((session.course_name.as_str(), session.instructor.as_str()))
            .or_default()
            .push(session.clone());
    }

    groups
        .into_iter()
        .map(|((name, instructor), sessions)| Course {
            name: name.to_string(),
            instructor: instructor.to_string(),
            sessions,
        })
        .collect()
}

pub fn flatten(courses: &[Course]) -> Vec<Session> {
    courses
        .iter()
        .flat_map(|course| course.sessions.iter().cloned())
        .collect()
}
