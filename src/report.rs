use std::fmt::Write;

use crate::filter::Selection;
use crate::models::Course;
use crate::week::WeekView;

pub const WAITING_MESSAGE: &str = "Esperando el archivo de horarios para cargar los datos.";
pub const NO_COURSES_MESSAGE: &str = "No hay cursos para mostrar con la selección actual.";
pub const NO_CLASSES_MESSAGE: &str = "Sin clases";

pub fn selection_title(selection: &Selection) -> String {
    format!(
        "Horario para: {} - {}",
        selection.period.name, selection.sub_term
    )
}

pub fn render_week(view: &WeekView) -> String {
    let mut output = String::new();

    for (day, sessions) in view {
        let _ = writeln!(output, "### {}", day);
        if sessions.is_empty() {
            let _ = writeln!(output, "{}", NO_CLASSES_MESSAGE);
        } else {
            for session in sessions {
                let _ = writeln!(
                    output,
                    "- **{}** {} - {} ({}, salón {})",
                    session.course_name,
                    session.start_time,
                    session.end_time,
                    session.instructor,
                    session.room
                );
            }
        }
        let _ = writeln!(output);
    }

    output
}

pub fn render_course_list(courses: &[Course]) -> String {
    let mut output = String::new();

    for course in courses {
        let _ = writeln!(output, "### {}", course.name);
        let _ = writeln!(output, "Profesor/a: {}", course.instructor);
        let _ = writeln!(output);
        let _ = writeln!(output, "| Día | Inicio | Fin | Salón |");
        let _ = writeln!(output, "|-----|--------|-----|-------|");
        for session in &course.sessions {
            let _ = writeln!(
                output,
                "| {} | {} | {} | {} |",
                session.day, session.start_time, session.end_time, session.room
            );
        }
        let _ = writeln!(output);
    }

    output
}

pub fn build_report(selection: &Selection, courses: &[Course], view: &WeekView) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# {}", selection_title(selection));
    if !selection.course_names.is_empty() {
        let filtered: Vec<&str> = selection.course_names.iter().map(String::as_str).collect();
        let _ = writeln!(output, "Materias: {}", filtered.join(", "));
    }
    let _ = writeln!(output);

    let _ = writeln!(output, "## Vista Semanal");
    if courses.is_empty() {
        let _ = writeln!(output, "{}", NO_COURSES_MESSAGE);
        let _ = writeln!(output);
    } else {
        output.push_str(&render_week(view));
    }

    let _ = writeln!(output, "## Lista Detallada");
    if courses.is_empty() {
        let _ = writeln!(output, "{}", NO_COURSES_MESSAGE);
    } else {
        output.push_str(&render_course_list(courses));
    }

    output
}
