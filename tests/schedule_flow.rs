use std::collections::BTreeSet;
use std::io::Write;

use pretty_assertions::assert_eq;
use schedule_browser::store::{load, load_from_reader};
use schedule_browser::{
    aggregate, build_week_view, filter, list_periods, LoadStatus, PeriodId, StoreCache, Weekday,
};

const HEADER: &str =
    "periodo_id,nombre_periodo,sub_semestre,nombre_curso,profesor,dia,inicio,fin,salon\n";

const SAMPLE: &str = "2024-1,Periodo 2024-1,I,Calculus I,A,Lunes,08:00,10:00,A-101\n\
                      2024-1,Periodo 2024-1,I,Calculus I,A,Miércoles,08:00,10:00,A-101\n\
                      2024-1,Periodo 2024-1,I,Physics,B,Lunes,10:00,12:00,Lab 2\n";

fn course_names(view: &schedule_browser::WeekView, day: Weekday) -> Vec<&str> {
    view[&day].iter().map(|s| s.course_name.as_str()).collect()
}

#[test]
fn two_courses_lay_out_across_the_week() {
    let store = load_from_reader(format!("{HEADER}{SAMPLE}").as_bytes()).expect("valid source");
    let sessions = filter(&store, &PeriodId::from("2024-1"), "I", None);
    let courses = aggregate(&sessions);
    assert_eq!(courses.len(), 2);
    assert_eq!(courses[0].name, "Calculus I");
    assert_eq!(courses[0].sessions.len(), 2);

    let view = build_week_view(&courses);
    assert_eq!(course_names(&view, Weekday::Monday), vec!["Calculus I", "Physics"]);
    assert_eq!(course_names(&view, Weekday::Wednesday), vec!["Calculus I"]);
    for day in [Weekday::Tuesday, Weekday::Thursday, Weekday::Friday] {
        assert!(view[&day].is_empty(), "{day} should be empty");
    }
}

#[test]
fn empty_source_is_waiting_not_failure() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, "{HEADER}").expect("write");

    let loaded = load(file.path()).map(Box::new);
    assert_eq!(LoadStatus::of(&loaded), LoadStatus::Waiting);
    let store = loaded.expect("empty store loads");
    assert!(list_periods(&store).is_empty());
}

#[test]
fn unknown_course_yields_empty_views() {
    let store = load_from_reader(format!("{HEADER}{SAMPLE}").as_bytes()).expect("valid source");
    let wanted: BTreeSet<String> = ["Chemistry".to_string()].into_iter().collect();

    let sessions = filter(&store, &PeriodId::from("2024-1"), "I", Some(&wanted));
    assert!(sessions.is_empty());
    let courses = aggregate(&sessions);
    assert!(courses.is_empty());

    let view = build_week_view(&courses);
    assert_eq!(view.keys().copied().collect::<Vec<_>>(), Weekday::ALL.to_vec());
    assert!(view.values().all(Vec::is_empty));
}

#[test]
fn periods_from_disk_are_most_recent_first() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("horarios.csv");
    std::fs::write(
        &path,
        format!(
            "{HEADER}2023-2,Periodo 2023-2,I,Física,Bea,Martes,08:00,10:00,B\n{SAMPLE}\
             2023-2,Periodo 2023-2,II,Química,Carla,Jueves,08:00,10:00,C\n"
        ),
    )
    .expect("write");

    let mut cache = StoreCache::new();
    let store = cache.get_or_load(&path).expect("load");
    let ids: Vec<String> = list_periods(&store).into_iter().map(|p| p.id.to_string()).collect();
    assert_eq!(ids, vec!["2024-1", "2023-2"]);
}

#[test]
fn week_view_serializes_with_day_labels() {
    let store = load_from_reader(format!("{HEADER}{SAMPLE}").as_bytes()).expect("valid source");
    let view = build_week_view(&aggregate(store.sessions()));
    let json = serde_json::to_value(&view).expect("serialize");
    assert_eq!(json["Lunes"][0]["course_name"], "Calculus I");
    assert_eq!(json["Viernes"], serde_json::json!([]));
}
