use std::collections::HashMap;
use std::io::Read;
use std::ops::Deref;
use std::path::Path;

use chrono::NaiveTime;
use log::{debug, info, warn};
use sha2::{Digest, Sha256};

use crate::error::{Result, ScheduleError};
use crate::models::{PeriodId, Session};

pub const REQUIRED_COLUMNS: [&str; 9] = [
    "periodo_id",
    "nombre_periodo",
    "sub_semestre",
    "nombre_curso",
    "profesor",
    "dia",
    "inicio",
    "fin",
    "salon",
];

#[derive(serde::Deserialize)]
struct CsvRow {
    periodo_id: String,
    nombre_periodo: String,
    sub_semestre: String,
    nombre_curso: String,
    profesor: String,
    dia: String,
    // Kept as text so "08:00" is never reinterpreted as a number.
    inicio: String,
    fin: String,
    salon: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreStatus {
    Ready,
    Empty,
}

/// Immutable snapshot of every session in one version of the source.
#[derive(Debug, Clone)]
pub struct ScheduleStore {
    sessions: Vec<Session>,
    checksum: String,
}

impl ScheduleStore {
    /// Build a store from already-parsed sessions. Used by tests and by callers
    /// that obtain rows from somewhere other than CSV.
    pub fn from_sessions(sessions: Vec<Session>) -> Result<Self> {
        check_period_names(&sessions)?;
        Ok(Self {
            sessions,
            checksum: String::new(),
        })
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// SHA-256 of the raw source bytes, empty for stores built in memory.
    pub fn checksum(&self) -> &str {
        &self.checksum
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn status(&self) -> StoreStatus {
        if self.is_empty() {
            StoreStatus::Empty
        } else {
            StoreStatus::Ready
        }
    }
}

/// What the presentation layer should show after a load attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Ready,
    /// No source yet, or a source without rows.
    Waiting,
    Failed(String),
}

impl LoadStatus {
    pub fn of<S: Deref<Target = ScheduleStore>>(result: &Result<S>) -> Self {
        match result {
            Ok(store) if store.is_empty() => LoadStatus::Waiting,
            Ok(_) => LoadStatus::Ready,
            Err(err) if err.is_unavailable() => LoadStatus::Waiting,
            Err(err) => LoadStatus::Failed(err.to_string()),
        }
    }
}

pub fn calculate_checksum(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}

pub fn load(path: &Path) -> Result<ScheduleStore> {
    debug!("reading schedule source {}", path.display());
    let bytes = std::fs::read(path).map_err(|source| {
        warn!("schedule source {} unavailable: {}", path.display(), source);
        ScheduleError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        }
    })?;
    parse_bytes(&bytes)
}

pub fn load_from_reader<R: Read>(mut reader: R) -> Result<ScheduleStore> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|err| ScheduleError::malformed(format!("failed to read source: {err}")))?;
    parse_bytes(&bytes)
}

pub(crate) fn parse_bytes(bytes: &[u8]) -> Result<ScheduleStore> {
    let checksum = calculate_checksum(bytes);
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        debug!("schedule source has no header, treating as empty");
        return Ok(ScheduleStore {
            sessions: Vec::new(),
            checksum,
        });
    }

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|header| header == *column))
        .collect();
    if !missing.is_empty() {
        return Err(ScheduleError::malformed(format!(
            "missing columns: {}",
            missing.join(", ")
        )));
    }

    let mut sessions = Vec::new();
    for (index, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = result?;
        let line = index + 1;
        check_time(&row.inicio, "inicio", line)?;
        check_time(&row.fin, "fin", line)?;
        sessions.push(Session {
            period_id: PeriodId::new(row.periodo_id),
            period_name: row.nombre_periodo,
            sub_term: row.sub_semestre,
            course_name: row.nombre_curso,
            instructor: row.profesor,
            day: row.dia,
            start_time: row.inicio,
            end_time: row.fin,
            room: row.salon,
        });
    }

    check_period_names(&sessions)?;
    info!(
        "loaded {} sessions from schedule source ({})",
        sessions.len(),
        &checksum[..12]
    );

    Ok(ScheduleStore { sessions, checksum })
}

/// Times must be zero-padded 24h `HH:MM`; string order equals time order only then.
fn check_time(value: &str, column: &str, line: usize) -> Result<()> {
    let padded = value.len() == 5 && value.as_bytes()[2] == b':';
    if padded && NaiveTime::parse_from_str(value, "%H:%M").is_ok() {
        return Ok(());
    }
    Err(ScheduleError::malformed(format!(
        "row {line}: {column} value {value:?} is not a zero-padded HH:MM time"
    )))
}

fn check_period_names(sessions: &[Session]) -> Result<()> {
    let mut names: HashMap<&PeriodId, &str> = HashMap::new();
    for (index, session) in sessions.iter().enumerate() {
        let name = names
            .entry(&session.period_id)
            .or_insert(session.period_name.as_str());
        if *name != session.period_name {
            return Err(ScheduleError::malformed(format!(
                "row {}: period {} is named both {:?} and {:?}",
                index + 1,
                session.period_id,
                name,
                session.period_name
            )));
        }
    }
    Ok(())
}
