use std::collections::{BTreeMap, BTreeSet};
use std::convert::Infallible;
use std::str::FromStr;

use crate::models::{Period, PeriodId, Session};
use crate::store::ScheduleStore;

/// Periods unique by id, most recent first.
pub fn list_periods(store: &ScheduleStore) -> Vec<Period> {
    let mut periods: BTreeMap<&PeriodId, &str> = BTreeMap::new();
    for session in store.sessions() {
        periods
            .entry(&session.period_id)
            .or_insert(session.period_name.as_str());
    }

    periods
        .into_iter()
        .rev()
        .map(|(id, name)| Period {
            id: id.clone(),
            name: name.to_string(),
        })
        .collect()
}

pub fn default_period(store: &ScheduleStore) -> Option<Period> {
    list_periods(store).into_iter().next()
}

pub fn period_name<'a>(store: &'a ScheduleStore, period_id: &PeriodId) -> Option<&'a str> {
    store
        .sessions()
        .iter()
        .find(|session| &session.period_id == period_id)
        .map(|session| session.period_name.as_str())
}

pub fn list_sub_terms(store: &ScheduleStore, period_id: &PeriodId) -> Vec<String> {
    store
        .sessions()
        .iter()
        .filter(|session| &session.period_id == period_id)
        .map(|session| session.sub_term.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn list_course_names(store: &ScheduleStore, period_id: &PeriodId, sub_term: &str) -> Vec<String> {
    scope(store, period_id, sub_term)
        .map(|session| session.course_name.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Sessions of one period and sub-term, in source order.
///
/// An absent or empty `course_names` set means no course restriction. Names
/// match exactly, including case and accents.
pub fn filter(
    store: &ScheduleStore,
    period_id: &PeriodId,
    sub_term: &str,
    course_names: Option<&BTreeSet<String>>,
) -> Vec<Session> {
    let restriction = course_names.filter(|names| !names.is_empty());
    scope(store, period_id, sub_term)
        .filter(|session| restriction.map_or(true, |names| names.contains(&session.course_name)))
        .cloned()
        .collect()
}

fn scope<'a>(
    store: &'a ScheduleStore,
    period_id: &'a PeriodId,
    sub_term: &'a str,
) -> impl Iterator<Item = &'a Session> + 'a {
    store
        .sessions()
        .iter()
        .filter(move |session| &session.period_id == period_id && session.sub_term == sub_term)
}

/// Which sub-term to preselect when the caller does not name one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubTermDefault {
    #[default]
    First,
    Last,
    /// Falls back to `First` when the period has no such sub-term.
    Named(String),
}

impl FromStr for SubTermDefault {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value {
            "first" => SubTermDefault::First,
            "last" => SubTermDefault::Last,
            other => SubTermDefault::Named(other.to_string()),
        })
    }
}

pub fn default_sub_term(
    store: &ScheduleStore,
    period_id: &PeriodId,
    policy: &SubTermDefault,
) -> Option<String> {
    let sub_terms = list_sub_terms(store, period_id);
    match policy {
        SubTermDefault::First => sub_terms.into_iter().next(),
        SubTermDefault::Last => sub_terms.into_iter().next_back(),
        SubTermDefault::Named(name) => {
            if sub_terms.contains(name) {
                Some(name.clone())
            } else {
                sub_terms.into_iter().next()
            }
        }
    }
}

/// A caller's request resolved against the store's defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub period: Period,
    pub sub_term: String,
    pub course_names: BTreeSet<String>,
}

impl Selection {
    /// `None` when the store has no periods or the period has no sub-terms.
    /// A requested period missing from the store keeps its id with an empty name
    /// so the caller renders an empty result rather than an error.
    pub fn resolve(
        store: &ScheduleStore,
        period_id: Option<&PeriodId>,
        sub_term: Option<&str>,
        course_names: BTreeSet<String>,
        policy: &SubTermDefault,
    ) -> Option<Self> {
        let period = match period_id {
            Some(id) => Period {
                id: id.clone(),
                name: period_name(store, id).unwrap_or_default().to_string(),
            },
            None => default_period(store)?,
        };
        let sub_term = match sub_term {
            Some(value) => value.to_string(),
            None => default_sub_term(store, &period.id, policy)?,
        };
        Some(Self {
            period,
            sub_term,
            course_names,
        })
    }

    pub fn sessions(&self, store: &ScheduleStore) -> Vec<Session> {
        filter(store, &self.period.id, &self.sub_term, Some(&self.course_names))
    }
}
