//! Loading people from the remote source.
//!
//! The demo endpoint returns `{"users": [...], "total": .., "skip": .., "limit": ..}`. Only the
//! `users` array is read; every user becomes one [`PersonRecord`]. Loading is a one-shot
//! operation with no retry: callers decide what to do with a failure (the service logs it and
//! keeps its current records).

use crate::admission::generate_all_admission_data;
use crate::constants::FETCH_TIMEOUT_SECS;
use crate::error::{PatientError, PatientResult};
use crate::patient::{merge_people, PatientAdmission, PersonRecord};
use async_trait::async_trait;
use rand::Rng;
use serde::Deserialize;
use std::time::Duration;

/// Somewhere people can be fetched from.
#[async_trait]
pub trait PeopleSource: Send + Sync {
    async fn fetch_people(&self) -> PatientResult<Vec<PersonRecord>>;

    /// Short human-readable description for logs.
    fn describe(&self) -> String;
}

#[derive(Deserialize)]
struct UsersPayload {
    users: Vec<PersonRecord>,
}

/// Decodes a people payload.
pub fn parse_people(json: &str) -> PatientResult<Vec<PersonRecord>> {
    serde_json::from_str::<UsersPayload>(json)
        .map(|payload| payload.users)
        .map_err(PatientError::Deserialization)
}

/// Fetches people over HTTP with a plain unauthenticated GET.
#[derive(Clone, Debug)]
pub struct HttpPeopleSource {
    url: String,
    client: reqwest::Client,
}

impl HttpPeopleSource {
    /// Source with the default request timeout of [`FETCH_TIMEOUT_SECS`].
    pub fn new(url: impl Into<String>) -> PatientResult<Self> {
        Self::with_timeout(url, Duration::from_secs(FETCH_TIMEOUT_SECS))
    }

    /// Source whose requests fail with [`PatientError::Fetch`] once `timeout` elapses.
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> PatientResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl PeopleSource for HttpPeopleSource {
    async fn fetch_people(&self) -> PatientResult<Vec<PersonRecord>> {
        let resp = self.client.get(&self.url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(PatientError::FetchStatus(status.as_u16()));
        }
        let body = resp.text().await?;
        parse_people(&body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Fetches people and turns them into patient records with synthesized admission data.
///
/// # Errors
///
/// Propagates fetch and decode failures from `source`.
pub async fn load_patients<S, R>(source: &S, rng: &mut R) -> PatientResult<Vec<PatientAdmission>>
where
    S: PeopleSource + ?Sized,
    R: Rng + Send,
{
    let people = source.fetch_people().await?;
    let total = i64::try_from(people.len())
        .map_err(|_| PatientError::InvalidArgument("too many people".into()))?;
    let admissions = generate_all_admission_data(total, rng)?;
    let patients = merge_people(people, admissions, rng)?;

    tracing::info!(
        source = %source.describe(),
        patients = patients.len(),
        "loaded patients"
    );

    Ok(patients)
}
