//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into services, so request
//! handling never reads process-wide environment variables. The `*_from_env_value` helpers take
//! the raw value rather than reading the environment themselves, which keeps them testable.

use crate::constants::{DEFAULT_PAGE_SIZE, DEFAULT_PEOPLE_SOURCE_URL};
use crate::{PatientError, PatientResult};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    people_source_url: String,
    page_size: usize,
    seed: Option<u64>,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`PatientError::InvalidInput`] if the URL is blank or does not use http(s), or if
    /// `page_size` is zero.
    pub fn new(
        people_source_url: String,
        page_size: usize,
        seed: Option<u64>,
    ) -> PatientResult<Self> {
        let people_source_url = people_source_url.trim().to_string();
        if people_source_url.is_empty() {
            return Err(PatientError::InvalidInput(
                "people source URL cannot be empty".into(),
            ));
        }
        if !(people_source_url.starts_with("http://") || people_source_url.starts_with("https://"))
        {
            return Err(PatientError::InvalidInput(format!(
                "people source URL must be http(s): {people_source_url}"
            )));
        }
        if page_size == 0 {
            return Err(PatientError::InvalidInput(
                "page size must be greater than zero".into(),
            ));
        }

        Ok(Self {
            people_source_url,
            page_size,
            seed,
        })
    }

    pub fn people_source_url(&self) -> &str {
        &self.people_source_url
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Random source for admission synthesis: seeded when a seed is configured, otherwise
    /// seeded from OS entropy.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            people_source_url: DEFAULT_PEOPLE_SOURCE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            seed: None,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Resolve the people source URL, falling back to the public demo endpoint.
pub fn people_source_url_from_env_value(value: Option<String>) -> String {
    non_blank(value).unwrap_or_else(|| DEFAULT_PEOPLE_SOURCE_URL.to_string())
}

/// Parse the page size from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_PAGE_SIZE`].
pub fn page_size_from_env_value(value: Option<String>) -> PatientResult<usize> {
    match non_blank(value) {
        None => Ok(DEFAULT_PAGE_SIZE),
        Some(v) => v
            .parse::<usize>()
            .map_err(|_| PatientError::InvalidInput(format!("invalid page size: {v}"))),
    }
}

/// Parse an optional random seed. `None` or blank means "no seed".
pub fn seed_from_env_value(value: Option<String>) -> PatientResult<Option<u64>> {
    non_blank(value)
        .map(|v| {
            v.parse::<u64>()
                .map_err(|_| PatientError::InvalidInput(format!("invalid seed: {v}")))
        })
        .transpose()
}
