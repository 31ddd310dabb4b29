//! Shared fakes for geocoder tests

use crate::app::models::Coordinates;
use crate::app::services::geocoder::Geocoder;
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::time::Instant;

pub mod batch_tests;
pub mod opencage_tests;
pub mod rate_limiter_tests;

/// What the fake answers for a given name
#[derive(Debug, Clone)]
pub enum FakeAnswer {
    Found(f64, f64),
    NoMatch,
    Fail,
    Throttle(u64),
    Reject,
    Hang,
}

/// In-memory geocoder recording every call and its time
#[derive(Default)]
pub struct FakeGeocoder {
    answers: HashMap<String, FakeAnswer>,
    pub calls: Mutex<Vec<(String, Instant)>>,
}

impl FakeGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, answer: FakeAnswer) -> Self {
        self.answers.insert(name.to_string(), answer);
        self
    }

    pub fn call_names(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().iter().map(|(_, at)| *at).collect()
    }
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn lookup(&self, query: &str) -> Result<Option<Coordinates>> {
        self.calls
            .lock()
            .unwrap()
            .push((query.to_string(), Instant::now()));

        match self.answers.get(query).cloned().unwrap_or(FakeAnswer::NoMatch) {
            FakeAnswer::Found(lat, lon) => Ok(Some(Coordinates::new(lat, lon)?)),
            FakeAnswer::NoMatch => Ok(None),
            FakeAnswer::Fail => Err(Error::geocoding(query, "HTTP 500: server error")),
            FakeAnswer::Throttle(retry_after_secs) => Err(Error::RateLimited { retry_after_secs }),
            FakeAnswer::Reject => Err(Error::Authentication { status: 401 }),
            FakeAnswer::Hang => std::future::pending().await,
        }
    }
}

pub fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|name| name.to_string()).collect()
}
