use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;
use tracing::{debug, instrument};
use url::Url;

use crate::core::{letters, WORD_LEN};

/// Decides whether a candidate guess is a real word.
///
/// An `Err` means the gate could not answer, not that the word is bad; the
/// game still refuses the guess (fail closed) but tells the player the
/// check was unavailable rather than that the word is wrong.
#[allow(async_fn_in_trait)]
pub trait Validity {
    type Error: std::error::Error;

    async fn check(&self, guess: &str) -> Result<bool, Self::Error>;
}

/// Client for the dictionary backend's `GET /api/check-word` endpoint.
///
/// Verdicts are memoized so resubmitting the same candidate (or retyping
/// it after a rejection) never hits the backend twice.
#[derive(Debug, Clone)]
pub struct CheckWordApi {
    client: reqwest::Client,
    base: Url,
    cache: Arc<RwLock<HashMap<String, bool>>>,
}

impl CheckWordApi {
    pub fn new(base: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base,
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn endpoint(&self, guess: &str) -> Url {
        let mut url = self.base.clone();
        url.set_path("api/check-word");
        url.query_pairs_mut().clear().append_pair("guess", guess);

        url
    }
}

impl Validity for CheckWordApi {
    type Error = reqwest::Error;

    #[instrument(skip(self))]
    async fn check(&self, guess: &str) -> Result<bool, Self::Error> {
        // only words of the right length can possibly be valid
        if letters(guess).count() != WORD_LEN {
            return Ok(false);
        }

        if let Some(&valid) = self.cache.read().await.get(guess) {
            debug!(valid, "verdict cached");
            return Ok(valid);
        }

        let valid = self
            .client
            .get(self.endpoint(guess))
            .send()
            .await?
            .error_for_status()?
            .json::<bool>()
            .await?;

        debug!(valid, "verdict from backend");

        self.cache.write().await.insert(guess.to_owned(), valid);

        Ok(valid)
    }
}
