// src/pipeline/run.rs

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;
use crate::models::{Config, RunOutcome, UnitCatalog};
use crate::pipeline::publish::Publisher;
use crate::pipeline::resolve::{Resolution, resolve_image};
use crate::pipeline::select::select_candidates;
use crate::services::{
    DryRunPoster, HttpFetcher, MastodonClient, MediaFetcher, OpenAccessClient, Poster, SearchApi,
};
use crate::utils::http::create_async_client;

/// Everything one invocation needs, built once per process.
pub struct Bot {
    pub config: Config,
    pub catalog: UnitCatalog,
    pub search: Arc<dyn SearchApi>,
    pub fetcher: Arc<dyn MediaFetcher>,
    pub poster: Arc<dyn Poster>,
}

impl Bot {
    /// Wire the production clients. `dry_run` replaces the poster with
    /// one that only logs.
    pub fn from_config(config: Config, catalog: UnitCatalog, dry_run: bool) -> Result<Self> {
        let client = create_async_client(&config.http)?;

        let poster: Arc<dyn Poster> = if dry_run {
            Arc::new(DryRunPoster)
        } else {
            Arc::new(MastodonClient::new(client.clone(), &config.mastodon))
        };

        Ok(Self {
            search: Arc::new(OpenAccessClient::new(client.clone(), &config.search)),
            fetcher: Arc::new(HttpFetcher::new(client)),
            poster,
            config,
            catalog,
        })
    }

    /// Run one invocation with an OS-seeded generator.
    pub async fn run(&self) -> RunOutcome {
        let mut rng = StdRng::from_os_rng();
        self.run_with_rng(&mut rng).await
    }

    /// Select, resolve and publish once.
    pub async fn run_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> RunOutcome {
        let selection =
            match select_candidates(self.search.as_ref(), &self.catalog, &self.config.search, rng)
                .await
            {
                Ok(selection) => selection,
                Err(e) => {
                    log::error!("{}", e);
                    return RunOutcome::Failed(e.to_string());
                }
            };

        log::debug!(
            "Scanning {} records from {} after {} queries",
            selection.result.rows().len(),
            selection.unit_code,
            selection.attempts
        );

        let publisher = Publisher::new(self.poster.as_ref(), &self.catalog, &self.config.caption);
        let resolution = resolve_image(
            &selection,
            self.fetcher.as_ref(),
            &publisher,
            &self.config.image,
            &self.config.search.free_license,
        )
        .await;

        match resolution {
            Resolution::Posted(status) => RunOutcome::Posted(status),
            Resolution::Failed(message) => RunOutcome::Failed(message),
            Resolution::Exhausted => RunOutcome::NothingPosted,
        }
    }
}
