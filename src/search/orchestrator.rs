// src/search/orchestrator.rs
use crate::config::{RegionQuery, SearchProfile};
use crate::search::client::SearchClient;
use crate::search::models::ResultPage;
use rand::Rng;
use std::time::Duration;
use tracing::{debug, info, warn};

/// How far past the first page a unit of work may go.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageLimit {
    /// First page only; the reported total is ignored.
    FirstOnly,
    /// Follow the reported total up to this many pages.
    Max(u32),
    /// Follow the reported total to the end.
    All,
}

/// Randomized inter-request delay window. Requests are deliberately paced
/// and strictly sequential to stay under the service's automation radar.
#[derive(Debug, Clone, Copy)]
pub struct Pacing {
    pub min: Duration,
    pub max: Duration,
}

impl Pacing {
    pub fn from_millis(min_ms: u64, max_ms: u64) -> Self {
        Pacing {
            min: Duration::from_millis(min_ms),
            max: Duration::from_millis(max_ms),
        }
    }

    fn wait(&self) {
        let min = self.min.as_millis() as u64;
        let max = self.max.as_millis() as u64;
        let delay = if max > min {
            rand::thread_rng().gen_range(min..=max)
        } else {
            min
        };
        if delay > 0 {
            std::thread::sleep(Duration::from_millis(delay));
        }
    }
}

/// Outcome of one (region, profile) unit of work.
#[derive(Debug)]
pub enum UnitOutcome {
    Completed {
        pages: Vec<ResultPage>,
        listings: usize,
        /// True when pagination was cut short by a throttle signal
        /// (redirect loop or HTTP 429) rather than running to the end.
        stopped_early: bool,
    },
    Failed {
        reason: String,
    },
}

#[derive(Debug)]
pub struct UnitResult {
    pub region: String,
    pub profile: String,
    pub outcome: UnitOutcome,
}

/// One outcome per unit, in input order, plus summary counters.
#[derive(Debug, Default)]
pub struct RunReport {
    pub units: Vec<UnitResult>,
}

impl RunReport {
    pub fn succeeded(&self) -> usize {
        self.units
            .iter()
            .filter(|u| matches!(u.outcome, UnitOutcome::Completed { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.units.len() - self.succeeded()
    }

    pub fn total_listings(&self) -> usize {
        self.units
            .iter()
            .map(|u| match &u.outcome {
                UnitOutcome::Completed { listings, .. } => *listings,
                UnitOutcome::Failed { .. } => 0,
            })
            .sum()
    }
}

pub struct Orchestrator<C> {
    client: C,
    pacing: Pacing,
    limit: PageLimit,
}

impl<C: SearchClient> Orchestrator<C> {
    pub fn new(client: C, pacing: Pacing, limit: PageLimit) -> Self {
        Self {
            client,
            pacing,
            limit,
        }
    }

    /// Runs every (region, profile) unit strictly in order. Units are
    /// independent: a failed unit is recorded and the run moves on. Each
    /// fetched page is handed to `on_page` before the next fetch starts.
    pub fn run<F>(
        &self,
        units: &[(RegionQuery, SearchProfile)],
        token: &str,
        mut on_page: F,
    ) -> RunReport
    where
        F: FnMut(&RegionQuery, &SearchProfile, u32, &ResultPage),
    {
        let mut report = RunReport::default();

        for (i, (region, profile)) in units.iter().enumerate() {
            if i > 0 {
                self.pacing.wait();
            }

            info!(region = %region.name, profile = %profile.name, "starting unit");
            let outcome = self.run_unit(region, profile, token, &mut on_page);

            match &outcome {
                UnitOutcome::Completed {
                    listings,
                    pages,
                    stopped_early,
                } => {
                    info!(
                        region = %region.name,
                        profile = %profile.name,
                        pages = pages.len(),
                        listings,
                        stopped_early,
                        "unit complete"
                    );
                }
                UnitOutcome::Failed { reason } => {
                    warn!(region = %region.name, profile = %profile.name, %reason, "unit failed");
                }
            }

            report.units.push(UnitResult {
                region: region.name.clone(),
                profile: profile.name.clone(),
                outcome,
            });
        }

        report
    }

    fn run_unit<F>(
        &self,
        region: &RegionQuery,
        profile: &SearchProfile,
        token: &str,
        on_page: &mut F,
    ) -> UnitOutcome
    where
        F: FnMut(&RegionQuery, &SearchProfile, u32, &ResultPage),
    {
        // Fresh cursor regardless of what the base params carried.
        let mut params = region.base.clone();
        params.page = 1;

        let first = match self.client.execute(&params, profile, token) {
            Ok(page) => page,
            Err(e) => {
                return UnitOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        };

        let total_pages = self.total_pages(&first);
        on_page(region, profile, 1, &first);

        let mut pages = vec![first];
        let mut stopped_early = false;

        for page_no in 2..=total_pages {
            self.pacing.wait();
            params.page = page_no;

            match self.client.execute(&params, profile, token) {
                Ok(page) if page.listings.is_empty() => {
                    debug!(page = page_no, "empty page, end of results");
                    break;
                }
                Ok(page) => {
                    debug!(page = page_no, listings = page.listings.len(), "page fetched");
                    on_page(region, profile, page_no, &page);
                    pages.push(page);
                }
                Err(e) if e.is_throttle_signal() => {
                    warn!(page = page_no, error = %e, "throttled, stopping pagination");
                    stopped_early = true;
                    break;
                }
                Err(e) => {
                    warn!(page = page_no, error = %e, "page fetch failed, skipping");
                }
            }
        }

        let listings = pages.iter().map(|p| p.listings.len()).sum();
        UnitOutcome::Completed {
            pages,
            listings,
            stopped_early,
        }
    }

    /// Pages to attempt for a unit, derived from the first page's reported
    /// totals. The report is advisory; empty pages still end a unit early.
    fn total_pages(&self, first: &ResultPage) -> u32 {
        let cap = match self.limit {
            PageLimit::FirstOnly => return 1,
            PageLimit::Max(n) => n.max(1),
            PageLimit::All => u32::MAX,
        };

        let first_count = first.listings.len() as i64;
        if first.total_records <= first_count {
            return 1;
        }

        let page_size = if first.page_size > 0 {
            first.page_size
        } else if first_count > 0 {
            first_count
        } else {
            return 1;
        };

        let total = (first.total_records + page_size - 1) / page_size;
        (total.max(1) as u32).min(cap)
    }
}
