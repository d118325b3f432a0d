use chrono::Utc;
use futures::StreamExt;
use futures::stream;

use crate::ranking::{RankingError, RankingSource};
use crate::resolver::WebsiteResolver;
use crate::scraper::ContactScraper;
use crate::tenders::TenderSource;
use crate::types::{Company, CompanyRecord, ContactDetails};

pub const DEFAULT_CONCURRENCY: usize = 8;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Ranking source failed: {0}")]
    Ranking(#[from] RankingError),
}

/// Enumerates the ranked companies, then runs two independent
/// bounded-concurrency enrichment passes: contact sweep, tender lookup.
/// A failure while enriching one company never aborts the run.
pub struct Pipeline<R, W, T> {
    ranking: R,
    resolver: W,
    scraper: ContactScraper,
    tenders: T,
    concurrency: usize,
}

impl<R, W, T> Pipeline<R, W, T>
where
    R: RankingSource,
    W: WebsiteResolver,
    T: TenderSource,
{
    pub fn new(
        ranking: R,
        resolver: W,
        scraper: ContactScraper,
        tenders: T,
        concurrency: usize,
    ) -> Self {
        Self {
            ranking,
            resolver,
            scraper,
            tenders,
            concurrency: concurrency.max(1),
        }
    }

    pub async fn run(&self, top: usize) -> Result<Vec<CompanyRecord>, PipelineError> {
        let mut companies = self.ranking.top_companies(top)?;
        for company in &mut companies {
            if company.website.is_none() {
                company.website = self.resolver.resolve(company);
            }
        }

        log::info!(
            "Enriching {} companies (concurrency {})...",
            companies.len(),
            self.concurrency
        );

        let scraper = &self.scraper;
        let enriched: Vec<(Company, Option<ContactDetails>)> = stream::iter(companies)
            .map(|company| async move {
                let contacts = match company.website.as_deref() {
                    Some(website) => match scraper.sweep(website).await {
                        Ok(details) => {
                            log::info!(
                                "{}: {} email(s), {} phone(s) from {} page(s)",
                                company.name,
                                details.emails.len(),
                                details.phones.len(),
                                details.pages_scanned
                            );
                            Some(details)
                        }
                        Err(e) => {
                            log::warn!("Contact sweep failed for {}: {}", company.name, e);
                            None
                        }
                    },
                    None => {
                        log::debug!("No known website for {}", company.name);
                        None
                    }
                };
                (company, contacts)
            })
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        let tenders = &self.tenders;
        let mut records: Vec<CompanyRecord> = stream::iter(enriched)
            .map(|(company, contacts)| async move {
                let tenders = match tenders.tenders_for(&company).await {
                    Ok(tenders) => tenders,
                    Err(e) => {
                        log::warn!("Tender lookup failed for {}: {}", company.name, e);
                        Vec::new()
                    }
                };
                CompanyRecord {
                    company,
                    contacts,
                    tenders,
                    enriched_at: Utc::now(),
                }
            })
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        // buffer_unordered yields in completion order.
        records.sort_by_key(|record| record.company.rank);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::StaticRanking;
    use crate::tenders::NullTenderSource;

    struct NoResolver;

    impl WebsiteResolver for NoResolver {
        fn resolve(&self, _company: &Company) -> Option<String> {
            None
        }
    }

    #[tokio::test]
    async fn test_run_preserves_rank_order_without_websites() {
        let scraper = ContactScraper::new().unwrap();
        let pipeline = Pipeline::new(StaticRanking, NoResolver, scraper, NullTenderSource, 4);

        let records = pipeline.run(6).await.unwrap();

        assert_eq!(records.len(), 6);
        let ranks: Vec<u32> = records.iter().map(|r| r.company.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5, 6]);
        assert!(records.iter().all(|r| r.contacts.is_none()));
        assert!(records.iter().all(|r| r.tenders.is_empty()));
    }

    #[tokio::test]
    async fn test_run_with_zero_top_is_empty() {
        let scraper = ContactScraper::new().unwrap();
        let pipeline = Pipeline::new(StaticRanking, NoResolver, scraper, NullTenderSource, 1);

        assert!(pipeline.run(0).await.unwrap().is_empty());
    }
}
