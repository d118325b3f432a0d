use std::collections::BTreeSet;
use std::time::Duration;

use futures::StreamExt;
use futures::stream;
use reqwest::Client;

use crate::parser::extract_page_contacts;
use crate::types::ContactDetails;

// Pages of one site fetched concurrently; the cross-company bound lives
// in the pipeline.
const PAGE_CONCURRENCY: usize = 4;

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid website address: '{0}'")]
    InvalidWebsite(String),
}

/// Best-effort contact sweep over a fixed set of candidate pages per site.
#[derive(Debug, Clone)]
pub struct ContactScraper {
    client: Client,
}

impl ContactScraper {
    pub fn new() -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(format!(
                "{}/{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self { client })
    }

    /// Fetches every candidate page of `website`, tolerating each page
    /// failure independently, and returns the merged deduplicated
    /// contact details.
    pub async fn sweep(&self, website: &str) -> Result<ContactDetails, ScrapeError> {
        let urls = candidate_urls(website)?;
        log::debug!("Sweeping {} candidate pages of {}", urls.len(), website);

        let mut emails = BTreeSet::new();
        let mut phones = BTreeSet::new();
        let mut pages_scanned = 0;
        let mut pages_failed = 0;

        let mut pages = stream::iter(urls)
            .map(|url| async move {
                let result = self.get_html(&url).await;
                (url, result)
            })
            .buffer_unordered(PAGE_CONCURRENCY);

        while let Some((url, result)) = pages.next().await {
            match result {
                Ok(html) => {
                    let contacts = extract_page_contacts(&html);
                    emails.extend(contacts.emails);
                    phones.extend(contacts.phones);
                    pages_scanned += 1;
                }
                Err(e) => {
                    log::debug!("Skipping {}: {}", url, e);
                    pages_failed += 1;
                }
            }
        }

        Ok(ContactDetails {
            emails: emails.into_iter().collect(),
            phones: phones.into_iter().collect(),
            pages_scanned,
            pages_failed,
        })
    }

    async fn get_html(&self, url: &str) -> Result<String, ScrapeError> {
        Ok(self
            .client
            .get(url)
            .send()
            .await
            .inspect_err(|e| log::debug!("HTTP error for {}: {:?}", url, e))?
            .error_for_status()?
            .text()
            .await?)
    }
}

/// Site root plus the fixed candidate paths, deduplicated and in
/// fetch order. The scheme defaults to https when missing.
pub(crate) fn candidate_urls(website: &str) -> Result<Vec<String>, ScrapeError> {
    let trimmed = website.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ScrapeError::InvalidWebsite(website.to_string()));
    }

    let base = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let mut urls = vec![base.clone()];
    for path in crate::CONTACT_PATHS {
        let url = format!("{}/{}", base, path);
        if !urls.contains(&url) {
            urls.push(url);
        }
    }
    Ok(urls)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_urls_adds_scheme_and_paths() {
        let urls = candidate_urls("safaricom.co.ke").unwrap();

        assert_eq!(urls[0], "https://safaricom.co.ke");
        assert!(urls.contains(&"https://safaricom.co.ke/contact".to_string()));
        assert!(urls.contains(&"https://safaricom.co.ke/customer-care".to_string()));
        assert_eq!(urls.len(), crate::CONTACT_PATHS.len() + 1);
    }

    #[test]
    fn test_candidate_urls_keeps_explicit_scheme() {
        let urls = candidate_urls("http://www.kplc.co.ke/").unwrap();

        assert_eq!(urls[0], "http://www.kplc.co.ke");
        assert!(urls.contains(&"http://www.kplc.co.ke/about".to_string()));
    }

    #[test]
    fn test_candidate_urls_rejects_blank_input() {
        assert!(matches!(
            candidate_urls(""),
            Err(ScrapeError::InvalidWebsite(_))
        ));
        assert!(matches!(
            candidate_urls("   "),
            Err(ScrapeError::InvalidWebsite(_))
        ));
    }
}
