use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
#[error("Invalid contact channel '{0}'. Accepted values: 'email', 'phone'")]
pub struct ChannelParseError(String);

/// Contact channel a record can be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactChannel {
    Email,
    Phone,
}

impl FromStr for ContactChannel {
    type Err = ChannelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(ContactChannel::Email),
            "phone" => Ok(ContactChannel::Phone),
            _ => Err(ChannelParseError(s.to_string())),
        }
    }
}

impl Display for ContactChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContactChannel::Email => write!(f, "email"),
            ContactChannel::Phone => write!(f, "phone"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub rank: u32,
    pub name: String,
    pub sector: Option<String>,
    pub website: Option<String>,
}

impl Display for Company {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:>3}. {}", self.rank, self.name)?;
        if let Some(sector) = &self.sector {
            write!(f, " ({})", sector)?;
        }
        if let Some(website) = &self.website {
            write!(f, " - {}", website)?;
        }
        Ok(())
    }
}

/// Contact details aggregated over a whole site sweep. `emails` and
/// `phones` are sorted and deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub emails: Vec<String>,
    pub phones: Vec<String>,
    pub pages_scanned: usize,
    pub pages_failed: usize,
}

impl ContactDetails {
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty() && self.phones.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenderStatus {
    Open,
    Closed,
    Awarded,
}

impl Display for TenderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TenderStatus::Open => write!(f, "open"),
            TenderStatus::Closed => write!(f, "closed"),
            TenderStatus::Awarded => write!(f, "awarded"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tender {
    pub reference: String,
    pub title: String,
    pub procuring_entity: String,
    pub status: TenderStatus,
    pub published: NaiveDate,
    pub deadline: Option<NaiveDate>,
    pub url: Option<String>,
}

impl Display for Tender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} ({}, published {})",
            self.reference, self.title, self.status, self.published
        )
    }
}

/// One fully enriched output record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub company: Company,
    pub contacts: Option<ContactDetails>,
    pub tenders: Vec<Tender>,
    pub enriched_at: DateTime<Utc>,
}

impl Display for CompanyRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.company)?;
        match &self.contacts {
            Some(contacts) if !contacts.is_empty() => {
                if !contacts.emails.is_empty() {
                    writeln!(f, "     emails: {}", contacts.emails.join(", "))?;
                }
                if !contacts.phones.is_empty() {
                    writeln!(f, "     phones: {}", contacts.phones.join(", "))?;
                }
            }
            Some(_) => writeln!(f, "     no contacts found")?,
            None => writeln!(f, "     website unknown, contact sweep skipped")?,
        }
        if self.tenders.is_empty() {
            writeln!(f, "     tenders: none")
        } else {
            for tender in &self.tenders {
                writeln!(f, "     tender: {}", tender)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_from_str() {
        assert_eq!(ContactChannel::from_str("email").unwrap(), ContactChannel::Email);
        assert_eq!(ContactChannel::from_str("phone").unwrap(), ContactChannel::Phone);

        let err = ContactChannel::from_str("sms").unwrap_err();
        assert!(err.to_string().contains("sms"));
    }

    #[test]
    fn test_company_display() {
        let company = Company {
            rank: 3,
            name: "Kenya Airways".to_string(),
            sector: Some("aviation".to_string()),
            website: Some("https://www.kenya-airways.com".to_string()),
        };
        assert_eq!(
            company.to_string(),
            "  3. Kenya Airways (aviation) - https://www.kenya-airways.com"
        );

        let bare = Company {
            rank: 12,
            name: "Carbacid Investments".to_string(),
            sector: None,
            website: None,
        };
        assert_eq!(bare.to_string(), " 12. Carbacid Investments");
    }

    #[test]
    fn test_record_display_without_website() {
        let record = CompanyRecord {
            company: Company {
                rank: 1,
                name: "Safaricom".to_string(),
                sector: None,
                website: None,
            },
            contacts: None,
            tenders: Vec::new(),
            enriched_at: Utc::now(),
        };
        let text = record.to_string();
        assert!(text.contains("website unknown"));
        assert!(text.contains("tenders: none"));
    }
}
