use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

static RE_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b[a-z0-9][a-z0-9._%+-]*@[a-z0-9.-]+\.[a-z]{2,}\b")
        .expect("invalid regex: email")
});
static RE_PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\+?\(?\d[\d\s()./-]{6,}\d").expect("invalid regex: phone")
});
static RE_SCRIPT_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(?:script|style)[^>]*>.*?</(?:script|style)>")
        .expect("invalid regex: script filter")
});

// srcset-style asset names (logo@2x.png) match the email pattern.
const ASSET_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "svg", "webp", "ico", "css", "js", "woff", "woff2",
];

/// Emails and phone numbers extracted from a single page, deduplicated
/// within the page only.
#[derive(Debug, Default)]
pub(crate) struct PageContacts {
    pub emails: Vec<String>,
    pub phones: Vec<String>,
}

pub(crate) fn extract_page_contacts(html: &str) -> PageContacts {
    let document = Html::parse_document(html);

    let mut emails = Vec::new();
    let mailto_selector = Selector::parse("a[href^='mailto:']").unwrap();
    for element in document.select(&mailto_selector) {
        if let Some(href) = element.value().attr("href") {
            let addr = href.trim_start_matches("mailto:");
            let addr = addr.split('?').next().unwrap_or(addr);
            if let Some(email) = normalize_email(addr) {
                emails.push(email);
            }
        }
    }
    for m in RE_EMAIL.find_iter(html) {
        if let Some(email) = normalize_email(m.as_str()) {
            emails.push(email);
        }
    }

    let mut phones = Vec::new();
    let tel_selector = Selector::parse("a[href^='tel:']").unwrap();
    for element in document.select(&tel_selector) {
        if let Some(href) = element.value().attr("href")
            && let Some(phone) = normalize_phone(href.trim_start_matches("tel:"))
        {
            phones.push(phone);
        }
    }
    for m in RE_PHONE.find_iter(&visible_text(html)) {
        if let Some(phone) = normalize_phone(m.as_str()) {
            phones.push(phone);
        }
    }

    emails.sort();
    emails.dedup();
    phones.sort();
    phones.dedup();

    PageContacts { emails, phones }
}

fn normalize_email(raw: &str) -> Option<String> {
    let email = raw.trim().trim_end_matches('.').to_lowercase();
    let (local, domain) = email.split_once('@')?;
    if local.is_empty() || !domain.contains('.') {
        return None;
    }
    let tld = domain.rsplit('.').next()?;
    if ASSET_EXTENSIONS.contains(&tld) {
        return None;
    }
    Some(email)
}

fn normalize_phone(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    // Shorter runs are dates and postal codes, longer ones are not phone numbers.
    if !(9..=15).contains(&digits.len()) {
        return None;
    }
    if raw.trim_start().starts_with('+') {
        Some(format!("+{}", digits))
    } else {
        Some(digits)
    }
}

fn visible_text(html: &str) -> String {
    let stripped = RE_SCRIPT_STYLE.replace_all(html, " ");
    let document = Html::parse_document(&stripped);
    document.root_element().text().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_mailto_and_text_emails() {
        let html = r#"
            <html><body>
                <a href="mailto:Info@Safaricom.co.ke?subject=Enquiry">Email us</a>
                <p>Procurement enquiries: tenders@safaricom.co.ke</p>
                <img src="assets/logo@2x.png" alt="logo">
            </body></html>
        "#;

        let contacts = extract_page_contacts(html);

        assert_eq!(
            contacts.emails,
            vec![
                "info@safaricom.co.ke".to_string(),
                "tenders@safaricom.co.ke".to_string()
            ]
        );
    }

    #[test]
    fn test_duplicate_email_reported_once() {
        let html = r#"
            <body>
                <a href="mailto:info@kcbgroup.com">info@kcbgroup.com</a>
                <footer>Write to INFO@kcbgroup.com</footer>
            </body>
        "#;

        let contacts = extract_page_contacts(html);

        assert_eq!(contacts.emails, vec!["info@kcbgroup.com".to_string()]);
    }

    #[test]
    fn test_extract_tel_links_and_text_phones() {
        let html = r#"
            <body>
                <a href="tel:+254-722-002-100">Call us</a>
                <p>Nairobi office: 020 327 2000</p>
                <p>Founded in 1998, ISO 9001 certified.</p>
            </body>
        "#;

        let contacts = extract_page_contacts(html);

        assert_eq!(
            contacts.phones,
            vec!["+254722002100".to_string(), "0203272000".to_string()]
        );
    }

    #[test]
    fn test_script_content_is_not_visible_text() {
        let html = r#"
            <body>
                <script>var support = "0722 000 111";</script>
                <p>Hotline: 0711 039 000</p>
            </body>
        "#;

        let contacts = extract_page_contacts(html);

        assert_eq!(contacts.phones, vec!["0711039000".to_string()]);
    }

    #[test]
    fn test_short_and_long_digit_runs_rejected() {
        assert_eq!(normalize_phone("1998"), None);
        assert_eq!(normalize_phone("12345678"), None);
        assert_eq!(normalize_phone("1234567890123456"), None);
        assert_eq!(
            normalize_phone("+254 (0) 711 039 000"),
            Some("+2540711039000".to_string())
        );
    }

    #[test]
    fn test_asset_names_rejected() {
        assert_eq!(normalize_email("logo@2x.png"), None);
        assert_eq!(normalize_email("sprite@3x.webp"), None);
        assert_eq!(
            normalize_email("Info@Example.co.ke."),
            Some("info@example.co.ke".to_string())
        );
    }

    #[test]
    fn test_page_without_contacts() {
        let contacts = extract_page_contacts("<html><body><h1>Karibu</h1></body></html>");
        assert!(contacts.emails.is_empty());
        assert!(contacts.phones.is_empty());
    }
}
