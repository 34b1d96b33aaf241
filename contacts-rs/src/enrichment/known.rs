//! Static known-domain table, checked before any cache or classifier call.

use super::types::CompanyInfo;

const KNOWN_DOMAINS: &[(&str, &str, &str)] = &[
    ("gmail.com", "Google", "Email Provider"),
    ("googlemail.com", "Google", "Email Provider"),
    ("google.com", "Google", "Technology"),
    ("outlook.com", "Microsoft", "Email Provider"),
    ("hotmail.com", "Microsoft", "Email Provider"),
    ("live.com", "Microsoft", "Email Provider"),
    ("microsoft.com", "Microsoft", "Technology"),
    ("yahoo.com", "Yahoo", "Email Provider"),
    ("aol.com", "AOL", "Email Provider"),
    ("icloud.com", "Apple", "Email Provider"),
    ("me.com", "Apple", "Email Provider"),
    ("apple.com", "Apple", "Technology"),
    ("protonmail.com", "Proton", "Email Provider"),
    ("proton.me", "Proton", "Email Provider"),
    ("amazon.com", "Amazon", "E-commerce"),
    ("salesforce.com", "Salesforce", "Software"),
    ("github.com", "GitHub", "Software"),
    ("gitlab.com", "GitLab", "Software"),
    ("slack.com", "Slack", "Software"),
    ("atlassian.com", "Atlassian", "Software"),
    ("stripe.com", "Stripe", "Financial Services"),
    ("paypal.com", "PayPal", "Financial Services"),
    ("intuit.com", "Intuit", "Financial Services"),
    ("linkedin.com", "LinkedIn", "Social Media"),
    ("meta.com", "Meta", "Social Media"),
    ("x.com", "X", "Social Media"),
    ("mailchimp.com", "Mailchimp", "Marketing"),
    ("hubspot.com", "HubSpot", "Marketing"),
    ("substack.com", "Substack", "Media"),
    ("nytimes.com", "The New York Times", "Media"),
];

pub fn lookup(domain: &str) -> Option<CompanyInfo> {
    KNOWN_DOMAINS.iter().find(|(d, _, _)| *d == domain).map(|(_, company, industry)| {
        CompanyInfo {
            company: Some((*company).to_string()),
            industry: Some((*industry).to_string()),
        }
    })
}
