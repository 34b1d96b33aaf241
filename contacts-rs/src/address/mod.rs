//! Address header parsing
//!
//! Turns raw From/To/Cc/Bcc header values into `{name, email}` mailboxes.
//! Malformed segments never raise; they yield an empty mailbox the caller
//! filters out.

mod parser;
mod types;

pub use parser::AddressParser;
pub use types::Mailbox;

/// Canonical contact key: trimmed, lower-cased address.
pub fn canonical_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Domain part of an address, if any.
pub fn domain_of(email: &str) -> Option<&str> {
    email.rsplit_once('@').map(|(_, domain)| domain).filter(|d| !d.is_empty())
}

/// First label of a domain with its first letter upper-cased,
/// e.g. "acme.com" -> "Acme".
pub fn capitalize_domain_label(domain: &str) -> String {
    let label = domain.split('.').next().unwrap_or(domain);
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
