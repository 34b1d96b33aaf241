//! Contact aggregation
//!
//! Folds a stream of parsed message participants into the canonical contact
//! map, keyed by normalized email. Merges are read-modify-write and must stay
//! serialized per key; [`reducer::ContactReducer`] runs a single-writer task
//! fed by a queue of parsed events so concurrent per-message parsing never
//! races on the map.

pub mod reducer;
pub mod types;

use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use tracing::warn;

use crate::address::{canonical_email, capitalize_domain_label, AddressParser, Mailbox};
use types::{Contact, Interaction, InteractionKind, MessageMeta};

/// Mail providers whose domains say nothing about a correspondent's company.
const PERSONAL_DOMAINS: &[&str] = &[
    "gmail.com",
    "googlemail.com",
    "yahoo.com",
    "yahoo.co.uk",
    "hotmail.com",
    "outlook.com",
    "live.com",
    "msn.com",
    "aol.com",
    "icloud.com",
    "me.com",
    "protonmail.com",
    "proton.me",
    "gmx.com",
    "mail.com",
    "comcast.net",
    "verizon.net",
];

/// One unit of work for the contact map.
#[derive(Debug, Clone)]
pub enum ContactEvent {
    /// Append an interaction to the mailbox's contact record.
    Interaction {
        mailbox: Mailbox,
        kind: InteractionKind,
        date: DateTime<Utc>,
        thread_id: Option<String>,
        participants: Option<Vec<String>>,
    },
    /// A header resolved to this address without an interaction to record.
    Seen { mailbox: Mailbox },
}

/// Parse a message's `Date` header. RFC 2822 first, RFC 3339 as fallback.
pub fn parse_message_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = DateTime::parse_from_rfc2822(raw) {
        return Some(date.with_timezone(&Utc));
    }
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    None
}

/// Turn one message into contact events.
///
/// A message with an unparseable date is skipped entirely with a warning; it
/// never fails. Header-level duplicates are collapsed so each contact gets at
/// most one interaction per message.
pub fn parse_message(parser: &AddressParser, owner: &str, msg: &MessageMeta) -> Vec<ContactEvent> {
    let date = match parse_message_date(&msg.headers.date) {
        Some(date) => date,
        None => {
            warn!(date = %msg.headers.date, "skipping message with unparseable date");
            return Vec::new();
        }
    };

    let sender = parser.parse_list(&msg.headers.from).into_iter().find(|m| m.is_valid());

    let mut seen: HashSet<String> = HashSet::new();
    if let Some(s) = &sender {
        seen.insert(canonical_email(&s.email));
    }

    let mut recipients: Vec<Mailbox> = Vec::new();
    for raw in [&msg.headers.to, &msg.headers.cc, &msg.headers.bcc] {
        if raw.trim().is_empty() {
            continue;
        }
        for mailbox in parser.parse_list(raw) {
            if !mailbox.is_valid() {
                continue;
            }
            let key = canonical_email(&mailbox.email);
            if key != owner && seen.insert(key) {
                recipients.push(mailbox);
            }
        }
    }

    let mut events = Vec::new();
    match sender {
        Some(sender) if canonical_email(&sender.email) == owner => {
            // Outbound: the owner's own record tracks the fan-out, and every
            // recipient gets one sent interaction pointing back at the owner.
            let addressees: Vec<String> =
                recipients.iter().map(|m| canonical_email(&m.email)).collect();
            events.push(ContactEvent::Interaction {
                mailbox: sender,
                kind: InteractionKind::Sent,
                date,
                thread_id: msg.thread_id.clone(),
                participants: Some(addressees),
            });
            for mailbox in recipients {
                events.push(ContactEvent::Interaction {
                    mailbox,
                    kind: InteractionKind::Sent,
                    date,
                    thread_id: msg.thread_id.clone(),
                    participants: Some(vec![owner.to_string()]),
                });
            }
        }
        Some(sender) => {
            events.push(ContactEvent::Interaction {
                mailbox: sender,
                kind: InteractionKind::Received,
                date,
                thread_id: msg.thread_id.clone(),
                participants: None,
            });
            for mailbox in recipients {
                events.push(ContactEvent::Seen { mailbox });
            }
        }
        None => {
            // Unattributable message: still register well-formed recipients.
            for mailbox in recipients {
                events.push(ContactEvent::Seen { mailbox });
            }
        }
    }
    events
}

/// Folds participant events into the canonical contact map.
pub struct ContactAggregator {
    owner: String,
    parser: AddressParser,
    contacts: HashMap<String, Contact>,
}

impl ContactAggregator {
    pub fn new(owner: &str) -> Self {
        Self {
            owner: canonical_email(owner),
            parser: AddressParser::new(),
            contacts: HashMap::new(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Synchronous path: parse one message and apply its events.
    pub fn ingest(&mut self, msg: &MessageMeta) {
        for event in parse_message(&self.parser, &self.owner, msg) {
            self.apply(event);
        }
    }

    /// Apply one event. This is the per-key serialized merge step.
    pub fn apply(&mut self, event: ContactEvent) {
        match event {
            ContactEvent::Seen { mailbox } => {
                self.ensure_contact(&mailbox);
            }
            ContactEvent::Interaction {
                mailbox,
                kind,
                date,
                thread_id,
                participants,
            } => {
                let key = self.ensure_contact(&mailbox);
                if let Some(contact) = self.contacts.get_mut(&key) {
                    contact.interactions.push(Interaction {
                        date,
                        kind,
                        thread_id,
                        participants,
                    });
                    contact.last_contacted = Some(match contact.last_contacted {
                        Some(prev) => prev.max(date),
                        None => date,
                    });
                }
            }
        }
    }

    /// Create the record on first sight and fill name/company when empty.
    fn ensure_contact(&mut self, mailbox: &Mailbox) -> String {
        let key = canonical_email(&mailbox.email);
        let contact =
            self.contacts.entry(key.clone()).or_insert_with(|| Contact::new(key.clone()));
        if contact.name.is_empty() && !mailbox.name.is_empty() {
            contact.name = mailbox.name.clone();
        }
        if contact.company.is_none() {
            contact.company = extract_company(mailbox);
        }
        key
    }

    pub fn contacts(&self) -> &HashMap<String, Contact> {
        &self.contacts
    }

    /// Consume the aggregator, putting each timeline into canonical order so
    /// replays of the same input produce identical maps.
    pub fn into_contacts(mut self) -> HashMap<String, Contact> {
        for contact in self.contacts.values_mut() {
            contact.interactions.sort_by(|a, b| {
                a.date
                    .cmp(&b.date)
                    .then_with(|| (a.kind as u8).cmp(&(b.kind as u8)))
                    .then_with(|| a.thread_id.cmp(&b.thread_id))
            });
        }
        self.contacts
    }
}

/// Company from a display name's parenthetical, else derived from the domain
/// unless it belongs to a personal mail provider.
fn extract_company(mailbox: &Mailbox) -> Option<String> {
    if let Some(open) = mailbox.name.find('(') {
        if let Some(close) = mailbox.name[open..].find(')') {
            let inner = mailbox.name[open + 1..open + close].trim();
            if !inner.is_empty() {
                return Some(inner.to_string());
            }
        }
    }

    let domain = mailbox.domain()?;
    if PERSONAL_DOMAINS.contains(&domain) {
        return None;
    }
    let company = capitalize_domain_label(domain);
    if company.is_empty() {
        None
    } else {
        Some(company)
    }
}
