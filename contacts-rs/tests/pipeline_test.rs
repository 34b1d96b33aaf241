//! End-to-end pipeline tests against the mock classifier.

use contacts_rs::config::Config;
use contacts_rs::enrichment::{MemoryDomainCache, MockClassifier};
use contacts_rs::pipeline::ContactPipeline;
use contacts_rs::{InteractionKind, MessageMeta};
use std::sync::Arc;

const OWNER: &str = "me@example.com";

fn message(from: &str, to: &str, date: &str, thread: &str) -> MessageMeta {
    serde_json::from_value(serde_json::json!({
        "threadId": thread,
        "headers": {
            "From": from,
            "To": to,
            "Date": date,
        }
    }))
    .expect("valid message json")
}

fn fast_config() -> Config {
    let mut config = Config::default();
    config.enrichment.dispatch_delay_ms = 0;
    config.enrichment.retry_base_ms = 1;
    config
}

fn pipeline_with(classifier: Arc<MockClassifier>) -> ContactPipeline {
    ContactPipeline::new(fast_config(), classifier, Arc::new(MemoryDomainCache::new()))
}

#[tokio::test]
async fn test_inbound_and_outbound_build_one_contact() {
    let classifier = Arc::new(MockClassifier::new().with_label("acme.com", "Manufacturing"));
    let pipeline = pipeline_with(classifier);

    let messages = vec![
        message(
            "John Doe <john@acme.com>",
            OWNER,
            "Mon, 01 Jan 2024 10:00:00 +0000",
            "t1",
        ),
        message(OWNER, "john@acme.com", "Fri, 05 Jan 2024 10:00:00 +0000", "t2"),
    ];

    let output = pipeline.run(OWNER, &messages, OWNER).await.unwrap();
    let john = output.contacts.iter().find(|c| c.email == "john@acme.com").unwrap();

    assert_eq!(john.interactions.len(), 2);
    assert_eq!(john.interactions[0].kind, InteractionKind::Received);
    assert_eq!(john.interactions[1].kind, InteractionKind::Sent);
    assert_eq!(john.name, "John Doe");
    assert_eq!(john.company.as_deref(), Some("Acme"));
    assert_eq!(john.industry.as_deref(), Some("Manufacturing"));
    assert_eq!(
        john.last_contacted,
        Some(john.interactions.iter().map(|i| i.date).max().unwrap())
    );
}

#[tokio::test]
async fn test_canonical_keys_unique_and_normalized() {
    let classifier = Arc::new(MockClassifier::new());
    let pipeline = pipeline_with(classifier);

    let messages = vec![
        message("John@Acme.com", OWNER, "Mon, 01 Jan 2024 10:00:00 +0000", "t1"),
        message(" JOHN@acme.COM ", OWNER, "Tue, 02 Jan 2024 10:00:00 +0000", "t2"),
        message("jane@acme.com", OWNER, "Wed, 03 Jan 2024 10:00:00 +0000", "t3"),
    ];

    let output = pipeline.run(OWNER, &messages, OWNER).await.unwrap();

    let mut keys: Vec<&str> = output.contacts.iter().map(|c| c.email.as_str()).collect();
    keys.dedup();
    assert_eq!(keys.len(), output.contacts.len());
    for contact in &output.contacts {
        assert_eq!(contact.email, contact.email.trim().to_lowercase());
    }
    let john = output.contacts.iter().find(|c| c.email == "john@acme.com").unwrap();
    assert_eq!(john.interactions.len(), 2);
}

#[tokio::test]
async fn test_one_classifier_call_per_domain() {
    let classifier = Arc::new(MockClassifier::new().with_label("acme.com", "Manufacturing"));
    let pipeline = pipeline_with(classifier.clone());

    let messages: Vec<MessageMeta> = (1..=5)
        .map(|i| {
            message(
                &format!("person{}@acme.com", i),
                OWNER,
                &format!("0{} Jan 2024 10:00:00 +0000", i),
                "t1",
            )
        })
        .collect();

    let output = pipeline.run(OWNER, &messages, OWNER).await.unwrap();

    assert_eq!(classifier.call_count(), 1);
    let acme: Vec<_> =
        output.contacts.iter().filter(|c| c.email.ends_with("@acme.com")).collect();
    assert_eq!(acme.len(), 5);
    for contact in acme {
        assert_eq!(contact.industry.as_deref(), Some("Manufacturing"));
    }
}

#[tokio::test]
async fn test_replay_produces_identical_contacts() {
    let classifier = Arc::new(MockClassifier::new());
    let cache = Arc::new(MemoryDomainCache::new());
    let pipeline = ContactPipeline::new(fast_config(), classifier, cache);

    // Enough messages to span multiple waves, with mixed directions.
    let mut messages = Vec::new();
    for i in 0..120 {
        let day = (i % 27) + 1;
        let from = if i % 3 == 0 {
            OWNER.to_string()
        } else {
            format!("sender{}@corp{}.example", i % 7, i % 11)
        };
        let to = if i % 3 == 0 {
            format!("sender{}@corp{}.example", (i + 1) % 7, i % 11)
        } else {
            OWNER.to_string()
        };
        messages.push(message(
            &from,
            &to,
            &format!("{:02} Jan 2024 {:02}:00:00 +0000", day, i % 24),
            &format!("t{}", i % 13),
        ));
    }

    let first = pipeline.run(OWNER, &messages, OWNER).await.unwrap();
    let second = pipeline.run(OWNER, &messages, OWNER).await.unwrap();
    assert_eq!(first.contacts, second.contacts);
}

#[tokio::test]
async fn test_malformed_participants_dropped_not_fatal() {
    let classifier = Arc::new(MockClassifier::new());
    let pipeline = pipeline_with(classifier);

    let messages = vec![
        message("not-an-email", OWNER, "Mon, 01 Jan 2024 10:00:00 +0000", "t1"),
        message("ok@acme.com", OWNER, "not a date", "t2"),
        message("fine@acme.com", OWNER, "Wed, 03 Jan 2024 10:00:00 +0000", "t3"),
    ];

    let output = pipeline.run(OWNER, &messages, OWNER).await.unwrap();

    // Only the well-formed message produced a contact.
    assert_eq!(output.contacts.len(), 1);
    assert_eq!(output.contacts[0].email, "fine@acme.com");
}

#[tokio::test]
async fn test_spam_verdict_attached_to_newsletter() {
    let classifier = Arc::new(MockClassifier::new());
    let pipeline = pipeline_with(classifier);

    let messages: Vec<MessageMeta> = (1..=11)
        .map(|i| {
            message(
                "newsletter@mailchimp.com",
                OWNER,
                &format!("{:02} Jan 2024 {:02}:00:00 +0000", i, (i % 5) + 8),
                "t1",
            )
        })
        .collect();

    let output = pipeline.run(OWNER, &messages, OWNER).await.unwrap();
    let newsletter =
        output.contacts.iter().find(|c| c.email == "newsletter@mailchimp.com").unwrap();

    let spam = newsletter.spam.as_ref().unwrap();
    assert!(spam.is_spam);
    assert!(spam.confidence >= 55);
    // mailchimp.com resolves from the known-domain table, not the classifier.
    assert_eq!(newsletter.industry.as_deref(), Some("Marketing"));
}

#[tokio::test]
async fn test_velocity_bounds_and_serialization() {
    let classifier = Arc::new(MockClassifier::new());
    let pipeline = pipeline_with(classifier);

    let messages = vec![
        message("a@x.example", OWNER, "Mon, 01 Jan 2024 10:00:00 +0000", "t1"),
        message(OWNER, "a@x.example, b@y.example", "Tue, 02 Jan 2024 10:00:00 +0000", "t2"),
    ];

    let output = pipeline.run(OWNER, &messages, OWNER).await.unwrap();
    for contact in &output.contacts {
        assert!(contact.velocity.score <= 100);
    }

    // Output contract: the whole thing is JSON-serializable.
    let json = serde_json::to_value(&output).unwrap();
    let first = &json["contacts"][0];
    assert!(first["email"].is_string());
    assert!(first["interactions"].is_array());
    assert!(first["velocity"]["score"].is_number());
}
