//! Integration tests for tally-core
//!
//! These tests exercise the full rule → pattern → AI cascade the way the
//! host application's import and review flows drive it.

use tally_core::{
    ai::MockBackend,
    classifier::{Classifier, KNOWN_PATTERN_CONFIDENCE, USER_RULE_CONFIDENCE},
    db::Database,
    import::{read_spending_summary, read_transaction_records},
    AIClient, AdvisorEngine, Category, ClassificationSource, Error, MatchKind,
    OpenAICompatibleBackend, ProviderConfig, Severity, SpendingSummary,
};

/// A small transaction export in the shape the import flow produces
fn transactions_csv() -> &'static str {
    "description,amount\n\
     NETFLIX.COM,-15.49\n\
     UBER *TRIP HELP.UBER.COM,-23.10\n\
     WHOLEFDS SEA 10245,-87.45\n\
     ACME WIDGET SUPPLY,-49.99\n\
     ACME WIDGET SUPPLY,-12.50\n"
}

#[tokio::test]
async fn test_cascade_priority_end_to_end() {
    let db = Database::in_memory().unwrap();

    // The user has corrected NETFLIX to Entertainment in the past
    db.create_rule(
        "alice",
        "netflix",
        MatchKind::Contains,
        Category::Entertainment,
        0,
    )
    .unwrap();

    let ai = AIClient::Mock(MockBackend::new());
    let classifier = Classifier::new(&db, Some(&ai));

    // Tier 1: the user rule wins even though a known pattern also matches
    let result = classifier
        .classify("alice", "NETFLIX.COM", Some(-15.49))
        .await
        .unwrap();
    assert_eq!(result.category, Category::Entertainment);
    assert_eq!(result.source, ClassificationSource::UserRule);
    assert_eq!(result.confidence, USER_RULE_CONFIDENCE);

    // Tier 2: no user rule, known pattern answers
    let result = classifier
        .classify("alice", "UBER *TRIP HELP.UBER.COM", Some(-23.10))
        .await
        .unwrap();
    assert_eq!(result.category, Category::Transport);
    assert_eq!(result.source, ClassificationSource::KnownPattern);
    assert_eq!(result.confidence, KNOWN_PATTERN_CONFIDENCE);

    // Tier 3: unknown merchant goes to the provider
    let result = classifier
        .classify("alice", "ACME WIDGET SUPPLY", Some(-49.99))
        .await
        .unwrap();
    assert_eq!(result.source, ClassificationSource::AiFallback);
    assert!(result.confidence >= 0.0 && result.confidence <= 1.0);
}

#[tokio::test]
async fn test_import_batch_flow() {
    let db = Database::in_memory().unwrap();
    let ai = AIClient::Mock(MockBackend::new());
    let classifier = Classifier::new(&db, Some(&ai));

    let records = read_transaction_records(transactions_csv().as_bytes()).unwrap();
    assert_eq!(records.len(), 5);

    let batch = classifier.classify_batch("alice", &records).await.unwrap();

    assert_eq!(batch.processed, 5);
    // NETFLIX, UBER and WHOLEFDS hit the known-pattern library
    assert_eq!(batch.by_known_pattern, 3);
    // ACME goes to the provider once, then hits the session cache
    assert_eq!(batch.by_ai, 1);
    assert_eq!(batch.by_ai_cached, 1);
    assert_eq!(batch.uncategorized, 0);

    // Results come back in input order
    assert_eq!(batch.results[0].category, Category::Subscriptions);
    assert_eq!(batch.results[1].category, Category::Transport);
    assert_eq!(batch.results[2].category, Category::Groceries);
}

#[tokio::test]
async fn test_correction_retrains_the_cascade() {
    let db = Database::in_memory().unwrap();
    let classifier = Classifier::new(&db, None);

    // Initially the known-pattern library calls WHOLEFDS Groceries
    let before = classifier
        .classify("alice", "WHOLEFDS SEA 10245", None)
        .await
        .unwrap();
    assert_eq!(before.category, Category::Groceries);
    assert_eq!(before.source, ClassificationSource::KnownPattern);

    // The user reviews and recategorizes this merchant
    classifier
        .learn_rule("alice", "WHOLEFDS SEA 10245", Category::Shopping)
        .unwrap();

    let after = classifier
        .classify("alice", "WHOLEFDS SEA 10245", None)
        .await
        .unwrap();
    assert_eq!(after.category, Category::Shopping);
    assert_eq!(after.source, ClassificationSource::UserRule);
    assert_eq!(after.confidence, 1.0);

    // Other users are unaffected
    let other = classifier
        .classify("bob", "WHOLEFDS SEA 10245", None)
        .await
        .unwrap();
    assert_eq!(other.category, Category::Groceries);
}

#[tokio::test]
async fn test_unreachable_provider_downgrades() {
    let db = Database::in_memory().unwrap();

    // Nothing listens on port 1; the request fails fast and is downgraded
    let mut config = ProviderConfig::new("http://127.0.0.1:1");
    config.timeout_secs = 2;
    let backend = OpenAICompatibleBackend::new(&config).unwrap();
    let ai = AIClient::OpenAICompatible(backend);

    let classifier = Classifier::new(&db, Some(&ai));
    let result = classifier
        .classify("alice", "COMPLETELY UNKNOWN VENDOR", None)
        .await
        .unwrap();

    assert_eq!(result.category, Category::Uncategorized);
    assert_eq!(result.source, ClassificationSource::AiFallback);
    assert_eq!(result.confidence, 0.0);
}

#[tokio::test]
async fn test_classification_is_total_and_validates_user() {
    let db = Database::in_memory().unwrap();
    let classifier = Classifier::new(&db, None);

    // Empty user id is the caller's contract violation
    let err = classifier.classify("", "NETFLIX.COM", None).await.unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));

    // Everything else classifies to something
    for desc in ["", "###", "ZZZZZ NO SUCH MERCHANT", "NETFLIX.COM"] {
        let result = classifier.classify("alice", desc, None).await.unwrap();
        assert!(result.confidence >= 0.0 && result.confidence <= 1.0);
    }
}

#[test]
fn test_advisor_flow_from_summary_csv() {
    let csv = "category,amount\n\
               housing,1500\n\
               groceries,400\n\
               dining,700\n\
               subscriptions,80\n\
               shopping,600\n";
    let totals = read_spending_summary(csv.as_bytes()).unwrap();
    let summary = SpendingSummary::from_totals(4000.0, &totals);

    let engine = AdvisorEngine::new();
    let tips = engine.advise(&summary);

    // Dining is 17.5% of income and wants total 34.5%: both flagged
    assert!(tips.iter().any(|t| t.title.contains("dining")));
    assert!(tips.iter().any(|t| t.title.contains("wants")));
    // Ranked most severe first
    for pair in tips.windows(2) {
        assert!(pair[0].severity >= pair[1].severity);
    }
    assert!(tips.iter().all(|t| t.severity >= Severity::Info));
}
