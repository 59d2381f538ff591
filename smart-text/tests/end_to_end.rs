//! End-to-end fit and transform scenarios.
//!
//! Each test fits a column through the public API, persists the decision as
//! JSON and replays it the way a transform stage would.

use smart_text::analyzers::names::AFTER_COMMA_PATTERN;
use smart_text::prelude::*;
use smart_text::analyzers::Partition;
use std::sync::Arc;

fn dictionaries() -> Arc<NameDictionaries> {
    Arc::new(NameDictionaries::new(
        ["michael", "michelle", "roxanne", "ross"],
        [
            ("michael", 0.99),
            ("michelle", 0.01),
            ("roxanne", 0.02),
            ("ross", 0.97),
        ],
    ))
}

fn summarizer(config: SmartTextConfig) -> Arc<ColumnSummarizer> {
    Arc::new(ColumnSummarizer::new(config, NameDetector::new(dictionaries())))
}

fn partition(values: &[Option<&str>]) -> Partition {
    values.iter().map(|v| v.map(str::to_string)).collect()
}

#[tokio::test]
async fn test_name_column_scenario() {
    let runner = SmartTextRunner::new(summarizer(SmartTextConfig::default())).with_parallelism(2);
    let partitions = vec![
        partition(&[Some("Michael"), Some("Michelle")]),
        partition(&[Some("Roxanne"), Some("Ross"), None]),
    ];

    let report = runner.fit("customer", partitions).await.unwrap();
    let decision = &report.decisions[0];

    assert!(decision.treat_as_name);
    assert_eq!(decision.method, VectorizationMethod::Ignore);
    assert!(!decision.ordered_gender_strategies.is_empty());
    assert_eq!(
        &decision.ordered_gender_strategies[..2],
        &[GenderDetectStrategy::ByIndex(0), GenderDetectStrategy::ByIndex(-1)]
    );

    let sensitive = decision.sensitive.as_ref().unwrap();
    assert_eq!(sensitive.prob_name, 1.0);
    assert_eq!(sensitive.prob_male, 0.5);
    assert_eq!(sensitive.prob_female, 0.5);
    assert_eq!(sensitive.prob_other, 0.0);
    assert!(sensitive.action_taken);
    assert_eq!(sensitive.gender_results.len(), 5);
    assert_eq!(sensitive.gender_results[0].pct_unidentified, 0.0);
}

#[tokio::test]
async fn test_persisted_decision_replays_labels() {
    let summarizer = summarizer(SmartTextConfig::default());
    let runner = SmartTextRunner::new(Arc::clone(&summarizer));
    let report = runner
        .fit(
            "customer",
            vec![partition(&[Some("Michael"), Some("Michelle"), Some("Roxanne"), Some("Ross")])],
        )
        .await
        .unwrap();

    let json = report.decisions[0].to_json().unwrap();
    let restored = TextColumnDecision::from_json(&json).unwrap();
    assert_eq!(restored, report.decisions[0]);

    // A fresh detector stands in for a transform stage in another process.
    let detector = NameDetector::new(dictionaries());
    let label = detector.classify_and_label(Some("Ross Smith"), &restored).unwrap();
    assert!(label.is_name);
    assert_eq!(label.original_value, "Ross Smith");
    assert_eq!(label.gender, Gender::Male);
    assert_eq!(label.to_map()["gender"], "Male");

    let unknown = detector.classify_and_label(Some("Zed"), &restored).unwrap();
    assert_eq!(unknown.to_map()["gender"], "Unknown");

    assert!(detector.classify_and_label(None, &restored).is_none());
}

#[tokio::test]
async fn test_repeated_value_is_not_a_name() {
    let config = SmartTextConfig::builder().min_support(1).build().unwrap();
    let runner = SmartTextRunner::new(summarizer(config));
    let values: Vec<Option<&str>> = vec![Some("Michael"); 200];
    let partitions = values.chunks(64).map(partition).collect();

    let report = runner.fit("customer", partitions).await.unwrap();
    let decision = &report.decisions[0];
    assert!(!decision.treat_as_name);
    assert!(decision.sensitive.is_none());
    assert_eq!(decision.method, VectorizationMethod::Categorical);
    assert_eq!(decision.top_values, vec!["michael"]);
}

#[tokio::test]
async fn test_large_varied_name_column_is_detected() {
    let first = ["Michael", "Michelle", "Roxanne", "Ross"];
    let last = ["Smith", "Jones", "Doe", "Stone", "Okonkwo"];
    let values: Vec<Option<String>> = (0..160)
        .map(|i| Some(format!("{} {}", first[i % first.len()], last[(i / first.len()) % last.len()])))
        .collect();
    let partitions: Vec<Partition> = values.chunks(50).map(<[_]>::to_vec).collect();

    let summarizer = summarizer(SmartTextConfig::default());
    let whole = summarizer.summarize_partition(values.iter().map(Option::as_deref));
    assert!(whole.names.guard.approx_distinct.count() > 10);
    assert!(whole.names.guard.check(&summarizer.config().guard).passed());

    let report = SmartTextRunner::new(summarizer).fit("customer", partitions).await.unwrap();
    let decision = &report.decisions[0];
    assert!(decision.treat_as_name);
    assert_eq!(decision.method, VectorizationMethod::Ignore);
    assert!(decision.sensitive.as_ref().unwrap().action_taken);
}

#[tokio::test]
async fn test_high_cardinality_text() {
    let config = SmartTextConfig::builder()
        .max_cardinality(5)
        .min_length_std_dev(0.5)
        .build()
        .unwrap();
    let runner = SmartTextRunner::new(summarizer(config));

    let free_text: Vec<Option<String>> = (0..40)
        .map(|i| Some(format!("comment {} {}", i, "x".repeat(i % 7))))
        .collect();
    let report = runner.fit("comments", vec![free_text]).await.unwrap();
    assert_eq!(report.decisions[0].method, VectorizationMethod::FreeText);
    assert!(report.decisions[0].top_values.is_empty());

    let identifiers: Vec<Option<String>> =
        (0..40).map(|i| Some(format!("id{:04}", i))).collect();
    let report = runner.fit("ids", vec![identifiers]).await.unwrap();
    assert_eq!(report.decisions[0].method, VectorizationMethod::Ignore);
    assert!(!report.decisions[0].treat_as_name);
}

#[tokio::test]
async fn test_empty_training_data_fails() {
    let runner = SmartTextRunner::new(summarizer(SmartTextConfig::default()));
    let result = runner.fit("customer", vec![partition(&[])]).await;
    assert!(matches!(result, Err(AnalyzerError::NoData)));
}

#[test]
fn test_ignore_nulls_off_counts_absent_as_empty() {
    let config = SmartTextConfig::builder()
        .ignore_nulls(false)
        .sensitive_feature_mode(SensitiveFeatureMode::DetectOnly)
        .build()
        .unwrap();
    let summarizer = summarizer(config);
    let summary = summarizer.summarize_partition([
        Some("Michael"),
        Some("Michelle"),
        Some("Roxanne"),
        Some("Ross"),
        None,
    ]);

    assert_eq!(summary.names.row_count(), 5);
    assert!((summary.names.dictionary.value() - 0.8).abs() < 1e-12);

    let decision = summarizer.decide("customer", &summary).unwrap();
    // The empty row fails the character length check for 1 of 5 rows: 0.8 > 0.75.
    assert!(decision.treat_as_name);
    let sensitive = decision.sensitive.unwrap();
    assert!(!sensitive.action_taken);
    assert!((sensitive.prob_other - 0.2).abs() < 1e-12);
}

#[test]
fn test_corrupt_strategy_metadata_is_fatal() {
    let decision = TextColumnDecision {
        column: "customer".to_string(),
        key: None,
        method: VectorizationMethod::Ignore,
        top_values: vec![],
        treat_as_name: true,
        ordered_gender_strategies: vec![
            GenderDetectStrategy::by_regex(AFTER_COMMA_PATTERN).unwrap(),
            GenderDetectStrategy::FindHonorific,
        ],
        sensitive: None,
    };
    let json = decision.to_json().unwrap();
    assert_eq!(TextColumnDecision::from_json(&json).unwrap(), decision);

    let corrupt = json.replace("FindHonorific()", "FindHonorific");
    assert!(TextColumnDecision::from_json(&corrupt).is_err());
}
