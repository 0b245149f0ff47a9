use std::sync::Arc;

use glossa_config::{GroupingKind, OrderingKind};
use glossa_engine::FeatureSet;
use glossa_types::{DictionaryObject, EntryType, ExternalContent, MonolingualEntry};
use tokio_util::sync::CancellationToken;

use super::*;
use crate::aggregation::group::CONSOLIDATED_GROUP;
use crate::aggregation::{MergeService, SimilarElementsMerger};
use crate::error::MergeError;
use crate::response::QueryStatus;

#[tokio::test]
async fn one_engine_answers_and_one_fails() {
    let good = ScriptedEngine::new(
        "good",
        &["en-de"],
        Behavior::Answer(answer(vec![bilingual("eat", "essen", EntryType::Verb)])),
    );
    let bad = ScriptedEngine::new("bad", &["en-de"], Behavior::Fail("HTTP 503".into()));
    let service = service(&[good, bad]);

    let response = service.respond_raw("eat", "en-de", "").await;

    assert_eq!(response.status, QueryStatus::Ok);
    assert_eq!(response.query, "eat");
    assert_eq!(response.groups.len(), 1);
    assert_eq!(response.groups[0].key, "en-de");
    assert_eq!(response.groups[0].title, "English -> German");
    assert_eq!(response.groups[0].entries.len(), 1);
    assert_eq!(response.groups[0].entries[0].score, 1.0);

    let steps = &response.statistics.steps;
    assert_eq!(steps.len(), 2);
    let failed: Vec<_> = response.statistics.failed_steps().collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].engine_name, "bad");
    assert!(!failed[0].error.as_deref().unwrap_or_default().is_empty());
    assert!(response.notices.is_empty());
}

#[tokio::test]
async fn dictionary_without_engines_is_an_empty_group() {
    let leo = ScriptedEngine::new("leo", &["en-de"], Behavior::Empty);
    let service = service(&[leo.clone()]);

    let response = service.respond_raw("manger", "fr-de", "").await;

    assert!(response.is_ok());
    assert_eq!(response.groups.len(), 1);
    assert_eq!(response.groups[0].key, "fr-de");
    assert!(response.groups[0].entries.is_empty());
    assert!(response.statistics.steps.is_empty());
    assert_eq!(response.notices, ["no matching engines for fr-de"]);
    assert_eq!(leo.calls(), 0);
}

#[tokio::test]
async fn all_engines_failing_is_still_ok() {
    let first = ScriptedEngine::new("first", &["en-de"], Behavior::Fail("down".into()));
    let second = ScriptedEngine::new("second", &["en<>de"], Behavior::Empty);
    let service = service(&[first, second]);

    let response = service.respond_raw("eat", "en-de", "").await;

    assert_eq!(response.status, QueryStatus::Ok);
    assert!(response.groups[0].entries.is_empty());
    assert_eq!(response.statistics.failed_steps().count(), 2);
    assert!(response.statistics.steps.iter().all(|s| s.error.is_some()));
}

#[tokio::test]
async fn malformed_requests_are_reported_as_such() {
    let engine = ScriptedEngine::new("leo", &["en-de"], Behavior::Empty);
    let service = service(&[engine.clone()]);

    let bad_dictionary = service.respond_raw("eat", "en_de", "").await;
    let empty_query = service.respond_raw("   ", "en-de", "").await;

    assert!(matches!(bad_dictionary.status, QueryStatus::MalformedQuery { .. }));
    assert!(matches!(empty_query.status, QueryStatus::MalformedQuery { .. }));
    assert_eq!(engine.calls(), 0);
}

#[tokio::test]
async fn raw_request_honours_cancellation() {
    let engine = ScriptedEngine::new(
        "leo",
        &["en-de"],
        Behavior::Answer(answer(vec![bilingual("eat", "essen", EntryType::Verb)])),
    );
    let service = service(&[engine.clone()]);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let cancelled = service
        .respond_raw_with_cancel("eat", "en-de", "", &cancel)
        .await;
    let malformed = service
        .respond_raw_with_cancel("eat", "en_de", "", &cancel)
        .await;

    assert!(cancelled.is_ok());
    assert_eq!(cancelled.statistics.failed_steps().count(), 1);
    assert!(matches!(malformed.status, QueryStatus::MalformedQuery { .. }));
    assert_eq!(engine.calls(), 0);
}

#[tokio::test]
async fn duplicates_from_different_engines_are_merged() {
    let entries = vec![
        bilingual("eat", "essen", EntryType::Verb),
        bilingual("eat", "fressen", EntryType::Verb),
    ];
    let leo = ScriptedEngine::new("leo", &["en-de"], Behavior::Answer(answer(entries)));
    let reverse = answer(vec![bilingual("eat", "essen", EntryType::Verb).inverted()]);
    let beolingus = ScriptedEngine::new("beolingus", &["de<>en"], Behavior::Answer(reverse));
    let service = service(&[leo, beolingus]);

    let response = service.respond_raw("eat", "en-de", "").await;

    let group = &response.groups[0];
    let targets: Vec<_> = group
        .entries
        .iter()
        .map(|e| e.entry.target.general_form.as_str())
        .collect();
    assert_eq!(targets, ["essen", "fressen"]);
}

#[tokio::test]
async fn relevance_puts_the_closest_entry_first() {
    let entries = vec![
        bilingual("eating", "das Essen", EntryType::Noun),
        bilingual("meat", "Fleisch", EntryType::Noun),
        bilingual("eat", "essen", EntryType::Verb),
    ];
    let engine = ScriptedEngine::new("leo", &["en-de"], Behavior::Answer(answer(entries)));
    let service = service(&[engine]);

    let ordered = service.respond_raw("eat", "en-de", "").await;
    let request = service
        .request("eat")
        .dictionary("en-de".parse().unwrap())
        .ordering(OrderingKind::PassThrough)
        .build()
        .unwrap();
    let unordered = service.respond(&request).await;

    let sources = |response: &crate::QueryResponse| -> Vec<String> {
        response.groups[0]
            .entries
            .iter()
            .map(|e| e.entry.source.general_form.clone())
            .collect()
    };
    assert_eq!(sources(&ordered), ["eat", "meat", "eating"]);
    assert_eq!(sources(&unordered), ["eating", "meat", "eat"]);
    let scores: Vec<f64> = ordered.groups[0].entries.iter().map(|e| e.score).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn grouping_modes_are_selectable_per_request() {
    let en_de = ScriptedEngine::new(
        "leo",
        &["en-de"],
        Behavior::Answer(answer(vec![
            bilingual("eat", "essen", EntryType::Verb),
            bilingual("eat", "Essen", EntryType::Noun),
        ])),
    );
    let en_fr = ScriptedEngine::new(
        "woxikon",
        &["en-fr"],
        Behavior::Answer(answer(vec![BilingualEntry::new(
            DictionaryObject::new(lang("en"), "eat"),
            DictionaryObject::new(lang("fr"), "manger"),
            EntryType::Verb,
        )])),
    );
    let service = service(&[en_de, en_fr]);
    let request = |grouping| {
        service
            .request("eat")
            .dictionaries(BilingualDictionary::parse_list("en-de,en-fr").unwrap())
            .grouping(grouping)
            .build()
            .unwrap()
    };

    let by_dictionary = service.respond(&request(GroupingKind::ByDictionary)).await;
    let consolidated = service.respond(&request(GroupingKind::Consolidated)).await;
    let by_type = service.respond(&request(GroupingKind::EntryType)).await;

    let keys = |response: &crate::QueryResponse| -> Vec<String> {
        response.groups.iter().map(|g| g.key.clone()).collect()
    };
    assert_eq!(keys(&by_dictionary), ["en-de", "en-fr"]);
    assert_eq!(keys(&consolidated), [CONSOLIDATED_GROUP]);
    assert_eq!(consolidated.groups[0].entries.len(), 3);
    assert_eq!(keys(&by_type), ["verbs", "nouns"]);
    assert_eq!(by_type.groups[0].title, "Verbs");
    assert_eq!(by_type.groups[0].entries.len(), 2);
}

#[tokio::test]
async fn secondary_results_are_collected_and_merged() {
    let en = lang("en");
    let payload = EngineQueryResult::new()
        .with_monolingual_entry(MonolingualEntry::new(
            DictionaryObject::new(en.clone(), "eaten"),
            EntryType::Verb,
        ))
        .with_monolingual_entry(MonolingualEntry::new(
            DictionaryObject::new(en.clone(), "eat"),
            EntryType::Verb,
        ))
        .with_similar_recommendation(DictionaryObject::new(en.clone(), "meat"))
        .with_external_content(ExternalContent {
            title: "eat vs. feed".to_string(),
            description: None,
            link: "https://forum.example/1".to_string(),
        });
    let features = FeatureSet::new().with_language(en.clone());
    let first = ScriptedEngine::with_features("first", features.clone(), Behavior::Answer(payload.clone()));
    let second = ScriptedEngine::with_features("second", features, Behavior::Answer(payload));
    let service = service(&[first, second]);

    let response = service.respond_raw("eat", "", "en").await;

    assert!(response.groups.is_empty());
    let forms: Vec<_> = response
        .monolingual_entries
        .iter()
        .map(|e| e.content.general_form.as_str())
        .collect();
    assert_eq!(forms, ["eat", "eaten"]);
    assert_eq!(response.similar_recommendations.len(), 1);
    assert_eq!(response.external_contents.len(), 1);
    assert_eq!(response.statistics.steps.len(), 2);
}

#[tokio::test]
async fn pass_through_leaves_monolingual_entries_in_place() {
    let en = lang("en");
    let payload = EngineQueryResult::new()
        .with_monolingual_entry(MonolingualEntry::new(
            DictionaryObject::new(en.clone(), "eaten"),
            EntryType::Verb,
        ))
        .with_monolingual_entry(MonolingualEntry::new(
            DictionaryObject::new(en.clone(), "eat"),
            EntryType::Verb,
        ));
    let features = FeatureSet::new().with_language(en);
    let engine = ScriptedEngine::with_features("wordnet", features, Behavior::Answer(payload));
    let service = service(&[engine]);
    let request = |ordering| {
        service
            .request("eat")
            .language(lang("en"))
            .ordering(ordering)
            .build()
            .unwrap()
    };

    let ranked = service.respond(&request(OrderingKind::Relevance)).await;
    let unranked = service.respond(&request(OrderingKind::PassThrough)).await;

    let forms = |response: &crate::QueryResponse| -> Vec<String> {
        response
            .monolingual_entries
            .iter()
            .map(|e| e.content.general_form.clone())
            .collect()
    };
    assert_eq!(forms(&ranked), ["eat", "eaten"]);
    assert_eq!(forms(&unranked), ["eaten", "eat"]);
}

#[tokio::test]
async fn repeated_request_is_served_from_cache() {
    let engine = ScriptedEngine::new(
        "leo",
        &["en-de"],
        Behavior::Answer(answer(vec![bilingual("eat", "essen", EntryType::Verb)])),
    );
    let service = service(&[engine.clone()]);

    let first = service.respond_raw("eat", "en-de", "").await;
    let second = service.respond_raw("eat", "en-de", "").await;

    assert_eq!(engine.calls(), 1);
    assert!(!first.statistics.steps[0].from_cache);
    assert!(second.statistics.steps[0].from_cache);
    assert_eq!(first.groups, second.groups);
    assert_ne!(first.request_id, second.request_id);
}

struct BrokenMerger;

impl SimilarElementsMerger<BilingualEntry> for BrokenMerger {
    fn name(&self) -> &'static str {
        "broken"
    }

    fn merge(&self, mut elements: Vec<BilingualEntry>) -> Result<Vec<BilingualEntry>, MergeError> {
        let copy = elements.clone();
        elements.extend(copy);
        Ok(elements)
    }
}

#[tokio::test]
async fn stage_defects_surface_as_internal_errors() {
    let engine = ScriptedEngine::new(
        "leo",
        &["en-de"],
        Behavior::Answer(answer(vec![bilingual("eat", "essen", EntryType::Verb)])),
    );
    let config = test_config();
    let mut merger = MergeService::new();
    merger
        .register::<BilingualEntry>(Arc::new(BrokenMerger))
        .unwrap();
    let pipeline = Pipeline::from_config(
        &config,
        Arc::new(NormalizerSet::new()),
        Arc::new(StepResultCache::unbounded()),
    )
    .with_merge_service(merger);
    let service = QueryService::new(registry(&[engine]), pipeline, config.aggregation.clone());
    let request = service
        .request("eat")
        .dictionary("en-de".parse().unwrap())
        .build()
        .unwrap();

    assert!(service.plan_and_execute(&request).await.is_err());
    let response = service.respond(&request).await;
    assert!(matches!(response.status, QueryStatus::InternalError { .. }));
}

#[tokio::test]
async fn cancelled_request_reports_failed_steps() {
    let engine = ScriptedEngine::new(
        "leo",
        &["en-de"],
        Behavior::Answer(answer(vec![bilingual("eat", "essen", EntryType::Verb)])),
    );
    let service = service(&[engine.clone()]);
    let request = service
        .request("eat")
        .dictionary("en-de".parse().unwrap())
        .build()
        .unwrap();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let response = service.respond_with_cancel(&request, &cancel).await;

    assert!(response.is_ok());
    assert_eq!(response.statistics.failed_steps().count(), 1);
    assert_eq!(engine.calls(), 0);
}

#[tokio::test]
async fn concurrent_configuration_gives_the_same_response() {
    let engines = || {
        [
            ScriptedEngine::new(
                "slow",
                &["en-de"],
                Behavior::Sleep(
                    std::time::Duration::from_millis(50),
                    answer(vec![bilingual("eat", "essen", EntryType::Verb)]),
                ),
            ),
            ScriptedEngine::new(
                "fast",
                &["en-de"],
                Behavior::Answer(answer(vec![bilingual("eat", "fressen", EntryType::Verb)])),
            ),
        ]
    };
    let mut concurrent = test_config();
    concurrent.executor.execution = glossa_config::ExecutionKind::Concurrent;

    let linear = service(&engines()).respond_raw("eat", "en-de", "").await;
    let parallel = service_with(&engines(), &concurrent)
        .respond_raw("eat", "en-de", "")
        .await;

    assert_eq!(linear.groups, parallel.groups);
    let engines: Vec<_> = parallel
        .statistics
        .steps
        .iter()
        .map(|s| s.engine_name.as_str())
        .collect();
    assert_eq!(engines, ["slow", "fast"]);
}

#[tokio::test]
async fn response_serializes_with_flat_status() {
    let engine = ScriptedEngine::new(
        "leo",
        &["en-de"],
        Behavior::Answer(answer(vec![bilingual("eat", "essen", EntryType::Verb)])),
    );
    let response = service(&[engine]).respond_raw("eat", "en-de", "").await;

    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["status"], "ok");
    assert_eq!(json["groups"][0]["key"], "en-de");
    assert_eq!(json["groups"][0]["entries"][0]["entry"]["target"]["general_form"], "essen");
    assert!(json["statistics"]["steps"][0]["duration_ms"].is_number());
}
