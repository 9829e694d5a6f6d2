//! Sentence synthesis against the in-memory store.
//!
//! Exercises the synthesizer's limit handling, lesson-grouping cache, and
//! synthetic-id shape with real segmentation over stored reading units.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use lexitest_core::model::ReadingUnit;
use lexitest_core::synthesize::SentenceSynthesizer;
use lexitest_core::traits::CorpusProvider;
use lexitest_corpus::MemoryStore;

fn unit(title: &str, tag: Option<&str>, source: &str, target: &str, age_secs: i64) -> ReadingUnit {
    ReadingUnit {
        id: Uuid::new_v4(),
        title: title.into(),
        source_paragraph: source.into(),
        target_paragraph: target.into(),
        tag: tag.map(str::to_string),
        created_at: Utc::now() - chrono::Duration::seconds(age_secs),
    }
}

fn store_with_units(units: Vec<ReadingUnit>) -> Arc<MemoryStore> {
    let store = MemoryStore::new();
    for u in units {
        store.insert_reading_unit(u);
    }
    Arc::new(store)
}

#[tokio::test]
async fn synthesizes_aligned_pairs_from_units() {
    let store = store_with_units(vec![unit(
        "Unit 1",
        Some("bai-1"),
        "你好。今天天气不错！",
        "Xin chào. Hôm nay thời tiết đẹp!",
        0,
    )]);

    let generated = SentenceSynthesizer::new(store).synthesize(100).await.unwrap();
    assert_eq!(generated.len(), 2);
    assert_eq!(generated[0].source_text, "你好");
    assert_eq!(generated[0].target_text, "Xin chào");
    assert_eq!(generated[0].lesson.tag.as_deref(), Some("bai-1"));
}

#[tokio::test]
async fn stops_exactly_at_limit_mid_unit() {
    // One unit yields three pairs; a limit of 2 must cut it off mid-unit.
    let store = store_with_units(vec![unit(
        "Unit 1",
        None,
        "一。二。三。",
        "one. two. three.",
        0,
    )]);

    let generated = SentenceSynthesizer::new(store.clone())
        .synthesize(2)
        .await
        .unwrap();
    assert_eq!(generated.len(), 2);

    // And across units: 3 units x 2 pairs, limit 5.
    let store = store_with_units(
        (0..3)
            .map(|i| {
                unit(
                    &format!("Unit {i}"),
                    None,
                    "你好。再见。",
                    "hello. goodbye.",
                    i,
                )
            })
            .collect(),
    );
    let generated = SentenceSynthesizer::new(store).synthesize(5).await.unwrap();
    assert_eq!(generated.len(), 5);
}

#[tokio::test]
async fn zero_limit_short_circuits() {
    let store = store_with_units(vec![unit("Unit 1", None, "你好。", "hello.", 0)]);
    let generated = SentenceSynthesizer::new(store).synthesize(0).await.unwrap();
    assert!(generated.is_empty());
}

#[tokio::test]
async fn repeated_tags_reuse_one_lesson_group() {
    let store = store_with_units(vec![
        unit("Unit A", Some("hsk-1"), "你好。", "hello.", 2),
        unit("Unit B", Some("hsk-1"), "再见。", "goodbye.", 1),
        unit("Unit C", None, "谢谢。", "thanks.", 0),
    ]);

    let generated = SentenceSynthesizer::new(store.clone())
        .synthesize(100)
        .await
        .unwrap();
    assert_eq!(generated.len(), 3);

    // Two tagged units share one grouping; the untagged unit gets its own
    // keyed by title.
    let lessons = store.lessons();
    assert_eq!(lessons.len(), 2);
    assert!(lessons.iter().any(|l| l.tag.as_deref() == Some("hsk-1")));
    assert!(lessons.iter().any(|l| l.title == "Unit C"));
}

#[tokio::test]
async fn synthetic_ids_are_per_pass_ordinals() {
    let store = store_with_units(vec![unit("Unit 1", None, "一。二。", "one. two.", 0)]);

    let generated = SentenceSynthesizer::new(store.clone())
        .synthesize(10)
        .await
        .unwrap();
    let unit_id = store.recent_reading_units(1).await.unwrap()[0].id;

    assert_eq!(generated[0].synthetic_id, format!("gen_{unit_id}_0"));
    assert_eq!(generated[1].synthetic_id, format!("gen_{unit_id}_1"));
}

#[tokio::test]
async fn scan_cap_bounds_unit_reads() {
    // Ten units, but a scan cap of 1: only the newest unit contributes.
    let store = store_with_units(
        (0..10)
            .map(|i| unit(&format!("Unit {i}"), None, "你好。", "hello.", i))
            .collect(),
    );

    let generated = SentenceSynthesizer::new(store)
        .with_max_unit_scan(1)
        .synthesize(100)
        .await
        .unwrap();
    assert_eq!(generated.len(), 1);
    assert_eq!(generated[0].lesson.title, "Unit 0");
}
