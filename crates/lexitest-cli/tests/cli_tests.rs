//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn lexitest() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("lexitest").unwrap()
}

#[test]
fn init_creates_corpus() {
    let dir = TempDir::new().unwrap();

    lexitest()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created corpus.toml"));

    assert!(dir.path().join("corpus.toml").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    lexitest().current_dir(dir.path()).arg("init").assert().success();
    lexitest()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn validate_starter_corpus() {
    let dir = TempDir::new().unwrap();
    lexitest().current_dir(dir.path()).arg("init").assert().success();

    lexitest()
        .current_dir(dir.path())
        .args(["validate", "--corpus", "corpus.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 vocab"))
        .stdout(predicate::str::contains("All corpus files valid"));
}

#[test]
fn validate_nonexistent_file() {
    lexitest()
        .args(["validate", "--corpus", "nonexistent.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn generate_derives_sentences_from_units() {
    let dir = TempDir::new().unwrap();
    lexitest().current_dir(dir.path()).arg("init").assert().success();

    lexitest()
        .current_dir(dir.path())
        .args(["generate", "--corpus", "corpus.toml", "--limit", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 sentence(s) generated"));
}

#[test]
fn assemble_writes_answer_free_items() {
    let dir = TempDir::new().unwrap();
    lexitest().current_dir(dir.path()).arg("init").assert().success();

    lexitest()
        .current_dir(dir.path())
        .args([
            "assemble",
            "--corpus",
            "corpus.toml",
            "--count",
            "4",
            "--seed",
            "42",
            "--output",
            "quiz.json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("item(s) assembled"));

    let quiz: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("quiz.json")).unwrap())
            .unwrap();
    let items = quiz["items"].as_array().unwrap();
    assert!(!items.is_empty() && items.len() <= 4);
    for item in items {
        assert!(item.get("correctAnswer").is_none());
        assert!(item.get("answer").is_none());
        assert!(item["promptText"].is_string());
    }
}

/// A fully-correct answer set built from the starter corpus should grade
/// to 100% in a separate process, which also pins the loader's stable ids.
#[test]
fn assemble_then_grade_round_trip() {
    let dir = TempDir::new().unwrap();
    lexitest().current_dir(dir.path()).arg("init").assert().success();

    lexitest()
        .current_dir(dir.path())
        .args([
            "assemble",
            "--corpus",
            "corpus.toml",
            "--count",
            "6",
            "--seed",
            "7",
            "--output",
            "quiz.json",
        ])
        .assert()
        .success();

    let quiz: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("quiz.json")).unwrap())
            .unwrap();

    // The starter corpus is small enough to key correct answers by prompt.
    let answer_for = |prompt: &str| -> &str {
        match prompt {
            "xin chào" => "你好",
            "cảm ơn" => "谢谢",
            "你好吗？" => "Bạn khỏe không?",
            "今天天气不错。" => "Hôm nay thời tiết đẹp.",
            "天气怎么样？" => "đẹp",
            "Dịch: 我们去公园吧" => "Chúng ta đi công viên nhé",
            other => panic!("unexpected prompt in starter corpus: {other}"),
        }
    };

    let answers: Vec<serde_json::Value> = quiz["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| {
            serde_json::json!({
                "itemId": item["id"],
                "kind": item["kind"],
                "submittedText": answer_for(item["promptText"].as_str().unwrap()),
            })
        })
        .collect();
    std::fs::write(
        dir.path().join("answers.json"),
        serde_json::to_string_pretty(&answers).unwrap(),
    )
    .unwrap();

    lexitest()
        .current_dir(dir.path())
        .args([
            "grade",
            "--corpus",
            "corpus.toml",
            "--answers",
            "answers.json",
            "--output",
            "report.json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 100%"));

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("report.json")).unwrap())
            .unwrap();
    assert_eq!(report["score"], 100);
    assert_eq!(report["incorrect"], 0);
    assert_eq!(report["total"], 6);
}

#[test]
fn import_vocab_csv_into_new_corpus() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("vocab.csv"),
        "中文,拼音,越南语,source_tag\n水,shuǐ,nước,bai-2\n火,huǒ,lửa,bai-2\n,,\n",
    )
    .unwrap();

    lexitest()
        .current_dir(dir.path())
        .args([
            "import",
            "--kind",
            "vocab",
            "--file",
            "vocab.csv",
            "--corpus",
            "imported.toml",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 of 3 row(s), 1 skipped"));

    lexitest()
        .current_dir(dir.path())
        .args(["validate", "--corpus", "imported.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 vocab"));
}

#[test]
fn import_overwrite_replaces_section() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("first.csv"), "zh,vi\n一,một\n二,hai\n").unwrap();
    std::fs::write(dir.path().join("second.csv"), "zh,vi\n三,ba\n").unwrap();

    let import = |file: &str, mode: &str| {
        lexitest()
            .current_dir(dir.path())
            .args([
                "import", "--kind", "vocab", "--file", file, "--corpus", "c.toml", "--mode", mode,
            ])
            .assert()
            .success();
    };

    import("first.csv", "append");
    import("second.csv", "overwrite");

    lexitest()
        .current_dir(dir.path())
        .args(["validate", "--corpus", "c.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 vocab"));
}

#[test]
fn import_rejects_unknown_kind() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("x.csv"), "zh\n一\n").unwrap();

    lexitest()
        .current_dir(dir.path())
        .args([
            "import", "--kind", "grammar", "--file", "x.csv", "--corpus", "c.toml",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown import kind"));
}

#[test]
fn stats_aggregates_saved_reports() {
    let dir = TempDir::new().unwrap();
    let reports = dir.path().join("reports");
    std::fs::create_dir_all(&reports).unwrap();

    let report = serde_json::json!({
        "sessionId": "6f736dd1-6b54-4d72-9a46-6a33b0caf0b4",
        "score": 50,
        "total": 4,
        "correct": 2,
        "incorrect": 2,
        "breakdown": {
            "vocab": { "total": 4, "correct": 2 },
            "sentence": { "total": 0, "correct": 0 },
            "reading": { "total": 0, "correct": 0 }
        },
        "results": []
    });
    std::fs::write(reports.join("one.json"), report.to_string()).unwrap();

    lexitest()
        .args(["stats", "--reports"])
        .arg(&reports)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 report(s), 4 item(s), 50% accuracy"));
}
