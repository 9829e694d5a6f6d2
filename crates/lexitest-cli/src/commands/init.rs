//! The `lexitest init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("corpus.toml").exists() {
        println!("corpus.toml already exists, skipping.");
    } else {
        std::fs::write("corpus.toml", SAMPLE_CORPUS)?;
        println!("Created corpus.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: lexitest validate --corpus corpus.toml");
    println!("  2. Run: lexitest assemble --corpus corpus.toml --count 5");
    println!("  3. Import your own sheets: lexitest import --kind vocab --file vocab.csv --corpus corpus.toml");

    Ok(())
}

const SAMPLE_CORPUS: &str = r#"[corpus]
name = "Starter corpus"
description = "A small example corpus to get going"

[[lessons]]
title = "Bài 1"
description = "Greetings"
tag = "bai-1"

[[vocab]]
hanzi = "你好"
pinyin = "nǐ hǎo"
meaning = "xin chào"
tag = "bai-1"

[[vocab]]
hanzi = "谢谢"
pinyin = "xiè xie"
meaning = "cảm ơn"
tag = "bai-1"

[[sentences]]
lesson = "bai-1"
source = "你好吗？"
target = "Bạn khỏe không?"

[[sentences]]
lesson = "bai-1"
source = "今天天气不错。"
target = "Hôm nay thời tiết đẹp."
options = ["Hôm nay thời tiết đẹp.", "Hôm nay trời mưa.", "Tôi không biết."]
correct_answer = "Hôm nay thời tiết đẹp."

[[reading_units]]
title = "Unit 1"
source_paragraph = "你好。今天天气不错！我们去公园吧。"
target_paragraph = "Xin chào. Hôm nay thời tiết đẹp! Chúng ta đi công viên nhé."
tag = "bai-1"

[[reading_questions]]
unit = "Unit 1"
prompt = "天气怎么样？"
options = ["đẹp", "xấu", "mưa"]
kind = "mcq"
difficulty = "easy"
answer = "đẹp"

[[reading_questions]]
unit = "Unit 1"
prompt = "Dịch: 我们去公园吧"
kind = "translate"
difficulty = "medium"
answer = { text = "Chúng ta đi công viên nhé" }
"#;
