//! The `recital init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create recital.toml
    if std::path::Path::new("recital.toml").exists() {
        println!("recital.toml already exists, skipping.");
    } else {
        std::fs::write("recital.toml", SAMPLE_CONFIG)?;
        println!("Created recital.toml");
    }

    // Create example drill set
    std::fs::create_dir_all("drills")?;
    let example_path = std::path::Path::new("drills/example.toml");
    if example_path.exists() {
        println!("drills/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_DRILL_SET)?;
        println!("Created drills/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Tune thresholds in recital.toml if needed");
    println!("  2. Run: recital validate --drills drills/example.toml");
    println!("  3. Run: recital batch --drills drills/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# recital configuration

output_dir = "./recital-results"

[assessment]
strategy = "greedy"
correct_threshold = 0.7
similar_threshold = 0.5
exact_threshold = 0.95
window_before = 3
window_after = 3
position_bonus = 0.05
position_bonus_distance = 1
accuracy_weight = 0.6
completeness_weight = 0.4
extra_word_ratio = 0.2
"#;

const EXAMPLE_DRILL_SET: &str = r#"[drill_set]
id = "example"
name = "Example Drill Set"
description = "A few sentences to get started"
default_min_score = 75

[[drills]]
id = "greeting"
description = "Perfect reading"
reference = "Hello, how are you?"
transcript = "hello how are you"
tags = ["basics"]

[[drills]]
id = "weather"
description = "One word dropped"
reference = "The weather is lovely today."
transcript = "the weather is today"
tags = ["basics"]

[[drills]]
id = "homophones"
description = "Recognizer picked a homophone"
reference = "I want to buy two tickets."
transcript = "i want too by to tickets"
min_score = 60
tags = ["homophones"]
"#;
