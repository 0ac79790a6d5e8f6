//! The `quizsmith init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("quizsmith.toml").exists() {
        println!("quizsmith.toml already exists, skipping.");
    } else {
        std::fs::write("quizsmith.toml", SAMPLE_CONFIG)?;
        println!("Created quizsmith.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit quizsmith.toml with your API keys (or export GROQ_API_KEY)");
    println!("  2. Run: quizsmith generate --subject \"Linear Algebra\" --difficulty beginner");
    println!("  3. Run: quizsmith take <test-id>");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizsmith configuration

[providers.groq]
type = "groq"
api_key = "${GROQ_API_KEY}"

[providers.openai]
type = "openai"
api_key = "${OPENAI_API_KEY}"

default_provider = "groq"
default_model = "llama3-70b-8192"
default_temperature = 0.5
data_dir = "./quizsmith-data"
"#;
