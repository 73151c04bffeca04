use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::io::AsyncReadExt;

use markup_validate::config::Config;
use markup_validate::{AnnotatedFinding, ValidationError, Validator};

/// Read a document from a path, or stdin for `-`
async fn read_source(path: &Path) -> Result<(String, String)> {
    if path == Path::new("-") {
        let mut document = String::new();
        tokio::io::stdin()
            .read_to_string(&mut document)
            .await
            .context("Failed to read stdin")?;
        return Ok(("<stdin>".to_string(), document));
    }

    let document = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok((path.display().to_string(), document))
}

fn print_findings(name: &str, findings: &[AnnotatedFinding]) {
    for finding in findings {
        let line = finding.line.map_or("?".to_string(), |l| l.to_string());
        let column = finding.column.map_or("?".to_string(), |c| c.to_string());
        println!("{name}:{line}:{column}: error: {}", finding.message);
        if let Some(context) = &finding.context {
            println!("    {}", context.trim_end());
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Parse configuration from command line and config file
    let config = Config::from_args_and_env()?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    let validator = Validator::from_config(&config)?;
    log::debug!(
        "Validating against {} with {} ignored messages",
        config.endpoint,
        validator.ignore().len()
    );

    let sources = if config.files.is_empty() {
        vec![PathBuf::from("-")]
    } else {
        config.files.clone()
    };

    let mut failed = 0usize;
    for source in &sources {
        let (name, document) = read_source(source).await?;
        match validator.validate(&document).await {
            Ok(()) => println!("{name}: ok"),
            Err(ValidationError::ValidationFailed { findings }) => {
                failed += 1;
                print_findings(&name, &findings);
            }
            Err(e) => {
                failed += 1;
                eprintln!("{name}: {e}");
            }
        }
    }

    if failed > 0 {
        log::info!("{failed} of {} documents failed validation", sources.len());
        std::process::exit(1);
    }

    Ok(())
}
