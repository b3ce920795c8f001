use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::cli::ui;
use epubdiff::config::JudgeConfig;
use epubdiff::errors::HarnessError;
use epubdiff::implementations::AnthropicJudge;
use epubdiff::judge::compare_screenshots;
use epubdiff::traits::JudgmentService;

/// Screenshot judgment command. Returns the process exit code for the
/// verdict.
///
/// Inputs and the credential are checked before any request is made.
pub async fn execute(
    reference: &Path,
    candidate: &Path,
    output: Option<&Path>,
    pretty: bool,
    config: &JudgeConfig
) -> Result<i32> {
    for (role, path) in [("Reference", reference), ("Candidate", candidate)] {
        if !path.exists() {
            return Err(
                (HarnessError::ImageNotFound {
                    role: role.to_string(),
                    path: path.to_path_buf(),
                }).into()
            );
        }
    }

    let api_key = config.api_key()?;
    let judge = AnthropicJudge::new(config.clone(), api_key)?;

    run(&judge, reference, candidate, output, pretty).await
}

/// Judge the pair with `service` and emit the report
pub async fn run<S: JudgmentService + ?Sized>(
    service: &S,
    reference: &Path,
    candidate: &Path,
    output: Option<&Path>,
    pretty: bool
) -> Result<i32> {
    let spinner = ui::spinner_with_message("Comparing screenshots...");
    let report = compare_screenshots(service, reference, candidate).await;
    spinner.finish_and_clear();
    let report = report?;

    ui::print_verdict_summary(&report);

    let json = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };

    match output {
        Some(path) => {
            fs::write(path, &json)?;
            ui::print_success(format!("Results written to: {}", path.display()).as_str());
        }
        None => println!("{}", json),
    }

    Ok(report.exit_code())
}
