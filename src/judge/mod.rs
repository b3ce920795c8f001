//! Judge: submits a reference/candidate pair to a judgment service and
//! normalizes its answer into a [`VerdictReport`].

pub mod encoding;
pub mod extract;
pub mod prompt;

use chrono::Utc;
use log::{ info, warn };
use std::path::Path;

use crate::errors::HarnessResult;
use crate::models::{ ReportMetadata, Verdict, VerdictReport };
use crate::traits::{ JudgmentRequest, JudgmentService };

pub use encoding::{ encode_image, media_type_for };
pub use extract::{ extract_json, parse_verdict };

/// Encode both images, call the service once and normalize the response.
///
/// Missing or unreadable images are returned as errors before the service is
/// contacted. Service failures and malformed responses come back as
/// `Verdict::Unavailable` / `Verdict::Unparsed`.
pub async fn judge_pair<S: JudgmentService + ?Sized>(
    service: &S,
    reference: &Path,
    candidate: &Path
) -> HarnessResult<Verdict> {
    let reference_image = encode_image(reference, "Reference")?;
    let candidate_image = encode_image(candidate, "Candidate")?;
    let request = JudgmentRequest::for_pair(reference_image, candidate_image);

    info!("Requesting judgment for {} vs {}", reference.display(), candidate.display());
    let verdict = match service.judge(&request).await {
        Ok(text) => parse_verdict(&text),
        Err(e) => {
            warn!("Judgment service call failed: {}", e);
            Verdict::Unavailable { error: e.to_string() }
        }
    };

    info!("Judgment classification: {}", verdict.classification());
    Ok(verdict)
}

/// Full judge run: [`judge_pair`] plus metadata and the local
/// classification check.
pub async fn compare_screenshots<S: JudgmentService + ?Sized>(
    service: &S,
    reference: &Path,
    candidate: &Path
) -> HarnessResult<VerdictReport> {
    let verdict = judge_pair(service, reference, candidate).await?;
    Ok(finalize(verdict, reference, candidate, service.model()))
}

/// Turn a verdict into the final report with invocation metadata attached
pub fn finalize(
    verdict: Verdict,
    reference: &Path,
    candidate: &Path,
    model: Option<&str>
) -> VerdictReport {
    let report = verdict.into_report();

    let local_classification = report.scores.as_ref().and_then(|scores| scores.classify());
    if let Some(local) = &local_classification {
        if *local != report.overall {
            warn!(
                "Service classified the pair as {} but its scores indicate {}",
                report.overall,
                local
            );
        }
    }

    let metadata = ReportMetadata {
        reference_path: reference.display().to_string(),
        candidate_path: candidate.display().to_string(),
        model: model.map(str::to_string),
        judged_at: Utc::now(),
        local_classification,
    };

    report.with_metadata(metadata)
}
