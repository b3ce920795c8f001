#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use base64::Engine;
    use serde_json::json;
    use std::path::Path;
    use std::sync::atomic::{ AtomicUsize, Ordering };
    use std::sync::Mutex;

    use super::super::{ setup, write_png };
    use crate::errors::{ HarnessError, ServiceError };
    use crate::judge::prompt::{ CANDIDATE_LABEL, REFERENCE_LABEL, RUBRIC };
    use crate::judge::{
        compare_screenshots,
        encode_image,
        extract_json,
        judge_pair,
        media_type_for,
        parse_verdict,
    };
    use crate::models::{ Classification, Score, Verdict, VerdictReport };
    use crate::traits::{ ContentPart, JudgmentRequest, JudgmentService };

    const PASS_REPORT: &str =
        r#"{
        "overall": "PASS",
        "scores": {
            "text_completeness": 5,
            "typography": 4,
            "layout": 4,
            "images": "N/A",
            "overall_fidelity": 4
        },
        "priority_issues": ["Slightly tighter line height"],
        "detailed_observations": {"text": "All text present"},
        "suggested_tests": [
            {"name": "testLineHeight", "description": "Line height matches", "assertion": "lineHeight >= 1.4em"}
        ]
    }"#;

    /// Service stub that answers with a canned response and counts calls
    struct StubService {
        response: Result<String, String>,
        calls: AtomicUsize,
        last_request: Mutex<Option<JudgmentRequest>>,
    }

    impl StubService {
        fn answering(text: &str) -> Self {
            Self {
                response: Ok(text.to_string()),
                calls: AtomicUsize::new(0),
                last_request: Mutex::new(None),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                response: Err(message.to_string()),
                calls: AtomicUsize::new(0),
                last_request: Mutex::new(None),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl JudgmentService for StubService {
        async fn judge(&self, request: &JudgmentRequest) -> Result<String, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some(request.clone());
            self.response.clone().map_err(ServiceError::Network)
        }

        fn model(&self) -> Option<&str> {
            Some("stub-model")
        }
    }

    fn screenshot_pair(dir: &Path) -> (std::path::PathBuf, std::path::PathBuf) {
        let reference = dir.join("ref_frankenstein_ch1.png");
        let candidate = dir.join("ios_frankenstein_ch1.jpg");
        write_png(&reference, 8, 8, [255, 255, 255]);
        std::fs::write(&candidate, b"jpeg-ish bytes").unwrap();
        (reference, candidate)
    }

    #[test]
    fn test_media_type_table() {
        assert_eq!(media_type_for(Path::new("a.png")), "image/png");
        assert_eq!(media_type_for(Path::new("a.jpg")), "image/jpeg");
        assert_eq!(media_type_for(Path::new("a.JPEG")), "image/jpeg");
        assert_eq!(media_type_for(Path::new("a.gif")), "image/gif");
        assert_eq!(media_type_for(Path::new("a.webp")), "image/webp");
        assert_eq!(media_type_for(Path::new("a.bmp")), "image/png");
        assert_eq!(media_type_for(Path::new("no_extension")), "image/png");
    }

    #[test]
    fn test_encode_image_base64() {
        setup();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shot.webp");
        std::fs::write(&path, b"hello").unwrap();

        let encoded = encode_image(&path, "Reference").unwrap();

        assert_eq!(encoded.data, "aGVsbG8=");
        assert_eq!(encoded.media_type, "image/webp");
    }

    #[test]
    fn test_encode_missing_image() {
        let result = encode_image(Path::new("/nonexistent/ref.png"), "Reference");
        assert!(matches!(result, Err(HarnessError::ImageNotFound { .. })));
    }

    #[test]
    fn test_extraction_strategies_agree() {
        let object = r#"{"overall": "PASS", "scores": {}}"#;
        let labeled = format!("Here is my evaluation:\n```json\n{}\n```\nThanks", object);
        let bare = format!("```\n{}\n```", object);
        let raw = format!("  \n{}\n ", object);

        assert_eq!(extract_json(&labeled), object);
        assert_eq!(extract_json(&bare), object);
        assert_eq!(extract_json(&raw), object);

        let parsed: Vec<Verdict> = [labeled, bare, raw]
            .iter()
            .map(|t| parse_verdict(t))
            .collect();
        assert!(parsed.iter().all(|v| v.classification() == Classification::Pass));
    }

    #[test]
    fn test_json_fence_wins_over_earlier_bare_fence() {
        let text = "```\nnot it\n```\n```json\n{\"overall\": \"MAJOR_DIFF\"}\n```";
        assert_eq!(extract_json(text), "{\"overall\": \"MAJOR_DIFF\"}");
    }

    #[test]
    fn test_unclosed_fence_runs_to_end() {
        let text = "```json\n{\"overall\": \"NEEDS_WORK\"}\n";
        assert_eq!(extract_json(text), "{\"overall\": \"NEEDS_WORK\"}");
    }

    #[test]
    fn test_invalid_json_degrades_to_error_report() {
        setup();
        let verdict = parse_verdict("not json at all");

        match &verdict {
            Verdict::Unparsed { raw_text, error } => {
                assert_eq!(raw_text, "not json at all");
                assert!(!error.is_empty());
            }
            other => panic!("expected Unparsed, got {:?}", other),
        }
        assert_eq!(verdict.exit_code(), 3);

        let report = verdict.into_report();
        assert_eq!(report.overall, Classification::Error);
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["overall"], "ERROR");
        assert_eq!(value["raw_response"], "not json at all");
        assert!(value["parse_error"].is_string());
    }

    #[test]
    fn test_wrong_shape_is_unparsed() {
        // Valid JSON, but not a report
        assert!(matches!(parse_verdict("[1, 2, 3]"), Verdict::Unparsed { .. }));
        assert!(matches!(parse_verdict(r#"{"scores": {}}"#), Verdict::Unparsed { .. }));
    }

    #[test]
    fn test_exit_codes() {
        let cases = [
            (r#"{"overall":"PASS"}"#, 0),
            (r#"{"overall":"MAJOR_DIFF"}"#, 2),
            (r#"{"overall":"NEEDS_WORK"}"#, 1),
            (r#"{"overall":"SOMETHING_ELSE"}"#, 1),
            ("not json at all", 3),
        ];
        for (text, expected) in cases {
            assert_eq!(parse_verdict(text).exit_code(), expected, "response: {}", text);
        }
    }

    #[test]
    fn test_unknown_classification_round_trips() {
        let report = parse_verdict(r#"{"overall":"MINOR_DIFF"}"#).into_report();
        assert_eq!(report.overall, Classification::Other("MINOR_DIFF".to_string()));
        assert_eq!(serde_json::to_value(&report).unwrap()["overall"], "MINOR_DIFF");
    }

    #[test]
    fn test_full_report_fields() {
        let report = match parse_verdict(PASS_REPORT) {
            Verdict::Parsed(report) => report,
            other => panic!("expected Parsed, got {:?}", other),
        };

        let scores = report.scores.as_ref().unwrap();
        assert_eq!(scores.images, Some(Score::Text("N/A".to_string())));
        assert_eq!(scores.text_completeness.as_ref().and_then(Score::value), Some(5.0));
        assert_eq!(report.priority_issues, vec!["Slightly tighter line height".to_string()]);
        assert_eq!(report.suggested_tests[0].name, "testLineHeight");
        assert_eq!(report.suggested_tests[0].assertion, "lineHeight >= 1.4em");
        assert_eq!(report.detailed_observations["text"], "All text present");
    }

    #[test]
    fn test_unknown_keys_preserved() {
        let report = parse_verdict(
            r#"{"overall":"PASS","confidence":0.9,"scores":{"layout":4,"contrast":5}}"#
        ).into_report();
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["confidence"], json!(0.9));
        assert_eq!(value["scores"]["contrast"], json!(5));
        assert_eq!(value["scores"]["layout"], json!(4));
    }

    #[test]
    fn test_local_classification_rules() {
        let classify = |scores: serde_json::Value| {
            let report: VerdictReport = serde_json
                ::from_value(json!({"overall": "PASS", "scores": scores}))
                .unwrap();
            report.scores.unwrap().classify()
        };

        assert_eq!(
            classify(json!({"text_completeness": 5, "typography": 4, "layout": 4, "images": "N/A", "overall_fidelity": 4})),
            Some(Classification::Pass)
        );
        assert_eq!(
            classify(json!({"text_completeness": 5, "typography": 3, "layout": 3, "images": 4, "overall_fidelity": 3})),
            Some(Classification::NeedsWork)
        );
        assert_eq!(
            classify(json!({"text_completeness": 2, "typography": 5, "layout": 5, "images": 5, "overall_fidelity": 5})),
            Some(Classification::MajorDiff)
        );
        assert_eq!(classify(json!({"images": "N/A"})), None);
    }

    #[test]
    fn test_request_order() {
        setup();
        let dir = tempfile::tempdir().unwrap();
        let (reference, candidate) = screenshot_pair(dir.path());

        let request = JudgmentRequest::for_pair(
            encode_image(&reference, "Reference").unwrap(),
            encode_image(&candidate, "Candidate").unwrap()
        );

        assert_eq!(request.parts.len(), 5);
        assert_eq!(request.parts[0], ContentPart::Text(REFERENCE_LABEL.to_string()));
        match &request.parts[1] {
            ContentPart::Image(image) => assert_eq!(image.media_type, "image/png"),
            other => panic!("expected reference image, got {:?}", other),
        }
        assert_eq!(request.parts[2], ContentPart::Text(CANDIDATE_LABEL.to_string()));
        match &request.parts[3] {
            ContentPart::Image(image) => {
                assert_eq!(image.media_type, "image/jpeg");
                assert_eq!(
                    image.data,
                    base64::engine::general_purpose::STANDARD.encode(b"jpeg-ish bytes")
                );
            }
            other => panic!("expected candidate image, got {:?}", other),
        }
        assert_eq!(request.parts[4], ContentPart::Text(RUBRIC.to_string()));
    }

    #[tokio::test]
    async fn test_missing_image_skips_service() {
        setup();
        let dir = tempfile::tempdir().unwrap();
        let (reference, _) = screenshot_pair(dir.path());
        let service = StubService::answering(PASS_REPORT);

        let result = judge_pair(&service, &reference, &dir.path().join("missing.png")).await;

        assert!(matches!(result, Err(HarnessError::ImageNotFound { .. })));
        assert_eq!(service.calls(), 0);
    }

    #[tokio::test]
    async fn test_compare_screenshots_attaches_metadata() {
        setup();
        let dir = tempfile::tempdir().unwrap();
        let (reference, candidate) = screenshot_pair(dir.path());
        let service = StubService::answering(&format!("```json\n{}\n```", PASS_REPORT));

        let report = compare_screenshots(&service, &reference, &candidate).await.unwrap();

        assert_eq!(service.calls(), 1);
        assert_eq!(report.exit_code(), 0);
        let metadata = report.metadata.as_ref().unwrap();
        assert_eq!(metadata.reference_path, reference.display().to_string());
        assert_eq!(metadata.candidate_path, candidate.display().to_string());
        assert_eq!(metadata.model.as_deref(), Some("stub-model"));
        assert_eq!(metadata.local_classification, Some(Classification::Pass));

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["_metadata"]["reference_path"], reference.display().to_string());
        assert!(service.last_request.lock().unwrap().is_some());
    }

    #[tokio::test]
    async fn test_disagreeing_classification_is_recorded() {
        setup();
        let dir = tempfile::tempdir().unwrap();
        let (reference, candidate) = screenshot_pair(dir.path());
        let service = StubService::answering(
            r#"{"overall":"PASS","scores":{"text_completeness":1,"typography":5,"layout":5,"images":5,"overall_fidelity":5}}"#
        );

        let report = compare_screenshots(&service, &reference, &candidate).await.unwrap();

        // The service's classification still decides the exit code
        assert_eq!(report.overall, Classification::Pass);
        assert_eq!(report.exit_code(), 0);
        assert_eq!(
            report.metadata.unwrap().local_classification,
            Some(Classification::MajorDiff)
        );
    }

    #[tokio::test]
    async fn test_service_failure_becomes_error_report() {
        setup();
        let dir = tempfile::tempdir().unwrap();
        let (reference, candidate) = screenshot_pair(dir.path());
        let service = StubService::failing("connection refused");

        let report = compare_screenshots(&service, &reference, &candidate).await.unwrap();

        assert_eq!(report.overall, Classification::Error);
        assert_eq!(report.exit_code(), 3);
        assert!(report.service_error.unwrap().contains("connection refused"));
        assert!(report.metadata.is_some());
    }
}
