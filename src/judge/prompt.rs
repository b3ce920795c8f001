use crate::traits::{ ContentPart, EncodedImage, JudgmentRequest };

pub const REFERENCE_LABEL: &str = "REFERENCE SCREENSHOT (from EPUB.js):";
pub const CANDIDATE_LABEL: &str = "iOS APP SCREENSHOT:";

/// Evaluation rubric sent after both screenshots
pub const RUBRIC: &str = r#"You are evaluating the visual rendering quality of an EPUB reader app.

Compare these two screenshots:
1. REFERENCE: The expected rendering from EPUB.js (a well-established EPUB renderer)
2. iOS APP: The rendering from our iOS reader app

Evaluate the iOS app rendering against the reference on these dimensions:

## Evaluation Criteria

1. **Text Content Completeness** (1-5)
   - Is all text from the reference visible?
   - Is text truncated, missing, or duplicated?

2. **Typography** (1-5)
   - Font size relative to reference
   - Line height / leading
   - Letter spacing
   - Font weight accuracy

3. **Layout** (1-5)
   - Margins (left, right, top, bottom)
   - Text alignment (justified, left, centered)
   - Paragraph indentation
   - Column width / line length

4. **Images** (1-5, or N/A if no images)
   - Image placement
   - Image sizing / aspect ratio
   - Image quality

5. **Overall Fidelity** (1-5)
   - How close is the iOS rendering to the reference?

## Response Format

Respond with ONLY valid JSON in this exact format:
```json
{
  "overall": "PASS" | "NEEDS_WORK" | "MAJOR_DIFF",
  "scores": {
    "text_completeness": 1-5,
    "typography": 1-5,
    "layout": 1-5,
    "images": 1-5 | "N/A",
    "overall_fidelity": 1-5
  },
  "priority_issues": [
    "Description of most important issue to fix",
    "Second most important issue"
  ],
  "detailed_observations": {
    "text": "Observations about text rendering",
    "typography": "Observations about typography",
    "layout": "Observations about layout/margins",
    "images": "Observations about images (if any)"
  },
  "suggested_tests": [
    {
      "name": "testMarginWidth",
      "description": "Test that left/right margins are at least 48pt",
      "assertion": "margin >= 48pt"
    }
  ]
}
```

Guidelines for overall rating:
- PASS: Scores average 4+ and no individual score below 3
- NEEDS_WORK: Some scores below 4 but no critical issues
- MAJOR_DIFF: Any score 2 or below, or critical content issues"#;

impl JudgmentRequest {
    /// Reference label, reference image, candidate label, candidate image,
    /// then the rubric.
    pub fn for_pair(reference: EncodedImage, candidate: EncodedImage) -> Self {
        Self {
            parts: vec![
                ContentPart::Text(REFERENCE_LABEL.to_string()),
                ContentPart::Image(reference),
                ContentPart::Text(CANDIDATE_LABEL.to_string()),
                ContentPart::Image(candidate),
                ContentPart::Text(RUBRIC.to_string())
            ],
        }
    }
}
