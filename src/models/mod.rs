pub mod screenshot;
pub mod verdict;

// Re-export common model types
pub use screenshot::{ ResolvedScreenshot, ScreenshotNames, ScreenshotRole, ScreenshotSet };
pub use verdict::{
    Classification,
    ReportMetadata,
    Score,
    Scores,
    SuggestedTest,
    Verdict,
    VerdictReport,
};
