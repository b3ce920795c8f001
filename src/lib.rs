pub mod models;
pub mod traits;
pub mod errors;
pub mod config;
pub mod implementations;
pub mod composer;
pub mod judge;
#[cfg(test)]
pub mod tests;

// Re-export core components
pub use config::{ ApiKey, ComposerConfig, ConfigError, HarnessConfig, JudgeConfig };
pub use errors::{ HarnessError, HarnessResult, ServiceError };
pub use implementations::AnthropicJudge;
pub use composer::compose_comparison;
pub use judge::{ compare_screenshots, judge_pair };
pub use models::{
    screenshot::{ ScreenshotNames, ScreenshotRole, ScreenshotSet },
    verdict::{ Classification, Score, Scores, SuggestedTest, Verdict, VerdictReport },
};
pub use traits::{ JudgmentRequest, JudgmentService };
