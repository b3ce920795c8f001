pub mod anthropic_judge;

pub use anthropic_judge::AnthropicJudge;
