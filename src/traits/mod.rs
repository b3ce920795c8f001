pub mod judgment_service;

// Re-export traits
pub use judgment_service::{ ContentPart, EncodedImage, JudgmentRequest, JudgmentService };
