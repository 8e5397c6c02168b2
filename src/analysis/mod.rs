//! 趋势分析模块：调用生成服务并将自由文本解析为与帖子对齐的产品建议。
//!
//! # Analysis Module
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`AnalysisOrchestrator`] | Cache check, generation call, alignment, cache store |
//! | [`align_suggestions`] | Index-wise pairing of bullet segments with posts |
//! | [`parse_bullets`] | Bullet splitting of raw model output |
//! | [`suggestion_prompt`] | Prompt embedding the considered titles |

mod aligner;
mod orchestrator;
mod prompt;

pub use aligner::{align_suggestions, parse_bullets, BULLET, NO_SUGGESTION};
pub use orchestrator::{
    AnalysisOrchestrator, DEFAULT_MAX_CONSIDERED, NO_POSTS_NARRATIVE, SUGGESTIONS_HEADER,
    UNAVAILABLE_NARRATIVE,
};
pub use prompt::suggestion_prompt;
