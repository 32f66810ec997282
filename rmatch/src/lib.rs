//! Job requirement extraction and candidate matching on top of `rchat`.
//!
//! A [`RequirementExtractor`] asks a model for the requirements of a job
//! description, grouped into [`RequirementCategory`] lists. A
//! [`RequirementMatcher`] then scores each requirement against a résumé and/or
//! cover letter and folds the scores into a weighted total.
//!
//! ```rust
//! use rmatch::{RequirementCategory, Requirements, first_json_object};
//!
//! let answer = r#"Here you go: {"hardSkills": ["Rust"], "languages": ["German"]}"#;
//! let object = first_json_object(answer).expect("answer contains an object");
//! let requirements = Requirements::from_json_object(&object);
//!
//! assert_eq!(requirements.get(RequirementCategory::HardSkills), ["Rust"]);
//! assert!(requirements.education.is_empty());
//! ```

mod category;
mod document;
mod error;
mod extractor;
mod json;
mod matcher;
mod prompts;
mod score;

pub mod prelude {
    pub use crate::{
        CategoryWeights, DocumentReader, MatchError, MatchErrorKind, MatchResult,
        PdfDocumentReader, PromisingVerdict, RequirementCategory, RequirementExtractor,
        RequirementMatcher, RequirementScore, Requirements,
    };
}

pub use category::{RequirementCategory, Requirements};
pub use document::{DocumentReader, PdfDocumentReader};
pub use error::{MatchError, MatchErrorKind};
pub use extractor::RequirementExtractor;
pub use json::{extract_json_objects, first_json_object};
pub use matcher::RequirementMatcher;
pub use prompts::{extraction_prompt, match_prompt, promising_prompt};
pub use score::{
    CategoryWeights, MAX_SCORE, MIN_SCORE, MatchResult, PromisingVerdict, RequirementScore,
    clamp_score,
};
