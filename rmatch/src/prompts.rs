//! Prompt texts for requirement extraction, matching and the final verdict.

use serde_json::Value;

use crate::{MatchResult, RequirementCategory, RequirementScore};

/// Asks for the job description's requirements as a JSON object keyed by
/// category.
pub fn extraction_prompt(job_description: &str) -> String {
    format!(
        "Please extract the job requirements from the following job description as a JSON \
         object and fill the requirements into the arrays in {} but respect the type of the \
         requirement. An explanation how to fill the arrays with the requirements of the \
         correct type is provided in {}, but if there are no suitable requirements for this \
         category, the arrays can stay empty. Here is the job description from which the \
         described JSON object should be extracted: {}",
        empty_requirements_json(),
        definitions_json(),
        job_description.trim()
    )
}

/// Asks for one requirement to be scored against whichever application
/// documents are present.
pub fn match_prompt(
    requirement: &str,
    category: RequirementCategory,
    resume: Option<&str>,
    cover_letter: Option<&str>,
) -> String {
    let mut prompt = format!(
        "Please match the requirement from the following JSON object {} with the provided \
         application documents and fill the score and the explanation in the JSON object. The \
         score should be 0 if the requirement is completely unfulfilled and 100 if the \
         requirement is fully covered. Assign a score between 0 and 100 if the requirement is \
         only partially covered and a higher score means a higher degree of coverage. A \
         description of the type of requirement is provided here: {}. Explain the chosen score \
         with the explanation field in the JSON object. ",
        score_template_json(requirement),
        json_string(category.definition())
    );

    if let Some(resume) = present(resume).map(sentence_body) {
        prompt.push_str(&format!(
            "Here is the resume for which the described requirement should be scored and \
             explained: {resume}. "
        ));
    }
    if let Some(cover_letter) = present(cover_letter).map(sentence_body) {
        prompt.push_str(&format!(
            "Here is the cover letter for which the described requirement should be scored and \
             explained: {cover_letter}. "
        ));
    }

    prompt.trim().to_string()
}

/// Asks whether a scored candidate should proceed in the application
/// process.
pub fn promising_prompt(result: &MatchResult) -> String {
    format!(
        "Please report if the following candidate is promising and should proceed in the \
         application process or if the candidate is not promising. The candidate was evaluated \
         to the various job requirements and this was the result: {}. A score of 0 means a \
         complete mismatch of the requirement and a score of 100 means a perfect match of the \
         requirement. The higher the score, the better is the requirement matched by the \
         candidate. Furthermore, an explanation is given for every score. Please provide the \
         answer in form of a JSON object that looks like this \
         {{\"promising\":false,\"explanation\":\"\"}}. Please fill in the promising field \
         with true if you think the candidate is promising and with false otherwise. Please \
         provide an explanation why this decision was made in the explanation field of the \
         JSON object.",
        scores_json(result)
    )
}

pub(crate) fn present(text: Option<&str>) -> Option<&str> {
    text.filter(|text| !text.trim().is_empty())
}

/// Document text without the trailing full stop the template appends itself.
fn sentence_body(text: &str) -> &str {
    text.trim().trim_end_matches('.').trim_end()
}

fn json_string(text: &str) -> String {
    Value::String(text.to_string()).to_string()
}

fn empty_requirements_json() -> String {
    let fields: Vec<String> = RequirementCategory::ALL
        .into_iter()
        .map(|category| format!("{}:[]", json_string(category.field_name())))
        .collect();
    format!("{{{}}}", fields.join(","))
}

fn definitions_json() -> String {
    let fields: Vec<String> = RequirementCategory::ALL
        .into_iter()
        .map(|category| {
            format!(
                "{}:{}",
                json_string(category.field_name()),
                json_string(category.definition())
            )
        })
        .collect();
    format!("{{{}}}", fields.join(","))
}

fn score_template_json(requirement: &str) -> String {
    format!(
        "{{\"requirement\":{},\"score\":0,\"explanation\":\"\"}}",
        json_string(requirement)
    )
}

fn scores_json(result: &MatchResult) -> String {
    let fields: Vec<String> = result
        .iter()
        .map(|(category, scores)| {
            let scores: Vec<String> = scores.iter().map(score_json).collect();
            format!(
                "{}:[{}]",
                json_string(category.field_name()),
                scores.join(",")
            )
        })
        .collect();
    format!("{{{}}}", fields.join(","))
}

fn score_json(score: &RequirementScore) -> String {
    format!(
        "{{\"requirement\":{},\"score\":{},\"explanation\":{}}}",
        json_string(&score.requirement),
        score.score,
        json_string(&score.explanation)
    )
}
