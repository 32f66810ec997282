//! Requirement categories and the per-category requirement lists.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Kinds of job requirement, in the order they are extracted and matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RequirementCategory {
    WorkExperience,
    Education,
    OtherQualifications,
    HardSkills,
    SoftSkills,
    SpecificKnowledge,
    PersonalTraits,
    Languages,
    Travel,
    JobLocation,
    WorkingHours,
    PhysicalAbility,
}

impl RequirementCategory {
    pub const ALL: [RequirementCategory; 12] = [
        Self::WorkExperience,
        Self::Education,
        Self::OtherQualifications,
        Self::HardSkills,
        Self::SoftSkills,
        Self::SpecificKnowledge,
        Self::PersonalTraits,
        Self::Languages,
        Self::Travel,
        Self::JobLocation,
        Self::WorkingHours,
        Self::PhysicalAbility,
    ];

    /// JSON key used for this category in prompts and answers.
    pub fn field_name(self) -> &'static str {
        match self {
            Self::WorkExperience => "workExperience",
            Self::Education => "education",
            Self::OtherQualifications => "otherQualifications",
            Self::HardSkills => "hardSkills",
            Self::SoftSkills => "softSkills",
            Self::SpecificKnowledge => "specificKnowledge",
            Self::PersonalTraits => "personalTraits",
            Self::Languages => "languages",
            Self::Travel => "travel",
            Self::JobLocation => "jobLocation",
            Self::WorkingHours => "workingHours",
            Self::PhysicalAbility => "physicalAbility",
        }
    }

    pub fn from_field_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.field_name() == name)
    }

    /// Guidance handed to the model about what belongs in this category.
    pub fn definition(self) -> &'static str {
        match self {
            Self::WorkExperience => {
                "Work experience requirements relate to the previous roles you have worked and \
                 the amount of time you have spent in each role. Employers use this job \
                 requirement to attract candidates with a certain amount or type of work \
                 experience and may seek employees who have worked in similar positions. Other \
                 employers may not require candidates to have previous experience, making the \
                 role it suitable for candidates who are just entering the workforce, recently \
                 graduated, or changing careers. If you have unrelated work experience, you can \
                 include the transferable skills gained in those roles to help demonstrate your \
                 suitability for the position on your resume."
            }
            Self::Education => {
                "Some positions require candidates to have a certain level of education, such as \
                 a high school diploma, a bachelor's degree, or a graduate degree. Depending on \
                 the employer and the position, some educational requirements may outline \
                 vocational training, especially for hands-on and manual roles such as plumbing \
                 or electrician jobs. Employers may also specify the areas of study required of \
                 prospective candidates, such as the major they prefer. In other instances, \
                 employers may substitute some or all the educational requirements with the \
                 length of work experience in a particular industry or role."
            }
            Self::OtherQualifications => {
                "Some roles require candidates to be licensed before qualifying for paid \
                 positions. Employers hiring for such positions typically state that candidates \
                 need licensing to operate in a specific jurisdiction. For instance, to work as a \
                 counselling psychologist, you require licensing by the respective provincial \
                 licensing body. Some positions also require candidates to undergo certification. \
                 Certification shows that a candidate has the requisite work experience and \
                 skills to perform in a role. Maintaining certifications shows a candidate's \
                 commitment to the profession, an aspect that's likely to further impress the \
                 employer. This point also included accreditations."
            }
            Self::HardSkills => {
                "When employers look for candidates to fill open positions, they typically \
                 outline the hard skills required. Every position requires unique hard skills. \
                 Hard skills are technical skills necessary to perform the job. For example, hard \
                 skills for a nursing position include knowledge of medical terminologies or the \
                 ability to execute doctor's instructions."
            }
            Self::SoftSkills => {
                "When employers look for candidates to fill open positions, they typically \
                 outline the soft skills required. Every position requires unique soft skills. \
                 Soft skills entail the ability of a candidate to relate well to others. For \
                 example, soft skills can involve teamwork and communication skills."
            }
            Self::SpecificKnowledge => {
                "Some roles require a candidate to possess more knowledge of specific areas \
                 relevant to the open position. Employers may specify these knowledge areas to \
                 attract candidates with a certain knowledge base and skill set. For instance, \
                 employers looking to hire a phlebotomist may require candidates to have \
                 knowledge of venipuncture."
            }
            Self::PersonalTraits => {
                "A candidate's personality is a key job requirement for some positions. Having \
                 the desired personality traits can make a candidate more suitable for a position \
                 and complements their skills, education, and work experience. Employers may \
                 consider personality traits as critical in enabling a candidate to fit into the \
                 company's culture, values, and ability to work harmoniously with others. Some \
                 desirable personality traits employers may look for include attention to detail, \
                 reliability, creativity, general intelligence and a desire to learn."
            }
            Self::Languages => {
                "Employers looking to hire for a role that involves working with a diverse \
                 population may require job candidates to be proficient in certain languages. \
                 Employers may also specify the level of language proficiency, such as the \
                 ability to write and speak fluently. In some cases, basic knowledge of the \
                 language may be sufficient to perform the role, while other roles may have no \
                 language requirement at all."
            }
            Self::Travel => {
                "Some positions require a lot of travelling apart from commuting. This \
                 requirement is typical for organizations with field operations, companies with \
                 offices in multiple locations, or those undertaking geographically dispersed \
                 projects. Employers hiring for such positions can state these requirements in \
                 the job posting to help attract candidates willing to travel outside their usual \
                 location."
            }
            Self::JobLocation => {
                "Employers hiring for open positions typically intend for the successful \
                 candidate to work in a specific location such as the head office, regional \
                 offices, or international subsidiaries. Job location is an important job \
                 requirement, as stating it can help find candidates able to work in certain \
                 places. For instance, candidates with young families may reconsider applying for \
                 international positions because of the potential disruption to their lives. Job \
                 positions may be on-site, remote or hybrid."
            }
            Self::WorkingHours => {
                "Sometimes a job entails working very long hours or working on weekends. This is \
                 often the case for people in the medical or law field, but also for positions in \
                 business administration, like a sales manager or C-suite role. This point also \
                 considers the total work amount which can either be part-time, full-time or \
                 contract work"
            }
            Self::PhysicalAbility => {
                "Some positions may involve a high physical demand. These include positions in \
                 the army, machine operator, or nursing assistant as they typically involve \
                 spending long periods of time standing, moving, or lifting heavy objects. \
                 Employers hiring for such positions usually specify that candidates be \
                 physically fit so they can effectively complete their tasks."
            }
        }
    }
}

impl std::fmt::Display for RequirementCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.field_name())
    }
}

/// Job requirements grouped by category. Missing categories are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Requirements {
    pub work_experience: Vec<String>,
    pub education: Vec<String>,
    pub other_qualifications: Vec<String>,
    pub hard_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub specific_knowledge: Vec<String>,
    pub personal_traits: Vec<String>,
    pub languages: Vec<String>,
    pub travel: Vec<String>,
    pub job_location: Vec<String>,
    pub working_hours: Vec<String>,
    pub physical_ability: Vec<String>,
}

impl Requirements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: RequirementCategory) -> &[String] {
        match category {
            RequirementCategory::WorkExperience => &self.work_experience,
            RequirementCategory::Education => &self.education,
            RequirementCategory::OtherQualifications => &self.other_qualifications,
            RequirementCategory::HardSkills => &self.hard_skills,
            RequirementCategory::SoftSkills => &self.soft_skills,
            RequirementCategory::SpecificKnowledge => &self.specific_knowledge,
            RequirementCategory::PersonalTraits => &self.personal_traits,
            RequirementCategory::Languages => &self.languages,
            RequirementCategory::Travel => &self.travel,
            RequirementCategory::JobLocation => &self.job_location,
            RequirementCategory::WorkingHours => &self.working_hours,
            RequirementCategory::PhysicalAbility => &self.physical_ability,
        }
    }

    pub fn get_mut(&mut self, category: RequirementCategory) -> &mut Vec<String> {
        match category {
            RequirementCategory::WorkExperience => &mut self.work_experience,
            RequirementCategory::Education => &mut self.education,
            RequirementCategory::OtherQualifications => &mut self.other_qualifications,
            RequirementCategory::HardSkills => &mut self.hard_skills,
            RequirementCategory::SoftSkills => &mut self.soft_skills,
            RequirementCategory::SpecificKnowledge => &mut self.specific_knowledge,
            RequirementCategory::PersonalTraits => &mut self.personal_traits,
            RequirementCategory::Languages => &mut self.languages,
            RequirementCategory::Travel => &mut self.travel,
            RequirementCategory::JobLocation => &mut self.job_location,
            RequirementCategory::WorkingHours => &mut self.working_hours,
            RequirementCategory::PhysicalAbility => &mut self.physical_ability,
        }
    }

    pub fn with(mut self, category: RequirementCategory, requirement: impl Into<String>) -> Self {
        self.get_mut(category).push(requirement.into());
        self
    }

    /// Categories in declaration order paired with their requirements.
    pub fn iter(&self) -> impl Iterator<Item = (RequirementCategory, &[String])> + '_ {
        RequirementCategory::ALL
            .into_iter()
            .map(move |category| (category, self.get(category)))
    }

    pub fn len(&self) -> usize {
        self.iter().map(|(_, requirements)| requirements.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Overlays the category arrays found in `object` onto empty requirements.
    ///
    /// Unknown keys are ignored. A bare string counts as a one-element list and
    /// non-string array items are dropped.
    pub fn from_json_object(object: &Map<String, Value>) -> Self {
        let mut requirements = Self::new();
        for (key, value) in object {
            let Some(category) = RequirementCategory::from_field_name(key) else {
                continue;
            };
            *requirements.get_mut(category) = string_items(value);
        }
        requirements
    }
}

fn string_items(value: &Value) -> Vec<String> {
    let items: Vec<&str> = match value {
        Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
        Value::String(item) => vec![item.as_str()],
        _ => Vec::new(),
    };

    items
        .into_iter()
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn field_names_round_trip_through_lookup() {
        for category in RequirementCategory::ALL {
            assert_eq!(
                RequirementCategory::from_field_name(category.field_name()),
                Some(category)
            );
            assert!(!category.definition().is_empty());
        }
        assert_eq!(RequirementCategory::from_field_name("location"), None);
    }

    #[test]
    fn empty_requirements_serialize_every_category() {
        let value = serde_json::to_value(Requirements::new()).expect("requirements serialize");
        let object = value.as_object().expect("requirements are an object");

        assert_eq!(object.len(), RequirementCategory::ALL.len());
        assert_eq!(object["jobLocation"], json!([]));
    }

    #[test]
    fn json_overlay_keeps_defaults_and_tolerates_loose_shapes() {
        let object = json!({
            "hardSkills": ["Rust", "  ", 42, "SQL "],
            "languages": "German",
            "travel": null,
            "salary": ["plenty"]
        });

        let requirements =
            Requirements::from_json_object(object.as_object().expect("object literal"));

        assert_eq!(requirements.hard_skills, vec!["Rust", "SQL"]);
        assert_eq!(requirements.languages, vec!["German"]);
        assert!(requirements.travel.is_empty());
        assert!(requirements.education.is_empty());
        assert_eq!(requirements.len(), 3);
    }

    #[test]
    fn iteration_follows_declaration_order() {
        let requirements = Requirements::new()
            .with(RequirementCategory::PhysicalAbility, "lift 20kg")
            .with(RequirementCategory::WorkExperience, "5 years");

        let non_empty: Vec<RequirementCategory> = requirements
            .iter()
            .filter(|(_, items)| !items.is_empty())
            .map(|(category, _)| category)
            .collect();

        assert_eq!(
            non_empty,
            vec![
                RequirementCategory::WorkExperience,
                RequirementCategory::PhysicalAbility
            ]
        );
    }
}
