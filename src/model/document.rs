//! The canonical résumé document and its entries

use crate::error::{Result, ResumeCrafterError};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Category label used when a skill has none
pub const UNCATEGORIZED_SKILLS: &str = "Other";

/// Stable identifier of an entry within its section.
///
/// Assigned once at creation and never derived from content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::generate()
    }
}

impl From<&str> for EntryId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for EntryId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Older exports stored creation timestamps as numeric ids
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => EntryId(text),
            RawId::Number(number) => EntryId(number.to_string()),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

static BLANK_PERSONAL_INFO: PersonalInfo = PersonalInfo {
    full_name: String::new(),
    email: String::new(),
    phone: String::new(),
    location: String::new(),
    linkedin: None,
    github: None,
    website: None,
    summary: None,
};

impl PersonalInfo {
    /// Trimmed summary, empty when absent
    pub fn summary_text(&self) -> &str {
        self.summary.as_deref().map(str::trim).unwrap_or("")
    }

    /// Non-blank profile links in display order
    pub fn links(&self) -> Vec<&str> {
        [&self.linkedin, &self.github, &self.website]
            .into_iter()
            .filter_map(|link| link.as_deref().map(str::trim))
            .filter(|link| !link.is_empty())
            .collect()
    }

    /// Non-blank contact parts (email, phone, location) in display order
    pub fn contact_parts(&self) -> Vec<&str> {
        [&self.email, &self.phone, &self.location]
            .into_iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub id: EntryId,
    pub company: String,
    pub position: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub is_current_role: bool,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EducationEntry {
    pub id: EntryId,
    pub school: String,
    pub degree: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub is_current_role: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectEntry {
    pub id: EntryId,
    pub name: String,
    pub description: String,
    pub technologies: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CertificationEntry {
    pub id: EntryId,
    pub title: String,
    pub issuer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SkillEntry {
    pub id: EntryId,
    pub name: String,
    pub category: String,
}

impl SkillEntry {
    pub fn new(name: &str, category: &str) -> Self {
        Self {
            id: EntryId::generate(),
            name: name.to_string(),
            category: category.to_string(),
        }
    }
}

/// Skills sharing a category, in first-seen order
#[derive(Debug, Clone, PartialEq)]
pub struct SkillGroup<'a> {
    pub category: &'a str,
    pub names: Vec<&'a str>,
}

/// Root aggregate. Every edit replaces the whole value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResumeDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_info: Option<PersonalInfo>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub projects: Vec<ProjectEntry>,
    pub certifications: Vec<CertificationEntry>,
    pub skills: Vec<SkillEntry>,
}

impl ResumeDocument {
    /// All-empty skeleton used when the user clears everything
    pub fn empty() -> Self {
        Self {
            personal_info: Some(PersonalInfo::default()),
            ..Self::default()
        }
    }

    /// Personal info, or a blank record when it is absent
    pub fn personal(&self) -> &PersonalInfo {
        self.personal_info.as_ref().unwrap_or(&BLANK_PERSONAL_INFO)
    }

    /// Group skills by category, preserving first-seen category order
    pub fn skill_groups(&self) -> Vec<SkillGroup<'_>> {
        let mut groups: Vec<SkillGroup<'_>> = Vec::new();

        for skill in &self.skills {
            let category = match skill.category.trim() {
                "" => UNCATEGORIZED_SKILLS,
                category => category,
            };

            match groups.iter_mut().find(|group| group.category == category) {
                Some(group) => group.names.push(skill.name.as_str()),
                None => groups.push(SkillGroup {
                    category,
                    names: vec![skill.name.as_str()],
                }),
            }
        }

        groups
    }

    /// Pretty-printed JSON interchange form
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse the JSON interchange form; repeated ids within a section are replaced
    pub fn from_json(text: &str) -> Result<Self> {
        let mut document: Self =
            serde_json::from_str(text).map_err(|e| ResumeCrafterError::InvalidJson(e.to_string()))?;
        document.ensure_unique_ids();
        Ok(document)
    }

    /// Give every entry whose id already occurs earlier in its section a fresh id
    pub fn ensure_unique_ids(&mut self) {
        reassign_repeated_ids(&mut self.experience);
        reassign_repeated_ids(&mut self.education);
        reassign_repeated_ids(&mut self.projects);
        reassign_repeated_ids(&mut self.certifications);
        reassign_repeated_ids(&mut self.skills);
    }

    /// Fixed example document shown on first use
    pub fn example() -> Self {
        let skill = |id: &str, name: &str, category: &str| SkillEntry {
            id: id.into(),
            name: name.to_string(),
            category: category.to_string(),
        };

        Self {
            personal_info: Some(PersonalInfo {
                full_name: "Mark Gates".to_string(),
                email: "mark.gates@example.com".to_string(),
                phone: "+1 555 0100".to_string(),
                location: "United States".to_string(),
                linkedin: None,
                github: None,
                website: None,
                summary: Some(
                    "Software Developer with over 5 years of experience designing, developing, \
                     and deploying scalable software solutions. Achieved a 30% improvement in \
                     performance through codebase optimization and reduced deployment time by \
                     40% using CI/CD automation."
                        .to_string(),
                ),
            }),
            experience: vec![
                ExperienceEntry {
                    id: "1".into(),
                    company: "Meta".to_string(),
                    position: "Software Developer".to_string(),
                    location: None,
                    start_date: "2022-07".to_string(),
                    end_date: "2025-06".to_string(),
                    is_current_role: false,
                    bullets: vec![
                        "Designed and implemented scalable software solutions for high-traffic applications used by millions of users.".to_string(),
                        "Collaborated with cross-functional teams to deliver new features following agile methodologies.".to_string(),
                        "Optimized existing codebase, improving application performance by approximately 30%.".to_string(),
                    ],
                },
                ExperienceEntry {
                    id: "2".into(),
                    company: "Tech Solutions Inc.".to_string(),
                    position: "Software Engineer".to_string(),
                    location: None,
                    start_date: "2022-01".to_string(),
                    end_date: "2022-06".to_string(),
                    is_current_role: false,
                    bullets: vec![
                        "Developed and maintained web applications using JavaScript, React, and Node.js.".to_string(),
                        "Reduced bug rate by 25% through rigorous testing and debugging practices.".to_string(),
                    ],
                },
                ExperienceEntry {
                    id: "3".into(),
                    company: "InnovateTech".to_string(),
                    position: "Junior Software Developer".to_string(),
                    location: None,
                    start_date: "2018-05".to_string(),
                    end_date: "2018-07".to_string(),
                    is_current_role: false,
                    bullets: vec![
                        "Assisted in developing internal tools and client-facing applications.".to_string(),
                    ],
                },
            ],
            education: vec![EducationEntry {
                id: "1".into(),
                school: "Yale University".to_string(),
                degree: "Bachelor's Degree in Computer Science".to_string(),
                field: Some("Computer Science".to_string()),
                start_date: "2012-09".to_string(),
                end_date: "2016-06".to_string(),
                is_current_role: false,
                score: None,
            }],
            projects: vec![
                ProjectEntry {
                    id: "1".into(),
                    name: "Automated Deployment Pipeline".to_string(),
                    description: "Developed a CI/CD pipeline using Jenkins and Docker to automate application deployment, reducing deployment time by 40%.".to_string(),
                    technologies: "Jenkins, Docker, Kubernetes".to_string(),
                    link: None,
                },
                ProjectEntry {
                    id: "2".into(),
                    name: "Open Source React Component Library".to_string(),
                    description: "Contributed accessibility improvements to an open-source React component library.".to_string(),
                    technologies: "React, TypeScript, Jest".to_string(),
                    link: None,
                },
            ],
            certifications: vec![
                CertificationEntry {
                    id: "1".into(),
                    title: "AWS Certified Solutions Architect".to_string(),
                    issuer: "Amazon Web Services".to_string(),
                    date: Some("2023-05".to_string()),
                },
                CertificationEntry {
                    id: "2".into(),
                    title: "Google Cloud Professional Data Engineer".to_string(),
                    issuer: "Google Cloud".to_string(),
                    date: Some("2022-11".to_string()),
                },
            ],
            skills: vec![
                skill("1", "Java", "Languages"),
                skill("2", "JavaScript", "Languages"),
                skill("3", "Python", "Languages"),
                skill("4", "TypeScript", "Languages"),
                skill("5", "React", "Frameworks"),
                skill("6", "Node.js", "Frameworks"),
                skill("7", "Spring Boot", "Frameworks"),
                skill("8", "Git", "Tools"),
                skill("9", "Docker", "Tools"),
                skill("10", "Kubernetes", "Tools"),
                skill("11", "AWS", "Cloud & Infrastructure"),
                skill("12", "Terraform", "Cloud & Infrastructure"),
            ],
        }
    }
}

trait Identified {
    fn id_mut(&mut self) -> &mut EntryId;
}

impl Identified for ExperienceEntry {
    fn id_mut(&mut self) -> &mut EntryId {
        &mut self.id
    }
}

impl Identified for EducationEntry {
    fn id_mut(&mut self) -> &mut EntryId {
        &mut self.id
    }
}

impl Identified for ProjectEntry {
    fn id_mut(&mut self) -> &mut EntryId {
        &mut self.id
    }
}

impl Identified for CertificationEntry {
    fn id_mut(&mut self) -> &mut EntryId {
        &mut self.id
    }
}

impl Identified for SkillEntry {
    fn id_mut(&mut self) -> &mut EntryId {
        &mut self.id
    }
}

fn reassign_repeated_ids<T: Identified>(entries: &mut [T]) {
    let mut seen = HashSet::new();
    for entry in entries {
        let id = entry.id_mut();
        while !seen.insert(id.clone()) {
            *id = EntryId::generate();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip() {
        let doc = ResumeDocument::example();
        let json = doc.to_json().unwrap();
        let parsed = ResumeDocument::from_json(&json).unwrap();
        assert_eq!(parsed, doc);

        let empty = ResumeDocument::empty();
        assert_eq!(ResumeDocument::from_json(&empty.to_json().unwrap()).unwrap(), empty);
    }

    #[test]
    fn test_json_uses_interchange_field_names() {
        let json = ResumeDocument::example().to_json().unwrap();
        assert!(json.contains("\"personalInfo\""));
        assert!(json.contains("\"fullName\""));
        assert!(json.contains("\"isCurrentRole\""));
        assert!(json.contains("\"startDate\""));
    }

    #[test]
    fn test_missing_keys_default() {
        let doc = ResumeDocument::from_json(
            r#"{"personalInfo": {"fullName": "Ada"}, "experience": [{"id": 1712, "company": "Acme"}]}"#,
        )
        .unwrap();

        assert_eq!(doc.personal().full_name, "Ada");
        assert_eq!(doc.personal().email, "");
        assert_eq!(doc.experience[0].id.as_str(), "1712");
        assert!(doc.experience[0].bullets.is_empty());
        assert!(!doc.experience[0].is_current_role);
        assert!(doc.skills.is_empty());
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        let err = ResumeDocument::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ResumeCrafterError::InvalidJson(_)));
    }

    #[test]
    fn test_missing_personal_info_reads_blank() {
        let doc = ResumeDocument::default();
        assert!(doc.personal_info.is_none());
        assert_eq!(doc.personal().full_name, "");
        assert_eq!(doc.personal().summary_text(), "");
    }

    #[test]
    fn test_skill_groups_keep_first_seen_order() {
        let doc = ResumeDocument {
            skills: vec![
                SkillEntry::new("Rust", "Languages"),
                SkillEntry::new("Docker", "Tools"),
                SkillEntry::new("Go", "Languages"),
                SkillEntry::new("Juggling", ""),
            ],
            ..ResumeDocument::empty()
        };

        let groups = doc.skill_groups();
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].category, "Languages");
        assert_eq!(groups[0].names, vec!["Rust", "Go"]);
        assert_eq!(groups[1].category, "Tools");
        assert_eq!(groups[2].category, UNCATEGORIZED_SKILLS);
    }

    #[test]
    fn test_repeated_ids_are_replaced_on_import() {
        let json = r#"{
            "skills": [
                {"id": "1", "name": "Rust", "category": "Languages"},
                {"id": "1", "name": "Go", "category": "Languages"},
                {"id": 2, "name": "Git", "category": "Tools"}
            ],
            "experience": [
                {"id": "a", "company": "Acme"},
                {"id": "a", "company": "Initech"}
            ],
            "projects": [{"id": "a", "name": "Same id, other section"}]
        }"#;
        let doc = ResumeDocument::from_json(json).unwrap();

        assert_eq!(doc.skills[0].id.as_str(), "1");
        assert_ne!(doc.skills[1].id.as_str(), "1");
        assert_eq!(doc.skills[2].id.as_str(), "2");
        assert_eq!(doc.experience[0].id.as_str(), "a");
        assert_ne!(doc.experience[1].id.as_str(), "a");
        assert_eq!(doc.experience[1].company, "Initech");
        assert_eq!(doc.projects[0].id.as_str(), "a");
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = EntryId::generate();
        let b = EntryId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_contact_parts_skip_blanks() {
        let info = PersonalInfo {
            email: "a@b.c".to_string(),
            location: "  ".to_string(),
            github: Some("github.com/a".to_string()),
            ..PersonalInfo::default()
        };
        assert_eq!(info.contact_parts(), vec!["a@b.c"]);
        assert_eq!(info.links(), vec!["github.com/a"]);
    }
}
