//! Typed edits applied copy-on-write to a document
//!
//! Field paths use the JSON field names (`personal.fullName`,
//! `experience.1.company`); snake_case spellings are accepted too. Entry
//! positions in paths and edits are 1-based, matching the numbering used by
//! validation messages and recommendations.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ResumeCrafterError};
use crate::model::date::is_valid_month_field;
use crate::model::{
    CertificationEntry, EducationEntry, ExperienceEntry, PersonalInfo, ProjectEntry, ResumeDocument,
    SkillEntry,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Experience,
    Education,
    Projects,
    Certifications,
    Skills,
}

impl Section {
    pub fn name(&self) -> &'static str {
        match self {
            Section::Experience => "experience",
            Section::Education => "education",
            Section::Projects => "projects",
            Section::Certifications => "certifications",
            Section::Skills => "skills",
        }
    }

    pub fn len(&self, document: &ResumeDocument) -> usize {
        match self {
            Section::Experience => document.experience.len(),
            Section::Education => document.education.len(),
            Section::Projects => document.projects.len(),
            Section::Certifications => document.certifications.len(),
            Section::Skills => document.skills.len(),
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Section {
    type Err = ResumeCrafterError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "experience" | "work" => Ok(Section::Experience),
            "education" => Ok(Section::Education),
            "projects" | "project" => Ok(Section::Projects),
            "certifications" | "certification" => Ok(Section::Certifications),
            "skills" | "skill" => Ok(Section::Skills),
            _ => Err(ResumeCrafterError::InvalidEdit(format!("Unknown section '{}'", s))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonalField {
    FullName,
    Email,
    Phone,
    Location,
    Linkedin,
    Github,
    Website,
    Summary,
}

impl FromStr for PersonalField {
    type Err = ResumeCrafterError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "fullname" | "name" => Ok(PersonalField::FullName),
            "email" => Ok(PersonalField::Email),
            "phone" => Ok(PersonalField::Phone),
            "location" => Ok(PersonalField::Location),
            "linkedin" => Ok(PersonalField::Linkedin),
            "github" => Ok(PersonalField::Github),
            "website" => Ok(PersonalField::Website),
            "summary" => Ok(PersonalField::Summary),
            _ => Err(ResumeCrafterError::InvalidEdit(format!("Unknown personal field '{}'", s))),
        }
    }
}

/// One structured change to the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    SetPersonalField { field: PersonalField, value: String },
    SetEntryField { section: Section, position: usize, field: String, value: String },
    AddEntry(Section),
    RemoveEntry { section: Section, position: usize },
    MoveEntry { section: Section, from: usize, to: usize },
    AddBullet { position: usize, text: String },
    RemoveBullet { position: usize, bullet: usize },
}

impl Edit {
    /// Build a field assignment from a dotted path
    pub fn set(path: &str, value: &str) -> Result<Self> {
        let parts: Vec<&str> = path.split('.').collect();

        match parts.as_slice() {
            [root, field] if normalize(root) == "personal" || normalize(root) == "personalinfo" => {
                Ok(Edit::SetPersonalField {
                    field: field.parse()?,
                    value: value.to_string(),
                })
            }
            [section, position, field] => Ok(Edit::SetEntryField {
                section: section.parse()?,
                position: parse_position(position)?,
                field: field.to_string(),
                value: value.to_string(),
            }),
            _ => Err(ResumeCrafterError::InvalidEdit(format!(
                "Unrecognised field path '{}' (expected personal.<field> or <section>.<n>.<field>)",
                path
            ))),
        }
    }
}

fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

fn parse_position(s: &str) -> Result<usize> {
    match s.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(ResumeCrafterError::InvalidEdit(format!(
            "Entry position must be a number starting at 1, got '{}'",
            s
        ))),
    }
}

fn optional(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn month(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if is_valid_month_field(value) {
        Ok(value.to_string())
    } else {
        Err(ResumeCrafterError::InvalidEdit(format!(
            "{} must be empty or YYYY-MM, got '{}'",
            field, value
        )))
    }
}

fn flag(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        other => Err(ResumeCrafterError::InvalidEdit(format!("Expected true or false, got '{}'", other))),
    }
}

fn unknown_field(section: Section, field: &str) -> ResumeCrafterError {
    ResumeCrafterError::InvalidEdit(format!("Unknown {} field '{}'", section, field))
}

fn index_for(section: Section, position: usize, len: usize) -> Result<usize> {
    if position >= 1 && position <= len {
        Ok(position - 1)
    } else {
        Err(ResumeCrafterError::InvalidEdit(format!(
            "No {} entry {} (section has {})",
            section, position, len
        )))
    }
}

fn set_personal(info: &mut PersonalInfo, field: PersonalField, value: &str) {
    match field {
        PersonalField::FullName => info.full_name = value.to_string(),
        PersonalField::Email => info.email = value.to_string(),
        PersonalField::Phone => info.phone = value.to_string(),
        PersonalField::Location => info.location = value.to_string(),
        PersonalField::Linkedin => info.linkedin = optional(value),
        PersonalField::Github => info.github = optional(value),
        PersonalField::Website => info.website = optional(value),
        PersonalField::Summary => info.summary = optional(value),
    }
}

fn set_experience(entry: &mut ExperienceEntry, field: &str, value: &str) -> Result<()> {
    match normalize(field).as_str() {
        "company" => entry.company = value.to_string(),
        "position" | "title" => entry.position = value.to_string(),
        "location" => entry.location = optional(value),
        "startdate" => entry.start_date = month("startDate", value)?,
        "enddate" => entry.end_date = month("endDate", value)?,
        "iscurrentrole" | "current" => entry.is_current_role = flag(value)?,
        _ => return Err(unknown_field(Section::Experience, field)),
    }
    Ok(())
}

fn set_education(entry: &mut EducationEntry, field: &str, value: &str) -> Result<()> {
    match normalize(field).as_str() {
        "school" => entry.school = value.to_string(),
        "degree" => entry.degree = value.to_string(),
        "field" => entry.field = optional(value),
        "startdate" => entry.start_date = month("startDate", value)?,
        "enddate" => entry.end_date = month("endDate", value)?,
        "iscurrentrole" | "current" => entry.is_current_role = flag(value)?,
        "score" => entry.score = optional(value),
        _ => return Err(unknown_field(Section::Education, field)),
    }
    Ok(())
}

fn set_project(entry: &mut ProjectEntry, field: &str, value: &str) -> Result<()> {
    match normalize(field).as_str() {
        "name" => entry.name = value.to_string(),
        "description" => entry.description = value.to_string(),
        "technologies" => entry.technologies = value.to_string(),
        "link" => entry.link = optional(value),
        _ => return Err(unknown_field(Section::Projects, field)),
    }
    Ok(())
}

fn set_certification(entry: &mut CertificationEntry, field: &str, value: &str) -> Result<()> {
    match normalize(field).as_str() {
        "title" => entry.title = value.to_string(),
        "issuer" => entry.issuer = value.to_string(),
        "date" => entry.date = optional(&month("date", value)?),
        _ => return Err(unknown_field(Section::Certifications, field)),
    }
    Ok(())
}

fn set_skill(entry: &mut SkillEntry, field: &str, value: &str) -> Result<()> {
    match normalize(field).as_str() {
        "name" => entry.name = value.to_string(),
        "category" => entry.category = value.to_string(),
        _ => return Err(unknown_field(Section::Skills, field)),
    }
    Ok(())
}

fn move_item<T>(items: &mut Vec<T>, section: Section, from: usize, to: usize) -> Result<()> {
    let from = index_for(section, from, items.len())?;
    let to = index_for(section, to, items.len())?;
    let item = items.remove(from);
    items.insert(to, item);
    Ok(())
}

fn remove_item<T>(items: &mut Vec<T>, section: Section, position: usize) -> Result<()> {
    let index = index_for(section, position, items.len())?;
    items.remove(index);
    Ok(())
}

/// Apply `edit` to a copy of `document`; the input is never modified
pub fn apply_edit(document: &ResumeDocument, edit: &Edit) -> Result<ResumeDocument> {
    let mut next = document.clone();

    match edit {
        Edit::SetPersonalField { field, value } => {
            set_personal(next.personal_info.get_or_insert_with(PersonalInfo::default), *field, value);
        }
        Edit::SetEntryField { section, position, field, value } => {
            let index = index_for(*section, *position, section.len(&next))?;
            match section {
                Section::Experience => set_experience(&mut next.experience[index], field, value)?,
                Section::Education => set_education(&mut next.education[index], field, value)?,
                Section::Projects => set_project(&mut next.projects[index], field, value)?,
                Section::Certifications => set_certification(&mut next.certifications[index], field, value)?,
                Section::Skills => set_skill(&mut next.skills[index], field, value)?,
            }
        }
        Edit::AddEntry(section) => match section {
            Section::Experience => next.experience.push(ExperienceEntry::default()),
            Section::Education => next.education.push(EducationEntry::default()),
            Section::Projects => next.projects.push(ProjectEntry::default()),
            Section::Certifications => next.certifications.push(CertificationEntry::default()),
            Section::Skills => next.skills.push(SkillEntry::default()),
        },
        Edit::RemoveEntry { section, position } => match section {
            Section::Experience => remove_item(&mut next.experience, *section, *position)?,
            Section::Education => remove_item(&mut next.education, *section, *position)?,
            Section::Projects => remove_item(&mut next.projects, *section, *position)?,
            Section::Certifications => remove_item(&mut next.certifications, *section, *position)?,
            Section::Skills => remove_item(&mut next.skills, *section, *position)?,
        },
        Edit::MoveEntry { section, from, to } => match section {
            Section::Experience => move_item(&mut next.experience, *section, *from, *to)?,
            Section::Education => move_item(&mut next.education, *section, *from, *to)?,
            Section::Projects => move_item(&mut next.projects, *section, *from, *to)?,
            Section::Certifications => move_item(&mut next.certifications, *section, *from, *to)?,
            Section::Skills => move_item(&mut next.skills, *section, *from, *to)?,
        },
        Edit::AddBullet { position, text } => {
            let index = index_for(Section::Experience, *position, next.experience.len())?;
            next.experience[index].bullets.push(text.clone());
        }
        Edit::RemoveBullet { position, bullet } => {
            let index = index_for(Section::Experience, *position, next.experience.len())?;
            let bullets = &mut next.experience[index].bullets;
            if *bullet == 0 || *bullet > bullets.len() {
                return Err(ResumeCrafterError::InvalidEdit(format!(
                    "Experience {} has no bullet {}",
                    position, bullet
                )));
            }
            bullets.remove(bullet - 1);
        }
    }

    Ok(next)
}
