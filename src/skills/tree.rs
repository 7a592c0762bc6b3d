//! Prerequisite walks over the skill DAG.

use std::collections::{HashMap, HashSet};

use super::Skill;

/// Why a skill cannot be unlocked.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrerequisiteError {
    #[error("Unknown skill: {0}")]
    UnknownSkill(String),

    #[error("Skill {skill} requires {prerequisite}, which is locked")]
    Locked { skill: String, prerequisite: String },

    #[error("Prerequisite cycle through {0}")]
    Cycle(String),
}

/// Check that every transitive prerequisite of `skill_id` is unlocked.
///
/// Walks the whole ancestor set depth first, so a locked grandparent blocks
/// the unlock even if the parent is unlocked.
pub fn check_prerequisites(skills: &[Skill], skill_id: &str) -> Result<(), PrerequisiteError> {
    let index: HashMap<&str, &Skill> = skills.iter().map(|s| (s.id.as_str(), s)).collect();
    if !index.contains_key(skill_id) {
        return Err(PrerequisiteError::UnknownSkill(skill_id.to_string()));
    }

    let mut visiting = HashSet::new();
    let mut done = HashSet::new();
    visit(&index, skill_id, &mut visiting, &mut done)
}

fn visit<'a>(
    index: &HashMap<&'a str, &'a Skill>,
    skill_id: &'a str,
    visiting: &mut HashSet<&'a str>,
    done: &mut HashSet<&'a str>,
) -> Result<(), PrerequisiteError> {
    if done.contains(skill_id) {
        return Ok(());
    }
    if !visiting.insert(skill_id) {
        return Err(PrerequisiteError::Cycle(skill_id.to_string()));
    }

    let skill: &'a Skill = index
        .get(skill_id)
        .copied()
        .ok_or_else(|| PrerequisiteError::UnknownSkill(skill_id.to_string()))?;

    for prerequisite in &skill.prerequisites {
        let parent: &'a Skill = index
            .get(prerequisite.as_str())
            .copied()
            .ok_or_else(|| PrerequisiteError::UnknownSkill(prerequisite.clone()))?;
        visit(index, parent.id.as_str(), visiting, done)?;
        if !parent.unlocked {
            return Err(PrerequisiteError::Locked {
                skill: skill.id.clone(),
                prerequisite: parent.id.clone(),
            });
        }
    }

    visiting.remove(skill_id);
    done.insert(skill_id);
    Ok(())
}

/// Ids of locked skills whose prerequisites are all satisfied.
pub fn unlockable_skills(skills: &[Skill]) -> Vec<String> {
    skills
        .iter()
        .filter(|s| !s.unlocked && check_prerequisites(skills, &s.id).is_ok())
        .map(|s| s.id.clone())
        .collect()
}
