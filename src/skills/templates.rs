//! Built-in skill tree.

use super::{ActivityDifficulty, ActivityKind, PracticeActivity, Skill, SkillCategory};

const MAX_SKILL_LEVEL: u32 = 10;

fn activity(
    id: &str,
    title: &str,
    description: &str,
    xp_reward: u64,
    time_estimate: u32,
    difficulty: ActivityDifficulty,
    kind: ActivityKind,
) -> PracticeActivity {
    PracticeActivity {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        xp_reward,
        time_estimate,
        difficulty,
        kind,
        completed: false,
    }
}

/// Practice activities for a skill; skills without a curated list get a
/// generic three-step ladder.
pub fn practice_activities(skill_id: &str) -> Vec<PracticeActivity> {
    use ActivityDifficulty::*;
    use ActivityKind::*;

    match skill_id {
        "html-css" => vec![
            activity("html-1", "Build a Personal Portfolio", "Create a responsive portfolio website", 50, 120, Beginner, Project),
            activity("html-2", "CSS Grid Layout", "Master CSS Grid with practical exercises", 30, 60, Intermediate, Tutorial),
            activity("html-3", "Flexbox Challenge", "Complete flexbox layout challenges", 25, 45, Beginner, Exercise),
            activity("html-4", "Responsive Design", "Build mobile-first responsive layouts", 40, 90, Intermediate, Project),
        ],
        "javascript" => vec![
            activity("js-1", "DOM Manipulation", "Interactive web page with vanilla JS", 45, 75, Beginner, Project),
            activity("js-2", "Async Programming", "Master Promises and async/await", 60, 90, Intermediate, Tutorial),
            activity("js-3", "ES6+ Features", "Modern JavaScript features practice", 35, 60, Intermediate, Exercise),
            activity("js-4", "API Integration", "Fetch data from REST APIs", 55, 100, Intermediate, Project),
        ],
        "react" => vec![
            activity("react-1", "Todo App", "Build a React todo application", 70, 120, Beginner, Project),
            activity("react-2", "State Management", "Learn useState and useEffect hooks", 50, 80, Beginner, Tutorial),
            activity("react-3", "Component Patterns", "Advanced React patterns and practices", 80, 150, Advanced, Tutorial),
            activity("react-4", "E-commerce App", "Full-featured shopping cart application", 120, 300, Advanced, Project),
        ],
        "python" => vec![
            activity("python-1", "Data Analysis", "Analyze datasets with pandas", 60, 100, Intermediate, Project),
            activity("python-2", "Web Scraping", "Extract data from websites", 55, 90, Intermediate, Project),
            activity("python-3", "Algorithm Implementation", "Implement common algorithms", 45, 75, Intermediate, Exercise),
            activity("python-4", "REST API", "Build a REST API with Flask", 80, 150, Advanced, Project),
        ],
        _ => vec![
            activity(&format!("{}-1", skill_id), "Basic Practice", "Fundamental exercises", 30, 60, Beginner, Exercise),
            activity(&format!("{}-2", skill_id), "Intermediate Project", "Build a practical project", 60, 120, Intermediate, Project),
            activity(&format!("{}-3", skill_id), "Advanced Challenge", "Complex problem solving", 90, 180, Advanced, Challenge),
        ],
    }
}

fn skill(
    id: &str,
    name: &str,
    category: SkillCategory,
    xp_required: u64,
    unlocked: bool,
    prerequisites: &[&str],
    description: &str,
) -> Skill {
    Skill {
        id: id.to_string(),
        name: name.to_string(),
        category,
        level: 0,
        max_level: MAX_SKILL_LEVEL,
        xp: 0,
        xp_required,
        unlocked,
        prerequisites: prerequisites.iter().map(|p| p.to_string()).collect(),
        description: description.to_string(),
        practice_activities: practice_activities(id),
    }
}

/// The built-in skill list. Roots start unlocked.
pub fn default_skills() -> Vec<Skill> {
    use SkillCategory::*;

    vec![
        // Frontend
        skill("html-css", "HTML & CSS", Technical, 100, true, &[], "Structure and style web pages"),
        skill("javascript", "JavaScript", Technical, 150, false, &["html-css"], "The language of the web"),
        skill("react", "React", Technical, 200, false, &["javascript"], "Component-based UI library"),
        skill("typescript", "TypeScript", Technical, 180, false, &["javascript"], "Typed superset of JavaScript"),
        skill("vue", "Vue.js", Technical, 190, false, &["javascript"], "Progressive UI framework"),
        skill("angular", "Angular", Technical, 220, false, &["typescript"], "Full-featured frontend framework"),
        // Backend
        skill("nodejs", "Node.js", Technical, 170, false, &["javascript"], "JavaScript on the server"),
        skill("python", "Python", Technical, 160, true, &[], "General-purpose scripting language"),
        skill("django", "Django", Technical, 200, false, &["python"], "Batteries-included web framework"),
        skill("flask", "Flask", Technical, 180, false, &["python"], "Lightweight web framework"),
        skill("java", "Java", Technical, 190, true, &[], "Object-oriented JVM language"),
        skill("spring", "Spring Framework", Technical, 220, false, &["java"], "Enterprise Java framework"),
        // Data
        skill("sql", "SQL", Technical, 140, true, &[], "Query relational databases"),
        skill("mongodb", "MongoDB", Technical, 160, false, &["sql"], "Document database"),
        skill("postgresql", "PostgreSQL", Technical, 170, false, &["sql"], "Advanced relational database"),
        // DevOps
        skill("git", "Git", Technical, 120, true, &[], "Version control"),
        skill("docker", "Docker", Technical, 180, false, &["git"], "Containerize applications"),
        skill("kubernetes", "Kubernetes", Technical, 250, false, &["docker"], "Orchestrate containers"),
        skill("aws", "AWS", Technical, 200, false, &["docker"], "Cloud infrastructure"),
        skill("networking", "Networking", Technical, 160, true, &[], "Protocols and network fundamentals"),
        // Soft skills
        skill("communication", "Communication", Soft, 100, true, &[], "Explain ideas clearly"),
        skill("leadership", "Leadership", Soft, 150, false, &["communication"], "Guide and motivate teams"),
        skill("problem-solving", "Problem Solving", Soft, 130, true, &[], "Break down hard problems"),
        skill("time-management", "Time Management", Soft, 110, true, &[], "Prioritize and deliver"),
        skill("teamwork", "Teamwork", Soft, 120, false, &["communication"], "Collaborate effectively"),
        // Domains
        skill("web-development", "Web Development", Domain, 300, false, &["html-css", "javascript"], "Build complete web applications"),
        skill("mobile-development", "Mobile Development", Domain, 280, false, &["javascript"], "Build mobile applications"),
        skill("data-science", "Data Science", Domain, 320, false, &["python", "sql"], "Extract insight from data"),
        skill("machine-learning", "Machine Learning", Domain, 350, false, &["data-science"], "Train predictive models"),
        skill("cybersecurity", "Cybersecurity", Domain, 290, false, &["networking"], "Protect systems and data"),
    ]
}
