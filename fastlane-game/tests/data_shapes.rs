use fastlane_game::{ProjectCatalog, ProjectCategory, ResumeData};

fn load_catalog() -> ProjectCatalog {
    ProjectCatalog::from_json(include_str!(
        "../../fastlane-web/static/assets/data/projects.json"
    ))
    .unwrap()
}

#[test]
fn every_project_has_display_fields() {
    let catalog = load_catalog();
    for project in &catalog.projects {
        assert!(!project.title.is_empty(), "{}", project.id);
        assert!(!project.short_description.is_empty(), "{}", project.id);
        assert!(!project.tech_stack.is_empty(), "{}", project.id);
        assert!(!project.problems.is_empty(), "{}", project.id);
        assert!(!project.marker_label().is_empty(), "{}", project.id);
    }
}

#[test]
fn catalog_categories_have_emoji() {
    let catalog = load_catalog();
    let categories: Vec<ProjectCategory> = catalog.projects.iter().map(|p| p.category).collect();
    assert!(categories.contains(&ProjectCategory::Frontend));
    for category in categories {
        assert!(!category.emoji().is_empty());
    }
}

#[test]
fn hosted_resume_matches_sidebar_needs() {
    let resume = ResumeData::from_json(include_str!("../../fastlane-web/static/resume.json")).unwrap();
    assert!(resume.info().email.contains('@'));
    assert!(!resume.education.is_empty());
    assert!(!resume.experience.is_empty());
}
