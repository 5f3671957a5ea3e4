//! Static project catalog shown as pit stops on the track.
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

const DEFAULT_PROJECT_DATA: &str =
    include_str!("../../fastlane-web/static/assets/data/projects.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectCategory {
    Frontend,
    Backend,
    Fullstack,
    Mobile,
    Ai,
    #[default]
    #[serde(other)]
    Other,
}

impl ProjectCategory {
    #[must_use]
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Frontend => "🎨",
            Self::Backend => "⚙️",
            Self::Fullstack => "🚀",
            Self::Mobile => "📱",
            Self::Ai => "🤖",
            Self::Other => "💡",
        }
    }
}

/// Marker coordinates inside the 800x600 track viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub short_description: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub demo_url: Option<String>,
    #[serde(default)]
    pub code_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    pub position: Position,
    #[serde(default)]
    pub problems: Vec<String>,
    #[serde(default)]
    pub category: ProjectCategory,
}

impl Project {
    /// First two words of the title, used as the marker label.
    #[must_use]
    pub fn marker_label(&self) -> String {
        self.title
            .split(' ')
            .take(2)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProjectCatalog {
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl ProjectCatalog {
    #[must_use]
    pub fn load_from_static() -> Self {
        serde_json::from_str(DEFAULT_PROJECT_DATA).unwrap_or_else(|err| {
            log::warn!("bundled project catalog failed to parse: {err}");
            Self::default()
        })
    }

    #[must_use]
    pub fn default_catalog() -> &'static Self {
        static CATALOG: OnceLock<ProjectCatalog> = OnceLock::new();
        CATALOG.get_or_init(Self::load_from_static)
    }

    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into a project catalog.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        self.projects.iter().map(|p| p.id.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TOTAL_PIT_STOPS;
    use std::collections::HashSet;

    #[test]
    fn bundled_catalog_has_one_project_per_pit_stop() {
        let catalog = ProjectCatalog::load_from_static();
        assert_eq!(catalog.projects.len(), TOTAL_PIT_STOPS);
        let ids: HashSet<_> = catalog.ids().into_iter().collect();
        assert_eq!(ids.len(), TOTAL_PIT_STOPS);
        for project in &catalog.projects {
            assert!((0.0..=800.0).contains(&project.position.x), "{}", project.id);
            assert!((0.0..=600.0).contains(&project.position.y), "{}", project.id);
        }
    }

    #[test]
    fn unknown_category_maps_to_other() {
        let json = r#"{"projects": [{
            "id": "x", "title": "Solo", "description": "d", "shortDescription": "s",
            "position": {"x": 1, "y": 2}, "category": "embedded"
        }]}"#;
        let catalog = ProjectCatalog::from_json(json).unwrap();
        let project = catalog.get("x").unwrap();
        assert_eq!(project.category, ProjectCategory::Other);
        assert_eq!(project.category.emoji(), "💡");
        assert_eq!(project.marker_label(), "Solo");
        assert!(project.tech_stack.is_empty());
    }

    #[test]
    fn marker_label_keeps_two_words() {
        let catalog = ProjectCatalog::default_catalog();
        let project = catalog.get("paddock-pass").unwrap();
        assert_eq!(project.marker_label(), "Paddock Pass");
    }
}
