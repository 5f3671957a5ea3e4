use crate::game::Scene;
use yew_router::prelude::*;

#[derive(Clone, Debug, Routable, PartialEq, Eq)]
pub enum Route {
    #[at("/")]
    Garage,
    #[at("/track")]
    Track,
    #[at("/contact")]
    Contact,
    #[at("/404")]
    #[not_found]
    NotFound,
}

impl Route {
    #[must_use]
    pub const fn from_scene(scene: Scene) -> Self {
        match scene {
            Scene::Garage => Self::Garage,
            Scene::Track => Self::Track,
            Scene::Contact => Self::Contact,
        }
    }

    /// Unknown paths land in the garage.
    #[must_use]
    pub const fn to_scene(&self) -> Scene {
        match self {
            Self::Garage | Self::NotFound => Scene::Garage,
            Self::Track => Scene::Track,
            Self::Contact => Scene::Contact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_scene_round_trips_through_its_route() {
        for scene in Scene::ALL {
            assert_eq!(Route::from_scene(scene).to_scene(), scene);
        }
        assert_eq!(Route::NotFound.to_scene(), Scene::Garage);
    }

    #[test]
    fn paths_match_scene_names() {
        assert_eq!(Route::Garage.to_path(), "/");
        assert_eq!(Route::Track.to_path(), "/track");
        assert_eq!(Route::Contact.to_path(), "/contact");
    }
}
