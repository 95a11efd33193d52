use axum::Json;
use serde::Serialize;

use crate::preferences::options::{
    entries, Audience, Gender, Goal, Language, Length, OptionEntry, Speaker, Tone,
};

#[derive(Debug, Serialize)]
pub struct OptionsCatalog {
    pub languages: Vec<OptionEntry>,
    pub goals: Vec<OptionEntry>,
    pub tones: Vec<OptionEntry>,
    pub speakers: Vec<OptionEntry>,
    pub genders: Vec<OptionEntry>,
    pub audiences: Vec<OptionEntry>,
    pub lengths: Vec<OptionEntry>,
}

pub fn options_catalog() -> OptionsCatalog {
    OptionsCatalog {
        languages: entries::<Language>(),
        goals: entries::<Goal>(),
        tones: entries::<Tone>(),
        speakers: entries::<Speaker>(),
        genders: entries::<Gender>(),
        audiences: entries::<Audience>(),
        lengths: entries::<Length>(),
    }
}

/// GET /api/v1/options
pub async fn handle_get_options() -> Json<OptionsCatalog> {
    Json(options_catalog())
}
