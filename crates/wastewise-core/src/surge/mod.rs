//! Festival-driven waste surge prediction.

mod alert;
mod festival;
mod predictor;

pub use alert::{alert_title, calendar_alert_url};
pub use festival::{Festival, FestivalCalendar, FestivalWasteType, SurgeLevel};
pub use predictor::{
    assess_surge, nearest_upcoming, SurgeAssessment, SurgePredictor, DEFAULT_SURGE_WINDOW_DAYS,
};
