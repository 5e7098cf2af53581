use chrono::{Local, NaiveDate, Utc};
use clap::Subcommand;
use wastewise_core::{calendar_alert_url, Config};

#[derive(Subcommand)]
pub enum SurgeAction {
    /// Nearest festival on or after a date
    Next {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Predicted surge level for a date
    Assess {
        /// Date (YYYY-MM-DD), defaults to now
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List the festival calendar
    Festivals,
    /// Calendar reminder link for a festival
    AlertUrl {
        /// Festival name (case-insensitive)
        name: String,
    },
}

pub fn run(action: SurgeAction) -> Result<(), Box<dyn std::error::Error>> {
    let predictor = Config::load_or_default().surge_predictor()?;

    match action {
        SurgeAction::Next { date } => {
            let today = date.unwrap_or_else(|| Local::now().date_naive());
            match predictor.nearest_upcoming(today) {
                Some(festival) => println!("{}", serde_json::to_string_pretty(festival)?),
                None => println!("null"),
            }
        }
        SurgeAction::Assess { date } => {
            let assessment = match date {
                Some(date) => predictor.assess(date),
                None => predictor.assess_at(Utc::now()),
            };
            println!("{}", serde_json::to_string_pretty(&assessment)?);
        }
        SurgeAction::Festivals => {
            println!("{}", serde_json::to_string_pretty(predictor.festivals())?);
        }
        SurgeAction::AlertUrl { name } => {
            let festival = predictor
                .calendar()
                .find(&name)
                .ok_or_else(|| format!("unknown festival: {name}"))?;
            println!("{}", calendar_alert_url(festival)?);
        }
    }
    Ok(())
}
