use chrono::NaiveDate;

use crate::server::{
    data::apprenticeship::ApprenticeshipRepository, error::AppError,
    model::apprenticeship::{Apprenticeship, ApprenticeshipSource},
};
use test_utils::{builder::TestBuilder, factory::apprenticeship::ApprenticeshipFactory};

mod existing_ids;
mod get_active;
mod insert_many;

fn listing(id: &str, closes_on: Option<NaiveDate>) -> Apprenticeship {
    Apprenticeship {
        id: id.to_string(),
        title: format!("Apprentice {}", id),
        company: "Acme".to_string(),
        location: "London".to_string(),
        salary: "£20,000 a year".to_string(),
        closes_on,
        posted_on: None,
        category: "Digital".to_string(),
        url: format!(
            "https://www.findapprenticeship.service.gov.uk/apprenticeship/{}",
            id
        ),
        source: ApprenticeshipSource::FindAnApprenticeship,
    }
}
