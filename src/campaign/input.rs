use std::convert::TryFrom;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

use super::CampaignStatus;

/// A budget as it arrives from a form or a json client. Forms send text,
/// scripts tend to send plain numbers.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum BudgetField {
    Number(f64),
    Text(String),
}

impl BudgetField {
    fn is_blank(&self) -> bool {
        match self {
            BudgetField::Number(_) => false,
            BudgetField::Text(text) => text.trim().is_empty(),
        }
    }

    fn to_number(&self) -> Option<f64> {
        let number = match self {
            BudgetField::Number(number) => *number,
            BudgetField::Text(text) => text.trim().parse().ok()?,
        };

        Some(number).filter(|number| number.is_finite())
    }
}

impl From<&str> for BudgetField {
    fn from(text: &str) -> BudgetField {
        BudgetField::Text(text.to_owned())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCampaignBody {
    pub name: Option<String>,
    pub budget: Option<BudgetField>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
}

/// A campaign that passed validation and is ready to be persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct NewCampaign {
    pub name: String,
    pub budget: f64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: CampaignStatus,
}

impl TryFrom<CreateCampaignBody> for NewCampaign {
    type Error = Error;

    fn try_from(body: CreateCampaignBody) -> Result<NewCampaign, Error> {
        let (name, budget, start_date, end_date, status) = match (
            filled(body.name),
            body.budget.filter(|budget| !budget.is_blank()),
            filled(body.start_date),
            filled(body.end_date),
            filled(body.status),
        ) {
            (Some(name), Some(budget), Some(start), Some(end), Some(status)) => {
                (name, budget, start, end, status)
            }
            _ => return Err(Error::MissingFields),
        };

        let budget = budget.to_number().ok_or(Error::BudgetNotANumber)?;
        if budget < 0.0 {
            return Err(Error::BudgetIsNegative);
        }

        let start_date = parse_date(&start_date).ok_or(Error::InvalidDate)?;
        let end_date = parse_date(&end_date).ok_or(Error::InvalidDate)?;

        let status = status.parse().map_err(|_| Error::UnknownStatus {
            status: status.clone(),
        })?;

        Ok(NewCampaign {
            name: name.trim().to_owned(),
            budget,
            start_date,
            end_date,
            status,
        })
    }
}

fn filled(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.trim().is_empty())
}

/// Accepts a bare calendar date (taken as midnight UTC) or a full RFC 3339
/// timestamp.
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }

    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|date| date.with_timezone(&Utc))
}
