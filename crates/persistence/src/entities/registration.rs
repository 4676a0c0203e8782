//! Registration entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{Affiliation, Attendance, RegistrationRecord};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

/// Database row mapping for the registrations table.
#[derive(Debug, Clone, FromRow)]
pub struct RegistrationEntity {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub affiliation: String,
    pub net_id: Option<String>,
    pub graduation_year: Option<String>,
    pub program: Option<String>,
    pub attendance: String,
    pub questions: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

impl TryFrom<RegistrationEntity> for RegistrationRecord {
    type Error = String;

    fn try_from(entity: RegistrationEntity) -> Result<Self, Self::Error> {
        Ok(RegistrationRecord {
            first_name: entity.first_name,
            last_name: entity.last_name,
            email: entity.email,
            affiliation_type: Affiliation::from_str(&entity.affiliation)?,
            net_id: entity.net_id,
            graduation_year: entity.graduation_year,
            program: entity.program,
            attendance: Attendance::from_str(&entity.attendance)?,
            questions: entity.questions,
            timestamp: entity.submitted_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entity() -> RegistrationEntity {
        RegistrationEntity {
            id: Uuid::new_v4(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@x.com".to_string(),
            affiliation: "Alumni".to_string(),
            net_id: Some("al123".to_string()),
            graduation_year: Some("1843".to_string()),
            program: None,
            attendance: "Yes".to_string(),
            questions: None,
            submitted_at: Utc::now(),
        }
    }

    #[test]
    fn test_registration_entity_to_domain() {
        let entity = sample_entity();
        let record = RegistrationRecord::try_from(entity.clone()).unwrap();
        assert_eq!(record.first_name, entity.first_name);
        assert_eq!(record.affiliation_type, Affiliation::Alumni);
        assert_eq!(record.attendance, Attendance::Yes);
        assert_eq!(record.timestamp, entity.submitted_at);
    }

    #[test]
    fn test_registration_entity_rejects_unknown_affiliation() {
        let mut entity = sample_entity();
        entity.affiliation = "Faculty".to_string();
        assert!(RegistrationRecord::try_from(entity).is_err());
    }
}
