//! Event registration domain models.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Column order for exported registration documents.
pub const CSV_HEADER: [&str; 10] = [
    "First Name",
    "Last Name",
    "Email",
    "Affiliation",
    "NetID",
    "Graduation Year",
    "Program",
    "Attendance",
    "Questions",
    "Timestamp",
];

/// Registrant's relationship to the program.
///
/// Determines which additional submission fields are mandatory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Affiliation {
    #[serde(rename = "Current Class")]
    CurrentClass,
    #[serde(rename = "Incoming Class")]
    IncomingClass,
    Alumni,
    #[serde(rename = "Outside of Cornell")]
    OutsideCornell,
}

impl Affiliation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Affiliation::CurrentClass => "Current Class",
            Affiliation::IncomingClass => "Incoming Class",
            Affiliation::Alumni => "Alumni",
            Affiliation::OutsideCornell => "Outside of Cornell",
        }
    }

    /// Additional submission fields that are mandatory for this affiliation.
    ///
    /// Every caller goes through this table; there are no per-endpoint
    /// affiliation checks anywhere else.
    pub fn required_extras(&self) -> &'static [&'static str] {
        match self {
            Affiliation::CurrentClass | Affiliation::IncomingClass => &["netId", "program"],
            Affiliation::Alumni => &["netId", "graduationYear"],
            Affiliation::OutsideCornell => &[],
        }
    }
}

impl FromStr for Affiliation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Current Class" => Ok(Affiliation::CurrentClass),
            "Incoming Class" => Ok(Affiliation::IncomingClass),
            "Alumni" => Ok(Affiliation::Alumni),
            "Outside of Cornell" => Ok(Affiliation::OutsideCornell),
            _ => Err(format!("Invalid affiliation: {}", s)),
        }
    }
}

impl fmt::Display for Affiliation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether the registrant plans to attend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Attendance {
    Yes,
    Maybe,
    No,
}

impl Attendance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Attendance::Yes => "Yes",
            Attendance::Maybe => "Maybe",
            Attendance::No => "No",
        }
    }
}

impl FromStr for Attendance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Yes" => Ok(Attendance::Yes),
            "Maybe" => Ok(Attendance::Maybe),
            "No" => Ok(Attendance::No),
            _ => Err(format!("Invalid attendance choice: {}", s)),
        }
    }
}

impl fmt::Display for Attendance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw sign-up form payload as submitted by a client.
///
/// Every field arrives as text or empty. Unknown fields, including any
/// client-supplied timestamp, are dropped during deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationSubmission {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub affiliation_type: String,
    pub net_id: String,
    pub graduation_year: String,
    pub program: String,
    pub attendance: String,
    pub questions: String,
}

/// One accepted registration. Immutable once created; the timestamp is
/// assigned server-side at acceptance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub affiliation_type: Affiliation,
    pub net_id: Option<String>,
    pub graduation_year: Option<String>,
    pub program: Option<String>,
    pub attendance: Attendance,
    pub questions: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl RegistrationRecord {
    /// Field values in export column order (see [`CSV_HEADER`]).
    ///
    /// Empty optionals serialize to empty strings, never a placeholder word.
    pub fn csv_fields(&self) -> [String; 10] {
        [
            self.first_name.clone(),
            self.last_name.clone(),
            self.email.clone(),
            self.affiliation_type.to_string(),
            self.net_id.clone().unwrap_or_default(),
            self.graduation_year.clone().unwrap_or_default(),
            self.program.clone().unwrap_or_default(),
            self.attendance.to_string(),
            self.questions.clone().unwrap_or_default(),
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        ]
    }

    /// Rebuilds a record from decoded CSV fields in export column order.
    pub fn from_csv_fields(fields: &[String]) -> Result<Self, String> {
        if fields.len() != CSV_HEADER.len() {
            return Err(format!(
                "expected {} fields, found {}",
                CSV_HEADER.len(),
                fields.len()
            ));
        }

        let timestamp = DateTime::parse_from_rfc3339(&fields[9])
            .map_err(|e| format!("invalid timestamp {:?}: {}", fields[9], e))?
            .with_timezone(&Utc);

        Ok(RegistrationRecord {
            first_name: fields[0].clone(),
            last_name: fields[1].clone(),
            email: fields[2].clone(),
            affiliation_type: Affiliation::from_str(&fields[3])?,
            net_id: non_empty(&fields[4]),
            graduation_year: non_empty(&fields[5]),
            program: non_empty(&fields[6]),
            attendance: Attendance::from_str(&fields[7])?,
            questions: non_empty(&fields[8]),
            timestamp,
        })
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_record() -> RegistrationRecord {
        RegistrationRecord {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@x.com".to_string(),
            affiliation_type: Affiliation::Alumni,
            net_id: Some("al123".to_string()),
            graduation_year: Some("1843".to_string()),
            program: None,
            attendance: Attendance::Yes,
            questions: None,
            timestamp: Utc.with_ymd_and_hms(2025, 6, 4, 19, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_affiliation_as_str() {
        assert_eq!(Affiliation::CurrentClass.as_str(), "Current Class");
        assert_eq!(Affiliation::IncomingClass.as_str(), "Incoming Class");
        assert_eq!(Affiliation::Alumni.as_str(), "Alumni");
        assert_eq!(Affiliation::OutsideCornell.as_str(), "Outside of Cornell");
    }

    #[test]
    fn test_affiliation_from_str() {
        assert_eq!(
            Affiliation::from_str("Current Class").unwrap(),
            Affiliation::CurrentClass
        );
        assert_eq!(
            Affiliation::from_str("Outside of Cornell").unwrap(),
            Affiliation::OutsideCornell
        );
        assert!(Affiliation::from_str("Faculty").is_err());
        assert!(Affiliation::from_str("alumni").is_err());
    }

    #[test]
    fn test_affiliation_required_extras() {
        assert_eq!(
            Affiliation::CurrentClass.required_extras(),
            &["netId", "program"]
        );
        assert_eq!(
            Affiliation::IncomingClass.required_extras(),
            &["netId", "program"]
        );
        assert_eq!(
            Affiliation::Alumni.required_extras(),
            &["netId", "graduationYear"]
        );
        assert!(Affiliation::OutsideCornell.required_extras().is_empty());
    }

    #[test]
    fn test_attendance_round_trip() {
        for attendance in [Attendance::Yes, Attendance::Maybe, Attendance::No] {
            assert_eq!(
                Attendance::from_str(attendance.as_str()).unwrap(),
                attendance
            );
        }
        assert!(Attendance::from_str("Probably").is_err());
    }

    #[test]
    fn test_submission_deserializes_camel_case_with_defaults() {
        let submission: RegistrationSubmission = serde_json::from_str(
            r#"{"firstName":"Ada","lastName":"Lovelace","email":"ada@x.com","affiliationType":"Alumni"}"#,
        )
        .unwrap();
        assert_eq!(submission.first_name, "Ada");
        assert_eq!(submission.affiliation_type, "Alumni");
        assert_eq!(submission.net_id, "");
        assert_eq!(submission.attendance, "");
    }

    #[test]
    fn test_submission_ignores_client_timestamp() {
        let submission: RegistrationSubmission = serde_json::from_str(
            r#"{"firstName":"Ada","timestamp":"1999-01-01T00:00:00.000Z"}"#,
        )
        .unwrap();
        assert_eq!(submission.first_name, "Ada");
    }

    #[test]
    fn test_record_serializes_wire_strings() {
        let json = serde_json::to_string(&sample_record()).unwrap();
        assert!(json.contains("\"affiliationType\":\"Alumni\""));
        assert!(json.contains("\"attendance\":\"Yes\""));
        assert!(json.contains("\"firstName\":\"Ada\""));
    }

    #[test]
    fn test_csv_fields_order_and_empty_optionals() {
        let fields = sample_record().csv_fields();
        assert_eq!(fields[0], "Ada");
        assert_eq!(fields[3], "Alumni");
        assert_eq!(fields[4], "al123");
        assert_eq!(fields[5], "1843");
        assert_eq!(fields[6], "");
        assert_eq!(fields[7], "Yes");
        assert_eq!(fields[8], "");
        assert_eq!(fields[9], "2025-06-04T19:30:00.000Z");
    }

    #[test]
    fn test_csv_fields_round_trip() {
        let record = sample_record();
        let fields = record.csv_fields();
        let rebuilt = RegistrationRecord::from_csv_fields(&fields).unwrap();
        assert_eq!(rebuilt, record);
    }

    #[test]
    fn test_from_csv_fields_rejects_wrong_arity() {
        let err = RegistrationRecord::from_csv_fields(&["Ada".to_string()]).unwrap_err();
        assert!(err.contains("expected 10 fields"));
    }
}
