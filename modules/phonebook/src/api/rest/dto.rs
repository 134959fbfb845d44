use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::contract::model::{NewPerson, Person, PhonebookInfo};

/// REST DTO for a phonebook entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersonDto {
    pub id: Uuid,
    pub name: String,
    pub number: String,
}

/// REST DTO for create-or-update. Absent fields are treated like empty ones.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpsertPersonReq {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
}

/// Error body shared by all JSON error responses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorDto {
    pub error: String,
}

impl From<Person> for PersonDto {
    fn from(person: Person) -> Self {
        Self {
            id: person.id,
            name: person.name,
            number: person.number,
        }
    }
}

impl From<UpsertPersonReq> for NewPerson {
    fn from(req: UpsertPersonReq) -> Self {
        Self {
            name: req.name.unwrap_or_default(),
            number: req.number.unwrap_or_default(),
        }
    }
}

/// Human-readable info page: entry count and the time it was generated.
pub fn render_info(info: &PhonebookInfo) -> String {
    format!(
        "<p>Phonebook has info for {} people</p><p>{}</p>",
        info.count,
        info.generated_at.format("%a %b %d %Y %H:%M:%S GMT%z")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn absent_fields_become_empty() {
        let req: UpsertPersonReq = serde_json::from_str(r#"{"name":"Bob"}"#).unwrap();
        let new_person = NewPerson::from(req);
        assert_eq!(new_person.name, "Bob");
        assert_eq!(new_person.number, "");
    }

    #[test]
    fn person_serializes_with_string_id() {
        let id = Uuid::nil();
        let v = serde_json::to_value(PersonDto::from(Person {
            id,
            name: "Ada".into(),
            number: "123".into(),
        }))
        .unwrap();
        assert_eq!(
            v,
            serde_json::json!({
                "id": "00000000-0000-0000-0000-000000000000",
                "name": "Ada",
                "number": "123"
            })
        );
    }

    #[test]
    fn info_page_contains_count_and_timestamp() {
        let info = PhonebookInfo {
            count: 4,
            generated_at: chrono::Utc.with_ymd_and_hms(2024, 3, 5, 9, 7, 1).unwrap(),
        };
        assert_eq!(
            render_info(&info),
            "<p>Phonebook has info for 4 people</p><p>Tue Mar 05 2024 09:07:01 GMT+0000</p>"
        );
    }
}
