//! Domain model for the Users/ZipCodes service, plus random test-data
//! generators.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A user record, as exchanged with the `/users` endpoints.
///
/// Field names on the wire are PascalCase (`Name`, `Age`, `Sex`, `ZipCode`).
/// Equality compares all four fields, which is what the endpoint tests rely
/// on when diffing expected against received lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    pub name: String,
    pub age: Option<u32>,
    pub sex: Sex,
    pub zip_code: Option<String>,
}

impl User {
    /// Generate a user with random name, age, sex, and zip code.
    pub fn random() -> Self {
        Self {
            name: random_name(),
            age: Some(random_age()),
            sex: random_sex(),
            zip_code: Some(random_zip_code()),
        }
    }
}

/// Sex of a user; `MALE` or `FEMALE` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sex {
    Male,
    Female,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => write!(f, "MALE"),
            Self::Female => write!(f, "FEMALE"),
        }
    }
}

const FIRST_NAMES: [&str; 10] = [
    "John", "Emma", "Michael", "Sophia", "James", "Olivia", "William", "Isabella", "David",
    "Emily",
];

const LAST_NAMES: [&str; 10] = [
    "Smith",
    "Johnson",
    "Williams",
    "Brown",
    "Jones",
    "Garcia",
    "Miller",
    "Davis",
    "Rodriguez",
    "Martinez",
];

/// Generate a random "First Last" name from the fixed name pools.
pub fn random_name() -> String {
    let mut rng = rand::thread_rng();
    let first = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
    let last = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];
    format!("{} {}", first, last)
}

/// Generate a random age in `0..100`.
pub fn random_age() -> u32 {
    rand::thread_rng().gen_range(0..100)
}

/// Generate a random sex.
pub fn random_sex() -> Sex {
    if rand::thread_rng().gen_bool(0.5) {
        Sex::Male
    } else {
        Sex::Female
    }
}

/// Generate a random five-digit zip code.
pub fn random_zip_code() -> String {
    rand::thread_rng().gen_range(10_000..100_000).to_string()
}

/// Generate `count` distinct five-character zip codes.
///
/// Derived from UUIDs so batches never collide with each other or with the
/// seeded codes.
pub fn unique_zip_codes(count: usize) -> Vec<String> {
    (0..count)
        .map(|_| {
            let mut code = Uuid::new_v4().simple().to_string();
            code.truncate(5);
            code
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_serializes_pascal_case() {
        let user = User {
            name: "Emma Jones".to_string(),
            age: Some(6),
            sex: Sex::Male,
            zip_code: Some("12345".to_string()),
        };

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "Name": "Emma Jones",
                "Age": 6,
                "Sex": "MALE",
                "ZipCode": "12345"
            })
        );
    }

    #[test]
    fn test_user_round_trips_with_null_fields() {
        let json = r#"{"Name":"David Smith","Age":24,"Sex":"MALE","ZipCode":null}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.zip_code, None);

        let back = serde_json::to_string(&user).unwrap();
        let reparsed: User = serde_json::from_str(&back).unwrap();
        assert_eq!(user, reparsed);
    }

    #[test]
    fn test_user_equality_compares_all_fields() {
        let user = User {
            name: "Sophia Miller".to_string(),
            age: Some(59),
            sex: Sex::Female,
            zip_code: None,
        };
        let mut other = user.clone();
        assert_eq!(user, other);

        other.age = Some(60);
        assert_ne!(user, other);
    }

    #[test]
    fn test_random_age_is_in_range() {
        for _ in 0..100 {
            assert!(random_age() < 100);
        }
    }

    #[test]
    fn test_random_zip_code_is_five_digits() {
        for _ in 0..100 {
            let code = random_zip_code();
            assert_eq!(code.len(), 5);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_random_name_comes_from_pools() {
        let name = random_name();
        let (first, last) = name.split_once(' ').unwrap();
        assert!(FIRST_NAMES.contains(&first));
        assert!(LAST_NAMES.contains(&last));
    }

    #[test]
    fn test_unique_zip_codes_are_distinct() {
        let codes = unique_zip_codes(50);
        assert_eq!(codes.len(), 50);
        assert!(codes.iter().all(|code| code.len() == 5));

        let mut deduped = codes.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), codes.len());
    }
}
