use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Portal role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Alumni,
}

impl FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "alumni" => Ok(Role::Alumni),
            _ => Err(anyhow::anyhow!("Invalid role: {}", s)),
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Alumni => write!(f, "alumni"),
        }
    }
}

/// A portal identity, keyed by email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graduation_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

impl Identity {
    pub fn admin(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            role: Role::Admin,
            graduation_year: None,
            degree: None,
            company: None,
        }
    }

    pub fn alumni(
        email: impl Into<String>,
        name: impl Into<String>,
        graduation_year: i32,
        degree: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            role: Role::Alumni,
            graduation_year: Some(graduation_year),
            degree: Some(degree.into()),
            company: None,
        }
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_str() {
        assert_eq!("Admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(Role::Alumni.to_string(), "alumni");
        assert!("guest".parse::<Role>().is_err());
    }

    #[test]
    fn test_alumni_profile_serialization_skips_empty_fields() {
        let admin = Identity::admin("admin@alumni.edu", "Portal Admin");
        let json = serde_json::to_value(&admin).unwrap();
        assert_eq!(json["role"], "admin");
        assert!(json.get("graduation_year").is_none());

        let alumni = Identity::alumni("a@alumni.edu", "A", 2019, "B.Tech").with_company("Acme");
        let json = serde_json::to_value(&alumni).unwrap();
        assert_eq!(json["graduation_year"], 2019);
        assert_eq!(json["company"], "Acme");
    }
}
