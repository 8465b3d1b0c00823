//! Contact-form data models.

use serde::{Deserialize, Serialize};

/// Age bracket selected on the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeBracket {
    Under20,
    Twenties,
    Thirties,
    Forties,
    Fifties,
    SixtyPlus,
}

impl std::fmt::Display for AgeBracket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Under20 => "under 20",
            Self::Twenties => "20-30",
            Self::Thirties => "31-40",
            Self::Forties => "41-50",
            Self::Fifties => "51-60",
            Self::SixtyPlus => "61+",
        };
        write!(f, "{s}")
    }
}

impl AgeBracket {
    pub const ALL: [AgeBracket; 6] = [
        Self::Under20,
        Self::Twenties,
        Self::Thirties,
        Self::Forties,
        Self::Fifties,
        Self::SixtyPlus,
    ];
}

/// Prior investment experience selected on the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Experience {
    None,
    OneToThreeYears,
    ThreeToTenYears,
    TenPlusYears,
}

impl std::fmt::Display for Experience {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::None => "none",
            Self::OneToThreeYears => "1-3 years",
            Self::ThreeToTenYears => "3-10 years",
            Self::TenPlusYears => "10+ years",
        };
        write!(f, "{s}")
    }
}

impl Experience {
    pub const ALL: [Experience; 4] = [
        Self::None,
        Self::OneToThreeYears,
        Self::ThreeToTenYears,
        Self::TenPlusYears,
    ];
}

/// User-supplied contact fields collected before the questionnaire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    pub phone: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<AgeBracket>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<Experience>,
}

impl ContactInfo {
    /// The Contact → Section A guard: name, email and an age bracket are
    /// required. Phone and experience are optional.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.email.trim().is_empty() && self.age.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_contact_is_incomplete() {
        assert!(!ContactInfo::default().is_complete());
    }

    #[test]
    fn completeness_requires_name_email_and_age() {
        let mut contact = ContactInfo {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            ..Default::default()
        };
        assert!(!contact.is_complete(), "age bracket still missing");

        contact.age = Some(AgeBracket::Thirties);
        assert!(contact.is_complete());

        contact.name = "   ".to_string();
        assert!(!contact.is_complete(), "whitespace name does not count");
    }

    #[test]
    fn phone_and_experience_are_optional() {
        let contact = ContactInfo {
            name: "Bob".to_string(),
            email: "bob@example.com".to_string(),
            age: Some(AgeBracket::Fifties),
            ..Default::default()
        };
        assert!(contact.is_complete());
    }

    #[test]
    fn contact_serde_roundtrip() {
        let contact = ContactInfo {
            name: "Carol".to_string(),
            phone: "0912-345-678".to_string(),
            email: "carol@example.com".to_string(),
            age: Some(AgeBracket::Twenties),
            experience: Some(Experience::OneToThreeYears),
        };
        let json = serde_json::to_string(&contact).unwrap();
        let parsed: ContactInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, contact);
    }

    #[test]
    fn enum_serde_is_snake_case() {
        assert_eq!(
            serde_json::to_string(&AgeBracket::SixtyPlus).unwrap(),
            "\"sixty_plus\""
        );
        assert_eq!(
            serde_json::to_string(&Experience::TenPlusYears).unwrap(),
            "\"ten_plus_years\""
        );
    }
}
