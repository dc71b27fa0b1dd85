//! Player link domain models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Kind of a profile link, stored as an upper-case enum value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LinkType {
    Discord,
    Github,
    Linkedin,
    Telegram,
    Twitter,
    Website,
    Youtube,
    Other,
}

impl LinkType {
    pub const ALL: [LinkType; 8] = [
        LinkType::Discord,
        LinkType::Github,
        LinkType::Linkedin,
        LinkType::Telegram,
        LinkType::Twitter,
        LinkType::Website,
        LinkType::Youtube,
        LinkType::Other,
    ];

    /// Enum value as stored by the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkType::Discord => "DISCORD",
            LinkType::Github => "GITHUB",
            LinkType::Linkedin => "LINKEDIN",
            LinkType::Telegram => "TELEGRAM",
            LinkType::Twitter => "TWITTER",
            LinkType::Website => "WEBSITE",
            LinkType::Youtube => "YOUTUBE",
            LinkType::Other => "OTHER",
        }
    }

    /// Label shown in the type selector, also used when a link has no name.
    pub fn label(&self) -> &'static str {
        match self {
            LinkType::Discord => "Discord",
            LinkType::Github => "GitHub",
            LinkType::Linkedin => "LinkedIn",
            LinkType::Telegram => "Telegram",
            LinkType::Twitter => "Twitter",
            LinkType::Website => "Website",
            LinkType::Youtube => "YouTube",
            LinkType::Other => "Other",
        }
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LinkType {
    type Err = ValidationError;

    /// Accepts either the stored value or the label, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        LinkType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s) || t.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::InvalidField {
                field: "type".to_string(),
                message: format!("Unknown link type '{}'", s),
            })
    }
}

/// A link shown in a player's profile section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerLink {
    pub id: String,
    pub player_id: String,
    pub name: Option<String>,
    pub url: String,
    #[serde(rename = "type")]
    pub link_type: LinkType,
}

impl PlayerLink {
    /// Name to render, falling back to the type label.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(self.link_type.label())
    }
}

/// Raw values of the add/edit link form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlayerLink {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "type", default)]
    pub link_type: Option<LinkType>,
}

/// Form values that passed validation, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidLink {
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub link_type: LinkType,
}

impl NewPlayerLink {
    /// Every field error, in form order, for inline rendering.
    pub fn field_errors(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if self.link_type.is_none() {
            errors.push(ValidationError::MissingField("type".to_string()));
        }
        if self.url.trim().is_empty() {
            errors.push(ValidationError::MissingField("url".to_string()));
        }
        errors
    }

    /// Validates the form. A blank name defaults to the type's wire value.
    pub fn validate(&self) -> Result<ValidLink, ValidationError> {
        if let Some(error) = self.field_errors().into_iter().next() {
            return Err(error);
        }
        let link_type = self
            .link_type
            .ok_or_else(|| ValidationError::MissingField("type".to_string()))?;

        let name = match self.name.trim() {
            "" => link_type.as_str().to_string(),
            name => name.to_string(),
        };

        Ok(ValidLink {
            name,
            url: self.url.trim().to_string(),
            link_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_type_and_url() {
        let form = NewPlayerLink::default();
        let errors = form.field_errors();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field(), "type");
        assert_eq!(errors[1].field(), "url");
        assert!(errors
            .iter()
            .all(|e| e.message() == "This is a required field."));

        let form = NewPlayerLink {
            url: "   ".to_string(),
            link_type: Some(LinkType::Github),
            ..Default::default()
        };
        assert_eq!(
            form.validate(),
            Err(ValidationError::MissingField("url".to_string()))
        );
    }

    #[test]
    fn test_blank_name_defaults_to_type_value() {
        let form = NewPlayerLink {
            name: " ".to_string(),
            url: " https://github.com/metafam ".to_string(),
            link_type: Some(LinkType::Github),
        };
        let link = form.validate().unwrap();
        assert_eq!(link.name, "GITHUB");
        assert_eq!(link.url, "https://github.com/metafam");

        let form = NewPlayerLink {
            name: "My code".to_string(),
            ..form
        };
        assert_eq!(form.validate().unwrap().name, "My code");
    }

    #[test]
    fn test_link_type_parsing() {
        assert_eq!("TWITTER".parse::<LinkType>().unwrap(), LinkType::Twitter);
        assert_eq!("youtube".parse::<LinkType>().unwrap(), LinkType::Youtube);
        assert_eq!("LinkedIn".parse::<LinkType>().unwrap(), LinkType::Linkedin);

        let error = "myspace".parse::<LinkType>().unwrap_err();
        assert_eq!(error.field(), "type");
    }

    #[test]
    fn test_link_serde_uses_type_key() {
        let json = r#"{"id":"l1","playerId":"p1","name":null,"url":"https://x.com/a","type":"TWITTER"}"#;
        let link: PlayerLink = serde_json::from_str(json).unwrap();
        assert_eq!(link.link_type, LinkType::Twitter);
        assert_eq!(link.display_name(), "Twitter");

        let value = serde_json::to_value(&link).unwrap();
        assert_eq!(value["type"], "TWITTER");
        assert_eq!(value["playerId"], "p1");
    }
}
