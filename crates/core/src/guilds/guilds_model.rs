//! Guild submission form models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};

use crate::errors::ValidationError;

pub const GUILDNAME_MIN_LENGTH: usize = 3;
pub const GUILDNAME_MAX_LENGTH: usize = 50;
pub const NAME_MIN_LENGTH: usize = 3;

pub const INVALID_ADDRESS_MESSAGE: &str = "Invalid contract address";
pub const EMPTY_ROLES_MESSAGE: &str = "Select at least one role.";

/// Kind of guild, stored as an upper-case enum value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GuildType {
    Archetype,
    Funding,
    Project,
    Social,
    Service,
}

impl GuildType {
    pub const ALL: [GuildType; 5] = [
        GuildType::Archetype,
        GuildType::Funding,
        GuildType::Project,
        GuildType::Social,
        GuildType::Service,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GuildType::Archetype => "ARCHETYPE",
            GuildType::Funding => "FUNDING",
            GuildType::Project => "PROJECT",
            GuildType::Social => "SOCIAL",
            GuildType::Service => "SERVICE",
        }
    }
}

impl fmt::Display for GuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GuildType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        GuildType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::InvalidField {
                field: "type".to_string(),
                message: format!("Unknown guild type '{}'", s),
            })
    }
}

/// Chain a related DAO contract lives on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DaoNetwork {
    #[default]
    Mainnet,
    Polygon,
    Gnosis,
}

impl DaoNetwork {
    pub fn as_str(&self) -> &'static str {
        match self {
            DaoNetwork::Mainnet => "mainnet",
            DaoNetwork::Polygon => "polygon",
            DaoNetwork::Gnosis => "gnosis",
        }
    }
}

/// One row of the "Related DAOs" list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGuildDao {
    #[serde(default)]
    pub contract_address: String,
    #[serde(default)]
    pub network: Option<DaoNetwork>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl NewGuildDao {
    /// Row appended by "Add a DAO": empty address on mainnet.
    pub fn placeholder() -> Self {
        Self {
            network: Some(DaoNetwork::Mainnet),
            ..Default::default()
        }
    }
}

/// Raw values of the guild submission form.
///
/// `None` role lists mean the form does not ask for Discord roles, which is
/// the case until the guild's Discord server is connected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGuild {
    #[serde(default)]
    pub guildname: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub discord_invite_url: Option<String>,
    #[serde(default)]
    pub join_url: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub twitter_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(rename = "type", default)]
    pub guild_type: Option<GuildType>,
    #[serde(default)]
    pub discord_admin_roles: Option<Vec<String>>,
    #[serde(default)]
    pub discord_membership_roles: Option<Vec<String>>,
    #[serde(default)]
    pub daos: Vec<NewGuildDao>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidGuildDao {
    pub contract_address: String,
    pub network: DaoNetwork,
    pub label: Option<String>,
    pub url: Option<String>,
}

/// Form values that passed validation, ready to be submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidGuild {
    pub guildname: String,
    pub name: String,
    pub description: Option<String>,
    pub discord_invite_url: Option<String>,
    pub join_url: Option<String>,
    pub logo_url: Option<String>,
    pub website_url: Option<String>,
    pub twitter_url: Option<String>,
    pub github_url: Option<String>,
    #[serde(rename = "type")]
    pub guild_type: GuildType,
    pub discord_admin_roles: Vec<String>,
    pub discord_membership_roles: Vec<String>,
    pub daos: Vec<ValidGuildDao>,
}

fn invalid(field: &str, message: impl Into<String>) -> ValidationError {
    ValidationError::InvalidField {
        field: field.to_string(),
        message: message.into(),
    }
}

fn check_length(
    field: &str,
    value: &str,
    min: usize,
    max: Option<usize>,
    errors: &mut Vec<ValidationError>,
) {
    let len = value.trim().chars().count();
    if len == 0 {
        errors.push(ValidationError::MissingField(field.to_string()));
    } else if len < min {
        errors.push(invalid(field, format!("Must be at least {} characters.", min)));
    } else if let Some(max) = max.filter(|max| len > *max) {
        errors.push(invalid(field, format!("Must be no more than {} characters.", max)));
    }
}

fn check_roles(field: &str, roles: &Option<Vec<String>>, errors: &mut Vec<ValidationError>) {
    if roles.as_ref().is_some_and(|r| r.is_empty()) {
        errors.push(invalid(field, EMPTY_ROLES_MESSAGE));
    }
}

fn optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// EIP-55 mixed-case form of a 20-byte hex address.
pub fn checksum_address(address: &str) -> Option<String> {
    let body = address.strip_prefix("0x")?;
    if body.len() != 40 || hex::decode(body).is_err() {
        return None;
    }
    let lower = body.to_ascii_lowercase();
    let hash = hex::encode(Keccak256::digest(lower.as_bytes()));

    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (c, h) in lower.chars().zip(hash.chars()) {
        // letters are upper-cased where the hash nibble is 8 or more
        if c.is_ascii_alphabetic() && h >= '8' {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    Some(out)
}

/// Whether `address` is a `0x`-prefixed account address. Single-case
/// addresses carry no checksum; mixed-case ones must match EIP-55.
pub fn is_address(address: &str) -> bool {
    let Some(checksummed) = checksum_address(address) else {
        return false;
    };
    let body = &address[2..];
    let single_case = body == body.to_ascii_lowercase() || body == body.to_ascii_uppercase();
    single_case || address == checksummed
}

impl NewGuild {
    /// Every field error, in form order, for inline rendering.
    pub fn field_errors(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        check_length(
            "guildname",
            &self.guildname,
            GUILDNAME_MIN_LENGTH,
            Some(GUILDNAME_MAX_LENGTH),
            &mut errors,
        );
        check_length("name", &self.name, NAME_MIN_LENGTH, None, &mut errors);
        if self.guild_type.is_none() {
            errors.push(ValidationError::MissingField("type".to_string()));
        }
        check_roles("discordAdminRoles", &self.discord_admin_roles, &mut errors);
        check_roles(
            "discordMembershipRoles",
            &self.discord_membership_roles,
            &mut errors,
        );

        for (index, dao) in self.daos.iter().enumerate() {
            if dao.network.is_none() {
                errors.push(ValidationError::MissingField(format!(
                    "daos.{}.network",
                    index
                )));
            }
            let field = format!("daos.{}.contractAddress", index);
            let address = dao.contract_address.trim();
            if address.is_empty() {
                errors.push(ValidationError::MissingField(field));
            } else if !is_address(address) {
                errors.push(invalid(&field, INVALID_ADDRESS_MESSAGE));
            }
        }
        errors
    }

    /// Validates the form and trims every value. Blank optional fields are
    /// dropped.
    pub fn validate(&self) -> Result<ValidGuild, ValidationError> {
        if let Some(error) = self.field_errors().into_iter().next() {
            return Err(error);
        }
        let guild_type = self
            .guild_type
            .ok_or_else(|| ValidationError::MissingField("type".to_string()))?;

        let daos = self
            .daos
            .iter()
            .map(|dao| ValidGuildDao {
                contract_address: dao.contract_address.trim().to_string(),
                network: dao.network.unwrap_or_default(),
                label: optional(&dao.label),
                url: optional(&dao.url),
            })
            .collect();

        Ok(ValidGuild {
            guildname: self.guildname.trim().to_string(),
            name: self.name.trim().to_string(),
            description: optional(&self.description),
            discord_invite_url: optional(&self.discord_invite_url),
            join_url: optional(&self.join_url),
            logo_url: optional(&self.logo_url),
            website_url: optional(&self.website_url),
            twitter_url: optional(&self.twitter_url),
            github_url: optional(&self.github_url),
            guild_type,
            discord_admin_roles: self.discord_admin_roles.clone().unwrap_or_default(),
            discord_membership_roles: self.discord_membership_roles.clone().unwrap_or_default(),
            daos,
        })
    }
}
