use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};

use crate::errors::Result;
use crate::guilds::guilds_errors::GuildError;
use crate::guilds::guilds_model::NewGuild;
use crate::guilds::guilds_traits::{GuildRepositoryTrait, GuildServiceTrait};
use crate::search::Guild;

pub struct GuildService {
    guild_repo: Arc<dyn GuildRepositoryTrait>,
}

impl GuildService {
    pub fn new(guild_repo: Arc<dyn GuildRepositoryTrait>) -> Self {
        GuildService { guild_repo }
    }
}

#[async_trait]
impl GuildServiceTrait for GuildService {
    async fn submit_guild(&self, input: NewGuild) -> Result<Guild> {
        let guild = input.validate()?;
        debug!(
            "Submitting {} guild '{}' with {} DAO(s)",
            guild.guild_type,
            guild.guildname,
            guild.daos.len()
        );
        let stored = self.guild_repo.insert_guild(guild).await.map_err(|e| {
            warn!("Guild submission failed: {}", e);
            GuildError::SubmitFailed(e.to_string())
        })?;
        debug!("Guild {} submitted", stored.id);
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::errors::{Error, ValidationError};
    use crate::guilds::guilds_model::{GuildType, NewGuildDao, ValidGuild};

    #[derive(Default)]
    struct MockGuildRepository {
        guilds: Mutex<Vec<ValidGuild>>,
        fail_with: Option<String>,
    }

    #[async_trait]
    impl GuildRepositoryTrait for MockGuildRepository {
        async fn insert_guild(&self, guild: ValidGuild) -> std::result::Result<Guild, GuildError> {
            if let Some(message) = &self.fail_with {
                return Err(GuildError::Backend(message.clone()));
            }
            let mut guilds = self.guilds.lock().unwrap();
            let stored = Guild {
                id: format!("guild-{}", guilds.len() + 1),
                guildname: guild.guildname.clone(),
                name: guild.name.clone(),
                logo: guild.logo_url.clone(),
            };
            guilds.push(guild);
            Ok(stored)
        }
    }

    fn metagame() -> NewGuild {
        NewGuild {
            guildname: "metagame".to_string(),
            name: "MetaGame".to_string(),
            logo_url: Some("https://metagame.wtf/logo.png".to_string()),
            guild_type: Some(GuildType::Project),
            daos: vec![NewGuildDao {
                contract_address: "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359".to_string(),
                ..NewGuildDao::placeholder()
            }],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_submit_guild() {
        let repo = Arc::new(MockGuildRepository::default());
        let service = GuildService::new(repo.clone());

        let guild = service.submit_guild(metagame()).await.unwrap();
        assert_eq!(guild.id, "guild-1");
        assert_eq!(guild.guildname, "metagame");
        assert_eq!(guild.logo.as_deref(), Some("https://metagame.wtf/logo.png"));

        let stored = repo.guilds.lock().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].daos.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_repository() {
        let repo = Arc::new(MockGuildRepository::default());
        let service = GuildService::new(repo.clone());

        let mut form = metagame();
        form.daos[0].contract_address = "0xnot-an-address".to_string();
        let error = service.submit_guild(form).await.unwrap_err();
        match error {
            Error::Validation(e) => {
                assert_eq!(e.field(), "daos.0.contractAddress");
                assert_eq!(e.message(), "Invalid contract address");
            }
            other => panic!("unexpected error: {}", other),
        }

        let error = service.submit_guild(NewGuild::default()).await.unwrap_err();
        assert!(matches!(
            error,
            Error::Validation(ValidationError::MissingField(_))
        ));
        assert!(repo.guilds.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_backend_failures_are_wrapped() {
        let service = GuildService::new(Arc::new(MockGuildRepository {
            fail_with: Some("guildname already taken".to_string()),
            ..Default::default()
        }));

        let error = service.submit_guild(metagame()).await.unwrap_err();
        assert!(matches!(error, Error::Guild(GuildError::SubmitFailed(_))));
        assert_eq!(
            error.to_string(),
            "Guild submission failed: Unable to submit guild. Error: guildname already taken"
        );
    }
}
