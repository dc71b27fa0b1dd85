use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};

use crate::errors::{Error, Result};
use crate::links::links_errors::LinkError;
use crate::links::links_model::{NewPlayerLink, PlayerLink};
use crate::links::links_traits::{LinkRepositoryTrait, LinkServiceTrait};

pub struct LinkService {
    link_repo: Arc<dyn LinkRepositoryTrait>,
}

impl LinkService {
    pub fn new(link_repo: Arc<dyn LinkRepositoryTrait>) -> Self {
        LinkService { link_repo }
    }
}

fn require_id(link_id: &str) -> Result<()> {
    if link_id.trim().is_empty() {
        return Err(LinkError::NotFound("missing link id".to_string()).into());
    }
    Ok(())
}

/// Keeps "not found" as is and wraps everything else with the action message.
fn failed(action: fn(String) -> LinkError, err: LinkError) -> Error {
    warn!("Link mutation failed: {}", err);
    match err {
        LinkError::NotFound(id) => LinkError::NotFound(id).into(),
        other => action(other.to_string()).into(),
    }
}

#[async_trait]
impl LinkServiceTrait for LinkService {
    async fn get_links(&self, player_id: &str) -> Result<Vec<PlayerLink>> {
        self.link_repo
            .load_links(player_id)
            .await
            .map_err(|e| failed(LinkError::LoadFailed, e))
    }

    async fn add_link(&self, player_id: &str, input: NewPlayerLink) -> Result<PlayerLink> {
        let link = input.validate()?;
        debug!("Adding {} link for player {}", link.link_type, player_id);
        self.link_repo
            .insert_link(player_id, link)
            .await
            .map_err(|e| failed(LinkError::AddFailed, e))
    }

    async fn update_link(&self, link_id: &str, input: NewPlayerLink) -> Result<PlayerLink> {
        require_id(link_id)?;
        let link = input.validate()?;
        debug!("Updating link {}", link_id);
        self.link_repo
            .update_link(link_id, link)
            .await
            .map_err(|e| failed(LinkError::UpdateFailed, e))
    }

    async fn delete_link(&self, link_id: &str) -> Result<()> {
        require_id(link_id)?;
        let affected = self
            .link_repo
            .delete_link(link_id)
            .await
            .map_err(|e| failed(LinkError::DeleteFailed, e))?;
        if affected == 0 {
            return Err(LinkError::NotFound(link_id.to_string()).into());
        }
        debug!("Deleted link {}", link_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::errors::ValidationError;
    use crate::links::links_model::{LinkType, ValidLink};

    #[derive(Default)]
    struct MockLinkRepository {
        links: Mutex<Vec<PlayerLink>>,
        fail_with: Option<String>,
    }

    impl MockLinkRepository {
        fn failing(message: &str) -> Self {
            Self {
                fail_with: Some(message.to_string()),
                ..Default::default()
            }
        }

        fn check(&self) -> std::result::Result<(), LinkError> {
            match &self.fail_with {
                Some(message) => Err(LinkError::Backend(message.clone())),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl LinkRepositoryTrait for MockLinkRepository {
        async fn load_links(
            &self,
            player_id: &str,
        ) -> std::result::Result<Vec<PlayerLink>, LinkError> {
            self.check()?;
            Ok(self
                .links
                .lock()
                .unwrap()
                .iter()
                .filter(|l| l.player_id == player_id)
                .cloned()
                .collect())
        }

        async fn insert_link(
            &self,
            player_id: &str,
            link: ValidLink,
        ) -> std::result::Result<PlayerLink, LinkError> {
            self.check()?;
            let mut links = self.links.lock().unwrap();
            let stored = PlayerLink {
                id: format!("link-{}", links.len() + 1),
                player_id: player_id.to_string(),
                name: Some(link.name),
                url: link.url,
                link_type: link.link_type,
            };
            links.push(stored.clone());
            Ok(stored)
        }

        async fn update_link(
            &self,
            link_id: &str,
            link: ValidLink,
        ) -> std::result::Result<PlayerLink, LinkError> {
            self.check()?;
            let mut links = self.links.lock().unwrap();
            let stored = links
                .iter_mut()
                .find(|l| l.id == link_id)
                .ok_or_else(|| LinkError::NotFound(link_id.to_string()))?;
            stored.name = Some(link.name);
            stored.url = link.url;
            stored.link_type = link.link_type;
            Ok(stored.clone())
        }

        async fn delete_link(&self, link_id: &str) -> std::result::Result<usize, LinkError> {
            self.check()?;
            let mut links = self.links.lock().unwrap();
            let before = links.len();
            links.retain(|l| l.id != link_id);
            Ok(before - links.len())
        }
    }

    fn github(url: &str) -> NewPlayerLink {
        NewPlayerLink {
            name: String::new(),
            url: url.to_string(),
            link_type: Some(LinkType::Github),
        }
    }

    #[tokio::test]
    async fn test_add_update_delete_link() {
        let service = LinkService::new(Arc::new(MockLinkRepository::default()));

        let added = service
            .add_link("p1", github("https://github.com/peth"))
            .await
            .unwrap();
        assert_eq!(added.name.as_deref(), Some("GITHUB"));
        assert_eq!(service.get_links("p1").await.unwrap().len(), 1);
        assert!(service.get_links("p2").await.unwrap().is_empty());

        let updated = service
            .update_link(
                &added.id,
                NewPlayerLink {
                    name: "Code".to_string(),
                    ..github("https://github.com/peth-yursick")
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name.as_deref(), Some("Code"));
        assert_eq!(updated.url, "https://github.com/peth-yursick");

        service.delete_link(&added.id).await.unwrap();
        assert!(service.get_links("p1").await.unwrap().is_empty());

        let error = service.delete_link(&added.id).await.unwrap_err();
        assert!(matches!(error, Error::Link(LinkError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_repository() {
        let repo = Arc::new(MockLinkRepository::default());
        let service = LinkService::new(repo.clone());

        let error = service
            .add_link("p1", NewPlayerLink::default())
            .await
            .unwrap_err();
        match error {
            Error::Validation(ValidationError::MissingField(field)) => assert_eq!(field, "type"),
            other => panic!("unexpected error: {}", other),
        }
        assert!(repo.links.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_backend_failures_are_wrapped() {
        let service = LinkService::new(Arc::new(MockLinkRepository::failing("permission denied")));

        let error = service
            .add_link("p1", github("https://github.com/peth"))
            .await
            .unwrap_err();
        assert!(matches!(error, Error::Link(LinkError::AddFailed(_))));
        assert_eq!(
            error.to_string(),
            "Link operation failed: Unable to add link. Error: permission denied"
        );

        let error = service.delete_link("link-1").await.unwrap_err();
        assert!(matches!(error, Error::Link(LinkError::DeleteFailed(_))));

        let error = service.get_links("p1").await.unwrap_err();
        assert!(matches!(error, Error::Link(LinkError::LoadFailed(_))));
    }

    #[tokio::test]
    async fn test_update_requires_link_id() {
        let service = LinkService::new(Arc::new(MockLinkRepository::default()));
        let error = service
            .update_link(" ", github("https://github.com/peth"))
            .await
            .unwrap_err();
        assert!(matches!(error, Error::Link(LinkError::NotFound(_))));

        let error = service
            .update_link("missing", github("https://github.com/peth"))
            .await
            .unwrap_err();
        assert!(matches!(error, Error::Link(LinkError::NotFound(_))));
    }
}
