//! Skill names from content-service
//!
//! Mastery listings show skill and domain names. When content-service cannot
//! resolve a skill the listing still succeeds with a `"Skill <id>"` label.

use async_trait::async_trait;
use learnsmart_common::api::types::{SkillInfo, SkillMasteryEnriched};
use learnsmart_common::client::{ClientError, ServiceClient};
use learnsmart_common::config::Service;
use std::time::Duration;
use tracing::warn;
use uuid::Uuid;

use crate::models::UserSkillMastery;

/// Skill lookup used to enrich mastery listings
#[async_trait]
pub trait ContentClient: Send + Sync {
    async fn get_skill(&self, skill_id: Uuid) -> Result<SkillInfo, ClientError>;
}

/// `GET /skills/{id}` against content-service
pub struct HttpContentClient {
    client: ServiceClient,
}

impl HttpContentClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        Ok(Self {
            client: ServiceClient::new(Service::Content, base_url, timeout)?,
        })
    }
}

#[async_trait]
impl ContentClient for HttpContentClient {
    async fn get_skill(&self, skill_id: Uuid) -> Result<SkillInfo, ClientError> {
        self.client.get_json(&format!("/skills/{}", skill_id), &[]).await
    }
}

/// Attach skill and domain names, one lookup per record
pub async fn enrich_masteries(
    content: &dyn ContentClient,
    records: Vec<UserSkillMastery>,
) -> Vec<SkillMasteryEnriched> {
    let mut enriched = Vec::with_capacity(records.len());

    for record in records {
        let (skill_name, domain_name) = match content.get_skill(record.skill_id).await {
            Ok(skill) => (skill.name, skill.domain.map(|d| d.name)),
            Err(e) => {
                warn!(skill_id = %record.skill_id, "Skill lookup failed, using fallback name: {}", e);
                (format!("Skill {}", record.skill_id), None)
            }
        };

        enriched.push(SkillMasteryEnriched {
            skill_id: record.skill_id,
            skill_name: Some(skill_name),
            domain_name,
            mastery: record.mastery,
            attempts: record.attempts,
            last_update: Some(record.last_update),
        });
    }

    enriched
}
