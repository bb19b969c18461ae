use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use tokio::sync::Mutex;

use super::{MappingEntry, MappingSlot, MemoryStore, Sequences};
use crate::domain::entities::{ClickEvent, NewMapping, UrlMapping};
use crate::domain::repositories::{ClickRepository, MappingRepository};
use crate::error::AppError;

impl MemoryStore {
    async fn slot(&self, mapping_id: i64) -> Option<Arc<MappingSlot>> {
        self.mappings.read().await.by_id.get(&mapping_id).cloned()
    }
}

#[async_trait]
impl MappingRepository for MemoryStore {
    async fn insert(&self, new_mapping: NewMapping) -> Result<UrlMapping, AppError> {
        let mut index = self.mappings.write().await;

        if index.by_code.contains_key(&new_mapping.short_code) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "url_mappings_short_code_key" }),
            ));
        }

        let mapping = UrlMapping::new(
            Sequences::next(&self.sequences.mapping),
            new_mapping.original_url,
            new_mapping.short_code,
            new_mapping.owner_id,
            Utc::now(),
            0,
        );

        index
            .by_code
            .insert(mapping.short_code.clone(), mapping.id);
        index.by_id.insert(
            mapping.id,
            Arc::new(MappingSlot {
                owner_id: mapping.owner_id,
                entry: Mutex::new(MappingEntry {
                    mapping: mapping.clone(),
                    clicks: Vec::new(),
                }),
            }),
        );

        Ok(mapping)
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<UrlMapping>, AppError> {
        let slot = {
            let index = self.mappings.read().await;
            index
                .by_code
                .get(short_code)
                .and_then(|id| index.by_id.get(id))
                .cloned()
        };

        match slot {
            Some(slot) => Ok(Some(slot.entry.lock().await.mapping.clone())),
            None => Ok(None),
        }
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<UrlMapping>, AppError> {
        let slots: Vec<Arc<MappingSlot>> = self
            .mappings
            .read()
            .await
            .by_id
            .values()
            .filter(|slot| slot.owner_id == owner_id)
            .cloned()
            .collect();

        let mut mappings = Vec::with_capacity(slots.len());
        for slot in slots {
            mappings.push(slot.entry.lock().await.mapping.clone());
        }

        Ok(mappings)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[async_trait]
impl ClickRepository for MemoryStore {
    async fn record_click(&self, mapping_id: i64) -> Result<ClickEvent, AppError> {
        let slot = self.slot(mapping_id).await.ok_or_else(|| {
            AppError::not_found("Mapping not found", json!({ "mapping_id": mapping_id }))
        })?;

        let mut entry = slot.entry.lock().await;

        let event = ClickEvent::new(
            Sequences::next(&self.sequences.click),
            mapping_id,
            Utc::now(),
        );
        entry.mapping.click_count += 1;
        entry.clicks.push(event.clone());

        Ok(event)
    }

    async fn clicks_between(
        &self,
        mapping_id: i64,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<ClickEvent>, AppError> {
        let Some(slot) = self.slot(mapping_id).await else {
            return Ok(Vec::new());
        };

        let entry = slot.entry.lock().await;

        Ok(entry
            .clicks
            .iter()
            .filter(|c| c.occurred_at >= from && c.occurred_at <= to)
            .cloned()
            .collect())
    }

    async fn clicks_for_owner(
        &self,
        owner_id: i64,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<ClickEvent>, AppError> {
        let slots: Vec<Arc<MappingSlot>> = self
            .mappings
            .read()
            .await
            .by_id
            .values()
            .filter(|slot| slot.owner_id == owner_id)
            .cloned()
            .collect();

        let mut events = Vec::new();
        for slot in slots {
            let entry = slot.entry.lock().await;
            events.extend(
                entry
                    .clicks
                    .iter()
                    .filter(|c| c.occurred_at >= from && c.occurred_at < until)
                    .cloned(),
            );
        }

        Ok(events)
    }
}
