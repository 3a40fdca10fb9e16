use std::collections::HashMap;
use crate::metadata::{AttributeDefinition, Entity};
use crate::query::Filter;
use super::reconcile::InitialView;

#[derive(Debug, Clone, Default)]
struct InitProperty {
    columns: Vec<AttributeDefinition>,
    filters: Vec<Filter>,
}

/// Resolved starting columns/filters per entity, for "reset to defaults"
///
/// Owned by one explorer session.
#[derive(Debug, Clone, Default)]
pub struct InitCache {
    entries: HashMap<Entity, InitProperty>,
}

impl InitCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remember(&mut self, entity: &Entity, view: &InitialView) {
        self.entries.insert(
            entity.clone(),
            InitProperty {
                columns: view.columns.clone(),
                filters: view.filters.clone(),
            },
        );
    }

    /// Starting columns, or none if the entity was never reconciled
    pub fn columns(&self, entity: &Entity) -> Vec<AttributeDefinition> {
        self.entries.get(entity).map(|p| p.columns.clone()).unwrap_or_default()
    }

    /// Starting filters, or none if the entity was never reconciled
    pub fn filters(&self, entity: &Entity) -> Vec<Filter> {
        self.entries.get(entity).map(|p| p.filters.clone()).unwrap_or_default()
    }

    pub fn contains(&self, entity: &Entity) -> bool {
        self.entries.contains_key(entity)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
