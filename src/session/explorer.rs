//! Explorer session: state container plus async operations

use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, info, warn};
use crate::builder::{build_main_query, primary_key_query, with_csv_output, with_limit};
use crate::client::ConseilApi;
use crate::config::{ExplorerConfig, ServerInfo};
use crate::metadata::{order_entities, AttributeDefinition, Entity, EntityDefinition};
use crate::query::{Filter, Query, Row, Sort};
use crate::reconciler::{reconcile_entity, InitCache};
use crate::share::{share_link, SharedLink};
use crate::table::Link;
use super::attributes::AttributeCache;
use super::error::SessionError;
use super::state::{EntityState, Message};

/// One user's explorer session against a configured API
///
/// Operations take `&mut self`, so state updates never interleave. Each
/// remote operation counts as in flight until it settles; a failure is
/// also recorded as the session message.
pub struct Explorer<C> {
    api: C,
    config: ExplorerConfig,
    network: String,
    entities: Vec<EntityDefinition>,
    attributes: AttributeCache,
    states: HashMap<Entity, EntityState>,
    selected: Option<Entity>,
    init_cache: InitCache,
    loading: usize,
    full_loaded: bool,
    message: Option<Message>,
    modal_item: Option<Row>,
    clock: fn() -> DateTime<Utc>,
}

impl<C: ConseilApi> Explorer<C> {
    pub fn new(api: C, config: ExplorerConfig) -> Self {
        let network = config.default_network.clone();
        Self {
            api,
            config,
            network,
            entities: Vec::new(),
            attributes: AttributeCache::new(),
            states: HashMap::new(),
            selected: None,
            init_cache: InitCache::new(),
            loading: 0,
            full_loaded: false,
            message: None,
            modal_item: None,
            clock: Utc::now,
        }
    }

    /// Start on a configured network other than the default
    pub fn with_network(mut self, network: &str) -> Result<Self, SessionError> {
        if self.config.get_network(network).is_none() {
            return Err(SessionError::UnknownNetwork(network.to_string()));
        }
        self.network = network.to_string();
        Ok(self)
    }

    /// Replace the time source used for attribute cache expiry
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn api(&self) -> &C {
        &self.api
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    pub fn network(&self) -> &str {
        &self.network
    }

    pub fn entities(&self) -> &[EntityDefinition] {
        &self.entities
    }

    pub fn selected_entity(&self) -> Option<&Entity> {
        self.selected.as_ref()
    }

    pub fn attributes(&self, entity: &Entity) -> &[AttributeDefinition] {
        self.attributes.get(entity)
    }

    pub fn state(&self, entity: &Entity) -> Option<&EntityState> {
        self.states.get(entity)
    }

    /// State of the selected entity
    pub fn current(&self) -> Option<&EntityState> {
        self.selected.as_ref().and_then(|e| self.states.get(e))
    }

    pub fn current_mut(&mut self) -> Option<&mut EntityState> {
        match &self.selected {
            Some(entity) => self.states.get_mut(entity),
            None => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading > 0
    }

    pub fn is_full_loaded(&self) -> bool {
        self.full_loaded
    }

    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    pub fn modal_item(&self) -> Option<&Row> {
        self.modal_item.as_ref()
    }

    pub fn close_modal(&mut self) {
        self.modal_item = None;
    }

    fn server(&self) -> Result<ServerInfo, SessionError> {
        self.config
            .get_network(&self.network)
            .map(|n| n.server_info())
            .ok_or_else(|| SessionError::UnknownNetwork(self.network.clone()))
    }

    fn selected_or_err(&self) -> Result<Entity, SessionError> {
        self.selected.clone().ok_or(SessionError::NoEntitySelected)
    }

    fn begin(&mut self) {
        self.loading += 1;
    }

    /// Close one in-flight operation and surface its failure
    fn settle<T>(&mut self, result: Result<T, SessionError>) -> Result<T, SessionError> {
        self.loading = self.loading.saturating_sub(1);
        self.record(result)
    }

    fn record<T>(&mut self, result: Result<T, SessionError>) -> Result<T, SessionError> {
        if let Err(e) = &result {
            warn!(network = %self.network, kind = %e.kind(), error = %e, "Explorer operation failed");
            self.message = Some(Message::from(e));
        }
        result
    }

    /// Load entities, attribute metadata and the first entity's items
    ///
    /// A shared link selects its entity and seeds it with the link's query.
    pub async fn init_load(&mut self, link: Option<&SharedLink>) -> Result<(), SessionError> {
        self.begin();
        let result = self.load(link).await;
        self.settle(result)
    }

    async fn load(&mut self, link: Option<&SharedLink>) -> Result<(), SessionError> {
        let server = self.server()?;
        let platform = self.config.platform.clone();
        info!(network = %self.network, platform = %platform, "Loading explorer");

        let preferred = self
            .config
            .get_network(&self.network)
            .map(|n| n.entities.clone())
            .unwrap_or_default();
        let entities = self.api.entities(&server, &platform).await?;
        self.entities = order_entities(entities, &preferred)
            .into_iter()
            .map(EntityDefinition::normalize)
            .collect();

        let listed = |entity: &Entity| self.entities.iter().any(|e| &e.name == entity);
        let selected = match (link, &self.selected) {
            (Some(link), _) if listed(&link.entity) => Some(link.entity.clone()),
            (Some(link), _) => return Err(SessionError::UnknownEntity(link.entity.to_string())),
            (None, Some(current)) if listed(current) => Some(current.clone()),
            _ => self.entities.first().map(|e| e.name.clone()),
        };
        self.selected = selected;

        let now = (self.clock)();
        let ttl = self.config.attribute_cache_ttl();
        if !self.attributes.is_fresh(&self.network, now, ttl) {
            self.fetch_all_attributes(&server, &platform, now).await?;
        } else {
            debug!(network = %self.network, "Attribute cache is fresh");
        }

        if let Some(entity) = self.selected.clone() {
            self.fetch_init_entity(&server, &platform, &entity, link).await?;
        }
        self.full_loaded = true;
        Ok(())
    }

    async fn fetch_all_attributes(
        &mut self,
        server: &ServerInfo,
        platform: &str,
        now: DateTime<Utc>,
    ) -> Result<(), SessionError> {
        let names: Vec<Entity> = self.entities.iter().map(|e| e.name.clone()).collect();
        let fetches = names.iter().map(|entity| self.api.attributes(server, platform, entity));
        let results = join_all(fetches).await;

        let mut attributes = HashMap::with_capacity(names.len());
        for (entity, result) in names.into_iter().zip(results) {
            attributes.insert(entity, result?);
        }
        info!(network = %self.network, entities = attributes.len(), "Fetched attribute metadata");
        self.attributes.store(&self.network, now, attributes);
        Ok(())
    }

    /// Reconcile an entity's starting view, run its query and look up
    /// distinct values for its low-cardinality filters
    async fn fetch_init_entity(
        &mut self,
        server: &ServerInfo,
        platform: &str,
        entity: &Entity,
        link: Option<&SharedLink>,
    ) -> Result<(), SessionError> {
        let view = reconcile_entity(
            entity,
            self.attributes.get(entity),
            link,
            &self.config.default_queries,
        )?;
        debug!(entity = %entity, source = ?view.source, "Running initial query");

        let items = self
            .api
            .execute_entity_query(server, platform, entity, &view.query)
            .await?;

        let lookups = view
            .cardinality_lookups
            .iter()
            .map(|name| self.api.attribute_values(server, platform, entity, name));
        let values = join_all(lookups)
            .await
            .into_iter()
            .collect::<Result<Vec<_>, _>>()?;

        self.init_cache.remember(entity, &view);
        let state = self.states.entry(entity.clone()).or_default();
        state.items = items;
        state.filter_count = view.filters.len();
        state.table.page = 0;
        state.columns = view.columns;
        state.sort = view.sort;
        state.filters = view.filters;
        state.sync_table_order();
        state
            .available_values
            .extend(view.cardinality_lookups.into_iter().zip(values));
        Ok(())
    }

    /// Switch to another configured network and reload from scratch
    pub async fn change_network(&mut self, network: &str) -> Result<(), SessionError> {
        if self.network == network {
            return Ok(());
        }
        if self.config.get_network(network).is_none() {
            return self.record(Err(SessionError::UnknownNetwork(network.to_string())));
        }

        info!(from = %self.network, to = %network, "Changing network");
        self.network = network.to_string();
        self.attributes.invalidate();
        self.entities.clear();
        self.states.clear();
        self.selected = None;
        self.init_cache.clear();
        self.modal_item = None;
        self.full_loaded = false;
        self.init_load(None).await
    }

    /// Select an entity tab, loading it first if it has no items yet
    pub async fn change_tab(&mut self, entity: &Entity) -> Result<(), SessionError> {
        if !self.entities.iter().any(|e| &e.name == entity) {
            return self.record(Err(SessionError::UnknownEntity(entity.to_string())));
        }

        let needs_load = self.states.get(entity).map_or(true, |s| s.items.is_empty());
        if needs_load {
            self.begin();
            let result = self.load_entity(entity).await;
            self.settle(result)?;
        }
        self.selected = Some(entity.clone());
        Ok(())
    }

    async fn load_entity(&mut self, entity: &Entity) -> Result<(), SessionError> {
        let server = self.server()?;
        let platform = self.config.platform.clone();
        self.fetch_init_entity(&server, &platform, entity, None).await
    }

    /// Query for the selected entity's columns, filters and sort
    pub fn main_query(&self) -> Result<Query, SessionError> {
        let entity = self.selected_or_err()?;
        let state = self.states.get(&entity).cloned().unwrap_or_default();
        Ok(build_main_query(&state.column_names(), &state.filters, &state.sort))
    }

    /// Run the main query and replace the selected entity's items
    pub async fn submit_query(&mut self) -> Result<usize, SessionError> {
        self.begin();
        let result = self.run_main_query().await;
        self.settle(result)
    }

    async fn run_main_query(&mut self) -> Result<usize, SessionError> {
        let entity = self.selected_or_err()?;
        let server = self.server()?;
        let query = with_limit(self.main_query()?, self.config.row_limit);

        let items = self
            .api
            .execute_entity_query(&server, &self.config.platform, &entity, &query)
            .await?;
        info!(entity = %entity, rows = items.len(), "Query submitted");

        let state = self.states.entry(entity).or_default();
        state.filter_count = state.filters.len();
        state.items = items;
        state.table.page = 0;
        state.sync_table_order();
        Ok(state.items.len())
    }

    /// Run the main query as CSV and return the text
    pub async fn export_csv(&mut self) -> Result<String, SessionError> {
        self.begin();
        let result = self.run_csv_export().await;
        self.settle(result)
    }

    async fn run_csv_export(&self) -> Result<String, SessionError> {
        let entity = self.selected_or_err()?;
        let server = self.server()?;
        let query = with_csv_output(with_limit(self.main_query()?, self.config.row_limit));
        let csv = self
            .api
            .execute_csv_query(&server, &self.config.platform, &entity, &query)
            .await?;
        Ok(csv)
    }

    /// Shareable link reproducing the selected entity's current query
    pub fn share_report(&mut self, origin: &str) -> Result<String, SessionError> {
        let result = self.build_share_link(origin);
        self.record(result)
    }

    fn build_share_link(&self, origin: &str) -> Result<String, SessionError> {
        let entity = self.selected_or_err()?;
        let query = with_limit(self.main_query()?, self.config.row_limit);
        Ok(share_link(origin, &entity, &query)?)
    }

    /// Load one record into the modal
    pub async fn get_item_by_primary_key(
        &mut self,
        entity: &Entity,
        key: &str,
        value: Value,
    ) -> Result<Option<&Row>, SessionError> {
        self.begin();
        let result = self.fetch_item(entity, key, value).await;
        self.settle(result)?;
        Ok(self.modal_item.as_ref())
    }

    /// Open the record a rendered cell links to
    pub async fn follow_link(&mut self, link: &Link) -> Result<Option<&Row>, SessionError> {
        self.get_item_by_primary_key(&link.entity, &link.key, link.value.clone()).await
    }

    async fn fetch_item(&mut self, entity: &Entity, key: &str, value: Value) -> Result<(), SessionError> {
        let server = self.server()?;
        let sort = self.states.get(entity).map(|s| s.sort.clone()).unwrap_or_default();
        let query = primary_key_query(key, value, &sort);

        let items = self
            .api
            .execute_entity_query(&server, &self.config.platform, entity, &query)
            .await?;
        self.modal_item = items.into_iter().next();
        Ok(())
    }

    /// Look up the distinct values of an attribute of the selected entity
    pub async fn fetch_values(&mut self, attribute: &str) -> Result<(), SessionError> {
        self.begin();
        let result = self.fetch_attribute_values(attribute).await;
        self.settle(result)
    }

    async fn fetch_attribute_values(&mut self, attribute: &str) -> Result<(), SessionError> {
        let entity = self.selected_or_err()?;
        let server = self.server()?;
        let values = self
            .api
            .attribute_values(&server, &self.config.platform, &entity, attribute)
            .await?;
        self.states
            .entry(entity)
            .or_default()
            .available_values
            .insert(attribute.to_string(), values);
        Ok(())
    }

    /// Restore the selected entity's starting columns
    pub fn reset_columns(&mut self) -> Result<(), SessionError> {
        let entity = self.selected_or_err()?;
        let columns = self.init_cache.columns(&entity);
        self.states.entry(entity).or_default().columns = columns;
        Ok(())
    }

    /// Restore the selected entity's starting filters
    pub fn reset_filters(&mut self) -> Result<(), SessionError> {
        let entity = self.selected_or_err()?;
        let filters = self.init_cache.filters(&entity);
        self.states.entry(entity).or_default().filters = filters;
        Ok(())
    }

    fn current_entry(&mut self) -> Result<&mut EntityState, SessionError> {
        let entity = self.selected_or_err()?;
        Ok(self.states.entry(entity).or_default())
    }

    pub fn set_columns(&mut self, columns: Vec<AttributeDefinition>) -> Result<(), SessionError> {
        self.current_entry()?.columns = columns;
        Ok(())
    }

    /// Replace the sort keys; the table follows the first one
    pub fn set_sort(&mut self, sort: Sort) -> Result<(), SessionError> {
        let state = self.current_entry()?;
        state.sort = sort;
        state.sync_table_order();
        Ok(())
    }

    pub fn set_filters(&mut self, filters: Vec<Filter>) -> Result<(), SessionError> {
        self.current_entry()?.filters = filters;
        Ok(())
    }

    pub fn add_filter(&mut self, filter: Filter) -> Result<(), SessionError> {
        self.current_entry()?.filters.push(filter);
        Ok(())
    }

    /// Replace the filter at `index`; out-of-range indexes are ignored
    pub fn change_filter(&mut self, index: usize, filter: Filter) -> Result<(), SessionError> {
        if let Some(slot) = self.current_entry()?.filters.get_mut(index) {
            *slot = filter;
        }
        Ok(())
    }

    pub fn remove_filter(&mut self, index: usize) -> Result<(), SessionError> {
        let filters = &mut self.current_entry()?.filters;
        if index < filters.len() {
            filters.remove(index);
        }
        Ok(())
    }
}
