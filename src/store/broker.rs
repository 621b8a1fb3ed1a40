//! Broker Store
//!
//! Broker pool for the quick-add picker and the last broker the user chose.

use serde_json::json;

use super::StoreCell;
use crate::gateway::Gateway;
use crate::preferences::{Preferences, LAST_USED_BROKER_KEY};

const CONTEXT: &str = "BrokerStore";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BrokerState {
    /// Distinct names, kept sorted
    pub brokers: Vec<String>,
    pub loading: bool,
    pub error: Option<String>,
    pub last_used_broker: Option<String>,
}

impl BrokerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Optimistically add a name before the backend list is refreshed.
    /// Returns `false` for blank or already known names.
    pub fn add_broker(&mut self, broker: &str) -> bool {
        let trimmed = broker.trim();
        if trimmed.is_empty() || self.brokers.iter().any(|b| b == trimmed) {
            return false;
        }
        self.brokers.push(trimmed.to_string());
        self.brokers.sort();
        log::info!(target: CONTEXT, "Broker added to pool | Data: {}", json!({ "broker": trimmed }));
        true
    }

    /// Remember `broker` and persist it; storage failures are logged only.
    /// Blank names are ignored and return `false`.
    pub fn set_last_used_broker(&mut self, broker: &str, prefs: &impl Preferences) -> bool {
        let trimmed = broker.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.last_used_broker = Some(trimmed.to_string());
        if let Err(e) = prefs.set(LAST_USED_BROKER_KEY, trimmed) {
            log::warn!(target: CONTEXT, "Failed to persist last used broker: {}", e);
        }
        true
    }

    pub fn load_last_used_broker(&mut self, prefs: &impl Preferences) {
        if let Some(saved) = prefs.get(LAST_USED_BROKER_KEY).filter(|s| !s.is_empty()) {
            self.last_used_broker = Some(saved);
        }
    }
}

pub async fn fetch_broker_pool(store: &impl StoreCell<BrokerState>, gateway: &impl Gateway) {
    log::info!(target: CONTEXT, "Fetching broker pool...");
    store.modify(|s| {
        s.loading = true;
        s.error = None;
    });
    match gateway.fetch_broker_pool().await {
        Ok(mut brokers) => {
            brokers.sort();
            brokers.dedup();
            log::info!(target: CONTEXT, "Broker pool fetched successfully | Data: {}", json!({ "count": brokers.len() }));
            store.modify(|s| {
                s.brokers = brokers;
                s.loading = false;
            });
        }
        Err(e) => {
            log::error!(target: CONTEXT, "Failed to fetch broker pool | Data: {}", json!(e.to_string()));
            store.modify(|s| {
                s.error = Some(e.to_string());
                s.loading = false;
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::gateway::testing::MemoryGateway;
    use crate::models::make_todo;
    use crate::preferences::MemoryPreferences;

    #[test]
    fn test_add_broker_trims_dedups_and_sorts() {
        let mut state = BrokerState::new();
        assert!(state.add_broker(" Zeta "));
        assert!(state.add_broker("Alpha"));
        assert!(!state.add_broker("Alpha"));
        assert!(!state.add_broker("   "));
        assert_eq!(state.brokers, vec!["Alpha", "Zeta"]);
    }

    #[test]
    fn test_last_used_broker_round_trip() {
        let prefs = MemoryPreferences::default();
        let mut state = BrokerState::new();
        state.load_last_used_broker(&prefs);
        assert_eq!(state.last_used_broker, None);

        state.set_last_used_broker("Huatai", &prefs);
        assert_eq!(prefs.get(LAST_USED_BROKER_KEY).as_deref(), Some("Huatai"));

        let mut restarted = BrokerState::new();
        restarted.load_last_used_broker(&prefs);
        assert_eq!(restarted.last_used_broker.as_deref(), Some("Huatai"));
    }

    #[test]
    fn test_each_selection_overwrites_last_used_broker() {
        let prefs = MemoryPreferences::default();
        let mut state = BrokerState::new();
        assert!(state.set_last_used_broker("Huatai", &prefs));
        assert!(state.set_last_used_broker(" CITIC ", &prefs));
        assert_eq!(prefs.get(LAST_USED_BROKER_KEY).as_deref(), Some("CITIC"));

        assert!(!state.set_last_used_broker("  ", &prefs));
        assert_eq!(state.last_used_broker.as_deref(), Some("CITIC"));
        assert_eq!(prefs.get(LAST_USED_BROKER_KEY).as_deref(), Some("CITIC"));
    }

    #[tokio::test]
    async fn test_fetch_broker_pool_sorted() {
        let gateway = MemoryGateway::with_todos(vec![
            make_todo(1, "Zeta", "pending", "", ""),
            make_todo(2, "Alpha", "pending", "", ""),
            make_todo(3, "Zeta", "pending", "", ""),
        ]);
        let store = Rc::new(RefCell::new(BrokerState::new()));
        fetch_broker_pool(&store, &gateway).await;
        assert_eq!(store.borrow().brokers, vec!["Alpha", "Zeta"]);

        gateway.fail_next("backend unavailable");
        fetch_broker_pool(&store, &gateway).await;
        let state = store.borrow();
        assert_eq!(state.error.as_deref(), Some("backend unavailable"));
        assert_eq!(state.brokers.len(), 2);
        assert!(!state.loading);
    }
}
