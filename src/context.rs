//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use crate::gateway::TauriGateway;
use crate::store::{BrokerState, TodoState};

/// App-wide state handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Cached todos with loading/error flags
    pub todos: RwSignal<TodoState>,
    /// Broker pool and last used broker
    pub brokers: RwSignal<BrokerState>,
    /// Trigger to reload from backend - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload from backend - write
    set_reload_trigger: WriteSignal<u32>,
}

impl AppContext {
    pub fn new(
        todos: RwSignal<TodoState>,
        brokers: RwSignal<BrokerState>,
        reload_trigger: (ReadSignal<u32>, WriteSignal<u32>),
    ) -> Self {
        Self {
            todos,
            brokers,
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
        }
    }

    pub fn gateway(&self) -> TauriGateway {
        TauriGateway
    }

    /// Trigger a reload of todos and brokers
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
