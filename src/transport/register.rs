use crate::errors::Result;
use crate::transport::Transport;
use once_cell::sync::Lazy;
use std::{
    collections::HashMap,
    future::Future,
    pin::Pin,
    sync::{Arc, RwLock},
};

pub type BoxedTransportFuture = Pin<Box<dyn Future<Output = Result<Box<dyn Transport>>> + Send>>;
pub type TransportConstructor = Arc<dyn Fn() -> BoxedTransportFuture + Send + Sync>;

static TRANSPORT_REGISTRY: Lazy<RwLock<HashMap<String, TransportConstructor>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

pub fn register_transport_plugin<S: Into<String>>(name: S, constructor: TransportConstructor) {
    let name = name.into();
    let mut registry = TRANSPORT_REGISTRY
        .write()
        .expect("Transport registry lock poisoned");
    registry.insert(name, constructor);
}

pub fn get_transport_plugin(name: &str) -> Option<TransportConstructor> {
    TRANSPORT_REGISTRY
        .read()
        .expect("Transport registry lock poisoned")
        .get(name)
        .cloned()
}

pub fn debug_transport_registry() {
    let registry = TRANSPORT_REGISTRY
        .read()
        .expect("Transport registry lock poisoned");
    if registry.is_empty() {
        tracing::debug!("No transport plugins registered.");
    } else {
        tracing::debug!("Registered transport plugins:");
        for key in registry.keys() {
            tracing::debug!(" - {}", key);
        }
    }
}
