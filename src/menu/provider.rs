//! Typed service locator used to build menu items and their dependencies
//!
//! Dependencies shared by many items (configuration, prompts, clients) are
//! registered once as singletons and looked up by type. Items themselves are
//! registered under a stable string key and built fresh on every resolution,
//! so each menu can push its own data payload into its instance.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::item::MenuItem;

/// Key under which an override for the built-in exit item may be registered.
pub const EXIT_ITEM_KEY: &str = "console_menu::exit";

/// Builds a type-erased instance, resolving its own dependencies from the provider.
pub type ServiceFactory =
    Arc<dyn Fn(&ServiceProvider) -> Option<Box<dyn Any + Send>> + Send + Sync>;

/// Wrap a menu item the way the resolver expects to find it behind `dyn Any`.
pub fn erase_item<T: MenuItem + 'static>(item: T) -> Box<dyn Any + Send> {
    let item: Box<dyn MenuItem> = Box::new(item);
    Box::new(item)
}

#[derive(Default)]
pub struct ServiceCollection {
    singletons: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
    factories: HashMap<String, ServiceFactory>,
}

impl ServiceCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a shared value, replacing any earlier value of the same type.
    pub fn add_singleton<T: Any + Send + Sync>(&mut self, value: Arc<T>) -> &mut Self {
        self.singletons.insert(TypeId::of::<T>(), value);
        self
    }

    /// Register a keyed factory producing any kind of value.
    pub fn add_transient<F>(&mut self, key: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(&ServiceProvider) -> Option<Box<dyn Any + Send>> + Send + Sync + 'static,
    {
        self.factories.insert(key.into(), Arc::new(factory));
        self
    }

    /// Register a keyed factory producing a menu item.
    pub fn add_menu_item<T, F>(&mut self, key: impl Into<String>, factory: F) -> &mut Self
    where
        T: MenuItem + 'static,
        F: Fn(&ServiceProvider) -> T + Send + Sync + 'static,
    {
        self.add_transient(key, move |provider| Some(erase_item(factory(provider))))
    }

    pub fn build(self) -> ServiceProvider {
        ServiceProvider {
            singletons: self.singletons,
            factories: self.factories,
        }
    }
}

/// Read-only view over the registered services.
#[derive(Default)]
pub struct ServiceProvider {
    singletons: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
    factories: HashMap<String, ServiceFactory>,
}

impl ServiceProvider {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        let value = self.singletons.get(&TypeId::of::<T>())?.clone();
        value.downcast::<T>().ok()
    }

    /// Build a fresh instance of whatever is registered under `key`.
    pub fn try_resolve(&self, key: &str) -> Option<Box<dyn Any + Send>> {
        let factory = self.factories.get(key)?;
        factory(self)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.factories.contains_key(key)
    }
}

impl fmt::Debug for ServiceProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&String> = self.factories.keys().collect();
        keys.sort();
        f.debug_struct("ServiceProvider")
            .field("singletons", &self.singletons.len())
            .field("factories", &keys)
            .finish()
    }
}
