use anyhow::Result;
use log::debug;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use super::item::MenuItem;
use super::provider::{ServiceFactory, ServiceProvider, erase_item};
use crate::error::MenuError;

#[derive(Clone)]
enum ItemKind {
    /// Only resolvable through a keyed registration in the provider
    Contract,
    Constructor(ServiceFactory),
}

/// Stable identity of a menu item type and how to build it.
#[derive(Clone)]
pub struct ItemType {
    name: String,
    kind: ItemKind,
}

impl ItemType {
    /// A concrete item built by `constructor`, which pulls its dependencies from the provider.
    pub fn of<T, F>(name: impl Into<String>, constructor: F) -> Self
    where
        T: MenuItem + 'static,
        F: Fn(&ServiceProvider) -> T + Send + Sync + 'static,
    {
        Self::with_constructor(name, move |provider| Some(erase_item(constructor(provider))))
    }

    /// A type with a raw constructor. It may produce nothing, or something that
    /// is not a menu item; both are reported when the item is resolved.
    pub fn with_constructor<F>(name: impl Into<String>, constructor: F) -> Self
    where
        F: Fn(&ServiceProvider) -> Option<Box<dyn Any + Send>> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            kind: ItemKind::Constructor(Arc::new(constructor)),
        }
    }

    /// An abstract item; some registration in the provider has to supply the implementation.
    pub fn contract(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ItemKind::Contract,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_contract(&self) -> bool {
        matches!(self.kind, ItemKind::Contract)
    }

    pub(crate) fn construct(&self, provider: &ServiceProvider) -> Option<Box<dyn Any + Send>> {
        match &self.kind {
            ItemKind::Contract => None,
            ItemKind::Constructor(constructor) => constructor(provider),
        }
    }
}

impl fmt::Debug for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemType")
            .field("name", &self.name)
            .field("contract", &self.is_contract())
            .finish()
    }
}

/// Placement of an item type inside one menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub menu_name: String,
    /// 0 lets the menu pick a free number
    pub item_number: i32,
    pub data: Option<String>,
}

impl MenuEntry {
    pub fn new(menu_name: impl Into<String>) -> Self {
        Self {
            menu_name: menu_name.into(),
            item_number: 0,
            data: None,
        }
    }

    pub fn number(mut self, item_number: i32) -> Self {
        self.item_number = item_number;
        self
    }

    pub fn data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }
}

/// One registered item of a menu: its type, declared number and data payload.
/// The live instance is filled in the first time the menu is resolved.
pub struct ItemDescriptor {
    item_type: ItemType,
    item_number: i32,
    data: Option<String>,
    instance: OnceLock<Arc<dyn MenuItem>>,
}

impl ItemDescriptor {
    pub fn new(item_type: ItemType, item_number: i32) -> Self {
        Self {
            item_type,
            item_number,
            data: None,
            instance: OnceLock::new(),
        }
    }

    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Attach an already built item; resolution will use it as is.
    pub fn with_instance(self, item: Arc<dyn MenuItem>) -> Self {
        let _ = self.instance.set(item);
        self
    }

    pub fn item_type(&self) -> &ItemType {
        &self.item_type
    }

    pub fn item_number(&self) -> i32 {
        self.item_number
    }

    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }

    pub fn instance(&self) -> Option<&Arc<dyn MenuItem>> {
        self.instance.get()
    }

    /// Store the resolved instance, keeping the first one if another was stored already.
    pub(crate) fn set_instance(&self, item: Arc<dyn MenuItem>) -> Arc<dyn MenuItem> {
        self.instance.get_or_init(|| item).clone()
    }
}

impl fmt::Debug for ItemDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemDescriptor")
            .field("item_type", &self.item_type)
            .field("item_number", &self.item_number)
            .field("data", &self.data)
            .field("resolved", &self.instance.get().is_some())
            .finish()
    }
}

/// Menu names are matched without surrounding whitespace and without regard to case.
pub fn normalize_menu_name(menu_name: &str) -> Option<String> {
    let trimmed = menu_name.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_lowercase())
}

/// Item descriptors grouped by normalized menu name, in registration order.
#[derive(Debug, Default)]
pub struct MenuRegistry {
    menus: HashMap<String, Vec<ItemDescriptor>>,
}

impl MenuRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a descriptor to a menu, creating the menu on first use.
    /// Duplicate item numbers are accepted here and left for the resolver.
    pub fn register(&mut self, menu_name: &str, descriptor: ItemDescriptor) -> Result<()> {
        let key = normalize_menu_name(menu_name)
            .ok_or_else(|| MenuError::invalid_argument("Please enter a valid menu name."))?;

        debug!(
            "Registering '{}' as #{} in menu '{}'",
            descriptor.item_type().name(),
            descriptor.item_number(),
            key
        );
        self.menus.entry(key).or_default().push(descriptor);
        Ok(())
    }

    /// Register one item type in every menu listed in `entries`.
    pub fn add_menu_item<I>(&mut self, item_type: ItemType, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = MenuEntry>,
    {
        for entry in entries {
            let mut descriptor = ItemDescriptor::new(item_type.clone(), entry.item_number);
            descriptor.data = entry.data;
            self.register(&entry.menu_name, descriptor)?;
        }
        Ok(())
    }

    pub fn lookup(&self, menu_name: &str) -> Result<&[ItemDescriptor]> {
        let key = normalize_menu_name(menu_name)
            .ok_or_else(|| MenuError::invalid_argument("Please enter a valid menu name."))?;

        match self.menus.get(&key) {
            Some(descriptors) => Ok(descriptors),
            None => Err(MenuError::not_found(menu_name).into()),
        }
    }

    pub fn contains(&self, menu_name: &str) -> bool {
        normalize_menu_name(menu_name).is_some_and(|key| self.menus.contains_key(&key))
    }

    /// Normalized names of all registered menus, sorted.
    pub fn menu_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.menus.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.menus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::item::ExitMenuItem;

    fn exit_type() -> ItemType {
        ItemType::of("exit", |_| ExitMenuItem)
    }

    #[test]
    fn test_normalize_menu_name() {
        assert_eq!(normalize_menu_name(" Menu1 ").as_deref(), Some("menu1"));
        assert_eq!(normalize_menu_name("MENU1").as_deref(), Some("menu1"));
        assert_eq!(normalize_menu_name("   "), None);
        assert_eq!(normalize_menu_name(""), None);
    }

    #[test]
    fn test_lookup_normalizes_the_name() {
        let mut registry = MenuRegistry::new();
        registry
            .register("Menu1", ItemDescriptor::new(exit_type(), 1))
            .unwrap();

        for name in [" Menu1 ", "MENU1", "menu1"] {
            assert_eq!(registry.lookup(name).unwrap().len(), 1, "lookup({:?})", name);
        }
        assert!(registry.contains("  mEnU1"));
    }

    #[test]
    fn test_lookup_of_blank_name_is_an_invalid_argument() {
        let registry = MenuRegistry::new();
        let err = registry.lookup("  ").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<MenuError>(),
            Some(MenuError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_lookup_of_unknown_menu_is_not_found() {
        let registry = MenuRegistry::new();
        let err = registry.lookup("Menu1").unwrap_err();
        assert_eq!(
            err.downcast_ref::<MenuError>(),
            Some(&MenuError::NotFound("Menu1".to_string()))
        );
    }

    #[test]
    fn test_register_keeps_duplicates_in_order() {
        let mut registry = MenuRegistry::new();
        registry
            .register("main", ItemDescriptor::new(ItemType::contract("a"), 2))
            .unwrap();
        registry
            .register("MAIN", ItemDescriptor::new(ItemType::contract("b"), 2))
            .unwrap();

        let names: Vec<&str> = registry
            .lookup("main")
            .unwrap()
            .iter()
            .map(|d| d.item_type().name())
            .collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_rejects_blank_menu_name() {
        let mut registry = MenuRegistry::new();
        assert!(registry
            .register(" ", ItemDescriptor::new(exit_type(), 0))
            .is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_add_menu_item_places_one_type_in_several_menus() {
        let mut registry = MenuRegistry::new();
        registry
            .add_menu_item(
                exit_type(),
                [
                    MenuEntry::new("Hello1").number(1),
                    MenuEntry::new("Hello2").data("payload"),
                ],
            )
            .unwrap();

        assert_eq!(registry.menu_names(), vec!["hello1", "hello2"]);
        let hello1 = registry.lookup("hello1").unwrap();
        assert_eq!(hello1[0].item_number(), 1);
        assert_eq!(hello1[0].data(), None);
        let hello2 = registry.lookup("hello2").unwrap();
        assert_eq!(hello2[0].item_number(), 0);
        assert_eq!(hello2[0].data(), Some("payload"));
    }
}
