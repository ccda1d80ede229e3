use anyhow::Result;
use log::{debug, warn};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

use super::item::{ExitMenuItem, MenuItem};
use super::provider::{EXIT_ITEM_KEY, ServiceProvider};
use super::registry::ItemDescriptor;
use crate::error::MenuError;

/// A live item with its final display number.
#[derive(Clone)]
pub struct ResolvedItem {
    pub number: i32,
    /// Text at resolution time, used for ordering. Rendering asks the item again.
    pub text: String,
    pub item: Arc<dyn MenuItem>,
}

impl ResolvedItem {
    pub fn new(number: i32, item: Arc<dyn MenuItem>) -> Self {
        Self {
            number,
            text: item.item_text(),
            item,
        }
    }
}

impl fmt::Debug for ResolvedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedItem")
            .field("number", &self.number)
            .field("text", &self.text)
            .finish()
    }
}

/// Turns registered descriptors into numbered, ready-to-show items.
#[derive(Debug, Clone)]
pub struct ItemResolver {
    provider: Arc<ServiceProvider>,
}

impl ItemResolver {
    pub fn new(provider: Arc<ServiceProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &Arc<ServiceProvider> {
        &self.provider
    }

    /// Resolve every descriptor (building instances on first use), fix up the
    /// numbering and append the exit item as number 0.
    pub fn resolve(&self, descriptors: &[ItemDescriptor]) -> Result<Vec<ResolvedItem>> {
        let mut items = Vec::with_capacity(descriptors.len() + 1);

        for descriptor in descriptors {
            let item = match descriptor.instance() {
                Some(item) => item.clone(),
                None => descriptor.set_instance(self.create_item(descriptor)?),
            };
            items.push(ResolvedItem::new(descriptor.item_number(), item));
        }

        let mut items = fix_number_and_sort_order(items);
        items.push(self.exit_item()?);
        Ok(items)
    }

    fn create_item(&self, descriptor: &ItemDescriptor) -> Result<Arc<dyn MenuItem>> {
        let item_type = descriptor.item_type();
        let name = item_type.name();

        let instance = match self.provider.try_resolve(name) {
            Some(instance) => instance,
            None if item_type.is_contract() => {
                warn!("Contract '{}' has no registered implementation", name);
                return Err(MenuError::configuration(format!(
                    "'{}' is declared as a menu item contract, but no concrete implementation was registered for it",
                    name
                ))
                .into());
            }
            None => item_type.construct(&self.provider).ok_or_else(|| {
                warn!("Unable to construct '{}'", name);
                MenuError::configuration(format!(
                    "Could not find the type named '{}' in the service provider and was unable to create it",
                    name
                ))
            })?,
        };

        let mut item = into_menu_item(name, instance)?;
        item.set_attribute_data(descriptor.data());
        debug!("Resolved menu item '{}'", name);

        Ok(Arc::from(item))
    }

    fn exit_item(&self) -> Result<ResolvedItem> {
        let item: Arc<dyn MenuItem> = match self.provider.try_resolve(EXIT_ITEM_KEY) {
            Some(instance) => Arc::from(into_menu_item(EXIT_ITEM_KEY, instance)?),
            None => Arc::new(ExitMenuItem),
        };
        Ok(ResolvedItem::new(0, item))
    }
}

fn into_menu_item(name: &str, instance: Box<dyn Any + Send>) -> Result<Box<dyn MenuItem>> {
    match instance.downcast::<Box<dyn MenuItem>>() {
        Ok(item) => Ok(*item),
        Err(_) => {
            warn!("'{}' does not implement MenuItem", name);
            Err(MenuError::configuration(format!(
                "'{}' does NOT implement the MenuItem trait",
                name
            ))
            .into())
        }
    }
}

fn sort_items(items: &mut [ResolvedItem]) {
    items.sort_by(|a, b| a.number.cmp(&b.number).then_with(|| a.text.cmp(&b.text)));
}

/// Fill numbering gaps with unnumbered (0) items, then sort by number and text.
///
/// For each slot `1..=len` that no item holds yet, the first unnumbered item
/// in sorted order takes it. Items that explicitly share a number keep it.
pub fn fix_number_and_sort_order(mut items: Vec<ResolvedItem>) -> Vec<ResolvedItem> {
    sort_items(&mut items);

    for slot in 1..=items.len() as i32 {
        if items.iter().any(|item| item.number == slot) {
            continue;
        }

        if let Some(unnumbered) = items.iter_mut().find(|item| item.number == 0) {
            debug!("Assigning number {} to '{}'", slot, unnumbered.text);
            unnumbered.number = slot;
        }
    }

    sort_items(&mut items);
    items
}
