//! Menu registration, resolution and navigation

pub mod controller;
pub mod item;
pub mod provider;
pub mod registry;
pub mod resolver;

pub use controller::{BreadcrumbType, MenuController, MenuFrame};
pub use item::{ExitMenuItem, MenuItem, MenuResponse};
pub use provider::{EXIT_ITEM_KEY, ServiceCollection, ServiceProvider};
pub use registry::{ItemDescriptor, ItemType, MenuEntry, MenuRegistry};
pub use resolver::{ItemResolver, ResolvedItem};
