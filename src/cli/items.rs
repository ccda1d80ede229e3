//! Demo menus shipped with the binary

use anyhow::Result;
use async_trait::async_trait;
use console_menu::config::Config;
use console_menu::menu::{
    BreadcrumbType, EXIT_ITEM_KEY, ItemType, MenuController, MenuEntry, MenuItem, MenuRegistry,
    MenuResponse, ServiceCollection,
};
use std::sync::Arc;

pub const MAIN_MENU: &str = "Hello1";
pub const SUB_MENU: &str = "Hello2";

pub fn register_services(services: &mut ServiceCollection, config: Arc<Config>) {
    services.add_singleton(config);
    services.add_menu_item(EXIT_ITEM_KEY, |_| ExitNowMenuItem);
}

pub fn register_menus(registry: &mut MenuRegistry) -> Result<()> {
    registry.add_menu_item(
        ItemType::of("what-is-your-name", |_| WhatIsYourNameMenuItem),
        [MenuEntry::new(MAIN_MENU).number(1), MenuEntry::new(SUB_MENU)],
    )?;
    registry.add_menu_item(
        ItemType::of("developer-question", |_| DeveloperQuestionMenuItem),
        [MenuEntry::new(MAIN_MENU).number(2)],
    )?;
    registry.add_menu_item(
        ItemType::of("pick-a-number", |_| PickNumberMenuItem),
        [MenuEntry::new(MAIN_MENU)],
    )?;
    registry.add_menu_item(
        ItemType::of("say-hello", |_| SayHelloMenuItem),
        [MenuEntry::new(MAIN_MENU)],
    )?;
    registry.add_menu_item(
        ItemType::of("launch-sub-menu", |_| LaunchSubMenuItem),
        [MenuEntry::new(MAIN_MENU).number(5)],
    )?;
    registry.add_menu_item(
        ItemType::of("sub-hello", |provider| SubHelloMenuItem {
            config: provider.get::<Config>(),
            data: None,
        }),
        [MenuEntry::new(SUB_MENU).data("This is some data")],
    )?;
    Ok(())
}

struct WhatIsYourNameMenuItem;

#[async_trait]
impl MenuItem for WhatIsYourNameMenuItem {
    fn item_text(&self) -> String {
        "What your name?".to_string()
    }

    async fn work(&self, menu: &MenuController) -> Result<MenuResponse> {
        let name = menu
            .prompts()
            .get_text("What's your name?", false, true)?
            .unwrap_or_default();

        menu.console().write_line(&format!("Hello, {}", name))?;
        menu.console().write_line("-------------------------------")?;

        Ok(MenuResponse::stay_no_clear())
    }
}

struct DeveloperQuestionMenuItem;

#[async_trait]
impl MenuItem for DeveloperQuestionMenuItem {
    fn item_text(&self) -> String {
        "Ask me a question!".to_string()
    }

    async fn work(&self, menu: &MenuController) -> Result<MenuResponse> {
        let answer = if menu.prompts().get_y_or_n("Are you a developer?")? {
            "Use the source Luke!"
        } else {
            "Just curious, huh."
        };

        menu.console().write_line(answer)?;
        menu.console().write_line("------------------------------------")?;

        Ok(MenuResponse::stay_no_clear())
    }
}

struct PickNumberMenuItem;

#[async_trait]
impl MenuItem for PickNumberMenuItem {
    fn item_text(&self) -> String {
        "Pick a number".to_string()
    }

    async fn work(&self, menu: &MenuController) -> Result<MenuResponse> {
        let number = menu.prompts().get_number_in_range(
            "Pick a number between -20 and 20 (or type exit)",
            -20,
            20,
            "exit",
            -100,
        )?;

        let message = if number == -100 {
            "No number for you then.".to_string()
        } else {
            format!("You picked {}", number)
        };
        menu.console().write_line(&message)?;

        Ok(MenuResponse::stay_no_clear())
    }
}

struct SayHelloMenuItem;

#[async_trait]
impl MenuItem for SayHelloMenuItem {
    fn item_text(&self) -> String {
        "Say hello".to_string()
    }

    async fn work(&self, menu: &MenuController) -> Result<MenuResponse> {
        menu.console().write_line("Hello from the main menu")?;
        Ok(MenuResponse::stay_no_clear())
    }
}

struct LaunchSubMenuItem;

#[async_trait]
impl MenuItem for LaunchSubMenuItem {
    fn item_text(&self) -> String {
        "Go to sub menu".to_string()
    }

    async fn work(&self, menu: &MenuController) -> Result<MenuResponse> {
        menu.display_menu(SUB_MENU, "Sub Menu", BreadcrumbType::Concatenate)
            .await?;
        Ok(MenuResponse::stay())
    }
}

struct SubHelloMenuItem {
    config: Option<Arc<Config>>,
    data: Option<String>,
}

#[async_trait]
impl MenuItem for SubHelloMenuItem {
    fn item_text(&self) -> String {
        "Sub Menu item 1".to_string()
    }

    fn set_attribute_data(&mut self, data: Option<&str>) {
        self.data = data.map(str::to_string);
    }

    async fn work(&self, menu: &MenuController) -> Result<MenuResponse> {
        let message = self
            .config
            .as_ref()
            .and_then(|config| config.get_value("TestMessage"))
            .unwrap_or("(no TestMessage configured)");
        menu.console()
            .write_line(&format!("Hello2 from work item 1: {}", message))?;

        if let Some(data) = self.data.as_deref().filter(|d| !d.trim().is_empty()) {
            menu.console()
                .write_line(&format!("Optional data found: {}", data))?;
        }

        Ok(MenuResponse::stay_no_clear())
    }
}

struct ExitNowMenuItem;

#[async_trait]
impl MenuItem for ExitNowMenuItem {
    fn item_text(&self) -> String {
        "Exit NOW!!".to_string()
    }

    async fn work(&self, _menu: &MenuController) -> Result<MenuResponse> {
        Ok(MenuResponse::exit())
    }
}
