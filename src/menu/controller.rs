use anyhow::{Context, Result};
use log::{debug, info};
use std::sync::{Arc, Mutex, MutexGuard};

use super::item::MenuItem;
use super::provider::ServiceProvider;
use super::registry::MenuRegistry;
use super::resolver::{ItemResolver, ResolvedItem};
use crate::config::MenuSettings;
use crate::console::Console;
use crate::ui::Prompter;

/// How a menu's title is combined with the titles of the menus above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum BreadcrumbType {
    /// Show the menu's own title only
    #[default]
    None,
    /// `Parent > Child`
    ParentOnly,
    /// Extend the parent's trail: `Root > Parent > Child`
    Concatenate,
}

/// One active menu on the navigation stack.
#[derive(Debug, Clone)]
pub struct MenuFrame {
    pub title: String,
    pub breadcrumb_title: String,
    pub items: Vec<ResolvedItem>,
}

impl MenuFrame {
    /// The line shown above the items: the breadcrumb trail when there is one,
    /// the plain title otherwise.
    pub fn display_title(&self) -> &str {
        if self.breadcrumb_title.trim().is_empty() {
            &self.title
        } else {
            &self.breadcrumb_title
        }
    }
}

/// Compose the breadcrumb for a new menu titled `title` opened from `parent`.
///
/// Parents without a title contribute nothing, and a menu without a title
/// gets no trail at all.
pub fn build_breadcrumb_trail(
    parent: Option<&MenuFrame>,
    breadcrumb_type: BreadcrumbType,
    title: &str,
) -> String {
    if breadcrumb_type == BreadcrumbType::None || title.trim().is_empty() {
        return String::new();
    }

    let Some(parent) = parent.filter(|p| !p.title.trim().is_empty()) else {
        return title.to_string();
    };

    if breadcrumb_type == BreadcrumbType::ParentOnly || parent.breadcrumb_title.trim().is_empty()
    {
        format!("{} > {}", parent.title, title)
    } else {
        format!("{} > {}", parent.breadcrumb_title, title)
    }
}

/// Drives the show / select / dispatch loop for nested menus.
///
/// Each call to [`display_menu`](Self::display_menu) pushes a frame and keeps
/// it until the user picks an item that exits. Items open sub-menus by calling
/// `display_menu` again from their `work`, so nesting follows the call stack.
/// One controller serves one interactive session at a time.
pub struct MenuController {
    registry: Arc<MenuRegistry>,
    resolver: ItemResolver,
    prompts: Prompter,
    settings: MenuSettings,
    stack: Mutex<Vec<MenuFrame>>,
}

impl MenuController {
    pub fn new(
        registry: Arc<MenuRegistry>,
        provider: Arc<ServiceProvider>,
        console: Arc<dyn Console>,
    ) -> Self {
        Self {
            registry,
            resolver: ItemResolver::new(provider),
            prompts: Prompter::new(console),
            settings: MenuSettings::default(),
            stack: Mutex::new(Vec::new()),
        }
    }

    pub fn with_settings(mut self, settings: MenuSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Prompts bound to the same console the menus are drawn on.
    pub fn prompts(&self) -> &Prompter {
        &self.prompts
    }

    pub fn console(&self) -> &Arc<dyn Console> {
        self.prompts.console()
    }

    pub fn provider(&self) -> &Arc<ServiceProvider> {
        self.resolver.provider()
    }

    pub fn settings(&self) -> &MenuSettings {
        &self.settings
    }

    /// Number of menus currently open.
    pub fn depth(&self) -> usize {
        self.lock_stack().len()
    }

    pub async fn show(&self, menu_name: &str) -> Result<()> {
        self.display_menu(menu_name, "", BreadcrumbType::None).await
    }

    pub async fn show_titled(&self, menu_name: &str, title: &str) -> Result<()> {
        self.display_menu(menu_name, title, BreadcrumbType::None).await
    }

    /// Show a menu and handle selections until the user exits it.
    ///
    /// Unknown or blank menu names and items that cannot be resolved fail
    /// before anything is drawn. Errors returned by an item's `work` end this
    /// menu (and any menus above it) and are passed on unchanged.
    pub async fn display_menu(
        &self,
        menu_name: &str,
        title: &str,
        breadcrumb_type: BreadcrumbType,
    ) -> Result<()> {
        let descriptors = self.registry.lookup(menu_name)?;
        let items = self.resolver.resolve(descriptors)?;

        let depth = {
            let mut stack = self.lock_stack();
            let breadcrumb_title = build_breadcrumb_trail(stack.last(), breadcrumb_type, title);
            debug!("Menu '{}' breadcrumb: '{}'", menu_name, breadcrumb_title);
            stack.push(MenuFrame {
                title: title.to_string(),
                breadcrumb_title,
                items,
            });
            stack.len()
        };
        info!("Opened menu '{}' at depth {}", menu_name, depth);

        let result = self.run_current_menu().await;

        self.lock_stack().pop();
        info!("Closed menu '{}' at depth {}", menu_name, depth);

        result
    }

    async fn run_current_menu(&self) -> Result<()> {
        let mut redraw = Some(true);

        loop {
            if let Some(clear_screen) = redraw.take() {
                self.show_current_menu(clear_screen)?;
            }

            let choice = self
                .prompts
                .get_number("", self.settings.selection_attempts.get())?;

            let Some(item) = choice.and_then(|number| self.find_item(number)) else {
                debug!("Invalid menu selection: {:?}", choice);
                self.show_current_menu(true)?;
                self.write_line(&self.settings.invalid_selection_notice)?;
                continue;
            };

            let response = item.work(self).await?;
            if response.exit_menu {
                return Ok(());
            }

            redraw = Some(response.clear_screen);
        }
    }

    fn find_item(&self, number: i32) -> Option<Arc<dyn MenuItem>> {
        let stack = self.lock_stack();
        stack
            .last()?
            .items
            .iter()
            .find(|item| item.number == number)
            .map(|item| item.item.clone())
    }

    fn show_current_menu(&self, clear_screen: bool) -> Result<()> {
        let stack = self.lock_stack();
        let Some(frame) = stack.last() else {
            return Ok(());
        };

        if clear_screen {
            self.console()
                .clear_screen()
                .context("Failed to clear the console")?;
        } else {
            self.write_line(&self.settings.separator)?;
        }

        let title = frame.display_title();
        if !title.trim().is_empty() {
            self.write_line(title)?;
        }

        for item in &frame.items {
            self.write_line(&format!("{}. {}", item.number, item.item.item_text()))?;
        }

        self.write_line(&self.settings.refresh_hint)
    }

    fn write_line(&self, text: &str) -> Result<()> {
        self.console()
            .write_line(text)
            .context("Failed to write to the console")
    }

    fn lock_stack(&self) -> MutexGuard<'_, Vec<MenuFrame>> {
        self.stack.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
