use anyhow::Result;
use async_trait::async_trait;

use super::controller::MenuController;

/// What the controller should do once an item has finished its work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuResponse {
    /// Leave the menu the item belongs to
    pub exit_menu: bool,
    /// Clear the screen before the menu is drawn again; when false a separator
    /// is written instead so the item's output stays visible
    pub clear_screen: bool,
}

impl MenuResponse {
    pub fn new(exit_menu: bool, clear_screen: bool) -> Self {
        Self {
            exit_menu,
            clear_screen,
        }
    }

    /// Stay in the menu and redraw it on a clean screen.
    pub fn stay() -> Self {
        Self::new(false, true)
    }

    /// Stay in the menu, keeping the item's output on screen.
    pub fn stay_no_clear() -> Self {
        Self::new(false, false)
    }

    pub fn exit() -> Self {
        Self::new(true, true)
    }
}

/// A selectable action in a menu.
///
/// `work` receives the controller so an item can open a sub-menu with
/// [`MenuController::display_menu`]; the nested menu runs to completion before
/// `work` returns.
#[async_trait]
pub trait MenuItem: Send + Sync {
    /// Text shown beside the item's number.
    fn item_text(&self) -> String;

    /// Receives the optional data string the item was registered with.
    fn set_attribute_data(&mut self, _data: Option<&str>) {}

    async fn work(&self, menu: &MenuController) -> Result<MenuResponse>;
}

/// The item appended to every menu under number 0.
#[derive(Debug, Default)]
pub struct ExitMenuItem;

#[async_trait]
impl MenuItem for ExitMenuItem {
    fn item_text(&self) -> String {
        "Exit".to_string()
    }

    async fn work(&self, _menu: &MenuController) -> Result<MenuResponse> {
        Ok(MenuResponse::exit())
    }
}
