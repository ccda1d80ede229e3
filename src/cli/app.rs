use clap::Parser;
use console_menu::menu::BreadcrumbType;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "console-menu")]
#[command(about = "Numbered console menus with nested sub-menus and breadcrumb trails")]
pub struct Cli {
    /// Menu to open first (not case sensitive)
    #[arg(short, long, default_value = "hello1")]
    pub menu: String,

    /// Title shown above the first menu
    #[arg(short, long, default_value = "")]
    pub title: String,

    /// How the title is joined with the titles of parent menus
    #[arg(short, long, value_enum, default_value_t = BreadcrumbType::None)]
    pub breadcrumb: BreadcrumbType,

    /// Config file to use instead of the default location
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// File the session log is written to (truncated on each run)
    #[arg(long, default_value = "console-menu.log")]
    pub log_file: PathBuf,
}
