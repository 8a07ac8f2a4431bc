use std::borrow::Cow;

use gpui::{AssetSource, SharedString};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "assets"]
pub struct Assets;

impl AssetSource for Assets {
    fn load(&self, path: &str) -> gpui::Result<Option<Cow<'static, [u8]>>> {
        Ok(Self::get(path).map(|f| f.data))
    }

    fn list(&self, path: &str) -> gpui::Result<Vec<SharedString>> {
        Ok(Self::iter()
            .filter(|p| p.starts_with(path))
            .map(SharedString::from)
            .collect())
    }
}

/// Embedded SVG icons used by the file chooser and toolbar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Icon {
    Folder,
    Sheet,
    Parent,
    ChevronDown,
}

impl Icon {
    pub fn path(self) -> &'static str {
        match self {
            Icon::Folder => "icons/folder.svg",
            Icon::Sheet => "icons/sheet.svg",
            Icon::Parent => "icons/parent.svg",
            Icon::ChevronDown => "icons/chevron-down.svg",
        }
    }
}
