//! gpui widgets for the editor toolbars: the button (icon or dropdown
//! trigger), block-type menu rows, and the tab strip.

mod assets;
mod tabs;
mod toolbar;

pub use assets::ComponentAssets;
pub use tabs::TabStrip;
pub use toolbar::{ToolbarButton, ToolbarIconName, ToolbarMenuItem, ToolbarSeparator};
