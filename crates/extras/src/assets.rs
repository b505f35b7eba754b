use std::borrow::Cow;

use gpui::{AssetSource, Result, SharedString};

/// Embedded toolbar icon set. Paths match [`crate::ToolbarIconName`].
pub struct ComponentAssets;

const ASSETS: &[(&str, &[u8])] = &[
    (
        "icons/align-center.svg",
        include_bytes!("../assets/icons/align-center.svg"),
    ),
    (
        "icons/align-justify.svg",
        include_bytes!("../assets/icons/align-justify.svg"),
    ),
    (
        "icons/align-left.svg",
        include_bytes!("../assets/icons/align-left.svg"),
    ),
    (
        "icons/align-right.svg",
        include_bytes!("../assets/icons/align-right.svg"),
    ),
    (
        "icons/bold.svg",
        include_bytes!("../assets/icons/bold.svg"),
    ),
    (
        "icons/check.svg",
        include_bytes!("../assets/icons/check.svg"),
    ),
    (
        "icons/chevron-down.svg",
        include_bytes!("../assets/icons/chevron-down.svg"),
    ),
    (
        "icons/code-xml.svg",
        include_bytes!("../assets/icons/code-xml.svg"),
    ),
    (
        "icons/heading-1.svg",
        include_bytes!("../assets/icons/heading-1.svg"),
    ),
    (
        "icons/heading-2.svg",
        include_bytes!("../assets/icons/heading-2.svg"),
    ),
    (
        "icons/image.svg",
        include_bytes!("../assets/icons/image.svg"),
    ),
    (
        "icons/italic.svg",
        include_bytes!("../assets/icons/italic.svg"),
    ),
    (
        "icons/link.svg",
        include_bytes!("../assets/icons/link.svg"),
    ),
    (
        "icons/list-ordered.svg",
        include_bytes!("../assets/icons/list-ordered.svg"),
    ),
    (
        "icons/list.svg",
        include_bytes!("../assets/icons/list.svg"),
    ),
    (
        "icons/minus.svg",
        include_bytes!("../assets/icons/minus.svg"),
    ),
    (
        "icons/pilcrow.svg",
        include_bytes!("../assets/icons/pilcrow.svg"),
    ),
    (
        "icons/redo-2.svg",
        include_bytes!("../assets/icons/redo-2.svg"),
    ),
    (
        "icons/square-code.svg",
        include_bytes!("../assets/icons/square-code.svg"),
    ),
    (
        "icons/strikethrough.svg",
        include_bytes!("../assets/icons/strikethrough.svg"),
    ),
    (
        "icons/text-quote.svg",
        include_bytes!("../assets/icons/text-quote.svg"),
    ),
    (
        "icons/underline.svg",
        include_bytes!("../assets/icons/underline.svg"),
    ),
    (
        "icons/undo-2.svg",
        include_bytes!("../assets/icons/undo-2.svg"),
    ),
];

impl AssetSource for ComponentAssets {
    fn load(&self, path: &str) -> Result<Option<Cow<'static, [u8]>>> {
        Ok(ASSETS
            .iter()
            .find(|(asset_path, _)| *asset_path == path)
            .map(|(_, bytes)| Cow::Borrowed(*bytes)))
    }

    fn list(&self, path: &str) -> Result<Vec<SharedString>> {
        let path = path.trim_matches('/');
        let prefix = if path.is_empty() {
            String::new()
        } else {
            format!("{path}/")
        };

        let mut children: Vec<SharedString> = Vec::new();
        for (asset_path, _) in ASSETS {
            let Some(rest) = asset_path.strip_prefix(prefix.as_str()) else {
                continue;
            };
            let name = rest.split_once('/').map_or(rest, |(dir, _)| dir);
            if !children.iter().any(|item| item.as_ref() == name) {
                children.push(SharedString::from(name.to_string()));
            }
        }

        Ok(children)
    }
}
