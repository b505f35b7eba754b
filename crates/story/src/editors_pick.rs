use std::cell::Cell;
use std::rc::Rc;

use editors_pick_components::TabStrip;
use editors_pick_toolbar::{BlockTypeMenu, EditorFamily, TabShell, TabSubscription};
use gpui::*;
use gpui_component::notification::Notification;
use gpui_component::{ActiveTheme as _, WindowExt as _, h_flex, v_flex};

use crate::config::StoryConfig;
use crate::editor_panel::{EditorPanel, mount_controller};

/// Two editor families side by side under a tab strip. Only the active tab
/// has a mounted editor; switching tears the old one down and mounts a fresh
/// one.
pub struct EditorsPickStory {
    config: StoryConfig,
    shell: TabShell,
    switched_to: Rc<Cell<Option<usize>>>,
    _subscription: TabSubscription,
    panel: Option<Entity<EditorPanel>>,
}

impl EditorsPickStory {
    pub fn view(config: StoryConfig, window: &mut Window, cx: &mut App) -> Entity<Self> {
        cx.new(|cx| Self::new(config, window, cx))
    }

    fn new(config: StoryConfig, window: &mut Window, cx: &mut Context<Self>) -> Self {
        let mut shell = TabShell::new(EditorFamily::ALL.map(EditorFamily::label));
        let switched_to = Rc::new(Cell::new(None));
        let sink = switched_to.clone();
        let subscription = shell.on_change(move |_, next| sink.set(Some(next)));

        if let Err(err) = shell.select(config.initial_tab) {
            tracing::warn!(%err, "initial tab out of range");
        }
        switched_to.set(None);

        let mut this = Self {
            config,
            shell,
            switched_to,
            _subscription: subscription,
            panel: None,
        };
        this.mount_active(window, cx);
        this
    }

    fn select_tab(&mut self, index: usize, window: &mut Window, cx: &mut Context<Self>) {
        match self.shell.select(index) {
            Ok(true) => {}
            Ok(false) => return,
            Err(err) => {
                tracing::warn!(%err, "tab switch rejected");
                return;
            }
        }
        if self.switched_to.take().is_some() {
            self.mount_active(window, cx);
        }
        cx.notify();
    }

    fn mount_active(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        if let Some(old) = self.panel.take() {
            old.update(cx, |panel, cx| panel.unmount(cx));
        }

        let family = EditorFamily::ALL[self.shell.active_index()];
        let mounted = mount_controller(family, &self.config).and_then(|controller| {
            let menu = BlockTypeMenu::new(controller.catalog())?;
            Ok((controller, menu))
        });

        match mounted {
            Ok((controller, menu)) => {
                self.panel = Some(EditorPanel::view(family, controller, menu, window, cx));
            }
            Err(err) => {
                tracing::error!(family = family.label(), "{err:#}");
                window.push_notification(
                    Notification::new().message(format!("Could not open editor: {err}")),
                    cx,
                );
            }
        }
    }
}

impl Render for EditorsPickStory {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let strip = TabStrip::new("editor-tabs")
            .labels(self.shell.labels().iter().cloned())
            .selected_index(self.shell.active_index())
            .on_select(cx.listener(|this, ix: &usize, window, cx| {
                this.select_tab(*ix, window, cx);
            }));
        let theme = cx.theme();

        v_flex()
            .size_full()
            .gap(px(12.))
            .p(px(16.))
            .bg(theme.background)
            .child(h_flex().justify_center().child(strip.w(px(320.))))
            .children(self.panel.clone())
    }
}
