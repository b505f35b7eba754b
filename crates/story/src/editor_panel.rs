use anyhow::{Context as _, Result};
use editors_pick_components::{ToolbarButton, ToolbarIconName, ToolbarMenuItem, ToolbarSeparator};
use editors_pick_sandbox::{
    Align, Block, BlockKind, SandboxDocument, editing, engine_for, engine_with_document,
};
use editors_pick_toolbar::{
    Activation, BlockTypeMenu, CommandEntry, EditorFamily, Engine, EntryGroup, GestureCounter,
    PendingPrompt, ToolbarController,
};
use gpui::prelude::FluentBuilder as _;
use gpui::*;
use gpui_component::button::{Button, ButtonVariants as _};
use gpui_component::input::{Input, InputEvent, InputState};
use gpui_component::notification::Notification;
use gpui_component::popover::Popover;
use gpui_component::{
    ActiveTheme as _, Disableable as _, Icon, Selectable as _, Sizable as _, WindowExt as _,
    h_flex, v_flex,
};
use serde_json::json;

use crate::config::StoryConfig;

const NODE_TREE_PLACEHOLDER: &str = "Enter some rich text...";

pub type PanelController = ToolbarController<Box<dyn Engine>>;

/// Fresh controller over a fresh sandbox engine for `family`.
pub fn mount_controller(family: EditorFamily, config: &StoryConfig) -> Result<PanelController> {
    let toolbar = family
        .toolbar()
        .with_context(|| format!("building the {} toolbar", family.label()))?;
    let engine = match family {
        EditorFamily::Schema if !config.seed_content => {
            engine_with_document(family, SandboxDocument::empty(), config.sandbox)
        }
        _ => engine_for(family, config.sandbox),
    }
    .with_context(|| format!("starting the {} engine", family.label()))?;

    tracing::info!(family = family.label(), "editor mounted");
    Ok(ToolbarController::mount(toolbar, engine))
}

/// One editor: toolbar, document view, and the inputs that feed the engine.
pub struct EditorPanel {
    family: EditorFamily,
    controller: PanelController,
    menu: BlockTypeMenu,
    gestures: GestureCounter,
    prompt: Option<PendingPrompt>,
    prompt_input: Entity<InputState>,
    text_input: Entity<InputState>,
    _subscriptions: Vec<Subscription>,
}

impl EditorPanel {
    pub fn view(
        family: EditorFamily,
        controller: PanelController,
        menu: BlockTypeMenu,
        window: &mut Window,
        cx: &mut App,
    ) -> Entity<Self> {
        cx.new(|cx| Self::new(family, controller, menu, window, cx))
    }

    fn new(
        family: EditorFamily,
        controller: PanelController,
        mut menu: BlockTypeMenu,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        menu.sync(&controller);

        let prompt_input = cx.new(|cx| InputState::new(window, cx));
        let text_input = cx.new(|cx| {
            let mut state = InputState::new(window, cx);
            let placeholder = match family {
                EditorFamily::NodeTree => NODE_TREE_PLACEHOLDER,
                EditorFamily::Schema => "Type into the focused block, Enter for a new one",
            };
            state.set_placeholder(placeholder, window, cx);
            state
        });

        let subscriptions = vec![
            cx.subscribe_in(&prompt_input, window, |this, _, event: &InputEvent, window, cx| {
                if matches!(event, InputEvent::PressEnter { .. }) {
                    this.confirm_prompt(window, cx);
                }
            }),
            cx.subscribe_in(&text_input, window, |this, _, event: &InputEvent, window, cx| {
                if matches!(event, InputEvent::PressEnter { .. }) {
                    this.commit_text(window, cx);
                }
            }),
        ];

        window.focus(&text_input.focus_handle(cx));

        Self {
            family,
            controller,
            menu,
            gestures: GestureCounter::default(),
            prompt: None,
            prompt_input,
            text_input,
            _subscriptions: subscriptions,
        }
    }

    /// Releases the engine. Later clicks on this panel are dropped.
    pub fn unmount(&mut self, cx: &mut Context<Self>) {
        self.prompt = None;
        if self.controller.unmount().is_some() {
            tracing::info!(family = self.family.label(), "editor unmounted");
        }
        self.menu.sync(&self.controller);
        cx.notify();
    }

    fn activate(&mut self, id: &str, window: &mut Window, cx: &mut Context<Self>) {
        let gesture = self.gestures.next();
        let outcome = self.controller.activate(id, gesture);
        self.handle_outcome(id, outcome, window, cx);
    }

    fn select_block_type(&mut self, id: &str, window: &mut Window, cx: &mut Context<Self>) {
        let gesture = self.gestures.next();
        let outcome = self.menu.select(&mut self.controller, id, gesture);
        self.handle_outcome(id, outcome, window, cx);
    }

    fn handle_outcome(
        &mut self,
        id: &str,
        outcome: Activation,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        match outcome {
            Activation::AwaitingInput(prompt) => {
                // One input box: a prompt it replaces is cancelled so its
                // control does not stay busy.
                if let Some(replaced) = self.prompt.take() {
                    if replaced.command_id != prompt.command_id {
                        self.controller.submit_input(&replaced.command_id, None);
                    }
                }
                let initial = prompt.initial.clone().unwrap_or_default();
                self.prompt_input.update(cx, |state, cx| {
                    state.set_placeholder(prompt.title.clone(), window, cx);
                    state.set_value(initial, window, cx);
                });
                window.focus(&self.prompt_input.focus_handle(cx));
                self.prompt = Some(prompt);
            }
            Activation::Failed(err) => {
                window.push_notification(Notification::new().message(err.to_string()), cx);
            }
            Activation::Rejected(reason) => {
                tracing::debug!(command = id, ?reason, "activation rejected");
            }
            Activation::Applied | Activation::Cancelled | Activation::Dropped => {}
        }
        self.menu.sync(&self.controller);
        cx.notify();
    }

    fn confirm_prompt(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let Some(prompt) = self.prompt.take() else {
            return;
        };
        let value = self.prompt_input.read(cx).value().to_string();
        let outcome = self.controller.submit_input(&prompt.command_id, Some(value));
        self.handle_outcome(&prompt.command_id, outcome, window, cx);
        window.focus(&self.text_input.focus_handle(cx));
    }

    fn cancel_prompt(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let Some(prompt) = self.prompt.take() else {
            return;
        };
        let outcome = self.controller.submit_input(&prompt.command_id, None);
        self.handle_outcome(&prompt.command_id, outcome, window, cx);
        window.focus(&self.text_input.focus_handle(cx));
    }

    /// Enter in the text field: append the typed text to the focused block,
    /// or start a new block when the field is empty.
    fn commit_text(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let text = self.text_input.read(cx).value().to_string();
        let result = self.controller.update_engine(|engine| {
            if text.is_empty() {
                engine.run_command(editing::command::SPLIT_BLOCK, None)
            } else {
                engine.run_command(editing::command::INSERT_TEXT, Some(json!({ "text": text })))
            }
        });

        match result {
            Some(Ok(())) => {
                self.text_input
                    .update(cx, |state, cx| state.set_value("", window, cx));
            }
            Some(Err(err)) => {
                window.push_notification(Notification::new().message(err.to_string()), cx);
            }
            None => {}
        }
        self.menu.sync(&self.controller);
        cx.notify();
    }

    fn focus_block(&mut self, index: usize, window: &mut Window, cx: &mut Context<Self>) {
        let result = self.controller.update_engine(|engine| {
            engine.run_command(editing::command::FOCUS_BLOCK, Some(json!({ "index": index })))
        });
        if let Some(Err(err)) = result {
            tracing::warn!(index, %err, "focus_block failed");
        }
        self.menu.sync(&self.controller);
        window.focus(&self.text_input.focus_handle(cx));
        cx.notify();
    }

    fn document(&self) -> Option<SandboxDocument> {
        let engine = self.controller.engine()?;
        match engine.run_query::<SandboxDocument>(editing::query::DOCUMENT, None) {
            Ok(doc) => Some(doc),
            Err(err) => {
                tracing::warn!(%err, "document query failed");
                None
            }
        }
    }

    fn render_toolbar(&self, cx: &mut Context<Self>) -> Div {
        let mut children: Vec<AnyElement> = Vec::new();
        let mut last_group: Option<EntryGroup> = None;

        for entry in self.controller.catalog().iter() {
            let group = entry.entry_group();
            if last_group == Some(group) {
                if group == EntryGroup::BlockType {
                    continue;
                }
            } else {
                if last_group.is_some() {
                    children.push(ToolbarSeparator.into_any_element());
                }
                last_group = Some(group);
            }

            let element = match group {
                EntryGroup::BlockType => self.render_block_menu(cx),
                _ => self.render_button(entry, cx).into_any_element(),
            };
            children.push(element);
        }

        h_flex()
            .flex_wrap()
            .items_center()
            .px(px(6.))
            .py(px(4.))
            .border_b_1()
            .border_color(cx.theme().border)
            .children(children)
    }

    fn render_button(&self, entry: &CommandEntry, cx: &mut Context<Self>) -> ToolbarButton {
        let state = self.controller.state();
        let id = entry.id().to_string();
        let element_id = SharedString::from(format!("toolbar-{id}"));

        ToolbarButton::icon(element_id, ToolbarIconName::from(entry.icon()))
            .tooltip(entry.label().to_string())
            .selected(state.is_active(&id))
            .disabled(!state.is_available(&id))
            .on_click(cx.listener(move |this, _, window, cx| {
                this.activate(&id, window, cx);
            }))
    }

    fn render_block_menu(&self, cx: &mut Context<Self>) -> AnyElement {
        let panel = cx.entity();
        let selected = self.menu.selected();
        let selected_id = selected.id().to_string();
        let items: Vec<(String, ToolbarIconName, SharedString)> = self
            .menu
            .entries()
            .iter()
            .map(|entry| {
                (
                    entry.id().to_string(),
                    ToolbarIconName::from(entry.icon()),
                    SharedString::from(entry.label().to_string()),
                )
            })
            .collect();

        let trigger_panel = panel.clone();
        Popover::new("block-type-menu")
            .appearance(false)
            .trigger(
                ToolbarButton::new("block-type-trigger")
                    .dropdown()
                    .tooltip("Block type")
                    .min_width(px(150.))
                    .disabled(!self.controller.is_mounted())
                    .child(Icon::new(ToolbarIconName::from(selected.icon())))
                    .child(selected.label().to_string())
                    .on_click(move |_, _, cx| {
                        trigger_panel.update(cx, |this, _| this.menu.open());
                    }),
            )
            .content(move |_, _window, cx| {
                let theme = cx.theme();
                let popover = cx.entity();

                v_flex()
                    .p(px(4.))
                    .gap(px(2.))
                    .bg(theme.popover)
                    .border_1()
                    .border_color(theme.border)
                    .rounded(theme.radius)
                    .shadow_md()
                    .children(items.iter().map(|(id, icon, label)| {
                        let popover = popover.clone();
                        let panel = panel.clone();
                        let id = id.clone();
                        ToolbarMenuItem::new(
                            SharedString::from(format!("block-type-{id}")),
                            *icon,
                            label.clone(),
                        )
                        .checked(id == selected_id)
                        .on_click(move |_, window, cx| {
                            panel.update(cx, |this, cx| this.select_block_type(&id, window, cx));
                            popover.update(cx, |state, cx| state.dismiss(window, cx));
                        })
                    }))
            })
            .into_any_element()
    }

    fn render_prompt(&self, prompt: &PendingPrompt, cx: &mut Context<Self>) -> Div {
        h_flex()
            .items_center()
            .gap_x_2()
            .px(px(12.))
            .py(px(6.))
            .border_b_1()
            .border_color(cx.theme().border)
            .bg(cx.theme().muted)
            .child(div().text_sm().child(prompt.title.clone()))
            .child(Input::new(&self.prompt_input).flex_1().min_w(px(0.)).small())
            .child(
                Button::new("prompt-confirm")
                    .small()
                    .primary()
                    .label("OK")
                    .on_click(cx.listener(|this, _, window, cx| this.confirm_prompt(window, cx))),
            )
            .child(
                Button::new("prompt-cancel")
                    .small()
                    .ghost()
                    .label("Cancel")
                    .on_click(cx.listener(|this, _, window, cx| this.cancel_prompt(window, cx))),
            )
    }

    fn render_block(
        &self,
        index: usize,
        block: &Block,
        focused: bool,
        ordinal: usize,
        cx: &mut Context<Self>,
    ) -> AnyElement {
        let on_focus = cx.listener(move |this, _: &MouseDownEvent, window, cx| {
            this.focus_block(index, window, cx);
        });
        let theme = cx.theme();
        let element_id = SharedString::from(format!("block-{index}"));

        let mut text = div().min_w(px(0.)).child(block.text.clone());
        if block.marks.bold {
            text = text.font_weight(FontWeight::BOLD);
        }
        if block.marks.italic {
            text = text.italic();
        }
        if block.marks.underline || block.link.is_some() {
            text = text.underline();
        }
        if block.marks.strikethrough {
            text = text.line_through();
        }
        if block.marks.code {
            text = text
                .font_family(theme.mono_font_family.clone())
                .bg(theme.muted)
                .rounded(px(3.));
        }
        if block.link.is_some() {
            text = text.text_color(theme.link);
        }

        let content = match &block.kind {
            BlockKind::Paragraph => div().text_base().child(text),
            BlockKind::Heading { level } => {
                let heading = div().font_weight(FontWeight::BOLD).child(text);
                if *level <= 1 {
                    heading.text_2xl()
                } else {
                    heading.text_xl()
                }
            }
            BlockKind::BulletItem => h_flex().gap_x_2().child("•").child(text),
            BlockKind::OrderedItem => h_flex().gap_x_2().child(format!("{ordinal}.")).child(text),
            BlockKind::Quote => div()
                .pl(px(12.))
                .border_l_2()
                .border_color(theme.border)
                .text_color(theme.muted_foreground)
                .child(text),
            BlockKind::CodeBlock => div()
                .p(px(8.))
                .rounded(theme.radius)
                .bg(theme.muted)
                .font_family(theme.mono_font_family.clone())
                .text_sm()
                .child(text),
            BlockKind::HorizontalRule => div().py(px(6.)).child(div().h(px(1.)).bg(theme.border)),
            BlockKind::Image { src } => h_flex()
                .gap_x_2()
                .text_color(theme.muted_foreground)
                .child(Icon::new(ToolbarIconName::Image))
                .child(src.clone()),
        };

        let content = match block.effective_align() {
            Align::Center => content.text_center(),
            Align::Right => content.text_right(),
            Align::Left | Align::Justify => content,
        };

        div()
            .id(element_id)
            .px(px(8.))
            .py(px(4.))
            .rounded(px(4.))
            .border_1()
            .border_color(if focused {
                theme.accent
            } else {
                theme.transparent
            })
            .cursor_text()
            .on_mouse_down(MouseButton::Left, on_focus)
            .child(content)
            .into_any_element()
    }

    fn render_document(&self, cx: &mut Context<Self>) -> AnyElement {
        let Some(doc) = self.document() else {
            return div()
                .p(px(16.))
                .text_color(cx.theme().muted_foreground)
                .child("Editor unmounted")
                .into_any_element();
        };

        let is_blank = doc.plain_text().is_empty();
        let mut ordinal = 0;
        let blocks: Vec<AnyElement> = doc
            .blocks()
            .iter()
            .enumerate()
            .map(|(index, block)| {
                ordinal = if block.kind == BlockKind::OrderedItem {
                    ordinal + 1
                } else {
                    0
                };
                self.render_block(index, block, index == doc.cursor(), ordinal, cx)
            })
            .collect();

        v_flex()
            .id("document")
            .flex_1()
            .min_h(px(0.))
            .overflow_y_scroll()
            .p(px(12.))
            .gap(px(4.))
            .when(is_blank && self.family == EditorFamily::NodeTree, |this| {
                this.child(
                    div()
                        .px(px(8.))
                        .text_color(cx.theme().muted_foreground)
                        .child(NODE_TREE_PLACEHOLDER),
                )
            })
            .children(blocks)
            .into_any_element()
    }
}

impl Render for EditorPanel {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let border = cx.theme().border;
        let radius = cx.theme().radius;
        let background = cx.theme().background;

        let toolbar = self.render_toolbar(cx);
        let prompt = self
            .prompt
            .clone()
            .map(|prompt| self.render_prompt(&prompt, cx));
        let document = self.render_document(cx);

        v_flex()
            .size_full()
            .border_1()
            .border_color(border)
            .rounded(radius)
            .bg(background)
            .child(toolbar)
            .children(prompt)
            .child(document)
            .child(
                h_flex()
                    .px(px(12.))
                    .py(px(8.))
                    .border_t_1()
                    .border_color(border)
                    .child(Input::new(&self.text_input).flex_1().min_w(px(0.))),
            )
    }
}
