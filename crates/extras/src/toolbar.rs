use std::rc::Rc;

use editors_pick_toolbar::IconKey;
use gpui::InteractiveElement as _;
use gpui::StatefulInteractiveElement as _;
use gpui::prelude::FluentBuilder as _;
use gpui::{
    AnyElement, App, ClickEvent, ElementId, FontWeight, Hsla, IntoElement, MouseButton,
    ParentElement, Pixels, RenderOnce, SharedString, StyleRefinement, Styled, Window, div, px,
};
use gpui_component::tooltip::Tooltip;
use gpui_component::{
    ActiveTheme as _, Disableable, Icon, IconNamed, Selectable, StyledExt as _, h_flex,
};

type ClickHandler = Rc<dyn Fn(&ClickEvent, &mut Window, &mut App)>;

#[derive(IntoElement, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToolbarIconName {
    AlignCenter,
    AlignJustify,
    AlignLeft,
    AlignRight,
    Bold,
    Check,
    ChevronDown,
    CodeXml,
    Heading1,
    Heading2,
    Image,
    Italic,
    Link,
    List,
    ListOrdered,
    Minus,
    Pilcrow,
    Redo2,
    SquareCode,
    Strikethrough,
    TextQuote,
    Underline,
    Undo2,
}

impl IconNamed for ToolbarIconName {
    fn path(self) -> SharedString {
        match self {
            Self::AlignCenter => "icons/align-center.svg",
            Self::AlignJustify => "icons/align-justify.svg",
            Self::AlignLeft => "icons/align-left.svg",
            Self::AlignRight => "icons/align-right.svg",
            Self::Bold => "icons/bold.svg",
            Self::Check => "icons/check.svg",
            Self::ChevronDown => "icons/chevron-down.svg",
            Self::CodeXml => "icons/code-xml.svg",
            Self::Heading1 => "icons/heading-1.svg",
            Self::Heading2 => "icons/heading-2.svg",
            Self::Image => "icons/image.svg",
            Self::Italic => "icons/italic.svg",
            Self::Link => "icons/link.svg",
            Self::List => "icons/list.svg",
            Self::ListOrdered => "icons/list-ordered.svg",
            Self::Minus => "icons/minus.svg",
            Self::Pilcrow => "icons/pilcrow.svg",
            Self::Redo2 => "icons/redo-2.svg",
            Self::SquareCode => "icons/square-code.svg",
            Self::Strikethrough => "icons/strikethrough.svg",
            Self::TextQuote => "icons/text-quote.svg",
            Self::Underline => "icons/underline.svg",
            Self::Undo2 => "icons/undo-2.svg",
        }
        .into()
    }
}

impl From<IconKey> for ToolbarIconName {
    fn from(key: IconKey) -> Self {
        match key {
            IconKey::Undo => Self::Undo2,
            IconKey::Redo => Self::Redo2,
            IconKey::Paragraph => Self::Pilcrow,
            IconKey::LargeHeading => Self::Heading1,
            IconKey::SmallHeading => Self::Heading2,
            IconKey::BulletList => Self::List,
            IconKey::NumberedList => Self::ListOrdered,
            IconKey::Quote => Self::TextQuote,
            IconKey::Code => Self::SquareCode,
            IconKey::Bold => Self::Bold,
            IconKey::Italic => Self::Italic,
            IconKey::Underline => Self::Underline,
            IconKey::Strikethrough => Self::Strikethrough,
            IconKey::InlineCode => Self::CodeXml,
            IconKey::Link => Self::Link,
            IconKey::LeftAlign => Self::AlignLeft,
            IconKey::CenterAlign => Self::AlignCenter,
            IconKey::RightAlign => Self::AlignRight,
            IconKey::JustifyAlign => Self::AlignJustify,
            IconKey::Image => Self::Image,
            IconKey::HorizontalRule => Self::Minus,
        }
    }
}

impl RenderOnce for ToolbarIconName {
    fn render(self, _: &mut Window, _: &mut App) -> impl IntoElement {
        Icon::new(self)
    }
}

/// Toolbar control surface: an icon button, or with [`ToolbarButton::dropdown`]
/// a menu trigger with a trailing chevron. Mouse down never takes focus, so
/// the editor keeps its caret while a control is pressed.
#[derive(IntoElement)]
pub struct ToolbarButton {
    id: ElementId,
    style: StyleRefinement,
    tooltip: Option<SharedString>,
    disabled: bool,
    selected: bool,
    dropdown: bool,
    children: Vec<AnyElement>,
    on_click: Option<ClickHandler>,
    min_width: Pixels,
}

impl ToolbarButton {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            style: StyleRefinement::default(),
            tooltip: None,
            disabled: false,
            selected: false,
            dropdown: false,
            children: Vec::new(),
            on_click: None,
            min_width: px(32.),
        }
    }

    pub fn icon(id: impl Into<ElementId>, icon: impl IconNamed) -> Self {
        Self::new(id).child(Icon::new(icon))
    }

    pub fn dropdown(mut self) -> Self {
        self.dropdown = true;
        self
    }

    pub fn tooltip(mut self, tooltip: impl Into<SharedString>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    pub fn on_click(
        mut self,
        on_click: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_click = Some(Rc::new(on_click));
        self
    }

    pub fn min_width(mut self, min_width: Pixels) -> Self {
        self.min_width = min_width;
        self
    }

    fn colors(&self, cx: &App) -> (Hsla, Hsla) {
        let theme = cx.theme();
        if self.disabled {
            (theme.transparent, theme.muted_foreground.opacity(0.6))
        } else if self.selected {
            (theme.accent, theme.accent_foreground)
        } else {
            (theme.transparent, theme.foreground)
        }
    }
}

impl ParentElement for ToolbarButton {
    fn extend(&mut self, elements: impl IntoIterator<Item = AnyElement>) {
        self.children.extend(elements);
    }
}

impl Styled for ToolbarButton {
    fn style(&mut self) -> &mut StyleRefinement {
        &mut self.style
    }
}

impl Selectable for ToolbarButton {
    fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    fn is_selected(&self) -> bool {
        self.selected
    }
}

impl Disableable for ToolbarButton {
    fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

impl RenderOnce for ToolbarButton {
    fn render(self, _window: &mut Window, cx: &mut App) -> impl IntoElement {
        let (bg, fg) = self.colors(cx);
        let theme = cx.theme();
        let (hover_bg, hover_fg) = (theme.muted, theme.muted_foreground);
        let (press_bg, press_fg) = (theme.accent, theme.accent_foreground);
        let chevron_fg = theme.muted_foreground;
        let disabled = self.disabled;

        let body = if self.dropdown {
            div()
                .flex()
                .flex_1()
                .items_center()
                .justify_between()
                .gap(px(8.))
                .child(h_flex().gap(px(8.)).children(self.children))
                .child(
                    Icon::new(ToolbarIconName::ChevronDown)
                        .size_3p5()
                        .text_color(chevron_fg),
                )
        } else {
            h_flex().flex_1().justify_center().gap(px(8.)).children(self.children)
        };

        div()
            .id(self.id)
            .flex()
            .items_center()
            .justify_center()
            .h(px(32.))
            .min_w(self.min_width)
            .px(px(6.))
            .rounded(px(6.))
            .text_size(px(12.))
            .font_weight(FontWeight::MEDIUM)
            .bg(bg)
            .text_color(fg)
            .refine_style(&self.style)
            .child(body)
            .on_mouse_down(MouseButton::Left, move |_, window, cx| {
                if disabled {
                    cx.stop_propagation();
                } else {
                    window.prevent_default();
                }
            })
            .when(!disabled, |this| {
                this.cursor_pointer()
                    .hover(|this| this.bg(hover_bg).text_color(hover_fg))
                    .active(|this| this.bg(press_bg).text_color(press_fg))
                    .when_some(self.on_click, |this, on_click| {
                        this.on_click(move |event, window, cx| on_click(event, window, cx))
                    })
            })
            .when_some(self.tooltip, |this, tooltip| {
                this.tooltip(move |window, cx| Tooltip::new(tooltip.clone()).build(window, cx))
            })
    }
}

#[derive(IntoElement)]
pub struct ToolbarSeparator;

impl RenderOnce for ToolbarSeparator {
    fn render(self, _: &mut Window, cx: &mut App) -> impl IntoElement {
        let theme = cx.theme();
        div()
            .mx(px(6.))
            .py(px(2.))
            .child(div().h(px(18.)).w(px(1.)).bg(theme.border))
    }
}

/// One row of the block-type menu.
#[derive(IntoElement)]
pub struct ToolbarMenuItem {
    id: ElementId,
    icon: ToolbarIconName,
    label: SharedString,
    checked: bool,
    on_click: Option<ClickHandler>,
}

impl ToolbarMenuItem {
    pub fn new(
        id: impl Into<ElementId>,
        icon: impl Into<ToolbarIconName>,
        label: impl Into<SharedString>,
    ) -> Self {
        Self {
            id: id.into(),
            icon: icon.into(),
            label: label.into(),
            checked: false,
            on_click: None,
        }
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn on_click(
        mut self,
        on_click: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_click = Some(Rc::new(on_click));
        self
    }
}

impl RenderOnce for ToolbarMenuItem {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let theme = cx.theme();
        let check = div().w(px(16.)).when(self.checked, |this| {
            this.child(
                Icon::new(ToolbarIconName::Check)
                    .size_3p5()
                    .text_color(theme.muted_foreground),
            )
        });

        let mut button = ToolbarButton::new(self.id)
            .w_full()
            .min_width(px(180.))
            .selected(self.checked)
            .child(
                h_flex()
                    .flex_1()
                    .gap(px(8.))
                    .child(Icon::new(self.icon))
                    .child(self.label),
            )
            .child(check);
        if let Some(on_click) = self.on_click {
            button = button.on_click(move |event, window, cx| on_click(event, window, cx));
        }

        button.render(window, cx)
    }
}
