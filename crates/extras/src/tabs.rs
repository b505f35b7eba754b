use std::rc::Rc;

use gpui::prelude::FluentBuilder as _;
use gpui::{
    App, ElementId, InteractiveElement as _, IntoElement, MouseButton, ParentElement as _,
    RenderOnce, SharedString, StatefulInteractiveElement as _, StyleRefinement, Styled, Window,
    div, px,
};
use gpui_component::{ActiveTheme as _, Sizable, Size, StyledExt as _};

/// Segmented tab header. Only the strip is drawn here; the host decides what
/// to render under it for the selected index.
#[derive(IntoElement)]
pub struct TabStrip {
    id: ElementId,
    style: StyleRefinement,
    labels: Vec<SharedString>,
    selected_index: usize,
    size: Size,
    on_select: Option<Rc<dyn Fn(&usize, &mut Window, &mut App)>>,
}

impl TabStrip {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            style: StyleRefinement::default(),
            labels: Vec::new(),
            selected_index: 0,
            size: Size::Small,
            on_select: None,
        }
    }

    pub fn labels<L: Into<SharedString>>(mut self, labels: impl IntoIterator<Item = L>) -> Self {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn selected_index(mut self, index: usize) -> Self {
        self.selected_index = index;
        self
    }

    pub fn on_select(
        mut self,
        on_select: impl Fn(&usize, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_select = Some(Rc::new(on_select));
        self
    }
}

impl Styled for TabStrip {
    fn style(&mut self) -> &mut StyleRefinement {
        &mut self.style
    }
}

impl Sizable for TabStrip {
    fn with_size(mut self, size: impl Into<Size>) -> Self {
        self.size = size.into();
        self
    }
}

impl RenderOnce for TabStrip {
    fn render(self, _window: &mut Window, cx: &mut App) -> impl IntoElement {
        let theme = cx.theme();
        let count = self.labels.len();
        if count == 0 {
            return div().into_any_element();
        }

        let base_id = self.id.clone();
        let selected = self.selected_index.min(count - 1);

        let height = match self.size {
            Size::XSmall => px(20.),
            Size::Small => px(28.),
            Size::Large => px(36.),
            _ => px(32.),
        };

        let on_select = self.on_select.clone();

        div()
            .id(base_id.clone())
            .flex()
            .flex_row()
            .items_center()
            .h(height)
            .p(px(2.))
            .gap(px(2.))
            .bg(theme.tab_bar_segmented)
            .rounded(theme.radius)
            .refine_style(&self.style)
            .children(self.labels.into_iter().enumerate().map(|(ix, label)| {
                let segment_id: ElementId = (base_id.clone(), format!("tab-{ix}")).into();
                let segment = div()
                    .id(segment_id)
                    .flex()
                    .flex_1()
                    .h_full()
                    .px(px(12.))
                    .items_center()
                    .justify_center()
                    .rounded(theme.radius)
                    .text_sm()
                    .child(div().truncate().child(label));

                if ix == selected {
                    segment
                        .bg(theme.background)
                        .text_color(theme.tab_active_foreground)
                        .when(theme.shadow, |this| this.shadow_sm())
                        .cursor_default()
                } else {
                    segment
                        .text_color(theme.tab_foreground)
                        .cursor_pointer()
                        .hover(|this| this.bg(theme.secondary_hover))
                        .active(|this| this.bg(theme.secondary))
                        .when_some(on_select.clone(), move |this, on_select| {
                            this.on_mouse_down(MouseButton::Left, move |_, window, cx| {
                                window.prevent_default();
                                on_select(&ix, window, cx);
                            })
                        })
                }
            }))
            .into_any_element()
    }
}
