use gpui::prelude::FluentBuilder as _;
use gpui::*;
use gpui_component::StyledExt as _;
use gpui_component::{
    ActiveTheme as _, Icon, Sizable as _,
    button::{Button, ButtonVariants as _},
    h_flex,
    label::Label,
    list::ListItem,
    v_flex,
};

use crate::state::{TableViewState, load_table, refresh_tables};

/// Sidebar listing the catalog. Selection is not sticky across refreshes:
/// whatever `TableViewState` says is selected is what highlights.
pub struct TablesPanel {
    tables: Vec<String>,
    selected_table: String,
    _subscriptions: Vec<Subscription>,
}

impl TablesPanel {
    pub fn view(window: &mut Window, cx: &mut App) -> Entity<Self> {
        cx.new(|cx| Self::new(window, cx))
    }

    fn new(_window: &mut Window, cx: &mut Context<Self>) -> Self {
        let _subscriptions = vec![cx.observe_global::<TableViewState>(|this, cx| {
            let state = cx.global::<TableViewState>();
            this.tables = state.tables.clone();
            this.selected_table = state.selected_table.clone();
            cx.notify();
        })];

        Self {
            tables: vec![],
            selected_table: String::new(),
            _subscriptions,
        }
    }

    pub fn refresh_tables(&mut self, _: &ClickEvent, _window: &mut Window, cx: &mut Context<Self>) {
        refresh_tables(cx);
    }

    fn render_table_item(&self, ix: usize, name: String, cx: &mut Context<Self>) -> ListItem {
        let is_selected = self.selected_table == name;

        let text_color = if is_selected {
            cx.theme().accent_foreground
        } else {
            cx.theme().foreground
        };
        let bg_color = if is_selected {
            cx.theme().list_active
        } else if ix % 2 == 0 {
            cx.theme().list
        } else {
            cx.theme().list_even
        };

        ListItem::new(ix)
            .w_full()
            .py_2()
            .px_3()
            .bg(bg_color)
            .border_1()
            .border_color(if is_selected {
                cx.theme().list_active_border
            } else {
                bg_color
            })
            .rounded(cx.theme().radius)
            .child(
                Label::new(name.clone())
                    .text_sm()
                    .text_color(text_color)
                    .whitespace_nowrap(),
            )
            .on_click(cx.listener(move |_this, _, _window, cx| {
                load_table(name.clone(), cx);
            }))
    }
}

impl Render for TablesPanel {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let refresh_button = Button::new("refresh-tables")
            .icon(Icon::empty().path("icons/rotate-ccw.svg"))
            .small()
            .ghost()
            .tooltip("Refresh Tables")
            .on_click(cx.listener(Self::refresh_tables));

        let header = h_flex()
            .justify_between()
            .items_center()
            .child(Label::new("Tables").font_bold().text_base())
            .child(refresh_button);

        let items: Vec<ListItem> = self
            .tables
            .clone()
            .into_iter()
            .enumerate()
            .map(|(ix, name)| self.render_table_item(ix, name, cx))
            .collect();

        v_flex().flex_1().gap_2().p_2().child(header).child(
            v_flex()
                .id("tables-list")
                .flex_1()
                .gap_1()
                .p_2()
                .border_1()
                .border_color(cx.theme().border)
                .rounded(cx.theme().radius)
                .overflow_y_scroll()
                .when(self.tables.is_empty(), |d| {
                    d.child(
                        Label::new("No tables in this database.")
                            .text_sm()
                            .text_color(cx.theme().muted_foreground),
                    )
                })
                .children(items),
        )
    }
}
