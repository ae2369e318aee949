use gpui::prelude::FluentBuilder as _;
use gpui::*;
use gpui_component::StyledExt as _;
use gpui_component::{
    ActiveTheme as _, Sizable as _,
    button::{Button, ButtonVariants as _},
    h_flex,
    label::Label,
    resizable::{resizable_panel, v_resizable},
    spinner::Spinner,
    v_flex,
};

use super::connect_page::ConnectPage;
use super::grid_panel::GridPanel;
use super::header_bar::HeaderBar;
use super::record_form::RecordForm;
use super::results_table::ResultsPanel;
use super::sql_panel::SqlPanel;
use super::tables_panel::TablesPanel;

use crate::services::{Row, display_value};
use crate::state::{
    ConnectionState, ConnectionStatus, MessageKind, RecordFormState, StatusMessage, StatusState,
    TableViewState, cancel_delete, clear_message, confirm_delete, key_value,
};

pub struct Workspace {
    connection_status: ConnectionStatus,
    header_bar: Entity<HeaderBar>,
    connect_page: Entity<ConnectPage>,
    tables_panel: Entity<TablesPanel>,
    grid_panel: Entity<GridPanel>,
    sql_panel: Entity<SqlPanel>,
    results_panel: Entity<ResultsPanel>,
    record_form: Entity<RecordForm>,
    _subscriptions: Vec<Subscription>,
}

impl Workspace {
    pub fn new(window: &mut Window, cx: &mut Context<Self>) -> Self {
        let header_bar = HeaderBar::view(window, cx);
        let connect_page = ConnectPage::view(window, cx);
        let tables_panel = TablesPanel::view(window, cx);
        let grid_panel = GridPanel::view(window, cx);
        let sql_panel = SqlPanel::view(window, cx);
        let results_panel = ResultsPanel::view(window, cx);
        let record_form = RecordForm::view(window, cx);

        let _subscriptions = vec![
            cx.observe_global::<ConnectionState>(|this, cx| {
                this.connection_status = cx.global::<ConnectionState>().status;
                cx.notify();
            }),
            cx.observe_global::<StatusState>(|_this, cx| cx.notify()),
            cx.observe_global::<RecordFormState>(|_this, cx| cx.notify()),
            cx.observe_global::<TableViewState>(|_this, cx| cx.notify()),
        ];

        Self {
            connection_status: ConnectionStatus::Disconnected,
            header_bar,
            connect_page,
            tables_panel,
            grid_panel,
            sql_panel,
            results_panel,
            record_form,
            _subscriptions,
        }
    }

    pub fn view(window: &mut Window, cx: &mut App) -> Entity<Self> {
        cx.new(|cx| Self::new(window, cx))
    }

    fn render_disconnected(&mut self, cx: &mut Context<Self>) -> Stateful<Div> {
        div()
            .id("connect-page")
            .flex()
            .flex_1()
            .bg(cx.theme().background)
            .child(self.connect_page.clone())
    }

    fn render_connected(&mut self, cx: &mut Context<Self>) -> Stateful<Div> {
        let sidebar = div()
            .id("tables-sidebar")
            .flex()
            .flex_col()
            .h_full()
            .border_color(cx.theme().border)
            .border_r_1()
            .min_w(px(260.0))
            .child(self.tables_panel.clone());

        let main = div()
            .id("dashboard-main")
            .flex()
            .flex_col()
            .flex_1()
            .h_full()
            .w_full()
            .overflow_hidden()
            .child(
                v_resizable("resizable-dashboard")
                    .child(
                        resizable_panel()
                            .size(px(380.))
                            .size_range(px(200.)..px(800.))
                            .child(self.grid_panel.clone()),
                    )
                    .child(
                        resizable_panel()
                            .size(px(220.))
                            .child(self.sql_panel.clone()),
                    )
                    .child(
                        resizable_panel()
                            .size(px(200.))
                            .child(self.results_panel.clone()),
                    ),
            );

        div()
            .id("connected-content")
            .flex()
            .flex_row()
            .flex_1()
            .h_full()
            .bg(cx.theme().background)
            .child(sidebar)
            .child(main)
    }

    fn render_loading(&mut self, cx: &mut Context<Self>) -> Stateful<Div> {
        div()
            .id("loading-content")
            .flex()
            .flex_grow()
            .bg(cx.theme().background)
            .justify_center()
            .items_center()
            .child(
                div()
                    .flex()
                    .flex_col()
                    .items_center()
                    .child(Spinner::new())
                    .child("Connecting"),
            )
    }

    fn render_banner(&self, message: StatusMessage, cx: &Context<Self>) -> impl IntoElement {
        let (bg, fg) = match message.kind {
            MessageKind::Success => (cx.theme().primary, cx.theme().primary_foreground),
            MessageKind::Error => (cx.theme().danger, cx.theme().danger_foreground),
            MessageKind::Info => (cx.theme().secondary, cx.theme().secondary_foreground),
        };

        deferred(
            div()
                .absolute()
                .top(px(44.))
                .left_0()
                .right_0()
                .flex()
                .justify_center()
                .child(
                    h_flex()
                        .gap_3()
                        .items_center()
                        .px_4()
                        .py_2()
                        .max_w(px(560.))
                        .bg(bg)
                        .rounded(cx.theme().radius)
                        .shadow_lg()
                        .occlude()
                        .child(Label::new(message.text).text_sm().text_color(fg))
                        .child(
                            Button::new("dismiss-message")
                                .label("✕")
                                .small()
                                .ghost()
                                .on_click(|_, _, cx| clear_message(cx)),
                        ),
                ),
        )
        .with_priority(2)
    }

    fn render_delete_confirm(&self, row: Row, cx: &Context<Self>) -> impl IntoElement {
        let primary_key = cx.global::<TableViewState>().primary_key_column.clone();
        let id_text = key_value(&row, &primary_key)
            .map(display_value)
            .unwrap_or_else(|| "N/A".to_string());

        let panel = v_flex()
            .w(px(440.))
            .gap_4()
            .p_6()
            .bg(cx.theme().background)
            .border_1()
            .border_color(cx.theme().border)
            .rounded(cx.theme().radius)
            .shadow_lg()
            .on_mouse_down(MouseButton::Left, |_, _, cx| {
                cx.stop_propagation();
            })
            .child(Label::new("Delete Record").text_lg().font_bold())
            .child(
                Label::new(format!(
                    "Are you sure you want to delete this record? (ID: {})",
                    id_text
                ))
                .text_sm(),
            )
            .child(
                h_flex()
                    .justify_end()
                    .gap_2()
                    .child(
                        Button::new("cancel-delete")
                            .label("Cancel")
                            .on_click(|_, _, cx| cancel_delete(cx)),
                    )
                    .child(
                        Button::new("confirm-delete")
                            .danger()
                            .label("Delete")
                            .on_click(|_, _, cx| confirm_delete(cx)),
                    ),
            );

        deferred(
            div()
                .id("delete-confirm-overlay")
                .absolute()
                .top_0()
                .left_0()
                .size_full()
                .bg(gpui::black().opacity(0.4))
                .flex()
                .items_center()
                .justify_center()
                .occlude()
                .on_mouse_down(MouseButton::Left, |_, _, cx| cancel_delete(cx))
                .child(panel),
        )
        .with_priority(2)
    }

    fn render_loader(&self, cx: &Context<Self>) -> impl IntoElement {
        deferred(
            div()
                .id("busy-overlay")
                .absolute()
                .top_0()
                .left_0()
                .size_full()
                .bg(gpui::black().opacity(0.3))
                .flex()
                .items_center()
                .justify_center()
                .occlude()
                .child(
                    v_flex()
                        .items_center()
                        .gap_2()
                        .child(Spinner::new())
                        .child(Label::new("Loading").text_sm()),
                ),
        )
        .with_priority(3)
    }
}

impl Render for Workspace {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let content = match self.connection_status {
            ConnectionStatus::Disconnected => self.render_disconnected(cx),
            ConnectionStatus::Connecting => self.render_loading(cx),
            ConnectionStatus::Connected => self.render_connected(cx),
        };

        let busy = cx.global::<StatusState>().busy;
        let message = cx.global::<StatusState>().message.clone();
        let pending_delete = cx.global::<RecordFormState>().pending_delete.clone();

        div()
            .flex()
            .flex_col()
            .size_full()
            .child(self.header_bar.clone())
            .child(content)
            .child(self.record_form.clone())
            .when_some(pending_delete, |d, row| {
                d.child(self.render_delete_confirm(row, cx))
            })
            .when_some(message, |d, message| d.child(self.render_banner(message, cx)))
            .when(busy, |d| d.child(self.render_loader(cx)))
    }
}
