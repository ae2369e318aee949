use gpui::prelude::FluentBuilder as _;
use gpui::*;
use gpui_component::{
    ActiveTheme as _, Icon, IconName, Sizable as _, Theme, ThemeMode, TitleBar,
    button::{Button, ButtonVariants as _},
    h_flex,
    label::Label,
};

use crate::state::{ConnectionState, ConnectionStatus, disconnect};

pub struct HeaderBar {
    _subscriptions: Vec<Subscription>,
}

impl HeaderBar {
    pub fn new(_window: &mut Window, cx: &mut Context<Self>) -> Self {
        let _subscriptions = vec![cx.observe_global::<ConnectionState>(|_this, cx| {
            cx.notify();
        })];

        Self { _subscriptions }
    }

    pub fn view(window: &mut Window, cx: &mut App) -> Entity<Self> {
        cx.new(|cx| Self::new(window, cx))
    }

    pub fn change_mode(&mut self, _: &ClickEvent, _window: &mut Window, cx: &mut Context<Self>) {
        let mode = match cx.theme().mode.is_dark() {
            true => ThemeMode::Light,
            false => ThemeMode::Dark,
        };
        Theme::change(mode, None, cx);
        cx.notify();
    }
}

impl Render for HeaderBar {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let (connected, connection_label) = {
            let state = cx.global::<ConnectionState>();
            (
                state.status == ConnectionStatus::Connected,
                state
                    .active_connection
                    .as_ref()
                    .map(|params| format!("Connected to: {}", params.display_label())),
            )
        };

        let theme_toggle = Button::new("theme-mode")
            .map(|this| {
                if cx.theme().mode.is_dark() {
                    this.icon(IconName::Sun)
                } else {
                    this.icon(IconName::Moon)
                }
            })
            .small()
            .ghost()
            .on_click(cx.listener(Self::change_mode));

        let disconnect_button = Button::new("disconnect")
            .icon(Icon::empty().path("icons/power.svg"))
            .small()
            .danger()
            .ghost()
            .tooltip("Disconnect")
            .on_click(|_, _, cx| disconnect(cx));

        TitleBar::new().child(
            h_flex()
                .w_full()
                .pr_2()
                .justify_between()
                .child(Label::new("MYGUI").text_xs())
                .child(
                    div()
                        .pr(px(5.0))
                        .flex()
                        .items_center()
                        .gap_2()
                        .when_some(connection_label, |d, label| {
                            d.child(
                                Label::new(label)
                                    .text_xs()
                                    .text_color(cx.theme().muted_foreground),
                            )
                        })
                        .child(theme_toggle)
                        .when(connected, |d| d.child(disconnect_button)),
                ),
        )
    }
}
