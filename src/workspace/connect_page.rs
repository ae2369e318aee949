use gpui::*;
use gpui_component::StyledExt as _;
use gpui_component::{
    ActiveTheme as _, Disableable as _, Sizable as _,
    button::{Button, ButtonVariants as _},
    form::{field, v_form},
    input::{Input, InputEvent, InputState},
    label::Label,
    v_flex,
};

use crate::services::ConnectionParams;
use crate::state::{ConnectionState, ConnectionStatus, StatusMessage, StatusState, connect};

pub struct ConnectPage {
    host: Entity<InputState>,
    port: Entity<InputState>,
    user: Entity<InputState>,
    password: Entity<InputState>,
    database: Entity<InputState>,
    connecting: bool,
    _subscriptions: Vec<Subscription>,
}

impl ConnectPage {
    pub fn view(window: &mut Window, cx: &mut App) -> Entity<Self> {
        cx.new(|cx| Self::new(window, cx))
    }

    fn new(window: &mut Window, cx: &mut Context<Self>) -> Self {
        let host = cx.new(|cx| {
            InputState::new(window, cx)
                .default_value("localhost")
                .placeholder("Host")
        });
        let port = cx.new(|cx| {
            InputState::new(window, cx)
                .default_value("3306")
                .placeholder("Default: 3306")
        });
        let user = cx.new(|cx| {
            InputState::new(window, cx)
                .default_value("root")
                .placeholder("User")
        });
        let password = cx.new(|cx| {
            InputState::new(window, cx)
                .masked(true)
                .placeholder("Password")
        });
        let database = cx.new(|cx| InputState::new(window, cx).placeholder("Database"));

        let mut _subscriptions = vec![cx.observe_global::<ConnectionState>(|this, cx| {
            this.connecting =
                cx.global::<ConnectionState>().status == ConnectionStatus::Connecting;
            cx.notify();
        })];
        _subscriptions.push(cx.subscribe_in(
            &database,
            window,
            |this, _, event: &InputEvent, window, cx| {
                if let InputEvent::PressEnter { .. } = event {
                    this.connect(window, cx);
                }
            },
        ));

        Self {
            host,
            port,
            user,
            password,
            database,
            connecting: false,
            _subscriptions,
        }
    }

    fn connect(&mut self, _window: &mut Window, cx: &mut Context<Self>) {
        if let Some(params) = self.read_params(cx) {
            connect(params, cx);
        }
    }

    /// Read and validate the form. Host, user and database are required;
    /// an empty port is omitted so the backend picks its default.
    fn read_params(&self, cx: &mut Context<Self>) -> Option<ConnectionParams> {
        let host = self.host.read(cx).value().trim().to_string();
        let port_text = self.port.read(cx).value().trim().to_string();
        let user = self.user.read(cx).value().trim().to_string();
        let password = self.password.read(cx).value().to_string();
        let database = self.database.read(cx).value().trim().to_string();

        if host.is_empty() || user.is_empty() || database.is_empty() {
            cx.update_global::<StatusState, _>(|status, _cx| {
                status.message = Some(StatusMessage::error(
                    "Host, user and database are required.",
                ));
            });
            return None;
        }

        let port = if port_text.is_empty() {
            None
        } else {
            match port_text.parse::<u16>() {
                Ok(port) if port >= 1 => Some(port),
                _ => {
                    cx.update_global::<StatusState, _>(|status, _cx| {
                        status.message = Some(StatusMessage::error(
                            "Port must be a number between 1 and 65535.",
                        ));
                    });
                    return None;
                }
            }
        };

        Some(ConnectionParams {
            host,
            port,
            user,
            password,
            database,
        })
    }
}

impl Render for ConnectPage {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let connect_button = Button::new("connect")
            .primary()
            .w_full()
            .label(if self.connecting {
                "Connecting..."
            } else {
                "Connect"
            })
            .disabled(self.connecting)
            .on_click(cx.listener(|this, _, win, cx| this.connect(win, cx)));

        v_flex()
            .size_full()
            .items_center()
            .justify_center()
            .child(
                v_flex()
                    .w(px(440.))
                    .gap_4()
                    .p_8()
                    .bg(cx.theme().background)
                    .border_1()
                    .border_color(cx.theme().border)
                    .rounded(cx.theme().radius)
                    .shadow_lg()
                    .child(Label::new("Connect to Database").text_2xl().font_bold())
                    .child(
                        v_form()
                            .small()
                            .child(
                                field()
                                    .label("Host")
                                    .required(true)
                                    .child(Input::new(&self.host)),
                            )
                            .child(field().label("Port").child(Input::new(&self.port)))
                            .child(
                                field()
                                    .label("User")
                                    .required(true)
                                    .child(Input::new(&self.user)),
                            )
                            .child(field().label("Password").child(Input::new(&self.password)))
                            .child(
                                field()
                                    .label("Database")
                                    .required(true)
                                    .child(Input::new(&self.database)),
                            )
                            .child(field().label_indent(false).child(connect_button)),
                    ),
            )
            .text_sm()
    }
}
