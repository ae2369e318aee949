use gpui::*;
use gpui_component::StyledExt as _;
use gpui_component::{
    ActiveTheme as _, Disableable as _, Icon, Sizable as _,
    button::{Button, ButtonVariants as _},
    h_flex,
    input::{Input, InputState, TabSize},
    label::Label,
    v_flex,
};
use sqlformat::{FormatOptions, QueryParams, format};

use crate::state::{StatusState, run_query};

pub struct SqlPanel {
    input_state: Entity<InputState>,
    is_executing: bool,
    _subscriptions: Vec<Subscription>,
}

impl SqlPanel {
    pub fn view(window: &mut Window, cx: &mut App) -> Entity<Self> {
        cx.new(|cx| Self::new(window, cx))
    }

    fn new(window: &mut Window, cx: &mut Context<Self>) -> Self {
        let input_state = cx.new(|cx| {
            InputState::new(window, cx)
                .code_editor("sql")
                .line_number(true)
                .indent_guides(false)
                .tab_size(TabSize {
                    tab_size: 2,
                    hard_tabs: false,
                })
                .placeholder("Enter your SQL query here (e.g., SELECT * FROM your_table WHERE id = 1)")
        });

        // The busy flag doubles as "executing": one request at a time.
        let _subscriptions = vec![cx.observe_global::<StatusState>(|this, cx| {
            this.is_executing = cx.global::<StatusState>().busy;
            cx.notify();
        })];

        Self {
            input_state,
            is_executing: false,
            _subscriptions,
        }
    }

    pub fn execute_query(&mut self, _: &ClickEvent, _window: &mut Window, cx: &mut Context<Self>) {
        let query = self.input_state.read(cx).value().to_string();
        run_query(query, cx);
    }

    pub fn format_query(&mut self, _: &ClickEvent, window: &mut Window, cx: &mut Context<Self>) {
        let sql = self.input_state.read(cx).value().clone();
        let query = sql.trim();
        let formatted = format(query, &QueryParams::None, &FormatOptions::default());
        self.input_state.update(cx, |input_state, cx| {
            input_state.set_value(formatted, window, cx);
            cx.notify();
        })
    }
}

impl Render for SqlPanel {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let execute_button = Button::new("execute-query")
            .tooltip(if self.is_executing {
                "Executing..."
            } else {
                "Execute Query"
            })
            .icon(Icon::empty().path("icons/play.svg"))
            .small()
            .primary()
            .ghost()
            .disabled(self.is_executing)
            .on_click(cx.listener(Self::execute_query));

        let format_button = Button::new("format-query")
            .tooltip("Format")
            .icon(Icon::empty().path("icons/align-start-vertical.svg"))
            .small()
            .primary()
            .ghost()
            .on_click(cx.listener(Self::format_query));

        let toolbar = h_flex()
            .id("sql-toolbar")
            .justify_between()
            .items_center()
            .p_2()
            .child(Label::new("Custom SQL Query").font_bold().text_base())
            .child(
                h_flex()
                    .gap_1()
                    .items_center()
                    .child(format_button)
                    .child(execute_button),
            );

        v_flex().size_full().child(toolbar).child(
            div()
                .id("sql-editor-content")
                .bg(cx.theme().background)
                .w_full()
                .flex_1()
                .px_2()
                .pb_2()
                .font_family("Monaco")
                .text_size(px(12.))
                .child(Input::new(&self.input_state).h_full()),
        )
    }
}
