use gpui::*;
use gpui_component::StyledExt as _;
use gpui_component::{
    ActiveTheme as _, Sizable as _,
    button::{Button, ButtonVariants as _},
    form::{field, v_form},
    h_flex,
    input::{Input, InputState},
    label::Label,
    v_flex,
};

use crate::services::display_value;
use crate::state::{RecordFormState, TableViewState, close_form, key_value, save_record};

/// The add/edit overlay. Inputs are materialized from the form snapshot in
/// `RecordFormState` when it opens (the epoch guard keeps re-notifies from
/// wiping user edits) and read back wholesale on save.
pub struct RecordForm {
    open: bool,
    is_edit: bool,
    /// Display form of the edited row's key value, for the title.
    edit_key: Option<String>,
    fields: Vec<(SharedString, Entity<InputState>)>,
    epoch: usize,
    _subscriptions: Vec<Subscription>,
}

impl RecordForm {
    pub fn view(window: &mut Window, cx: &mut App) -> Entity<Self> {
        cx.new(|cx| Self::new(window, cx))
    }

    fn new(window: &mut Window, cx: &mut Context<Self>) -> Self {
        let _subscriptions = vec![cx.observe_global_in::<RecordFormState>(
            window,
            |this, window, cx| {
                let request = cx.global::<RecordFormState>().request.clone();
                match request {
                    Some(request) => {
                        if this.epoch != request.epoch {
                            let primary_key =
                                cx.global::<TableViewState>().primary_key_column.clone();
                            this.epoch = request.epoch;
                            this.open = true;
                            this.is_edit = request.target.is_some();
                            this.edit_key = request.target.as_ref().map(|target| {
                                key_value(target, &primary_key)
                                    .map(display_value)
                                    .unwrap_or_else(|| "N/A".to_string())
                            });
                            this.fields = request
                                .fields
                                .iter()
                                .map(|(col, initial)| {
                                    let initial = initial.clone();
                                    let placeholder = col.clone();
                                    let input = cx.new(|cx| {
                                        let mut state =
                                            InputState::new(window, cx).placeholder(placeholder);
                                        state.set_value(initial, window, cx);
                                        state
                                    });
                                    (SharedString::from(col.clone()), input)
                                })
                                .collect();
                        }
                    }
                    None => {
                        this.open = false;
                        this.fields.clear();
                    }
                }
                cx.notify();
            },
        )];

        Self {
            open: false,
            is_edit: false,
            edit_key: None,
            fields: vec![],
            epoch: 0,
            _subscriptions,
        }
    }

    fn save(&mut self, _window: &mut Window, cx: &mut Context<Self>) {
        let values: Vec<(String, String)> = self
            .fields
            .iter()
            .map(|(col, input)| (col.to_string(), input.read(cx).value().to_string()))
            .collect();
        save_record(values, cx);
    }

    fn cancel(&mut self, _window: &mut Window, cx: &mut Context<Self>) {
        close_form(cx);
    }
}

impl Render for RecordForm {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        if !self.open {
            return div();
        }

        let title = if self.is_edit {
            format!(
                "Edit Record (ID: {})",
                self.edit_key.clone().unwrap_or_else(|| "N/A".to_string())
            )
        } else {
            "Add New Record".to_string()
        };

        let form = v_form().small().children(
            self.fields
                .iter()
                .map(|(col, input)| field().label(col.clone()).child(Input::new(input))),
        );

        let footer = h_flex()
            .justify_end()
            .gap_2()
            .child(
                Button::new("cancel-record")
                    .label("Cancel")
                    .on_click(cx.listener(|this, _, win, cx| this.cancel(win, cx))),
            )
            .child(
                Button::new("save-record")
                    .primary()
                    .label("Save Record")
                    .on_click(cx.listener(|this, _, win, cx| this.save(win, cx))),
            );

        let panel = v_flex()
            .w(px(520.))
            .max_h(px(640.))
            .gap_3()
            .p_6()
            .bg(cx.theme().background)
            .border_1()
            .border_color(cx.theme().border)
            .rounded(cx.theme().radius)
            .shadow_lg()
            .on_mouse_down(MouseButton::Left, |_, _, cx| {
                cx.stop_propagation();
            })
            .child(
                h_flex()
                    .justify_between()
                    .items_center()
                    .child(Label::new(title).text_lg().font_bold())
                    .child(
                        Button::new("close-record-form")
                            .label("✕")
                            .small()
                            .ghost()
                            .on_click(cx.listener(|this, _, win, cx| this.cancel(win, cx))),
                    ),
            )
            .child(
                div()
                    .id("record-form-fields")
                    .flex_1()
                    .overflow_y_scroll()
                    .child(form),
            )
            .child(footer);

        div().child(
            deferred(
                div()
                    .id("record-form-overlay")
                    .absolute()
                    .top_0()
                    .left_0()
                    .size_full()
                    .bg(gpui::black().opacity(0.4))
                    .flex()
                    .items_center()
                    .justify_center()
                    .occlude()
                    .on_mouse_down(
                        MouseButton::Left,
                        cx.listener(|this, _, win, cx| this.cancel(win, cx)),
                    )
                    .child(panel),
            )
            .with_priority(1),
        )
    }
}
