use gpui::prelude::FluentBuilder as _;
use gpui::*;
use gpui_component::StyledExt as _;
use gpui_component::{
    ActiveTheme as _, Disableable as _, Icon, IconName, Sizable as _,
    button::{Button, ButtonVariants as _},
    h_flex,
    input::{Input, InputEvent, InputState},
    label::Label,
    table::{Column, Table, TableDelegate, TableState},
    v_flex,
};
use serde_json::Value;

use crate::services::{Row, display_value};
use crate::state::{
    TableViewState, key_value, open_add_form, open_edit_form, request_delete, search_table,
};

/// Grid over the loaded table. The last column is synthetic: per-row edit
/// and delete controls, enabled only while the row has a usable value in
/// the declared primary-key column.
struct RecordsTableDelegate {
    columns: Vec<Column>,
    data_columns: Vec<String>,
    rows: Vec<Row>,
    primary_key: String,
}

impl RecordsTableDelegate {
    fn new() -> Self {
        Self {
            columns: vec![],
            data_columns: vec![],
            rows: vec![],
            primary_key: String::new(),
        }
    }

    fn update(&mut self, columns: Vec<String>, rows: Vec<Row>, primary_key: String) {
        self.columns = columns
            .iter()
            .map(|name| Column::new(name.clone(), name.clone()))
            .chain(std::iter::once(Column::new("actions", "Actions")))
            .collect();
        self.data_columns = columns;
        self.rows = rows;
        self.primary_key = primary_key;
    }

    fn render_actions(&self, row_ix: usize) -> AnyElement {
        let Some(row) = self.rows.get(row_ix) else {
            return "--".into_any_element();
        };
        let enabled = key_value(row, &self.primary_key).is_some();
        let edit_row = row.clone();
        let delete_row = row.clone();

        h_flex()
            .gap_1()
            .child(
                Button::new(("edit-row", row_ix))
                    .icon(Icon::empty().path("icons/square-pen.svg"))
                    .small()
                    .ghost()
                    .disabled(!enabled)
                    .tooltip("Edit Record")
                    .on_click(move |_, _, cx| open_edit_form(edit_row.clone(), cx)),
            )
            .child(
                Button::new(("delete-row", row_ix))
                    .icon(Icon::empty().path("icons/trash-2.svg"))
                    .small()
                    .ghost()
                    .danger()
                    .disabled(!enabled)
                    .tooltip("Delete Record")
                    .on_click(move |_, _, cx| request_delete(delete_row.clone(), cx)),
            )
            .into_any_element()
    }
}

impl TableDelegate for RecordsTableDelegate {
    fn columns_count(&self, _: &App) -> usize {
        self.columns.len()
    }

    fn rows_count(&self, _: &App) -> usize {
        self.rows.len()
    }

    fn column(&self, col_ix: usize, _: &App) -> &Column {
        self.columns.get(col_ix).unwrap()
    }

    fn render_th(
        &mut self,
        col_ix: usize,
        _: &mut Window,
        cx: &mut Context<TableState<Self>>,
    ) -> impl IntoElement {
        let col = self.column(col_ix, cx);
        div().child(format!("{}", col.clone().name))
    }

    fn render_tr(
        &mut self,
        row_ix: usize,
        _: &mut Window,
        _cx: &mut Context<TableState<Self>>,
    ) -> Stateful<Div> {
        div().id(row_ix)
    }

    fn render_td(
        &mut self,
        row_ix: usize,
        col_ix: usize,
        _: &mut Window,
        cx: &mut Context<TableState<Self>>,
    ) -> impl IntoElement {
        if col_ix >= self.data_columns.len() {
            return self.render_actions(row_ix);
        }
        let key = &self.data_columns[col_ix];
        match self.rows.get(row_ix).and_then(|row| row.get(key)) {
            Some(Value::Null) => Label::new("NULL")
                .text_color(cx.theme().muted_foreground)
                .italic()
                .into_any_element(),
            Some(value) => Label::new(display_value(value)).into_any_element(),
            None => "--".into_any_element(),
        }
    }
}

pub struct GridPanel {
    selected_table: String,
    primary_key: String,
    has_rows: bool,
    has_columns: bool,
    primary_key_input: Entity<InputState>,
    search_input: Entity<InputState>,
    table: Entity<TableState<RecordsTableDelegate>>,
    _subscriptions: Vec<Subscription>,
}

impl GridPanel {
    pub fn view(window: &mut Window, cx: &mut App) -> Entity<Self> {
        cx.new(|cx| Self::new(window, cx))
    }

    fn new(window: &mut Window, cx: &mut Context<Self>) -> Self {
        let primary_key_input = cx.new(|cx| {
            InputState::new(window, cx).placeholder("e.g., id, user_id (case sensitive)")
        });
        let search_input =
            cx.new(|cx| InputState::new(window, cx).placeholder("Search in table..."));
        let table =
            cx.new(|cx| TableState::new(RecordsTableDelegate::new(), window, cx).sortable(false));

        let mut _subscriptions = vec![cx.observe_global_in::<TableViewState>(
            window,
            |this, window, cx| {
                let (selected_table, columns, rows, primary_key) = {
                    let state = cx.global::<TableViewState>();
                    (
                        state.selected_table.clone(),
                        state.columns.clone(),
                        state.rows.clone(),
                        state.primary_key_column.clone(),
                    )
                };

                this.selected_table = selected_table;
                this.primary_key = primary_key.clone();
                this.has_rows = !rows.is_empty();
                this.has_columns = !columns.is_empty();

                this.table.update(cx, |table, cx| {
                    table
                        .delegate_mut()
                        .update(columns, rows, primary_key.clone());
                    table.refresh(cx);
                });

                // Two-way bind with the input; the equality guard breaks
                // the change/observe feedback cycle.
                if this.primary_key_input.read(cx).value().to_string() != primary_key {
                    this.primary_key_input.update(cx, |input, cx| {
                        input.set_value(primary_key, window, cx);
                    });
                }
                cx.notify();
            },
        )];

        _subscriptions.push(cx.subscribe_in(
            &primary_key_input,
            window,
            |this, _, event: &InputEvent, _window, cx| {
                if matches!(event, InputEvent::Change) {
                    let value = this.primary_key_input.read(cx).value().trim().to_string();
                    if cx.global::<TableViewState>().primary_key_column != value {
                        cx.update_global::<TableViewState, _>(|state, _cx| {
                            state.primary_key_column = value;
                        });
                    }
                }
            },
        ));

        _subscriptions.push(cx.subscribe_in(
            &search_input,
            window,
            |this, _, event: &InputEvent, _window, cx| {
                if let InputEvent::PressEnter { .. } = event {
                    this.search(cx);
                }
            },
        ));

        Self {
            selected_table: String::new(),
            primary_key: String::new(),
            has_rows: false,
            has_columns: false,
            primary_key_input,
            search_input,
            table,
            _subscriptions,
        }
    }

    fn search(&mut self, cx: &mut Context<Self>) {
        let search_text = self.search_input.read(cx).value().trim().to_string();
        search_table(search_text, cx);
    }
}

impl Render for GridPanel {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        if self.selected_table.is_empty() {
            return v_flex().size_full().items_center().justify_center().child(
                Label::new("Select a table from the sidebar.")
                    .text_sm()
                    .text_color(cx.theme().muted_foreground),
            );
        }

        let search_button = Button::new("search-table")
            .icon(Icon::empty().path("icons/search.svg"))
            .small()
            .ghost()
            .tooltip("Search")
            .on_click(cx.listener(|this, _, _, cx| this.search(cx)));

        let add_button = Button::new("add-record")
            .icon(IconName::Plus)
            .label("Add Record")
            .small()
            .primary()
            .on_click(|_, _, cx| open_add_form(cx));

        let toolbar = h_flex()
            .justify_between()
            .items_center()
            .child(
                h_flex()
                    .gap_1()
                    .items_center()
                    .child(Label::new("Data for:").font_bold().text_base())
                    .child(
                        Label::new(self.selected_table.clone())
                            .text_base()
                            .text_color(cx.theme().primary),
                    ),
            )
            .child(
                h_flex()
                    .gap_2()
                    .items_center()
                    .child(Input::new(&self.search_input).w(px(220.)))
                    .child(search_button)
                    .child(add_button),
            );

        let key_row = h_flex()
            .gap_2()
            .items_center()
            .child(Label::new("Primary Key Column for Edit/Delete:").text_sm())
            .child(Input::new(&self.primary_key_input).w(px(260.)))
            .when(self.primary_key.is_empty() && self.has_rows, |d| {
                d.child(
                    Label::new("Specify PK to enable Edit/Delete.")
                        .text_xs()
                        .text_color(cx.theme().muted_foreground),
                )
            });

        let content = if !self.has_columns {
            v_flex().flex_1().items_center().justify_center().child(
                Label::new("No table selected or table is empty.")
                    .text_sm()
                    .text_color(cx.theme().muted_foreground),
            )
        } else if !self.has_rows {
            v_flex().flex_1().child(
                div()
                    .p_3()
                    .border_1()
                    .border_color(cx.theme().border)
                    .rounded(cx.theme().radius)
                    .child(Label::new("Table is empty. You can add records.").text_sm()),
            )
        } else {
            v_flex()
                .flex_1()
                .child(Table::new(&self.table.clone()).stripe(true))
        };

        v_flex()
            .size_full()
            .gap_2()
            .p_2()
            .child(toolbar)
            .child(key_row)
            .child(content)
    }
}
