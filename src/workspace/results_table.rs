use gpui::*;
use gpui_component::{
    ActiveTheme as _, h_flex,
    label::Label,
    table::{Column, Table, TableDelegate, TableState},
    v_flex,
};
use serde_json::Value;

use crate::services::{Row, display_value};
use crate::state::{QueryState, SqlOutput};

/// Plain read-only grid over whatever rows `/execute` returned. Columns
/// are rebuilt from the first row of each new result.
struct RowsTableDelegate {
    columns: Vec<Column>,
    rows: Vec<Row>,
}

impl RowsTableDelegate {
    fn new() -> Self {
        Self {
            columns: vec![],
            rows: vec![],
        }
    }

    fn update(&mut self, rows: Vec<Row>) {
        self.columns = rows
            .first()
            .map(|row| {
                row.keys()
                    .map(|name| Column::new(name.clone(), name.clone()))
                    .collect()
            })
            .unwrap_or_default();
        self.rows = rows;
    }
}

impl TableDelegate for RowsTableDelegate {
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
        let key = match self.columns.get(col_ix) {
            Some(col) => col.name.to_string(),
            None => return "--".into_any_element(),
        };
        match self.rows.get(row_ix).and_then(|row| row.get(&key)) {
            Some(Value::Null) => Label::new("NULL")
                .text_color(cx.theme().muted_foreground)
                .italic()
                .into_any_element(),
            Some(value) => Label::new(display_value(value)).into_any_element(),
            None => "--".into_any_element(),
        }
    }
}

pub struct ResultsPanel {
    output: Option<SqlOutput>,
    table: Entity<TableState<RowsTableDelegate>>,
    _subscriptions: Vec<Subscription>,
}

impl ResultsPanel {
    pub fn new(window: &mut Window, cx: &mut Context<Self>) -> Self {
        let table = cx.new(|cx| TableState::new(RowsTableDelegate::new(), window, cx).sortable(false));

        let _subscriptions = vec![cx.observe_global::<QueryState>(|this, cx| {
            let output = cx.global::<QueryState>().output.clone();
            if let Some(SqlOutput::Rows(rows)) = &output {
                let rows = rows.clone();
                this.table.update(cx, |table, cx| {
                    table.delegate_mut().update(rows);
                    table.refresh(cx);
                });
            }
            this.output = output;
            cx.notify();
        })];

        Self {
            output: None,
            table,
            _subscriptions,
        }
    }

    pub fn view(window: &mut Window, cx: &mut App) -> Entity<Self> {
        cx.new(|cx| Self::new(window, cx))
    }
}

impl Render for ResultsPanel {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        match &self.output {
            Some(SqlOutput::Rows(rows)) if !rows.is_empty() => v_flex()
                .size_full()
                .p_2()
                .child(Table::new(&self.table.clone()).stripe(true)),
            Some(SqlOutput::Rows(_)) => h_flex().size_full().items_center().justify_center().child(
                Label::new("Query returned no rows.")
                    .text_sm()
                    .text_color(cx.theme().muted_foreground),
            ),
            Some(SqlOutput::Message(text)) if text.starts_with("Error:") => {
                v_flex().size_full().p_4().child(
                    div()
                        .p_4()
                        .bg(cx.theme().danger)
                        .border_1()
                        .border_color(cx.theme().danger)
                        .rounded(cx.theme().radius)
                        .child(
                            Label::new(text.clone())
                                .text_sm()
                                .text_color(cx.theme().danger_foreground),
                        ),
                )
            }
            Some(SqlOutput::Message(text)) => v_flex().size_full().p_4().child(
                div()
                    .p_4()
                    .border_1()
                    .border_color(cx.theme().border)
                    .rounded(cx.theme().radius)
                    .child(Label::new(text.clone()).text_sm()),
            ),
            None => h_flex().size_full().items_center().justify_center().child(
                Label::new("Execute a query to see results here")
                    .text_sm()
                    .text_color(cx.theme().muted_foreground),
            ),
        }
    }
}
