#![recursion_limit = "256"]

mod assets;
mod services;
mod state;
mod window;
mod workspace;

use assets::Assets;
use window::get_window_options;

use gpui::*;
use gpui_component::{Root, theme};
use workspace::Workspace;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let application = Application::new().with_assets(Assets);

    application.run(|cx: &mut App| {
        let window_options = get_window_options(cx);
        cx.open_window(window_options, |win, cx| {
            gpui_component::init(cx);
            theme::init(cx);
            state::init(cx);

            let workspace_view = Workspace::view(win, cx);
            cx.new(|cx| Root::new(workspace_view, win, cx))
        })
        .unwrap();
    });
}
