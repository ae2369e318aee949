use gpui::*;

pub fn get_window_options(cx: &mut App) -> WindowOptions {
    let bounds = Bounds::centered(None, size(px(1280.), px(860.)), cx);

    WindowOptions {
        window_bounds: Some(WindowBounds::Windowed(bounds)),
        window_min_size: Some(size(px(800.), px(600.))),
        titlebar: Some(TitlebarOptions {
            title: Some("MYGUI".into()),
            appears_transparent: true,
            ..Default::default()
        }),
        ..Default::default()
    }
}
