#[cfg(feature = "gpui")]
use std::time::Duration;

#[cfg(feature = "gpui")]
use gpui::{
    AppContext, Application, AsyncWindowContext, Bounds, Timer, WindowBounds, WindowOptions, px,
    size,
};

#[cfg(feature = "gpui")]
use streamplot::{Session, SessionConfig, StreamPlotView};

#[cfg(feature = "gpui")]
fn main() {
    Application::new().run(|cx| {
        let config = SessionConfig::default();
        let options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                None,
                size(px(config.window_width), px(config.window_height)),
                cx,
            ))),
            ..Default::default()
        };

        cx.open_window(options, |window, cx| {
            let (session, render_loop) = Session::detached(config);
            session.set_name(0, "sensor").unwrap();
            session.set_mode_tail_span(10.0);
            session.show_series(0).unwrap();

            let view = StreamPlotView::new(render_loop);
            let interval = view.frame_interval();
            let view_for_close = view.clone();
            let view_handle = cx.new(|_| view);

            window.on_window_should_close(cx, move |_, _| {
                view_for_close.window_closed();
                true
            });

            std::thread::spawn(move || {
                let mut t = 0.0_f64;
                loop {
                    for _ in 0..50 {
                        let _ = session.append_point(0, t, (t * 3.0).sin() + 0.1 * (t * 40.0).cos());
                        t += 0.002;
                    }
                    std::thread::sleep(Duration::from_millis(10));
                }
            });

            let view_for_task = view_handle.clone();
            window
                .spawn(cx, move |cx: &mut AsyncWindowContext| {
                    let mut cx = cx.clone();
                    async move {
                        loop {
                            Timer::after(interval).await;
                            cx.update(|_, cx| {
                                view_for_task.update(cx, |_, view_cx| view_cx.notify());
                            })
                            .ok();
                        }
                    }
                })
                .detach();

            view_handle
        })
        .unwrap();
    });
}

#[cfg(not(feature = "gpui"))]
fn main() {
    eprintln!("Enable the gpui feature to run this example.");
}
