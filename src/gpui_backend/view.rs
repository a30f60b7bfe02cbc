use std::sync::{Arc, Mutex};
use std::time::Duration;

use gpui::prelude::*;
use gpui::{
    Bounds, Modifiers, MouseButton, MouseDownEvent, MouseMoveEvent, MouseUpEvent, Pixels, Point,
    ScrollWheelEvent, Window, canvas, div, px,
};

use crate::geom::{ScreenPoint, ScreenRect};
use crate::interaction::PointerInput;
use crate::render::RenderList;
use crate::render_loop::{FrameInput, RenderLoop};

use super::paint::{paint_frame, to_hsla};
use super::text::GpuiTextMeasurer;

/// Pixel distance GPUI reports for one wheel notch.
const WHEEL_NOTCH_PX: f32 = 16.0;

/// A GPUI view that draws a streamplot session.
///
/// Ctrl while scrolling keeps the X range, Shift keeps the Y range.
#[derive(Clone)]
pub struct StreamPlotView {
    render_loop: Arc<Mutex<RenderLoop>>,
    pointer: Arc<Mutex<PointerInput>>,
    drag_from: Option<ScreenPoint>,
}

impl StreamPlotView {
    /// Wrap the render half of a [`Session::detached`](crate::Session::detached) pair.
    pub fn new(render_loop: RenderLoop) -> Self {
        Self {
            render_loop: Arc::new(Mutex::new(render_loop)),
            pointer: Arc::new(Mutex::new(PointerInput::default())),
            drag_from: None,
        }
    }

    /// Time between repaints at the configured frame rate.
    pub fn frame_interval(&self) -> Duration {
        self.render_loop
            .lock()
            .expect("render loop lock")
            .config()
            .frame_interval()
    }

    /// Report that the hosting window was closed.
    pub fn window_closed(&self) {
        self.render_loop
            .lock()
            .expect("render loop lock")
            .window_closed();
    }

    fn push_pointer(&self, input: PointerInput) {
        self.pointer.lock().expect("pointer lock").accumulate(input);
    }

    fn on_mouse_down(&mut self, ev: &MouseDownEvent, cx: &mut Context<Self>) {
        let pos = screen_point(ev.position);
        self.drag_from = Some(pos);
        self.push_pointer(PointerInput {
            position: Some(pos),
            ..modifier_locks(&ev.modifiers)
        });
        cx.notify();
    }

    fn on_mouse_move(&mut self, ev: &MouseMoveEvent, cx: &mut Context<Self>) {
        let pos = screen_point(ev.position);
        let mut input = PointerInput {
            position: Some(pos),
            ..modifier_locks(&ev.modifiers)
        };
        if ev.pressed_button == Some(MouseButton::Left)
            && let Some(from) = self.drag_from.replace(pos)
        {
            input.drag = ScreenPoint::new(pos.x - from.x, pos.y - from.y);
        }
        self.push_pointer(input);
        cx.notify();
    }

    fn on_mouse_up(&mut self, _ev: &MouseUpEvent, cx: &mut Context<Self>) {
        self.drag_from = None;
        cx.notify();
    }

    fn on_scroll(&mut self, ev: &ScrollWheelEvent, cx: &mut Context<Self>) {
        let delta = ev.delta.pixel_delta(px(WHEEL_NOTCH_PX));
        let wheel = f32::from(delta.y) / WHEEL_NOTCH_PX;
        if wheel.abs() < 0.01 {
            return;
        }
        self.push_pointer(PointerInput {
            position: Some(screen_point(ev.position)),
            wheel,
            ..modifier_locks(&ev.modifiers)
        });
        cx.notify();
    }
}

impl Render for StreamPlotView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let render_loop = Arc::clone(&self.render_loop);
        let pointer = Arc::clone(&self.pointer);
        let background = render_loop
            .lock()
            .expect("render loop lock")
            .config()
            .theme
            .background;

        div()
            .size_full()
            .bg(to_hsla(background))
            .child(
                canvas(
                    move |bounds, window, _| {
                        let mut render_loop = render_loop.lock().expect("render loop lock");
                        render_loop.synchronize();
                        if !render_loop.is_window_visible() {
                            return RenderList::new();
                        }
                        let input = FrameInput {
                            window: screen_rect(bounds),
                            pointer: std::mem::take(&mut *pointer.lock().expect("pointer lock")),
                        };
                        render_loop.prepare_frame(&input, &GpuiTextMeasurer::new(window))
                    },
                    move |_, frame, window, cx| {
                        paint_frame(&frame, window, cx);
                    },
                )
                .size_full(),
            )
            .on_mouse_down(
                MouseButton::Left,
                cx.listener(|this, ev, _, cx| {
                    this.on_mouse_down(ev, cx);
                }),
            )
            .on_mouse_move(cx.listener(|this, ev, _, cx| {
                this.on_mouse_move(ev, cx);
            }))
            .on_mouse_up(
                MouseButton::Left,
                cx.listener(|this, ev, _, cx| {
                    this.on_mouse_up(ev, cx);
                }),
            )
            .on_scroll_wheel(cx.listener(|this, ev, _, cx| {
                this.on_scroll(ev, cx);
            }))
    }
}

fn modifier_locks(modifiers: &Modifiers) -> PointerInput {
    PointerInput {
        lock_x_zoom: modifiers.control,
        lock_y_zoom: modifiers.shift,
        ..PointerInput::default()
    }
}

fn screen_point(point: Point<Pixels>) -> ScreenPoint {
    ScreenPoint::new(f32::from(point.x), f32::from(point.y))
}

fn screen_rect(bounds: Bounds<Pixels>) -> ScreenRect {
    ScreenRect::from_origin_size(
        f32::from(bounds.origin.x),
        f32::from(bounds.origin.y),
        f32::from(bounds.size.width),
        f32::from(bounds.size.height),
    )
}
