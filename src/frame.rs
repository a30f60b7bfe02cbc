//! Frame composition: turns the store, viewport and ticks into a
//! [`RenderList`].
//!
//! Draw order is background, legend, plot border, grid with labels,
//! coordinate axes, series and finally tick marks so they sit on top of the
//! data.

use crate::axis::{AxisTicks, TextMeasurer};
use crate::config::SessionConfig;
use crate::geom::{ScreenPoint, ScreenRect};
use crate::render::{
    Color, LineSegment, LineStyle, RectStyle, RenderCommand, RenderList, TextStyle,
    build_line_segments,
};
use crate::store::Store;
use crate::transform::Transform;
use crate::view::{Viewport, VisualizationMode};

/// Output of [`build_frame`].
#[derive(Debug, Clone)]
pub(crate) struct PlotFrame {
    pub(crate) render: RenderList,
    /// Rectangle the series were drawn into.
    pub(crate) plot_screen: ScreenRect,
}

/// Tick layouts for both axes.
#[derive(Debug, Clone)]
pub(crate) struct FrameTicks {
    pub(crate) x: AxisTicks,
    pub(crate) y: AxisTicks,
}

pub(crate) fn build_frame(
    store: &Store,
    viewport: Viewport,
    ticks: &FrameTicks,
    window: ScreenRect,
    config: &SessionConfig,
    measurer: &dyn TextMeasurer,
) -> PlotFrame {
    let mut render = RenderList::new();
    let theme = &config.theme;

    render.push(RenderCommand::Rect {
        rect: window,
        style: RectStyle {
            fill: theme.background,
            stroke: Color::TRANSPARENT,
            stroke_width: 0.0,
        },
    });

    let legend_width = build_legend(&mut render, store, window, config, measurer);

    let y_label_width = ticks.y.max_label_width(measurer, config.font_size);
    let plot_screen = plot_screen_rect(window, y_label_width, legend_width, config);
    let transform = Transform::new(viewport, plot_screen);

    let border = config.border_width;
    render.push(RenderCommand::Rect {
        rect: plot_screen.inflated(border),
        style: RectStyle {
            fill: Color::TRANSPARENT,
            stroke: theme.border,
            stroke_width: border,
        },
    });

    build_grid(&mut render, ticks, &transform, window, config);
    build_coordinate_axes(&mut render, &transform, config);
    build_series(&mut render, store, &transform);
    build_tick_marks(&mut render, ticks, &transform, config);

    PlotFrame {
        render,
        plot_screen,
    }
}

/// Place the plot screen between the y labels, the legend and the x labels.
fn plot_screen_rect(
    window: ScreenRect,
    y_label_width: f32,
    legend_width: f32,
    config: &SessionConfig,
) -> ScreenRect {
    let left = y_label_width + 2.0 * config.offset_normal;
    let right = legend_width.max(config.min_screen_offset);
    let top = config.min_screen_offset;
    let bottom = config.font_size + config.offset_normal;

    ScreenRect::from_origin_size(
        window.min.x + left,
        window.min.y + top,
        (window.width() - (left + right)).max(1.0),
        (window.height() - (top + bottom)).max(1.0),
    )
}

/// Draw the legend in the top-right corner and return the width it reserves.
fn build_legend(
    render: &mut RenderList,
    store: &Store,
    window: ScreenRect,
    config: &SessionConfig,
    measurer: &dyn TextMeasurer,
) -> f32 {
    let group = store.group(store.visible_group());
    let titled = !store.visible_group().is_default();

    let mut content_width: f32 = 0.0;
    if titled {
        content_width = measurer.measure(group.label(), config.title_font_size).0;
    }
    for id in group.members() {
        let label = store.series(*id).label();
        content_width = content_width.max(measurer.measure(label, config.font_size).0);
    }

    let x = window.max.x - (content_width + config.offset_normal);
    let mut y = window.min.y + config.offset_normal;

    if titled {
        render.push(RenderCommand::Text {
            position: ScreenPoint::new(x, y),
            text: group.label().to_string(),
            style: TextStyle {
                color: config.theme.text,
                size: config.title_font_size,
            },
        });
        y += config.title_font_size + config.offset_small;
        render.push(RenderCommand::LineSegments {
            segments: vec![LineSegment::new(
                ScreenPoint::new(x, y),
                ScreenPoint::new(x + content_width, y),
            )],
            style: LineStyle::hairline(config.theme.text),
        });
        y += config.offset_small;
    }

    for id in group.members() {
        let series = store.series(*id);
        render.push(RenderCommand::Text {
            position: ScreenPoint::new(x, y),
            text: series.label().to_string(),
            style: TextStyle {
                color: series.color(),
                size: config.font_size,
            },
        });
        y += config.font_size;
    }

    content_width + 2.0 * config.offset_normal
}

fn build_grid(
    render: &mut RenderList,
    ticks: &FrameTicks,
    transform: &Transform,
    window: ScreenRect,
    config: &SessionConfig,
) {
    let plot_rect = transform.screen();
    let label_style = TextStyle {
        color: config.theme.text,
        size: config.font_size,
    };
    let mut lines = Vec::with_capacity(ticks.x.ticks.len() + ticks.y.ticks.len());
    let mut labels = Vec::with_capacity(lines.capacity());

    for tick in &ticks.x.ticks {
        let x = transform.x_to_screen(tick.value);
        lines.push(LineSegment::new(
            ScreenPoint::new(x, plot_rect.min.y),
            ScreenPoint::new(x, plot_rect.max.y),
        ));
        labels.push(RenderCommand::Text {
            position: ScreenPoint::new(x, plot_rect.max.y),
            text: tick.label.clone(),
            style: label_style,
        });
    }
    for tick in &ticks.y.ticks {
        let y = transform.y_to_screen(tick.value);
        lines.push(LineSegment::new(
            ScreenPoint::new(plot_rect.min.x, y),
            ScreenPoint::new(plot_rect.max.x, y),
        ));
        labels.push(RenderCommand::Text {
            position: ScreenPoint::new(window.min.x + config.offset_normal, y - config.font_size),
            text: tick.label.clone(),
            style: label_style,
        });
    }

    if !lines.is_empty() {
        render.push(RenderCommand::LineSegments {
            segments: lines,
            style: LineStyle::hairline(config.theme.grid),
        });
    }
    for label in labels {
        render.push(label);
    }
}

fn build_coordinate_axes(render: &mut RenderList, transform: &Transform, config: &SessionConfig) {
    let viewport = transform.viewport();
    let plot_rect = transform.screen();
    let mut segments = Vec::new();

    if viewport.y.min <= 0.0 && viewport.y.max >= 0.0 {
        let y = transform.y_to_screen(0.0);
        segments.push(LineSegment::new(
            ScreenPoint::new(plot_rect.min.x, y),
            ScreenPoint::new(plot_rect.max.x, y),
        ));
    }
    if viewport.x.min <= 0.0 && viewport.x.max >= 0.0 {
        let x = transform.x_to_screen(0.0);
        segments.push(LineSegment::new(
            ScreenPoint::new(x, plot_rect.min.y),
            ScreenPoint::new(x, plot_rect.max.y),
        ));
    }

    if !segments.is_empty() {
        render.push(RenderCommand::LineSegments {
            segments,
            style: LineStyle::hairline(config.theme.coordinate_axes),
        });
    }
}

fn build_series(render: &mut RenderList, store: &Store, transform: &Transform) {
    let plot_rect = transform.screen();
    render.push(RenderCommand::ClipRect(plot_rect));

    for id in store.visible_members() {
        let series = store.series(*id);
        if series.is_empty() {
            continue;
        }
        let begin = match store.mode() {
            VisualizationMode::TailCount { points } => series.tail_start(points),
            _ => 0,
        };

        let mut segments = Vec::new();
        build_line_segments(series.points_from(begin), transform, plot_rect, &mut segments);
        if !segments.is_empty() {
            render.push(RenderCommand::LineSegments {
                segments,
                style: LineStyle::hairline(series.color()),
            });
        }
    }

    render.push(RenderCommand::ClipEnd);
}

fn build_tick_marks(
    render: &mut RenderList,
    ticks: &FrameTicks,
    transform: &Transform,
    config: &SessionConfig,
) {
    let plot_rect = transform.screen();
    let length = config.tick_mark_len;
    let mut segments = Vec::with_capacity(ticks.x.ticks.len() + ticks.y.ticks.len());

    for tick in &ticks.x.ticks {
        let x = transform.x_to_screen(tick.value);
        segments.push(LineSegment::new(
            ScreenPoint::new(x, plot_rect.max.y - length),
            ScreenPoint::new(x, plot_rect.max.y),
        ));
    }
    for tick in &ticks.y.ticks {
        let y = transform.y_to_screen(tick.value);
        segments.push(LineSegment::new(
            ScreenPoint::new(plot_rect.min.x, y),
            ScreenPoint::new(plot_rect.min.x + length, y),
        ));
    }

    if !segments.is_empty() {
        render.push(RenderCommand::LineSegments {
            segments,
            style: LineStyle {
                color: config.theme.border,
                width: config.border_width,
            },
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::{LABEL_PRECISION, generate_ticks};
    use crate::group::GroupId;
    use crate::series::SeriesId;
    use crate::sync::synchronize;
    use crate::update::UpdateBuffer;
    use crate::view::Range;

    struct FixedWidth;

    impl TextMeasurer for FixedWidth {
        fn measure(&self, text: &str, size: f32) -> (f32, f32) {
            (text.chars().count() as f32 * size * 0.5, size)
        }
    }

    fn id(index: u32) -> SeriesId {
        SeriesId::new(index).unwrap()
    }

    fn window() -> ScreenRect {
        ScreenRect::from_origin_size(0.0, 0.0, 650.0, 500.0)
    }

    fn frame_for(store: &Store, viewport: Viewport) -> PlotFrame {
        let ticks = FrameTicks {
            x: generate_ticks(650.0, 50.0, viewport.x, LABEL_PRECISION),
            y: generate_ticks(500.0, 50.0, viewport.y, LABEL_PRECISION),
        };
        build_frame(
            store,
            viewport,
            &ticks,
            window(),
            &SessionConfig::default(),
            &FixedWidth,
        )
    }

    fn store_with(fill: impl FnOnce(&mut UpdateBuffer)) -> Store {
        let mut buffer = UpdateBuffer::new();
        fill(&mut buffer);
        let mut store = Store::new();
        synchronize(&mut buffer, &mut store);
        store
    }

    fn series_segments(frame: &PlotFrame, color: Color) -> usize {
        frame
            .render
            .commands()
            .iter()
            .filter_map(|command| match command {
                RenderCommand::LineSegments { segments, style } if style.color == color => {
                    Some(segments.len())
                }
                _ => None,
            })
            .sum()
    }

    #[test]
    fn default_group_legend_lists_series_only() {
        let store = store_with(|buffer| {
            buffer.append_numbers(id(0), &[1.0, 2.0, 3.0]).unwrap();
            buffer.set_series_name(id(0), "speed");
            buffer.show_series(id(0));
        });
        let viewport = Viewport::new(Range::new(0.0, 2.0), Range::new(1.0, 3.0));
        let frame = frame_for(&store, viewport);

        let texts: Vec<_> = frame.render.texts().collect();
        assert!(texts.contains(&"[0] speed"));
        assert!(!texts.iter().any(|text| text.contains("Plot Group")));

        let legend_width = 9.0 * 22.0 * 0.5 + 2.0 * 5.0;
        assert_eq!(frame.plot_screen.max.x, 650.0 - legend_width);
        assert_eq!(frame.plot_screen.min.y, 8.0);
        assert_eq!(frame.plot_screen.max.y, 500.0 - 27.0);
    }

    #[test]
    fn named_group_gets_title() {
        let group = GroupId::new(3).unwrap();
        let store = store_with(|buffer| {
            buffer.append_numbers(id(1), &[0.0, 1.0]).unwrap();
            buffer.add_member(group, id(1));
            buffer.show_group(group);
        });
        let frame = frame_for(&store, Viewport::new(Range::new(0.0, 1.0), Range::new(0.0, 1.0)));
        let texts: Vec<_> = frame.render.texts().collect();
        assert_eq!(texts[0], "[3] Plot Group");
        assert_eq!(texts[1], "[1]");
    }

    #[test]
    fn series_are_clipped_to_plot_screen() {
        let store = store_with(|buffer| {
            buffer.append_numbers(id(0), &[0.0, 1.0, 0.0, 1.0]).unwrap();
            buffer.show_series(id(0));
        });
        let color = store.series(id(0)).color();
        let frame = frame_for(&store, Viewport::new(Range::new(0.0, 3.0), Range::new(0.0, 1.0)));
        assert_eq!(series_segments(&frame, color), 3);

        let commands = frame.render.commands();
        let clip = commands
            .iter()
            .position(|command| *command == RenderCommand::ClipRect(frame.plot_screen))
            .expect("series clip");
        assert!(matches!(commands[clip + 1], RenderCommand::LineSegments { .. }));
        assert_eq!(commands[clip + 2], RenderCommand::ClipEnd);
    }

    #[test]
    fn tail_count_draws_only_tail() {
        let store = store_with(|buffer| {
            buffer.append_numbers(id(0), &[0.0, 1.0, 0.0, 1.0, 0.0]).unwrap();
            buffer.show_series(id(0));
            buffer.set_mode(VisualizationMode::TailCount { points: 2 });
        });
        let color = store.series(id(0)).color();
        let frame = frame_for(&store, Viewport::new(Range::new(3.0, 4.0), Range::new(0.0, 1.0)));
        assert_eq!(series_segments(&frame, color), 1);
    }

    #[test]
    fn tick_labels_and_marks_are_emitted() {
        let store = store_with(|buffer| buffer.set_window_visible(true));
        let viewport = Viewport::new(Range::new(-0.5, 0.5), Range::new(-0.5, 0.5));
        let frame = frame_for(&store, viewport);
        let texts: Vec<_> = frame.render.texts().collect();
        assert!(texts.contains(&"0"));
        assert!(texts.contains(&"-0.5"));

        let last = frame.render.commands().last().expect("tick marks");
        assert!(matches!(
            last,
            RenderCommand::LineSegments { style, .. } if style.width == 1.0
        ));
    }
}
