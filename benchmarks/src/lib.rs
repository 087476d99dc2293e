//! Shared setup for the easel benchmarks.

use easel::{Canvas, Frame, FrameSettings, RedrawPolicy, Resources};
use glam::Vec2;

/// A canvas of the given size on its own resources.
pub fn setup_canvas(width: u32, height: u32) -> Canvas {
    Canvas::new(width, height, "Black", Resources::new()).expect("Black is a palette color")
}

/// A regular polygon with `sides` corners around `center`.
pub fn regular_polygon(center: Vec2, radius: f32, sides: usize) -> Vec<Vec2> {
    (0..sides)
        .map(|i| {
            let angle = i as f32 / sides as f32 * std::f32::consts::TAU;
            center + Vec2::new(angle.cos(), angle.sin()) * radius
        })
        .collect()
}

/// A frame with a control panel of `buttons` buttons and a draw handler
/// that fills a few shapes.
pub fn setup_frame(buttons: usize, policy: RedrawPolicy) -> anyhow::Result<Frame> {
    let mut frame = Frame::new(
        FrameSettings::new()
            .size(640, 480)
            .control_panel_width(200)
            .redraw_policy(policy),
    )?;
    for i in 0..buttons {
        frame.add_button(format!("button {i}"), || {}, 150.0, 12)?;
    }
    frame.set_draw_handler(|canvas| {
        canvas.draw_rect((10.0, 10.0), (300.0, 200.0), 2, "White", Some("Blue".into()))?;
        canvas.draw_circle((400.0, 300.0), 120.0, 0, "Green", None)?;
        canvas.draw_line((0.0, 0.0), (639.0, 479.0), 3, "Yellow")
    });
    Ok(frame)
}
