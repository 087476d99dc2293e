//! Control Panel - buttons driving a counter drawn on the canvas
//!
//! Run with: cargo run

use easel::panel::ImageSprite;
use easel::{Frame, FrameSettings, Image, ImageInfo};
use std::cell::Cell;
use std::rc::Rc;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut frame = Frame::new(
        FrameSettings::new()
            .title("Control Panel")
            .size(400, 300)
            .control_panel_width(160)
            .canvas_color("White"),
    )?;

    let count = Rc::new(Cell::new(0i32));

    frame.add_label("Counter", None, Some(20))?;

    let up = count.clone();
    frame.add_button("+1", move || up.set(up.get() + 1), 120.0, 14)?;
    let down = count.clone();
    frame.add_button("-1", move || down.set(down.get() - 1), 120.0, 14)?;
    let reset = count.clone();
    frame.add_button("Reset", move || reset.set(0), 120.0, 14)?;

    // An optional picture under the buttons
    if let Some(path) = std::env::args().nth(1) {
        let image = Image::load(ImageInfo::new(path, (64.0, 64.0)))?;
        let sprite = ImageSprite::new(Rc::new(image));
        frame.add_sprite_container(Some(Box::new(sprite)), None)?;
    }

    let stop = frame.stop_handle();
    frame.add_button("Quit", move || stop.stop(), 120.0, 14)?;

    frame.set_draw_handler(move |canvas| {
        let value = count.get();
        let color = if value < 0 { "Red" } else { "Blue" };
        canvas.draw_circle((200.0, 150.0), 90.0, 6, color, None)?;
        canvas.draw_text(
            &value.to_string(),
            (200.0, 150.0),
            48,
            "Black",
            "sans-serif",
            ("center", "middle"),
        )
    });

    frame.start()?;
    frame.quit();
    Ok(())
}
