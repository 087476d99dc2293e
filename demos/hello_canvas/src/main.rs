//! Hello Canvas - every drawing primitive plus the input handlers
//!
//! Run with: cargo run
//! Press Print Screen to save `hello_canvas_<n>.png`.

use easel::glam::Vec2;
use easel::{Frame, FrameSettings, Key};
use std::cell::Cell;
use std::f32::consts::PI;
use std::rc::Rc;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut frame = Frame::new(FrameSettings::new().title("Hello Canvas").size(640, 480))?;
    frame.set_screenshot_file("hello_canvas", None);

    let cursor = Rc::new(Cell::new(Vec2::new(320.0, 240.0)));

    let pointer = cursor.clone();
    frame.set_mouse_move_handler(move |pos| pointer.set(pos));
    frame.set_mouse_left_click_handler(|pos| println!("Mouse left click: {pos}"));
    frame.set_mouse_right_click_handler(|pos| println!("Mouse right click: {pos}"));
    frame.set_key_up_handler(|key| println!("Key up: {key}"));

    let stop = frame.stop_handle();
    frame.set_key_down_handler(move |key| {
        println!("Key down: {key}");
        if key == Key::Escape {
            stop.stop();
        }
    });

    frame.set_draw_handler(move |canvas| {
        canvas.draw_rect((20.0, 20.0), (120.0, 80.0), 3, "Red", Some("Yellow".into()))?;
        canvas.draw_polygon(
            &[
                Vec2::new(200.0, 100.0),
                Vec2::new(260.0, 20.0),
                Vec2::new(320.0, 100.0),
            ],
            2,
            "White",
            Some("Purple".into()),
        )?;
        canvas.draw_circle((420.0, 60.0), 40.0, 4, "Green", None)?;
        canvas.draw_ellipse((480.0, 20.0), (140.0, 80.0), 0, "Blue", None)?;
        canvas.draw_arc((20.0, 140.0), (160.0, 120.0), 0.0, PI * 1.5, 5, "Orange")?;
        canvas.draw_line((220.0, 140.0), (360.0, 260.0), 6, "LightBlue")?;
        canvas.draw_lines(
            true,
            &[
                Vec2::new(400.0, 140.0),
                Vec2::new(600.0, 160.0),
                Vec2::new(520.0, 260.0),
            ],
            2,
            "Gray",
        )?;
        canvas.draw_aalines(
            false,
            &[
                Vec2::new(40.0, 300.0),
                Vec2::new(200.0, 420.0),
                Vec2::new(360.0, 310.0),
            ],
            true,
            "White",
        )?;

        canvas.draw_text("Hello", (320.0, 380.0), 32, "White", "serif", ("center", "middle"))?;
        let pos = cursor.get();
        canvas.draw_text(
            &format!("({:.0}, {:.0})", pos.x, pos.y),
            pos,
            14,
            "Yellow",
            "sans-serif",
            ("left", "bottom"),
        )
    });

    frame.start()?;
    frame.quit();
    Ok(())
}
