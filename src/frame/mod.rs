//! Frame
//!
//! Owns the canvas, the optional control panel and the composited screen,
//! and turns input events into calls to the registered handlers. The
//! window runner drives a frame with [`Frame::tick`]; tests can do the
//! same without opening a window.

pub mod screenshot;
pub mod settings;

pub use screenshot::Screenshot;
pub use settings::{FrameSettings, RedrawPolicy};

use crate::canvas::{Canvas, Surface};
use crate::color::ColorRef;
use crate::error::{Error, Result};
use crate::event::{Event, Key, MouseButton};
use crate::panel::{ControlId, ControlPanel, Sprite};
use crate::resources::Resources;
use glam::Vec2;
use std::cell::Cell;
use std::fmt;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, info};

/// Draw handler, called with the cleared canvas.
pub type DrawHandler = Box<dyn FnMut(&mut Canvas) -> Result<()>>;
/// Mouse handler, called with the window position.
pub type PositionHandler = Box<dyn FnMut(Vec2)>;
/// Keyboard handler.
pub type KeyHandler = Box<dyn FnMut(Key)>;

struct Handlers {
    draw: DrawHandler,
    mouse_left_click: PositionHandler,
    mouse_right_click: PositionHandler,
    mouse_move: PositionHandler,
    key_down: KeyHandler,
    key_up: KeyHandler,
}

impl Default for Handlers {
    fn default() -> Self {
        Self {
            draw: Box::new(|_| Ok(())),
            mouse_left_click: Box::new(|_| {}),
            mouse_right_click: Box::new(|_| {}),
            mouse_move: Box::new(|_| {}),
            key_down: Box::new(|_| {}),
            key_up: Box::new(|_| {}),
        }
    }
}

/// Stops a running frame from inside a handler.
#[derive(Debug, Clone)]
pub struct StopHandle(Rc<Cell<bool>>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.set(false);
    }

    pub fn is_running(&self) -> bool {
        self.0.get()
    }
}

/// A canvas with an optional control panel beside it.
pub struct Frame {
    settings: FrameSettings,
    resources: Rc<Resources>,
    canvas: Canvas,
    control_panel: Option<ControlPanel>,
    screen: Surface,
    handlers: Handlers,
    screenshot: Screenshot,
    surface_count: u8,
    running: Rc<Cell<bool>>,
}

impl Frame {
    /// Create a frame. A control panel is created only when
    /// `control_panel_width` is non-zero.
    pub fn new(settings: FrameSettings) -> Result<Self> {
        let resources = Resources::new();
        let (width, height) = settings.size;
        let canvas = Canvas::new(width, height, &settings.canvas_color, resources.clone())?;

        let control_panel = match settings.control_panel_width {
            0 => None,
            panel_width => Some(ControlPanel::new(
                panel_width,
                height,
                &settings.control_panel_color,
                resources.clone(),
            )?),
        };

        let (screen_width, screen_height) = settings.window_size();
        let mut screen = Surface::new(screen_width, screen_height);
        screen.copy_from(canvas.surface(), 0, 0);
        if let Some(panel) = &control_panel {
            screen.copy_from(panel.canvas().surface(), width as i32, 0);
        }

        info!(
            "Created frame '{}' ({}x{}, control panel width {})",
            settings.title, width, height, settings.control_panel_width
        );

        Ok(Self {
            settings,
            resources,
            canvas,
            control_panel,
            screen,
            handlers: Handlers::default(),
            screenshot: Screenshot::new(),
            surface_count: 0,
            running: Rc::new(Cell::new(false)),
        })
    }

    pub fn title(&self) -> &str {
        &self.settings.title
    }

    pub fn settings(&self) -> &FrameSettings {
        &self.settings
    }

    pub fn resources(&self) -> &Rc<Resources> {
        &self.resources
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn control_panel(&self) -> Option<&ControlPanel> {
        self.control_panel.as_ref()
    }

    pub fn control_panel_mut(&mut self) -> Option<&mut ControlPanel> {
        self.control_panel.as_mut()
    }

    /// The composited canvas and control panel as last redrawn.
    pub fn screen(&self) -> &Surface {
        &self.screen
    }

    /// Time between ticks at the configured frame rate.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.settings.fps.max(1)
    }

    pub fn set_draw_handler(&mut self, handler: impl FnMut(&mut Canvas) -> Result<()> + 'static) {
        self.handlers.draw = Box::new(handler);
    }

    pub fn set_mouse_left_click_handler(&mut self, handler: impl FnMut(Vec2) + 'static) {
        self.handlers.mouse_left_click = Box::new(handler);
    }

    pub fn set_mouse_right_click_handler(&mut self, handler: impl FnMut(Vec2) + 'static) {
        self.handlers.mouse_right_click = Box::new(handler);
    }

    pub fn set_mouse_move_handler(&mut self, handler: impl FnMut(Vec2) + 'static) {
        self.handlers.mouse_move = Box::new(handler);
    }

    pub fn set_key_down_handler(&mut self, handler: impl FnMut(Key) + 'static) {
        self.handlers.key_down = Box::new(handler);
    }

    pub fn set_key_up_handler(&mut self, handler: impl FnMut(Key) + 'static) {
        self.handlers.key_up = Box::new(handler);
    }

    pub fn set_background_color<'a>(&mut self, color: impl Into<ColorRef<'a>>) -> Result<()> {
        self.canvas.set_background_color(color)
    }

    /// Save screenshots as `<filename>_<n><ext>`; `ext` defaults to
    /// `.png`. Resets the numbering.
    pub fn set_screenshot_file(&mut self, filename: impl Into<String>, ext: Option<&str>) {
        self.screenshot.configure(filename, ext);
    }

    /// Save the composited screen to the next numbered file. Returns
    /// `None` when no screenshot file has been set.
    pub fn screenshot(&mut self) -> Result<Option<PathBuf>> {
        self.screenshot.save(&self.screen)
    }

    fn panel_mut(&mut self) -> Result<&mut ControlPanel> {
        self.control_panel.as_mut().ok_or(Error::NoControlPanel)
    }

    pub fn add_button(
        &mut self,
        text: impl Into<String>,
        handler: impl FnMut() + 'static,
        width: f32,
        font_height: u32,
    ) -> Result<ControlId> {
        Ok(self.panel_mut()?.add_button(text, handler, width, font_height))
    }

    pub fn add_label(
        &mut self,
        text: impl Into<String>,
        width: Option<f32>,
        font_height: Option<u32>,
    ) -> Result<ControlId> {
        Ok(self.panel_mut()?.add_label(text, width, font_height))
    }

    pub fn add_sprite_container(
        &mut self,
        sprite: Option<Box<dyn Sprite>>,
        size: Option<Vec2>,
    ) -> Result<ControlId> {
        Ok(self.panel_mut()?.add_sprite_container(sprite, size))
    }

    /// Handle one input event.
    pub fn dispatch(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Quit => self.stop(),
            Event::MousePress {
                button: MouseButton::Left,
                position,
            } => {
                (self.handlers.mouse_left_click)(position);
                self.control_click(position);
            }
            Event::MousePress {
                button: MouseButton::Right,
                position,
            } => (self.handlers.mouse_right_click)(position),
            Event::MouseMotion { position } => (self.handlers.mouse_move)(position),
            Event::KeyPress { key } => {
                (self.handlers.key_down)(key);
                if key == self.settings.screenshot_key {
                    self.screenshot()?;
                }
            }
            Event::KeyRelease { key } => (self.handlers.key_up)(key),
            Event::MousePress { .. } | Event::MouseRelease { .. } => {}
        }
        Ok(())
    }

    /// Forward a left click to the control panel if it lands on it.
    fn control_click(&mut self, position: Vec2) {
        let canvas_width = self.canvas.width() as f32;
        let Some(panel) = self.control_panel.as_mut() else {
            return;
        };
        let pos = position - Vec2::new(canvas_width, 0.0);
        let (width, height) = (panel.width() as f32, panel.height() as f32);
        if (0.0..=width).contains(&pos.x) && (0.0..=height).contains(&pos.y) {
            let pressed = panel.click(pos);
            debug!("Control panel click at {:?} pressed {} button(s)", pos, pressed);
        }
    }

    /// Redraw according to the redraw policy and composite the result
    /// into the screen.
    pub fn redraw(&mut self) -> Result<()> {
        let (canvas, panel) = match (self.control_panel.is_some(), self.settings.redraw_policy) {
            (false, _) => (true, false),
            (true, RedrawPolicy::Both) => (true, true),
            (true, RedrawPolicy::Alternate) => {
                let canvas_turn = self.surface_count == 1;
                (canvas_turn, !canvas_turn)
            }
        };

        if canvas {
            self.canvas.draw_background();
            (self.handlers.draw)(&mut self.canvas)?;
            self.screen.copy_from(self.canvas.surface(), 0, 0);
            self.surface_count = 0;
        }
        if panel {
            if let Some(control_panel) = self.control_panel.as_mut() {
                control_panel.redraw()?;
                let x = self.canvas.width() as i32;
                self.screen.copy_from(control_panel.canvas().surface(), x, 0);
            }
            self.surface_count = 1;
        }
        Ok(())
    }

    /// Handle `events` in order, then redraw.
    pub fn tick(&mut self, events: impl IntoIterator<Item = Event>) -> Result<()> {
        for event in events {
            self.dispatch(event)?;
        }
        self.redraw()
    }

    /// Mark the frame as running.
    pub(crate) fn begin(&mut self) {
        info!("Starting frame '{}'", self.settings.title);
        self.running.set(true);
    }

    pub fn stop(&self) {
        if self.running.replace(false) {
            info!("Stopping frame '{}'", self.settings.title);
        }
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle(self.running.clone())
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// Tear the frame down and release the shared resources.
    pub fn quit(self) {
        self.stop();
        self.resources.clear();
        info!("Frame '{}' closed", self.settings.title);
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("settings", &self.settings)
            .field("canvas", &self.canvas)
            .field("control_panel", &self.control_panel)
            .field("screenshot", &self.screenshot)
            .field("running", &self.running.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use std::cell::RefCell;

    fn frame(panel_width: u32) -> Frame {
        Frame::new(
            FrameSettings::new()
                .size(100, 80)
                .control_panel_width(panel_width)
                .canvas_color("Red")
                .control_panel_color("Blue"),
        )
        .unwrap()
    }

    fn left_click(x: f32, y: f32) -> Event {
        Event::MousePress {
            button: MouseButton::Left,
            position: Vec2::new(x, y),
        }
    }

    #[test]
    fn test_no_control_panel_without_width() {
        let mut frame = frame(0);
        assert!(frame.control_panel().is_none());
        assert_eq!(frame.screen().size(), (100, 80));
        assert!(matches!(
            frame.add_button("b", || {}, 50.0, 10),
            Err(Error::NoControlPanel)
        ));
        assert!(matches!(
            frame.add_label("l", None, None),
            Err(Error::NoControlPanel)
        ));
    }

    #[test]
    fn test_unknown_colors_fail() {
        let settings = FrameSettings::new().canvas_color("Mauvish");
        assert!(matches!(Frame::new(settings), Err(Error::UnknownColor(_))));
    }

    #[test]
    fn test_left_click_reaches_handler_and_button() {
        let mut frame = frame(80);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let presses = Rc::new(Cell::new(0));

        let log = seen.clone();
        frame.set_mouse_left_click_handler(move |pos| log.borrow_mut().push(pos));
        let counter = presses.clone();
        frame
            .add_button("b", move || counter.set(counter.get() + 1), 60.0, 10)
            .unwrap();

        // Button spans x 10..=70 and y 0..=20 within the panel
        frame.dispatch(left_click(140.0, 10.0)).unwrap();
        assert_eq!(presses.get(), 1);

        // On the canvas the handler fires but no button does
        frame.dispatch(left_click(40.0, 10.0)).unwrap();
        assert_eq!(presses.get(), 1);

        assert_eq!(
            *seen.borrow(),
            vec![Vec2::new(140.0, 10.0), Vec2::new(40.0, 10.0)]
        );
    }

    #[test]
    fn test_right_click_and_motion() {
        let mut frame = frame(0);
        let right = Rc::new(Cell::new(Vec2::ZERO));
        let moved = Rc::new(Cell::new(Vec2::ZERO));

        let r = right.clone();
        frame.set_mouse_right_click_handler(move |pos| r.set(pos));
        let m = moved.clone();
        frame.set_mouse_move_handler(move |pos| m.set(pos));

        frame
            .tick([
                Event::MousePress {
                    button: MouseButton::Right,
                    position: Vec2::new(3.0, 4.0),
                },
                Event::MouseMotion {
                    position: Vec2::new(7.0, 8.0),
                },
                Event::MouseRelease {
                    button: MouseButton::Right,
                    position: Vec2::new(3.0, 4.0),
                },
            ])
            .unwrap();
        assert_eq!(right.get(), Vec2::new(3.0, 4.0));
        assert_eq!(moved.get(), Vec2::new(7.0, 8.0));
    }

    #[test]
    fn test_key_handlers() {
        let mut frame = frame(0);
        let keys = Rc::new(RefCell::new(Vec::new()));

        let down = keys.clone();
        frame.set_key_down_handler(move |key| down.borrow_mut().push(format!("down {key}")));
        let up = keys.clone();
        frame.set_key_up_handler(move |key| up.borrow_mut().push(format!("up {key}")));

        frame
            .tick([
                Event::KeyPress { key: Key::Space },
                Event::KeyRelease { key: Key::Space },
            ])
            .unwrap();
        assert_eq!(*keys.borrow(), vec!["down space", "up space"]);
    }

    #[test]
    fn test_missing_handlers_are_no_ops() {
        let mut frame = frame(60);
        frame
            .tick([
                left_click(10.0, 10.0),
                Event::KeyPress { key: Key::PrintScreen },
                Event::MouseMotion {
                    position: Vec2::ONE,
                },
            ])
            .unwrap();
    }

    #[test]
    fn test_quit_event_stops() {
        let mut frame = frame(0);
        frame.begin();
        assert!(frame.is_running());
        frame.dispatch(Event::Quit).unwrap();
        assert!(!frame.is_running());
    }

    #[test]
    fn test_stop_handle_from_handler() {
        let mut frame = frame(0);
        let handle = frame.stop_handle();
        frame.set_key_down_handler(move |_| handle.stop());
        frame.begin();
        frame.tick([Event::KeyPress { key: Key::Q }]).unwrap();
        assert!(!frame.is_running());
    }

    #[test]
    fn test_redraw_both_composites_surfaces() {
        let mut frame = frame(50);
        let draws = Rc::new(Cell::new(0));
        let counter = draws.clone();
        frame.set_draw_handler(move |canvas| {
            counter.set(counter.get() + 1);
            canvas.draw_rect((0.0, 0.0), (10.0, 10.0), 0, "White", None)
        });

        frame.redraw().unwrap();
        frame.redraw().unwrap();
        assert_eq!(draws.get(), 2);

        let screen = frame.screen();
        assert_eq!(screen.size(), (150, 80));
        assert_eq!(screen.pixel(0, 0), Some(Color::rgb(255, 255, 240)));
        assert_eq!(screen.pixel(50, 50), Some(Color::rgb(178, 34, 34)));
        assert_eq!(screen.pixel(120, 50), Some(Color::rgb(70, 130, 180)));
    }

    #[test]
    fn test_redraw_alternates_starting_with_panel() {
        let mut frame = Frame::new(
            FrameSettings::new()
                .size(40, 40)
                .control_panel_width(20)
                .redraw_policy(RedrawPolicy::Alternate),
        )
        .unwrap();
        let draws = Rc::new(Cell::new(0));
        let counter = draws.clone();
        frame.set_draw_handler(move |_| {
            counter.set(counter.get() + 1);
            Ok(())
        });

        let mut seen = Vec::new();
        for _ in 0..4 {
            frame.tick([]).unwrap();
            seen.push(draws.get());
        }
        assert_eq!(seen, vec![0, 1, 1, 2]);
    }

    #[test]
    fn test_alternate_without_panel_draws_every_tick() {
        let mut frame = Frame::new(
            FrameSettings::new()
                .size(10, 10)
                .redraw_policy(RedrawPolicy::Alternate),
        )
        .unwrap();
        let draws = Rc::new(Cell::new(0));
        let counter = draws.clone();
        frame.set_draw_handler(move |_| {
            counter.set(counter.get() + 1);
            Ok(())
        });
        for _ in 0..3 {
            frame.tick([]).unwrap();
        }
        assert_eq!(draws.get(), 3);
    }

    #[test]
    fn test_draw_handler_errors_propagate() {
        let mut frame = frame(0);
        frame.set_draw_handler(|canvas| canvas.draw_line((0.0, 0.0), (5.0, 5.0), 1, "NoSuchColor"));
        assert!(matches!(frame.redraw(), Err(Error::UnknownColor(_))));
    }

    #[test]
    fn test_screenshot_hotkey_writes_numbered_files() {
        let mut frame = frame(20);
        let base = std::env::temp_dir().join(format!("easel_frame_{}", std::process::id()));
        frame.set_screenshot_file(base.to_string_lossy(), None);
        frame.redraw().unwrap();

        let pressed = Rc::new(Cell::new(false));
        let flag = pressed.clone();
        frame.set_key_down_handler(move |key| flag.set(key == Key::PrintScreen));

        frame.dispatch(Event::KeyPress { key: Key::PrintScreen }).unwrap();
        frame.dispatch(Event::KeyPress { key: Key::PrintScreen }).unwrap();
        assert!(pressed.get());

        for n in 0..2 {
            let path = PathBuf::from(format!("{}_{}.png", base.display(), n));
            let saved = image::open(&path).unwrap().to_rgba8();
            assert_eq!(saved.dimensions(), (120, 80));
            std::fs::remove_file(path).unwrap();
        }
    }

    #[test]
    fn test_custom_screenshot_key() {
        let mut frame = Frame::new(FrameSettings::new().size(4, 4).screenshot_key(Key::F12)).unwrap();
        let base = std::env::temp_dir().join(format!("easel_key_{}", std::process::id()));
        frame.set_screenshot_file(base.to_string_lossy(), Some(".bmp"));

        frame.dispatch(Event::KeyPress { key: Key::PrintScreen }).unwrap();
        let path = PathBuf::from(format!("{}_0.bmp", base.display()));
        assert!(!path.exists());

        frame.dispatch(Event::KeyPress { key: Key::F12 }).unwrap();
        assert!(path.exists());
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_screenshot_hotkey_writes_jpeg() {
        let mut frame = frame(30);
        let base = std::env::temp_dir().join(format!("easel_jpeg_{}", std::process::id()));
        frame.set_screenshot_file(base.to_string_lossy(), Some(".jpg"));
        frame.redraw().unwrap();

        frame.dispatch(Event::KeyPress { key: Key::PrintScreen }).unwrap();
        let path = PathBuf::from(format!("{}_0.jpg", base.display()));
        let saved = image::open(&path).unwrap().to_rgb8();
        assert_eq!(saved.dimensions(), (130, 80));
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_quit_clears_fonts() {
        let frame = frame(0);
        let resources = frame.resources().clone();
        resources.fonts().get("serif", 12).unwrap();
        assert_eq!(resources.fonts().len(), 1);
        frame.quit();
        assert!(resources.fonts().is_empty());
    }

    #[test]
    fn test_tick_interval() {
        let frame = Frame::new(FrameSettings::new().fps(50)).unwrap();
        assert_eq!(frame.tick_interval(), Duration::from_millis(20));
    }
}
