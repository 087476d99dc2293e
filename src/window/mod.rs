//! Window runner
//!
//! Opens a winit window for a [`Frame`], feeds it OS input and presents
//! its screen at the configured frame rate.

use crate::context::WgpuContext;
use crate::event::{Event, Key, MouseButton};
use crate::frame::Frame;
use crate::present::ScreenPresenter;
use anyhow::Context as _;
use glam::Vec2;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::WindowId;

impl Frame {
    /// Open the window and run until the frame is stopped or the window
    /// is closed.
    ///
    /// winit allows one event loop per process, so a program can start
    /// only one frame.
    pub fn start(&mut self) -> anyhow::Result<()> {
        let event_loop = EventLoop::new()?;
        self.begin();

        let mut runner = Runner {
            frame: &mut *self,
            graphics: None,
            events: Vec::new(),
            mouse_position: Vec2::ZERO,
            next_tick: Instant::now(),
            error: None,
        };
        event_loop.run_app(&mut runner)?;

        let error = runner.error.take();
        self.stop();
        match error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

struct Graphics {
    window: Arc<winit::window::Window>,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    ctx: WgpuContext,
    presenter: ScreenPresenter,
}

impl Graphics {
    fn new(event_loop: &ActiveEventLoop, frame: &Frame) -> anyhow::Result<Self> {
        let (width, height) = frame.settings().window_size();
        let window_attrs = winit::window::WindowAttributes::default()
            .with_title(frame.title())
            .with_inner_size(winit::dpi::PhysicalSize::new(width, height))
            .with_resizable(false);
        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .context("failed to create window")?,
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window.clone())
            .context("failed to create surface")?;
        let (ctx, adapter) = WgpuContext::for_surface(&instance, &surface)?;

        let size = window.inner_size();
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .or_else(|| caps.formats.first().copied())
            .context("surface reports no texture formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&ctx.device, &config);

        let presenter = ScreenPresenter::new(&ctx, width, height, format);
        info!("Window opened ({}x{}, {:?})", config.width, config.height, format);

        Ok(Self {
            window,
            surface,
            config,
            ctx,
            presenter,
        })
    }

    fn present(&mut self, frame: &Frame) {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.ctx.device, &self.config);
                return;
            }
            Err(e) => {
                error!("Surface error: {:?}", e);
                return;
            }
        };
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.presenter.upload(&self.ctx, frame.screen());
        let mut encoder = self.ctx.create_encoder(Some("present encoder"));
        self.presenter.render(&mut encoder, &view);
        self.ctx.submit(std::iter::once(encoder.finish()));

        self.window.pre_present_notify();
        surface_texture.present();
    }
}

struct Runner<'a> {
    frame: &'a mut Frame,
    graphics: Option<Graphics>,
    events: Vec<Event>,
    mouse_position: Vec2,
    next_tick: Instant,
    error: Option<anyhow::Error>,
}

impl Runner<'_> {
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        error!("{:#}", err);
        self.error.get_or_insert(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for Runner<'_> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.graphics.is_some() {
            return;
        }
        match Graphics::new(event_loop, self.frame) {
            Ok(graphics) => {
                self.graphics = Some(graphics);
                self.next_tick = Instant::now();
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(graphics) = &mut self.graphics else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                self.events.push(Event::Quit);
            }
            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    graphics.config.width = size.width;
                    graphics.config.height = size.height;
                    graphics
                        .surface
                        .configure(&graphics.ctx.device, &graphics.config);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse_position = Vec2::new(position.x as f32, position.y as f32);
                self.events.push(Event::MouseMotion {
                    position: self.mouse_position,
                });
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = match button {
                    winit::event::MouseButton::Left => MouseButton::Left,
                    winit::event::MouseButton::Right => MouseButton::Right,
                    winit::event::MouseButton::Middle => MouseButton::Middle,
                    _ => return,
                };
                let position = self.mouse_position;
                self.events.push(match state {
                    ElementState::Pressed => Event::MousePress { button, position },
                    ElementState::Released => Event::MouseRelease { button, position },
                });
            }
            WindowEvent::KeyboardInput {
                event: key_event, ..
            } => {
                if key_event.repeat {
                    return;
                }
                let key = Key::from_winit(&key_event.logical_key, key_event.physical_key);
                if let Some(key) = key {
                    self.events.push(match key_event.state {
                        ElementState::Pressed => Event::KeyPress { key },
                        ElementState::Released => Event::KeyRelease { key },
                    });
                }
            }
            WindowEvent::RedrawRequested => {
                graphics.present(self.frame);
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.graphics.is_none() {
            return;
        }

        let now = Instant::now();
        if now >= self.next_tick {
            let events = std::mem::take(&mut self.events);
            if let Err(e) = self.frame.tick(events) {
                self.fail(event_loop, anyhow::Error::new(e).context("frame tick failed"));
                return;
            }
            if !self.frame.is_running() {
                event_loop.exit();
                return;
            }
            if let Some(graphics) = &self.graphics {
                graphics.window.request_redraw();
            }

            // Skip missed ticks instead of bursting to catch up
            self.next_tick += self.frame.tick_interval();
            if self.next_tick < now {
                self.next_tick = now + self.frame.tick_interval();
            }
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_tick));
    }
}
