//! Midnight Pulse - An audio-reactive particle cloud
//!
//! Two thousand metallic shapes float on a spherical shell. Once listening,
//! bass pushes them outward and every particle spins and swells with its own
//! slice of the spectrum.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use midnight_pulse::audio::AudioSession;
use midnight_pulse::camera::OrbitCamera;
use midnight_pulse::cli::Args;
use midnight_pulse::params::*;
use midnight_pulse::particles::ParticleScene;
use midnight_pulse::rendering::{RenderSystem, SceneUniforms};

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Simulation systems
    scene: ParticleScene,
    camera: OrbitCamera,
    audio: AudioSession,

    // Configuration
    render_config: RenderConfig,
    bloom: BloomConfig,
    listen_on_start: bool,

    // Input state
    dragging: bool,
    cursor: Option<(f64, f64)>,

    // Time tracking
    start_time: Instant,
    last_frame: Instant,
}

impl App {
    fn new(args: &Args) -> Result<Self> {
        let scene = ParticleScene::new(&args.scene_config())?;
        let audio = AudioSession::new(args.signal_input(), args.analyser_config())?;
        let camera = OrbitCamera::new(OrbitCameraParams::default());

        let now = Instant::now();
        Ok(Self {
            window: None,
            render_system: None,
            scene,
            camera,
            audio,
            render_config: RenderConfig::default(),
            bloom: args.bloom_config(),
            listen_on_start: args.listen,
            dragging: false,
            cursor: None,
            start_time: now,
            last_frame: now,
        })
    }

    /// Start or stop listening; device failures leave the session stopped
    fn toggle_listening(&mut self) {
        if let Err(e) = self.audio.toggle() {
            error!(input = %self.audio.input(), "Failed to start audio: {}", e);
        }
        self.update_title();
    }

    fn adjust_bloom(&mut self, param: BloomParam, steps: i32) {
        let value = self.bloom.step(param, steps);
        info!(?param, value, "Bloom adjusted");

        if let Some(render_system) = &mut self.render_system {
            render_system.update_bloom(self.bloom);
        }
    }

    fn update_title(&self) {
        let Some(window) = &self.window else {
            return;
        };

        let state = if self.audio.is_listening() {
            format!("listening ({})", self.audio.input())
        } else {
            "idle, press Space to listen".to_string()
        };
        window.set_title(&format!("Midnight Pulse | {}", state));
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, code: KeyCode) {
        match code {
            KeyCode::Escape => event_loop.exit(),
            KeyCode::Space => self.toggle_listening(),
            KeyCode::KeyQ => self.adjust_bloom(BloomParam::Intensity, 1),
            KeyCode::KeyA => self.adjust_bloom(BloomParam::Intensity, -1),
            KeyCode::KeyW => self.adjust_bloom(BloomParam::Threshold, 1),
            KeyCode::KeyS => self.adjust_bloom(BloomParam::Threshold, -1),
            KeyCode::KeyE => self.adjust_bloom(BloomParam::Radius, 1),
            KeyCode::KeyD => self.adjust_bloom(BloomParam::Radius, -1),
            _ => {}
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        let window_attributes = Window::default_attributes()
            .with_title("Midnight Pulse")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let render_system = match pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            &self.scene,
            self.bloom,
        )) {
            Ok(render_system) => render_system,
            Err(e) => {
                error!("Failed to initialize renderer: {}", e);
                event_loop.exit();
                return;
            }
        };

        let (width, height) = render_system.size();
        self.render_config.window_width = width;
        self.render_config.window_height = height;

        info!(
            particles = self.scene.particle_count(),
            "Midnight Pulse is running (Space: listen, Q/A W/S E/D: bloom, Esc: quit)"
        );

        self.window = Some(window);
        self.render_system = Some(render_system);

        if self.listen_on_start {
            self.toggle_listening();
        }
        self.update_title();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(code),
                        repeat: false,
                        ..
                    },
                ..
            } => self.handle_key(event_loop, code),
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.dragging = state == ElementState::Pressed;
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let (true, Some((x, y))) = (self.dragging, self.cursor) {
                    self.camera
                        .drag((position.x - x) as f32, (position.y - y) as f32);
                }
                self.cursor = Some((position.x, position.y));
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / 40.0,
                };
                self.camera.zoom(lines);
            }
            WindowEvent::Resized(size) => {
                if let Some(render_system) = &mut self.render_system {
                    render_system.resize(size.width, size.height);
                }
                if size.width > 0 && size.height > 0 {
                    self.render_config.window_width = size.width;
                    self.render_config.window_height = size.height;
                }
            }
            WindowEvent::RedrawRequested => {
                self.render_frame(event_loop);
            }
            _ => {}
        }
    }
}

impl App {
    /// Render a single frame
    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let dt_s = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        let time_s = (now - self.start_time).as_secs_f32();

        // Audio snapshot for this frame (silent when stopped or unavailable)
        let audio = self.audio.sample_frame();

        self.scene.update(time_s, &audio);
        self.camera.update(dt_s, audio.listening);

        let Some(render_system) = &mut self.render_system else {
            return;
        };

        let (view_proj, camera_pos) = self.camera.create_view_proj_matrix(&self.render_config);
        let uniforms = SceneUniforms::new(
            view_proj,
            self.scene.group_frame(time_s),
            camera_pos,
            time_s,
        );
        render_system.update_uniforms(&uniforms);

        for (index, group) in self.scene.groups().iter().enumerate() {
            render_system.update_instances(index, group.instances());
        }

        match render_system.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (width, height) = render_system.size();
                render_system.resize(width, height);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("GPU out of memory");
                event_loop.exit();
            }
            Err(e) => warn!("Render error: {:?}", e),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    info!(input = %args.signal_input(), "Midnight Pulse initializing");

    let mut app = App::new(&args)?;
    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    event_loop.run_app(&mut app).context("Event loop terminated")?;

    Ok(())
}
