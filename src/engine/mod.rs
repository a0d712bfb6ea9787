//! The backdrop rendering engine.
//!
//! One engine per mount. Construction probes 3D capability exactly once
//! and either assembles the animated scene (population, camera rig,
//! light rig, pipelines) or the static gradient fallback. Dropping the
//! engine releases every GPU resource and tracker it owns — that is the
//! whole teardown contract; nothing survives across remounts.

mod sync;

use web_time::Instant;

use crate::camera::CameraRig;
use crate::capability;
use crate::error::BackdropError;
use crate::input::{InputEvent, InputState};
use crate::options::Options;
use crate::render::{
    FallbackRenderer, LineRenderer, Lighting, MeshRenderer,
    ParticleRenderer, RenderContext,
};
use crate::scene::{animate, Scene};
use crate::util::frame_timing::FrameTiming;
use crate::viewport::{classify, ViewportClass};
use self::sync::MotifBinding;

/// Frame cap for the animated mode (0 = unlimited). Presentation is
/// vsync-paced anyway; this only bounds runaway uncapped surfaces.
const TARGET_FPS: u32 = 300;

/// Everything the animated mode owns beyond the shared context.
struct AnimatedState {
    scene: Scene,
    bindings: Vec<MotifBinding>,
    rig: CameraRig,
    lighting: Lighting,
    mesh_renderer: MeshRenderer,
    line_renderer: LineRenderer,
    particle_renderer: ParticleRenderer,
    depth_view: wgpu::TextureView,
}

/// Which of the two render paths owns the surface.
enum Mode {
    /// Full animated scene.
    Animated(Box<AnimatedState>),
    /// Static gradient; no scene objects, no frame subscription.
    Fallback(FallbackRenderer),
}

/// The core rendering engine for the animated backdrop.
///
/// # Frame loop
///
/// Each frame, call [`render`](Self::render) to advance and present.
/// Call [`resize`](Self::resize) when the surface size changes and
/// forward pointer/wheel events via [`handle_input`](Self::handle_input).
/// In fallback mode [`is_animated`](Self::is_animated) returns `false`
/// and the host should stop requesting continuous redraws.
pub struct BackdropEngine {
    /// Core wgpu device, queue, and surface.
    pub context: RenderContext,
    options: Options,
    input: InputState,
    frame_timing: FrameTiming,
    started: Instant,
    scale_factor: f64,
    mode: Mode,
}

impl BackdropEngine {
    /// Create an engine on the given surface.
    ///
    /// Probes hardware-3D capability once; the result is cached for the
    /// engine's lifetime and never re-probed. A failed probe selects the
    /// fallback gradient and constructs zero scene objects.
    ///
    /// # Errors
    ///
    /// Returns [`BackdropError`] if GPU initialization fails outright
    /// (not even the fallback can draw without a device).
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        scale_factor: f64,
        options: Options,
    ) -> Result<Self, BackdropError> {
        let capable = capability::detect().await;
        let context = RenderContext::new(window, size).await?;

        let mut input = InputState::new();
        input.set_viewport(
            size.0 as f32,
            size.1 as f32,
            options.scene.scroll_pages,
        );

        let mode = if capable {
            let class = classify(logical_width(size.0, scale_factor));
            log::info!("animated backdrop: {class:?} viewport");
            Mode::Animated(Box::new(AnimatedState::new(
                &context, &options, class,
            )))
        } else {
            log::info!("no hardware 3D: static fallback backdrop");
            Mode::Fallback(FallbackRenderer::new(&context, &options.colors))
        };

        Ok(Self {
            context,
            options,
            input,
            frame_timing: FrameTiming::new(TARGET_FPS),
            started: Instant::now(),
            scale_factor,
            mode,
        })
    }

    /// Whether the animated scene (rather than the fallback) is active.
    #[must_use]
    pub fn is_animated(&self) -> bool {
        matches!(self.mode, Mode::Animated(_))
    }

    /// Scene object count (0 in fallback mode).
    #[must_use]
    pub fn object_count(&self) -> usize {
        match &self.mode {
            Mode::Animated(state) => state.scene.object_count(),
            Mode::Fallback(_) => 0,
        }
    }

    /// Runtime options in effect.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.frame_timing.fps()
    }

    /// Forward a platform-agnostic input event to the trackers.
    pub fn handle_input(&mut self, event: InputEvent) {
        self.input.handle_event(event);
    }

    /// Track a DPI scale change (affects viewport classification only).
    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.scale_factor = scale_factor;
    }

    /// Resize the surface, re-measure the trackers and reclassify the
    /// viewport; a class change rebuilds the scene population.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(width, height);
        self.input.set_viewport(
            width as f32,
            height as f32,
            self.options.scene.scroll_pages,
        );

        if let Mode::Animated(state) = &mut self.mode {
            state.depth_view = self.context.create_depth_view();
            state.rig.resize(width, height);

            let class = classify(logical_width(width, self.scale_factor));
            if class != state.scene.class() {
                log::info!("viewport reclassified: {class:?}");
                state.scene = Scene::populate(class, &self.options.scene);
                state.bindings =
                    sync::build_bindings(&self.context, &state.scene);
            }
        }
    }

    /// Advance the animation and draw one frame.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] when the swapchain needs to be
    /// reconfigured (lost/outdated) — resize and retry next frame.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        if !self.frame_timing.should_render() {
            return Ok(());
        }

        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.context.create_encoder();

        match &mut self.mode {
            Mode::Fallback(fallback) => fallback.draw(&mut encoder, &view),
            Mode::Animated(state) => {
                let t = self.started.elapsed().as_secs_f32();
                let sample = self.input.sample();

                state.rig.advance(&sample, &self.options.camera);
                state.rig.update_gpu(&self.context.queue);
                animate::advance(&mut state.scene, t);
                sync::sync(
                    &state.scene,
                    &mut state.bindings,
                    &self.context.queue,
                    &self.options.colors,
                );

                state.record_pass(&mut encoder, &view, &self.options);
            }
        }

        self.context.submit(encoder);
        frame.present();
        self.frame_timing.end_frame();
        Ok(())
    }
}

impl AnimatedState {
    /// Build the population, camera/light rigs, pipelines and bindings.
    fn new(
        context: &RenderContext,
        options: &Options,
        class: ViewportClass,
    ) -> Self {
        let scene = Scene::populate(class, &options.scene);
        let rig = CameraRig::new(context, &options.camera);
        let lighting =
            Lighting::new(context, &options.lighting, &options.colors);

        let mesh_renderer =
            MeshRenderer::new(context, &rig.layout, &lighting.layout);
        let line_renderer =
            LineRenderer::new(context, &rig.layout, &lighting.layout);
        let particle_renderer =
            ParticleRenderer::new(context, &rig.layout, &options.colors);

        let bindings = sync::build_bindings(context, &scene);
        let depth_view = context.create_depth_view();

        log::debug!("population: {} objects", scene.object_count());

        Self {
            scene,
            bindings,
            rig,
            lighting,
            mesh_renderer,
            line_renderer,
            particle_renderer,
            depth_view,
        }
    }

    /// Record the scene pass.
    fn record_pass(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        options: &Options,
    ) {
        let bg = options.colors.background;
        let mut pass =
            encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: f64::from(bg[0]),
                            g: f64::from(bg[1]),
                            b: f64::from(bg[2]),
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(
                    wgpu::RenderPassDepthStencilAttachment {
                        view: &self.depth_view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    },
                ),
                ..Default::default()
            });

        sync::draw(
            &mut pass,
            &self.bindings,
            &self.mesh_renderer,
            &self.line_renderer,
            &self.particle_renderer,
            &self.rig.bind_group,
            &self.lighting.bind_group,
        );
    }
}

/// Physical width to logical width for viewport classification.
fn logical_width(width: u32, scale_factor: f64) -> f32 {
    (f64::from(width) / scale_factor.max(0.01)) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logical_width_divides_by_scale() {
        assert!((logical_width(1536, 2.0) - 768.0).abs() < 1e-3);
        assert!((logical_width(1200, 1.0) - 1200.0).abs() < 1e-3);
    }

    #[test]
    fn classification_of_logical_width_drives_population() {
        // 1536 physical at 2x scale is exactly the compact breakpoint.
        assert_eq!(
            classify(logical_width(1536, 2.0)),
            ViewportClass::Full
        );
        assert_eq!(
            classify(logical_width(1535, 2.0)),
            ViewportClass::Compact
        );
    }
}
