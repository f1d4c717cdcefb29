use anyhow::Result;

use crate::core::{App, AppControl, FrameCtx};
use crate::device::Gpu;
use crate::input::Key;
use crate::render::{RenderCtx, SpritePipeline, WgpuBackend};

use super::aquarium::Aquarium;
use super::config::AquariumConfig;

/// Frames between periodic frame-rate traces.
const STATS_INTERVAL: u64 = 600;

struct TankState {
    pipeline: SpritePipeline,
    aquarium: Aquarium<WgpuBackend>,
}

/// The fish tank application: builds the sprite pipeline and aquarium once the
/// GPU is ready, then animates and draws one aquarium frame per redraw.
///
/// Escape exits; arrow keys steer the main fish.
pub struct FishTank {
    config: AquariumConfig,
    state: Option<TankState>,
}

impl FishTank {
    pub fn new(config: AquariumConfig) -> Self {
        Self {
            config,
            state: None,
        }
    }
}

impl Default for FishTank {
    fn default() -> Self {
        Self::new(AquariumConfig::default())
    }
}

impl App for FishTank {
    fn on_gpu_ready(&mut self, gpu: &Gpu<'_>) -> Result<()> {
        let info = gpu.adapter_info();
        log::info!("adapter: {} ({:?})", info.name, info.backend);

        let ctx = RenderCtx::new(
            gpu.device(),
            gpu.queue(),
            gpu.surface_format(),
            gpu.sample_count(),
        );
        let pipeline = SpritePipeline::new(&ctx);
        let backend = WgpuBackend::new(ctx.device, ctx.queue, pipeline.bind_group_layout());
        let aquarium = Aquarium::new(backend, self.config.clone());

        log::info!(
            "aquarium ready: {} fish, {:?} transforms, {}x msaa, {:?}",
            aquarium.len(),
            self.config.transforms,
            ctx.sample_count,
            ctx.surface_format,
        );

        self.state = Some(TankState { pipeline, aquarium });
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input.key_down(Key::Escape) {
            return AppControl::Exit;
        }

        let Some(state) = self.state.as_mut() else {
            return AppControl::Continue;
        };

        let input = ctx.input.directional();
        let clear = self.config.clear_color.into();
        let time = ctx.time;

        ctx.render(clear, |target| {
            let mut pass = target.begin_pass("shoal aquarium");
            pass.set_pipeline(state.pipeline.pipeline());
            let stats = state.aquarium.draw_frame(input, &mut pass);

            if time.frame_index % STATS_INTERVAL == 0 {
                log::trace!(
                    "frame {}: {} fish, {} draws, {} bind groups, {:.1} fps",
                    time.frame_index,
                    stats.fish,
                    stats.draw_calls,
                    stats.bind_groups,
                    1.0 / time.dt.max(f32::EPSILON),
                );
            }
        })
    }
}
