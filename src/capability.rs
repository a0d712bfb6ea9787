//! Hardware-3D capability probe.
//!
//! The engine calls [`detect`] exactly once per mount and caches the
//! result for its lifetime. A failed probe routes rendering to the static
//! gradient fallback; it is never retried.

/// Probe for a hardware-accelerated 3D adapter.
///
/// Requests a high-performance, non-forced-fallback adapter from a
/// throwaway [`wgpu::Instance`]. Returns `true` iff the request succeeds
/// and the adapter is not a CPU/software rasterizer. The probe has no
/// side effects beyond the discarded instance.
pub async fn detect() -> bool {
    let instance = wgpu::Instance::default();
    let request = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            force_fallback_adapter: false,
            compatible_surface: None,
        })
        .await;

    match request {
        Ok(adapter) => {
            let info = adapter.get_info();
            log::debug!(
                "capability probe: {} ({:?})",
                info.name,
                info.device_type
            );
            info.device_type != wgpu::DeviceType::Cpu
        }
        Err(e) => {
            log::info!("capability probe failed: {e}");
            false
        }
    }
}
