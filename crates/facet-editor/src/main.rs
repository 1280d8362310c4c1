//! Facet main entry point

fn main() -> eframe::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "facet_editor=debug,facet_renderer=info,facet_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Facet");

    let wgpu_options = egui_wgpu::WgpuConfiguration {
        wgpu_setup: egui_wgpu::WgpuSetup::CreateNew {
            supported_backends: wgpu::Backends::PRIMARY | wgpu::Backends::GL,
            power_preference: wgpu::PowerPreference::HighPerformance,
            device_descriptor: std::sync::Arc::new(|adapter| {
                // Triangle ids come from the rasterizer when available.
                let required_features = adapter.features() & wgpu::Features::SHADER_PRIMITIVE_INDEX;
                wgpu::DeviceDescriptor {
                    label: Some("facet device"),
                    required_features,
                    required_limits: wgpu::Limits::downlevel_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: wgpu::MemoryHints::default(),
                }
            }),
        },
        ..Default::default()
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1600.0, 900.0])
            .with_min_inner_size([960.0, 600.0])
            .with_title("Facet"),
        wgpu_options,
        ..Default::default()
    };

    eframe::run_native(
        "facet",
        native_options,
        Box::new(|cc| Ok(Box::new(facet_editor::FacetApp::new(cc)))),
    )
}
