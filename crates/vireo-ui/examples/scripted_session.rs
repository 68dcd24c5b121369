//! Headless session: builds a small settings window, replays scripted input
//! and logs the resulting render list.
//!
//! Run with `RUST_LOG=debug` to see focus and routing decisions, or set
//! `VIREO_PROFILE=1` to serve puffin scopes on the default address.

use vireo_core::config::{Config, ProfilingMode};
use vireo_core::geometry::Rect;
use vireo_core::math::Vec2;
use vireo_core::profiling;
use vireo_input::KeyCode;
use vireo_test_utils::EventScript;
use vireo_ui::{
    Button, Dialog, DialogResult, GuiContext, Page, PropertyGrid, PropertyValue, RenderInfo,
    Slider, TabControl, ViewportId,
};

fn main() {
    let mut config = Config::default();
    if std::env::var_os("VIREO_PROFILE").is_some() {
        config.profiling = ProfilingMode::WithWebserver;
    }
    vireo_core::init(&config);

    let mut ui = GuiContext::new();
    let dialog = ui.add_root(
        Dialog::new("Settings")
            .with_bounds(Rect::new(50.0, 50.0, 420.0, 360.0))
            .on_close(|result| tracing::info!("Settings closed with {:?}", result)),
    );

    let tabs = ui
        .add_child(
            dialog,
            TabControl::new().with_bounds(Rect::new(60.0, 90.0, 400.0, 260.0)),
        )
        .expect("dialog exists");
    let content = ui
        .get::<TabControl>(tabs)
        .map(|t| t.content_rect())
        .expect("tab control exists");

    let general = ui
        .add_child(tabs, Page::new("General").with_bounds(content))
        .expect("tab control exists");
    ui.add_child(
        general,
        Slider::new(0.0, 100.0)
            .with_value(40.0)
            .with_bounds(Rect::new(content.x + 10.0, content.y + 40.0, 200.0, 20.0))
            .on_change(|v| tracing::info!("Volume: {v:.0}")),
    );
    ui.add_child(
        general,
        Button::new("Reset").with_bounds(Rect::new(content.x + 10.0, content.y + 70.0, 80.0, 24.0)),
    );

    let advanced = ui
        .add_child(
            tabs,
            PropertyGrid::new().with_bounds(content).on_property_changed(|id, value| {
                tracing::info!("Property {id} = {}", value.format())
            }),
        )
        .expect("tab control exists");
    ui.with_widget::<PropertyGrid, _>(advanced, |grid| {
        let render = grid.add_category("Rendering");
        grid.add_property(render, "VSync", PropertyValue::Bool(true));
        grid.add_property(render, "Max FPS", PropertyValue::Int(144));
    });

    let ok = ui.with_widget::<Dialog, _>(dialog, |d| {
        let ok = d.add_button("OK", DialogResult::Ok);
        d.add_button("Cancel", DialogResult::Cancelled);
        d.open();
        ok
    });
    ui.with_widget::<TabControl, _>(tabs, |t| {
        t.add_tab_with_page("General", general);
        t.add_tab_with_page("Advanced", advanced);
    });

    let slider_y = content.y + 50.0;
    let script = EventScript::new()
        .drag(
            Vec2::new(content.x + 90.0, slider_y),
            Vec2::new(content.x + 150.0, slider_y),
            4,
        )
        .key(KeyCode::Tab)
        .key(KeyCode::Tab);
    let mut batch = script.into_batch();
    ui.handle_events(ViewportId::MAIN, &mut batch);
    tracing::info!("{} events left unconsumed", batch.len());
    profiling::new_frame();

    for entry in ui.render_list(ViewportId::MAIN) {
        let detail = match &entry.info {
            RenderInfo::Slider(info) => format!("value {:.0}", info.value),
            RenderInfo::TabControl(info) => format!("{} tabs", info.tabs.len()),
            RenderInfo::Dialog(info) => format!("title '{}'", info.title),
            _ => String::new(),
        };
        tracing::info!(
            "{:indent$}{:?} {} at {:?} {}",
            "",
            entry.kind,
            entry.id,
            entry.bounds,
            detail,
            indent = entry.depth * 2
        );
    }

    if let Some(ok) = ok {
        let ok_rect = ui.get::<Dialog>(dialog).and_then(|d| d.button_rect(ok));
        if let Some(rect) = ok_rect {
            let mut batch = EventScript::new()
                .click(rect.center().x, rect.center().y)
                .into_batch();
            ui.handle_events(ViewportId::MAIN, &mut batch);
        }
    }
    profiling::new_frame();
}
