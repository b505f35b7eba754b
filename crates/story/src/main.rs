mod config;
mod editor_panel;
mod editors_pick;

use anyhow::Result;
use editors_pick_components::ComponentAssets;
use gpui::*;
use gpui_component::Root;
use tracing_subscriber::EnvFilter;

use crate::config::StoryConfig;
use crate::editors_pick::EditorsPickStory;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = StoryConfig::load()?;
    tracing::info!(tab = config.initial_tab, "starting");

    let app = Application::new().with_assets(ComponentAssets);

    app.run(move |cx| {
        gpui_component::init(cx);
        cx.activate(true);

        cx.spawn(async move |cx| {
            let title = config.window_title.clone();
            cx.open_window(
                WindowOptions {
                    titlebar: Some(TitlebarOptions {
                        title: Some(title.into()),
                        appears_transparent: false,
                        traffic_light_position: None,
                    }),
                    ..Default::default()
                },
                move |window, cx| {
                    let view = EditorsPickStory::view(config, window, cx);
                    cx.new(|cx| Root::new(view, window, cx))
                },
            )?;

            Ok::<_, anyhow::Error>(())
        })
        .detach();
    });

    Ok(())
}
