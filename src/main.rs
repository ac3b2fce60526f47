use tracing_subscriber::EnvFilter;

mod app;
mod config;

mod domain {
    pub mod entities {
        pub mod campaign;
        pub mod raw;
        pub mod table;
        pub mod view;
    }
    pub mod sample;
}

mod infra {
    pub mod export {
        pub mod csv;
        pub mod xlsx;
    }
    pub mod import {
        pub mod csv;
        pub mod xlsx;
    }
    pub mod memory {
        pub mod store;
    }
}

mod platform {
    pub mod desktop {
        pub mod blocking;
    }
}

mod ui {
    pub mod format;
    pub mod state {
        pub mod app_state;
    }
}

mod usecase {
    pub mod normalize;
    pub mod ports {
        pub mod store;
    }
    pub mod services {
        pub mod aggregate_service;
        pub mod export_service;
        pub mod import_service;
        pub mod query_service;
    }
}

#[cfg(test)]
mod tests;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn main() {
    init_logging();

    let webview_data_dir = config::default_webview_data_dir()
        .expect("should resolve and create WebView2 data directory");
    tracing::info!(dir = %webview_data_dir.display(), "starting dashboard");

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(dioxus::desktop::WindowBuilder::new().with_title(config::WINDOW_TITLE))
                .with_data_directory(webview_data_dir),
        )
        .launch(app::App);
}
