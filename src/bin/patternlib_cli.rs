//! Patternlib CLI - Bridge interface for template tooling
//!
//! Commands: src, srcset, image, modifier, attrs, youtube-id, roots
//! Outputs JSON to stdout, logs to stderr
//! Returns non-zero on invalid payload or build failure

use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use patternlib_core::{
    build_attribute_string_from_map, build_image_sources, build_image_src, build_image_srcset,
    with_modifier, youtube_id, HostedImage, ImageError, PatternlibConfig, TransformConfig,
};

#[derive(Parser)]
#[command(name = "patternlib-cli")]
#[command(about = "Patternlib CLI - Template helper functions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the src URL for an image
    Src {
        /// JSON payload (HostedImage)
        #[arg(short, long)]
        asset: String,

        /// JSON payload (TransformConfig)
        #[arg(short, long)]
        transform: String,
    },

    /// Build the srcset attribute for an image
    Srcset {
        /// JSON payload (HostedImage)
        #[arg(short, long)]
        asset: String,

        /// JSON payload (TransformConfig)
        #[arg(short, long)]
        transform: String,
    },

    /// Build both src and srcset for an image
    Image {
        /// JSON payload (HostedImage)
        #[arg(short, long)]
        asset: String,

        /// JSON payload (TransformConfig)
        #[arg(short, long)]
        transform: String,
    },

    /// Build a class list with BEM modifiers
    Modifier {
        /// Base class
        class: String,

        /// Modifiers
        modifiers: Vec<String>,
    },

    /// Build an HTML attribute string
    Attrs {
        /// JSON object of attributes
        #[arg(short, long)]
        payload: String,
    },

    /// Extract a YouTube video id
    YoutubeId {
        url: String,
    },

    /// List template roots
    Roots,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn failure(message: String) -> ExitCode {
    println!("{}", json!({"success": false, "error": message}));
    ExitCode::FAILURE
}

fn parse_image(
    config: &PatternlibConfig,
    asset: &str,
    transform: &str,
) -> Result<(HostedImage, TransformConfig), String> {
    let mut asset: Value =
        serde_json::from_str(asset).map_err(|e| format!("Invalid asset payload: {}", e))?;
    // Asset payloads without an explicit style follow the configured one
    if let Some(obj) = asset.as_object_mut() {
        if !obj.contains_key("style") {
            obj.insert("style".to_string(), json!(config.url_style));
        }
    }
    let asset: HostedImage =
        serde_json::from_value(asset).map_err(|e| format!("Invalid asset payload: {}", e))?;
    let transform: TransformConfig = serde_json::from_str(transform)
        .map_err(|e| format!("Invalid transform payload: {}", e))?;
    Ok((asset, transform))
}

fn emit_image<T: serde::Serialize>(key: &str, result: Result<T, ImageError>) -> ExitCode {
    match result {
        Ok(value) => {
            println!("{:#}", json!({"success": true, key: value}));
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("{}", json!({"success": false, "error": e.to_string()}));
            ExitCode::from(2) // Build failure
        }
    }
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match PatternlibConfig::load_from_file(path) {
            Ok(c) => c,
            Err(e) => return failure(format!("Failed to load config: {}", e)),
        },
        None => PatternlibConfig::default(),
    };

    match cli.command {
        Commands::Src { asset, transform } => match parse_image(&config, &asset, &transform) {
            Ok((asset, transform)) => emit_image("src", build_image_src(&asset, &transform)),
            Err(e) => failure(e),
        },

        Commands::Srcset { asset, transform } => match parse_image(&config, &asset, &transform) {
            Ok((asset, transform)) => emit_image("srcset", build_image_srcset(&asset, &transform)),
            Err(e) => failure(e),
        },

        Commands::Image { asset, transform } => match parse_image(&config, &asset, &transform) {
            Ok((asset, transform)) => emit_image("image", build_image_sources(&asset, &transform)),
            Err(e) => failure(e),
        },

        Commands::Modifier { class, modifiers } => {
            println!("{:#}", json!({"success": true, "class": with_modifier(&class, &modifiers)}));
            ExitCode::SUCCESS
        }

        Commands::Attrs { payload } => {
            let input: Value = match serde_json::from_str(&payload) {
                Ok(v) => v,
                Err(e) => return failure(format!("Invalid payload: {}", e)),
            };
            // Anything but an object renders as no attributes
            let attributes = input
                .as_object()
                .map(build_attribute_string_from_map)
                .unwrap_or_default();
            println!("{:#}", json!({"success": true, "attributes": attributes}));
            ExitCode::SUCCESS
        }

        Commands::YoutubeId { url } => {
            println!("{:#}", json!({"success": true, "id": youtube_id(&url)}));
            ExitCode::SUCCESS
        }

        Commands::Roots => {
            let roots: Vec<_> = config
                .template_roots()
                .list()
                .into_iter()
                .map(|(alias, path)| json!({"alias": alias, "path": path.display().to_string()}))
                .collect();
            println!("{:#}", json!({"success": true, "roots": roots}));
            ExitCode::SUCCESS
        }
    }
}
