use rgenstudio::{logger, GeneratorConfig, ImagePickerAndGenerator, MemoryView, Style};
use std::env;
use std::sync::Arc;

const USAGE: &str = "usage: rgenstudio [--style <style>] [--image <path>] [prompt words...]";

#[derive(Debug, Default)]
struct Invocation {
    prompt: String,
    style: Option<String>,
    image: Option<String>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Invocation, String> {
    let mut invocation = Invocation::default();
    let mut words = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--style" | "-s" => {
                invocation.style = Some(args.next().ok_or("--style needs a value")?);
            }
            "--image" | "-i" => {
                invocation.image = Some(args.next().ok_or("--image needs a path")?);
            }
            "--help" | "-h" => return Err(USAGE.to_string()),
            _ => words.push(arg),
        }
    }

    invocation.prompt = words.join(" ");
    Ok(invocation)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenv::dotenv().is_ok();
    logger::init_with_config(logger::LoggerConfig::from_env())?;
    if !dotenv_loaded {
        log::debug!("No .env file found, using system environment variables");
    }
    logger::log_startup_info(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let invocation = match parse_args(env::args().skip(1)) {
        Ok(invocation) => invocation,
        Err(message) => {
            eprintln!("{}", message);
            std::process::exit(2);
        }
    };

    let config = GeneratorConfig::from_env();
    logger::log_config_info(&config);

    let style = invocation
        .style
        .or_else(|| config.default_style.clone())
        .unwrap_or_else(|| Style::default().to_string());
    let view = Arc::new(MemoryView::with_inputs(invocation.prompt, style));
    let controller = ImagePickerAndGenerator::from_config(view.clone(), &config)?;

    if let Some(path) = &invocation.image {
        controller.on_picker_activated();
        controller.select_path(path).await?;
    }

    let outcome = controller.generate().await;

    let mut state = view.snapshot();
    // Data URIs make the printed state unreadable.
    if let Some(src) = state.preview_src.as_mut() {
        *src = format!("<{} bytes of preview data>", src.len());
    }
    if let Some(original) = state.original_panel.as_mut() {
        if original.starts_with("data:") {
            *original = "<selected image>".to_string();
        }
    }
    println!("{}", serde_json::to_string_pretty(&state)?);

    match outcome {
        Ok(url) => {
            log::info!("🎨 Generated image: {}", url);
            Ok(())
        }
        Err(e) => {
            log::error!("❌ Generation did not complete: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_parse_prompt_and_flags() {
        let invocation =
            parse_args(args(&["--style", "anime", "a", "red", "fox", "-i", "fox.png"])).unwrap();
        assert_eq!(invocation.prompt, "a red fox");
        assert_eq!(invocation.style.as_deref(), Some("anime"));
        assert_eq!(invocation.image.as_deref(), Some("fox.png"));
    }

    #[test]
    fn test_parse_missing_value() {
        assert!(parse_args(args(&["--image"])).is_err());
    }

    #[test]
    fn test_parse_empty_prompt() {
        let invocation = parse_args(args(&[])).unwrap();
        assert!(invocation.prompt.is_empty());
        assert!(invocation.style.is_none());
    }
}
