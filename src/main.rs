use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use handwrite_gen::layout::LayoutOptions;
use handwrite_gen::{Editor, Font, FontFamily, ImageFormat, LoadOutcome, PDF_FILE_NAME};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "handwrite")]
#[command(about = "Write text out as handwritten pages", version)]
struct Cli {
    /// File with the text to write, or `-` to read it from stdin
    #[arg(value_name = "INPUT")]
    input: String,
    /// JSON file with layout options
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,
    /// Directory holding bundled faces, named by font id or family name
    /// (`caveat.ttf`, `HomemadeApple.otf`, ...)
    #[arg(long, value_name = "DIR")]
    font_dir: Option<PathBuf>,
    /// A custom TrueType or OpenType font to write with
    #[arg(long, value_name = "FILE")]
    font_file: Option<PathBuf>,
    /// Image to use as the paper
    #[arg(long, value_name = "FILE")]
    background: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Png)]
    format: OutputFormat,
    #[arg(long, value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,
    /// Seed for the handwriting jitter, for reproducible pages
    #[arg(long)]
    seed: Option<u64>,
    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Png,
    Jpeg,
    Pdf,
}

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let text = read_input(&cli.input)?;
    let options = match &cli.options {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read options from {}", path.display()))?;
            LayoutOptions::from_json(&json)
                .with_context(|| format!("failed to parse options in {}", path.display()))?
        }
        None => LayoutOptions::default(),
    };

    let mut editor = Editor::new(cli.seed);
    editor.set_options(options);
    if let Some(dir) = &cli.font_dir {
        load_font_dir(&mut editor, dir)?;
    }
    if let Some(path) = &cli.font_file {
        let bytes = fs::read(path)
            .with_context(|| format!("failed to read font {}", path.display()))?;
        if editor.load_custom_font(bytes) == LoadOutcome::FellBack {
            warn!(path = %path.display(), "custom font unusable, writing with the default font");
        }
    }
    if let Some(path) = &cli.background {
        let bytes = fs::read(path)
            .with_context(|| format!("failed to read background {}", path.display()))?;
        if editor.load_background(&bytes) == LoadOutcome::FellBack {
            warn!(path = %path.display(), "background unusable, using the paper colour");
        }
    }
    editor.set_text(text);
    info!(pages = editor.page_count(), "laid out text");

    let document = editor.export_document().context("failed to render pages")?;
    fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("failed to create {}", cli.out_dir.display()))?;

    let written = match cli.format {
        OutputFormat::Pdf => {
            let path = cli.out_dir.join(PDF_FILE_NAME);
            let file = fs::File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            document
                .write_pdf(std::io::BufWriter::new(file))
                .context("failed to write pdf")?;
            vec![path]
        }
        OutputFormat::Png => document
            .write_images(&cli.out_dir, ImageFormat::Png)
            .context("failed to write images")?,
        OutputFormat::Jpeg => document
            .write_images(&cli.out_dir, ImageFormat::Jpeg)
            .context("failed to write images")?,
    };

    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read text from stdin")?;
        Ok(text)
    } else {
        fs::read_to_string(input).with_context(|| format!("failed to read {input}"))
    }
}

fn load_font_dir(editor: &mut Editor, dir: &Path) -> Result<()> {
    for family in FontFamily::ALL {
        if family == FontFamily::CustomFont {
            continue;
        }
        let Some(path) = [family.id(), family.display_name()]
            .iter()
            .flat_map(|name| ["ttf", "otf"].map(|ext| dir.join(format!("{name}.{ext}"))))
            .find(|path| path.is_file())
        else {
            continue;
        };
        let bytes = fs::read(&path).with_context(|| format!("failed to read {}", path.display()))?;
        let font = Font::load(bytes).with_context(|| format!("failed to parse {}", path.display()))?;
        info!(%family, path = %path.display(), "loaded font");
        editor.fonts_mut().insert(family, font);
    }
    if editor.fonts().is_empty() {
        warn!(dir = %dir.display(), "no fonts found, pages will be left unwritten");
    }
    Ok(())
}
