use serde::Serialize;
use serde_json::Value;
use squarify_core::shape;
use squarify_render::TreemapOptions;
use std::io::Read;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Render(squarify_render::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<squarify_render::Error> for CliError {
    fn from(value: squarify_render::Error) -> Self {
        Self::Render(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Command {
    Shape,
    Layout,
    #[default]
    Render,
}

/// Command-line overrides; `None` keeps the config file (or default) value.
#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    config: Option<String>,
    out: Option<String>,
    pretty: bool,
    width: Option<f64>,
    height: Option<f64>,
    font_size: Option<f64>,
    border_color: Option<String>,
    fallback_color: Option<String>,
    sort_descending: bool,
    escape_labels: bool,
}

fn usage() -> &'static str {
    "squarify-cli\n\
\n\
USAGE:\n\
  squarify-cli [render] [OPTIONS] [--out <path>] [<path>|-]\n\
  squarify-cli layout [OPTIONS] [--pretty] [<path>|-]\n\
  squarify-cli shape [--pretty] [<path>|-]\n\
\n\
OPTIONS:\n\
  --config <path>            JSON config with a `treemap` section\n\
  --width <w>                canvas width (default 1024)\n\
  --height <h>               canvas height (default 768)\n\
  --font-size <n>            label font size (default 11)\n\
  --border-color <color>     cell stroke color (default #ffffff)\n\
  --fallback-color <color>   fill for unmapped color keys (default transparent)\n\
  --sort                     lay items out largest first\n\
  --escape-labels            XML-escape label text\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - Input is a JSON object of objects, e.g. {\"host1\": {\"high\": 12, \"low\": 3}}.\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
  - shape prints the retained items; layout prints the unpadded rectangles.\n\
  - Set RUST_LOG=debug to trace shaping and layout decisions on stderr.\n\
"
}

fn next_f64<'a>(it: &mut impl Iterator<Item = &'a String>) -> Result<f64, CliError> {
    let Some(v) = it.next() else {
        return Err(CliError::Usage(usage()));
    };
    v.parse::<f64>().map_err(|_| CliError::Usage(usage()))
}

fn next_string<'a>(it: &mut impl Iterator<Item = &'a String>) -> Result<String, CliError> {
    it.next().cloned().ok_or(CliError::Usage(usage()))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "shape" => args.command = Command::Shape,
            "layout" => args.command = Command::Layout,
            "render" => args.command = Command::Render,
            "--pretty" => args.pretty = true,
            "--sort" => args.sort_descending = true,
            "--escape-labels" => args.escape_labels = true,
            "--config" => args.config = Some(next_string(&mut it)?),
            "--out" => args.out = Some(next_string(&mut it)?),
            "--width" => args.width = Some(next_f64(&mut it)?),
            "--height" => args.height = Some(next_f64(&mut it)?),
            "--font-size" => args.font_size = Some(next_f64(&mut it)?),
            "--border-color" => args.border_color = Some(next_string(&mut it)?),
            "--fallback-color" => args.fallback_color = Some(next_string(&mut it)?),
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn build_options(args: &Args) -> Result<TreemapOptions, CliError> {
    let mut options = match args.config.as_deref() {
        Some(path) => {
            let cfg: Value = serde_json::from_str(&std::fs::read_to_string(path)?)?;
            TreemapOptions::from_config(&cfg)?
        }
        None => TreemapOptions::default(),
    };

    if let Some(w) = args.width {
        options.width = w;
    }
    if let Some(h) = args.height {
        options.height = h;
    }
    if let Some(size) = args.font_size {
        options.font_size = size;
    }
    if let Some(color) = &args.border_color {
        options.border_color = color.clone();
    }
    if let Some(color) = &args.fallback_color {
        options.fallback_color = color.clone();
    }
    options.sort_descending |= args.sort_descending;
    options.escape_labels |= args.escape_labels;

    options.validate()?;
    Ok(options)
}

fn run(args: Args) -> Result<(), CliError> {
    let options = build_options(&args)?;
    let text = read_input(args.input.as_deref())?;
    let data: Value = serde_json::from_str(&text)?;

    match args.command {
        Command::Shape => {
            let dataset = shape(&data);
            let dataset = if options.sort_descending {
                dataset.sorted_descending()
            } else {
                dataset
            };
            write_json(&dataset, args.pretty)
        }
        Command::Layout => {
            let rects = squarify_render::layout_rects(&data, &options)?;
            write_json(&rects, args.pretty)
        }
        Command::Render => {
            let svg = squarify_render::treemap(&data, &options)?;
            write_text(&svg, args.out.as_deref())
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    init_tracing();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        tracing::debug!(error = ?err, "squarify-cli failed");
        eprintln!("{err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        std::iter::once("squarify-cli")
            .chain(args.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn parse_args_defaults_to_render_from_stdin() {
        let args = parse_args(&argv(&[])).unwrap();
        assert_eq!(args.command, Command::Render);
        assert_eq!(args.input, None);
        assert!(!args.pretty);
    }

    #[test]
    fn parse_args_reads_overrides() {
        let args = parse_args(&argv(&[
            "layout",
            "--width",
            "90",
            "--height",
            "50.5",
            "--font-size",
            "9",
            "--border-color",
            "#000",
            "--sort",
            "hosts.json",
        ]))
        .unwrap();
        assert_eq!(args.command, Command::Layout);
        assert_eq!(args.width, Some(90.0));
        assert_eq!(args.height, Some(50.5));
        assert_eq!(args.font_size, Some(9.0));
        assert_eq!(args.border_color.as_deref(), Some("#000"));
        assert!(args.sort_descending);
        assert_eq!(args.input.as_deref(), Some("hosts.json"));
    }

    #[test]
    fn parse_args_rejects_bad_usage() {
        let cases: [&[&str]; 4] = [
            &["--width"],
            &["--width", "wide"],
            &["--unknown"],
            &["a.json", "b.json"],
        ];
        for bad in cases {
            assert!(
                matches!(parse_args(&argv(bad)), Err(CliError::Usage(_))),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn build_options_applies_flags_over_defaults() {
        let args = parse_args(&argv(&["--width", "300", "--escape-labels"])).unwrap();
        let options = build_options(&args).unwrap();
        assert_eq!(options.width, 300.0);
        assert_eq!(options.height, 768.0);
        assert!(options.escape_labels);
    }

    #[test]
    fn build_options_rejects_zero_canvas() {
        let args = parse_args(&argv(&["--height", "0"])).unwrap();
        assert!(matches!(build_options(&args), Err(CliError::Render(_))));
    }
}
