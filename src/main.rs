//! Brick Breaker entry point
//!
//! Native builds preview generated levels on the terminal; the browser build
//! enters through `platform::web`.

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use brick_breaker::levelgen::{GenerationRequest, GenerationResult, Viewport, generate_level};
    use brick_breaker::platform;
    use clap::Parser;

    /// Preview procedurally generated brick layouts
    #[derive(Parser)]
    #[command(name = "brick-breaker")]
    #[command(about = "Generate and print brick-breaker levels", long_about = None)]
    struct Cli {
        /// Level number (1-based)
        #[arg(short, long, default_value_t = 1)]
        level: u32,

        /// Number of consecutive levels to print
        #[arg(short, long, default_value_t = 1)]
        count: u32,

        /// Viewport width in pixels
        #[arg(long, default_value_t = 800.0)]
        width: f64,

        /// Viewport height in pixels
        #[arg(long, default_value_t = 600.0)]
        height: f64,

        /// Fixed seed (derived from level and viewport when omitted)
        #[arg(short, long)]
        seed: Option<String>,

        /// Print JSON instead of a text grid
        #[arg(long)]
        json: bool,
    }

    fn print_text(result: &GenerationResult, level: u32) {
        println!(
            "Level {}: {} ({}x{}, cell {}px, ball speed {})",
            level,
            result.meta.pattern,
            result.meta.cols,
            result.meta.rows,
            result.meta.cell.w,
            result.modifiers.ball_speed
        );
        for row in result.grid.iter_rows() {
            let line: String = row
                .iter()
                .map(|kind| match kind.code() {
                    0 => '.',
                    1 => '#',
                    code => char::from(b'0' + code),
                })
                .collect();
            println!("  {}", line);
        }
    }

    pub fn run() -> Result<(), serde_json::Error> {
        platform::init_logging();
        let cli = Cli::parse();

        let first = cli.level.max(1);
        for level in first..first.saturating_add(cli.count.max(1)) {
            let mut request = GenerationRequest::new(level, Viewport::new(cli.width, cli.height));
            request.seed = cli.seed.clone();
            let result = generate_level(&request);
            if cli.json {
                println!("{}", serde_json::to_string(&result)?);
            } else {
                print_text(&result, level);
            }
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(err) = cli::run() {
        log::error!("{}", err);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
