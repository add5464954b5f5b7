mod error;
mod server;
mod wav;

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use ucheckin_core::{
    RenderSettings, SignalEncoder, SignalMode, SignalParameters, UcheckinError,
    DEFAULT_BANDWIDTH, DEFAULT_SYMBOL_SAMPLES,
};

use crate::error::CliError;

#[derive(Parser)]
#[command(name = "ucheckin")]
#[command(about = "Generate near-ultrasonic check-in chirp signals as WAV files")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    generate: GenerateArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve signal generation over HTTP (GET /api/signal)
    Serve {
        /// Address to listen on
        #[arg(short, long, default_value = "127.0.0.1:3000")]
        bind: SocketAddr,
    },
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// 5-digit hexadecimal code to encode
    #[arg(default_value = "15973")]
    message: String,

    /// Center frequency in kHz
    #[arg(default_value_t = 19.5)]
    center_khz: f64,

    /// Sample rate in kHz
    #[arg(default_value_t = 48.0)]
    sample_rate_khz: f64,

    /// Silence between two signals in ms
    #[arg(default_value_t = 500)]
    interval_ms: u32,

    /// Number of signals in the file
    #[arg(default_value_t = 10)]
    repeat: usize,

    /// Volume in percent (0-100)
    #[arg(default_value_t = 80.0)]
    volume_percent: f64,

    /// Chirp bandwidth in Hz
    #[arg(long, default_value_t = DEFAULT_BANDWIDTH)]
    bandwidth: f64,

    /// Samples per data chirp
    #[arg(long, default_value_t = DEFAULT_SYMBOL_SAMPLES)]
    symbol_samples: usize,

    /// Signal mode (0 = UCheck.in, 1 = Wi-Us, reserved)
    #[arg(long, default_value_t = 0)]
    mode: u8,

    /// Fraction of each data chirp shared with the next one, in [0, 1)
    #[arg(long, default_value_t = 0.0)]
    overlap: f64,

    /// Fill this many seconds (at most 300) with whole signals instead of using REPEAT
    #[arg(long, value_name = "SECONDS")]
    duration: Option<f64>,

    /// Directory the WAV file is written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,
}

impl GenerateArgs {
    fn signal_parameters(&self) -> Result<SignalParameters, UcheckinError> {
        let sample_rate = (self.sample_rate_khz * 1000.0).round();
        if !(sample_rate >= 1.0 && sample_rate <= u32::MAX as f64) {
            return Err(UcheckinError::InvalidParameter(format!(
                "sample rate must be a positive number of kHz (got {})",
                self.sample_rate_khz
            )));
        }
        SignalParameters::new(
            self.center_khz * 1000.0,
            self.bandwidth,
            self.symbol_samples,
            sample_rate as u32,
            SignalMode::try_from(self.mode)?,
        )
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Some(Commands::Serve { bind }) => serve_command(bind),
        None => generate_command(&cli.generate).map(|_| ()),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn serve_command(bind: SocketAddr) -> Result<(), CliError> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server::serve(bind))
}

fn generate_command(args: &GenerateArgs) -> Result<PathBuf, CliError> {
    let params = args.signal_parameters()?;
    let sample_rate = params.sample_rate();
    let mut encoder = SignalEncoder::new(params)?;
    encoder.set_overlap(args.overlap)?;

    let repeat = match args.duration {
        Some(seconds) => encoder.repeats_to_fill(&args.message, seconds, args.interval_ms)?,
        None => args.repeat,
    };
    let settings = RenderSettings {
        interval_ms: args.interval_ms,
        repeat,
        volume: args.volume_percent / 100.0,
    };

    let audio = encoder.render(&args.message, &settings)?;
    println!(
        "Encoded {} into {} audio samples ({} x, {:.2} s at {} Hz)",
        args.message,
        audio.samples.len(),
        repeat,
        audio.duration_secs(),
        sample_rate
    );

    let path = args.output_dir.join(SignalEncoder::file_name(&args.message));
    wav::write_wav(&path, &audio)?;
    println!("Wrote {}", path.display());

    Ok(path)
}
