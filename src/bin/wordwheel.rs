use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "wordwheel", version, about = "Generate wordwheel anagram puzzle images")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one puzzle image to a PNG file.
    Render(RenderArgs),
    /// Serve puzzles over HTTP, caching images in a bucket directory.
    Serve(ServeArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Use a specified input word instead of a random one.
    word: Option<String>,

    /// Use the letters in the order given, clockwise from 3 o'clock, followed by the centre.
    #[arg(long)]
    verbatim: bool,

    /// Output filename (default: today's date as YYYYMMDD.png).
    #[arg(short, long)]
    outfile: Option<PathBuf>,

    /// Size of the output image in pixels.
    #[arg(short, long, default_value_t = wordwheel::DEFAULT_OUTPUT_SIZE)]
    size: u32,

    /// Path to a font file.
    #[arg(short, long, default_value = wordwheel::DEFAULT_FONT_FILE)]
    fontfile: PathBuf,

    /// Word list used when no word is given.
    #[arg(long, default_value = "wordlist.txt")]
    wordlist: PathBuf,
}

#[derive(Parser, Debug)]
struct ServeArgs {
    /// Address to listen on.
    #[arg(long, env = "WORDWHEEL_ADDR", default_value = "0.0.0.0:8080")]
    addr: String,

    /// Directory acting as the image bucket.
    #[arg(long, env = "WORDWHEEL_BUCKET_DIR")]
    bucket_dir: PathBuf,

    /// Secret used to sign image URLs.
    #[arg(long, env = "WORDWHEEL_SIGNING_KEY", hide_env_values = true)]
    signing_key: String,

    /// Public base URL of this server, used to build signed image URLs.
    #[arg(long, env = "WORDWHEEL_BASE_URL", default_value = "http://localhost:8080")]
    base_url: String,

    /// Lifetime of signed image URLs, in seconds.
    #[arg(long, default_value_t = wordwheel::DEFAULT_URL_EXPIRY_SECS)]
    url_expiry: i64,

    /// Path to a font file.
    #[arg(short, long, env = "WORDWHEEL_FONT_FILE", default_value = wordwheel::DEFAULT_FONT_FILE)]
    fontfile: PathBuf,

    /// Word list used when a request names no word.
    #[arg(long, env = "WORDWHEEL_WORDLIST", default_value = "wordlist.txt")]
    wordlist: PathBuf,

    /// Request workers (default: number of CPUs).
    #[arg(long)]
    workers: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Serve(args) => cmd_serve(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut rng = rand::rng();
    let word = match args.word {
        Some(word) => word,
        None => wordwheel::WordList::load(&args.wordlist)
            .with_context(|| "choose a random word")?
            .choose(&mut rng)
            .to_string(),
    };
    let letters = wordwheel::word_to_letters(&word, args.verbatim, &mut rng)
        .with_context(|| format!("letters for '{word}'"))?;

    let config = wordwheel::RenderConfig::new(args.size, args.fontfile);
    let image = wordwheel::render(&letters, &config).with_context(|| "render wheel")?;

    let outfile = args.outfile.unwrap_or_else(|| {
        PathBuf::from(format!("{}.png", chrono::Local::now().format("%Y%m%d")))
    });
    image
        .save_png(&outfile)
        .with_context(|| format!("write png '{}'", outfile.display()))?;

    println!("{} saved.", outfile.display());
    println!("Done!");
    Ok(())
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let font = wordwheel::FontFace::load(&args.fontfile)?;
    let words = wordwheel::WordList::load(&args.wordlist)?;
    let store = wordwheel::FsObjectStore::open(&args.bucket_dir)
        .with_context(|| format!("open bucket '{}'", args.bucket_dir.display()))?;
    let signer = wordwheel::UrlSigner::new(&args.signing_key, &args.base_url)?
        .with_expiry_secs(args.url_expiry);

    let cache = wordwheel::ImageCache::new(
        Arc::new(store),
        wordwheel::WheelRenderer::new(font),
        signer,
    );
    let state = wordwheel::AppState::new(cache, words);

    let mut config = wordwheel::ServerConfig {
        addr: args.addr,
        ..wordwheel::ServerConfig::default()
    };
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    wordwheel::server::serve(&config, state)?;
    Ok(())
}
