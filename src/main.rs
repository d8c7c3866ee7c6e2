//! Command-line interface for tibphrase
//!
//! Usage:
//!   tibphrase [OPTIONS] <TEXT>
//!   echo "ཆོས་སྐུ་ངོ་བོ་ཉིད།" | tibphrase
//!   tibphrase serve [--bind ADDR]

use std::env;
use std::fs;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use tibphrase::{default_config_path, Config, Dictionary, MemoryDictionary, PhraseParser};
use tracing_subscriber::EnvFilter;

fn print_help() {
    eprintln!(
        r#"tibphrase - Tibetan and Wylie phrase segmenter

USAGE:
    tibphrase [OPTIONS] [TEXT]
    echo "ཆོས་སྐུ་ངོ་བོ་ཉིད།" | tibphrase
    tibphrase serve [OPTIONS]

OPTIONS:
    -u, --solr-url <URL>  Solr select URL of the dictionary index
    -d, --dict <FILE>     Use a local TSV dictionary (id, tibetan, wylie) instead of Solr
    -c, --config <FILE>   Configuration file (default: {})
    -b, --bind <ADDR>     Listen address for serve
    -j, --json            Output as JSON
    -D, --debug           Include the parse trace
        --save-config     Write the effective configuration and exit
    -h, --help            Show this help message

EXAMPLES:
    tibphrase "chos sku ngo bo nyid"
    tibphrase -d dictionary.tsv "ཆོས་སྐུ་ངོ་བོ་ཉིད།"
    tibphrase -u http://localhost:8983/solr/dict/select --save-config
    RUST_LOG=debug tibphrase serve -b 0.0.0.0:8080
"#,
        default_config_path().display()
    );
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[derive(Default)]
struct Options {
    serve: bool,
    solr_url: Option<String>,
    dict_path: Option<String>,
    config_path: Option<PathBuf>,
    bind: Option<String>,
    json_output: bool,
    debug: bool,
    save_config: bool,
    text: Option<String>,
}

fn parse_args(args: &[String]) -> Options {
    let mut opts = Options::default();

    let value_of = |i: &mut usize, flag: &str| -> String {
        *i += 1;
        match args.get(*i) {
            Some(v) => v.clone(),
            None => fail(format!("{} requires a value", flag)),
        }
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                process::exit(0);
            }
            "serve" if i == 1 => opts.serve = true,
            "-u" | "--solr-url" => opts.solr_url = Some(value_of(&mut i, "--solr-url")),
            "-d" | "--dict" => opts.dict_path = Some(value_of(&mut i, "--dict")),
            "-c" | "--config" => opts.config_path = Some(PathBuf::from(value_of(&mut i, "--config"))),
            "-b" | "--bind" => opts.bind = Some(value_of(&mut i, "--bind")),
            "-j" | "--json" => opts.json_output = true,
            "-D" | "--debug" => opts.debug = true,
            "--save-config" => opts.save_config = true,
            arg if !arg.starts_with('-') => opts.text = Some(arg.to_string()),
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    opts
}

fn load_dictionary(opts: &Options, config: &Config) -> Arc<dyn Dictionary> {
    if let Some(ref path) = opts.dict_path {
        let content = fs::read_to_string(path)
            .unwrap_or_else(|e| fail(format!("reading dictionary file '{}': {}", path, e)));
        let dict = MemoryDictionary::from_tsv(&content);
        tracing::info!(entries = dict.len(), path = path.as_str(), "loaded local dictionary");
        return Arc::new(dict);
    }

    solr_dictionary(config)
}

#[cfg(feature = "solr")]
fn solr_dictionary(config: &Config) -> Arc<dyn Dictionary> {
    match tibphrase::SolrDictionary::from_config(config) {
        Ok(dict) => Arc::new(dict),
        Err(e) => fail(e),
    }
}

#[cfg(not(feature = "solr"))]
fn solr_dictionary(_config: &Config) -> Arc<dyn Dictionary> {
    fail("built without the solr feature; pass --dict <FILE>")
}

fn read_stdin() -> String {
    let stdin = io::stdin();
    let mut lines = Vec::new();
    for line in stdin.lock().lines() {
        match line {
            Ok(l) => lines.push(l),
            Err(e) => fail(format!("reading stdin: {}", e)),
        }
    }
    lines.join("\n")
}

#[cfg(feature = "server")]
fn run_server(parser: PhraseParser<dyn Dictionary>, bind: &str) {
    let addr: std::net::SocketAddr = bind
        .parse()
        .unwrap_or_else(|e| fail(format!("invalid bind address '{}': {}", bind, e)));

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| fail(e));
    if let Err(e) = runtime.block_on(tibphrase::server::serve(addr, parser)) {
        fail(e);
    }
}

#[cfg(not(feature = "server"))]
fn run_server(_parser: PhraseParser<dyn Dictionary>, _bind: &str) {
    fail("built without the server feature")
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let opts = parse_args(&args);

    init_logging(if opts.serve { "info" } else { "warn" });

    let config_path = opts.config_path.clone().unwrap_or_else(default_config_path);
    let mut config = Config::load(&config_path).unwrap_or_else(|e| fail(e));
    if let Some(ref url) = opts.solr_url {
        config.solr_url = url.clone();
    }
    if let Some(ref bind) = opts.bind {
        config.bind = bind.clone();
    }

    if opts.save_config {
        config.save(&config_path).unwrap_or_else(|e| fail(e));
        eprintln!("Saved configuration to {}", config_path.display());
        return;
    }

    // The blocking Solr client is built before any async runtime starts
    let parser = PhraseParser::with_arc(load_dictionary(&opts, &config));

    if opts.serve {
        run_server(parser, &config.bind);
        return;
    }

    // Read from stdin if no text provided
    let input_text = opts.text.clone().unwrap_or_else(read_stdin);

    let response = match parser.parse(&input_text, opts.debug) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_help();
            process::exit(1);
        }
    };

    // Output
    if opts.json_output {
        match serde_json::to_string_pretty(&response) {
            Ok(json) => println!("{}", json),
            Err(e) => fail(format!("serializing to JSON: {}", e)),
        }
    } else {
        for m in &response.parsed {
            println!("{}", m);
        }
        if let Some(ref lines) = response.debug {
            for line in lines {
                eprintln!("{}", line);
            }
        }
    }
}
